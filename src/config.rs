use std::path::Path;

/// Project-level configuration, read from an optional `quack.toml` in the current directory.
/// Every field has a default, so the file is never required; `quack run`/`quack check` work the
/// same with or without one.
#[derive(Debug, Clone, Copy)]
pub struct Config {
	pub colored_errors: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self { colored_errors: true }
	}
}

impl Config {
	/// Reads `quack.toml` from `dir` if it exists, falling back to defaults for any field the file
	/// doesn't set (or if the file doesn't exist at all). A `quack.toml` that exists but fails to
	/// parse is reported as an error rather than silently ignored.
	///
	/// # Errors
	/// Returns an error if `quack.toml` exists but isn't valid TOML.
	pub fn load(dir: &Path) -> anyhow::Result<Self> {
		let path = dir.join("quack.toml");
		let Ok(contents) = std::fs::read_to_string(&path) else { return Ok(Self::default()) };

		let document = contents.parse::<toml_edit::DocumentMut>()?;
		let colored_errors = document
			.get("options")
			.and_then(|options| options.get("colored_errors"))
			.and_then(toml_edit::Item::as_bool)
			.unwrap_or_else(|| Self::default().colored_errors);

		Ok(Self { colored_errors })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_quack_toml_falls_back_to_defaults() {
		let config = Config::load(Path::new("/nonexistent/quackscript/project")).unwrap();
		assert!(config.colored_errors);
	}

	#[test]
	fn reads_colored_errors_from_a_real_file() {
		let dir = std::env::temp_dir().join(format!("quackscript-config-test-{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		std::fs::write(dir.join("quack.toml"), "[options]\ncolored_errors = false\n").unwrap();

		let config = Config::load(&dir).unwrap();
		assert!(!config.colored_errors);

		std::fs::remove_dir_all(&dir).unwrap();
	}
}
