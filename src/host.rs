use std::{fs, path::PathBuf};

use crate::error::RuntimeErrorKind;

/// The embedding surface an `Evaluator` talks to instead of the real world directly: standard
/// output, standard error, and file loading for imports. Swapping implementations is how tests
/// capture output without touching the filesystem or the terminal.
pub trait Host {
	fn stdout(&mut self, text: &str);
	fn stderr(&mut self, text: &str);

	/// Loads the source text of an imported module.
	///
	/// # Errors
	/// `ImportUnsupported` if this host has no notion of a filesystem to resolve `path` against.
	fn load_file(&mut self, path: &str) -> Result<String, RuntimeErrorKind>;
}

/// An in-memory host that captures everything written to `stdout`/`stderr` into owned buffers
/// and always rejects imports. Used by embedding scenarios and by this crate's own tests, where
/// touching a real terminal or filesystem would make output non-deterministic.
#[derive(Debug, Default)]
pub struct BufferedHost {
	stdout: String,
	stderr: String,
}

impl BufferedHost {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn stdout_contents(&self) -> &str {
		&self.stdout
	}

	#[must_use]
	pub fn stderr_contents(&self) -> &str {
		&self.stderr
	}
}

impl Host for BufferedHost {
	fn stdout(&mut self, text: &str) {
		self.stdout.push_str(text);
		self.stdout.push('\n');
	}

	fn stderr(&mut self, text: &str) {
		self.stderr.push_str(text);
		self.stderr.push('\n');
	}

	fn load_file(&mut self, path: &str) -> Result<String, RuntimeErrorKind> {
		Err(RuntimeErrorKind::ImportUnsupported { path: path.to_owned() })
	}
}

/// The real host used by the `quack` binary: writes to the process's actual stdout/stderr and
/// resolves import paths relative to a fixed base directory (the directory containing the file
/// passed to `quack run`).
#[derive(Debug)]
pub struct SystemHost {
	base_dir: PathBuf,
	colored_errors: bool,
}

impl SystemHost {
	#[must_use]
	pub fn new(base_dir: PathBuf, colored_errors: bool) -> Self {
		colored::control::set_override(colored_errors);
		Self { base_dir, colored_errors }
	}

	#[must_use]
	pub const fn colored_errors(&self) -> bool {
		self.colored_errors
	}
}

impl Host for SystemHost {
	fn stdout(&mut self, text: &str) {
		println!("{text}");
	}

	fn stderr(&mut self, text: &str) {
		eprintln!("{text}");
	}

	fn load_file(&mut self, path: &str) -> Result<String, RuntimeErrorKind> {
		fs::read_to_string(self.base_dir.join(path)).map_err(|_| RuntimeErrorKind::ImportUnsupported { path: path.to_owned() })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn buffered_host_captures_stdout_lines() {
		let mut host = BufferedHost::new();
		host.stdout("5");
		host.stdout("hi ada");
		assert_eq!(host.stdout_contents(), "5\nhi ada\n");
	}

	#[test]
	fn buffered_host_rejects_every_import() {
		let mut host = BufferedHost::new();
		let result = host.load_file("anything.quack");
		assert!(matches!(result, Err(RuntimeErrorKind::ImportUnsupported { .. })));
	}
}
