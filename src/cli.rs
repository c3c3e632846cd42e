use std::path::PathBuf;

use clap::Parser;

use crate::{config::Config, evaluator::Evaluator, host::SystemHost, lexer::tokenize, parser::parse};

/// The `quack` command-line interface.
#[derive(Parser)]
#[command(name = "quack", about = "A tree-walking evaluator for QuackScript")]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(clap::Subcommand)]
pub enum Command {
	/// Tokenizes, parses, and evaluates a QuackScript file.
	Run { file: PathBuf },

	/// Tokenizes and parses a QuackScript file without evaluating it, reporting only syntax
	/// errors. Useful for editor integration and CI.
	Check { file: PathBuf },
}

impl Cli {
	/// Runs whichever subcommand was selected.
	///
	/// # Errors
	/// Returns an error if the target file can't be read or contains a syntax error. A runtime
	/// error during `run` is reported to stderr by the evaluator itself and does not surface here
	/// (see `Evaluator::execute`).
	pub fn execute(self) -> anyhow::Result<()> {
		match self.command {
			Command::Run { file } => run(&file),
			Command::Check { file } => check(&file),
		}
	}
}

fn run(file: &std::path::Path) -> anyhow::Result<()> {
	let base_dir = file.parent().map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf);
	let config = Config::load(&base_dir)?;

	let source = std::fs::read_to_string(file)?;
	let tokens = tokenize(&source)?;
	let module = parse(tokens)?;

	let mut host = SystemHost::new(base_dir, config.colored_errors);
	let mut evaluator = Evaluator::new(&mut host);
	evaluator.execute(&module, Some(&source))?;
	Ok(())
}

fn check(file: &std::path::Path) -> anyhow::Result<()> {
	let source = std::fs::read_to_string(file)?;
	match tokenize(&source).and_then(parse) {
		Ok(_module) => {
			println!("no syntax errors");
			Ok(())
		}
		Err(error) => {
			eprintln!("{error}");
			std::process::exit(1);
		}
	}
}
