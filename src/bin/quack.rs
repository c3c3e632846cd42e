use clap::Parser as _;
use quackscript::cli::Cli;

fn main() -> anyhow::Result<()> {
	Cli::parse().execute()
}
