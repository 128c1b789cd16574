use anyhow::Context;
use clap::Parser;
use weatherman::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let path = cli.path.clone();
    run(cli).with_context(|| format!("Weather report for {} failed", path.display()))
}
