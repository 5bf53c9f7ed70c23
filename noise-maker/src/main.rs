mod args;
mod generator;
mod writer;

use args::CliArgs;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use writer::write_log;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    write_log(&args)
}
