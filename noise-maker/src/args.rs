use std::path::PathBuf;

use clap::Parser;
use derive_getters::Getters;

#[derive(Parser, Debug, Getters)]
#[command(name = "noise-maker")]
#[command(about = "Write a synthetic W3C access log for feeding access-report", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value = "RawLogsInput/access.log")]
    output: PathBuf,

    /// Number of request lines to write
    #[arg(long, default_value_t = 10_000)]
    lines: usize,

    /// Size of the client address pool
    #[arg(long, default_value_t = 50)]
    clients: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Replace every Nth line with a truncated one (0 disables)
    #[arg(long, default_value_t = 0)]
    malformed_every: usize,
}
