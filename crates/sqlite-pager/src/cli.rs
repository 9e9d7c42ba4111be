use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "sqlite-pager")]
pub struct Args {
    /// Database used when a request carries no path (same as a `connect`).
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Logging level (stderr). Also supports RUST_LOG.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Rows per page when a request gives no limit.
    #[arg(long, default_value_t = 20)]
    pub page_size: usize,

    /// Upper bound for any requested page size.
    #[arg(long, default_value_t = 1000)]
    pub max_rows: usize,

    /// SQLite busy timeout.
    #[arg(long, default_value_t = 2_000)]
    pub busy_timeout_ms: u64,
}
