mod adapters;
mod cli;
mod logging;

use clap::Parser;

use sqlite_pager::AppResult;

use crate::cli::Args;

fn main() -> AppResult<()> {
    let args = Args::parse();
    logging::init(&args.log_level);
    adapters::bridge::run(args)
}
