//! Channel Check - Main Entry Point

use clap::Parser;
use cli::{init_logging, run, Args};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level, args.json_logs)?;

    info!("=== Channel Check v{} ===", env!("CARGO_PKG_VERSION"));

    let outcome = run(&args)?;
    info!(
        "Analyzed {} recordings, {} failed to load or report, {} channels skipped",
        outcome.analyzed, outcome.failed, outcome.skipped
    );

    if args.fail_on_violation && !outcome.clean() {
        std::process::exit(2);
    }
    Ok(())
}
