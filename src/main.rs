use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_santorini::prelude::*;

fn main() {
    // Initialize program options and environment.
    dotenvy::dotenv().ok();
    let options = match AdminOptions::try_parse() {
        Ok(options) => options,
        Err(_) => usage_exit(),
    };
    if options.validate().is_err() {
        usage_exit();
    }

    if let Err(e) = run(options) {
        eprintln!("fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(options: AdminOptions) -> anyhow::Result<()> {
    let _logger = Logger::try_with_env_or_str(
        options.log_level.clone().unwrap_or("info".into()).as_str(),
    )?
    .write_mode(WriteMode::BufferAndFlush)
    .log_to_stderr()
    .adaptive_format_for_stderr(match cfg!(debug_assertions) {
        true => AdaptiveFormat::WithThread,
        _ => AdaptiveFormat::Default,
    })
    .start()?;

    let config = SantoriniConfig::load(&options.config)?;
    let standings = run_tournament(&options, &config)?;
    println!("\n{standings}");
    Ok(())
}

fn usage_exit() -> ! {
    eprintln!("usage: santorini [-cup n | -league n]");
    eprintln!("n must be a positive integer.");
    std::process::exit(1);
}
