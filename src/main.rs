use clap::Parser;
use oil_gauge::{Cli, run_app};
use std::{panic, process::ExitCode};

fn main() -> ExitCode {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    // Logs go to stderr; stdout carries the chart payloads
    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("oil_gauge"), my_code_level)
        .parse_default_env()
        .init();

    let args = Cli::parse();

    match run_app(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
