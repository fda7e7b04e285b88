use std::env;
use std::io;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use docseek_cli::{run_session, RunContext};
use docseek_core::config::Config;
use docseek_core::error::SetupError;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(root_arg: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let context = RunContext::prepare(root_arg, config.settings()?)?;

    let (report, committed) = context.build_index()?;
    info!(indexed = report.indexed, skipped = report.unsupported, "indexing phase complete");

    let engine = context.open_engine(&committed)?;
    let stdin = io::stdin();
    let executed = run_session(&engine, &context.walker, stdin.lock(), io::stdout().lock())?;
    info!(queries = executed, "session ended");
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let root_arg = match args.get(1).map(String::as_str) {
        Some(arg) if args.len() == 2 && !arg.is_empty() => arg.to_string(),
        _ => {
            let prog = args.first().map(String::as_str).unwrap_or("docseek");
            eprintln!("An error occurred. Type: ArgumentsMismatch, Message: {}", SetupError::MissingRoot);
            eprintln!("Usage: {} <folder>", prog);
            return ExitCode::from(2);
        }
    };

    init_tracing();
    match run(&root_arg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("An error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
