use clap::Parser;
use reckon::config::CalculatorConfig;
use reckon::core::Calculator;
use reckon::observe::TraceObserver;
use reckon::persist::{self, AutoSaveObserver};
use reckon::repl::Repl;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Interactive calculator with undoable, persistent history.
#[derive(Debug, Parser)]
#[command(name = "reckon", version, about)]
struct Args {
    /// Maximum number of history entries
    #[arg(long)]
    max_history_size: Option<usize>,

    /// Maximum number of undo snapshots
    #[arg(long)]
    max_undo_depth: Option<usize>,

    /// History file path
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Start with an empty history instead of loading the saved one
    #[arg(long)]
    no_load: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match CalculatorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(size) = args.max_history_size {
        config.max_history_size = size.max(1);
    }
    if let Some(depth) = args.max_undo_depth {
        config.max_undo_depth = depth.max(1);
    }
    if let Some(path) = args.history_file {
        config.history_file = path;
    }

    let mut calc = Calculator::from_config(&config);
    calc.subscribe(Box::new(TraceObserver));
    calc.subscribe(Box::new(AutoSaveObserver::new(&config.history_file)));

    // Resume the saved session, if any. The pre-load state stays on the
    // undo stack, so an unwanted load is a single undo away.
    if !args.no_load && config.history_file.exists() {
        match persist::load_csv(&config.history_file, calc.operations()) {
            Ok(entries) if !entries.is_empty() => calc.load(entries),
            Ok(_) => {}
            Err(e) => eprintln!("Warning: could not load saved history: {e}"),
        }
    }
    calc.drain_warnings();

    let config_for_repl = config.clone();
    let mut repl = Repl::new(calc, config_for_repl);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = repl.run(stdin.lock(), stdout.lock()) {
        eprintln!("Fatal error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
