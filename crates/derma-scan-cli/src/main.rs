//! `DermaScan` CLI - Skin lesion screening tool.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use derma_scan_cli::commands::{self, Cli, Commands, ExitCode};
use derma_scan_cli::config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = match cli.command {
        Some(Commands::Analyze(ref args)) => run_analyze(args),
        Some(Commands::Models(ref args)) => match commands::models::run(args) {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::Error
            }
        },
        None => {
            // Default behavior: run analyze with flattened args
            if cli.analyze.paths.is_empty() {
                eprintln!("error: No paths specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            run_analyze(&cli.analyze)
        }
    };

    exit_code.into()
}

fn run_analyze(args: &commands::analyze::AnalyzeArgs) -> ExitCode {
    let config = AppConfig::load();
    let args = commands::analyze::AnalyzeArgs::with_config(args.clone(), &config);

    match commands::analyze::run(&args) {
        Ok(result) => result.exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
