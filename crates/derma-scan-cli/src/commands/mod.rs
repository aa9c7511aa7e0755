//! CLI command definitions and handlers.

pub mod analyze;
pub mod models;

use clap::{Parser, Subcommand};

/// `DermaScan` - Skin lesion screening from photos
#[derive(Parser)]
#[command(name = "derma-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared analyze arguments (paths, advice mode, flags).
    #[command(flatten)]
    pub analyze: analyze::AnalyzeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Screen lesion photos
    Analyze(analyze::AnalyzeArgs),
    /// Manage classifier weights
    Models(models::ModelsArgs),
}

/// Process exit code for the binary.
///
/// 0 = all screened images succeeded, 1 = at least one prediction failed,
/// 2 = usage or setup error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Everything processed without prediction failures.
    Success,
    /// At least one image failed prediction.
    PredictionFailures,
    /// Usage or setup error.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::PredictionFailures => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
