//! Analyze command - screen lesion photos.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use derma_scan_adapters::{model_path, set_models_dir, FsImageSource, HttpAdviceProvider};
use derma_scan_core::inference::{get_device, preprocess, LazyModel, LesionClassifier};
use derma_scan_core::session::PREDICTION_FAILED;
use derma_scan_core::{
    interpret, AdviceProvider, Dashboard, DashboardEvent, DashboardState, ImageSource,
    KeywordAdvice, LesionImage, ProgressEvent, ProgressSink, ResultOutput, ScreeningRecord,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonMode, JsonOutput, ProgressBar};

/// Default advice endpoint when neither config nor CLI set one.
const DEFAULT_ADVICE_ENDPOINT: &str = "http://localhost:5002/api/advice";

/// Output format for screening records.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// How advice for each result is obtained.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum AdviceMode {
    /// Fetch advice from the remote endpoint
    #[default]
    Remote,
    /// Use the built-in keyword advisory
    Keyword,
    /// Skip advice entirely
    Off,
}

/// Shared arguments for lesion screening.
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Files or directories to screen
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Advice source for each result
    #[arg(long, value_enum)]
    pub advice: Option<AdviceMode>,

    /// Remote advice endpoint URL
    #[arg(long, value_name = "URL")]
    pub advice_endpoint: Option<String>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Recursive: config applies only if CLI --recursive not passed
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        // Advice mode: CLI > config (accessor provides fallback)
        if args.advice.is_none() {
            args.advice = config.advice.mode.as_ref().and_then(|s| match s.as_str() {
                "remote" => Some(AdviceMode::Remote),
                "keyword" => Some(AdviceMode::Keyword),
                "off" => Some(AdviceMode::Off),
                _ => None,
            });
        }
        if args.advice_endpoint.is_none() {
            args.advice_endpoint.clone_from(&config.advice.endpoint);
        }

        // Output format: CLI > config
        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        // Models directory: CLI > config
        if args.models_dir.is_none() {
            args.models_dir.clone_from(&config.models.dir);
        }

        args
    }

    /// Get advice mode with fallback to remote.
    fn advice(&self) -> AdviceMode {
        self.advice.unwrap_or_default()
    }

    /// Get advice endpoint with fallback to the default URL.
    fn advice_endpoint(&self) -> &str {
        self.advice_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ADVICE_ENDPOINT)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the analyze command.
pub struct AnalyzeResult {
    /// Number of images screened successfully.
    pub processed: usize,
    /// Number of images that failed prediction.
    pub failed: usize,
    /// Number of images skipped.
    pub skipped: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    info!("Running analyze command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    // Apply models directory override if specified
    if let Some(ref models_dir) = args.models_dir {
        debug!("Using custom models directory: {}", models_dir.display());
        set_models_dir(Some(models_dir.clone()));
    }

    let weights = model_path("lesion").context("Unknown model configuration")?;
    if !weights.exists() {
        anyhow::bail!(
            "Classifier weights not found at {}. Run `derma-scan models fetch` first.",
            weights.display()
        );
    }

    let device = get_device();
    let model = LazyModel::new(&weights, device.clone(), LesionClassifier::new);

    let mut dashboard = Dashboard::new();
    if model.is_ready() {
        dashboard.apply(DashboardEvent::ModelReady);
    } else {
        // A failed load stays failed for the session; there is no retry.
        anyhow::bail!(
            "Classifier weights at {} could not be loaded",
            weights.display()
        );
    }

    let provider: Option<Box<dyn AdviceProvider>> = match args.advice() {
        AdviceMode::Remote => Some(Box::new(HttpAdviceProvider::new(args.advice_endpoint()))),
        AdviceMode::Keyword => Some(Box::new(KeywordAdvice)),
        AdviceMode::Off => None,
    };

    // Initialize image source
    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    // Determine if we should show progress
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let mode = match args.format() {
        OutputFormat::Jsonl => JsonMode::Lines,
        OutputFormat::Json => JsonMode::Array {
            pretty: args.pretty,
        },
    };
    let output = JsonOutput::stdout(mode);

    let classify = |image: &LesionImage| -> Result<f32> {
        let classifier = model.get()?;
        // The input tensor is scoped to this closure and dropped on
        // every path.
        let input = preprocess(&image.image, &device)?;
        classifier.classify(&input)
    };

    screen_images(
        &source,
        &classify,
        &mut dashboard,
        provider.as_deref(),
        &output,
        &progress_bar,
    )
}

/// Screen each image, driving the dashboard reducer through the full
/// pick -> analyze -> interpret -> advise cycle.
///
/// All collaborators come in through the core ports so the loop can be
/// exercised with mock sources and outputs.
pub fn screen_images(
    source: &dyn ImageSource,
    classify: &dyn Fn(&LesionImage) -> Result<f32>,
    dashboard: &mut Dashboard,
    provider: Option<&dyn AdviceProvider>,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
) -> Result<AnalyzeResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut failed = 0usize;
    let mut skipped = 0usize;

    for (index, (path, image_result)) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: e.to_string(),
                });
                skipped += 1;
                continue;
            }
        };

        dashboard.apply(DashboardEvent::ImagePicked { path: path.clone() });
        dashboard.apply(DashboardEvent::AnalyzeRequested);
        let generation = dashboard.generation();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        match classify(&image) {
            Ok(probability) => {
                let result = interpret(probability);
                let advice = provider.map_or_else(String::new, |p| p.advise(&result));

                dashboard.apply(DashboardEvent::AnalysisSucceeded {
                    generation,
                    result: result.clone(),
                    advice: advice.clone(),
                });

                let record = ScreeningRecord::new(path, iso_timestamp(), &result, advice);
                progress.on_event(ProgressEvent::Completed {
                    record: record.clone(),
                });

                output.write(&record)?;
                processed += 1;
            }
            Err(e) => {
                warn!("Prediction failed for {path}: {e:#}");
                dashboard.apply(DashboardEvent::AnalysisFailed { generation });

                let message = match dashboard.state() {
                    DashboardState::Failed { message, .. } => message.clone(),
                    _ => PREDICTION_FAILED.to_string(),
                };
                progress.on_event(ProgressEvent::Failed { path, message });
                failed += 1;
            }
        }
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        processed,
        failed,
        skipped,
    });

    let exit_code = if failed > 0 {
        ExitCode::PredictionFailures
    } else {
        ExitCode::Success
    };

    Ok(AnalyzeResult {
        processed,
        failed,
        skipped,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
