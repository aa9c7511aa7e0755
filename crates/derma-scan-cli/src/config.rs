//! Configuration file support for derma-scan.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/derma-scan/config.toml` (lowest priority)
//! - Project-local: `.derma-scan.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Advice lookup settings.
    pub advice: AdviceConfig,
    /// Model settings.
    pub models: ModelsConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Advice lookup configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Advice mode: "remote", "keyword" or "off".
    pub mode: Option<String>,
    /// Remote advice endpoint URL.
    pub endpoint: Option<String>,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/derma-scan/config.toml`
    /// 2. Project-local: `.derma-scan.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        // Load project-local config (higher priority, merged)
        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        // Validate merged config
        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), String> {
        if let Some(ref m) = self.advice.mode {
            if m != "remote" && m != "keyword" && m != "off" {
                return Err(format!(
                    "advice.mode must be 'remote', 'keyword' or 'off', got '{m}'"
                ));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!("output.format must be 'json' or 'jsonl', got '{f}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Advice
        self.advice.mode = other.advice.mode.or_else(|| self.advice.mode.take());
        self.advice.endpoint = other
            .advice
            .endpoint
            .or_else(|| self.advice.endpoint.take());

        // Models
        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("derma-scan").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.derma-scan.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".derma-scan.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.advice.mode.is_none());
        assert!(config.advice.endpoint.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: AppConfig = toml::from_str(toml).expect("parse empty config");
        assert!(config.general.recursive.is_none());
    }

    #[test]
    fn test_parse_advice_section() {
        let toml = r"
[advice]
mode = 'keyword'
";
        let config: AppConfig = toml::from_str(toml).expect("parse advice config");
        assert_eq!(config.advice.mode, Some("keyword".to_string()));
        assert!(config.advice.endpoint.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[advice]
mode = 'remote'
endpoint = 'http://localhost:5002/api/advice'

[models]
dir = '/tmp/models'

[output]
format = 'json'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.advice.mode, Some("remote".to_string()));
        assert_eq!(
            config.advice.endpoint,
            Some("http://localhost:5002/api/advice".to_string())
        );
        assert_eq!(config.models.dir, Some(PathBuf::from("/tmp/models")));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.output.progress, Some(false));
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[advice]
mode = 'remote'
endpoint = 'http://example.com/api/advice'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[advice]
mode = 'keyword'

[output]
format = 'json'
",
        )
        .expect("parse override");

        base.merge(override_config);

        // Mode overridden
        assert_eq!(base.advice.mode, Some("keyword".to_string()));
        // Endpoint preserved from base
        assert_eq!(
            base.advice.endpoint,
            Some("http://example.com/api/advice".to_string())
        );
        // Output added from override
        assert_eq!(base.output.format, Some("json".to_string()));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[output]
format = 'jsonl'
pretty = true
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.output.format, Some("jsonl".to_string()));
        assert_eq!(base.output.pretty, Some(true));
    }

    #[test]
    fn test_merge_empty_base_accepts_override() {
        let mut base = AppConfig::default();

        let override_config: AppConfig = toml::from_str(
            r"
[models]
dir = '/srv/weights'
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.models.dir, Some(PathBuf::from("/srv/weights")));
    }

    #[test]
    fn test_partial_output_config() {
        let toml = r"
[output]
pretty = true
";
        let config: AppConfig = toml::from_str(toml).expect("parse partial output");

        assert_eq!(config.output.pretty, Some(true));
        assert!(config.output.format.is_none());
        assert!(config.output.progress.is_none());
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[advice
mode = 'remote'
"; // Missing closing bracket
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r"
[general]
recursive = 'yes'
";
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_validate_advice_mode_invalid() {
        let mut config = AppConfig::default();
        config.advice.mode = Some("oracle".to_string());

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("advice.mode"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_all_valid_passes() {
        let config: AppConfig = toml::from_str(
            r"
[advice]
mode = 'off'

[output]
format = 'json'
",
        )
        .expect("parse valid config");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_find_config_in_parents() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join(".derma-scan.toml"), "").unwrap();

        let found = find_config_in_parents(&nested).expect("config found in ancestor");
        assert_eq!(found, temp.path().join(".derma-scan.toml"));
    }
}
