//! Output settings for validation runs.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable that overrides [`Settings::output_dir`].
pub const OUTPUT_DIR_ENV: &str = "KHET_OUTPUT_DIR";

/// Where and how validation artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Directory that receives every artifact.
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,

    /// Extension of per-config artifacts, without the dot.
    #[serde(default = "default_extension")]
    extension: String,

    /// File name used when the config file itself cannot be found.
    #[serde(default = "default_fallback_name")]
    fallback_name: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_extension() -> String {
    "out".to_string()
}

fn default_fallback_name() -> String {
    "noConfig.out".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            extension: default_extension(),
            fallback_name: default_fallback_name(),
        }
    }
}

impl Settings {
    /// Creates settings with the default layout, writing into `output_dir`.
    #[instrument(skip(output_dir), fields(output_dir = %output_dir.as_ref().display()))]
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Loads settings from a TOML file. Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        info!(output_dir = %settings.output_dir.display(), "Settings loaded");
        Ok(settings)
    }

    /// Applies overrides from the process environment.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            debug!(%dir, "Output directory overridden from environment");
            self.output_dir = PathBuf::from(dir);
        }
        self
    }

    /// Replaces the output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Artifact path for a config file: same stem, configured extension.
    #[instrument(skip(self, config_path), fields(config = %config_path.as_ref().display()))]
    pub fn output_path_for(&self, config_path: impl AsRef<Path>) -> PathBuf {
        let stem = config_path
            .as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.output_dir.join(format!("{}.{}", stem, self.extension))
    }

    /// Artifact path used when the config file cannot be found.
    pub fn fallback_path(&self) -> PathBuf {
        self.output_dir.join(&self.fallback_name)
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_dir(), Path::new("out"));
        assert_eq!(settings.extension(), "out");
        assert_eq!(settings.fallback_path(), Path::new("out/noConfig.out"));
    }

    #[test]
    fn test_output_path_uses_stem() {
        let settings = Settings::default();
        assert_eq!(
            settings.output_path_for("configs/game1.txt"),
            Path::new("out/game1.out")
        );
        assert_eq!(
            settings.output_path_for("board"),
            Path::new("out/board.out")
        );
        assert_eq!(
            settings.output_path_for("boards/v1.2.txt"),
            Path::new("out/v1.2.out")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str("extension = \"txt\"").unwrap();
        assert_eq!(settings.extension(), "txt");
        assert_eq!(settings.output_dir(), Path::new("out"));
        assert_eq!(settings.fallback_name(), "noConfig.out");
    }

    #[test]
    fn test_env_override() {
        let settings = Settings::default().with_overrides(|key| {
            (key == OUTPUT_DIR_ENV).then(|| "artifacts".to_string())
        });
        assert_eq!(settings.output_dir(), Path::new("artifacts"));

        let settings = Settings::default().with_overrides(|_| Some("  ".to_string()));
        assert_eq!(settings.output_dir(), Path::new("out"));
    }
}
