//! Writes the single artifact of a validation run.
//!
//! Every run produces exactly one file: the canonical rendering on
//! success, or one diagnostic line on failure. The artifact is named after
//! the config file's stem, except when the config file does not exist,
//! in which case the diagnostic goes to the fixed fallback file.

use crate::khet::{Diagnostic, DiagnosticKind, render, validate};
use crate::settings::Settings;
use derive_more::{Display, Error};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Result of validating one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "diagnostic", rename_all = "snake_case")]
pub enum Outcome {
    /// The configuration passed every check and was rendered.
    Validated,
    /// The configuration was rejected.
    Rejected(Diagnostic),
}

impl Outcome {
    /// Returns true if the configuration validated.
    pub fn is_validated(&self) -> bool {
        matches!(self, Outcome::Validated)
    }

    /// Returns the diagnostic of a rejected run.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Outcome::Validated => None,
            Outcome::Rejected(diagnostic) => Some(diagnostic),
        }
    }
}

/// What a run read, where it wrote, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_new::new)]
pub struct Report {
    /// Config file as given by the caller.
    pub input: PathBuf,
    /// Artifact that was written.
    pub output: PathBuf,
    /// Validation outcome.
    pub outcome: Outcome,
}

/// Failure to write an artifact.
#[derive(Debug, Clone, Display, Error)]
#[display("Output error: {} at {}:{}", message, file, line)]
pub struct OutputError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OutputError {
    /// Creates a new output error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Validates the config file at `config_path` and writes its artifact.
///
/// Diagnostics are not errors here; they are written and reported in the
/// returned [`Report`]. Only failures to write the artifact are `Err`.
#[instrument(skip(config_path, settings), fields(config = %config_path.as_ref().display()))]
pub fn process(config_path: impl AsRef<Path>, settings: &Settings) -> Result<Report, OutputError> {
    let config_path = config_path.as_ref();
    let missing = || DiagnosticKind::MissingConfigFile {
        path: config_path.display().to_string(),
    };

    if !config_path.exists() {
        let output = settings.fallback_path();
        return reject(config_path, output, missing().into());
    }

    let output = settings.output_path_for(config_path);
    let text = match std::fs::read_to_string(config_path) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Config file exists but cannot be read");
            return reject(config_path, output, missing().into());
        }
    };

    match validate(&text) {
        Ok(config) => {
            write_artifact(&output, &render(&config))?;
            info!(output = %output.display(), layers = config.layers().len(), "Configuration validated");
            Ok(Report::new(
                config_path.to_path_buf(),
                output,
                Outcome::Validated,
            ))
        }
        Err(diagnostic) => reject(config_path, output, diagnostic),
    }
}

fn reject(input: &Path, output: PathBuf, diagnostic: Diagnostic) -> Result<Report, OutputError> {
    write_artifact(&output, &format!("{}\n", diagnostic))?;
    warn!(
        code = diagnostic.kind().code(),
        output = %output.display(),
        %diagnostic,
        "Configuration rejected"
    );
    Ok(Report::new(
        input.to_path_buf(),
        output,
        Outcome::Rejected(diagnostic),
    ))
}

#[instrument(skip(path, contents), fields(path = %path.display(), bytes = contents.len()))]
fn write_artifact(path: &Path, contents: &str) -> Result<(), OutputError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| OutputError::new(format!("Failed to create {}: {}", dir.display(), e)))?;
    }
    std::fs::write(path, contents)
        .map_err(|e| OutputError::new(format!("Failed to write {}: {}", path.display(), e)))?;
    debug!("Artifact written");
    Ok(())
}
