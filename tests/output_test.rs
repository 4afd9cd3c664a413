//! Tests for artifact routing and file output.

use khet3d::{DiagnosticKind, Outcome, Settings, process};
use std::fs;
use tempfile::TempDir;

const VALID: &str = "3,3,1\n\nLayer 0:\n(▲,A)  ( ,N) (•,B)\n( ,N) (◆,N) ( ,N)\n(•,A) ( ,N) (▼,B)\n\n";

fn setup() -> (TempDir, Settings) {
    let dir = TempDir::new().expect("temp dir");
    let settings = Settings::new(dir.path().join("out"));
    (dir, settings)
}

#[test]
fn test_valid_config_writes_rendering() {
    let (dir, settings) = setup();
    let config = dir.path().join("game1.txt");
    fs::write(&config, VALID).unwrap();

    let report = process(&config, &settings).expect("artifact written");

    assert_eq!(report.outcome, Outcome::Validated);
    assert_eq!(report.output, dir.path().join("out").join("game1.out"));
    assert_eq!(
        fs::read_to_string(&report.output).unwrap(),
        "Layer 0:\n(▲,A) ( ,N) (•,B)\n( ,N) (◆,N) ( ,N)\n(•,A) ( ,N) (▼,B)\n"
    );
}

#[test]
fn test_rejected_config_writes_single_diagnostic_line() {
    let (dir, settings) = setup();
    let config = dir.path().join("narrow.txt");
    fs::write(&config, "2,5,1\n\n").unwrap();

    let report = process(&config, &settings).unwrap();

    assert_eq!(
        report.outcome.diagnostic().map(|d| d.kind().clone()),
        Some(DiagnosticKind::InvalidDimensions)
    );
    assert_eq!(report.output, dir.path().join("out").join("narrow.out"));
    assert_eq!(
        fs::read_to_string(&report.output).unwrap(),
        "Invalid dimensions format in the configuration file\n"
    );
}

#[test]
fn test_missing_config_goes_to_fallback() {
    let (dir, settings) = setup();
    let config = dir.path().join("does_not_exist.txt");

    let report = process(&config, &settings).unwrap();

    let fallback = dir.path().join("out").join("noConfig.out");
    assert_eq!(report.output, fallback);
    assert!(!dir.path().join("out").join("does_not_exist.out").exists());
    assert_eq!(
        fs::read_to_string(&fallback).unwrap(),
        format!("Config file '{}' not found\n", config.display())
    );
    assert!(matches!(
        report.outcome.diagnostic().map(|d| d.kind()),
        Some(DiagnosticKind::MissingConfigFile { .. })
    ));
}

#[test]
fn test_unreadable_config_goes_to_per_config_path() {
    let (dir, settings) = setup();
    let config = dir.path().join("binary.txt");
    fs::write(&config, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let report = process(&config, &settings).unwrap();

    assert_eq!(report.output, dir.path().join("out").join("binary.out"));
    assert!(matches!(
        report.outcome.diagnostic().map(|d| d.kind()),
        Some(DiagnosticKind::MissingConfigFile { .. })
    ));
}

#[test]
fn test_rerun_overwrites_previous_artifact() {
    let (dir, settings) = setup();
    let config = dir.path().join("game.txt");

    fs::write(&config, "3,3,1\n").unwrap();
    let first = process(&config, &settings).unwrap();
    assert!(!first.outcome.is_validated());

    fs::write(&config, VALID).unwrap();
    let second = process(&config, &settings).unwrap();
    assert!(second.outcome.is_validated());
    assert_eq!(first.output, second.output);
    assert!(
        fs::read_to_string(&second.output)
            .unwrap()
            .starts_with("Layer 0:\n")
    );
}

#[test]
fn test_settings_file_controls_layout() {
    let (dir, _) = setup();
    let settings_path = dir.path().join("khet.toml");
    let artifacts = dir.path().join("artifacts");
    fs::write(
        &settings_path,
        format!(
            "output_dir = {:?}\nextension = \"res\"\nfallback_name = \"missing.res\"\n",
            artifacts.display().to_string()
        ),
    )
    .unwrap();
    let settings = Settings::from_file(&settings_path).expect("settings parse");

    let config = dir.path().join("board.txt");
    fs::write(&config, VALID).unwrap();
    let report = process(&config, &settings).unwrap();
    assert_eq!(report.output, artifacts.join("board.res"));

    let report = process(dir.path().join("gone.txt"), &settings).unwrap();
    assert_eq!(report.output, artifacts.join("missing.res"));
}

#[test]
fn test_report_serializes() {
    let (dir, settings) = setup();
    let config = dir.path().join("narrow.txt");
    fs::write(&config, "2,5,1\n\n").unwrap();

    let report = process(&config, &settings).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["status"], "rejected");
    assert_eq!(
        json["outcome"]["diagnostic"]["kind"]["kind"],
        "invalid_dimensions"
    );
}

#[test]
fn test_bad_settings_file_is_an_error() {
    let (dir, _) = setup();
    let settings_path = dir.path().join("bad.toml");
    fs::write(&settings_path, "output_dir = [").unwrap();
    let err = Settings::from_file(&settings_path).unwrap_err();
    assert!(err.message.contains("Failed to parse settings"));
}
