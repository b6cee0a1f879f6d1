//! Integration tests for Settings loading with layered precedence.
//!
//! Precedence: defaults < config file < N8N_* environment < --base-url flag.
//! Environment variables are injected as maps so tests never touch the
//! process environment.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use n8nctl::application::ApplicationError;
use n8nctl::config::Settings;
use n8nctl::domain::HttpMethod;

fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("n8nctl.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_config_file_when_load_then_file_values_replace_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
base_url = "https://n8n.internal/"
api_prefix = "/api/v2"

[activation]
method = "patch"
activate_path = "/workflows/{id}/on"
"#,
    );

    let settings = Settings::load_from(Some(&path), env(&[])).expect("load settings");

    assert_eq!(settings.base_url, "https://n8n.internal");
    assert_eq!(settings.api_prefix, "/api/v2");
    assert_eq!(settings.activation.method, HttpMethod::Patch);
    assert_eq!(settings.activation.activate_path, "/workflows/{id}/on");
    assert_eq!(
        settings.activation.deactivate_path, "/workflows/{id}/deactivate",
        "unset fields keep defaults"
    );
    assert!(settings.api_key.is_none());
}

#[test]
fn given_config_file_and_env_when_load_then_env_wins() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "base_url = \"http://from-file\"\n");

    let settings = Settings::load_from(
        Some(&path),
        env(&[
            ("N8N_BASE_URL", "http://from-env//"),
            ("N8N_API_KEY", "env-key"),
        ]),
    )
    .expect("load settings");

    assert_eq!(settings.base_url, "http://from-env");
    assert_eq!(settings.require_api_key().unwrap(), "env-key");
}

#[test]
fn given_env_and_flag_when_load_then_flag_wins() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let settings = Settings::load_from(Some(&path), env(&[("N8N_BASE_URL", "http://from-env")]))
        .expect("load settings")
        .with_base_url(Some("http://from-flag/"));

    assert_eq!(settings.base_url, "http://from-flag");
}

#[test]
fn given_api_key_in_config_file_when_load_then_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "api_key = \"from-file\"\n");

    let settings = Settings::load_from(Some(&path), env(&[])).expect("load settings");

    assert!(settings.api_key.is_none());
    assert!(matches!(
        settings.require_api_key(),
        Err(ApplicationError::MissingApiKey)
    ));
}

#[test]
fn given_missing_explicit_config_when_load_then_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = Settings::load_from(Some(&missing), env(&[])).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn given_malformed_config_when_load_then_fails_with_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "base_url = [unterminated\n");

    let err = Settings::load_from(Some(&path), env(&[])).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("n8nctl.toml"));
}

#[test]
fn given_invalid_method_in_config_when_load_then_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[activation]\nmethod = \"TELEPORT\"\n");

    let err = Settings::load_from(Some(&path), env(&[])).unwrap_err();

    assert!(err.to_string().contains("TELEPORT"));
}

#[test]
fn given_template_written_to_disk_when_load_then_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &Settings::template());

    let settings = Settings::load_from(Some(&path), env(&[])).expect("load settings");

    assert_eq!(
        settings,
        Settings::default(),
        "commented template must not change anything"
    );
}
