//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/n8nctl/n8nctl.toml`, or an explicit `--config` path
//! 3. Environment variables: `N8N_*` prefix (`__` separates nested keys)
//! 4. `--base-url` command line flag (see [`Settings::with_base_url`])

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    normalize_base_url, Activation, HttpMethod, DEFAULT_API_PREFIX, DEFAULT_BASE_URL,
};

/// Environment variable prefix, e.g. `N8N_BASE_URL`, `N8N_ACTIVATION__METHOD`.
pub const ENV_PREFIX: &str = "N8N";

/// Activation endpoint settings.
///
/// Server versions disagree on how activation is exposed, so method and
/// paths are configurable. Paths are relative to the API prefix and must
/// contain `{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActivationConfig {
    pub method: HttpMethod,
    pub activate_path: String,
    pub deactivate_path: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            method: HttpMethod::Post,
            activate_path: "/workflows/{id}/activate".into(),
            deactivate_path: "/workflows/{id}/deactivate".into(),
        }
    }
}

impl ActivationConfig {
    pub fn path_for(&self, activation: Activation) -> &str {
        match activation {
            Activation::Activate => &self.activate_path,
            Activation::Deactivate => &self.deactivate_path,
        }
    }
}

/// Raw activation config for intermediate parsing (`None` → inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawActivationConfig {
    pub method: Option<HttpMethod>,
    pub activate_path: Option<String>,
    pub deactivate_path: Option<String>,
}

/// Raw settings as read from a config file.
///
/// The API key is deliberately absent: it is only read from the environment.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub base_url: Option<String>,
    pub api_prefix: Option<String>,
    pub activation: RawActivationConfig,
}

/// Unified configuration for n8nctl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Server base URL, without trailing slash
    pub base_url: String,
    /// API credential (environment only, never serialized)
    #[serde(skip)]
    pub api_key: Option<String>,
    /// REST API path prefix
    pub api_prefix: String,
    /// Activation endpoint settings
    pub activation: ActivationConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            api_prefix: DEFAULT_API_PREFIX.into(),
            activation: ActivationConfig::default(),
        }
    }
}

/// Get the XDG config directory for n8nctl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "n8nctl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("n8nctl.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings from the config file and the process environment.
    ///
    /// `config_path` names an explicit config file which must exist; without
    /// it the global config file is used when present.
    pub fn load(config_path: Option<&Path>) -> ApplicationResult<Self> {
        Self::load_from(config_path, None)
    }

    /// Like [`Settings::load`], but reads `N8N_*` variables from `env` instead
    /// of the process environment when given.
    pub fn load_from(
        config_path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        let file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            tracing::debug!("loading config file {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        // 3. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.base_url = normalize_base_url(&current.base_url);
        Ok(current)
    }

    /// Apply a `--base-url` override.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url {
            self.base_url = normalize_base_url(url);
        }
        self
    }

    /// The API key, or [`ApplicationError::MissingApiKey`] if unset or empty.
    pub fn require_api_key(&self) -> ApplicationResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ApplicationError::MissingApiKey)
    }

    /// Scalar options: file value wins if present, otherwise keep current.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_url: overlay
                .base_url
                .clone()
                .unwrap_or_else(|| self.base_url.clone()),
            api_key: self.api_key.clone(),
            api_prefix: overlay
                .api_prefix
                .clone()
                .unwrap_or_else(|| self.api_prefix.clone()),
            activation: ActivationConfig {
                method: overlay.activation.method.unwrap_or(self.activation.method),
                activate_path: overlay
                    .activation
                    .activate_path
                    .clone()
                    .unwrap_or_else(|| self.activation.activate_path.clone()),
                deactivate_path: overlay
                    .activation
                    .deactivate_path
                    .clone()
                    .unwrap_or_else(|| self.activation.deactivate_path.clone()),
            },
        }
    }

    /// Apply N8N_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        source: Option<config::Map<String, String>>,
    ) -> ApplicationResult<Self> {
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .source(source);

        let config = Config::builder()
            .add_source(environment)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("base_url") {
            settings.base_url = val;
        }
        if let Ok(val) = config.get_string("api_key") {
            settings.api_key = Some(val);
        }
        if let Ok(val) = config.get_string("api_prefix") {
            settings.api_prefix = val;
        }
        if let Ok(val) = config.get_string("activation.method") {
            settings.activation.method = val.parse()?;
        }
        if let Ok(val) = config.get_string("activation.activate_path") {
            settings.activation.activate_path = val;
        }
        if let Ok(val) = config.get_string("activation.deactivate_path") {
            settings.activation.deactivate_path = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML (the API key is never included).
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# n8nctl configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/n8nctl/n8nctl.toml (or --config / N8NCTL_CONFIG)
#   Env:  N8N_* environment variables, e.g. N8N_BASE_URL, N8N_ACTIVATION__METHOD
#   Flag: --base-url
#
# The API key is read from N8N_API_KEY only.

# Server address (trailing slashes are stripped)
# base_url = "http://localhost:5678"

# REST API path prefix
# api_prefix = "/api/v1"

[activation]
# HTTP method used for activate/deactivate
# method = "POST"

# Endpoint paths below api_prefix; {id} is replaced by the workflow id
# activate_path = "/workflows/{id}/activate"
# deactivate_path = "/workflows/{id}/deactivate"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
