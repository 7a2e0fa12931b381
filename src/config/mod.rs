//! Layered configuration for the request button.
//!
//! Values are resolved from, lowest to highest precedence: the selected
//! [`Preset`], the JSON config file, `HTTPS_TESTER_*` environment variables
//! and finally command-line overrides.

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use serde::{Deserialize, Serialize};

const DATA_DIR: &str = ".https-tester";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "HTTPS_TESTER_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file `{}` does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("failed to load configuration: {0}")]
    Figment(#[from] figment::Error),
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("failed to read CA certificate `{}`: {source}", .path.display())]
    CaCertificate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid CA certificate `{}`: {source}", .path.display())]
    InvalidCaCertificate {
        path: PathBuf,
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Named endpoint and wording combinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    ApiTest,
    Root,
}

impl Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Preset::ApiTest => "api-test",
            Preset::Root => "root",
        };
        write!(f, "{label}")
    }
}

/// Fixed texts written into the status display on each transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusMessages {
    pub ready: String,
    pub loading: String,
    pub success: String,
    pub failure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub endpoint: String,
    pub messages: StatusMessages,
    /// Extra root certificate (PEM) to trust, e.g. the dev server's self-signed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl AppConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::ApiTest => Self {
                endpoint: "https://localhost:4443/api/test".to_string(),
                messages: StatusMessages {
                    ready: "🔍 Ready to send a request.".to_string(),
                    loading: "⏳ Sending request...".to_string(),
                    success: "✅ HTTPS Request successful!".to_string(),
                    failure: "❌ Error connecting to HTTPS server.".to_string(),
                },
                ca_cert: None,
                accept_invalid_certs: false,
            },
            Preset::Root => Self {
                endpoint: "https://localhost:4443".to_string(),
                messages: StatusMessages {
                    ready: "Ready.".to_string(),
                    loading: "Sending request...".to_string(),
                    success: "Request successful.".to_string(),
                    failure: "Request failed.".to_string(),
                },
                ca_cert: None,
                accept_invalid_certs: false,
            },
        }
    }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub ca_cert: Option<PathBuf>,
    pub accept_invalid_certs: bool,
}

/// Resolve the effective configuration.
///
/// An explicit `path` must exist; without one the default file under
/// `.https-tester/` is used when present.
pub fn load(preset: Preset, path: Option<&Path>, overrides: &Overrides) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => default_config_path(),
    };

    let mut figment = Figment::from(Serialized::defaults(AppConfig::from_preset(preset)))
        .merge(Json::file(&file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Some(endpoint) = &overrides.endpoint {
        figment = figment.merge(Serialized::default("endpoint", endpoint));
    }
    if let Some(ca_cert) = &overrides.ca_cert {
        figment = figment.merge(Serialized::default("ca_cert", ca_cert));
    }
    if overrides.accept_invalid_certs {
        figment = figment.merge(Serialized::default("accept_invalid_certs", true));
    }

    let config: AppConfig = figment.extract()?;
    validate_endpoint(&config.endpoint)?;
    tracing::debug!(file = %file.display(), %preset, endpoint = %config.endpoint, "configuration resolved");
    Ok(config)
}

pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DATA_DIR)
        .join(CONFIG_FILE)
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = reqwest::Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}
