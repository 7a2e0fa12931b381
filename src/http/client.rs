use std::fs;
use std::time::Instant;

use crate::config::{AppConfig, ConfigError};

use super::error::RequestFailure;
use super::response::HttpResponse;

/// Build the client shared by every activation.
pub fn build_client(config: &AppConfig) -> Result<reqwest::Client, ConfigError> {
    let mut builder = reqwest::Client::builder();

    if let Some(path) = &config.ca_cert {
        let pem = fs::read(path).map_err(|source| ConfigError::CaCertificate {
            path: path.clone(),
            source,
        })?;
        let certificate = reqwest::Certificate::from_pem(&pem).map_err(|source| ConfigError::InvalidCaCertificate {
            path: path.clone(),
            source,
        })?;
        builder = builder.add_root_certificate(certificate);
    }

    if config.accept_invalid_certs {
        tracing::warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().map_err(ConfigError::Client)
}

/// Issue one GET and read the whole body as text.
///
/// The status code is not interpreted: any response the transport delivers
/// is a success.
pub async fn fetch(client: reqwest::Client, url: String) -> Result<HttpResponse, RequestFailure> {
    let started = Instant::now();
    let response = client.get(&url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    let elapsed = started.elapsed().as_millis();

    Ok(HttpResponse {
        status: format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        ),
        duration_ms: elapsed,
        size_bytes: body.len(),
        body,
    })
}
