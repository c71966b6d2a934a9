//! CDN availability check for resolved flag images.
//!
//! Developer tooling only. Resolution itself never does network I/O; this
//! sends `HEAD` requests for the URLs a resolution produced.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::flags::ImageReference;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to create tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Outcome for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlCheck {
    pub url: String,
    /// HTTP status code, if a response came back
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl UrlCheck {
    pub fn is_ok(&self) -> bool {
        self.status.is_some_and(|code| (200..300).contains(&code))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub standard: UrlCheck,
    pub high_density: UrlCheck,
}

impl ProbeReport {
    pub fn all_ok(&self) -> bool {
        self.standard.is_ok() && self.high_density.is_ok()
    }
}

/// Check both URLs of an image reference.
///
/// Request failures are reported per URL, not returned as errors.
pub fn probe(image: &ImageReference) -> Result<ProbeReport, ProbeError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ProbeError::Runtime)?;

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(ProbeError::Client)?;

    let report = runtime.block_on(async {
        ProbeReport {
            standard: check(&client, &image.url).await,
            high_density: check(&client, &image.high_density_url).await,
        }
    });

    Ok(report)
}

async fn check(client: &reqwest::Client, url: &str) -> UrlCheck {
    debug!(url, "Probing flag URL");
    match client.head(url).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                warn!(url, ?status, "Flag URL returned non-success status");
            }
            UrlCheck {
                url: url.to_string(),
                status: Some(status.as_u16()),
                error: None,
            }
        }
        Err(e) => {
            warn!(url, error = %e, "Failed to reach flag URL");
            UrlCheck {
                url: url.to_string(),
                status: None,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_check(status: Option<u16>) -> UrlCheck {
        UrlCheck {
            url: "https://flagcdn.com/w20/gh.png".to_string(),
            status,
            error: None,
        }
    }

    #[test]
    fn only_2xx_counts_as_ok() {
        assert!(url_check(Some(200)).is_ok());
        assert!(!url_check(Some(404)).is_ok());
        assert!(!url_check(None).is_ok());
    }

    #[test]
    fn report_needs_both_urls() {
        let report = ProbeReport {
            standard: url_check(Some(200)),
            high_density: url_check(Some(404)),
        };
        assert!(!report.all_ok());
    }

    #[test]
    fn unreachable_host_is_reported_not_raised() {
        let image = crate::flags::FlagResolver::new("http://127.0.0.1:9")
            .unwrap()
            .resolve("gh", crate::flags::ProviderWidth::W20);
        let report = probe(&image).unwrap();
        assert!(report.standard.status.is_none());
        assert!(report.standard.error.is_some());
        assert!(!report.all_ok());
    }
}
