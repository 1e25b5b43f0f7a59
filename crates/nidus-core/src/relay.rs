//! Remote submission relay -- best-effort forwarding of captured leads.
//!
//! Local capture is the durable source of truth; the remote intake is a
//! mirror. A relay failure is reported to the caller but never rolls back
//! the local record.

use reqwest::Client;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::capture::CaptureRecord;
use crate::error::RelayError;

/// Relay endpoint configuration. An absent endpoint degrades to local-only
/// capture.
#[derive(Debug, Clone, Default, Serialize, serde::Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// JSON body posted to the intake service.
#[derive(Debug, Clone, Serialize)]
struct RelayPayload<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    /// Discriminator so one intake endpoint can fan out per purpose.
    #[serde(rename = "_type")]
    kind: &'a str,
    /// Idempotency handle for the intake side.
    delivery_id: &'a str,
}

/// Proof of a delivered relay.
#[derive(Debug, Clone, Serialize)]
pub struct RelayReceipt {
    pub delivery_id: String,
    pub status: u16,
}

/// HTTP client for the forms-intake endpoint.
pub struct RelayClient {
    endpoint: Option<Url>,
    client: Client,
}

impl RelayClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns `InvalidEndpoint` if the configured endpoint is not an
    /// absolute http(s) URL. A missing endpoint is not an error here; sends
    /// will return `NotConfigured`.
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let endpoint = match &config.endpoint {
            None => None,
            Some(raw) => {
                let url = Url::parse(raw).map_err(|e| RelayError::InvalidEndpoint {
                    endpoint: raw.clone(),
                    message: e.to_string(),
                })?;
                if url.scheme() != "https" && url.scheme() != "http" {
                    return Err(RelayError::InvalidEndpoint {
                        endpoint: raw.clone(),
                        message: "scheme must be http or https".into(),
                    });
                }
                Some(url)
            }
        };
        Ok(Self {
            endpoint,
            client: Client::new(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// POST a captured lead to the intake endpoint.
    ///
    /// Success is any 2xx response.
    ///
    /// # Errors
    /// `NotConfigured` without an endpoint, `Status` on a non-2xx response,
    /// `Transport` on network failure.
    pub async fn send(
        &self,
        collection: &str,
        record: &CaptureRecord,
    ) -> Result<RelayReceipt, RelayError> {
        let endpoint = self.endpoint.as_ref().ok_or(RelayError::NotConfigured)?;
        let delivery_id = Uuid::new_v4().to_string();
        let payload = RelayPayload {
            email: &record.email,
            phone: record.phone.as_deref(),
            kind: collection,
            delivery_id: &delivery_id,
        };

        let resp = self
            .client
            .post(endpoint.clone())
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(%delivery_id, status = status.as_u16(), "lead relayed");
            Ok(RelayReceipt {
                delivery_id,
                status: status.as_u16(),
            })
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(RelayError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}
