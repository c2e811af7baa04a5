//! HTTP transport backed by reqwest

use crate::error::{PayflowError, PayflowResult};
use crate::payments::traits::Transport;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "PayflowLink-Adapter/1.0".to_string(),
        }
    }
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> PayflowResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| {
                PayflowError::config_error(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> PayflowResult<Vec<u8>> {
        debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/namevalue")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Gateway returned HTTP {} for {}", status, url);
            return Err(PayflowError::network_error(format!(
                "HTTP {} from {}",
                status, url
            )));
        }

        let bytes = response.bytes().await?;
        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_config_default() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.user_agent, "PayflowLink-Adapter/1.0");
    }

    #[test]
    fn test_transport_builds_from_default_config() {
        assert!(ReqwestTransport::new(TransportConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let transport = ReqwestTransport::new(TransportConfig {
            timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        // Nothing listens on the discard port.
        let err = transport
            .post("http://127.0.0.1:9/", b"a[1]=b".to_vec())
            .await
            .unwrap_err();
        assert!(err.is_network_error());
    }
}
