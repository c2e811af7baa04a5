use anyhow::{anyhow, Context, Result};
use crate::payments::types::Mode;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub payflow: PayflowConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct PayflowConfig {
    pub mode: Mode,
    pub login: String,
    pub password: String,
    pub partner: String,
    pub user: Option<String>,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .context("PORT not set")?
                .parse()
                .context("PORT must be a valid number")?,
        };

        let mode_name = env::var("PAYFLOW_MODE").unwrap_or_else(|_| "test".to_string());
        let mode = Mode::from_name(&mode_name)
            .ok_or_else(|| anyhow!("PAYFLOW_MODE must be 'test' or 'live', got {}", mode_name))?;

        let payflow = PayflowConfig {
            mode,
            login: env::var("PAYFLOW_LOGIN").context("PAYFLOW_LOGIN not set")?,
            password: env::var("PAYFLOW_PASSWORD").context("PAYFLOW_PASSWORD not set")?,
            partner: env::var("PAYFLOW_PARTNER").unwrap_or_else(|_| "PayPal".to_string()),
            user: env::var("PAYFLOW_USER").ok(),
            timeout: Duration::from_secs(
                env::var("PAYFLOW_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("PAYFLOW_TIMEOUT_SECS must be a valid number")?,
            ),
        };

        let config = Config { server, payflow };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(anyhow!(
                "Port must be at least 1024, got {}",
                self.server.port
            ));
        }

        if self.payflow.login.trim().is_empty() {
            return Err(anyhow!("PAYFLOW_LOGIN cannot be empty"));
        }

        if self.payflow.password.trim().is_empty() {
            return Err(anyhow!("PAYFLOW_PASSWORD cannot be empty"));
        }

        if self.payflow.partner.trim().is_empty() {
            return Err(anyhow!("PAYFLOW_PARTNER cannot be empty"));
        }

        if self.payflow.timeout.is_zero() {
            return Err(anyhow!("PAYFLOW_TIMEOUT_SECS must be greater than 0"));
        }

        Ok(())
    }
}
