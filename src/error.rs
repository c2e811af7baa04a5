use thiserror::Error;

pub type PayflowResult<T> = Result<T, PayflowError>;

#[derive(Debug, Error)]
pub enum PayflowError {
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Secure token not approved: {}", .message.as_deref().unwrap_or("no RESPMSG in response"))]
    TokenNotApproved { message: Option<String> },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl PayflowError {
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    pub fn token_not_approved(message: Option<String>) -> Self {
        Self::TokenNotApproved { message }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }

    pub fn is_token_not_approved(&self) -> bool {
        matches!(self, Self::TokenNotApproved { .. })
    }
}

impl From<reqwest::Error> for PayflowError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PayflowError::network_error(format!("Request timed out: {}", err))
        } else {
            PayflowError::network_error(format!("Request error: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_not_approved_display_with_message() {
        let err = PayflowError::token_not_approved(Some("Declined".to_string()));
        assert_eq!(err.to_string(), "Secure token not approved: Declined");
        assert!(err.is_token_not_approved());
        assert!(!err.is_network_error());
    }

    #[test]
    fn test_token_not_approved_display_without_message() {
        let err = PayflowError::token_not_approved(None);
        assert_eq!(
            err.to_string(),
            "Secure token not approved: no RESPMSG in response"
        );
    }

    #[test]
    fn test_network_error_display() {
        let err = PayflowError::network_error("connection reset");
        assert_eq!(err.to_string(), "Network error: connection reset");
        assert!(err.is_network_error());
    }
}
