//! Payment types and data structures
//!
//! Typed checkout inputs handed to the request builder and the normalized
//! values produced from gateway postbacks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Gateway environment, threaded explicitly into every component that needs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Test,
    Live,
}

impl Mode {
    pub fn is_test(&self) -> bool {
        matches!(self, Mode::Test)
    }

    /// Value rendered into the hosted form's `mode` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Test => "test",
            Mode::Live => "live",
        }
    }

    /// Endpoint that issues secure tokens
    pub fn secure_token_url(&self) -> &'static str {
        match self {
            Mode::Test => "https://pilot-payflowpro.paypal.com",
            Mode::Live => "https://payflowpro.paypal.com",
        }
    }

    /// Hosted payment page the rendered form posts to
    pub fn service_url(&self) -> &'static str {
        "https://payflowlink.paypal.com"
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "test" => Some(Mode::Test),
            "live" | "production" => Some(Mode::Live),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional inputs accepted when a helper is created
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelperOptions {
    /// Amount already formatted with two fraction digits, e.g. "10.00"
    pub amount: Option<String>,
    /// Merchant password
    pub credential2: Option<String>,
    /// Partner id
    pub credential3: Option<String>,
    /// Sub-merchant user; falls back to the account when blank
    pub credential4: Option<String>,
    /// Transaction type, "S" (sale) when absent
    pub transaction_type: Option<String>,
}

/// Billing address as supplied by the checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingAddress {
    pub name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    /// Any other keys; mapped when the gateway knows them, dropped otherwise
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Token pair issued by the gateway for a single hosted-page session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureToken {
    token: String,
    token_id: String,
}

impl SecureToken {
    /// Returns `None` unless both parts are non-blank
    pub fn new(token: impl Into<String>, token_id: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let token_id = token_id.into();
        if token.trim().is_empty() || token_id.trim().is_empty() {
            return None;
        }
        Some(Self { token, token_id })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_id(&self) -> &str {
        &self.token_id
    }
}

/// Outcome reported by a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
