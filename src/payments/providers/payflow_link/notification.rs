//! Payflow Link postback parsing
//!
//! The gateway posts a flat set of upper-case fields after the customer
//! leaves the hosted page. Nothing here is signed, so every accessor is a
//! read-only view over whatever was received.

use crate::payments::providers::payflow_link::wire::parse_name_value;
use crate::payments::types::TransactionStatus;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

const OFFSET_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%dT%H:%M:%S%z"];

const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y%m%d%H%M%S",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    params: HashMap<String, String>,
}

impl Notification {
    pub fn from_params(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Parse a raw `NAME=value&...` postback body without URL decoding
    pub fn parse(raw: &str) -> Self {
        Self::from_params(parse_name_value(raw))
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn status(&self) -> TransactionStatus {
        if self.param("RESULT") == Some("0") {
            TransactionStatus::Completed
        } else {
            TransactionStatus::Failed
        }
    }

    pub fn complete(&self) -> bool {
        self.status() == TransactionStatus::Completed
    }

    /// Gateway reference (PNREF)
    pub fn transaction_id(&self) -> Option<&str> {
        self.param("PNREF")
    }

    pub fn transaction_type(&self) -> Option<&str> {
        self.param("TYPE")
    }

    /// Amount as sent, two fraction digits
    pub fn gross(&self) -> Option<&str> {
        self.param("AMT")
    }

    /// `gross` in minor units
    pub fn gross_cents(&self) -> Option<i64> {
        self.gross().and_then(parse_cents)
    }

    /// Postbacks carry no currency; use the order's own
    pub fn currency(&self) -> Option<&str> {
        None
    }

    /// Order id sent as `user1`
    pub fn item_id(&self) -> Option<&str> {
        self.param("USER1")
    }

    pub fn invoice(&self) -> Option<&str> {
        self.param("INVNUM")
    }

    /// Echo of the `user2` flag sent with the request
    pub fn test(&self) -> bool {
        self.param("USER2") == Some("true")
    }

    pub fn account(&self) -> Option<&str> {
        self.param("ACCT")
    }

    /// When the transaction happened, if TRANSTIME is present and readable
    ///
    /// The gateway retries postbacks, so this can be well before the
    /// notification arrives.
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.param("TRANSTIME")?;
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            debug!("Ignoring malformed TRANSTIME: {}", raw);
        }
        parsed
    }

    /// Payflow Link defines no verification call or signature
    pub fn acknowledge(&self) -> bool {
        true
    }

    pub fn summary(&self) -> NotificationSummary {
        NotificationSummary {
            status: self.status(),
            complete: self.complete(),
            transaction_id: self.transaction_id().map(str::to_string),
            transaction_type: self.transaction_type().map(str::to_string),
            gross: self.gross().map(str::to_string),
            gross_cents: self.gross_cents(),
            currency: self.currency().map(str::to_string),
            item_id: self.item_id().map(str::to_string),
            invoice: self.invoice().map(str::to_string),
            test: self.test(),
            account: self.account().map(str::to_string),
            received_at: self.received_at(),
            acknowledged: self.acknowledge(),
        }
    }
}

/// Serializable snapshot of a notification's accessors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationSummary {
    pub status: TransactionStatus,
    pub complete: bool,
    pub transaction_id: Option<String>,
    pub transaction_type: Option<String>,
    pub gross: Option<String>,
    pub gross_cents: Option<i64>,
    pub currency: Option<String>,
    pub item_id: Option<String>,
    pub invoice: Option<String>,
    pub test: bool,
    pub account: Option<String>,
    pub received_at: Option<DateTime<Utc>>,
    pub acknowledged: bool,
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    let with_offset = DateTime::parse_from_rfc3339(raw)
        .ok()
        .or_else(|| DateTime::parse_from_rfc2822(raw).ok())
        .or_else(|| {
            OFFSET_TIMESTAMP_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        });
    if let Some(parsed) = with_offset {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn parse_cents(amount: &str) -> Option<i64> {
    let (whole, fraction) = match amount.trim().split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount.trim(), ""),
    };
    if whole.is_empty()
        || fraction.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let fraction = format!("{:0<2}", fraction);
    whole
        .parse::<i64>()
        .ok()?
        .checked_mul(100)?
        .checked_add(fraction.parse::<i64>().ok()?)
}
