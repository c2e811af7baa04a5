//! Payflow Link request builder
//!
//! Collects checkout data into the flat field set the hosted page expects and
//! exchanges it for a secure token before the form is rendered.

use crate::error::{PayflowError, PayflowResult};
use crate::payments::providers::payflow_link::mapping::{self, BILLING_ADDRESS, CUSTOMER};
use crate::payments::providers::payflow_link::wire::{
    encode_length_prefixed, parse_name_value, FieldSet,
};
use crate::payments::traits::{CountryLookup, Transport};
use crate::payments::types::{BillingAddress, Customer, HelperOptions, Mode, SecureToken};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Sent in place of a blank state or province
pub const STATE_NOT_APPLICABLE: &str = "N/A";

const DEFAULT_TRANSACTION_TYPE: &str = "S";

pub struct Helper {
    fields: FieldSet,
    mode: Mode,
    country_lookup: Arc<dyn CountryLookup>,
    secure_token_id: Option<String>,
}

impl Helper {
    pub fn new(
        order: &str,
        account: &str,
        options: HelperOptions,
        mode: Mode,
        country_lookup: Arc<dyn CountryLookup>,
    ) -> Self {
        let mut helper = Self {
            fields: FieldSet::new(),
            mode,
            country_lookup,
            secure_token_id: None,
        };

        helper.set_order(order);
        helper.set_account(account);
        if let Some(amount) = options.amount.as_deref() {
            helper.set_amount(amount);
        }
        if let Some(password) = options.credential2.as_deref() {
            helper.set_credential2(password);
        }
        if let Some(partner) = options.credential3.as_deref() {
            helper.set_credential3(partner);
        }

        helper.add_field("echodata", "True");
        helper.add_field("user2", mode.is_test().to_string());
        helper.add_field("invoice", order);
        helper.add_field("vendor", account);

        let user = options
            .credential4
            .as_deref()
            .filter(|user| !user.trim().is_empty())
            .unwrap_or(account);
        helper.add_field("user", user);

        let transaction_type = options
            .transaction_type
            .as_deref()
            .unwrap_or(DEFAULT_TRANSACTION_TYPE);
        helper.add_field("trxtype", transaction_type);

        helper
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Fields collected so far
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn add_field(&mut self, name: &str, value: impl Into<String>) {
        self.fields.add(name, value);
    }

    pub fn set_account(&mut self, account: &str) {
        self.add_field(mapping::ACCOUNT, account);
    }

    pub fn set_credential2(&mut self, password: &str) {
        self.add_field(mapping::CREDENTIAL2, password);
    }

    pub fn set_credential3(&mut self, partner: &str) {
        self.add_field(mapping::CREDENTIAL3, partner);
    }

    pub fn set_order(&mut self, order: &str) {
        self.add_field(mapping::ORDER, order);
    }

    /// `amount` must already carry two fraction digits; it is sent as given
    pub fn set_amount(&mut self, amount: &str) {
        self.add_field(mapping::AMOUNT, amount);
    }

    pub fn description(&mut self, value: Option<&str>) {
        if let Some(text) = value {
            self.add_field("description", sanitize_description(text));
        }
    }

    pub fn customer(&mut self, customer: &Customer) {
        for (key, value) in [
            ("first_name", customer.first_name.as_deref()),
            ("last_name", customer.last_name.as_deref()),
        ] {
            if let (Some(field), Some(value)) = (mapping::lookup(CUSTOMER, key), value) {
                self.add_field(field, value);
            }
        }
    }

    pub fn billing_address(&mut self, address: &BillingAddress) {
        if let Some(country) = address.country.as_deref() {
            let code = self
                .country_lookup
                .lookup(country)
                .unwrap_or_else(|| country.to_string());
            self.add_billing_field("country", code);
        }

        let street = [address.address1.as_deref(), address.address2.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        self.add_billing_field("address", street);

        let state = match address.state.as_deref().map(str::trim) {
            Some(state) if !state.is_empty() => state.to_uppercase(),
            _ => STATE_NOT_APPLICABLE.to_string(),
        };
        self.add_billing_field("state", state);

        for (key, value) in [
            ("city", address.city.as_deref()),
            ("zip", address.zip.as_deref()),
            ("phone", address.phone.as_deref()),
            ("name", address.name.as_deref()),
        ] {
            if let Some(value) = value {
                self.add_billing_field(key, value);
            }
        }

        for (key, value) in &address.extra {
            self.add_billing_field(key, value.as_str());
        }
    }

    fn add_billing_field(&mut self, key: &str, value: impl Into<String>) {
        match mapping::lookup(BILLING_ADDRESS, key) {
            Some(field) => self.add_field(field, value),
            None => debug!("Dropping unmapped billing address key: {}", key),
        }
    }

    /// Correlation id sent with the token request, stable for this helper
    pub fn secure_token_id(&mut self) -> &str {
        self.secure_token_id
            .get_or_insert_with(|| Uuid::new_v4().simple().to_string())
    }

    /// Exchange the collected fields for a secure token
    ///
    /// Returns `Ok(None)` when the gateway answered but did not approve.
    ///
    /// # Errors
    /// * `PayflowError::NetworkError` - the transport failed
    pub async fn request_secure_token(
        &mut self,
        transport: &dyn Transport,
    ) -> PayflowResult<Option<SecureToken>> {
        Ok(self.exchange_secure_token(transport).await?.token)
    }

    /// Fields to render into the hosted page form
    ///
    /// # Errors
    /// * `PayflowError::TokenNotApproved` - the gateway issued no token
    /// * any error from [`Helper::request_secure_token`]
    pub async fn form_fields(&mut self, transport: &dyn Transport) -> PayflowResult<FieldSet> {
        let response = self.exchange_secure_token(transport).await?;
        let token = response
            .token
            .ok_or_else(|| PayflowError::token_not_approved(response.message))?;

        let mut fields = FieldSet::new();
        fields.add("securetoken", token.token());
        fields.add("securetokenid", token.token_id());
        fields.add("mode", self.mode.as_str());
        Ok(fields)
    }

    async fn exchange_secure_token(
        &mut self,
        transport: &dyn Transport,
    ) -> PayflowResult<TokenResponse> {
        let token_id = self.secure_token_id().to_string();
        self.fields.add("securetokenid", token_id.as_str());
        self.fields.add("createsecuretoken", "Y");

        let body = encode_length_prefixed(&self.fields);
        let url = self.mode.secure_token_url();

        info!(
            "Requesting Payflow secure token: url={}, securetokenid={}",
            url, token_id
        );

        let response = transport.post(url, body.into_bytes()).await?;
        let response = TokenResponse::parse(&String::from_utf8_lossy(&response));
        match &response.token {
            Some(_) => info!("Payflow secure token issued: securetokenid={}", token_id),
            None => warn!(
                "Payflow secure token not approved: securetokenid={}, respmsg={}",
                token_id,
                response.message.as_deref().unwrap_or("<missing>")
            ),
        }
        Ok(response)
    }
}

struct TokenResponse {
    message: Option<String>,
    token: Option<SecureToken>,
}

impl TokenResponse {
    fn parse(body: &str) -> Self {
        let params = parse_name_value(body);
        let message = params.get("RESPMSG").cloned();

        let approved = message
            .as_deref()
            .is_some_and(|message| message.eq_ignore_ascii_case("approved"));
        let token = if approved {
            SecureToken::new(
                params.get("SECURETOKEN").cloned().unwrap_or_default(),
                params.get("SECURETOKENID").cloned().unwrap_or_default(),
            )
        } else {
            None
        };

        Self { message, token }
    }
}

/// Extract the token pair from an approved token response
pub fn parse_secure_token(response: &str) -> Option<SecureToken> {
    TokenResponse::parse(response).token
}

/// Keep printable ASCII only and drop `#`
pub fn sanitize_description(text: &str) -> String {
    text.chars()
        .filter(|c| matches!(c, ' '..='~') && *c != '#')
        .collect()
}

/// Hosted page form ready to be rendered
#[derive(Debug, Clone, Serialize)]
pub struct HostedForm {
    pub action: String,
    pub fields: FieldSet,
}

impl HostedForm {
    pub fn new(action: impl Into<String>, fields: FieldSet) -> Self {
        Self {
            action: action.into(),
            fields,
        }
    }

    /// Render as a POST form with hidden inputs
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<form action=\"{}\" method=\"post\">\n",
            escape_html(&self.action)
        );
        for (name, value) in self.fields.iter() {
            html.push_str(&format!(
                "  <input type=\"hidden\" name=\"{}\" value=\"{}\" />\n",
                escape_html(name),
                escape_html(value)
            ));
        }
        html.push_str("</form>\n");
        html
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
