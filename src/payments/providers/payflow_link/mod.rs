//! PayPal Payflow Link hosted payment page integration
//!
//! The merchant builds a [`Helper`] per checkout, trades its fields for a
//! secure token and renders the resulting [`HostedForm`]. Postbacks come back
//! through [`Notification`]. The two halves share nothing but field names:
//! `user1` returns as `USER1` and `user2` as `USER2`.

pub mod helper;
pub mod mapping;
pub mod notification;
pub mod wire;

pub use helper::{parse_secure_token, sanitize_description, Helper, HostedForm};
pub use notification::{Notification, NotificationSummary};
pub use wire::FieldSet;

use crate::error::PayflowResult;
use crate::payments::country::IsoCountryLookup;
use crate::payments::traits::{CountryLookup, Transport};
use crate::payments::types::{HelperOptions, Mode};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub struct PayflowLink<T: Transport> {
    mode: Mode,
    transport: T,
    country_lookup: Arc<dyn CountryLookup>,
}

impl<T: Transport> PayflowLink<T> {
    pub fn new(mode: Mode, transport: T) -> Self {
        Self::with_country_lookup(mode, transport, Arc::new(IsoCountryLookup::new()))
    }

    pub fn with_country_lookup(
        mode: Mode,
        transport: T,
        country_lookup: Arc<dyn CountryLookup>,
    ) -> Self {
        info!("Payflow Link integration initialized in {} mode", mode);
        Self {
            mode,
            transport,
            country_lookup,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Hosted page the rendered form posts to
    pub fn service_url(&self) -> &'static str {
        self.mode.service_url()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn helper(&self, order: &str, account: &str, options: HelperOptions) -> Helper {
        Helper::new(
            order,
            account,
            options,
            self.mode,
            Arc::clone(&self.country_lookup),
        )
    }

    /// Run the secure token exchange and build the form to render
    pub async fn hosted_form(&self, helper: &mut Helper) -> PayflowResult<HostedForm> {
        let fields = helper.form_fields(&self.transport).await?;
        Ok(HostedForm::new(self.service_url(), fields))
    }

    pub fn notification(&self, params: HashMap<String, String>) -> Notification {
        Notification::from_params(params)
    }

    pub fn parse_notification(&self, raw: &str) -> Notification {
        Notification::parse(raw)
    }
}
