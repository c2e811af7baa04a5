//! Payflow Link hosted payment page adapter
//!
//! Turns checkout data into the secure-token form PayPal's Payflow Link page
//! expects, and turns its postbacks back into typed values.
//!
//! ```no_run
//! use payflow_link_adapter::payments::providers::PayflowLink;
//! use payflow_link_adapter::payments::transport::{ReqwestTransport, TransportConfig};
//! use payflow_link_adapter::payments::types::{HelperOptions, Mode};
//!
//! # async fn example() -> payflow_link_adapter::error::PayflowResult<()> {
//! let transport = ReqwestTransport::new(TransportConfig::default())?;
//! let payflow = PayflowLink::new(Mode::Test, transport);
//!
//! let mut helper = payflow.helper(
//!     "order-1001",
//!     "merchant-login",
//!     HelperOptions {
//!         amount: Some("25.00".to_string()),
//!         credential2: Some("password".to_string()),
//!         credential3: Some("PayPal".to_string()),
//!         ..Default::default()
//!     },
//! );
//! helper.description(Some("Widgets"));
//!
//! let form = payflow.hosted_form(&mut helper).await?;
//! println!("{}", form.to_html());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod payments;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

pub use error::{PayflowError, PayflowResult};
