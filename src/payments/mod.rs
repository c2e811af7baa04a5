//! Payment gateway integration module
//!
//! Builds hosted payment page requests and interprets gateway postbacks.

pub mod country;
pub mod providers;
pub mod traits;
pub mod transport;
pub mod types;
