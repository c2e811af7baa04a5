//! Payment provider implementations

pub mod payflow_link;

pub use payflow_link::PayflowLink;
