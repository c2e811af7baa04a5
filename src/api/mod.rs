//! HTTP surface for the hosted checkout and postback receiver

pub mod checkout;
pub mod health;
pub mod notifications;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::payments::providers::PayflowLink;
use crate::payments::traits::Transport;

pub type SharedPayflow = Arc<PayflowLink<Arc<dyn Transport>>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub payflow: SharedPayflow,
}

impl AppState {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        let payflow = PayflowLink::new(config.payflow.mode, transport);
        Self {
            config: Arc::new(config),
            payflow: Arc::new(payflow),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/checkout", post(checkout::create_checkout))
        .route("/notifications", post(notifications::receive_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
