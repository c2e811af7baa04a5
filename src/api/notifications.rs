use axum::{extract::State, Form, Json};
use std::collections::HashMap;
use tracing::info;

use crate::api::AppState;
use crate::payments::providers::payflow_link::NotificationSummary;

/// Postback receiver; always answers 200
pub async fn receive_notification(
    State(state): State<AppState>,
    Form(params): Form<HashMap<String, String>>,
) -> Json<NotificationSummary> {
    let notification = state.payflow.notification(params);

    info!(
        "Payflow notification received: invoice={}, pnref={}, status={}, test={}",
        notification.invoice().unwrap_or("-"),
        notification.transaction_id().unwrap_or("-"),
        notification.status(),
        notification.test()
    );

    Json(notification.summary())
}
