use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::api::{AppState, ErrorResponse};
use crate::error::PayflowError;
use crate::payments::providers::payflow_link::HostedForm;
use crate::payments::types::{BillingAddress, Customer, HelperOptions};

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub order_id: String,
    /// Two fraction digits, e.g. "25.00"
    pub amount: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub billing_address: Option<BillingAddress>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub transaction_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub form: HostedForm,
    pub html: String,
}

pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        "Creating Payflow checkout: order_id={}, amount={}",
        request.order_id, request.amount
    );

    let credentials = &state.config.payflow;
    let options = HelperOptions {
        amount: Some(request.amount),
        credential2: Some(credentials.password.clone()),
        credential3: Some(credentials.partner.clone()),
        credential4: credentials.user.clone(),
        transaction_type: request.transaction_type,
    };

    let mut helper = state
        .payflow
        .helper(&request.order_id, &credentials.login, options);
    helper.description(request.description.as_deref());
    if let Some(customer) = &request.customer {
        helper.customer(customer);
    }
    if let Some(address) = &request.billing_address {
        helper.billing_address(address);
    }

    let form = state
        .payflow
        .hosted_form(&mut helper)
        .await
        .map_err(|e| checkout_error(&request.order_id, e))?;

    info!("Payflow checkout ready: order_id={}", request.order_id);

    let html = form.to_html();
    Ok(Json(CheckoutResponse { form, html }))
}

fn checkout_error(order_id: &str, err: PayflowError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        PayflowError::TokenNotApproved { .. } => {
            warn!("Checkout declined by gateway: order_id={}, {}", order_id, err);
            StatusCode::BAD_GATEWAY
        }
        PayflowError::NetworkError { .. } => {
            error!("Gateway unreachable: order_id={}, {}", order_id, err);
            StatusCode::SERVICE_UNAVAILABLE
        }
        PayflowError::ConfigError { .. } => {
            error!("Checkout failed: order_id={}, {}", order_id, err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::new(err.to_string())))
}
