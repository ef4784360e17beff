use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::InvoiceData;
use crate::domain::invoice::ports::InvoiceServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<InvoiceData>>, ApiError> {
    state
        .invoice_service
        .list_invoices(&principal)
        .await
        .map_err(ApiError::from)
        .map(|invoices| {
            let data: Vec<InvoiceData> = invoices.iter().map(|i| i.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}
