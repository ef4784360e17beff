use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::InvoiceData;
use crate::domain::ids::InvoiceId;
use crate::domain::invoice::models::InvoiceStatus;
use crate::domain::invoice::ports::InvoiceServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateInvoiceStatusRequest {
    status: String,
}

pub async fn update_invoice_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(invoice_id): Path<String>,
    Json(body): Json<UpdateInvoiceStatusRequest>,
) -> Result<ApiSuccess<InvoiceData>, ApiError> {
    let invoice_id = InvoiceId::from_string(&invoice_id)?;
    let status = body.status.parse::<InvoiceStatus>()?;

    state
        .invoice_service
        .update_status(&principal, invoice_id, status)
        .await
        .map_err(ApiError::from)
        .map(|ref invoice| ApiSuccess::new(StatusCode::OK, invoice.into()))
}
