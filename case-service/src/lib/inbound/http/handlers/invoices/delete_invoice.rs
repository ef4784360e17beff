use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::ids::InvoiceId;
use crate::domain::invoice::ports::InvoiceServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(invoice_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let invoice_id = InvoiceId::from_string(&invoice_id)?;

    state
        .invoice_service
        .delete_invoice(&principal, invoice_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
