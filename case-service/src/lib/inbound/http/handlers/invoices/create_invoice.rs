use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::InvoiceData;
use crate::domain::ids::ClientId;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::models::CreateInvoiceCommand;
use crate::domain::invoice::models::InvoiceItem;
use crate::domain::invoice::ports::InvoiceServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateInvoiceRequest>,
) -> Result<ApiSuccess<InvoiceData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .invoice_service
        .create_invoice(&principal, command)
        .await
        .map_err(ApiError::from)
        .map(|ref invoice| ApiSuccess::new(StatusCode::CREATED, invoice.into()))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    client_id: i64,
    due_date: DateTime<Utc>,
    items: Vec<InvoiceItemRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceItemRequest {
    description: String,
    #[serde(default = "default_hours")]
    hours_worked: i32,
    hourly_rate_cents: i64,
}

fn default_hours() -> i32 {
    1
}

impl CreateInvoiceRequest {
    fn try_into_command(self) -> Result<CreateInvoiceCommand, InvoiceError> {
        let items = self
            .items
            .into_iter()
            .map(|i| InvoiceItem::new(i.description, i.hours_worked, i.hourly_rate_cents))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateInvoiceCommand {
            client_id: ClientId(self.client_id),
            due_date: self.due_date,
            items,
        })
    }
}
