use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ClientData;
use crate::domain::client::errors::ClientError;
use crate::domain::client::ports::ClientServicePort;
use crate::domain::user::models::NationalId;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// `GET /api/clients?national_id=11111111-1`
#[derive(Debug, Deserialize)]
pub struct GetClientParams {
    national_id: String,
}

/// Look up a client of the caller's account by national id.
pub async fn get_client(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<GetClientParams>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    let national_id = NationalId::new(params.national_id).map_err(ClientError::from)?;

    state
        .client_service
        .get_client_by_national_id(&principal, &national_id)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}
