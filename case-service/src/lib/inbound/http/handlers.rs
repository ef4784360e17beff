use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::access::errors::AccessError;
use crate::domain::agenda::errors::AgendaError;
use crate::domain::client::errors::ClientError;
use crate::domain::file::errors::FileError;
use crate::domain::ids::IdError;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::legal_case::errors::LegalCaseError;
use crate::domain::session::errors::SessionError;
use crate::domain::user::errors::UserError;

pub mod agenda;
pub mod auth;
pub mod clients;
pub mod files;
pub mod invoices;
pub mod legal_cases;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    ServiceUnavailable(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                // Database and driver detail stays in the logs.
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!(error = %msg, "Dependency unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

/// Malformed identifiers in the path.
impl From<IdError> for ApiError {
    fn from(err: IdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            SessionError::Internal(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            AccessError::Forbidden { .. } | AccessError::AccountInactive(_) => {
                ApiError::Forbidden(err.to_string())
            }
            AccessError::DatabaseError(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UsernameAlreadyExists(_)
            | UserError::NationalIdAlreadyExists(_)
            | UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::AccountInactive => ApiError::Forbidden(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidNationalId(_)
            | UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPhone(_)
            | UserError::InvalidCity(_)
            | UserError::EmptyUpdate
            | UserError::RoleNotFound(_)
            | UserError::IncorrectPassword
            | UserError::PasswordUnchanged => ApiError::UnprocessableEntity(err.to_string()),
            UserError::PasswordHashing(msg)
            | UserError::DatabaseError(msg)
            | UserError::Unknown(msg) => ApiError::InternalServerError(msg),
        }
    }
}

impl From<LegalCaseError> for ApiError {
    fn from(err: LegalCaseError) -> Self {
        match err {
            LegalCaseError::Access(e) => e.into(),
            LegalCaseError::HasFiles(_) | LegalCaseError::ClientAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            LegalCaseError::InvalidId(_)
            | LegalCaseError::InvalidTitle(_)
            | LegalCaseError::InvalidAttribute(_)
            | LegalCaseError::InvalidDateRange
            | LegalCaseError::EmptyUpdate
            | LegalCaseError::ClientNotFound(_)
            | LegalCaseError::InvalidClient(_)
            | LegalCaseError::ClientUnspecified => ApiError::UnprocessableEntity(err.to_string()),
            LegalCaseError::DatabaseError(msg) | LegalCaseError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Access(e) => e.into(),
            ClientError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ClientError::InvalidNationalId(_)
            | ClientError::InvalidName(_)
            | ClientError::InvalidEmail(_)
            | ClientError::InvalidPhone(_) => ApiError::UnprocessableEntity(err.to_string()),
            ClientError::DatabaseError(msg) | ClientError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::Access(e) => e.into(),
            FileError::NameTaken { .. } | FileError::QuotaExceeded { .. } => {
                ApiError::Conflict(err.to_string())
            }
            FileError::InvalidName(_) | FileError::TooLarge => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            FileError::BlobMissing(_) => ApiError::NotFound(err.to_string()),
            FileError::StorageUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            FileError::DatabaseError(msg) | FileError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::Access(e) => e.into(),
            InvoiceError::NumberTaken { .. }
            | InvoiceError::NumberingContention { .. }
            | InvoiceError::SequenceExhausted(_) => ApiError::Conflict(err.to_string()),
            InvoiceError::InvalidId(_)
            | InvoiceError::InvalidItem(_)
            | InvoiceError::InvalidStatus(_)
            | InvoiceError::DueBeforeEmission
            | InvoiceError::ClientNotFound(_) => ApiError::UnprocessableEntity(err.to_string()),
            InvoiceError::DatabaseError(msg) | InvoiceError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

impl From<AgendaError> for ApiError {
    fn from(err: AgendaError) -> Self {
        match err {
            AgendaError::Access(e) => e.into(),
            AgendaError::InvalidEventName(_)
            | AgendaError::EmptyDescription
            | AgendaError::InvalidDateRange
            | AgendaError::EmptyUpdate => ApiError::UnprocessableEntity(err.to_string()),
            AgendaError::DatabaseError(msg) | AgendaError::Unknown(msg) => {
                ApiError::InternalServerError(msg)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
