use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::agenda;
use super::handlers::auth;
use super::handlers::clients;
use super::handlers::files;
use super::handlers::invoices;
use super::handlers::legal_cases;
use super::handlers::users;
use super::middleware::authenticate as auth_middleware;
use crate::domain::agenda::service::AgendaService;
use crate::domain::client::service::ClientService;
use crate::domain::file::service::FileService;
use crate::domain::invoice::service::InvoiceService;
use crate::domain::legal_case::service::LegalCaseService;
use crate::domain::session::service::SessionService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::AgendaScope;
use crate::outbound::repositories::CaseFileScope;
use crate::outbound::repositories::InvoiceScope;
use crate::outbound::repositories::LegalCaseScope;
use crate::outbound::repositories::PgResourceScope;
use crate::outbound::repositories::PostgresAgendaRepository;
use crate::outbound::repositories::PostgresClientRepository;
use crate::outbound::repositories::PostgresFileRepository;
use crate::outbound::repositories::PostgresInvoiceRepository;
use crate::outbound::repositories::PostgresLegalCaseRepository;
use crate::outbound::repositories::PostgresUserRepository;
use crate::outbound::storage::FsBlobStorage;

pub type PgSessionService = SessionService<PostgresUserRepository>;
pub type PgUserService = UserService<PostgresUserRepository>;
pub type PgClientService = ClientService<PostgresClientRepository>;
pub type PgLegalCaseService =
    LegalCaseService<PostgresLegalCaseRepository, PgResourceScope<LegalCaseScope>>;
pub type PgFileService = FileService<
    PostgresFileRepository,
    FsBlobStorage,
    PgResourceScope<LegalCaseScope>,
    PgResourceScope<CaseFileScope>,
>;
pub type PgInvoiceService = InvoiceService<PostgresInvoiceRepository, PgResourceScope<InvoiceScope>>;
pub type PgAgendaService = AgendaService<PostgresAgendaRepository, PgResourceScope<AgendaScope>>;

/// Largest accepted upload body.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<PgSessionService>,
    pub user_service: Arc<PgUserService>,
    pub client_service: Arc<PgClientService>,
    pub legal_case_service: Arc<PgLegalCaseService>,
    pub file_service: Arc<PgFileService>,
    pub invoice_service: Arc<PgInvoiceService>,
    pub agenda_service: Arc<PgAgendaService>,
}

pub fn create_router(
    session_service: Arc<PgSessionService>,
    user_service: Arc<PgUserService>,
    client_service: Arc<PgClientService>,
    legal_case_service: Arc<PgLegalCaseService>,
    file_service: Arc<PgFileService>,
    invoice_service: Arc<PgInvoiceService>,
    agenda_service: Arc<PgAgendaService>,
) -> Router {
    let state = AppState {
        session_service,
        user_service,
        client_service,
        legal_case_service,
        file_service,
        invoice_service,
        agenda_service,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout));

    let protected_routes = Router::new()
        .route("/api/users", post(users::register_user))
        .route(
            "/api/users/me",
            get(users::get_profile).patch(users::update_profile),
        )
        .route("/api/users/me/password", put(users::change_password))
        .route("/api/clients", get(clients::get_client))
        .route(
            "/api/cases",
            get(legal_cases::list_cases).post(legal_cases::create_case),
        )
        .route(
            "/api/cases/:case_id",
            get(legal_cases::get_case)
                .patch(legal_cases::update_case)
                .delete(legal_cases::delete_case),
        )
        .route("/api/cases/:case_id/notes", put(legal_cases::update_notes))
        .route("/api/cases/:case_id/status", put(legal_cases::update_status))
        .route(
            "/api/cases/:case_id/files",
            get(files::list_case_files)
                .post(files::upload_file)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/api/cases/:case_id/files/:file_id",
            get(files::download_file).delete(files::delete_file),
        )
        .route(
            "/api/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route(
            "/api/invoices/:invoice_id",
            get(invoices::get_invoice).delete(invoices::delete_invoice),
        )
        .route(
            "/api/invoices/:invoice_id/status",
            put(invoices::update_invoice_status),
        )
        .route(
            "/api/agenda",
            get(agenda::list_events).post(agenda::create_event),
        )
        .route(
            "/api/agenda/:event_id",
            get(agenda::get_event)
                .patch(agenda::update_event)
                .delete(agenda::delete_event),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry the session cookie.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
