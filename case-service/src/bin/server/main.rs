use std::sync::Arc;

use auth::Argon2Hasher;
use auth::Authenticator;
use auth::TokenCodec;
use case_service::config::Config;
use case_service::domain::agenda::service::AgendaService;
use case_service::domain::client::service::ClientService;
use case_service::domain::file::service::FileService;
use case_service::domain::invoice::service::InvoiceService;
use case_service::domain::legal_case::service::LegalCaseService;
use case_service::domain::session::service::SessionService;
use case_service::domain::user::service::UserService;
use case_service::inbound::http::router::create_router;
use case_service::outbound::repositories::AgendaScope;
use case_service::outbound::repositories::CaseFileScope;
use case_service::outbound::repositories::InvoiceScope;
use case_service::outbound::repositories::LegalCaseScope;
use case_service::outbound::repositories::PgResourceScope;
use case_service::outbound::repositories::PostgresAgendaRepository;
use case_service::outbound::repositories::PostgresClientRepository;
use case_service::outbound::repositories::PostgresFileRepository;
use case_service::outbound::repositories::PostgresInvoiceRepository;
use case_service::outbound::repositories::PostgresLegalCaseRepository;
use case_service::outbound::repositories::PostgresUserRepository;
use case_service::outbound::storage::FsBlobStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "case_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "case-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage_root = %config.storage.root.display(),
        token_ttl_minutes = config.token.ttl_minutes,
        max_numbering_attempts = config.invoice.max_numbering_attempts,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let codec = TokenCodec::new(config.token.secret.as_bytes())
        .with_default_ttl(chrono::Duration::minutes(config.token.ttl_minutes));
    let authenticator = Arc::new(Authenticator::new(codec));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let client_repository = Arc::new(PostgresClientRepository::new(pg_pool.clone()));
    let legal_case_repository = Arc::new(PostgresLegalCaseRepository::new(pg_pool.clone()));
    let file_repository = Arc::new(PostgresFileRepository::new(pg_pool.clone()));
    let invoice_repository = Arc::new(PostgresInvoiceRepository::new(pg_pool.clone()));
    let agenda_repository = Arc::new(PostgresAgendaRepository::new(pg_pool.clone()));

    let case_scope = Arc::new(PgResourceScope::<LegalCaseScope>::new(pg_pool.clone()));
    let file_scope = Arc::new(PgResourceScope::<CaseFileScope>::new(pg_pool.clone()));
    let invoice_scope = Arc::new(PgResourceScope::<InvoiceScope>::new(pg_pool.clone()));
    let agenda_scope = Arc::new(PgResourceScope::<AgendaScope>::new(pg_pool));

    let blob_storage = Arc::new(FsBlobStorage::new(config.storage.root.clone()));

    let session_service = Arc::new(SessionService::new(
        Arc::clone(&user_repository),
        authenticator,
    ));
    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::new(Argon2Hasher::new()),
    ));
    let client_service = Arc::new(ClientService::new(client_repository));
    let legal_case_service = Arc::new(LegalCaseService::new(
        legal_case_repository,
        Arc::clone(&case_scope),
    ));
    let file_service = Arc::new(FileService::new(
        file_repository,
        blob_storage,
        case_scope,
        file_scope,
    ));
    let invoice_service = Arc::new(InvoiceService::new(
        invoice_repository,
        invoice_scope,
        config.invoice.max_numbering_attempts,
    ));
    let agenda_service = Arc::new(AgendaService::new(agenda_repository, agenda_scope));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        session_service,
        user_service,
        client_service,
        legal_case_service,
        file_service,
        invoice_service,
        agenda_service,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
