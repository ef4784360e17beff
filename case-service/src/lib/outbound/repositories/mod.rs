pub mod agenda;
pub mod client;
pub mod file;
pub mod invoice;
pub mod legal_case;
pub mod scope;
pub mod user;

pub use agenda::AgendaScope;
pub use agenda::PostgresAgendaRepository;
pub use client::PostgresClientRepository;
pub use file::CaseFileScope;
pub use file::PostgresFileRepository;
pub use invoice::InvoiceScope;
pub use invoice::PostgresInvoiceRepository;
pub use legal_case::LegalCaseScope;
pub use legal_case::PostgresLegalCaseRepository;
pub use scope::PgResourceScope;
pub use user::PostgresUserRepository;
