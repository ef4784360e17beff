pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

// Re-export commonly used types
pub use domain::access;
pub use domain::agenda;
pub use domain::client;
pub use domain::file;
pub use domain::invoice;
pub use domain::legal_case;
pub use domain::session;
pub use domain::user;
pub use outbound::repositories;
