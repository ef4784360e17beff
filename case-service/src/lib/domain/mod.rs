pub mod access;
pub mod account;
pub mod agenda;
pub mod client;
pub mod file;
pub mod ids;
pub mod invoice;
pub mod legal_case;
pub mod session;
pub mod user;
