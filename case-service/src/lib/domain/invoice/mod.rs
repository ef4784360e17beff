pub mod errors;
pub mod models;
pub mod numbering;
pub mod ports;
pub mod service;
