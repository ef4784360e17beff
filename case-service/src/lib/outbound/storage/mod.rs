pub mod fs;

pub use fs::FsBlobStorage;
