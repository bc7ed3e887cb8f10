//! Live adapters for real external interactions.

pub mod config;
pub mod filesystem;

pub use config::StructuredConfigLoader;
pub use filesystem::LiveFileSystem;
