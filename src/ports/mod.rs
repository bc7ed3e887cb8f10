//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the fixture walker and an
//! external system (the filesystem, config-file resolution).
//! Implementations live in `src/adapters/`.

pub mod config;
pub mod filesystem;

pub use config::ConfigLoader;
pub use filesystem::FileSystem;
