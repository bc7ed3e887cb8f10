//! Replaying adapters that replay recorded interactions.

pub mod filesystem;

pub use filesystem::ReplayingFileSystem;
