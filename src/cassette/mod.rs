//! Cassette format for recording and replaying filesystem interactions.
//!
//! A cassette captures every call a fixture build makes against the
//! `FileSystem` port, so the same tree can be rebuilt later without disk.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
