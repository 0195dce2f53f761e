//! physio-cli library root.
//!
//! Re-exports the config and script modules so integration tests can
//! exercise them without going through the binary.

pub mod config;
pub mod script;
