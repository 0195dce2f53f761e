//! physio-core
//!
//! Pure domain types and record key conventions.
//! The shared vocabulary of the screening workspace. No I/O.

pub mod error;
pub mod models;
pub mod record_keys;
