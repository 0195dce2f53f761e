//! physio-storage
//!
//! The record store screening submissions are written to. The core only
//! sees the [`entities::EntityStore`] trait; this crate ships an in-memory
//! store and a JSON-file store.

pub mod entities;
pub mod error;
pub mod files;
pub mod json_dir;
pub mod memory;
pub mod state;
