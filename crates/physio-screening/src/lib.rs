//! physio-screening
//!
//! The screening flow: ordered steps with per-step data, submission to the
//! record store, and the pathway/risk classification shown at the end.

pub mod classifier;
pub mod error;
pub mod events;
pub mod session;
pub mod steps;
pub mod submission;
