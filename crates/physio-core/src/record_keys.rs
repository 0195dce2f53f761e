//! Record path conventions.
//!
//! Pure string functions. These define the canonical layout of records
//! inside a storage root.

use uuid::Uuid;

pub const PATIENTS_PREFIX: &str = "patients/";
pub const ASSESSMENTS_PREFIX: &str = "assessments/";

pub fn patient(id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{id}.json")
}

pub fn assessment(id: Uuid) -> String {
    format!("{ASSESSMENTS_PREFIX}{id}.json")
}
