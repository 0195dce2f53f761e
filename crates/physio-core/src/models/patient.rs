use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::classification::CarePathway;
use super::screening::PersonalInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    #[serde(flatten)]
    pub info: PersonalInfo,
    pub care_pathway: Option<CarePathway>,
    pub screening_completed: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Patient {
    /// Apply a partial update. `None` fields are left as they are.
    pub fn apply(&mut self, patch: &PatientPatch, now: jiff::Timestamp) {
        if let Some(pathway) = patch.care_pathway {
            self.care_pathway = Some(pathway);
        }
        if let Some(completed) = patch.screening_completed {
            self.screening_completed = completed;
        }
        self.updated_at = now;
    }

    pub fn display_name(&self) -> String {
        match (&self.info.first_name, &self.info.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.clone(),
            (None, None) => "(unnamed)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientPatch {
    pub care_pathway: Option<CarePathway>,
    pub screening_completed: Option<bool>,
}
