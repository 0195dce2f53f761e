use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::body_map::MarkedArea;
use super::classification::{CarePathway, RiskLevel};
use super::screening::{ProblemType, PsfsItem, RedFlags, SymptomDuration};

/// A screening assessment before the store has assigned it an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewScreeningAssessment {
    pub patient_id: Uuid,
    pub problem_type: Option<ProblemType>,
    pub primary_complaint: Option<String>,
    pub symptom_onset: Option<jiff::civil::Date>,
    pub symptom_duration: Option<SymptomDuration>,
    pub aggravating_factors: Option<String>,
    pub relieving_factors: Option<String>,
    pub pain_areas: Vec<MarkedArea>,
    pub pain_narrative: String,
    pub patient_narrative: Option<String>,
    pub functional_goals: Option<String>,
    pub impact_on_life: Option<String>,
    pub support_system: Option<String>,
    pub red_flags: RedFlags,
    pub psfs_items: Vec<PsfsItem>,
    pub mini_fabq_score: Option<u8>,
    pub mood_phq_score: Option<u8>,
    pub recommended_pathway: CarePathway,
    pub risk_level: RiskLevel,
    pub assessment_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningAssessment {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: NewScreeningAssessment,
    pub created_at: jiff::Timestamp,
}

pub fn assessment_notes(pathway: CarePathway, risk_level: RiskLevel) -> String {
    format!("Screening completed. Pathway: {pathway}. Risk: {risk_level}.")
}
