use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Care track recommended at the end of screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CarePathway {
    UrgentMedicalAssessment,
    PersonalizedCare,
    StandardizedProgram,
    SelfManagement,
}

impl CarePathway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UrgentMedicalAssessment => "urgent_medical_assessment",
            Self::PersonalizedCare => "personalized_care",
            Self::StandardizedProgram => "standardized_program",
            Self::SelfManagement => "self_management",
        }
    }
}

impl fmt::Display for CarePathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity banding shown next to the pathway for triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Urgent,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a completed screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationResult {
    pub pathway: CarePathway,
    pub risk_level: RiskLevel,
    pub summary: String,
    pub recommendations: Vec<String>,
    /// Highest marked intensity the bands were computed from.
    pub worst_pain: u8,
    pub has_red_flags: bool,
}
