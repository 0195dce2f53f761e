use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use physio_core::models::classification::{CarePathway, RiskLevel};

/// A structured record of a completed screening, emitted via `tracing`.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningEvent {
    pub action: &'static str,
    pub patient_id: Uuid,
    pub assessment_id: Uuid,
    pub pathway: CarePathway,
    pub risk_level: RiskLevel,
}

impl ScreeningEvent {
    pub fn completed(
        patient_id: Uuid,
        assessment_id: Uuid,
        pathway: CarePathway,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            action: "screening_completed",
            patient_id,
            assessment_id,
            pathway,
            risk_level,
        }
    }

    pub fn emit(&self) {
        info!(
            event.action = self.action,
            event.patient_id = %self.patient_id,
            event.assessment_id = %self.assessment_id,
            event.pathway = %self.pathway,
            event.risk_level = %self.risk_level,
            "screening event"
        );
    }
}
