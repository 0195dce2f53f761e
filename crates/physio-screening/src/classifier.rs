//! Pathway and risk classification.
//!
//! Risk bands (5/8) and pathway bands (4/7) use different cut-offs on the
//! same worst-pain value; both sets are kept as they are.

use physio_core::models::classification::{CarePathway, ClassificationResult, RiskLevel};
use physio_core::models::screening::ScreeningData;

pub const HIGH_RISK_PAIN: u8 = 8;
pub const MEDIUM_RISK_PAIN: u8 = 5;
pub const PERSONALIZED_CARE_PAIN: u8 = 7;
pub const STANDARDIZED_PROGRAM_PAIN: u8 = 4;

const RED_FLAG_RECOMMENDATIONS: [&str; 3] = [
    "Seek immediate consultation with a doctor or go to an emergency department.",
    "Do not begin an exercise program until cleared by a medical professional.",
    "Bring a summary of these results to your appointment.",
];

const ROUTINE_RECOMMENDATIONS: [&str; 3] = [
    "Begin with gentle movement and activity modification as tolerated.",
    "Focus on understanding your pain triggers and what brings relief.",
    "Gradually increase your activity levels within a comfortable range.",
];

pub fn classify(data: &ScreeningData) -> ClassificationResult {
    let has_red_flags = data.red_flags.any();
    let worst_pain = data.pain_areas.worst_pain();

    let (pathway, risk_level) = if has_red_flags {
        (CarePathway::UrgentMedicalAssessment, RiskLevel::Urgent)
    } else {
        (pathway_for(worst_pain), risk_for(worst_pain))
    };

    ClassificationResult {
        pathway,
        risk_level,
        summary: summary(pathway).to_string(),
        recommendations: recommendations(has_red_flags)
            .iter()
            .map(|r| r.to_string())
            .collect(),
        worst_pain,
        has_red_flags,
    }
}

pub fn risk_for(worst_pain: u8) -> RiskLevel {
    if worst_pain >= HIGH_RISK_PAIN {
        RiskLevel::High
    } else if worst_pain >= MEDIUM_RISK_PAIN {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn pathway_for(worst_pain: u8) -> CarePathway {
    if worst_pain >= PERSONALIZED_CARE_PAIN {
        CarePathway::PersonalizedCare
    } else if worst_pain >= STANDARDIZED_PROGRAM_PAIN {
        CarePathway::StandardizedProgram
    } else {
        CarePathway::SelfManagement
    }
}

pub fn summary(pathway: CarePathway) -> &'static str {
    match pathway {
        CarePathway::UrgentMedicalAssessment => {
            "Your answers suggest that you should seek an urgent medical assessment from a doctor or hospital to rule out any serious conditions."
        }
        CarePathway::PersonalizedCare => {
            "You would benefit most from a personalized physiotherapy program, tailored specifically to your unique symptoms, goals, and lifestyle."
        }
        CarePathway::StandardizedProgram => {
            "A structured, evidence-based exercise program would be a great starting point to manage your condition and improve your function."
        }
        CarePathway::SelfManagement => {
            "Your symptoms appear manageable with self-care. We recommend our educational resources and gentle exercise guides."
        }
    }
}

pub fn recommendations(has_red_flags: bool) -> &'static [&'static str] {
    if has_red_flags {
        &RED_FLAG_RECOMMENDATIONS
    } else {
        &ROUTINE_RECOMMENDATIONS
    }
}
