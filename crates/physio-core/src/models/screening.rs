use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::body_map::MarkedArea;
use crate::error::CoreError;

/// Identifies one of the data-collecting screening steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StepKey {
    PersonalInfo,
    Symptoms,
    PainAreas,
    Functional,
    Scales,
    RedFlags,
}

impl StepKey {
    pub const ALL: [StepKey; 6] = [
        Self::PersonalInfo,
        Self::Symptoms,
        Self::PainAreas,
        Self::Functional,
        Self::Scales,
        Self::RedFlags,
    ];

    /// 1-based position in the flow.
    pub fn number(&self) -> usize {
        match self {
            Self::PersonalInfo => 1,
            Self::Symptoms => 2,
            Self::PainAreas => 3,
            Self::Functional => 4,
            Self::Scales => 5,
            Self::RedFlags => 6,
        }
    }

    pub fn from_number(number: usize) -> Result<Self, CoreError> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(CoreError::UnknownStep(number))
    }

    pub fn first() -> Self {
        Self::PersonalInfo
    }

    pub fn last() -> Self {
        Self::RedFlags
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1).ok()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::Symptoms => "Symptom Assessment",
            Self::PainAreas => "Pain Mapping",
            Self::Functional => "Your Story & Goals",
            Self::Scales => "Clinical Questionnaires",
            Self::RedFlags => "Safety Check",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personal_info",
            Self::Symptoms => "symptoms",
            Self::PainAreas => "pain_areas",
            Self::Functional => "functional",
            Self::Scales => "scales",
            Self::RedFlags => "red_flags",
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PersonalInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<jiff::civil::Date>,
    pub gender: Option<Gender>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub allergies: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ProblemType {
    /// Recent injury or onset, under 6 weeks.
    Acute,
    /// Long-standing or recurring, over 3 months.
    Chronic,
    PostOperative,
    PreventionCheckup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SymptomDuration {
    #[serde(rename = "less_than_1_week")]
    LessThanOneWeek,
    #[serde(rename = "1_2_weeks")]
    OneToTwoWeeks,
    #[serde(rename = "2_6_weeks")]
    TwoToSixWeeks,
    #[serde(rename = "6_weeks_3_months")]
    SixWeeksToThreeMonths,
    #[serde(rename = "3_6_months")]
    ThreeToSixMonths,
    #[serde(rename = "more_than_1_year")]
    MoreThanOneYear,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Symptoms {
    pub problem_type: Option<ProblemType>,
    pub primary_complaint: Option<String>,
    pub symptom_onset: Option<jiff::civil::Date>,
    pub duration: Option<SymptomDuration>,
    pub aggravating_factors: Option<String>,
    pub relieving_factors: Option<String>,
}

/// The body-chart step: every marked area plus the free-text description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PainMapping {
    pub pain_areas: Vec<MarkedArea>,
    pub pain_narrative: String,
}

impl PainMapping {
    /// Highest intensity over all marked areas, 0 when nothing is marked.
    pub fn worst_pain(&self) -> u8 {
        self.pain_areas
            .iter()
            .map(|area| area.intensity().value())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Functional {
    pub patient_narrative: Option<String>,
    pub goals: Option<String>,
    pub impact_on_life: Option<String>,
    pub support_system: Option<String>,
}

/// One Patient-Specific Functional Scale activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PsfsItem {
    pub activity: String,
    /// 0 = cannot do, 10 = able to do at previous level.
    pub rating: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct Scales {
    pub psfs_items: Vec<PsfsItem>,
    /// Item id -> response value.
    pub fabq_responses: BTreeMap<String, u8>,
    pub phq_responses: BTreeMap<String, u8>,
}

/// Red-flag answers keyed by question id. Unanswered questions are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct RedFlags(pub BTreeMap<String, bool>);

impl RedFlags {
    pub fn any(&self) -> bool {
        self.0.values().any(|answer| *answer)
    }

    pub fn set(&mut self, question_id: impl Into<String>, answer: bool) {
        self.0.insert(question_id.into(), answer);
    }

    /// Ids of every question answered "yes".
    pub fn raised(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, answer)| **answer)
            .map(|(id, _)| id.as_str())
    }
}

/// A replacement for exactly one step's slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "step", content = "data", rename_all = "snake_case")]
#[ts(export)]
pub enum StepData {
    PersonalInfo(PersonalInfo),
    Symptoms(Symptoms),
    PainAreas(PainMapping),
    Functional(Functional),
    Scales(Scales),
    RedFlags(RedFlags),
}

impl StepData {
    pub fn key(&self) -> StepKey {
        match self {
            Self::PersonalInfo(_) => StepKey::PersonalInfo,
            Self::Symptoms(_) => StepKey::Symptoms,
            Self::PainAreas(_) => StepKey::PainAreas,
            Self::Functional(_) => StepKey::Functional,
            Self::Scales(_) => StepKey::Scales,
            Self::RedFlags(_) => StepKey::RedFlags,
        }
    }
}

/// Everything collected across the screening flow, one slice per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ScreeningData {
    pub personal_info: PersonalInfo,
    pub symptoms: Symptoms,
    pub pain_areas: PainMapping,
    pub functional: Functional,
    pub scales: Scales,
    pub red_flags: RedFlags,
}

impl ScreeningData {
    /// Replace the slice `data` belongs to. Last write wins.
    pub fn apply(&mut self, data: StepData) {
        match data {
            StepData::PersonalInfo(v) => self.personal_info = v,
            StepData::Symptoms(v) => self.symptoms = v,
            StepData::PainAreas(v) => self.pain_areas = v,
            StepData::Functional(v) => self.functional = v,
            StepData::Scales(v) => self.scales = v,
            StepData::RedFlags(v) => self.red_flags = v,
        }
    }

    /// A copy of the slice for `key`.
    pub fn slice(&self, key: StepKey) -> StepData {
        match key {
            StepKey::PersonalInfo => StepData::PersonalInfo(self.personal_info.clone()),
            StepKey::Symptoms => StepData::Symptoms(self.symptoms.clone()),
            StepKey::PainAreas => StepData::PainAreas(self.pain_areas.clone()),
            StepKey::Functional => StepData::Functional(self.functional.clone()),
            StepKey::Scales => StepData::Scales(self.scales.clone()),
            StepKey::RedFlags => StepData::RedFlags(self.red_flags.clone()),
        }
    }
}
