//! Data formatter — projects the wizard state into the persisted record.
//!
//! Pure and total: no mutation of the input, never fails. Deterministic
//! except for `timestamp`, which is stamped at call time.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AlcoholOption, Allergy, Diet};
use crate::onboarding::OnboardingState;

/// A selected health concern annotated with its user-chosen rank.
/// Priority 1 is the highest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedConcern {
    pub id: u32,
    pub name: String,
    pub priority: u32,
}

/// The final, timestamped onboarding snapshot written to durable storage.
/// Field names are the persisted JSON contract; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingRecord {
    pub health_concerns: Vec<PrioritizedConcern>,
    pub diets: Vec<Diet>,
    pub is_daily_exposure: Option<bool>,
    pub is_smoke: Option<bool>,
    pub alcohol: Option<AlcoholOption>,
    pub allergies: Vec<Allergy>,
    pub custom_allergies: String,
    pub timestamp: String,
}

/// Map the wizard state to the persisted record shape.
///
/// Priorities are assigned from `prioritized_concerns` positional order
/// (index + 1); the order is already total, no tie-break needed. The
/// formatter does not validate — unanswered lifestyle fields pass through
/// as null if it is called before the validation gate.
pub fn format_onboarding(state: &OnboardingState) -> OnboardingRecord {
    OnboardingRecord {
        health_concerns: state
            .prioritized_concerns
            .iter()
            .enumerate()
            .map(|(index, concern)| PrioritizedConcern {
                id: concern.id,
                name: concern.name.clone(),
                priority: index as u32 + 1,
            })
            .collect(),
        diets: state.selected_diets.clone(),
        is_daily_exposure: state.is_daily_exposure,
        is_smoke: state.is_smoke,
        alcohol: state.alcohol,
        allergies: state.allergies.clone(),
        custom_allergies: state.custom_allergies.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
