//! Validation rules — pure predicates gating forward navigation.
//!
//! Invoked at the command boundary before a screen transition is allowed;
//! the store itself never enforces these. A failure blocks the transition
//! and is shown to the operator as a titled notice; state is left unchanged.

use thiserror::Error;

use crate::models::HealthConcern;
use crate::onboarding::{OnboardingState, Screen};

/// Selection bounds for the health-concerns screen.
pub const MAX_HEALTH_CONCERNS: usize = 5;
pub const MIN_HEALTH_CONCERNS: usize = 1;

/// A blocked transition, carrying the operator-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("You can select up to {MAX_HEALTH_CONCERNS} health concerns.")]
    MaxConcernsReached,

    #[error("Please select at least one health concern.")]
    ConcernRequired,

    #[error("Please answer all lifestyle questions before continuing.")]
    LifestyleIncomplete,
}

impl ValidationFailure {
    /// Notice title shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::MaxConcernsReached => "Maximum Selection",
            Self::ConcernRequired => "Selection Required",
            Self::LifestyleIncomplete => "Complete Required Fields",
        }
    }
}

/// May another concern be added to the current selection?
pub fn can_select_concern(selected: &[HealthConcern]) -> Result<(), ValidationFailure> {
    if selected.len() >= MAX_HEALTH_CONCERNS {
        return Err(ValidationFailure::MaxConcernsReached);
    }
    Ok(())
}

/// Is the health-concerns selection complete enough to move on?
pub fn check_concerns_complete(selected: &[HealthConcern]) -> Result<(), ValidationFailure> {
    if selected.len() < MIN_HEALTH_CONCERNS {
        return Err(ValidationFailure::ConcernRequired);
    }
    Ok(())
}

/// Are all three lifestyle questions answered?
pub fn check_lifestyle_complete(state: &OnboardingState) -> Result<(), ValidationFailure> {
    if state.is_daily_exposure.is_none() || state.is_smoke.is_none() || state.alcohol.is_none() {
        return Err(ValidationFailure::LifestyleIncomplete);
    }
    Ok(())
}

/// Gate a forward transition out of the given screen.
///
/// Diets and allergies have no minimum — empty means "None" and is valid.
pub fn gate_forward(screen: Screen, state: &OnboardingState) -> Result<(), ValidationFailure> {
    match screen {
        Screen::HealthConcerns => check_concerns_complete(&state.health_concerns),
        Screen::Lifestyle => check_lifestyle_complete(state),
        Screen::Welcome | Screen::Diets | Screen::Allergies => Ok(()),
    }
}
