//! Onboarding IPC commands — the boundary the screens call.
//!
//! Validation happens here, before the store is touched; the store's own
//! operations are total. All commands return `Result<_, String>` with the
//! operator-facing notice text on the error side.

use std::sync::Arc;

use tauri::State;

use crate::core_state::AppState;
use crate::formatter::OnboardingRecord;
use crate::models::{AlcoholOption, Allergy, Diet, HealthConcern};
use crate::onboarding::{
    persist_onboarding, restore_onboarding, OnboardingAction, OnboardingState, Screen,
};
use crate::validation::{self, ValidationFailure};

fn notice(failure: ValidationFailure) -> String {
    format!("{}: {failure}", failure.title())
}

/// Toggle a concern in the selection, enforcing the selection cap.
///
/// The prioritized list mirrors the selection: removals drop the entry
/// without disturbing the remaining rank order, additions append at the
/// lowest priority.
fn apply_toggle(
    selected: &[HealthConcern],
    prioritized: &[HealthConcern],
    concern: HealthConcern,
) -> Result<(Vec<HealthConcern>, Vec<HealthConcern>), ValidationFailure> {
    if selected.iter().any(|c| c.id == concern.id) {
        let selected = selected.iter().filter(|c| c.id != concern.id).cloned().collect();
        let prioritized = prioritized
            .iter()
            .filter(|c| c.id != concern.id)
            .cloned()
            .collect();
        return Ok((selected, prioritized));
    }

    validation::can_select_concern(selected)?;
    let mut selected = selected.to_vec();
    let mut prioritized = prioritized.to_vec();
    selected.push(concern.clone());
    prioritized.push(concern);
    Ok((selected, prioritized))
}

#[tauri::command]
pub fn get_onboarding_state(state: State<'_, Arc<AppState>>) -> Result<OnboardingState, String> {
    state.onboarding.snapshot().map_err(|e| e.to_string())
}

/// Select or deselect a health concern. Errors with the "Maximum Selection"
/// notice once five are selected.
#[tauri::command]
pub fn toggle_health_concern(
    concern: HealthConcern,
    state: State<'_, Arc<AppState>>,
) -> Result<OnboardingState, String> {
    let current = state.onboarding.snapshot().map_err(|e| e.to_string())?;
    let (selected, prioritized) = apply_toggle(
        &current.health_concerns,
        &current.prioritized_concerns,
        concern,
    )
    .map_err(notice)?;

    state
        .onboarding
        .dispatch(OnboardingAction::SetHealthConcerns(selected))
        .map_err(|e| e.to_string())?;
    state
        .onboarding
        .dispatch(OnboardingAction::SetPrioritizedConcerns(prioritized))
        .map_err(|e| e.to_string())?;
    state.onboarding.snapshot().map_err(|e| e.to_string())
}

/// Replace the priority order after a drag-reorder in the frontend.
#[tauri::command]
pub fn set_prioritized_concerns(
    concerns: Vec<HealthConcern>,
    state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetPrioritizedConcerns(concerns))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_selected_diets(
    diets: Vec<Diet>,
    state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetSelectedDiets(diets))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_allergies(
    allergies: Vec<Allergy>,
    state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetAllergies(allergies))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_custom_allergies(text: String, state: State<'_, Arc<AppState>>) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetCustomAllergies(text))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_daily_exposure(answer: bool, state: State<'_, Arc<AppState>>) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetDailyExposure(answer))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_smoke(answer: bool, state: State<'_, Arc<AppState>>) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetSmoke(answer))
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_alcohol(
    option: AlcoholOption,
    state: State<'_, Arc<AppState>>,
) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetAlcohol(option))
        .map_err(|e| e.to_string())
}

/// Direct navigation — unchecked by design.
#[tauri::command]
pub fn set_current_step(step: u32, state: State<'_, Arc<AppState>>) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::SetCurrentStep(step))
        .map_err(|e| e.to_string())
}

/// Validation-gated forward navigation out of `screen`.
///
/// On success the step index becomes the next screen's; leaving the final
/// screen goes through `complete_onboarding` instead.
#[tauri::command]
pub fn advance_screen(
    screen: Screen,
    state: State<'_, Arc<AppState>>,
) -> Result<OnboardingState, String> {
    let snapshot = state.onboarding.snapshot().map_err(|e| e.to_string())?;
    validation::gate_forward(screen, &snapshot).map_err(notice)?;

    if let Some(next) = screen.next() {
        state
            .onboarding
            .dispatch(OnboardingAction::SetCurrentStep(next.step_index()))
            .map_err(|e| e.to_string())?;
    }
    state.onboarding.snapshot().map_err(|e| e.to_string())
}

/// Backward navigation out of `screen`. A no-op on the first screen.
#[tauri::command]
pub fn go_back(
    screen: Screen,
    state: State<'_, Arc<AppState>>,
) -> Result<OnboardingState, String> {
    if let Some(prev) = screen.prev() {
        state
            .onboarding
            .dispatch(OnboardingAction::SetCurrentStep(prev.step_index()))
            .map_err(|e| e.to_string())?;
    }
    state.onboarding.snapshot().map_err(|e| e.to_string())
}

/// Final step: gate the lifestyle answers, then run the save flow.
/// Returns the persisted record.
#[tauri::command]
pub fn complete_onboarding(
    state: State<'_, Arc<AppState>>,
) -> Result<OnboardingRecord, String> {
    let snapshot = state.onboarding.snapshot().map_err(|e| e.to_string())?;
    validation::check_lifestyle_complete(&snapshot).map_err(notice)?;

    let conn = state.open_db().map_err(|e| e.to_string())?;
    persist_onboarding(&state.onboarding, &conn).map_err(|e| e.to_string())
}

/// Read back a previously saved record, if any (absent or malformed → None).
#[tauri::command]
pub fn load_saved_onboarding(
    state: State<'_, Arc<AppState>>,
) -> Result<Option<OnboardingRecord>, String> {
    let conn = state.open_db().map_err(|e| e.to_string())?;
    restore_onboarding(&conn).map_err(|e| e.to_string())
}

/// Restore the all-empty initial state for a brand-new session.
#[tauri::command]
pub fn reset_onboarding(state: State<'_, Arc<AppState>>) -> Result<(), String> {
    state
        .onboarding
        .dispatch(OnboardingAction::Reset)
        .map_err(|e| e.to_string())
}
