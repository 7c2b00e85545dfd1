//! Onboarding wizard core — state, actions, navigation, save flow.
//!
//! The wizard state lives in an explicit `OnboardingStore` container that is
//! constructed at startup and injected wherever it is needed; there is no
//! module-level singleton, so tests and future concurrent sessions never
//! share state. Mutations go through the closed `OnboardingAction` sum type
//! and the exhaustive `OnboardingState::apply` transition function.
//!
//! Validation is deliberately absent here: the store's operations are total.
//! The selection-count and required-field rules live in `validation` and are
//! enforced at the command boundary.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::{self, StorageError};
use crate::formatter::{format_onboarding, OnboardingRecord};
use crate::models::{AlcoholOption, Allergy, Diet, HealthConcern};

/// Number of progress-bar segments for the wizard.
pub const TOTAL_STEPS: u32 = 4;

// ---------------------------------------------------------------------------
// Screens and step mapping
// ---------------------------------------------------------------------------

/// The five onboarding screens, in navigation order.
///
/// The progress indicator has four segments, not five: Allergies and
/// Lifestyle share the final segment. Deriving every index from
/// `step_index` keeps the screen/step mapping in one total function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Welcome,
    HealthConcerns,
    Diets,
    Allergies,
    Lifestyle,
}

impl Screen {
    /// Progress-bar step shown while this screen is active.
    pub fn step_index(self) -> u32 {
        match self {
            Self::Welcome => 0,
            Self::HealthConcerns => 1,
            Self::Diets => 2,
            Self::Allergies | Self::Lifestyle => 3,
        }
    }

    pub fn next(self) -> Option<Screen> {
        match self {
            Self::Welcome => Some(Self::HealthConcerns),
            Self::HealthConcerns => Some(Self::Diets),
            Self::Diets => Some(Self::Allergies),
            Self::Allergies => Some(Self::Lifestyle),
            Self::Lifestyle => None,
        }
    }

    pub fn prev(self) -> Option<Screen> {
        match self {
            Self::Welcome => None,
            Self::HealthConcerns => Some(Self::Welcome),
            Self::Diets => Some(Self::HealthConcerns),
            Self::Allergies => Some(Self::Diets),
            Self::Lifestyle => Some(Self::Allergies),
        }
    }
}

/// Progress fraction in percent, as rendered by the progress bar.
/// `total` of zero yields infinity; the caller owns that degenerate case.
pub fn progress_percent(current_step: u32, total_steps: u32) -> f64 {
    ((current_step + 1) as f64 / total_steps as f64) * 100.0
}

// ---------------------------------------------------------------------------
// State and actions
// ---------------------------------------------------------------------------

/// The wizard's collected answers and lifecycle flags.
///
/// Serialized camelCase — this is the shape the frontend reads over IPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub current_step: u32,
    pub total_steps: u32,
    pub health_concerns: Vec<HealthConcern>,
    /// Same members as `health_concerns`, in user-chosen rank order
    /// (index 0 = highest priority).
    pub prioritized_concerns: Vec<HealthConcern>,
    pub selected_diets: Vec<Diet>,
    pub is_daily_exposure: Option<bool>,
    pub is_smoke: Option<bool>,
    pub alcohol: Option<AlcoholOption>,
    pub allergies: Vec<Allergy>,
    pub custom_allergies: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_completed: bool,
}

impl OnboardingState {
    /// The documented initial state: step 0, everything empty or unanswered.
    pub fn initial() -> Self {
        Self {
            current_step: 0,
            total_steps: TOTAL_STEPS,
            health_concerns: Vec::new(),
            prioritized_concerns: Vec::new(),
            selected_diets: Vec::new(),
            is_daily_exposure: None,
            is_smoke: None,
            alcohol: None,
            allergies: Vec::new(),
            custom_allergies: String::new(),
            is_loading: false,
            error: None,
            is_completed: false,
        }
    }

    /// Apply one action. Total: every action succeeds on every state.
    pub fn apply(&mut self, action: OnboardingAction) {
        match action {
            // Unchecked by design — direct navigation escape hatch.
            OnboardingAction::SetCurrentStep(step) => self.current_step = step,
            OnboardingAction::NextStep => {
                // saturating: the unchecked SetCurrentStep may have parked
                // the index anywhere.
                if self.current_step.saturating_add(1) < self.total_steps {
                    self.current_step += 1;
                }
            }
            OnboardingAction::PrevStep => {
                if self.current_step > 0 {
                    self.current_step -= 1;
                }
            }
            OnboardingAction::SetHealthConcerns(concerns) => self.health_concerns = concerns,
            OnboardingAction::SetPrioritizedConcerns(concerns) => {
                self.prioritized_concerns = concerns
            }
            OnboardingAction::SetSelectedDiets(diets) => self.selected_diets = diets,
            OnboardingAction::SetDailyExposure(answer) => self.is_daily_exposure = Some(answer),
            OnboardingAction::SetSmoke(answer) => self.is_smoke = Some(answer),
            OnboardingAction::SetAlcohol(option) => self.alcohol = Some(option),
            OnboardingAction::SetAllergies(allergies) => self.allergies = allergies,
            OnboardingAction::SetCustomAllergies(text) => self.custom_allergies = text,
            OnboardingAction::SetLoading(flag) => self.is_loading = flag,
            OnboardingAction::SetError(message) => self.error = message,
            OnboardingAction::SetCompleted(flag) => self.is_completed = flag,
            OnboardingAction::Reset => *self = Self::initial(),
        }
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.current_step, self.total_steps)
    }
}

/// Every mutation the wizard supports, as a closed sum type.
#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingAction {
    SetCurrentStep(u32),
    NextStep,
    PrevStep,
    SetHealthConcerns(Vec<HealthConcern>),
    SetPrioritizedConcerns(Vec<HealthConcern>),
    SetSelectedDiets(Vec<Diet>),
    SetDailyExposure(bool),
    SetSmoke(bool),
    SetAlcohol(AlcoholOption),
    SetAllergies(Vec<Allergy>),
    SetCustomAllergies(String),
    SetLoading(bool),
    SetError(Option<String>),
    SetCompleted(bool),
    Reset,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Errors from store access and the save flow.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("A save is already in progress")]
    SaveInProgress,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Single source of truth for wizard progress and collected answers.
///
/// One writer context at a time (the active screen); the `RwLock` exists so
/// read paths never block each other.
pub struct OnboardingStore {
    state: std::sync::RwLock<OnboardingState>,
}

impl OnboardingStore {
    pub fn new() -> Self {
        Self {
            state: std::sync::RwLock::new(OnboardingState::initial()),
        }
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> Result<OnboardingState, OnboardingError> {
        self.state
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| OnboardingError::LockPoisoned)
    }

    /// Apply one action to the state.
    pub fn dispatch(&self, action: OnboardingAction) -> Result<(), OnboardingError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| OnboardingError::LockPoisoned)?;
        guard.apply(action);
        Ok(())
    }

    // ── Save flow (two-phase) ───────────────────────────────

    /// Begin a save: formats the record and flips `is_loading`.
    ///
    /// Fails fast with `SaveInProgress` while a prior save is pending, so
    /// a double-submission can never race the gateway write.
    pub fn begin_save(&self) -> Result<PendingSave, OnboardingError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| OnboardingError::LockPoisoned)?;
        if guard.is_loading {
            return Err(OnboardingError::SaveInProgress);
        }
        guard.is_loading = true;
        guard.error = None;
        Ok(PendingSave {
            record: format_onboarding(&guard),
        })
    }

    /// Finish a save, applying the lifecycle flag transitions exactly once.
    pub fn finish_save(&self, outcome: Result<(), String>) -> Result<(), OnboardingError> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| OnboardingError::LockPoisoned)?;
        guard.is_loading = false;
        match outcome {
            Ok(()) => {
                guard.is_completed = true;
                guard.error = None;
            }
            Err(message) => guard.error = Some(message),
        }
        Ok(())
    }
}

impl Default for OnboardingStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A save that has begun but not yet been resolved. Holds the formatted
/// snapshot taken when `begin_save` ran.
#[derive(Debug)]
pub struct PendingSave {
    pub record: OnboardingRecord,
}

// ---------------------------------------------------------------------------
// Persistence drivers
// ---------------------------------------------------------------------------

/// Save the formatted onboarding record: begin → gateway write → finish.
///
/// On failure the error lands on the state's `error` field (the operator may
/// re-invoke the save); there is no automatic retry.
pub fn persist_onboarding(
    store: &OnboardingStore,
    conn: &Connection,
) -> Result<OnboardingRecord, OnboardingError> {
    let pending = store.begin_save()?;

    match db::save_onboarding_record(conn, &pending.record) {
        Ok(()) => {
            store.finish_save(Ok(()))?;
            if let Ok(pretty) = serde_json::to_string_pretty(&pending.record) {
                tracing::info!("Onboarding data saved:\n{pretty}");
            }
            Ok(pending.record)
        }
        Err(e) => {
            store.finish_save(Err(e.to_string()))?;
            Err(OnboardingError::Storage(e))
        }
    }
}

/// Read a previously saved record back, if any. Malformed data was already
/// degraded to absent by the repository layer.
pub fn restore_onboarding(conn: &Connection) -> Result<Option<OnboardingRecord>, OnboardingError> {
    let record = db::load_onboarding_record(conn)?;
    if record.is_some() {
        tracing::debug!("Loaded previously saved onboarding record");
    }
    Ok(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::AllergyId;

    fn concern(id: u32, name: &str) -> HealthConcern {
        HealthConcern {
            id,
            name: name.to_string(),
        }
    }

    // ── Step navigation ─────────────────────────────────────

    #[test]
    fn next_step_clamps_at_top() {
        let mut state = OnboardingState::initial();
        state.current_step = TOTAL_STEPS - 1;
        state.apply(OnboardingAction::NextStep);
        assert_eq!(state.current_step, TOTAL_STEPS - 1);
    }

    #[test]
    fn prev_step_clamps_at_bottom() {
        let mut state = OnboardingState::initial();
        state.apply(OnboardingAction::PrevStep);
        assert_eq!(state.current_step, 0);
    }

    #[test]
    fn next_then_prev_walks_the_range() {
        let mut state = OnboardingState::initial();
        for expected in [1, 2, 3, 3, 3] {
            state.apply(OnboardingAction::NextStep);
            assert_eq!(state.current_step, expected);
        }
        for expected in [2, 1, 0, 0] {
            state.apply(OnboardingAction::PrevStep);
            assert_eq!(state.current_step, expected);
        }
    }

    #[test]
    fn set_current_step_is_unchecked() {
        let mut state = OnboardingState::initial();
        state.apply(OnboardingAction::SetCurrentStep(42));
        assert_eq!(state.current_step, 42);
    }

    // ── Progress ────────────────────────────────────────────

    #[test]
    fn progress_table_matches_indicator() {
        assert_eq!(progress_percent(0, 4), 25.0);
        assert_eq!(progress_percent(1, 4), 50.0);
        assert_eq!(progress_percent(2, 4), 75.0);
        assert_eq!(progress_percent(3, 4), 100.0);
        assert_eq!(progress_percent(0, 5), 20.0);
        assert_eq!(progress_percent(2, 5), 60.0);
        assert_eq!(progress_percent(4, 5), 100.0);
        assert_eq!(progress_percent(0, 1), 100.0);
    }

    #[test]
    fn progress_is_strictly_increasing_and_tops_at_100() {
        let mut last = 0.0;
        for step in 0..TOTAL_STEPS {
            let p = progress_percent(step, TOTAL_STEPS);
            assert!(p > last);
            last = p;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn progress_with_zero_total_is_infinite() {
        assert!(progress_percent(0, 0).is_infinite());
    }

    // ── Reducer ─────────────────────────────────────────────

    #[test]
    fn setters_replace_fields_wholesale() {
        let mut state = OnboardingState::initial();
        state.apply(OnboardingAction::SetHealthConcerns(vec![concern(
            1,
            "Energy & Fatigue",
        )]));
        state.apply(OnboardingAction::SetHealthConcerns(vec![concern(
            3,
            "Sleep Quality",
        )]));
        assert_eq!(state.health_concerns, vec![concern(3, "Sleep Quality")]);

        state.apply(OnboardingAction::SetCustomAllergies("Soy".to_string()));
        assert_eq!(state.custom_allergies, "Soy");

        state.apply(OnboardingAction::SetAlcohol(AlcoholOption::FivePlus));
        assert_eq!(state.alcohol, Some(AlcoholOption::FivePlus));
    }

    #[test]
    fn lifestyle_answers_start_unset() {
        let state = OnboardingState::initial();
        assert!(state.is_daily_exposure.is_none());
        assert!(state.is_smoke.is_none());
        assert!(state.alcohol.is_none());
    }

    #[test]
    fn reset_restores_initial_state_regardless_of_prior() {
        let mut state = OnboardingState::initial();
        state.apply(OnboardingAction::SetCurrentStep(3));
        state.apply(OnboardingAction::SetSmoke(true));
        state.apply(OnboardingAction::SetError(Some("boom".to_string())));
        state.apply(OnboardingAction::SetCompleted(true));
        state.apply(OnboardingAction::SetAllergies(vec![Allergy {
            id: AllergyId::Catalog(1),
            name: "Nuts".to_string(),
        }]));

        state.apply(OnboardingAction::Reset);
        assert_eq!(state, OnboardingState::initial());
    }

    // ── Full wizard journey ─────────────────────────────────

    #[test]
    fn complete_wizard_journey() {
        let store = OnboardingStore::new();

        store.dispatch(OnboardingAction::NextStep).unwrap();
        assert_eq!(store.snapshot().unwrap().current_step, 1);

        let concerns = vec![concern(1, "Energy & Fatigue"), concern(2, "Immune Support")];
        store
            .dispatch(OnboardingAction::SetHealthConcerns(concerns.clone()))
            .unwrap();
        store
            .dispatch(OnboardingAction::SetPrioritizedConcerns(concerns))
            .unwrap();
        store.dispatch(OnboardingAction::NextStep).unwrap();
        assert_eq!(store.snapshot().unwrap().current_step, 2);

        store
            .dispatch(OnboardingAction::SetSelectedDiets(vec![Diet {
                id: 1,
                name: "Vegetarian".to_string(),
                tool_tip: String::new(),
            }]))
            .unwrap();
        store.dispatch(OnboardingAction::NextStep).unwrap();
        assert_eq!(store.snapshot().unwrap().current_step, 3);

        store
            .dispatch(OnboardingAction::SetDailyExposure(true))
            .unwrap();
        store.dispatch(OnboardingAction::SetSmoke(false)).unwrap();
        store
            .dispatch(OnboardingAction::SetAlcohol(AlcoholOption::TwoToFive))
            .unwrap();
        store.dispatch(OnboardingAction::NextStep).unwrap(); // clamped

        let state = store.snapshot().unwrap();
        assert_eq!(state.current_step, 3);

        let record = format_onboarding(&state);
        assert_eq!(record.health_concerns.len(), 2);
        assert_eq!(record.health_concerns[0].priority, 1);
        assert_eq!(record.health_concerns[1].priority, 2);
        assert_eq!(record.diets.len(), 1);
        assert_eq!(record.alcohol, Some(AlcoholOption::TwoToFive));
    }

    #[test]
    fn stores_do_not_share_state() {
        let a = OnboardingStore::new();
        let b = OnboardingStore::new();
        a.dispatch(OnboardingAction::SetCurrentStep(2)).unwrap();
        assert_eq!(b.snapshot().unwrap().current_step, 0);
    }

    // ── Save flow ───────────────────────────────────────────

    #[test]
    fn begin_save_sets_loading_and_clears_error() {
        let store = OnboardingStore::new();
        store
            .dispatch(OnboardingAction::SetError(Some("old".to_string())))
            .unwrap();

        let pending = store.begin_save().unwrap();
        let state = store.snapshot().unwrap();
        assert!(state.is_loading);
        assert!(state.error.is_none());
        assert!(pending.record.health_concerns.is_empty());
    }

    #[test]
    fn second_begin_save_is_rejected_while_pending() {
        let store = OnboardingStore::new();
        let _pending = store.begin_save().unwrap();
        match store.begin_save() {
            Err(OnboardingError::SaveInProgress) => {}
            other => panic!("expected SaveInProgress, got {other:?}"),
        }
    }

    #[test]
    fn finish_save_success_marks_completed() {
        let store = OnboardingStore::new();
        let _pending = store.begin_save().unwrap();
        store.finish_save(Ok(())).unwrap();

        let state = store.snapshot().unwrap();
        assert!(!state.is_loading);
        assert!(state.is_completed);
        assert!(state.error.is_none());
    }

    #[test]
    fn finish_save_failure_records_error() {
        let store = OnboardingStore::new();
        let _pending = store.begin_save().unwrap();
        store.finish_save(Err("disk full".to_string())).unwrap();

        let state = store.snapshot().unwrap();
        assert!(!state.is_loading);
        assert!(!state.is_completed);
        assert_eq!(state.error.as_deref(), Some("disk full"));

        // The flow can be re-invoked after a failure.
        assert!(store.begin_save().is_ok());
    }

    #[test]
    fn persist_then_restore_round_trips() {
        let store = OnboardingStore::new();
        let conn = open_memory_database().unwrap();

        let concerns = vec![concern(2, "Immune Support")];
        store
            .dispatch(OnboardingAction::SetPrioritizedConcerns(concerns))
            .unwrap();

        let saved = persist_onboarding(&store, &conn).unwrap();
        assert!(store.snapshot().unwrap().is_completed);

        let restored = restore_onboarding(&conn).unwrap().unwrap();
        assert_eq!(restored, saved);
    }

    #[test]
    fn persist_failure_surfaces_on_state() {
        let store = OnboardingStore::new();
        let conn = open_memory_database().unwrap();
        // Sabotage the gateway: the write will fail.
        conn.execute_batch("DROP TABLE app_records").unwrap();

        let result = persist_onboarding(&store, &conn);
        assert!(result.is_err());

        let state = store.snapshot().unwrap();
        assert!(!state.is_loading);
        assert!(!state.is_completed);
        assert!(state.error.is_some());
    }

    #[test]
    fn restore_with_nothing_saved_is_none() {
        let conn = open_memory_database().unwrap();
        assert!(restore_onboarding(&conn).unwrap().is_none());
    }

    // ── Screen mapping ──────────────────────────────────────

    #[test]
    fn screens_map_to_four_progress_steps() {
        assert_eq!(Screen::Welcome.step_index(), 0);
        assert_eq!(Screen::HealthConcerns.step_index(), 1);
        assert_eq!(Screen::Diets.step_index(), 2);
        assert_eq!(Screen::Allergies.step_index(), 3);
        assert_eq!(Screen::Lifestyle.step_index(), 3);
    }

    #[test]
    fn screen_order_is_a_straight_line() {
        let mut screen = Screen::Welcome;
        let mut visited = vec![screen];
        while let Some(next) = screen.next() {
            assert_eq!(next.prev(), Some(screen));
            screen = next;
            visited.push(screen);
        }
        assert_eq!(
            visited,
            vec![
                Screen::Welcome,
                Screen::HealthConcerns,
                Screen::Diets,
                Screen::Allergies,
                Screen::Lifestyle,
            ]
        );
        assert!(Screen::Welcome.prev().is_none());
    }

    #[test]
    fn step_indices_never_exceed_total() {
        for screen in [
            Screen::Welcome,
            Screen::HealthConcerns,
            Screen::Diets,
            Screen::Allergies,
            Screen::Lifestyle,
        ] {
            assert!(screen.step_index() < TOTAL_STEPS);
        }
    }
}
