pub mod catalog;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod db;
pub mod formatter;
pub mod models;
pub mod onboarding;
pub mod validation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Vitala starting v{}", config::APP_VERSION);

    tauri::Builder::default()
        .manage(Arc::new(core_state::AppState::new()))
        .invoke_handler(tauri::generate_handler![
            commands::health_check,
            commands::catalog::get_health_concerns,
            commands::catalog::get_diets,
            commands::catalog::get_allergies,
            commands::onboarding::get_onboarding_state,
            commands::onboarding::toggle_health_concern,
            commands::onboarding::set_prioritized_concerns,
            commands::onboarding::set_selected_diets,
            commands::onboarding::set_allergies,
            commands::onboarding::set_custom_allergies,
            commands::onboarding::set_daily_exposure,
            commands::onboarding::set_smoke,
            commands::onboarding::set_alcohol,
            commands::onboarding::set_current_step,
            commands::onboarding::advance_screen,
            commands::onboarding::go_back,
            commands::onboarding::complete_onboarding,
            commands::onboarding::load_saved_onboarding,
            commands::onboarding::reset_onboarding,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Vitala");
}
