//! Reference catalog IPC commands. Read-only, loaded once.

use crate::catalog;
use crate::models::{Allergy, Diet, HealthConcern};

#[tauri::command]
pub fn get_health_concerns() -> Vec<HealthConcern> {
    catalog::health_concerns().to_vec()
}

#[tauri::command]
pub fn get_diets() -> Vec<Diet> {
    catalog::diets().to_vec()
}

#[tauri::command]
pub fn get_allergies() -> Vec<Allergy> {
    catalog::allergies().to_vec()
}
