//! Reference data catalogs — health concerns, diets, allergies.
//!
//! The catalogs are static JSON shipped with the app, embedded at compile
//! time and parsed once on first access. Read-only; user selections hold
//! copies of these entries, never edits.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::models::{Allergy, AllergyId, Diet, HealthConcern};

/// Catalog files carry a `{ "data": [...] }` envelope.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

static HEALTH_CONCERNS: OnceLock<Vec<HealthConcern>> = OnceLock::new();
static DIETS: OnceLock<Vec<Diet>> = OnceLock::new();
static ALLERGIES: OnceLock<Vec<Allergy>> = OnceLock::new();

fn parse<T: serde::de::DeserializeOwned>(raw: &str, what: &str) -> Vec<T> {
    // Embedded at compile time; a parse failure is a packaging bug, not a
    // runtime condition the operator can recover from.
    let envelope: Envelope<T> =
        serde_json::from_str(raw).unwrap_or_else(|e| panic!("invalid {what} catalog: {e}"));
    envelope.data
}

/// All selectable health concerns.
pub fn health_concerns() -> &'static [HealthConcern] {
    HEALTH_CONCERNS.get_or_init(|| {
        parse(
            include_str!("../resources/data/health_concerns.json"),
            "health concerns",
        )
    })
}

/// All selectable diets.
pub fn diets() -> &'static [Diet] {
    DIETS.get_or_init(|| parse(include_str!("../resources/data/diets.json"), "diets"))
}

/// All selectable catalog allergies (custom ones are user-entered).
pub fn allergies() -> &'static [Allergy] {
    ALLERGIES.get_or_init(|| parse(include_str!("../resources/data/allergies.json"), "allergies"))
}

pub fn health_concern_by_id(id: u32) -> Option<&'static HealthConcern> {
    health_concerns().iter().find(|c| c.id == id)
}

pub fn diet_by_id(id: u32) -> Option<&'static Diet> {
    diets().iter().find(|d| d.id == id)
}

pub fn allergy_by_id(id: u32) -> Option<&'static Allergy> {
    allergies()
        .iter()
        .find(|a| a.id == AllergyId::Catalog(id))
}
