use serde::{Deserialize, Serialize};

/// A known or user-entered allergy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergy {
    pub id: AllergyId,
    pub name: String,
}

/// Allergy identifier.
///
/// Catalog entries carry numeric ids; user-entered custom allergies carry a
/// string id, so the persisted JSON admits `number | string` here. Untagged
/// so both serialize to the bare value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllergyId {
    Catalog(u32),
    Custom(String),
}

impl Allergy {
    /// Build a custom (user-entered) allergy. The id is derived from the
    /// name so re-entering the same text stays stable across sessions.
    pub fn custom(name: &str) -> Self {
        let name = name.trim();
        Self {
            id: AllergyId::Custom(format!("custom-{}", name.to_lowercase().replace(' ', "-"))),
            name: name.to_string(),
        }
    }

    /// Split a free-text custom-allergies field into individual names.
    /// The field may encode multiple comma-separated items.
    pub fn split_custom(text: &str) -> Vec<String> {
        text.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
