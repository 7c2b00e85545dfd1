use serde::{Deserialize, Serialize};

/// A selectable health concern from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthConcern {
    pub id: u32,
    pub name: String,
}
