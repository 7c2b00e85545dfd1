use serde::{Deserialize, Serialize};

/// A selectable diet from the reference catalog.
///
/// `tool_tip` is the short explanation shown next to the option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diet {
    pub id: u32,
    pub name: String,
    pub tool_tip: String,
}
