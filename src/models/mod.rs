pub mod allergy;
pub mod concern;
pub mod diet;
pub mod enums;

pub use allergy::{Allergy, AllergyId};
pub use concern::HealthConcern;
pub use diet::Diet;
pub use enums::AlcoholOption;
