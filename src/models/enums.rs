use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weekly alcohol consumption bracket.
///
/// The wire strings ("0-1", "2-5", "5+") are fixed by the persisted record
/// format, so the serde names are spelled out per variant rather than
/// derived from the variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlcoholOption {
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[serde(rename = "2-5")]
    TwoToFive,
    #[serde(rename = "5+")]
    FivePlus,
}

impl AlcoholOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroToOne => "0-1",
            Self::TwoToFive => "2-5",
            Self::FivePlus => "5+",
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid alcohol option: {0}")]
pub struct ParseAlcoholError(String);

impl std::str::FromStr for AlcoholOption {
    type Err = ParseAlcoholError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0-1" => Ok(Self::ZeroToOne),
            "2-5" => Ok(Self::TwoToFive),
            "5+" => Ok(Self::FivePlus),
            other => Err(ParseAlcoholError(other.to_string())),
        }
    }
}
