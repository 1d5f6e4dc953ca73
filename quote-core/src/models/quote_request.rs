use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InvalidConfiguration;

/// The configurator a quote request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    Dakkapel,
    Painting,
    Plastering,
}

impl Vertical {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dakkapel => "dakkapel",
            Self::Painting => "painting",
            Self::Plastering => "plastering",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dakkapel" => Some(Self::Dakkapel),
            "painting" | "schilderwerk" => Some(Self::Painting),
            "plastering" | "stukadoor" | "stucwerk" => Some(Self::Plastering),
            _ => None,
        }
    }
}

impl FromStr for Vertical {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("vertical", s))
    }
}

/// A submitted quote as stored by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub id: i64,
    pub vertical: Vertical,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub postal_code: Option<String>,

    /// The configuration as JSON, in the shape of the vertical's
    /// configuration type.
    pub configuration: String,

    /// Quoted price including VAT.
    pub total_price: Decimal,

    pub created_at: DateTime<Utc>,
}

/// For submitting new quotes (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuoteRequest {
    pub vertical: Vertical,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub configuration: String,
    pub total_price: Decimal,
}
