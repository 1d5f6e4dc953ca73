use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InvalidConfiguration;

/// The table a stored price entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    BasePrice,
    Material,
    Option,
    Color,
    Insulation,
    FrameHeight,
    ExtraWindow,
}

impl PriceCategory {
    pub fn all() -> &'static [PriceCategory] {
        &[
            PriceCategory::BasePrice,
            PriceCategory::Material,
            PriceCategory::Option,
            PriceCategory::Color,
            PriceCategory::Insulation,
            PriceCategory::FrameHeight,
            PriceCategory::ExtraWindow,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasePrice => "base_price",
            Self::Material => "material",
            Self::Option => "option",
            Self::Color => "color",
            Self::Insulation => "insulation",
            Self::FrameHeight => "frame_height",
            Self::ExtraWindow => "extra_window",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "base_price" => Some(Self::BasePrice),
            "material" => Some(Self::Material),
            "option" => Some(Self::Option),
            "color" => Some(Self::Color),
            "insulation" => Some(Self::Insulation),
            "frame_height" => Some(Self::FrameHeight),
            "extra_window" => Some(Self::ExtraWindow),
            _ => None,
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceCategory {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("price category", s))
    }
}

/// One row of a price table in its flat storage form.
///
/// For [`PriceCategory::Material`] the amount is a multiplier; every other
/// category holds a euro amount excluding VAT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub category: PriceCategory,
    pub key: String,
    pub amount: Decimal,
}

impl PriceEntry {
    pub fn new(
        category: PriceCategory,
        key: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            category,
            key: key.into(),
            amount,
        }
    }
}
