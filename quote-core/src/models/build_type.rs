use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::InvalidConfiguration;

/// Renovation work is taxed at the reduced Dutch VAT rate, new construction
/// at the standard rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildType {
    #[default]
    Renovation,
    NewConstruction,
}

impl BuildType {
    pub fn all() -> &'static [BuildType] {
        &[BuildType::Renovation, BuildType::NewConstruction]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Renovation => "renovation",
            Self::NewConstruction => "new_construction",
        }
    }

    /// Accepts the storage code as well as the Dutch form labels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "renovation" | "renovatie" => Some(Self::Renovation),
            "new_construction" | "new-construction" | "nieuwbouw" => Some(Self::NewConstruction),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Renovation => "Renovatie (9% btw)",
            Self::NewConstruction => "Nieuwbouw (21% btw)",
        }
    }

    /// VAT rate as a fraction (0.09 or 0.21).
    pub fn vat_rate(&self) -> Decimal {
        match self {
            Self::Renovation => Decimal::new(9, 2),
            Self::NewConstruction => Decimal::new(21, 2),
        }
    }

    /// Factor applied to a pre-VAT amount (1.09 or 1.21).
    pub fn vat_multiplier(&self) -> Decimal {
        Decimal::ONE + self.vat_rate()
    }
}

impl FromStr for BuildType {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("build type", s))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn vat_multiplier_is_one_of_two_fixed_values() {
        assert_eq!(BuildType::Renovation.vat_multiplier(), dec!(1.09));
        assert_eq!(BuildType::NewConstruction.vat_multiplier(), dec!(1.21));
    }

    #[test]
    fn parse_accepts_dutch_labels() {
        assert_eq!(BuildType::parse("Nieuwbouw"), Some(BuildType::NewConstruction));
        assert_eq!(BuildType::parse("renovatie"), Some(BuildType::Renovation));
    }

    #[test]
    fn from_str_rejects_unknown_code() {
        let err = "verbouw".parse::<BuildType>().unwrap_err();

        assert_eq!(err, InvalidConfiguration::new("build type", "verbouw"));
    }
}
