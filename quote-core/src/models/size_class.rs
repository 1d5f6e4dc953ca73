use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{InvalidConfiguration, PriceKey};

/// Width bracket of a dakkapel. Selects the base price, the default width
/// and the number of windows included in the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Compact,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeClass {
    pub fn all() -> &'static [SizeClass] {
        Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extra_large",
        }
    }

    /// Parses either the storage code or the width bracket shown on the
    /// configurator form (e.g. `"300-400"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "150-200" => Some(Self::Compact),
            "small" | "200-300" => Some(Self::Small),
            "medium" | "300-400" => Some(Self::Medium),
            "large" | "400-500" => Some(Self::Large),
            "extra_large" | "500-600" => Some(Self::ExtraLarge),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Compact => "150 - 200 cm",
            Self::Small => "200 - 300 cm",
            Self::Medium => "300 - 400 cm",
            Self::Large => "400 - 500 cm",
            Self::ExtraLarge => "500 - 600 cm",
        }
    }
}

impl PriceKey for SizeClass {
    const ALL: &'static [Self] = &[
        Self::Compact,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::ExtraLarge,
    ];

    fn index(self) -> usize {
        match self {
            Self::Compact => 0,
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
            Self::ExtraLarge => 4,
        }
    }

    fn code(self) -> &'static str {
        self.as_str()
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::parse(code)
    }
}

impl FromStr for SizeClass {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("size class", s))
    }
}
