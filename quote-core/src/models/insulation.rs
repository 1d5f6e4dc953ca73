use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{InvalidConfiguration, PriceKey};

/// Thermal-resistance upgrade of the dakkapel shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsulationLevel {
    /// Rc 3.5, included in the base price.
    #[default]
    Standard,
    /// Rc 4.5
    Improved,
    /// Rc 6.0
    Premium,
}

impl InsulationLevel {
    pub fn all() -> &'static [InsulationLevel] {
        Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Improved => "improved",
            Self::Premium => "premium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "rc3.5" | "rc 3.5" => Some(Self::Standard),
            "improved" | "rc4.5" | "rc 4.5" => Some(Self::Improved),
            "premium" | "rc6.0" | "rc 6.0" | "rc6" => Some(Self::Premium),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standaard (Rc 3,5)",
            Self::Improved => "Verbeterd (Rc 4,5)",
            Self::Premium => "Premium (Rc 6,0)",
        }
    }
}

impl PriceKey for InsulationLevel {
    const ALL: &'static [Self] = &[Self::Standard, Self::Improved, Self::Premium];

    fn index(self) -> usize {
        match self {
            Self::Standard => 0,
            Self::Improved => 1,
            Self::Premium => 2,
        }
    }

    fn code(self) -> &'static str {
        self.as_str()
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::parse(code)
    }
}

impl FromStr for InsulationLevel {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("insulation level", s))
    }
}
