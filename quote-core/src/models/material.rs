use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{InvalidConfiguration, PriceKey};

/// Frame material. PVC is the baseline the base prices are quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    #[default]
    Pvc,
    Wood,
    Aluminium,
}

impl Material {
    pub fn all() -> &'static [Material] {
        Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pvc => "pvc",
            Self::Wood => "wood",
            Self::Aluminium => "aluminium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvc" | "kunststof" => Some(Self::Pvc),
            "wood" | "hout" => Some(Self::Wood),
            "aluminium" | "aluminum" => Some(Self::Aluminium),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pvc => "Kunststof",
            Self::Wood => "Hout",
            Self::Aluminium => "Aluminium",
        }
    }
}

impl PriceKey for Material {
    const ALL: &'static [Self] = &[Self::Pvc, Self::Wood, Self::Aluminium];

    fn index(self) -> usize {
        match self {
            Self::Pvc => 0,
            Self::Wood => 1,
            Self::Aluminium => 2,
        }
    }

    fn code(self) -> &'static str {
        self.as_str()
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::parse(code)
    }
}

impl FromStr for Material {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("material", s))
    }
}
