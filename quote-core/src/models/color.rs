use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{InvalidConfiguration, PriceKey};

/// Finish color. The same surcharge table applies to the frame, the side
/// cladding and the sashes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    White,
    Cream,
    Anthracite,
    Black,
    WoodGrain,
}

impl Color {
    pub fn all() -> &'static [Color] {
        Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Cream => "cream",
            Self::Anthracite => "anthracite",
            Self::Black => "black",
            Self::WoodGrain => "wood_grain",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "wit" | "ral9010" => Some(Self::White),
            "cream" | "creme" | "crème" | "ral9001" => Some(Self::Cream),
            "anthracite" | "antraciet" | "ral7016" => Some(Self::Anthracite),
            "black" | "zwart" | "ral9005" => Some(Self::Black),
            "wood_grain" | "houtnerf" => Some(Self::WoodGrain),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::White => "Wit (RAL 9010)",
            Self::Cream => "Crème (RAL 9001)",
            Self::Anthracite => "Antraciet (RAL 7016)",
            Self::Black => "Zwart (RAL 9005)",
            Self::WoodGrain => "Houtnerf",
        }
    }
}

impl PriceKey for Color {
    const ALL: &'static [Self] = &[
        Self::White,
        Self::Cream,
        Self::Anthracite,
        Self::Black,
        Self::WoodGrain,
    ];

    fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Cream => 1,
            Self::Anthracite => 2,
            Self::Black => 3,
            Self::WoodGrain => 4,
        }
    }

    fn code(self) -> &'static str {
        self.as_str()
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::parse(code)
    }
}

impl FromStr for Color {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("color", s))
    }
}
