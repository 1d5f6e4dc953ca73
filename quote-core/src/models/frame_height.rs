use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{InvalidConfiguration, PriceKey};

/// Height class of the window frame ("kozijnhoogte").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameHeightClass {
    #[default]
    Standard,
    Raised,
    High,
    ExtraHigh,
}

impl FrameHeightClass {
    pub fn all() -> &'static [FrameHeightClass] {
        Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Raised => "raised",
            Self::High => "high",
            Self::ExtraHigh => "extra_high",
        }
    }

    /// Accepts the storage code or the frame height in cm.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "110" => Some(Self::Standard),
            "raised" | "125" => Some(Self::Raised),
            "high" | "140" => Some(Self::High),
            "extra_high" | "155" => Some(Self::ExtraHigh),
            _ => None,
        }
    }
}

impl PriceKey for FrameHeightClass {
    const ALL: &'static [Self] = &[Self::Standard, Self::Raised, Self::High, Self::ExtraHigh];

    fn index(self) -> usize {
        match self {
            Self::Standard => 0,
            Self::Raised => 1,
            Self::High => 2,
            Self::ExtraHigh => 3,
        }
    }

    fn code(self) -> &'static str {
        self.as_str()
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::parse(code)
    }
}

impl FromStr for FrameHeightClass {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("frame height", s))
    }
}
