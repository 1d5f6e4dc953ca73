use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::InvalidConfiguration;

/// Qualitative roof pitch bucket chosen on the configurator form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofSlope {
    /// Less than 40 degrees.
    Shallow,
    /// Between 40 and 45 degrees.
    #[default]
    Medium,
    /// Over 45 degrees.
    Steep,
}

impl RoofSlope {
    pub fn all() -> &'static [RoofSlope] {
        &[RoofSlope::Shallow, RoofSlope::Medium, RoofSlope::Steep]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Medium => "medium",
            Self::Steep => "steep",
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Shallow => "<40°",
            Self::Medium => "40-45°",
            Self::Steep => ">45°",
        }
    }

    /// Parses the storage code or the form descriptor. Descriptors are
    /// compared without whitespace, degree signs or dash variants.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '°')
            .map(|c| if c == '–' || c == '—' { '-' } else { c })
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "shallow" | "<40" => Some(Self::Shallow),
            "medium" | "40-45" => Some(Self::Medium),
            "steep" | ">45" => Some(Self::Steep),
            _ => None,
        }
    }
}

impl FromStr for RoofSlope {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("roof slope", s))
    }
}
