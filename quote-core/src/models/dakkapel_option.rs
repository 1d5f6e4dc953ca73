use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{InvalidConfiguration, PriceKey};

/// How the tabled cost of an option scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionPricing {
    Flat,
    PerMeterWidth,
    PerWindow,
}

/// Optional extras on a dakkapel quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DakkapelOption {
    ElectricRollerShutter,
    VentilationGrilles,
    InsectScreens,
    ZincGutter,
    InteriorFinishing,
    ExistingDormerRemoval,
}

impl DakkapelOption {
    pub fn all() -> &'static [DakkapelOption] {
        Self::ALL
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElectricRollerShutter => "electric_roller_shutter",
            Self::VentilationGrilles => "ventilation_grilles",
            Self::InsectScreens => "insect_screens",
            Self::ZincGutter => "zinc_gutter",
            Self::InteriorFinishing => "interior_finishing",
            Self::ExistingDormerRemoval => "existing_dormer_removal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electric_roller_shutter" | "elektrisch_rolluik" => Some(Self::ElectricRollerShutter),
            "ventilation_grilles" | "ventilatieroosters" => Some(Self::VentilationGrilles),
            "insect_screens" | "horren" => Some(Self::InsectScreens),
            "zinc_gutter" | "zinken_goot" => Some(Self::ZincGutter),
            "interior_finishing" | "binnenafwerking" => Some(Self::InteriorFinishing),
            "existing_dormer_removal" | "sloop_bestaande_dakkapel" => {
                Some(Self::ExistingDormerRemoval)
            }
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ElectricRollerShutter => "Elektrisch rolluik",
            Self::VentilationGrilles => "Ventilatieroosters",
            Self::InsectScreens => "Horren",
            Self::ZincGutter => "Zinken goot",
            Self::InteriorFinishing => "Binnenafwerking",
            Self::ExistingDormerRemoval => "Sloop bestaande dakkapel",
        }
    }

    pub fn pricing(&self) -> OptionPricing {
        match self {
            Self::ElectricRollerShutter | Self::VentilationGrilles => OptionPricing::PerMeterWidth,
            Self::InsectScreens => OptionPricing::PerWindow,
            Self::ZincGutter | Self::InteriorFinishing | Self::ExistingDormerRemoval => {
                OptionPricing::Flat
            }
        }
    }
}

impl PriceKey for DakkapelOption {
    const ALL: &'static [Self] = &[
        Self::ElectricRollerShutter,
        Self::VentilationGrilles,
        Self::InsectScreens,
        Self::ZincGutter,
        Self::InteriorFinishing,
        Self::ExistingDormerRemoval,
    ];

    fn index(self) -> usize {
        match self {
            Self::ElectricRollerShutter => 0,
            Self::VentilationGrilles => 1,
            Self::InsectScreens => 2,
            Self::ZincGutter => 3,
            Self::InteriorFinishing => 4,
            Self::ExistingDormerRemoval => 5,
        }
    }

    fn code(self) -> &'static str {
        self.as_str()
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::parse(code)
    }
}

impl FromStr for DakkapelOption {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("option", s))
    }
}
