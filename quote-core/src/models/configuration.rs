use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    BuildType, Color, DakkapelOption, FrameHeightClass, InsulationLevel, InvalidConfiguration,
    Material, SizeClass,
};
use crate::calculations::resolver;

/// Everything a customer selects on the dakkapel configurator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DakkapelConfiguration {
    pub size_class: SizeClass,
    pub width_cm: Decimal,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub frame_color: Color,
    #[serde(default)]
    pub side_color: Color,
    #[serde(default)]
    pub sash_color: Color,
    #[serde(default)]
    pub insulation: InsulationLevel,
    #[serde(default)]
    pub frame_height: FrameHeightClass,
    pub window_count: u32,
    #[serde(default)]
    pub options: BTreeSet<DakkapelOption>,
    #[serde(default)]
    pub build_type: BuildType,
}

impl DakkapelConfiguration {
    /// A baseline configuration for `size_class`: default width and window
    /// count, PVC, white, standard insulation and frame height, no options,
    /// renovation VAT.
    pub fn new(size_class: SizeClass) -> Self {
        Self {
            size_class,
            width_cm: resolver::default_width(size_class),
            material: Material::default(),
            frame_color: Color::default(),
            side_color: Color::default(),
            sash_color: Color::default(),
            insulation: InsulationLevel::default(),
            frame_height: FrameHeightClass::default(),
            window_count: resolver::default_window_count(size_class),
            options: BTreeSet::new(),
            build_type: BuildType::default(),
        }
    }

    pub fn with_option(
        mut self,
        option: DakkapelOption,
    ) -> Self {
        self.options.insert(option);
        self
    }

    pub fn with_build_type(
        mut self,
        build_type: BuildType,
    ) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn has_option(
        &self,
        option: DakkapelOption,
    ) -> bool {
        self.options.contains(&option)
    }

    /// Width converted from centimeters to meters.
    pub fn width_m(&self) -> Decimal {
        self.width_cm / Decimal::ONE_HUNDRED
    }
}

/// Painting rates differ when walls and woodwork get more than one color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    SingleColor,
    MultipleColors,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleColor => "single_color",
            Self::MultipleColors => "multiple_colors",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_color" | "single" | "een_kleur" => Some(Self::SingleColor),
            "multiple_colors" | "multiple" | "meerdere_kleuren" => Some(Self::MultipleColors),
            _ => None,
        }
    }
}

impl FromStr for ColorScheme {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("color scheme", s))
    }
}

/// Interior painting job ("schilderwerk binnen").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingConfiguration {
    pub wall_area_m2: Decimal,
    pub ceiling_area_m2: Decimal,
    pub door_count: u32,
    pub window_count: u32,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub build_type: BuildType,
}

/// Plaster finish ordered on the stukadoor configurator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlasterFinish {
    /// Smooth finish ready for paint ("glad pleisterwerk").
    #[default]
    Smooth,
    /// Decorative textured finish ("sierpleister").
    Textured,
}

impl PlasterFinish {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smooth => "smooth",
            Self::Textured => "textured",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smooth" | "glad" => Some(Self::Smooth),
            "textured" | "sierpleister" => Some(Self::Textured),
            _ => None,
        }
    }
}

impl FromStr for PlasterFinish {
    type Err = InvalidConfiguration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidConfiguration::new("plaster finish", s))
    }
}

/// Plastering job ("stucwerk").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlasteringConfiguration {
    pub wall_area_m2: Decimal,
    pub ceiling_area_m2: Decimal,
    /// Length of corner beads in meters.
    #[serde(default)]
    pub corner_bead_m: Decimal,
    #[serde(default)]
    pub finish: PlasterFinish,
    #[serde(default)]
    pub build_type: BuildType,
}
