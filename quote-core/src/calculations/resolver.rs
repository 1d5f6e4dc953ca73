//! Derived attributes used to pre-populate and validate a dakkapel
//! configuration.
//!
//! Every lookup is total over its enum. The `*_or_default` functions accept
//! raw form values and fall back to a fixed default, logging a warning,
//! when the value is not recognised.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{FrameHeightClass, RoofSlope, SizeClass};

/// Angle used when a roof slope descriptor is not recognised.
pub const FALLBACK_ROOF_ANGLE: u32 = 42;

/// Inclusive width range of a size class, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthRange {
    pub min_cm: Decimal,
    pub max_cm: Decimal,
}

impl WidthRange {
    fn cm(
        min: i64,
        max: i64,
    ) -> Self {
        Self {
            min_cm: Decimal::from(min),
            max_cm: Decimal::from(max),
        }
    }

    pub fn contains(
        &self,
        width_cm: Decimal,
    ) -> bool {
        width_cm >= self.min_cm && width_cm <= self.max_cm
    }
}

/// Frame height and overall unit height, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHeights {
    pub frame_cm: u32,
    pub unit_cm: u32,
}

pub fn default_width(size_class: SizeClass) -> Decimal {
    Decimal::from(match size_class {
        SizeClass::Compact => 180,
        SizeClass::Small => 250,
        SizeClass::Medium => 350,
        SizeClass::Large => 450,
        SizeClass::ExtraLarge => 550,
    })
}

pub fn width_range(size_class: SizeClass) -> WidthRange {
    match size_class {
        SizeClass::Compact => WidthRange::cm(150, 200),
        SizeClass::Small => WidthRange::cm(200, 300),
        SizeClass::Medium => WidthRange::cm(300, 400),
        SizeClass::Large => WidthRange::cm(400, 500),
        SizeClass::ExtraLarge => WidthRange::cm(500, 600),
    }
}

/// Number of windows included in the base price.
pub fn default_window_count(size_class: SizeClass) -> u32 {
    match size_class {
        SizeClass::Compact | SizeClass::Small => 1,
        SizeClass::Medium | SizeClass::Large => 2,
        SizeClass::ExtraLarge => 3,
    }
}

pub fn frame_heights(frame_height: FrameHeightClass) -> FrameHeights {
    let (frame_cm, unit_cm) = match frame_height {
        FrameHeightClass::Standard => (110, 150),
        FrameHeightClass::Raised => (125, 165),
        FrameHeightClass::High => (140, 180),
        FrameHeightClass::ExtraHigh => (155, 195),
    };
    FrameHeights { frame_cm, unit_cm }
}

/// Representative roof pitch in degrees.
pub fn roof_slope_angle(slope: RoofSlope) -> u32 {
    match slope {
        RoofSlope::Shallow => 35,
        RoofSlope::Medium => 42,
        RoofSlope::Steep => 50,
    }
}

/// Width range fallback for an unknown size class code (max 300 cm).
pub fn fallback_width_range() -> WidthRange {
    width_range(SizeClass::Small)
}

/// Width range for a raw size class code, falling back to
/// [`fallback_width_range`].
pub fn width_range_or_default(code: &str) -> WidthRange {
    match SizeClass::parse(code) {
        Some(size_class) => width_range(size_class),
        None => {
            let fallback = fallback_width_range();
            warn!(code, max_cm = %fallback.max_cm, "unrecognised size class, using fallback width range");
            fallback
        }
    }
}

/// Roof pitch for a raw descriptor such as `"40-45°"`, falling back to
/// [`FALLBACK_ROOF_ANGLE`].
pub fn roof_slope_angle_or_default(descriptor: &str) -> u32 {
    match RoofSlope::parse(descriptor) {
        Some(slope) => roof_slope_angle(slope),
        None => {
            warn!(descriptor, fallback = FALLBACK_ROOF_ANGLE, "unrecognised roof slope");
            FALLBACK_ROOF_ANGLE
        }
    }
}

/// All derived attributes for one selection, as shown on the configurator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAttributes {
    pub size_class: SizeClass,
    pub default_width_cm: Decimal,
    pub width_range: WidthRange,
    pub default_window_count: u32,
    pub frame_heights: FrameHeights,
    pub roof_angle: u32,
}

impl DerivedAttributes {
    pub fn resolve(
        size_class: SizeClass,
        frame_height: FrameHeightClass,
        slope: RoofSlope,
    ) -> Self {
        Self {
            size_class,
            default_width_cm: default_width(size_class),
            width_range: width_range(size_class),
            default_window_count: default_window_count(size_class),
            frame_heights: frame_heights(frame_height),
            roof_angle: roof_slope_angle(slope),
        }
    }
}
