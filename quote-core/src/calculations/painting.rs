//! Interior painting configurator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::linear::{LinearCostAccumulator, LinearCostError, LinearQuote, RateTable};
use crate::{ColorScheme, PaintingConfiguration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintingLine {
    /// Wall area in m².
    Walls,
    /// Ceiling area in m².
    Ceilings,
    Doors,
    Windows,
}

/// Excluding-VAT rates for one color scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintingLineRates {
    pub wall_per_m2: Decimal,
    pub ceiling_per_m2: Decimal,
    pub per_door: Decimal,
    pub per_window: Decimal,
}

impl RateTable for PaintingLineRates {
    type Line = PaintingLine;

    fn rate(
        &self,
        line: PaintingLine,
    ) -> Decimal {
        match line {
            PaintingLine::Walls => self.wall_per_m2,
            PaintingLine::Ceilings => self.ceiling_per_m2,
            PaintingLine::Doors => self.per_door,
            PaintingLine::Windows => self.per_window,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintingRates {
    pub single_color: PaintingLineRates,
    pub multiple_colors: PaintingLineRates,
}

impl Default for PaintingRates {
    fn default() -> Self {
        Self {
            single_color: PaintingLineRates {
                wall_per_m2: Decimal::new(1250, 2),
                ceiling_per_m2: Decimal::new(1450, 2),
                per_door: Decimal::from(85),
                per_window: Decimal::from(65),
            },
            multiple_colors: PaintingLineRates {
                wall_per_m2: Decimal::from(15),
                ceiling_per_m2: Decimal::from(17),
                per_door: Decimal::from(110),
                per_window: Decimal::from(85),
            },
        }
    }
}

impl PaintingRates {
    pub fn for_scheme(
        &self,
        scheme: ColorScheme,
    ) -> &PaintingLineRates {
        match scheme {
            ColorScheme::SingleColor => &self.single_color,
            ColorScheme::MultipleColors => &self.multiple_colors,
        }
    }
}

impl PaintingConfiguration {
    pub fn quantities(&self) -> Vec<(PaintingLine, Decimal)> {
        vec![
            (PaintingLine::Walls, self.wall_area_m2),
            (PaintingLine::Ceilings, self.ceiling_area_m2),
            (PaintingLine::Doors, Decimal::from(self.door_count)),
            (PaintingLine::Windows, Decimal::from(self.window_count)),
        ]
    }
}

/// Price of a painting job including VAT.
///
/// # Errors
///
/// Returns [`LinearCostError::NegativeQuantity`] for a negative area and
/// [`LinearCostError::Overflow`] when an amount overflows.
pub fn calculate_painting_price(
    rates: &PaintingRates,
    config: &PaintingConfiguration,
) -> Result<LinearQuote<PaintingLine>, LinearCostError> {
    LinearCostAccumulator::new(rates.for_scheme(config.color_scheme))
        .calculate(&config.quantities(), config.build_type)
}
