//! Plastering ("stukadoor") configurator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::linear::{LinearCostAccumulator, LinearCostError, LinearQuote, RateTable};
use crate::{PlasterFinish, PlasteringConfiguration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlasteringLine {
    Walls,
    Ceilings,
    /// Corner beads, per meter.
    CornerBeads,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlasteringLineRates {
    pub wall_per_m2: Decimal,
    pub ceiling_per_m2: Decimal,
    pub corner_bead_per_m: Decimal,
}

impl RateTable for PlasteringLineRates {
    type Line = PlasteringLine;

    fn rate(
        &self,
        line: PlasteringLine,
    ) -> Decimal {
        match line {
            PlasteringLine::Walls => self.wall_per_m2,
            PlasteringLine::Ceilings => self.ceiling_per_m2,
            PlasteringLine::CornerBeads => self.corner_bead_per_m,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlasteringRates {
    pub smooth: PlasteringLineRates,
    pub textured: PlasteringLineRates,
}

impl Default for PlasteringRates {
    fn default() -> Self {
        Self {
            smooth: PlasteringLineRates {
                wall_per_m2: Decimal::new(2250, 2),
                ceiling_per_m2: Decimal::new(2750, 2),
                corner_bead_per_m: Decimal::new(650, 2),
            },
            textured: PlasteringLineRates {
                wall_per_m2: Decimal::from(18),
                ceiling_per_m2: Decimal::new(2150, 2),
                corner_bead_per_m: Decimal::new(650, 2),
            },
        }
    }
}

impl PlasteringRates {
    pub fn for_finish(
        &self,
        finish: PlasterFinish,
    ) -> &PlasteringLineRates {
        match finish {
            PlasterFinish::Smooth => &self.smooth,
            PlasterFinish::Textured => &self.textured,
        }
    }
}

impl PlasteringConfiguration {
    pub fn quantities(&self) -> Vec<(PlasteringLine, Decimal)> {
        vec![
            (PlasteringLine::Walls, self.wall_area_m2),
            (PlasteringLine::Ceilings, self.ceiling_area_m2),
            (PlasteringLine::CornerBeads, self.corner_bead_m),
        ]
    }
}

/// Price of a plastering job including VAT.
///
/// # Errors
///
/// Returns [`LinearCostError::NegativeQuantity`] for a negative area or
/// length, and [`LinearCostError::Overflow`] when an amount overflows.
pub fn calculate_plastering_price(
    rates: &PlasteringRates,
    config: &PlasteringConfiguration,
) -> Result<LinearQuote<PlasteringLine>, LinearCostError> {
    LinearCostAccumulator::new(rates.for_finish(config.finish))
        .calculate(&config.quantities(), config.build_type)
}
