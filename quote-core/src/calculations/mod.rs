//! Quote pricing for the renovation configurators.
//!
//! The dakkapel calculator works from a closed [`crate::PriceTable`]; the
//! painting and plastering configurators share one linear cost accumulator
//! parameterised by a rate table.

pub mod common;
pub mod dakkapel;
pub mod linear;
pub mod painting;
pub mod plastering;
pub mod resolver;

pub use dakkapel::{
    CalculationError, DakkapelCalculator, OptionLine, PriceBreakdown, WidthPolicy,
    calculate_total_price,
};
pub use linear::{CostLine, LinearCostAccumulator, LinearCostError, LinearQuote, RateTable};
pub use painting::{PaintingLine, PaintingLineRates, PaintingRates, calculate_painting_price};
pub use plastering::{
    PlasteringLine, PlasteringLineRates, PlasteringRates, calculate_plastering_price,
};
pub use resolver::{DerivedAttributes, FrameHeights, WidthRange};
