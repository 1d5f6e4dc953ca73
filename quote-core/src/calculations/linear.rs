//! Linear cost accumulation with VAT.
//!
//! A configurator describes its job as `(line, quantity)` pairs; a
//! [`RateTable`] gives the excluding-VAT rate per unit of each line. The
//! accumulator sums `quantity × rate` and applies the VAT factor of the
//! build type. The result is not rounded.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{apply_vat, checked_sum};
use crate::BuildType;

/// Per-unit rates for the lines of one configurator.
pub trait RateTable {
    type Line: Copy + fmt::Debug + PartialEq;

    fn rate(
        &self,
        line: Self::Line,
    ) -> Decimal;
}

/// Errors that can occur while accumulating line costs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinearCostError {
    #[error("negative quantity {quantity} for {line}")]
    NegativeQuantity { line: String, quantity: Decimal },

    #[error("{0} is too large to calculate")]
    Overflow(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine<L> {
    pub line: L,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearQuote<L> {
    pub lines: Vec<CostLine<L>>,

    /// Sum of all line amounts excluding VAT.
    pub subtotal: Decimal,

    pub vat_multiplier: Decimal,

    /// Subtotal including VAT.
    pub total: Decimal,
}

#[derive(Debug, Clone)]
pub struct LinearCostAccumulator<'a, T: RateTable> {
    rates: &'a T,
}

impl<'a, T: RateTable> LinearCostAccumulator<'a, T> {
    pub fn new(rates: &'a T) -> Self {
        Self { rates }
    }

    /// Prices `quantities` and applies VAT for `build_type`.
    ///
    /// # Errors
    ///
    /// Returns [`LinearCostError::NegativeQuantity`] if any quantity is
    /// below zero, and [`LinearCostError::Overflow`] if a line amount, the
    /// subtotal or the VAT total overflows.
    pub fn calculate(
        &self,
        quantities: &[(T::Line, Decimal)],
        build_type: BuildType,
    ) -> Result<LinearQuote<T::Line>, LinearCostError> {
        let lines = quantities
            .iter()
            .map(|(line, quantity)| self.cost_line(*line, *quantity))
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = checked_sum(lines.iter().map(|line| line.amount))
            .ok_or_else(|| LinearCostError::Overflow("subtotal".to_string()))?;
        let total = apply_vat(subtotal, build_type)
            .ok_or_else(|| LinearCostError::Overflow("total including VAT".to_string()))?;

        Ok(LinearQuote {
            lines,
            subtotal,
            vat_multiplier: build_type.vat_multiplier(),
            total,
        })
    }

    fn cost_line(
        &self,
        line: T::Line,
        quantity: Decimal,
    ) -> Result<CostLine<T::Line>, LinearCostError> {
        if quantity < Decimal::ZERO {
            return Err(LinearCostError::NegativeQuantity {
                line: format!("{line:?}"),
                quantity,
            });
        }

        let rate = self.rates.rate(line);
        let amount = quantity
            .checked_mul(rate)
            .ok_or_else(|| LinearCostError::Overflow(format!("{line:?}")))?;
        Ok(CostLine {
            line,
            quantity,
            rate,
            amount,
        })
    }
}
