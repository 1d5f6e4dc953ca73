//! Rounding and VAT helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::BuildType;

/// Rounds to the nearest multiple of ten; a value exactly halfway (ending
/// in 5) rounds away from zero. Returns `None` when rounding up would
/// leave the range of [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_to_nearest_ten;
///
/// assert_eq!(round_to_nearest_ten(dec!(7575.50)), Some(dec!(7580)));
/// assert_eq!(round_to_nearest_ten(dec!(7574.99)), Some(dec!(7570)));
/// assert_eq!(round_to_nearest_ten(dec!(7575)), Some(dec!(7580)));
/// assert_eq!(round_to_nearest_ten(Decimal::MAX), None);
/// ```
pub fn round_to_nearest_ten(value: Decimal) -> Option<Decimal> {
    let ten = Decimal::TEN;
    (value / ten)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(ten)
}

/// Multiplies a pre-VAT amount by the VAT factor of `build_type`, or
/// `None` on overflow.
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::BuildType;
/// use quote_core::calculations::common::apply_vat;
///
/// assert_eq!(apply_vat(dec!(100), BuildType::Renovation), Some(dec!(109)));
/// assert_eq!(apply_vat(dec!(100), BuildType::NewConstruction), Some(dec!(121)));
/// ```
pub fn apply_vat(
    amount: Decimal,
    build_type: BuildType,
) -> Option<Decimal> {
    amount.checked_mul(build_type.vat_multiplier())
}

/// Sums `values`, or `None` on overflow.
pub fn checked_sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
}

/// Clamps negative values to zero.
pub fn non_negative(value: Decimal) -> Decimal {
    if value > Decimal::ZERO { value } else { Decimal::ZERO }
}
