//! Price calculation for the dakkapel (dormer) configurator.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Base price for the size class |
//! | 2    | Base price × material multiplier |
//! | 3    | Selected options: flat, × width in meters, or × window count |
//! | 4    | Windows above the size class default × per-extra-window cost |
//! | 5    | Insulation, frame-height and three color surcharges |
//! | 6    | Subtotal (sum of steps 2-5) |
//! | 7    | Subtotal × 1.09 (renovation) or × 1.21 (new construction) |
//! | 8    | Rounded to the nearest multiple of 10 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use quote_core::calculations::DakkapelCalculator;
//! use quote_core::{DakkapelConfiguration, DakkapelOption, PriceTable, SizeClass};
//!
//! let prices = PriceTable::default();
//! let config = DakkapelConfiguration::new(SizeClass::Small)
//!     .with_option(DakkapelOption::ZincGutter);
//!
//! let breakdown = DakkapelCalculator::new(&prices).calculate(&config).unwrap();
//!
//! // (8450 + 295) × 1.09 = 9532.05
//! assert_eq!(breakdown.subtotal, dec!(8745));
//! assert_eq!(breakdown.total, dec!(9530));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::common::{apply_vat, checked_sum, non_negative, round_to_nearest_ten};
use super::resolver;
use crate::{DakkapelConfiguration, DakkapelOption, OptionPricing, PriceTable, SizeClass};

/// Errors that can occur during dakkapel price calculations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The configured width is below zero.
    #[error("width {0} cm is negative")]
    NegativeWidth(Decimal),

    /// The width lies outside the size class range and the calculator
    /// enforces ranges.
    #[error(
        "width {width_cm} cm is outside the {} range of {min_cm}-{max_cm} cm",
        .size_class.label()
    )]
    WidthOutOfRange {
        size_class: SizeClass,
        width_cm: Decimal,
        min_cm: Decimal,
        max_cm: Decimal,
    },

    /// An amount grew beyond what a [`Decimal`] can hold.
    #[error("{0} is too large to calculate")]
    Overflow(&'static str),
}

/// What to do with a width outside the selected size class range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidthPolicy {
    /// Price it anyway and flag it in the breakdown.
    #[default]
    Advisory,
    /// Reject it with [`CalculationError::WidthOutOfRange`].
    Enforce,
}

/// One selected option and what it adds to the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLine {
    pub option: DakkapelOption,

    /// 1 for flat options, width in meters or window count otherwise.
    pub quantity: Decimal,

    pub unit_cost: Decimal,
    pub amount: Decimal,
}

/// Line-by-line result of a dakkapel price calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: Decimal,
    pub material_multiplier: Decimal,

    /// Base price after the material multiplier (step 2).
    pub material_adjusted_price: Decimal,

    pub option_lines: Vec<OptionLine>,

    /// Windows above the size class default.
    pub extra_windows: u32,
    pub extra_window_surcharge: Decimal,

    pub insulation_surcharge: Decimal,
    pub frame_height_surcharge: Decimal,

    /// Frame, side and sash color surcharges combined.
    pub color_surcharge: Decimal,

    /// Sum of all amounts excluding VAT (step 6).
    pub subtotal: Decimal,

    pub vat_multiplier: Decimal,

    /// Subtotal including VAT, before rounding (step 7).
    pub total_before_rounding: Decimal,

    /// Quoted price including VAT, a multiple of 10.
    pub total: Decimal,

    /// False when the width lies outside the size class range.
    pub width_within_range: bool,
}

impl PriceBreakdown {
    pub fn options_total(&self) -> Decimal {
        self.option_lines.iter().map(|line| line.amount).sum()
    }
}

/// Calculator for dakkapel quotes against one price table.
#[derive(Debug, Clone)]
pub struct DakkapelCalculator<'a> {
    prices: &'a PriceTable,
    width_policy: WidthPolicy,
}

impl<'a> DakkapelCalculator<'a> {
    pub fn new(prices: &'a PriceTable) -> Self {
        Self {
            prices,
            width_policy: WidthPolicy::default(),
        }
    }

    pub fn with_width_policy(
        mut self,
        width_policy: WidthPolicy,
    ) -> Self {
        self.width_policy = width_policy;
        self
    }

    /// Calculates the price of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if:
    /// - The width is negative
    /// - The width is outside the size class range under
    ///   [`WidthPolicy::Enforce`]
    /// - An amount overflows, for example a huge width with a per-meter
    ///   option
    pub fn calculate(
        &self,
        config: &DakkapelConfiguration,
    ) -> Result<PriceBreakdown, CalculationError> {
        let width_within_range = self.check_width(config)?;

        let base_price = self.prices.base_prices.get(config.size_class);
        let material_multiplier = self.prices.material_multipliers.get(config.material);
        let material_adjusted_price = base_price
            .checked_mul(material_multiplier)
            .ok_or(CalculationError::Overflow("material-adjusted price"))?;

        let option_lines = self.option_lines(config)?;
        let options_total = checked_sum(option_lines.iter().map(|line| line.amount))
            .ok_or(CalculationError::Overflow("options total"))?;

        let extra_windows = self.extra_windows(config.size_class, config.window_count);
        let extra_window_surcharge = self
            .prices
            .extra_window_cost
            .checked_mul(Decimal::from(extra_windows))
            .ok_or(CalculationError::Overflow("extra window surcharge"))?;

        let insulation_surcharge = self.prices.insulation_surcharges.get(config.insulation);
        let frame_height_surcharge = self.prices.frame_height_surcharges.get(config.frame_height);
        let color_surcharge = self.color_surcharge(config)?;

        let subtotal = checked_sum([
            material_adjusted_price,
            options_total,
            extra_window_surcharge,
            insulation_surcharge,
            frame_height_surcharge,
            color_surcharge,
        ])
        .ok_or(CalculationError::Overflow("subtotal"))?;

        let total_before_rounding = apply_vat(subtotal, config.build_type)
            .ok_or(CalculationError::Overflow("total including VAT"))?;
        let total = round_to_nearest_ten(total_before_rounding)
            .map(non_negative)
            .ok_or(CalculationError::Overflow("rounded total"))?;

        debug!(
            size_class = config.size_class.as_str(),
            build_type = config.build_type.as_str(),
            %subtotal,
            %total,
            "calculated dakkapel price"
        );

        Ok(PriceBreakdown {
            base_price,
            material_multiplier,
            material_adjusted_price,
            option_lines,
            extra_windows,
            extra_window_surcharge,
            insulation_surcharge,
            frame_height_surcharge,
            color_surcharge,
            subtotal,
            vat_multiplier: config.build_type.vat_multiplier(),
            total_before_rounding,
            total,
            width_within_range,
        })
    }

    /// Returns whether the width lies within the size class range.
    fn check_width(
        &self,
        config: &DakkapelConfiguration,
    ) -> Result<bool, CalculationError> {
        if config.width_cm < Decimal::ZERO {
            return Err(CalculationError::NegativeWidth(config.width_cm));
        }

        let range = resolver::width_range(config.size_class);
        let within = range.contains(config.width_cm);

        if !within && self.width_policy == WidthPolicy::Enforce {
            return Err(CalculationError::WidthOutOfRange {
                size_class: config.size_class,
                width_cm: config.width_cm,
                min_cm: range.min_cm,
                max_cm: range.max_cm,
            });
        }

        Ok(within)
    }

    /// Prices each selected option, in option order.
    fn option_lines(
        &self,
        config: &DakkapelConfiguration,
    ) -> Result<Vec<OptionLine>, CalculationError> {
        config
            .options
            .iter()
            .map(|option| -> Result<OptionLine, CalculationError> {
                let unit_cost = self.prices.option_costs.get(*option);
                let quantity = match option.pricing() {
                    OptionPricing::Flat => Decimal::ONE,
                    OptionPricing::PerMeterWidth => config.width_m(),
                    OptionPricing::PerWindow => Decimal::from(config.window_count),
                };
                let amount = unit_cost
                    .checked_mul(quantity)
                    .ok_or(CalculationError::Overflow(option.as_str()))?;
                Ok(OptionLine {
                    option: *option,
                    quantity,
                    unit_cost,
                    amount,
                })
            })
            .collect()
    }

    /// Windows above the number included for the size class.
    fn extra_windows(
        &self,
        size_class: SizeClass,
        window_count: u32,
    ) -> u32 {
        window_count.saturating_sub(resolver::default_window_count(size_class))
    }

    fn color_surcharge(
        &self,
        config: &DakkapelConfiguration,
    ) -> Result<Decimal, CalculationError> {
        let colors = &self.prices.color_surcharges;
        checked_sum([
            colors.get(config.frame_color),
            colors.get(config.side_color),
            colors.get(config.sash_color),
        ])
        .ok_or(CalculationError::Overflow("color surcharge"))
    }
}

/// Quoted price of `config` against the standard price table, with
/// advisory width checking.
///
/// # Errors
///
/// Returns [`CalculationError::NegativeWidth`] for a negative width and
/// [`CalculationError::Overflow`] when an amount overflows.
pub fn calculate_total_price(config: &DakkapelConfiguration) -> Result<Decimal, CalculationError> {
    let prices = PriceTable::default();
    DakkapelCalculator::new(&prices)
        .calculate(config)
        .map(|breakdown| breakdown.total)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{BuildType, Color, FrameHeightClass, InsulationLevel, Material};

    fn calculate(config: &DakkapelConfiguration) -> PriceBreakdown {
        let prices = PriceTable::default();
        DakkapelCalculator::new(&prices)
            .calculate(config)
            .unwrap()
    }

    /// Every combination of size class, material and build type, with and
    /// without a mix of options and surcharges.
    fn sample_configurations() -> Vec<DakkapelConfiguration> {
        let mut configs = Vec::new();
        for size_class in SizeClass::all() {
            for material in Material::all() {
                for build_type in BuildType::all() {
                    let mut plain = DakkapelConfiguration::new(*size_class);
                    plain.material = *material;
                    plain.build_type = *build_type;

                    let mut loaded = plain.clone();
                    loaded.width_cm += dec!(7.5);
                    loaded.window_count += 1;
                    loaded.frame_color = Color::Cream;
                    loaded.insulation = InsulationLevel::Improved;
                    loaded.options.insert(DakkapelOption::ElectricRollerShutter);
                    loaded.options.insert(DakkapelOption::InsectScreens);
                    loaded.options.insert(DakkapelOption::VentilationGrilles);

                    configs.push(plain);
                    configs.push(loaded);
                }
            }
        }
        configs
    }

    // =========================================================================
    // worked examples
    // =========================================================================

    #[test]
    fn smallest_bracket_baseline_renovation() {
        let config = DakkapelConfiguration::new(SizeClass::Compact);

        let result = calculate(&config);

        // 6950 × 1.09 = 7575.50
        assert_eq!(result.subtotal, dec!(6950));
        assert_eq!(result.total_before_rounding, dec!(7575.50));
        assert_eq!(result.total, dec!(7580));
    }

    #[test]
    fn smallest_bracket_baseline_new_construction() {
        let config = DakkapelConfiguration::new(SizeClass::Compact)
            .with_build_type(BuildType::NewConstruction);

        let result = calculate(&config);

        // 6950 × 1.21 = 8409.50
        assert_eq!(result.subtotal, dec!(6950));
        assert_eq!(result.total, dec!(8410));
    }

    #[test]
    fn fully_loaded_configuration() {
        let mut config = DakkapelConfiguration::new(SizeClass::Large);
        config.width_cm = dec!(480);
        config.material = Material::Aluminium;
        config.frame_color = Color::Anthracite;
        config.side_color = Color::Black;
        config.sash_color = Color::White;
        config.insulation = InsulationLevel::Premium;
        config.frame_height = FrameHeightClass::High;
        config.window_count = 4;
        config.options.insert(DakkapelOption::ElectricRollerShutter);
        config.options.insert(DakkapelOption::InsectScreens);
        config.options.insert(DakkapelOption::InteriorFinishing);

        let result = calculate(&config);

        // 11450 × 1.25 = 14312.50
        assert_eq!(result.material_adjusted_price, dec!(14312.50));
        // 395 × 4.8 + 95 × 4 + 695 = 1896 + 380 + 695
        assert_eq!(result.options_total(), dec!(2971));
        assert_eq!(result.extra_windows, 2);
        assert_eq!(result.extra_window_surcharge, dec!(850));
        assert_eq!(result.color_surcharge, dec!(590));
        assert_eq!(result.subtotal, dec!(19913.50));
        // 19913.50 × 1.09 = 21705.715
        assert_eq!(result.total_before_rounding, dec!(21705.715));
        assert_eq!(result.total, dec!(21710));
    }

    #[test]
    fn fully_loaded_configuration_new_construction() {
        let mut config = DakkapelConfiguration::new(SizeClass::Large);
        config.width_cm = dec!(480);
        config.material = Material::Aluminium;
        config.frame_color = Color::Anthracite;
        config.side_color = Color::Black;
        config.insulation = InsulationLevel::Premium;
        config.frame_height = FrameHeightClass::High;
        config.window_count = 4;
        config.options.insert(DakkapelOption::ElectricRollerShutter);
        config.options.insert(DakkapelOption::InsectScreens);
        config.options.insert(DakkapelOption::InteriorFinishing);
        config.build_type = BuildType::NewConstruction;

        let result = calculate(&config);

        // 19913.50 × 1.21 = 24096.335
        assert_eq!(result.total, dec!(24100));
    }

    #[test]
    fn material_multiplier_scales_base_price() {
        let mut config = DakkapelConfiguration::new(SizeClass::Small);
        config.material = Material::Wood;

        let result = calculate(&config);

        assert_eq!(result.material_adjusted_price, dec!(9717.50));
    }

    // =========================================================================
    // invariants
    // =========================================================================

    #[test]
    fn total_is_always_a_multiple_of_ten() {
        for config in sample_configurations() {
            let result = calculate(&config);

            assert_eq!(result.total % dec!(10), dec!(0), "{config:?}");
            assert!(result.total >= Decimal::ZERO);
        }
    }

    #[test]
    fn build_type_only_changes_vat_factor() {
        for config in sample_configurations() {
            let renovation = calculate(&config.clone().with_build_type(BuildType::Renovation));
            let new_build = calculate(&config.with_build_type(BuildType::NewConstruction));

            assert_eq!(renovation.subtotal, new_build.subtotal);
            assert_eq!(
                renovation.total_before_rounding * dec!(1.21),
                new_build.total_before_rounding * dec!(1.09)
            );
        }
    }

    #[test]
    fn calculation_is_idempotent() {
        let config = sample_configurations().remove(7);

        assert_eq!(calculate(&config), calculate(&config));
    }

    // =========================================================================
    // option toggles
    // =========================================================================

    fn toggle_delta(
        config: &DakkapelConfiguration,
        option: DakkapelOption,
    ) -> Decimal {
        let without = calculate(config);
        let with = calculate(&config.clone().with_option(option));
        with.subtotal - without.subtotal
    }

    #[test]
    fn flat_option_adds_tabled_cost() {
        let config = DakkapelConfiguration::new(SizeClass::Medium);

        assert_eq!(toggle_delta(&config, DakkapelOption::ZincGutter), dec!(295));
        assert_eq!(toggle_delta(&config, DakkapelOption::InteriorFinishing), dec!(695));
        assert_eq!(toggle_delta(&config, DakkapelOption::ExistingDormerRemoval), dec!(950));
    }

    #[test]
    fn linear_options_scale_with_width_in_meters() {
        let mut config = DakkapelConfiguration::new(SizeClass::Medium);
        config.width_cm = dec!(365);

        assert_eq!(
            toggle_delta(&config, DakkapelOption::ElectricRollerShutter),
            dec!(395) * dec!(3.65)
        );
        assert_eq!(
            toggle_delta(&config, DakkapelOption::VentilationGrilles),
            dec!(45) * dec!(3.65)
        );
    }

    #[test]
    fn insect_screens_scale_with_window_count() {
        let mut config = DakkapelConfiguration::new(SizeClass::ExtraLarge);
        config.window_count = 5;

        assert_eq!(toggle_delta(&config, DakkapelOption::InsectScreens), dec!(475));
    }

    #[test]
    fn option_toggle_changes_vat_total_by_scaled_cost() {
        let config = DakkapelConfiguration::new(SizeClass::Small);
        let without = calculate(&config);
        let with = calculate(&config.clone().with_option(DakkapelOption::ZincGutter));

        assert_eq!(
            with.total_before_rounding - without.total_before_rounding,
            dec!(295) * dec!(1.09)
        );
    }

    // =========================================================================
    // extra windows
    // =========================================================================

    #[test]
    fn windows_at_or_below_default_cost_nothing() {
        let mut config = DakkapelConfiguration::new(SizeClass::Medium);

        for count in 0..=2 {
            config.window_count = count;
            let result = calculate(&config);

            assert_eq!(result.extra_windows, 0);
            assert_eq!(result.extra_window_surcharge, dec!(0));
        }
    }

    #[test]
    fn each_window_above_default_adds_rate() {
        let mut config = DakkapelConfiguration::new(SizeClass::Compact);
        let mut previous = calculate(&config).subtotal;

        for count in 2..=5 {
            config.window_count = count;
            let subtotal = calculate(&config).subtotal;

            assert_eq!(subtotal - previous, dec!(425));
            previous = subtotal;
        }
    }

    // =========================================================================
    // width handling
    // =========================================================================

    #[test]
    fn advisory_policy_prices_out_of_range_width() {
        let mut config = DakkapelConfiguration::new(SizeClass::Medium);
        config.width_cm = dec!(250);

        let result = calculate(&config);

        assert!(!result.width_within_range);
        assert_eq!(result.subtotal, dec!(9950));
    }

    #[test]
    fn enforce_policy_rejects_out_of_range_width() {
        let prices = PriceTable::default();
        let mut config = DakkapelConfiguration::new(SizeClass::Medium);
        config.width_cm = dec!(250);

        let result = DakkapelCalculator::new(&prices)
            .with_width_policy(WidthPolicy::Enforce)
            .calculate(&config);

        assert_eq!(
            result,
            Err(CalculationError::WidthOutOfRange {
                size_class: SizeClass::Medium,
                width_cm: dec!(250),
                min_cm: dec!(300),
                max_cm: dec!(400),
            })
        );
    }

    #[test]
    fn negative_width_is_rejected() {
        let mut config = DakkapelConfiguration::new(SizeClass::Small);
        config.width_cm = dec!(-10);

        assert_eq!(
            calculate_total_price(&config),
            Err(CalculationError::NegativeWidth(dec!(-10)))
        );
    }

    #[test]
    fn calculate_total_price_uses_standard_table() {
        let config = DakkapelConfiguration::new(SizeClass::Compact);

        assert_eq!(calculate_total_price(&config), Ok(dec!(7580)));
    }

    #[test]
    fn custom_price_table_is_used() {
        let mut prices = PriceTable::default();
        prices.base_prices.set(SizeClass::Compact, dec!(7000));
        let config = DakkapelConfiguration::new(SizeClass::Compact);

        let result = DakkapelCalculator::new(&prices).calculate(&config).unwrap();

        // 7000 × 1.09 = 7630
        assert_eq!(result.total, dec!(7630));
    }

    // =========================================================================
    // overflow
    // =========================================================================

    #[test]
    fn huge_width_with_per_meter_option_is_an_error() {
        let mut config = DakkapelConfiguration::new(SizeClass::Small)
            .with_option(DakkapelOption::ElectricRollerShutter);
        config.width_cm = Decimal::MAX;

        assert_eq!(
            calculate_total_price(&config),
            Err(CalculationError::Overflow("electric_roller_shutter"))
        );
    }

    #[test]
    fn huge_width_without_options_is_priced() {
        let mut config = DakkapelConfiguration::new(SizeClass::Small);
        config.width_cm = Decimal::MAX;

        let result = calculate(&config);

        assert!(!result.width_within_range);
        assert_eq!(result.total % dec!(10), dec!(0));
    }

    #[test]
    fn overflowing_subtotal_is_an_error() {
        let mut prices = PriceTable::default();
        prices.base_prices.set(SizeClass::Small, Decimal::MAX);
        let config = DakkapelConfiguration::new(SizeClass::Small)
            .with_option(DakkapelOption::ZincGutter);

        let result = DakkapelCalculator::new(&prices).calculate(&config);

        assert_eq!(result, Err(CalculationError::Overflow("subtotal")));
    }
}
