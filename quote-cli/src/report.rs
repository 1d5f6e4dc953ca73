//! Plain-text rendering of quotes for the terminal.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use quote_core::calculations::resolver::{self, FrameHeights, WidthRange};
use quote_core::calculations::{LinearQuote, PaintingLine, PlasteringLine, PriceBreakdown};
use quote_core::{
    BuildType, Color, DakkapelConfiguration, DakkapelOption, FrameHeightClass, InsulationLevel,
    Material, OptionPricing, PriceKey, PriceTable, QuoteRequest, SizeClass,
};

const LABEL_WIDTH: usize = 38;

/// Formats `amount` the Dutch way: `€ 1.234,56`.
pub fn format_euro(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).trunc();

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("€ {sign}{grouped},{:0>2}", cents.to_string())
}

/// Formats a quantity with a decimal comma, without trailing zeros.
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string().replace('.', ",")
}

fn vat_label(build_type: BuildType) -> String {
    format!(
        "btw {}%",
        format_quantity(build_type.vat_rate() * Decimal::ONE_HUNDRED)
    )
}

fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    writeln!(f, "  {label:<LABEL_WIDTH$} {:>14}", format_euro(amount))
}

// ─── dakkapel ────────────────────────────────────────────────────────────────

pub struct DakkapelReport<'a> {
    pub config: &'a DakkapelConfiguration,
    pub breakdown: &'a PriceBreakdown,
}

impl fmt::Display for DakkapelReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let config = self.config;
        let b = self.breakdown;

        writeln!(
            f,
            "Dakkapel {}, breedte {} cm, {} ramen",
            config.size_class.label(),
            format_quantity(config.width_cm),
            config.window_count
        )?;
        line(f, "Basisprijs", b.base_price)?;
        line(
            f,
            &format!(
                "Materiaal {} (x {})",
                config.material.label(),
                format_quantity(b.material_multiplier)
            ),
            b.material_adjusted_price,
        )?;
        for option in &b.option_lines {
            let label = match option.option.pricing() {
                OptionPricing::Flat => option.option.label().to_string(),
                OptionPricing::PerMeterWidth => format!(
                    "{} ({} m)",
                    option.option.label(),
                    format_quantity(option.quantity)
                ),
                OptionPricing::PerWindow => format!(
                    "{} ({} ramen)",
                    option.option.label(),
                    format_quantity(option.quantity)
                ),
            };
            line(f, &label, option.amount)?;
        }
        if b.extra_windows > 0 {
            line(
                f,
                &format!("Extra ramen ({})", b.extra_windows),
                b.extra_window_surcharge,
            )?;
        }
        line(f, config.insulation.label(), b.insulation_surcharge)?;
        line(
            f,
            &format!(
                "Kozijnhoogte {} cm",
                resolver::frame_heights(config.frame_height).frame_cm
            ),
            b.frame_height_surcharge,
        )?;
        line(f, "Kleuren (kozijn, zijwangen, draaidelen)", b.color_surcharge)?;
        line(f, "Subtotaal excl. btw", b.subtotal)?;
        line(
            f,
            &format!("Totaal incl. {}", vat_label(config.build_type)),
            b.total,
        )?;

        if !b.width_within_range {
            let range = resolver::width_range(config.size_class);
            writeln!(
                f,
                "Let op: breedte valt buiten {}-{} cm voor deze maat",
                format_quantity(range.min_cm),
                format_quantity(range.max_cm)
            )?;
        }
        Ok(())
    }
}

// ─── painting / plastering ───────────────────────────────────────────────────

/// Display name and unit of a linear cost line.
pub trait LineLabel {
    fn label(&self) -> &'static str;
    fn unit(&self) -> &'static str;
}

impl LineLabel for PaintingLine {
    fn label(&self) -> &'static str {
        match self {
            PaintingLine::Walls => "Wanden",
            PaintingLine::Ceilings => "Plafonds",
            PaintingLine::Doors => "Deuren",
            PaintingLine::Windows => "Kozijnen",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            PaintingLine::Walls | PaintingLine::Ceilings => "m²",
            PaintingLine::Doors | PaintingLine::Windows => "st",
        }
    }
}

impl LineLabel for PlasteringLine {
    fn label(&self) -> &'static str {
        match self {
            PlasteringLine::Walls => "Wanden",
            PlasteringLine::Ceilings => "Plafonds",
            PlasteringLine::CornerBeads => "Hoekprofielen",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            PlasteringLine::Walls | PlasteringLine::Ceilings => "m²",
            PlasteringLine::CornerBeads => "m",
        }
    }
}

pub struct LinearReport<'a, L> {
    pub title: String,
    pub build_type: BuildType,
    pub quote: &'a LinearQuote<L>,
}

impl<L: LineLabel> fmt::Display for LinearReport<'_, L> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for cost in self.quote.lines.iter().filter(|c| !c.quantity.is_zero()) {
            line(
                f,
                &format!(
                    "{} {} {} x {}",
                    cost.line.label(),
                    format_quantity(cost.quantity),
                    cost.line.unit(),
                    format_euro(cost.rate)
                ),
                cost.amount,
            )?;
        }
        line(f, "Subtotaal excl. btw", self.quote.subtotal)?;
        line(
            f,
            &format!("Totaal incl. {}", vat_label(self.build_type)),
            self.quote.total,
        )
    }
}

// ─── resolver ────────────────────────────────────────────────────────────────

/// Attributes derived for a raw size code; `size_class` is `None` when the
/// code was not recognised and the fallback range applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttributes {
    pub size_class: Option<SizeClass>,
    pub width_range: WidthRange,
    pub default_width_cm: Option<Decimal>,
    pub default_window_count: Option<u32>,
    pub frame_height: FrameHeightClass,
    pub frame_heights: FrameHeights,
    pub roof_angle: Option<u32>,
}

impl fmt::Display for ResolvedAttributes {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.size_class {
            Some(size_class) => writeln!(f, "Maat:             {}", size_class.label())?,
            None => writeln!(f, "Maat:             onbekend, standaardbereik gebruikt")?,
        }
        writeln!(
            f,
            "Breedtebereik:    {}-{} cm",
            format_quantity(self.width_range.min_cm),
            format_quantity(self.width_range.max_cm)
        )?;
        if let Some(width) = self.default_width_cm {
            writeln!(f, "Standaardbreedte: {} cm", format_quantity(width))?;
        }
        if let Some(count) = self.default_window_count {
            writeln!(f, "Standaard ramen:  {count}")?;
        }
        writeln!(
            f,
            "Kozijnhoogte:     {} cm (unit {} cm)",
            self.frame_heights.frame_cm, self.frame_heights.unit_cm
        )?;
        if let Some(angle) = self.roof_angle {
            writeln!(f, "Dakhelling:       {angle}°")?;
        }
        Ok(())
    }
}

// ─── price table ─────────────────────────────────────────────────────────────

pub struct PriceTableReport<'a>(pub &'a PriceTable);

impl fmt::Display for PriceTableReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let table = self.0;

        writeln!(f, "Basisprijzen")?;
        for size in SizeClass::ALL {
            line(f, size.label(), table.base_prices.get(*size))?;
        }

        writeln!(f, "Materiaalfactor")?;
        for material in Material::ALL {
            writeln!(
                f,
                "  {:<LABEL_WIDTH$} {:>14}",
                material.label(),
                format!("x {}", format_quantity(table.material_multipliers.get(*material)))
            )?;
        }

        writeln!(f, "Opties")?;
        for option in DakkapelOption::ALL {
            let unit = match option.pricing() {
                OptionPricing::Flat => "",
                OptionPricing::PerMeterWidth => " (per m)",
                OptionPricing::PerWindow => " (per raam)",
            };
            line(
                f,
                &format!("{}{unit}", option.label()),
                table.option_costs.get(*option),
            )?;
        }

        writeln!(f, "Kleuren (per onderdeel)")?;
        for color in Color::ALL {
            line(f, color.label(), table.color_surcharges.get(*color))?;
        }

        writeln!(f, "Isolatie")?;
        for level in InsulationLevel::ALL {
            line(f, level.label(), table.insulation_surcharges.get(*level))?;
        }

        writeln!(f, "Kozijnhoogte")?;
        for height in FrameHeightClass::ALL {
            line(
                f,
                &format!("{} cm", resolver::frame_heights(*height).frame_cm),
                table.frame_height_surcharges.get(*height),
            )?;
        }

        writeln!(f, "Overig")?;
        line(f, "Extra raam", table.extra_window_cost)
    }
}

// ─── submission ──────────────────────────────────────────────────────────────

pub struct SubmittedReport<'a>(pub &'a QuoteRequest);

impl fmt::Display for SubmittedReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let quote = self.0;
        writeln!(
            f,
            "Offerteaanvraag #{} opgeslagen voor {} <{}> op {}",
            quote.id,
            quote.customer_name,
            quote.email,
            quote
                .created_at
                .with_timezone(&chrono::Local)
                .format("%d-%m-%Y %H:%M")
        )?;
        writeln!(f, "Totaal incl. btw: {}", format_euro(quote.total_price))
    }
}
