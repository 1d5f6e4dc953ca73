use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use quote_core::{
    BuildType, Color, ColorScheme, DakkapelOption, FrameHeightClass, InsulationLevel, Material,
    PlasterFinish, SizeClass,
};

use crate::input::parse_decimal;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Price estimates for dakkapel, painting and plastering jobs.
///
/// Prices include VAT: 9% for renovation, 21% for new construction.
#[derive(Debug, Parser)]
#[command(name = "quote", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database backend to use.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `quotes.db`) or `:memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log level or filter directive (overridden by RUST_LOG).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a dakkapel (dormer).
    Dakkapel(DakkapelArgs),

    /// Price an interior painting job.
    Painting(PaintingArgs),

    /// Price a plastering job.
    Plastering(PlasteringArgs),

    /// Show the defaults and ranges derived from a selection.
    Resolve(ResolveArgs),

    /// Print the active dakkapel price table.
    Prices,

    /// Price a job and store it as a quote request.
    Submit(SubmitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DakkapelArgs {
    /// Size class: compact, small, medium, large, extra_large (or "200-300").
    #[arg(long)]
    pub size: SizeClass,

    /// Width in cm. Defaults to the size class default width.
    #[arg(long, value_parser = parse_decimal)]
    pub width: Option<Decimal>,

    #[arg(long, default_value = "pvc")]
    pub material: Material,

    #[arg(long, default_value = "white")]
    pub frame_color: Color,

    #[arg(long, default_value = "white")]
    pub side_color: Color,

    #[arg(long, default_value = "white")]
    pub sash_color: Color,

    #[arg(long, default_value = "standard")]
    pub insulation: InsulationLevel,

    #[arg(long, default_value = "standard")]
    pub frame_height: FrameHeightClass,

    /// Number of windows. Defaults to the size class default count.
    #[arg(long)]
    pub windows: Option<u32>,

    /// Selected option; repeat for more than one.
    #[arg(long = "option")]
    pub options: Vec<DakkapelOption>,

    /// renovation (9% VAT) or new_construction (21% VAT).
    #[arg(long, default_value = "renovation")]
    pub build_type: BuildType,

    /// Reject widths outside the size class range.
    #[arg(long)]
    pub enforce_width: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PaintingArgs {
    /// Wall area in m².
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub walls: Decimal,

    /// Ceiling area in m².
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub ceilings: Decimal,

    #[arg(long, default_value_t = 0)]
    pub doors: u32,

    #[arg(long, default_value_t = 0)]
    pub windows: u32,

    /// single_color or multiple_colors.
    #[arg(long, default_value = "single_color")]
    pub colors: ColorScheme,

    #[arg(long, default_value = "renovation")]
    pub build_type: BuildType,
}

#[derive(Debug, Clone, Args)]
pub struct PlasteringArgs {
    /// Wall area in m².
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub walls: Decimal,

    /// Ceiling area in m².
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub ceilings: Decimal,

    /// Corner bead length in m.
    #[arg(long, default_value = "0", value_parser = parse_decimal)]
    pub corner_beads: Decimal,

    /// smooth or textured.
    #[arg(long, default_value = "smooth")]
    pub finish: PlasterFinish,

    #[arg(long, default_value = "renovation")]
    pub build_type: BuildType,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Size class code; unknown codes fall back to the 200-300 cm range.
    #[arg(long)]
    pub size: String,

    #[arg(long, default_value = "standard")]
    pub frame_height: FrameHeightClass,

    /// Roof slope: "<40°", "40-45°" or ">45°".
    #[arg(long)]
    pub roof_slope: Option<String>,
}

/// Customer details, followed by the job to price:
/// `quote submit --name .. --email .. painting --walls 40`.
#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub postal_code: Option<String>,

    #[command(subcommand)]
    pub job: SubmitJob,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SubmitJob {
    Dakkapel(DakkapelArgs),
    Painting(PaintingArgs),
    Plastering(PlasteringArgs),
}
