mod build_type;
mod color;
mod configuration;
mod dakkapel_option;
mod frame_height;
mod insulation;
mod invalid;
mod material;
mod price_entry;
mod price_table;
mod quote_request;
mod roof_slope;
mod size_class;

pub use build_type::BuildType;
pub use color::Color;
pub use configuration::{
    ColorScheme, DakkapelConfiguration, PaintingConfiguration, PlasterFinish,
    PlasteringConfiguration,
};
pub use dakkapel_option::{DakkapelOption, OptionPricing};
pub use frame_height::FrameHeightClass;
pub use insulation::InsulationLevel;
pub use invalid::InvalidConfiguration;
pub use material::Material;
pub use price_entry::{PriceCategory, PriceEntry};
pub use price_table::{EnumTable, PriceKey, PriceTable, PriceTableError};
pub use quote_request::{NewQuoteRequest, QuoteRequest, Vertical};
pub use roof_slope::RoofSlope;
pub use size_class::SizeClass;
