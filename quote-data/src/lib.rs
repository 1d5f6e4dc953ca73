pub mod loader;

pub use loader::{PriceEntryLoader, PriceEntryLoaderError, PriceEntryRecord};
