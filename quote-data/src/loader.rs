use std::io::Read;

use quote_core::{PriceCategory, PriceEntry, PriceTable, PriceTableError, QuoteRepository, RepositoryError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading price table data.
#[derive(Debug, Error)]
pub enum PriceEntryLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid price category '{category}' on line {line}")]
    InvalidCategory { line: u64, category: String },

    #[error("Incomplete or inconsistent price table: {0}")]
    Table(#[from] PriceTableError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for PriceEntryLoaderError {
    fn from(err: csv::Error) -> Self {
        PriceEntryLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the price table CSV file.
///
/// - `category`: one of `base_price`, `material`, `option`, `color`,
///   `insulation`, `frame_height`, `extra_window`
/// - `key`: the member of that category (e.g. `wood`, `zinc_gutter`);
///   `per_window` for `extra_window`
/// - `amount`: euros excluding VAT, or the multiplier for `material`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PriceEntryRecord {
    pub category: String,
    pub key: String,
    pub amount: Decimal,
}

/// Loader for price table data from CSV files.
///
/// The CSV must describe a complete table: every size class, material,
/// option, color, insulation level and frame height, plus the extra-window
/// rate. Partial files are rejected so a stored table is never left with
/// gaps.
pub struct PriceEntryLoader;

impl PriceEntryLoader {
    /// Parse price entry records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<PriceEntryRecord>, PriceEntryLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: PriceEntryRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Validates `records` as a complete table.
    ///
    /// Keys are normalized, so `hout` in the file is returned under `wood`.
    pub fn to_table(records: &[PriceEntryRecord]) -> Result<PriceTable, PriceEntryLoaderError> {
        let entries = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let category = PriceCategory::parse(&record.category).ok_or_else(|| {
                    PriceEntryLoaderError::InvalidCategory {
                        // header is line 1
                        line: i as u64 + 2,
                        category: record.category.clone(),
                    }
                })?;
                Ok(PriceEntry::new(category, record.key.clone(), record.amount))
            })
            .collect::<Result<Vec<_>, PriceEntryLoaderError>>()?;

        Ok(PriceTable::from_entries(&entries)?)
    }

    /// Replace the stored price table with `records`.
    ///
    /// Nothing is written unless the records form a complete table. Returns
    /// the number of entries stored.
    pub async fn load<R: QuoteRepository + ?Sized>(
        repo: &R,
        records: &[PriceEntryRecord],
    ) -> Result<usize, PriceEntryLoaderError> {
        let table = Self::to_table(records)?;
        let stored = repo.replace_price_entries(&table.entries()).await?;
        info!(stored, "price table loaded");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quote_core::{Material, SizeClass};
    use rust_decimal_macros::dec;

    use super::*;

    fn default_csv() -> String {
        let mut csv = String::from("category,key,amount\n");
        for entry in PriceTable::default().entries() {
            csv.push_str(&format!("{},{},{}\n", entry.category, entry.key, entry.amount));
        }
        csv
    }

    #[test]
    fn test_parse_records() {
        let csv = "category,key,amount\nbase_price,small,8450\nmaterial,wood,1.15\n";

        let records = PriceEntryLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                PriceEntryRecord {
                    category: "base_price".to_string(),
                    key: "small".to_string(),
                    amount: dec!(8450),
                },
                PriceEntryRecord {
                    category: "material".to_string(),
                    key: "wood".to_string(),
                    amount: dec!(1.15),
                },
            ]
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let csv = "category, key, amount\n base_price , small , 8450 \n";

        let records = PriceEntryLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(records[0].key, "small");
        assert_eq!(records[0].amount, dec!(8450));
    }

    #[test]
    fn test_parse_rejects_non_numeric_amount() {
        let csv = "category,key,amount\nbase_price,small,lots\n";

        let result = PriceEntryLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(PriceEntryLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_default_table_round_trips_through_csv() {
        let records = PriceEntryLoader::parse(default_csv().as_bytes()).unwrap();

        let table = PriceEntryLoader::to_table(&records).unwrap();

        assert_eq!(table, PriceTable::default());
    }

    #[test]
    fn test_aliases_are_normalized() {
        let csv = default_csv().replace("material,wood,", "material,hout,");
        let records = PriceEntryLoader::parse(csv.as_bytes()).unwrap();

        let table = PriceEntryLoader::to_table(&records).unwrap();

        assert_eq!(table.material_multipliers.get(Material::Wood), dec!(1.15));
        assert_eq!(table.base_prices.get(SizeClass::Small), dec!(8450));
    }

    #[test]
    fn test_unknown_category_names_line() {
        let csv = format!("{}roof_tiles,red,12\n", default_csv());
        let records = PriceEntryLoader::parse(csv.as_bytes()).unwrap();

        let err = PriceEntryLoader::to_table(&records).unwrap_err();

        match err {
            PriceEntryLoaderError::InvalidCategory { line, category } => {
                assert_eq!(line, 29);
                assert_eq!(category, "roof_tiles");
            }
            other => panic!("expected InvalidCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_incomplete_table_is_rejected() {
        let csv = "category,key,amount\nbase_price,small,8450\n";
        let records = PriceEntryLoader::parse(csv.as_bytes()).unwrap();

        let result = PriceEntryLoader::to_table(&records);

        assert!(matches!(
            result,
            Err(PriceEntryLoaderError::Table(PriceTableError::MissingEntry { .. }))
        ));
    }
}
