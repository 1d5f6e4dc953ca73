use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewQuoteRequest, PriceEntry, PriceTable, QuoteRequest, Vertical};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

/// Storage for the active price table and submitted quotes.
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    // Price table
    async fn list_price_entries(&self) -> Result<Vec<PriceEntry>, RepositoryError>;

    /// Replaces every stored price entry with `entries`, returning how many
    /// were written.
    async fn replace_price_entries(
        &self,
        entries: &[PriceEntry],
    ) -> Result<usize, RepositoryError>;

    /// The stored price table, or `None` when no entries are stored.
    ///
    /// # Errors
    /// [`RepositoryError::InvalidData`] if the stored entries do not form a
    /// complete table.
    async fn price_table(&self) -> Result<Option<PriceTable>, RepositoryError> {
        let entries = self.list_price_entries().await?;
        if entries.is_empty() {
            return Ok(None);
        }

        PriceTable::from_entries(&entries)
            .map(Some)
            .map_err(|e| RepositoryError::InvalidData(e.to_string()))
    }

    // Quote requests
    async fn create_quote(&self, quote: NewQuoteRequest) -> Result<QuoteRequest, RepositoryError>;

    async fn get_quote(&self, id: i64) -> Result<QuoteRequest, RepositoryError>;

    async fn list_quotes(
        &self,
        vertical: Option<Vertical>,
    ) -> Result<Vec<QuoteRequest>, RepositoryError>;

    async fn delete_quote(&self, id: i64) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::PriceCategory;

    /// Holds price entries in memory; quote methods are never called.
    struct MemoryRepository {
        entries: Mutex<Vec<PriceEntry>>,
    }

    impl MemoryRepository {
        fn with_entries(entries: Vec<PriceEntry>) -> Self {
            Self {
                entries: Mutex::new(entries),
            }
        }
    }

    #[async_trait]
    impl QuoteRepository for MemoryRepository {
        async fn list_price_entries(&self) -> Result<Vec<PriceEntry>, RepositoryError> {
            Ok(self.entries.lock().unwrap().clone())
        }

        async fn replace_price_entries(
            &self,
            entries: &[PriceEntry],
        ) -> Result<usize, RepositoryError> {
            *self.entries.lock().unwrap() = entries.to_vec();
            Ok(entries.len())
        }

        async fn create_quote(
            &self,
            _quote: NewQuoteRequest,
        ) -> Result<QuoteRequest, RepositoryError> {
            unimplemented!()
        }

        async fn get_quote(&self, _id: i64) -> Result<QuoteRequest, RepositoryError> {
            unimplemented!()
        }

        async fn list_quotes(
            &self,
            _vertical: Option<Vertical>,
        ) -> Result<Vec<QuoteRequest>, RepositoryError> {
            unimplemented!()
        }

        async fn delete_quote(&self, _id: i64) -> Result<(), RepositoryError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn price_table_is_none_without_entries() {
        let repo = MemoryRepository::with_entries(Vec::new());

        assert_eq!(repo.price_table().await, Ok(None));
    }

    #[tokio::test]
    async fn price_table_rebuilds_stored_entries() {
        let mut table = PriceTable::default();
        table.extra_window_cost = dec!(450);
        let repo = MemoryRepository::with_entries(table.entries());

        assert_eq!(repo.price_table().await, Ok(Some(table)));
    }

    #[tokio::test]
    async fn incomplete_stored_table_is_invalid_data() {
        let repo = MemoryRepository::with_entries(vec![PriceEntry::new(
            PriceCategory::ExtraWindow,
            "per_window",
            dec!(425),
        )]);

        assert!(matches!(
            repo.price_table().await,
            Err(RepositoryError::InvalidData(_))
        ));
    }
}
