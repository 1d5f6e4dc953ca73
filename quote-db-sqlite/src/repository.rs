use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quote_core::{
    NewQuoteRequest, PriceCategory, PriceEntry, QuoteRepository, QuoteRequest, RepositoryError,
    Vertical,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::decimal::{decimal_to_text, get_decimal};

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens `database_url`, creating the file if it does not exist.
    ///
    /// Accepts sqlx URLs (`sqlite:quotes.db`, `sqlite::memory:`), bare paths
    /// and `:memory:`.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database url: {}", database_url))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
            debug!(file = %path.display(), "applied seed file");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn row_to_price_entry(row: &SqliteRow) -> Result<PriceEntry, RepositoryError> {
    let category_str: String = row.try_get("category").map_err(db_error)?;
    let category = PriceCategory::parse(&category_str).ok_or_else(|| {
        RepositoryError::InvalidData(format!("Invalid price category: {}", category_str))
    })?;

    Ok(PriceEntry {
        category,
        key: row.try_get("key").map_err(db_error)?,
        amount: get_decimal(row, "amount")?,
    })
}

fn row_to_quote_request(row: &SqliteRow) -> Result<QuoteRequest, RepositoryError> {
    let vertical_str: String = row.try_get("vertical").map_err(db_error)?;
    let vertical = Vertical::parse(&vertical_str).ok_or_else(|| {
        RepositoryError::InvalidData(format!("Invalid vertical: {}", vertical_str))
    })?;

    Ok(QuoteRequest {
        id: row.try_get("id").map_err(db_error)?,
        vertical,
        customer_name: row.try_get("customer_name").map_err(db_error)?,
        email: row.try_get("email").map_err(db_error)?,
        phone: row.try_get("phone").map_err(db_error)?,
        postal_code: row.try_get("postal_code").map_err(db_error)?,
        configuration: row.try_get("configuration").map_err(db_error)?,
        total_price: get_decimal(row, "total_price")?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

const QUOTE_COLUMNS: &str = "id, vertical, customer_name, email, phone, postal_code,
                             configuration, total_price, created_at";

#[async_trait]
impl QuoteRepository for SqliteRepository {
    async fn list_price_entries(&self) -> Result<Vec<PriceEntry>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT category, key, amount FROM price_entries ORDER BY category, key",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(row_to_price_entry).collect()
    }

    async fn replace_price_entries(
        &self,
        entries: &[PriceEntry],
    ) -> Result<usize, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM price_entries")
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        for entry in entries {
            sqlx::query("INSERT INTO price_entries (category, key, amount) VALUES (?, ?, ?)")
                .bind(entry.category.as_str())
                .bind(&entry.key)
                .bind(decimal_to_text(entry.amount))
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        info!(count = entries.len(), "replaced price entries");

        Ok(entries.len())
    }

    async fn create_quote(
        &self,
        quote: NewQuoteRequest,
    ) -> Result<QuoteRequest, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO quote_requests (
                vertical, customer_name, email, phone, postal_code,
                configuration, total_price, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(quote.vertical.as_str())
        .bind(&quote.customer_name)
        .bind(&quote.email)
        .bind(&quote.phone)
        .bind(&quote.postal_code)
        .bind(&quote.configuration)
        .bind(decimal_to_text(quote.total_price))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        let id = result.last_insert_rowid();
        debug!(id, vertical = quote.vertical.as_str(), "stored quote request");
        self.get_quote(id).await
    }

    async fn get_quote(
        &self,
        id: i64,
    ) -> Result<QuoteRequest, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {QUOTE_COLUMNS} FROM quote_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .ok_or(RepositoryError::NotFound)?;

        row_to_quote_request(&row)
    }

    async fn list_quotes(
        &self,
        vertical: Option<Vertical>,
    ) -> Result<Vec<QuoteRequest>, RepositoryError> {
        let rows = if let Some(vertical) = vertical {
            sqlx::query(&format!(
                "SELECT {QUOTE_COLUMNS} FROM quote_requests WHERE vertical = ?
                 ORDER BY created_at DESC, id DESC"
            ))
            .bind(vertical.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query(&format!(
                "SELECT {QUOTE_COLUMNS} FROM quote_requests ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(db_error)?;

        rows.iter().map(row_to_quote_request).collect()
    }

    async fn delete_quote(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM quote_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
