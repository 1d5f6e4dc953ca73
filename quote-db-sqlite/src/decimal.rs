use std::str::FromStr;

use quote_core::RepositoryError;
use rust_decimal::Decimal;
use sqlx::{Row, TypeInfo, ValueRef};

/// Get a decimal value from a row.
///
/// Amounts are written as TEXT; INTEGER and REAL values (hand-written seed
/// files, older rows) are accepted too.
pub fn get_decimal(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    let type_info = value_ref.type_info();
    let type_name = type_info.name();

    match type_name {
        "TEXT" => {
            let val: String = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get TEXT from '{}': {}", column, e))
            })?;
            Decimal::from_str(val.trim()).map_err(|e| {
                RepositoryError::InvalidData(format!(
                    "'{}' in column '{}' is not a decimal: {}",
                    val, column, e
                ))
            })
        }
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::InvalidData(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        "NULL" => Err(RepositoryError::InvalidData(format!(
            "Column '{}' is NULL",
            column
        ))),
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

/// Lossless text form used when writing a decimal column.
pub fn decimal_to_text(d: Decimal) -> String {
    d.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        sqlx::query(
            "CREATE TABLE test_decimals (
                id INTEGER PRIMARY KEY,
                value
            )",
        )
        .execute(&pool)
        .await
        .expect("Failed to create test table");
        pool
    }

    async fn read_value(insert: &str) -> Result<Decimal, RepositoryError> {
        let pool = setup_test_db().await;
        sqlx::query(&format!("INSERT INTO test_decimals (id, value) VALUES (1, {insert})"))
            .execute(&pool)
            .await
            .expect("Failed to insert test data");

        let row = sqlx::query("SELECT value FROM test_decimals WHERE id = 1")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        get_decimal(&row, "value")
    }

    #[tokio::test]
    async fn test_get_decimal_from_text() {
        assert_eq!(read_value("'1234.56'").await, Ok(dec!(1234.56)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_text_keeps_precision() {
        assert_eq!(
            read_value("'19913.505'").await,
            Ok(dec!(19913.505))
        );
    }

    #[tokio::test]
    async fn test_get_decimal_from_integer() {
        assert_eq!(read_value("12345").await, Ok(dec!(12345)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_real() {
        assert_eq!(read_value("1.15").await, Ok(dec!(1.15)));
    }

    #[tokio::test]
    async fn test_get_decimal_from_garbage_text() {
        assert!(matches!(
            read_value("'not a number'").await,
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_get_decimal_from_null() {
        assert_eq!(
            read_value("NULL").await,
            Err(RepositoryError::InvalidData("Column 'value' is NULL".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_decimal_column_not_found() {
        let pool = setup_test_db().await;
        let row = sqlx::query("SELECT 1 AS other")
            .fetch_one(&pool)
            .await
            .expect("Failed to fetch row");

        assert!(matches!(
            get_decimal(&row, "value"),
            Err(RepositoryError::Database(msg)) if msg.starts_with("Column 'value' not found")
        ));
    }

    #[test]
    fn test_decimal_to_text_drops_trailing_zeros() {
        assert_eq!(decimal_to_text(dec!(1.150)), "1.15");
        assert_eq!(decimal_to_text(dec!(425.00)), "425");
    }

    #[test]
    fn test_decimal_to_text_negative() {
        assert_eq!(decimal_to_text(dec!(-12.5)), "-12.5");
    }
}
