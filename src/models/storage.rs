use crate::models::product::Product;
use crate::models::query::{BindValue, BuiltQuery};
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to decode column '{column}': {source}")]
    Decode {
        column: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Read-only access to the `products` collection.
#[async_trait]
pub trait ProductStore {
    /// Runs a product query and returns rows in result order.
    async fn fetch_products(&self, query: &BuiltQuery) -> Result<Vec<Product>, StorageError>;
    /// Runs a `COUNT(*)` query.
    async fn fetch_count(&self, query: &BuiltQuery) -> Result<u64, StorageError>;
    /// Raw value of the most recent `timestamp`, `None` for an empty collection.
    async fn fetch_latest_timestamp(&self) -> Result<Option<String>, StorageError>;
    async fn test_connection(&self) -> Result<(), StorageError>;
}

pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Opens the dataset read-only. The file must already exist.
    pub async fn connect(path: &Path, max_connections: u32) -> Result<Self, StorageError> {
        if !path.is_file() {
            return Err(StorageError::Connection(format!(
                "dataset {} not found",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [BindValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            BindValue::Text(text) => query.bind(text.as_str()),
            BindValue::Integer(value) => query.bind(*value),
        };
    }
    query
}

fn column<'r, T>(row: &'r SqliteRow, column: &'static str) -> Result<T, StorageError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(column)
        .map_err(|source| StorageError::Decode { column, source })
}

fn product_from_row(row: &SqliteRow) -> Result<Product, StorageError> {
    let id: i64 = column(row, "id")?;
    let id = u32::try_from(id).map_err(|e| StorageError::Decode {
        column: "id",
        source: sqlx::Error::Decode(Box::new(e)),
    })?;

    Ok(Product {
        id,
        name: column(row, "name")?,
        url: column(row, "url")?,
        img_url: column(row, "img_url")?,
        title: column(row, "title")?,
        price: column(row, "price")?,
        used_price: column(row, "used_price")?,
        save: column(row, "save")?,
        region: column(row, "region")?,
        timestamp: column(row, "timestamp")?,
    })
}

#[async_trait]
impl ProductStore for SqliteBackend {
    async fn fetch_products(&self, query: &BuiltQuery) -> Result<Vec<Product>, StorageError> {
        debug!("Running product query: {} {:?}", query.sql, query.params);

        let rows = bind_params(sqlx::query(&query.sql), &query.params)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(product_from_row).collect()
    }

    async fn fetch_count(&self, query: &BuiltQuery) -> Result<u64, StorageError> {
        let row = bind_params(sqlx::query(&query.sql), &query.params)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row
            .try_get(0)
            .map_err(|source| StorageError::Decode { column: "COUNT(*)", source })?;

        Ok(count.max(0) as u64)
    }

    async fn fetch_latest_timestamp(&self) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT timestamp FROM products ORDER BY timestamp DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(column(&row, "timestamp")?)),
            None => Ok(None),
        }
    }

    async fn test_connection(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
