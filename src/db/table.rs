//! Data-access contract for one SQL table holding values `V` keyed by `K`.

use crate::error::AppError;
use async_trait::async_trait;

/// Expected conditions (table already present, duplicate key, no matching row) come back
/// as `Ok(false)` / `Ok(None)`; anything else the server reports is an error.
#[async_trait]
pub trait Table<V, K>: Send + Sync
where
    V: Send + Sync,
    K: Send,
{
    fn table_name(&self) -> &'static str;

    /// `Ok(false)` if the table already exists.
    async fn create_table(&self) -> Result<bool, AppError>;

    /// `Ok(false)` if the table does not exist.
    async fn drop_table(&self) -> Result<bool, AppError>;

    async fn find_by_primary_key(&self, key: K) -> Result<Option<V>, AppError>;

    async fn find_all(&self) -> Result<Vec<V>, AppError>;

    /// Insert a new row. `Ok(false)` if a row with the same key exists.
    async fn save(&self, value: &V) -> Result<bool, AppError>;

    /// Overwrite the row with the value's key. `Ok(false)` if there is none.
    async fn update(&self, value: &V) -> Result<bool, AppError>;

    /// `Ok(false)` if no row had this key.
    async fn delete(&self, key: K) -> Result<bool, AppError>;
}
