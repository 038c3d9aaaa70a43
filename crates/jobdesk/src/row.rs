//! Row mapping traits and utilities

use crate::error::{StoreError, StoreResult};
use tokio_postgres::Row;

/// Trait for converting a database row into a Rust struct.
///
/// # Example
///
/// ```ignore
/// use jobdesk::{FromRow, RowExt, StoreResult};
///
/// struct Handle(String);
///
/// impl FromRow for Handle {
///     fn from_row(row: &tokio_postgres::Row) -> StoreResult<Self> {
///         Ok(Handle(row.try_get_column("handle")?))
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a row into `Self`.
    fn from_row(row: &Row) -> StoreResult<Self>;
}

/// Extension methods for `tokio_postgres::Row`.
pub trait RowExt {
    /// Try to get a column value, returning `StoreError::Decode` on failure
    fn try_get_column<T>(&self, column: &str) -> StoreResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> StoreResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| StoreError::decode(column, e.to_string()))
    }
}
