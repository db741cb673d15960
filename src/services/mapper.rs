use crate::models::book::{BookRecord, PrivilegedBook, RestrictedBook};
use crate::models::search::Role;
use crate::models::storage::StorageError;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::Row;

/// Typed access to one result row by column name.
pub trait ColumnSource {
    fn integer(&self, column: &str) -> Result<i64, StorageError>;
    fn text(&self, column: &str) -> Result<String, StorageError>;
    fn real(&self, column: &str) -> Result<f64, StorageError>;
    fn date(&self, column: &str) -> Result<NaiveDate, StorageError>;
    fn timestamp(&self, column: &str) -> Result<DateTime<Utc>, StorageError>;
}

fn decode_error(column: &str, err: sqlx::Error) -> StorageError {
    StorageError::RowDecode {
        column: column.to_string(),
        message: err.to_string(),
    }
}

impl ColumnSource for MySqlRow {
    fn integer(&self, column: &str) -> Result<i64, StorageError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn text(&self, column: &str) -> Result<String, StorageError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn real(&self, column: &str) -> Result<f64, StorageError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn date(&self, column: &str) -> Result<NaiveDate, StorageError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }

    fn timestamp(&self, column: &str) -> Result<DateTime<Utc>, StorageError> {
        self.try_get(column).map_err(|e| decode_error(column, e))
    }
}

fn restricted_book<R: ColumnSource>(row: &R) -> Result<RestrictedBook, StorageError> {
    Ok(RestrictedBook {
        isbn: row.text("isbn")?,
        title: row.text("title")?,
        author: row.text("author")?,
        publisher: row.text("publisher")?,
        publication_date: row.date("publication_date")?,
        description: row.text("description")?,
        price: row.real("price")?,
        rental_price_per_day: row.real("rental_price_per_day")?,
    })
}

pub fn map_row<R: ColumnSource>(row: &R, role: Role) -> Result<BookRecord, StorageError> {
    let book = restricted_book(row)?;

    match role {
        Role::Restricted => Ok(BookRecord::Restricted(book)),
        Role::Privileged => Ok(BookRecord::Privileged(PrivilegedBook {
            book,
            quantity: row.integer("quantity")?,
            created_at: row.timestamp("created_at")?,
            updated_at: row.timestamp("updated_at")?,
        })),
    }
}

/// Maps every row or none: the first column that fails to decode aborts the
/// whole result.
pub fn map_rows<R: ColumnSource>(rows: &[R], role: Role) -> Result<Vec<BookRecord>, StorageError> {
    rows.iter().map(|row| map_row(row, role)).collect()
}
