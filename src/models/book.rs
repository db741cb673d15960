use crate::models::search::Role;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Columns every caller may see. `isbn` is carried as text so leading
/// zeros and check characters survive whatever column type stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictedBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_date: NaiveDate,
    pub description: String,
    pub price: f64,
    pub rental_price_per_day: f64,
}

/// Staff view: the restricted columns plus stock and bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivilegedBook {
    #[serde(flatten)]
    pub book: RestrictedBook,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Untagged so the JSON body is a flat object; the privileged shape is tried
// first because it is the only one that requires the extra fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookRecord {
    Privileged(PrivilegedBook),
    Restricted(RestrictedBook),
}

impl BookRecord {
    pub fn role(&self) -> Role {
        match self {
            BookRecord::Privileged(_) => Role::Privileged,
            BookRecord::Restricted(_) => Role::Restricted,
        }
    }

    pub fn book(&self) -> &RestrictedBook {
        match self {
            BookRecord::Privileged(staff) => &staff.book,
            BookRecord::Restricted(book) => book,
        }
    }

    /// Drops the staff-only fields.
    pub fn into_restricted(self) -> RestrictedBook {
        match self {
            BookRecord::Privileged(staff) => staff.book,
            BookRecord::Restricted(book) => book,
        }
    }
}
