use crate::models::search::{QueryShape, Role};

pub const DEFAULT_TERM_LIMIT: u32 = 50;

const BASE_COLUMNS: [&str; 8] = [
    "isbn",
    "title",
    "author",
    "publisher",
    "publication_date",
    "description",
    "price",
    "rental_price_per_day",
];

const STAFF_COLUMNS: [&str; 3] = ["quantity", "created_at", "updated_at"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Integer(i64),
    Text(String),
}

/// SQL text with `?` placeholders and the values that fill them, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

pub fn columns(role: Role) -> Vec<&'static str> {
    let mut columns = BASE_COLUMNS.to_vec();
    if role == Role::Privileged {
        columns.extend(STAFF_COLUMNS);
    }
    columns
}

/// How one column is read back. `isbn` may be stored as text or as a number
/// and money columns as DECIMAL or DOUBLE; the result set always carries
/// text and DOUBLE so decoding does not depend on the table definition.
fn select_expression(column: &str) -> String {
    match column {
        "isbn" => "CAST(isbn AS CHAR) AS isbn".to_string(),
        "price" | "rental_price_per_day" => format!("{0} + 0.0E0 AS {0}", column),
        other => other.to_string(),
    }
}

pub fn select_list(role: Role) -> String {
    columns(role)
        .into_iter()
        .map(select_expression)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn wildcard(term: &str) -> String {
    format!("%{}%", term)
}

/// Assembles the statement for one classified request. `term_limit` caps the
/// free-text lookup and is the only value written into the SQL text itself.
pub fn build(role: Role, shape: &QueryShape, term_limit: u32) -> Statement {
    let select = format!("SELECT {} FROM books", select_list(role));

    match shape {
        QueryShape::ByIdentifier(identifier) => Statement {
            sql: format!("{} WHERE isbn = ?", select),
            binds: vec![BindValue::Integer(*identifier)],
        },
        QueryShape::ByTerm(term) => {
            let pattern = wildcard(term);
            Statement {
                sql: format!(
                    "{} WHERE title LIKE ? OR description LIKE ? \
                     ORDER BY CASE WHEN title LIKE ? THEN 0 \
                     WHEN description LIKE ? THEN 1 ELSE 2 END, title \
                     LIMIT {}",
                    select, term_limit
                ),
                binds: vec![BindValue::Text(pattern); 4],
            }
        }
        QueryShape::ByStructuredFilter(filter) => Statement {
            sql: format!(
                "{} WHERE title = ? AND author = ? AND publisher = ? AND category = ?",
                select
            ),
            binds: vec![
                BindValue::Text(filter.title.clone()),
                BindValue::Text(filter.author.clone()),
                BindValue::Text(filter.publisher.clone()),
                BindValue::Integer(filter.category),
            ],
        },
    }
}
