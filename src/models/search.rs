use crate::errors::SearchError;
use serde::Deserialize;

pub const ADMIN_SOURCE: &str = "admin";
pub const CLIENT_SOURCE: &str = "client";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Privileged,
    Restricted,
}

impl Role {
    pub fn from_source(source: &str) -> Result<Self, SearchError> {
        match source {
            ADMIN_SOURCE => Ok(Role::Privileged),
            CLIENT_SOURCE => Ok(Role::Restricted),
            other => Err(SearchError::InvalidRole(other.to_string())),
        }
    }

    pub fn as_source(&self) -> &'static str {
        match self {
            Role::Privileged => ADMIN_SOURCE,
            Role::Restricted => CLIENT_SOURCE,
        }
    }
}

/// Raw query string of `GET /`. Everything arrives as text and is
/// validated by [`SearchRequest::try_from`].
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub source: Option<String>,
    pub advanced: Option<String>,
    pub isbn: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub source: String,
    pub advanced: bool,
    /// `0` means no identifier was sent.
    pub identifier: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category: i64,
}

impl SearchRequest {
    /// Free-text term used by the title/description lookup.
    pub fn term(&self) -> &str {
        &self.title
    }

    pub fn structured_filter(&self) -> StructuredFilter {
        StructuredFilter {
            title: self.title.clone(),
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            category: self.category,
        }
    }
}

impl TryFrom<SearchParams> for SearchRequest {
    type Error = SearchError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let source = params.source.unwrap_or_default();
        Role::from_source(&source)?;

        // `isbn` wins over its `id` alias when both are present.
        let identifier = match params.isbn.as_deref().filter(|v| !v.is_empty()) {
            Some(isbn) => parse_integer("isbn", Some(isbn))?,
            None => parse_integer("id", params.id.as_deref())?,
        };

        Ok(SearchRequest {
            source,
            advanced: parse_flag("advanced", params.advanced.as_deref())?,
            identifier,
            title: params.title.unwrap_or_default(),
            author: params.author.unwrap_or_default(),
            publisher: params.publisher.unwrap_or_default(),
            category: parse_integer("category", params.category.as_deref())?,
        })
    }
}

fn parse_integer(name: &'static str, value: Option<&str>) -> Result<i64, SearchError> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(raw) => raw.parse().map_err(|_| SearchError::InvalidParameter {
            name,
            value: raw.to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, value: Option<&str>) -> Result<bool, SearchError> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some("1" | "t" | "T" | "true" | "TRUE" | "True") => Ok(true),
        Some("0" | "f" | "F" | "false" | "FALSE" | "False") => Ok(false),
        Some(raw) => Err(SearchError::InvalidParameter {
            name,
            value: raw.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredFilter {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub category: i64,
}

/// The lookup strategy for one request, carrying the values it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryShape {
    ByIdentifier(i64),
    ByTerm(String),
    ByStructuredFilter(StructuredFilter),
}

impl QueryShape {
    pub fn name(&self) -> &'static str {
        match self {
            QueryShape::ByIdentifier(_) => "by_identifier",
            QueryShape::ByTerm(_) => "by_term",
            QueryShape::ByStructuredFilter(_) => "by_structured_filter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub role: Role,
    pub shape: QueryShape,
}
