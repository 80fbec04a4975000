use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed number of products per page.
pub const PAGE_SIZE: u32 = 20;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid sort order '{0}': expected '<column> [ASC|DESC]'")]
    InvalidOrder(String),
    #[error("Unknown sort column '{0}'")]
    UnknownColumn(String),
    #[error("Invalid offset '{0}': expected a non-negative integer")]
    InvalidOffset(String),
}

/// Columns a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Price,
    UsedPrice,
    Save,
    Name,
    Title,
    Region,
    Timestamp,
}

impl SortColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortColumn::Price => "price",
            SortColumn::UsedPrice => "used_price",
            SortColumn::Save => "save",
            SortColumn::Name => "name",
            SortColumn::Title => "title",
            SortColumn::Region => "region",
            SortColumn::Timestamp => "timestamp",
        }
    }
}

impl FromStr for SortColumn {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(SortColumn::Price),
            "used_price" => Ok(SortColumn::UsedPrice),
            "save" => Ok(SortColumn::Save),
            "name" => Ok(SortColumn::Name),
            "title" => Ok(SortColumn::Title),
            "region" => Ok(SortColumn::Region),
            "timestamp" => Ok(SortColumn::Timestamp),
            _ => Err(QueryError::UnknownColumn(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// An allow-listed `ORDER BY` expression.
///
/// Parsed from the `"<column> <DIR>"` form the listing page sends, e.g.
/// `"price ASC"` or `"save desc"`. The direction may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::new(SortColumn::Price, SortDirection::Asc)
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        let column = match parts.next() {
            Some(column) => column.parse::<SortColumn>()?,
            None => return Err(QueryError::InvalidOrder(s.to_string())),
        };

        let direction = match parts.next().map(|d| d.to_uppercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "ASC" => SortDirection::Asc,
            Some(d) if d == "DESC" => SortDirection::Desc,
            Some(_) => return Err(QueryError::InvalidOrder(s.to_string())),
        };

        if parts.next().is_some() {
            return Err(QueryError::InvalidOrder(s.to_string()));
        }

        Ok(Self { column, direction })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column.as_sql(), self.direction.as_sql())
    }
}

/// Substring filters applied to product names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerms {
    /// No filter: every product matches.
    All,
    /// Every term must appear in the name. Never empty.
    Matching(Vec<String>),
}

impl SearchTerms {
    /// Splits a raw search string on whitespace, dropping blank terms.
    /// A blank input is an explicit match-all.
    pub fn parse(raw: &str) -> Self {
        Self::from_terms(raw.split_whitespace().map(str::to_string))
    }

    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() {
            SearchTerms::All
        } else {
            SearchTerms::Matching(terms)
        }
    }

    pub fn terms(&self) -> &[String] {
        match self {
            SearchTerms::All => &[],
            SearchTerms::Matching(terms) => terms,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SearchTerms::All)
    }
}

/// Parameters of one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    terms: SearchTerms,
    order: SortOrder,
    offset: u32,
    start_index: u32,
}

impl SearchRequest {
    /// Creates a request whose display numbering starts at the offset.
    pub fn new(terms: SearchTerms, order: SortOrder, offset: u32) -> Self {
        Self {
            terms,
            order,
            offset,
            start_index: offset,
        }
    }

    /// Overrides the display start index.
    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn terms(&self) -> &SearchTerms {
        &self.terms
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn start_index(&self) -> u32 {
        self.start_index
    }
}

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

/// SQL text with `?N` placeholders and the values bound to them, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<BindValue>,
}
