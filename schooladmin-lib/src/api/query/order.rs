//! Sort descriptors shared by list requests and page URLs.

use std::fmt;
use std::str::FromStr;

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns the wire form, `asc` or `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// The field a list is sorted on, with its direction.
///
/// Serialized as `field:direction` both in API requests and in page URLs.
///
/// # Example
///
/// ```
/// use schooladmin_lib::api::query::{Direction, SortSpec};
///
/// let sort: SortSpec = "phone:desc".parse().unwrap();
/// assert_eq!(sort.field(), "phone");
/// assert_eq!(sort.direction(), Direction::Desc);
/// assert_eq!(sort.to_string(), "phone:desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    direction: Direction,
}

/// Field lists are sorted on when nothing else was requested.
pub const DEFAULT_SORT_FIELD: &str = "name";

impl SortSpec {
    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    /// Returns the sorted field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Applies a column-header click.
    ///
    /// Clicking the active column flips its direction; clicking another
    /// column sorts on it ascending.
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.direction = self.direction.flip();
        } else {
            self.field = field.to_string();
            self.direction = Direction::Asc;
        }
    }

    /// Parses a URL value without failing.
    ///
    /// Accepts `field:direction`, bare `field`, and the `-field` shorthand
    /// for descending. An unknown direction falls back to ascending and an
    /// empty field to [`DEFAULT_SORT_FIELD`].
    pub fn parse_lenient(value: &str) -> Self {
        let value = value.trim();
        let (field, direction) = match value.split_once(':') {
            Some((field, dir)) => (field, dir.parse().unwrap_or_default()),
            None => match value.strip_prefix('-') {
                Some(field) => (field, Direction::Desc),
                None => (value, Direction::Asc),
            },
        };
        let field = if field.is_empty() { DEFAULT_SORT_FIELD } else { field };
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::asc(DEFAULT_SORT_FIELD)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = s
            .split_once(':')
            .ok_or_else(|| format!("expected 'field:direction', got '{}'", s))?;
        if field.is_empty() {
            return Err("sort field is empty".to_string());
        }
        Ok(Self {
            field: field.to_string(),
            direction: dir.parse()?,
        })
    }
}
