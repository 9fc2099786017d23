//! Connection arguments derived from request query parameters.

use serde::Serialize;
use thiserror::Error;

/// Page size used when the request does not override it.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size accepted by the upstream connection arguments.
pub const MAX_PAGE_SIZE: u32 = 250;

pub(crate) const CURSOR_PARAM: &str = "cursor";
pub(crate) const DIRECTION_PARAM: &str = "direction";
pub(crate) const PAGE_BY_PARAM: &str = "pageBy";

/// Errors raised while reading pagination parameters from a query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// `pageBy` was not an integer within `1..=MAX_PAGE_SIZE`.
    #[error("pageBy must be an integer between 1 and {max}, got `{value}`")]
    InvalidPageSize {
        /// Raw parameter value.
        value: String,
        /// Upper bound that was enforced.
        max: u32,
    },
}

/// Paging direction relative to the cursor supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Walk forwards from `endCursor`.
    #[default]
    Next,
    /// Walk backwards from `startCursor`.
    Previous,
}

impl Direction {
    /// Query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }

    /// Read the `direction` query parameter.
    ///
    /// Only `previous` pages backwards; every other value pages forwards.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        if raw == Self::Previous.as_str() {
            Self::Previous
        } else {
            Self::Next
        }
    }
}

/// Arguments for a cursor-paginated connection field.
///
/// ## Invariants
/// - Exactly one of `first`/`last` is set, matching [`Self::direction`].
/// - `startCursor` is only set when paging backwards, `endCursor` only when
///   paging forwards.
///
/// Serialises with camelCase keys so it can be passed straight through as
/// GraphQL variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationVariables {
    first: Option<u32>,
    last: Option<u32>,
    start_cursor: Option<String>,
    end_cursor: Option<String>,
}

impl Default for PaginationVariables {
    fn default() -> Self {
        Self::new(Direction::Next, DEFAULT_PAGE_SIZE, None)
    }
}

impl PaginationVariables {
    /// Build variables for `page_size` nodes in `direction` from `cursor`.
    #[must_use]
    pub fn new(direction: Direction, page_size: u32, cursor: Option<String>) -> Self {
        match direction {
            Direction::Next => Self {
                first: Some(page_size),
                last: None,
                start_cursor: None,
                end_cursor: cursor,
            },
            Direction::Previous => Self {
                first: None,
                last: Some(page_size),
                start_cursor: cursor,
                end_cursor: None,
            },
        }
    }

    /// Read `cursor`, `direction` and `pageBy` from a raw query string.
    ///
    /// Only the first occurrence of each parameter is considered. A blank
    /// cursor is treated as absent and an unrecognised `direction` pages
    /// forwards.
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidPageSize`] when `pageBy` is malformed.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PaginationVariables, DEFAULT_PAGE_SIZE};
    ///
    /// let variables = PaginationVariables::from_query("", DEFAULT_PAGE_SIZE).unwrap();
    /// assert_eq!(variables.first(), Some(DEFAULT_PAGE_SIZE));
    /// assert!(variables.end_cursor().is_none());
    /// ```
    pub fn from_query(query: &str, default_page_size: u32) -> Result<Self, PaginationError> {
        let mut cursor = None;
        let mut direction = None;
        let mut page_by = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                CURSOR_PARAM if cursor.is_none() => cursor = Some(value.into_owned()),
                DIRECTION_PARAM if direction.is_none() => direction = Some(value.into_owned()),
                PAGE_BY_PARAM if page_by.is_none() => page_by = Some(value.into_owned()),
                _ => {}
            }
        }

        let direction = direction
            .as_deref()
            .map_or(Direction::Next, Direction::from_param);
        let page_size = match page_by {
            Some(raw) => parse_page_size(&raw)?,
            None => default_page_size,
        };
        let cursor = cursor.filter(|value| !value.trim().is_empty());
        Ok(Self::new(direction, page_size, cursor))
    }

    /// Direction these variables page in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        if self.last.is_some() {
            Direction::Previous
        } else {
            Direction::Next
        }
    }

    /// Requested number of nodes.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.first.or(self.last).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// `first` argument.
    #[must_use]
    pub const fn first(&self) -> Option<u32> {
        self.first
    }

    /// `last` argument.
    #[must_use]
    pub const fn last(&self) -> Option<u32> {
        self.last
    }

    /// `startCursor` argument (maps to `before`).
    #[must_use]
    pub fn start_cursor(&self) -> Option<&str> {
        self.start_cursor.as_deref()
    }

    /// `endCursor` argument (maps to `after`).
    #[must_use]
    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }
}

fn parse_page_size(raw: &str) -> Result<u32, PaginationError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
        .ok_or_else(|| PaginationError::InvalidPageSize {
            value: raw.to_owned(),
            max: MAX_PAGE_SIZE,
        })
}
