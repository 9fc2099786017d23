//! Connection shapes returned by the upstream API and links to neighbouring pages.

use serde::{Deserialize, Serialize};

use crate::variables::{CURSOR_PARAM, DIRECTION_PARAM, PAGE_BY_PARAM};
use crate::{DEFAULT_PAGE_SIZE, Direction};

/// Cursor metadata attached to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether nodes exist before `start_cursor`.
    pub has_previous_page: bool,
    /// Whether nodes exist after `end_cursor`.
    pub has_next_page: bool,
    /// Cursor of the first node in this page.
    #[serde(default)]
    pub start_cursor: Option<String>,
    /// Cursor of the last node in this page.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Request for the `page_size` nodes before this page, if the API
    /// reports any.
    #[must_use]
    pub fn previous_page(&self, page_size: u32) -> Option<PageRequest> {
        if !self.has_previous_page {
            return None;
        }
        self.start_cursor
            .as_ref()
            .map(|cursor| PageRequest::new(Direction::Previous, cursor.clone(), page_size))
    }

    /// Request for the `page_size` nodes after this page, if the API
    /// reports any.
    #[must_use]
    pub fn next_page(&self, page_size: u32) -> Option<PageRequest> {
        if !self.has_next_page {
            return None;
        }
        self.end_cursor
            .as_ref()
            .map(|cursor| PageRequest::new(Direction::Next, cursor.clone(), page_size))
    }
}

/// A page of nodes plus its cursor metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Nodes in upstream order.
    pub nodes: Vec<T>,
    /// Cursor metadata for this page.
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Whether the page holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Pointer to a neighbouring page, rendered as a query string.
///
/// The page size travels with the cursor so a `pageBy` override survives
/// "load more" and "load previous" clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    direction: Direction,
    cursor: String,
    page_size: u32,
}

impl PageRequest {
    /// Request `page_size` nodes in `direction` anchored on `cursor`.
    #[must_use]
    pub const fn new(direction: Direction, cursor: String, page_size: u32) -> Self {
        Self {
            direction,
            cursor,
            page_size,
        }
    }

    /// Query string understood by [`crate::PaginationVariables::from_query`].
    ///
    /// `pageBy` is only written when it differs from [`DEFAULT_PAGE_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use pagination::{DEFAULT_PAGE_SIZE, Direction, PageRequest};
    ///
    /// let request = PageRequest::new(Direction::Next, "a b".to_owned(), DEFAULT_PAGE_SIZE);
    /// assert_eq!(request.query_string(), "direction=next&cursor=a+b");
    ///
    /// let request = PageRequest::new(Direction::Previous, "c".to_owned(), 5);
    /// assert_eq!(request.query_string(), "direction=previous&cursor=c&pageBy=5");
    /// ```
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query
            .append_pair(DIRECTION_PARAM, self.direction.as_str())
            .append_pair(CURSOR_PARAM, &self.cursor);
        if self.page_size != DEFAULT_PAGE_SIZE {
            query.append_pair(PAGE_BY_PARAM, &self.page_size.to_string());
        }
        query.finish()
    }

    /// Link to this page relative to `path`.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        format!("{path}?{}", self.query_string())
    }
}
