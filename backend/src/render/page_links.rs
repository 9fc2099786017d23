//! "Load previous" / "Load more" controls around a paginated list.

use pagination::{PageInfo, PageRequest};

use super::{Element, Node};

const LOADING: &str = "Loading...";

/// Links to the pages either side of the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    previous: Option<PageRequest>,
    next: Option<PageRequest>,
    is_loading: bool,
}

impl PaginationControls {
    /// Controls derived from a connection's page info, requesting
    /// `page_size` nodes per neighbouring page.
    ///
    /// Server renders are never mid-transition, so `is_loading` starts false.
    #[must_use]
    pub fn from_page_info(page_info: &PageInfo, page_size: u32) -> Self {
        Self {
            previous: page_info.previous_page(page_size),
            next: page_info.next_page(page_size),
            is_loading: false,
        }
    }

    /// Mark a page transition as in flight.
    #[must_use]
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// Link to the previous page, if there is one.
    #[must_use]
    pub fn previous_link(&self, path: &str) -> Option<Element> {
        self.previous
            .as_ref()
            .map(|request| self.link(request, path, "prev", "↑ Load previous"))
    }

    /// Link to the next page, if there is one.
    #[must_use]
    pub fn next_link(&self, path: &str) -> Option<Element> {
        self.next
            .as_ref()
            .map(|request| self.link(request, path, "next", "Load more ↓"))
    }

    /// Wrap `items` between the previous and next links.
    #[must_use]
    pub fn around(&self, path: &str, items: Vec<Node>) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(items.len() + 2);
        nodes.extend(self.previous_link(path).map(Node::from));
        nodes.extend(items);
        nodes.extend(self.next_link(path).map(Node::from));
        nodes
    }

    fn link(&self, request: &PageRequest, path: &str, rel: &str, label: &str) -> Element {
        let anchor = Element::new("a")
            .attr("href", request.href(path))
            .attr("rel", rel);
        if self.is_loading {
            anchor.child(LOADING)
        } else {
            anchor.child(Element::new("span").child(label))
        }
    }
}
