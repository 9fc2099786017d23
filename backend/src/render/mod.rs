//! Server-side rendering of storefront components.
//!
//! Components return [`Element`] trees; handlers serialise them with
//! [`document`].

mod money;
mod node;
mod orders;
mod page_links;
mod video;

pub use self::money::{format_money, money};
pub use self::node::{Element, Node};
pub use self::orders::{ORDERS_TITLE, orders_error_page, orders_page, orders_view};
pub use self::page_links::PaginationControls;
pub use self::video::{VideoProps, video};

/// Wrap `body` in a complete HTML document titled `title`.
///
/// # Examples
/// ```
/// use storefront::render::{Element, document};
///
/// let html = document("Orders", Element::new("main"));
/// assert_eq!(
///     html,
///     concat!(
///         "<!DOCTYPE html>",
///         r#"<html lang="en"><head><meta charset="utf-8"><title>Orders</title></head>"#,
///         "<body><main></main></body></html>"
///     )
/// );
/// ```
#[must_use]
pub fn document(title: &str, body: Element) -> String {
    let html = Element::new("html")
        .attr("lang", "en")
        .child(
            Element::new("head")
                .child(Element::new("meta").attr("charset", "utf-8"))
                .child(Element::new("title").child(title)),
        )
        .child(Element::new("body").child(body));
    format!("<!DOCTYPE html>{}", html.to_html())
}
