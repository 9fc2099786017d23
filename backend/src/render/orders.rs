//! Order history page.

use pagination::Connection;

use crate::domain::{Customer, FinancialStatus, LoaderFailure, ORDERS_PATH, OrderSummary};

use super::page_links::PaginationControls;
use super::{Element, Node, document, money};

/// Document title of the order history page.
pub const ORDERS_TITLE: &str = "Orders";

const COLLECTIONS_PATH: &str = "/collections";
const PROCESSED_AT_FORMAT: &str = "%a %b %d %Y";

/// Full HTML document for a loaded order history fetched `page_size`
/// orders at a time.
#[must_use]
pub fn orders_page(customer: &Customer, page_size: u32) -> String {
    document(ORDERS_TITLE, orders_view(customer, page_size))
}

/// Full HTML document for a failed load.
#[must_use]
pub fn orders_error_page(failure: &LoaderFailure) -> String {
    let detail = match failure {
        LoaderFailure::Message(message) => Element::new("p").child(message.as_str()),
        LoaderFailure::Raw(value) => Element::new("pre").child(value.to_string()),
    };
    let body = Element::new("div")
        .attr("class", "orders")
        .child(Element::new("div").attr("role", "alert").child(detail));
    document(ORDERS_TITLE, body)
}

/// Order history body: the paginated list, or the empty state when the
/// customer has no orders.
///
/// `page_size` is repeated in the neighbouring page links.
#[must_use]
pub fn orders_view(customer: &Customer, page_size: u32) -> Element {
    let orders = &customer.orders;
    let content = if orders.is_empty() {
        empty_orders()
    } else {
        orders_table(orders, page_size)
    };
    Element::new("div").attr("class", "orders").child(content)
}

fn orders_table(orders: &Connection<OrderSummary>, page_size: u32) -> Element {
    let controls = PaginationControls::from_page_info(&orders.page_info, page_size);
    let rows = orders.nodes.iter().flat_map(order_item).collect();
    Element::new("div")
        .attr("class", "account-orders")
        .children(controls.around(ORDERS_PATH, rows))
}

fn empty_orders() -> Element {
    Element::new("div")
        .child(Element::new("p").child("You haven't placed any orders yet."))
        .child(Element::new("br"))
        .child(
            Element::new("p").child(
                Element::new("a")
                    .attr("href", COLLECTIONS_PATH)
                    .child("Start Shopping →"),
            ),
        )
}

fn order_item(order: &OrderSummary) -> [Node; 2] {
    let detail_path = order.id.detail_path();
    let status = order
        .financial_status
        .as_ref()
        .map(FinancialStatus::to_string)
        .unwrap_or_default();
    let fieldset = Element::new("fieldset")
        .keyed(order.id.to_string())
        .child(
            Element::new("a")
                .attr("href", detail_path.as_str())
                .child(Element::new("strong").child(format!("#{}", order.number))),
        )
        .child(
            Element::new("p").child(order.processed_at.format(PROCESSED_AT_FORMAT).to_string()),
        )
        .child(Element::new("p").child(status))
        .child(money(&order.total_price))
        .child(
            Element::new("a")
                .attr("href", detail_path)
                .child("View Order →"),
        );
    [fieldset.into(), Element::new("br").into()]
}
