//! Wire shapes for the Customer Account GraphQL endpoint.
//!
//! The selection set mirrors the domain projections field for field, so
//! responses decode straight into [`CustomerOrdersData`].

use pagination::PaginationVariables;
use serde::Serialize;

use crate::domain::ports::{CustomerOrdersData, GraphQlResponse};

/// Orders of the signed-in customer, newest first.
///
/// `$startCursor` and `$endCursor` feed `before` and `after` so the
/// pagination variables serialise without renaming.
pub(super) const CUSTOMER_ORDERS_QUERY: &str = r"#graphql
fragment OrderItem on Order {
  id
  number
  processedAt
  financialStatus
  totalPrice {
    amount
    currencyCode
  }
}

fragment CustomerOrders on Customer {
  orders(
    sortKey: PROCESSED_AT
    reverse: true
    first: $first
    last: $last
    before: $startCursor
    after: $endCursor
  ) {
    nodes {
      ...OrderItem
    }
    pageInfo {
      hasPreviousPage
      hasNextPage
      startCursor
      endCursor
    }
  }
}

query CustomerOrders(
  $endCursor: String
  $first: Int
  $last: Int
  $startCursor: String
) {
  customer {
    ...CustomerOrders
  }
}
";

/// POST body sent to the endpoint.
#[derive(Debug, Serialize)]
pub(super) struct GraphQlRequestDto<'a> {
    pub(super) query: &'static str,
    pub(super) variables: &'a PaginationVariables,
}

impl<'a> GraphQlRequestDto<'a> {
    pub(super) fn customer_orders(variables: &'a PaginationVariables) -> Self {
        Self {
            query: CUSTOMER_ORDERS_QUERY,
            variables,
        }
    }
}

pub(super) fn decode_customer_orders(
    body: &[u8],
) -> Result<GraphQlResponse<CustomerOrdersData>, String> {
    serde_json::from_slice(body).map_err(|error| format!("invalid GraphQL payload: {error}"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::FinancialStatus;
    use pagination::Direction;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn request_body_carries_query_and_camel_case_variables() {
        let variables = PaginationVariables::new(Direction::Previous, 10, Some("c1".to_owned()));
        let body = serde_json::to_value(GraphQlRequestDto::customer_orders(&variables))
            .expect("request serialises");

        assert_eq!(body["query"], Value::from(CUSTOMER_ORDERS_QUERY));
        assert_eq!(
            body["variables"],
            json!({"first": null, "last": 10, "startCursor": "c1", "endCursor": null})
        );
    }

    #[rstest]
    fn every_variable_is_declared_by_the_query() {
        for name in ["$first", "$last", "$startCursor", "$endCursor"] {
            assert!(CUSTOMER_ORDERS_QUERY.contains(name), "{name} missing");
        }
    }

    #[rstest]
    fn decodes_orders_page() {
        let body = json!({
            "data": {
                "customer": {
                    "orders": {
                        "nodes": [{
                            "id": "gid://shopify/Order/1",
                            "number": 1001,
                            "processedAt": "2024-03-05T09:30:00Z",
                            "financialStatus": "PARTIALLY_REFUNDED",
                            "totalPrice": {"amount": "12.00", "currencyCode": "EUR"}
                        }],
                        "pageInfo": {
                            "hasPreviousPage": false,
                            "hasNextPage": true,
                            "startCursor": "a",
                            "endCursor": "b"
                        }
                    }
                }
            }
        });
        let decoded = decode_customer_orders(body.to_string().as_bytes()).expect("decodes");
        let customer = decoded
            .data
            .and_then(|data| data.customer)
            .expect("customer present");
        assert_eq!(customer.orders.nodes[0].number, 1001);
        assert_eq!(
            customer.orders.nodes[0].financial_status,
            Some(FinancialStatus::PartiallyRefunded)
        );
        assert!(customer.orders.page_info.has_next_page);
    }

    #[rstest]
    fn decodes_errors_without_data() {
        let body = br#"{"data":null,"errors":[{"message":"Unauthorized"}]}"#;
        let decoded = decode_customer_orders(body).expect("decodes");
        assert!(decoded.has_errors());
        assert!(decoded.data.is_none());
    }

    #[rstest]
    fn rejects_non_json_bodies() {
        let error = decode_customer_orders(b"<html>").expect_err("html is not GraphQL");
        assert!(error.starts_with("invalid GraphQL payload"));
    }
}
