//! Order history page.
//!
//! ```text
//! GET /account/orders?direction=next&cursor=abc&pageBy=10
//! ```
//!
//! Signed-out visitors are redirected to login before any query runs.
//! Clients sending `Accept: application/json` get the loader payload
//! (`{"customer": ...}` or `{"error": ...}`); everyone else gets HTML.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde_json::json;

use crate::domain::{OrderHistoryLoad, load_order_history};
use crate::inbound::http::account::{current_session, redirect};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::render::{orders_error_page, orders_page};

/// Render one page of the signed-in customer's orders.
#[get("/account/orders")]
pub async fn orders(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> HttpResponse {
    let session_state = current_session(&state, &session).await;
    let load = load_order_history(
        state.customer_account.as_ref(),
        &session_state,
        req.query_string(),
    )
    .await;
    let json = wants_json(&req);
    match load {
        OrderHistoryLoad::Redirect(location) => redirect(location),
        OrderHistoryLoad::Loaded { customer, .. } if json => {
            HttpResponse::Ok().json(json!({ "customer": customer }))
        }
        OrderHistoryLoad::Loaded {
            customer,
            page_size,
        } => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(orders_page(&customer, page_size)),
        OrderHistoryLoad::Failed(failure) if json => {
            HttpResponse::BadRequest().json(json!({ "error": failure }))
        }
        OrderHistoryLoad::Failed(failure) => HttpResponse::BadRequest()
            .content_type(ContentType::html())
            .body(orders_error_page(&failure)),
    }
}

fn wants_json(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| {
            accept.split(',').any(|media| {
                media
                    .split(';')
                    .next()
                    .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
            })
        })
}
