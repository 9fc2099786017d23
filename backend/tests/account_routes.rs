//! End-to-end checks of the account routes against a recording
//! `CustomerAccount` fake.

use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpResponse, test, web};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use pagination::{Connection, Direction, PageInfo, PaginationVariables};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use storefront::Trace;
use storefront::domain::ports::{
    CustomerAccount, CustomerAccountError, CustomerOrdersData, GraphQlError, GraphQlResponse,
};
use storefront::domain::{
    Customer, CustomerAccessToken, FinancialStatus, MoneyV2, OrderId, OrderSummary, SessionState,
};
use storefront::inbound::http::account;
use storefront::inbound::http::session::SessionContext;
use storefront::inbound::http::state::HttpState;

type Reply = Result<GraphQlResponse<CustomerOrdersData>, CustomerAccountError>;

/// Fake adapter recording every orders query it receives.
struct RecordingAccount {
    reply: Reply,
    queries: Mutex<Vec<PaginationVariables>>,
}

impl RecordingAccount {
    fn replying(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            queries: Mutex::new(Vec::new()),
        })
    }

    fn queries(&self) -> Vec<PaginationVariables> {
        self.queries.lock().expect("queries lock").clone()
    }
}

#[async_trait]
impl CustomerAccount for RecordingAccount {
    async fn session_state(&self, token: Option<CustomerAccessToken>) -> SessionState {
        match token {
            Some(token) if !token.is_expired(Utc::now()) => SessionState::LoggedIn(token),
            _ => SessionState::LoggedOut,
        }
    }

    async fn customer_orders(
        &self,
        _token: &CustomerAccessToken,
        variables: &PaginationVariables,
    ) -> Reply {
        self.queries
            .lock()
            .expect("queries lock")
            .push(variables.clone());
        self.reply.clone()
    }
}

fn order(n: u64) -> OrderSummary {
    OrderSummary {
        id: OrderId::new(format!("gid://shopify/Order/{n}")),
        number: 1000 + n,
        processed_at: Utc
            .with_ymd_and_hms(2024, 3, 5, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
        financial_status: Some(FinancialStatus::Paid),
        total_price: MoneyV2::new("25", "GBP"),
    }
}

fn orders_reply(count: u64, page_info: PageInfo) -> Reply {
    Ok(GraphQlResponse::from_data(CustomerOrdersData {
        customer: Some(Customer {
            orders: Connection {
                nodes: (1..=count).map(order).collect(),
                page_info,
            },
        }),
    }))
}

#[fixture]
fn key() -> Key {
    Key::generate()
}

async fn sign_in_route(
    session: SessionContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, storefront::domain::Error> {
    let token = CustomerAccessToken::new(
        "shcat_integration",
        Utc::now() + Duration::seconds(path.into_inner()),
    );
    session.persist_customer_token(&token)?;
    Ok(HttpResponse::Ok().finish())
}

fn app(
    customer_account: Arc<RecordingAccount>,
    key: Key,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(HttpState::new(customer_account, None)))
        .wrap(session)
        .wrap(Trace)
        .route("/test/sign-in/{seconds}", web::get().to(sign_in_route))
        .configure(account::configure)
}

/// Request that stores a token expiring `expires_in` from now.
fn sign_in(expires_in: Duration) -> test::TestRequest {
    test::TestRequest::get().uri(&format!("/test/sign-in/{}", expires_in.num_seconds()))
}

fn get(uri: &str, cookie: Option<&Cookie<'static>>, json: bool) -> test::TestRequest {
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    if json {
        request = request.insert_header((header::ACCEPT, "application/json"));
    }
    request
}

fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    assert_eq!(res.status(), StatusCode::OK);
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

#[rstest]
#[actix_web::test]
async fn signed_out_visitors_never_reach_the_api(key: Key) {
    let account = RecordingAccount::replying(orders_reply(1, PageInfo::default()));
    let app = test::init_service(app(account.clone(), key)).await;

    let res = test::call_service(&app, get("/account/orders", None, false).to_request()).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some("/account/login"));
    assert!(account.queries().is_empty());
}

#[rstest]
#[actix_web::test]
async fn expired_sessions_are_treated_as_signed_out(key: Key) {
    let account = RecordingAccount::replying(orders_reply(1, PageInfo::default()));
    let app = test::init_service(app(account.clone(), key)).await;
    let signed_in = test::call_service(&app, sign_in(Duration::seconds(-60)).to_request()).await;
    let cookie = session_cookie(&signed_in);

    let res = test::call_service(
        &app,
        get("/account/orders", Some(&cookie), false).to_request(),
    )
    .await;
    assert_eq!(location(&res), Some("/account/login"));
    let guarded = test::call_service(
        &app,
        get("/account/addresses", Some(&cookie), false).to_request(),
    )
    .await;
    assert_eq!(location(&guarded), Some("/account/login"));
    assert!(account.queries().is_empty());
}

#[rstest]
#[actix_web::test]
async fn signed_in_customers_see_their_orders(key: Key) {
    let page_info = PageInfo {
        has_previous_page: false,
        has_next_page: true,
        start_cursor: Some("first".to_owned()),
        end_cursor: Some("last".to_owned()),
    };
    let account = RecordingAccount::replying(orders_reply(3, page_info));
    let app = test::init_service(app(account.clone(), key)).await;
    let signed_in = test::call_service(&app, sign_in(Duration::hours(1)).to_request()).await;
    let cookie = session_cookie(&signed_in);

    let res = test::call_service(
        &app,
        get("/account/orders", Some(&cookie), false).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body");
    assert_eq!(body.matches("<fieldset").count(), 3);
    assert_eq!(body.matches("View Order →").count(), 3);
    assert!(body.contains("£25.00"));
    assert!(body.contains(r#"href="/account/orders?direction=next&amp;cursor=last""#));
    assert!(!body.contains("Load previous"));

    let queries = account.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].first(), Some(20));
    assert_eq!(queries[0].direction(), Direction::Next);
}

#[rstest]
#[actix_web::test]
async fn pagination_parameters_reach_the_api(key: Key) {
    let account = RecordingAccount::replying(orders_reply(1, PageInfo::default()));
    let app = test::init_service(app(account.clone(), key)).await;
    let signed_in = test::call_service(&app, sign_in(Duration::hours(1)).to_request()).await;
    let cookie = session_cookie(&signed_in);

    let res = test::call_service(
        &app,
        get(
            "/account/orders?direction=previous&cursor=abc&pageBy=5",
            Some(&cookie),
            true,
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let queries = account.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].last(), Some(5));
    assert_eq!(queries[0].start_cursor(), Some("abc"));
}

#[rstest]
#[actix_web::test]
async fn page_size_override_is_carried_into_the_next_page(key: Key) {
    let page_info = PageInfo {
        has_previous_page: false,
        has_next_page: true,
        start_cursor: Some("first".to_owned()),
        end_cursor: Some("fifth".to_owned()),
    };
    let account = RecordingAccount::replying(orders_reply(5, page_info));
    let app = test::init_service(app(account.clone(), key)).await;
    let signed_in = test::call_service(&app, sign_in(Duration::hours(1)).to_request()).await;
    let cookie = session_cookie(&signed_in);

    let res = test::call_service(
        &app,
        get("/account/orders?pageBy=5", Some(&cookie), false).to_request(),
    )
    .await;
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body");
    let next = "/account/orders?direction=next&cursor=fifth&pageBy=5";
    assert!(body.contains(&format!(r#"href="{}""#, next.replace('&', "&amp;"))));

    test::call_service(&app, get(next, Some(&cookie), false).to_request()).await;
    let queries = account.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].first(), Some(5));
    assert_eq!(queries[1].end_cursor(), Some("fifth"));
}

#[rstest]
#[actix_web::test]
async fn empty_history_shows_the_call_to_action(key: Key) {
    let account = RecordingAccount::replying(orders_reply(0, PageInfo::default()));
    let app = test::init_service(app(account, key)).await;
    let signed_in = test::call_service(&app, sign_in(Duration::hours(1)).to_request()).await;
    let cookie = session_cookie(&signed_in);

    let res = test::call_service(
        &app,
        get("/account/orders", Some(&cookie), false).to_request(),
    )
    .await;
    let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf-8 body");
    assert!(body.contains("You haven't placed any orders yet."));
    assert!(body.contains(r#"href="/collections""#));
    assert!(!body.contains("<fieldset"));
}

#[rstest]
#[case::graphql_errors(
    Ok(GraphQlResponse {
        data: None,
        errors: Some(vec![GraphQlError {
            message: "Customer is locked".to_owned(),
            locations: None,
            path: None,
        }]),
    }),
    json!({"error": "Customer not found"})
)]
#[case::null_customer(
    Ok(GraphQlResponse::from_data(CustomerOrdersData { customer: None })),
    json!({"error": "Customer not found"})
)]
#[case::timeout(
    Err(CustomerAccountError::timeout("deadline elapsed")),
    json!({"error": "customer account request timed out: deadline elapsed"})
)]
#[case::rejected_with_message(
    Err(CustomerAccountError::rejected(401_u16, json!({"message": "Invalid token"}))),
    json!({"error": "Invalid token"})
)]
#[actix_web::test]
async fn failures_answer_bad_request_with_an_error_payload(
    key: Key,
    #[case] reply: Reply,
    #[case] expected: Value,
) {
    let app = test::init_service(app(RecordingAccount::replying(reply), key)).await;
    let signed_in = test::call_service(&app, sign_in(Duration::hours(1)).to_request()).await;
    let cookie = session_cookie(&signed_in);

    let res = test::call_service(
        &app,
        get("/account/orders", Some(&cookie), true).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, expected);
}

#[rstest]
#[case("/account", "/account/orders")]
#[case("/account/profile", "/account")]
#[case("/account/orders/abc/extra", "/account")]
#[actix_web::test]
async fn signed_in_account_paths_redirect(
    key: Key,
    #[case] uri: &str,
    #[case] expected: &str,
) {
    let account = RecordingAccount::replying(orders_reply(0, PageInfo::default()));
    let app = test::init_service(app(account, key)).await;
    let signed_in = test::call_service(&app, sign_in(Duration::hours(1)).to_request()).await;
    let cookie = session_cookie(&signed_in);

    let res = test::call_service(&app, get(uri, Some(&cookie), false).to_request()).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(expected));
}
