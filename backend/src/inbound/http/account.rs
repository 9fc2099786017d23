//! Account area entry points.
//!
//! ```text
//! GET /account          -> 302 /account/orders
//! GET /account/login    -> 302 hosted login page
//! GET /account/{tail}   -> 302 /account or /account/login
//! ```
//!
//! [`account_guard`] must be registered after every concrete `/account/...`
//! route or it shadows them; [`configure`] registers them in that order.

use actix_web::{HttpResponse, get, http::header, web};

use crate::domain::{
    ApiResult, Error, ORDERS_PATH, SessionState, guard_account_area, resolve_session,
};
use crate::inbound::http::orders::orders;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Register every account route, catch-all last.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use storefront::inbound::http::account;
/// use storefront::inbound::http::state::HttpState;
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .configure(account::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(account_index)
        .service(login)
        .service(orders)
        .service(account_guard);
}

/// `302 Found` pointing at `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Session state for the current request.
pub(crate) async fn current_session(state: &HttpState, session: &SessionContext) -> SessionState {
    resolve_session(state.customer_account.as_ref(), session.customer_token()).await
}

/// Account landing page; the order history is the account index.
#[get("/account")]
pub async fn account_index() -> HttpResponse {
    redirect(ORDERS_PATH)
}

/// Hand off to the hosted customer login flow.
#[get("/account/login")]
pub async fn login(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let login_url = state
        .login_url
        .as_ref()
        .ok_or_else(|| Error::service_unavailable("customer login is not configured"))?;
    Ok(redirect(login_url.as_str()))
}

/// Catch-all for account paths without a concrete route.
#[get("/account/{tail:.*}")]
pub async fn account_guard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> HttpResponse {
    let session_state = current_session(&state, &session).await;
    redirect(guard_account_area(&session_state))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockCustomerAccount;
    use crate::domain::{ACCOUNT_PATH, CustomerAccessToken, ErrorCode, LOGIN_PATH};
    use crate::inbound::http::test_utils::test_session_middleware;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::{Duration, Utc};
    use rstest::rstest;
    use std::sync::Arc;
    use url::Url;

    fn location(res: &actix_web::dev::ServiceResponse) -> Option<&str> {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    fn state_with(account: MockCustomerAccount, login_url: Option<Url>) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(Arc::new(account), login_url))
    }

    #[actix_web::test]
    async fn account_index_redirects_to_orders() {
        let app = test::init_service(App::new().service(account_index)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/account").to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some(ORDERS_PATH));
    }

    #[actix_web::test]
    async fn login_redirects_to_the_hosted_page() {
        let login_url = Url::parse("https://shop.example/account/login").expect("valid url");
        let app = test::init_service(
            App::new()
                .app_data(state_with(MockCustomerAccount::new(), Some(login_url)))
                .service(login),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(LOGIN_PATH).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some("https://shop.example/account/login"));
    }

    #[actix_web::test]
    async fn login_without_configuration_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(MockCustomerAccount::new(), None))
                .service(login),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(LOGIN_PATH).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[case(true, ACCOUNT_PATH)]
    #[case(false, LOGIN_PATH)]
    #[actix_web::test]
    async fn guard_redirects_by_session_state(#[case] logged_in: bool, #[case] expected: &str) {
        let mut account = MockCustomerAccount::new();
        account.expect_session_state().times(1).returning(move |_| {
            if logged_in {
                SessionState::LoggedIn(CustomerAccessToken::new(
                    "abc",
                    Utc::now() + Duration::hours(1),
                ))
            } else {
                SessionState::LoggedOut
            }
        });
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state_with(account, None))
                .service(account_guard),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/account/profile").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some(expected));
    }

    #[actix_web::test]
    async fn guard_passes_the_session_token_to_the_port() {
        let mut account = MockCustomerAccount::new();
        account
            .expect_session_state()
            .withf(|token| token.as_ref().map(CustomerAccessToken::access_token) == Some("abc"))
            .times(1)
            .returning(|token| token.map_or(SessionState::LoggedOut, SessionState::LoggedIn));
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state_with(account, None))
                .route(
                    "/sign-in",
                    web::get().to(|session: SessionContext| async move {
                        let token = CustomerAccessToken::new("abc", Utc::now() + Duration::hours(1));
                        session.persist_customer_token(&token)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .service(account_guard),
        )
        .await;

        let signed_in = test::call_service(
            &app,
            test::TestRequest::get().uri("/sign-in").to_request(),
        )
        .await;
        let cookie = signed_in
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/account/addresses")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(location(&res), Some(ACCOUNT_PATH));
    }

    #[actix_web::test]
    async fn unreadable_session_fails_closed_without_asking_the_port() {
        let mut account = MockCustomerAccount::new();
        account.expect_session_state().never();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state_with(account, None))
                .route(
                    "/tamper",
                    web::get().to(|session: Session| async move {
                        session
                            .insert("customer_token", 42)
                            .expect("insert tampered token");
                        HttpResponse::Ok()
                    }),
                )
                .service(account_guard),
        )
        .await;

        let tampered = test::call_service(
            &app,
            test::TestRequest::get().uri("/tamper").to_request(),
        )
        .await;
        let cookie = tampered
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/account/settings")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(location(&res), Some(LOGIN_PATH));
    }
}
