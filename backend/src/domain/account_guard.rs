//! Session resolution and the catch-all redirect for the account area.

use tracing::{debug, warn};

use super::ports::CustomerAccount;
use super::{CustomerAccessToken, Error, SessionState};

/// Account landing page.
pub const ACCOUNT_PATH: &str = "/account";

/// Entry point of the hosted customer login flow.
pub const LOGIN_PATH: &str = "/account/login";

/// Classify the current session.
///
/// `token` is the result of reading the session cookie. A cookie that cannot
/// be read yields [`SessionState::Indeterminate`] without consulting the
/// port; otherwise the port decides.
pub async fn resolve_session(
    account: &dyn CustomerAccount,
    token: Result<Option<CustomerAccessToken>, Error>,
) -> SessionState {
    match token {
        Ok(token) => account.session_state(token).await,
        Err(err) => SessionState::indeterminate(format!("session cookie unreadable: {err}")),
    }
}

/// Redirect target for an account path no concrete route handles.
///
/// Signed-in customers go to the account landing page; everyone else,
/// including sessions that could not be evaluated, goes to login.
///
/// # Examples
/// ```
/// use storefront::domain::{SessionState, LOGIN_PATH, guard_account_area};
///
/// assert_eq!(guard_account_area(&SessionState::LoggedOut), LOGIN_PATH);
/// ```
#[must_use]
pub fn guard_account_area(session: &SessionState) -> &'static str {
    match session {
        SessionState::LoggedIn(_) => ACCOUNT_PATH,
        SessionState::LoggedOut => {
            debug!("unauthenticated account request; redirecting to login");
            LOGIN_PATH
        }
        SessionState::Indeterminate { reason } => {
            warn!(%reason, "session state indeterminate; redirecting to login");
            LOGIN_PATH
        }
    }
}
