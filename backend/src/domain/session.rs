//! Customer session view used by the account area.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Access token issued by the hosted customer login flow.
///
/// Stored in the encrypted session cookie under camelCase keys. The token
/// text never appears in `Debug` output and is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAccessToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CustomerAccessToken {
    /// Wrap a token issued by the login flow.
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// Raw bearer value sent to the Customer Account API.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Instant after which the upstream rejects the token.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token is unusable at `now`.
    ///
    /// Blank tokens count as expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.access_token.trim().is_empty() || self.expires_at <= now
    }
}

impl fmt::Debug for CustomerAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerAccessToken")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl Drop for CustomerAccessToken {
    fn drop(&mut self) {
        self.access_token.zeroize();
    }
}

/// Outcome of asking whether the current request belongs to a signed-in
/// customer.
///
/// `Indeterminate` covers sessions that could not be read or checked. Every
/// consumer treats it like a signed-out session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A usable token is present.
    LoggedIn(CustomerAccessToken),
    /// No token, or the token has expired.
    LoggedOut,
    /// The session could not be evaluated.
    Indeterminate {
        /// Diagnostic for logs; never shown to the customer.
        reason: String,
    },
}

impl SessionState {
    /// Indeterminate state carrying `reason`.
    pub fn indeterminate(reason: impl Into<String>) -> Self {
        Self::Indeterminate {
            reason: reason.into(),
        }
    }

    /// Whether the session is authenticated.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case("token", Duration::minutes(5), false)]
    #[case("token", Duration::zero(), true)]
    #[case("token", Duration::minutes(-1), true)]
    #[case("   ", Duration::hours(1), true)]
    fn expiry_follows_deadline_and_blank_tokens(
        now: DateTime<Utc>,
        #[case] value: &str,
        #[case] offset: Duration,
        #[case] expired: bool,
    ) {
        let token = CustomerAccessToken::new(value, now + offset);
        assert_eq!(token.is_expired(now), expired);
    }

    #[rstest]
    fn debug_output_hides_the_token(now: DateTime<Utc>) {
        let token = CustomerAccessToken::new("shcat_secret", now);
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("shcat_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn serialises_with_camel_case_keys(now: DateTime<Utc>) {
        let token = CustomerAccessToken::new("abc", now);
        let value = serde_json::to_value(&token).expect("serialise");
        assert_eq!(value["accessToken"], "abc");
        assert_eq!(value["expiresAt"], "2024-03-05T12:00:00Z");
    }

    #[rstest]
    fn only_logged_in_sessions_are_authenticated(now: DateTime<Utc>) {
        let token = CustomerAccessToken::new("abc", now);
        assert!(SessionState::LoggedIn(token).is_logged_in());
        assert!(!SessionState::LoggedOut.is_logged_in());
        assert!(!SessionState::indeterminate("cookie unreadable").is_logged_in());
    }
}
