//! The authenticated session record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long before nominal expiry a token is already treated as stale.
/// Gives in-flight requests headroom so the bearer never expires mid-call.
const REFRESH_MARGIN_SECS: i64 = 60;

/// One authenticated user context against the provider.
///
/// Exactly one session is active per server process. The credential store
/// rotates `access_token` and `expires_at` on refresh; `refresh_token` and
/// `scopes` normally survive the rotation (the provider may issue a new
/// refresh token, which replaces the old one).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Bearer token attached to every provider call.
    pub access_token: String,

    /// Long-lived token exchanged at the token endpoint for a new bearer.
    pub refresh_token: String,

    /// Instant at which the access token stops being accepted.
    pub expires_at: DateTime<Utc>,

    /// OAuth scopes granted during the handshake.
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl Session {
    /// Whether the access token is still usable, with the safety margin
    /// applied.
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }

    /// Freshness check against an explicit clock, for tests.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now > Duration::seconds(REFRESH_MARGIN_SECS)
    }

    /// Compute an expiry instant from a token response `expires_in` value.
    pub fn expiry_from_now(expires_in_secs: i64) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(expires_in_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            expires_at,
            scopes: vec!["user-read-playback-state".to_string()],
        }
    }

    #[test]
    fn test_fresh_well_before_expiry() {
        let now = Utc::now();
        assert!(session(now + Duration::hours(1)).is_fresh_at(now));
    }

    #[test]
    fn test_stale_inside_margin() {
        let now = Utc::now();
        assert!(!session(now + Duration::seconds(30)).is_fresh_at(now));
    }

    #[test]
    fn test_stale_after_expiry() {
        let now = Utc::now();
        assert!(!session(now - Duration::seconds(5)).is_fresh_at(now));
    }

    #[test]
    fn test_roundtrip_serde() {
        let s = session(Utc::now() + Duration::hours(1));
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
