//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by a session token.
///
/// The token only names the Credential Record it was issued for. Role name
/// and permissions are resolved from the store on every guarded request, so
/// permission edits take effect without re-login.
///
/// # Fields
///
/// - `sub`: Credential Record ID (subject). Optional on the wire so a token
///   without a subject can be told apart from a malformed one.
/// - `iat`: Issued-at timestamp (Unix seconds)
/// - `exp`: Expiry timestamp (Unix seconds), `iat` plus the session lifetime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(subject: impl Into<String>, issued_at: i64, lifetime: i64) -> Self {
        Self {
            sub: Some(subject.into()),
            iat: issued_at,
            exp: issued_at + lifetime,
        }
    }

    /// The subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// Expiry is exclusive: a token is dead at exactly `exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_expiry_from_lifetime() {
        let claims = SessionClaims::new("abc", 1_000, 86_400);
        assert_eq!(claims.exp, 87_400);
        assert_eq!(claims.subject(), Some("abc"));
    }

    #[test]
    fn test_expiry_boundary() {
        let claims = SessionClaims::new("abc", 1_000, 10);
        assert!(!claims.is_expired_at(1_000));
        assert!(!claims.is_expired_at(1_009));
        assert!(claims.is_expired_at(1_010));
        assert!(claims.is_expired_at(2_000));
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = SessionClaims {
            sub: Some(String::new()),
            iat: 0,
            exp: 1,
        };
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_missing_sub_deserializes() {
        let claims: SessionClaims = serde_json::from_str(r#"{"iat": 1, "exp": 2}"#).unwrap();
        assert_eq!(claims.sub, None);

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("sub").is_none());
    }
}
