use crate::jwt::Claims;

/// Subject resolved from a successfully verified token.
///
/// Has no public constructor: the only way to obtain one is
/// [`AuthGate::validate`](super::AuthGate::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    subject: String,
    expires_at: i64,
}

impl ResolvedIdentity {
    pub(crate) fn from_claims(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            expires_at: claims.exp,
        }
    }

    /// Subject identifier (`sub` claim).
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Expiration of the token the identity was resolved from (Unix timestamp).
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}
