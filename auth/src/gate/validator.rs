use chrono::Utc;

use super::errors::AuthRejection;
use super::identity::ResolvedIdentity;
use crate::jwt::JwtHandler;

/// Authorization scheme prefix expected in the credential header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Request-time credential gate.
///
/// Turns the raw value of an `Authorization` header into a [`ResolvedIdentity`]
/// or an [`AuthRejection`]. Holds no mutable state; one instance is shared by
/// all concurrent requests.
#[derive(Clone)]
pub struct AuthGate {
    jwt_handler: JwtHandler,
}

impl AuthGate {
    /// Create a gate verifying tokens with the given handler.
    pub fn new(jwt_handler: JwtHandler) -> Self {
        Self { jwt_handler }
    }

    /// Validate a credential header against the current time.
    ///
    /// # Arguments
    /// * `authorization` - Raw `Authorization` header value, `None` if absent
    ///
    /// # Errors
    /// * `MissingCredential` - No header
    /// * `MalformedCredential` - Not `Bearer <token>`
    /// * `InvalidCredential` - Token malformed, wrongly signed or without subject
    /// * `ExpiredCredential` - Token expired
    pub fn validate(&self, authorization: Option<&str>) -> Result<ResolvedIdentity, AuthRejection> {
        self.validate_at(authorization, Utc::now().timestamp())
    }

    /// Validate a credential header against an explicit clock.
    pub fn validate_at(
        &self,
        authorization: Option<&str>,
        now: i64,
    ) -> Result<ResolvedIdentity, AuthRejection> {
        let token = extract_bearer_token(authorization)?;

        let claims = self.jwt_handler.decode(token, now).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AuthRejection::from(e)
        })?;

        if claims.sub.is_empty() {
            tracing::debug!("Token carries an empty subject");
            return Err(AuthRejection::InvalidCredential);
        }

        Ok(ResolvedIdentity::from_claims(claims))
    }
}

fn extract_bearer_token(authorization: Option<&str>) -> Result<&str, AuthRejection> {
    let header = authorization.ok_or(AuthRejection::MissingCredential)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or(AuthRejection::MalformedCredential)?;

    if token.is_empty() {
        return Err(AuthRejection::MalformedCredential);
    }

    Ok(token)
}
