use thiserror::Error;

use crate::jwt::JwtError;

/// Reason a request was refused by the [`AuthGate`](super::AuthGate).
///
/// All variants are client-caused and map to an unauthenticated response.
/// Token decoding detail is deliberately collapsed into `InvalidCredential`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("Authorization header required")]
    MissingCredential,

    #[error("Authorization header format must be Bearer <token>")]
    MalformedCredential,

    #[error("Invalid token")]
    InvalidCredential,

    #[error("Token has expired")]
    ExpiredCredential,
}

impl AuthRejection {
    /// Stable machine-readable code for responses.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthRejection::MissingCredential => "missing_credential",
            AuthRejection::MalformedCredential => "malformed_credential",
            AuthRejection::InvalidCredential => "invalid_credential",
            AuthRejection::ExpiredCredential => "expired_credential",
        }
    }
}

impl From<JwtError> for AuthRejection {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthRejection::ExpiredCredential,
            JwtError::MalformedToken(_)
            | JwtError::SignatureInvalid
            | JwtError::EncodingFailed(_) => AuthRejection::InvalidCredential,
        }
    }
}
