use std::sync::OnceLock;

use chrono::Duration;
use chrono::Utc;

use crate::gate::AuthGate;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::DEFAULT_TOKEN_LIFETIME_HOURS;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Password verified against when the account does not exist.
const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Authentication coordinator combining password verification and JWT generation.
///
/// Provides high-level authentication operations by coordinating
/// password hashing and JWT token handling.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
    decoy_hash: OnceLock<String>,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    /// Expiration of the access token (Unix timestamp)
    pub expires_at: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default work factor and a 24 hour
    /// token lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Replace the password hasher (e.g. to tune the work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    /// Set the lifetime of issued tokens.
    pub fn with_token_lifetime(mut self, token_lifetime: Duration) -> Self {
        self.token_lifetime = token_lifetime;
        self
    }

    /// Lifetime of issued tokens.
    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Build a request gate sharing this authenticator's signing secret.
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.jwt_handler.clone())
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a JWT token for `subject`.
    ///
    /// `stored_hash` is `None` when no account matched the login identifier; a
    /// verification against a decoy hash is still performed so both failure
    /// paths cost the same and return the same error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash, if the account exists
    /// * `subject` - Identity to encode in the token on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown account or password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: Option<&str>,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let Some(stored_hash) = stored_hash else {
            let decoy = self.decoy_hash()?;
            // Result discarded: only the cost matters here
            let _ = self.password_hasher.verify(password, decoy);
            return Err(AuthenticationError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let claims = Claims::for_subject(subject, self.token_lifetime, Utc::now());
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: claims.exp,
        })
    }

    fn decoy_hash(&self) -> Result<&str, PasswordError> {
        if let Some(hash) = self.decoy_hash.get() {
            return Ok(hash.as_str());
        }
        let hash = self.password_hasher.hash(DECOY_PASSWORD)?;
        Ok(self.decoy_hash.get_or_init(|| hash).as_str())
    }
}
