//! Authentication utilities library
//!
//! Provides the credential and authorization core used by the services:
//! - Password hashing (Argon2id, tunable work factor)
//! - JWT token generation and validation (HS256, fixed)
//! - A request gate resolving `Authorization: Bearer <token>` into an identity
//! - Authentication coordination for login flows
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new("user123", 2_000_000_000);
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token, 1_700_000_000).unwrap();
//! assert_eq!(decoded.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthRejection, Authenticator};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", Some(&hash), "user123").unwrap();
//!
//! // Protected request: resolve identity from the header
//! let gate = auth.gate();
//! let header = format!("Bearer {}", result.access_token);
//! let identity = gate.validate(Some(&header)).unwrap();
//! assert_eq!(identity.subject(), "user123");
//!
//! assert_eq!(gate.validate(None), Err(AuthRejection::MissingCredential));
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AuthGate;
pub use gate::AuthRejection;
pub use gate::ResolvedIdentity;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
