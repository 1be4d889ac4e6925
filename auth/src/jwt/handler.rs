use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding identity tokens.
///
/// The signing algorithm is fixed to HS256 (HMAC with SHA-256). The `alg` field of
/// an inbound token header is never used to pick the verification algorithm or key:
/// a token announcing anything other than HS256 is rejected.
///
/// Expiry is checked against a caller-supplied clock rather than the system time,
/// so validation is a pure function of (token, secret, now).
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    verification: Validation,
    inspection: Validation,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut verification = Validation::new(Self::ALGORITHM);
        // `exp` is checked against the injected clock in `decode`
        verification.validate_exp = false;
        // `aud` is an ordinary claim here, carried through untouched
        verification.validate_aud = false;
        verification.required_spec_claims.clear();
        verification.leeway = 0;

        let mut inspection = verification.clone();
        inspection.insecure_disable_signature_validation();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            verification,
            inspection,
        }
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    ///
    /// # Returns
    /// Compact JWT (`header.payload.signature`, base64url segments)
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(Self::ALGORITHM);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and verify a JWT token.
    ///
    /// Expiry is evaluated before the signature: any structurally valid token whose
    /// `exp` is at or before `now` is reported as expired.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    /// * `now` - Current Unix timestamp
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `MalformedToken` - Token is not three base64url segments with valid JSON claims
    /// * `Expired` - `exp <= now`
    /// * `SignatureInvalid` - Signature does not match, or header names another algorithm
    pub fn decode(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let unverified = decode::<Claims>(token, &self.decoding_key, &self.inspection)?.claims;

        if unverified.is_expired(now) {
            return Err(JwtError::Expired);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.verification)?;

        Ok(token_data.claims)
    }
}
