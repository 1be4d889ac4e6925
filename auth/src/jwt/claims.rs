use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Default token lifetime in hours.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// JWT claims carried by an identity token.
///
/// `sub` and `exp` are mandatory; a token missing either does not decode.
/// Custom fields are flattened into the payload via `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims with an explicit subject and expiration.
    pub fn new(sub: impl ToString, exp: i64) -> Self {
        Self {
            sub: sub.to_string(),
            exp,
            iat: None,
            extra: HashMap::new(),
        }
    }

    /// Create claims for a subject issued at `now` and valid for `lifetime`.
    ///
    /// # Arguments
    /// * `sub` - Unique subject identifier
    /// * `lifetime` - Time until the token expires
    /// * `now` - Issue time
    ///
    /// # Returns
    /// Claims with sub, exp and iat set
    pub fn for_subject(sub: impl ToString, lifetime: Duration, now: DateTime<Utc>) -> Self {
        Self {
            sub: sub.to_string(),
            exp: (now + lifetime).timestamp(),
            iat: Some(now.timestamp()),
            extra: HashMap::new(),
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// A token is expired once `now` reaches its expiration time.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
