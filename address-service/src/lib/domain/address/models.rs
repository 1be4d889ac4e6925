use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::AddressError;
use super::errors::AddressIdError;
use crate::domain::user::models::UserId;

/// Postal address owned by exactly one user.
///
/// `owner` is always the identity resolved from the creating request, never a
/// value read from request input.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: AddressId,
    pub owner: UserId,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressId(pub Uuid);

impl AddressId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an address ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AddressIdError> {
        Uuid::parse_str(s)
            .map(AddressId)
            .map_err(|e| AddressIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AddressId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create an address. Carries no owner.
#[derive(Debug, Clone)]
pub struct CreateAddressCommand {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub country: String,
}

impl CreateAddressCommand {
    /// Check the fields an address cannot do without.
    ///
    /// # Errors
    /// * `MissingField` - street, city or country is blank
    pub fn validate(&self) -> Result<(), AddressError> {
        require("street", &self.street)?;
        require("city", &self.city)?;
        require("country", &self.country)
    }
}

/// Partial update of an address. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAddressCommand {
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl UpdateAddressCommand {
    /// Apply the present fields to `address`.
    ///
    /// # Errors
    /// * `MissingField` - street, city or country would become blank
    pub fn apply_to(self, address: &mut Address) -> Result<(), AddressError> {
        if let Some(street) = self.street {
            require("street", &street)?;
            address.street = street;
        }
        if let Some(number) = self.number {
            address.number = number;
        }
        if let Some(complement) = self.complement {
            address.complement = Some(complement);
        }
        if let Some(city) = self.city {
            require("city", &city)?;
            address.city = city;
        }
        if let Some(state) = self.state {
            address.state = state;
        }
        if let Some(zipcode) = self.zipcode {
            address.zipcode = zipcode;
        }
        if let Some(country) = self.country {
            require("country", &country)?;
            address.country = country;
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AddressError> {
    if value.trim().is_empty() {
        Err(AddressError::MissingField(field))
    } else {
        Ok(())
    }
}
