use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::address::models::Address;

pub mod create_address;
pub mod delete_address;
pub mod get_address;
pub mod list_addresses;
pub mod update_address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressData {
    pub id: String,
    pub owner_id: String,
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

impl From<&Address> for AddressData {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id.to_string(),
            owner_id: address.owner.to_string(),
            street: address.street.clone(),
            number: address.number.clone(),
            complement: address.complement.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zipcode: address.zipcode.clone(),
            country: address.country.clone(),
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}
