use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::AddressError;
use super::models::Address;
use super::models::AddressId;
use super::models::CreateAddressCommand;
use super::models::UpdateAddressCommand;
use super::ports::AddressRepository;
use super::ports::AddressServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of AddressServicePort.
///
/// Generic over repository for testability.
pub struct AddressService<AR>
where
    AR: AddressRepository,
{
    address_repository: Arc<AR>,
}

impl<AR> AddressService<AR>
where
    AR: AddressRepository,
{
    pub fn new(address_repository: Arc<AR>) -> Self {
        Self { address_repository }
    }
}

#[async_trait]
impl<AR> AddressServicePort for AddressService<AR>
where
    AR: AddressRepository,
{
    async fn create_address(
        &self,
        owner: UserId,
        command: CreateAddressCommand,
    ) -> Result<Address, AddressError> {
        command.validate()?;

        let now = Utc::now();
        let address = Address {
            id: AddressId::new(),
            owner,
            street: command.street,
            number: command.number,
            complement: command.complement,
            city: command.city,
            state: command.state,
            zipcode: command.zipcode,
            country: command.country,
            created_at: now,
            updated_at: now,
        };

        self.address_repository.create(address).await
    }

    async fn get_address(&self, owner: UserId, id: AddressId) -> Result<Address, AddressError> {
        self.address_repository
            .find_by_id(owner, id)
            .await?
            .ok_or(AddressError::NotFound)
    }

    async fn list_addresses(&self, owner: UserId) -> Result<Vec<Address>, AddressError> {
        self.address_repository.find_by_owner(owner).await
    }

    async fn update_address(
        &self,
        owner: UserId,
        id: AddressId,
        command: UpdateAddressCommand,
    ) -> Result<Address, AddressError> {
        let mut address = self
            .address_repository
            .find_by_id(owner, id)
            .await?
            .ok_or(AddressError::NotFound)?;

        command.apply_to(&mut address)?;
        address.updated_at = Utc::now();

        self.address_repository.update(owner, address).await
    }

    async fn delete_address(&self, owner: UserId, id: AddressId) -> Result<(), AddressError> {
        self.address_repository.delete(owner, id).await
    }
}
