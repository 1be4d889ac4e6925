use async_trait::async_trait;

use super::errors::AddressError;
use super::models::Address;
use super::models::AddressId;
use super::models::CreateAddressCommand;
use super::models::UpdateAddressCommand;
use crate::domain::user::models::UserId;

/// Port for address operations.
///
/// Every method takes the caller's `owner` id and only ever sees that owner's
/// records. An address belonging to someone else is reported as `NotFound`.
#[async_trait]
pub trait AddressServicePort: Send + Sync + 'static {
    /// Create an address owned by `owner`.
    ///
    /// # Errors
    /// * `MissingField` - Required field is blank
    /// * `OwnerNotFound` - The owning account no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_address(
        &self,
        owner: UserId,
        command: CreateAddressCommand,
    ) -> Result<Address, AddressError>;

    /// Retrieve one of `owner`'s addresses.
    ///
    /// # Errors
    /// * `NotFound` - No address with this id belongs to `owner`
    async fn get_address(&self, owner: UserId, id: AddressId) -> Result<Address, AddressError>;

    /// List all of `owner`'s addresses, oldest first.
    async fn list_addresses(&self, owner: UserId) -> Result<Vec<Address>, AddressError>;

    /// Apply a partial update to one of `owner`'s addresses.
    ///
    /// # Errors
    /// * `NotFound` - No address with this id belongs to `owner`
    /// * `MissingField` - Required field would become blank
    async fn update_address(
        &self,
        owner: UserId,
        id: AddressId,
        command: UpdateAddressCommand,
    ) -> Result<Address, AddressError>;

    /// Delete one of `owner`'s addresses.
    ///
    /// # Errors
    /// * `NotFound` - No address with this id belongs to `owner`
    async fn delete_address(&self, owner: UserId, id: AddressId) -> Result<(), AddressError>;
}

/// Storage collaborator for addresses. Every lookup and mutation is keyed by
/// `(id, owner)` or by `owner` alone.
#[async_trait]
pub trait AddressRepository: Send + Sync + 'static {
    /// # Errors
    /// * `OwnerNotFound` - `address.owner` names no existing user
    async fn create(&self, address: Address) -> Result<Address, AddressError>;

    async fn find_by_id(
        &self,
        owner: UserId,
        id: AddressId,
    ) -> Result<Option<Address>, AddressError>;

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Address>, AddressError>;

    /// Persist `address` if it exists under `owner`.
    ///
    /// # Errors
    /// * `NotFound` - No row matched `(address.id, owner)`
    async fn update(&self, owner: UserId, address: Address) -> Result<Address, AddressError>;

    /// # Errors
    /// * `NotFound` - No row matched `(id, owner)`
    async fn delete(&self, owner: UserId, id: AddressId) -> Result<(), AddressError>;
}
