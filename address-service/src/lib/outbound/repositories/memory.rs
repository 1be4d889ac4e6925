use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::address::errors::AddressError;
use crate::domain::address::models::Address;
use crate::domain::address::models::AddressId;
use crate::domain::address::ports::AddressRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local store implementing both repository ports.
///
/// Mirrors the PostgreSQL schema's constraints: unique email, and owned
/// addresses removed together with their user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    addresses: Arc<RwLock<HashMap<AddressId, Address>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        // Lock order is users then addresses, as in `AddressRepository::create`
        let mut users = self.users.write().await;
        if users.remove(id).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }

        self.addresses
            .write()
            .await
            .retain(|_, address| address.owner != *id);

        Ok(())
    }
}

#[async_trait]
impl AddressRepository for InMemoryStore {
    async fn create(&self, address: Address) -> Result<Address, AddressError> {
        let users = self.users.read().await;
        if !users.contains_key(&address.owner) {
            return Err(AddressError::OwnerNotFound);
        }

        self.addresses
            .write()
            .await
            .insert(address.id, address.clone());
        Ok(address)
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: AddressId,
    ) -> Result<Option<Address>, AddressError> {
        Ok(self
            .addresses
            .read()
            .await
            .get(&id)
            .filter(|address| address.owner == owner)
            .cloned())
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Address>, AddressError> {
        let mut owned: Vec<Address> = self
            .addresses
            .read()
            .await
            .values()
            .filter(|address| address.owner == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|address| address.created_at);

        Ok(owned)
    }

    async fn update(&self, owner: UserId, address: Address) -> Result<Address, AddressError> {
        let mut addresses = self.addresses.write().await;

        match addresses.get_mut(&address.id) {
            Some(stored) if stored.owner == owner => {
                *stored = Address {
                    owner,
                    ..address.clone()
                };
                Ok(Address { owner, ..address })
            }
            _ => Err(AddressError::NotFound),
        }
    }

    async fn delete(&self, owner: UserId, id: AddressId) -> Result<(), AddressError> {
        let mut addresses = self.addresses.write().await;

        let owned = addresses
            .get(&id)
            .is_some_and(|stored| stored.owner == owner);
        if !owned {
            return Err(AddressError::NotFound);
        }

        addresses.remove(&id);
        Ok(())
    }
}
