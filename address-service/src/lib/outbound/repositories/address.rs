use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::address::errors::AddressError;
use crate::domain::address::models::Address;
use crate::domain::address::models::AddressId;
use crate::domain::address::ports::AddressRepository;
use crate::domain::user::models::UserId;

/// PostgreSQL address storage. Every statement carries the owner predicate.
pub struct PostgresAddressRepository {
    pool: PgPool,
}

impl PostgresAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> AddressError {
    AddressError::DatabaseError(e.to_string())
}

fn map_write_error(e: sqlx::Error) -> AddressError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation()
            && db_err.constraint() == Some("addresses_owner_id_fkey")
        {
            return AddressError::OwnerNotFound;
        }
    }
    database_error(e)
}

fn address_from_row(row: &PgRow) -> Result<Address, AddressError> {
    Ok(Address {
        id: AddressId(row.try_get("id").map_err(database_error)?),
        owner: UserId(row.try_get("owner_id").map_err(database_error)?),
        street: row.try_get("street").map_err(database_error)?,
        number: row.try_get("number").map_err(database_error)?,
        complement: row.try_get("complement").map_err(database_error)?,
        city: row.try_get("city").map_err(database_error)?,
        state: row.try_get("state").map_err(database_error)?,
        zipcode: row.try_get("zipcode").map_err(database_error)?,
        country: row.try_get("country").map_err(database_error)?,
        created_at: row.try_get("created_at").map_err(database_error)?,
        updated_at: row.try_get("updated_at").map_err(database_error)?,
    })
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn create(&self, address: Address) -> Result<Address, AddressError> {
        sqlx::query(
            r#"
            INSERT INTO addresses
                (id, owner_id, street, number, complement, city, state, zipcode, country, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(address.id.0)
        .bind(address.owner.0)
        .bind(&address.street)
        .bind(&address.number)
        .bind(&address.complement)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zipcode)
        .bind(&address.country)
        .bind(address.created_at)
        .bind(address.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(address)
    }

    async fn find_by_id(
        &self,
        owner: UserId,
        id: AddressId,
    ) -> Result<Option<Address>, AddressError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, street, number, complement, city, state, zipcode, country, created_at, updated_at
            FROM addresses
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(address_from_row).transpose()
    }

    async fn find_by_owner(&self, owner: UserId) -> Result<Vec<Address>, AddressError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, street, number, complement, city, state, zipcode, country, created_at, updated_at
            FROM addresses
            WHERE owner_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(address_from_row).collect()
    }

    async fn update(&self, owner: UserId, address: Address) -> Result<Address, AddressError> {
        let result = sqlx::query(
            r#"
            UPDATE addresses
            SET street = $3, number = $4, complement = $5, city = $6, state = $7,
                zipcode = $8, country = $9, updated_at = $10
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(address.id.0)
        .bind(owner.0)
        .bind(&address.street)
        .bind(&address.number)
        .bind(&address.complement)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zipcode)
        .bind(&address.country)
        .bind(address.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AddressError::NotFound);
        }

        Ok(address)
    }

    async fn delete(&self, owner: UserId, id: AddressId) -> Result<(), AddressError> {
        let result = sqlx::query(
            r#"
            DELETE FROM addresses
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AddressError::NotFound);
        }

        Ok(())
    }
}
