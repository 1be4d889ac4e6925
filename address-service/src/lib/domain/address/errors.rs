use thiserror::Error;

/// Error for AddressId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressIdError {
    #[error("Invalid address ID: {0}")]
    InvalidFormat(String),
}

/// Top-level error for address operations
#[derive(Debug, Clone, Error)]
pub enum AddressError {
    #[error(transparent)]
    InvalidAddressId(#[from] AddressIdError),

    #[error("Field '{0}' must not be empty")]
    MissingField(&'static str),

    /// Absent, or owned by someone else: the two are never distinguished.
    #[error("Address not found")]
    NotFound,

    /// The owning account no longer exists.
    #[error("Owner not found")]
    OwnerNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
