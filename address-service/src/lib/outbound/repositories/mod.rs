pub mod address;
pub mod memory;
pub mod user;

pub use address::PostgresAddressRepository;
pub use memory::InMemoryStore;
pub use user::PostgresUserRepository;
