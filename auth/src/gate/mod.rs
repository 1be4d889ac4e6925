pub mod errors;
pub mod identity;
pub mod validator;

pub use errors::AuthRejection;
pub use identity::ResolvedIdentity;
pub use validator::AuthGate;
pub use validator::BEARER_PREFIX;
