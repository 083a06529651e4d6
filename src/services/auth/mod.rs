pub mod authenticator;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod key;
pub mod token;

pub use authenticator::Authenticator;
pub use claims::{Audience, ClaimSet, ClaimsPolicy};
pub use error::AuthError;
pub use key::{KeyError, KeyFamily, VerificationKey};
pub use token::TokenVerifier;
