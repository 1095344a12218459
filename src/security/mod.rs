//! Input Security Module
//! Mission: Keep hostile input away from the upstream provider

pub mod audit;
pub mod identifier;
pub mod password;
pub mod sanitize;

pub use identifier::{classify_identifier, Identifier};
pub use password::validate_password;
pub use sanitize::{sanitize, RejectedInput};
