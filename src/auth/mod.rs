//! Authentication Module
//! Mission: Session tokens, revocation, and the guard in front of
//! protected routes

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod revocation;

pub use api::{auth_router, AuthState};
pub use jwt::{TokenError, TokenService};
pub use middleware::auth_middleware;
pub use revocation::{InMemoryRevocationStore, RevocationStore};
