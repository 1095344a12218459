//! Apex Auth Gateway Library
//!
//! Thin HTTP gateway in front of a remote identity provider. Sanitizes
//! credentials, forwards them upstream, and issues/verifies/revokes the
//! JWTs that guard protected routes.

pub mod auth;
pub mod config;
pub mod middleware;
pub mod security;
pub mod upstream;
