//! Token Revocation Store
//!
//! The token service depends on this trait rather than on a concrete
//! container, so a multi-process deployment can swap in a shared external
//! store (key-value cache keyed by token with a TTL matching token
//! expiry) without touching the service.

use parking_lot::RwLock;
use std::collections::HashSet;

/// Set of revoked tokens.
///
/// `revoke` is idempotent and never fails for a well-formed string, even
/// one that does not verify. A membership check after an insert from
/// another thread must observe that insert.
pub trait RevocationStore: Send + Sync {
    fn revoke(&self, token: &str);
    fn is_revoked(&self, token: &str) -> bool;
}

/// Process-local revocation set.
///
/// Grow-only: entries are never evicted, not even after the token they
/// name has expired. Inherited limitation; acceptable for a
/// single-process deployment, unbounded memory growth otherwise.
#[derive(Default)]
pub struct InMemoryRevocationStore {
    revoked: RwLock<HashSet<String>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RevocationStore for InMemoryRevocationStore {
    fn revoke(&self, token: &str) {
        self.revoked.write().insert(token.to_string());
    }

    fn is_revoked(&self, token: &str) -> bool {
        self.revoked.read().contains(token)
    }
}
