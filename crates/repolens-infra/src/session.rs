//! In-memory session store.
//!
//! One bearer token per session id, held in a `DashMap`. Nothing is
//! persisted; a process restart signs everyone out.

use dashmap::DashMap;
use secrecy::SecretString;

use repolens_core::session::TokenStore;

/// Process-local [`TokenStore`] implementation.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: DashMap<String, SecretString>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, sid: &str) -> Option<SecretString> {
        self.entries.get(sid).map(|entry| entry.value().clone())
    }

    fn set(&self, sid: &str, token: SecretString) {
        self.entries.insert(sid.to_string(), token);
    }

    fn clear(&self, sid: &str) {
        self.entries.remove(sid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn set_then_get_returns_the_token() {
        let store = MemoryTokenStore::new();
        store.set("sid-1", SecretString::from("gho_abc"));

        let token = store.get("sid-1").unwrap();
        assert_eq!(token.expose_secret(), "gho_abc");
    }

    #[test]
    fn unknown_session_has_no_token() {
        let store = MemoryTokenStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn clear_removes_the_session() {
        let store = MemoryTokenStore::new();
        store.set("sid-1", SecretString::from("gho_abc"));
        store.clear("sid-1");
        assert!(store.get("sid-1").is_none());

        // Clearing again is a no-op.
        store.clear("sid-1");
    }

    #[test]
    fn set_replaces_an_existing_token() {
        let store = MemoryTokenStore::new();
        store.set("sid-1", SecretString::from("old"));
        store.set("sid-1", SecretString::from("new"));
        assert_eq!(store.get("sid-1").unwrap().expose_secret(), "new");
    }
}
