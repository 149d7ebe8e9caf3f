//! In-memory procedure registry.
//!
//! A plain name → endpoint map behind a mutex. Entries live for the binder
//! process lifetime: there is no TTL, no de-registration and no
//! authentication. Re-registering a name silently overwrites the previous
//! entry, which is how a restarted chat server takes over its own names.

use std::collections::HashMap;

use tokio::sync::Mutex;

use parlor_shared::wire::Endpoint;

/// Registry store: procedure name → (host, port)
pub struct RegistryStore {
    entries: Mutex<HashMap<String, Endpoint>>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register a procedure name under an endpoint. Always succeeds; the
    /// entry is visible to lookups as soon as this returns.
    pub async fn register(&self, name: String, endpoint: Endpoint) {
        let mut entries = self.entries.lock().await;
        match entries.insert(name.clone(), endpoint.clone()) {
            Some(previous) => tracing::info!(
                "Procedure '{}' re-registered at {}:{} (was {}:{})",
                name,
                endpoint.host,
                endpoint.port,
                previous.host,
                previous.port
            ),
            None => tracing::info!(
                "Procedure '{}' registered at {}:{}",
                name,
                endpoint.host,
                endpoint.port
            ),
        }
    }

    /// Look up a procedure name. Pure read; `None` when never registered.
    pub async fn lookup(&self, name: &str) -> Option<Endpoint> {
        let entries = self.entries.lock().await;
        entries.get(name).cloned()
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}
