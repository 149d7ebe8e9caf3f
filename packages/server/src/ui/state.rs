//! Shared application state.

use std::sync::Arc;

use crate::store::ChatStore;

/// State handed to every handler
pub struct AppState {
    /// All chat state behind the store's own lock
    pub store: Arc<ChatStore>,
}
