use std::sync::Arc;

use crate::config::Config;
use crate::entries::store::EntryStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Entry persistence. Default: `PgEntryStore` over the shared connection pool.
    pub store: Arc<dyn EntryStore>,
    pub config: Config,
}
