use poopyrus_db::SharedStore;

use crate::identity::SharedIdentity;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; both handles are `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle, constructed once at startup.
    pub store: SharedStore,
    /// Verifies bearer tokens and forwards password sign-ins.
    pub identity: SharedIdentity,
}
