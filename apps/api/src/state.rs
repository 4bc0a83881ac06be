use std::sync::Arc;

use crate::mailer::Notifier;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistent store behind the collaborator trait so tests can swap in
    /// the in-memory double.
    pub store: Arc<dyn Store>,
    /// Outbound notification collaborator. Best-effort: a failed send never
    /// fails the request that triggered it.
    pub notifier: Arc<dyn Notifier>,
}
