// Handler tiers: public endpoints need no session, portal endpoints read
// the session user resolved by the middleware.

pub mod portal;
pub mod public;

use std::sync::Arc;

use crate::registry::Registry;
use crate::session::SessionProvider;

/// Shared state for the portal router
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub session: Arc<dyn SessionProvider>,
}
