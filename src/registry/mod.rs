// Extension registry: composes the static extension definitions into the
// route table, sidebar tree and view resolver.

pub mod flags;
pub mod service;
pub mod types;

pub use flags::{parse_flag_value, FeatureFlag};
pub use service::Registry;
pub use types::*;

use std::sync::{Arc, RwLock};

use crate::extensions;

// Process-wide registry cache. Flags are read from the environment at
// construction time, so tests mutate the environment and then reset this.
static SHARED: RwLock<Option<Arc<Registry>>> = RwLock::new(None);

/// The process-wide registry, built on first use from the static extension
/// definitions. Independent registries remain available through
/// `Registry::from_extensions`.
pub fn shared_registry() -> Arc<Registry> {
    {
        let guard = SHARED.read().unwrap_or_else(|e| e.into_inner());
        if let Some(registry) = guard.as_ref() {
            return Arc::clone(registry);
        }
    }

    let mut guard = SHARED.write().unwrap_or_else(|e| e.into_inner());
    if let Some(registry) = guard.as_ref() {
        return Arc::clone(registry);
    }
    let built = Arc::new(Registry::from_extensions(extensions::definitions()));
    *guard = Some(Arc::clone(&built));
    built
}

/// Drop the cached registry so the next access rebuilds it. Test hook for
/// suites that change flag environment variables.
pub fn reset_registry_cache() {
    let mut guard = SHARED.write().unwrap_or_else(|e| e.into_inner());
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch flag environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn shared_registry_is_cached_until_reset() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        reset_registry_cache();

        let first = shared_registry();
        let second = shared_registry();
        assert!(Arc::ptr_eq(&first, &second));

        reset_registry_cache();
        let third = shared_registry();
        assert!(!Arc::ptr_eq(&first, &third));
        reset_registry_cache();
    }

    #[test]
    fn flag_env_changes_apply_after_reset() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        std::env::remove_var("PORTAL_FEATURE_CLOUD_ACTIONS");
        reset_registry_cache();
        let registry = shared_registry();
        let actions = registry.get_route("/cloud_iac/actions").expect("route");
        assert!(!actions.enabled, "cloud actions default off");

        std::env::set_var("PORTAL_FEATURE_CLOUD_ACTIONS", "on");
        // Still the cached build until an explicit reset
        let cached = shared_registry();
        assert!(!cached.get_route("/cloud_iac/actions").expect("route").enabled);

        reset_registry_cache();
        let rebuilt = shared_registry();
        assert!(rebuilt.get_route("/cloud_iac/actions").expect("route").enabled);

        std::env::remove_var("PORTAL_FEATURE_CLOUD_ACTIONS");
        reset_registry_cache();
    }
}
