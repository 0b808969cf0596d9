// Static extension definitions composing the portal's navigable surface.
// Each module declares one extension: its routes, guards, sidebar placement,
// feature flags and view builders.

pub mod admin;
pub mod cloud;
pub mod mail;
pub mod marketing;
pub mod workshop;

use crate::registry::{ExtensionDef, FeatureFlag};

/// All extensions in declaration order. Order matters: the registry lets the
/// first registration win on path collisions.
pub fn definitions() -> Vec<ExtensionDef> {
    vec![
        marketing::extension(),
        mail::extension(),
        cloud::extension(),
        workshop::extension(),
        admin::extension(),
    ]
}

/// Every feature flag the definitions carry, for operator tooling
pub fn feature_flags() -> Vec<FeatureFlag> {
    let mut flags = Vec::new();
    for extension in definitions() {
        if let Some(flag) = extension.feature_flag {
            flags.push(flag);
        }
        for route in extension.routes {
            if let Some(flag) = route.feature_flag {
                flags.push(flag);
            }
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn route_paths_are_unique_across_extensions() {
        let mut seen = HashSet::new();
        for extension in definitions() {
            for route in extension.routes {
                assert!(
                    seen.insert(route.path),
                    "duplicate route path: {}",
                    route.path
                );
            }
        }
    }

    #[test]
    fn flag_env_vars_are_unique() {
        let mut seen = HashSet::new();
        for flag in feature_flags() {
            assert!(seen.insert(flag.env_var), "duplicate env var: {}", flag.env_var);
        }
    }

    #[test]
    fn sidebar_sections_cover_the_dashboard() {
        let registry = crate::registry::Registry::from_extensions(definitions());
        let titles: Vec<&str> = registry.sidebar().iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"Workspace"));
        assert!(titles.contains(&"Infrastructure"));
        assert!(titles.contains(&"Content"));
        assert!(titles.contains(&"Administration"));
    }
}
