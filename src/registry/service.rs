use std::collections::HashMap;
use std::sync::Arc;

use super::types::{
    ExtensionDef, PageView, RegisteredRoute, RegistryError, SidebarItem, SidebarSection,
};

const ORDER_SENTINEL: u32 = u32::MAX;

/// Immutable route table, sidebar tree and view resolver built once from the
/// static extension definitions. Construction is pure and idempotent; build
/// as many independent registries as needed.
pub struct Registry {
    routes: Vec<Arc<RegisteredRoute>>,
    by_path: HashMap<&'static str, Arc<RegisteredRoute>>,
    sidebar: Vec<SidebarSection>,
}

impl Registry {
    pub fn from_extensions(extensions: Vec<ExtensionDef>) -> Self {
        let mut routes: Vec<Arc<RegisteredRoute>> = Vec::new();

        for extension in extensions {
            let extension_enabled = extension
                .feature_flag
                .as_ref()
                .map(|flag| flag.resolve())
                .unwrap_or(true);

            for route in extension.routes {
                let flag_enabled = route
                    .feature_flag
                    .as_ref()
                    .map(|flag| flag.resolve())
                    .unwrap_or(true);

                routes.push(Arc::new(RegisteredRoute {
                    path: route.path,
                    label: route.label,
                    description: route.description,
                    loader: route.loader,
                    match_strategy: route.match_strategy,
                    guard: route.guard,
                    sidebar: route.sidebar,
                    redirect: route.redirect,
                    extension_id: extension.id,
                    toggle_section: extension.toggle_section,
                    enabled: extension_enabled && flag_enabled,
                }));
            }
        }

        // First registration wins on path collision. Uniqueness is enforced
        // at definition time; a duplicate here is a definition bug, not a
        // lookup-time concern.
        let mut by_path: HashMap<&'static str, Arc<RegisteredRoute>> = HashMap::new();
        for route in &routes {
            if by_path.contains_key(route.path) {
                tracing::debug!("Ignoring duplicate route registration for {}", route.path);
                continue;
            }
            by_path.insert(route.path, Arc::clone(route));
        }

        let sidebar = build_sidebar(&routes);

        Self {
            routes,
            by_path,
            sidebar,
        }
    }

    /// All routes in declaration order, including disabled ones
    pub fn routes(&self) -> &[Arc<RegisteredRoute>] {
        &self.routes
    }

    /// Exact path lookup. Pattern matching against `match_strategy` is the
    /// guard consumer's job, not the registry's.
    pub fn get_route(&self, path: &str) -> Option<&Arc<RegisteredRoute>> {
        self.by_path.get(path)
    }

    pub fn sidebar(&self) -> &[SidebarSection] {
        &self.sidebar
    }

    /// Resolve the view for a registered path. This is the single point that
    /// keeps a disabled feature's view from ever being constructed, even for
    /// callers that bypass the page-level guard.
    pub async fn resolve_view(&self, path: &str) -> Result<PageView, RegistryError> {
        let route = self
            .by_path
            .get(path)
            .ok_or_else(|| RegistryError::UnknownRoute {
                path: path.to_string(),
            })?;

        if !route.enabled {
            return Err(RegistryError::RouteDisabled {
                path: path.to_string(),
            });
        }

        (route.loader)().await.map_err(|source| RegistryError::View {
            path: path.to_string(),
            source,
        })
    }
}

fn build_sidebar(routes: &[Arc<RegisteredRoute>]) -> Vec<SidebarSection> {
    let mut sections: Vec<SidebarSection> = Vec::new();

    for route in routes {
        let Some(placement) = &route.sidebar else {
            continue;
        };
        if placement.hidden {
            continue;
        }

        let item = SidebarItem {
            path: route.path.to_string(),
            label: route.label.to_string(),
            disabled: !route.enabled,
            order: placement.order,
        };

        match sections.iter_mut().find(|s| s.title == placement.section) {
            Some(section) => section.items.push(item),
            None => sections.push(SidebarSection {
                id: slugify(placement.section),
                title: placement.section.to_string(),
                order: None,
                items: vec![item],
            }),
        }
    }

    for section in &mut sections {
        // Section order is the smallest item order it contains
        section.order = section.items.iter().filter_map(|i| i.order).min();
        section
            .items
            .sort_by(|a, b| sort_key(a.order, &a.label).cmp(&sort_key(b.order, &b.label)));
    }

    sections.sort_by(|a, b| sort_key(a.order, &a.title).cmp(&sort_key(b.order, &b.title)));
    sections
}

/// Missing orders sort last; ties break on case-folded text
fn sort_key(order: Option<u32>, text: &str) -> (u32, String) {
    (order.unwrap_or(ORDER_SENTINEL), text.to_lowercase())
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
