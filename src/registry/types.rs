use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use super::flags::FeatureFlag;
use crate::access::AccessRule;
use crate::toggles::ToggleSection;

/// Resolved view module for a route, shaped for the page envelope
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub id: String,
    pub title: String,
    pub payload: Value,
}

pub type ViewFuture = BoxFuture<'static, anyhow::Result<PageView>>;

/// Lazy view constructor. Invoked only after the registry has confirmed the
/// route is enabled; a disabled feature's view is never built.
pub type ViewLoader = fn() -> ViewFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchStrategy {
    Exact,
    StartsWith,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SidebarPlacement {
    /// Literal section title the route is grouped under
    pub section: &'static str,
    pub order: Option<u32>,
    pub hidden: bool,
}

impl SidebarPlacement {
    pub const fn in_section(section: &'static str, order: u32) -> Self {
        Self {
            section,
            order: Some(order),
            hidden: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RedirectTargets {
    pub unauthenticated: Option<&'static str>,
    pub forbidden: Option<&'static str>,
}

/// Static route declaration inside an extension definition
#[derive(Debug, Clone)]
pub struct RouteDef {
    pub path: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub loader: ViewLoader,
    pub match_strategy: MatchStrategy,
    pub guard: Option<AccessRule>,
    pub sidebar: Option<SidebarPlacement>,
    pub feature_flag: Option<FeatureFlag>,
    pub redirect: Option<RedirectTargets>,
}

impl RouteDef {
    /// Exact-match page with no guard, no flag and no sidebar entry
    pub fn page(path: &'static str, label: &'static str, loader: ViewLoader) -> Self {
        Self {
            path,
            label,
            description: None,
            loader,
            match_strategy: MatchStrategy::Exact,
            guard: None,
            sidebar: None,
            feature_flag: None,
            redirect: None,
        }
    }
}

/// A self-contained bundle of routes composing one navigable surface
#[derive(Debug, Clone)]
pub struct ExtensionDef {
    pub id: &'static str,
    pub title: &'static str,
    /// Toggle tree section governing this extension's paths
    pub toggle_section: ToggleSection,
    pub feature_flag: Option<FeatureFlag>,
    pub routes: Vec<RouteDef>,
}

/// Route as held by the built registry, with enablement derived from the
/// owning extension's flag and the route's own flag. Never enabled when the
/// extension is disabled.
#[derive(Debug, Clone)]
pub struct RegisteredRoute {
    pub path: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub loader: ViewLoader,
    pub match_strategy: MatchStrategy,
    pub guard: Option<AccessRule>,
    pub sidebar: Option<SidebarPlacement>,
    pub redirect: Option<RedirectTargets>,
    pub extension_id: &'static str,
    pub toggle_section: ToggleSection,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarItem {
    pub path: String,
    pub label: String,
    /// Disabled items still render in the sidebar, greyed out
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarSection {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no route registered for '{path}'")]
    UnknownRoute { path: String },
    #[error("route '{path}' is disabled")]
    RouteDisabled { path: String },
    #[error("view for '{path}' failed to load")]
    View {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}
