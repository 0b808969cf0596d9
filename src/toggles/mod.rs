// Hierarchical feature toggles keyed by URL path segments.
//
// Toggles are opt-out: a surface missing from the tree is enabled. An
// explicit `enabled: false` disables the whole subtree beneath it, which is
// how experimental or retired surfaces are fenced off without touching the
// extension definitions themselves.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config;

/// Top-level toggle tree sections, one per product surface family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleSection {
    GlobalNavigation,
    AppModules,
    CmsExperience,
}

impl ToggleSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleSection::GlobalNavigation => "globalNavigation",
            ToggleSection::AppModules => "appModules",
            ToggleSection::CmsExperience => "cmsExperience",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "globalNavigation" => Some(ToggleSection::GlobalNavigation),
            "appModules" => Some(ToggleSection::AppModules),
            "cmsExperience" => Some(ToggleSection::CmsExperience),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    Stable,
    Beta,
    Develop,
}

fn default_enabled() -> bool {
    true
}

/// One node in the toggle tree. Children are keyed by path segment; keys of
/// the form `[slug]` / `[...slug]` match any concrete segment, and `*` is a
/// literal wildcard fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureToggleNode {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ReleaseChannel>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, FeatureToggleNode>,
}

impl Default for FeatureToggleNode {
    fn default() -> Self {
        Self {
            enabled: true,
            channel: None,
            children: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureToggleConfig {
    #[serde(default)]
    pub global_navigation: FeatureToggleNode,
    #[serde(default)]
    pub app_modules: FeatureToggleNode,
    #[serde(default)]
    pub cms_experience: FeatureToggleNode,
}

/// Result of resolving a pathname against the tree. `node` is the deepest
/// configured node on the matched path, if any level of it was configured.
#[derive(Debug, Clone, Copy)]
pub struct ToggleResolution<'a> {
    pub enabled: bool,
    pub node: Option<&'a FeatureToggleNode>,
}

/// Enablement plus release channel, shaped for the sidebar API and CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleInfo {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ReleaseChannel>,
}

impl FeatureToggleConfig {
    pub fn section(&self, section: ToggleSection) -> &FeatureToggleNode {
        match section {
            ToggleSection::GlobalNavigation => &self.global_navigation,
            ToggleSection::AppModules => &self.app_modules,
            ToggleSection::CmsExperience => &self.cms_experience,
        }
    }

    /// Walk the tree for `pathname`. Leading/trailing slashes are ignored and
    /// empty segments are dropped, so `/mail//inbox/` resolves like
    /// `mail/inbox`.
    pub fn resolve<'a>(&'a self, section: ToggleSection, pathname: &str) -> ToggleResolution<'a> {
        let segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
        descend(self.section(section), &segments)
    }
}

fn descend<'a>(node: &'a FeatureToggleNode, segments: &[&str]) -> ToggleResolution<'a> {
    // An explicitly disabled node disables everything beneath it, no matter
    // what the children say.
    if !node.enabled {
        return ToggleResolution {
            enabled: false,
            node: Some(node),
        };
    }

    let Some((head, rest)) = segments.split_first() else {
        return ToggleResolution {
            enabled: true,
            node: Some(node),
        };
    };

    // Child selection priority: exact segment, dynamic key, literal `*`.
    // Sibling dynamic keys are ambiguous; BTreeMap iteration makes the
    // lexicographically first one win deterministically.
    let child = node
        .children
        .get(*head)
        .or_else(|| {
            node.children
                .iter()
                .find(|(key, _)| is_dynamic_key(key))
                .map(|(_, child)| child)
        })
        .or_else(|| node.children.get("*"));

    match child {
        Some(child) => descend(child, rest),
        // Remaining path is an unconfigured leaf under an enabled node
        None => ToggleResolution {
            enabled: true,
            node: Some(node),
        },
    }
}

/// Matches child keys of the form `[slug]` or `[...slug]`
fn is_dynamic_key(key: &str) -> bool {
    key.len() > 2 && key.starts_with('[') && key.ends_with(']')
}

const DEFAULT_TOGGLES: &str = include_str!("default_toggles.json");

fn load_toggle_config() -> FeatureToggleConfig {
    if let Some(path) = &config::config().toggles.override_path {
        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str(&raw).map_err(|e| e.to_string()))
        {
            Ok(tree) => {
                tracing::info!("Loaded feature toggle tree from {}", path);
                return tree;
            }
            Err(e) => {
                tracing::warn!(
                    "Could not load feature toggles from '{}', using built-in tree: {}",
                    path,
                    e
                );
            }
        }
    }

    serde_json::from_str(DEFAULT_TOGGLES).unwrap_or_else(|e| {
        // Should never happen; an empty tree keeps every surface enabled
        tracing::error!("Built-in feature toggle tree failed to parse: {}", e);
        FeatureToggleConfig::default()
    })
}

// Loaded once at first use, immutable afterwards
static TOGGLES: Lazy<FeatureToggleConfig> = Lazy::new(load_toggle_config);

pub fn toggle_config() -> &'static FeatureToggleConfig {
    &TOGGLES
}

pub fn is_feature_enabled(section: ToggleSection, pathname: &str) -> bool {
    TOGGLES.resolve(section, pathname).enabled
}

pub fn feature_toggle_info(section: ToggleSection, pathname: &str) -> ToggleInfo {
    let resolution = TOGGLES.resolve(section, pathname);
    ToggleInfo {
        enabled: resolution.enabled,
        channel: resolution.node.and_then(|n| n.channel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(json: serde_json::Value) -> FeatureToggleConfig {
        serde_json::from_value(json).expect("test tree")
    }

    #[test]
    fn missing_paths_are_enabled() {
        let config = FeatureToggleConfig::default();
        assert!(config.resolve(ToggleSection::AppModules, "/anything/at/all").enabled);
        assert!(config.resolve(ToggleSection::GlobalNavigation, "").enabled);
    }

    #[test]
    fn explicit_false_short_circuits_children() {
        let config = tree(serde_json::json!({
            "appModules": {
                "children": {
                    "cloud_iac": {
                        "enabled": false,
                        "children": { "aws": { "enabled": true } }
                    }
                }
            }
        }));
        assert!(!config.resolve(ToggleSection::AppModules, "/cloud_iac/aws").enabled);
        assert!(!config.resolve(ToggleSection::AppModules, "/cloud_iac").enabled);
        assert!(config.resolve(ToggleSection::AppModules, "/mail").enabled);
    }

    #[test]
    fn dynamic_segment_matches_any_literal() {
        let config = tree(serde_json::json!({
            "cmsExperience": {
                "children": {
                    "workshop": {
                        "children": { "[slug]": { "enabled": false } }
                    }
                }
            }
        }));
        assert!(!config.resolve(ToggleSection::CmsExperience, "/workshop/my-post").enabled);
        assert!(!config.resolve(ToggleSection::CmsExperience, "/workshop/another").enabled);
        assert!(config.resolve(ToggleSection::CmsExperience, "/workshop").enabled);
    }

    #[test]
    fn catch_all_key_matches_like_dynamic() {
        let config = tree(serde_json::json!({
            "appModules": {
                "children": {
                    "mail": { "children": { "[...folder]": { "channel": "beta" } } }
                }
            }
        }));
        let info = config.resolve(ToggleSection::AppModules, "/mail/archive");
        assert!(info.enabled);
        assert_eq!(info.node.and_then(|n| n.channel), Some(ReleaseChannel::Beta));
    }

    #[test]
    fn exact_match_beats_dynamic_and_wildcard() {
        let config = tree(serde_json::json!({
            "appModules": {
                "children": {
                    "mail": {
                        "children": {
                            "inbox": { "enabled": false },
                            "[slug]": {},
                            "*": {}
                        }
                    }
                }
            }
        }));
        assert!(!config.resolve(ToggleSection::AppModules, "/mail/inbox").enabled);
        assert!(config.resolve(ToggleSection::AppModules, "/mail/compose").enabled);
    }

    #[test]
    fn wildcard_is_last_resort() {
        let config = tree(serde_json::json!({
            "globalNavigation": {
                "children": {
                    "products": { "children": { "*": { "enabled": false } } }
                }
            }
        }));
        assert!(!config.resolve(ToggleSection::GlobalNavigation, "/products/mail").enabled);
        assert!(config.resolve(ToggleSection::GlobalNavigation, "/products").enabled);
    }

    #[test]
    fn path_normalization_ignores_extra_slashes() {
        let config = tree(serde_json::json!({
            "appModules": {
                "children": { "mail": { "children": { "labs": { "enabled": false } } } }
            }
        }));
        assert!(!config.resolve(ToggleSection::AppModules, "//mail//labs/").enabled);
        assert!(!config.resolve(ToggleSection::AppModules, "mail/labs").enabled);
    }

    #[test]
    fn unconfigured_leaf_reports_nearest_node_channel() {
        let config = tree(serde_json::json!({
            "appModules": {
                "children": { "cloud_iac": { "channel": "beta" } }
            }
        }));
        let resolution = config.resolve(ToggleSection::AppModules, "/cloud_iac/stacks/vpc");
        assert!(resolution.enabled);
        assert_eq!(
            resolution.node.and_then(|n| n.channel),
            Some(ReleaseChannel::Beta)
        );
    }

    #[test]
    fn default_tree_parses_and_disables_legacy_nav() {
        let config: FeatureToggleConfig =
            serde_json::from_str(DEFAULT_TOGGLES).expect("default tree");
        assert!(!config.resolve(ToggleSection::GlobalNavigation, "/legacy/anything").enabled);
        assert!(config.resolve(ToggleSection::AppModules, "/cloud_iac/aws").enabled);
        assert!(!config.resolve(ToggleSection::AppModules, "/mail/labs").enabled);
    }

    #[test]
    fn section_names_round_trip() {
        for section in [
            ToggleSection::GlobalNavigation,
            ToggleSection::AppModules,
            ToggleSection::CmsExperience,
        ] {
            assert_eq!(ToggleSection::parse(section.as_str()), Some(section));
        }
        assert_eq!(ToggleSection::parse("marketing"), None);
    }
}
