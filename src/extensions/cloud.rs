// Cloud IaC catalog. The catalog itself is browsable by guests; triggering
// GitOps actions is admin-only and ships behind an off-by-default flag.

use serde_json::json;

use crate::access::AccessRule;
use crate::registry::{
    ExtensionDef, FeatureFlag, MatchStrategy, PageView, RedirectTargets, RouteDef,
    SidebarPlacement, ViewFuture,
};
use crate::toggles::ToggleSection;

const CLOUD_IAC: FeatureFlag = FeatureFlag::new("cloud-iac", "PORTAL_FEATURE_CLOUD_IAC", true);
const CLOUD_ACTIONS: FeatureFlag =
    FeatureFlag::new("cloud-actions", "PORTAL_FEATURE_CLOUD_ACTIONS", false);

pub fn extension() -> ExtensionDef {
    ExtensionDef {
        id: "cloud_iac",
        title: "Cloud IaC",
        toggle_section: ToggleSection::AppModules,
        feature_flag: Some(CLOUD_IAC),
        routes: vec![
            RouteDef {
                match_strategy: MatchStrategy::StartsWith,
                description: Some("Browse infrastructure stack catalogs per provider"),
                sidebar: Some(SidebarPlacement::in_section("Infrastructure", 1)),
                ..RouteDef::page("/cloud_iac", "IaC Catalog", catalog_view)
            },
            RouteDef {
                feature_flag: Some(CLOUD_ACTIONS),
                description: Some("Trigger GitOps pipeline runs against a stack"),
                guard: Some(AccessRule::for_roles(&["admin"]).with_permissions(&["gitops:trigger"])),
                sidebar: Some(SidebarPlacement::in_section("Infrastructure", 2)),
                redirect: Some(RedirectTargets {
                    unauthenticated: None,
                    forbidden: Some("/cloud_iac"),
                }),
                ..RouteDef::page("/cloud_iac/actions", "GitOps Actions", actions_view)
            },
        ],
    }
}

fn catalog_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "cloud.catalog".to_string(),
            title: "IaC Catalog".to_string(),
            payload: json!({
                "providers": ["aws", "gcp", "azure"],
                "stacks": [
                    { "name": "vpc-baseline", "provider": "aws", "modules": 7 },
                    { "name": "gke-standard", "provider": "gcp", "modules": 5 },
                    { "name": "aks-ingress", "provider": "azure", "modules": 4 }
                ]
            }),
        })
    })
}

fn actions_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "cloud.actions".to_string(),
            title: "GitOps Actions".to_string(),
            payload: json!({
                "actions": ["plan", "apply", "destroy"],
                "recent_runs": []
            }),
        })
    })
}
