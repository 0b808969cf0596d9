// Workshop, the markdown CMS surface. Editing needs the cms:edit
// permission; publishing is held to operators and admins.

use serde_json::json;

use crate::access::AccessRule;
use crate::registry::{
    ExtensionDef, FeatureFlag, MatchStrategy, PageView, RedirectTargets, RouteDef,
    SidebarPlacement, ViewFuture,
};
use crate::toggles::ToggleSection;

const WORKSHOP: FeatureFlag = FeatureFlag::new("workshop", "PORTAL_FEATURE_WORKSHOP", true);

pub fn extension() -> ExtensionDef {
    ExtensionDef {
        id: "workshop",
        title: "Workshop",
        toggle_section: ToggleSection::CmsExperience,
        feature_flag: Some(WORKSHOP),
        routes: vec![
            RouteDef {
                match_strategy: MatchStrategy::StartsWith,
                description: Some("Draft listing and the markdown editor"),
                guard: Some(AccessRule::logged_in().with_permissions(&["cms:edit"])),
                sidebar: Some(SidebarPlacement::in_section("Content", 1)),
                ..RouteDef::page("/workshop", "Workshop", drafts_view)
            },
            RouteDef {
                description: Some("Review and publish approved drafts"),
                guard: Some(
                    AccessRule::for_roles(&["operator", "admin"])
                        .with_permissions(&["cms:publish"]),
                ),
                sidebar: Some(SidebarPlacement::in_section("Content", 2)),
                redirect: Some(RedirectTargets {
                    unauthenticated: None,
                    forbidden: Some("/workshop"),
                }),
                ..RouteDef::page("/workshop/publish", "Publish Queue", publish_view)
            },
        ],
    }
}

fn drafts_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "workshop.drafts".to_string(),
            title: "Workshop".to_string(),
            payload: json!({
                "drafts": [
                    { "slug": "launch-notes-q3", "title": "Q3 Launch Notes", "status": "draft" },
                    { "slug": "mail-migration-guide", "title": "Mail Migration Guide", "status": "review" }
                ],
                "storage": ["local", "remote"]
            }),
        })
    })
}

fn publish_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "workshop.publish".to_string(),
            title: "Publish Queue".to_string(),
            payload: json!({
                "queue": [
                    { "slug": "mail-migration-guide", "approved_by": "content-ops" }
                ]
            }),
        })
    })
}
