// Tenant administration. Admin role throughout; forbidden visitors land
// back on the dashboard home rather than the login page.

use serde_json::json;

use crate::access::AccessRule;
use crate::registry::{
    ExtensionDef, FeatureFlag, PageView, RedirectTargets, RouteDef, SidebarPlacement, ViewFuture,
};
use crate::toggles::ToggleSection;

const TENANT_ADMIN: FeatureFlag =
    FeatureFlag::new("tenant-admin", "PORTAL_FEATURE_TENANT_ADMIN", true);

pub fn extension() -> ExtensionDef {
    ExtensionDef {
        id: "admin",
        title: "Tenant Admin",
        toggle_section: ToggleSection::AppModules,
        feature_flag: Some(TENANT_ADMIN),
        routes: vec![
            RouteDef {
                guard: Some(AccessRule::for_roles(&["admin"])),
                sidebar: Some(SidebarPlacement::in_section("Administration", 1)),
                redirect: Some(RedirectTargets {
                    unauthenticated: Some("/login"),
                    forbidden: Some("/"),
                }),
                ..RouteDef::page("/admin/tenants", "Tenants", tenants_view)
            },
            RouteDef {
                guard: Some(AccessRule::for_roles(&["admin"]).with_permissions(&["tenant:manage"])),
                sidebar: Some(SidebarPlacement::in_section("Administration", 2)),
                redirect: Some(RedirectTargets {
                    unauthenticated: Some("/login"),
                    forbidden: Some("/"),
                }),
                ..RouteDef::page("/admin/members", "Members", members_view)
            },
        ],
    }
}

fn tenants_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "admin.tenants".to_string(),
            title: "Tenants".to_string(),
            payload: json!({
                "tenants": [
                    { "id": "acme", "name": "Acme Corp", "plan": "team", "seats_used": 18 },
                    { "id": "globex", "name": "Globex", "plan": "enterprise", "seats_used": 204 }
                ]
            }),
        })
    })
}

fn members_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "admin.members".to_string(),
            title: "Members".to_string(),
            payload: json!({
                "members": [
                    { "email": "ops@acme.example", "role": "admin" },
                    { "email": "editor@acme.example", "role": "user" }
                ],
                "pending_invites": 2
            }),
        })
    })
}
