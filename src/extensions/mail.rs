// Tenant mail client. Everything here requires a login; sending and
// settings are gated further by permission and role.

use serde_json::json;

use crate::access::AccessRule;
use crate::registry::{
    ExtensionDef, FeatureFlag, MatchStrategy, PageView, RedirectTargets, RouteDef,
    SidebarPlacement, ViewFuture,
};
use crate::toggles::ToggleSection;

const MAIL: FeatureFlag = FeatureFlag::new("mail", "PORTAL_FEATURE_MAIL", true);
const MAIL_LABS: FeatureFlag = FeatureFlag::new("mail-labs", "PORTAL_FEATURE_MAIL_LABS", false);

pub fn extension() -> ExtensionDef {
    ExtensionDef {
        id: "mail",
        title: "Mail",
        toggle_section: ToggleSection::AppModules,
        feature_flag: Some(MAIL),
        routes: vec![
            RouteDef {
                match_strategy: MatchStrategy::StartsWith,
                description: Some("Folder listing and message threads"),
                guard: Some(AccessRule::logged_in()),
                sidebar: Some(SidebarPlacement::in_section("Workspace", 1)),
                ..RouteDef::page("/mail", "Inbox", inbox_view)
            },
            RouteDef {
                guard: Some(AccessRule::logged_in().with_permissions(&["mail:send"])),
                sidebar: Some(SidebarPlacement::in_section("Workspace", 2)),
                ..RouteDef::page("/mail/compose", "Compose", compose_view)
            },
            RouteDef {
                guard: Some(AccessRule::for_roles(&["operator", "admin"])),
                sidebar: Some(SidebarPlacement::in_section("Workspace", 8)),
                redirect: Some(RedirectTargets {
                    unauthenticated: None,
                    forbidden: Some("/mail"),
                }),
                ..RouteDef::page("/mail/settings", "Mail Settings", settings_view)
            },
            RouteDef {
                feature_flag: Some(MAIL_LABS),
                guard: Some(AccessRule::logged_in()),
                sidebar: Some(SidebarPlacement {
                    section: "Workspace",
                    order: Some(9),
                    hidden: true,
                }),
                ..RouteDef::page("/mail/labs", "Mail Labs", labs_view)
            },
        ],
    }
}

fn inbox_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "mail.inbox".to_string(),
            title: "Inbox".to_string(),
            payload: json!({
                "folders": ["inbox", "sent", "archive", "spam"],
                "threads": [
                    {
                        "id": "thr_9f2c",
                        "subject": "Quarterly capacity review",
                        "from": "ops@acme.example",
                        "unread": true,
                        "received_at": "2026-07-30T08:12:00Z"
                    },
                    {
                        "id": "thr_4b11",
                        "subject": "Welcome to Nimbus Mail",
                        "from": "onboarding@nimbus.example",
                        "unread": false,
                        "received_at": "2026-07-28T15:40:00Z"
                    }
                ]
            }),
        })
    })
}

fn compose_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "mail.compose".to_string(),
            title: "Compose".to_string(),
            payload: json!({
                "draft": { "to": [], "subject": "", "body": "" },
                "signatures": ["default"]
            }),
        })
    })
}

fn settings_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "mail.settings".to_string(),
            title: "Mail Settings".to_string(),
            payload: json!({
                "retention_days": 365,
                "forwarding_enabled": false,
                "spam_threshold": "standard"
            }),
        })
    })
}

fn labs_view() -> ViewFuture {
    Box::pin(async {
        Ok(PageView {
            id: "mail.labs".to_string(),
            title: "Mail Labs".to_string(),
            payload: json!({
                "experiments": ["thread-summaries", "snooze"]
            }),
        })
    })
}
