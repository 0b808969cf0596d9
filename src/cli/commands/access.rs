use anyhow::bail;
use serde_json::json;
use uuid::Uuid;

use crate::access::Role;
use crate::cli::OutputFormat;
use crate::guard::{self, GuardOutcome};
use crate::registry;
use crate::session::SessionUser;

pub async fn handle(
    path: &str,
    role: Option<&str>,
    permissions: Vec<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let user = match role {
        None | Some("guest") => None,
        Some(raw) => match Role::parse(raw) {
            Some(role) => Some(SessionUser {
                id: Uuid::new_v4(),
                role,
                permissions,
                tenant_id: None,
                tenants: vec![],
            }),
            None => bail!("unknown role '{}' (expected guest, user, operator or admin)", raw),
        },
    };

    let registry = registry::shared_registry();
    let outcome = guard::evaluate(&registry, path, user.as_ref());

    let (verdict, detail) = match &outcome {
        GuardOutcome::NotFound => ("not_found", json!({})),
        GuardOutcome::Disabled => ("disabled", json!({})),
        GuardOutcome::Redirect { to, reason } => {
            ("redirect", json!({ "to": to, "reason": reason }))
        }
        GuardOutcome::Allow { route, decision } => (
            "allow",
            json!({ "route": route.path, "role": decision.user_role }),
        ),
    };

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "path": path,
                    "verdict": verdict,
                    "detail": detail,
                }))?
            );
        }
        OutputFormat::Text => match &outcome {
            GuardOutcome::NotFound => println!("{}: no registered route", path),
            GuardOutcome::Disabled => println!("{}: disabled", path),
            GuardOutcome::Redirect { to, reason } => {
                println!("{}: denied ({:?}), redirect to {}", path, reason, to)
            }
            GuardOutcome::Allow { route, decision } => println!(
                "{}: allowed via {} as {}",
                path,
                route.path,
                decision.user_role.as_str()
            ),
        },
    }

    Ok(())
}
