// Declarative route guards and the access decision function.
//
// Rules are plain data attached to routes at registration time. Evaluation
// is a pure function over the rule and the (possibly absent) session user;
// a denial is a decision with a reason, never an error.

use serde::{Deserialize, Serialize};

use crate::session::{SessionUser, TenantMembership};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    User,
    Operator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Operator => "operator",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "guest" => Some(Role::Guest),
            "user" => Some(Role::User),
            "operator" => Some(Role::Operator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Authorization requirements for a route. All fields are optional; the
/// evaluator derives `allow_guests` and `require_login` when unset. Roles and
/// permissions are kept as strings so garbage from configuration can be
/// dropped during normalization instead of locking everyone out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_login: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_guests: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl AccessRule {
    /// Any authenticated user. Both fields are set: a login requirement
    /// alone does not beat the derived guest allowance.
    pub fn logged_in() -> Self {
        Self {
            require_login: Some(true),
            allow_guests: Some(false),
            ..Default::default()
        }
    }

    pub fn for_roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_permissions(mut self, permissions: &[&str]) -> Self {
        self.permissions = permissions.iter().map(|p| p.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenyReason {
    Unauthenticated,
    Forbidden,
}

/// Outcome of evaluating a rule against the current user. Computed fresh on
/// every call and cheap enough to evaluate per request.
#[derive(Debug, Clone, Serialize)]
pub struct AccessDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenyReason>,
    pub user_role: Role,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_tenants: Vec<TenantMembership>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Unknown role strings are dropped silently; order is preserved
fn normalize_roles(raw: &[String]) -> Vec<Role> {
    let mut roles = Vec::new();
    for entry in raw {
        if let Some(role) = Role::parse(entry) {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
    }
    roles
}

/// Trim, drop empties, dedupe; order is preserved
fn normalize_permissions(raw: &[String]) -> Vec<String> {
    let mut permissions: Vec<String> = Vec::new();
    for entry in raw {
        let trimmed = entry.trim();
        if !trimmed.is_empty() && !permissions.iter().any(|p| p == trimmed) {
            permissions.push(trimmed.to_string());
        }
    }
    permissions
}

pub fn resolve_access(user: Option<&SessionUser>, rule: Option<&AccessRule>) -> AccessDecision {
    let default_rule = AccessRule::default();
    let rule = rule.unwrap_or(&default_rule);

    let roles = normalize_roles(&rule.roles);
    let permissions = normalize_permissions(&rule.permissions);
    let role_restricted = !roles.is_empty();

    let allow_guests = rule
        .allow_guests
        .unwrap_or(!role_restricted || roles.contains(&Role::Guest));
    let requires_login = rule.require_login.unwrap_or(
        !allow_guests
            || !permissions.is_empty()
            || (role_restricted && !roles.contains(&Role::Guest)),
    );

    let authenticated = user.is_some();
    let effective_role = user.map(|u| u.role).unwrap_or(Role::Guest);

    let deny = |reason: DenyReason| AccessDecision {
        allowed: false,
        reason: Some(reason),
        user_role: effective_role,
        user_tenants: user.map(|u| u.tenants.clone()).unwrap_or_default(),
        tenant_id: user.and_then(|u| u.tenant_id.clone()),
    };

    // Fail fast on identity before failing on authorization
    if !authenticated && requires_login && !allow_guests {
        return deny(DenyReason::Unauthenticated);
    }

    if role_restricted && !roles.contains(&effective_role) {
        let reason = if !authenticated && allow_guests {
            DenyReason::Unauthenticated
        } else {
            DenyReason::Forbidden
        };
        return deny(reason);
    }

    if !permissions.is_empty() {
        let held: &[String] = user.map(|u| u.permissions.as_slice()).unwrap_or(&[]);
        let missing = permissions.iter().any(|required| !held.contains(required));
        if missing {
            let reason = if authenticated {
                DenyReason::Forbidden
            } else {
                DenyReason::Unauthenticated
            };
            return deny(reason);
        }
    }

    AccessDecision {
        allowed: true,
        reason: None,
        user_role: effective_role,
        user_tenants: user.map(|u| u.tenants.clone()).unwrap_or_default(),
        tenant_id: user.and_then(|u| u.tenant_id.clone()),
    }
}
