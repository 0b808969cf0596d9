// Page-level route guard: matches the request path against the registry,
// checks structural toggles and route enablement, then evaluates the
// route's access rule for the current user.

use crate::access::{resolve_access, AccessDecision, DenyReason};
use crate::registry::{MatchStrategy, RegisteredRoute, Registry};
use crate::session::SessionUser;
use crate::toggles::{self, FeatureToggleConfig};

pub const DEFAULT_LOGIN_REDIRECT: &str = "/login";

#[derive(Debug)]
pub enum GuardOutcome<'a> {
    /// No registered route matches the path
    NotFound,
    /// The route exists but a toggle or feature flag turned it off
    Disabled,
    /// Access denied; the caller should redirect
    Redirect { to: String, reason: DenyReason },
    Allow {
        route: &'a RegisteredRoute,
        decision: AccessDecision,
    },
}

/// Find the route governing `path`: an exact registration wins, otherwise
/// the longest `startsWith` route whose path is a segment-boundary prefix.
pub fn match_route<'a>(registry: &'a Registry, path: &str) -> Option<&'a RegisteredRoute> {
    let path = normalize(path);

    if let Some(route) = registry.get_route(path) {
        return Some(route.as_ref());
    }

    registry
        .routes()
        .iter()
        .filter(|r| r.match_strategy == MatchStrategy::StartsWith && is_segment_prefix(r.path, path))
        .max_by_key(|r| r.path.len())
        .map(|r| r.as_ref())
}

pub fn evaluate<'a>(
    registry: &'a Registry,
    path: &str,
    user: Option<&SessionUser>,
) -> GuardOutcome<'a> {
    evaluate_with(registry, toggles::toggle_config(), path, user)
}

/// Like `evaluate`, but against an explicit toggle tree
pub fn evaluate_with<'a>(
    registry: &'a Registry,
    toggle_config: &FeatureToggleConfig,
    path: &str,
    user: Option<&SessionUser>,
) -> GuardOutcome<'a> {
    let Some(route) = match_route(registry, path) else {
        return GuardOutcome::NotFound;
    };

    // Structural enablement first, then the route's own derived flag state
    if !toggle_config.resolve(route.toggle_section, path).enabled {
        return GuardOutcome::Disabled;
    }
    if !route.enabled {
        return GuardOutcome::Disabled;
    }

    let decision = resolve_access(user, route.guard.as_ref());
    if decision.allowed {
        return GuardOutcome::Allow { route, decision };
    }

    let reason = decision.reason.unwrap_or(DenyReason::Forbidden);
    let target = match reason {
        DenyReason::Unauthenticated => route.redirect.as_ref().and_then(|r| r.unauthenticated),
        DenyReason::Forbidden => route.redirect.as_ref().and_then(|r| r.forbidden),
    }
    .unwrap_or(DEFAULT_LOGIN_REDIRECT);

    tracing::debug!(
        "Access denied for {} ({:?}), redirecting to {}",
        path,
        reason,
        target
    );

    GuardOutcome::Redirect {
        to: target.to_string(),
        reason,
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    path == prefix
        || (path.starts_with(prefix) && path.as_bytes().get(prefix.len()) == Some(&b'/'))
}
