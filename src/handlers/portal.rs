use axum::{
    extract::{Path, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use serde_json::{json, Value};

use super::AppState;
use crate::access::DenyReason;
use crate::error::ApiError;
use crate::guard::{self, GuardOutcome};
use crate::middleware::{ApiResponse, CurrentUser};
use crate::toggles;

/// GET /api/navigation/sidebar - grouped, ordered navigation links.
/// Disabled items are included with `disabled: true` so the UI can grey
/// them out; release channels surface as badges.
pub async fn sidebar(State(state): State<AppState>) -> ApiResponse<Value> {
    let sections: Vec<Value> = state
        .registry
        .sidebar()
        .iter()
        .map(|section| {
            let items: Vec<Value> = section
                .items
                .iter()
                .map(|item| {
                    let info = state
                        .registry
                        .get_route(&item.path)
                        .map(|route| toggles::feature_toggle_info(route.toggle_section, &item.path));
                    json!({
                        "path": item.path,
                        "label": item.label,
                        "disabled": item.disabled
                            || info.map(|i| !i.enabled).unwrap_or(false),
                        "order": item.order,
                        "channel": info.and_then(|i| i.channel),
                    })
                })
                .collect();
            json!({
                "id": section.id,
                "title": section.title,
                "order": section.order,
                "items": items,
            })
        })
        .collect();

    ApiResponse::success(json!({ "sections": sections }))
}

/// GET /api/session/whoami - echo of the resolved session
pub async fn whoami(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResponse<Value> {
    match user {
        Some(user) => ApiResponse::success(json!({
            "authenticated": true,
            "user": user,
        })),
        None => ApiResponse::success(json!({
            "authenticated": false,
            "role": "guest",
        })),
    }
}

/// Fallback handler for guarded page navigation. Denials redirect (303) the
/// way the dashboard shell expects; gated and unknown surfaces are 404.
pub async fn page(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    uri: Uri,
) -> Response {
    let path = uri.path();

    match guard::evaluate(&state.registry, path, user.as_ref()) {
        GuardOutcome::NotFound | GuardOutcome::Disabled => {
            ApiError::not_found(format!("No page at '{}'", path)).into_response()
        }
        GuardOutcome::Redirect { to, .. } => Redirect::to(&to).into_response(),
        GuardOutcome::Allow { route, decision } => {
            match state.registry.resolve_view(route.path).await {
                Ok(view) => ApiResponse::success(json!({
                    "view": view,
                    "route": {
                        "path": route.path,
                        "label": route.label,
                        "extension": route.extension_id,
                    },
                    "access": {
                        "role": decision.user_role,
                        "tenant_id": decision.tenant_id,
                    }
                }))
                .into_response(),
                Err(e) => ApiError::from(e).into_response(),
            }
        }
    }
}

/// GET /api/pages/*path - page data for client-side navigation. Same guard
/// pipeline as `page`, but denials come back as status codes instead of
/// redirects.
pub async fn page_data(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(path): Path<String>,
) -> Response {
    let path = format!("/{}", path.trim_start_matches('/'));

    match guard::evaluate(&state.registry, &path, user.as_ref()) {
        GuardOutcome::NotFound | GuardOutcome::Disabled => {
            ApiError::not_found(format!("No page at '{}'", path)).into_response()
        }
        GuardOutcome::Redirect { reason, .. } => match reason {
            DenyReason::Unauthenticated => {
                ApiError::unauthorized("Sign in to view this page").into_response()
            }
            DenyReason::Forbidden => {
                ApiError::forbidden("You do not have access to this page").into_response()
            }
        },
        GuardOutcome::Allow { route, decision } => {
            match state.registry.resolve_view(route.path).await {
                Ok(view) => ApiResponse::success(json!({
                    "view": view,
                    "route": {
                        "path": route.path,
                        "label": route.label,
                        "extension": route.extension_id,
                    },
                    "access": {
                        "role": decision.user_role,
                        "tenant_id": decision.tenant_id,
                    }
                }))
                .into_response(),
                Err(e) => ApiError::from(e).into_response(),
            }
        }
    }
}
