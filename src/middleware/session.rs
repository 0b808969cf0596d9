use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::config;
use crate::handlers::AppState;
use crate::session::SessionUser;

/// Session user resolved once per request and injected as an extension.
/// `None` means the request is a guest.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<SessionUser>);

/// Resolves the current user from the configured session provider before the
/// request reaches any handler
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = extract_session_token(request.headers());
    let user = state.session.current_user(token.as_deref()).await;

    if let Some(user) = &user {
        tracing::debug!("Resolved session user {} ({})", user.id, user.role.as_str());
    }

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

/// Session cookie first, Bearer token as a fallback for API clients
fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_name = &config::config().account.session_cookie;

    if let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        for pair in cookies.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(cookie_name.as_str()) {
                if let Some(value) = parts.next() {
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, value.parse().expect("header value"));
        headers
    }

    #[test]
    fn reads_the_configured_session_cookie() {
        let cookie = format!(
            "other=1; {}=tok-123; trailing=x",
            config::config().account.session_cookie
        );
        let headers = headers_with(header::COOKIE, &cookie);
        assert_eq!(extract_session_token(&headers).as_deref(), Some("tok-123"));
    }

    #[test]
    fn falls_back_to_bearer_token() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer tok-456");
        assert_eq!(extract_session_token(&headers).as_deref(), Some("tok-456"));
    }

    #[test]
    fn empty_tokens_are_treated_as_absent() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer    ");
        assert_eq!(extract_session_token(&headers), None);
        assert_eq!(extract_session_token(&HeaderMap::new()), None);
    }
}
