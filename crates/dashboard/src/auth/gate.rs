//! The navigation gate itself, run as axum middleware.
//!
//! Decision per request:
//!
//! - public path -> allow
//! - protected path, no `jwt` cookie -> redirect to `/login`
//! - token invalid or expired -> clear cookie + session, redirect to `/login`
//! - role-gated path, insufficient role -> redirect to `/dashboard`
//! - otherwise -> allow, attaching [`CurrentUser`] to the request

use axum::extract::{Request, State};
use axum::http::header::{COOKIE, HeaderName, HeaderValue, SET_COOKIE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use shopdeck_core::Role;

use crate::state::AppState;

/// Name of the cookie the gate inspects.
pub const JWT_COOKIE: &str = "jwt";

/// Paths served without any authentication.
const PUBLIC_PATHS: &[&str] = &["/", "/login", "/forgot-password", "/health"];

/// Path prefixes that require a valid token.
const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/settings"];

/// Path prefixes additionally restricted to the ADMIN role.
const ADMIN_PREFIXES: &[&str] = &[
    "/dashboard/products",
    "/dashboard/customers",
    "/dashboard/orders",
    "/dashboard/users",
    "/dashboard/roles",
];

const X_USER_ID: HeaderName = HeaderName::from_static("x-user-id");
const X_USER_ROLE: HeaderName = HeaderName::from_static("x-user-role");

/// Build a `Set-Cookie` value installing the token cookie.
#[must_use]
pub fn set_jwt_cookie(token: &str) -> String {
    format!("{JWT_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Build a `Set-Cookie` value expiring the token cookie immediately.
#[must_use]
pub fn clear_jwt_cookie() -> String {
    format!("{JWT_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// The gate middleware. Install with `axum::middleware::from_fn_with_state`.
pub async fn authorize(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    if PUBLIC_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let protected = PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p));
    let token = jwt_cookie(&request);

    let Some(token) = token else {
        if protected {
            tracing::debug!(path, "No token on protected path, redirecting to login");
            return Redirect::to("/login").into_response();
        }
        // Unprotected, unlisted path (static assets and the like).
        return next.run(request).await;
    };

    let user = match state.verifier().verify(&token) {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(path, error = %e, "Token verification failed, clearing token");
            // Fail closed: drop both token channels so the next
            // navigation doesn't repeat the failed verification.
            state.session().clear().await;
            return redirect_clearing_cookie("/login");
        }
    };

    if path_is_admin_only(&path) && user.role != Role::Admin {
        tracing::debug!(path, role = %user.role, "Insufficient role, redirecting");
        return Redirect::to("/dashboard").into_response();
    }

    // Forward the derived identity to downstream handlers, the way the
    // original forwarded x-user-* headers.
    if let Ok(value) = HeaderValue::from_str(&user.id) {
        request.headers_mut().insert(X_USER_ID, value);
    }
    request
        .headers_mut()
        .insert(X_USER_ROLE, HeaderValue::from_static(user.role.as_str()));
    request.extensions_mut().insert(user);

    next.run(request).await
}

fn path_is_admin_only(path: &str) -> bool {
    ADMIN_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Extract the `jwt` cookie value from the request, if present.
fn jwt_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == JWT_COOKIE)
        .map(|(_, value)| value.to_string())
}

fn redirect_clearing_cookie(target: &str) -> Response {
    let mut response = Redirect::to(target).into_response();
    if let Ok(value) = HeaderValue::from_str(&clear_jwt_cookie()) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with_cookie(cookie: &str) -> Request {
        Request::builder()
            .uri("/dashboard")
            .header(COOKIE, cookie)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn test_jwt_cookie_extraction() {
        let req = request_with_cookie("theme=dark; jwt=abc.def.ghi; sidebar=open");
        assert_eq!(jwt_cookie(&req).as_deref(), Some("abc.def.ghi"));

        let req = request_with_cookie("theme=dark");
        assert!(jwt_cookie(&req).is_none());
    }

    #[test]
    fn test_admin_prefix_matching() {
        assert!(path_is_admin_only("/dashboard/products"));
        assert!(path_is_admin_only("/dashboard/products/p-1/images"));
        assert!(path_is_admin_only("/dashboard/orders"));
        assert!(!path_is_admin_only("/dashboard"));
        assert!(!path_is_admin_only("/settings"));
    }

    #[test]
    fn test_cookie_helpers() {
        assert_eq!(
            set_jwt_cookie("tok"),
            "jwt=tok; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(clear_jwt_cookie().contains("Max-Age=0"));
    }
}
