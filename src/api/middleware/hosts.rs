//! Host and origin checks.
//!
//! Requests must name one of ALLOWED_HOSTS, and state-changing requests
//! sent by a browser must come from the same origin or a trusted one.

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::ALLOW_ANY_HOST;

/// Reject requests whose Host header is not allowed.
pub async fn host_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    match request_host(&request) {
        Some(host) if host_allowed(&state.config.allowed_hosts, &host) => Ok(next.run(request).await),
        host => {
            tracing::warn!(host = ?host, "Rejected request: host not allowed");
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Reject cross-origin POST/PUT/PATCH/DELETE requests.
///
/// Requests without an Origin header (non-browser clients) pass.
pub async fn origin_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if is_unsafe(request.method()) {
        if let Some(origin) = request
            .headers()
            .get(header::ORIGIN)
            .and_then(|h| h.to_str().ok())
        {
            let host = request_host(&request);
            if !origin_allowed(origin, host.as_deref(), &state.config.csrf_trusted_origins) {
                tracing::warn!(origin = %origin, host = ?host, "Rejected cross-origin request");
                return Err(StatusCode::FORBIDDEN);
            }
        }
    }

    Ok(next.run(request).await)
}

fn is_unsafe(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Host header, or the URI authority for HTTP/2 requests.
fn request_host(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
}

/// Host without its port; IPv6 literals keep their brackets.
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.rfind(']') {
        return &host[..=end];
    }

    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}

/// Match a Host header against ALLOWED_HOSTS.
///
/// Entries match exactly (case-insensitive, port ignored); `*` matches
/// anything and a leading dot (`.example.com`) also matches subdomains.
pub fn host_allowed(allowed: &[String], host: &str) -> bool {
    let host = strip_port(host).to_lowercase();
    if host.is_empty() {
        return false;
    }

    allowed.iter().any(|pattern| {
        let pattern = pattern.to_lowercase();
        if pattern == ALLOW_ANY_HOST {
            return true;
        }
        match pattern.strip_prefix('.') {
            Some(domain) => host == domain || host.ends_with(&pattern),
            None => host == pattern,
        }
    })
}

/// Whether an Origin header is the request's own host or a trusted origin.
pub fn origin_allowed(origin: &str, host: Option<&str>, trusted: &[String]) -> bool {
    if trusted.iter().any(|t| t.eq_ignore_ascii_case(origin)) {
        return true;
    }

    let authority = match origin.split_once("://") {
        Some((_, authority)) => authority,
        None => return false,
    };

    host.is_some_and(|host| authority.eq_ignore_ascii_case(host))
}
