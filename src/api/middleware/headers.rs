//! Security response headers.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;

/// Add hardening headers to every response.
///
/// HSTS is only sent outside debug mode.
pub async fn security_headers(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if !state.config.debug {
        match HeaderValue::from_str(&state.config.security.hsts_header_value()) {
            Ok(value) => {
                headers.insert(header::STRICT_TRANSPORT_SECURITY, value);
            }
            Err(e) => tracing::error!(error = %e, "Invalid HSTS header value"),
        }
    }

    response
}
