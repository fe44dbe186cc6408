//! Integration tests for the HTTP surface.
//!
//! The router runs in-process over the real templates; mail transports are
//! replaced with recording or failing doubles so nothing leaves the machine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use tokio_test::assert_ok;
use tower::ServiceExt;

use personal_site::api::{create_router, AppState};
use personal_site::config::{Config, EmailBackend};
use personal_site::domain::OutboundMessage;
use personal_site::infra::{compose_email, Ack, Mailer, TemplateRenderer, TransportError};
use personal_site::services::ContactManager;

// =============================================================================
// Test Doubles
// =============================================================================

/// Mailer that keeps every message it accepts for delivery
#[derive(Default, Clone)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<Ack, TransportError> {
        // Same header checks as the real backends
        compose_email(message)?;
        self.sent.lock().unwrap().push(message.clone());
        Ok(Ack::new("recorded"))
    }

    fn backend(&self) -> EmailBackend {
        EmailBackend::Console
    }
}

/// Mailer whose relay is unreachable
struct UnreachableMailer;

#[async_trait]
impl Mailer for UnreachableMailer {
    async fn send(&self, _message: &OutboundMessage) -> Result<Ack, TransportError> {
        Err(TransportError::ConnectionFailure(
            "connection refused".to_string(),
        ))
    }

    fn backend(&self) -> EmailBackend {
        EmailBackend::Smtp
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

const TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
const STATIC_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");
const HOST: &str = "localhost";

fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SECRET_KEY", "integration-test-secret-key-32-chars-min"),
        ("DEBUG", "false"),
        ("ALLOWED_HOSTS", "localhost,.example.org"),
        ("CSRF_TRUSTED_ORIGINS", "https://trusted.example.org"),
        ("TEMPLATES_DIR", TEMPLATES),
        ("STATIC_ROOT", STATIC_ROOT),
        ("DEFAULT_FROM_EMAIL", "site@example.com"),
        ("CONTACT_RECIPIENTS", "owner@example.com,backup@example.com"),
    ]);

    Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

fn app_with(mailer: Arc<dyn Mailer>) -> Router {
    let config = test_config();
    let renderer = Arc::new(TemplateRenderer::new(&config.templates_dir).unwrap());
    let service = Arc::new(ContactManager::new(mailer, config.contact.clone()));

    create_router(AppState::new(service, renderer, config).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::HOST, HOST)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `name=value` pair of the flash cookie set by a response
fn flash_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("flash="))
        .and_then(|value| value.split(';').next())
        .expect("response should set the flash cookie")
        .to_string()
}

/// Follow a contact redirect and return the rendered form
async fn follow(app: &Router, redirect: &Response<Body>) -> String {
    assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect.headers()[header::LOCATION], "/contact");

    let request = Request::builder()
        .uri("/contact")
        .header(header::HOST, HOST)
        .header(header::COOKIE, flash_cookie(redirect))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

// =============================================================================
// Contact Form Tests
// =============================================================================

#[tokio::test]
async fn test_get_contact_renders_form_without_sending() {
    let mailer = RecordingMailer::default();
    let app = app_with(Arc::new(mailer.clone()));

    let response = app.oneshot(get("/contact")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<form method=\"post\" action=\"/contact\""));
    assert!(!html.contains("class=\"notice"));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_valid_submission_sends_and_flashes_success() {
    let mailer = RecordingMailer::default();
    let app = app_with(Arc::new(mailer.clone()));

    let response = app
        .clone()
        .oneshot(post_form(
            "name=Ana&email=ana%40example.com&message=Hello%20there",
        ))
        .await
        .unwrap();
    let html = follow(&app, &response).await;

    assert!(html.contains("notice-success"));
    assert!(html.contains("Thanks! Your message was sent."));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New message from the site");
    assert_eq!(sent[0].from, "site@example.com");
    assert_eq!(sent[0].to, vec!["owner@example.com".to_string()]);
    assert_eq!(sent[0].reply_to, vec!["ana@example.com".to_string()]);
    assert_eq!(
        sent[0].body,
        "Name: Ana\nEmail: ana@example.com\n\nMessage:\nHello there"
    );
}

#[tokio::test]
async fn test_notice_is_shown_once() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let response = app
        .clone()
        .oneshot(post_form("name=Ana&email=ana%40example.com&message=Hi"))
        .await
        .unwrap();
    let cookie = flash_cookie(&response);

    let request = Request::builder()
        .uri("/contact")
        .header(header::HOST, HOST)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    // The render consumes the notice by expiring the cookie
    let removal = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.starts_with("flash=") && value.contains("Max-Age=0"));
    assert!(removal);

    let html = app.oneshot(get("/contact")).await.unwrap();
    assert!(!body_text(html).await.contains("Thanks!"));
}

#[tokio::test]
async fn test_empty_field_flashes_incomplete_without_sending() {
    let mailer = RecordingMailer::default();
    let app = app_with(Arc::new(mailer.clone()));

    let response = app
        .clone()
        .oneshot(post_form("name=Ana&email=ana%40example.com&message="))
        .await
        .unwrap();
    let html = follow(&app, &response).await;

    assert!(html.contains("notice-error"));
    assert!(html.contains(">Please complete all fields</div>"));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_missing_body_counts_as_incomplete() {
    let mailer = RecordingMailer::default();
    let app = app_with(Arc::new(mailer.clone()));

    let response = app.clone().oneshot(post_form("")).await.unwrap();
    let html = follow(&app, &response).await;

    assert!(html.contains("Please complete all fields"));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_header_injection_flashes_invalid_header() {
    let mailer = RecordingMailer::default();
    let app = app_with(Arc::new(mailer.clone()));

    let response = app
        .clone()
        .oneshot(post_form(
            "name=Ana&email=ana%40example.com%0D%0ABcc%3A%20victim%40example.com&message=Hi",
        ))
        .await
        .unwrap();
    let html = follow(&app, &response).await;

    assert!(html.contains(">Invalid header in the email</div>"));
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_flashes_generic_error() {
    let app = app_with(Arc::new(UnreachableMailer));

    let response = app
        .clone()
        .oneshot(post_form("name=Ana&email=ana%40example.com&message=Hi"))
        .await
        .unwrap();
    let html = follow(&app, &response).await;

    assert!(html.contains("notice-error"));
    assert!(html.contains("Your message could not be sent. Please try again later."));
    assert!(!html.contains("connection refused"));
}

#[tokio::test]
async fn test_tampered_flash_cookie_is_ignored() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let request = Request::builder()
        .uri("/contact")
        .header(header::HOST, HOST)
        .header(header::COOKIE, "flash=contact-sent")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains("Thanks!"));
}

// =============================================================================
// Request Guard Tests
// =============================================================================

#[tokio::test]
async fn test_disallowed_host_is_rejected() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let request = Request::builder()
        .uri("/")
        .header(header::HOST, "evil.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subdomain_of_allowed_domain_passes() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let request = Request::builder()
        .uri("/about")
        .header(header::HOST, "www.example.org:8443")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cross_origin_post_is_forbidden() {
    let mailer = RecordingMailer::default();
    let app = app_with(Arc::new(mailer.clone()));

    let mut request = post_form("name=Ana&email=ana%40example.com&message=Hi");
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://evil.com".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_same_and_trusted_origin_posts_pass() {
    let mailer = RecordingMailer::default();
    let app = app_with(Arc::new(mailer.clone()));

    for origin in ["http://localhost", "https://trusted.example.org"] {
        let mut request = post_form("name=Ana&email=ana%40example.com&message=Hi");
        request
            .headers_mut()
            .insert(header::ORIGIN, origin.parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "origin {}", origin);
    }

    assert_eq!(mailer.sent().len(), 2);
}

// =============================================================================
// Page and Infrastructure Tests
// =============================================================================

#[tokio::test]
async fn test_content_pages_render() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    for path in [
        "/", "/about", "/projects", "/thesis", "/snake", "/nexa", "/teaching",
    ] {
        let response = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path {}", path);

        let html = body_text(response).await;
        assert!(html.contains("<html lang=\"en\">"), "path {}", path);
    }
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_page() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let response = app.oneshot(get("/no-such-page")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("Page not found"));
    assert!(html.contains("no-such-page"));
}

#[tokio::test]
async fn test_health_reports_mail_backend() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["mail_backend"], "console");
}

#[tokio::test]
async fn test_static_files_are_served() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let response = app.oneshot(get("/static/css/site.css")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(".notice-success"));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = app_with(Arc::new(RecordingMailer::default()));

    let response = app.oneshot(get("/")).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(
        headers[header::STRICT_TRANSPORT_SECURITY],
        "max-age=3600; includeSubDomains; preload"
    );
}

#[tokio::test]
async fn test_state_builds_from_config() {
    // Console backend, real templates: the same path `serve` takes
    assert_ok!(AppState::from_config(test_config()));
}
