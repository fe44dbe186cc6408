//! Contact form handler.

use axum::{
    extract::State,
    http::Method,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use super::pages::page_context;
use crate::api::AppState;
use crate::config::{CONTACT_PATH, CONTACT_TEMPLATE, FLASH_COOKIE};
use crate::domain::{ContactForm, Notice};
use crate::errors::AppResult;
use crate::services::ContactOutcome;

/// Create contact form routes
pub fn contact_routes() -> Router<AppState> {
    Router::new().route(CONTACT_PATH, get(contact).post(contact))
}

/// Display (GET) or submit (POST) the contact form.
///
/// A POST always ends in a redirect back to the form carrying one notice.
/// Delivery failures the service does not recover from are logged and shown
/// as a generic error notice instead of failing the request.
pub async fn contact(
    State(state): State<AppState>,
    method: Method,
    jar: SignedCookieJar,
    form: Option<Form<ContactForm>>,
) -> AppResult<Response> {
    let form = form.map(|Form(form)| form).unwrap_or_default();

    match state.contact_service.handle(&method, form).await {
        Ok(ContactOutcome::RenderForm) => render_form(&state, jar),
        Ok(ContactOutcome::Redirect { notice, target }) => {
            Ok(redirect_with_notice(&state, jar, notice, target))
        }
        Err(e) => {
            tracing::error!(error = %e, "Contact message could not be delivered");
            Ok(redirect_with_notice(
                &state,
                jar,
                Notice::DeliveryFailed,
                CONTACT_PATH,
            ))
        }
    }
}

/// Render the form, consuming the pending notice if there is one.
fn render_form(state: &AppState, jar: SignedCookieJar) -> AppResult<Response> {
    let pending = jar.get(FLASH_COOKIE);
    let notice = pending
        .as_ref()
        .and_then(|cookie| Notice::from_code(cookie.value()));

    let jar = match pending {
        Some(_) => jar.remove(Cookie::build(FLASH_COOKIE).path("/")),
        None => jar,
    };

    let context = page_context(&state.config, CONTACT_PATH, notice);
    let html = state.renderer.render(CONTACT_TEMPLATE, &context)?;

    Ok((jar, Html(html)).into_response())
}

fn redirect_with_notice(
    state: &AppState,
    jar: SignedCookieJar,
    notice: Notice,
    target: &str,
) -> Response {
    let cookie = Cookie::build((FLASH_COOKIE, notice.code()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!state.config.debug);

    (jar.add(cookie), Redirect::to(target)).into_response()
}
