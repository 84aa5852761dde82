//! CSRF Protection
//!
//! Double-submit cookie: every client gets a random `csrftoken` cookie, and
//! unsafe requests must echo it in `X-CSRFToken` or, for url-encoded forms,
//! in a `csrfmiddlewaretoken` field.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use url::form_urlencoded;

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "x-csrftoken";
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Largest url-encoded body inspected for the token field
const FORM_LIMIT: usize = 64 * 1024;

/// Value of one cookie from the `Cookie` request headers
pub fn request_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|cookie| cookie.value().to_string())
}

/// Value of one field of an `application/x-www-form-urlencoded` body
pub fn form_field(body: &[u8], name: &str) -> Option<String> {
    form_urlencoded::parse(body)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE)
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn rejected(reason: &str) -> Response {
    tracing::warn!(reason, "csrf check failed");
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "CSRF verification failed." })),
    )
        .into_response()
}

pub async fn csrf_guard(request: Request, next: Next) -> Response {
    let cookie_token = request_cookie(request.headers(), CSRF_COOKIE).filter(|t| !t.is_empty());

    let request = if is_safe(request.method()) {
        request
    } else {
        let Some(expected) = cookie_token.as_deref() else {
            return rejected("cookie missing");
        };
        let header_token = request
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let (submitted, request) = match header_token {
            Some(token) => (Some(token), request),
            None if is_urlencoded(request.headers()) => {
                let (parts, body) = request.into_parts();
                let bytes = match to_bytes(body, FORM_LIMIT).await {
                    Ok(bytes) => bytes,
                    Err(_) => return rejected("form body unreadable"),
                };
                let token = form_field(&bytes, CSRF_FIELD);
                (token, Request::from_parts(parts, Body::from(bytes)))
            }
            None => (None, request),
        };

        if submitted.as_deref() != Some(expected) {
            return rejected("token mismatch");
        }
        request
    };

    let mut response = next.run(request).await;
    if cookie_token.is_none() {
        let token = uuid::Uuid::new_v4().simple().to_string();
        // Readable by scripts: the frontend copies it into X-CSRFToken
        let cookie = Cookie::build((CSRF_COOKIE, token))
            .path("/")
            .same_site(SameSite::Lax)
            .build();
        if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
