//! Fetch Primitives
//!
//! Thin wrappers over `window.fetch`. Errors are transport-level only; how a
//! status or body is interpreted is up to the caller.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestCredentials, RequestInit, Response};

use crate::dom::{self, Capability, CSRF_COOKIE};

/// Status and body text of a completed request
#[derive(Debug, Clone)]
pub struct FetchedText {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

pub async fn get_text(url: &str) -> Result<FetchedText, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_credentials(RequestCredentials::SameOrigin);
    let headers = Headers::new().map_err(|e| format!("{:?}", e))?;
    headers.set("Accept", "application/json").map_err(|e| format!("{:?}", e))?;
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    send(request).await
}

/// POST a multipart form the way the quick-add panels do
pub async fn post_form(url: &str, form: &FormData) -> Result<FetchedText, String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_credentials(RequestCredentials::SameOrigin);
    opts.set_body(form);

    let headers = Headers::new().map_err(|e| format!("{:?}", e))?;
    headers.set("X-Requested-With", "XMLHttpRequest").map_err(|e| format!("{:?}", e))?;
    if let Capability::Available(token) = dom::cookie(CSRF_COOKIE) {
        headers.set("X-CSRFToken", &token).map_err(|e| format!("{:?}", e))?;
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    send(request).await
}

async fn send(request: Request) -> Result<FetchedText, String> {
    let window = dom::window().ok().ok_or("no window")?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch failed: {:?}", e))?;
    let response: Response = value.dyn_into().map_err(|_| "not a Response".to_string())?;

    let text = response.text().map_err(|e| format!("{:?}", e))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| format!("body read failed: {:?}", e))?
        .as_string()
        .unwrap_or_default();

    Ok(FetchedText {
        status: response.status(),
        ok: response.ok(),
        body,
    })
}
