//! Page Access
//!
//! Every lookup into the host page goes through `Capability`, so a missing
//! element or an absent browser API is a value to match on, not a panic.

use wasm_bindgen::JsCast;

/// Name of the cookie and form field carrying the CSRF token
pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Unavailable(&'static str),
}

impl<T> Capability<T> {
    pub fn from_option(value: Option<T>, missing: &'static str) -> Self {
        match value {
            Some(v) => Capability::Available(v),
            None => Capability::Unavailable(missing),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Capability<U>) -> Capability<U> {
        match self {
            Capability::Available(v) => f(v),
            Capability::Unavailable(why) => Capability::Unavailable(why),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Capability::Available(v) => Some(v),
            Capability::Unavailable(_) => None,
        }
    }
}

pub fn window() -> Capability<web_sys::Window> {
    Capability::from_option(web_sys::window(), "window")
}

pub fn document() -> Capability<web_sys::Document> {
    window().and_then(|w| Capability::from_option(w.document(), "document"))
}

/// `window.location.pathname`, or "/" outside a browser page
pub fn pathname() -> String {
    window()
        .and_then(|w| Capability::from_option(w.location().pathname().ok(), "location.pathname"))
        .ok()
        .unwrap_or_else(|| "/".to_string())
}

/// Value of a query parameter of the current page URL
pub fn query_param(name: &str) -> Option<String> {
    let search = window().ok()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name)
}

/// URL fragment without the leading `#`
pub fn hash() -> Option<String> {
    let hash = window().ok()?.location().hash().ok()?;
    let name = hash.trim_start_matches('#');
    (!name.is_empty()).then(|| name.to_string())
}

/// Value of an `<input>` already present in the served page
pub fn input_value(selector: &str) -> Capability<String> {
    document()
        .and_then(|doc| Capability::from_option(doc.query_selector(selector).ok().flatten(), "input"))
        .and_then(|el| {
            Capability::from_option(
                el.dyn_into::<web_sys::HtmlInputElement>().ok().map(|i| i.value()),
                "input element",
            )
        })
}

/// Server-rendered prefill for a panel field, e.g. `#task-steps-prefill`
pub fn prefill(panel: &str, field: &str) -> String {
    input_value(&format!("#{}-{}-prefill", panel, field))
        .ok()
        .unwrap_or_default()
}

pub fn cookie(name: &str) -> Capability<String> {
    document()
        .and_then(|doc| Capability::from_option(doc.dyn_into::<web_sys::HtmlDocument>().ok(), "html document"))
        .and_then(|doc| Capability::from_option(doc.cookie().ok(), "document.cookie"))
        .and_then(|all| Capability::from_option(cookie_value(&all, name), "cookie"))
}

/// Token for embedded forms: the page's own hidden field, else the cookie
pub fn page_csrf_token() -> String {
    match input_value(&format!("input[name=\"{}\"]", CSRF_FIELD)) {
        Capability::Available(token) if !token.is_empty() => token,
        _ => cookie(CSRF_COOKIE).ok().unwrap_or_default(),
    }
}

/// Find `name` in a `document.cookie` string, percent-decoding the value
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key.trim() != name {
            return None;
        }
        Some(
            percent_encoding::percent_decode_str(value.trim())
                .decode_utf8_lossy()
                .to_string(),
        )
    })
}

pub fn reload() {
    if let Capability::Available(w) = window() {
        let _ = w.location().reload();
    }
}

pub fn navigate(url: &str) {
    if let Capability::Available(w) = window() {
        let _ = w.location().set_href(url);
    }
}

/// Browser confirmation prompt; without a window nothing is confirmed
pub fn confirm(message: &str) -> bool {
    match window() {
        Capability::Available(w) => w.confirm_with_message(message).unwrap_or(false),
        Capability::Unavailable(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=tok%3D123; theme=dark";
        assert_eq!(cookie_value(cookies, CSRF_COOKIE), Some("tok=123".to_string()));
        assert_eq!(cookie_value(cookies, "theme"), Some("dark".to_string()));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("", CSRF_COOKIE), None);
    }

    #[test]
    fn test_capability_chaining() {
        let found = Capability::Available(2).and_then(|v| Capability::Available(v * 2));
        assert_eq!(found, Capability::Available(4));
        let missing: Capability<i32> = Capability::Unavailable("window").and_then(|v: i32| Capability::Available(v));
        assert_eq!(missing, Capability::Unavailable("window"));
        assert_eq!(missing.ok(), None);
    }
}
