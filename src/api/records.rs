//! Record Endpoints
//!
//! List, load and save quick-add records.

use web_sys::FormData;

use crate::models::Record;
use crate::widgets::{parse_save_response, SaveOutcome};
use super::http::{get_text, post_form};

pub async fn list_records<R: Record>(base: &str) -> Result<Vec<R>, String> {
    let url = R::KIND.list_url(base);
    let fetched = get_text(&url).await?;
    if !fetched.ok {
        return Err(format!("GET {} -> {}", url, fetched.status));
    }
    serde_json::from_str(&fetched.body).map_err(|e| e.to_string())
}

/// Load one record for editing. Any failure means "fall back to navigation".
pub async fn get_record<R: Record>(base: &str, id: u32) -> Result<R, String> {
    let url = R::KIND.record_url(base, id);
    let fetched = get_text(&url).await?;
    if !fetched.ok {
        return Err(format!("GET {} -> {}", url, fetched.status));
    }
    serde_json::from_str(&fetched.body).map_err(|e| e.to_string())
}

/// Submit a quick-add form. A transport failure maps to `Reload` like any
/// other unusable response.
pub async fn save_record<R: Record>(base: &str, form: &FormData) -> SaveOutcome<R> {
    let url = R::KIND.save_url(base);
    match post_form(&url, form).await {
        Ok(fetched) => parse_save_response(fetched.ok, &fetched.body),
        Err(e) => {
            web_sys::console::error_1(&format!("[SAVE] POST {} failed: {}", url, e).into());
            SaveOutcome::Reload
        }
    }
}
