//! Quick-Add Record Endpoints
//!
//! One generic set of handlers, instantiated per entity:
//! `GET <e>/json/`, `GET <e>/{id}/json/`, `POST <e>/save/`, `POST <e>/{id}/delete/`.

use async_trait::async_trait;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::response::{Json, Redirect};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{normalize_notes, DomainError, NamedEntity, ValidationErrors};
use crate::repository::{NamedRepository, Repository};
use super::error::ApiError;
use super::form::SubmittedForm;
use super::AppState;

/// Save requests may carry an image
const UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

/// Fields every quick-add form has, already cleaned
#[derive(Debug, Clone)]
pub struct CommonInput {
    /// 0 when creating
    pub id: u32,
    pub name: String,
    pub description: String,
    pub notes: Vec<String>,
}

/// An entity editable through a quick-add panel
#[async_trait]
pub trait QuickAddResource: NamedEntity + Serialize + 'static {
    /// URL segment and key of the saved record in the response
    const SLUG: &'static str;
    const LABEL: &'static str;

    type Repo: NamedRepository<Self> + 'static;

    fn repository(state: &AppState) -> Self::Repo;

    /// Build the record from the form, recording field problems in `errors`
    async fn from_form(
        state: &AppState,
        common: CommonInput,
        form: &SubmittedForm,
        existing: Option<&Self>,
        errors: &mut ValidationErrors,
    ) -> Result<Self, ApiError>;

    /// Store uploads once the form is known to be valid
    async fn attach_media(&mut self, _state: &AppState, _form: &SubmittedForm) -> Result<(), ApiError> {
        Ok(())
    }
}

fn not_found<R: QuickAddResource>(id: u32) -> DomainError {
    DomainError::NotFound(format!("{} {}", R::SLUG, id))
}

pub async fn list_json<R: QuickAddResource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, ApiError> {
    Ok(Json(R::repository(&state).list().await?))
}

pub async fn record_json<R: QuickAddResource>(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<R>, ApiError> {
    let record = R::repository(&state).find_by_id(id).await?.ok_or_else(|| not_found::<R>(id))?;
    Ok(Json(record))
}

/// Create when the hidden `id` is blank, update otherwise.
/// Responds `{success: true, <slug>: record}` or 400 `{errors: {...}}`.
pub async fn save<R: QuickAddResource>(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let form = SubmittedForm::from_multipart(multipart).await?;
    let repo = R::repository(&state);
    let id = form.id()?;
    let existing = match id {
        Some(id) => Some(repo.find_by_id(id).await?.ok_or_else(|| not_found::<R>(id))?),
        None => None,
    };

    let mut errors = ValidationErrors::new();
    let name = form.trimmed("name");
    if name.is_empty() {
        errors.required("name");
    } else if let Some(other) = repo.find_by_name(&name).await? {
        if Some(other.id()) != id {
            errors.add("name", "unique", format!("{} with this Name already exists.", R::LABEL));
        }
    }

    let common = CommonInput {
        id: id.unwrap_or(0),
        name,
        description: form.trimmed("description"),
        notes: normalize_notes(form.text("notes")),
    };
    let record = R::from_form(&state, common, &form, existing.as_ref(), &mut errors).await?;
    let mut record = errors.into_result(record)?;
    record.attach_media(&state, &form).await?;

    let saved = match id {
        Some(_) => repo.update(&record).await?,
        None => repo.create(&record).await?,
    };
    tracing::info!(entity = R::SLUG, id = saved.id(), created = id.is_none(), "record saved");

    let record = serde_json::to_value(&saved).map_err(|e| DomainError::Internal(e.to_string()))?;
    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(R::SLUG.to_string(), record);
    Ok(Json(Value::Object(body)))
}

/// Plain form post from a card; redirects back to the list page
pub async fn delete<R: QuickAddResource>(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Redirect, ApiError> {
    R::repository(&state).delete(id).await?;
    tracing::info!(entity = R::SLUG, id, "record deleted");
    Ok(Redirect::to(&format!("{}/", state.config.base_path)))
}

pub fn resource_routes<R: QuickAddResource>() -> Router<AppState> {
    let slug = R::SLUG;
    Router::new()
        .route(&format!("/{}/json/", slug), get(list_json::<R>))
        .route(&format!("/{}/{{id}}/json/", slug), get(record_json::<R>))
        .route(
            &format!("/{}/save/", slug),
            post(save::<R>).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
        )
        .route(&format!("/{}/{{id}}/delete/", slug), post(delete::<R>))
}
