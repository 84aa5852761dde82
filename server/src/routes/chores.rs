//! Chore Endpoints
//!
//! The chore panel is a plain url-encoded form post that redirects back to
//! the list page; `chore/json/` feeds anything that wants the saved chores.

use axum::extract::{Path, State};
use axum::response::{Json, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};

use crate::domain::{
    normalize_days_of_month, normalize_notes, Chore, DomainError, Equipment, Recurrence, Task,
    ValidationErrors, NON_FIELD, WEEKDAY_CODES,
};
use crate::repository::{ChoreRepository, EquipmentRepository, Repository, TaskRepository};
use super::error::ApiError;
use super::form::SubmittedForm;
use super::resources::{invalid_choice, resolve_choices};
use super::AppState;

const MAX_PENALTY_PERCENT: u32 = 100;

/// Recurrence fields, cleared or checked according to the cadence
fn recurrence_schedule(form: &SubmittedForm, chore: &mut Chore, errors: &mut ValidationErrors) {
    chore.recurrence = None;
    chore.recurrence_day_of_week = None;
    chore.recurrence_day_of_month = None;
    if !chore.is_recurring {
        return;
    }

    let code = form.trimmed("recurrence");
    if code.is_empty() {
        return;
    }
    let Some(recurrence) = Recurrence::from_code(&code) else {
        invalid_choice(errors, "recurrence", &code);
        return;
    };
    chore.recurrence = Some(recurrence);

    match recurrence {
        Recurrence::Daily => {}
        Recurrence::Weekly => {
            let day = form.trimmed("recurrence_day_of_week").to_ascii_uppercase();
            if day.is_empty() {
                errors.add(NON_FIELD, "invalid", "Weekly recurrence requires a weekday selection.");
            } else if WEEKDAY_CODES.contains(&day.as_str()) {
                chore.recurrence_day_of_week = Some(day);
            } else {
                invalid_choice(errors, "recurrence_day_of_week", &day);
            }
        }
        Recurrence::Monthly => match normalize_days_of_month(&form.trimmed("recurrence_day_of_month")) {
            Ok(days) => chore.recurrence_day_of_month = Some(days),
            Err(message) => errors.add(NON_FIELD, "invalid", message),
        },
    }
}

async fn chore_from_form(state: &AppState, form: &SubmittedForm, id: u32) -> Result<Chore, ApiError> {
    let mut errors = ValidationErrors::new();

    let name = form.trimmed("name");
    if name.is_empty() {
        errors.required("name");
    }

    let mut chore = Chore::new(id, name);
    chore.description = form.trimmed("description");
    chore.points = form.whole_number("points", u32::MAX, &mut errors).unwrap_or(0);
    chore.is_recurring = form.flag("is_recurring");
    recurrence_schedule(form, &mut chore, &mut errors);

    chore.penalize_incomplete = form.flag("penalize_incomplete");
    let penalty = form.whole_number("penalty_amount", MAX_PENALTY_PERCENT, &mut errors);
    if chore.penalize_incomplete {
        chore.penalty_amount = penalty.unwrap_or(0);
    }

    chore.age_restricted = form.flag("age_restricted");
    let minimum_age = form.whole_number("minimum_age", u32::MAX, &mut errors);
    if chore.age_restricted {
        chore.minimum_age = minimum_age;
    }

    chore.equipment = resolve_choices::<Equipment, _>(
        &EquipmentRepository::new(state.db.conn.clone()),
        form,
        "equipment",
        &mut errors,
    )
    .await?;
    chore.tasks =
        resolve_choices::<Task, _>(&TaskRepository::new(state.db.conn.clone()), form, "tasks", &mut errors)
            .await?;
    chore.notes = normalize_notes(form.text("notes"));

    errors.into_result(chore).map_err(ApiError::from)
}

/// Create (or update, with a hidden `id`) and go back to the list page.
/// Invalid input answers 400 `{errors: {...}}`.
pub async fn save_chore(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, ApiError> {
    let form = SubmittedForm::from_pairs(pairs);
    let repo = ChoreRepository::new(state.db.conn.clone());
    let id = form.id()?;
    if let Some(id) = id {
        repo.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("chore {}", id)))?;
    }

    let chore = chore_from_form(&state, &form, id.unwrap_or(0)).await?;
    let saved = match id {
        Some(_) => repo.update(&chore).await?,
        None => repo.create(&chore).await?,
    };
    tracing::info!(entity = "chore", id = saved.id, created = id.is_none(), "record saved");
    Ok(Redirect::to(&format!("{}/", state.config.base_path)))
}

pub async fn list_chores(State(state): State<AppState>) -> Result<Json<Vec<Chore>>, ApiError> {
    Ok(Json(ChoreRepository::new(state.db.conn.clone()).list().await?))
}

pub async fn delete_chore(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Redirect, ApiError> {
    ChoreRepository::new(state.db.conn.clone()).delete(id).await?;
    tracing::info!(entity = "chore", id, "record deleted");
    Ok(Redirect::to(&format!("{}/", state.config.base_path)))
}

pub fn chore_routes() -> Router<AppState> {
    Router::new()
        .route("/chore/json/", get(list_chores))
        .route("/chore/save/", post(save_chore))
        .route("/chore/{id}/delete/", post(delete_chore))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(pairs: &[(&str, &str)]) -> (Chore, ValidationErrors) {
        let form = SubmittedForm::with_fields(pairs);
        let mut chore = Chore::new(0, "Laundry".to_string());
        chore.is_recurring = form.flag("is_recurring");
        let mut errors = ValidationErrors::new();
        recurrence_schedule(&form, &mut chore, &mut errors);
        (chore, errors)
    }

    #[test]
    fn test_weekly_keeps_only_weekday() {
        let (chore, errors) = schedule(&[
            ("is_recurring", "on"),
            ("recurrence", "W"),
            ("recurrence_day_of_week", "sat"),
            ("recurrence_day_of_month", "5"),
        ]);
        assert!(errors.is_empty());
        assert_eq!(chore.recurrence, Some(Recurrence::Weekly));
        assert_eq!(chore.recurrence_day_of_week.as_deref(), Some("SAT"));
        assert_eq!(chore.recurrence_day_of_month, None);
    }

    #[test]
    fn test_weekly_without_weekday() {
        let (_, errors) = schedule(&[("is_recurring", "on"), ("recurrence", "W")]);
        assert_eq!(errors.field(NON_FIELD)[0].message, "Weekly recurrence requires a weekday selection.");

        let (_, errors) = schedule(&[("is_recurring", "on"), ("recurrence", "W"), ("recurrence_day_of_week", "FUNDAY")]);
        assert_eq!(errors.field("recurrence_day_of_week")[0].code, "invalid_choice");
    }

    #[test]
    fn test_monthly_days() {
        let (chore, errors) = schedule(&[
            ("is_recurring", "on"),
            ("recurrence", "M"),
            ("recurrence_day_of_week", "MON"),
            ("recurrence_day_of_month", "1, 15"),
        ]);
        assert!(errors.is_empty());
        assert_eq!(chore.recurrence_day_of_month.as_deref(), Some("1,15"));
        assert_eq!(chore.recurrence_day_of_week, None);

        let (_, errors) = schedule(&[("is_recurring", "on"), ("recurrence", "M")]);
        assert_eq!(errors.field(NON_FIELD).len(), 1);
    }

    #[test]
    fn test_not_recurring_clears_schedule() {
        let (chore, errors) = schedule(&[("recurrence", "W"), ("recurrence_day_of_week", "MON")]);
        assert!(errors.is_empty());
        assert_eq!(chore.recurrence, None);
        assert_eq!(chore.recurrence_day_of_week, None);

        let (_, errors) = schedule(&[("is_recurring", "on"), ("recurrence", "Y")]);
        assert_eq!(errors.field("recurrence")[0].code, "invalid_choice");
    }
}
