//! Quick-Add Resources
//!
//! Entity-specific form handling for locations, equipment and tasks, plus
//! the checkbox-list lookups the chore form shares.

use async_trait::async_trait;

use crate::domain::{normalize_steps, Equipment, Location, NamedEntity, NamedRef, Task, ValidationErrors};
use crate::repository::{EquipmentRepository, LocationRepository, Repository, TaskRepository};
use super::error::ApiError;
use super::form::SubmittedForm;
use super::media::{image_mime, store_image};
use super::records::{CommonInput, QuickAddResource};
use super::AppState;

pub(super) fn invalid_choice(errors: &mut ValidationErrors, field: &str, value: &str) {
    errors.add(
        field,
        "invalid_choice",
        format!("Select a valid choice. {} is not one of the available choices.", value),
    );
}

/// Ids ticked in a checkbox list, looked up and de-duplicated
pub(super) async fn resolve_choices<T, R>(
    repo: &R,
    form: &SubmittedForm,
    field: &str,
    errors: &mut ValidationErrors,
) -> Result<Vec<NamedRef>, ApiError>
where
    T: NamedEntity,
    R: Repository<T>,
{
    let mut chosen: Vec<NamedRef> = Vec::new();
    for raw in form.all(field) {
        let raw = raw.trim();
        let found = match raw.parse::<u32>() {
            Ok(id) => repo.find_by_id(id).await?,
            Err(_) => None,
        };
        match found {
            Some(record) if !chosen.iter().any(|c| c.id == record.id()) => chosen.push(NamedRef {
                id: record.id(),
                name: record.name().to_string(),
            }),
            Some(_) => {}
            None => invalid_choice(errors, field, raw),
        }
    }
    Ok(chosen)
}

#[async_trait]
impl QuickAddResource for Location {
    const SLUG: &'static str = "location";
    const LABEL: &'static str = "Location";

    type Repo = LocationRepository;

    fn repository(state: &AppState) -> Self::Repo {
        LocationRepository::new(state.db.conn.clone())
    }

    async fn from_form(
        _state: &AppState,
        common: CommonInput,
        _form: &SubmittedForm,
        _existing: Option<&Self>,
        _errors: &mut ValidationErrors,
    ) -> Result<Self, ApiError> {
        Ok(Location {
            id: common.id,
            name: common.name,
            description: common.description,
            notes: common.notes,
        })
    }
}

#[async_trait]
impl QuickAddResource for Equipment {
    const SLUG: &'static str = "equipment";
    const LABEL: &'static str = "Equipment";

    type Repo = EquipmentRepository;

    fn repository(state: &AppState) -> Self::Repo {
        EquipmentRepository::new(state.db.conn.clone())
    }

    async fn from_form(
        state: &AppState,
        common: CommonInput,
        form: &SubmittedForm,
        existing: Option<&Self>,
        errors: &mut ValidationErrors,
    ) -> Result<Self, ApiError> {
        let count = form.whole_number("count", u32::MAX, errors);

        let location = match form.text("location").map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => {
                let found = match raw.parse::<u32>() {
                    Ok(id) => LocationRepository::new(state.db.conn.clone()).find_by_id(id).await?,
                    Err(_) => None,
                };
                if found.is_none() {
                    invalid_choice(errors, "location", raw);
                }
                found.map(|l| NamedRef { id: l.id, name: l.name })
            }
        };

        if let Some(file) = form.file("image") {
            if image_mime(file).is_none() {
                errors.add(
                    "image",
                    "invalid_image",
                    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
                );
            }
        }

        Ok(Equipment {
            id: common.id,
            name: common.name,
            description: common.description,
            count,
            location,
            notes: common.notes,
            image_url: existing.and_then(|e| e.image_url.clone()),
        })
    }

    async fn attach_media(&mut self, state: &AppState, form: &SubmittedForm) -> Result<(), ApiError> {
        if let Some(file) = form.file("image") {
            if let Some(mime) = image_mime(file) {
                self.image_url = Some(store_image(&state.config.media_dir, Self::SLUG, file, &mime).await?);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl QuickAddResource for Task {
    const SLUG: &'static str = "task";
    const LABEL: &'static str = "Task";

    type Repo = TaskRepository;

    fn repository(state: &AppState) -> Self::Repo {
        TaskRepository::new(state.db.conn.clone())
    }

    async fn from_form(
        state: &AppState,
        common: CommonInput,
        form: &SubmittedForm,
        _existing: Option<&Self>,
        errors: &mut ValidationErrors,
    ) -> Result<Self, ApiError> {
        let equipment = resolve_choices::<Equipment, _>(
            &EquipmentRepository::new(state.db.conn.clone()),
            form,
            "equipment",
            errors,
        )
        .await?;

        Ok(Task {
            id: common.id,
            name: common.name,
            description: common.description,
            steps: normalize_steps(form.text("steps")),
            equipment,
            notes: common.notes,
        })
    }
}
