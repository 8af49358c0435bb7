use crate::dtos::{
    CreatePersonRequest, MessageResponse, PersonCollection, PersonResponse, UpdatePersonRequest,
    UpdatePersonResponse,
};
use crate::extractors::PersonId;
use crate::models::PersonChanges;
use crate::services::{PersonError, LIST_LIMIT};
use crate::startup::AppState;
use crate::utils::JsonBody;
use axum::{extract::State, Json};
use service_core::error::AppError;

fn log_failure(operation: &str, err: &PersonError) {
    match err {
        PersonError::Database(_) | PersonError::Internal(_) => {
            tracing::error!(operation, error = %err, "Person storage call failed");
        }
        _ => tracing::warn!(operation, reason = %err, "Person request rejected"),
    }
}

pub async fn create_person(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreatePersonRequest>,
) -> Result<Json<PersonResponse>, AppError> {
    let person = state
        .repository
        .create(payload.into())
        .await
        .inspect_err(|e| log_failure("create", e))?;

    tracing::info!(person_id = %person.id, "Person created");

    Ok(Json(PersonResponse::from(person)))
}

pub async fn list_persons(
    State(state): State<AppState>,
) -> Result<Json<PersonCollection>, AppError> {
    let persons = state
        .repository
        .list_all(LIST_LIMIT)
        .await
        .inspect_err(|e| log_failure("list", e))?;

    Ok(Json(PersonCollection::from(persons)))
}

/// Partial update. Checks run in order: id syntax (extractor), existence,
/// non-empty patch; only then is the record written.
pub async fn update_person(
    State(state): State<AppState>,
    PersonId(person_id): PersonId,
    JsonBody(payload): JsonBody<UpdatePersonRequest>,
) -> Result<Json<UpdatePersonResponse>, AppError> {
    let changes = PersonChanges::from(payload);

    let person = state
        .repository
        .update(&person_id, &changes)
        .await
        .inspect_err(|e| log_failure("update", e))?;

    tracing::info!(person_id = %person_id, "Person updated");

    Ok(Json(UpdatePersonResponse {
        message: "Person updated successfully".to_string(),
        person: PersonResponse::from(person),
    }))
}

pub async fn delete_person(
    State(state): State<AppState>,
    PersonId(person_id): PersonId,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = state
        .repository
        .delete(&person_id)
        .await
        .inspect_err(|e| log_failure("delete", e))?;

    if !deleted {
        let err = PersonError::NotFound;
        log_failure("delete", &err);
        return Err(err.into());
    }

    tracing::info!(person_id = %person_id, "Person deleted");

    Ok(Json(MessageResponse {
        message: "Person deleted successfully!".to_string(),
    }))
}
