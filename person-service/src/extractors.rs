use crate::utils::identifier::parse_person_id;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// The `{person_id}` path segment, decoded to an `ObjectId`.
///
/// Runs before any body extractor, so a malformed id is rejected with 400
/// ahead of body parsing and storage access.
#[derive(Debug, Clone, Copy)]
pub struct PersonId(pub ObjectId);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PersonId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

        let id = parse_person_id(&raw).map_err(|e| {
            tracing::warn!(person_id = %raw, "Rejected malformed person_id");
            AppError::from(e)
        })?;

        Ok(PersonId(id))
    }
}
