use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersonError {
    #[error("Invalid person_id")]
    InvalidIdentifier,

    #[error("Person not found.")]
    NotFound,

    #[error("No fields to update.")]
    EmptyUpdate,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PersonError> for AppError {
    fn from(err: PersonError) -> Self {
        match err {
            PersonError::InvalidIdentifier | PersonError::EmptyUpdate => {
                AppError::BadRequest(anyhow::anyhow!(err.to_string()))
            }
            PersonError::NotFound => AppError::NotFound(anyhow::anyhow!(err.to_string())),
            PersonError::Database(e) => AppError::from(e),
            PersonError::Internal(e) => AppError::InternalError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_domain_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::from(PersonError::InvalidIdentifier).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(PersonError::EmptyUpdate).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(PersonError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(PersonError::Internal(anyhow::anyhow!("boom"))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_match_api_contract() {
        assert_eq!(PersonError::InvalidIdentifier.to_string(), "Invalid person_id");
        assert_eq!(PersonError::NotFound.to_string(), "Person not found.");
        assert_eq!(PersonError::EmptyUpdate.to_string(), "No fields to update.");
    }
}
