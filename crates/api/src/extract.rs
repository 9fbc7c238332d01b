//! Request body extractor that validates before the handler runs.

use axum::extract::{FromRequest, Request};
use axum::Json;
use hostelia_db::models::describe_validation_errors;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body deserialized into `T` and checked with [`Validate`].
///
/// Malformed JSON is a 400 `BAD_REQUEST`; failed validation is a 400
/// `VALIDATION_ERROR` listing each offending field.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(describe_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}
