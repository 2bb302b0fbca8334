// Route handlers, grouped by whether they sit behind the JWT guard.
pub mod protected;
pub mod public;
pub mod system;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;

use crate::error::ApiError;

/// Parses a numeric `{id}` path segment, rejecting zero and negatives
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) if id >= 1 => Ok(id),
        _ => Err(ApiError::bad_request("id must be a positive integer")),
    }
}
