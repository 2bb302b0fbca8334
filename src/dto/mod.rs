//! Request bodies and their validation.
//!
//! Each request type implements [`Validate`], turning the loosely typed JSON body
//! into the strongly typed input the services take. Field-level problems are
//! collected so the client sees all of them in one `field_errors` map.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::ApiError;

pub mod auth;
pub mod matches;
pub mod player;
pub mod result;
pub mod team;

pub use auth::{Credentials, LoginRequest, RegisterRequest, Registration};
pub use matches::{CreateMatchRequest, MatchPatch, UpdateMatchRequest};
pub use player::{CreatePlayerRequest, PlayerPatch, Position, UpdatePlayerRequest};
pub use result::{GoalRequest, ReportResultRequest};
pub use team::{CreateTeamRequest, TeamPatch, UpdateTeamRequest};

pub type FieldErrors = HashMap<String, String>;

pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, FieldErrors>;
}

/// JSON body extractor that runs [`Validate`] and yields the validated output
pub struct ValidatedJson<T: Validate>(pub T::Output);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Validate + DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::invalid_json(rejection.body_text()))?;

        body.validate()
            .map(ValidatedJson)
            .map_err(|errors| ApiError::validation_error("Request validation failed", Some(errors)))
    }
}

/// Small accumulator used by the `Validate` impls
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: FieldErrors,
}

impl Checker {
    pub fn fail(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.fail(field, "is required");
        }
        value
    }

    /// Trimmed, non-empty string
    pub fn text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.fail(field, "is required");
                None
            }
        }
    }

    pub fn range<T: PartialOrd + std::fmt::Display + Copy>(&mut self, field: &str, value: T, min: T, max: T) -> bool {
        if value < min || value > max {
            self.fail(field, format!("must be between {min} and {max}"));
            return false;
        }
        true
    }

    pub fn at_least<T: PartialOrd + std::fmt::Display + Copy>(&mut self, field: &str, value: T, min: T) -> bool {
        if value < min {
            self.fail(field, format!("must be at least {min}"));
            return false;
        }
        true
    }

    pub fn finish<T>(self, output: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        output().ok_or_else(|| HashMap::from([("body".to_string(), "is invalid".to_string())]))
    }
}

/// Empty strings clear optional text columns
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
