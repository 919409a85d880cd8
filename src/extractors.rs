//! Request extractors that turn path segments and bodies into typed,
//! checked values, rejecting with an [`ApiError`] JSON body.
//!
//! Path extractors implement `FromRequestParts` and therefore always run
//! before the body extractor in a handler signature.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use garde::Validate;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::api::FieldError;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// JSON body that decoded and passed its field constraints
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate<Context = ()>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                warn!("Rejected request body: {}", rejection.body_text());
                ApiError::bad_request("Invalid request body")
            })?;

        if let Err(report) = value.validate() {
            let details = FieldError::from_report(&report);
            warn!("Validation failed on {} field(s)", details.len());
            return Err(ApiError::validation_failed(details));
        }

        Ok(Self(value))
    }
}

/// Parse a path segment as a positive id
fn parse_positive_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

async fn single_path_segment<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    Path::<String>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|Path(raw)| raw)
}

/// `:id` of `/users/:id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        single_path_segment(parts, state)
            .await
            .as_deref()
            .and_then(parse_positive_id)
            .map(UserId)
            .ok_or_else(|| ApiError::bad_request("Invalid user ID"))
    }
}

/// `:id` of `/users/:id/orders`, accepted only when it is the caller's own id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerPath(pub i64);

impl OwnerPath {
    /// Path id must be valid before it is compared with the caller
    fn check(raw: Option<&str>, caller: AuthUser) -> Result<Self, ApiError> {
        let id = raw.and_then(parse_positive_id).ok_or_else(|| {
            warn!("Invalid user ID in path: {:?}", raw);
            ApiError::bad_request("Invalid user ID in path")
        })?;

        if id != caller.user_id {
            warn!(
                user_id = caller.user_id,
                "Access denied to orders of user {}", id
            );
            return Err(ApiError::forbidden(
                "Access denied: you can only operate with your own orders",
            ));
        }

        Ok(Self(id))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OwnerPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_request_parts(parts, state).await?;
        let raw = single_path_segment(parts, state).await;
        Self::check(raw.as_deref(), caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    const CALLER: AuthUser = AuthUser { user_id: 7 };

    #[test]
    fn positive_ids_only() {
        assert_eq!(parse_positive_id("42"), Some(42));
        assert_eq!(parse_positive_id("0"), None);
        assert_eq!(parse_positive_id("-3"), None);
        assert_eq!(parse_positive_id("abc"), None);
        assert_eq!(parse_positive_id(""), None);
    }

    #[test]
    fn owner_matches_caller() {
        assert_eq!(OwnerPath::check(Some("7"), CALLER).unwrap(), OwnerPath(7));
    }

    #[test]
    fn other_owner_is_forbidden() {
        let err = OwnerPath::check(Some("5"), CALLER).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            err.message(),
            "Access denied: you can only operate with your own orders"
        );
    }

    #[test]
    fn malformed_id_is_checked_before_ownership() {
        for raw in ["abc", "0", "-7"] {
            let err = OwnerPath::check(Some(raw), CALLER).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), "Invalid user ID in path");
        }
    }
}
