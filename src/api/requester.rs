use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::domain::contact::UserId;
use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the caller, attached upstream as the `userId` query parameter
/// or the `X-User-Id` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequesterId(pub UserId);

#[derive(Debug, Default, Deserialize)]
struct RequesterQuery {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.trim().parse().ok()
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequesterId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_query = Query::<RequesterQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.user_id)
            .and_then(|raw| parse_user_id(&raw));

        let from_header = || {
            parts
                .headers
                .get(USER_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_user_id)
        };

        from_query
            .or_else(from_header)
            .map(RequesterId)
            .ok_or(AppError::Forbidden)
    }
}
