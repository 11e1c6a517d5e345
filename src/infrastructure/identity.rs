// Identity - resolves the caller of a request from an upstream provider
//
// Authentication itself happens outside this service. The provider only
// turns whatever the upstream attached to the request into a user id.

use async_trait::async_trait;
use axum::http::HeaderMap;

use crate::core::UserId;
use crate::error::{AppError, AppResult};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USERNAME_HEADER: &str = "x-username";

/// Who the upstream says the caller is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: Option<String>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` for anonymous callers; `Err` when credentials are present but malformed.
    async fn identify(&self, headers: &HeaderMap) -> AppResult<Option<Identity>>;
}

/// Trusts identity headers set by an authenticating gateway.
#[derive(Debug, Clone, Default)]
pub struct HeaderIdentityProvider;

#[async_trait]
impl IdentityProvider for HeaderIdentityProvider {
    async fn identify(&self, headers: &HeaderMap) -> AppResult<Option<Identity>> {
        let raw = match headers.get(USER_ID_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| AppError::BadRequest(format!("{} is not valid text", USER_ID_HEADER)))?,
            None => return Ok(None),
        };

        let user_id = raw
            .trim()
            .parse::<i64>()
            .ok()
            .map(UserId::new)
            .filter(|id| id.is_valid())
            .ok_or_else(|| {
                AppError::BadRequest(format!("{} must be a positive integer, got '{}'", USER_ID_HEADER, raw))
            })?;

        let username = headers
            .get(USERNAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(Some(Identity { user_id, username }))
    }
}
