// ViewerContext Extractor - authenticated viewer for handlers that write

use axum::{extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::core::UserId;
use crate::error::AppError;
use crate::infrastructure::viewer::viewer::ViewerContext;

/// An authenticated `ViewerContext`.
///
/// Extraction fails with 401 for anonymous callers, so a handler that takes
/// `Vc` always has a user to stamp on its writes.
#[derive(Debug, Clone)]
pub struct Vc {
    viewer: Arc<ViewerContext>,
    user: UserId,
}

impl Vc {
    /// Fails with `Unauthorized` for anonymous viewers
    pub fn new(viewer: Arc<ViewerContext>) -> Result<Self, AppError> {
        let user = viewer.acting_user()?;
        Ok(Self { viewer, user })
    }

    /// The user to stamp on writes
    pub fn user(&self) -> UserId {
        self.user
    }
}

impl std::ops::Deref for Vc {
    type Target = ViewerContext;

    fn deref(&self) -> &Self::Target {
        &self.viewer
    }
}

impl<S> FromRequestParts<S> for Vc
where
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let vc = match parts.extensions.get::<Arc<ViewerContext>>() {
            Some(viewer) => Vc::new(viewer.clone()),
            None => Err(AppError::Internal(
                "ViewerContext missing; viewer_context_middleware is not installed".to_string(),
            )),
        };

        async move { vc }
    }
}
