// ViewerContext Middleware - resolves the caller and injects a request-scoped
// ViewerContext into the request extensions

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::infrastructure::{
    identity::{Identity, IdentityProvider},
    viewer::viewer::ViewerContext,
};

/// Application state that can identify callers
pub trait HasIdentityProvider {
    fn identity_provider(&self) -> &Arc<dyn IdentityProvider>;
}

/// Anonymous requests pass through; handlers that write reject them via `Vc`.
pub async fn viewer_context_middleware<T>(
    State(app_state): State<T>,
    mut request: Request,
    next: Next,
) -> Response
where
    T: HasIdentityProvider + Clone + Send + Sync + 'static,
{
    let identity = match app_state.identity_provider().identify(request.headers()).await {
        Ok(identity) => identity,
        Err(e) => return e.into_response(),
    };

    let viewer_context = create_viewer_context(identity);
    debug!(
        request_id = %viewer_context.request_id,
        user_id = ?viewer_context.user_id,
        "Resolved viewer"
    );

    request.extensions_mut().insert(viewer_context);
    next.run(request).await
}

fn create_viewer_context(identity: Option<Identity>) -> Arc<ViewerContext> {
    let request_id = format!("req-{}", Uuid::new_v4());
    let viewer_context = match identity {
        Some(identity) => ViewerContext::authenticated(identity.user_id, identity.username, request_id),
        None => ViewerContext::anonymous(request_id),
    };
    Arc::new(viewer_context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserId;

    #[test]
    fn test_identity_becomes_authenticated_viewer() {
        let viewer = create_viewer_context(Some(Identity {
            user_id: UserId::new(1001),
            username: Some("ada".to_string()),
        }));
        assert_eq!(viewer.user_id, Some(UserId::new(1001)));
        assert_eq!(viewer.username.as_deref(), Some("ada"));
        assert!(viewer.request_id.starts_with("req-"));
    }

    #[test]
    fn test_missing_identity_is_anonymous() {
        let viewer = create_viewer_context(None);
        assert!(!viewer.is_authenticated());
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(create_viewer_context(None).request_id, create_viewer_context(None).request_id);
    }
}
