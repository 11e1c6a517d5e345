use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::infrastructure::identity::USER_ID_HEADER;

/// Request-scoped view of who is calling.
///
/// Every write operation stamps `created_user`/`updated_user` from the
/// viewer, so an anonymous viewer can read but never mutate.
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub user_id: Option<UserId>,
    pub username: Option<String>,
    pub request_id: String,
}

impl ViewerContext {
    pub fn authenticated(user_id: UserId, username: Option<String>, request_id: String) -> Self {
        ViewerContext {
            user_id: Some(user_id),
            username,
            request_id,
        }
    }

    pub fn anonymous(request_id: String) -> Self {
        ViewerContext {
            user_id: None,
            username: None,
            request_id,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The user to record on writes
    pub fn acting_user(&self) -> AppResult<UserId> {
        self.user_id.ok_or_else(|| {
            AppError::Unauthorized(format!(
                "Authentication required: send an {} header",
                USER_ID_HEADER
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_viewer_cannot_act() {
        let viewer = ViewerContext::anonymous("req-1".to_string());
        assert!(!viewer.is_authenticated());
        assert!(matches!(viewer.acting_user(), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_authenticated_viewer_acts_as_user() {
        let viewer = ViewerContext::authenticated(UserId::new(7), Some("ada".to_string()), "req-2".to_string());
        assert!(viewer.is_authenticated());
        assert_eq!(viewer.acting_user().unwrap(), UserId::new(7));
    }
}
