use serde::{Deserialize, Serialize};

use super::{choice, non_negative, reference, user};
use crate::core::UserId;
use crate::error::FieldErrors;
use crate::models::{AttendStatus, CoinStatus, GainType, RecordStatus, WishStatus};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberForm {
    pub event: Option<i64>,
    pub user: Option<i64>,
    pub attend_status: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberData {
    pub event_id: i64,
    pub user: UserId,
    pub attend_status: AttendStatus,
    pub status: RecordStatus,
}

impl MemberForm {
    pub fn clean(&self) -> Result<MemberData, FieldErrors> {
        let mut errors = FieldErrors::new();
        let event_id = reference(&mut errors, "event", self.event);
        let user = user(&mut errors, "user", self.user);
        let attend_status = choice(&mut errors, "attend_status", self.attend_status.as_deref(), None);
        let status = choice(
            &mut errors,
            "status",
            self.status.as_deref(),
            Some(RecordStatus::default()),
        );

        match (event_id, user, attend_status, status) {
            (Some(event_id), Some(user), Some(attend_status), Some(status)) => Ok(MemberData {
                event_id,
                user,
                attend_status,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WishForm {
    pub event: Option<i64>,
    pub user: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishData {
    pub event_id: i64,
    pub user: UserId,
    pub status: WishStatus,
}

impl WishForm {
    pub fn clean(&self) -> Result<WishData, FieldErrors> {
        let mut errors = FieldErrors::new();
        let event_id = reference(&mut errors, "event", self.event);
        let user = user(&mut errors, "user", self.user);
        let status = choice(
            &mut errors,
            "status",
            self.status.as_deref(),
            Some(WishStatus::default()),
        );

        match (event_id, user, status) {
            (Some(event_id), Some(user), Some(status)) => Ok(WishData {
                event_id,
                user,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinForm {
    pub user: Option<i64>,
    pub gain_type: Option<String>,
    pub gain_coin: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinData {
    pub user: UserId,
    pub gain_type: GainType,
    pub gain_coin: i64,
    pub status: CoinStatus,
}

impl CoinForm {
    pub fn clean(&self) -> Result<CoinData, FieldErrors> {
        let mut errors = FieldErrors::new();
        let user = user(&mut errors, "user", self.user);
        let gain_type = choice(&mut errors, "gain_type", self.gain_type.as_deref(), None);
        let gain_coin = non_negative(&mut errors, "gain_coin", self.gain_coin, None);
        let status = choice(
            &mut errors,
            "status",
            self.status.as_deref(),
            Some(CoinStatus::default()),
        );

        match (user, gain_type, gain_coin, status) {
            (Some(user), Some(gain_type), Some(gain_coin), Some(status)) => Ok(CoinData {
                user,
                gain_type,
                gain_coin,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_form_requires_attend_status() {
        let errors = MemberForm {
            event: Some(1),
            user: Some(7),
            attend_status: None,
            status: None,
        }
        .clean()
        .unwrap_err();
        assert!(errors.contains("attend_status"));
        assert!(!errors.contains("status"));
    }

    #[test]
    fn test_member_form_rejects_unknown_attend_status() {
        let errors = MemberForm {
            event: Some(1),
            user: Some(7),
            attend_status: Some("late".to_string()),
            status: None,
        }
        .clean()
        .unwrap_err();
        assert!(errors.get("attend_status").unwrap()[0].contains("late"));
    }

    #[test]
    fn test_wish_form_defaults_status() {
        let data = WishForm {
            event: Some(3),
            user: Some(9),
            status: None,
        }
        .clean()
        .unwrap();
        assert_eq!(data.status, WishStatus::Active);
        assert_eq!(data.user, UserId::new(9));
    }

    #[test]
    fn test_wish_form_rejects_non_positive_ids() {
        let errors = WishForm {
            event: Some(0),
            user: Some(-4),
            status: None,
        }
        .clean()
        .unwrap_err();
        assert!(errors.contains("event"));
        assert!(errors.contains("user"));
    }

    #[test]
    fn test_coin_form_rejects_negative_amount() {
        let errors = CoinForm {
            user: Some(1),
            gain_type: Some("bonus".to_string()),
            gain_coin: Some(-5),
            status: None,
        }
        .clean()
        .unwrap_err();
        assert!(errors.contains("gain_coin"));
    }
}
