use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::UserId;
use crate::models::status::{AttendStatus, CoinStatus, GainType, RecordStatus, WishStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMember {
    pub id: i64,
    pub event_id: i64,
    pub user: UserId,
    pub attend_status: AttendStatus,
    pub status: RecordStatus,
    pub created_user: UserId,
    pub updated_user: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventUserWish {
    pub id: i64,
    pub event_id: i64,
    pub user: UserId,
    pub status: WishStatus,
    pub created_user: UserId,
    pub updated_user: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCoin {
    pub id: i64,
    pub user: UserId,
    pub gain_type: GainType,
    pub gain_coin: i64,
    pub status: CoinStatus,
    pub created_user: UserId,
    pub updated_user: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
