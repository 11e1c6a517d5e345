use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::UserId;
use crate::models::status::{CategoryStatus, EventStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCategory {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub image: Option<String>,
    pub priority: i64,
    pub status: CategoryStatus,
    pub created_user: UserId,
    pub updated_user: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub scheduled_status: String,
    pub venue: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    pub points: i64,
    pub maximum_attendee: i64,
    pub status: EventStatus,
    pub job_category_id: Option<i64>,
    /// Always null: events are no longer filed under an event category.
    pub category_id: Option<i64>,
    pub created_user: UserId,
    pub updated_user: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImage {
    pub id: i64,
    pub event_id: i64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAgenda {
    pub id: i64,
    pub event_id: i64,
    pub session_name: String,
    pub speaker_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub venue_name: String,
}

/// An event with its owned sub-records and resolved job category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub job_category: Option<JobCategory>,
    pub image: Option<EventImage>,
    pub agenda: Option<EventAgenda>,
}
