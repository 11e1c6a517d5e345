use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{choice, date, non_negative, optional_text, required_text, time};
use crate::error::FieldErrors;
use crate::models::{CategoryStatus, EventStatus};

pub const DEFAULT_SCHEDULED_STATUS: &str = "yet to scheduled";

/// Event fields shared by the create and update paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub scheduled_status: Option<String>,
    pub venue: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub points: Option<i64>,
    pub maximum_attendee: Option<i64>,
    pub status: Option<String>,
    /// Accepted for compatibility and ignored; events never keep a category.
    pub category: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventData {
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
}

impl EventForm {
    pub fn clean(&self) -> Result<EventData, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(&mut errors, "name", self.name.as_deref());
        let description = optional_text(&mut errors, "description", self.description.as_deref(), "");
        let scheduled_status = optional_text(
            &mut errors,
            "scheduled_status",
            self.scheduled_status.as_deref(),
            DEFAULT_SCHEDULED_STATUS,
        );
        let venue = required_text(&mut errors, "venue", self.venue.as_deref());
        let start_date = date(&mut errors, "start_date", self.start_date.as_deref());
        let end_date = date(&mut errors, "end_date", self.end_date.as_deref());
        let location = required_text(&mut errors, "location", self.location.as_deref());
        let points = non_negative(&mut errors, "points", self.points, Some(0));
        let maximum_attendee =
            non_negative(&mut errors, "maximum_attendee", self.maximum_attendee, None);
        let status = choice(
            &mut errors,
            "status",
            self.status.as_deref(),
            Some(EventStatus::default()),
        );

        match (name, venue, start_date, end_date, location, points, maximum_attendee, status) {
            (
                Some(name),
                Some(venue),
                Some(start_date),
                Some(end_date),
                Some(location),
                Some(points),
                Some(maximum_attendee),
                Some(status),
            ) if errors.is_empty() => Ok(EventData {
                name,
                description,
                scheduled_status,
                venue,
                start_date,
                end_date,
                location,
                points,
                maximum_attendee,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventImageForm {
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub image: String,
}

impl EventImageForm {
    pub fn clean(&self) -> Result<NewImage, FieldErrors> {
        let mut errors = FieldErrors::new();
        match required_text(&mut errors, "image", self.image.as_deref()) {
            Some(image) => Ok(NewImage { image }),
            None => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventAgendaForm {
    pub session_name: Option<String>,
    pub speaker_name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub venue_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgenda {
    pub session_name: String,
    pub speaker_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub venue_name: String,
}

impl EventAgendaForm {
    pub fn clean(&self) -> Result<NewAgenda, FieldErrors> {
        let mut errors = FieldErrors::new();
        let session_name = required_text(&mut errors, "session_name", self.session_name.as_deref());
        let speaker_name = required_text(&mut errors, "speaker_name", self.speaker_name.as_deref());
        let start_time = time(&mut errors, "start_time", self.start_time.as_deref());
        let end_time = time(&mut errors, "end_time", self.end_time.as_deref());
        let venue_name = required_text(&mut errors, "venue_name", self.venue_name.as_deref());

        match (session_name, speaker_name, start_time, end_time, venue_name) {
            (Some(session_name), Some(speaker_name), Some(start_time), Some(end_time), Some(venue_name)) => {
                Ok(NewAgenda {
                    session_name,
                    speaker_name,
                    start_time,
                    end_time,
                    venue_name,
                })
            }
            _ => Err(errors),
        }
    }
}

/// The three forms submitted together when an event is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCreateForm {
    #[serde(default)]
    pub event: EventForm,
    pub job_category_name: Option<String>,
    #[serde(default)]
    pub event_image: EventImageForm,
    #[serde(default)]
    pub event_agenda: EventAgendaForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedEventCreate {
    pub event: EventData,
    pub job_category_name: Option<String>,
    pub image: NewImage,
    pub agenda: NewAgenda,
}

impl EventCreateForm {
    /// Validates all three forms independently so every problem is reported
    /// at once, with field names prefixed by the form they belong to.
    pub fn clean(&self) -> Result<CleanedEventCreate, FieldErrors> {
        let event = self.event.clean();
        let image = self.event_image.clean();
        let agenda = self.event_agenda.clean();

        match (event, image, agenda) {
            (Ok(event), Ok(image), Ok(agenda)) => Ok(CleanedEventCreate {
                event,
                job_category_name: self.job_category_name.clone(),
                image,
                agenda,
            }),
            (event, image, agenda) => {
                let mut errors = FieldErrors::new();
                if let Err(e) = event {
                    errors.merge_prefixed("event", e);
                }
                if let Err(e) = image {
                    errors.merge_prefixed("event_image", e);
                }
                if let Err(e) = agenda {
                    errors.merge_prefixed("event_agenda", e);
                }
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdateForm {
    #[serde(flatten)]
    pub event: EventForm,
    pub job_category_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventStatusForm {
    pub status: Option<String>,
}

impl EventStatusForm {
    pub fn clean(&self) -> Result<EventStatus, FieldErrors> {
        let mut errors = FieldErrors::new();
        choice(&mut errors, "status", self.status.as_deref(), None).ok_or(errors)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCategoryForm {
    pub name: Option<String>,
    pub code: Option<String>,
    pub image: Option<String>,
    pub priority: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCategoryData {
    pub name: String,
    pub code: String,
    pub image: Option<String>,
    pub priority: i64,
    pub status: CategoryStatus,
}

impl EventCategoryForm {
    pub fn clean(&self) -> Result<EventCategoryData, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", self.name.as_deref());
        let code = required_text(&mut errors, "code", self.code.as_deref());
        let image = Some(optional_text(&mut errors, "image", self.image.as_deref(), ""))
            .filter(|image| !image.is_empty());
        let priority = non_negative(&mut errors, "priority", self.priority, Some(0));
        let status = choice(
            &mut errors,
            "status",
            self.status.as_deref(),
            Some(CategoryStatus::default()),
        );

        match (name, code, priority, status) {
            (Some(name), Some(code), Some(priority), Some(status)) if errors.is_empty() => {
                Ok(EventCategoryData {
                    name,
                    code,
                    image,
                    priority,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCategoryForm {
    pub name: Option<String>,
}

impl JobCategoryForm {
    pub fn clean(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        required_text(&mut errors, "name", self.name.as_deref()).ok_or(errors)
    }
}

/// Search box submission; `search` may be missing or blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchForm {
    pub search: Option<String>,
}
