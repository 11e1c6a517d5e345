// Input forms: raw request payloads and their validation into cleaned data.
//
// Every form keeps its fields loosely typed (strings, optional numbers) so
// that bad input becomes a field-level message instead of a rejected body.

pub mod catalog;
pub mod ledger;

pub use catalog::{
    CleanedEventCreate, EventAgendaForm, EventCategoryData, EventCategoryForm, EventCreateForm,
    EventData, EventForm, EventImageForm, EventStatusForm, EventUpdateForm, JobCategoryForm,
    NewAgenda, NewImage, SearchForm,
};
pub use ledger::{CoinData, CoinForm, MemberData, MemberForm, WishData, WishForm};

use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

use crate::core::UserId;
use crate::error::FieldErrors;

pub const MAX_CHAR_LENGTH: usize = 255;

pub(crate) const REQUIRED: &str = "This field is required.";

/// Trimmed, non-empty text no longer than `MAX_CHAR_LENGTH`.
pub(crate) fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => check_length(errors, field, v),
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

/// Trimmed text that may be blank; blank becomes `default`.
pub(crate) fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    default: &str,
) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => check_length(errors, field, v).unwrap_or_default(),
        None => default.to_string(),
    }
}

fn check_length(errors: &mut FieldErrors, field: &str, value: &str) -> Option<String> {
    let length = value.chars().count();
    if length > MAX_CHAR_LENGTH {
        errors.add(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                MAX_CHAR_LENGTH, length
            ),
        );
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a closed-set value; a missing value falls back to `default` when given.
pub(crate) fn choice<T: FromStr>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    default: Option<T>,
) -> Option<T> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => match raw.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.add(
                    field,
                    format!(
                        "Select a valid choice. {} is not one of the available choices.",
                        raw
                    ),
                );
                None
            }
        },
        None => {
            if default.is_none() {
                errors.add(field, REQUIRED);
            }
            default
        }
    }
}

/// Optional list filter: blank means no filter, anything else must be a valid choice.
pub fn filter_choice<T: FromStr>(field: &str, value: Option<&str>) -> Result<Option<T>, FieldErrors> {
    if value.map(str::trim).filter(|v| !v.is_empty()).is_none() {
        return Ok(None);
    }
    let mut errors = FieldErrors::new();
    match choice(&mut errors, field, value, None) {
        Some(parsed) => Ok(Some(parsed)),
        None => Err(errors),
    }
}

pub(crate) fn date(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.add(field, "Enter a valid date.");
                None
            }
        },
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

pub(crate) fn time(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<NaiveTime> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(raw) => match NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.add(field, "Enter a valid time.");
                None
            }
        },
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

pub(crate) fn non_negative(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<i64>,
    default: Option<i64>,
) -> Option<i64> {
    match value.or(default) {
        Some(v) if v < 0 => {
            errors.add(field, "Ensure this value is greater than or equal to 0.");
            None
        }
        Some(v) => Some(v),
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

pub(crate) fn reference(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<i64> {
    match value {
        Some(id) if id > 0 => Some(id),
        Some(_) => {
            errors.add(field, "Select a valid choice. That choice is not one of the available choices.");
            None
        }
        None => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

pub(crate) fn user(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<UserId> {
    reference(errors, field, value).map(UserId::new)
}
