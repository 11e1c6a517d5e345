// Request body extraction with failures reported through AppError

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use std::error::Error as _;
use std::future::Future;

use crate::error::{AppError, FieldErrors, NON_FIELD_ERRORS};

/// A JSON body deserialized into a form.
///
/// A value of the wrong type is a 422 keyed by its JSON path
/// (`event.points`). A body that is not JSON at all is a 400. Both come back
/// in the usual error envelope instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct FormJson<T>(pub T);

impl<T, S> FromRequest<S> for FormJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request(
        req: Request,
        state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let body = Json::<T>::from_request(req, state);
        async move {
            body.await
                .map(|Json(form)| FormJson(form))
                .map_err(rejection_error)
        }
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The source reads `path: message`, or just `message` at the root.
            let detail = err
                .source()
                .map(ToString::to_string)
                .unwrap_or_else(|| err.body_text());
            AppError::Validation(data_errors(&detail))
        }
        other => AppError::BadRequest(other.body_text()),
    }
}

fn data_errors(detail: &str) -> FieldErrors {
    match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            FieldErrors::single(path, message)
        }
        _ => FieldErrors::single(NON_FIELD_ERRORS, detail),
    }
}
