// Catalog routes: event categories, job categories and events

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::deleted;
use super::extract::FormJson;
use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::forms::{
    filter_choice, EventCategoryForm, EventCreateForm, EventStatusForm, EventUpdateForm,
    JobCategoryForm, SearchForm,
};
use crate::infrastructure::middleware::Vc;
use crate::models::{Event, EventCategory, EventDetail, EventStatus, JobCategory};

#[derive(Debug, Default, Deserialize)]
pub struct EventListQuery {
    pub status: Option<String>,
}

// Event categories

pub async fn list_event_categories_handler(
    State(state): State<AppState>,
    _vc: Vc,
) -> AppResult<Json<Vec<EventCategory>>> {
    Ok(Json(state.event_categories.list().await?))
}

pub async fn create_event_category_handler(
    State(state): State<AppState>,
    vc: Vc,
    FormJson(form): FormJson<EventCategoryForm>,
) -> AppResult<(StatusCode, Json<EventCategory>)> {
    let category = state.event_categories.create(&form, vc.user()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_event_category_handler(
    State(state): State<AppState>,
    _vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<EventCategory>> {
    Ok(Json(state.event_categories.get(id).await?))
}

pub async fn update_event_category_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
    FormJson(form): FormJson<EventCategoryForm>,
) -> AppResult<Json<EventCategory>> {
    Ok(Json(state.event_categories.update(id, &form, vc.user()).await?))
}

pub async fn delete_event_category_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<Value>> {
    state.event_categories.delete(id, vc.user()).await?;
    Ok(deleted(id))
}

pub async fn search_event_categories_handler(
    State(state): State<AppState>,
    _vc: Vc,
    FormJson(form): FormJson<SearchForm>,
) -> AppResult<Json<Vec<EventCategory>>> {
    Ok(Json(state.search.search_event_categories(form.search.as_deref()).await?))
}

// Job categories

pub async fn list_job_categories_handler(
    State(state): State<AppState>,
    _vc: Vc,
) -> AppResult<Json<Vec<JobCategory>>> {
    Ok(Json(state.job_categories.list().await?))
}

pub async fn create_job_category_handler(
    State(state): State<AppState>,
    vc: Vc,
    FormJson(form): FormJson<JobCategoryForm>,
) -> AppResult<(StatusCode, Json<JobCategory>)> {
    let category = state.job_categories.create(&form, vc.user()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_job_category_handler(
    State(state): State<AppState>,
    _vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<JobCategory>> {
    Ok(Json(state.job_categories.get(id).await?))
}

pub async fn rename_job_category_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
    FormJson(form): FormJson<JobCategoryForm>,
) -> AppResult<Json<JobCategory>> {
    Ok(Json(state.job_categories.rename(id, &form, vc.user()).await?))
}

pub async fn delete_job_category_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<Value>> {
    state.job_categories.delete(id, vc.user()).await?;
    Ok(deleted(id))
}

// Events

pub async fn list_events_handler(
    State(state): State<AppState>,
    _vc: Vc,
    Query(params): Query<EventListQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let status: Option<EventStatus> =
        filter_choice("status", params.status.as_deref()).map_err(AppError::Validation)?;
    Ok(Json(state.events.list(status).await?))
}

pub async fn list_completed_events_handler(
    State(state): State<AppState>,
    _vc: Vc,
) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(state.events.list_completed().await?))
}

pub async fn create_event_handler(
    State(state): State<AppState>,
    vc: Vc,
    FormJson(form): FormJson<EventCreateForm>,
) -> AppResult<(StatusCode, Json<EventDetail>)> {
    let detail = state.events.create_event(&form, vc.user()).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn get_event_handler(
    State(state): State<AppState>,
    _vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<EventDetail>> {
    Ok(Json(state.events.get_detail(id).await?))
}

pub async fn update_event_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
    FormJson(form): FormJson<EventUpdateForm>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.events.update_event(id, &form, vc.user()).await?))
}

pub async fn update_event_status_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
    FormJson(form): FormJson<EventStatusForm>,
) -> AppResult<Json<Event>> {
    Ok(Json(state.events.update_status(id, &form, vc.user()).await?))
}

pub async fn delete_event_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<Value>> {
    state.events.delete_event(id, vc.user()).await?;
    Ok(deleted(id))
}

pub async fn search_events_handler(
    State(state): State<AppState>,
    _vc: Vc,
    FormJson(form): FormJson<SearchForm>,
) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(state.search.search_events(form.search.as_deref()).await?))
}

pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        // Event categories
        .route(
            "/event-categories",
            get(list_event_categories_handler).post(create_event_category_handler),
        )
        .route("/event-categories/search", post(search_event_categories_handler))
        .route(
            "/event-categories/{id}",
            get(get_event_category_handler)
                .put(update_event_category_handler)
                .delete(delete_event_category_handler),
        )
        // Job categories
        .route(
            "/job-categories",
            get(list_job_categories_handler).post(create_job_category_handler),
        )
        .route(
            "/job-categories/{id}",
            get(get_job_category_handler)
                .put(rename_job_category_handler)
                .delete(delete_job_category_handler),
        )
        // Events
        .route("/events", get(list_events_handler).post(create_event_handler))
        .route("/events/completed", get(list_completed_events_handler))
        .route("/events/search", post(search_events_handler))
        .route(
            "/events/{id}",
            get(get_event_handler)
                .put(update_event_handler)
                .delete(delete_event_handler),
        )
        .route("/events/{id}/status", patch(update_event_status_handler))
}
