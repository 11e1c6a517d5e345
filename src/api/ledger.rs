// Ledger routes: event members, wishlist entries and user coins

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::deleted;
use super::extract::FormJson;
use crate::app_state::AppState;
use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::forms::{filter_choice, CoinForm, MemberForm, WishForm};
use crate::infrastructure::middleware::Vc;
use crate::models::{AttendStatus, EventMember, EventUserWish, UserCoin};

#[derive(Debug, Default, Deserialize)]
pub struct MemberListQuery {
    pub attend_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CoinListQuery {
    pub user: Option<i64>,
}

pub async fn list_members_handler(
    State(state): State<AppState>,
    _vc: Vc,
    Query(params): Query<MemberListQuery>,
) -> AppResult<Json<Vec<EventMember>>> {
    let attend_status: Option<AttendStatus> =
        filter_choice("attend_status", params.attend_status.as_deref())
            .map_err(AppError::Validation)?;
    Ok(Json(state.memberships.list_members(attend_status).await?))
}

pub async fn list_absent_members_handler(
    State(state): State<AppState>,
    _vc: Vc,
) -> AppResult<Json<Vec<EventMember>>> {
    Ok(Json(state.memberships.list_absent().await?))
}

pub async fn list_completed_members_handler(
    State(state): State<AppState>,
    _vc: Vc,
) -> AppResult<Json<Vec<EventMember>>> {
    Ok(Json(state.memberships.list_completed().await?))
}

pub async fn add_member_handler(
    State(state): State<AppState>,
    vc: Vc,
    FormJson(form): FormJson<MemberForm>,
) -> AppResult<(StatusCode, Json<EventMember>)> {
    let member = state.memberships.add_member(&form, vc.user()).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn remove_member_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<Value>> {
    state.memberships.remove_member(id, vc.user()).await?;
    Ok(deleted(id))
}

pub async fn list_wishes_handler(
    State(state): State<AppState>,
    _vc: Vc,
) -> AppResult<Json<Vec<EventUserWish>>> {
    Ok(Json(state.memberships.list_wishes().await?))
}

pub async fn add_wish_handler(
    State(state): State<AppState>,
    vc: Vc,
    FormJson(form): FormJson<WishForm>,
) -> AppResult<(StatusCode, Json<EventUserWish>)> {
    let wish = state.memberships.add_wish(&form, vc.user()).await?;
    Ok((StatusCode::CREATED, Json(wish)))
}

pub async fn remove_wish_handler(
    State(state): State<AppState>,
    vc: Vc,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<Value>> {
    state.memberships.remove_wish(id, vc.user()).await?;
    Ok(deleted(id))
}

pub async fn list_coins_handler(
    State(state): State<AppState>,
    _vc: Vc,
    Query(params): Query<CoinListQuery>,
) -> AppResult<Json<Vec<UserCoin>>> {
    let user = params.user.map(UserId::new);
    Ok(Json(state.coins.list_gains(user).await?))
}

pub async fn record_coin_handler(
    State(state): State<AppState>,
    vc: Vc,
    FormJson(form): FormJson<CoinForm>,
) -> AppResult<(StatusCode, Json<UserCoin>)> {
    let coin = state.coins.record_gain(&form, vc.user()).await?;
    Ok((StatusCode::CREATED, Json(coin)))
}

pub fn create_ledger_router() -> Router<AppState> {
    Router::new()
        .route("/event-members", get(list_members_handler).post(add_member_handler))
        .route("/event-members/absent", get(list_absent_members_handler))
        .route("/event-members/completed", get(list_completed_members_handler))
        .route("/event-members/{id}", delete(remove_member_handler))
        .route("/event-wishes", get(list_wishes_handler).post(add_wish_handler))
        .route("/event-wishes/{id}", delete(remove_wish_handler))
        .route("/user-coins", get(list_coins_handler).post(record_coin_handler))
}
