//! Computer-aided dispatch: units, calls and the live event socket.
//!
//! Every write is broadcast to connected dispatch clients after it is stored. Dispatch is
//! limited to members; candidates cannot see or touch it. Announcements need a supervisor.

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    http::StatusCode,
    response::IntoResponse,
};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        cad::{
            AnnouncementDto, CadSearchDto, CallDto, CreateAnnouncementDto, CreateCallDto,
            CreateUnitDto, SearchQuery, SocketQuery, UnitDto, UpdateCallDto, UpdateUnitStatusDto,
        },
    },
    server::{
        cad::socket::serve_socket,
        controller::util::{
            auth::{user_from_token, AuthUser},
            extract::{Json, Path, Query},
        },
        error::Error,
        model::app::AppState,
        service::cad::CadService,
    },
};

pub static CAD_TAG: &str = "cad";

#[utoipa::path(
    get,
    path = "/api/cad/units",
    tag = CAD_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Units", body = Vec<UnitDto>),
        (status = 403, description = "Member role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_units(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Member)?;

    let units = CadService::new(&state.db, &state.cad).list_units().await?;
    let units: Vec<UnitDto> = units.into_iter().map(UnitDto::from).collect();

    Ok((StatusCode::OK, Json(units)))
}

/// Register a unit, optionally owned by the current user
#[utoipa::path(
    post,
    path = "/api/cad/units",
    tag = CAD_TAG,
    request_body = CreateUnitDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Unit created", body = UnitDto),
        (status = 400, description = "Empty callsign", body = ErrorDto),
        (status = 403, description = "Member role required", body = ErrorDto),
        (status = 409, description = "Callsign already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_unit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateUnitDto>,
) -> Result<impl IntoResponse, Error> {
    let member = user.require(Role::Member)?;

    let unit = CadService::new(&state.db, &state.cad)
        .create_unit(member.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(UnitDto::from(unit))))
}

#[utoipa::path(
    put,
    path = "/api/cad/units/{unit_id}/status",
    tag = CAD_TAG,
    params(("unit_id" = i32, Path, description = "Unit ID")),
    request_body = UpdateUnitStatusDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unit updated", body = UnitDto),
        (status = 403, description = "Member role required", body = ErrorDto),
        (status = 404, description = "Unit not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_unit_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(unit_id): Path<i32>,
    Json(input): Json<UpdateUnitStatusDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Member)?;

    let unit = CadService::new(&state.db, &state.cad)
        .update_unit_status(unit_id, input.status)
        .await?;

    Ok((StatusCode::OK, Json(UnitDto::from(unit))))
}

#[utoipa::path(
    get,
    path = "/api/cad/calls",
    tag = CAD_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Calls", body = Vec<CallDto>),
        (status = 403, description = "Member role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_calls(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Member)?;

    let calls = CadService::new(&state.db, &state.cad).list_calls().await?;
    let calls: Vec<CallDto> = calls.into_iter().map(CallDto::from).collect();

    Ok((StatusCode::OK, Json(calls)))
}

#[utoipa::path(
    post,
    path = "/api/cad/calls",
    tag = CAD_TAG,
    request_body = CreateCallDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Call created", body = CallDto),
        (status = 400, description = "Invalid call", body = ErrorDto),
        (status = 403, description = "Member role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_call(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateCallDto>,
) -> Result<impl IntoResponse, Error> {
    let member = user.require(Role::Member)?;

    let call = CadService::new(&state.db, &state.cad)
        .create_call(member.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(CallDto::from(call))))
}

/// Update a call's status, assignment, priority or description
///
/// Moving a call to `closed` broadcasts `call_closed` instead of `call_updated`.
#[utoipa::path(
    put,
    path = "/api/cad/calls/{call_id}",
    tag = CAD_TAG,
    params(("call_id" = i32, Path, description = "Call ID")),
    request_body = UpdateCallDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Call updated", body = CallDto),
        (status = 400, description = "Invalid priority or unknown unit", body = ErrorDto),
        (status = 403, description = "Member role required", body = ErrorDto),
        (status = 404, description = "Call not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_call(
    State(state): State<AppState>,
    user: AuthUser,
    Path(call_id): Path<i32>,
    Json(input): Json<UpdateCallDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Member)?;

    let call = CadService::new(&state.db, &state.cad)
        .update_call(call_id, input)
        .await?;

    Ok((StatusCode::OK, Json(CallDto::from(call))))
}

/// Substring search over call titles, call locations and unit callsigns
#[utoipa::path(
    get,
    path = "/api/cad/search",
    tag = CAD_TAG,
    params(SearchQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching calls and units", body = CadSearchDto),
        (status = 400, description = "Empty query", body = ErrorDto),
        (status = 403, description = "Member role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Member)?;

    let (calls, units) = CadService::new(&state.db, &state.cad)
        .search(&query.q)
        .await?;

    Ok((
        StatusCode::OK,
        Json(CadSearchDto {
            calls: calls.into_iter().map(CallDto::from).collect(),
            units: units.into_iter().map(UnitDto::from).collect(),
        }),
    ))
}

/// Broadcast an announcement to every connected dispatch client
///
/// Delivered on the `general` channel as an `announcement` event. Announcements are not stored.
#[utoipa::path(
    post,
    path = "/api/cad/announcements",
    tag = CAD_TAG,
    request_body = CreateAnnouncementDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Announcement broadcast", body = AnnouncementDto),
        (status = 400, description = "Empty or overlong message", body = ErrorDto),
        (status = 403, description = "Supervisor role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn announce(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateAnnouncementDto>,
) -> Result<impl IntoResponse, Error> {
    let supervisor = user.require(Role::Supervisor)?;

    let announcement = CadService::new(&state.db, &state.cad)
        .announce(supervisor, input.message)
        .await?;

    Ok((StatusCode::OK, Json(announcement)))
}

/// Upgrade to the dispatch event socket
///
/// The token is verified before the upgrade; clients start subscribed to `general`.
#[utoipa::path(
    get,
    path = "/api/cad/ws",
    tag = CAD_TAG,
    params(SocketQuery),
    responses(
        (status = 101, description = "Switching to the WebSocket protocol"),
        (status = 400, description = "Missing token parameter", body = ErrorDto),
        (status = 401, description = "Invalid token", body = ErrorDto),
        (status = 403, description = "Member role required", body = ErrorDto)
    ),
)]
pub async fn socket(
    State(state): State<AppState>,
    Query(query): Query<SocketQuery>,
    upgrade: WebSocketUpgrade,
) -> Result<impl IntoResponse, Error> {
    let user = AuthUser(user_from_token(&state, &query.token).await?);
    user.require(Role::Member)?;

    let broadcaster = state.cad.clone();
    let user_id = user.0.id;

    Ok(upgrade.on_upgrade(move |socket| serve_socket(socket, broadcaster, user_id)))
}
