use axum::{extract::State, http::StatusCode, response::IntoResponse};
use entity::roster_user::Role;

use crate::{
    model::{
        api::ErrorDto,
        department::{CreateDepartmentDto, DepartmentDto},
    },
    server::{
        controller::util::{
            auth::AuthUser,
            extract::{Json, Path},
        },
        error::Error,
        model::app::AppState,
        service::department::DepartmentService,
    },
};

pub static DEPARTMENT_TAG: &str = "department";

/// List departments
#[utoipa::path(
    get,
    path = "/api/departments",
    tag = DEPARTMENT_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All departments", body = Vec<DepartmentDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_departments(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let departments = DepartmentService::new(&state.db).list().await?;
    let departments: Vec<DepartmentDto> =
        departments.into_iter().map(DepartmentDto::from).collect();

    Ok((StatusCode::OK, Json(departments)))
}

/// Get a department
#[utoipa::path(
    get,
    path = "/api/departments/{department_id}",
    tag = DEPARTMENT_TAG,
    params(("department_id" = i32, Path, description = "Department ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Department", body = DepartmentDto),
        (status = 404, description = "Department not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_department(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(department_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let department = DepartmentService::new(&state.db).get(department_id).await?;

    Ok((StatusCode::OK, Json(DepartmentDto::from(department))))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/api/departments",
    tag = DEPARTMENT_TAG,
    request_body = CreateDepartmentDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Department created", body = DepartmentDto),
        (status = 400, description = "Invalid department", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 409, description = "Name already used", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_department(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDepartmentDto>,
) -> Result<impl IntoResponse, Error> {
    user.require(Role::Admin)?;

    let department = DepartmentService::new(&state.db).create(input).await?;

    Ok((StatusCode::CREATED, Json(DepartmentDto::from(department))))
}
