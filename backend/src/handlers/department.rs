//! Department handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shared::models::{Department, DepartmentOptions, NewDepartment};
use validator::Validate;

use crate::error::AppResult;
use crate::services::DepartmentService;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct DepartmentInput {
    #[validate(length(max = 80, message = "Department name must be at most 80 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "Choose an icon"))]
    pub icon: String,
    #[validate(length(min = 1, message = "Choose a color"))]
    pub color: String,
}

impl From<DepartmentInput> for NewDepartment {
    fn from(input: DepartmentInput) -> Self {
        NewDepartment {
            name: input.name,
            description: input.description,
            icon: input.icon,
            color: input.color,
        }
    }
}

pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    let service = DepartmentService::new(state.api);
    Ok(Json(service.list().await?))
}

pub async fn get_department_options(
    State(state): State<AppState>,
) -> AppResult<Json<DepartmentOptions>> {
    let service = DepartmentService::new(state.api);
    Ok(Json(service.options().await?))
}

pub async fn create_department(
    State(state): State<AppState>,
    Json(input): Json<DepartmentInput>,
) -> AppResult<(StatusCode, Json<Department>)> {
    input.validate()?;

    let service = DepartmentService::new(state.api);
    let department = service.create(NewDepartment::from(input)).await?;
    Ok((StatusCode::CREATED, Json(department)))
}
