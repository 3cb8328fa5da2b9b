use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use service::errors::ServiceError;
use service::students::{Student, StudentId, StudentInput, StudentRecord};
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability;
use crate::routes::ServerState;

/// Any well-formed integer is accepted; one outside the id range cannot name a stored student.
fn parse_id(raw: &str) -> Result<StudentId, JsonApiError> {
    if let Ok(id) = raw.parse::<StudentId>() {
        return Ok(id);
    }
    let digits = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServiceError::not_found("Student").into());
    }
    Err(JsonApiError::new(StatusCode::BAD_REQUEST, format!("Invalid student id: {raw}")))
}

fn track<T>(operation: &str, result: &Result<T, ServiceError>) {
    let outcome = result.as_ref().map_or_else(|e| e.kind(), |_| "ok");
    observability::record(operation, outcome);
}

#[utoipa::path(
    post,
    path = "/student",
    tag = "students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::StudentDoc),
        (status = 400, description = "Digits, empty field, or duplicate name pair", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_student(
    State(state): State<ServerState>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Json(input) = payload?;
    let result = state.students.create(input).await;
    track("create", &result);
    Ok(Json(result?))
}

#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses((status = 200, description = "All students in insertion order, without ids", body = [crate::openapi::StudentRecordDoc]))
)]
pub async fn list_students(State(state): State<ServerState>) -> Json<Vec<StudentRecord>> {
    let list = state.students.list().await;
    info!(count = list.len(), "list students");
    observability::record("list", "ok");
    Json(list)
}

#[utoipa::path(
    get,
    path = "/student/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentDoc),
        (status = 404, description = "Student not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_student(
    State(state): State<ServerState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;
    let result = state.students.get(id).await;
    track("get", &result);
    Ok(Json(result?))
}

#[utoipa::path(
    patch,
    path = "/student/{id}",
    tag = "students",
    params(("id" = i64, Path, description = "Student id")),
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StudentDoc),
        (status = 400, description = "Digits, empty field, or duplicate name pair", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Student not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_student(
    State(state): State<ServerState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Path(raw) = id?;
    let id = parse_id(&raw)?;
    let Json(input) = payload?;
    let result = state.students.update(id, input).await;
    track("update", &result);
    Ok(Json(result?))
}
