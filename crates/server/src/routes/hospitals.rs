use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::error::Category;
use service::errors::ServiceError;
use service::hospital::{Hospital, HospitalInput};
use tracing::{debug, error, info};

use crate::errors::{ApiError, HospitalOp};
use crate::observability;
use crate::routes::AppState;

fn outcome<T>(op: HospitalOp, res: Result<T, ServiceError>) -> Result<T, ApiError> {
    match res {
        Ok(v) => {
            observability::record(op, "ok");
            Ok(v)
        }
        Err(e) => {
            let label = match &e {
                ServiceError::NotFound(_) => "not_found",
                ServiceError::AlreadyExists(_) => "conflict",
                ServiceError::Persistence(_) | ServiceError::MalformedState(_) => "error",
            };
            observability::record(op, label);
            Err(ApiError::from_service(op, e))
        }
    }
}

/// Decode a create/update body. An empty body (or one without a content type)
/// counts as `{}`; broken JSON is 400 and mistyped fields are 422.
pub(crate) fn parse_input(body: &[u8]) -> Result<HospitalInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(HospitalInput::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        let status = match e.classify() {
            Category::Data => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::new(status, format!("Invalid hospital body: {e}"))
    })
}

#[utoipa::path(
    get, path = "/hospitals", tag = "hospitals",
    responses((status = 200, description = "All hospitals", body = [crate::openapi::HospitalDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Json<Vec<Hospital>> {
    match state.hospitals.try_list().await {
        Ok(items) => {
            observability::record(HospitalOp::List, "ok");
            debug!(count = items.len(), "list hospitals");
            Json(items)
        }
        Err(e) => {
            // still 200 with an empty array
            error!(error = %e, "hospital list degraded to empty");
            observability::record(HospitalOp::List, "degraded");
            Json(Vec::new())
        }
    }
}

#[utoipa::path(
    get, path = "/hospitals/{id}", tag = "hospitals",
    params(("id" = i64, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::HospitalDoc),
        (status = 404, description = "Hospital not found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Hospital>, ApiError> {
    let h = outcome(HospitalOp::Get, state.hospitals.get(id).await)?;
    Ok(Json(h))
}

#[utoipa::path(
    post, path = "/hospitals/{id}", tag = "hospitals",
    params(("id" = i64, Path, description = "Hospital ID, chosen by the caller")),
    request_body = crate::openapi::HospitalInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::HospitalDoc),
        (status = 400, description = "Hospital with this ID already exists"),
        (status = 500, description = "Error saving hospital data")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<(StatusCode, Json<Hospital>), ApiError> {
    let input = parse_input(&body)?;
    let h = outcome(HospitalOp::Create, state.hospitals.create(id, input).await)?;
    info!(id = h.id, name = %h.hospital_name, "created hospital");
    Ok((StatusCode::CREATED, Json(h)))
}

#[utoipa::path(
    put, path = "/hospitals/{id}", tag = "hospitals",
    params(("id" = i64, Path, description = "Hospital ID")),
    request_body = crate::openapi::HospitalInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::HospitalDoc),
        (status = 404, description = "Hospital not found"),
        (status = 500, description = "Error updating hospital data")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<Hospital>, ApiError> {
    let input = parse_input(&body)?;
    let h = outcome(HospitalOp::Update, state.hospitals.update(id, input).await)?;
    info!(id = h.id, "updated hospital");
    Ok(Json(h))
}

#[utoipa::path(
    delete, path = "/hospitals/{id}", tag = "hospitals",
    params(("id" = i64, Path, description = "Hospital ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Hospital not found"),
        (status = 500, description = "Error deleting hospital data")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    outcome(HospitalOp::Delete, state.hospitals.delete(id).await)?;
    info!(id, "deleted hospital");
    Ok(StatusCode::NO_CONTENT)
}
