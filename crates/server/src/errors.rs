use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use tracing::{error, warn};

/// Which hospital operation produced a result; drives failure wording and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HospitalOp {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl HospitalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            HospitalOp::List => "list",
            HospitalOp::Get => "get",
            HospitalOp::Create => "create",
            HospitalOp::Update => "update",
            HospitalOp::Delete => "delete",
        }
    }

    fn storage_failure_message(self) -> &'static str {
        match self {
            HospitalOp::Create => "Error saving hospital data",
            HospitalOp::Update => "Error updating hospital data",
            HospitalOp::Delete => "Error deleting hospital data",
            HospitalOp::List | HospitalOp::Get => "Error reading hospital data",
        }
    }
}

/// Plain-text error response: status code plus a short reason.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn from_service(op: HospitalOp, err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Hospital not found"),
            ServiceError::AlreadyExists(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Hospital with this ID already exists")
            }
            ServiceError::Persistence(_) | ServiceError::MalformedState(_) => {
                error!(op = op.as_str(), error = %err, "hospital storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, op.storage_failure_message())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, reason = %self.message, "request rejected");
        }
        (self.status, self.message).into_response()
    }
}
