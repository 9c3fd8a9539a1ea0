use std::fmt;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::middleware::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    Forbidden,
    AuthFailNoToken,
    EntityFailIdNotFound { ident: String },
    ValidationErrors { value: String },
    SurrealDb { source: String },
}

/// Error carrying the request id reported to the client. Implements IntoResponse.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Any error produced before a request id is attached.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

impl CtxError {
    pub fn new(error: AppError, req_id: Uuid) -> Self {
        Self { error, req_id }
    }

    // for slightly less verbose error mappings
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            error: err.into(),
            req_id: ctx.req_id(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        AppError::from(value).into()
    }
}

impl From<ValidationErrors> for CtxError {
    fn from(value: ValidationErrors) -> Self {
        AppError::from(value).into()
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::AuthFailNoToken => write!(f, "You are not logged in"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::ValidationErrors { value } => write!(f, "{value}"),
            Self::SurrealDb { .. } => write!(f, "{INTERNAL}"),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EntityFailIdNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::AuthFailNoToken => StatusCode::UNAUTHORIZED,
            AppError::Generic { .. } | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
            AppError::SurrealDb { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    pub error: String,
    pub req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.error.status_code();
        if status_code.is_server_error() {
            error!(req_id = %self.req_id, error = ?self.error, "request failed");
        }
        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, Json(body)).into_response();
        // the real error is kept for the trace layer
        response.extensions_mut().insert(self.error);
        response
    }
}

// External Errors
impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::SurrealDb {
            source: value.to_string(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::ValidationErrors {
            value: value.to_string(),
        }
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}
