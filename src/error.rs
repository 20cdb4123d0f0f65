//! Error types for Mega Zap

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::RecordRole;

/// Application error codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    BadValue = 2,
    MalformedRecord = 3,
    MissingField = 4,
    InvalidContactOrder = 5,
    Duplicate = 6,
}

/// Failure of a processing run. Any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Supplemental information of {role} record is not valid JSON: {source}")]
    MalformedSupplementalInformation {
        role: RecordRole,
        #[source]
        source: serde_json::Error,
    },

    #[error("Supplemental information of {role} record is not a JSON object")]
    SupplementalInformationNotObject { role: RecordRole },

    #[error("{role} record is missing required field '{field}'")]
    MissingField { role: RecordRole, field: &'static str },

    #[error("Cannot resolve a bounding box from no input boxes")]
    EmptyBoundingBoxes,

    #[error("Invalid contact order for {role} record: {reason}")]
    InvalidPermutation { role: RecordRole, reason: String },

    #[error("Contact name '{name}' appears more than once in {role} record")]
    DuplicateContactName { role: RecordRole, name: String },

    #[error("No contact named '{name}' in {role} record")]
    UnknownContactName { role: RecordRole, name: String },

    #[error("File identifier '{0}' is used by more than one record")]
    DuplicateFileIdentifier(String),

    #[error("Failed to serialize {role} record: {source}")]
    Serialization {
        role: RecordRole,
        #[source]
        source: serde_json::Error,
    },
}

impl PipelineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::MalformedSupplementalInformation { .. }
            | PipelineError::SupplementalInformationNotObject { .. } => ErrorCode::MalformedRecord,
            PipelineError::MissingField { .. } | PipelineError::EmptyBoundingBoxes => {
                ErrorCode::MissingField
            }
            PipelineError::InvalidPermutation { .. }
            | PipelineError::DuplicateContactName { .. }
            | PipelineError::UnknownContactName { .. } => ErrorCode::InvalidContactOrder,
            PipelineError::DuplicateFileIdentifier(_) => ErrorCode::Duplicate,
            PipelineError::Serialization { .. } => ErrorCode::Failure,
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Processing failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Pipeline(PipelineError::Serialization { .. }) => {
                tracing::error!("Serialization error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::Pipeline(e) => {
                tracing::warn!("Record processing rejected: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.code(), e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for processing steps
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
