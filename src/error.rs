//! HTTP error taxonomy
//!
//! Every failed request maps to one of three shapes:
//! - 404 `{ "message" }`
//! - 400 `{ "message", "errors": [{ "field", "message" }] }`
//! - 500 `{ "message", "error"? }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::poem::{DispatchError, FieldError};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("{message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl ApiError {
    pub fn poem_not_found() -> Self {
        Self::NotFound("Poem not found".to_string())
    }

    pub fn invalid(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    /// 400 for a request that could not be parsed at all
    pub fn bad_request(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::invalid(message, vec![FieldError::general(detail)])
    }

    pub fn internal(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::poem_not_found(),
            StoreError::Invalid(errors) => Self::invalid("Invalid poem data", errors),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match &err {
            DispatchError::InvalidNumber { field, .. } => {
                Self::invalid("Invalid edit value", vec![FieldError::new(field, err.to_string())])
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::NotFound(message) => ErrorBody {
                message,
                errors: None,
                error: None,
            },
            Self::Validation { message, errors } => ErrorBody {
                message,
                errors: Some(errors.as_slice()),
                error: None,
            },
            Self::Internal { message, detail } => ErrorBody {
                message,
                errors: None,
                error: detail.as_deref(),
            },
        };
        (status, Json(body)).into_response()
    }
}
