//! Error taxonomy shared by every handler.
//!
//! Each variant maps to one HTTP status and a JSON body of the form
//! `{"error": kind, "message": text, "field": name?}`. Storage and hashing
//! failures are logged here and surfaced as a bare `500` so internals never
//! reach the client.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad or missing input; `field` names the offending member when known.
    #[error("{message}")]
    Validation {
        field: Option<&'static str>,
        message: String,
    },
    /// Uniqueness violation on registration.
    #[error("{message}")]
    Conflict {
        field: &'static str,
        message: String,
    },
    #[error("{0}")]
    Auth(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    /// Arithmetic that cannot produce a representable result.
    #[error("{0}")]
    Domain(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body returned for every failed request.
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field),
            message: message.into(),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            field,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::Auth(_) => "auth_error",
            Self::NotFound(_) => "not_found",
            Self::Domain(_) => "domain_error",
            Self::Database(_) | Self::Internal(_) => "internal_error",
        }
    }

    fn body(&self) -> ErrorBody {
        let (message, field) = match self {
            Self::Validation { field, message } => (message.clone(), field.map(str::to_string)),
            Self::Conflict { field, message } => (message.clone(), Some((*field).to_string())),
            Self::Database(_) | Self::Internal(_) => ("Internal server error".to_string(), None),
            other => (other.to_string(), None),
        };
        ErrorBody {
            error: self.kind().to_string(),
            message,
            field,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(err) => error!("Database error: {err}"),
            Self::Internal(message) => error!("Internal error: {message}"),
            _ => {}
        }

        let status = self.status();
        let mut response = (status, Json(self.body())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> Result<(StatusCode, ErrorBody, Option<HeaderValue>)> {
        let response = err.into_response();
        let status = response.status();
        let challenge = response.headers().get(WWW_AUTHENTICATE).cloned();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&bytes)?, challenge))
    }

    #[tokio::test]
    async fn validation_error_names_field() -> Result<()> {
        let (status, body, _) =
            body_of(ApiError::validation("confirm_password", "Passwords do not match")).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "validation_error");
        assert_eq!(body.field.as_deref(), Some("confirm_password"));
        assert_eq!(body.message, "Passwords do not match");
        Ok(())
    }

    #[tokio::test]
    async fn auth_error_carries_bearer_challenge() -> Result<()> {
        let (status, body, challenge) = body_of(ApiError::Auth("Invalid token")).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "auth_error");
        assert_eq!(challenge, Some(HeaderValue::from_static("Bearer")));
        Ok(())
    }

    #[tokio::test]
    async fn internal_errors_hide_details() -> Result<()> {
        let (status, body, _) = body_of(ApiError::Database(sqlx::Error::RowNotFound)).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal_error");
        assert_eq!(body.message, "Internal server error");
        assert!(body.field.is_none());
        Ok(())
    }

    #[test]
    fn conflict_and_domain_statuses() {
        assert_eq!(
            ApiError::conflict("email", "Email already registered").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Domain("Division by zero".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("Calculation not found").status(), StatusCode::NOT_FOUND);
    }
}
