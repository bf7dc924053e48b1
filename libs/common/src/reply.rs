//! Structured replies produced by every handler

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::error::ServiceError;

/// Status code plus optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Reply {
    /// Build a reply with a serialized JSON body
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status,
                body: Some(value),
            },
            Err(e) => {
                error!("Failed to serialize reply body: {}", e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: Some(json!({ "message": "internal error" })),
                }
            }
        }
    }

    /// 200 with a JSON body
    pub fn ok<T: Serialize>(body: &T) -> Self {
        Self::json(StatusCode::OK, body)
    }

    /// Status only, no body
    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// Read a string field from the body, following a dotted path such as `user.email`
    pub fn field(&self, path: &str) -> Option<&str> {
        path.split('.')
            .try_fold(self.body.as_ref()?, |value, key| value.get(key))?
            .as_str()
    }
}

impl From<ServiceError> for Reply {
    fn from(err: ServiceError) -> Self {
        let status = err.status();
        match err {
            ServiceError::NotFound(_) => Reply::empty(status),
            other => Reply {
                status,
                body: Some(json!({ "message": other.to_string() })),
            },
        }
    }
}

impl From<Result<Reply, ServiceError>> for Reply {
    fn from(result: Result<Reply, ServiceError>) -> Self {
        result.unwrap_or_else(Reply::from)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}
