use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;

use crate::posts::RETRIEVAL_FAILED;
use crate::Error;

pub const UPSTREAM_FAILED: &str = "failed to retrieve data from the database service";
pub const NO_POSTS: &str = "no posts found";

/// Error returned to HTTP callers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    data: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    status_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::UpstreamQuery(upstream) => {
                let error = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILED);
                match serde_json::to_value(&upstream) {
                    Ok(data) => error.with_data(data),
                    Err(_) => error,
                }
            }
            Error::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, NO_POSTS),
            _ => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, RETRIEVAL_FAILED),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            status_message: self.message,
            data: self.data,
        };
        (self.status, Json(body)).into_response()
    }
}
