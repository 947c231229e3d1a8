mod categories;
mod questions;
mod quizzes;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::server::deserializers::deserialize_lenient_page;
use crate::trivia::{Page, TriviaError};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

pub type ApiResponse<T> = Result<Json<Success<T>>, ApiError>;

#[derive(Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

pub fn success<T>(body: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        body,
    })
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<i64>,
}

impl PageQuery {
    fn page(&self) -> Page {
        Page::new(self.page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    NotFound,
    Unprocessable,
    MethodNotAllowed,
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::NotFound => "resource not found",
            ApiError::Unprocessable => "unprocessable",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Internal => "internal server error",
        }
    }

    /// For endpoints where every failure is reported as 422.
    pub fn unprocessable(error: TriviaError) -> Self {
        tracing::warn!("Unprocessable request: {error}");
        ApiError::Unprocessable
    }
}

impl From<TriviaError> for ApiError {
    fn from(error: TriviaError) -> Self {
        match error {
            TriviaError::Validation(_) => {
                tracing::warn!("{error}");
                ApiError::Unprocessable
            }
            TriviaError::NotFound(_) => {
                tracing::info!("{error}");
                ApiError::NotFound
            }
            TriviaError::Storage(_) => {
                tracing::error!("{error}");
                ApiError::Internal
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::Unprocessable
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::info!("Rejected path: {}", rejection.body_text());
        ApiError::NotFound
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
