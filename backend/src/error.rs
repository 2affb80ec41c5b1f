use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// The message the database itself reported, falling back to sqlx's description
pub fn store_message(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Store(err) => {
                tracing::error!("{self}");
                (StatusCode::INTERNAL_SERVER_ERROR, store_message(err))
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
