//! # REST API for bookings
//!
//! Four handlers mounted under `/api/bookings`, each a direct translation of
//! one store operation into JSON.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use shared::{BookingPayload, MessageResponse, BOOKING_DELETED_MESSAGE, BOOKING_UPDATED_MESSAGE};
use tracing::{error, info};

use crate::domain::BookingService;
use crate::error::{store_message, AppError};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub booking_service: BookingService,
}

impl AppState {
    pub fn new(booking_service: BookingService) -> Self {
        Self { booking_service }
    }
}

/// Routes relative to the `/api/bookings` mount point
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", put(update_booking).delete(delete_booking))
}

fn booking_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// POST /api/bookings
///
/// Any failure, including one raised by the store, is a 400 carrying the raw
/// error message.
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/bookings");

    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    match state.booking_service.create_booking(payload).await {
        Ok(booking) => Ok((StatusCode::CREATED, Json(booking))),
        Err(e) => {
            error!("Error creating booking: {}", e);
            Err(AppError::BadRequest(store_message(&e)))
        }
    }
}

/// GET /api/bookings
pub async fn list_bookings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    info!("GET /api/bookings");

    let bookings = state.booking_service.list_bookings().await?;
    Ok(Json(bookings))
}

/// PUT /api/bookings/:id
pub async fn update_booking(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BookingPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = booking_id(path)?;
    info!("PUT /api/bookings/{}", id);

    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    state.booking_service.update_booking(id, payload).await?;

    Ok(Json(MessageResponse::new(BOOKING_UPDATED_MESSAGE)))
}

/// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = booking_id(path)?;
    info!("DELETE /api/bookings/{}", id);

    state.booking_service.delete_booking(id).await?;

    Ok(Json(MessageResponse::new(BOOKING_DELETED_MESSAGE)))
}
