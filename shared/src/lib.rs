use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod form;

pub use form::{BookingEditor, BookingField, BookingForm, FieldErrors, SubmitAction, ViewMode};

/// Message returned by `PUT /api/bookings/:id`, whether or not a row matched
pub const BOOKING_UPDATED_MESSAGE: &str = "Booking updated successfully";

/// Message returned by `DELETE /api/bookings/:id`, whether or not a row matched
pub const BOOKING_DELETED_MESSAGE: &str = "Booking deleted successfully";

/// A stored hall booking as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    /// Ten digit mobile number of the applicant
    pub mobile_no: String,
    pub hall_name: String,
    pub applicant_name: String,
    pub email: String,
    pub purpose: String,
    pub rent: f64,
    #[serde(default)]
    pub additional_charges: Option<f64>,
    /// rent + additional charges, as computed by the form that submitted it
    pub total: f64,
    #[serde(default)]
    pub remark: Option<String>,
    /// Business receipt number, fixed once the booking is created
    pub receipt_no: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub receipt_date: NaiveDate,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub updated_at: String,
}

/// Request body for creating or updating a booking.
///
/// Every field is optional on the wire: the server performs no business
/// validation and leaves missing required columns to the store, which rejects
/// them. On update, absent required fields keep their stored values while the
/// nullable charge and remark are always overwritten, so they are sent as
/// `null` rather than left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent: Option<f64>,
    pub additional_charges: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_date: Option<NaiveDate>,
}

/// Fixed confirmation returned by update and delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Error body returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// The booking list shapes the client accepts from `GET /api/bookings`.
///
/// The server always answers with a bare array, but proxies and older
/// deployments wrap it as `{ "data": [...] }` or `{ "rows": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BookingListResponse {
    Bare(Vec<Booking>),
    Data { data: Vec<Booking> },
    Rows { rows: Vec<Booking> },
}

impl BookingListResponse {
    pub fn into_bookings(self) -> Vec<Booking> {
        match self {
            BookingListResponse::Bare(bookings)
            | BookingListResponse::Data { data: bookings }
            | BookingListResponse::Rows { rows: bookings } => bookings,
        }
    }
}

/// Decode a list response body in any of the accepted shapes
pub fn decode_booking_list(body: &str) -> Result<Vec<Booking>, serde_json::Error> {
    serde_json::from_str::<BookingListResponse>(body).map(BookingListResponse::into_bookings)
}
