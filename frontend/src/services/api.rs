use gloo::net::http::{Request, Response};
use shared::{decode_booking_list, Booking, BookingPayload, ErrorResponse, MessageResponse};

/// Used when the build does not set `BOOKING_API_URL`
const DEFAULT_API_URL: &str = "http://localhost:5000/api/bookings";

/// Why the booking list could not be shown
#[derive(Debug, Clone, PartialEq)]
pub enum ListError {
    /// Transport failure or non-success status
    Network(String),
    /// The body was not one of the accepted list shapes
    InvalidFormat(String),
}

impl ListError {
    /// Fixed text shown in place of the page
    pub fn user_message(&self) -> &'static str {
        match self {
            ListError::Network(_) => "Failed to load bookings. Please check backend.",
            ListError::InvalidFormat(_) => "Invalid data format from server",
        }
    }
}

/// API client for the booking endpoints
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client for the URL baked in at build time
    pub fn new() -> Self {
        Self::with_base_url(option_env!("BOOKING_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Create a client for a custom collection URL, e.g. `https://host/api/bookings`
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.base_url
    }

    pub fn booking_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Fetch every booking, accepting a bare array, `{data}` or `{rows}`
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, ListError> {
        let response = Request::get(self.collection_url())
            .send()
            .await
            .map_err(|e| ListError::Network(format!("Failed to fetch bookings: {}", e)))?;

        if !response.ok() {
            return Err(ListError::Network(format!("Server returned status {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ListError::Network(format!("Failed to read response: {}", e)))?;

        decode_booking_list(&body).map_err(|e| ListError::InvalidFormat(format!("{}: {}", e, body)))
    }

    pub async fn create_booking(&self, payload: &BookingPayload) -> Result<Booking, String> {
        let response = Request::post(self.collection_url())
            .json(payload)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(error_text(response).await);
        }

        response
            .json::<Booking>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    pub async fn update_booking(&self, id: i64, payload: &BookingPayload) -> Result<MessageResponse, String> {
        let response = Request::put(&self.booking_url(id))
            .json(payload)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        read_message(response).await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<MessageResponse, String> {
        let response = Request::delete(&self.booking_url(id))
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        read_message(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_message(response: Response) -> Result<MessageResponse, String> {
    if !response.ok() {
        return Err(error_text(response).await);
    }

    response
        .json::<MessageResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// The server's `{error}` message when present, otherwise the raw body
async fn error_text(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => body.error,
        Err(_) if text.is_empty() => format!("Server error {}", status),
        Err(_) => text,
    }
}
