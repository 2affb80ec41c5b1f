use chrono::Utc;
use shared::{Booking, BookingPayload};
use tracing::info;

use crate::db::{DbConnection, StoreResult};

/// Booking operations on top of the store.
///
/// Stamps creation/update times and logs each call. Business rules are the
/// client's job; payloads reach the store exactly as received.
#[derive(Clone)]
pub struct BookingService {
    db: DbConnection,
}

impl BookingService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_booking(&self, payload: BookingPayload) -> StoreResult<Booking> {
        info!("Creating booking with receipt {:?}", payload.receipt_no);

        let now = Utc::now().to_rfc3339();
        let booking = self.db.insert_booking(&payload, &now).await?;

        info!("Created booking {}", booking.id);
        Ok(booking)
    }

    pub async fn list_bookings(&self) -> StoreResult<Vec<Booking>> {
        let bookings = self.db.list_bookings().await?;
        info!("Returning {} bookings", bookings.len());
        Ok(bookings)
    }

    /// Update a booking. Succeeds even when no booking has this id.
    pub async fn update_booking(&self, id: i64, payload: BookingPayload) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();
        let affected = self.db.update_booking(id, &payload, &now).await?;

        if affected == 0 {
            info!("No booking with id {}, nothing updated", id);
        } else {
            info!("Updated booking {}", id);
        }
        Ok(())
    }

    /// Delete a booking. Succeeds even when no booking has this id.
    pub async fn delete_booking(&self, id: i64) -> StoreResult<()> {
        let affected = self.db.delete_booking(id).await?;

        if affected == 0 {
            info!("No booking with id {}, nothing deleted", id);
        } else {
            info!("Deleted booking {}", id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    async fn setup_service() -> BookingService {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        BookingService::new(db)
    }

    fn payload() -> BookingPayload {
        BookingPayload {
            mobile_no: Some("9000000001".to_string()),
            hall_name: Some("Lake View".to_string()),
            applicant_name: Some("Kiran".to_string()),
            email: Some("kiran@example.com".to_string()),
            purpose: Some("Conference".to_string()),
            rent: Some(3000.0),
            additional_charges: None,
            total: Some(3000.0),
            remark: Some("Projector".to_string()),
            receipt_no: Some("LV-10".to_string()),
            receipt_date: NaiveDate::from_ymd_opt(2025, 3, 9),
        }
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps() {
        let service = setup_service().await;

        let booking = service.create_booking(payload()).await.expect("Failed to create booking");
        assert!(DateTime::parse_from_rfc3339(&booking.created_at).is_ok());
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[tokio::test]
    async fn test_update_overwrites_optional_fields() {
        let service = setup_service().await;
        let booking = service.create_booking(payload()).await.unwrap();

        let change = BookingPayload {
            rent: Some(3500.0),
            total: Some(3500.0),
            ..Default::default()
        };
        service.update_booking(booking.id, change).await.expect("Failed to update");

        let stored = service.list_bookings().await.unwrap().remove(0);
        assert_eq!(stored.rent, 3500.0);
        assert_eq!(stored.total, 3500.0);
        assert_eq!(stored.receipt_no, "LV-10");
        assert_eq!(stored.hall_name, "Lake View");
        assert_eq!(stored.remark, None);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_errors() {
        let service = setup_service().await;

        assert!(service.update_booking(999, payload()).await.is_ok());
        assert!(service.delete_booking(999).await.is_ok());
        assert!(service.list_bookings().await.unwrap().is_empty());
    }
}
