use std::str::FromStr;

use anyhow::Result;
use shared::{Booking, BookingPayload};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Row, Sqlite, SqlitePool,
};
use tracing::info;

/// Result of a single store operation; the raw sqlx error is kept so callers
/// can report the database's own message
pub type StoreResult<T> = std::result::Result<T, sqlx::Error>;

/// Declared booking columns after the primary key.
///
/// NOT NULL columns carry a default so schema sync can add them to a table
/// that already holds rows. Inserts bind every column explicitly, so the
/// defaults never mask a missing value.
const BOOKING_COLUMNS: &[(&str, &str)] = &[
    ("mobile_no", "TEXT NOT NULL DEFAULT ''"),
    ("hall_name", "TEXT NOT NULL DEFAULT ''"),
    ("applicant_name", "TEXT NOT NULL DEFAULT ''"),
    ("email", "TEXT NOT NULL DEFAULT ''"),
    ("purpose", "TEXT NOT NULL DEFAULT ''"),
    ("rent", "REAL NOT NULL DEFAULT 0.0"),
    ("additional_charges", "REAL"),
    ("total", "REAL NOT NULL DEFAULT 0.0"),
    ("remark", "TEXT"),
    ("receipt_no", "TEXT NOT NULL DEFAULT ''"),
    ("receipt_date", "TEXT NOT NULL DEFAULT '1970-01-01'"),
    ("created_at", "TEXT NOT NULL DEFAULT ''"),
    ("updated_at", "TEXT NOT NULL DEFAULT ''"),
];

const SELECT_COLUMNS: &str = "id, mobile_no, hall_name, applicant_name, email, purpose, rent, \
    additional_charges, total, remark, receipt_no, receipt_date, created_at, updated_at";

/// DbConnection owns the pool and every query against the bookings table
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and sync the schema
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePoolOptions::new().max_connections(5).connect(url).await?;
        sync_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// A private in-memory database, used by tests
    pub async fn in_memory() -> Result<Self> {
        let pool = memory_pool().await?;
        sync_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert one booking and return the stored row
    pub async fn insert_booking(&self, payload: &BookingPayload, timestamp: &str) -> StoreResult<Booking> {
        let sql = format!(
            r#"
            INSERT INTO bookings (
                mobile_no, hall_name, applicant_name, email, purpose, rent,
                additional_charges, total, remark, receipt_no, receipt_date,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {SELECT_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(&payload.mobile_no)
            .bind(&payload.hall_name)
            .bind(&payload.applicant_name)
            .bind(&payload.email)
            .bind(&payload.purpose)
            .bind(payload.rent)
            .bind(payload.additional_charges)
            .bind(payload.total)
            .bind(&payload.remark)
            .bind(&payload.receipt_no)
            .bind(payload.receipt_date)
            .bind(timestamp)
            .bind(timestamp)
            .fetch_one(&self.pool)
            .await?;

        booking_from_row(&row)
    }

    /// All bookings in insertion order
    pub async fn list_bookings(&self) -> StoreResult<Vec<Booking>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM bookings ORDER BY id ASC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(booking_from_row).collect()
    }

    /// Overwrite a booking with `payload`. Nullable columns take the payload
    /// value as is, so an absent charge or remark clears it. NOT NULL columns
    /// and the receipt number keep their stored value when absent.
    /// Returns the number of rows touched.
    pub async fn update_booking(&self, id: i64, payload: &BookingPayload, timestamp: &str) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                mobile_no = COALESCE(?, mobile_no),
                hall_name = COALESCE(?, hall_name),
                applicant_name = COALESCE(?, applicant_name),
                email = COALESCE(?, email),
                purpose = COALESCE(?, purpose),
                rent = COALESCE(?, rent),
                additional_charges = ?,
                total = COALESCE(?, total),
                remark = ?,
                receipt_no = COALESCE(?, receipt_no),
                receipt_date = COALESCE(?, receipt_date),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&payload.mobile_no)
        .bind(&payload.hall_name)
        .bind(&payload.applicant_name)
        .bind(&payload.email)
        .bind(&payload.purpose)
        .bind(payload.rent)
        .bind(payload.additional_charges)
        .bind(payload.total)
        .bind(&payload.remark)
        .bind(&payload.receipt_no)
        .bind(payload.receipt_date)
        .bind(timestamp)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a booking by id. Returns the number of rows removed.
    pub async fn delete_booking(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

async fn memory_pool() -> Result<SqlitePool> {
    // A single connection that never idles out, so the database lives as long as the pool
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create the bookings table, then add any declared column it lacks.
/// Columns are never dropped or retyped.
async fn sync_schema(pool: &SqlitePool) -> Result<()> {
    let column_defs = BOOKING_COLUMNS
        .iter()
        .map(|(name, definition)| format!("{name} {definition}"))
        .collect::<Vec<_>>()
        .join(",\n    ");

    let create = format!(
        "CREATE TABLE IF NOT EXISTS bookings (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n    {column_defs}\n)"
    );
    sqlx::query(&create).execute(pool).await?;

    let existing: Vec<String> = sqlx::query("PRAGMA table_info(bookings)")
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect();

    for (name, definition) in BOOKING_COLUMNS {
        if existing.iter().any(|column| column.as_str() == *name) {
            continue;
        }
        info!("Adding missing column bookings.{}", name);
        let alter = format!("ALTER TABLE bookings ADD COLUMN {name} {definition}");
        sqlx::query(&alter).execute(pool).await?;
    }

    info!("Database schema synced");
    Ok(())
}

fn booking_from_row(row: &SqliteRow) -> StoreResult<Booking> {
    Ok(Booking {
        id: row.try_get("id")?,
        mobile_no: row.try_get("mobile_no")?,
        hall_name: row.try_get("hall_name")?,
        applicant_name: row.try_get("applicant_name")?,
        email: row.try_get("email")?,
        purpose: row.try_get("purpose")?,
        rent: row.try_get("rent")?,
        additional_charges: row.try_get("additional_charges")?,
        total: row.try_get("total")?,
        remark: row.try_get("remark")?,
        receipt_no: row.try_get("receipt_no")?,
        receipt_date: row.try_get("receipt_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
