//! Postgres-backed remote mirror.
//!
//! Two tables:
//!
//! | Table | Holds | Key |
//! |-------|-------|-----|
//! | `lodgex_bookings` | bookings, with date columns for the overlap check | `id` |
//! | `lodgex_records` | every other collection as JSONB | `(collection, id)` |
//!
//! ## Booking inserts
//!
//! `insert_booking` takes a transaction-scoped advisory lock on the property, then
//! selects the overlapping non-cancelled bookings `FOR UPDATE`. Any hit rolls back with
//! [`RemoteError::Conflict`]; otherwise the row is inserted and the transaction commits.
//! Two processes racing on one property are serialized by the advisory lock.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::{PgPool, Row};
use tracing::{field, instrument, Span};
use uuid::Uuid;

use lodgex_bookings::Booking;

use super::{document, Collection, RemoteStore, Snapshot};
use crate::error::RemoteError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS lodgex_bookings (
    id UUID PRIMARY KEY,
    property_id UUID NOT NULL,
    check_in DATE NOT NULL,
    check_out DATE NOT NULL,
    status TEXT NOT NULL,
    data JSONB NOT NULL,
    seq BIGSERIAL,
    CHECK (check_in < check_out)
);
CREATE INDEX IF NOT EXISTS lodgex_bookings_property_dates
    ON lodgex_bookings (property_id, check_in, check_out);

CREATE TABLE IF NOT EXISTS lodgex_records (
    collection TEXT NOT NULL,
    id UUID NOT NULL,
    data JSONB NOT NULL,
    seq BIGSERIAL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (collection, id)
);
"#;

pub struct PostgresRemoteStore {
    pool: PgPool,
}

impl PostgresRemoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, RemoteError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), RemoteError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    async fn load_collection<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, RemoteError> {
        let rows = sqlx::query("SELECT data FROM lodgex_records WHERE collection = $1 ORDER BY seq")
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("load_collection", e))?;

        rows.into_iter()
            .map(|row| {
                let data: serde_json::Value = row
                    .try_get("data")
                    .map_err(|e| map_sqlx_error("load_collection", e))?;
                serde_json::from_value(data).map_err(|e| RemoteError::Decode(format!("{collection}: {e}")))
            })
            .collect()
    }

    async fn load_bookings(&self) -> Result<Vec<Booking>, RemoteError> {
        let rows = sqlx::query("SELECT data FROM lodgex_bookings ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("load_bookings", e))?;

        rows.into_iter()
            .map(|row| {
                let data: serde_json::Value = row
                    .try_get("data")
                    .map_err(|e| map_sqlx_error("load_bookings", e))?;
                serde_json::from_value(data).map_err(|e| RemoteError::Decode(format!("bookings: {e}")))
            })
            .collect()
    }
}

#[async_trait]
impl RemoteStore for PostgresRemoteStore {
    #[instrument(skip(self), fields(properties = field::Empty, bookings = field::Empty), err)]
    async fn load(&self) -> Result<Snapshot, RemoteError> {
        let snapshot = Snapshot {
            properties: self.load_collection(Collection::Properties).await?,
            documents: self.load_collection(Collection::Documents).await?,
            guests: self.load_collection(Collection::Guests).await?,
            owners: self.load_collection(Collection::Owners).await?,
            staff: self.load_collection(Collection::Staff).await?,
            bookings: self.load_bookings().await?,
            tasks: self.load_collection(Collection::Tasks).await?,
            finance: self.load_collection(Collection::Finance).await?,
            automations: self.load_collection(Collection::Automations).await?,
            audit: self.load_collection(Collection::Audit).await?,
            notifications: self.load_collection(Collection::Notifications).await?,
            integrations: self.load_collection(Collection::Integrations).await?,
            archive: self.load_collection(Collection::Archive).await?,
            templates: self.load_collection(Collection::Templates).await?,
        };

        let span = Span::current();
        span.record("properties", snapshot.properties.len());
        span.record("bookings", snapshot.bookings.len());
        Ok(snapshot)
    }

    #[instrument(
        skip(self, booking),
        fields(
            booking_id = %booking.id,
            property_id = %booking.property_id,
            check_in = %booking.check_in(),
            check_out = %booking.check_out()
        ),
        err
    )]
    async fn insert_booking(&self, booking: &Booking) -> Result<(), RemoteError> {
        let data = document(booking)?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(booking.property_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("lock_property", e))?;

        // A cancelled booking holds no dates, so it never clashes.
        let clash = if booking.holds_dates() {
            sqlx::query(
                r#"
                SELECT data->>'reference' AS reference
                FROM lodgex_bookings
                WHERE property_id = $1
                  AND status <> 'Cancelled'
                  AND check_in < $3
                  AND check_out > $2
                FOR UPDATE
                "#,
            )
            .bind(booking.property_id.as_uuid())
            .bind(booking.check_in())
            .bind(booking.check_out())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("check_availability", e))?
        } else {
            None
        };

        if let Some(row) = clash {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            let reference: Option<String> = row.try_get("reference").unwrap_or(None);
            return Err(RemoteError::Conflict(format!(
                "booking {} overlaps {} in the remote store",
                booking.reference,
                reference.unwrap_or_else(|| "an existing booking".to_string())
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO lodgex_bookings (id, property_id, check_in, check_out, status, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.property_id.as_uuid())
        .bind(booking.check_in())
        .bind(booking.check_out())
        .bind(booking.status.as_str())
        .bind(&data)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_booking", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;
        Ok(())
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.id, status = %booking.status), err)]
    async fn save_booking(&self, booking: &Booking) -> Result<(), RemoteError> {
        let data = document(booking)?;
        sqlx::query(
            r#"
            INSERT INTO lodgex_bookings (id, property_id, check_in, check_out, status, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id)
            DO UPDATE SET
                status = EXCLUDED.status,
                data = EXCLUDED.data
            "#,
        )
        .bind(booking.id.as_uuid())
        .bind(booking.property_id.as_uuid())
        .bind(booking.check_in())
        .bind(booking.check_out())
        .bind(booking.status.as_str())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_booking", e))?;
        Ok(())
    }

    #[instrument(skip(self, data), fields(collection = %collection, id = %id), err)]
    async fn upsert(&self, collection: Collection, id: Uuid, data: serde_json::Value) -> Result<(), RemoteError> {
        sqlx::query(
            r#"
            INSERT INTO lodgex_records (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id)
            DO UPDATE SET
                data = EXCLUDED.data,
                updated_at = NOW()
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("upsert_record", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id), err)]
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<(), RemoteError> {
        sqlx::query("DELETE FROM lodgex_records WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_record", e))?;
        Ok(())
    }
}

/// Map SQLx errors to RemoteError.
fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RemoteError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_string();
            // 23505: unique violation (a row with this id already exists)
            if db_err.code().as_deref() == Some("23505") {
                RemoteError::Conflict(format!("{operation}: {message}"))
            } else {
                RemoteError::Database { operation, message }
            }
        }
        sqlx::Error::PoolClosed => RemoteError::Database {
            operation,
            message: "connection pool closed".to_string(),
        },
        sqlx::Error::RowNotFound => RemoteError::Database {
            operation,
            message: "unexpected row not found".to_string(),
        },
        other => RemoteError::Database {
            operation,
            message: other.to_string(),
        },
    }
}
