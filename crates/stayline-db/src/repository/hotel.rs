//! # Hotel Repository
//!
//! Database operations for the tenant scope rows.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use stayline_core::Hotel;

/// Repository for hotel database operations.
#[derive(Debug, Clone)]
pub struct HotelRepository {
    pool: SqlitePool,
}

impl HotelRepository {
    /// Creates a new HotelRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HotelRepository { pool }
    }

    /// Creates a hotel.
    pub async fn create(&self, name: &str, timezone: &str) -> DbResult<Hotel> {
        let hotel = Hotel {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            timezone: timezone.to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %hotel.id, name = %hotel.name, "Creating hotel");

        sqlx::query(
            r#"
            INSERT INTO hotels (id, name, timezone, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&hotel.id)
        .bind(&hotel.name)
        .bind(&hotel.timezone)
        .bind(hotel.created_at)
        .execute(&self.pool)
        .await?;

        Ok(hotel)
    }

    /// Gets a hotel by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Hotel>> {
        let hotel = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT id, name, timezone, created_at
            FROM hotels
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hotel)
    }
}
