//! # Expense Repository
//!
//! Database operations for cost records. The availability core only reads
//! these: the KPI aggregation deducts commission expenses (distribution
//! cost) from revenue.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use stayline_core::{Expense, ExpenseCategory};

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Creates an expense category.
    pub async fn create_category(
        &self,
        hotel_id: &str,
        name: &str,
    ) -> DbResult<ExpenseCategory> {
        let category = ExpenseCategory {
            id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };

        debug!(id = %category.id, name = %category.name, "Creating expense category");

        sqlx::query(
            r#"
            INSERT INTO expense_categories (id, hotel_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&category.id)
        .bind(&category.hotel_id)
        .bind(&category.name)
        .bind(category.created_at)
        .execute(&self.pool)
        .await?;

        Ok(category)
    }

    /// Records an expense.
    pub async fn create_expense(
        &self,
        hotel_id: &str,
        category_id: &str,
        amount_cents: i64,
        incurred_at: DateTime<Utc>,
        description: Option<&str>,
    ) -> DbResult<Expense> {
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.to_string(),
            category_id: category_id.to_string(),
            amount_cents,
            incurred_at,
            description: description.map(str::to_string),
            created_at: Utc::now(),
        };

        debug!(id = %expense.id, amount_cents = expense.amount_cents, "Recording expense");

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, hotel_id, category_id, amount_cents,
                incurred_at, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.hotel_id)
        .bind(&expense.category_id)
        .bind(expense.amount_cents)
        .bind(expense.incurred_at)
        .bind(&expense.description)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Total distribution cost for a hotel and range, in cents.
    ///
    /// Distribution cost = expenses whose category name contains
    /// "commission", case-insensitively ("OTA Commission", "commissions",
    /// ...). Everything else is an operating cost and stays out of RevADR.
    pub async fn distribution_cost(
        &self,
        hotel_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(e.amount_cents)
            FROM expenses e
            JOIN expense_categories c ON c.id = e.category_id
            WHERE e.hotel_id = ?1
              AND e.incurred_at >= ?2
              AND e.incurred_at <= ?3
              AND lower(c.name) LIKE '%commission%'
            "#,
        )
        .bind(hotel_id)
        .bind(range_start)
        .bind(range_end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }
}
