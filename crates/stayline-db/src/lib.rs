//! # stayline-db: Database Layer for Stayline
//!
//! This crate provides database access for the Stayline availability core.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stayline Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (availability, kpis, reservations)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stayline-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (hotel, room, │    │  (embedded)  │  │   │
//! │  │   │               │    │  reservation, │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  expense)     │    │ 001_init.sql │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐    ┌────────────────────┐            │   │
//! │  │   │ AvailabilityEngine │    │  RevenueReporter   │            │   │
//! │  │   │ (availability.rs)  │    │  (reporting.rs)    │            │   │
//! │  │   └────────────────────┘    └────────────────────┘            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (WAL mode, foreign keys on)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (hotel, room, reservation, expense)
//! - [`availability`] - Live room-unit availability queries
//! - [`reporting`] - Revenue KPI aggregation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stayline_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let db = Database::new(DbConfig::new("path/to/stayline.db")).await?;
//!
//! // Live availability for a stay window
//! let report = db.availability().availability(&query).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod reporting;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use availability::{AvailabilityEngine, AvailabilityQuery, AvailabilityReport};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use reporting::{ReportingRange, RevenueReporter};

// Repository re-exports for convenience
pub use repository::expense::ExpenseRepository;
pub use repository::hotel::HotelRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::room::RoomRepository;
