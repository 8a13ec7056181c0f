//! # stayline-core: Pure Business Logic for Stayline
//!
//! This crate is the **heart** of the Stayline availability engine. It
//! contains all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stayline Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST API (apps/api)                          │   │
//! │  │    availability ──► kpis ──► reservations ──► maintenance      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          stayline-db / stayline-recon (I/O layers)              │   │
//! │  │    repositories, availability engine, reconciliation loop       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stayline-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   stay    │  │   money   │  │    kpi    │  │ validation│  │   │
//! │  │   │StayWindow │  │   Money   │  │ KpiReport │  │   rules   │  │   │
//! │  │   │ overlaps  │  │ cent math │  │ ADR/RevPAR│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Room, RoomUnit, Reservation, etc.)
//! - [`stay`] - Half-open stay windows and the overlap predicate
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`kpi`] - Revenue KPI arithmetic (ADR, occupancy, RevPAR, RevADR)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use stayline_core::stay::StayWindow;
//!
//! let stay = StayWindow::new(
//!     Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap(),
//! )
//! .unwrap();
//!
//! let next = StayWindow::new(
//!     Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap(),
//! )
//! .unwrap();
//!
//! // Back-to-back stays do not overlap: checkout morning frees the unit
//! // for a same-day check-in.
//! assert!(!stay.overlaps(&next));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kpi;
pub mod money;
pub mod stay;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stayline_core::Money` instead of
// `use stayline_core::money::Money`

pub use error::ValidationError;
pub use kpi::{KpiInputs, KpiReport};
pub use money::Money;
pub use stay::StayWindow;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of rooms a single reservation may cover.
///
/// Prevents runaway multi-room bookings (e.g. typing 500 instead of 5).
/// Can be made configurable per-hotel in future versions.
pub const MAX_ROOMS_PER_RESERVATION: i64 = 50;

/// Maximum stay length in nights accepted by the booking surface.
///
/// Long-stay contracts go through a separate workflow, not the booking
/// engine.
pub const MAX_STAY_NIGHTS: i64 = 365;
