//! # stayline-recon: Status Reconciliation for Stayline
//!
//! A fixed-interval background job that recomputes each room unit's cached
//! `status` flag from the reservations live at that moment.
//!
//! ## Why a Cached Flag at All
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    The Two-Path Design                                  │
//! │                                                                         │
//! │  Listings / dashboards ──► room_units.status   (cheap, ~1 min stale)   │
//! │  Booking decisions     ──► live overlap query  (always correct)        │
//! │                                                                         │
//! │  Collapsing to one path either trusts a stale cache for bookings or   │
//! │  recomputes live occupancy for every list view. Keep both.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`reconciler`] - The loop, the cycle, and the shutdown handle
//! - [`config`] - Interval and timeout configuration
//! - [`error`] - Job-layer error type

pub mod config;
pub mod error;
pub mod reconciler;

pub use config::ReconConfig;
pub use error::{ReconError, ReconResult};
pub use reconciler::{CycleOutcome, ReconcilerHandle, StatusReconciler};
