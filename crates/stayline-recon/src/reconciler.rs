//! # Status Reconciler
//!
//! Recomputes every room unit's cached `status` flag on a fixed interval.
//!
//! ## Cycle Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reconciliation Cycle                                 │
//! │                                                                         │
//! │  1. Release expired maintenance holds                                  │
//! │     └── status=maintenance AND maintenance_until <= now → available    │
//! │                                                                         │
//! │  2. Collect the currently-booked set                                   │
//! │     └── SELECT DISTINCT room_unit_id FROM reservations                 │
//! │         WHERE check_in <= now AND check_out > now                      │
//! │           AND room_unit_id IS NOT NULL                                 │
//! │                                                                         │
//! │  3. Mark those units booked (never a maintenance unit)                 │
//! │                                                                         │
//! │  4. Release booked units NOT in the set → available                    │
//! │     └── only touches status='booked', so maintenance is isolated       │
//! │                                                                         │
//! │  IDEMPOTENT: running twice with unchanged reservations is a no-op.    │
//! │  Overlapping runs from a double-firing scheduler are harmless.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 3 and 4 are independent bulk updates; if 3 lands and 4 fails, the
//! worst case is a stale booked flag that the next cycle corrects.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use chrono::Utc;
use stayline_db::Database;

use crate::config::ReconConfig;
use crate::error::{ReconError, ReconResult};

// =============================================================================
// Cycle Outcome
// =============================================================================

/// Row counts from one reconciliation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Maintenance holds released on their durable timestamps.
    pub maintenance_released: u64,

    /// Units flipped to booked (already-booked rows count too; SQLite
    /// reports every row the UPDATE touched).
    pub marked_booked: u64,

    /// Stale booked units returned to available.
    pub released: u64,
}

// =============================================================================
// Status Reconciler
// =============================================================================

/// The background job that owns `room_units.status`.
///
/// Single writer by design: request handlers only read the flag, so the
/// loop never races another component for it.
pub struct StatusReconciler {
    /// Database handle.
    db: Database,

    /// Interval and timeout configuration.
    config: ReconConfig,

    /// Shutdown receiver.
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for stopping a running reconciler.
#[derive(Clone)]
pub struct ReconcilerHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl ReconcilerHandle {
    /// Signals the loop to stop after its current cycle.
    pub async fn shutdown(&self) -> ReconResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| ReconError::ChannelClosed("Shutdown channel closed".into()))
    }
}

impl StatusReconciler {
    /// Creates a reconciler and its control handle.
    pub fn new(db: Database, config: ReconConfig) -> (Self, ReconcilerHandle) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let reconciler = StatusReconciler {
            db,
            config,
            shutdown_rx,
        };

        let handle = ReconcilerHandle { shutdown_tx };

        (reconciler, handle)
    }

    /// Runs the reconciliation loop.
    ///
    /// This should be spawned as a background task. It exits only on
    /// shutdown; cycle failures are logged and skipped.
    pub async fn run(mut self) {
        info!(
            interval_secs = self.config.interval_duration().as_secs(),
            "Status reconciler starting"
        );

        let mut interval = tokio::time::interval(self.config.interval_duration());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick().await;
                }

                _ = self.shutdown_rx.recv() => {
                    info!("Status reconciler shutting down");
                    break;
                }
            }
        }

        info!("Status reconciler stopped");
    }

    /// Runs one cycle under the configured timeout, absorbing failures.
    async fn tick(&self) {
        let budget = self.config.cycle_timeout_duration();

        match timeout(budget, self.reconcile_once()).await {
            Ok(Ok(outcome)) => {
                debug!(
                    maintenance_released = outcome.maintenance_released,
                    marked_booked = outcome.marked_booked,
                    released = outcome.released,
                    "Reconciliation cycle complete"
                );
            }
            Ok(Err(e)) => {
                // Skip this cycle; the next tick retries from scratch
                error!(?e, "Reconciliation cycle failed, skipping");
            }
            Err(_) => {
                let e = ReconError::Timeout {
                    timeout_secs: budget.as_secs(),
                };
                warn!(%e, "Skipping reconciliation cycle");
            }
        }
    }

    /// One full reconciliation cycle over all hotels.
    ///
    /// Exposed so tests (and operational tooling) can drive cycles without
    /// the interval loop.
    pub async fn reconcile_once(&self) -> ReconResult<CycleOutcome> {
        let now = Utc::now();
        let rooms = self.db.rooms();

        let maintenance_released = rooms.release_expired_maintenance(now).await?;

        let occupied = self.db.reservations().units_occupied_at(now).await?;

        let marked_booked = rooms.mark_booked(&occupied).await?;
        let released = rooms.release_stale_booked(&occupied).await?;

        Ok(CycleOutcome {
            maintenance_released,
            marked_booked,
            released,
        })
    }

    /// The configured per-cycle timeout (for diagnostics).
    pub fn cycle_timeout(&self) -> Duration {
        self.config.cycle_timeout_duration()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use stayline_core::stay::StayWindow;
    use stayline_core::UnitStatus;
    use stayline_db::repository::reservation::NewReservation;
    use stayline_db::DbConfig;

    struct Fixture {
        db: Database,
        hotel_id: String,
        unit_ids: Vec<String>,
    }

    /// Hotel with one room type and three units, no reservations.
    async fn seed() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let hotel = db.hotels().create("Harbor View", "UTC").await.unwrap();
        let room = db
            .rooms()
            .create_room(&hotel.id, "Deluxe", "CP", 2)
            .await
            .unwrap();

        let mut unit_ids = Vec::new();
        for number in ["101", "102", "103"] {
            let unit = db
                .rooms()
                .create_unit(&room.id, &hotel.id, number, 1)
                .await
                .unwrap();
            unit_ids.push(unit.id);
        }

        Fixture {
            db,
            hotel_id: hotel.id,
            unit_ids,
        }
    }

    /// Reservation covering "now", bound directly to the given unit.
    async fn add_live_stay(fixture: &Fixture, unit_id: &str) {
        let now = Utc::now();
        let window = StayWindow::new(
            now - ChronoDuration::days(1),
            now + ChronoDuration::days(1),
        )
        .unwrap();

        fixture
            .db
            .reservations()
            .create(
                &fixture.hotel_id,
                NewReservation {
                    guest_name: "A. Guest".to_string(),
                    window,
                    nights: 2,
                    rooms: 1,
                    per_day_rate_cents: 100_000,
                    room_unit_id: Some(unit_id.to_string()),
                    notes: None,
                },
            )
            .await
            .unwrap();
    }

    async fn statuses(fixture: &Fixture) -> Vec<UnitStatus> {
        let mut out = Vec::new();
        for id in &fixture.unit_ids {
            out.push(fixture.db.rooms().get_unit(id).await.unwrap().unwrap().status);
        }
        out
    }

    fn reconciler(fixture: &Fixture) -> StatusReconciler {
        let (reconciler, _handle) =
            StatusReconciler::new(fixture.db.clone(), ReconConfig::default());
        reconciler
    }

    #[tokio::test]
    async fn test_live_stay_marks_unit_booked() {
        let fixture = seed().await;
        add_live_stay(&fixture, &fixture.unit_ids[0]).await;

        reconciler(&fixture).reconcile_once().await.unwrap();

        assert_eq!(
            statuses(&fixture).await,
            vec![
                UnitStatus::Booked,
                UnitStatus::Available,
                UnitStatus::Available
            ]
        );
    }

    #[tokio::test]
    async fn test_reconciliation_is_idempotent() {
        let fixture = seed().await;
        add_live_stay(&fixture, &fixture.unit_ids[0]).await;

        let job = reconciler(&fixture);
        job.reconcile_once().await.unwrap();
        let first = statuses(&fixture).await;

        job.reconcile_once().await.unwrap();
        let second = statuses(&fixture).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_stale_booked_unit_is_released() {
        let fixture = seed().await;

        // Flag a unit booked with no live reservation behind it
        fixture
            .db
            .rooms()
            .mark_booked(&[fixture.unit_ids[1].clone()])
            .await
            .unwrap();

        let outcome = reconciler(&fixture).reconcile_once().await.unwrap();

        assert_eq!(outcome.released, 1);
        assert_eq!(
            statuses(&fixture).await,
            vec![
                UnitStatus::Available,
                UnitStatus::Available,
                UnitStatus::Available
            ]
        );
    }

    #[tokio::test]
    async fn test_maintenance_is_never_overridden() {
        let fixture = seed().await;

        // Maintenance hold with a future release, plus a live stay on the
        // same unit trying to pull it to booked
        let until = Utc::now() + ChronoDuration::days(1);
        fixture
            .db
            .rooms()
            .set_maintenance(&fixture.unit_ids[0], until)
            .await
            .unwrap();
        add_live_stay(&fixture, &fixture.unit_ids[0]).await;

        reconciler(&fixture).reconcile_once().await.unwrap();

        let unit = fixture
            .db
            .rooms()
            .get_unit(&fixture.unit_ids[0])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unit.status, UnitStatus::Maintenance);
    }

    #[tokio::test]
    async fn test_expired_maintenance_is_released() {
        let fixture = seed().await;

        let until = Utc::now() - ChronoDuration::minutes(5);
        fixture
            .db
            .rooms()
            .set_maintenance(&fixture.unit_ids[2], until)
            .await
            .unwrap();

        let outcome = reconciler(&fixture).reconcile_once().await.unwrap();

        assert_eq!(outcome.maintenance_released, 1);
        let unit = fixture
            .db
            .rooms()
            .get_unit(&fixture.unit_ids[2])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unit.status, UnitStatus::Available);
        assert!(unit.maintenance_until.is_none());
    }

    #[tokio::test]
    async fn test_expired_maintenance_with_live_stay_becomes_booked() {
        let fixture = seed().await;

        // The hold expired, and a live reservation covers the unit: the
        // same cycle releases the hold and re-marks the unit booked
        let until = Utc::now() - ChronoDuration::minutes(5);
        fixture
            .db
            .rooms()
            .set_maintenance(&fixture.unit_ids[0], until)
            .await
            .unwrap();
        add_live_stay(&fixture, &fixture.unit_ids[0]).await;

        reconciler(&fixture).reconcile_once().await.unwrap();

        let unit = fixture
            .db
            .rooms()
            .get_unit(&fixture.unit_ids[0])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unit.status, UnitStatus::Booked);
    }

    #[tokio::test]
    async fn test_unassigned_reservation_marks_nothing() {
        let fixture = seed().await;

        let now = Utc::now();
        fixture
            .db
            .reservations()
            .create(
                &fixture.hotel_id,
                NewReservation {
                    guest_name: "B. Guest".to_string(),
                    window: StayWindow::new(
                        now - ChronoDuration::days(1),
                        now + ChronoDuration::days(1),
                    )
                    .unwrap(),
                    nights: 2,
                    rooms: 1,
                    per_day_rate_cents: 80_000,
                    room_unit_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let outcome = reconciler(&fixture).reconcile_once().await.unwrap();

        assert_eq!(outcome.marked_booked, 0);
        assert!(statuses(&fixture)
            .await
            .iter()
            .all(|s| *s == UnitStatus::Available));
    }

    #[tokio::test]
    async fn test_run_loop_shuts_down_cleanly() {
        let fixture = seed().await;

        let (job, handle) = StatusReconciler::new(
            fixture.db.clone(),
            ReconConfig::default().interval(Duration::from_millis(10)),
        );
        let join = tokio::spawn(job.run());

        handle.shutdown().await.unwrap();
        join.await.unwrap();
    }
}
