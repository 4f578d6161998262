use std::io::Write;
use std::sync::Arc;
use boxoffice_core::{FingerprintHasher, SnapshotKey, Theater, TheaterRepository};
use boxoffice_order::{BatchInput, BatchSummary, Reservation, ReservationProcessor};
use tracing::{info, warn};
use crate::report;

/// Runs one request batch: reload saved state, seat every request in order,
/// report, save.
pub struct BatchDriver {
    repository: Arc<dyn TheaterRepository>,
    hasher: Arc<dyn FingerprintHasher>,
    verbose: bool,
    persist: bool,
}

/// What a run produced
#[derive(Debug)]
pub struct RunReport {
    pub reservations: Vec<Reservation>,
    pub summary: BatchSummary,
    pub theater: Theater,
    pub location: String,
    pub saved: bool,
}

impl BatchDriver {
    pub fn new(repository: Arc<dyn TheaterRepository>, hasher: Arc<dyn FingerprintHasher>) -> Self {
        Self {
            repository,
            hasher,
            verbose: false,
            persist: true,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Process `input`, writing the console report to `out`.
    ///
    /// Snapshot load and save failures are reported and the run carries on;
    /// only failing to write the report is an error.
    pub async fn run<W: Write>(&self, input: BatchInput, out: &mut W) -> anyhow::Result<RunReport> {
        let BatchInput { theater, requests } = input;
        let key = SnapshotKey::for_theater(&theater, self.hasher.as_ref());
        let location = self.repository.location(&key);

        info!(
            event = %theater.event,
            rows = theater.rows.len(),
            sections = theater.section_count(),
            requests = requests.len(),
            "Starting batch"
        );

        let mut theater = self.restore(&key, &location, theater, out).await?;

        let mut reservations: Vec<Reservation> = requests.into_iter().map(Reservation::new).collect();
        let summary = ReservationProcessor::process_batch(&mut reservations, &mut theater);

        report::write_results(out, &reservations)?;
        if self.verbose {
            report::write_theater(out, &theater)?;
        }

        let saved = self.store(&key, &location, &theater, out).await?;

        Ok(RunReport {
            reservations,
            summary,
            theater,
            location,
            saved,
        })
    }

    /// Replace the freshly parsed theater with its saved state, if any
    async fn restore<W: Write>(
        &self,
        key: &SnapshotKey,
        location: &str,
        fresh: Theater,
        out: &mut W,
    ) -> anyhow::Result<Theater> {
        match self.repository.load(key).await {
            Ok(Some(saved)) if saved.same_layout(&fresh) => {
                info!(
                    "Restored reservations from {} ({} seats available)",
                    location,
                    saved.available_seats()
                );
                Ok(Theater {
                    event: fresh.event,
                    ..saved
                })
            }
            Ok(Some(_)) => {
                warn!("Snapshot at {} does not match the requested layout, ignoring it", location);
                Ok(fresh)
            }
            Ok(None) => Ok(fresh),
            Err(e) => {
                warn!("Failed to load snapshot from {}: {}", location, e);
                writeln!(out, "Unable to load reservations from {}: {}", location, e)?;
                Ok(fresh)
            }
        }
    }

    async fn store<W: Write>(
        &self,
        key: &SnapshotKey,
        location: &str,
        theater: &Theater,
        out: &mut W,
    ) -> anyhow::Result<bool> {
        if !self.persist {
            info!("Saving disabled, reservations not persisted");
            return Ok(false);
        }

        match self.repository.save(key, theater).await {
            Ok(()) => {
                if self.verbose {
                    writeln!(out, "Reservations saved successfully to {}", location)?;
                }
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to save snapshot to {}: {}", location, e);
                writeln!(out, "Unable to save reservations to {}, {}", location, e)?;
                Ok(false)
            }
        }
    }
}
