use boxoffice_core::{SectionError, Theater};
use tracing::{debug, info, warn};
use crate::models::{RejectionReason, Reservation, SeatAssignment};

/// Seats parties in a theater, one request at a time.
///
/// Each party goes to the first section, front row first and left to right
/// within a row, that can hold it whole. Parties are never split across
/// sections and earlier assignments are never revisited.
pub struct ReservationProcessor;

impl ReservationProcessor {
    /// Process a single pending reservation against the theater.
    ///
    /// The rejection reasons are checked in a fixed order: a party larger
    /// than every remaining seat is `PartyTooLarge` before any section is
    /// scanned, and only a party that fits in aggregate but not in any one
    /// section is `CannotAccommodateWithoutSplitting`.
    pub fn process(reservation: &mut Reservation, theater: &mut Theater) -> Result<(), ReservationError> {
        if !reservation.is_pending() {
            return Err(ReservationError::AlreadyProcessed(reservation.name().to_string()));
        }

        let seats = u64::try_from(reservation.seats())
            .ok()
            .filter(|seats| *seats > 0)
            .ok_or_else(|| ReservationError::InvalidPartySize {
                name: reservation.name().to_string(),
                seats: reservation.seats(),
            })?;

        let available = theater.available_seats();
        if seats > available {
            debug!(name = reservation.name(), seats, available, "Party exceeds remaining seats");
            reservation.reject(RejectionReason::PartyTooLarge);
            return Ok(());
        }

        for row in 0..theater.rows.len() {
            for section in 0..theater.rows[row].sections.len() {
                match theater.rows[row].sections[section].reserve(reservation.name(), seats) {
                    Ok(()) => {
                        let assignment = SeatAssignment {
                            row: row + 1,
                            section: section + 1,
                        };
                        debug!(name = reservation.name(), seats, %assignment, "Party seated");
                        reservation.confirm(assignment);
                        return Ok(());
                    }
                    Err(SectionError::InsufficientCapacity { .. }) => continue,
                }
            }
        }

        debug!(name = reservation.name(), seats, "No single section fits party");
        reservation.reject(RejectionReason::CannotAccommodateWithoutSplitting);
        Ok(())
    }

    /// Process reservations strictly in the order given.
    ///
    /// Invalid reservations are logged and counted but never stop the batch.
    pub fn process_batch(reservations: &mut [Reservation], theater: &mut Theater) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for reservation in reservations.iter_mut() {
            if let Err(e) = Self::process(reservation, theater) {
                warn!("Skipping reservation: {}", e);
                summary.invalid += 1;
                continue;
            }

            match reservation.assignment() {
                Some(_) => {
                    summary.confirmed += 1;
                    summary.seats_assigned += reservation.seats().unsigned_abs();
                }
                None => summary.rejected += 1,
            }
        }

        info!(
            confirmed = summary.confirmed,
            rejected = summary.rejected,
            invalid = summary.invalid,
            seats_assigned = summary.seats_assigned,
            "Batch processed"
        );

        summary
    }
}

/// Totals for one processed batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub confirmed: usize,
    pub rejected: usize,
    pub invalid: usize,
    pub seats_assigned: u64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Invalid party size {seats} for {name}")]
    InvalidPartySize {
        name: String,
        seats: i64,
    },

    #[error("Reservation for {0} was already processed")]
    AlreadyProcessed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxoffice_core::parse_layout;
    use crate::models::{ReservationRequest, ReservationStatus};

    fn reservations(requests: &[(&str, i64)]) -> Vec<Reservation> {
        requests
            .iter()
            .map(|(name, seats)| {
                Reservation::new(ReservationRequest {
                    name: name.to_string(),
                    seats: *seats,
                })
            })
            .collect()
    }

    fn outcomes(reservations: &[Reservation]) -> Vec<String> {
        reservations.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_front_to_back_assignment() {
        let mut theater = parse_layout("2 3\n4");
        let mut batch = reservations(&[("Smith", 2), ("Jones", 4), ("Doe", 10)]);

        let summary = ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(
            outcomes(&batch),
            vec![
                "Smith Row 1 Section 1",
                "Jones Row 2 Section 1",
                "Doe Sorry, we can't handle your party.",
            ]
        );
        assert_eq!(theater.available_seats(), 3);
        assert_eq!(
            summary,
            BatchSummary { confirmed: 2, rejected: 1, invalid: 0, seats_assigned: 6 }
        );
    }

    #[test]
    fn test_global_check_precedes_section_scan() {
        let mut theater = parse_layout("5");
        let mut batch = reservations(&[("A", 3), ("B", 3)]);

        ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(batch[0].assignment(), Some(SeatAssignment { row: 1, section: 1 }));
        assert_eq!(batch[1].rejection(), Some(RejectionReason::PartyTooLarge));
        assert_eq!(theater.available_seats(), 2);
    }

    #[test]
    fn test_earlier_requests_consume_section() {
        let mut theater = parse_layout("2");
        let mut batch = reservations(&[("A", 1), ("B", 1), ("C", 1)]);

        ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(batch[0].to_string(), "A Row 1 Section 1");
        assert_eq!(batch[1].to_string(), "B Row 1 Section 1");
        // Theater is full, so the global check rejects before any scan
        assert_eq!(batch[2].rejection(), Some(RejectionReason::PartyTooLarge));
        assert_eq!(theater.rows[0].sections[0].occupants, vec!["A", "B"]);
    }

    #[test]
    fn test_party_is_never_split() {
        let mut theater = parse_layout("2 2\n1");
        let mut batch = reservations(&[("Big Family", 3), ("Couple", 2)]);

        ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(outcomes(&batch), vec!["Big Family Call to split party.", "Couple Row 1 Section 1"]);
        assert_eq!(theater.available_seats(), 3);
    }

    #[test]
    fn test_skips_full_sections_to_back_rows() {
        let mut theater = parse_layout("1 1\n6 6");
        let mut batch = reservations(&[("Solo", 1), ("Pair", 2), ("Trio", 3), ("Duo", 2)]);

        ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(
            outcomes(&batch),
            vec![
                "Solo Row 1 Section 1",
                "Pair Row 2 Section 1",
                "Trio Row 2 Section 1",
                "Duo Row 2 Section 2",
            ]
        );
    }

    #[test]
    fn test_parties_beyond_32_bits_are_judged_not_dropped() {
        let mut theater = parse_layout("5");
        let mut batch = reservations(&[("Big Party", 3_000_000_000), ("Huge", i64::MAX), ("Small", 2)]);

        let summary = ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(batch[0].rejection(), Some(RejectionReason::PartyTooLarge));
        assert_eq!(batch[1].rejection(), Some(RejectionReason::PartyTooLarge));
        assert_eq!(batch[2].to_string(), "Small Row 1 Section 1");
        assert_eq!(summary.invalid, 0);

        // Fits in aggregate, but in neither section
        let mut theater = parse_layout("3000000000 3000000000");
        let mut batch = reservations(&[("Big Party", 4_000_000_000)]);

        ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(batch[0].to_string(), "Big Party Call to split party.");
        assert_eq!(theater.available_seats(), 6_000_000_000);
    }

    #[test]
    fn test_invalid_party_size_is_an_error() {
        let mut theater = parse_layout("4");

        for seats in [0, -2] {
            let mut reservation = reservations(&[("Ghost", seats)]).remove(0);
            let err = ReservationProcessor::process(&mut reservation, &mut theater).unwrap_err();

            assert_eq!(err, ReservationError::InvalidPartySize { name: "Ghost".to_string(), seats });
            assert_eq!(reservation.status, ReservationStatus::Pending);
        }
        assert_eq!(theater.available_seats(), 4);
    }

    #[test]
    fn test_invalid_reservations_do_not_stop_batch() {
        let mut theater = parse_layout("4");
        let mut batch = reservations(&[("Ghost", 0), ("Smith", 4)]);

        let summary = ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.confirmed, 1);
        assert_eq!(outcomes(&batch), vec!["Ghost Pending Confirmation", "Smith Row 1 Section 1"]);
    }

    #[test]
    fn test_reservation_is_processed_once() {
        let mut theater = parse_layout("4");
        let mut reservation = reservations(&[("Smith", 2)]).remove(0);

        ReservationProcessor::process(&mut reservation, &mut theater).unwrap();
        let err = ReservationProcessor::process(&mut reservation, &mut theater).unwrap_err();

        assert_eq!(err, ReservationError::AlreadyProcessed("Smith".to_string()));
        assert_eq!(theater.available_seats(), 2);
    }

    #[test]
    fn test_empty_theater_rejects_everything() {
        let mut theater = parse_layout("not a layout");
        let mut batch = reservations(&[("Smith", 1)]);

        ReservationProcessor::process_batch(&mut batch, &mut theater);

        assert_eq!(batch[0].rejection(), Some(RejectionReason::PartyTooLarge));
    }

    #[test]
    fn test_identical_inputs_give_identical_outputs() {
        let requests = [("A", 2), ("B", 5), ("C", 1), ("D", 3)];

        let run = || {
            let mut theater = parse_layout("3 2\n5 1");
            let mut batch = reservations(&requests);
            ReservationProcessor::process_batch(&mut batch, &mut theater);
            (outcomes(&batch), theater.render(true))
        };

        assert_eq!(run(), run());
    }
}
