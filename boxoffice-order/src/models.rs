use serde::{Deserialize, Serialize};
use std::fmt;

/// A party asking for a number of seats seated together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationRequest {
    pub name: String,
    pub seats: i64,
}

impl ReservationRequest {
    pub fn new(name: impl Into<String>, seats: i64) -> Result<Self, OrderError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(OrderError::EmptyName);
        }
        if seats <= 0 {
            return Err(OrderError::InvalidSeatCount(seats));
        }

        Ok(Self { name, seats })
    }
}

/// Section a confirmed party was seated in, 1-based
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatAssignment {
    pub row: usize,
    pub section: usize,
}

impl fmt::Display for SeatAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {} Section {}", self.row, self.section)
    }
}

/// Why a party could not be seated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// More seats requested than remain in the whole theater
    PartyTooLarge,
    /// Enough seats overall, but no single section can hold the party
    CannotAccommodateWithoutSplitting,
}

impl RejectionReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::PartyTooLarge => "Sorry, we can't handle your party.",
            RejectionReason::CannotAccommodateWithoutSplitting => "Call to split party.",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a reservation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed(SeatAssignment),
    Rejected(RejectionReason),
}

/// A request together with what happened to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reservation {
    pub request: ReservationRequest,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(request: ReservationRequest) -> Self {
        Self {
            request,
            status: ReservationStatus::Pending,
        }
    }

    pub fn name(&self) -> &str {
        &self.request.name
    }

    pub fn seats(&self) -> i64 {
        self.request.seats
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReservationStatus::Pending
    }

    pub fn assignment(&self) -> Option<SeatAssignment> {
        match self.status {
            ReservationStatus::Confirmed(assignment) => Some(assignment),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Option<RejectionReason> {
        match self.status {
            ReservationStatus::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    pub(crate) fn confirm(&mut self, assignment: SeatAssignment) {
        self.status = ReservationStatus::Confirmed(assignment);
    }

    pub(crate) fn reject(&mut self, reason: RejectionReason) {
        self.status = ReservationStatus::Rejected(reason);
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            ReservationStatus::Pending => write!(f, "{} Pending Confirmation", self.name()),
            ReservationStatus::Confirmed(assignment) => write!(f, "{} {}", self.name(), assignment),
            ReservationStatus::Rejected(reason) => write!(f, "{} {}", self.name(), reason),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid name for ticket request")]
    EmptyName,

    #[error("Invalid seat count: {0}")]
    InvalidSeatCount(i64),

    #[error("Malformed request line: {0}")]
    MalformedLine(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        assert!(ReservationRequest::new("Smith", 2).is_ok());
        assert_eq!(ReservationRequest::new("", 2), Err(OrderError::EmptyName));
        assert_eq!(ReservationRequest::new("  ", 2), Err(OrderError::EmptyName));
        assert_eq!(ReservationRequest::new("Smith", 0), Err(OrderError::InvalidSeatCount(0)));
        assert_eq!(ReservationRequest::new("Smith", -3), Err(OrderError::InvalidSeatCount(-3)));
    }

    #[test]
    fn test_display() {
        let mut reservation = Reservation::new(ReservationRequest::new("Jane Doe", 3).unwrap());
        assert_eq!(reservation.to_string(), "Jane Doe Pending Confirmation");

        reservation.confirm(SeatAssignment { row: 2, section: 1 });
        assert_eq!(reservation.to_string(), "Jane Doe Row 2 Section 1");
        assert_eq!(reservation.assignment(), Some(SeatAssignment { row: 2, section: 1 }));
        assert_eq!(reservation.rejection(), None);

        reservation.reject(RejectionReason::PartyTooLarge);
        assert_eq!(reservation.to_string(), "Jane Doe Sorry, we can't handle your party.");

        reservation.reject(RejectionReason::CannotAccommodateWithoutSplitting);
        assert_eq!(reservation.to_string(), "Jane Doe Call to split party.");
        assert_eq!(reservation.assignment(), None);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(ReservationStatus::Rejected(RejectionReason::PartyTooLarge)).unwrap();
        assert_eq!(json, serde_json::json!({ "REJECTED": "PARTY_TOO_LARGE" }));

        let json = serde_json::to_value(ReservationStatus::Pending).unwrap();
        assert_eq!(json, serde_json::json!("PENDING"));
    }
}
