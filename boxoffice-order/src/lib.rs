pub mod models;
pub mod processor;
pub mod intake;

pub use models::{OrderError, RejectionReason, Reservation, ReservationRequest, ReservationStatus, SeatAssignment};
pub use processor::{BatchSummary, ReservationError, ReservationProcessor};
pub use intake::{parse_request_file, parse_request_line, BatchInput};
