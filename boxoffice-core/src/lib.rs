pub mod theater;
pub mod layout;
pub mod repository;

pub use theater::{Row, Section, SectionError, SectionHolding, Theater};
pub use layout::{parse_fingerprint, parse_layout, parse_row};
pub use repository::{FingerprintHasher, SnapshotKey, TheaterRepository};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
