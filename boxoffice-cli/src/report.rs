use boxoffice_core::Theater;
use boxoffice_order::Reservation;
use std::io::{self, Write};

pub const TITLE: &str = "Ticket Request Batch File Processing Results";
pub const RULE: &str = "--------------------------------------------";

/// Banner, one line per reservation in submission order, closing rule
pub fn write_results<W: Write>(out: &mut W, reservations: &[Reservation]) -> io::Result<()> {
    writeln!(out, "{}", TITLE)?;
    writeln!(out, "{}", RULE)?;
    for reservation in reservations {
        writeln!(out, "{}", reservation)?;
    }
    writeln!(out, "{}", RULE)
}

/// Seating chart with occupants and the remaining seat count
pub fn write_theater<W: Write>(out: &mut W, theater: &Theater) -> io::Result<()> {
    writeln!(out, "{}", theater.render(true))?;
    writeln!(out, "There are {} seats available...", theater.available_seats())
}
