use tracing::debug;
use crate::theater::{Row, Section, Theater};
use crate::{CoreError, CoreResult};

/// Parse one line of layout text into section capacities.
///
/// Returns `None` unless every whitespace-delimited token is a non-negative
/// integer, so a line never yields a partial row.
pub fn parse_row(line: &str) -> Option<Vec<u64>> {
    let capacities = line
        .split_whitespace()
        .map(|token| token.parse::<u64>().ok())
        .collect::<Option<Vec<u64>>>()?;

    if capacities.is_empty() {
        None
    } else {
        Some(capacities)
    }
}

/// Build a theater from free-form layout text.
///
/// Each numeric line is a row, front to back, and each number a section
/// capacity, left to right. Blank and non-numeric lines are skipped. The
/// event is left empty for the caller to set.
///
/// ```text
/// 1 2 3
/// 4 4 6
/// ```
/// describes two rows, six sections and 20 seats.
pub fn parse_layout(text: &str) -> Theater {
    let mut rows = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Some(capacities) => rows.push(Row::new(&capacities)),
            None => debug!(line, "Skipping non-layout line"),
        }
    }

    Theater::new(rows)
}

/// Rebuild a theater's structure from its occupant-free render
/// (`Theater::fingerprint`).
pub fn parse_fingerprint(text: &str) -> CoreResult<Theater> {
    let mut rows = Vec::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let row_number = rows.len() + 1;
        let mut sections = Vec::new();

        for cell in line.split('\t') {
            let section_number = sections.len() + 1;
            let capacity = parse_cell(cell, row_number, section_number)?;
            sections.push(Section::new(capacity));
        }

        rows.push(Row { sections });
    }

    Ok(Theater::new(rows))
}

/// Parse `[<row>-<section>(<capacity>)]`, checking the position matches
fn parse_cell(cell: &str, row: usize, section: usize) -> CoreResult<u64> {
    let malformed = || CoreError::ValidationError(format!("Malformed layout cell '{}'", cell));

    let inner = cell
        .strip_prefix('[')
        .and_then(|c| c.strip_suffix(")]"))
        .ok_or_else(malformed)?;
    let (position, capacity) = inner.split_once('(').ok_or_else(malformed)?;
    let (r, s) = position.split_once('-').ok_or_else(malformed)?;

    if r.parse::<usize>().ok() != Some(row) || s.parse::<usize>().ok() != Some(section) {
        return Err(CoreError::ValidationError(format!(
            "Layout cell '{}' is out of order, expected {}-{}",
            cell, row, section
        )));
    }

    capacity.parse::<u64>().map_err(|_| malformed())
}
