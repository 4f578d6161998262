use serde::{Deserialize, Serialize};
use crate::{CoreError, CoreResult};

/// A contiguous block of seats with a fixed capacity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    #[serde(rename = "seats")]
    pub capacity: u64,
    /// One entry per reserved seat, in reservation order
    #[serde(rename = "reserved", default)]
    pub occupants: Vec<String>,
}

impl Section {
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            occupants: Vec::new(),
        }
    }

    /// Number of unreserved seats in the section
    pub fn available_seats(&self) -> u64 {
        self.capacity.saturating_sub(self.occupants.len() as u64)
    }

    /// Reserve `count` seats for `name`.
    ///
    /// Either every seat is reserved or none is: on failure the occupant list
    /// is left exactly as it was.
    pub fn reserve(&mut self, name: &str, count: u64) -> Result<(), SectionError> {
        let available = self.available_seats();
        if count > available {
            return Err(SectionError::InsufficientCapacity {
                requested: count,
                available,
            });
        }

        self.occupants
            .extend(std::iter::repeat(name.to_string()).take(count as usize));

        Ok(())
    }

    /// Number of seats in this section held by `name`
    pub fn seats_held_by(&self, name: &str) -> u64 {
        self.occupants.iter().filter(|o| o.as_str() == name).count() as u64
    }
}

/// Sections of a single row, left to right
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Row {
    pub sections: Vec<Section>,
}

impl Row {
    pub fn new(capacities: &[u64]) -> Self {
        Self {
            sections: capacities.iter().copied().map(Section::new).collect(),
        }
    }
}

/// Where a party's seats ended up, 1-based for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHolding {
    pub row: usize,
    pub section: usize,
    pub seats: u64,
}

/// Rows of a theater, front (row 1) to back, plus the event it is booked for
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theater {
    pub rows: Vec<Row>,
    #[serde(default)]
    pub event: String,
}

impl Theater {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            event: String::new(),
        }
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Unreserved seats across every section of every row
    pub fn available_seats(&self) -> u64 {
        self.sections().map(Section::available_seats).sum()
    }

    pub fn total_capacity(&self) -> u64 {
        self.sections().map(|s| s.capacity).sum()
    }

    pub fn section_count(&self) -> usize {
        self.rows.iter().map(|r| r.sections.len()).sum()
    }

    /// Zero-based mutable lookup
    pub fn section_mut(&mut self, row: usize, section: usize) -> Option<&mut Section> {
        self.rows.get_mut(row)?.sections.get_mut(section)
    }

    fn sections(&self) -> impl Iterator<Item = &Section> {
        self.rows.iter().flat_map(|r| r.sections.iter())
    }

    /// Every section holding seats for `name`, front to back
    pub fn sections_held_by(&self, name: &str) -> Vec<SectionHolding> {
        let mut holdings = Vec::new();

        for (i, row) in self.rows.iter().enumerate() {
            for (j, section) in row.sections.iter().enumerate() {
                let seats = section.seats_held_by(name);
                if seats > 0 {
                    holdings.push(SectionHolding {
                        row: i + 1,
                        section: j + 1,
                        seats,
                    });
                }
            }
        }

        holdings
    }

    /// Human-readable layout.
    ///
    /// Each section renders as `[<row>-<section>(<capacity>)]`, optionally
    /// followed by its occupants joined with `", "`. Sections are separated by
    /// a tab and rows by a newline.
    pub fn render(&self, include_occupants: bool) -> String {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.sections
                    .iter()
                    .enumerate()
                    .map(|(j, section)| {
                        let mut cell = format!("[{}-{}({})]", i + 1, j + 1, section.capacity);
                        if include_occupants {
                            cell.push_str(&section.occupants.join(", "));
                        }
                        cell
                    })
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Occupant-free render. Stable across reservations, so it identifies the
    /// layout rather than its booking state.
    pub fn fingerprint(&self) -> String {
        self.render(false)
    }

    /// True when both theaters have the same rows and section capacities
    pub fn same_layout(&self, other: &Theater) -> bool {
        self.rows.len() == other.rows.len()
            && self.rows.iter().zip(&other.rows).all(|(a, b)| {
                a.sections.len() == b.sections.len()
                    && a.sections
                        .iter()
                        .zip(&b.sections)
                        .all(|(x, y)| x.capacity == y.capacity)
            })
    }

    /// Check the seat-count invariant on every section.
    ///
    /// Deserialized snapshots bypass `Section::reserve`, so they are checked
    /// here before use.
    pub fn validate(&self) -> CoreResult<()> {
        for (i, row) in self.rows.iter().enumerate() {
            for (j, section) in row.sections.iter().enumerate() {
                if section.occupants.len() as u64 > section.capacity {
                    return Err(CoreError::ValidationError(format!(
                        "section {}-{} holds {} occupants but has {} seats",
                        i + 1,
                        j + 1,
                        section.occupants.len(),
                        section.capacity
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("Not enough seats in section: requested {requested}, available {available}")]
    InsufficientCapacity {
        requested: u64,
        available: u64,
    },
}
