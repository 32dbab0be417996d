//! Seat grid generation.
//!
//! A showtime has no persisted seat table; the full seat universe is the
//! Cartesian product of its studio's row and column ranges, derived fresh on
//! every fetch. Occupancy is merged in at generation time.

use std::collections::HashSet;

use crate::models::{Seat, SeatStatus};

/// Rows are labelled with single Latin letters, so 26 is a hard cap.
/// Anything past 'Z' is rejected instead of silently mislabelled.
pub const MAX_ROWS: u32 = 26;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("studio layout has no seats ({rows} rows x {cols} columns)")]
    EmptyLayout { rows: u32, cols: u32 },
    #[error("{0} rows exceed the 26-row A-Z labelling limit")]
    TooManyRows(u32),
    #[error("unknown seat `{0}`")]
    UnknownSeat(String),
}

/// Label for a 0-based row index: 0 -> 'A', 1 -> 'B', ...
///
/// Callers must have validated the index against [`MAX_ROWS`].
pub fn row_label(index: u32) -> char {
    debug_assert!(index < MAX_ROWS);
    (b'A' + index as u8) as char
}

/// Builds the full seat matrix for a studio of `rows` x `cols`, marking every
/// seat whose id appears in `occupied` as booked and everything else as
/// available.
///
/// Output is row-major: all of row A left to right, then row B, and so on.
/// Pure and deterministic; identical inputs produce identical output.
pub fn generate(rows: u32, cols: u32, occupied: &HashSet<String>) -> Result<Vec<Seat>, GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::EmptyLayout { rows, cols });
    }
    if rows > MAX_ROWS {
        return Err(GridError::TooManyRows(rows));
    }

    let mut seats = Vec::with_capacity((rows * cols) as usize);
    for i in 0..rows {
        let row = row_label(i);
        for j in 1..=cols {
            let id = format!("{row}{j}");
            let status = if occupied.contains(&id) {
                SeatStatus::Booked
            } else {
                SeatStatus::Available
            };
            seats.push(Seat {
                id,
                row,
                number: j,
                status,
            });
        }
    }
    Ok(seats)
}
