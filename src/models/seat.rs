use serde::{Deserialize, Serialize};

/// Per-seat status within one client session. `Booked` comes from the
/// occupancy list at fetch time and never changes client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Selected,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Row letter + 1-based column, e.g. "A1".
    pub id: String,
    pub row: char,
    pub number: u32,
    pub status: SeatStatus,
}
