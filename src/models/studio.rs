use serde::{Deserialize, Serialize};

/// Cinema studio/room with its seating dimensions. The seat universe of a
/// showtime is derived from these dimensions, not from a persisted seat table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Studio {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub total_rows: u32,
    pub total_cols: u32,
}
