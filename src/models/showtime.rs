use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Movie, Studio};

/// Showtime detail as returned by `GET /showtimes/{id}`, with movie and
/// studio embedded. Read-only from the client's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowtimeDetail {
    pub id: u32,
    #[serde(default)]
    pub movie_id: u32,
    #[serde(default)]
    pub studio_id: u32,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub price: f64,
    pub movie: Movie,
    pub studio: Studio,
}
