use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Movie, Studio};

/// Booking as returned by the backend. Consumed, never owned: beyond the
/// payment link the client only reads it back for receipt display, so every
/// field the receipt does not strictly need is defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

impl Booking {
    /// Seat numbers of this booking in the order the backend stored them.
    pub fn seat_numbers(&self) -> Vec<String> {
        self.tickets.iter().map(|t| t.seat_number.clone()).collect()
    }
}

/// One seat reservation inside a booking. The showtime (with movie and
/// studio) is embedded when the lookup endpoint preloads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub id: u32,
    pub seat_number: String,
    #[serde(default)]
    pub showtime: Option<TicketShowtime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketShowtime {
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub movie: Option<Movie>,
    #[serde(default)]
    pub studio: Option<Studio>,
}
