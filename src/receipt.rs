//! Post-payment reconciliation.
//!
//! By the time the confirmation view is reached the payment has already
//! succeeded server-side, so this module's only job is friendly display: it
//! prefers the booking-lookup endpoint, falls back to the snapshot cached at
//! checkout, and falls back again to neutral placeholders. It never fails.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Booking, ShowtimeDetail};
use crate::services::ApiClient;

pub const PLACEHOLDER_MOVIE: &str = "Movie Confirmed";
pub const PLACEHOLDER_STUDIO: &str = "Confirmed";
pub const PLACEHOLDER_SEATS: &str = "-------";

/// Summary of a just-completed booking, written to disk right before the
/// browser leaves for the payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptSnapshot {
    pub booking_id: Option<Uuid>,
    pub movie_title: String,
    pub studio_name: String,
    pub seat_numbers: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub total_amount: f64,
}

impl ReceiptSnapshot {
    pub fn from_checkout(
        showtime: &ShowtimeDetail,
        seat_numbers: &[String],
        total_amount: f64,
        booking: Option<&Booking>,
    ) -> Self {
        Self {
            booking_id: booking.map(|b| b.id),
            movie_title: showtime.movie.title.clone(),
            studio_name: showtime.studio.name.clone(),
            seat_numbers: seat_numbers.to_vec(),
            start_time: Some(showtime.start_time),
            total_amount,
        }
    }
}

/// Single-slot snapshot cache backed by a JSON file.
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    path: PathBuf,
}

impl ReceiptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, snapshot: &ReceiptSnapshot) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)
    }

    /// Missing or corrupt snapshots degrade to `None`; the receipt view
    /// still renders with placeholders.
    pub fn load(&self) -> Option<ReceiptSnapshot> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt receipt snapshot");
                None
            }
        }
    }
}

/// Human-readable confirmation receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub movie: String,
    pub studio: String,
    pub seats: Vec<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub total_amount: Option<f64>,
}

impl Receipt {
    pub fn placeholder() -> Self {
        Self {
            movie: PLACEHOLDER_MOVIE.to_string(),
            studio: PLACEHOLDER_STUDIO.to_string(),
            seats: Vec::new(),
            start_time: None,
            total_amount: None,
        }
    }

    pub fn from_snapshot(snapshot: &ReceiptSnapshot) -> Self {
        Self {
            movie: snapshot.movie_title.clone(),
            studio: snapshot.studio_name.clone(),
            seats: snapshot.seat_numbers.clone(),
            start_time: snapshot.start_time,
            total_amount: Some(snapshot.total_amount),
        }
    }

    /// Reads movie/studio/showtime off the first ticket's preloaded
    /// showtime; any piece the server left out falls back to a placeholder.
    pub fn from_booking(booking: &Booking) -> Self {
        let showtime = booking.tickets.first().and_then(|t| t.showtime.as_ref());
        Self {
            movie: showtime
                .and_then(|s| s.movie.as_ref())
                .map(|m| m.title.clone())
                .unwrap_or_else(|| PLACEHOLDER_MOVIE.to_string()),
            studio: showtime
                .and_then(|s| s.studio.as_ref())
                .map(|s| s.name.clone())
                .unwrap_or_else(|| PLACEHOLDER_STUDIO.to_string()),
            seats: booking.seat_numbers(),
            start_time: showtime.and_then(|s| s.start_time),
            total_amount: Some(booking.total_amount),
        }
    }

    /// Seat list for display, with the neutral placeholder when empty.
    pub fn seats_display(&self) -> String {
        if self.seats.is_empty() {
            PLACEHOLDER_SEATS.to_string()
        } else {
            self.seats.join(", ")
        }
    }

    /// Resolves the receipt for the confirmation view: booking lookup when
    /// an id is known, then the local snapshot, then placeholders.
    pub async fn resolve(
        api: &ApiClient,
        store: &ReceiptStore,
        booking_id: Option<Uuid>,
    ) -> Receipt {
        let booking_id = booking_id.or_else(|| store.load().and_then(|s| s.booking_id));

        if let Some(id) = booking_id {
            match api.booking(id).await {
                Ok(booking) => return Receipt::from_booking(&booking),
                Err(e) => {
                    warn!(booking_id = %id, error = %e, "booking lookup failed, using local snapshot");
                }
            }
        }

        match store.load() {
            Some(snapshot) => Receipt::from_snapshot(&snapshot),
            None => {
                debug!("no receipt snapshot cached, rendering placeholders");
                Receipt::placeholder()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::TicketShowtime;
    use crate::models::{Movie, Studio, Ticket};

    fn store_in(dir: &str) -> ReceiptStore {
        let path = std::env::temp_dir()
            .join(dir)
            .join("last-receipt.json");
        let _ = fs::remove_file(&path);
        ReceiptStore::new(path)
    }

    fn snapshot() -> ReceiptSnapshot {
        ReceiptSnapshot {
            booking_id: Some(Uuid::new_v4()),
            movie_title: "Interstellar".to_string(),
            studio_name: "Studio 1".to_string(),
            seat_numbers: vec!["A3".to_string(), "A4".to_string()],
            start_time: None,
            total_amount: 100_000.0,
        }
    }

    #[test]
    fn snapshot_round_trips_through_the_store() {
        let store = store_in("receipt-roundtrip");
        store.save(&snapshot()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.movie_title, "Interstellar");
        assert_eq!(loaded.seat_numbers, vec!["A3", "A4"]);
    }

    #[test]
    fn missing_snapshot_loads_as_none() {
        let store = store_in("receipt-missing");
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_snapshot_loads_as_none() {
        let store = store_in("receipt-corrupt");
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn placeholder_receipt_has_neutral_text() {
        let receipt = Receipt::placeholder();
        assert_eq!(receipt.movie, "Movie Confirmed");
        assert_eq!(receipt.studio, "Confirmed");
        assert_eq!(receipt.seats_display(), "-------");
    }

    #[test]
    fn booking_without_preloads_degrades_to_placeholders() {
        let booking = Booking {
            id: Uuid::new_v4(),
            invoice_number: String::new(),
            total_amount: 50_000.0,
            status: "PAID".to_string(),
            payment_url: None,
            created_at: None,
            tickets: vec![Ticket {
                id: 1,
                seat_number: "B2".to_string(),
                showtime: None,
            }],
        };
        let receipt = Receipt::from_booking(&booking);
        assert_eq!(receipt.movie, PLACEHOLDER_MOVIE);
        assert_eq!(receipt.studio, PLACEHOLDER_STUDIO);
        assert_eq!(receipt.seats_display(), "B2");
    }

    #[test]
    fn booking_with_preloads_fills_the_receipt() {
        let booking = Booking {
            id: Uuid::new_v4(),
            invoice_number: "INV-2025-0001".to_string(),
            total_amount: 100_000.0,
            status: "PAID".to_string(),
            payment_url: None,
            created_at: None,
            tickets: vec![Ticket {
                id: 1,
                seat_number: "A3".to_string(),
                showtime: Some(TicketShowtime {
                    start_time: None,
                    movie: Some(Movie {
                        id: 1,
                        title: "Interstellar".to_string(),
                    }),
                    studio: Some(Studio {
                        id: 1,
                        name: "Studio 1".to_string(),
                        total_rows: 5,
                        total_cols: 5,
                    }),
                }),
            }],
        };
        let receipt = Receipt::from_booking(&booking);
        assert_eq!(receipt.movie, "Interstellar");
        assert_eq!(receipt.studio, "Studio 1");
        assert_eq!(receipt.seats_display(), "A3");
    }
}
