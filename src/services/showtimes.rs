//! Showtime detail and occupancy fetching.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::BookingError;
use crate::models::ShowtimeDetail;

use super::api::ApiClient;

impl ApiClient {
    /// `GET /showtimes/{id}` — showtime with embedded movie and studio.
    pub async fn showtime(&self, showtime_id: u32) -> Result<ShowtimeDetail, BookingError> {
        let resp = self
            .http()
            .get(self.url(&format!("/showtimes/{showtime_id}")))
            .send()
            .await?;

        let env = Self::read_envelope(resp, "showtime").await?;
        let data = env.data.ok_or_else(|| {
            BookingError::MalformedResponse("showtime envelope has no `data`".to_string())
        })?;
        let showtime: ShowtimeDetail = serde_json::from_value(data)
            .map_err(|e| BookingError::MalformedResponse(format!("showtime payload: {e}")))?;

        info!(
            showtime_id,
            movie = %showtime.movie.title,
            studio = %showtime.studio.name,
            "showtime loaded"
        );
        Ok(showtime)
    }

    /// `GET /showtimes/{id}/seats` — the seat ids already booked for this
    /// showtime at the moment of query.
    pub async fn occupied_seats(&self, showtime_id: u32) -> Result<HashSet<String>, BookingError> {
        let resp = self
            .http()
            .get(self.url(&format!("/showtimes/{showtime_id}/seats")))
            .send()
            .await?;

        let env = Self::read_envelope(resp, "showtime").await?;
        let occupied = parse_occupancy(env.data.as_ref())?;
        debug!(showtime_id, occupied = occupied.len(), "occupancy loaded");
        Ok(occupied)
    }
}

/// Normalizes the occupancy payload, whose shape has drifted across backend
/// versions: either a bare array of seat-id strings, or an object wrapping
/// the array under `occupied_seats`.
///
/// Anything else is a hard error. Treating an unrecognized shape as "no
/// seats occupied" would let a booking proceed against unverified occupancy.
fn parse_occupancy(data: Option<&Value>) -> Result<HashSet<String>, BookingError> {
    let items = match data {
        Some(Value::Array(items)) => items,
        Some(Value::Object(fields)) => match fields.get("occupied_seats") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => {
                return Err(BookingError::MalformedResponse(
                    "occupancy object has no `occupied_seats` list".to_string(),
                ))
            }
            Some(other) => {
                return Err(BookingError::MalformedResponse(format!(
                    "`occupied_seats` is not a list: {other}"
                )))
            }
        },
        other => {
            return Err(BookingError::MalformedResponse(format!(
                "unrecognized occupancy payload: {}",
                other.map_or_else(|| "missing `data`".to_string(), Value::to_string)
            )))
        }
    };

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                BookingError::MalformedResponse(format!("occupancy entry is not a string: {item}"))
            })
        })
        .collect()
}
