//! Booking submission and lookup.
//!
//! Submission is a small state machine keyed on the response status. No
//! retry with backoff: every failure goes back to the user for an explicit
//! decision, since a silent retry against a booking endpoint risks duplicate
//! holds.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::Booking;

use super::api::ApiClient;

#[derive(Debug, Serialize)]
struct CreateBookingRequest<'a> {
    showtime_id: u32,
    seat_numbers: &'a [String],
}

/// `POST /bookings` answers with the booking under `data` and the payment
/// link as a sibling field.
#[derive(Debug, Deserialize)]
struct CreateBookingResponse {
    #[serde(default)]
    data: Option<Booking>,
    #[serde(default)]
    payment_url: Option<String>,
}

/// Successful submission outcome: the URL the browser must navigate to (a
/// full navigation, it leaves the application's origin) plus the created
/// booking when the server included it.
#[derive(Debug, Clone)]
pub struct PaymentRedirect {
    pub url: String,
    pub booking: Option<Booking>,
}

impl ApiClient {
    /// Submits the selected seats for a showtime.
    ///
    /// `seat_numbers` must be non-empty; the empty-selection guard lives in
    /// the session so this method never sees it.
    pub async fn create_booking(
        &self,
        showtime_id: u32,
        seat_numbers: &[String],
    ) -> Result<PaymentRedirect, BookingError> {
        info!(showtime_id, seats = seat_numbers.len(), "submitting booking");

        let resp = self
            .http()
            .post(self.url("/bookings"))
            .json(&CreateBookingRequest {
                showtime_id,
                seat_numbers,
            })
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let body: CreateBookingResponse = resp
                .json()
                .await
                .map_err(|e| BookingError::MalformedResponse(e.to_string()))?;
            return match body.payment_url.filter(|url| !url.is_empty()) {
                Some(url) => Ok(PaymentRedirect {
                    url,
                    booking: body.data,
                }),
                None => {
                    warn!(showtime_id, "booking accepted without a payment link");
                    Err(BookingError::IncompleteBooking)
                }
            };
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(BookingError::AuthRequired),
            StatusCode::CONFLICT => {
                let message = Self::error_message(resp)
                    .await
                    .unwrap_or_else(|| "seat already taken by another booking".to_string());
                warn!(showtime_id, %message, "seat conflict on submission");
                Err(BookingError::SeatConflict(message))
            }
            _ => {
                let message = Self::error_message(resp)
                    .await
                    .unwrap_or_else(|| format!("booking failed with status {status}"));
                Err(BookingError::Submission(message))
            }
        }
    }

    /// `GET /bookings/{id}` — booking detail for the post-payment receipt.
    pub async fn booking(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        let resp = self
            .http()
            .get(self.url(&format!("/bookings/{booking_id}")))
            .send()
            .await?;

        let env = Self::read_envelope(resp, "booking").await?;
        let data = env.data.ok_or_else(|| {
            BookingError::MalformedResponse("booking envelope has no `data`".to_string())
        })?;
        serde_json::from_value(data)
            .map_err(|e| BookingError::MalformedResponse(format!("booking payload: {e}")))
    }
}
