//! One user's booking flow for one showtime.
//!
//! Fetch showtime + occupancy, build the grid, toggle seats, check out.
//! All transitions are serialized on the caller's task; the real seat race
//! between independent sessions is the backend's problem, and this session
//! only reacts to its failure signal (a 409) by demanding a refresh.

use tracing::{info, warn};

use crate::error::BookingError;
use crate::models::{Seat, SeatStatus, ShowtimeDetail};
use crate::receipt::{ReceiptSnapshot, ReceiptStore};
use crate::selection::SeatMap;
use crate::services::{ApiClient, PaymentRedirect};

pub struct BookingSession {
    api: ApiClient,
    showtime: ShowtimeDetail,
    map: SeatMap,
    /// Set after a seat conflict: the occupancy snapshot is known stale and
    /// checkout refuses to run until `refresh` has re-fetched it.
    stale: bool,
}

impl BookingSession {
    /// Loads the showtime and its occupancy, then derives the seat grid from
    /// the studio dimensions.
    pub async fn load(api: ApiClient, showtime_id: u32) -> Result<Self, BookingError> {
        let showtime = api.showtime(showtime_id).await?;
        let occupied = api.occupied_seats(showtime_id).await?;
        let map = SeatMap::build(
            showtime.studio.total_rows,
            showtime.studio.total_cols,
            &occupied,
            showtime.price,
        )?;
        Ok(Self {
            api,
            showtime,
            map,
            stale: false,
        })
    }

    pub fn showtime(&self) -> &ShowtimeDetail {
        &self.showtime
    }

    pub fn seats(&self) -> &[Seat] {
        self.map.seats()
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.map
    }

    pub fn selected_seats(&self) -> Vec<String> {
        self.map.selected_seats()
    }

    pub fn total_price(&self) -> f64 {
        self.map.total_price()
    }

    /// True after a conflict, until `refresh` succeeds.
    pub fn needs_refresh(&self) -> bool {
        self.stale
    }

    pub fn toggle(&mut self, seat_id: &str) -> Result<SeatStatus, BookingError> {
        Ok(self.map.toggle(seat_id)?)
    }

    /// Re-fetches occupancy and rebuilds the grid. The previous selection is
    /// discarded: after a conflict it is known stale, and silently carrying
    /// it over would invite resubmitting taken seats.
    pub async fn refresh(&mut self) -> Result<(), BookingError> {
        let occupied = self.api.occupied_seats(self.showtime.id).await?;
        self.map = SeatMap::build(
            self.showtime.studio.total_rows,
            self.showtime.studio.total_cols,
            &occupied,
            self.showtime.price,
        )?;
        self.stale = false;
        info!(showtime_id = self.showtime.id, "occupancy refreshed");
        Ok(())
    }

    /// Submits the current selection.
    ///
    /// Guards: an empty selection never issues a request, and a stale
    /// session (prior 409) must refresh first. Duplicate submission cannot
    /// happen within one session because this takes `&mut self` for the
    /// whole in-flight request.
    ///
    /// On success the receipt snapshot is written before the redirect is
    /// handed out, so the confirmation view can render even if the lookup
    /// endpoint is unreachable after payment. On `AuthRequired` the
    /// selection is left untouched so the user can log in and resume.
    pub async fn checkout(
        &mut self,
        receipts: &ReceiptStore,
    ) -> Result<PaymentRedirect, BookingError> {
        if self.stale {
            return Err(BookingError::RefreshRequired);
        }
        let seat_numbers = self.map.selected_seats();
        if seat_numbers.is_empty() {
            return Err(BookingError::EmptySelection);
        }

        match self
            .api
            .create_booking(self.showtime.id, &seat_numbers)
            .await
        {
            Ok(redirect) => {
                let snapshot = ReceiptSnapshot::from_checkout(
                    &self.showtime,
                    &seat_numbers,
                    self.map.total_price(),
                    redirect.booking.as_ref(),
                );
                // Snapshot is best-effort display data; a write failure must
                // not fail a booking the server already accepted.
                if let Err(e) = receipts.save(&snapshot) {
                    warn!(error = %e, "failed to cache receipt snapshot");
                }
                info!(
                    showtime_id = self.showtime.id,
                    seats = seat_numbers.len(),
                    "booking submitted, redirecting to payment"
                );
                Ok(redirect)
            }
            Err(e @ BookingError::SeatConflict(_)) => {
                self.stale = true;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
