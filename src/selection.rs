//! In-memory seat selection over a generated grid.
//!
//! Single-session, single-threaded state: every transition is a plain method
//! call, so there is nothing to synchronize. Booked seats are immutable here;
//! the backend re-checks them at submission time anyway.

use std::collections::HashSet;

use crate::grid::{self, GridError};
use crate::models::{Seat, SeatStatus};

/// Seat grid plus the showtime price, supporting toggle and the derived
/// queries the checkout step needs.
#[derive(Debug, Clone)]
pub struct SeatMap {
    seats: Vec<Seat>,
    price: f64,
}

impl SeatMap {
    /// Generates the grid for a studio and merges in the occupied seats.
    pub fn build(
        rows: u32,
        cols: u32,
        occupied: &HashSet<String>,
        price: f64,
    ) -> Result<Self, GridError> {
        Ok(Self {
            seats: grid::generate(rows, cols, occupied)?,
            price,
        })
    }

    /// Toggles one seat: available becomes selected, selected reverts to
    /// available, booked stays booked. Returns the status after the call.
    ///
    /// An id that is not part of the grid is an error rather than a silent
    /// no-op, so a typo cannot be mistaken for a booked seat.
    pub fn toggle(&mut self, seat_id: &str) -> Result<SeatStatus, GridError> {
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.id == seat_id)
            .ok_or_else(|| GridError::UnknownSeat(seat_id.to_string()))?;

        seat.status = match seat.status {
            SeatStatus::Available => SeatStatus::Selected,
            SeatStatus::Selected => SeatStatus::Available,
            SeatStatus::Booked => SeatStatus::Booked,
        };
        Ok(seat.status)
    }

    /// Currently selected seat ids in row-major grid order.
    pub fn selected_seats(&self) -> Vec<String> {
        self.seats
            .iter()
            .filter(|s| s.status == SeatStatus::Selected)
            .map(|s| s.id.clone())
            .collect()
    }

    /// Recomputed on every call; never cached.
    pub fn total_price(&self) -> f64 {
        self.selected_seats().len() as f64 * self.price
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Rows present in the grid, in order, for rendering.
    pub fn rows(&self) -> Vec<char> {
        let mut rows: Vec<char> = Vec::new();
        for seat in &self.seats {
            if rows.last() != Some(&seat.row) {
                rows.push(seat.row);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn map_2x3(occupied: &[&str]) -> SeatMap {
        let occupied: HashSet<String> = occupied.iter().map(|s| s.to_string()).collect();
        SeatMap::build(2, 3, &occupied, 50_000.0).unwrap()
    }

    #[test]
    fn toggle_selects_and_reverts() {
        let mut map = map_2x3(&[]);
        assert_eq!(map.toggle("A1").unwrap(), SeatStatus::Selected);
        assert_eq!(map.selected_seats(), vec!["A1"]);
        assert_eq!(map.toggle("A1").unwrap(), SeatStatus::Available);
        assert!(map.selected_seats().is_empty());
    }

    #[test]
    fn booked_seat_is_immutable() {
        let mut map = map_2x3(&["A2"]);
        for _ in 0..3 {
            assert_eq!(map.toggle("A2").unwrap(), SeatStatus::Booked);
        }
        assert!(map.selected_seats().is_empty());
    }

    #[test]
    fn unknown_seat_is_an_error() {
        let mut map = map_2x3(&[]);
        assert_eq!(
            map.toggle("Z9"),
            Err(GridError::UnknownSeat("Z9".to_string()))
        );
    }

    #[test]
    fn selected_seats_keep_row_major_order() {
        let mut map = map_2x3(&[]);
        map.toggle("B3").unwrap();
        map.toggle("A1").unwrap();
        map.toggle("A3").unwrap();
        assert_eq!(map.selected_seats(), vec!["A1", "A3", "B3"]);
    }

    #[test]
    fn total_price_tracks_selection_size() {
        let mut map = map_2x3(&["A2"]);
        assert_eq!(map.total_price(), 0.0);
        map.toggle("A1").unwrap();
        map.toggle("B3").unwrap();
        assert_eq!(map.total_price(), 2.0 * 50_000.0);
        map.toggle("B3").unwrap();
        assert_eq!(map.total_price(), 50_000.0);
    }

    #[test]
    fn rows_are_listed_once_in_order() {
        let map = map_2x3(&[]);
        assert_eq!(map.rows(), vec!['A', 'B']);
    }

    proptest! {
        #[test]
        fn double_toggle_is_identity(rows in 1u32..=10, cols in 1u32..=10) {
            let mut map = SeatMap::build(rows, cols, &HashSet::new(), 100.0).unwrap();
            let before = map.total_price();
            map.toggle("A1").unwrap();
            map.toggle("A1").unwrap();
            prop_assert_eq!(map.total_price(), before);
            prop_assert!(map.selected_seats().is_empty());
        }

        #[test]
        fn price_is_always_count_times_unit(
            toggles in proptest::collection::vec((0u32..4, 1u32..=4), 0..20),
        ) {
            let mut map = SeatMap::build(4, 4, &HashSet::new(), 75.5).unwrap();
            for (r, c) in toggles {
                let id = format!("{}{}", crate::grid::row_label(r), c);
                map.toggle(&id).unwrap();
            }
            let expected = map.selected_seats().len() as f64 * 75.5;
            prop_assert_eq!(map.total_price(), expected);
        }
    }
}
