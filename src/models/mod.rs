pub mod booking;
pub mod movie;
pub mod seat;
pub mod showtime;
pub mod studio;

pub use booking::{Booking, Ticket};
pub use movie::Movie;
pub use seat::{Seat, SeatStatus};
pub use showtime::ShowtimeDetail;
pub use studio::Studio;
