pub mod api;
pub mod bookings;
pub mod showtimes;

pub use api::ApiClient;
pub use bookings::PaymentRedirect;
