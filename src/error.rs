use crate::grid::GridError;

/// Errors surfaced by the booking flow.
///
/// Read-path failures (showtime/occupancy fetch) are recoverable by a
/// user-initiated retry; write-path failures (submission) keep the current
/// selection intact except for `SeatConflict`, which marks it stale.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Transport failure: no usable HTTP response at all.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 404 on a read path.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Any other non-2xx on a read path (fetching showtime or occupancy).
    /// Surfaces as a page-level failure with a retry affordance.
    #[error("failed to load {resource}: {message}")]
    Fetch {
        resource: &'static str,
        message: String,
    },

    /// 401 — the session cookie is missing or expired. The caller should
    /// redirect to login; the in-memory selection is left untouched.
    #[error("authentication required")]
    AuthRequired,

    /// 409 on submission — one or more requested seats were booked by a
    /// concurrent session. Occupancy must be re-fetched before retrying.
    #[error("seat conflict: {0}")]
    SeatConflict(String),

    /// The server accepted the booking but returned no payment link.
    /// The booking must not be treated as complete.
    #[error("booking created but no payment link was returned")]
    IncompleteBooking,

    /// Any other non-2xx on submission, carrying the server's `error`
    /// message when one was provided.
    #[error("booking rejected: {0}")]
    Submission(String),

    /// The response body did not have the expected shape. On the occupancy
    /// path this is a hard error: a booking must never proceed against
    /// unverified occupancy.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Client-side guard: submitting an empty selection never issues a
    /// network request.
    #[error("no seats selected")]
    EmptySelection,

    /// Client-side guard: a prior seat conflict invalidated the occupancy
    /// snapshot; call `refresh` before submitting again.
    #[error("occupancy is stale after a seat conflict; refresh before submitting again")]
    RefreshRequired,

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl BookingError {
    /// True for errors a caller may resolve by retrying the same action
    /// without changing the selection.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::Network(_) | BookingError::Submission(_) | BookingError::Fetch { .. }
        )
    }
}
