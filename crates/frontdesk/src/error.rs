use hotelease_core::{BookingError, ValidationError};
use thiserror::Error;
use uuid::Uuid;

pub const LISTING_UNAVAILABLE: &str = "Failed to load hotels. Please try again.";
pub const DETAIL_UNAVAILABLE: &str = "Failed to load hotel details. Please try again.";
pub const BOOKING_UNAVAILABLE: &str =
    "An error occurred during the booking process. Please try again.";

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Hotel not found. Please try another hotel.")]
    HotelNotFound { hotel_id: u32 },
    #[error("booking {0} not found")]
    DraftNotFound(Uuid),
    #[error("chat {0} not found")]
    ChatNotFound(Uuid),
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Generic, retryable; `message` is the only thing shown to the user.
    #[error("{message}")]
    Unavailable {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl DeskError {
    pub(crate) fn unavailable(message: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Unavailable { message, source }
    }

    /// The field-level failure behind this error, if there is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(error) | Self::Booking(BookingError::Invalid(error)) => Some(error),
            _ => None,
        }
    }
}
