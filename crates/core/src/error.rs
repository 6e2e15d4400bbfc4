use thiserror::Error;

/// Field-level input failure. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select check-in and check-out dates.")]
    DatesRequired,
    #[error("Please select a check-in date first.")]
    CheckInRequired,
    #[error("Check-out must be after check-in.")]
    CheckOutNotAfterCheckIn,
    #[error("Dates in the past cannot be selected.")]
    DateInPast { field: &'static str },
    #[error("Room {room_id} is not offered by this hotel.")]
    UnknownRoom { room_id: u32 },
    #[error("Please select at least one adult.")]
    NoAdults,
    #[error("Please fill in all required guest details.")]
    MissingGuestDetails { fields: Vec<&'static str> },
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid phone number.")]
    InvalidPhone,
    #[error("Please fill in all required payment details.")]
    MissingPaymentDetails { fields: Vec<&'static str> },
    #[error("Please enter a valid credit card number.")]
    InvalidCardNumber,
    #[error("Please enter a valid expiry date in MM/YY format.")]
    InvalidExpiry,
    #[error("Please enter a valid CVC code (3 or 4 digits).")]
    InvalidCvc,
    #[error("Please accept the terms and conditions to confirm.")]
    TermsNotAccepted,
    #[error("Please enter your review comment.")]
    EmptyReview,
    #[error("Ratings go from 1 to 5 stars.")]
    InvalidRating { rating: u8 },
    #[error("Please type a message first.")]
    EmptyChatMessage,
    #[error("Please fill in all fields to send your message.")]
    MissingContactFields { fields: Vec<&'static str> },
    #[error("Please enter a valid email address to subscribe.")]
    InvalidNewsletterEmail,
    #[error("Please enter a destination to search for hotels.")]
    DestinationRequired,
    #[error("Unknown amenity \"{label}\".")]
    UnknownAmenity { label: String },
    #[error("Please enter a whole number for {field}.")]
    InvalidFilterValue { field: &'static str },
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatesRequired => "dates_required",
            Self::CheckInRequired => "check_in_required",
            Self::CheckOutNotAfterCheckIn => "check_out_not_after_check_in",
            Self::DateInPast { .. } => "date_in_past",
            Self::UnknownRoom { .. } => "unknown_room",
            Self::NoAdults => "no_adults",
            Self::MissingGuestDetails { .. } => "missing_guest_details",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhone => "invalid_phone",
            Self::MissingPaymentDetails { .. } => "missing_payment_details",
            Self::InvalidCardNumber => "invalid_card_number",
            Self::InvalidExpiry => "invalid_expiry",
            Self::InvalidCvc => "invalid_cvc",
            Self::TermsNotAccepted => "terms_not_accepted",
            Self::EmptyReview => "empty_review",
            Self::InvalidRating { .. } => "invalid_rating",
            Self::EmptyChatMessage => "empty_chat_message",
            Self::MissingContactFields { .. } => "missing_contact_fields",
            Self::InvalidNewsletterEmail => "invalid_newsletter_email",
            Self::DestinationRequired => "destination_required",
            Self::UnknownAmenity { .. } => "unknown_amenity",
            Self::InvalidFilterValue { .. } => "invalid_filter_value",
        }
    }

    /// Short headline, the toast title in the page.
    pub fn title(&self) -> &'static str {
        match self {
            Self::DatesRequired | Self::CheckInRequired => "Dates required",
            Self::CheckOutNotAfterCheckIn | Self::DateInPast { .. } => "Invalid dates",
            Self::UnknownRoom { .. } => "Room unavailable",
            Self::NoAdults => "Guests required",
            Self::MissingGuestDetails { .. } => "Missing information",
            Self::InvalidEmail => "Invalid email",
            Self::InvalidPhone => "Invalid phone number",
            Self::MissingPaymentDetails { .. } => "Missing payment information",
            Self::InvalidCardNumber => "Invalid card number",
            Self::InvalidExpiry => "Invalid expiry date",
            Self::InvalidCvc => "Invalid CVC",
            Self::TermsNotAccepted => "Terms required",
            Self::EmptyReview => "Review required",
            Self::InvalidRating { .. } => "Invalid rating",
            Self::EmptyChatMessage => "Message required",
            Self::MissingContactFields { .. } => "All fields are required",
            Self::InvalidNewsletterEmail => "Valid email required",
            Self::DestinationRequired => "Destination required",
            Self::UnknownAmenity { .. } => "Unknown amenity",
            Self::InvalidFilterValue { .. } => "Invalid filter",
        }
    }

    /// Form fields the failure points at.
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            Self::DatesRequired => vec!["check_in", "check_out"],
            Self::CheckInRequired => vec!["check_in"],
            Self::CheckOutNotAfterCheckIn => vec!["check_out"],
            Self::DateInPast { field } => vec![*field],
            Self::UnknownRoom { .. } => vec!["room_id"],
            Self::NoAdults => vec!["adults"],
            Self::MissingGuestDetails { fields }
            | Self::MissingPaymentDetails { fields }
            | Self::MissingContactFields { fields } => fields.clone(),
            Self::InvalidEmail | Self::InvalidNewsletterEmail => vec!["email"],
            Self::InvalidPhone => vec!["phone"],
            Self::InvalidCardNumber => vec!["card_number"],
            Self::InvalidExpiry => vec!["card_expiry"],
            Self::InvalidCvc => vec!["card_cvc"],
            Self::TermsNotAccepted => vec!["terms_accepted"],
            Self::EmptyReview => vec!["comment"],
            Self::InvalidRating { .. } => vec!["rating"],
            Self::EmptyChatMessage => vec!["text"],
            Self::DestinationRequired => vec!["destination"],
            Self::UnknownAmenity { .. } => vec!["amenities"],
            Self::InvalidFilterValue { field } => vec![*field],
        }
    }
}
