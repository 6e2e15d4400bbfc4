pub mod catalog;
pub mod chat;
pub mod content;
pub mod error;
pub mod forms;
pub mod models;
pub mod navigation;
pub mod pricing;
pub mod session;
pub mod stay;
pub mod validation;
pub mod wizard;

pub use catalog::{apply_filters, reset_listing, results_notice, ListingFilter, SortKey};
pub use chat::{classify_message, scripted_reply, ChatEntry, ChatSender, ChatTranscript, ReplyTopic};
pub use error::ValidationError;
pub use forms::Notice;
pub use models::*;
pub use navigation::{resolve_route, ListingQuery, Route};
pub use pricing::{Money, PriceQuote, RateCard};
pub use session::{AuthGate, ClientSession};
pub use stay::StayDates;
pub use wizard::{
    BookingConfirmation, BookingDraft, BookingError, BookingStep, BookingWizard, GuestCounts,
    GuestDetails, PaymentDetails, PaymentMethod,
};
