use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ValidationError;
use crate::models::HotelDetail;
use crate::pricing::{PriceQuote, RateCard};
use crate::session::{AuthGate, LOGIN_PATH};
use crate::stay::StayDates;
use crate::validation::{
    is_valid_card_cvc, is_valid_card_expiry, is_valid_card_number, is_valid_email,
    is_valid_phone, missing_fields, normalize_card_number,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Idle,
    GuestDetails,
    Payment,
    Review,
    Confirmed,
}

impl BookingStep {
    pub fn previous(self) -> Option<Self> {
        match self {
            Self::GuestDetails => Some(Self::Idle),
            Self::Payment => Some(Self::GuestDetails),
            Self::Review => Some(Self::Payment),
            Self::Idle | Self::Confirmed => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::GuestDetails => "guest_details",
            Self::Payment => "payment",
            Self::Review => "review",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("sign in to continue with your booking")]
    AuthenticationRequired {
        login_path: &'static str,
        redirect: String,
    },
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("cannot {action} while the booking is at {step}")]
    InvalidTransition {
        step: BookingStep,
        action: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_requests: String,
}

impl GuestDetails {
    fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            special_requests: self.special_requests.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = missing_fields(&[
            ("first_name", self.first_name.trim()),
            ("last_name", self.last_name.trim()),
            ("email", self.email.trim()),
            ("phone", self.phone.trim()),
        ]);
        if !missing.is_empty() {
            return Err(ValidationError::MissingGuestDetails { fields: missing });
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_phone(&self.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "credit-card")]
    CreditCard,
    #[serde(rename = "pay-later")]
    PayLater,
}

/// Card number and CVC are accepted but never serialized back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub card_name: String,
    #[serde(default, skip_serializing)]
    pub card_number: String,
    #[serde(default)]
    pub card_expiry: String,
    #[serde(default, skip_serializing)]
    pub card_cvc: String,
    #[serde(default)]
    pub save_card: bool,
}

impl PaymentDetails {
    pub fn pay_later() -> Self {
        Self {
            method: PaymentMethod::PayLater,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.method == PaymentMethod::PayLater {
            return Ok(());
        }

        let missing = missing_fields(&[
            ("card_name", self.card_name.trim()),
            ("card_number", self.card_number.trim()),
            ("card_expiry", self.card_expiry.trim()),
            ("card_cvc", self.card_cvc.trim()),
        ]);
        if !missing.is_empty() {
            return Err(ValidationError::MissingPaymentDetails { fields: missing });
        }
        if !is_valid_card_number(&self.card_number) {
            return Err(ValidationError::InvalidCardNumber);
        }
        if !is_valid_card_expiry(self.card_expiry.trim()) {
            return Err(ValidationError::InvalidExpiry);
        }
        if !is_valid_card_cvc(self.card_cvc.trim()) {
            return Err(ValidationError::InvalidCvc);
        }
        Ok(())
    }

    pub fn card_last4(&self) -> Option<String> {
        if self.method != PaymentMethod::CreditCard {
            return None;
        }
        let digits = normalize_card_number(&self.card_number)
            .chars()
            .collect::<Vec<_>>();
        (digits.len() >= 4).then(|| digits[digits.len() - 4..].iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCounts {
    pub adults: u8,
    pub children: u8,
}

impl Default for GuestCounts {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingDraft {
    pub hotel_id: u32,
    pub room_id: Option<u32>,
    pub stay: StayDates,
    pub guests: GuestCounts,
    pub guest: GuestDetails,
    pub payment: PaymentDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub reference: String,
    pub hotel_id: u32,
    pub room_id: Option<u32>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u8,
    pub children: u8,
    pub guest_name: String,
    pub email: String,
    pub special_requests: Option<String>,
    pub payment_method: PaymentMethod,
    pub card_last4: Option<String>,
    pub quote: PriceQuote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWizard {
    step: BookingStep,
    draft: BookingDraft,
    rates: RateCard,
}

impl BookingWizard {
    pub fn new(detail: &HotelDetail) -> Self {
        Self {
            step: BookingStep::Idle,
            draft: BookingDraft {
                hotel_id: detail.hotel.id,
                room_id: detail.default_room_id(),
                stay: StayDates::default(),
                guests: GuestCounts::default(),
                guest: GuestDetails::default(),
                payment: PaymentDetails::default(),
            },
            rates: RateCard::for_hotel(detail),
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn quote(&self) -> PriceQuote {
        self.rates.quote(self.draft.room_id, &self.draft.stay)
    }

    pub fn hotel_path(&self) -> String {
        format!("/hotels/{}", self.draft.hotel_id)
    }

    pub fn select_dates(
        &mut self,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), BookingError> {
        self.ensure_open("change dates")?;
        self.draft.stay.select(check_in, check_out, today)?;
        Ok(())
    }

    pub fn select_room(&mut self, room_id: u32) -> Result<(), BookingError> {
        self.ensure_open("change room")?;
        if !self.rates.offers(room_id) {
            return Err(ValidationError::UnknownRoom { room_id }.into());
        }
        self.draft.room_id = Some(room_id);
        Ok(())
    }

    pub fn set_guests(&mut self, guests: GuestCounts) -> Result<(), BookingError> {
        self.ensure_open("change guests")?;
        if guests.adults == 0 {
            return Err(ValidationError::NoAdults.into());
        }
        self.draft.guests = guests;
        Ok(())
    }

    /// Leaves Idle. Without a signed-in session the hotel page is remembered for
    /// after login and the caller is pointed at the login page instead.
    pub fn start<G: AuthGate>(&mut self, gate: &mut G) -> Result<BookingStep, BookingError> {
        self.expect_step(BookingStep::Idle, "start booking")?;

        if !gate.is_authenticated() {
            let redirect = self.hotel_path();
            gate.remember_redirect(&redirect);
            return Err(BookingError::AuthenticationRequired {
                login_path: LOGIN_PATH,
                redirect,
            });
        }

        self.draft.stay.require_complete()?;
        self.step = BookingStep::GuestDetails;
        Ok(self.step)
    }

    pub fn submit_guest_details(
        &mut self,
        details: GuestDetails,
    ) -> Result<BookingStep, BookingError> {
        self.expect_step(BookingStep::GuestDetails, "submit guest details")?;
        details.validate()?;

        self.draft.guest = details.trimmed();
        self.step = BookingStep::Payment;
        Ok(self.step)
    }

    pub fn submit_payment(&mut self, details: PaymentDetails) -> Result<BookingStep, BookingError> {
        self.expect_step(BookingStep::Payment, "submit payment")?;
        details.validate()?;

        self.draft.payment = details;
        self.step = BookingStep::Review;
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<BookingStep, BookingError> {
        let previous = self
            .step
            .previous()
            .ok_or(BookingError::InvalidTransition {
                step: self.step,
                action: "go back",
            })?;
        self.step = previous;
        Ok(self.step)
    }

    pub fn confirm(
        &mut self,
        terms_accepted: bool,
        reference: String,
    ) -> Result<BookingConfirmation, BookingError> {
        self.expect_step(BookingStep::Review, "confirm")?;
        if !terms_accepted {
            return Err(ValidationError::TermsNotAccepted.into());
        }
        let (check_in, check_out) = self.draft.stay.require_complete()?;

        let guest = &self.draft.guest;
        let confirmation = BookingConfirmation {
            reference,
            hotel_id: self.draft.hotel_id,
            room_id: self.draft.room_id,
            check_in,
            check_out,
            adults: self.draft.guests.adults,
            children: self.draft.guests.children,
            guest_name: guest.full_name(),
            email: guest.email.clone(),
            special_requests: Some(guest.special_requests.clone()).filter(|text| !text.is_empty()),
            payment_method: self.draft.payment.method,
            card_last4: self.draft.payment.card_last4(),
            quote: self.quote(),
        };

        self.step = BookingStep::Confirmed;
        Ok(confirmation)
    }

    fn expect_step(&self, expected: BookingStep, action: &'static str) -> Result<(), BookingError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(BookingError::InvalidTransition {
                step: self.step,
                action,
            })
        }
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), BookingError> {
        if self.step == BookingStep::Confirmed {
            return Err(BookingError::InvalidTransition {
                step: self.step,
                action,
            });
        }
        Ok(())
    }
}
