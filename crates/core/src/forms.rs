use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::ValidationError;
use crate::validation::{is_valid_newsletter_email, missing_fields};

/// Title and message pair shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

fn default_guests() -> String {
    "2".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingSearch {
    #[serde(default)]
    pub destination: String,
    #[serde(default = "default_guests")]
    pub guests: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl LandingSearch {
    /// Listing path for this search, e.g. `/hotels?destination=Paris&guests=2`.
    pub fn listing_path(&self) -> Result<String, ValidationError> {
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(ValidationError::DestinationRequired);
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("destination", destination);
        query.append_pair("guests", self.guests.trim());
        if let Some(date) = self.date {
            query.append_pair("date", &date.format("%Y-%m-%d").to_string());
        }
        Ok(format!("/hotels?{}", query.finish()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSignup {
    #[serde(default)]
    pub email: String,
}

impl NewsletterSignup {
    pub fn submit(&self) -> Result<Notice, ValidationError> {
        if !is_valid_newsletter_email(self.email.trim()) {
            return Err(ValidationError::InvalidNewsletterEmail);
        }
        Ok(Notice::new(
            "Subscription successful!",
            "Thank you for subscribing to our newsletter.",
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = missing_fields(&[
            ("first_name", self.first_name.trim()),
            ("last_name", self.last_name.trim()),
            ("email", self.email.trim()),
            ("subject", self.subject.trim()),
            ("message", self.message.trim()),
        ]);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingContactFields { fields: missing })
        }
    }

    pub fn sent_notice() -> Notice {
        Notice::new(
            "Message sent successfully",
            "Thank you for contacting us. We'll get back to you soon!",
        )
    }
}

fn default_rating() -> u8 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

impl ReviewSubmission {
    /// Reviews are acknowledged but never added to the hotel.
    pub fn submit(&self) -> Result<Notice, ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::InvalidRating {
                rating: self.rating,
            });
        }
        if self.comment.trim().is_empty() {
            return Err(ValidationError::EmptyReview);
        }
        Ok(Notice::new(
            "Review submitted!",
            "Thank you for sharing your experience.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_needs_destination() {
        let search = LandingSearch {
            destination: "   ".to_string(),
            guests: default_guests(),
            date: None,
        };
        assert_eq!(search.listing_path(), Err(ValidationError::DestinationRequired));
    }

    #[test]
    fn search_path_encodes_destination_and_date() {
        let search = LandingSearch {
            destination: "New York".to_string(),
            guests: "3".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
        };
        assert_eq!(
            search.listing_path().unwrap(),
            "/hotels?destination=New+York&guests=3&date=2024-05-01"
        );
    }

    #[test]
    fn search_defaults_to_two_guests() {
        let search: LandingSearch = serde_json::from_str(r#"{"destination":"Queens"}"#).unwrap();
        assert_eq!(search.listing_path().unwrap(), "/hotels?destination=Queens&guests=2");
    }

    #[test]
    fn newsletter_uses_loose_email_check() {
        let ok = NewsletterSignup {
            email: "a@b.co".to_string(),
        };
        assert!(ok.submit().is_ok());
        let bad = NewsletterSignup {
            email: "a@b".to_string(),
        };
        assert_eq!(bad.submit(), Err(ValidationError::InvalidNewsletterEmail));
    }

    #[test]
    fn contact_form_names_every_missing_field() {
        let message = ContactMessage {
            first_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..ContactMessage::default()
        };
        assert_eq!(
            message.validate(),
            Err(ValidationError::MissingContactFields {
                fields: vec!["last_name", "subject", "message"],
            })
        );
    }

    #[test]
    fn review_needs_comment_and_sane_rating() {
        let empty = ReviewSubmission {
            rating: 4,
            comment: " ".to_string(),
        };
        assert_eq!(empty.submit(), Err(ValidationError::EmptyReview));

        let zero = ReviewSubmission {
            rating: 0,
            comment: "Lovely".to_string(),
        };
        assert_eq!(zero.submit(), Err(ValidationError::InvalidRating { rating: 0 }));
    }
}
