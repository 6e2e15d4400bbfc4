use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static NEWSLETTER_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("newsletter pattern compiles"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{8,}$").expect("phone pattern compiles"));
static CARD_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{13,19}$").expect("card pattern compiles"));
static CARD_EXPIRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("expiry pattern compiles"));
static CARD_CVC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3,4}$").expect("cvc pattern compiles"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn is_valid_newsletter_email(value: &str) -> bool {
    NEWSLETTER_EMAIL.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Drops the spaces and dashes people type between digit groups.
pub fn normalize_card_number(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .collect()
}

pub fn is_valid_card_number(value: &str) -> bool {
    CARD_NUMBER.is_match(&normalize_card_number(value))
}

pub fn is_valid_card_expiry(value: &str) -> bool {
    CARD_EXPIRY.is_match(value)
}

pub fn is_valid_card_cvc(value: &str) -> bool {
    CARD_CVC.is_match(value)
}

/// Names of the fields whose value is empty, in form order.
pub fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect()
}
