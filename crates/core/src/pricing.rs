use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::HotelDetail;
use crate::stay::StayDates;

pub const TAX_RATE_PERCENT: u64 = 15;

/// An amount in US cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_dollars(dollars: u32) -> Self {
        Self(u64::from(dollars) * 100)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Percentage of this amount, rounded half up to the cent.
    pub fn percent(self, percent: u64) -> Self {
        Self((self.0 * percent + 50) / 100)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub nightly_rate: Money,
    pub nights: u32,
    pub subtotal: Money,
    pub taxes: Money,
    pub total: Money,
}

impl PriceQuote {
    pub fn compute(nightly_rate: Money, nights: u32) -> Self {
        let subtotal = Money::from_cents(nightly_rate.cents() * u64::from(nights));
        let taxes = subtotal.percent(TAX_RATE_PERCENT);
        Self {
            nightly_rate,
            nights,
            subtotal,
            taxes,
            total: subtotal + taxes,
        }
    }

    pub fn nights_label(&self) -> String {
        if self.nights == 1 {
            "1 night".to_string()
        } else {
            format!("{} nights", self.nights)
        }
    }
}

/// Whole nights between the two dates; one night while either is unset.
pub fn night_count(stay: &StayDates) -> u32 {
    match (stay.check_in(), stay.check_out()) {
        (Some(check_in), Some(check_out)) => {
            u32::try_from((check_out - check_in).num_days()).unwrap_or(0)
        }
        _ => 1,
    }
}

/// Nightly prices for one hotel, enough to quote any room selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    pub hotel_id: u32,
    pub base_rate: u32,
    pub room_rates: BTreeMap<u32, u32>,
}

impl RateCard {
    pub fn for_hotel(detail: &HotelDetail) -> Self {
        Self {
            hotel_id: detail.hotel.id,
            base_rate: detail.hotel.price,
            room_rates: detail
                .rooms
                .iter()
                .map(|room| (room.id, room.price))
                .collect(),
        }
    }

    pub fn offers(&self, room_id: u32) -> bool {
        self.room_rates.contains_key(&room_id)
    }

    pub fn nightly_rate(&self, room_id: Option<u32>) -> Money {
        let dollars = room_id
            .and_then(|id| self.room_rates.get(&id).copied())
            .unwrap_or(self.base_rate);
        Money::from_dollars(dollars)
    }

    pub fn quote(&self, room_id: Option<u32>, stay: &StayDates) -> PriceQuote {
        PriceQuote::compute(self.nightly_rate(room_id), night_count(stay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rate_card() -> RateCard {
        RateCard {
            hotel_id: 1,
            base_rate: 199,
            room_rates: BTreeMap::from([(1, 199), (2, 249), (3, 100)]),
        }
    }

    #[test]
    fn three_nights_at_one_hundred() {
        let today = date(2023, 12, 1);
        let mut stay = StayDates::default();
        stay.select_check_in(date(2024, 1, 1), today).unwrap();
        stay.select_check_out(date(2024, 1, 4), today).unwrap();

        let quote = rate_card().quote(Some(3), &stay);
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.subtotal, Money::from_dollars(300));
        assert_eq!(quote.taxes.to_string(), "$45.00");
        assert_eq!(quote.total.to_string(), "$345.00");
    }

    #[test]
    fn missing_dates_quote_a_single_night() {
        let quote = rate_card().quote(Some(2), &StayDates::default());
        assert_eq!(quote.nights, 1);
        assert_eq!(quote.subtotal, Money::from_dollars(249));
        assert_eq!(quote.nights_label(), "1 night");
    }

    #[test]
    fn unknown_or_missing_room_falls_back_to_hotel_rate() {
        let card = rate_card();
        assert_eq!(card.nightly_rate(None), Money::from_dollars(199));
        assert_eq!(card.nightly_rate(Some(42)), Money::from_dollars(199));
    }

    #[test]
    fn taxes_keep_cents() {
        let quote = PriceQuote::compute(Money::from_dollars(179), 3);
        assert_eq!(quote.taxes.to_string(), "$80.55");
        assert_eq!(quote.total.to_string(), "$617.55");
    }
}
