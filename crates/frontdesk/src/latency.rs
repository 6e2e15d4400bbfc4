use std::time::Duration;

use chrono::{Local, NaiveDate};

/// Artificial waits that stand in for network round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub hotel_load: Duration,
    pub chat_reply: Duration,
    pub contact_submit: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            hotel_load: Duration::from_millis(800),
            chat_reply: Duration::from_millis(1000),
            contact_submit: Duration::from_millis(1500),
        }
    }
}

impl SimulatedLatency {
    pub fn instant() -> Self {
        Self {
            hotel_load: Duration::ZERO,
            chat_reply: Duration::ZERO,
            contact_submit: Duration::ZERO,
        }
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Source of "today" for date selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(self) -> NaiveDate {
        match self {
            Self::System => Local::now().date_naive(),
            Self::Fixed(date) => date,
        }
    }
}
