use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationError;

/// Check-in/check-out pair. Once both are set, check-out is strictly after check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StayDates {
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
}

impl StayDates {
    pub fn check_in(&self) -> Option<NaiveDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out
    }

    /// Sets check-in; a missing or too-early check-out moves to the following day.
    pub fn select_check_in(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        if date < today {
            return Err(ValidationError::DateInPast { field: "check_in" });
        }
        let next_day = date
            .succ_opt()
            .ok_or(ValidationError::CheckOutNotAfterCheckIn)?;

        self.check_in = Some(date);
        if self.check_out.map_or(true, |check_out| check_out <= date) {
            self.check_out = Some(next_day);
        }
        Ok(())
    }

    pub fn select_check_out(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        let Some(check_in) = self.check_in else {
            return Err(ValidationError::CheckInRequired);
        };
        if date < today {
            return Err(ValidationError::DateInPast { field: "check_out" });
        }
        if date <= check_in {
            return Err(ValidationError::CheckOutNotAfterCheckIn);
        }

        self.check_out = Some(date);
        Ok(())
    }

    /// Applies check-in then check-out; nothing changes unless both succeed.
    pub fn select(
        &mut self,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<(), ValidationError> {
        let mut next = *self;
        if let Some(date) = check_in {
            next.select_check_in(date, today)?;
        }
        if let Some(date) = check_out {
            next.select_check_out(date, today)?;
        }
        *self = next;
        Ok(())
    }

    pub fn require_complete(&self) -> Result<(NaiveDate, NaiveDate), ValidationError> {
        match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) if check_out > check_in => Ok((check_in, check_out)),
            (Some(_), Some(_)) => Err(ValidationError::CheckOutNotAfterCheckIn),
            _ => Err(ValidationError::DatesRequired),
        }
    }
}
