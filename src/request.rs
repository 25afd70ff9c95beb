// Booking requests as received from the front desk
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestName {
    pub last: String,
    pub first: String,
    pub middle: String,
}

impl GuestName {
    pub fn new(last: &str, first: &str, middle: &str) -> Self {
        Self {
            last: last.to_string(),
            first: first.to_string(),
            middle: middle.to_string(),
        }
    }
}

impl fmt::Display for GuestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.last, self.first)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    // Day the request was filed, drives which simulated day handles it
    pub booking_date: NaiveDate,
    pub guest: GuestName,
    pub guests_count: u32,
    pub check_in_date: NaiveDate,
    pub stay_days: u32,
    // Nightly allowance per person, covering the room and the meal plan
    pub budget_per_person: f64,
}

impl BookingRequest {
    // None when the stay runs past the last representable date
    pub fn check_out_date(&self) -> Option<NaiveDate> {
        self.check_in_date
            .checked_add_days(Days::new(u64::from(self.stay_days)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_out_date() {
        let request = BookingRequest {
            booking_date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            guest: GuestName::new("Ivanov", "Petr", "Sergeevich"),
            guests_count: 2,
            check_in_date: NaiveDate::from_ymd_opt(2020, 3, 30).unwrap(),
            stay_days: 3,
            budget_per_person: 5000.0,
        };

        assert_eq!(
            request.check_out_date(),
            NaiveDate::from_ymd_opt(2020, 4, 2)
        );
        assert_eq!(request.guest.to_string(), "Ivanov Petr");
    }

    #[test]
    fn test_check_out_past_the_calendar_end() {
        let request = BookingRequest {
            booking_date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            guest: GuestName::new("Volkov", "Ilya", "Markovich"),
            guests_count: 1,
            check_in_date: NaiveDate::from_ymd_opt(2020, 3, 5).unwrap(),
            stay_days: u32::MAX,
            budget_per_person: 3000.0,
        };
        assert_eq!(request.check_out_date(), None);
    }
}
