// Structured per-request outcome events and the sinks that receive them
use crate::option_builder::MealPlan;
use crate::request::GuestName;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    Booked {
        guest: GuestName,
        room_number: u32,
        check_in_date: NaiveDate,
        stay_days: u32,
        guests_count: u32,
        meal: MealPlan,
        total_price: f64,
    },
    // The cheapest option was offered and the guest turned it down
    Declined {
        guest: GuestName,
        room_number: u32,
        total_price: f64,
    },
    // No room matched the party size and dates
    Unavailable {
        guest: GuestName,
        guests_count: u32,
        check_in_date: NaiveDate,
    },
}

impl BookingOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, BookingOutcome::Booked { .. })
    }

    pub fn guest(&self) -> &GuestName {
        match self {
            BookingOutcome::Booked { guest, .. }
            | BookingOutcome::Declined { guest, .. }
            | BookingOutcome::Unavailable { guest, .. } => guest,
        }
    }
}

pub trait OutcomeSink {
    fn record(&mut self, outcome: &BookingOutcome);
}

impl<S: OutcomeSink + ?Sized> OutcomeSink for &mut S {
    fn record(&mut self, outcome: &BookingOutcome) {
        (**self).record(outcome);
    }
}

// Keeps every outcome, mostly useful in tests and for JSON dumps
impl OutcomeSink for Vec<BookingOutcome> {
    fn record(&mut self, outcome: &BookingOutcome) {
        self.push(outcome.clone());
    }
}

// Writes outcomes to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OutcomeSink for TracingSink {
    fn record(&mut self, outcome: &BookingOutcome) {
        match outcome {
            BookingOutcome::Booked {
                guest,
                room_number,
                check_in_date,
                stay_days,
                guests_count,
                meal,
                total_price,
            } => info!(
                guest = %guest,
                room = room_number,
                check_in = %check_in_date.format("%d.%m.%Y"),
                nights = stay_days,
                guests = guests_count,
                meal = %meal,
                price = total_price,
                "Room booked"
            ),
            BookingOutcome::Declined {
                guest,
                room_number,
                total_price,
            } => info!(
                guest = %guest,
                room = room_number,
                price = total_price,
                "Guest declined the offer"
            ),
            BookingOutcome::Unavailable {
                guest,
                guests_count,
                check_in_date,
            } => warn!(
                guest = %guest,
                guests = guests_count,
                check_in = %check_in_date.format("%d.%m.%Y"),
                "No room available"
            ),
        }
    }
}

// Running counts per outcome kind
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    pub booked: usize,
    pub declined: usize,
    pub unavailable: usize,
}

impl OutcomeTally {
    pub fn total(&self) -> usize {
        self.booked + self.declined + self.unavailable
    }
}

impl OutcomeSink for OutcomeTally {
    fn record(&mut self, outcome: &BookingOutcome) {
        match outcome {
            BookingOutcome::Booked { .. } => self.booked += 1,
            BookingOutcome::Declined { .. } => self.declined += 1,
            BookingOutcome::Unavailable { .. } => self.unavailable += 1,
        }
    }
}
