// Daily booking cycle: feeds each day's requests to the allocator and reports
use crate::allocator::{AcceptanceSource, Allocator, DEFAULT_DECLINE_THRESHOLD};
use crate::occupancy::OccupancyMap;
use crate::outcome::{OutcomeSink, OutcomeTally};
use crate::request::BookingRequest;
use crate::revenue::{calculate_revenue, daily_report, DailyReport, RevenueSummary};
use crate::room::{CatalogError, RoomCatalog};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Cycle length must be at least one day")]
    EmptyCycle,

    #[error("Decline threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// How a request's booking date is matched against the simulated day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestMatching {
    // Only the day of month is compared, month and year are ignored
    DayOfMonth,
    ExactDate,
}

impl RequestMatching {
    pub fn matches(self, booking_date: NaiveDate, simulated: NaiveDate) -> bool {
        match self {
            RequestMatching::DayOfMonth => booking_date.day() == simulated.day(),
            RequestMatching::ExactDate => booking_date == simulated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start_date: NaiveDate,
    pub cycle_days: u32,
    pub decline_threshold: f64,
    // None seeds the acceptance source from entropy
    pub seed: Option<u64>,
    pub request_matching: RequestMatching,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2020, 3, 1).expect("2020-03-01 is a valid date"),
            cycle_days: 30,
            decline_threshold: DEFAULT_DECLINE_THRESHOLD,
            seed: None,
            request_matching: RequestMatching::DayOfMonth,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_days == 0 {
            return Err(ConfigError::EmptyCycle);
        }
        if !(0.0..=1.0).contains(&self.decline_threshold) {
            return Err(ConfigError::InvalidThreshold(self.decline_threshold));
        }
        Ok(())
    }

    pub fn simulated_dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start_date.iter_days().take(self.cycle_days as usize)
    }
}

// Requests filed on the simulated day, in input order
pub fn requests_for_day(
    requests: &[BookingRequest],
    day: NaiveDate,
    matching: RequestMatching,
) -> Vec<&BookingRequest> {
    requests
        .iter()
        .filter(|request| matching.matches(request.booking_date, day))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    pub occupancy: OccupancyMap,
    pub reports: Vec<DailyReport>,
    pub tally: OutcomeTally,
    pub summary: RevenueSummary,
}

pub struct DailySimulation<A, S> {
    config: SimulationConfig,
    allocator: Allocator<A>,
    sink: S,
}

impl<A: AcceptanceSource, S: OutcomeSink> DailySimulation<A, S> {
    pub fn new(config: SimulationConfig, acceptance: A, sink: S) -> Result<Self, SimulationError> {
        config.validate()?;
        let allocator =
            Allocator::new(acceptance).with_decline_threshold(config.decline_threshold);
        Ok(Self {
            config,
            allocator,
            sink,
        })
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn run(
        &mut self,
        catalog: &mut RoomCatalog,
        requests: &[BookingRequest],
    ) -> Result<SimulationRun, SimulationError> {
        let mut occupancy = OccupancyMap::new();
        let mut tally = OutcomeTally::default();
        let mut reports = Vec::with_capacity(self.config.cycle_days as usize);

        let dates: Vec<NaiveDate> = self.config.simulated_dates().collect();
        for day in dates {
            let todays = requests_for_day(requests, day, self.config.request_matching);
            info!(day = %day, requests = todays.len(), "Processing booking day");

            for request in todays {
                let outcome = self.allocator.allocate(catalog, &mut occupancy, request)?;
                tally.record(&outcome);
                self.sink.record(&outcome);
            }

            reports.push(daily_report(day, &occupancy, catalog));
        }

        let summary = calculate_revenue(&occupancy, catalog);
        info!(
            booked = tally.booked,
            declined = tally.declined,
            unavailable = tally.unavailable,
            revenue = summary.total_revenue,
            "Simulation finished"
        );

        Ok(SimulationRun {
            occupancy,
            reports,
            tally,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::{FixedAcceptance, SeededAcceptance};
    use crate::outcome::BookingOutcome;
    use crate::request::GuestName;
    use crate::room::{ComfortLevel, Room, RoomType};
    use test_case::test_case;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, day).unwrap()
    }

    fn request(
        booked_on: NaiveDate,
        guests_count: u32,
        check_in: NaiveDate,
        stay_days: u32,
    ) -> BookingRequest {
        BookingRequest {
            booking_date: booked_on,
            guest: GuestName::new("Sidorov", "Oleg", "Ivanovich"),
            guests_count,
            check_in_date: check_in,
            stay_days,
            budget_per_person: 3000.0,
        }
    }

    fn single_room_catalog() -> RoomCatalog {
        RoomCatalog::new(vec![Room::new(1, RoomType::Single, 2, ComfortLevel::Standard)]).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        let dates: Vec<NaiveDate> = config.simulated_dates().collect();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], date(3, 1));
        assert_eq!(dates[29], date(3, 30));
        assert_eq!(config.decline_threshold, 0.25);
    }

    #[test]
    fn test_config_from_json() {
        let config = SimulationConfig::from_json(
            r#"{"start_date": "2021-07-15", "seed": 7, "request_matching": "exact_date"}"#,
        )
        .unwrap();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2021, 7, 15).unwrap());
        assert_eq!(config.cycle_days, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.request_matching, RequestMatching::ExactDate);
    }

    #[test_case(r#"{"cycle_days": 0}"#; "empty cycle")]
    #[test_case(r#"{"decline_threshold": 1.5}"#; "threshold above one")]
    #[test_case(r#"{"start_date": "01.03.2020"}"#; "bad date format")]
    fn test_invalid_config(json: &str) {
        assert!(SimulationConfig::from_json(json).is_err());
    }

    #[test_case(RequestMatching::DayOfMonth, date(4, 5), true; "day of month ignores the month")]
    #[test_case(RequestMatching::DayOfMonth, date(3, 6), false; "different day")]
    #[test_case(RequestMatching::ExactDate, date(4, 5), false; "exact date needs the month")]
    #[test_case(RequestMatching::ExactDate, date(3, 5), true; "exact date match")]
    fn test_request_matching(matching: RequestMatching, booked_on: NaiveDate, expected: bool) {
        assert_eq!(matching.matches(booked_on, date(3, 5)), expected);
    }

    #[test]
    fn test_accepted_booking_scenario() {
        let mut catalog = single_room_catalog();
        let requests = vec![request(date(3, 1), 2, date(3, 1), 3)];
        let mut simulation = DailySimulation::new(
            SimulationConfig::default(),
            FixedAcceptance::constant(0.9),
            Vec::<BookingOutcome>::new(),
        )
        .unwrap();

        let run = simulation.run(&mut catalog, &requests).unwrap();

        for day in 1..=3 {
            assert!(run.occupancy.is_occupied(date(3, day), 1));
        }
        assert!(!run.occupancy.is_occupied(date(3, 4), 1));
        assert_eq!(run.reports.len(), 30);
        assert_eq!(run.reports[0].total_revenue, 2900.0);
        assert_eq!(run.reports[0].hotel_occupancy_percent, 100.0);
        assert_eq!(run.reports[3].total_revenue, 0.0);
        assert_eq!(run.tally.booked, 1);
        assert_eq!(run.summary.total_revenue, 3.0 * 2900.0);

        let outcomes = simulation.into_sink();
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].is_booked());
    }

    #[test]
    fn test_declined_booking_scenario() {
        let mut catalog = single_room_catalog();
        let requests = vec![request(date(3, 1), 2, date(3, 1), 3)];
        let mut simulation = DailySimulation::new(
            SimulationConfig::default(),
            FixedAcceptance::constant(0.1),
            Vec::<BookingOutcome>::new(),
        )
        .unwrap();

        let run = simulation.run(&mut catalog, &requests).unwrap();

        assert!(run.occupancy.is_empty());
        assert!(catalog.get(1).unwrap().bookings().is_empty());
        assert_eq!(run.tally.declined, 1);
        assert_eq!(run.reports[0].missed_revenue, 2900.0);
        assert!(matches!(
            simulation.into_sink()[0],
            BookingOutcome::Declined { .. }
        ));
    }

    #[test]
    fn test_later_day_sees_earlier_bookings() {
        let mut catalog = single_room_catalog();
        let requests = vec![
            // Filed on day 2, asks for dates taken on day 1
            request(date(3, 2), 1, date(3, 11), 2),
            request(date(3, 1), 1, date(3, 10), 3),
        ];
        let mut simulation = DailySimulation::new(
            SimulationConfig::default(),
            FixedAcceptance::constant(0.9),
            OutcomeTally::default(),
        )
        .unwrap();

        let run = simulation.run(&mut catalog, &requests).unwrap();
        assert_eq!(run.tally.booked, 1);
        assert_eq!(run.tally.unavailable, 1);
        assert_eq!(simulation.into_sink(), run.tally);
    }

    #[test]
    fn test_requests_outside_cycle_are_ignored_with_exact_matching() {
        let mut catalog = single_room_catalog();
        let requests = vec![request(date(4, 1), 1, date(4, 2), 1)];
        let config = SimulationConfig {
            request_matching: RequestMatching::ExactDate,
            ..SimulationConfig::default()
        };
        let mut simulation = DailySimulation::new(
            config,
            FixedAcceptance::constant(0.9),
            Vec::<BookingOutcome>::new(),
        )
        .unwrap();

        let run = simulation.run(&mut catalog, &requests).unwrap();
        assert_eq!(run.tally.total(), 0);
    }

    #[test]
    fn test_day_of_month_matching_aliases_other_months() {
        let mut catalog = single_room_catalog();
        let requests = vec![request(date(4, 1), 1, date(4, 2), 1)];
        let mut simulation = DailySimulation::new(
            SimulationConfig::default(),
            FixedAcceptance::constant(0.9),
            Vec::<BookingOutcome>::new(),
        )
        .unwrap();

        let run = simulation.run(&mut catalog, &requests).unwrap();
        assert_eq!(run.tally.booked, 1);
        assert!(run.occupancy.is_occupied(date(4, 2), 1));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let rooms = || {
            RoomCatalog::new(
                (1..=6)
                    .map(|n| {
                        let room_type = RoomType::ALL[(n % 4) as usize];
                        Room::new(n, room_type, 1 + n % 3, ComfortLevel::Standard)
                    })
                    .collect(),
            )
            .unwrap()
        };
        let requests: Vec<BookingRequest> = (1..=30)
            .map(|day| request(date(3, day), 1 + day % 2, date(3, day), 1 + day % 4))
            .collect();

        let run_with_seed = |seed: u64| {
            let mut catalog = rooms();
            DailySimulation::new(
                SimulationConfig::default(),
                SeededAcceptance::from_seed(seed),
                Vec::<BookingOutcome>::new(),
            )
            .unwrap()
            .run(&mut catalog, &requests)
            .unwrap()
        };

        assert_eq!(run_with_seed(11), run_with_seed(11));
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let config = SimulationConfig {
            decline_threshold: -0.1,
            ..SimulationConfig::default()
        };
        let result = DailySimulation::new(
            config,
            FixedAcceptance::constant(0.9),
            Vec::<BookingOutcome>::new(),
        );
        assert!(matches!(
            result,
            Err(SimulationError::Config(ConfigError::InvalidThreshold(_)))
        ));
    }
}
