// Loader for the room inventory and booking request text files.
//
// Room lines:    <number> <room type> <capacity> <comfort level>
// Request lines: <booking date> <last> <first> <middle> <guests> <check-in date> <nights> <budget>
// Dates use DD.MM.YYYY. A malformed line is rejected on its own; the rest of the file still loads.
use crate::request::{BookingRequest, GuestName};
use crate::room::{ComfortLevel, ParseValueError, Room, RoomType};
use chrono::NaiveDate;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

pub const DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Line {line}: missing field {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line}: invalid date {value}")]
    InvalidDate { line: usize, value: String },

    #[error("Line {line}: invalid number for {field}: {value}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Line {line}: {source}")]
    InvalidValue {
        line: usize,
        #[source]
        source: ParseValueError,
    },

    #[error("Line {line}: {field} must be at least 1")]
    ZeroValue { line: usize, field: &'static str },

    #[error("Line {line}: stay of {nights} nights from {check_in} ends past the calendar")]
    StayOutOfRange {
        line: usize,
        check_in: NaiveDate,
        nights: u32,
    },

    #[error("Line {line}: budget must be a finite non-negative amount, got {value}")]
    InvalidBudget { line: usize, value: f64 },
}

// Records accepted from a file together with the lines that were rejected
#[derive(Debug, Default)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub rejected: Vec<LoadError>,
}

// Splits one line into named fields, reporting the first missing one
struct Fields<'a> {
    line: usize,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace(),
        }
    }

    fn next(&mut self, field: &'static str) -> Result<&'a str, LoadError> {
        self.tokens.next().ok_or(LoadError::MissingField {
            line: self.line,
            field,
        })
    }

    fn number<T: FromStr>(&mut self, field: &'static str) -> Result<T, LoadError> {
        let value = self.next(field)?;
        value.parse().map_err(|_| LoadError::InvalidNumber {
            line: self.line,
            field,
            value: value.to_string(),
        })
    }

    fn positive(&mut self, field: &'static str) -> Result<u32, LoadError> {
        let value: u32 = self.number(field)?;
        if value == 0 {
            return Err(LoadError::ZeroValue {
                line: self.line,
                field,
            });
        }
        Ok(value)
    }

    fn date(&mut self, field: &'static str) -> Result<NaiveDate, LoadError> {
        let value = self.next(field)?;
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| LoadError::InvalidDate {
            line: self.line,
            value: value.to_string(),
        })
    }

    fn value<T: FromStr<Err = ParseValueError>>(
        &mut self,
        field: &'static str,
    ) -> Result<T, LoadError> {
        let line = self.line;
        self.next(field)?
            .parse()
            .map_err(|source| LoadError::InvalidValue { line, source })
    }
}

pub fn parse_room(line: usize, text: &str) -> Result<Room, LoadError> {
    let mut fields = Fields::new(line, text);
    let number = fields.number("room number")?;
    let room_type: RoomType = fields.value("room type")?;
    let capacity = fields.positive("capacity")?;
    let comfort_level: ComfortLevel = fields.value("comfort level")?;
    Ok(Room::new(number, room_type, capacity, comfort_level))
}

pub fn parse_booking_request(line: usize, text: &str) -> Result<BookingRequest, LoadError> {
    let mut fields = Fields::new(line, text);
    let booking_date = fields.date("booking date")?;
    let last = fields.next("last name")?;
    let first = fields.next("first name")?;
    let middle = fields.next("middle name")?;
    let guests_count = fields.positive("guests")?;
    let check_in_date = fields.date("check-in date")?;
    let stay_days = fields.positive("nights")?;
    let budget_per_person: f64 = fields.number("budget")?;

    if !budget_per_person.is_finite() || budget_per_person < 0.0 {
        return Err(LoadError::InvalidBudget {
            line,
            value: budget_per_person,
        });
    }

    let request = BookingRequest {
        booking_date,
        guest: GuestName::new(last, first, middle),
        guests_count,
        check_in_date,
        stay_days,
        budget_per_person,
    };
    if request.check_out_date().is_none() {
        return Err(LoadError::StayOutOfRange {
            line,
            check_in: check_in_date,
            nights: stay_days,
        });
    }
    Ok(request)
}

fn parse_lines<T>(
    input: &str,
    parse: impl Fn(usize, &str) -> Result<T, LoadError>,
) -> Loaded<T> {
    let mut loaded = Loaded {
        records: Vec::new(),
        rejected: Vec::new(),
    };

    for (index, text) in input.lines().enumerate() {
        if text.trim().is_empty() {
            continue;
        }
        match parse(index + 1, text) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                warn!(error = %e, "Skipping malformed record");
                loaded.rejected.push(e);
            }
        }
    }

    loaded
}

pub fn parse_rooms(input: &str) -> Loaded<Room> {
    parse_lines(input, parse_room)
}

pub fn parse_booking_requests(input: &str) -> Loaded<BookingRequest> {
    parse_lines(input, parse_booking_request)
}

pub fn load_rooms(path: &Path) -> Result<Loaded<Room>, LoadError> {
    Ok(parse_rooms(&std::fs::read_to_string(path)?))
}

pub fn load_booking_requests(path: &Path) -> Result<Loaded<BookingRequest>, LoadError> {
    Ok(parse_booking_requests(&std::fs::read_to_string(path)?))
}

// Sample files shipped with the crate
pub const SAMPLE_ROOMS_PATH: &str = "samples/fund.txt";
pub const SAMPLE_REQUESTS_PATH: &str = "samples/booking.txt";
