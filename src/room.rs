// Room inventory: room records, derived pricing and the availability check
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate room number: {0}")]
    DuplicateRoom(u32),

    #[error("Unknown room number: {0}")]
    UnknownRoom(u32),
}

// Returned when a textual token does not name a known variant
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown {kind}: {value}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    JuniorSuite,
    Luxury,
}

impl RoomType {
    pub const ALL: [RoomType; 4] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::JuniorSuite,
        RoomType::Luxury,
    ];

    // Nightly price per person before the comfort factor
    pub fn base_price(self) -> u32 {
        match self {
            RoomType::Single => 2900,
            RoomType::Double => 2300,
            RoomType::JuniorSuite => 3200,
            RoomType::Luxury => 4100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::JuniorSuite => "junior_suite",
            RoomType::Luxury => "luxury",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ParseValueError;

    // Accepts the English names and the tokens used by the legacy room files
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "одноместный" => Ok(RoomType::Single),
            "double" | "двухместный" => Ok(RoomType::Double),
            "junior_suite" | "junior-suite" | "полулюкс" => Ok(RoomType::JuniorSuite),
            "luxury" | "люкс" => Ok(RoomType::Luxury),
            _ => Err(ParseValueError::new("room type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortLevel {
    Standard,
    StandardPlus,
    Apartment,
}

impl ComfortLevel {
    // Comfort factor expressed in percent so prices stay exact
    pub fn factor_percent(self) -> u32 {
        match self {
            ComfortLevel::Standard => 100,
            ComfortLevel::StandardPlus => 120,
            ComfortLevel::Apartment => 150,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ComfortLevel::Standard => "standard",
            ComfortLevel::StandardPlus => "standard_plus",
            ComfortLevel::Apartment => "apartment",
        }
    }
}

impl fmt::Display for ComfortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComfortLevel {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "стандарт" => Ok(ComfortLevel::Standard),
            "standard_plus" | "standard-plus" | "стандарт_улучшенный" => {
                Ok(ComfortLevel::StandardPlus)
            }
            "apartment" | "апартамент" => Ok(ComfortLevel::Apartment),
            _ => Err(ParseValueError::new("comfort level", s)),
        }
    }
}

pub fn calculate_price(room_type: RoomType, comfort_level: ComfortLevel) -> f64 {
    f64::from(room_type.base_price() * comfort_level.factor_percent()) / 100.0
}

// A committed stay: check-in date and number of nights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stay {
    pub check_in: NaiveDate,
    pub days: u32,
}

impl Stay {
    pub fn new(check_in: NaiveDate, days: u32) -> Self {
        Self { check_in, days }
    }

    // A stay running past the last representable date lasts until NaiveDate::MAX
    pub fn check_out(&self) -> NaiveDate {
        self.check_in
            .checked_add_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MAX)
    }

    // Both spans are closed intervals; a checkout on another stay's check-in day collides
    pub fn overlaps(&self, other: &Stay) -> bool {
        let starts_inside_other =
            other.check_in <= self.check_in && self.check_in <= other.check_out();
        let other_starts_inside =
            self.check_in <= other.check_in && other.check_in <= self.check_out();
        starts_inside_other || other_starts_inside
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    number: u32,
    room_type: RoomType,
    capacity: u32,
    comfort_level: ComfortLevel,
    price_per_person: f64,
    bookings: Vec<Stay>,
}

impl Room {
    pub fn new(
        number: u32,
        room_type: RoomType,
        capacity: u32,
        comfort_level: ComfortLevel,
    ) -> Self {
        Self {
            number,
            room_type,
            capacity,
            comfort_level,
            price_per_person: calculate_price(room_type, comfort_level),
            bookings: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn comfort_level(&self) -> ComfortLevel {
        self.comfort_level
    }

    pub fn price_per_person(&self) -> f64 {
        self.price_per_person
    }

    pub fn bookings(&self) -> &[Stay] {
        &self.bookings
    }

    pub fn is_available(&self, date: NaiveDate, days: u32) -> bool {
        let requested = Stay::new(date, days);
        !self.bookings.iter().any(|stay| stay.overlaps(&requested))
    }

    // Callers are expected to have checked availability first
    pub fn book(&mut self, date: NaiveDate, days: u32) {
        self.bookings.push(Stay::new(date, days));
    }
}

// Store of rooms indexed by room number, kept in input order
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
    index: HashMap<u32, usize>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(rooms.len());
        for (position, room) in rooms.iter().enumerate() {
            if index.insert(room.number(), position).is_some() {
                return Err(CatalogError::DuplicateRoom(room.number()));
            }
        }
        Ok(Self { rooms, index })
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn get(&self, number: u32) -> Result<&Room, CatalogError> {
        self.index
            .get(&number)
            .map(|&position| &self.rooms[position])
            .ok_or(CatalogError::UnknownRoom(number))
    }

    fn get_mut(&mut self, number: u32) -> Result<&mut Room, CatalogError> {
        let position = *self
            .index
            .get(&number)
            .ok_or(CatalogError::UnknownRoom(number))?;
        Ok(&mut self.rooms[position])
    }

    pub fn is_available(
        &self,
        number: u32,
        date: NaiveDate,
        days: u32,
    ) -> Result<bool, CatalogError> {
        Ok(self.get(number)?.is_available(date, days))
    }

    pub fn book(&mut self, number: u32, date: NaiveDate, days: u32) -> Result<(), CatalogError> {
        self.get_mut(number)?.book(date, days);
        Ok(())
    }

    // Room types that have at least one room, in a stable order
    pub fn room_types(&self) -> BTreeSet<RoomType> {
        self.rooms.iter().map(Room::room_type).collect()
    }

    pub fn count_of_type(&self, room_type: RoomType) -> usize {
        self.rooms
            .iter()
            .filter(|room| room.room_type() == room_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    #[test_case(RoomType::Single, ComfortLevel::Standard, 2900.0; "single standard")]
    #[test_case(RoomType::Double, ComfortLevel::StandardPlus, 2760.0; "double standard plus")]
    #[test_case(RoomType::JuniorSuite, ComfortLevel::Apartment, 4800.0; "junior suite apartment")]
    #[test_case(RoomType::Luxury, ComfortLevel::StandardPlus, 4920.0; "luxury standard plus")]
    #[test_case(RoomType::Luxury, ComfortLevel::Apartment, 6150.0; "luxury apartment")]
    fn test_price_per_person(room_type: RoomType, comfort: ComfortLevel, expected: f64) {
        let room = Room::new(1, room_type, 2, comfort);
        assert_eq!(room.price_per_person(), expected);
        assert_eq!(calculate_price(room_type, comfort), expected);
    }

    #[test]
    fn test_price_unchanged_by_bookings() {
        let mut room = Room::new(7, RoomType::Double, 2, ComfortLevel::Apartment);
        let before = room.price_per_person();
        room.book(date(2), 4);
        room.book(date(10), 1);
        assert_eq!(room.price_per_person(), before);
    }

    #[test]
    fn test_booked_window_is_unavailable() {
        let mut room = Room::new(1, RoomType::Single, 1, ComfortLevel::Standard);
        assert!(room.is_available(date(5), 3));

        room.book(date(5), 3);
        assert!(!room.is_available(date(5), 3));

        // Every sub-window of the booked span collides
        for start in 5..=8 {
            for days in 0..=(8 - start) {
                assert!(
                    !room.is_available(date(start), days),
                    "window {}+{} should be unavailable",
                    start,
                    days
                );
            }
        }
    }

    #[test_case(1, 3, true; "ends before the stay")]
    #[test_case(1, 4, false; "checkout on check-in day")]
    #[test_case(8, 2, false; "check-in on checkout day")]
    #[test_case(9, 5, true; "starts after the stay")]
    #[test_case(3, 10, false; "covers the stay")]
    #[test_case(6, 1, false; "inside the stay")]
    #[test_case(4, 2, false; "starts before and ends inside")]
    #[test_case(7, 5, false; "starts inside and ends after")]
    fn test_overlap_boundaries(start: u32, days: u32, available: bool) {
        let mut room = Room::new(1, RoomType::Single, 1, ComfortLevel::Standard);
        room.book(date(5), 3); // occupies 5..=8
        assert_eq!(room.is_available(date(start), days), available);
    }

    #[test]
    fn test_stay_past_the_calendar_end() {
        let mut room = Room::new(1, RoomType::Single, 1, ComfortLevel::Standard);
        room.book(date(10), 1);

        assert_eq!(Stay::new(date(5), u32::MAX).check_out(), NaiveDate::MAX);
        assert!(!room.is_available(date(5), u32::MAX));
        assert!(room.is_available(date(12), 1));

        room.book(date(20), u32::MAX);
        assert!(!room.is_available(date(25), 1));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let rooms = vec![
            Room::new(101, RoomType::Single, 1, ComfortLevel::Standard),
            Room::new(101, RoomType::Double, 2, ComfortLevel::Standard),
        ];
        assert_eq!(
            RoomCatalog::new(rooms).unwrap_err(),
            CatalogError::DuplicateRoom(101)
        );
    }

    #[test]
    fn test_catalog_booking_by_number() {
        let mut catalog = RoomCatalog::new(vec![
            Room::new(101, RoomType::Single, 1, ComfortLevel::Standard),
            Room::new(102, RoomType::Luxury, 4, ComfortLevel::Apartment),
        ])
        .unwrap();

        catalog.book(102, date(1), 2).unwrap();
        assert_eq!(catalog.is_available(102, date(2), 1), Ok(false));
        assert_eq!(catalog.is_available(101, date(2), 1), Ok(true));
        assert_eq!(catalog.get(102).unwrap().bookings().len(), 1);
        assert_eq!(
            catalog.book(999, date(1), 1),
            Err(CatalogError::UnknownRoom(999))
        );
    }

    #[test]
    fn test_catalog_type_counts() {
        let catalog = RoomCatalog::new(vec![
            Room::new(1, RoomType::Single, 1, ComfortLevel::Standard),
            Room::new(2, RoomType::Single, 1, ComfortLevel::Apartment),
            Room::new(3, RoomType::Luxury, 2, ComfortLevel::Standard),
        ])
        .unwrap();

        assert_eq!(catalog.count_of_type(RoomType::Single), 2);
        assert_eq!(catalog.count_of_type(RoomType::Double), 0);
        assert_eq!(
            catalog.room_types().into_iter().collect::<Vec<_>>(),
            vec![RoomType::Single, RoomType::Luxury]
        );
    }

    #[test_case("single", RoomType::Single)]
    #[test_case("JUNIOR-SUITE", RoomType::JuniorSuite)]
    #[test_case("люкс", RoomType::Luxury)]
    #[test_case("двухместный", RoomType::Double)]
    fn test_room_type_tokens(token: &str, expected: RoomType) {
        assert_eq!(token.parse::<RoomType>(), Ok(expected));
    }

    #[test]
    fn test_unknown_comfort_token() {
        let err = "penthouse".parse::<ComfortLevel>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown comfort level: penthouse");
    }
}
