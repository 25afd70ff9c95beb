// Date-indexed record of occupied rooms, only ever grows during a run
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OccupancyMap {
    dates: BTreeMap<NaiveDate, BTreeSet<u32>>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    // Marks the room for every night in [check_in, check_in + days).
    // Nights that would fall on or after NaiveDate::MAX are not recorded.
    pub fn mark_stay(&mut self, room_number: u32, check_in: NaiveDate, days: u32) {
        for date in check_in.iter_days().take(days as usize) {
            self.dates.entry(date).or_default().insert(room_number);
        }
    }

    pub fn rooms_on(&self, date: NaiveDate) -> Option<&BTreeSet<u32>> {
        self.dates.get(&date)
    }

    pub fn is_occupied(&self, date: NaiveDate, room_number: u32) -> bool {
        self.dates
            .get(&date)
            .map_or(false, |rooms| rooms.contains(&room_number))
    }

    // Every room occupied on at least one date
    pub fn occupied_rooms(&self) -> BTreeSet<u32> {
        self.dates.values().flatten().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &BTreeSet<u32>)> {
        self.dates.iter()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
