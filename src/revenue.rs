// Revenue and occupancy statistics derived from the occupancy map
use crate::occupancy::OccupancyMap;
use crate::room::{RoomCatalog, RoomType};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeOccupancy {
    pub room_type: RoomType,
    pub occupancy_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    // Rooms occupied on at least one date of the map
    pub occupied_rooms: usize,
    pub empty_rooms: usize,
    pub occupancy_by_type: Vec<TypeOccupancy>,
    pub hotel_occupancy_percent: f64,
    // Value of the rooms occupied on this date
    pub total_revenue: f64,
    // Value of the rooms never occupied in the map
    pub missed_revenue: f64,
}

// Totals over the whole occupancy map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub missed_revenue: f64,
    pub occupied_rooms: usize,
    pub empty_rooms: usize,
}

// part / whole as a percentage rounded to two decimals, 0 when whole is 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let percent = part.min(whole) as f64 / whole as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

fn revenue_of(catalog: &RoomCatalog, rooms: &BTreeSet<u32>) -> f64 {
    catalog
        .rooms()
        .filter(|room| rooms.contains(&room.number()))
        .map(|room| room.price_per_person())
        .sum()
}

fn missed_revenue(catalog: &RoomCatalog, occupied: &BTreeSet<u32>) -> f64 {
    catalog
        .rooms()
        .filter(|room| !occupied.contains(&room.number()))
        .map(|room| room.price_per_person())
        .sum()
}

pub fn calculate_revenue(occupancy: &OccupancyMap, catalog: &RoomCatalog) -> RevenueSummary {
    let total_revenue = occupancy
        .iter()
        .map(|(_, rooms)| revenue_of(catalog, rooms))
        .sum();
    let occupied = occupied_in_catalog(occupancy, catalog);

    RevenueSummary {
        total_revenue,
        missed_revenue: missed_revenue(catalog, &occupied),
        occupied_rooms: occupied.len(),
        empty_rooms: catalog.len() - occupied.len(),
    }
}

// Ever-occupied rooms restricted to numbers the catalog knows
fn occupied_in_catalog(occupancy: &OccupancyMap, catalog: &RoomCatalog) -> BTreeSet<u32> {
    occupancy
        .occupied_rooms()
        .into_iter()
        .filter(|number| catalog.get(*number).is_ok())
        .collect()
}

pub fn type_occupancy(
    date: NaiveDate,
    occupancy: &OccupancyMap,
    catalog: &RoomCatalog,
) -> Vec<TypeOccupancy> {
    let on_date = occupancy.rooms_on(date);

    catalog
        .room_types()
        .into_iter()
        .map(|room_type| {
            let occupied = on_date.map_or(0, |rooms| {
                catalog
                    .rooms()
                    .filter(|room| room.room_type() == room_type && rooms.contains(&room.number()))
                    .count()
            });
            TypeOccupancy {
                room_type,
                occupancy_percent: percentage(occupied, catalog.count_of_type(room_type)),
            }
        })
        .collect()
}

pub fn daily_report(
    date: NaiveDate,
    occupancy: &OccupancyMap,
    catalog: &RoomCatalog,
) -> DailyReport {
    let occupied = occupied_in_catalog(occupancy, catalog);
    let total_revenue = occupancy
        .rooms_on(date)
        .map_or(0.0, |rooms| revenue_of(catalog, rooms));

    DailyReport {
        date,
        occupied_rooms: occupied.len(),
        empty_rooms: catalog.len() - occupied.len(),
        occupancy_by_type: type_occupancy(date, occupancy, catalog),
        hotel_occupancy_percent: percentage(occupied.len(), catalog.len()),
        total_revenue,
        missed_revenue: missed_revenue(catalog, &occupied),
    }
}
