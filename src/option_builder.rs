// Builds the candidate accommodation options for a booking request
use crate::request::BookingRequest;
use crate::room::{Room, RoomCatalog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealPlan {
    NoMeals,
    Breakfast,
    HalfBoard,
}

impl MealPlan {
    // Richest plan first
    pub const BY_RICHNESS: [MealPlan; 3] =
        [MealPlan::HalfBoard, MealPlan::Breakfast, MealPlan::NoMeals];

    // Nightly surcharge per person
    pub fn surcharge(self) -> f64 {
        match self {
            MealPlan::NoMeals => 0.0,
            MealPlan::Breakfast => 280.0,
            MealPlan::HalfBoard => 1000.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MealPlan::NoMeals => "no_meals",
            MealPlan::Breakfast => "breakfast",
            MealPlan::HalfBoard => "half_board",
        }
    }
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccommodationOption {
    pub room_number: u32,
    pub check_in_date: NaiveDate,
    pub stay_days: u32,
    pub guests_count: u32,
    // Room price per person plus the meal surcharge
    pub total_price: f64,
    pub meal: MealPlan,
}

// Richest meal plan the budget still covers on top of the room price.
// A budget below the room price still gets the room, without meals.
pub fn select_meal_plan(budget_per_person: f64, room_price: f64) -> MealPlan {
    let headroom = budget_per_person - room_price;
    MealPlan::BY_RICHNESS
        .into_iter()
        .find(|meal| headroom >= meal.surcharge())
        .unwrap_or(MealPlan::NoMeals)
}

// Option for a single room, or None when the room cannot host the request
pub fn option_for_room(room: &Room, request: &BookingRequest) -> Option<AccommodationOption> {
    if room.capacity() < request.guests_count {
        return None;
    }

    if !room.is_available(request.check_in_date, request.stay_days) {
        return None;
    }

    let meal = select_meal_plan(request.budget_per_person, room.price_per_person());

    Some(AccommodationOption {
        room_number: room.number(),
        check_in_date: request.check_in_date,
        stay_days: request.stay_days,
        guests_count: request.guests_count,
        total_price: room.price_per_person() + meal.surcharge(),
        meal,
    })
}

// One option per admissible room, in catalog order
pub fn build_options(catalog: &RoomCatalog, request: &BookingRequest) -> Vec<AccommodationOption> {
    catalog
        .rooms()
        .filter_map(|room| option_for_room(room, request))
        .collect()
}
