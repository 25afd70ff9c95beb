// Allocation of a single booking request: rank, offer, commit
use crate::occupancy::OccupancyMap;
use crate::option_builder::{build_options, AccommodationOption};
use crate::outcome::BookingOutcome;
use crate::request::BookingRequest;
use crate::room::{CatalogError, RoomCatalog};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

// Draws at or below this value are guest declines
pub const DEFAULT_DECLINE_THRESHOLD: f64 = 0.25;

// Source of the uniform [0, 1) draw that decides whether a guest accepts an offer
pub trait AcceptanceSource {
    fn draw(&mut self) -> f64;
}

impl<A: AcceptanceSource + ?Sized> AcceptanceSource for &mut A {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

#[derive(Debug, Clone)]
pub struct SeededAcceptance {
    rng: StdRng,
}

impl SeededAcceptance {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self {
                rng: StdRng::from_entropy(),
            },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl AcceptanceSource for SeededAcceptance {
    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

// Largest f64 below 1.0
const HIGHEST_DRAW: f64 = 1.0 - f64::EPSILON / 2.0;

// Replays a fixed sequence of draws, wrapping around at the end.
// An empty sequence always draws the highest value in [0, 1).
#[derive(Debug, Clone)]
pub struct FixedAcceptance {
    draws: Vec<f64>,
    position: usize,
}

impl FixedAcceptance {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }
}

impl AcceptanceSource for FixedAcceptance {
    fn draw(&mut self) -> f64 {
        if self.draws.is_empty() {
            return HIGHEST_DRAW;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}

// Cheapest first; the stable sort keeps catalog order between equal prices
pub fn rank_options(mut options: Vec<AccommodationOption>) -> Vec<AccommodationOption> {
    options.sort_by(|a, b| a.total_price.total_cmp(&b.total_price));
    options
}

pub struct Allocator<A> {
    acceptance: A,
    decline_threshold: f64,
}

impl<A: AcceptanceSource> Allocator<A> {
    pub fn new(acceptance: A) -> Self {
        Self {
            acceptance,
            decline_threshold: DEFAULT_DECLINE_THRESHOLD,
        }
    }

    pub fn with_decline_threshold(mut self, decline_threshold: f64) -> Self {
        self.decline_threshold = decline_threshold;
        self
    }

    pub fn allocate(
        &mut self,
        catalog: &mut RoomCatalog,
        occupancy: &mut OccupancyMap,
        request: &BookingRequest,
    ) -> Result<BookingOutcome, CatalogError> {
        let options = rank_options(build_options(catalog, request));
        debug!(
            guest = %request.guest,
            candidates = options.len(),
            "Built accommodation options"
        );

        let Some(best) = options.into_iter().next() else {
            return Ok(unavailable(request));
        };

        let draw = self.acceptance.draw();
        if draw <= self.decline_threshold {
            debug!(guest = %request.guest, draw, "Offer declined");
            return Ok(BookingOutcome::Declined {
                guest: request.guest.clone(),
                room_number: best.room_number,
                total_price: best.total_price,
            });
        }

        if !catalog.is_available(best.room_number, best.check_in_date, best.stay_days)? {
            warn!(
                room = best.room_number,
                guest = %request.guest,
                "Room taken before commit"
            );
            return Ok(unavailable(request));
        }

        catalog.book(best.room_number, best.check_in_date, best.stay_days)?;
        occupancy.mark_stay(best.room_number, best.check_in_date, best.stay_days);

        Ok(BookingOutcome::Booked {
            guest: request.guest.clone(),
            room_number: best.room_number,
            check_in_date: best.check_in_date,
            stay_days: best.stay_days,
            guests_count: best.guests_count,
            meal: best.meal,
            total_price: best.total_price,
        })
    }
}

fn unavailable(request: &BookingRequest) -> BookingOutcome {
    BookingOutcome::Unavailable {
        guest: request.guest.clone(),
        guests_count: request.guests_count,
        check_in_date: request.check_in_date,
    }
}
