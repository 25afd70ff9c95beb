// Hotel booking simulation: room inventory, allocation engine and occupancy reporting

pub mod allocator;
pub mod export;
pub mod loader;
pub mod occupancy;
pub mod option_builder;
pub mod outcome;
pub mod request;
pub mod revenue;
pub mod room;
pub mod simulation;

// Re-export key types for convenience
pub use allocator::{AcceptanceSource, Allocator, FixedAcceptance, SeededAcceptance};
pub use export::{render, ExportError, ReportFormat};
pub use loader::{load_booking_requests, load_rooms, LoadError, Loaded};
pub use occupancy::OccupancyMap;
pub use option_builder::{build_options, AccommodationOption, MealPlan};
pub use outcome::{BookingOutcome, OutcomeSink, OutcomeTally, TracingSink};
pub use request::{BookingRequest, GuestName};
pub use revenue::{calculate_revenue, daily_report, DailyReport, RevenueSummary, TypeOccupancy};
pub use room::{CatalogError, ComfortLevel, ParseValueError, Room, RoomCatalog, RoomType};
pub use simulation::{
    ConfigError, DailySimulation, RequestMatching, SimulationConfig, SimulationError, SimulationRun,
};
