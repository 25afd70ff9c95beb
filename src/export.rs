// Rendering of a simulation run for the console, JSON and XML consumers
use crate::revenue::DailyReport;
use crate::room::ParseValueError;
use crate::simulation::SimulationRun;
use serde::Serialize;
use std::fmt::Write;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("XML serialization error: {0}")]
    XmlError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Xml,
}

impl FromStr for ReportFormat {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "xml" => Ok(ReportFormat::Xml),
            _ => Err(ParseValueError::new("report format", s)),
        }
    }
}

pub fn render(run: &SimulationRun, format: ReportFormat) -> Result<String, ExportError> {
    match format {
        ReportFormat::Text => Ok(render_text(run)),
        ReportFormat::Json => render_json(run),
        ReportFormat::Xml => render_xml(run),
    }
}

pub fn render_daily_text(report: &DailyReport) -> String {
    // Writing into a String cannot fail
    let mut out = String::new();
    let _ = writeln!(out, "Report for {}:", report.date.format("%d.%m.%Y"));
    let _ = writeln!(out, "Occupied rooms: {}", report.occupied_rooms);
    let _ = writeln!(out, "Empty rooms: {}", report.empty_rooms);
    let _ = writeln!(out, "Occupancy by room type:");
    for entry in &report.occupancy_by_type {
        let _ = writeln!(out, "  {}: {:.2}%", entry.room_type, entry.occupancy_percent);
    }
    let _ = writeln!(out, "Hotel occupancy: {:.2}%", report.hotel_occupancy_percent);
    let _ = writeln!(out, "Revenue for the day: {:.2}", report.total_revenue);
    let _ = writeln!(out, "Missed revenue: {:.2}", report.missed_revenue);
    out
}

pub fn render_text(run: &SimulationRun) -> String {
    let mut out = String::new();
    for report in &run.reports {
        out.push_str(&render_daily_text(report));
        out.push('\n');
    }

    let _ = writeln!(out, "Simulation summary:");
    let _ = writeln!(
        out,
        "Booked: {}, declined: {}, no room available: {}",
        run.tally.booked, run.tally.declined, run.tally.unavailable
    );
    let _ = writeln!(out, "Total revenue: {:.2}", run.summary.total_revenue);
    let _ = writeln!(out, "Missed revenue: {:.2}", run.summary.missed_revenue);
    let _ = writeln!(
        out,
        "Rooms occupied at least once: {}, never occupied: {}",
        run.summary.occupied_rooms, run.summary.empty_rooms
    );
    out
}

pub fn render_json(run: &SimulationRun) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(run)?)
}

pub fn render_xml(run: &SimulationRun) -> Result<String, ExportError> {
    let response = XmlOccupancyResponse::from(run);
    quick_xml::se::to_string(&response).map_err(|e| ExportError::XmlError(e.to_string()))
}

// Structures for XML serialization
#[derive(Debug, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
#[serde(rename = "OccupancyRS")]
pub struct XmlOccupancyResponse {
    pub reports: XmlReports,
    pub summary: XmlSummary,
}

impl From<&SimulationRun> for XmlOccupancyResponse {
    fn from(run: &SimulationRun) -> Self {
        XmlOccupancyResponse {
            reports: XmlReports {
                reports: run.reports.iter().map(XmlReport::from).collect(),
            },
            summary: XmlSummary {
                booked: run.tally.booked.to_string(),
                declined: run.tally.declined.to_string(),
                unavailable: run.tally.unavailable.to_string(),
                total_revenue: run.summary.total_revenue.to_string(),
                missed_revenue: run.summary.missed_revenue.to_string(),
            },
        }
    }
}

impl From<&DailyReport> for XmlReport {
    fn from(report: &DailyReport) -> Self {
        XmlReport {
            date: report.date.to_string(),
            occupied_rooms: report.occupied_rooms.to_string(),
            empty_rooms: report.empty_rooms.to_string(),
            occupancy: format!("{:.2}", report.hotel_occupancy_percent),
            revenue: XmlRevenue {
                total: report.total_revenue.to_string(),
                missed: report.missed_revenue.to_string(),
            },
            room_types: XmlRoomTypes {
                room_types: report
                    .occupancy_by_type
                    .iter()
                    .map(|entry| XmlRoomType {
                        code: entry.room_type.to_string(),
                        occupancy: format!("{:.2}", entry.occupancy_percent),
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Debug, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XmlReports {
    #[serde(rename = "Report")]
    pub reports: Vec<XmlReport>,
}

#[derive(Debug, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XmlReport {
    #[serde(rename = "@date")]
    pub date: String,
    #[serde(rename = "@occupiedRooms")]
    pub occupied_rooms: String,
    #[serde(rename = "@emptyRooms")]
    pub empty_rooms: String,
    #[serde(rename = "@occupancy")]
    pub occupancy: String,
    pub revenue: XmlRevenue,
    pub room_types: XmlRoomTypes,
}

#[derive(Debug, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XmlRevenue {
    #[serde(rename = "@total")]
    pub total: String,
    #[serde(rename = "@missed")]
    pub missed: String,
}

#[derive(Debug, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XmlRoomTypes {
    #[serde(rename = "RoomType")]
    pub room_types: Vec<XmlRoomType>,
}

#[derive(Debug, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XmlRoomType {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "@occupancy")]
    pub occupancy: String,
}

#[derive(Debug, PartialEq, Default, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct XmlSummary {
    #[serde(rename = "@booked")]
    pub booked: String,
    #[serde(rename = "@declined")]
    pub declined: String,
    #[serde(rename = "@unavailable")]
    pub unavailable: String,
    #[serde(rename = "@totalRevenue")]
    pub total_revenue: String,
    #[serde(rename = "@missedRevenue")]
    pub missed_revenue: String,
}
