//! Generated-itinerary domain.
//!
//! Everything under this module is read-only output of the external
//! scheduling service: a work plan, once generated, arrives as day-by-day,
//! worker-by-worker schedules of interleaved WORK and TRAVEL tasks. Tasks
//! are immutable client-side; only their status moves, through explicit
//! status-update calls.

pub mod adapter;
pub mod navigation;
pub mod status;

pub use adapter::{adapt_daily_schedule, adapt_user_schedule_detail, adapt_work_task};
pub use navigation::{ItineraryNavigator, MonthDay, NavState};
pub use status::{status_config, Severity, StatusConfig};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::plan::{Store, TimeSlot};

/// The two kinds of scheduled units within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskType {
    /// Visiting a store to perform (a repetition of) an activity.
    Work,
    /// Moving between two stores.
    Travel,
}

/// Task lifecycle status as the backend reports it.
///
/// `Unknown` absorbs status strings this client does not know yet; such
/// tasks present as pending rather than failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
    #[serde(other)]
    Unknown,
}

/// Plan lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkPlanStatus {
    Draft,
    Approved,
    Active,
    Completed,
    Cancelled,
}

/// Travel leg details carried by TRAVEL tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInfo {
    pub from_store_id: String,
    pub from_store_name: String,
    pub to_store_id: String,
    pub to_store_name: String,
    #[serde(default)]
    pub distance_meters: f64,
    #[serde(default)]
    pub distance_km: f64,
    /// Route geometry as delivered by the backend (GeoJSON-shaped value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_geometry: Option<serde_json::Value>,
}

/// One atomic unit in a generated daily itinerary.
///
/// WORK tasks carry the store, coordinates, repetition counters, and timing;
/// TRAVEL tasks carry [`TravelInfo`]. The trailing fields are derived by
/// [`adapter::adapt_work_task`] and never transmitted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkTask {
    pub id: String,
    pub daily_schedule_id: String,
    /// 1-based, strictly increasing within a day, WORK and TRAVEL interleaved.
    pub sequence_order: u32,
    pub task_name: String,
    pub task_type: TaskType,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<Store>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub total_repetitions: u32,
    #[serde(default)]
    pub completed_repetitions: u32,
    #[serde(default)]
    pub pending_repetitions: u32,
    /// 0-100, completed/total*100 rounded by the backend.
    #[serde(default)]
    pub progress_percent: u32,
    #[serde(default)]
    pub time_per_repetition: u32,
    #[serde(default)]
    pub total_estimated_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_time_slots: Option<Vec<TimeSlot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_info: Option<TravelInfo>,

    // Derived fields, see the adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default)]
    pub task_minutes: u32,
    #[serde(default)]
    pub travel_minutes: u32,
    #[serde(default)]
    pub task_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_geometry: Option<String>,
}

/// One worker's itinerary for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySchedule {
    pub id: String,
    pub date: NaiveDate,
    /// 0 = Sunday .. 6 = Saturday.
    #[serde(default)]
    pub day_of_week: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub total_work_minutes: u32,
    #[serde(default)]
    pub total_travel_minutes: u32,
    #[serde(default)]
    pub status: TaskStatus,
    /// Serialized GeoJSON LineString for the whole day, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_geometry: Option<String>,
    /// Ordered by `sequence_order`, contiguous and increasing.
    #[serde(default)]
    pub tasks: Vec<WorkTask>,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub work_tasks: u32,
    #[serde(default)]
    pub travel_tasks: u32,
    #[serde(default)]
    pub stores_visited: u32,
    #[serde(default)]
    pub total_distance_km: f64,
}

/// Aggregate totals across all days of one worker's schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub total_work_minutes: u32,
    #[serde(default)]
    pub total_travel_minutes: u32,
    #[serde(default)]
    pub stores_visited: u32,
    #[serde(default)]
    pub total_distance_km: f64,
}

/// One worker's full schedule for one work plan. Read-only, fetched on
/// demand per worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScheduleDetail {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub plan_id: String,
    #[serde(default)]
    pub plan_name: String,
    #[serde(default)]
    pub summary: ScheduleSummary,
    #[serde(default)]
    pub daily_schedules: Vec<DailySchedule>,
}
