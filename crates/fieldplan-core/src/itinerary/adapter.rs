//! Response adaptation for schedules coming back from the scheduling service.
//!
//! The backend transmits only the raw task fields; the compatibility aliases
//! and per-type minute splits are derived here. Adaptation is idempotent:
//! every derived field is recomputed from raw fields alone, so re-adapting
//! an already adapted value changes nothing.

use crate::geo::Coordinates;
use crate::itinerary::{DailySchedule, TaskType, UserScheduleDetail, WorkTask};

/// Derive the computed fields on one task. Raw fields pass through untouched.
pub fn adapt_work_task(mut task: WorkTask) -> WorkTask {
    task.arrival_time = task.start_time.clone();
    task.departure_time = task.end_time.clone();
    task.task_minutes = match task.task_type {
        TaskType::Work => task.time_per_repetition,
        TaskType::Travel => 0,
    };
    task.travel_minutes = match task.task_type {
        TaskType::Travel => task.total_estimated_minutes,
        TaskType::Work => 0,
    };
    task.task_number = task.sequence_order;
    task.segment_geometry = task
        .travel_info
        .as_ref()
        .and_then(|info| info.segment_geometry.as_ref())
        .and_then(|geometry| serde_json::to_string(geometry).ok());
    task
}

/// Adapt every task of a daily schedule.
pub fn adapt_daily_schedule(mut schedule: DailySchedule) -> DailySchedule {
    schedule.tasks = schedule.tasks.into_iter().map(adapt_work_task).collect();
    schedule
}

/// Adapt a full per-worker schedule. Applied by the API client on every
/// fetch so the raw backend task shape never reaches consumers.
pub fn adapt_user_schedule_detail(mut detail: UserScheduleDetail) -> UserScheduleDetail {
    detail.daily_schedules = detail
        .daily_schedules
        .into_iter()
        .map(adapt_daily_schedule)
        .collect();
    detail
}

/// Decode a serialized segment geometry into its coordinate list.
///
/// Accepts either a GeoJSON LineString object or a bare `[[lng, lat], ...]`
/// array. Malformed input yields an empty list; this is the one documented
/// swallow case in the subsystem, a broken route polyline must not take the
/// whole itinerary view down with it.
pub fn decode_segment_geometry(raw: &str) -> Vec<Coordinates> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };
    let pairs = match &value {
        serde_json::Value::Object(obj) => obj.get("coordinates").and_then(|c| c.as_array()),
        serde_json::Value::Array(_) => value.as_array(),
        _ => None,
    };
    let Some(pairs) = pairs else {
        return Vec::new();
    };
    pairs
        .iter()
        .filter_map(|pair| {
            let pair = pair.as_array()?;
            let lng = pair.first()?.as_f64()?;
            let lat = pair.get(1)?.as_f64()?;
            Some(Coordinates::new(lat, lng))
        })
        .collect()
}
