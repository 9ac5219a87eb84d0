//! Task status presentation.
//!
//! Maps the backend status plus the worker's current position onto the
//! displayed state. The geofence is consulted only for in-progress tasks:
//! an in-progress task whose store lies within the geofence presents as
//! "working on site", otherwise as "in transit". Pending, completed, and
//! skipped tasks are never reclassified by location.

use serde::{Deserialize, Serialize};

use crate::geo::{is_within_geofence, Coordinates};
use crate::itinerary::TaskStatus;

/// Presentation severity, matching the alert levels used by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
    Success,
    Danger,
}

/// How a task should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    pub severity: Severity,
    pub label: &'static str,
    pub icon: &'static str,
    /// Attention marker, set only for the two in-progress presentations.
    pub pulse: bool,
}

const PENDING: StatusConfig = StatusConfig {
    severity: Severity::Warning,
    label: "Pending",
    icon: "clock",
    pulse: false,
};

const IN_TRANSIT: StatusConfig = StatusConfig {
    severity: Severity::Info,
    label: "In transit",
    icon: "route",
    pulse: true,
};

const ON_SITE: StatusConfig = StatusConfig {
    severity: Severity::Success,
    label: "Working on site",
    icon: "wrench",
    pulse: true,
};

const COMPLETED: StatusConfig = StatusConfig {
    severity: Severity::Success,
    label: "Completed",
    icon: "check",
    pulse: false,
};

const SKIPPED: StatusConfig = StatusConfig {
    severity: Severity::Danger,
    label: "Skipped",
    icon: "ban",
    pulse: false,
};

/// Resolve the displayed state for a task.
///
/// `task_coords` and `current_location` both have to be known for the
/// geofence to matter; with either missing, an in-progress task presents as
/// in transit.
pub fn status_config(
    status: TaskStatus,
    task_coords: Option<Coordinates>,
    current_location: Option<Coordinates>,
    radius_meters: f64,
) -> StatusConfig {
    match status {
        TaskStatus::InProgress => match (task_coords, current_location) {
            (Some(task), Some(current)) if is_within_geofence(current, task, radius_meters) => {
                ON_SITE
            }
            _ => IN_TRANSIT,
        },
        TaskStatus::Pending | TaskStatus::Unknown => PENDING,
        TaskStatus::Completed => COMPLETED,
        TaskStatus::Skipped => SKIPPED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::DEFAULT_GEOFENCE_RADIUS_METERS;

    const STORE: Coordinates = Coordinates { lat: 45.4642, lng: 9.1900 };
    // ~111 m north of the store, inside the default radius.
    const NEARBY: Coordinates = Coordinates { lat: 45.4652, lng: 9.1900 };
    // ~1.1 km north of the store, outside the default radius.
    const FARAWAY: Coordinates = Coordinates { lat: 45.4742, lng: 9.1900 };

    #[test]
    fn in_progress_inside_geofence_is_on_site() {
        let cfg = status_config(
            TaskStatus::InProgress,
            Some(STORE),
            Some(NEARBY),
            DEFAULT_GEOFENCE_RADIUS_METERS,
        );
        assert_eq!(cfg.label, "Working on site");
        assert_eq!(cfg.severity, Severity::Success);
        assert!(cfg.pulse);
    }

    #[test]
    fn in_progress_outside_geofence_is_in_transit() {
        let cfg = status_config(
            TaskStatus::InProgress,
            Some(STORE),
            Some(FARAWAY),
            DEFAULT_GEOFENCE_RADIUS_METERS,
        );
        assert_eq!(cfg.label, "In transit");
        assert_eq!(cfg.severity, Severity::Info);
        assert!(cfg.pulse);
    }

    #[test]
    fn in_progress_without_location_is_in_transit() {
        let cfg = status_config(
            TaskStatus::InProgress,
            Some(STORE),
            None,
            DEFAULT_GEOFENCE_RADIUS_METERS,
        );
        assert_eq!(cfg.label, "In transit");

        let cfg = status_config(
            TaskStatus::InProgress,
            None,
            Some(NEARBY),
            DEFAULT_GEOFENCE_RADIUS_METERS,
        );
        assert_eq!(cfg.label, "In transit");
    }

    #[test]
    fn completed_ignores_location() {
        // Even standing inside the geofence, a completed task stays completed.
        let cfg = status_config(
            TaskStatus::Completed,
            Some(STORE),
            Some(NEARBY),
            DEFAULT_GEOFENCE_RADIUS_METERS,
        );
        assert_eq!(cfg.severity, Severity::Success);
        assert_eq!(cfg.label, "Completed");
        assert!(!cfg.pulse);
    }

    #[test]
    fn pending_and_skipped_ignore_location() {
        let pending = status_config(
            TaskStatus::Pending,
            Some(STORE),
            Some(NEARBY),
            DEFAULT_GEOFENCE_RADIUS_METERS,
        );
        assert_eq!(pending.severity, Severity::Warning);
        assert!(!pending.pulse);

        let skipped = status_config(
            TaskStatus::Skipped,
            Some(STORE),
            Some(NEARBY),
            DEFAULT_GEOFENCE_RADIUS_METERS,
        );
        assert_eq!(skipped.severity, Severity::Danger);
        assert_eq!(skipped.label, "Skipped");
    }

    #[test]
    fn unknown_status_presents_as_pending() {
        let cfg = status_config(TaskStatus::Unknown, None, None, DEFAULT_GEOFENCE_RADIUS_METERS);
        assert_eq!(cfg, status_config(TaskStatus::Pending, None, None, 200.0));
    }
}
