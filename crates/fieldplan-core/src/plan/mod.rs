//! Work-plan authoring domain.
//!
//! The draft form lives entirely in memory while the user walks the wizard
//! steps (general info, per-store activities, preview). Every mutation goes
//! through an immutable `with_*` update returning a new form value; the CLI
//! mirrors the result to the draft store after each change.

pub mod dto;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::geo::Coordinates;

/// A `{start, end}` time window in 24h "HH:mm" form, as the wire speaks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

impl TimeSlot {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A daily working window on the draft form. The id is client-side only and
/// dropped on conversion to the wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTimeSlot {
    pub id: String,
    pub start: String,
    pub end: String,
}

impl WorkTimeSlot {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// A store selected for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Store {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }
}

/// A worker or supervisor reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A reusable task template maintained in the admin catalog and consumed
/// read-only by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Estimated minutes per single repetition, > 0.
    pub estimated_time_per_task: u32,
    #[serde(default)]
    pub is_repetitive: bool,
    /// Meaningful only when `is_repetitive`.
    #[serde(default = "default_repetitions")]
    pub default_repetitions: u32,
    #[serde(default)]
    pub has_custom_schedule: bool,
    /// Non-empty iff `has_custom_schedule`.
    #[serde(default)]
    pub custom_time_slots: Vec<TimeSlot>,
    /// Empty = unrestricted.
    #[serde(default)]
    pub authorized_user_ids: Vec<String>,
}

fn default_repetitions() -> u32 {
    1
}

impl Activity {
    pub fn new(name: impl Into<String>, estimated_time_per_task: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            estimated_time_per_task,
            is_repetitive: false,
            default_repetitions: 1,
            has_custom_schedule: false,
            custom_time_slots: Vec::new(),
            authorized_user_ids: Vec::new(),
        }
    }
}

/// How workers are assigned to a [`StoreActivity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssignmentMode {
    /// The external scheduler picks the workers.
    Automatic,
    /// The authoring user picks the workers; `assigned_users` must be non-empty.
    Manual,
}

/// One activity configured for one store within the plan being built.
///
/// The embedded activity is a copy, not a reference: later edits to the
/// catalog template do not retroactively change an already-added assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreActivity {
    pub id: String,
    pub store: Store,
    pub activity: Activity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<UserRef>,
    pub repetitions: u32,
    pub assignment_mode: AssignmentMode,
    #[serde(default)]
    pub assigned_users: Vec<UserRef>,
    #[serde(default)]
    pub has_custom_schedule: bool,
    #[serde(default)]
    pub custom_time_slots: Vec<TimeSlot>,
}

impl StoreActivity {
    /// Create an assignment from a catalog activity, copying the template and
    /// defaulting repetitions (`default_repetitions` when repetitive, else 1)
    /// and the custom-schedule override from the template.
    pub fn from_activity(store: Store, activity: Activity) -> Self {
        let repetitions = if activity.is_repetitive {
            activity.default_repetitions.max(1)
        } else {
            1
        };
        let has_custom_schedule = activity.has_custom_schedule;
        let custom_time_slots = activity.custom_time_slots.clone();
        Self {
            id: Uuid::new_v4().to_string(),
            store,
            activity,
            supervisor: None,
            repetitions,
            assignment_mode: AssignmentMode::Automatic,
            assigned_users: Vec::new(),
            has_custom_schedule,
            custom_time_slots,
        }
    }

    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_supervisor(mut self, supervisor: UserRef) -> Self {
        self.supervisor = Some(supervisor);
        self
    }

    pub fn with_manual_assignment(mut self, assigned_users: Vec<UserRef>) -> Self {
        self.assignment_mode = AssignmentMode::Manual;
        self.assigned_users = assigned_users;
        self
    }

    /// Override the activity's own schedule for this one store.
    pub fn with_custom_slots(mut self, slots: Vec<TimeSlot>) -> Self {
        self.has_custom_schedule = !slots.is_empty();
        self.custom_time_slots = slots;
        self
    }
}

/// The full draft state of one plan under construction.
///
/// This is the only state in the authoring subsystem with save/restore
/// semantics across sessions (see [`crate::storage::DraftStore`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkPlanFormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Must be in the future at validation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub selected_stores: Vec<Store>,
    #[serde(default)]
    pub selected_users: Vec<UserRef>,
    /// Subset of 0..=6, 0 = Sunday.
    #[serde(default)]
    pub work_days: Vec<u8>,
    #[serde(default)]
    pub work_time_slots: Vec<WorkTimeSlot>,
    #[serde(default)]
    pub store_activities: Vec<StoreActivity>,
    /// Recorded when the form was seeded from a saved template. Loading is a
    /// one-time copy; the form stays editable afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl WorkPlanFormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_stores(mut self, stores: Vec<Store>) -> Self {
        self.selected_stores = stores;
        self
    }

    pub fn with_users(mut self, users: Vec<UserRef>) -> Self {
        self.selected_users = users;
        self
    }

    pub fn with_work_days(mut self, days: Vec<u8>) -> Self {
        self.work_days = days;
        self
    }

    pub fn with_work_time_slots(mut self, slots: Vec<WorkTimeSlot>) -> Self {
        self.work_time_slots = slots;
        self
    }

    pub fn with_store_activity(mut self, store_activity: StoreActivity) -> Self {
        self.store_activities.push(store_activity);
        self
    }

    /// Remove an assignment by its own id. Unknown ids leave the form unchanged.
    pub fn without_store_activity(mut self, store_activity_id: &str) -> Self {
        self.store_activities.retain(|sa| sa.id != store_activity_id);
        self
    }

    /// Replace an assignment in place (matched by id).
    pub fn with_store_activity_replaced(mut self, store_activity: StoreActivity) -> Self {
        if let Some(slot) = self
            .store_activities
            .iter_mut()
            .find(|sa| sa.id == store_activity.id)
        {
            *slot = store_activity;
        }
        self
    }

    /// Seed the form from a saved template: every field is copied, new
    /// client-side slot ids are minted, and the template id is recorded.
    pub fn apply_template(self, template: &WorkPlanTemplate) -> Self {
        Self {
            name: template.name.clone(),
            description: template.description.clone().unwrap_or_default(),
            deadline: self.deadline,
            selected_stores: template.stores.clone(),
            selected_users: template.users.clone(),
            work_days: template.work_days.clone(),
            work_time_slots: template
                .work_time_slots
                .iter()
                .map(|s| WorkTimeSlot::new(s.start.clone(), s.end.clone()))
                .collect(),
            store_activities: template.store_activities.clone(),
            template_id: Some(template.id.clone()),
        }
    }

    /// Step-1 validation: general info and scheduling constraints.
    pub fn validate_general(&self, now: DateTime<Utc>) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::EmptyField { field: "name" });
        }
        match self.deadline {
            None => errors.push(ValidationError::MissingDeadline),
            Some(deadline) if deadline <= now => {
                errors.push(ValidationError::DeadlineNotFuture { deadline });
            }
            Some(_) => {}
        }
        if self.selected_stores.is_empty() {
            errors.push(ValidationError::EmptyCollection("store"));
        }
        if self.selected_users.is_empty() {
            errors.push(ValidationError::EmptyCollection("worker"));
        }
        if self.work_days.is_empty() {
            errors.push(ValidationError::EmptyCollection("work day"));
        }
        for &day in &self.work_days {
            if day > 6 {
                errors.push(ValidationError::InvalidWorkDay { day });
            }
        }
        if self.work_time_slots.is_empty() {
            errors.push(ValidationError::EmptyCollection("work time slot"));
        }
        for slot in &self.work_time_slots {
            if !time_range_in_order(&slot.start, &slot.end) {
                errors.push(ValidationError::InvalidTimeRange {
                    start: slot.start.clone(),
                    end: slot.end.clone(),
                });
            }
        }

        errors
    }

    /// Step-2 validation: every selected store configured, assignments sound.
    pub fn validate_activities(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for store in &self.selected_stores {
            let configured = self
                .store_activities
                .iter()
                .any(|sa| sa.store.id == store.id);
            if !configured {
                errors.push(ValidationError::StoreWithoutActivities {
                    store_id: store.id.clone(),
                    store_name: store.name.clone(),
                });
            }
        }

        for sa in &self.store_activities {
            if sa.repetitions < 1 {
                errors.push(ValidationError::InvalidRepetitions {
                    store_activity_id: sa.id.clone(),
                    task_name: sa.activity.name.clone(),
                    value: sa.repetitions,
                });
            }
            if sa.activity.estimated_time_per_task < 1 {
                errors.push(ValidationError::InvalidEstimatedTime {
                    task_name: sa.activity.name.clone(),
                    value: sa.activity.estimated_time_per_task,
                });
            }
            if sa.assignment_mode == AssignmentMode::Manual && sa.assigned_users.is_empty() {
                errors.push(ValidationError::MissingAssignees {
                    store_activity_id: sa.id.clone(),
                    task_name: sa.activity.name.clone(),
                });
            }
            if sa.has_custom_schedule && sa.custom_time_slots.is_empty() {
                errors.push(ValidationError::EmptyCustomSlots {
                    store_activity_id: sa.id.clone(),
                    task_name: sa.activity.name.clone(),
                });
            }
        }

        errors
    }

    /// Both validation steps. An empty result means the form can be submitted.
    pub fn validate(&self, now: DateTime<Utc>) -> Vec<ValidationError> {
        let mut errors = self.validate_general(now);
        errors.extend(self.validate_activities());
        errors
    }
}

/// A saved work-plan template fetched from the scheduling service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPlanTemplate {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub users: Vec<UserRef>,
    #[serde(default)]
    pub work_days: Vec<u8>,
    #[serde(default)]
    pub work_time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub store_activities: Vec<StoreActivity>,
}

/// Listing row for the template picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPlanTemplateSummary {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn parse_hhmm(value: &str) -> Option<u32> {
    let (h, m) = value.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// True when both ends parse as "HH:mm" and start < end.
fn time_range_in_order(start: &str, end: &str) -> bool {
    match (parse_hhmm(start), parse_hhmm(end)) {
        (Some(s), Some(e)) => s < e,
        _ => false,
    }
}
