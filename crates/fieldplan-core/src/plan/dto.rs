//! Form to wire-payload conversion for the external scheduling service.
//!
//! The conversion is borrow-only and deterministic: the same form always
//! produces the same payload, and calling it never mutates the form. The
//! same base shape serves both the preview and the generate endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::plan::{AssignmentMode, StoreActivity, TimeSlot, WorkPlanFormData};

/// Flattened store-activity record as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreActivityRequest {
    /// The backend contract keys this field on the per-plan assignment id,
    /// not on the catalog activity id. Do not "fix" the mapping; the
    /// scheduling service depends on the observed behavior.
    pub activity_id: String,
    pub store_id: String,
    pub task_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<String>,
    pub is_repetitive: bool,
    pub repetitions: u32,
    pub estimated_time_per_task: u32,
    pub assignment_mode: AssignmentMode,
    pub assigned_user_ids: Vec<String>,
    pub has_custom_schedule: bool,
    /// Present only when `has_custom_schedule` is true. The backend
    /// distinguishes "no override" (absent) from "override with zero slots"
    /// (empty list), so this must never serialize as `[]` for the former.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_time_slots: Option<Vec<TimeSlot>>,
}

impl StoreActivityRequest {
    fn from_store_activity(sa: &StoreActivity) -> Self {
        Self {
            activity_id: sa.id.clone(),
            store_id: sa.store.id.clone(),
            task_name: sa.activity.name.clone(),
            supervisor_id: sa.supervisor.as_ref().map(|u| u.id.clone()),
            is_repetitive: sa.activity.is_repetitive,
            repetitions: sa.repetitions,
            estimated_time_per_task: sa.activity.estimated_time_per_task,
            assignment_mode: sa.assignment_mode,
            assigned_user_ids: sa.assigned_users.iter().map(|u| u.id.clone()).collect(),
            has_custom_schedule: sa.has_custom_schedule,
            custom_time_slots: if sa.has_custom_schedule {
                Some(sa.custom_time_slots.clone())
            } else {
                None
            },
        }
    }
}

/// The base payload shared by `preview` and `generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPlanRequest {
    pub name: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub store_ids: Vec<String>,
    pub user_ids: Vec<String>,
    pub work_days: Vec<u8>,
    pub work_time_slots: Vec<TimeSlot>,
    pub store_activities: Vec<StoreActivityRequest>,
}

impl WorkPlanRequest {
    /// Convert a draft form into the wire payload. Stores, users, and time
    /// slots are reduced to the references the backend needs; full objects
    /// and client-side slot ids are dropped.
    pub fn from_form(form: &WorkPlanFormData) -> Result<Self, ValidationError> {
        let deadline = form.deadline.ok_or(ValidationError::MissingDeadline)?;
        Ok(Self {
            name: form.name.clone(),
            description: form.description.clone(),
            deadline,
            store_ids: form.selected_stores.iter().map(|s| s.id.clone()).collect(),
            user_ids: form.selected_users.iter().map(|u| u.id.clone()).collect(),
            work_days: form.work_days.clone(),
            work_time_slots: form
                .work_time_slots
                .iter()
                .map(|s| TimeSlot::new(s.start.clone(), s.end.clone()))
                .collect(),
            store_activities: form
                .store_activities
                .iter()
                .map(StoreActivityRequest::from_store_activity)
                .collect(),
        })
    }
}

/// Payload for `POST /work-plans/preview`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(flatten)]
    pub plan: WorkPlanRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_workers: Option<u32>,
}

/// Whether a generated plan should also be stored as a reusable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAsTemplate {
    Skip,
    Save {
        name: String,
        description: Option<String>,
    },
}

/// Payload for `POST /work-plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub plan: WorkPlanRequest,
    pub save_as_template: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_description: Option<String>,
}

/// Build the preview payload for a form.
pub fn preview_request(
    form: &WorkPlanFormData,
    simulated_workers: Option<u32>,
) -> Result<PreviewRequest, ValidationError> {
    Ok(PreviewRequest {
        plan: WorkPlanRequest::from_form(form)?,
        simulated_workers,
    })
}

/// Build the generate payload for a form.
pub fn generate_request(
    form: &WorkPlanFormData,
    save_as_template: SaveAsTemplate,
) -> Result<GenerateRequest, ValidationError> {
    let (save, template_name, template_description) = match save_as_template {
        SaveAsTemplate::Skip => (false, None, None),
        SaveAsTemplate::Save { name, description } => (true, Some(name), description),
    };
    Ok(GenerateRequest {
        plan: WorkPlanRequest::from_form(form)?,
        save_as_template: save,
        template_name,
        template_description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Activity, Store, UserRef, WorkTimeSlot};
    use chrono::Duration;

    fn form_with_one_activity(has_custom_schedule: bool) -> WorkPlanFormData {
        let store = Store::new("s1", "Via Roma");
        let mut activity = Activity::new("Restock shelves", 30);
        if has_custom_schedule {
            activity.has_custom_schedule = true;
            activity.custom_time_slots = vec![TimeSlot::new("09:00", "12:00")];
        }
        let sa = StoreActivity::from_activity(store.clone(), activity);
        WorkPlanFormData::new()
            .with_name("Spring campaign")
            .with_deadline(Utc::now() + Duration::days(30))
            .with_stores(vec![store])
            .with_users(vec![UserRef::new("u1", "Ada")])
            .with_work_days(vec![1, 2, 3])
            .with_work_time_slots(vec![WorkTimeSlot::new("08:00", "17:00")])
            .with_store_activity(sa)
    }

    #[test]
    fn stores_and_users_reduce_to_id_lists() {
        let form = form_with_one_activity(false);
        let req = WorkPlanRequest::from_form(&form).unwrap();
        assert_eq!(req.store_ids, vec!["s1"]);
        assert_eq!(req.user_ids, vec!["u1"]);
    }

    #[test]
    fn work_time_slots_drop_client_ids() {
        let form = form_with_one_activity(false);
        let req = WorkPlanRequest::from_form(&form).unwrap();
        assert_eq!(req.work_time_slots, vec![TimeSlot::new("08:00", "17:00")]);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["workTimeSlots"][0].get("id").is_none());
    }

    #[test]
    fn activity_id_carries_the_assignment_id() {
        let form = form_with_one_activity(false);
        let sa_id = form.store_activities[0].id.clone();
        let req = WorkPlanRequest::from_form(&form).unwrap();
        assert_eq!(req.store_activities[0].activity_id, sa_id);
    }

    #[test]
    fn custom_time_slots_absent_without_custom_schedule() {
        let form = form_with_one_activity(false);
        let req = WorkPlanRequest::from_form(&form).unwrap();
        assert!(req.store_activities[0].custom_time_slots.is_none());
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["storeActivities"][0].get("customTimeSlots").is_none());
    }

    #[test]
    fn custom_time_slots_present_with_custom_schedule() {
        let form = form_with_one_activity(true);
        let req = WorkPlanRequest::from_form(&form).unwrap();
        let slots = req.store_activities[0].custom_time_slots.as_ref().unwrap();
        assert_eq!(slots, &vec![TimeSlot::new("09:00", "12:00")]);
    }

    #[test]
    fn conversion_is_repeatable_and_borrow_only() {
        let form = form_with_one_activity(true);
        let first = preview_request(&form, Some(3)).unwrap();
        let second = preview_request(&form, Some(3)).unwrap();
        assert_eq!(first, second);
        // The form itself is untouched.
        assert_eq!(form.name, "Spring campaign");
        assert_eq!(form.store_activities.len(), 1);
    }

    #[test]
    fn missing_deadline_is_a_validation_error() {
        let mut form = form_with_one_activity(false);
        form.deadline = None;
        assert_eq!(
            WorkPlanRequest::from_form(&form).unwrap_err(),
            ValidationError::MissingDeadline
        );
    }

    #[test]
    fn generate_appends_template_fields() {
        let form = form_with_one_activity(false);
        let req = generate_request(
            &form,
            SaveAsTemplate::Save {
                name: "Weekly restock".into(),
                description: None,
            },
        )
        .unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["saveAsTemplate"], true);
        assert_eq!(json["templateName"], "Weekly restock");
        assert!(json.get("templateDescription").is_none());
        // Flattened: base fields sit at the top level of the same object.
        assert_eq!(json["name"], "Spring campaign");
        assert!(json["storeIds"].is_array());
    }

    #[test]
    fn generate_without_template_omits_names() {
        let form = form_with_one_activity(false);
        let req = generate_request(&form, SaveAsTemplate::Skip).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["saveAsTemplate"], false);
        assert!(json.get("templateName").is_none());
    }

    #[test]
    fn preview_with_simulated_workers() {
        let form = form_with_one_activity(false);
        let req = preview_request(&form, Some(5)).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["simulatedWorkers"], 5);

        let plain = preview_request(&form, None).unwrap();
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("simulatedWorkers").is_none());
    }

    #[test]
    fn manual_assignment_serializes_assignee_ids() {
        let mut form = form_with_one_activity(false);
        let sa = form
            .store_activities
            .remove(0)
            .with_manual_assignment(vec![UserRef::new("u1", "Ada"), UserRef::new("u2", "Bob")]);
        let form = form.with_store_activity(sa);
        let req = WorkPlanRequest::from_form(&form).unwrap();
        assert_eq!(req.store_activities[0].assigned_user_ids, vec!["u1", "u2"]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["storeActivities"][0]["assignmentMode"], "MANUAL");
    }
}
