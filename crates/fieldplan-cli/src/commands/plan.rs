//! Work-plan draft authoring commands.
//!
//! Every mutation follows the same cycle: load the draft snapshot, apply
//! the change, write the snapshot back. Submit clears the snapshot on
//! success.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use fieldplan_core::plan::dto::SaveAsTemplate;
use fieldplan_core::plan::{TimeSlot, WorkTimeSlot};
use fieldplan_core::storage::draft::DraftStore;
use fieldplan_core::{
    Activity, Event, FileDraftStore, Store, StoreActivity, UserRef, WorkPlanFormData,
    WorkPlanStatus,
};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Start a new empty draft (overwrites any existing draft)
    Init,
    /// Print the current draft
    Show,
    /// Set top-level draft fields
    Set {
        /// Plan name
        #[arg(long)]
        name: Option<String>,
        /// Plan description
        #[arg(long)]
        description: Option<String>,
        /// Deadline as RFC 3339, e.g. 2026-09-01T00:00:00Z
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Replace the selected stores ("id=name" or "id=name@lat,lng")
    Stores {
        entries: Vec<String>,
    },
    /// Replace the selected workers ("id=name")
    Users {
        entries: Vec<String>,
    },
    /// Replace the working days (0 = Sunday .. 6 = Saturday)
    Days {
        days: Vec<u8>,
    },
    /// Replace the daily working slots ("HH:mm-HH:mm")
    Slots {
        slots: Vec<String>,
    },
    /// Assign an activity to a selected store
    AddActivity {
        /// Store id (must be among the selected stores)
        store_id: String,
        /// Activity name
        name: String,
        /// Estimated minutes per execution
        #[arg(long, default_value = "30")]
        minutes: u32,
        /// Activity description
        #[arg(long)]
        description: Option<String>,
        /// Mark the activity repetitive with this many repetitions
        #[arg(long)]
        repetitions: Option<u32>,
        /// Supervisor as "id=name"
        #[arg(long)]
        supervisor: Option<String>,
        /// Manual assignee as "id=name" (repeatable; switches off automatic assignment)
        #[arg(long)]
        assign: Vec<String>,
        /// Custom slot "HH:mm-HH:mm" (repeatable; enables the custom schedule)
        #[arg(long)]
        slot: Vec<String>,
    },
    /// Remove an assigned activity by its assignment id
    RemoveActivity {
        store_activity_id: String,
    },
    /// Seed the draft from a saved template
    FromTemplate {
        template_id: String,
    },
    /// Validate the draft and print any problems
    Validate,
    /// Ask the scheduling service for a dry-run preview
    Preview {
        /// Override the worker count for simulation
        #[arg(long)]
        workers: Option<u32>,
    },
    /// Submit the draft; clears it on success
    Submit {
        /// Also save the plan as a reusable template with this name
        #[arg(long)]
        template_name: Option<String>,
        /// Template description (only with --template-name)
        #[arg(long)]
        template_description: Option<String>,
    },
    /// Discard the draft
    Reset,
    /// List plans on the scheduling service
    List,
    /// Change a plan's lifecycle status
    SetStatus {
        plan_id: String,
        /// One of DRAFT, APPROVED, ACTIVE, COMPLETED, CANCELLED
        status: String,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileDraftStore::in_data_dir()?;
    let bus = super::logging_bus();

    match action {
        PlanAction::Init => {
            store.save(&WorkPlanFormData::new())?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("draft initialized");
        }
        PlanAction::Show => {
            let draft = load_draft(&store)?;
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        PlanAction::Set {
            name,
            description,
            deadline,
        } => {
            let mut draft = load_draft(&store)?;
            if let Some(n) = name {
                draft = draft.with_name(n);
            }
            if let Some(d) = description {
                draft = draft.with_description(d);
            }
            if let Some(d) = deadline {
                draft = draft.with_deadline(parse_deadline(&d)?);
            }
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("draft updated");
        }
        PlanAction::Stores { entries } => {
            let stores = entries
                .iter()
                .map(|e| parse_store(e))
                .collect::<Result<Vec<_>, _>>()?;
            let draft = load_draft(&store)?.with_stores(stores);
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("{} store(s) selected", draft.selected_stores.len());
        }
        PlanAction::Users { entries } => {
            let users = entries
                .iter()
                .map(|e| parse_user(e))
                .collect::<Result<Vec<_>, _>>()?;
            let draft = load_draft(&store)?.with_users(users);
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("{} worker(s) selected", draft.selected_users.len());
        }
        PlanAction::Days { days } => {
            let draft = load_draft(&store)?.with_work_days(days);
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("working days updated");
        }
        PlanAction::Slots { slots } => {
            let parsed = slots
                .iter()
                .map(|s| parse_time_slot(s).map(|slot| WorkTimeSlot::new(slot.start, slot.end)))
                .collect::<Result<Vec<_>, _>>()?;
            let draft = load_draft(&store)?.with_work_time_slots(parsed);
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("working slots updated");
        }
        PlanAction::AddActivity {
            store_id,
            name,
            minutes,
            description,
            repetitions,
            supervisor,
            assign,
            slot,
        } => {
            let draft = load_draft(&store)?;
            let selected = draft
                .selected_stores
                .iter()
                .find(|s| s.id == store_id)
                .cloned()
                .ok_or_else(|| format!("store not selected: {store_id}"))?;

            let mut activity = Activity::new(name, minutes);
            activity.description = description;
            if let Some(n) = repetitions {
                activity.is_repetitive = true;
                activity.default_repetitions = n;
            }

            let mut assignment = StoreActivity::from_activity(selected, activity);
            if let Some(entry) = supervisor {
                assignment = assignment.with_supervisor(parse_user(&entry)?);
            }
            if !assign.is_empty() {
                let assignees = assign
                    .iter()
                    .map(|e| parse_user(e))
                    .collect::<Result<Vec<_>, _>>()?;
                assignment = assignment.with_manual_assignment(assignees);
            }
            if !slot.is_empty() {
                let slots = slot
                    .iter()
                    .map(|s| parse_time_slot(s))
                    .collect::<Result<Vec<_>, _>>()?;
                assignment = assignment.with_custom_slots(slots);
            }

            let id = assignment.id.clone();
            let draft = draft.with_store_activity(assignment);
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("activity assigned: {id}");
        }
        PlanAction::RemoveActivity { store_activity_id } => {
            let draft = load_draft(&store)?.without_store_activity(&store_activity_id);
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("activity removed: {store_activity_id}");
        }
        PlanAction::FromTemplate { template_id } => {
            let client = super::client()?;
            let rt = super::runtime()?;
            let template = rt.block_on(client.get_template(&template_id))?;
            let draft = store
                .load()?
                .unwrap_or_else(WorkPlanFormData::new)
                .apply_template(&template);
            store.save(&draft)?;
            bus.publish(&Event::DraftSaved { at: Utc::now() });
            println!("draft seeded from template: {template_id}");
        }
        PlanAction::Validate => {
            let draft = load_draft(&store)?;
            let problems = draft.validate(Utc::now());
            if problems.is_empty() {
                println!("draft is valid");
            } else {
                for problem in &problems {
                    eprintln!("- {problem}");
                }
                std::process::exit(1);
            }
        }
        PlanAction::Preview { workers } => {
            let draft = load_draft(&store)?;
            let client = super::client()?;
            let rt = super::runtime()?;
            let preview = rt.block_on(client.preview(&draft, workers))?;
            for warning in &preview.warnings {
                eprintln!("warning: {warning}");
            }
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        PlanAction::Submit {
            template_name,
            template_description,
        } => {
            let draft = load_draft(&store)?;
            let problems = draft.validate(Utc::now());
            if !problems.is_empty() {
                for problem in &problems {
                    eprintln!("- {problem}");
                }
                return Err("draft is not valid; fix the problems above".into());
            }

            let save_as_template = match template_name {
                Some(name) => SaveAsTemplate::Save {
                    name,
                    description: template_description,
                },
                None => SaveAsTemplate::Skip,
            };
            let client = super::client()?;
            let rt = super::runtime()?;
            let created = rt.block_on(client.generate(&draft, save_as_template))?;
            store.clear()?;
            bus.publish(&Event::PlanCreated {
                plan_id: created.id.clone(),
                name: created.name.clone(),
                at: Utc::now(),
            });
            bus.publish(&Event::DraftCleared { at: Utc::now() });
            println!("plan created: {}", created.id);
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        PlanAction::Reset => {
            store.clear()?;
            bus.publish(&Event::DraftCleared { at: Utc::now() });
            println!("draft discarded");
        }
        PlanAction::List => {
            let client = super::client()?;
            let rt = super::runtime()?;
            let plans = rt.block_on(client.list_plans())?;
            println!("{}", serde_json::to_string_pretty(&plans)?);
        }
        PlanAction::SetStatus { plan_id, status } => {
            let status = parse_plan_status(&status)?;
            let client = super::client()?;
            let rt = super::runtime()?;
            rt.block_on(client.update_plan_status(&plan_id, status))?;
            bus.publish(&Event::PlanStatusChanged {
                plan_id: plan_id.clone(),
                status,
                at: Utc::now(),
            });
            println!("plan {plan_id} status set to {status:?}");
        }
    }
    Ok(())
}

fn load_draft(store: &FileDraftStore) -> Result<WorkPlanFormData, Box<dyn std::error::Error>> {
    store
        .load()?
        .ok_or_else(|| "no draft found; run 'plan init' first".into())
}

fn parse_deadline(value: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

/// "id=name" or "id=name@lat,lng".
fn parse_store(entry: &str) -> Result<Store, Box<dyn std::error::Error>> {
    let (id, rest) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected id=name[@lat,lng]: {entry}"))?;
    match rest.rsplit_once('@') {
        Some((name, coords)) => {
            let (lat, lng) = coords
                .split_once(',')
                .ok_or_else(|| format!("expected lat,lng after '@': {entry}"))?;
            Ok(Store::new(id, name).with_coordinates(lat.trim().parse()?, lng.trim().parse()?))
        }
        None => Ok(Store::new(id, rest)),
    }
}

/// "id=name".
fn parse_user(entry: &str) -> Result<UserRef, Box<dyn std::error::Error>> {
    let (id, name) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected id=name: {entry}"))?;
    Ok(UserRef::new(id, name))
}

/// "HH:mm-HH:mm".
fn parse_time_slot(value: &str) -> Result<TimeSlot, Box<dyn std::error::Error>> {
    let (start, end) = value
        .split_once('-')
        .ok_or_else(|| format!("expected HH:mm-HH:mm: {value}"))?;
    Ok(TimeSlot::new(start.trim(), end.trim()))
}

fn parse_plan_status(value: &str) -> Result<WorkPlanStatus, Box<dyn std::error::Error>> {
    let status = match value.to_ascii_uppercase().as_str() {
        "DRAFT" => WorkPlanStatus::Draft,
        "APPROVED" => WorkPlanStatus::Approved,
        "ACTIVE" => WorkPlanStatus::Active,
        "COMPLETED" => WorkPlanStatus::Completed,
        "CANCELLED" => WorkPlanStatus::Cancelled,
        other => return Err(format!("unknown plan status: {other}").into()),
    };
    Ok(status)
}
