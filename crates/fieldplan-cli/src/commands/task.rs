use chrono::Utc;
use clap::Subcommand;
use fieldplan_core::api::CompleteTaskRequest;
use fieldplan_core::{Event, TaskStatus};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Update a task's status
    SetStatus {
        plan_id: String,
        task_id: String,
        /// One of PENDING, IN_PROGRESS, COMPLETED, SKIPPED
        status: String,
    },
    /// Mark a task completed with the actual outcome
    Complete {
        plan_id: String,
        task_id: String,
        /// Actual minutes spent on site
        #[arg(long)]
        duration: u32,
        /// Free-form completion notes
        #[arg(long)]
        notes: Option<String>,
        /// Photo reference (repeatable)
        #[arg(long)]
        photo: Vec<String>,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let bus = super::logging_bus();
    let client = super::client()?;
    let rt = super::runtime()?;

    match action {
        TaskAction::SetStatus {
            plan_id,
            task_id,
            status,
        } => {
            let status = parse_task_status(&status)?;
            let task = rt.block_on(client.update_task_status(&plan_id, &task_id, status))?;
            bus.publish(&Event::TaskStatusChanged {
                task_id: task_id.clone(),
                status,
                at: Utc::now(),
            });
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Complete {
            plan_id,
            task_id,
            duration,
            notes,
            photo,
        } => {
            let completion = CompleteTaskRequest {
                actual_duration: duration,
                notes,
                photos: if photo.is_empty() { None } else { Some(photo) },
            };
            rt.block_on(client.complete_task(&plan_id, &task_id, &completion))?;
            bus.publish(&Event::TaskStatusChanged {
                task_id: task_id.clone(),
                status: TaskStatus::Completed,
                at: Utc::now(),
            });
            println!("task completed: {task_id}");
        }
    }
    Ok(())
}

fn parse_task_status(value: &str) -> Result<TaskStatus, Box<dyn std::error::Error>> {
    let status = match value.to_ascii_uppercase().as_str() {
        "PENDING" => TaskStatus::Pending,
        "IN_PROGRESS" => TaskStatus::InProgress,
        "COMPLETED" => TaskStatus::Completed,
        "SKIPPED" => TaskStatus::Skipped,
        other => return Err(format!("unknown task status: {other}").into()),
    };
    Ok(status)
}
