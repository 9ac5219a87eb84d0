//! Generated-itinerary commands.
//!
//! Itineraries are read-only: these commands fetch a worker's schedule,
//! run it through the adapter (the client does that on fetch), and present
//! it with the geofence-aware status labels.

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use fieldplan_core::itinerary::{status_config, DailySchedule, ItineraryNavigator, NavState};
use fieldplan_core::storage::Config;
use fieldplan_core::{format_minutes, worker_progress, Coordinates, TaskType};

#[derive(Subcommand)]
pub enum ItineraryAction {
    /// List workers with schedules on a plan
    Workers {
        plan_id: String,
    },
    /// Show a worker's day-by-day itinerary
    Show {
        plan_id: String,
        user_id: String,
        /// Current position "lat,lng", used to tell in-transit from on-site
        #[arg(long)]
        location: Option<String>,
    },
    /// Aggregate progress across the worker's days
    Progress {
        plan_id: String,
        user_id: String,
    },
    /// Walk the calendar over the fetched schedules
    Browse {
        plan_id: String,
        user_id: String,
        /// Day to open, e.g. 2026-03-02
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Step forward one day from the opened day
        #[arg(long)]
        next: bool,
        /// Step back one day from the opened day
        #[arg(long)]
        prev: bool,
    },
}

pub fn run(action: ItineraryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ItineraryAction::Workers { plan_id } => {
            let client = super::client()?;
            let rt = super::runtime()?;
            let workers = rt.block_on(client.list_user_schedules(&plan_id))?;
            println!("{}", serde_json::to_string_pretty(&workers)?);
        }
        ItineraryAction::Show {
            plan_id,
            user_id,
            location,
        } => {
            let location = location.as_deref().map(parse_location).transpose()?;
            let radius = Config::load_or_default().geofence.radius_meters;
            let client = super::client()?;
            let rt = super::runtime()?;
            let detail = rt.block_on(client.user_schedule_detail(&plan_id, &user_id))?;
            println!("{} / {}", detail.plan_name, detail.user_name);
            for day in &detail.daily_schedules {
                print_day(day, location, radius);
            }
        }
        ItineraryAction::Progress { plan_id, user_id } => {
            let client = super::client()?;
            let rt = super::runtime()?;
            let detail = rt.block_on(client.user_schedule_detail(&plan_id, &user_id))?;
            let progress = worker_progress(&detail.daily_schedules);
            println!(
                "{}/{} tasks completed ({}%)",
                progress.completed_tasks, progress.total_tasks, progress.progress_percentage
            );
        }
        ItineraryAction::Browse {
            plan_id,
            user_id,
            date,
            next,
            prev,
        } => {
            let radius = Config::load_or_default().geofence.radius_meters;
            let client = super::client()?;
            let rt = super::runtime()?;
            let detail = rt.block_on(client.user_schedule_detail(&plan_id, &user_id))?;
            let mut nav = ItineraryNavigator::new(detail.daily_schedules);

            if let Some(date) = date {
                if !nav.open_day(date) {
                    return Err(format!("no schedule on {date}").into());
                }
            }
            if next && !nav.next_day() {
                println!("no schedule on the next day");
            }
            if prev && !nav.prev_day() {
                println!("no schedule on the previous day");
            }

            match nav.state() {
                NavState::Calendar => match nav.selected_date() {
                    Some(selected) => {
                        let days = nav.month_days(selected.year(), selected.month());
                        let scheduled: Vec<_> =
                            days.iter().filter(|d| d.has_schedule).collect();
                        println!(
                            "{} scheduled day(s) in {}-{:02}:",
                            scheduled.len(),
                            selected.year(),
                            selected.month()
                        );
                        for day in scheduled {
                            println!("  {}", day.date);
                        }
                    }
                    None => println!("no scheduled days"),
                },
                NavState::DailyDetail => {
                    if let Some(day) = nav.selected_schedule() {
                        print_day(day, None, radius);
                    }
                    println!(
                        "previous day available: {}, next day available: {}",
                        nav.can_go_prev(),
                        nav.can_go_next()
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_day(day: &DailySchedule, location: Option<Coordinates>, radius_meters: f64) {
    println!(
        "{} ({} tasks, {} work, {} travel)",
        day.date,
        day.total_tasks,
        format_minutes(day.total_work_minutes),
        format_minutes(day.total_travel_minutes)
    );
    for task in &day.tasks {
        let display = status_config(task.status, task.coordinates, location, radius_meters);
        let window = match (&task.arrival_time, &task.departure_time) {
            (Some(arrival), Some(departure)) => format!("{arrival}-{departure} "),
            _ => String::new(),
        };
        println!(
            "  {:>2}. [{}] {}{}",
            task.sequence_order, display.label, window, task.task_name
        );
        if task.task_type == TaskType::Work && task.total_repetitions > 1 {
            println!(
                "      {}/{} repetitions",
                task.completed_repetitions, task.total_repetitions
            );
        }
    }
}

/// "lat,lng".
fn parse_location(value: &str) -> Result<Coordinates, Box<dyn std::error::Error>> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected lat,lng: {value}"))?;
    Ok(Coordinates {
        lat: lat.trim().parse()?,
        lng: lng.trim().parse()?,
    })
}
