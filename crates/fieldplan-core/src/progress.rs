//! Progress aggregation and minute formatting.

use serde::{Deserialize, Serialize};

use crate::itinerary::{DailySchedule, TaskStatus, TaskType};

/// Completion counters for one worker across all scheduled days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProgress {
    pub completed_tasks: u32,
    pub total_tasks: u32,
    /// completed/total*100 rounded; 0 when there is nothing to do.
    pub progress_percentage: u32,
}

/// Count WORK tasks across all days. Travel legs are excluded from both the
/// numerator and the denominator.
pub fn worker_progress(schedules: &[DailySchedule]) -> WorkerProgress {
    let mut completed = 0u32;
    let mut total = 0u32;
    for schedule in schedules {
        for task in &schedule.tasks {
            if task.task_type != TaskType::Work {
                continue;
            }
            total += 1;
            if task.status == TaskStatus::Completed {
                completed += 1;
            }
        }
    }
    let progress_percentage = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };
    WorkerProgress {
        completed_tasks: completed,
        total_tasks: total,
        progress_percentage,
    }
}

/// Render minutes as `"1h 30m"`, or `"45m"` below one hour.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::WorkTask;
    use chrono::NaiveDate;

    fn task(id: &str, task_type: TaskType, status: TaskStatus) -> WorkTask {
        WorkTask {
            id: id.into(),
            daily_schedule_id: "d1".into(),
            sequence_order: 1,
            task_name: id.into(),
            task_type,
            status,
            store: None,
            coordinates: None,
            total_repetitions: 1,
            completed_repetitions: 0,
            pending_repetitions: 1,
            progress_percent: 0,
            time_per_repetition: 30,
            total_estimated_minutes: 30,
            start_time: None,
            end_time: None,
            custom_time_slots: None,
            travel_info: None,
            arrival_time: None,
            departure_time: None,
            task_minutes: 0,
            travel_minutes: 0,
            task_number: 0,
            segment_geometry: None,
        }
    }

    fn schedule(date: &str, tasks: Vec<WorkTask>) -> DailySchedule {
        DailySchedule {
            id: format!("d-{date}"),
            date: date.parse::<NaiveDate>().unwrap(),
            day_of_week: 1,
            start_time: None,
            end_time: None,
            total_work_minutes: 0,
            total_travel_minutes: 0,
            status: TaskStatus::Pending,
            route_geometry: None,
            tasks,
            total_tasks: 0,
            work_tasks: 0,
            travel_tasks: 0,
            stores_visited: 0,
            total_distance_km: 0.0,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(
            worker_progress(&[]),
            WorkerProgress {
                completed_tasks: 0,
                total_tasks: 0,
                progress_percentage: 0
            }
        );
    }

    #[test]
    fn travel_tasks_do_not_count() {
        let schedules = vec![schedule(
            "2026-03-02",
            vec![
                task("w1", TaskType::Work, TaskStatus::Completed),
                task("t1", TaskType::Travel, TaskStatus::Completed),
                task("w2", TaskType::Work, TaskStatus::Pending),
            ],
        )];
        let progress = worker_progress(&schedules);
        assert_eq!(progress.total_tasks, 2);
        assert_eq!(progress.completed_tasks, 1);
        assert_eq!(progress.progress_percentage, 50);
    }

    #[test]
    fn progress_spans_multiple_days() {
        let schedules = vec![
            schedule(
                "2026-03-02",
                vec![
                    task("w1", TaskType::Work, TaskStatus::Completed),
                    task("w2", TaskType::Work, TaskStatus::Completed),
                ],
            ),
            schedule(
                "2026-03-03",
                vec![task("w3", TaskType::Work, TaskStatus::Skipped)],
            ),
        ];
        let progress = worker_progress(&schedules);
        assert_eq!(progress.completed_tasks, 2);
        assert_eq!(progress.total_tasks, 3);
        assert_eq!(progress.progress_percentage, 67);
    }

    #[test]
    fn format_minutes_forms() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(90), "1h 30m");
        assert_eq!(format_minutes(135), "2h 15m");
    }
}
