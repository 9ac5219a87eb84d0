//! Calendar / day-detail navigation state machine.
//!
//! Drives the read-only itinerary viewers: a month grid whose day cells are
//! annotated with schedule presence, and a day-detail view over one
//! [`DailySchedule`] with an optional focused task. The machine is caller
//! driven and free-form; there is no terminal state.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::itinerary::{DailySchedule, WorkTask};

/// The two top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavState {
    Calendar,
    DailyDetail,
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDay {
    pub date: NaiveDate,
    pub has_schedule: bool,
}

/// Navigation over one worker's set of daily schedules.
///
/// Day moves are gated on schedule presence: the machine never lands on a
/// date without a schedule, and the prev/next controls report themselves
/// disabled when the adjacent calendar date is empty.
#[derive(Debug, Clone)]
pub struct ItineraryNavigator {
    schedules: BTreeMap<NaiveDate, DailySchedule>,
    state: NavState,
    selected_date: Option<NaiveDate>,
    focused_task_id: Option<String>,
}

impl ItineraryNavigator {
    /// Index the schedules by date. The initial state is the calendar with
    /// the selected date defaulting to the first scheduled date, which is
    /// not necessarily today.
    pub fn new(schedules: Vec<DailySchedule>) -> Self {
        let schedules: BTreeMap<NaiveDate, DailySchedule> =
            schedules.into_iter().map(|s| (s.date, s)).collect();
        let selected_date = schedules.keys().next().copied();
        Self {
            schedules,
            state: NavState::Calendar,
            selected_date,
            focused_task_id: None,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// The schedule for the selected date, when one exists.
    pub fn selected_schedule(&self) -> Option<&DailySchedule> {
        self.schedules.get(&self.selected_date?)
    }

    pub fn is_scheduled(&self, date: NaiveDate) -> bool {
        self.schedules.contains_key(&date)
    }

    /// Open the detail view for a date. Selecting a date without a schedule
    /// is a no-op and returns false.
    pub fn open_day(&mut self, date: NaiveDate) -> bool {
        if !self.is_scheduled(date) {
            return false;
        }
        self.selected_date = Some(date);
        self.state = NavState::DailyDetail;
        self.focused_task_id = None;
        true
    }

    /// Return to the calendar, dropping any focused task.
    pub fn back(&mut self) {
        self.state = NavState::Calendar;
        self.focused_task_id = None;
    }

    pub fn can_go_next(&self) -> bool {
        self.adjacent_scheduled(1).is_some()
    }

    pub fn can_go_prev(&self) -> bool {
        self.adjacent_scheduled(-1).is_some()
    }

    /// Move to the next calendar date, only when it has a schedule.
    pub fn next_day(&mut self) -> bool {
        self.step(1)
    }

    /// Move to the previous calendar date, only when it has a schedule.
    pub fn prev_day(&mut self) -> bool {
        self.step(-1)
    }

    /// Focus a task of the open day. Rejected outside the detail view and
    /// for ids that are not part of the selected schedule.
    pub fn focus_task(&mut self, task_id: &str) -> bool {
        if self.state != NavState::DailyDetail {
            return false;
        }
        let known = self
            .selected_schedule()
            .map(|s| s.tasks.iter().any(|t| t.id == task_id))
            .unwrap_or(false);
        if !known {
            return false;
        }
        self.focused_task_id = Some(task_id.to_string());
        true
    }

    pub fn clear_focus(&mut self) {
        self.focused_task_id = None;
    }

    /// The focused task, for map recentering on its coordinates.
    pub fn focused_task(&self) -> Option<&WorkTask> {
        let id = self.focused_task_id.as_deref()?;
        self.selected_schedule()?.tasks.iter().find(|t| t.id == id)
    }

    /// Annotate every day of a month with schedule presence.
    pub fn month_days(&self, year: i32, month: u32) -> Vec<MonthDay> {
        let mut days = Vec::new();
        let mut day = 1;
        while let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            if date.month() != month {
                break;
            }
            days.push(MonthDay {
                date,
                has_schedule: self.is_scheduled(date),
            });
            day += 1;
        }
        days
    }

    fn adjacent_scheduled(&self, offset: i64) -> Option<NaiveDate> {
        if self.state != NavState::DailyDetail {
            return None;
        }
        let date = self.selected_date? + chrono::Duration::days(offset);
        self.is_scheduled(date).then_some(date)
    }

    fn step(&mut self, offset: i64) -> bool {
        match self.adjacent_scheduled(offset) {
            Some(date) => {
                self.selected_date = Some(date);
                self.focused_task_id = None;
                true
            }
            None => false,
        }
    }
}
