//! Application events and the observer registry.
//!
//! Notable state changes produce an [`Event`]. The [`EventBus`] is an
//! explicit registry owned by the composition root (the CLI); there is no
//! process-global bus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::itinerary::{TaskStatus, WorkPlanStatus};

/// Every notable state change in the system produces an Event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A plan was submitted and created on the scheduling service.
    PlanCreated {
        plan_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    PlanStatusChanged {
        plan_id: String,
        status: WorkPlanStatus,
        at: DateTime<Utc>,
    },
    TaskStatusChanged {
        task_id: String,
        status: TaskStatus,
        at: DateTime<Utc>,
    },
    /// The draft snapshot was written after a form mutation.
    DraftSaved {
        at: DateTime<Utc>,
    },
    /// The draft snapshot was removed (submit or explicit reset).
    DraftCleared {
        at: DateTime<Utc>,
    },
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
pub type SubscriberId = u64;

type Callback = Box<dyn Fn(&Event) + Send>;

/// Fan-out registry for [`Event`]s.
#[derive(Default)]
pub struct EventBus {
    next_id: SubscriberId,
    subscribers: Vec<(SubscriberId, Callback)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; the returned id can later be passed to
    /// [`EventBus::unsubscribe`].
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: Fn(&Event) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove an observer. Returns false for ids that are not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every observer, in subscription order.
    pub fn publish(&self, event: &Event) {
        for (_, callback) in &self.subscribers {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
