//! # Fieldplan Core Library
//!
//! This library provides the core business logic for Fieldplan, a work-plan
//! authoring and itinerary tool for retail field operations. It implements a
//! CLI-first philosophy where all operations are available via a standalone
//! CLI binary built on top of this crate.
//!
//! ## Architecture
//!
//! - **Plan authoring**: a typed draft form mutated through immutable
//!   `with_*` updates, step validation, and a deterministic conversion to the
//!   wire payload consumed by the external scheduling service
//! - **Itinerary**: the generated day-by-day schedules, including the
//!   response adapter, the geofence-aware status presentation, and the
//!   calendar navigation state machine
//! - **Storage**: a JSON draft snapshot persisted across sessions plus
//!   TOML-based configuration
//! - **Api**: async REST client for the scheduling service (the route
//!   optimizer itself is server-side and consumed as a black box)
//!
//! ## Key Components
//!
//! - [`WorkPlanFormData`]: the draft plan under construction
//! - [`WorkPlansClient`]: scheduling-service client
//! - [`itinerary::ItineraryNavigator`]: calendar/day-detail state machine
//! - [`Config`]: application configuration management

pub mod api;
pub mod error;
pub mod events;
pub mod geo;
pub mod itinerary;
pub mod plan;
pub mod progress;
pub mod storage;

pub use api::WorkPlansClient;
pub use error::{ApiError, ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::{Event, EventBus};
pub use geo::{distance_meters, is_within_geofence, Coordinates};
pub use itinerary::{
    DailySchedule, TaskStatus, TaskType, UserScheduleDetail, WorkPlanStatus, WorkTask,
};
pub use plan::{Activity, AssignmentMode, Store, StoreActivity, UserRef, WorkPlanFormData};
pub use progress::{format_minutes, worker_progress, WorkerProgress};
pub use storage::{data_dir, Config, DraftStore, FileDraftStore};
