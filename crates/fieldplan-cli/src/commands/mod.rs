//! Command implementations for the Fieldplan CLI.

pub mod auth;
pub mod config;
pub mod itinerary;
pub mod plan;
pub mod task;
pub mod template;

use fieldplan_core::storage::{token, Config};
use fieldplan_core::{EventBus, WorkPlansClient};

/// Build the scheduling-service client from config plus the stored token.
pub(crate) fn client() -> Result<WorkPlansClient, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut client = WorkPlansClient::new(&config.api.base_url)?;
    if let Some(token) = token::get()? {
        client = client.with_token(token);
    }
    if !config.api.tenant.is_empty() {
        client = client.with_tenant(config.api.tenant);
    }
    Ok(client)
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
    tokio::runtime::Runtime::new()
}

/// Event bus with a single subscriber that forwards events to tracing.
pub(crate) fn logging_bus() -> EventBus {
    let mut bus = EventBus::new();
    bus.subscribe(|event| tracing::info!(?event, "event"));
    bus
}
