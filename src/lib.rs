//! # Maintenance Console Library
//!
//! Client for a maintenance-management REST API: assets, work orders,
//! inventory, preventive-maintenance templates, locations and dashboard
//! statistics.
//!
//! ## Layers
//!
//! - `client`: transport, one JSON request per call, failures normalized to [`RequestError`]
//! - `resources`: CRUD accessors per entity on top of the transport
//! - `filters`: pure predicates deriving the displayed subset of a cached list
//! - `views`: per-screen state that applies fetch results and discards stale ones
//!
//! ```ignore
//! let client = maintenance_console::ApiClient::new(ClientConfig::from_env());
//! let assets = client.assets().get_all().await?;
//! let active = AssetFilter::status(AssetStatus::Active).apply(&assets);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod models;
pub mod resources;
pub mod views;

pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{RequestError, RequestResult};
pub use filters::{AssetFilter, InventoryFilter, ListFilter, WorkOrderFilter};
pub use resources::{Accessor, Resource};
pub use views::{DetailView, ListView, ViewState};

/// Build a client from the environment (`MAINTENANCE_API_URL`, default `http://localhost:8000`).
pub fn create_client() -> ApiClient {
    ApiClient::new(ClientConfig::from_env())
}
