//! Resource accessors: one CRUD façade per entity, built on [`ApiClient`].
//!
//! Each module binds an entity to its base path:
//! - `assets`: `/assets` (server-side `status`, `category`, `search` filters)
//! - `work_orders`: `/work-orders` (server-side `status`, `priority` filters)
//! - `inventory`: `/inventory`
//! - `pm_templates`: `/pm-templates` plus work-order generation
//! - `locations`: `/locations`
//! - `dashboard`: `/stats/dashboard` (read-only)
//!
//! Every accessor call is exactly one HTTP request. Required-field checks belong
//! to form submission (`assets().save`), not to the accessors.

pub mod assets;
pub mod dashboard;
pub mod inventory;
pub mod locations;
pub mod pm_templates;
pub mod work_orders;

use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::client::{ApiClient, RequestOptions};
use crate::error::RequestResult;
use crate::models::{Asset, InventoryItem, Location, PmTemplate, QueryParams, WorkOrder};

pub use dashboard::Dashboard;

/// An entity exposed by the API as a collection with item paths.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Collection path, e.g. `/assets`.
    const PATH: &'static str;
    /// Singular name used in log lines.
    const NAME: &'static str;
    /// Server-side filters accepted by the collection endpoint.
    type Query: QueryParams + Default + Send + Sync;

    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// CRUD operations for one resource type.
pub struct Accessor<'a, R> {
    client: &'a ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Accessor<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Accessor<'_, R> {}

impl<'a, R: Resource> Accessor<'a, R> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &'a ApiClient {
        self.client
    }

    /// Fetch the whole collection without server-side filters.
    pub async fn get_all(&self) -> RequestResult<Vec<R>> {
        self.list(&R::Query::default()).await
    }

    /// Fetch the collection, sending only the filters that are set.
    pub async fn list(&self, query: &R::Query) -> RequestResult<Vec<R>> {
        let options = RequestOptions::get().with_query(query.to_pairs());
        self.client.request(R::PATH, options).await
    }

    pub async fn get_by_id(&self, id: i64) -> RequestResult<R> {
        self.client
            .request(&R::item_path(id), RequestOptions::get())
            .await
    }

    /// POST a new record; the server assigns identity and timestamps.
    pub async fn create(&self, data: &R) -> RequestResult<R> {
        let options = RequestOptions::method(Method::POST).with_json(data)?;
        let created = self.client.request(R::PATH, options).await?;
        info!("Created {}", R::NAME);
        Ok(created)
    }

    /// PUT the full record at `id`.
    pub async fn update(&self, id: i64, data: &R) -> RequestResult<R> {
        let options = RequestOptions::method(Method::PUT).with_json(data)?;
        let updated = self.client.request(&R::item_path(id), options).await?;
        info!("Updated {} {}", R::NAME, id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> RequestResult<()> {
        self.client
            .execute(&R::item_path(id), RequestOptions::method(Method::DELETE))
            .await?;
        info!("Deleted {} {}", R::NAME, id);
        Ok(())
    }
}

impl ApiClient {
    pub fn assets(&self) -> Accessor<'_, Asset> {
        Accessor::new(self)
    }

    pub fn work_orders(&self) -> Accessor<'_, WorkOrder> {
        Accessor::new(self)
    }

    pub fn inventory(&self) -> Accessor<'_, InventoryItem> {
        Accessor::new(self)
    }

    pub fn pm_templates(&self) -> Accessor<'_, PmTemplate> {
        Accessor::new(self)
    }

    pub fn locations(&self) -> Accessor<'_, Location> {
        Accessor::new(self)
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(self)
    }
}
