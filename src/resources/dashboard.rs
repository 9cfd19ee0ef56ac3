//! Dashboard statistics.
//!
//! GET /stats/dashboard - Aggregate counts computed server-side

use crate::client::{ApiClient, RequestOptions};
use crate::error::RequestResult;
use crate::models::DashboardStats;

const STATS_PATH: &str = "/stats/dashboard";

/// Read-only accessor for the dashboard snapshot.
#[derive(Clone, Copy)]
pub struct Dashboard<'a> {
    client: &'a ApiClient,
}

impl<'a> Dashboard<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_stats(&self) -> RequestResult<DashboardStats> {
        self.client.request(STATS_PATH, RequestOptions::get()).await
    }
}
