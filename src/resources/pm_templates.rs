//! Preventive-maintenance template accessor.
//!
//! GET    /pm-templates                       - List PM templates
//! GET    /pm-templates/{id}                  - Retrieve a PM template by row id
//! POST   /pm-templates                       - Create a PM template
//! PUT    /pm-templates/{id}                  - Replace a PM template
//! DELETE /pm-templates/{id}                  - Delete a PM template
//! POST   /pm-templates/generate-work-orders  - Generate work orders for due templates

use reqwest::Method;
use tracing::info;

use crate::client::RequestOptions;
use crate::error::RequestResult;
use crate::models::{GeneratedWorkOrders, NoQuery, PmTemplate};

use super::{Accessor, Resource};

impl Resource for PmTemplate {
    const PATH: &'static str = "/pm-templates";
    const NAME: &'static str = "PM template";
    type Query = NoQuery;
}

impl Accessor<'_, PmTemplate> {
    /// Ask the server to create work orders for every due, active template.
    pub async fn generate_work_orders(&self) -> RequestResult<GeneratedWorkOrders> {
        let endpoint = format!("{}/generate-work-orders", PmTemplate::PATH);
        let generated: GeneratedWorkOrders = self
            .client()
            .request(&endpoint, RequestOptions::method(Method::POST))
            .await?;
        info!("Generated {} work orders from PM templates", generated.generated_count);
        Ok(generated)
    }
}
