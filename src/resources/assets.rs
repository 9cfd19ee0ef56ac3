//! Asset accessor.
//!
//! GET    /assets       - List assets (optional `status`, `category`, `search`)
//! GET    /assets/{id}  - Retrieve an asset by row id
//! POST   /assets       - Create an asset
//! PUT    /assets/{id}  - Replace an asset
//! DELETE /assets/{id}  - Delete an asset

use crate::error::RequestResult;
use crate::models::{Asset, AssetQuery, Validate};

use super::{Accessor, Resource};

impl Resource for Asset {
    const PATH: &'static str = "/assets";
    const NAME: &'static str = "asset";
    type Query = AssetQuery;
}

impl Accessor<'_, Asset> {
    /// Submit the asset form: validate, clear blank optional text, then update
    /// when the asset already has a row id and create otherwise.
    pub async fn save(&self, asset: &Asset) -> RequestResult<Asset> {
        asset.validate()?;
        let payload = Asset {
            id: None,
            created_at: None,
            updated_at: None,
            ..asset.normalized()
        };

        match asset.id {
            Some(id) => self.update(id, &payload).await,
            None => self.create(&payload).await,
        }
    }
}
