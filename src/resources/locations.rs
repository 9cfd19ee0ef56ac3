//! Location accessor.
//!
//! GET    /locations       - List locations
//! GET    /locations/{id}  - Retrieve a location by row id
//! POST   /locations       - Create a location
//! PUT    /locations/{id}  - Replace a location
//! DELETE /locations/{id}  - Delete a location

use crate::models::{Location, NoQuery};

use super::Resource;

impl Resource for Location {
    const PATH: &'static str = "/locations";
    const NAME: &'static str = "location";
    type Query = NoQuery;
}
