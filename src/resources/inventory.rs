//! Inventory accessor.
//!
//! GET    /inventory       - List inventory items
//! GET    /inventory/{id}  - Retrieve an inventory item by row id
//! POST   /inventory       - Create an inventory item
//! PUT    /inventory/{id}  - Replace an inventory item
//! DELETE /inventory/{id}  - Delete an inventory item

use crate::models::{InventoryItem, NoQuery};

use super::Resource;

impl Resource for InventoryItem {
    const PATH: &'static str = "/inventory";
    const NAME: &'static str = "inventory item";
    type Query = NoQuery;
}
