//! Work order accessor.
//!
//! GET    /work-orders       - List work orders (optional `status`, `priority`)
//! GET    /work-orders/{id}  - Retrieve a work order by row id
//! POST   /work-orders       - Create a work order
//! PUT    /work-orders/{id}  - Replace a work order
//! DELETE /work-orders/{id}  - Delete a work order

use crate::models::{WorkOrder, WorkOrderQuery};

use super::Resource;

impl Resource for WorkOrder {
    const PATH: &'static str = "/work-orders";
    const NAME: &'static str = "work order";
    type Query = WorkOrderQuery;
}
