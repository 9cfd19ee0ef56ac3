//! View-model filters.
//!
//! Pure predicates that narrow a cached entity list to the rows a view shows.
//! Every criterion is independent and the criteria are ANDed, so the result
//! does not depend on evaluation order and re-applying a filter to its own
//! output changes nothing. Unset or empty criteria match everything.
//!
//! Filters always run over the complete cached list; there is no incremental
//! maintenance of the filtered subset.

use std::collections::BTreeSet;

use crate::models::{Asset, AssetStatus, InventoryItem, WorkOrder, WorkOrderPriority, WorkOrderStatus};

/// A set of display criteria for items of type `T`.
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    /// Items that satisfy every criterion, in source order.
    fn apply(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items.iter().filter(|item| self.matches(item)).cloned().collect()
    }
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// ============================================================================
// Assets
// ============================================================================

/// Criteria of the asset list: free-text search, then status, then category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFilter {
    /// Matched against name, asset ID and category.
    pub search: Option<String>,
    pub status: Option<AssetStatus>,
    /// Exact category match.
    pub category: Option<String>,
}

impl AssetFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn status(status: AssetStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

impl ListFilter<Asset> for AssetFilter {
    fn matches(&self, asset: &Asset) -> bool {
        if let Some(term) = non_empty(&self.search) {
            let hit = contains_ignore_case(&asset.name, term)
                || contains_ignore_case(&asset.asset_id, term)
                || contains_ignore_case(&asset.category, term);
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status {
            if asset.status != status {
                return false;
            }
        }

        match non_empty(&self.category) {
            Some(category) => asset.category == category,
            None => true,
        }
    }
}

/// Sorted, de-duplicated categories present in `assets` (the category picker).
pub fn categories(assets: &[Asset]) -> Vec<String> {
    assets
        .iter()
        .map(|asset| asset.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// Work Orders
// ============================================================================

/// Criteria of the work order list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkOrderFilter {
    pub status: Option<WorkOrderStatus>,
    pub priority: Option<WorkOrderPriority>,
}

impl ListFilter<WorkOrder> for WorkOrderFilter {
    fn matches(&self, wo: &WorkOrder) -> bool {
        self.status.map_or(true, |status| wo.status == status)
            && self.priority.map_or(true, |priority| wo.priority == priority)
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// Criteria of the inventory list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    /// Matched against item name and part number.
    pub search: Option<String>,
    /// Only items at or below their minimum stock.
    pub low_stock_only: bool,
}

impl ListFilter<InventoryItem> for InventoryFilter {
    fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(term) = non_empty(&self.search) {
            if !contains_ignore_case(&item.item_name, term)
                && !contains_ignore_case(&item.part_number, term)
            {
                return false;
            }
        }
        !self.low_stock_only || item.is_low_stock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(asset_id: &str, name: &str, category: &str, status: AssetStatus) -> Asset {
        Asset {
            status,
            ..Asset::new(asset_id, name, category)
        }
    }

    fn pump_and_valve() -> Vec<Asset> {
        vec![
            asset("A1", "Pump", "Mech", AssetStatus::Active),
            asset("A2", "Valve", "Mech", AssetStatus::Retired),
        ]
    }

    fn ids(assets: &[Asset]) -> Vec<&str> {
        assets.iter().map(|a| a.asset_id.as_str()).collect()
    }

    #[test]
    fn status_filter_selects_active_asset() {
        let shown = AssetFilter::status(AssetStatus::Active).apply(&pump_and_valve());
        assert_eq!(ids(&shown), vec!["A1"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let shown = AssetFilter::search("valve").apply(&pump_and_valve());
        assert_eq!(ids(&shown), vec!["A2"]);
    }

    #[test]
    fn search_covers_asset_id_and_category() {
        let assets = vec![
            asset("PMP-001", "Feed pump", "Hydraulics", AssetStatus::Active),
            asset("CMP-002", "Compressor", "Pneumatics", AssetStatus::Active),
        ];
        assert_eq!(ids(&AssetFilter::search("pmp").apply(&assets)), vec!["PMP-001"]);
        assert_eq!(ids(&AssetFilter::search("PNEU").apply(&assets)), vec!["CMP-002"]);
    }

    #[test]
    fn empty_criteria_match_everything() {
        let filter = AssetFilter {
            search: Some(String::new()),
            status: None,
            category: Some(String::new()),
        };
        assert_eq!(filter.apply(&pump_and_valve()).len(), 2);
    }

    #[test]
    fn category_is_an_exact_match() {
        let assets = vec![
            asset("A1", "Pump", "Mech", AssetStatus::Active),
            asset("A2", "Drive", "Mechanical", AssetStatus::Active),
        ];
        assert_eq!(ids(&AssetFilter::category("Mech").apply(&assets)), vec!["A1"]);
    }

    #[test]
    fn combined_criteria_are_anded() {
        let filter = AssetFilter {
            search: Some("a".into()),
            status: Some(AssetStatus::Retired),
            category: Some("Mech".into()),
        };
        assert_eq!(ids(&filter.apply(&pump_and_valve())), vec!["A2"]);
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let assets = vec![
            asset("A1", "Pump", "Mech", AssetStatus::Active),
            asset("A2", "Panel", "Electrical", AssetStatus::Active),
            asset("A3", "Valve", "Mech", AssetStatus::Active),
        ];
        assert_eq!(categories(&assets), vec!["Electrical", "Mech"]);
    }

    #[test]
    fn work_order_filter_matches_status_and_priority() {
        let mut urgent = WorkOrder::new("WO-1", "Fix leak");
        urgent.priority = WorkOrderPriority::Critical;
        let mut routine = WorkOrder::new("WO-2", "Grease bearings");
        routine.status = WorkOrderStatus::Completed;
        routine.priority = WorkOrderPriority::Low;
        let orders = vec![urgent, routine];

        let open = WorkOrderFilter {
            status: Some(WorkOrderStatus::Open),
            priority: None,
        };
        assert_eq!(open.apply(&orders)[0].wo_number, "WO-1");

        let low_open = WorkOrderFilter {
            status: Some(WorkOrderStatus::Open),
            priority: Some(WorkOrderPriority::Low),
        };
        assert!(low_open.apply(&orders).is_empty());
    }

    #[test]
    fn inventory_filter_restricts_to_low_stock() {
        let mut low = InventoryItem::new("Seal kit", "SK-10");
        low.stock_on_hand = 10;
        low.min_stock = 10;
        let mut plenty = InventoryItem::new("Filter", "FL-20");
        plenty.stock_on_hand = 11;
        plenty.min_stock = 10;
        let items = vec![low, plenty];

        let filter = InventoryFilter {
            search: None,
            low_stock_only: true,
        };
        let shown = filter.apply(&items);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].part_number, "SK-10");

        let by_part = InventoryFilter {
            search: Some("fl-".into()),
            low_stock_only: false,
        };
        assert_eq!(by_part.apply(&items)[0].item_name, "Filter");
    }
}
