//! Domain models for the maintenance API.
//!
//! These structs mirror the JSON records exchanged with the backend. Fields the
//! server stamps (`id`, timestamps) are optional on the client and are left out
//! of request bodies when unset. Optional client fields are likewise omitted
//! rather than sent as `null`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::{RequestError, RequestResult};

// ============================================================================
// Enumerations
// ============================================================================

/// Declares a closed set of wire strings with `as_str`, `Display` and a
/// forgiving `FromStr` (case, spaces, dashes and underscores are ignored).
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = fold_enum_key(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|candidate| fold_enum_key(candidate.as_str()) == wanted)
                    .ok_or_else(|| {
                        let choices: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown value '{}', expected one of: {}", s, choices.join(", "))
                    })
            }
        }
    };
}

fn fold_enum_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

wire_enum! {
    /// Lifecycle state of an asset.
    #[derive(Default)]
    pub enum AssetStatus {
        #[default]
        Active => "Active",
        Inactive => "Inactive",
        InMaintenance => "In Maintenance",
        Retired => "Retired",
    }
}

wire_enum! {
    #[derive(Default)]
    pub enum WorkOrderStatus {
        #[default]
        Open => "Open",
        InProgress => "In Progress",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

wire_enum! {
    #[derive(Default, PartialOrd, Ord)]
    pub enum WorkOrderPriority {
        Low => "Low",
        #[default]
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

wire_enum! {
    /// Unit of a PM template's recurrence interval.
    #[derive(Default)]
    pub enum FrequencyUnit {
        #[default]
        Days => "Days",
        Hours => "Hours",
        Months => "Months",
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Parse a server timestamp. Offsets are converted to UTC and a bare date
/// means midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .or_else(|_| value.parse::<NaiveDateTime>())
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| value.parse::<NaiveDate>().ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(raw.trim())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid datetime '{}'", raw))),
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<NaiveDate>()
            .ok()
            .or_else(|| parse_timestamp(raw.trim()).map(|dt| dt.date()))
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", raw))),
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A node in the location hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

/// A tracked piece of equipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Business key, unique across assets.
    pub asset_id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_cost_center: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_reading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Asset {
    pub fn new(asset_id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Copy of the asset with blank optional text fields cleared, as submitted
    /// by the asset form.
    pub fn normalized(&self) -> Self {
        Self {
            owner_cost_center: non_blank(&self.owner_cost_center),
            vendor: non_blank(&self.vendor),
            serial_number: non_blank(&self.serial_number),
            tag_id: non_blank(&self.tag_id),
            notes: non_blank(&self.notes),
            ..self.clone()
        }
    }
}

/// A unit of maintenance work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Business key, unique across work orders.
    pub wo_number: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: WorkOrderPriority,
    #[serde(default)]
    pub status: WorkOrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub time_spent_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
    /// Set when the work order was generated from a PM template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm_template_id: Option<i64>,
}

impl WorkOrder {
    pub fn new(wo_number: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            wo_number: wo_number.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }
}

/// A stocked spare part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub item_name: String,
    /// Business key, unique across inventory items.
    pub part_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub stock_on_hand: i32,
    #[serde(default)]
    pub min_stock: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl InventoryItem {
    pub fn new(item_name: impl Into<String>, part_number: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            part_number: part_number.into(),
            ..Self::default()
        }
    }

    /// Stock is low when it is at or below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.stock_on_hand <= self.min_stock
    }

    /// Units above (positive) or below (negative) the minimum.
    pub fn stock_difference(&self) -> i32 {
        self.stock_on_hand - self.min_stock
    }

    /// Value of the stock on hand, when a unit cost is known.
    pub fn total_value(&self) -> Option<f64> {
        self.unit_cost.map(|cost| f64::from(self.stock_on_hand) * cost)
    }
}

/// A preventive-maintenance recurrence rule that generates work orders for one asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PmTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency_value: i32,
    #[serde(default)]
    pub frequency_unit: FrequencyUnit,
    /// Row id of the asset (not its business key).
    pub asset_id: i64,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub last_generated_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDateTime>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub wo_summary_template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wo_description_template: Option<String>,
    #[serde(default)]
    pub default_priority: WorkOrderPriority,
    #[serde(default, deserialize_with = "lenient_datetime", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

/// Server-side aggregate counts for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_assets: u32,
    pub active_assets: u32,
    pub total_work_orders: u32,
    pub open_work_orders: u32,
    pub in_progress_work_orders: u32,
    pub low_stock_items: u32,
    pub due_pms_next_7_days: u32,
}

/// Response of the PM work-order generation endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedWorkOrders {
    pub generated_count: u32,
}

// ============================================================================
// Required-field validation
// ============================================================================

/// Local required-field check run before a form is submitted.
pub trait Validate {
    fn validate(&self) -> RequestResult<()>;
}

fn require(fields: &[&str], message: &str) -> RequestResult<()> {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return Err(RequestError::Validation(message.to_string()));
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl Validate for Asset {
    fn validate(&self) -> RequestResult<()> {
        require(
            &[self.asset_id.as_str(), self.name.as_str(), self.category.as_str()],
            "Please fill in all required fields (Asset ID, Name, Category, Status)",
        )
    }
}

// ============================================================================
// Query Parameters (server-side list filters)
// ============================================================================

/// Encodes itself as URL query pairs; unset or empty values are omitted.
pub trait QueryParams {
    fn to_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Filters accepted by `GET /assets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetQuery {
    pub status: Option<AssetStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Filters accepted by `GET /work-orders`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkOrderQuery {
    pub status: Option<WorkOrderStatus>,
    pub priority: Option<WorkOrderPriority>,
}

/// Query for collections that take no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoQuery;

fn push_param(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

impl QueryParams for AssetQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_param(&mut pairs, "status", self.status.map(|s| s.as_str()));
        push_param(&mut pairs, "category", self.category.as_deref());
        push_param(&mut pairs, "search", self.search.as_deref());
        pairs
    }
}

impl QueryParams for WorkOrderQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_param(&mut pairs, "status", self.status.map(|s| s.as_str()));
        push_param(&mut pairs, "priority", self.priority.map(|p| p.as_str()));
        pairs
    }
}

impl QueryParams for NoQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
