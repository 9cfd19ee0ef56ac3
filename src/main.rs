//! # Maintenance Console
//!
//! Terminal front end for the maintenance-management API. Each subcommand is
//! one screen of the application: it fetches into a view, applies the view's
//! filters and prints the result as a table (or JSON with `--json`).
//!
//! ## Configuration
//!
//! - `--api-url` or `MAINTENANCE_API_URL` (a `.env` file is honored)
//! - `RUST_LOG` controls log output on stderr

use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use maintenance_console::filters::categories;
use maintenance_console::format;
use maintenance_console::models::{
    Asset, AssetStatus, InventoryItem, WorkOrder, WorkOrderPriority, WorkOrderStatus,
};
use maintenance_console::{
    ApiClient, AssetFilter, ClientConfig, DetailView, InventoryFilter, ListView, ViewState,
    WorkOrderFilter,
};

#[derive(Parser)]
#[command(name = "maintenance-console", about = "Browse assets, work orders and inventory", version)]
struct Cli {
    #[arg(long, global = true, env = "MAINTENANCE_API_URL", help = "Base URL of the maintenance API")]
    api_url: Option<String>,
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate counts
    Dashboard,
    /// List assets
    Assets(AssetArgs),
    /// Show one asset
    Asset { id: i64 },
    /// List work orders
    WorkOrders(WorkOrderArgs),
    /// Show one work order
    WorkOrder { id: i64 },
    /// List inventory items
    Inventory(InventoryArgs),
    /// Show one inventory item
    InventoryItem { id: i64 },
    /// List locations
    Locations,
    /// List preventive-maintenance templates
    PmTemplates,
    /// Generate work orders from due PM templates
    GenerateWorkOrders,
}

#[derive(Args)]
struct AssetArgs {
    #[arg(long, help = "Match name, asset ID or category (case-insensitive)")]
    search: Option<String>,
    #[arg(long)]
    status: Option<AssetStatus>,
    #[arg(long)]
    category: Option<String>,
}

#[derive(Args)]
struct WorkOrderArgs {
    #[arg(long)]
    status: Option<WorkOrderStatus>,
    #[arg(long)]
    priority: Option<WorkOrderPriority>,
}

#[derive(Args)]
struct InventoryArgs {
    #[arg(long, help = "Match item name or part number (case-insensitive)")]
    search: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, help = "Only items at or below minimum stock")]
    low_stock: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maintenance_console=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli
        .api_url
        .as_deref()
        .map(ClientConfig::new)
        .unwrap_or_else(ClientConfig::from_env);
    info!("Using maintenance API at {}", config.base_url);
    let client = ApiClient::new(config);

    match cli.command {
        Commands::Dashboard => show_dashboard(&client, cli.json).await,
        Commands::Assets(args) => list_assets(&client, args, cli.json).await,
        Commands::Asset { id } => show_asset(&client, id, cli.json).await,
        Commands::WorkOrders(args) => list_work_orders(&client, args, cli.json).await,
        Commands::WorkOrder { id } => show_work_order(&client, id, cli.json).await,
        Commands::Inventory(args) => list_inventory(&client, args, cli.json).await,
        Commands::InventoryItem { id } => show_inventory_item(&client, id, cli.json).await,
        Commands::Locations => list_locations(&client, cli.json).await,
        Commands::PmTemplates => list_pm_templates(&client, cli.json).await,
        Commands::GenerateWorkOrders => generate_work_orders(&client, cli.json).await,
    }
}

// ============================================================================
// Screens
// ============================================================================

async fn show_dashboard(client: &ApiClient, json: bool) -> Result<()> {
    let mut view = DetailView::new();
    view.load(client.dashboard().get_stats()).await;
    let stats = loaded(view.state())?;

    if json {
        return print_json(stats);
    }
    print_fields(&[
        ("Total Assets", stats.total_assets.to_string()),
        ("Active Assets", stats.active_assets.to_string()),
        ("Total Work Orders", stats.total_work_orders.to_string()),
        ("Open Work Orders", stats.open_work_orders.to_string()),
        ("In Progress", stats.in_progress_work_orders.to_string()),
        ("Low Stock Items", stats.low_stock_items.to_string()),
        ("PM Due (7 days)", stats.due_pms_next_7_days.to_string()),
    ]);
    Ok(())
}

async fn list_assets(client: &ApiClient, args: AssetArgs, json: bool) -> Result<()> {
    let mut view = ListView::new(AssetFilter {
        search: args.search,
        status: args.status,
        category: args.category,
    });
    view.refresh(&client.assets()).await;
    loaded(view.state())?;
    let assets = view.visible();

    if json {
        return print_json(&assets);
    }
    print_table(
        &["ID", "Asset ID", "Name", "Category", "Status", "Purchase Cost"],
        assets
            .iter()
            .map(|a| {
                vec![
                    id_cell(a.id),
                    a.asset_id.clone(),
                    a.name.clone(),
                    a.category.clone(),
                    a.status.to_string(),
                    format::currency(a.purchase_cost),
                ]
            })
            .collect(),
    );
    println!(
        "\n{} of {} assets (categories: {})",
        assets.len(),
        view.records().len(),
        categories(view.records()).join(", ")
    );
    Ok(())
}

async fn show_asset(client: &ApiClient, id: i64, json: bool) -> Result<()> {
    let mut view = DetailView::new();
    view.load(client.assets().get_by_id(id)).await;
    let asset: &Asset = loaded(view.state())?;

    if json {
        return print_json(asset);
    }
    print_fields(&[
        ("Asset ID", asset.asset_id.clone()),
        ("Name", asset.name.clone()),
        ("Category", asset.category.clone()),
        ("Status", asset.status.to_string()),
        ("Location", id_cell(asset.location_id)),
        ("Cost Center", format::or_dash(asset.owner_cost_center.as_deref()).to_string()),
        ("Vendor", format::or_dash(asset.vendor.as_deref()).to_string()),
        ("Serial Number", format::or_dash(asset.serial_number.as_deref()).to_string()),
        ("Tag ID", format::or_dash(asset.tag_id.as_deref()).to_string()),
        ("Purchase Date", format::date(asset.purchase_date)),
        ("Purchase Cost", format::currency(asset.purchase_cost)),
        ("Warranty Expiry", format::date(asset.warranty_expiry)),
        ("Meter Reading", asset.meter_reading.map_or_else(|| format::EMPTY.to_string(), |m| m.to_string())),
        ("Notes", format::or_dash(asset.notes.as_deref()).to_string()),
        ("Created", format::datetime(asset.created_at)),
        ("Updated", format::datetime(asset.updated_at)),
    ]);
    Ok(())
}

async fn list_work_orders(client: &ApiClient, args: WorkOrderArgs, json: bool) -> Result<()> {
    let mut view = ListView::new(WorkOrderFilter {
        status: args.status,
        priority: args.priority,
    });
    view.refresh(&client.work_orders()).await;
    loaded(view.state())?;
    let orders = view.visible();

    if json {
        return print_json(&orders);
    }
    print_table(
        &["WO Number", "Summary", "Priority", "Status", "Technician", "Due Date"],
        orders
            .iter()
            .map(|wo| {
                vec![
                    wo.wo_number.clone(),
                    wo.summary.clone(),
                    wo.priority.to_string(),
                    wo.status.to_string(),
                    format::or_dash(wo.technician.as_deref()).to_string(),
                    format::datetime(wo.due_date),
                ]
            })
            .collect(),
    );
    Ok(())
}

async fn show_work_order(client: &ApiClient, id: i64, json: bool) -> Result<()> {
    let mut view = DetailView::new();
    view.load(client.work_orders().get_by_id(id)).await;
    let wo: &WorkOrder = loaded(view.state())?;

    if json {
        return print_json(wo);
    }
    print_fields(&[
        ("WO Number", wo.wo_number.clone()),
        ("Summary", wo.summary.clone()),
        ("Description", format::or_dash(wo.description.as_deref()).to_string()),
        ("Priority", wo.priority.to_string()),
        ("Status", wo.status.to_string()),
        ("Technician", format::or_dash(wo.technician.as_deref()).to_string()),
        ("Due Date", format::datetime(wo.due_date)),
        ("Time Spent", format::hours(wo.time_spent_hours)),
        ("Completion Notes", format::or_dash(wo.completion_notes.as_deref()).to_string()),
        ("PM Template", id_cell(wo.pm_template_id)),
        ("Created", format::datetime(wo.created_at)),
        ("Started", format::datetime(wo.started_at)),
        ("Completed", format::datetime(wo.completed_at)),
    ]);
    Ok(())
}

async fn list_inventory(client: &ApiClient, args: InventoryArgs, json: bool) -> Result<()> {
    let mut view = ListView::new(InventoryFilter {
        search: args.search,
        low_stock_only: args.low_stock,
    });
    view.refresh(&client.inventory()).await;
    loaded(view.state())?;
    let items = view.visible();

    if json {
        return print_json(&items);
    }
    print_table(
        &["Part Number", "Item", "On Hand", "Min", "Max", "Unit Cost", ""],
        items
            .iter()
            .map(|item| {
                vec![
                    item.part_number.clone(),
                    item.item_name.clone(),
                    item.stock_on_hand.to_string(),
                    item.min_stock.to_string(),
                    item.max_stock.map_or_else(|| format::EMPTY.to_string(), |m| m.to_string()),
                    format::currency(item.unit_cost),
                    low_stock_badge(item).to_string(),
                ]
            })
            .collect(),
    );
    Ok(())
}

async fn show_inventory_item(client: &ApiClient, id: i64, json: bool) -> Result<()> {
    let mut view = DetailView::new();
    view.load(client.inventory().get_by_id(id)).await;
    let item: &InventoryItem = loaded(view.state())?;

    if json {
        return print_json(item);
    }
    print_fields(&[
        ("Part Number", item.part_number.clone()),
        ("Item", item.item_name.clone()),
        ("Description", format::or_dash(item.description.as_deref()).to_string()),
        ("Stock On Hand", format!("{} {}", item.stock_on_hand, low_stock_badge(item))),
        ("Minimum Stock", item.min_stock.to_string()),
        ("Above Minimum", format!("{:+}", item.stock_difference())),
        ("Maximum Stock", item.max_stock.map_or_else(|| format::EMPTY.to_string(), |m| m.to_string())),
        ("Unit Cost", format::currency(item.unit_cost)),
        ("Total Value", format::currency(item.total_value())),
        ("Created", format::datetime(item.created_at)),
        ("Updated", format::datetime(item.updated_at)),
    ]);
    Ok(())
}

async fn list_locations(client: &ApiClient, json: bool) -> Result<()> {
    let locations = client.locations().get_all().await?;

    if json {
        return print_json(&locations);
    }
    print_table(
        &["ID", "Name", "Parent", "Description"],
        locations
            .iter()
            .map(|loc| {
                vec![
                    id_cell(loc.id),
                    loc.name.clone(),
                    id_cell(loc.parent_id),
                    format::or_dash(loc.description.as_deref()).to_string(),
                ]
            })
            .collect(),
    );
    Ok(())
}

async fn list_pm_templates(client: &ApiClient, json: bool) -> Result<()> {
    let templates = client.pm_templates().get_all().await?;

    if json {
        return print_json(&templates);
    }
    print_table(
        &["ID", "Name", "Asset", "Every", "Next Due", "Active"],
        templates
            .iter()
            .map(|pm| {
                vec![
                    id_cell(pm.id),
                    pm.name.clone(),
                    pm.asset_id.to_string(),
                    format!("{} {}", pm.frequency_value, pm.frequency_unit),
                    format::datetime(pm.next_due_date),
                    if pm.is_active { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect(),
    );
    Ok(())
}

async fn generate_work_orders(client: &ApiClient, json: bool) -> Result<()> {
    let generated = client.pm_templates().generate_work_orders().await?;
    if json {
        return print_json(&generated);
    }
    println!("Generated {} work orders", generated.generated_count);
    Ok(())
}

// ============================================================================
// Rendering helpers
// ============================================================================

/// The loaded data of a view, or its error message as the command's failure.
fn loaded<T>(state: &ViewState<T>) -> Result<&T> {
    match state {
        ViewState::Loaded(data) => Ok(data),
        ViewState::Failed(message) => Err(anyhow!("{}", message)),
        ViewState::Loading => Err(anyhow!("No data loaded")),
    }
}

fn low_stock_badge(item: &InventoryItem) -> &'static str {
    if item.is_low_stock() {
        "LOW STOCK"
    } else {
        ""
    }
}

fn id_cell(id: Option<i64>) -> String {
    id.map_or_else(|| format::EMPTY.to_string(), |id| id.to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_fields(fields: &[(&str, String)]) {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in fields {
        println!("{:<width$}  {}", label, value, width = width);
    }
}

fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    if rows.is_empty() {
        println!("No matching records.");
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(headers.to_vec()));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    println!("{}", rule.join("  "));
    for row in &rows {
        println!("{}", render(row.iter().map(String::as_str).collect()));
    }
}
