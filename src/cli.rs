use analytics::{AnalyticsError, DateRange};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use core_types::{CustomerId, EntityKind, OrderId, ProductId, RankBy, TrendPeriod};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Manage customers, products and orders, and report on sales.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file. Defaults to ./orderdesk.toml when it exists.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the record files. Overrides `storage.data_dir`.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add, edit, remove and look up customers.
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Manage the product catalog and stock.
    #[command(subcommand)]
    Product(ProductCommand),
    /// Place, inspect, edit and cancel orders.
    #[command(subcommand)]
    Order(OrderCommand),
    /// Sales reports.
    #[command(subcommand)]
    Report(ReportCommand),
    /// Write records to a .json file, a .csv file, or a directory of CSV files.
    Export(TransferArgs),
    /// Read records back. A full export replaces everything, a single collection is merged.
    Import(TransferArgs),
}

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    Add(NewCustomer),
    List,
    Show { id: CustomerId },
    Edit(CustomerChanges),
    Remove { id: CustomerId },
    /// Case-insensitive search on name, email and phone.
    Search { query: String },
}

#[derive(Args, Debug)]
pub struct NewCustomer {
    /// Defaults to the next free identifier.
    #[arg(long)]
    pub id: Option<CustomerId>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub address: String,
}

#[derive(Args, Debug)]
pub struct CustomerChanges {
    pub id: CustomerId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    Add(NewProduct),
    List,
    Show { id: ProductId },
    Edit(ProductChanges),
    Remove { id: ProductId },
    /// Case-insensitive search on name and category.
    Search { query: String },
    /// Add units to stock, or remove them with a negative number.
    Restock {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
}

#[derive(Args, Debug)]
pub struct NewProduct {
    /// Defaults to the next free identifier.
    #[arg(long)]
    pub id: Option<ProductId>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub price: Decimal,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value_t = 0)]
    pub stock: u32,
}

#[derive(Args, Debug)]
pub struct ProductChanges {
    pub id: ProductId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub price: Option<Decimal>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub stock: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    Create(NewOrder),
    List {
        /// Only orders of this customer.
        #[arg(long)]
        customer: Option<CustomerId>,
    },
    Show { id: OrderId },
    Edit(OrderChanges),
    /// Delete an order and return its units to stock.
    Remove { id: OrderId },
}

#[derive(Args, Debug)]
pub struct NewOrder {
    /// Defaults to the next free identifier.
    #[arg(long)]
    pub id: Option<OrderId>,
    #[arg(long)]
    pub customer: CustomerId,
    /// A line item as PRODUCT_ID:QUANTITY. Repeat for more lines.
    #[arg(long = "item", required = true)]
    pub items: Vec<LineArg>,
    /// RFC 3339 timestamp. Defaults to now.
    #[arg(long)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub struct OrderChanges {
    pub id: OrderId,
    #[arg(long)]
    pub customer: Option<CustomerId>,
    /// Replaces all lines when given. Products already on the order keep
    /// their original unit price.
    #[arg(long = "item")]
    pub items: Vec<LineArg>,
    #[arg(long)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Revenue, order count, units sold and average order value.
    Summary(RangeArgs),
    TopProducts {
        /// Defaults to `analytics.top_n`.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = RankBy::Quantity)]
        by: RankBy,
        #[command(flatten)]
        range: RangeArgs,
    },
    TopCustomers {
        /// Defaults to `analytics.top_n`.
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Orders and revenue per day, week or month.
    Trend {
        /// Defaults to `analytics.trend_period`.
        #[arg(long, value_enum)]
        period: Option<TrendPeriod>,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Customers who bought the same products.
    Connections,
}

#[derive(Args, Debug, Default)]
pub struct RangeArgs {
    /// First day to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day to include (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl RangeArgs {
    pub fn resolve(&self) -> Result<DateRange, AnalyticsError> {
        DateRange::new(self.from, self.to)
    }
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    pub path: PathBuf,
    /// Restrict the transfer to one collection.
    #[arg(long, value_enum)]
    pub only: Option<EntityKind>,
}

/// `PRODUCT_ID:QUANTITY` as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineArg {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl FromStr for LineArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (product, quantity) = s
            .split_once(':')
            .ok_or_else(|| format!("expected PRODUCT_ID:QUANTITY, got '{s}'"))?;
        let product_id = product
            .parse()
            .map_err(|_| format!("invalid product id '{product}'"))?;
        let quantity = quantity
            .trim()
            .parse()
            .map_err(|_| format!("invalid quantity '{quantity}'"))?;
        Ok(Self {
            product_id,
            quantity,
        })
    }
}
