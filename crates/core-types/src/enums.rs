use serde::{Deserialize, Serialize};
use std::fmt;

/// The three record collections. Used in error messages and as the
/// selector for single-collection import/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[cfg_attr(feature = "clap", value(alias = "customers"))]
    Customer,
    #[cfg_attr(feature = "clap", value(alias = "products"))]
    Product,
    #[cfg_attr(feature = "clap", value(alias = "orders"))]
    Order,
}

impl EntityKind {
    /// File stem used when a collection is written to its own file.
    pub fn file_stem(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::Product => "products",
            EntityKind::Order => "orders",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Customer => "Customer",
            EntityKind::Product => "Product",
            EntityKind::Order => "Order",
        };
        f.write_str(name)
    }
}

/// Granularity of a sales trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Day,
    #[default]
    Week,
    Month,
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendPeriod::Day => "day",
            TrendPeriod::Week => "week",
            TrendPeriod::Month => "month",
        };
        f.write_str(name)
    }
}

/// Metric used to rank products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    #[default]
    Quantity,
    Revenue,
}
