use super::Outcome;
use crate::cli::ReportCommand;
use crate::render;
use analytics::AnalyticsEngine;
use anyhow::{Result, ensure};
use configuration::Config;
use std::io::Write;
use store::RecordStore;

pub fn run(
    command: ReportCommand,
    store: &RecordStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let engine = AnalyticsEngine::new();
    match command {
        ReportCommand::Summary(range) => {
            let summary = engine.summarize(store.orders(), &range.resolve()?)?;
            writeln!(out, "{}", render::summary(&summary))?;
        }
        ReportCommand::TopProducts { limit, by, range } => {
            let n = top_n(limit, config)?;
            let stats =
                engine.top_products(store.orders(), store.products(), n, by, &range.resolve()?)?;
            writeln!(out, "{}", render::product_stats(&stats))?;
        }
        ReportCommand::TopCustomers { limit, range } => {
            let n = top_n(limit, config)?;
            let stats =
                engine.top_customers(store.orders(), store.customers(), n, &range.resolve()?)?;
            writeln!(out, "{}", render::customer_stats(&stats))?;
        }
        ReportCommand::Trend { period, range } => {
            let period = period.unwrap_or(config.analytics.trend_period);
            let points = engine.sales_trend(store.orders(), period, &range.resolve()?)?;
            if points.is_empty() {
                writeln!(out, "No orders in range.")?;
            } else {
                writeln!(out, "Sales by {period}")?;
                writeln!(out, "{}", render::trend(&points))?;
            }
        }
        ReportCommand::Connections => {
            let graph = engine.customer_connections(store.orders(), store.customers())?;
            let edges = graph.connections();
            if edges.is_empty() {
                writeln!(out, "No customers share a product.")?;
            } else {
                writeln!(out, "{}", render::connections(&edges, store))?;
            }
            let linked: usize = graph
                .nodes()
                .filter(|n| !graph.neighbours(n.customer_id).is_empty())
                .count();
            writeln!(
                out,
                "{} of {} customers are connected.",
                linked,
                graph.node_count()
            )?;
        }
    }
    Ok(Outcome::Unchanged)
}

fn top_n(limit: Option<usize>, config: &Config) -> Result<usize> {
    let n = limit.unwrap_or(config.analytics.top_n);
    ensure!(n > 0, "--limit must be at least 1");
    Ok(n)
}
