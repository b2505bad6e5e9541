//! Text tables for the terminal.

use analytics::{Connection, CustomerStat, ProductStat, SalesSummary, TrendPoint};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::{Customer, Order, Product};
use store::RecordStore;

fn table<const N: usize>(header: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

pub fn customers<'a>(customers: impl IntoIterator<Item = &'a Customer>) -> Table {
    let mut out = table(["ID", "Name", "Email", "Phone", "Address"]);
    for c in customers {
        out.add_row(vec![
            number(c.customer_id),
            Cell::new(&c.name),
            Cell::new(&c.email),
            Cell::new(&c.phone),
            Cell::new(&c.address),
        ]);
    }
    out
}

pub fn products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Table {
    let mut out = table(["ID", "Name", "Category", "Price", "Stock"]);
    for p in products {
        out.add_row(vec![
            number(p.product_id),
            Cell::new(&p.name),
            Cell::new(&p.category),
            number(p.price),
            number(p.stock),
        ]);
    }
    out
}

pub fn orders<'a>(orders: impl IntoIterator<Item = &'a Order>, store: &RecordStore) -> Table {
    let mut out = table(["ID", "Date", "Customer", "Lines", "Units", "Total"]);
    for o in orders {
        let customer = store
            .get_customer(o.customer_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|_| format!("#{}", o.customer_id));
        out.add_row(vec![
            number(o.order_id),
            Cell::new(o.date.format("%Y-%m-%d %H:%M")),
            Cell::new(customer),
            number(o.items.len()),
            number(o.unit_count()),
            number(o.total_amount()),
        ]);
    }
    out
}

/// The line items of one order, with a closing total row.
pub fn order_lines(order: &Order, store: &RecordStore) -> Table {
    let mut out = table(["Product", "Name", "Quantity", "Unit price", "Line total"]);
    for item in &order.items {
        let name = store
            .get_product(item.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        out.add_row(vec![
            number(item.product_id),
            Cell::new(name),
            number(item.quantity),
            number(item.price),
            number(item.total_price()),
        ]);
    }
    out.add_row(vec![
        Cell::new("Total"),
        Cell::new(""),
        number(order.unit_count()),
        Cell::new(""),
        number(order.total_amount()),
    ]);
    out
}

pub fn summary(summary: &SalesSummary) -> Table {
    let mut out = table(["Metric", "Value"]);
    out.add_row(vec![Cell::new("Orders"), number(summary.order_count)]);
    out.add_row(vec![Cell::new("Customers"), number(summary.distinct_customers)]);
    out.add_row(vec![Cell::new("Units sold"), number(summary.items_sold)]);
    out.add_row(vec![Cell::new("Revenue"), number(summary.total_revenue)]);
    out.add_row(vec![
        Cell::new("Average order"),
        number(summary.average_order_value),
    ]);
    out
}

pub fn product_stats(stats: &[ProductStat]) -> Table {
    let mut out = table(["#", "ID", "Product", "Units", "Revenue"]);
    for (rank, s) in stats.iter().enumerate() {
        out.add_row(vec![
            number(rank + 1),
            number(s.product_id),
            Cell::new(&s.name),
            number(s.quantity),
            number(s.revenue),
        ]);
    }
    out
}

pub fn customer_stats(stats: &[CustomerStat]) -> Table {
    let mut out = table(["#", "ID", "Customer", "Orders", "Spent"]);
    for (rank, s) in stats.iter().enumerate() {
        out.add_row(vec![
            number(rank + 1),
            number(s.customer_id),
            Cell::new(&s.name),
            number(s.order_count),
            number(s.total_spent),
        ]);
    }
    out
}

pub fn trend(points: &[TrendPoint]) -> Table {
    let mut out = table(["Period start", "Orders", "Revenue"]);
    for p in points {
        out.add_row(vec![
            Cell::new(p.period_start),
            number(p.order_count),
            number(p.revenue),
        ]);
    }
    out
}

pub fn connections(edges: &[Connection], store: &RecordStore) -> Table {
    let name = |id| {
        store
            .get_customer(id)
            .map(|c| c.name.clone())
            .unwrap_or_default()
    };
    let mut out = table(["Customer", "Customer", "Shared products"]);
    for edge in edges {
        out.add_row(vec![
            Cell::new(format!("{} ({})", name(edge.a), edge.a)),
            Cell::new(format!("{} ({})", name(edge.b), edge.b)),
            number(edge.shared_products),
        ]);
    }
    out
}
