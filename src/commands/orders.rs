use super::Outcome;
use crate::cli::{NewOrder, OrderChanges, OrderCommand};
use crate::render;
use anyhow::Result;
use chrono::Utc;
use core_types::{Order, OrderItem};
use std::io::Write;
use store::RecordStore;

pub fn run(
    command: OrderCommand,
    store: &mut RecordStore,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        OrderCommand::Create(args) => create(args, store, out),
        OrderCommand::List { customer } => {
            let orders: Vec<&Order> = match customer {
                Some(id) => {
                    store.get_customer(id)?;
                    store.orders_for_customer(id).collect()
                }
                None => store.orders().collect(),
            };
            if orders.is_empty() {
                writeln!(out, "No orders.")?;
            } else {
                writeln!(out, "{}", render::orders(orders, store))?;
            }
            Ok(Outcome::Unchanged)
        }
        OrderCommand::Show { id } => {
            let order = store.get_order(id)?;
            let customer = store.get_customer(order.customer_id)?;
            writeln!(
                out,
                "Order {} placed {} by {} ({})",
                order.order_id,
                order.date.format("%Y-%m-%d %H:%M UTC"),
                customer.name,
                customer.customer_id
            )?;
            writeln!(out, "{}", render::order_lines(order, store))?;
            Ok(Outcome::Unchanged)
        }
        OrderCommand::Edit(changes) => edit(changes, store, out),
        OrderCommand::Remove { id } => {
            let removed = store.remove_order(id)?;
            writeln!(
                out,
                "Removed order {}; {} units returned to stock.",
                removed.order_id,
                removed.unit_count()
            )?;
            Ok(Outcome::Changed)
        }
    }
}

/// Prices each line at the product's current price, then places the order.
fn create(args: NewOrder, store: &mut RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let id = args.id.unwrap_or_else(|| store.next_order_id());
    let mut order = Order::new(id, args.customer, args.date.unwrap_or_else(Utc::now));
    for line in &args.items {
        let product = store.get_product(line.product_id)?;
        order.add_item(OrderItem::new(product, line.quantity)?);
    }
    let placed = store.add_order(order)?;
    writeln!(
        out,
        "Placed order {} for customer {}: {} units, total {}.",
        placed.order_id,
        placed.customer_id,
        placed.unit_count(),
        placed.total_amount()
    )?;
    Ok(Outcome::Changed)
}

/// Applies the given changes to an existing order. New lines are priced at
/// the current catalog price unless the product was already on the order.
fn edit(changes: OrderChanges, store: &mut RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let mut order = store.get_order(changes.id)?.clone();
    if let Some(customer) = changes.customer {
        order.customer_id = customer;
    }
    if let Some(date) = changes.date {
        order.date = date;
    }
    if !changes.items.is_empty() {
        let mut items = Vec::with_capacity(changes.items.len());
        for line in &changes.items {
            let previous = order
                .items
                .iter()
                .find(|item| item.product_id == line.product_id);
            let item = match previous {
                Some(kept) => {
                    let item = OrderItem {
                        quantity: line.quantity,
                        ..kept.clone()
                    };
                    item.validate()?;
                    item
                }
                None => OrderItem::new(store.get_product(line.product_id)?, line.quantity)?,
            };
            items.push(item);
        }
        order.items = items;
    }

    let updated = store.update_order(order)?;
    writeln!(
        out,
        "Updated order {} for customer {}: {} units, total {}.",
        updated.order_id,
        updated.customer_id,
        updated.unit_count(),
        updated.total_amount()
    )?;
    Ok(Outcome::Changed)
}
