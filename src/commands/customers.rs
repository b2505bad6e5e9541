use super::Outcome;
use crate::cli::{CustomerChanges, CustomerCommand, NewCustomer};
use crate::render;
use anyhow::Result;
use core_types::{Customer, Email, Phone};
use std::io::Write;
use store::RecordStore;

pub fn run(
    command: CustomerCommand,
    store: &mut RecordStore,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        CustomerCommand::Add(args) => add(args, store, out),
        CustomerCommand::List => {
            writeln!(out, "{}", render::customers(store.customers()))?;
            Ok(Outcome::Unchanged)
        }
        CustomerCommand::Show { id } => {
            let customer = store.get_customer(id)?;
            writeln!(out, "{}", render::customers([customer]))?;
            let orders: Vec<_> = store.orders_for_customer(id).collect();
            if orders.is_empty() {
                writeln!(out, "No orders.")?;
            } else {
                writeln!(out, "{}", render::orders(orders, store))?;
            }
            Ok(Outcome::Unchanged)
        }
        CustomerCommand::Edit(changes) => edit(changes, store, out),
        CustomerCommand::Remove { id } => {
            let removed = store.remove_customer(id)?;
            writeln!(out, "Removed customer {} ({}).", removed.customer_id, removed.name)?;
            Ok(Outcome::Changed)
        }
        CustomerCommand::Search { query } => {
            let hits = store.search_customers(&query);
            if hits.is_empty() {
                writeln!(out, "No customers match '{query}'.")?;
            } else {
                writeln!(out, "{}", render::customers(hits))?;
            }
            Ok(Outcome::Unchanged)
        }
    }
}

fn add(args: NewCustomer, store: &mut RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let id = args.id.unwrap_or_else(|| store.next_customer_id());
    let customer = Customer::new(id, &args.name, &args.email, &args.phone, &args.address)?;
    let added = store.add_customer(customer)?;
    writeln!(out, "Added customer {} ({}).", added.customer_id, added.name)?;
    Ok(Outcome::Changed)
}

fn edit(changes: CustomerChanges, store: &mut RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let mut customer = store.get_customer(changes.id)?.clone();
    if let Some(name) = changes.name {
        customer.name = name.trim().to_string();
    }
    if let Some(email) = changes.email {
        customer.email = Email::parse(&email)?;
    }
    if let Some(phone) = changes.phone {
        customer.phone = Phone::parse(&phone)?;
    }
    if let Some(address) = changes.address {
        customer.address = address.trim().to_string();
    }
    let updated = store.update_customer(customer)?;
    writeln!(out, "Updated customer {}.", updated.customer_id)?;
    Ok(Outcome::Changed)
}
