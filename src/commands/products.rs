use super::Outcome;
use crate::cli::{NewProduct, ProductChanges, ProductCommand};
use crate::render;
use anyhow::Result;
use core_types::Product;
use std::io::Write;
use store::RecordStore;

pub fn run(
    command: ProductCommand,
    store: &mut RecordStore,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        ProductCommand::Add(args) => add(args, store, out),
        ProductCommand::List => {
            writeln!(out, "{}", render::products(store.products()))?;
            Ok(Outcome::Unchanged)
        }
        ProductCommand::Show { id } => {
            let product = store.get_product(id)?;
            writeln!(out, "{}", render::products([product]))?;
            Ok(Outcome::Unchanged)
        }
        ProductCommand::Edit(changes) => edit(changes, store, out),
        ProductCommand::Remove { id } => {
            let removed = store.remove_product(id)?;
            writeln!(out, "Removed product {} ({}).", removed.product_id, removed.name)?;
            Ok(Outcome::Changed)
        }
        ProductCommand::Search { query } => {
            let hits = store.search_products(&query);
            if hits.is_empty() {
                writeln!(out, "No products match '{query}'.")?;
            } else {
                writeln!(out, "{}", render::products(hits))?;
            }
            Ok(Outcome::Unchanged)
        }
        ProductCommand::Restock { id, delta } => {
            let product = store.adjust_stock(id, delta)?;
            writeln!(out, "{} now has {} in stock.", product.name, product.stock)?;
            Ok(Outcome::Changed)
        }
    }
}

fn add(args: NewProduct, store: &mut RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let id = args.id.unwrap_or_else(|| store.next_product_id());
    let product = Product::new(id, &args.name, args.price, &args.category, args.stock)?;
    let added = store.add_product(product)?;
    writeln!(out, "Added product {} ({}) at {}.", added.product_id, added.name, added.price)?;
    Ok(Outcome::Changed)
}

fn edit(changes: ProductChanges, store: &mut RecordStore, out: &mut dyn Write) -> Result<Outcome> {
    let mut product = store.get_product(changes.id)?.clone();
    if let Some(name) = changes.name {
        product.name = name.trim().to_string();
    }
    if let Some(price) = changes.price {
        product.price = price;
    }
    if let Some(category) = changes.category {
        product.category = category.trim().to_string();
    }
    if let Some(stock) = changes.stock {
        product.stock = stock;
    }
    let updated = store.update_product(product)?;
    writeln!(out, "Updated product {}.", updated.product_id)?;
    Ok(Outcome::Changed)
}
