//! One handler per top-level command. Handlers write their output to the
//! given writer and report whether the store needs saving.

mod customers;
mod orders;
mod products;
mod reports;
mod transfer;

use crate::cli::Commands;
use anyhow::Result;
use configuration::Config;
use std::io::Write;
use store::RecordStore;

/// Whether a command changed the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Changed,
}

pub fn dispatch(
    command: Commands,
    store: &mut RecordStore,
    config: &Config,
    out: &mut dyn Write,
) -> Result<Outcome> {
    match command {
        Commands::Customer(command) => customers::run(command, store, out),
        Commands::Product(command) => products::run(command, store, out),
        Commands::Order(command) => orders::run(command, store, out),
        Commands::Report(command) => reports::run(command, store, config, out),
        Commands::Export(args) => transfer::export(args, store, out),
        Commands::Import(args) => transfer::import(args, store, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use testresult::TestResult;

    /// Parses one command line and dispatches it against `store`.
    fn dispatch_args(store: &mut RecordStore, args: &[&str]) -> Result<(Outcome, String)> {
        let cli = Cli::try_parse_from(std::iter::once("orderdesk").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        let outcome = dispatch(cli.command, store, &Config::default(), &mut out)?;
        Ok((outcome, String::from_utf8(out)?))
    }

    /// Like `dispatch_args`, for commands expected to succeed.
    fn run(store: &mut RecordStore, args: &[&str]) -> TestResult<(Outcome, String)> {
        Ok(dispatch_args(store, args)?)
    }

    fn seeded() -> TestResult<RecordStore> {
        let mut store = RecordStore::new();
        run(
            &mut store,
            &[
                "customer",
                "add",
                "--name",
                "Ivan Ivanov",
                "--email",
                "ivan@mail.com",
                "--phone",
                "+79161234567",
            ],
        )?;
        run(
            &mut store,
            &[
                "customer",
                "add",
                "--name",
                "Maria Petrova",
                "--email",
                "maria@mail.ru",
                "--phone",
                "8-916-555-44-33",
            ],
        )?;
        run(
            &mut store,
            &[
                "product",
                "add",
                "--name",
                "Laptop",
                "--price",
                "50000",
                "--category",
                "Electronics",
                "--stock",
                "5",
            ],
        )?;
        run(
            &mut store,
            &[
                "product",
                "add",
                "--name",
                "Mouse",
                "--price",
                "1500",
                "--category",
                "Electronics",
                "--stock",
                "10",
            ],
        )?;
        Ok(store)
    }

    fn stock_levels(store: &RecordStore) -> Vec<u32> {
        store.products().map(|p| p.stock).collect()
    }

    #[test]
    fn add_commands_assign_sequential_ids() -> TestResult {
        let store = seeded()?;
        let ids: Vec<u32> = store.customers().map(|c| c.customer_id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        let ids: Vec<u32> = store.products().map(|p| p.product_id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn invalid_email_is_reported_and_nothing_changes() -> TestResult {
        let mut store = seeded()?;
        let result = dispatch_args(
            &mut store,
            &[
                "customer",
                "add",
                "--name",
                "Bad",
                "--email",
                "bad@",
                "--phone",
                "+79161234567",
            ],
        );

        assert!(result.is_err());
        assert_eq!(store.customer_count(), 2);
        Ok(())
    }

    #[test]
    fn order_create_draws_stock_and_remove_returns_it() -> TestResult {
        let mut store = seeded()?;

        let (outcome, printed) = run(
            &mut store,
            &[
                "order",
                "create",
                "--customer",
                "1",
                "--item",
                "1:1",
                "--item",
                "2:2",
                "--date",
                "2024-01-15T10:00:00Z",
            ],
        )?;
        assert_eq!(outcome, Outcome::Changed);
        assert!(printed.contains("53000"));
        assert_eq!(stock_levels(&store), vec![4, 8]);

        run(&mut store, &["order", "remove", "1"])?;
        assert_eq!(stock_levels(&store), vec![5, 10]);
        assert_eq!(store.order_count(), 0);
        Ok(())
    }

    #[test]
    fn order_edit_replaces_lines_and_keeps_known_prices() -> TestResult {
        let mut store = seeded()?;
        run(&mut store, &["order", "create", "--customer", "1", "--item", "2:2"])?;
        run(&mut store, &["product", "edit", "2", "--price", "2000"])?;

        let (outcome, printed) = run(
            &mut store,
            &[
                "order",
                "edit",
                "1",
                "--customer",
                "2",
                "--item",
                "2:3",
                "--item",
                "1:1",
            ],
        )?;
        assert_eq!(outcome, Outcome::Changed);
        // Mouse keeps its 1500 snapshot, the laptop is priced from the catalog.
        assert!(printed.contains("54500"));
        assert_eq!(stock_levels(&store), vec![4, 7]);

        let order = store.get_order(core_types::OrderId::new(1))?;
        assert_eq!(order.customer_id, core_types::CustomerId::new(2));
        assert_eq!(order.unit_count(), 4);

        // Without --item the lines stay as they are.
        run(&mut store, &["order", "edit", "1", "--customer", "1"])?;
        assert_eq!(store.get_order(core_types::OrderId::new(1))?.unit_count(), 4);
        Ok(())
    }

    #[test]
    fn order_edit_beyond_stock_leaves_order_untouched() -> TestResult {
        let mut store = seeded()?;
        run(&mut store, &["order", "create", "--customer", "1", "--item", "1:2"])?;

        let result = dispatch_args(&mut store, &["order", "edit", "1", "--item", "1:6"]);
        assert!(result.is_err());
        assert_eq!(stock_levels(&store), vec![3, 10]);
        assert_eq!(store.get_order(core_types::OrderId::new(1))?.unit_count(), 2);
        Ok(())
    }

    #[test]
    fn order_too_large_to_total_is_an_error() -> TestResult {
        let mut store = seeded()?;
        run(
            &mut store,
            &[
                "product",
                "add",
                "--name",
                "Gold",
                "--price",
                "79228162514264337593543950335",
                "--stock",
                "10",
            ],
        )?;

        let result = dispatch_args(
            &mut store,
            &["order", "create", "--customer", "1", "--item", "3:2"],
        );
        let err = result.err().ok_or("order should be rejected")?;
        assert!(err.to_string().contains("too large"));
        assert_eq!(store.order_count(), 0);
        assert_eq!(stock_levels(&store), vec![5, 10, 10]);
        Ok(())
    }

    #[test]
    fn customer_with_orders_cannot_be_removed() -> TestResult {
        let mut store = seeded()?;
        run(&mut store, &["order", "create", "--customer", "2", "--item", "2:1"])?;

        let err = dispatch_args(&mut store, &["customer", "remove", "2"]).unwrap_err();

        assert!(err.to_string().contains("referenced by order 1"));
        assert_eq!(store.customer_count(), 2);
        Ok(())
    }

    #[test]
    fn edit_keeps_untouched_fields() -> TestResult {
        let mut store = seeded()?;
        run(&mut store, &["product", "edit", "2", "--price", "1299.50"])?;

        let mouse = store.products().nth(1).cloned().ok_or("missing product")?;
        assert_eq!(mouse.price.to_string(), "1299.50");
        assert_eq!(mouse.name, "Mouse");
        assert_eq!(mouse.stock, 10);
        Ok(())
    }

    #[test]
    fn reports_do_not_mark_the_store_dirty() -> TestResult {
        let mut store = seeded()?;
        run(
            &mut store,
            &[
                "order",
                "create",
                "--customer",
                "1",
                "--item",
                "1:1",
                "--date",
                "2024-01-15T10:00:00Z",
            ],
        )?;
        run(
            &mut store,
            &[
                "order",
                "create",
                "--customer",
                "2",
                "--item",
                "1:1",
                "--date",
                "2024-02-03T10:00:00Z",
            ],
        )?;

        let (outcome, printed) = run(&mut store, &["report", "summary"])?;
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(printed.contains("100000"));

        let (_, printed) = run(&mut store, &["report", "trend", "--period", "month"])?;
        assert!(printed.contains("2024-01-01"));
        assert!(printed.contains("2024-02-01"));

        let (_, printed) = run(&mut store, &["report", "connections"])?;
        assert!(printed.contains("Ivan Ivanov (1)"));
        assert!(printed.contains("Maria Petrova (2)"));
        Ok(())
    }

    #[test]
    fn export_then_import_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("all.json");
        let path_arg = path.to_string_lossy().to_string();

        let mut store = seeded()?;
        run(&mut store, &["order", "create", "--customer", "1", "--item", "2:3"])?;
        let (outcome, _) = run(&mut store, &["export", &path_arg])?;
        assert_eq!(outcome, Outcome::Unchanged);

        let mut restored = RecordStore::new();
        let (outcome, printed) = run(&mut restored, &["import", &path_arg])?;
        assert_eq!(outcome, Outcome::Changed);
        assert!(printed.contains("Replaced"));
        assert_eq!(restored, store);
        Ok(())
    }
}
