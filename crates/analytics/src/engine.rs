use crate::error::AnalyticsError;
use crate::filter::DateRange;
use crate::graph::{CustomerConnections, CustomerNode};
use crate::report::{CustomerStat, ProductStat, SalesSummary, TrendPoint};
use crate::trend::{next_period, period_start};
use chrono::NaiveDate;
use core_types::{Customer, CustomerId, Order, Product, ProductId, RankBy, TrendPeriod};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

/// A stateless calculator for deriving sales figures from the order book.
///
/// Every method is a pure function of its inputs. Empty input produces zeroed
/// figures or empty rankings, never an error. Revenue is accumulated with
/// checked arithmetic, so a sum past `Decimal::MAX` is reported as
/// `AnalyticsError::RevenueOverflow`.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headline figures for the orders inside `range`.
    pub fn summarize<'a, I>(
        &self,
        orders: I,
        range: &DateRange,
    ) -> Result<SalesSummary, AnalyticsError>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut summary = SalesSummary::new();
        let mut customers = BTreeSet::new();

        for order in range.select(orders) {
            summary.order_count += 1;
            summary.total_revenue = add_order_total(summary.total_revenue, order)?;
            summary.items_sold += order.unit_count();
            customers.insert(order.customer_id);
        }

        summary.distinct_customers = customers.len();
        if summary.order_count > 0 {
            summary.average_order_value =
                (summary.total_revenue / Decimal::from(summary.order_count)).round_dp(2);
        }

        tracing::debug!(
            orders = summary.order_count,
            revenue = %summary.total_revenue,
            "Computed sales summary"
        );
        Ok(summary)
    }

    /// The `n` best-selling catalog products.
    ///
    /// Every product in `products` takes part in the ranking, so products
    /// that never sold appear with zero figures when `n` is large enough.
    ///
    /// # Arguments
    ///
    /// * `rank_by` - The primary sort key. Ties fall back to the other metric,
    ///   then to the product identifier.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::UnknownProduct` if a selected order sells a product
    /// missing from `products`.
    pub fn top_products<'a, 'b, O, P>(
        &self,
        orders: O,
        products: P,
        n: usize,
        rank_by: RankBy,
        range: &DateRange,
    ) -> Result<Vec<ProductStat>, AnalyticsError>
    where
        O: IntoIterator<Item = &'a Order>,
        P: IntoIterator<Item = &'b Product>,
    {
        let mut stats: BTreeMap<ProductId, ProductStat> = products
            .into_iter()
            .map(|p| {
                let stat = ProductStat {
                    product_id: p.product_id,
                    name: p.name.clone(),
                    quantity: 0,
                    revenue: Decimal::ZERO,
                };
                (p.product_id, stat)
            })
            .collect();

        for order in range.select(orders) {
            for item in &order.items {
                let stat = stats
                    .get_mut(&item.product_id)
                    .ok_or(AnalyticsError::UnknownProduct(item.product_id))?;
                stat.quantity += u64::from(item.quantity);
                stat.revenue = item
                    .checked_total()
                    .and_then(|line| stat.revenue.checked_add(line))
                    .ok_or(AnalyticsError::RevenueOverflow(order.order_id))?;
            }
        }

        let mut ranked: Vec<ProductStat> = stats.into_values().collect();
        match rank_by {
            RankBy::Quantity => ranked.sort_by_key(|s| {
                (Reverse(s.quantity), Reverse(s.revenue), s.product_id)
            }),
            RankBy::Revenue => ranked.sort_by_key(|s| {
                (Reverse(s.revenue), Reverse(s.quantity), s.product_id)
            }),
        }
        ranked.truncate(n);
        Ok(ranked)
    }

    /// The `n` most active customers, by order count, then total spent, then
    /// identifier. Customers without orders rank last with zero figures.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::UnknownCustomer` if a selected order belongs to a
    /// customer missing from `customers`.
    pub fn top_customers<'a, 'b, O, C>(
        &self,
        orders: O,
        customers: C,
        n: usize,
        range: &DateRange,
    ) -> Result<Vec<CustomerStat>, AnalyticsError>
    where
        O: IntoIterator<Item = &'a Order>,
        C: IntoIterator<Item = &'b Customer>,
    {
        let mut stats: BTreeMap<CustomerId, CustomerStat> = customers
            .into_iter()
            .map(|c| {
                let stat = CustomerStat {
                    customer_id: c.customer_id,
                    name: c.name.clone(),
                    order_count: 0,
                    total_spent: Decimal::ZERO,
                };
                (c.customer_id, stat)
            })
            .collect();

        for order in range.select(orders) {
            let stat = stats
                .get_mut(&order.customer_id)
                .ok_or(AnalyticsError::UnknownCustomer(order.customer_id))?;
            stat.order_count += 1;
            stat.total_spent = add_order_total(stat.total_spent, order)?;
        }

        let mut ranked: Vec<CustomerStat> = stats.into_values().collect();
        ranked.sort_by_key(|s| (Reverse(s.order_count), Reverse(s.total_spent), s.customer_id));
        ranked.truncate(n);
        Ok(ranked)
    }

    /// Order count and revenue per period, from the period holding the first
    /// selected order to the one holding the last. Periods without orders are
    /// included with zeros.
    pub fn sales_trend<'a, I>(
        &self,
        orders: I,
        period: TrendPeriod,
        range: &DateRange,
    ) -> Result<Vec<TrendPoint>, AnalyticsError>
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut buckets: BTreeMap<NaiveDate, (usize, Decimal)> = BTreeMap::new();
        for order in range.select(orders) {
            let start = period_start(period, order.date.date_naive());
            let bucket = buckets.entry(start).or_insert((0, Decimal::ZERO));
            bucket.0 += 1;
            bucket.1 = add_order_total(bucket.1, order)?;
        }

        let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back())
        else {
            return Ok(Vec::new());
        };

        let mut points = Vec::new();
        let mut cursor = Some(first);
        while let Some(start) = cursor.filter(|d| *d <= last) {
            let (order_count, revenue) = buckets.get(&start).copied().unwrap_or((0, Decimal::ZERO));
            points.push(TrendPoint {
                period_start: start,
                order_count,
                revenue,
            });
            cursor = next_period(period, start);
        }

        tracing::debug!(%period, points = points.len(), "Computed sales trend");
        Ok(points)
    }

    /// Links customers who bought at least one product in common.
    ///
    /// # Errors
    ///
    /// `AnalyticsError::UnknownCustomer` if an order belongs to a customer
    /// missing from `customers`.
    pub fn customer_connections<'a, 'b, O, C>(
        &self,
        orders: O,
        customers: C,
    ) -> Result<CustomerConnections, AnalyticsError>
    where
        O: IntoIterator<Item = &'a Order>,
        C: IntoIterator<Item = &'b Customer>,
    {
        let nodes: Vec<CustomerNode> = customers
            .into_iter()
            .map(|c| CustomerNode {
                customer_id: c.customer_id,
                name: c.name.clone(),
            })
            .collect();
        let known: BTreeSet<CustomerId> = nodes.iter().map(|n| n.customer_id).collect();

        let mut purchases: BTreeMap<CustomerId, BTreeSet<ProductId>> = BTreeMap::new();
        for order in orders {
            if !known.contains(&order.customer_id) {
                return Err(AnalyticsError::UnknownCustomer(order.customer_id));
            }
            purchases
                .entry(order.customer_id)
                .or_default()
                .extend(order.items.iter().map(|i| i.product_id));
        }

        let connections = CustomerConnections::build(nodes, &purchases);
        tracing::debug!(
            customers = connections.node_count(),
            links = connections.edge_count(),
            "Built customer connection graph"
        );
        Ok(connections)
    }
}

fn add_order_total(acc: Decimal, order: &Order) -> Result<Decimal, AnalyticsError> {
    order
        .checked_total()
        .and_then(|total| acc.checked_add(total))
        .ok_or(AnalyticsError::RevenueOverflow(order.order_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::{OrderId, OrderItem};
    use rust_decimal_macros::dec;

    fn customer(id: u32, name: &str) -> Customer {
        Customer::new(
            CustomerId::new(id),
            name,
            "someone@example.com",
            "+79161234567",
            "",
        )
        .unwrap()
    }

    fn product(id: u32, name: &str, price: Decimal) -> Product {
        Product::new(ProductId::new(id), name, price, "General", 100).unwrap()
    }

    fn order(
        id: u32,
        customer: u32,
        (y, m, d): (i32, u32, u32),
        lines: &[(&Product, u32)],
    ) -> Order {
        let date = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        let mut order = Order::new(OrderId::new(id), CustomerId::new(customer), date);
        for (p, qty) in lines {
            order.add_item(OrderItem::new(p, *qty).unwrap());
        }
        order
    }

    struct Fixture {
        customers: Vec<Customer>,
        products: Vec<Product>,
        orders: Vec<Order>,
    }

    fn fixture() -> Fixture {
        let laptop = product(1, "Laptop", dec!(50000));
        let mouse = product(2, "Mouse", dec!(1500));
        let phone = product(3, "Phone", dec!(20000));
        let cable = product(4, "Cable", dec!(300));
        let case = product(5, "Case", dec!(900));
        let orders = vec![
            order(1, 1, (2024, 1, 1), &[(&laptop, 1), (&mouse, 1)]),
            order(2, 2, (2024, 1, 2), &[(&mouse, 1), (&cable, 1)]),
            order(3, 1, (2024, 1, 15), &[(&phone, 1)]),
        ];
        Fixture {
            customers: vec![customer(1, "Alice"), customer(2, "Bob"), customer(3, "Carol")],
            products: vec![laptop, mouse, phone, cable, case],
            orders,
        }
    }

    #[test]
    fn summary_of_empty_book_is_zero() {
        let none: Vec<Order> = Vec::new();
        let summary = AnalyticsEngine::new()
            .summarize(&none, &DateRange::all())
            .unwrap();
        assert_eq!(summary, SalesSummary::new());
    }

    #[test]
    fn summary_totals_and_average() {
        let f = fixture();
        let summary = AnalyticsEngine::new()
            .summarize(&f.orders, &DateRange::all())
            .unwrap();

        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.total_revenue, dec!(73300));
        assert_eq!(summary.items_sold, 5);
        assert_eq!(summary.average_order_value, dec!(24433.33));
        assert_eq!(summary.distinct_customers, 2);
    }

    #[test]
    fn summary_respects_date_range() {
        let f = fixture();
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 2),
            NaiveDate::from_ymd_opt(2024, 1, 31),
        )
        .unwrap();
        let summary = AnalyticsEngine::new()
            .summarize(&f.orders, &range)
            .unwrap();

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.total_revenue, dec!(21800));
    }

    #[test]
    fn revenue_overflow_is_an_error_not_a_panic() {
        let gold = product(1, "Gold", Decimal::MAX);
        let engine = AnalyticsEngine::new();
        let all = DateRange::all();

        // Each order on its own is representable; their sum is not.
        let orders = vec![
            order(1, 1, (2024, 1, 1), &[(&gold, 1)]),
            order(2, 1, (2024, 1, 2), &[(&gold, 1)]),
        ];
        let overflow = AnalyticsError::RevenueOverflow(OrderId::new(2));
        assert_eq!(engine.summarize(&orders, &all).unwrap_err(), overflow);
        assert_eq!(
            engine
                .sales_trend(&orders, TrendPeriod::Month, &all)
                .unwrap_err(),
            overflow
        );
        assert_eq!(
            engine
                .top_products(&orders, [&gold], 5, RankBy::Revenue, &all)
                .unwrap_err(),
            overflow
        );
        assert_eq!(
            engine
                .top_customers(&orders, [&customer(1, "Alice")], 5, &all)
                .unwrap_err(),
            overflow
        );

        // A single line that cannot be priced is caught too.
        let doubled = vec![order(3, 1, (2024, 1, 3), &[(&gold, 2)])];
        assert_eq!(
            engine.summarize(&doubled, &all).unwrap_err(),
            AnalyticsError::RevenueOverflow(OrderId::new(3))
        );
    }

    #[test]
    fn top_products_include_unsold_catalog_entries() {
        let f = fixture();
        let ranked = AnalyticsEngine::new()
            .top_products(&f.orders, &f.products, 10, RankBy::Quantity, &DateRange::all())
            .unwrap();

        let ids: Vec<u32> = ranked.iter().map(|s| s.product_id.get()).collect();
        // Mouse sold 2; the single-unit products split on revenue.
        assert_eq!(ids, vec![2, 1, 3, 4, 5]);
        assert_eq!(ranked[4].quantity, 0);
        assert_eq!(ranked[4].revenue, Decimal::ZERO);
    }

    #[test]
    fn top_products_by_revenue_truncates() {
        let f = fixture();
        let ranked = AnalyticsEngine::new()
            .top_products(&f.orders, &f.products, 2, RankBy::Revenue, &DateRange::all())
            .unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Laptop");
        assert_eq!(ranked[1].name, "Phone");
    }

    #[test]
    fn top_products_rejects_unknown_product() {
        let f = fixture();
        let err = AnalyticsEngine::new()
            .top_products(&f.orders, &f.products[1..], 5, RankBy::Quantity, &DateRange::all())
            .unwrap_err();
        assert_eq!(err, AnalyticsError::UnknownProduct(ProductId::new(1)));
    }

    #[test]
    fn top_customers_by_order_count() {
        let f = fixture();
        let ranked = AnalyticsEngine::new()
            .top_customers(&f.orders, &f.customers, 5, &DateRange::all())
            .unwrap();

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "Alice");
        assert_eq!(ranked[0].order_count, 2);
        assert_eq!(ranked[0].total_spent, dec!(71500));
        assert_eq!(ranked[1].name, "Bob");
        assert_eq!(ranked[1].total_spent, dec!(1800));
        assert_eq!(ranked[2].order_count, 0);
    }

    #[test]
    fn weekly_trend_fills_gaps() {
        let f = fixture();
        let trend = AnalyticsEngine::new()
            .sales_trend(&f.orders, TrendPeriod::Week, &DateRange::all())
            .unwrap();

        let starts: Vec<String> = trend.iter().map(|p| p.period_start.to_string()).collect();
        assert_eq!(starts, vec!["2024-01-01", "2024-01-08", "2024-01-15"]);
        assert_eq!(trend[0].order_count, 2);
        assert_eq!(trend[0].revenue, dec!(53300));
        assert_eq!(trend[1].order_count, 0);
        assert_eq!(trend[1].revenue, Decimal::ZERO);
        assert_eq!(trend[2].revenue, dec!(20000));
    }

    #[test]
    fn monthly_trend_collapses_into_one_bucket() {
        let f = fixture();
        let trend = AnalyticsEngine::new()
            .sales_trend(&f.orders, TrendPeriod::Month, &DateRange::all())
            .unwrap();

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].order_count, 3);
        assert_eq!(trend[0].revenue, dec!(73300));
    }

    #[test]
    fn trend_of_empty_book_is_empty() {
        let none: Vec<Order> = Vec::new();
        let trend = AnalyticsEngine::new()
            .sales_trend(&none, TrendPeriod::Day, &DateRange::all())
            .unwrap();
        assert!(trend.is_empty());
    }

    #[test]
    fn customers_sharing_a_product_are_connected() {
        let f = fixture();
        let graph = AnalyticsEngine::new()
            .customer_connections(&f.orders, &f.customers)
            .unwrap();

        assert_eq!(graph.node_count(), 3);
        // Alice and Bob both bought the mouse.
        let edges = graph.connections();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].a, CustomerId::new(1));
        assert_eq!(edges[0].b, CustomerId::new(2));
        assert_eq!(edges[0].shared_products, 1);
        assert_eq!(graph.neighbours(CustomerId::new(2)), vec![CustomerId::new(1)]);
        assert!(graph.neighbours(CustomerId::new(3)).is_empty());
    }

    #[test]
    fn no_shared_products_means_no_edges() {
        let a = product(1, "A", dec!(10));
        let b = product(2, "B", dec!(10));
        let orders = vec![
            order(1, 1, (2024, 3, 1), &[(&a, 1)]),
            order(2, 2, (2024, 3, 1), &[(&b, 1)]),
        ];
        let customers = vec![customer(1, "Alice"), customer(2, "Bob")];
        let graph = AnalyticsEngine::new()
            .customer_connections(&orders, &customers)
            .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }
}
