use crate::error::StoreError;
use crate::snapshot::Snapshot;
use core_types::{
    Customer, CustomerId, EntityKind, Order, OrderId, OrderItem, Product, ProductId,
};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Units requested per product, summed across line items.
type Demand = BTreeMap<ProductId, u64>;

/// The `RecordStore` owns the customer, product and order collections and is
/// the only place they are mutated.
///
/// Every collection is indexed by identifier, so iteration is always in id
/// order. All mutating operations either succeed completely or leave the store
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    customers: BTreeMap<CustomerId, Customer>,
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Customers
    // ==========================================================================

    pub fn add_customer(&mut self, customer: Customer) -> Result<&Customer, StoreError> {
        let id = customer.customer_id;
        let added = self.insert_customer(customer)?;
        tracing::info!(customer_id = %id, "Customer added.");
        Ok(added)
    }

    fn insert_customer(&mut self, customer: Customer) -> Result<&Customer, StoreError> {
        customer.validate()?;
        match self.customers.entry(customer.customer_id) {
            Entry::Occupied(slot) => Err(StoreError::duplicate(EntityKind::Customer, *slot.key())),
            Entry::Vacant(slot) => Ok(slot.insert(customer)),
        }
    }

    pub fn get_customer(&self, id: CustomerId) -> Result<&Customer, StoreError> {
        self.customers
            .get(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, id))
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Replaces the stored customer that has the same identifier.
    pub fn update_customer(&mut self, customer: Customer) -> Result<&Customer, StoreError> {
        customer.validate()?;
        let id = customer.customer_id;
        let slot = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, id))?;
        *slot = customer;
        tracing::info!(customer_id = %id, "Customer updated.");
        Ok(slot)
    }

    /// Removes a customer. Fails while any order still references it.
    pub fn remove_customer(&mut self, id: CustomerId) -> Result<Customer, StoreError> {
        self.get_customer(id)?;
        if let Some(order) = self.orders.values().find(|o| o.customer_id == id) {
            return Err(StoreError::ReferentialIntegrity {
                kind: EntityKind::Customer,
                id: id.get(),
                order_id: order.order_id,
            });
        }
        let removed = self
            .customers
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Customer, id))?;
        tracing::info!(customer_id = %id, "Customer removed.");
        Ok(removed)
    }

    /// Case-insensitive substring search over name, email and phone.
    pub fn search_customers(&self, query: &str) -> Vec<&Customer> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.customers().collect();
        }
        let digits: String = needle.chars().filter(char::is_ascii_digit).collect();
        self.customers()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.as_str().to_lowercase().contains(&needle)
                    || c.phone.as_str().contains(&needle)
                    || (!digits.is_empty() && c.phone.digits().contains(&digits))
            })
            .collect()
    }

    /// The identifier one past the highest in use, starting from 1.
    pub fn next_customer_id(&self) -> CustomerId {
        self.customers
            .keys()
            .next_back()
            .map_or(CustomerId::new(1), |id| id.next())
    }

    // ==========================================================================
    // Products
    // ==========================================================================

    pub fn add_product(&mut self, product: Product) -> Result<&Product, StoreError> {
        let id = product.product_id;
        let added = self.insert_product(product)?;
        tracing::info!(product_id = %id, "Product added.");
        Ok(added)
    }

    fn insert_product(&mut self, product: Product) -> Result<&Product, StoreError> {
        product.validate()?;
        match self.products.entry(product.product_id) {
            Entry::Occupied(slot) => Err(StoreError::duplicate(EntityKind::Product, *slot.key())),
            Entry::Vacant(slot) => Ok(slot.insert(product)),
        }
    }

    pub fn get_product(&self, id: ProductId) -> Result<&Product, StoreError> {
        self.products
            .get(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Replaces the stored product that has the same identifier.
    ///
    /// Existing orders keep the unit prices they were placed at.
    pub fn update_product(&mut self, product: Product) -> Result<&Product, StoreError> {
        product.validate()?;
        let id = product.product_id;
        let slot = self
            .products
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        *slot = product;
        tracing::info!(product_id = %id, "Product updated.");
        Ok(slot)
    }

    /// Removes a product. Fails while any order line still references it.
    pub fn remove_product(&mut self, id: ProductId) -> Result<Product, StoreError> {
        self.get_product(id)?;
        if let Some(order) = self.orders.values().find(|o| o.contains_product(id)) {
            return Err(StoreError::ReferentialIntegrity {
                kind: EntityKind::Product,
                id: id.get(),
                order_id: order.order_id,
            });
        }
        let removed = self
            .products
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        tracing::info!(product_id = %id, "Product removed.");
        Ok(removed)
    }

    /// Adds (or, with a negative delta, removes) stock. Clamped at zero.
    pub fn adjust_stock(&mut self, id: ProductId, delta: i64) -> Result<&Product, StoreError> {
        let product = self
            .products
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        product.adjust_stock(delta);
        tracing::info!(product_id = %id, delta, stock = product.stock, "Stock adjusted.");
        Ok(product)
    }

    /// Case-insensitive substring search over name and category.
    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn next_product_id(&self) -> ProductId {
        self.products
            .keys()
            .next_back()
            .map_or(ProductId::new(1), |id| id.next())
    }

    // ==========================================================================
    // Orders
    // ==========================================================================

    /// Places an order and draws its quantities from stock.
    ///
    /// The customer and every product must exist, and each product must have
    /// enough stock for the combined quantity of its lines.
    pub fn add_order(&mut self, order: Order) -> Result<&Order, StoreError> {
        order.validate()?;
        let id = order.order_id;
        if self.orders.contains_key(&id) {
            return Err(StoreError::duplicate(EntityKind::Order, id));
        }
        self.get_customer(order.customer_id)?;

        let need = demand(&order.items);
        self.check_stock(&need, &Demand::new())?;
        self.apply_stock(&Demand::new(), &need);

        tracing::info!(
            order_id = %id,
            customer_id = %order.customer_id,
            total = %order.total_amount(),
            "Order placed."
        );
        Ok(self.orders.entry(id).or_insert(order))
    }

    pub fn get_order(&self, id: OrderId) -> Result<&Order, StoreError> {
        self.orders
            .get(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Order, id))
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn orders_for_customer(&self, id: CustomerId) -> impl Iterator<Item = &Order> {
        self.orders.values().filter(move |o| o.customer_id == id)
    }

    /// Replaces an order. The previous lines are returned to stock before the
    /// new lines are checked and drawn, so shrinking an order always succeeds.
    pub fn update_order(&mut self, order: Order) -> Result<&Order, StoreError> {
        order.validate()?;
        let id = order.order_id;
        let previous = self.get_order(id)?;
        self.get_customer(order.customer_id)?;

        let credit = demand(&previous.items);
        let need = demand(&order.items);
        self.check_stock(&need, &credit)?;
        self.apply_stock(&credit, &need);

        tracing::info!(order_id = %id, total = %order.total_amount(), "Order updated.");
        let slot = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Order, id))?;
        *slot = order;
        Ok(slot)
    }

    /// Removes an order and returns its quantities to stock.
    pub fn remove_order(&mut self, id: OrderId) -> Result<Order, StoreError> {
        let removed = self
            .orders
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Order, id))?;
        self.apply_stock(&demand(&removed.items), &Demand::new());
        tracing::info!(order_id = %id, "Order removed, stock returned.");
        Ok(removed)
    }

    pub fn next_order_id(&self) -> OrderId {
        self.orders
            .keys()
            .next_back()
            .map_or(OrderId::new(1), |id| id.next())
    }

    /// Checks every product in `need` exists and has enough stock, counting
    /// `credit` units as available on top of the current stock.
    fn check_stock(&self, need: &Demand, credit: &Demand) -> Result<(), StoreError> {
        for (&product_id, &requested) in need {
            let product = self.get_product(product_id)?;
            let available =
                u64::from(product.stock) + credit.get(&product_id).copied().unwrap_or(0);
            if requested > available {
                return Err(StoreError::InsufficientStock {
                    product_id,
                    requested,
                    available,
                });
            }
        }
        Ok(())
    }

    fn apply_stock(&mut self, credit: &Demand, need: &Demand) {
        let touched: BTreeSet<ProductId> = credit.keys().chain(need.keys()).copied().collect();
        for product_id in touched {
            let returned = credit.get(&product_id).copied().unwrap_or(0);
            let drawn = need.get(&product_id).copied().unwrap_or(0);
            if let Some(product) = self.products.get_mut(&product_id) {
                product.adjust_stock(signed(returned) - signed(drawn));
            }
        }
    }

    // ==========================================================================
    // Snapshots
    // ==========================================================================

    /// Copies the three collections out, in identifier order.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            customers: self.customers.values().cloned().collect(),
            products: self.products.values().cloned().collect(),
            orders: self.orders.values().cloned().collect(),
        }
    }

    /// Replaces the whole store with the contents of `snapshot`.
    ///
    /// Orders are taken as historical records: stock levels are used as given
    /// and not reduced by the imported orders.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), StoreError> {
        let mut fresh = RecordStore::new();
        fresh.absorb(snapshot)?;
        *self = fresh;
        tracing::info!(
            customers = self.customers.len(),
            products = self.products.len(),
            orders = self.orders.len(),
            "Store restored from snapshot."
        );
        Ok(())
    }

    /// Adds the records of `snapshot` to the existing ones. Any duplicate
    /// identifier or dangling reference rejects the whole merge.
    pub fn merge(&mut self, snapshot: Snapshot) -> Result<(), StoreError> {
        let added = snapshot.len();
        let mut working = self.clone();
        working.absorb(snapshot)?;
        *self = working;
        tracing::info!(records = added, "Snapshot merged into store.");
        Ok(())
    }

    fn absorb(&mut self, snapshot: Snapshot) -> Result<(), StoreError> {
        for customer in snapshot.customers {
            self.insert_customer(customer)?;
        }
        for product in snapshot.products {
            self.insert_product(product)?;
        }
        for order in snapshot.orders {
            order.validate()?;
            let id = order.order_id;
            if self.orders.contains_key(&id) {
                return Err(StoreError::duplicate(EntityKind::Order, id));
            }
            self.get_customer(order.customer_id)?;
            for item in &order.items {
                self.get_product(item.product_id)?;
            }
            self.orders.insert(id, order);
        }
        Ok(())
    }
}

impl TryFrom<Snapshot> for RecordStore {
    type Error = StoreError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let mut store = RecordStore::new();
        store.absorb(snapshot)?;
        Ok(store)
    }
}

fn demand(items: &[OrderItem]) -> Demand {
    let mut need = Demand::new();
    for item in items {
        *need.entry(item.product_id).or_insert(0) += u64::from(item.quantity);
    }
    need
}

fn signed(units: u64) -> i64 {
    i64::try_from(units).unwrap_or(i64::MAX)
}
