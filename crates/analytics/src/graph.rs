use core_types::{CustomerId, ProductId};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerNode {
    pub customer_id: CustomerId,
    pub name: String,
}

/// Two customers who bought at least one product in common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Connection {
    /// The lower of the two identifiers.
    pub a: CustomerId,
    pub b: CustomerId,
    /// Number of distinct products both customers bought.
    pub shared_products: usize,
}

/// Customers linked by shared purchases.
///
/// Every customer is a node, including those with no orders. An edge joins
/// two customers whose purchase sets intersect, weighted by the size of the
/// intersection.
#[derive(Debug, Clone)]
pub struct CustomerConnections {
    graph: UnGraph<CustomerNode, usize>,
    index: BTreeMap<CustomerId, NodeIndex>,
}

impl CustomerConnections {
    pub(crate) fn build(
        nodes: Vec<CustomerNode>,
        purchases: &BTreeMap<CustomerId, BTreeSet<ProductId>>,
    ) -> Self {
        let mut graph = UnGraph::with_capacity(nodes.len(), 0);
        let mut index = BTreeMap::new();
        for node in nodes {
            let id = node.customer_id;
            index.insert(id, graph.add_node(node));
        }

        let ids: Vec<CustomerId> = index.keys().copied().collect();
        for (i, a) in ids.iter().enumerate() {
            let Some(bought_a) = purchases.get(a) else {
                continue;
            };
            for b in ids.iter().skip(i + 1) {
                let Some(bought_b) = purchases.get(b) else {
                    continue;
                };
                let shared = bought_a.intersection(bought_b).count();
                if shared > 0 {
                    if let (Some(&na), Some(&nb)) = (index.get(a), index.get(b)) {
                        graph.add_edge(na, nb, shared);
                    }
                }
            }
        }

        Self { graph, index }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CustomerNode> {
        self.graph.node_weights()
    }

    /// All edges, ordered by the customer pair.
    pub fn connections(&self) -> Vec<Connection> {
        let mut edges: Vec<Connection> = self
            .graph
            .edge_references()
            .map(|edge| {
                let x = self.graph[edge.source()].customer_id;
                let y = self.graph[edge.target()].customer_id;
                Connection {
                    a: x.min(y),
                    b: x.max(y),
                    shared_products: *edge.weight(),
                }
            })
            .collect();
        edges.sort();
        edges
    }

    /// Customers directly connected to `customer_id`, in id order.
    pub fn neighbours(&self, customer_id: CustomerId) -> Vec<CustomerId> {
        let Some(&node) = self.index.get(&customer_id) else {
            return Vec::new();
        };
        let mut ids: Vec<CustomerId> = self
            .graph
            .neighbors(node)
            .map(|n| self.graph[n].customer_id)
            .collect();
        ids.sort();
        ids
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
