//! Kit selection state.

use crate::offer::KitOffer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The customer's chosen quantity per kit product SKU.
///
/// Backed by a `BTreeMap` so iteration order is stable, which keeps the
/// pricing engine's output identical across recomputes. Quantities are
/// stored as handed in; role-derived clamping happens in the
/// orchestrator, which knows the currently selected offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitSelection(BTreeMap<String, i64>);

impl KitSelection {
    /// An empty selection (used while a non-kit offer is active).
    pub fn new() -> Self {
        Self::default()
    }

    /// Role-derived defaults for a kit: the admin quantity for `must`
    /// products, zero for `optional` ones.
    pub fn defaults_for(kit: &KitOffer) -> Self {
        let mut map = BTreeMap::new();
        for product in &kit.products {
            map.insert(product.sku.clone(), product.min_quantity());
        }
        Self(map)
    }

    /// Chosen quantity for a SKU (zero when absent).
    pub fn quantity(&self, sku: &str) -> i64 {
        self.0.get(sku).copied().unwrap_or(0)
    }

    /// Store a quantity for a SKU.
    pub fn set(&mut self, sku: impl Into<String>, quantity: i64) {
        self.0.insert(sku.into(), quantity);
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (sku, quantity) pairs in SKU order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(sku, qty)| (sku.as_str(), *qty))
    }

    /// Total selected units across all SKUs.
    pub fn total_units(&self) -> i64 {
        self.0.values().sum()
    }
}
