//! Cart output types produced by the pricing engine.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A resolved cart line, ready for display and order submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Quantity.
    pub quantity: i64,
    /// Resolved unit sale price.
    pub unit_price: Money,
    /// Unit compare-at price for display.
    pub regular_unit_price: Option<Money>,
    /// Display label (e.g., the included-in-kit marker).
    pub label: Option<String>,
    /// Per-item discount percent for display.
    pub discount_percent: Option<f64>,
}

impl CartItem {
    /// Line total (unit price times quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// Original and discounted totals for the current selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceSummary {
    /// Total at regular prices, for the struck-through display.
    pub original: Money,
    /// Total actually charged.
    pub discounted: Money,
}

impl PriceSummary {
    /// Amount saved versus regular prices.
    pub fn savings(&self) -> Money {
        if self.original.amount_cents > self.discounted.amount_cents {
            self.original.subtract(&self.discounted)
        } else {
            Money::zero(self.discounted.currency)
        }
    }

    /// Whether the discounted total is below the original.
    pub fn has_discount(&self) -> bool {
        self.discounted.amount_cents < self.original.amount_cents
    }
}
