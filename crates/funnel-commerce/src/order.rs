//! Order summary projection.
//!
//! The order backend owns these numbers; the funnel core treats a
//! summary as an opaque snapshot and never recomputes it locally.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, payment not yet settled.
    #[default]
    Pending,
    /// Payment captured.
    Paid,
    /// Partially refunded.
    PartiallyRefunded,
    /// Fully refunded.
    Refunded,
    /// Order cancelled.
    Cancelled,
    /// Any status this core does not model.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::PartiallyRefunded => "partially_refunded",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown => "unknown",
        }
    }

    /// Check if the order has settled payment.
    pub fn is_paid(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::PartiallyRefunded)
    }
}

/// Read-only snapshot of a finalized order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Items on the order.
    pub items: Vec<OrderSummaryItem>,
    /// Shipping charged.
    pub shipping_total: Money,
    /// Additional fees charged.
    pub fees_total: Money,
    /// Value of redeemed loyalty points.
    pub redeemed_points_value: Money,
    /// Total discount applied.
    pub discount_total: Money,
    /// Grand total charged.
    pub grand_total: Money,
    /// Backend-reported status.
    pub status: OrderStatus,
}

impl OrderSummary {
    /// Total item count across the order.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// One line of an order summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummaryItem {
    /// Product SKU.
    pub sku: String,
    /// Display name at time of order.
    pub name: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at time of order.
    pub unit_price: Money,
    /// Line total.
    pub total: Money,
}
