//! The order/payment gateway boundary.
//!
//! The funnel core never talks to the commerce backend directly; it
//! drives this trait. Timeouts, retries, and authentication live in the
//! adapter implementation, not here.

use async_trait::async_trait;
use funnel_commerce::ids::{DraftOrderId, OrderId, PaymentRef};
use funnel_commerce::order::OrderSummary;
use serde::{Deserialize, Serialize};

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway operation errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure.
    #[error("network failure: {0}")]
    Network(String),

    /// The payment method was declined.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The backend rejected the request.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Outcome of finalizing a draft order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCompletion {
    /// Whether the draft was finalized.
    pub success: bool,
    /// The finalized order id, when available.
    pub order_id: Option<OrderId>,
}

/// Async boundary to the order/payment backend.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Finalize a previously authorized draft into a real order.
    async fn complete_order(
        &self,
        draft_order_id: &DraftOrderId,
        payment_ref: &PaymentRef,
    ) -> GatewayResult<OrderCompletion>;

    /// Fetch an order summary snapshot. Either identifier may be
    /// supplied; the backend resolves whichever it has.
    async fn order_summary(
        &self,
        order_id: Option<&OrderId>,
        payment_ref: Option<&PaymentRef>,
    ) -> GatewayResult<Option<OrderSummary>>;

    /// Charge an additional item against the original payment method.
    async fn charge_upsell(
        &self,
        order_id: &OrderId,
        payment_ref: &PaymentRef,
        sku: &str,
        quantity: i64,
        discount_percent: Option<f64>,
    ) -> GatewayResult<()>;
}
