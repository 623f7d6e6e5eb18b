//! Funnel step and state record.

use funnel_commerce::customer::{Address, CustomerDetails};
use funnel_commerce::ids::{OfferId, OrderId, PaymentRef};
use funnel_commerce::offer::KitSelection;
use funnel_commerce::order::OrderSummary;
use serde::{Deserialize, Serialize};

/// Steps in the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FunnelStep {
    /// Offer selection and payment entry.
    #[default]
    Checkout,
    /// Payment accepted, order finalization in flight.
    Processing,
    /// Post-purchase one-click upsell.
    Upsell,
    /// Order confirmation.
    ThankYou,
}

impl FunnelStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunnelStep::Checkout => "checkout",
            FunnelStep::Processing => "processing",
            FunnelStep::Upsell => "upsell",
            FunnelStep::ThankYou => "thank-you",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FunnelStep::Checkout => "Checkout",
            FunnelStep::Processing => "Processing",
            FunnelStep::Upsell => "Special Offer",
            FunnelStep::ThankYou => "Thank You",
        }
    }

    /// Check if this is the terminal step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FunnelStep::ThankYou)
    }

    /// Whether the purchase has already been captured at this step.
    pub fn is_post_payment(&self) -> bool {
        matches!(
            self,
            FunnelStep::Processing | FunnelStep::Upsell | FunnelStep::ThankYou
        )
    }
}

/// The orchestrator's own record for one funnel mount.
///
/// Created on mount and mutated only by orchestrator actions; step views
/// see it through a shared reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunnelState {
    /// Current step.
    pub step: FunnelStep,
    /// Selected offer.
    pub selected_offer_id: Option<OfferId>,
    /// Kit quantity choices (meaningful while a kit offer is selected).
    pub kit_selection: KitSelection,
    /// Quantity multiplier for single/bundle offers.
    pub offer_quantity: i64,
    /// Customer contact details.
    pub customer: Option<CustomerDetails>,
    /// Shipping address captured at payment.
    pub shipping_address: Option<Address>,
    /// Payment reference from the hosted payment fields.
    pub payment_reference: Option<PaymentRef>,
    /// Finalized order id.
    pub order_id: Option<OrderId>,
    /// Latest order summary snapshot.
    pub order_summary: Option<OrderSummary>,
    /// Index into the configured upsell list.
    pub upsell_index: usize,
}

impl FunnelState {
    /// Fresh state at the checkout step.
    pub fn new() -> Self {
        Self {
            step: FunnelStep::Checkout,
            selected_offer_id: None,
            kit_selection: KitSelection::new(),
            offer_quantity: 1,
            customer: None,
            shipping_address: None,
            payment_reference: None,
            order_id: None,
            order_summary: None,
            upsell_index: 0,
        }
    }
}

impl Default for FunnelState {
    fn default() -> Self {
        Self::new()
    }
}
