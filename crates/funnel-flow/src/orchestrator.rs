//! The checkout orchestrator.
//!
//! [`CheckoutFunnel`] is the only mutation point for funnel state. Step
//! views read the state snapshot and invoke the callbacks here; network
//! sequencing and step transitions happen inside.
//!
//! No callback propagates an error. Once payment has been captured the
//! customer is always moved forward: gateway failures downgrade the
//! confirmation (missing summary, skipped upsell) and are logged, never
//! surfaced as a blocking failure.

use std::sync::Arc;

use funnel_commerce::cart::{CartItem, PriceSummary};
use funnel_commerce::customer::{Address, CustomerDetails};
use funnel_commerce::ids::{DraftOrderId, OfferId, PaymentRef};
use funnel_commerce::offer::{KitSelection, Offer, UpsellOffer};
use funnel_commerce::pricing;

use crate::config::FunnelConfig;
use crate::events::{funnel_event_channel, FunnelEvent, FunnelEventPublisher, FunnelEventReceiver};
use crate::gateway::CheckoutGateway;
use crate::nav::{FunnelRoute, NavigationSync};
use crate::state::{FunnelState, FunnelStep};

/// The funnel checkout state machine.
pub struct CheckoutFunnel {
    config: FunnelConfig,
    gateway: Arc<dyn CheckoutGateway>,
    state: FunnelState,
    nav: NavigationSync,
    events: FunnelEventReceiver,
    publisher: FunnelEventPublisher,
}

impl CheckoutFunnel {
    /// Mount a fresh funnel at the checkout step.
    pub fn new(config: FunnelConfig, gateway: Arc<dyn CheckoutGateway>) -> Self {
        let (publisher, events) = funnel_event_channel();
        let mut funnel = Self {
            config,
            gateway,
            state: FunnelState::new(),
            nav: NavigationSync::new(),
            events,
            publisher,
        };
        if let Some(offer_id) = funnel.config.initial_offer().map(|o| o.id().clone()) {
            funnel.select_offer(offer_id);
        }
        funnel
    }

    /// Mount a funnel from the location the page loaded at.
    ///
    /// A thank-you or upsell location carrying an order identifier
    /// restores that step directly and issues a single summary fetch;
    /// every other location starts at checkout.
    pub async fn resume(
        config: FunnelConfig,
        gateway: Arc<dyn CheckoutGateway>,
        route: FunnelRoute,
    ) -> Self {
        let mut funnel = Self::new(config, gateway);
        funnel.nav = NavigationSync::start_at(route.clone());
        if route.resumes_mid_flow() {
            funnel.state.step = route.step();
            funnel.state.order_id = route.order_id().cloned();
            funnel.state.payment_reference = route.payment_ref().cloned();
            funnel.refresh_summary().await;
        }
        funnel
    }

    /// Read-only state snapshot for step views.
    pub fn state(&self) -> &FunnelState {
        &self.state
    }

    /// The funnel configuration.
    pub fn config(&self) -> &FunnelConfig {
        &self.config
    }

    /// The currently selected offer, when it resolves in the catalog.
    pub fn selected_offer(&self) -> Option<&Offer> {
        self.state
            .selected_offer_id
            .as_ref()
            .and_then(|id| self.config.find_offer(id))
    }

    /// Cart lines for the current selection.
    pub fn cart_items(&self) -> Vec<CartItem> {
        match self.selected_offer() {
            Some(offer) => pricing::cart_items(
                offer,
                &self.state.kit_selection,
                self.state.offer_quantity,
            ),
            None => Vec::new(),
        }
    }

    /// Price summary for the current selection.
    pub fn price_summary(&self) -> Option<PriceSummary> {
        self.selected_offer().map(|offer| {
            pricing::price_summary(offer, &self.state.kit_selection, self.state.offer_quantity)
        })
    }

    /// The upsell currently being presented.
    pub fn current_upsell(&self) -> Option<&UpsellOffer> {
        self.config.active_upsells().get(self.state.upsell_index)
    }

    /// A publisher other page sections can use to request an offer.
    pub fn event_publisher(&self) -> FunnelEventPublisher {
        self.publisher.clone()
    }

    /// Select an offer.
    ///
    /// Re-selecting the active offer is a strict no-op so incidental
    /// re-clicks never reset the customer's quantities. Selecting a
    /// different offer resets the multiplier and re-derives kit
    /// defaults.
    pub fn select_offer(&mut self, offer_id: impl Into<OfferId>) {
        let offer_id = offer_id.into();
        if self.state.selected_offer_id.as_ref() == Some(&offer_id) {
            return;
        }
        let Some(offer) = self.config.find_offer(&offer_id) else {
            tracing::debug!(offer = %offer_id, "ignoring selection of unknown offer");
            return;
        };
        let kit_selection = match offer {
            Offer::CustomizableKit(kit) => KitSelection::defaults_for(kit),
            _ => KitSelection::new(),
        };
        self.state.selected_offer_id = Some(offer_id);
        self.state.offer_quantity = 1;
        self.state.kit_selection = kit_selection;
    }

    /// Set the offer quantity multiplier, clamped to at least 1.
    ///
    /// Only single and bundle offers price by this multiplier; the
    /// value is stored regardless.
    pub fn set_offer_quantity(&mut self, quantity: i64) {
        self.state.offer_quantity = quantity.max(1);
    }

    /// Set the chosen quantity for a kit product.
    ///
    /// The quantity is clamped to the product's role-derived minimum in
    /// the currently selected kit. Outside a kit (or for an unknown
    /// SKU) the raw non-negative value is stored.
    pub fn set_kit_quantity(&mut self, sku: &str, quantity: i64) {
        let minimum = match self.selected_offer() {
            Some(Offer::CustomizableKit(kit)) => kit.product(sku).map(|p| p.min_quantity()),
            _ => None,
        };
        let clamped = quantity.max(minimum.unwrap_or(0));
        self.state.kit_selection.set(sku, clamped);
    }

    /// Record customer contact details.
    pub fn set_customer(&mut self, customer: CustomerDetails) {
        self.state.customer = Some(customer);
    }

    /// Payment has been captured: finalize the order and advance.
    ///
    /// Runs the completion sequence: finalize the draft, fetch the
    /// summary, move to upsell or confirmation. A failure in either
    /// network step degrades the confirmation instead of stalling the
    /// customer mid-purchase.
    pub async fn complete_checkout(
        &mut self,
        payment_ref: PaymentRef,
        address: Address,
        draft_order_id: DraftOrderId,
    ) {
        self.state.payment_reference = Some(payment_ref.clone());
        self.state.shipping_address = Some(address);
        self.state.step = FunnelStep::Processing;

        match self
            .gateway
            .complete_order(&draft_order_id, &payment_ref)
            .await
        {
            Ok(completion) if completion.success => {
                self.state.order_id = completion.order_id;
            }
            Ok(_) => {
                tracing::warn!(draft = %draft_order_id, "order finalization reported failure; continuing");
            }
            Err(error) => {
                tracing::warn!(%error, draft = %draft_order_id, "order finalization failed; continuing");
            }
        }

        self.refresh_summary().await;

        self.state.step = if self.current_upsell().is_some() {
            FunnelStep::Upsell
        } else {
            FunnelStep::ThankYou
        };
    }

    /// Accept the presented upsell.
    ///
    /// Charges against the original payment method, then advances. The
    /// charge is attempted once; failure (or missing order identifiers)
    /// is logged and the customer still moves on.
    pub async fn accept_upsell(&mut self) {
        if self.state.step != FunnelStep::Upsell {
            return;
        }
        let (order_id, payment_ref) = match (
            self.state.order_id.clone(),
            self.state.payment_reference.clone(),
        ) {
            (Some(order_id), Some(payment_ref)) => (order_id, payment_ref),
            _ => {
                tracing::warn!("upsell accepted without settled order identifiers; skipping charge");
                self.advance_upsell();
                return;
            }
        };
        let Some(upsell) = self.current_upsell().cloned() else {
            self.advance_upsell();
            return;
        };

        match self
            .gateway
            .charge_upsell(
                &order_id,
                &payment_ref,
                &upsell.sku,
                upsell.quantity,
                upsell.discount_percent,
            )
            .await
        {
            Ok(()) => self.refresh_summary().await,
            Err(error) => {
                tracing::warn!(%error, sku = %upsell.sku, "upsell charge failed; continuing");
            }
        }

        self.advance_upsell();
    }

    /// Decline the presented upsell. No network call is made.
    pub fn decline_upsell(&mut self) {
        if self.state.step != FunnelStep::Upsell {
            return;
        }
        self.advance_upsell();
    }

    /// Drain pending cross-section events.
    ///
    /// An offer request selects the offer and forces the step back to
    /// checkout, abandoning any in-progress order.
    pub fn pump_events(&mut self) {
        while let Some(event) = self.events.try_next() {
            match event {
                FunnelEvent::OfferRequested { offer_id } => {
                    self.select_offer(offer_id);
                    if self.state.step != FunnelStep::Checkout {
                        self.abandon_to_checkout();
                    }
                }
            }
        }
    }

    /// Compute the browser navigation write for the current state, if
    /// the location is out of date.
    pub fn navigation_update(&mut self) -> Option<FunnelRoute> {
        self.nav.sync(&self.state)
    }

    fn advance_upsell(&mut self) {
        self.state.upsell_index += 1;
        if self.current_upsell().is_none() {
            self.state.step = FunnelStep::ThankYou;
        }
    }

    fn abandon_to_checkout(&mut self) {
        self.state.order_id = None;
        self.state.payment_reference = None;
        self.state.order_summary = None;
        self.state.upsell_index = 0;
        self.state.step = FunnelStep::Checkout;
    }

    async fn refresh_summary(&mut self) {
        match self
            .gateway
            .order_summary(
                self.state.order_id.as_ref(),
                self.state.payment_reference.as_ref(),
            )
            .await
        {
            Ok(Some(summary)) => self.state.order_summary = Some(summary),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%error, "order summary fetch failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayError, GatewayResult, OrderCompletion};
    use async_trait::async_trait;
    use funnel_commerce::ids::OrderId;
    use funnel_commerce::money::{Currency, Money};
    use funnel_commerce::offer::{
        BundleItem, BundleOffer, KitDiscount, KitOffer, KitProduct, KitRole, SingleOffer,
    };
    use funnel_commerce::order::{OrderStatus, OrderSummary};
    use futures::executor::block_on;
    use std::sync::Mutex;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn sample_summary() -> OrderSummary {
        OrderSummary {
            items: vec![],
            shipping_total: usd(0),
            fees_total: usd(0),
            redeemed_points_value: usd(0),
            discount_total: usd(0),
            grand_total: usd(5000),
            status: OrderStatus::Paid,
        }
    }

    #[derive(Default)]
    struct MockGateway {
        calls: Mutex<Vec<String>>,
        fail_complete: bool,
        fail_summary: bool,
        fail_charge: bool,
    }

    impl MockGateway {
        fn record(&self, name: &str) {
            self.calls.lock().unwrap().push(name.to_string());
        }

        fn call_count(&self, name: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
        }
    }

    #[async_trait]
    impl CheckoutGateway for MockGateway {
        async fn complete_order(
            &self,
            _draft_order_id: &DraftOrderId,
            _payment_ref: &PaymentRef,
        ) -> GatewayResult<OrderCompletion> {
            self.record("complete_order");
            if self.fail_complete {
                return Err(GatewayError::Network("connection reset".to_string()));
            }
            Ok(OrderCompletion {
                success: true,
                order_id: Some(OrderId::new("ord-1")),
            })
        }

        async fn order_summary(
            &self,
            _order_id: Option<&OrderId>,
            _payment_ref: Option<&PaymentRef>,
        ) -> GatewayResult<Option<OrderSummary>> {
            self.record("order_summary");
            if self.fail_summary {
                return Err(GatewayError::Backend("summary unavailable".to_string()));
            }
            Ok(Some(sample_summary()))
        }

        async fn charge_upsell(
            &self,
            _order_id: &OrderId,
            _payment_ref: &PaymentRef,
            _sku: &str,
            _quantity: i64,
            _discount_percent: Option<f64>,
        ) -> GatewayResult<()> {
            self.record("charge_upsell");
            if self.fail_charge {
                return Err(GatewayError::Declined("card declined".to_string()));
            }
            Ok(())
        }
    }

    fn single_offer(id: &str) -> Offer {
        Offer::Single(SingleOffer {
            id: OfferId::new(id),
            name: id.to_string(),
            sku: format!("SKU-{id}"),
            quantity: 1,
            calculated_price: usd(5000),
            regular_price: None,
        })
    }

    fn kit_offer(id: &str) -> Offer {
        let product = |sku: &str, role, qty| KitProduct {
            sku: sku.to_string(),
            name: sku.to_string(),
            role,
            quantity: qty,
            regular_price: usd(1500),
            discounted_price: usd(1000),
            subsequent_sale_price: Some(usd(800)),
            discount_percent: None,
        };
        Offer::CustomizableKit(KitOffer {
            id: OfferId::new(id),
            name: id.to_string(),
            products: vec![
                product("core", KitRole::Must, 2),
                product("extra", KitRole::Optional, 1),
            ],
            discount: KitDiscount::None,
        })
    }

    fn bundle_offer(id: &str) -> Offer {
        Offer::FixedBundle(BundleOffer {
            id: OfferId::new(id),
            name: id.to_string(),
            items: vec![BundleItem {
                sku: "SKU-B".to_string(),
                name: "Bundled".to_string(),
                quantity: 2,
                price: usd(1000),
                sale_price: None,
                regular_price: None,
            }],
        })
    }

    fn upsell() -> UpsellOffer {
        UpsellOffer {
            sku: "UP-1".to_string(),
            name: "Add-on".to_string(),
            price: usd(900),
            quantity: 1,
            discount_percent: Some(15.0),
        }
    }

    fn config(upsells: Vec<UpsellOffer>) -> FunnelConfig {
        FunnelConfig::new("f-1", "Funnel", "funnel")
            .with_offers(vec![
                single_offer("single"),
                kit_offer("kit"),
                bundle_offer("bundle"),
            ])
            .with_default_offer("single")
            .with_upsells(upsells)
    }

    fn funnel_with(
        upsells: Vec<UpsellOffer>,
        gateway: MockGateway,
    ) -> (CheckoutFunnel, Arc<MockGateway>) {
        let gateway = Arc::new(gateway);
        let funnel = CheckoutFunnel::new(config(upsells), gateway.clone());
        (funnel, gateway)
    }

    fn complete(funnel: &mut CheckoutFunnel) {
        block_on(funnel.complete_checkout(
            PaymentRef::new("pi_abc"),
            Address::default(),
            DraftOrderId::new("draft-1"),
        ));
    }

    #[test]
    fn test_mount_selects_default_offer() {
        let (funnel, _) = funnel_with(vec![], MockGateway::default());
        assert_eq!(
            funnel.state().selected_offer_id.as_ref().unwrap().as_str(),
            "single"
        );
        assert_eq!(funnel.state().step, FunnelStep::Checkout);
    }

    #[test]
    fn test_reselecting_active_offer_is_noop() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.select_offer("kit");
        funnel.set_kit_quantity("extra", 3);
        funnel.set_offer_quantity(4);
        let before = funnel.state().clone();

        funnel.select_offer("kit");
        assert_eq!(funnel.state(), &before);
    }

    #[test]
    fn test_selecting_new_offer_resets_selection() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.set_offer_quantity(5);

        funnel.select_offer("kit");
        assert_eq!(funnel.state().offer_quantity, 1);
        assert_eq!(funnel.state().kit_selection.quantity("core"), 2);
        assert_eq!(funnel.state().kit_selection.quantity("extra"), 0);

        funnel.select_offer("bundle");
        assert!(funnel.state().kit_selection.is_empty());
    }

    #[test]
    fn test_unknown_offer_is_ignored() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.select_offer("nope");
        assert_eq!(
            funnel.state().selected_offer_id.as_ref().unwrap().as_str(),
            "single"
        );
    }

    #[test]
    fn test_offer_quantity_clamped_to_one() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.set_offer_quantity(0);
        assert_eq!(funnel.state().offer_quantity, 1);
        funnel.set_offer_quantity(-3);
        assert_eq!(funnel.state().offer_quantity, 1);
    }

    #[test]
    fn test_kit_quantity_clamped_to_role_minimum() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.select_offer("kit");

        funnel.set_kit_quantity("core", 0);
        assert_eq!(funnel.state().kit_selection.quantity("core"), 2);

        funnel.set_kit_quantity("core", 5);
        assert_eq!(funnel.state().kit_selection.quantity("core"), 5);

        funnel.set_kit_quantity("extra", -1);
        assert_eq!(funnel.state().kit_selection.quantity("extra"), 0);
    }

    #[test]
    fn test_kit_quantity_outside_kit_stores_raw_non_negative() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.set_kit_quantity("anything", -4);
        assert_eq!(funnel.state().kit_selection.quantity("anything"), 0);
        funnel.set_kit_quantity("anything", 7);
        assert_eq!(funnel.state().kit_selection.quantity("anything"), 7);
    }

    #[test]
    fn test_completion_advances_to_upsell() {
        let (mut funnel, gateway) = funnel_with(vec![upsell()], MockGateway::default());
        complete(&mut funnel);

        assert_eq!(funnel.state().step, FunnelStep::Upsell);
        assert_eq!(funnel.state().order_id.as_ref().unwrap().as_str(), "ord-1");
        assert!(funnel.state().order_summary.is_some());
        assert_eq!(gateway.call_count("complete_order"), 1);
        assert_eq!(gateway.call_count("order_summary"), 1);
    }

    #[test]
    fn test_completion_without_upsells_goes_to_thank_you() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        complete(&mut funnel);
        assert_eq!(funnel.state().step, FunnelStep::ThankYou);
    }

    #[test]
    fn test_degraded_continuation_on_gateway_failure() {
        let gateway = MockGateway {
            fail_complete: true,
            fail_summary: true,
            ..Default::default()
        };
        let (mut funnel, _) = funnel_with(vec![upsell()], gateway);
        complete(&mut funnel);

        // The flow still advances; the confirmation is just degraded.
        assert_eq!(funnel.state().step, FunnelStep::Upsell);
        assert!(funnel.state().order_id.is_none());
        assert!(funnel.state().order_summary.is_none());
    }

    #[test]
    fn test_accept_upsell_charges_and_advances() {
        let (mut funnel, gateway) = funnel_with(vec![upsell()], MockGateway::default());
        complete(&mut funnel);

        block_on(funnel.accept_upsell());
        assert_eq!(gateway.call_count("charge_upsell"), 1);
        // Summary refreshed after the charge.
        assert_eq!(gateway.call_count("order_summary"), 2);
        assert_eq!(funnel.state().step, FunnelStep::ThankYou);
    }

    #[test]
    fn test_accept_upsell_advances_through_multiple() {
        let mut second = upsell();
        second.sku = "UP-2".to_string();
        let (mut funnel, _) = funnel_with(vec![upsell(), second], MockGateway::default());
        complete(&mut funnel);

        block_on(funnel.accept_upsell());
        assert_eq!(funnel.state().step, FunnelStep::Upsell);
        assert_eq!(funnel.state().upsell_index, 1);

        block_on(funnel.accept_upsell());
        assert_eq!(funnel.state().step, FunnelStep::ThankYou);
    }

    #[test]
    fn test_upsell_charge_failure_still_advances() {
        let gateway = MockGateway {
            fail_charge: true,
            ..Default::default()
        };
        let (mut funnel, gateway_handle) = funnel_with(vec![upsell()], gateway);
        complete(&mut funnel);

        block_on(funnel.accept_upsell());
        assert_eq!(funnel.state().step, FunnelStep::ThankYou);
        assert_eq!(gateway_handle.call_count("charge_upsell"), 1);
        // No summary refresh after a failed charge.
        assert_eq!(gateway_handle.call_count("order_summary"), 1);
    }

    #[test]
    fn test_accept_upsell_without_identifiers_skips_charge() {
        let (mut funnel, gateway) = funnel_with(vec![upsell()], MockGateway::default());
        // Force the step without running completion.
        funnel.state.step = FunnelStep::Upsell;

        block_on(funnel.accept_upsell());
        assert_eq!(gateway.call_count("charge_upsell"), 0);
        assert_eq!(funnel.state().step, FunnelStep::ThankYou);
    }

    #[test]
    fn test_decline_upsell_makes_no_network_call() {
        let (mut funnel, gateway) = funnel_with(vec![upsell()], MockGateway::default());
        complete(&mut funnel);
        let calls_after_completion = gateway.calls.lock().unwrap().len();

        funnel.decline_upsell();
        assert_eq!(funnel.state().step, FunnelStep::ThankYou);
        assert_eq!(gateway.calls.lock().unwrap().len(), calls_after_completion);
    }

    #[test]
    fn test_upsell_callbacks_are_inert_outside_upsell_step() {
        let (mut funnel, gateway) = funnel_with(vec![upsell()], MockGateway::default());
        block_on(funnel.accept_upsell());
        funnel.decline_upsell();
        assert_eq!(funnel.state().step, FunnelStep::Checkout);
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_resume_from_thank_you_location() {
        let gateway = Arc::new(MockGateway::default());
        let route = FunnelRoute::parse("/thank-you/", "order_id=77&pi_id=abc");
        let funnel = block_on(CheckoutFunnel::resume(
            config(vec![]),
            gateway.clone(),
            route,
        ));

        assert_eq!(funnel.state().step, FunnelStep::ThankYou);
        assert_eq!(funnel.state().order_id.as_ref().unwrap().as_str(), "77");
        assert_eq!(
            funnel.state().payment_reference.as_ref().unwrap().as_str(),
            "abc"
        );
        assert_eq!(gateway.call_count("order_summary"), 1);
        assert!(funnel.state().order_summary.is_some());
    }

    #[test]
    fn test_resume_without_identifiers_starts_at_checkout() {
        let gateway = Arc::new(MockGateway::default());
        let route = FunnelRoute::parse("/upsell/", "");
        let funnel = block_on(CheckoutFunnel::resume(
            config(vec![]),
            gateway.clone(),
            route,
        ));

        assert_eq!(funnel.state().step, FunnelStep::Checkout);
        assert_eq!(gateway.call_count("order_summary"), 0);
    }

    #[test]
    fn test_resume_seeds_navigation() {
        let gateway = Arc::new(MockGateway::default());
        let route = FunnelRoute::parse("/thank-you/", "order_id=77");
        let mut funnel = block_on(CheckoutFunnel::resume(config(vec![]), gateway, route));

        // The location already matches the restored state; no redundant
        // history entry is produced.
        assert_eq!(funnel.navigation_update(), None);
    }

    #[test]
    fn test_navigation_follows_steps() {
        let (mut funnel, _) = funnel_with(vec![upsell()], MockGateway::default());
        assert_eq!(funnel.navigation_update(), Some(FunnelRoute::Checkout));
        assert_eq!(funnel.navigation_update(), None);

        complete(&mut funnel);
        let route = funnel.navigation_update().unwrap();
        assert_eq!(route.to_location(), "/upsell/?order_id=ord-1&pi_id=pi_abc");
    }

    #[test]
    fn test_event_forces_return_to_checkout() {
        let (mut funnel, _) = funnel_with(vec![upsell()], MockGateway::default());
        complete(&mut funnel);
        assert_eq!(funnel.state().step, FunnelStep::Upsell);

        let publisher = funnel.event_publisher();
        publisher.request_offer("kit");
        funnel.pump_events();

        assert_eq!(funnel.state().step, FunnelStep::Checkout);
        assert_eq!(
            funnel.state().selected_offer_id.as_ref().unwrap().as_str(),
            "kit"
        );
        // The in-progress order is abandoned.
        assert!(funnel.state().order_id.is_none());
        assert!(funnel.state().order_summary.is_none());
        assert_eq!(funnel.state().upsell_index, 0);
    }

    #[test]
    fn test_event_with_active_offer_still_returns_to_checkout() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        complete(&mut funnel);
        assert_eq!(funnel.state().step, FunnelStep::ThankYou);

        funnel.event_publisher().request_offer("single");
        funnel.pump_events();
        assert_eq!(funnel.state().step, FunnelStep::Checkout);
    }

    #[test]
    fn test_cart_passthrough_recomputes() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.set_offer_quantity(3);

        let items = funnel.cart_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);

        let summary = funnel.price_summary().unwrap();
        assert_eq!(summary.discounted.amount_cents, 15000);
    }

    #[test]
    fn test_customer_details_are_recorded() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.set_customer(CustomerDetails {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            phone: None,
        });
        assert_eq!(
            funnel.state().customer.as_ref().unwrap().email,
            "jane@example.com"
        );
    }

    #[test]
    fn test_role_minimum_holds_after_any_sequence() {
        let (mut funnel, _) = funnel_with(vec![], MockGateway::default());
        funnel.select_offer("kit");

        for quantity in [5, 0, -2, 3, 1] {
            funnel.set_kit_quantity("core", quantity);
            assert!(funnel.state().kit_selection.quantity("core") >= 2);
            funnel.set_kit_quantity("extra", quantity);
            assert!(funnel.state().kit_selection.quantity("extra") >= 0);
        }
    }
}
