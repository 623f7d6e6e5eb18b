//! Navigation state synchronization.
//!
//! The browser-visible location is a projection of funnel state, not a
//! second source of truth. [`FunnelRoute`] is the pure mapping in both
//! directions; [`NavigationSync`] adds write idempotence so the host
//! never pushes redundant history entries.

use crate::state::{FunnelState, FunnelStep};
use funnel_commerce::ids::{OrderId, PaymentRef};

/// Query parameter carrying the finalized order id.
pub const ORDER_ID_PARAM: &str = "order_id";
/// Query parameter carrying the payment reference.
pub const PAYMENT_REF_PARAM: &str = "pi_id";

/// Canonical browser location for a funnel step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunnelRoute {
    Checkout,
    Processing,
    Upsell {
        order_id: Option<OrderId>,
        payment_ref: Option<PaymentRef>,
    },
    ThankYou {
        order_id: Option<OrderId>,
        payment_ref: Option<PaymentRef>,
    },
}

impl FunnelRoute {
    /// Project funnel state onto its canonical route.
    pub fn for_state(state: &FunnelState) -> Self {
        match state.step {
            FunnelStep::Checkout => FunnelRoute::Checkout,
            FunnelStep::Processing => FunnelRoute::Processing,
            FunnelStep::Upsell => FunnelRoute::Upsell {
                order_id: state.order_id.clone(),
                payment_ref: state.payment_reference.clone(),
            },
            FunnelStep::ThankYou => FunnelRoute::ThankYou {
                order_id: state.order_id.clone(),
                payment_ref: state.payment_reference.clone(),
            },
        }
    }

    /// Inverse mapping: parse a browser location into a route.
    ///
    /// Anything that is not a recognized funnel path resolves to
    /// checkout; a stale `/processing/` also restarts at checkout since
    /// there is no in-flight completion to rejoin.
    pub fn parse(path: &str, query: &str) -> Self {
        let segment = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        match segment {
            "processing" => FunnelRoute::Processing,
            "upsell" => {
                let (order_id, payment_ref) = parse_identifiers(query);
                FunnelRoute::Upsell {
                    order_id,
                    payment_ref,
                }
            }
            "thank-you" => {
                let (order_id, payment_ref) = parse_identifiers(query);
                FunnelRoute::ThankYou {
                    order_id,
                    payment_ref,
                }
            }
            _ => FunnelRoute::Checkout,
        }
    }

    /// The path suffix for this route.
    pub fn path(&self) -> &'static str {
        match self {
            FunnelRoute::Checkout => "/checkout/",
            FunnelRoute::Processing => "/processing/",
            FunnelRoute::Upsell { .. } => "/upsell/",
            FunnelRoute::ThankYou { .. } => "/thank-you/",
        }
    }

    /// Full location string (path plus query when identifiers exist).
    pub fn to_location(&self) -> String {
        let mut location = self.path().to_string();
        let mut params = Vec::new();
        if let Some(order_id) = self.order_id() {
            params.push(format!("{}={}", ORDER_ID_PARAM, order_id));
        }
        if let Some(payment_ref) = self.payment_ref() {
            params.push(format!("{}={}", PAYMENT_REF_PARAM, payment_ref));
        }
        if !params.is_empty() {
            location.push('?');
            location.push_str(&params.join("&"));
        }
        location
    }

    /// Order id carried by this route.
    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            FunnelRoute::Upsell { order_id, .. } | FunnelRoute::ThankYou { order_id, .. } => {
                order_id.as_ref()
            }
            _ => None,
        }
    }

    /// Payment reference carried by this route.
    pub fn payment_ref(&self) -> Option<&PaymentRef> {
        match self {
            FunnelRoute::Upsell { payment_ref, .. }
            | FunnelRoute::ThankYou { payment_ref, .. } => payment_ref.as_ref(),
            _ => None,
        }
    }

    /// The step this route resumes into.
    pub fn step(&self) -> FunnelStep {
        match self {
            FunnelRoute::Checkout => FunnelStep::Checkout,
            FunnelRoute::Processing => FunnelStep::Processing,
            FunnelRoute::Upsell { .. } => FunnelStep::Upsell,
            FunnelRoute::ThankYou { .. } => FunnelStep::ThankYou,
        }
    }

    /// Whether this route restores a post-payment step on load.
    ///
    /// True only for upsell/thank-you locations that carry an order
    /// identifier to look the purchase up by.
    pub fn resumes_mid_flow(&self) -> bool {
        matches!(
            self,
            FunnelRoute::Upsell { .. } | FunnelRoute::ThankYou { .. }
        ) && (self.order_id().is_some() || self.payment_ref().is_some())
    }
}

fn parse_identifiers(query: &str) -> (Option<OrderId>, Option<PaymentRef>) {
    let mut order_id = None;
    let mut payment_ref = None;
    for pair in query.trim_start_matches('?').split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        match key {
            ORDER_ID_PARAM => order_id = Some(OrderId::new(value)),
            PAYMENT_REF_PARAM => payment_ref = Some(PaymentRef::new(value)),
            _ => {}
        }
    }
    (order_id, payment_ref)
}

/// Idempotent writer for browser navigation state.
///
/// Tracks the last target handed to the host; `sync` yields a new write
/// only when the projection of the current state differs from it.
#[derive(Debug, Default)]
pub struct NavigationSync {
    current: Option<FunnelRoute>,
}

impl NavigationSync {
    /// A synchronizer that has written nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A synchronizer seeded with the location the page loaded at.
    pub fn start_at(route: FunnelRoute) -> Self {
        Self {
            current: Some(route),
        }
    }

    /// Compute the browser write for the current state, if one is due.
    pub fn sync(&mut self, state: &FunnelState) -> Option<FunnelRoute> {
        let target = FunnelRoute::for_state(state);
        if self.current.as_ref() == Some(&target) {
            return None;
        }
        self.current = Some(target.clone());
        Some(target)
    }

    /// The last route written (or seeded).
    pub fn current(&self) -> Option<&FunnelRoute> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thank_you_with_identifiers() {
        let route = FunnelRoute::parse("/thank-you/", "order_id=77&pi_id=abc");
        assert_eq!(route.step(), FunnelStep::ThankYou);
        assert_eq!(route.order_id().unwrap().as_str(), "77");
        assert_eq!(route.payment_ref().unwrap().as_str(), "abc");
        assert!(route.resumes_mid_flow());
    }

    #[test]
    fn test_parse_tolerates_prefix_and_leading_question_mark() {
        let route = FunnelRoute::parse("/f/summer/upsell/", "?order_id=9");
        assert_eq!(route.step(), FunnelStep::Upsell);
        assert_eq!(route.order_id().unwrap().as_str(), "9");
    }

    #[test]
    fn test_parse_without_identifiers_does_not_resume() {
        let route = FunnelRoute::parse("/upsell/", "");
        assert!(!route.resumes_mid_flow());

        let route = FunnelRoute::parse("/thank-you/", "order_id=");
        assert!(!route.resumes_mid_flow());
    }

    #[test]
    fn test_unknown_paths_resolve_to_checkout() {
        assert_eq!(FunnelRoute::parse("/", ""), FunnelRoute::Checkout);
        assert_eq!(FunnelRoute::parse("/pricing/", ""), FunnelRoute::Checkout);
        assert_eq!(FunnelRoute::parse("", ""), FunnelRoute::Checkout);
    }

    #[test]
    fn test_to_location_includes_identifiers() {
        let route = FunnelRoute::ThankYou {
            order_id: Some(OrderId::new("77")),
            payment_ref: Some(PaymentRef::new("abc")),
        };
        assert_eq!(route.to_location(), "/thank-you/?order_id=77&pi_id=abc");

        let bare = FunnelRoute::Upsell {
            order_id: None,
            payment_ref: None,
        };
        assert_eq!(bare.to_location(), "/upsell/");
    }

    #[test]
    fn test_location_roundtrip() {
        let route = FunnelRoute::Upsell {
            order_id: Some(OrderId::new("42")),
            payment_ref: Some(PaymentRef::new("pi_9")),
        };
        let location = route.to_location();
        let (path, query) = location.split_once('?').unwrap();
        assert_eq!(FunnelRoute::parse(path, query), route);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut nav = NavigationSync::new();
        let state = FunnelState::new();

        assert_eq!(nav.sync(&state), Some(FunnelRoute::Checkout));
        assert_eq!(nav.sync(&state), None);
    }

    #[test]
    fn test_sync_writes_on_step_change() {
        let mut nav = NavigationSync::new();
        let mut state = FunnelState::new();
        nav.sync(&state);

        state.step = FunnelStep::Processing;
        assert_eq!(nav.sync(&state), Some(FunnelRoute::Processing));
    }

    #[test]
    fn test_seeded_sync_skips_initial_write() {
        let mut state = FunnelState::new();
        state.step = FunnelStep::ThankYou;
        state.order_id = Some(OrderId::new("77"));

        let mut nav = NavigationSync::start_at(FunnelRoute::for_state(&state));
        assert_eq!(nav.sync(&state), None);
    }
}
