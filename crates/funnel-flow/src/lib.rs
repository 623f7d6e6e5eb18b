//! Checkout orchestrator for funnel checkout.
//!
//! This crate owns the funnel's runtime state and sequencing:
//!
//! - **Config**: the immutable per-funnel app configuration
//! - **State**: the step machine record ([`state::FunnelState`])
//! - **Orchestrator**: [`orchestrator::CheckoutFunnel`], the single
//!   mutation point for funnel state
//! - **Gateway**: the async order/payment boundary trait
//! - **Nav**: pure state ↔ browser-path projection with idempotent writes
//! - **Events**: the typed cross-section offer-request channel
//!
//! Step views stay outside this crate: they read the orchestrator's
//! state snapshot and invoke its callbacks, nothing more.

pub mod config;
pub mod events;
pub mod gateway;
pub mod nav;
pub mod orchestrator;
pub mod state;

pub use config::FunnelConfig;
pub use gateway::{CheckoutGateway, GatewayError};
pub use orchestrator::CheckoutFunnel;
pub use state::{FunnelState, FunnelStep};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{Branding, FeatureFlags, FunnelConfig, PaymentMode, PaymentProvider};
    pub use crate::events::{FunnelEvent, FunnelEventPublisher};
    pub use crate::gateway::{CheckoutGateway, GatewayError, GatewayResult, OrderCompletion};
    pub use crate::nav::{FunnelRoute, NavigationSync};
    pub use crate::orchestrator::CheckoutFunnel;
    pub use crate::state::{FunnelState, FunnelStep};

    pub use funnel_commerce::prelude::*;
}
