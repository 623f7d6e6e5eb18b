//! Offer, pricing, and order domain types for funnel checkout.
//!
//! This crate is the pure half of the funnel core:
//!
//! - **Offer**: the three purchasable shapes (single, fixed bundle,
//!   customizable kit) as a closed sum type
//! - **Selection**: per-kit quantity choices with role-derived minimums
//! - **Pricing**: deterministic cart expansion and price summaries
//! - **Order**: read-only order-summary snapshots from the backend
//!
//! Everything here is synchronous and I/O-free; the orchestrator in
//! `funnel-flow` composes these types with the gateway boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use funnel_commerce::prelude::*;
//!
//! let offer = Offer::Single(SingleOffer {
//!     id: OfferId::new("offer-1"),
//!     name: "Starter Pack".to_string(),
//!     sku: "STARTER-001".to_string(),
//!     quantity: 1,
//!     calculated_price: Money::new(5000, Currency::USD),
//!     regular_price: None,
//! });
//!
//! let items = pricing::cart_items(&offer, &KitSelection::default(), 3);
//! let summary = pricing::price_summary(&offer, &KitSelection::default(), 3);
//! println!("Total: {}", summary.discounted.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod customer;
pub mod offer;
pub mod order;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Offers
    pub use crate::offer::{
        BundleItem, BundleOffer, KitDiscount, KitOffer, KitProduct, KitRole, KitSelection, Offer,
        SingleOffer, UpsellOffer,
    };

    // Cart output
    pub use crate::cart::{CartItem, PriceSummary};

    // Pricing engine
    pub use crate::pricing::{self, cart_items, price_summary};

    // Order projection
    pub use crate::order::{OrderStatus, OrderSummary, OrderSummaryItem};

    // Customer
    pub use crate::customer::{Address, CustomerDetails};
}
