//! Offer types.
//!
//! An [`Offer`] is one of three purchasable shapes, discriminated by the
//! `type` field on the wire. The shapes are a closed sum type so the
//! pricing engine matches exhaustively instead of probing fields at
//! runtime.

mod selection;

pub use selection::KitSelection;

use crate::error::CommerceError;
use crate::ids::OfferId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A purchasable offer shown at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Offer {
    /// One product SKU at a fixed quantity per unit.
    Single(SingleOffer),
    /// A fixed list of bundle items with no customer choice.
    FixedBundle(BundleOffer),
    /// A kit the customer composes from role-based products.
    CustomizableKit(KitOffer),
}

impl Offer {
    /// The offer's identifier.
    pub fn id(&self) -> &OfferId {
        match self {
            Offer::Single(o) => &o.id,
            Offer::FixedBundle(o) => &o.id,
            Offer::CustomizableKit(o) => &o.id,
        }
    }

    /// The offer's display name.
    pub fn name(&self) -> &str {
        match self {
            Offer::Single(o) => &o.name,
            Offer::FixedBundle(o) => &o.name,
            Offer::CustomizableKit(o) => &o.name,
        }
    }

    /// The wire discriminator for this shape.
    pub fn kind(&self) -> &'static str {
        match self {
            Offer::Single(_) => "single",
            Offer::FixedBundle(_) => "fixed_bundle",
            Offer::CustomizableKit(_) => "customizable_kit",
        }
    }

    /// Whether this is a customizable kit.
    pub fn is_kit(&self) -> bool {
        matches!(self, Offer::CustomizableKit(_))
    }

    /// Validate admin-entered offer data.
    pub fn validate(&self) -> Result<(), CommerceError> {
        match self {
            Offer::Single(o) => {
                if o.quantity < 1 {
                    return Err(CommerceError::InvalidQuantity(o.quantity));
                }
                if !o.calculated_price.is_positive() {
                    return Err(CommerceError::InvalidPrice {
                        sku: o.sku.clone(),
                        amount_cents: o.calculated_price.amount_cents,
                    });
                }
            }
            Offer::FixedBundle(o) => {
                if o.items.is_empty() {
                    return Err(CommerceError::EmptyOffer(o.id.to_string()));
                }
                for item in &o.items {
                    if item.quantity < 1 {
                        return Err(CommerceError::InvalidQuantity(item.quantity));
                    }
                }
            }
            Offer::CustomizableKit(o) => {
                if o.products.is_empty() {
                    return Err(CommerceError::EmptyOffer(o.id.to_string()));
                }
                for product in &o.products {
                    if product.role == KitRole::Must && product.quantity < 1 {
                        return Err(CommerceError::InvalidQuantity(product.quantity));
                    }
                }
                if let KitDiscount::Percent { value } = &o.discount {
                    if !(0.0..=100.0).contains(value) {
                        return Err(CommerceError::InvalidDiscount(*value));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A single-SKU offer with a computed price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleOffer {
    /// Unique offer identifier.
    pub id: OfferId,
    /// Display name.
    pub name: String,
    /// Product SKU.
    pub sku: String,
    /// Quantity of the SKU per purchased unit.
    pub quantity: i64,
    /// Computed offer price for one unit of the offer.
    pub calculated_price: Money,
    /// Compare-at price for display.
    pub regular_price: Option<Money>,
}

impl SingleOffer {
    /// Per-item display price (offer price spread across the SKU count).
    pub fn unit_price(&self) -> Money {
        self.calculated_price.divide(self.quantity.max(1))
    }

    /// Per-item compare-at price, when a regular price is set.
    pub fn unit_regular_price(&self) -> Option<Money> {
        self.regular_price.map(|p| p.divide(self.quantity.max(1)))
    }
}

/// A fixed bundle of items sold together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleOffer {
    /// Unique offer identifier.
    pub id: OfferId,
    /// Display name.
    pub name: String,
    /// Items in admin-defined order.
    pub items: Vec<BundleItem>,
}

/// One line of a fixed bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleItem {
    /// Product SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Quantity per bundle.
    pub quantity: i64,
    /// Base unit price.
    pub price: Money,
    /// Override sale price, when discounted below `price`.
    pub sale_price: Option<Money>,
    /// Compare-at unit price for display.
    pub regular_price: Option<Money>,
}

impl BundleItem {
    /// The unit price actually charged.
    pub fn unit_sale_price(&self) -> Money {
        self.sale_price.unwrap_or(self.price)
    }

    /// The unit price shown as struck-through original.
    pub fn unit_regular_price(&self) -> Money {
        self.regular_price.unwrap_or(self.price)
    }
}

/// A customizable kit offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitOffer {
    /// Unique offer identifier.
    pub id: OfferId,
    /// Display name.
    pub name: String,
    /// Kit products in admin-defined order.
    pub products: Vec<KitProduct>,
    /// Kit-level discount applied to the tiered subtotal.
    #[serde(default)]
    pub discount: KitDiscount,
}

impl KitOffer {
    /// Look up a kit product by SKU.
    pub fn product(&self, sku: &str) -> Option<&KitProduct> {
        self.products.iter().find(|p| p.sku == sku)
    }

    /// The currency this kit is priced in.
    pub fn currency(&self) -> Currency {
        self.products
            .first()
            .map(|p| p.discounted_price.currency)
            .unwrap_or_default()
    }
}

/// Whether a kit product is mandatory or elective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitRole {
    /// Mandatory; the selection cannot drop below the admin quantity.
    Must,
    /// Elective; may be omitted entirely.
    Optional,
}

impl KitRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            KitRole::Must => "must",
            KitRole::Optional => "optional",
        }
    }
}

/// A product slot within a kit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KitProduct {
    /// Product SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Role of this product in the kit.
    pub role: KitRole,
    /// Admin-set quantity (the included amount for `must` products).
    pub quantity: i64,
    /// Regular unit price, used for the original-price display.
    pub regular_price: Money,
    /// Discounted unit price inside the kit.
    pub discounted_price: Money,
    /// Unit price for quantities beyond the included amount.
    pub subsequent_sale_price: Option<Money>,
    /// Per-product discount percent, carried on cart lines for display.
    pub discount_percent: Option<f64>,
}

impl KitProduct {
    /// Role-derived minimum quantity for this product.
    ///
    /// A `must` product can never drop below its admin quantity; an
    /// `optional` product can be omitted.
    pub fn min_quantity(&self) -> i64 {
        match self.role {
            KitRole::Must => self.quantity.max(1),
            KitRole::Optional => 0,
        }
    }

    /// Whether a distinct beyond-minimum tier price exists.
    pub fn has_tier_price(&self) -> bool {
        self.subsequent_sale_price
            .map(|p| p != self.discounted_price)
            .unwrap_or(false)
    }
}

/// Kit-level discount applied after line expansion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KitDiscount {
    /// No kit-level discount.
    #[default]
    None,
    /// Percent off the kit subtotal (0.0 - 100.0).
    Percent { value: f64 },
    /// Fixed amount off the kit subtotal, floored at zero.
    Fixed { value: Money },
}

impl KitDiscount {
    /// Apply this discount to a subtotal.
    ///
    /// The percent path is the crate's single rounding point: the
    /// fractional factor is applied once, on the total.
    pub fn apply(&self, subtotal: Money) -> Money {
        match self {
            KitDiscount::None => subtotal,
            KitDiscount::Percent { value } => subtotal.multiply_decimal(1.0 - value / 100.0),
            KitDiscount::Fixed { value } => {
                // Cap at the subtotal so a large fixed discount floors at zero.
                let capped = value.amount_cents.min(subtotal.amount_cents).max(0);
                subtotal.subtract(&Money::new(capped, subtotal.currency))
            }
        }
    }
}

/// A post-purchase upsell offer, charged against the original payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsellOffer {
    /// Product SKU.
    pub sku: String,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Quantity charged on acceptance.
    #[serde(default = "default_upsell_quantity")]
    pub quantity: i64,
    /// Discount percent forwarded to the backend charge.
    pub discount_percent: Option<f64>,
}

fn default_upsell_quantity() -> i64 {
    1
}
