//! The pricing engine.
//!
//! Pure, synchronous functions turning (offer, kit selection, offer
//! quantity) into cart lines and totals. Given identical inputs the
//! output is identical, so callers recompute on every change instead of
//! caching.

use crate::cart::{CartItem, PriceSummary};
use crate::money::Money;
use crate::offer::{BundleOffer, KitOffer, KitRole, KitSelection, Offer, SingleOffer};

/// Label on the included-at-kit-price portion of a tier-split line.
pub const KIT_INCLUDED_LABEL: &str = "Included in kit";

/// Expand the current selection into cart lines.
pub fn cart_items(offer: &Offer, selection: &KitSelection, offer_quantity: i64) -> Vec<CartItem> {
    let offer_quantity = offer_quantity.max(1);
    match offer {
        Offer::Single(single) => single_cart_items(single, offer_quantity),
        Offer::FixedBundle(bundle) => bundle_cart_items(bundle, offer_quantity),
        // Customization replaces bulk multiplication; the multiplier is
        // ignored for kits.
        Offer::CustomizableKit(kit) => kit_cart_items(kit, selection),
    }
}

/// Compute the original and discounted totals for the current selection.
pub fn price_summary(offer: &Offer, selection: &KitSelection, offer_quantity: i64) -> PriceSummary {
    let offer_quantity = offer_quantity.max(1);
    match offer {
        Offer::Single(single) => {
            let discounted = single.calculated_price.multiply(offer_quantity);
            let original = single
                .regular_price
                .unwrap_or(single.calculated_price)
                .multiply(offer_quantity);
            PriceSummary {
                original,
                discounted,
            }
        }
        Offer::FixedBundle(bundle) => {
            let currency = bundle
                .items
                .first()
                .map(|i| i.price.currency)
                .unwrap_or_default();
            let mut original = Money::zero(currency);
            let mut discounted = Money::zero(currency);
            for item in &bundle.items {
                let quantity = item.quantity * offer_quantity;
                original = original.add(&item.unit_regular_price().multiply(quantity));
                discounted = discounted.add(&item.unit_sale_price().multiply(quantity));
            }
            PriceSummary {
                original,
                discounted,
            }
        }
        Offer::CustomizableKit(kit) => {
            let currency = kit.currency();
            let subtotal = kit_cart_items(kit, selection)
                .iter()
                .fold(Money::zero(currency), |acc, item| acc.add(&item.line_total()));
            let discounted = kit.discount.apply(subtotal);

            // Original price is independent of discount tiering.
            let mut original = Money::zero(currency);
            for product in &kit.products {
                let selected = selection.quantity(&product.sku);
                if selected > 0 {
                    original = original.add(&product.regular_price.multiply(selected));
                }
            }
            PriceSummary {
                original,
                discounted,
            }
        }
    }
}

fn single_cart_items(single: &SingleOffer, offer_quantity: i64) -> Vec<CartItem> {
    vec![CartItem {
        sku: single.sku.clone(),
        name: single.name.clone(),
        quantity: single.quantity.max(1) * offer_quantity,
        unit_price: single.unit_price(),
        regular_unit_price: single.unit_regular_price(),
        label: None,
        discount_percent: None,
    }]
}

fn bundle_cart_items(bundle: &BundleOffer, offer_quantity: i64) -> Vec<CartItem> {
    bundle
        .items
        .iter()
        .map(|item| CartItem {
            sku: item.sku.clone(),
            name: item.name.clone(),
            quantity: item.quantity * offer_quantity,
            unit_price: item.unit_sale_price(),
            regular_unit_price: item.regular_price,
            label: None,
            discount_percent: None,
        })
        .collect()
}

fn kit_cart_items(kit: &KitOffer, selection: &KitSelection) -> Vec<CartItem> {
    let mut items = Vec::new();
    for product in &kit.products {
        let selected = selection.quantity(&product.sku);
        if selected <= 0 {
            continue;
        }

        let min_quantity = product.min_quantity();
        let tiered =
            product.role == KitRole::Must && selected > min_quantity && product.has_tier_price();

        if tiered {
            // Required units at the kit price, the remainder at the
            // subsequent price.
            items.push(CartItem {
                sku: product.sku.clone(),
                name: product.name.clone(),
                quantity: min_quantity,
                unit_price: product.discounted_price,
                regular_unit_price: Some(product.regular_price),
                label: Some(KIT_INCLUDED_LABEL.to_string()),
                discount_percent: None,
            });
            items.push(CartItem {
                sku: product.sku.clone(),
                name: product.name.clone(),
                quantity: selected - min_quantity,
                unit_price: product
                    .subsequent_sale_price
                    .unwrap_or(product.discounted_price),
                regular_unit_price: Some(product.regular_price),
                label: None,
                discount_percent: None,
            });
        } else {
            items.push(CartItem {
                sku: product.sku.clone(),
                name: product.name.clone(),
                quantity: selected,
                unit_price: product.discounted_price,
                regular_unit_price: Some(product.regular_price),
                label: None,
                discount_percent: product.discount_percent,
            });
        }
    }
    items
}
