//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in funnel domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Offer not found in the catalog.
    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    /// Product not part of the selected offer.
    #[error("Product not in offer: {0}")]
    ProductNotInOffer(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid price on an offer (zero or negative where a positive
    /// amount is required).
    #[error("Invalid price on {sku}: {amount_cents} cents")]
    InvalidPrice { sku: String, amount_cents: i64 },

    /// Discount value out of range.
    #[error("Invalid discount value: {0}")]
    InvalidDiscount(f64),

    /// Offer has no purchasable content.
    #[error("Offer {0} is empty")]
    EmptyOffer(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
