//! Funnel app configuration.
//!
//! The configuration is assembled once by the host (usually from a CMS
//! payload) and handed to the orchestrator immutably.

use funnel_commerce::ids::{FunnelId, OfferId};
use funnel_commerce::offer::{Offer, UpsellOffer};
use serde::{Deserialize, Serialize};

/// Branding fields surfaced to step views.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Branding {
    /// Logo image URL.
    pub logo_url: Option<String>,
    /// Accent color (CSS value).
    pub accent_color: Option<String>,
}

/// Feature flags for optional funnel behavior.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Loyalty-points redemption enabled.
    pub points: bool,
    /// Returning-customer lookup enabled.
    pub customer_lookup: bool,
}

/// Payment provider mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    Test,
    Live,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Test => "test",
            PaymentMode::Live => "live",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, PaymentMode::Live)
    }
}

/// Payment provider configuration for the hosted payment fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentProvider {
    /// Publishable key handed to the hosted fields.
    pub publishable_key: String,
    /// Test or live mode.
    pub mode: PaymentMode,
}

/// Immutable configuration for one funnel mount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunnelConfig {
    /// Funnel identifier.
    pub id: FunnelId,
    /// Funnel display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Purchasable offers, in display order.
    pub offers: Vec<Offer>,
    /// Offer selected on first load.
    pub default_offer_id: Option<OfferId>,
    /// Branding fields.
    #[serde(default)]
    pub branding: Branding,
    /// Country codes eligible for free shipping.
    #[serde(default)]
    pub free_shipping_countries: Vec<String>,
    /// Feature flags.
    #[serde(default)]
    pub features: FeatureFlags,
    /// Payment provider settings.
    #[serde(default)]
    pub payment: PaymentProvider,
    /// Post-purchase upsell offers, in presentation order.
    #[serde(default)]
    pub upsells: Vec<UpsellOffer>,
    /// Master switch for the upsell step.
    #[serde(default)]
    pub upsells_enabled: bool,
    /// Confirmation-page copy.
    pub confirmation_message: Option<String>,
    /// Footer text.
    pub footer_text: Option<String>,
}

impl FunnelConfig {
    /// Create a minimal configuration.
    pub fn new(id: impl Into<FunnelId>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            offers: Vec::new(),
            default_offer_id: None,
            branding: Branding::default(),
            free_shipping_countries: Vec::new(),
            features: FeatureFlags::default(),
            payment: PaymentProvider::default(),
            upsells: Vec::new(),
            upsells_enabled: false,
            confirmation_message: None,
            footer_text: None,
        }
    }

    /// Set the offer list.
    pub fn with_offers(mut self, offers: Vec<Offer>) -> Self {
        self.offers = offers;
        self
    }

    /// Set the default offer.
    pub fn with_default_offer(mut self, id: impl Into<OfferId>) -> Self {
        self.default_offer_id = Some(id.into());
        self
    }

    /// Set branding fields.
    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }

    /// Set the free-shipping country list.
    pub fn with_free_shipping_countries(mut self, countries: Vec<String>) -> Self {
        self.free_shipping_countries = countries;
        self
    }

    /// Set feature flags.
    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Set payment provider settings.
    pub fn with_payment(mut self, payment: PaymentProvider) -> Self {
        self.payment = payment;
        self
    }

    /// Set the upsell list and enable the upsell step.
    pub fn with_upsells(mut self, upsells: Vec<UpsellOffer>) -> Self {
        self.upsells_enabled = !upsells.is_empty();
        self.upsells = upsells;
        self
    }

    /// Set the confirmation-page copy.
    pub fn with_confirmation_message(mut self, message: impl Into<String>) -> Self {
        self.confirmation_message = Some(message.into());
        self
    }

    /// Set the footer text.
    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = Some(text.into());
        self
    }

    /// Whether the configuration is complete enough to render checkout.
    ///
    /// Configuration may arrive asynchronously; until this returns true
    /// the host shows a neutral placeholder instead of failing.
    pub fn is_ready(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty() && !self.offers.is_empty()
    }

    /// Look up an offer by id.
    pub fn find_offer(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.iter().find(|o| o.id() == id)
    }

    /// The offer selected on first load: the configured default when it
    /// resolves, else the first offer.
    pub fn initial_offer(&self) -> Option<&Offer> {
        self.default_offer_id
            .as_ref()
            .and_then(|id| self.find_offer(id))
            .or_else(|| self.offers.first())
    }

    /// Upsells shown after purchase (empty when the step is disabled).
    pub fn active_upsells(&self) -> &[UpsellOffer] {
        if self.upsells_enabled {
            &self.upsells
        } else {
            &[]
        }
    }

    /// Whether a country code qualifies for free shipping.
    pub fn is_free_shipping_country(&self, country_code: &str) -> bool {
        self.free_shipping_countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_commerce::money::{Currency, Money};
    use funnel_commerce::offer::SingleOffer;

    fn offer(id: &str) -> Offer {
        Offer::Single(SingleOffer {
            id: OfferId::new(id),
            name: id.to_string(),
            sku: format!("SKU-{id}"),
            quantity: 1,
            calculated_price: Money::new(5000, Currency::USD),
            regular_price: None,
        })
    }

    #[test]
    fn test_config_readiness() {
        let config = FunnelConfig::new("f-1", "Summer Funnel", "summer");
        assert!(!config.is_ready());

        let config = config.with_offers(vec![offer("a")]);
        assert!(config.is_ready());

        let nameless = FunnelConfig::new("f-1", "", "summer").with_offers(vec![offer("a")]);
        assert!(!nameless.is_ready());
    }

    #[test]
    fn test_initial_offer_prefers_default() {
        let config = FunnelConfig::new("f-1", "Funnel", "funnel")
            .with_offers(vec![offer("a"), offer("b")])
            .with_default_offer("b");
        assert_eq!(config.initial_offer().unwrap().id().as_str(), "b");
    }

    #[test]
    fn test_initial_offer_falls_back_to_first() {
        let config = FunnelConfig::new("f-1", "Funnel", "funnel")
            .with_offers(vec![offer("a"), offer("b")])
            .with_default_offer("missing");
        assert_eq!(config.initial_offer().unwrap().id().as_str(), "a");
    }

    #[test]
    fn test_active_upsells_respects_switch() {
        let upsell = UpsellOffer {
            sku: "UP-1".to_string(),
            name: "Add-on".to_string(),
            price: Money::new(900, Currency::USD),
            quantity: 1,
            discount_percent: None,
        };
        let mut config =
            FunnelConfig::new("f-1", "Funnel", "funnel").with_upsells(vec![upsell.clone()]);
        assert_eq!(config.active_upsells().len(), 1);

        config.upsells_enabled = false;
        assert!(config.active_upsells().is_empty());
    }

    #[test]
    fn test_free_shipping_country_is_case_insensitive() {
        let config = FunnelConfig::new("f-1", "Funnel", "funnel")
            .with_free_shipping_countries(vec!["US".to_string(), "CA".to_string()]);
        assert!(config.is_free_shipping_country("us"));
        assert!(!config.is_free_shipping_country("DE"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let json = serde_json::json!({
            "id": "f-1",
            "name": "Funnel",
            "slug": "funnel",
            "offers": [],
            "default_offer_id": null,
            "confirmation_message": null,
            "footer_text": null
        });
        let config: FunnelConfig = serde_json::from_value(json).unwrap();
        assert!(!config.upsells_enabled);
        assert!(config.free_shipping_countries.is_empty());
        assert_eq!(config.payment.mode, PaymentMode::Test);
    }
}
