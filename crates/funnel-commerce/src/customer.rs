//! Customer and address types.

use serde::{Deserialize, Serialize};

/// Customer contact details collected during checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerDetails {
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub phone: Option<String>,
}

impl CustomerDetails {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A shipping address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Address {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Address line 1.
    pub address1: String,
    /// Address line 2 (apt, suite, etc.).
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// State/province code (e.g., "CA").
    pub province_code: Option<String>,
    /// Country code (e.g., "US").
    pub country_code: String,
    /// Postal/ZIP code.
    pub zip: String,
    /// Phone number.
    pub phone: Option<String>,
}

impl Address {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address1.clone()];
        if let Some(ref addr2) = self.address2 {
            parts.push(addr2.clone());
        }
        parts.push(self.city.clone());
        if let Some(ref province) = self.province_code {
            parts.push(province.clone());
        }
        parts.push(self.zip.clone());
        parts.push(self.country_code.clone());
        parts.join(", ")
    }

    /// Check if address is complete enough to ship to.
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.address1.is_empty()
            && !self.city.is_empty()
            && !self.country_code.is_empty()
            && !self.zip.is_empty()
    }
}
