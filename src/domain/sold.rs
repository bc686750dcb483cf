// src/domain/sold.rs

use serde::{Deserialize, Serialize};

/// Placeholders for a sold-price card that lacks the field.
pub mod sentinel {
    pub use crate::domain::listing::sentinel::{AGENT_NAME, AGENT_PHONE};

    pub const HISTORY: &str = "History Unavailable";
    pub const SOLD_PRICE: &str = "Sold Price Unavailable";
    pub const TENURE: &str = "Tenure Unavailable";
    pub const PROPERTY_NAME: &str = "Property Name Unavailable";
}

/// One card from a sold-price history page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldRecord {
    pub agent_name: String,
    pub agent_phone: String,
    pub property_name: String,
    pub property_details: SoldDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldDetails {
    /// Past transactions as displayed, one per line.
    pub property_history: String,
    pub sold_price: String,
    pub tenure: String,
}

impl Default for SoldRecord {
    fn default() -> Self {
        Self {
            agent_name: sentinel::AGENT_NAME.to_string(),
            agent_phone: sentinel::AGENT_PHONE.to_string(),
            property_name: sentinel::PROPERTY_NAME.to_string(),
            property_details: SoldDetails::default(),
        }
    }
}

impl Default for SoldDetails {
    fn default() -> Self {
        Self {
            property_history: sentinel::HISTORY.to_string(),
            sold_price: sentinel::SOLD_PRICE.to_string(),
            tenure: sentinel::TENURE.to_string(),
        }
    }
}
