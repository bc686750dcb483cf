// src/domain/listing.rs

use serde::{Deserialize, Serialize};

/// Placeholder strings written in place of any field the card did not carry.
/// A listing never has an absent field, only one of these.
pub mod sentinel {
    pub const PROPERTY_INFO: &str = "Property Type Unavailable";
    pub const PROPERTY_TYPE: &str = "Type Unavailable";
    pub const BEDROOMS: &str = "Bedrooms Unavailable";
    pub const BATHROOMS: &str = "Bathrooms Unavailable";
    pub const ADDRESS: &str = "Address Unavailable";
    pub const DESCRIPTION: &str = "Description Unavailable";
    pub const PRICE: &str = "Price Unavailable";
    pub const SECONDARY_PRICE: &str = "Secondary Price Unavailable";
    pub const URL: &str = "URL Unavailable";
    pub const AGENT_NAME: &str = "Agent Name Unavailable";
    pub const AGENT_LOGO: &str = "Agent Logo Unavailable";
    pub const AGENT_PHONE: &str = "Agent Phone Unavailable";
}

/// One property card as extracted from a results page.
///
/// Counts and prices stay as display text ("2 bedrooms", "£250,000");
/// numeric interpretation happens only where it is needed (see
/// [`crate::domain::aggregate::parse_numeric`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub property_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub address: String,
    pub description: String,
    pub price: String,
    pub secondary_price: String,
    pub url: String,
    pub agent: Agent,
}

/// The branch a listing is marketed by. `name` is the aggregation key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub logo: String,
    pub phone: String,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            property_type: sentinel::PROPERTY_TYPE.to_string(),
            bedrooms: sentinel::BEDROOMS.to_string(),
            bathrooms: sentinel::BATHROOMS.to_string(),
            address: sentinel::ADDRESS.to_string(),
            description: sentinel::DESCRIPTION.to_string(),
            price: sentinel::PRICE.to_string(),
            secondary_price: sentinel::SECONDARY_PRICE.to_string(),
            url: sentinel::URL.to_string(),
            agent: Agent::default(),
        }
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            name: sentinel::AGENT_NAME.to_string(),
            logo: sentinel::AGENT_LOGO.to_string(),
            phone: sentinel::AGENT_PHONE.to_string(),
        }
    }
}
