// src/scraper/selectors.rs

use crate::scraper::ScraperError;
use scraper::Selector;

/// Raw CSS selectors for one results-page layout.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub card: &'static str,
    pub property_info: &'static str,
    pub address: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub secondary_price: &'static str,
    pub link: &'static str,
    pub agent_logo: &'static str,
    pub agent_name: &'static str,
    /// "Added on ... by <agent>" block, used when `agent_name` is missing.
    pub agent_summary: &'static str,
    pub agent_phone: &'static str,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            card: ".propertyCard-wrapper",
            property_info: ".property-information",
            address: "address.propertyCard-address",
            description: ".propertyCard-description span",
            price: ".propertyCard-priceValue",
            secondary_price: ".propertyCard-secondaryPriceValue",
            link: "a.propertyCard-link",
            agent_logo: ".propertyCard-branchLogo-image",
            agent_name: ".propertyCard-branchSummary-branchName",
            agent_summary: "div.propertyCard-branchSummary",
            agent_phone: ".propertyCard-contactsPhoneNumber",
        }
    }
}

/// Compiled form of a [`SelectorSet`]. Built once per run.
#[derive(Debug)]
pub struct CardSelectors {
    pub card: Selector,
    pub property_info: Selector,
    pub address: Selector,
    pub description: Selector,
    pub price: Selector,
    pub secondary_price: Selector,
    pub link: Selector,
    pub agent_logo: Selector,
    pub agent_name: Selector,
    pub agent_summary: Selector,
    pub agent_phone: Selector,
}

impl CardSelectors {
    pub fn compile(set: &SelectorSet) -> Result<Self, ScraperError> {
        Ok(Self {
            card: parse(set.card)?,
            property_info: parse(set.property_info)?,
            address: parse(set.address)?,
            description: parse(set.description)?,
            price: parse(set.price)?,
            secondary_price: parse(set.secondary_price)?,
            link: parse(set.link)?,
            agent_logo: parse(set.agent_logo)?,
            agent_name: parse(set.agent_name)?,
            agent_summary: parse(set.agent_summary)?,
            agent_phone: parse(set.agent_phone)?,
        })
    }
}

/// Raw CSS selectors for a sold-price history page.
#[derive(Debug, Clone)]
pub struct SoldSelectorSet {
    pub card: &'static str,
    pub history: &'static str,
    pub sold_price: &'static str,
    pub tenure: &'static str,
    pub agent_name: &'static str,
    pub agent_phone: &'static str,
    pub property_name: &'static str,
}

impl Default for SoldSelectorSet {
    fn default() -> Self {
        Self {
            card: ".propertyCard",
            history: ".propertyCard-content",
            sold_price: ".sold-price",
            tenure: ".tenure",
            agent_name: ".propertyCard-branchName",
            agent_phone: ".propertyCard-phoneNumber",
            property_name: ".property-information",
        }
    }
}

#[derive(Debug)]
pub struct SoldCardSelectors {
    pub card: Selector,
    pub history: Selector,
    pub sold_price: Selector,
    pub tenure: Selector,
    pub agent_name: Selector,
    pub agent_phone: Selector,
    pub property_name: Selector,
}

impl SoldCardSelectors {
    pub fn compile(set: &SoldSelectorSet) -> Result<Self, ScraperError> {
        Ok(Self {
            card: parse(set.card)?,
            history: parse(set.history)?,
            sold_price: parse(set.sold_price)?,
            tenure: parse(set.tenure)?,
            agent_name: parse(set.agent_name)?,
            agent_phone: parse(set.agent_phone)?,
            property_name: parse(set.property_name)?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
