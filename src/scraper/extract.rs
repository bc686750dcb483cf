// src/scraper/extract.rs

use crate::domain::sold::{self, SoldDetails, SoldRecord};
use crate::domain::{sentinel, Agent, Listing};
use crate::scraper::fields::{FieldExtractor, FieldSource};
use crate::scraper::normalize::normalize_property_info;
use crate::scraper::selectors::{CardSelectors, SoldCardSelectors};
use scraper::{ElementRef, Html};
use url::Url;

/// A card layout the paginator can run: how one rendered page turns into
/// records.
pub trait CardProfile: Sync {
    type Record: Send;

    fn extract(&self, html: &str, page_url: &str) -> Vec<Self::Record>;
}

impl CardProfile for CardSelectors {
    type Record = Listing;

    fn extract(&self, html: &str, page_url: &str) -> Vec<Listing> {
        extract_listings(html, self, page_url)
    }
}

impl CardProfile for SoldCardSelectors {
    type Record = SoldRecord;

    fn extract(&self, html: &str, page_url: &str) -> Vec<SoldRecord> {
        extract_sold_records(html, self, page_url)
    }
}

/// Turns one property card into a [`Listing`]. Never fails: whatever the
/// card lacks comes out as the matching sentinel.
pub struct ListingBuilder<'a> {
    selectors: &'a CardSelectors,
    fields: FieldExtractor<'a>,
}

impl<'a> ListingBuilder<'a> {
    pub fn new(selectors: &'a CardSelectors, page_url: Option<&'a Url>) -> Self {
        Self {
            selectors,
            fields: FieldExtractor::new(page_url),
        }
    }

    pub fn build(&self, card: ElementRef<'_>) -> Listing {
        let s = self.selectors;
        let f = &self.fields;

        let info_block = f.extract_or(
            card,
            &s.property_info,
            FieldSource::Lines,
            sentinel::PROPERTY_INFO,
        );
        let info = normalize_property_info(&info_block);

        Listing {
            property_type: info.property_type,
            bedrooms: info.bedrooms,
            bathrooms: info.bathrooms,
            address: f.extract_or(card, &s.address, FieldSource::Text, sentinel::ADDRESS),
            description: f.extract_or(
                card,
                &s.description,
                FieldSource::Text,
                sentinel::DESCRIPTION,
            ),
            price: f.extract_or(card, &s.price, FieldSource::Text, sentinel::PRICE),
            secondary_price: f.extract_or(
                card,
                &s.secondary_price,
                FieldSource::Text,
                sentinel::SECONDARY_PRICE,
            ),
            url: f.extract_or(card, &s.link, FieldSource::Link("href"), sentinel::URL),
            agent: Agent {
                name: self.agent_name(card),
                logo: f.extract_or(
                    card,
                    &s.agent_logo,
                    FieldSource::Link("src"),
                    sentinel::AGENT_LOGO,
                ),
                phone: f.extract_or(
                    card,
                    &s.agent_phone,
                    FieldSource::Text,
                    sentinel::AGENT_PHONE,
                ),
            },
        }
    }

    // Two layouts exist: a dedicated branch-name element, or only the
    // "Added today by Acme Lettings" summary line.
    fn agent_name(&self, card: ElementRef<'_>) -> String {
        let s = self.selectors;

        self.fields
            .try_extract(card, &s.agent_name, FieldSource::Text)
            .or_else(|| {
                self.fields
                    .try_extract(card, &s.agent_summary, FieldSource::Text)
                    .and_then(|summary| added_by(&summary))
            })
            .unwrap_or_else(|| sentinel::AGENT_NAME.to_string())
    }
}

fn added_by(summary: &str) -> Option<String> {
    summary
        .split(" by ")
        .nth(1)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Every card on a parsed page, in document order. Single pass.
pub fn listings<'d>(
    document: &'d Html,
    selectors: &'d CardSelectors,
    page_url: Option<&'d Url>,
) -> impl Iterator<Item = Listing> + 'd {
    let builder = ListingBuilder::new(selectors, page_url);
    document
        .select(&selectors.card)
        .map(move |card| builder.build(card))
}

/// Parses rendered page markup and collects its listings. An empty vec is
/// a normal result for a page without cards.
pub fn extract_listings(html: &str, selectors: &CardSelectors, page_url: &str) -> Vec<Listing> {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();
    listings(&document, selectors, base.as_ref()).collect()
}

/// Turns one sold-price history card into a [`SoldRecord`].
pub struct SoldRecordBuilder<'a> {
    selectors: &'a SoldCardSelectors,
    fields: FieldExtractor<'a>,
}

impl<'a> SoldRecordBuilder<'a> {
    pub fn new(selectors: &'a SoldCardSelectors, page_url: Option<&'a Url>) -> Self {
        Self {
            selectors,
            fields: FieldExtractor::new(page_url),
        }
    }

    pub fn build(&self, card: ElementRef<'_>) -> SoldRecord {
        let s = self.selectors;
        let f = &self.fields;

        SoldRecord {
            agent_name: f.extract_or(
                card,
                &s.agent_name,
                FieldSource::Text,
                sold::sentinel::AGENT_NAME,
            ),
            agent_phone: f.extract_or(
                card,
                &s.agent_phone,
                FieldSource::Text,
                sold::sentinel::AGENT_PHONE,
            ),
            property_name: f.extract_or(
                card,
                &s.property_name,
                FieldSource::Lines,
                sold::sentinel::PROPERTY_NAME,
            ),
            property_details: SoldDetails {
                property_history: f.extract_or(
                    card,
                    &s.history,
                    FieldSource::Lines,
                    sold::sentinel::HISTORY,
                ),
                sold_price: f.extract_or(
                    card,
                    &s.sold_price,
                    FieldSource::Text,
                    sold::sentinel::SOLD_PRICE,
                ),
                tenure: f.extract_or(card, &s.tenure, FieldSource::Text, sold::sentinel::TENURE),
            },
        }
    }
}

pub fn extract_sold_records(
    html: &str,
    selectors: &SoldCardSelectors,
    page_url: &str,
) -> Vec<SoldRecord> {
    let document = Html::parse_document(html);
    let base = Url::parse(page_url).ok();
    let builder = SoldRecordBuilder::new(selectors, base.as_ref());

    document
        .select(&selectors.card)
        .map(|card| builder.build(card))
        .collect()
}
