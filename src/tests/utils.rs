// src/tests/utils.rs
//
// Fixtures and in-memory fakes for the render service and the result sink.

use crate::db::{ResultSink, RunSummary};
use crate::domain::{Listing, SoldDetails, SoldRecord};
use crate::errors::StoreError;
use crate::scraper::render::{NavigateOptions, PageHandle, RenderService, RenderSession};
use crate::scraper::{CardSelectors, ScraperError, SelectorSet, SoldCardSelectors, SoldSelectorSet};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const SEARCH_URL: &str =
    "https://www.rightmove.co.uk/property-for-sale/find.html?locationIdentifier=REGION%5E940";

pub fn selectors() -> CardSelectors {
    CardSelectors::compile(&SelectorSet::default()).expect("default selectors compile")
}

pub const SOLD_URL: &str = "https://www.rightmove.co.uk/house-prices/milton-keynes.html";

pub fn page_url(index: u32) -> String {
    format!("{SEARCH_URL}&index={index}")
}

pub fn sold_selectors() -> SoldCardSelectors {
    SoldCardSelectors::compile(&SoldSelectorSet::default()).expect("sold selectors compile")
}

pub fn sold_page_url(index: u32) -> String {
    format!("{SOLD_URL}?page={index}")
}

/// One property card. `None` leaves the element out of the markup.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: u32,
    pub info: Option<Vec<&'static str>>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub secondary_price: Option<String>,
    pub agent_name: Option<String>,
    pub agent_summary: Option<String>,
    pub agent_logo: Option<String>,
    pub agent_phone: Option<String>,
    pub link: bool,
}

impl Card {
    pub fn full(id: u32, agent: &str, price: &str) -> Self {
        Self {
            id,
            info: Some(vec!["Flat", "2", "1"]),
            address: Some("12 High Street, Milton Keynes".to_string()),
            description: Some("Two bedroom   flat close to the station.".to_string()),
            price: Some(price.to_string()),
            secondary_price: Some("£1,083 pcm".to_string()),
            agent_name: Some(agent.to_string()),
            agent_summary: Some("Added today".to_string()),
            agent_logo: Some("//media.rightmove.co.uk/branch/logo.png".to_string()),
            agent_phone: Some("01908 000000".to_string()),
            link: true,
        }
    }

    pub fn without_price(mut self) -> Self {
        self.price = None;
        self
    }

    pub fn html(&self) -> String {
        let mut inner = String::new();

        if let Some(lines) = &self.info {
            inner.push_str(r#"<div class="property-information">"#);
            for line in lines {
                inner.push_str(&format!(
                    r#"<span class="text">{line}</span><span class="bed-icon seperator"></span>"#
                ));
            }
            inner.push_str("</div>");
        }
        if let Some(address) = &self.address {
            inner.push_str(&format!(
                r#"<address class="propertyCard-address property-card-updates"><meta itemprop="streetAddress" content="x"><span>{address}</span></address>"#
            ));
        }

        let mut card = String::from(r#"<div class="propertyCard-wrapper">"#);
        if self.link {
            card.push_str(&format!(
                r#"<a class="propertyCard-link" href="/properties/{}#/?channel=RES_BUY">{inner}</a>"#,
                self.id
            ));
        } else {
            card.push_str(&inner);
        }

        if let Some(description) = &self.description {
            card.push_str(&format!(
                r#"<div class="propertyCard-description"><span>{description}</span></div>"#
            ));
        }
        if let Some(price) = &self.price {
            card.push_str(&format!(
                r#"<div class="propertyCard-price"><div class="propertyCard-priceValue"> {price} </div></div>"#
            ));
        }
        if let Some(secondary) = &self.secondary_price {
            card.push_str(&format!(
                r#"<p class="propertyCard-secondaryPriceValue">{secondary}</p>"#
            ));
        }
        if self.agent_summary.is_some() || self.agent_name.is_some() {
            card.push_str(r#"<div class="propertyCard-branchSummary property-card-updates">"#);
            if let Some(summary) = &self.agent_summary {
                card.push_str(summary);
            }
            if let Some(name) = &self.agent_name {
                card.push_str(&format!(
                    r#" by <span class="propertyCard-branchSummary-branchName">{name}</span>"#
                ));
            }
            card.push_str("</div>");
        }
        if let Some(logo) = &self.agent_logo {
            card.push_str(&format!(
                r#"<img class="propertyCard-branchLogo-image" src="{logo}" alt="">"#
            ));
        }
        if let Some(phone) = &self.agent_phone {
            card.push_str(&format!(
                r#"<a class="propertyCard-contactsPhoneNumber" href="tel:0">{phone}</a>"#
            ));
        }

        card.push_str("</div>");
        card
    }
}

pub fn results_page(cards: &[Card]) -> String {
    let body: String = cards.iter().map(Card::html).collect();
    format!(
        r#"<!DOCTYPE html><html><head><title>Results</title></head><body><div id="l-searchResults">{body}</div></body></html>"#
    )
}

pub fn listing(agent: &str, price: &str) -> Listing {
    let mut listing = Listing::default();
    listing.agent.name = agent.to_string();
    listing.price = price.to_string();
    listing
}

pub fn documents(listings: &[Listing]) -> Vec<Value> {
    listings
        .iter()
        .map(|l| serde_json::to_value(l).unwrap())
        .collect()
}

/// One card from a sold-price history page. `None` leaves the element out.
#[derive(Debug, Clone)]
pub struct SoldCard {
    pub name: Option<Vec<&'static str>>,
    pub history: Option<Vec<&'static str>>,
    pub sold_price: Option<String>,
    pub tenure: Option<String>,
    pub agent_name: Option<String>,
    pub agent_phone: Option<String>,
}

impl SoldCard {
    pub fn full(agent: &str, phone: &str, sold_price: &str) -> Self {
        Self {
            name: Some(vec!["4, Elm Close", "Milton Keynes MK9 1AA"]),
            history: Some(vec!["£320,000", "12 Jan 2023", "£250,000", "3 Mar 2015"]),
            sold_price: Some(sold_price.to_string()),
            tenure: Some("Freehold".to_string()),
            agent_name: Some(agent.to_string()),
            agent_phone: Some(phone.to_string()),
        }
    }

    pub fn html(&self) -> String {
        let mut card = String::from(r#"<div class="propertyCard">"#);

        if let Some(lines) = &self.name {
            card.push_str(r#"<div class="property-information">"#);
            for line in lines {
                card.push_str(&format!("<span>{line}</span>"));
            }
            card.push_str("</div>");
        }
        if let Some(rows) = &self.history {
            card.push_str(r#"<table class="propertyCard-content">"#);
            for pair in rows.chunks(2) {
                card.push_str("<tr>");
                for cell in pair {
                    card.push_str(&format!("<td>{cell}</td>"));
                }
                card.push_str("</tr>");
            }
            card.push_str("</table>");
        }
        if let Some(price) = &self.sold_price {
            card.push_str(&format!(r#"<div class="sold-price"> {price} </div>"#));
        }
        if let Some(tenure) = &self.tenure {
            card.push_str(&format!(r#"<div class="tenure">{tenure}</div>"#));
        }
        if let Some(name) = &self.agent_name {
            card.push_str(&format!(
                r#"<div class="propertyCard-branchName">  {name}
                </div>"#
            ));
        }
        if let Some(phone) = &self.agent_phone {
            card.push_str(&format!(
                r#"<a class="propertyCard-phoneNumber" href="tel:0">{phone}</a>"#
            ));
        }

        card.push_str("</div>");
        card
    }
}

pub fn history_page(cards: &[SoldCard]) -> String {
    let body: String = cards.iter().map(SoldCard::html).collect();
    format!(
        r#"<!DOCTYPE html><html><head><title>House prices</title></head><body><div class="results">{body}</div></body></html>"#
    )
}

pub fn sold_record(agent: &str, phone: &str, property: &str) -> SoldRecord {
    SoldRecord {
        agent_name: agent.to_string(),
        agent_phone: phone.to_string(),
        property_name: property.to_string(),
        property_details: SoldDetails::default(),
    }
}

// ---------------------------------------------------------------------------
// Render service fake
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    pub launches: usize,
    pub navigations: Vec<String>,
    pub evaluations: usize,
    pub closes: usize,
}

/// Serves canned HTML per URL. Unknown URLs render as an empty page; URLs
/// marked failing time out.
#[derive(Default)]
pub struct ScriptedRenderer {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    failing_evaluate: HashSet<String>,
    fail_launch: bool,
    log: Arc<Mutex<RenderLog>>,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    pub fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    /// Navigation to `url` succeeds but reading the rendered page fails.
    pub fn failing_evaluate(mut self, url: impl Into<String>) -> Self {
        self.failing_evaluate.insert(url.into());
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub fn log(&self) -> RenderLog {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderService for ScriptedRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, ScraperError> {
        if self.fail_launch {
            return Err(ScraperError::Network("connection refused".into()));
        }
        self.log.lock().unwrap().launches += 1;

        Ok(Box::new(ScriptedSession {
            pages: self.pages.clone(),
            failing: self.failing.clone(),
            failing_evaluate: self.failing_evaluate.clone(),
            log: Arc::clone(&self.log),
            open: HashMap::new(),
            next_id: 1,
        }))
    }
}

struct ScriptedSession {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    failing_evaluate: HashSet<String>,
    log: Arc<Mutex<RenderLog>>,
    open: HashMap<u64, String>,
    next_id: u64,
}

#[async_trait]
impl RenderSession for ScriptedSession {
    async fn navigate(
        &mut self,
        url: &str,
        options: &NavigateOptions,
    ) -> Result<PageHandle, ScraperError> {
        self.log.lock().unwrap().navigations.push(url.to_string());

        if self.failing.contains(url) {
            return Err(ScraperError::Timeout {
                url: url.to_string(),
                timeout_ms: options.timeout.as_millis() as u64,
            });
        }

        let html = self
            .pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string());

        let id = self.next_id;
        self.next_id += 1;
        self.open.insert(id, html);
        Ok(PageHandle::new(id, url))
    }

    async fn evaluate(&mut self, page: &PageHandle) -> Result<String, ScraperError> {
        self.log.lock().unwrap().evaluations += 1;

        if self.failing_evaluate.contains(page.url()) {
            return Err(ScraperError::Render {
                status: 500,
                message: "Execution context was destroyed".into(),
            });
        }

        self.open
            .remove(&page.id())
            .ok_or(ScraperError::UnknownPage(page.id()))
    }

    async fn close(self: Box<Self>) -> Result<(), ScraperError> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Result sink fake
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SinkLog {
    pub inserts: Vec<(String, usize)>,
    pub artifacts: Vec<(PathBuf, String)>,
    pub runs_started: Vec<String>,
    pub runs_finished: Vec<(i64, RunSummary)>,
    pub closes: usize,
}

#[derive(Default)]
pub struct RecordingSink {
    log: Mutex<SinkLog>,
    fail_insert: bool,
    fail_artifact: bool,
    report_zero_inserted: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_insert(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    pub fn failing_artifact(mut self) -> Self {
        self.fail_artifact = true;
        self
    }

    pub fn inserting_nothing(mut self) -> Self {
        self.report_zero_inserted = true;
        self
    }

    pub fn log(&self) -> SinkLog {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultSink for RecordingSink {
    async fn bulk_insert(&self, collection: &str, documents: &[Value]) -> Result<usize, StoreError> {
        self.log
            .lock()
            .unwrap()
            .inserts
            .push((collection.to_string(), documents.len()));

        if self.fail_insert {
            return Err(StoreError::Closed);
        }
        if self.report_zero_inserted {
            return Ok(0);
        }
        Ok(documents.len())
    }

    async fn write_artifact(&self, path: &Path, payload: &str) -> Result<(), StoreError> {
        self.log
            .lock()
            .unwrap()
            .artifacts
            .push((path.to_path_buf(), payload.to_string()));

        if self.fail_artifact {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )));
        }
        Ok(())
    }

    async fn start_run(&self, search_url: &str) -> Result<i64, StoreError> {
        let mut log = self.log.lock().unwrap();
        log.runs_started.push(search_url.to_string());
        Ok(log.runs_started.len() as i64)
    }

    async fn finish_run(&self, run_id: i64, summary: &RunSummary) -> Result<(), StoreError> {
        self.log
            .lock()
            .unwrap()
            .runs_finished
            .push((run_id, summary.clone()));
        Ok(())
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}
