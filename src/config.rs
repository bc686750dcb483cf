// src/config.rs

use crate::scraper::PaginationConfig;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use url::Url;

pub const DEFAULT_SEARCH_URL: &str = "https://www.rightmove.co.uk/property-for-sale/find.html?locationIdentifier=REGION%5E940&propertyTypes=&includeSSTC=false&mustHave=&dontShow=&furnishTypes=&keywords=";
pub const DEFAULT_SOLD_URL: &str = "https://www.rightmove.co.uk/house-prices/milton-keynes.html?page=1";

/// Which results layout a run scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeProfile {
    /// For-sale search results, rolled up with per-agent price totals.
    Listings,
    /// Sold-price history cards, grouped per agent.
    SoldHistory,
}

impl ScrapeProfile {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "listings" | "for-sale" => Some(Self::Listings),
            "sold" | "sold-history" => Some(Self::SoldHistory),
            _ => None,
        }
    }

    pub fn page_param(self) -> &'static str {
        match self {
            Self::Listings => "index",
            Self::SoldHistory => "page",
        }
    }

    fn defaults(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Listings => (DEFAULT_SEARCH_URL, "properties", "agent.json"),
            Self::SoldHistory => (DEFAULT_SOLD_URL, "sold_properties", "agent_history.json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got `{value}`")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("SEARCH_URL is not a valid URL: {0}")]
    SearchUrl(#[from] url::ParseError),
}

/// Run configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Search
    pub profile: ScrapeProfile,
    pub search_url: Url,
    pub page_count: u32,
    pub nav_timeout: Duration,
    pub warm_up: bool,

    // Render service
    pub browserless_url: String,
    pub browserless_token: Option<String>,

    // Output
    pub database_path: PathBuf,
    pub collection: String,
    pub artifact_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset and blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let profile = match get("SCRAPE_PROFILE") {
            Some(v) => ScrapeProfile::parse(&v).ok_or(ConfigError::Invalid {
                key: "SCRAPE_PROFILE",
                expected: "listings or sold-history",
                value: v,
            })?,
            None => ScrapeProfile::Listings,
        };
        let (default_url, default_collection, default_artifact) = profile.defaults();

        let search_url =
            Url::parse(&get("SEARCH_URL").unwrap_or_else(|| default_url.to_string()))?;

        let page_count: u32 = match get("PAGE_COUNT") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PAGE_COUNT",
                expected: "a non-negative integer",
                value: v,
            })?,
            None => 2,
        };

        let nav_timeout_ms: u64 = match get("NAV_TIMEOUT_MS") {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "NAV_TIMEOUT_MS",
                expected: "a number of milliseconds",
                value: v,
            })?,
            None => 60_000,
        };

        let warm_up = match get("WARM_UP") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                key: "WARM_UP",
                expected: "true or false",
                value: v,
            })?,
            None => true,
        };

        Ok(Self {
            profile,
            search_url,
            page_count,
            nav_timeout: Duration::from_millis(nav_timeout_ms),
            warm_up,
            browserless_url: get("BROWSERLESS_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            browserless_token: get("BROWSERLESS_TOKEN"),
            database_path: get("DATABASE_PATH")
                .unwrap_or_else(|| "real_estate.sqlite3".to_string())
                .into(),
            collection: get("COLLECTION").unwrap_or_else(|| default_collection.to_string()),
            artifact_path: get("ARTIFACT_PATH")
                .unwrap_or_else(|| default_artifact.to_string())
                .into(),
        })
    }

    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            base_url: self.search_url.clone(),
            page_param: self.profile.page_param(),
            page_count: self.page_count,
            nav_timeout: self.nav_timeout,
            warm_up: self.warm_up,
        }
    }

    /// Log the effective settings, token masked.
    pub fn log_redacted(&self) {
        let token = if self.browserless_token.is_some() {
            "[set]"
        } else {
            "[unset]"
        };

        info!(
            profile = ?self.profile,
            search_url = %self.search_url,
            page_count = self.page_count,
            nav_timeout_ms = self.nav_timeout.as_millis() as u64,
            warm_up = self.warm_up,
            browserless_url = %self.browserless_url,
            browserless_token = token,
            database_path = %self.database_path.display(),
            collection = %self.collection,
            artifact_path = %self.artifact_path.display(),
            "Loaded config"
        );
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
