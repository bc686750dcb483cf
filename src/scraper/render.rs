// src/scraper/render.rs
//
// Seam between the pagination loop and whatever renders pages. The
// production implementation is `BrowserlessRenderer`; tests script their own.

use crate::scraper::ScraperError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Page lifecycle event to wait for before a navigation counts as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaitUntil {
    /// No network connections for 500ms.
    #[serde(rename = "networkidle0")]
    NetworkIdle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    pub wait_until: WaitUntil,
    pub timeout: Duration,
}

impl NavigateOptions {
    pub fn network_idle(timeout: Duration) -> Self {
        Self {
            wait_until: WaitUntil::NetworkIdle,
            timeout,
        }
    }
}

/// A page that finished navigating inside one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHandle {
    id: u64,
    url: String,
}

impl PageHandle {
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self { id, url: url.into() }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
pub trait RenderService: Send + Sync {
    /// Start a fresh session. Sessions are never shared between runs.
    async fn launch(&self) -> Result<Box<dyn RenderSession>, ScraperError>;
}

#[async_trait]
pub trait RenderSession: Send {
    async fn navigate(
        &mut self,
        url: &str,
        options: &NavigateOptions,
    ) -> Result<PageHandle, ScraperError>;

    /// Rendered markup of a navigated page, for the extraction routine to
    /// run against.
    async fn evaluate(&mut self, page: &PageHandle) -> Result<String, ScraperError>;

    /// Tear the session down. Consumes it so it cannot be reused.
    async fn close(self: Box<Self>) -> Result<(), ScraperError>;
}
