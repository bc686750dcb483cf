// src/scraper/browserless.rs

use crate::scraper::render::{NavigateOptions, PageHandle, RenderService, RenderSession};
use crate::scraper::ScraperError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

// Headroom on top of the in-browser navigation timeout so Browserless gets
// to report its own timeout before the HTTP request gives up.
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// Renders pages through a Browserless instance's `/content` endpoint,
/// which runs headless Chrome, waits for the requested lifecycle event and
/// returns the resulting DOM as HTML.
pub struct BrowserlessRenderer {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BrowserlessRenderer {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, ScraperError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url, token))
    }

    pub fn with_client(client: Client, base_url: &str, token: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }
}

#[async_trait]
impl RenderService for BrowserlessRenderer {
    async fn launch(&self) -> Result<Box<dyn RenderSession>, ScraperError> {
        debug!(base_url = %self.base_url, "Opening Browserless session");

        Ok(Box::new(BrowserlessSession {
            client: self.client.clone(),
            endpoint: format!("{}/content", self.base_url),
            token: self.token.clone(),
            pages: HashMap::new(),
            next_id: 1,
        }))
    }
}

struct BrowserlessSession {
    client: Client,
    endpoint: String,
    token: Option<String>,
    pages: HashMap<u64, String>,
    next_id: u64,
}

#[async_trait]
impl RenderSession for BrowserlessSession {
    async fn navigate(
        &mut self,
        url: &str,
        options: &NavigateOptions,
    ) -> Result<PageHandle, ScraperError> {
        let body = serde_json::json!({
            "url": url,
            "gotoOptions": {
                "waitUntil": options.wait_until,
                "timeout": options.timeout.as_millis() as u64,
            },
            "userAgent": USER_AGENT,
        });

        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(options.timeout + REQUEST_SLACK)
            .json(&body);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token)]);
        }

        let timed_out = || ScraperError::Timeout {
            url: url.to_string(),
            timeout_ms: options.timeout.as_millis() as u64,
        };

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                timed_out()
            } else {
                ScraperError::from(e)
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::REQUEST_TIMEOUT {
            return Err(timed_out());
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ScraperError::Render {
                status: status.as_u16(),
                message,
            });
        }

        let html = resp.text().await?;

        let id = self.next_id;
        self.next_id += 1;
        self.pages.insert(id, html);

        Ok(PageHandle::new(id, url))
    }

    async fn evaluate(&mut self, page: &PageHandle) -> Result<String, ScraperError> {
        self.pages
            .remove(&page.id())
            .ok_or(ScraperError::UnknownPage(page.id()))
    }

    async fn close(self: Box<Self>) -> Result<(), ScraperError> {
        debug!(
            pending_pages = self.pages.len(),
            "Closing Browserless session"
        );
        Ok(())
    }
}
