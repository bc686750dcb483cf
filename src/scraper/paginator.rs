// src/scraper/paginator.rs

use crate::domain::Listing;
use crate::scraper::extract::CardProfile;
use crate::scraper::render::{NavigateOptions, PageHandle, RenderService, RenderSession};
use crate::scraper::ScraperError;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub base_url: Url,
    /// Query parameter carrying the page number (`index`, `page`).
    pub page_param: &'static str,
    /// Highest page index visited; pages run `1..=page_count`.
    pub page_count: u32,
    pub nav_timeout: Duration,
    /// Visit `base_url` once before the indexed pages.
    pub warm_up: bool,
}

/// Where a crawl is. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Idle,
    WarmingUp,
    Navigating(u32),
    Extracting(u32),
    Done,
    Failed,
}

impl CrawlState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CrawlState::Done | CrawlState::Failed)
    }
}

#[derive(Debug)]
pub struct CrawlOutcome<R = Listing> {
    pub listings: Vec<R>,
    pub pages_completed: u32,
    pub final_state: CrawlState,
    pub error: Option<String>,
}

impl<R> CrawlOutcome<R> {
    fn failed(pages_completed: u32, err: &ScraperError) -> Self {
        Self {
            listings: Vec::new(),
            pages_completed,
            final_state: CrawlState::Failed,
            error: Some(err.to_string()),
        }
    }
}

/// Mutable state of one crawl, threaded through the transitions.
struct Crawl<R> {
    state: CrawlState,
    current_page: Option<PageHandle>,
    listings: Vec<R>,
    pages_completed: u32,
}

impl<R> Crawl<R> {
    fn new() -> Self {
        Self {
            state: CrawlState::Idle,
            current_page: None,
            listings: Vec::new(),
            pages_completed: 0,
        }
    }

    fn transition(&mut self, next: CrawlState) {
        debug!(from = ?self.state, to = ?next, "Crawl transition");
        self.state = next;
    }
}

/// Walks the indexed result pages of one search, strictly in order, inside
/// a single render session. All or nothing: if any page fails, the whole
/// crawl yields no records. What a page yields is up to the profile.
pub struct Paginator<'a, P> {
    renderer: &'a dyn RenderService,
    profile: &'a P,
    config: &'a PaginationConfig,
}

impl<'a, P: CardProfile> Paginator<'a, P> {
    pub fn new(
        renderer: &'a dyn RenderService,
        profile: &'a P,
        config: &'a PaginationConfig,
    ) -> Self {
        Self {
            renderer,
            profile,
            config,
        }
    }

    pub async fn scrape(&self) -> CrawlOutcome<P::Record> {
        let mut session = match self.renderer.launch().await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, "Failed to launch render session");
                return CrawlOutcome::failed(0, &e);
            }
        };

        let mut crawl = Crawl::new();
        let result = self.drive(session.as_mut(), &mut crawl).await;

        // Runs on every path out of `drive`.
        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to close render session");
        }

        match result {
            Ok(()) => {
                info!(
                    pages = crawl.pages_completed,
                    listings = crawl.listings.len(),
                    "Scrape complete"
                );
                CrawlOutcome {
                    listings: crawl.listings,
                    pages_completed: crawl.pages_completed,
                    final_state: crawl.state,
                    error: None,
                }
            }
            Err(e) => {
                crawl.transition(CrawlState::Failed);
                error!(
                    error = %e,
                    state = ?crawl.state,
                    discarded = crawl.listings.len(),
                    "Error scraping data"
                );
                CrawlOutcome::failed(crawl.pages_completed, &e)
            }
        }
    }

    async fn drive(
        &self,
        session: &mut dyn RenderSession,
        crawl: &mut Crawl<P::Record>,
    ) -> Result<(), ScraperError> {
        while !crawl.state.is_terminal() {
            let next = self.step(session, crawl).await?;
            crawl.transition(next);
        }
        Ok(())
    }

    async fn step(
        &self,
        session: &mut dyn RenderSession,
        crawl: &mut Crawl<P::Record>,
    ) -> Result<CrawlState, ScraperError> {
        let options = NavigateOptions::network_idle(self.config.nav_timeout);

        let next = match crawl.state {
            CrawlState::Idle if self.config.warm_up => CrawlState::WarmingUp,
            CrawlState::Idle => self.first_page(),
            CrawlState::WarmingUp => {
                session
                    .navigate(self.config.base_url.as_str(), &options)
                    .await?;
                self.first_page()
            }
            CrawlState::Navigating(index) => {
                let url = page_url(&self.config.base_url, self.config.page_param, index);
                info!(page = index, url = %url, "Scraping page");
                crawl.current_page = Some(session.navigate(&url, &options).await?);
                CrawlState::Extracting(index)
            }
            CrawlState::Extracting(index) => {
                let page = match crawl.current_page.take() {
                    Some(page) => page,
                    None => return Ok(CrawlState::Navigating(index)),
                };
                let html = session.evaluate(&page).await?;
                let records = self.profile.extract(&html, page.url());
                info!(page = index, records = records.len(), "Page parsed");

                crawl.listings.extend(records);
                crawl.pages_completed += 1;

                if index < self.config.page_count {
                    CrawlState::Navigating(index + 1)
                } else {
                    CrawlState::Done
                }
            }
            terminal @ (CrawlState::Done | CrawlState::Failed) => terminal,
        };

        Ok(next)
    }

    fn first_page(&self) -> CrawlState {
        if self.config.page_count == 0 {
            CrawlState::Done
        } else {
            CrawlState::Navigating(1)
        }
    }
}

/// `base` with `<param>=<index>` in its query string. A `param` already
/// present in `base` is replaced; the other pairs keep their order.
pub fn page_url(base: &Url, param: &str, index: u32) -> String {
    let mut url = base.clone();

    if base.query_pairs().any(|(key, _)| key == param) {
        let kept: Vec<(String, String)> = base
            .query_pairs()
            .filter(|(key, _)| key != param)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    url.query_pairs_mut()
        .append_pair(param, &index.to_string());
    url.into()
}
