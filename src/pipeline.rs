// src/pipeline.rs

use crate::config::Config;
use crate::db::{ResultSink, RunSummary};
use crate::persist::{persist_results, AgentRollup, PersistReport, PersistTarget};
use crate::scraper::extract::CardProfile;
use crate::scraper::render::RenderService;
use crate::scraper::{CardSelectors, CrawlState, Paginator, SoldCardSelectors};
use tracing::{info, warn};

#[derive(Debug)]
pub struct RunReport {
    pub run_id: Option<i64>,
    pub listings: usize,
    pub final_state: CrawlState,
    pub crawl_error: Option<String>,
    pub persist: PersistReport,
}

/// One full for-sale run: scrape every page, persist, record the run, close
/// the sink.
pub async fn run(
    config: &Config,
    selectors: &CardSelectors,
    renderer: &dyn RenderService,
    sink: &dyn ResultSink,
) -> RunReport {
    run_profile(config, selectors, renderer, sink).await
}

/// Same shape as [`run`] for sold-price history pages.
pub async fn run_sold_history(
    config: &Config,
    selectors: &SoldCardSelectors,
    renderer: &dyn RenderService,
    sink: &dyn ResultSink,
) -> RunReport {
    run_profile(config, selectors, renderer, sink).await
}

// Nothing in here returns early, so the sink is closed whatever happened
// upstream. Scrape and write failures end up in the report and the log.
async fn run_profile<P>(
    config: &Config,
    profile: &P,
    renderer: &dyn RenderService,
    sink: &dyn ResultSink,
) -> RunReport
where
    P: CardProfile,
    P::Record: AgentRollup,
{
    let run_id = match sink.start_run(config.search_url.as_str()).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(error = %e, "Could not record scrape run start");
            None
        }
    };

    let pagination = config.pagination();
    let outcome = Paginator::new(renderer, profile, &pagination)
        .scrape()
        .await;

    let target = PersistTarget {
        collection: config.collection.clone(),
        artifact_path: config.artifact_path.clone(),
    };
    let persist = persist_results(sink, &target, &outcome.listings).await;

    if let Some(id) = run_id {
        let summary = RunSummary {
            pages_requested: config.page_count,
            pages_completed: outcome.pages_completed,
            listings_seen: outcome.listings.len(),
            success: outcome.error.is_none() && persist.errors.is_empty(),
            error: outcome
                .error
                .clone()
                .or_else(|| persist.errors.first().cloned()),
        };
        if let Err(e) = sink.finish_run(id, &summary).await {
            warn!(error = %e, run_id = id, "Could not record scrape run end");
        }
    }

    if let Err(e) = sink.close().await {
        warn!(error = %e, "Failed to close result sink");
    }

    info!(
        profile = ?config.profile,
        listings = outcome.listings.len(),
        inserted = persist.inserted,
        artifact_written = persist.artifact_written,
        "Run finished"
    );

    RunReport {
        run_id,
        listings: outcome.listings.len(),
        final_state: outcome.final_state,
        crawl_error: outcome.error,
        persist,
    }
}
