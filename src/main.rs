use anyhow::Context;
use property_scraper::config::{Config, ScrapeProfile};
use property_scraper::db::{init_db, Database, SqliteSink};
use property_scraper::pipeline;
use property_scraper::scraper::{
    BrowserlessRenderer, CardSelectors, SelectorSet, SoldCardSelectors, SoldSelectorSet,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

enum Profile {
    Listings(CardSelectors),
    SoldHistory(SoldCardSelectors),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("property_scraper=info")),
        )
        .init();

    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "An error occurred");
            ExitCode::FAILURE
        }
    }
}

async fn try_main() -> anyhow::Result<()> {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.log_redacted();

    let profile = match config.profile {
        ScrapeProfile::Listings => Profile::Listings(
            CardSelectors::compile(&SelectorSet::default())
                .context("Failed to compile card selectors")?,
        ),
        ScrapeProfile::SoldHistory => Profile::SoldHistory(
            SoldCardSelectors::compile(&SoldSelectorSet::default())
                .context("Failed to compile sold card selectors")?,
        ),
    };

    let renderer =
        BrowserlessRenderer::new(&config.browserless_url, config.browserless_token.as_deref())
            .context("Failed to build render client")?;

    let db = Database::open(&config.database_path).context("Failed to open database")?;
    if let Err(e) = init_db(&db) {
        db.close().ok();
        return Err(e).context("Database initialization failed");
    }
    info!("Connected correctly to server");

    let sink = SqliteSink::new(db);
    match &profile {
        Profile::Listings(selectors) => {
            pipeline::run(&config, selectors, &renderer, &sink).await;
        }
        Profile::SoldHistory(selectors) => {
            pipeline::run_sold_history(&config, selectors, &renderer, &sink).await;
        }
    }

    Ok(())
}
