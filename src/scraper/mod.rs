mod browserless;
mod scraper_error;

pub mod extract;
pub mod fields;
pub mod normalize;
pub mod paginator;
pub mod render;
pub mod selectors;

pub use browserless::BrowserlessRenderer;
pub use extract::CardProfile;
pub use paginator::{CrawlOutcome, CrawlState, PaginationConfig, Paginator};
pub use scraper_error::ScraperError;
pub use selectors::{CardSelectors, SelectorSet, SoldCardSelectors, SoldSelectorSet};
