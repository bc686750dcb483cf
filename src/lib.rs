pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod persist;
pub mod pipeline;
pub mod scraper;

#[cfg(test)]
mod tests;
