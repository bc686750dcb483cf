pub mod connection;
pub mod documents;
pub mod scrapes;
pub mod sink;

pub use connection::{init_db, Database};
pub use scrapes::RunSummary;
pub use sink::{ResultSink, SqliteSink};
