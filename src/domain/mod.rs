pub mod aggregate;
pub mod listing;
pub mod sold;

pub use aggregate::{
    aggregate_by_agent, history_by_agent, parse_numeric, AgentAggregate, AgentAggregates,
    AgentHistories, AgentHistory, SoldProperty,
};
pub use listing::{sentinel, Agent, Listing};
pub use sold::{SoldDetails, SoldRecord};
