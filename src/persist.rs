// src/persist.rs

use crate::db::ResultSink;
use crate::domain::{
    aggregate_by_agent, history_by_agent, AgentAggregates, AgentHistories, Listing, SoldRecord,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Where one run's output lands.
#[derive(Debug, Clone)]
pub struct PersistTarget {
    pub collection: String,
    pub artifact_path: PathBuf,
}

#[derive(Debug, Default, PartialEq)]
pub struct PersistReport {
    pub inserted: usize,
    pub agents: usize,
    pub artifact_written: bool,
    pub errors: Vec<String>,
}

/// A scraped record type and the per-agent rollup written as the artifact.
pub trait AgentRollup: Serialize + Clone {
    type Rollup: Serialize;

    fn rollup(records: &[Self]) -> Self::Rollup;

    fn agent_count(rollup: &Self::Rollup) -> usize;

    fn log_rollup(rollup: &Self::Rollup);
}

impl AgentRollup for Listing {
    type Rollup = AgentAggregates;

    fn rollup(records: &[Self]) -> AgentAggregates {
        aggregate_by_agent(records.iter().cloned())
    }

    fn agent_count(rollup: &AgentAggregates) -> usize {
        rollup.len()
    }

    fn log_rollup(rollup: &AgentAggregates) {
        for (agent, aggregate) in rollup {
            info!(
                listings = aggregate.listings().len(),
                "{agent}: Total Money - {}",
                aggregate.total_money()
            );
        }
    }
}

impl AgentRollup for SoldRecord {
    type Rollup = AgentHistories;

    fn rollup(records: &[Self]) -> AgentHistories {
        history_by_agent(records.iter().cloned())
    }

    fn agent_count(rollup: &AgentHistories) -> usize {
        rollup.len()
    }

    fn log_rollup(rollup: &AgentHistories) {
        for (agent, history) in rollup {
            info!(
                phone = %history.agent_phone(),
                "{agent}: Sold Properties - {}",
                history.properties().len()
            );
        }
    }
}

/// Write raw records, then the per-agent artifact.
///
/// The artifact is only attempted once the bulk insert reported at least
/// one record. Failures are logged and collected in the report, never
/// raised.
pub async fn persist_results<R: AgentRollup>(
    sink: &dyn ResultSink,
    target: &PersistTarget,
    records: &[R],
) -> PersistReport {
    let mut report = PersistReport::default();

    if records.is_empty() {
        info!("No data to insert");
        return report;
    }

    let documents = match records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(documents) => documents,
        Err(e) => {
            error!(error = %e, "Failed to serialize records");
            report.errors.push(format!("serialize records: {e}"));
            return report;
        }
    };

    match sink.bulk_insert(&target.collection, &documents).await {
        Ok(inserted) => {
            info!(inserted, collection = %target.collection, "Inserted documents");
            report.inserted = inserted;
        }
        Err(e) => {
            error!(error = %e, collection = %target.collection, "Bulk insert failed");
            report.errors.push(format!("bulk insert: {e}"));
            return report;
        }
    }

    if report.inserted == 0 {
        warn!("Nothing was inserted, skipping agent artifact");
        return report;
    }

    let rollup = R::rollup(records);
    R::log_rollup(&rollup);
    report.agents = R::agent_count(&rollup);

    let payload = match serde_json::to_string_pretty(&rollup) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Failed to serialize agent data");
            report.errors.push(format!("serialize aggregates: {e}"));
            return report;
        }
    };

    match sink.write_artifact(&target.artifact_path, &payload).await {
        Ok(()) => {
            info!(path = %target.artifact_path.display(), "Agent data written");
            report.artifact_written = true;
        }
        Err(e) => {
            error!(error = %e, path = %target.artifact_path.display(), "Failed to write agent data");
            report.errors.push(format!("write artifact: {e}"));
        }
    }

    report
}
