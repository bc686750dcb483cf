// src/domain/aggregate.rs

use crate::domain::listing::Listing;
use crate::domain::sold::{SoldDetails, SoldRecord};
use indexmap::IndexMap;
use serde::Serialize;

/// Per-agent rollup. Fields are private so the running total can only move
/// together with the listing list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAggregate {
    listings: Vec<Listing>,
    total_money: f64,
}

impl AgentAggregate {
    pub fn push(&mut self, listing: Listing) {
        self.total_money += parse_numeric(&listing.price);
        self.listings.push(listing);
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn total_money(&self) -> f64 {
        self.total_money
    }
}

/// Agent name -> aggregate, in order of first sighting.
pub type AgentAggregates = IndexMap<String, AgentAggregate>;

/// Fold step: file one listing under its agent, creating the group lazily.
pub fn accumulate(mut aggregates: AgentAggregates, listing: Listing) -> AgentAggregates {
    aggregates
        .entry(listing.agent.name.clone())
        .or_default()
        .push(listing);
    aggregates
}

pub fn aggregate_by_agent<I>(listings: I) -> AgentAggregates
where
    I: IntoIterator<Item = Listing>,
{
    listings
        .into_iter()
        .fold(AgentAggregates::new(), accumulate)
}

/// One sold property as filed under its agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldProperty {
    pub property_name: String,
    pub property_details: SoldDetails,
}

/// Per-agent sold history. The phone is the one on the agent's first card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentHistory {
    agent_phone: String,
    properties: Vec<SoldProperty>,
}

impl AgentHistory {
    fn new(agent_phone: String) -> Self {
        Self {
            agent_phone,
            properties: Vec::new(),
        }
    }

    pub fn agent_phone(&self) -> &str {
        &self.agent_phone
    }

    pub fn properties(&self) -> &[SoldProperty] {
        &self.properties
    }
}

/// Agent name -> sold history, in order of first sighting.
pub type AgentHistories = IndexMap<String, AgentHistory>;

pub fn accumulate_sold(mut histories: AgentHistories, record: SoldRecord) -> AgentHistories {
    let SoldRecord {
        agent_name,
        agent_phone,
        property_name,
        property_details,
    } = record;

    histories
        .entry(agent_name)
        .or_insert_with(|| AgentHistory::new(agent_phone))
        .properties
        .push(SoldProperty {
            property_name,
            property_details,
        });
    histories
}

pub fn history_by_agent<I>(records: I) -> AgentHistories
where
    I: IntoIterator<Item = SoldRecord>,
{
    records
        .into_iter()
        .fold(AgentHistories::new(), accumulate_sold)
}

/// Reads a loosely formatted price such as "£1,250 pcm".
///
/// Everything except digits, `.` and `-` is stripped, then the longest
/// leading number is taken. Text with no number in it (the price sentinel,
/// "POA", an empty cell) counts as `0.0` so totals stay finite.
pub fn parse_numeric(price: &str) -> f64 {
    let stripped: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    leading_number(&stripped).unwrap_or(0.0)
}

// `s` is ASCII-only here, so byte offsets are char boundaries.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut seen_digit = false;
    let mut seen_dot = false;

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
