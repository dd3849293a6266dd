//! Core data structures for conversion analysis
//!
//! A `Dataset` holds one `Observation` per subject. Aggregation turns it into
//! a `GroupTable` of per-group conversion counts.

use crate::core::ztest::Proportion;
use crate::utils::error::{AppError, AppResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// One subject: which group it was in and whether it converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub group: String,
    pub converted: bool,
}

impl Observation {
    pub fn new(group: impl Into<String>, converted: bool) -> Self {
        Self {
            group: group.into(),
            converted,
        }
    }
}

/// Rows loaded from a data source
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    pub group_column: String,
    pub outcome_column: String,
    /// Rows dropped because the group label or outcome was empty
    pub skipped_rows: usize,
}

/// Conversion counts for a single group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub conversions: u64,
    pub observations: u64,
    pub conversion_rate: f64,
}

/// Per-group summaries ordered by label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupTable {
    groups: BTreeMap<String, GroupSummary>,
}

impl Dataset {
    pub fn new(group_column: impl Into<String>, outcome_column: impl Into<String>) -> Self {
        Self {
            observations: Vec::new(),
            group_column: group_column.into(),
            outcome_column: outcome_column.into(),
            skipped_rows: 0,
        }
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Aggregate conversions and observation counts per group
    pub fn summarize(&self) -> GroupTable {
        let mut counts: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for obs in &self.observations {
            let entry = counts.entry(obs.group.as_str()).or_insert((0, 0));
            if obs.converted {
                entry.0 += 1;
            }
            entry.1 += 1;
        }

        let groups = counts
            .into_iter()
            .map(|(label, (conversions, observations))| {
                (
                    label.to_string(),
                    GroupSummary::new(label, conversions, observations),
                )
            })
            .collect();

        GroupTable { groups }
    }
}

impl GroupSummary {
    pub fn new(label: impl Into<String>, conversions: u64, observations: u64) -> Self {
        let proportion = Proportion::new(conversions, observations);
        Self {
            label: label.into(),
            conversions,
            observations,
            conversion_rate: proportion.rate(),
        }
    }

    pub fn proportion(&self) -> Proportion {
        Proportion::new(self.conversions, self.observations)
    }
}

impl GroupTable {
    pub fn get(&self, label: &str) -> Option<&GroupSummary> {
        self.groups.get(label)
    }

    /// Look up a group that the analysis cannot proceed without
    pub fn require(&self, label: &str) -> AppResult<&GroupSummary> {
        self.get(label).ok_or_else(|| AppError::MissingGroup {
            label: label.to_string(),
            found: self.labels(),
        })
    }

    pub fn labels(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupSummary> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_observations(&self) -> u64 {
        self.iter().map(|g| g.observations).sum()
    }
}

impl std::fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}/{} ({:.6})",
            self.label, self.conversions, self.observations, self.conversion_rate
        )
    }
}
