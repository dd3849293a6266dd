//! abtest - two-proportion significance testing for A/B conversion data
//!
//! Loads per-subject observations from a delimited file, aggregates
//! conversions per group and runs a two-proportion z-test between a
//! treatment and a control group.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod utils;

// Re-export core types and traits for easier use
pub use crate::core::{
    analysis::{AnalysisReport, AnalysisSettings, Verdict, analyze},
    data::{Dataset, GroupSummary, GroupTable, Observation},
    loader::CsvSource,
    operations::ExperimentOperations,
    traits::{DatasetSource, ExperimentAnalysis},
    ztest::{Alternative, Proportion, ZTestResult, two_proportion_ztest},
};
pub use utils::error::{AppError, AppResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library interface for external usage
pub struct AbTest {
    operations: ExperimentOperations,
}

impl AbTest {
    /// Create a new instance with the given configuration
    pub fn new(config: config::Config) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            operations: ExperimentOperations::new(config),
        })
    }

    /// Load the configured data file and run the test
    pub fn run(&self) -> AppResult<AnalysisReport> {
        self.operations.analyze()
    }

    /// Get the underlying operations for direct access
    pub fn operations(&self) -> &ExperimentOperations {
        &self.operations
    }
}
