//! Core trait definitions
//!
//! These traits separate where observations come from and what is done with
//! them, so the analysis can run over files, in-memory data or test fixtures.

use crate::core::analysis::AnalysisReport;
use crate::core::data::{Dataset, GroupTable};
use crate::utils::error::AppResult;

/// Anything that can produce a dataset of observations
pub trait DatasetSource {
    /// Load every observation from the source
    fn load_dataset(&self) -> AppResult<Dataset>;

    /// Human-readable name of the source for logs and messages
    fn describe(&self) -> String;
}

/// Analysis operations over a loaded source
pub trait ExperimentAnalysis {
    /// Per-group conversion counts
    fn summarize(&self) -> AppResult<GroupTable>;

    /// Significance test between the treatment and control groups
    fn analyze(&self) -> AppResult<AnalysisReport>;
}
