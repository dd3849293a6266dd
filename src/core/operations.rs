//! Core operations implementation
//!
//! `ExperimentOperations` wires the configured data source to the analysis,
//! implementing the core traits from a single `Config`.

use crate::config::Config;
use crate::core::{
    analysis::{self, AnalysisReport, AnalysisSettings},
    data::{Dataset, GroupTable},
    loader::CsvSource,
    traits::{DatasetSource, ExperimentAnalysis},
};
use crate::utils::error::AppResult;

/// Main operations hub driven by configuration
pub struct ExperimentOperations {
    config: Config,
}

impl ExperimentOperations {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The CSV source described by the `[data]` section
    pub fn source(&self) -> CsvSource {
        let data = &self.config.data;
        CsvSource::new(&data.file, &data.group_column, &data.outcome_column)
            .with_delimiter(data.delimiter)
    }

    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings::from(&self.config.test)
    }
}

impl DatasetSource for ExperimentOperations {
    fn load_dataset(&self) -> AppResult<Dataset> {
        self.source().load_dataset()
    }

    fn describe(&self) -> String {
        self.source().describe()
    }
}

impl ExperimentAnalysis for ExperimentOperations {
    fn summarize(&self) -> AppResult<GroupTable> {
        Ok(self.load_dataset()?.summarize())
    }

    fn analyze(&self) -> AppResult<AnalysisReport> {
        let dataset = self.load_dataset()?;
        analysis::analyze(&dataset, &self.settings())
    }
}
