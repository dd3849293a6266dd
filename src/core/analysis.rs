//! Treatment vs control significance analysis

use crate::core::data::{Dataset, GroupSummary, GroupTable};
use crate::core::ztest::{self, Alternative, ZTestResult};
use crate::config::TestConfig;
use crate::utils::error::AppResult;
use serde::Serialize;

/// Which groups to compare and how strict to be
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub treatment: String,
    pub control: String,
    pub alpha: f64,
    pub alternative: Alternative,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::from(&TestConfig::default())
    }
}

impl From<&TestConfig> for AnalysisSettings {
    fn from(test: &TestConfig) -> Self {
        Self {
            treatment: test.treatment.clone(),
            control: test.control.clone(),
            alpha: test.alpha,
            alternative: test.alternative,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Reliable,
    Questionable,
}

impl Verdict {
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Verdict::Reliable
        } else {
            Verdict::Questionable
        }
    }

    pub fn is_significant(&self) -> bool {
        matches!(self, Verdict::Reliable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub groups: GroupTable,
    pub treatment: GroupSummary,
    pub control: GroupSummary,
    pub test: ZTestResult,
    pub alpha: f64,
    pub verdict: Verdict,
    /// Treatment rate minus control rate
    pub absolute_difference: f64,
    /// Absolute difference relative to the control rate; absent when the control rate is zero
    pub relative_lift: Option<f64>,
    pub confidence_interval: ConfidenceInterval,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_groups: Vec<String>,
}

/// Aggregate the dataset and test treatment against control
pub fn analyze(dataset: &Dataset, settings: &AnalysisSettings) -> AppResult<AnalysisReport> {
    analyze_table(dataset.summarize(), settings)
}

/// Test treatment against control on an already aggregated table
pub fn analyze_table(groups: GroupTable, settings: &AnalysisSettings) -> AppResult<AnalysisReport> {
    let treatment = groups.require(&settings.treatment)?.clone();
    let control = groups.require(&settings.control)?.clone();

    let ignored_groups: Vec<String> = groups
        .labels()
        .into_iter()
        .filter(|label| *label != settings.treatment && *label != settings.control)
        .collect();
    if !ignored_groups.is_empty() {
        log::warn!(
            "groups not part of the comparison: {}",
            ignored_groups.join(", ")
        );
    }

    let test = ztest::two_proportion_ztest(
        treatment.proportion(),
        control.proportion(),
        settings.alternative,
    )?;
    let (lower, upper) = ztest::difference_confidence_interval(
        treatment.proportion(),
        control.proportion(),
        settings.alpha,
    )?;

    let absolute_difference = treatment.conversion_rate - control.conversion_rate;
    let relative_lift = if control.conversion_rate > 0.0 {
        Some(absolute_difference / control.conversion_rate)
    } else {
        None
    };

    let verdict = Verdict::from_p_value(test.p_value, settings.alpha);
    log::debug!(
        "{} vs {}: p={:.6} alpha={} -> {:?}",
        treatment.label,
        control.label,
        test.p_value,
        settings.alpha,
        verdict
    );

    Ok(AnalysisReport {
        groups,
        treatment,
        control,
        test,
        alpha: settings.alpha,
        verdict,
        absolute_difference,
        relative_lift,
        confidence_interval: ConfidenceInterval {
            level: 1.0 - settings.alpha,
            lower,
            upper,
        },
        ignored_groups,
    })
}
