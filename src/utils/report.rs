//! Rendering of group tables and analysis reports
//!
//! Renderers return strings so the same output can be printed, compared in
//! tests or written elsewhere. Text output is stable for identical input.

use crate::core::analysis::{AnalysisReport, Verdict};
use crate::core::data::GroupTable;
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::{format_alpha, format_percent, format_rate, pad};
use crate::utils::output::OutputStyle;
use std::fmt::Write;

const GROUP_HEADER: &str = "group";
const COLUMNS: [&str; 3] = ["conversions", "total", "conversion_rate"];

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", OutputStyle::header(title));
    let _ = writeln!(out, "{}", OutputStyle::separator());
}

/// Per-group table: label, conversions, total, rate
pub fn render_group_table(groups: &GroupTable) -> String {
    let label_width = groups
        .iter()
        .map(|g| g.label.chars().count())
        .chain(std::iter::once(GROUP_HEADER.len()))
        .max()
        .unwrap_or(GROUP_HEADER.len());

    let rows: Vec<[String; 3]> = groups
        .iter()
        .map(|g| {
            [
                g.conversions.to_string(),
                g.observations.to_string(),
                format_rate(g.conversion_rate),
            ]
        })
        .collect();

    let widths: Vec<usize> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(header.len())
        })
        .collect();

    let mut out = String::new();
    let mut header_line = pad(GROUP_HEADER, label_width, false);
    for (header, width) in COLUMNS.iter().zip(&widths) {
        header_line.push_str("  ");
        header_line.push_str(&pad(header, *width, true));
    }
    let _ = writeln!(out, "{}", OutputStyle::header(&header_line));

    for (group, row) in groups.iter().zip(&rows) {
        let mut line = OutputStyle::group(&pad(&group.label, label_width, false)).to_string();
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str("  ");
            line.push_str(&OutputStyle::number(&pad(cell, *width, true)).to_string());
        }
        let _ = writeln!(out, "{}", line);
    }

    out
}

pub fn conclusion_text(verdict: Verdict, alpha: f64) -> String {
    let alpha = format_alpha(alpha);
    match verdict {
        Verdict::Reliable => format!(
            "RELIABLE: The difference in conversion rates for the treatment and control groups \
is statistically significant (p < {}).",
            alpha
        ),
        Verdict::Questionable => format!(
            "QUESTIONABLE: The difference in conversion rates for the treatment and control groups \
is not statistically significant (p ≥ {}).",
            alpha
        ),
    }
}

/// Full plain-text report in reading order: groups, test, rates, effect, conclusion
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();

    section(&mut out, "Test groups statistics:");
    out.push_str(&render_group_table(&report.groups));

    section(&mut out, "Statistical strength indicators:");
    let _ = writeln!(
        out,
        "Z-statistic: {}",
        OutputStyle::number(&format!("{:.2}", report.test.z_statistic))
    );
    let _ = writeln!(
        out,
        "P-value: {}",
        OutputStyle::number(&format!("{:.4}", report.test.p_value))
    );
    let _ = writeln!(
        out,
        "{}",
        OutputStyle::muted(&format!("Alternative: {}", report.test.alternative))
    );

    section(&mut out, "Conversion Rates:");
    let _ = writeln!(
        out,
        "Treatment group ({}): {}",
        OutputStyle::group(&report.treatment.label),
        report.treatment.conversion_rate
    );
    let _ = writeln!(
        out,
        "Control group ({}): {}",
        OutputStyle::group(&report.control.label),
        report.control.conversion_rate
    );

    section(&mut out, "Effect size:");
    let _ = writeln!(
        out,
        "Absolute difference: {:.6}",
        report.absolute_difference
    );
    match report.relative_lift {
        Some(lift) => {
            let _ = writeln!(out, "Relative lift: {}", format_percent(lift));
        }
        None => {
            let _ = writeln!(out, "Relative lift: {}", OutputStyle::muted("n/a (control rate is 0)"));
        }
    }
    let ci = &report.confidence_interval;
    let _ = writeln!(
        out,
        "{}% confidence interval: [{:.6}, {:.6}]",
        format_alpha(ci.level * 100.0),
        ci.lower,
        ci.upper
    );
    if !report.ignored_groups.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            OutputStyle::warning(&format!(
                "Not compared: {}",
                report.ignored_groups.join(", ")
            ))
        );
    }

    let _ = writeln!(out, "\n{}", OutputStyle::header("Conclusion:"));
    let _ = writeln!(out, "{}", OutputStyle::header_separator());
    let conclusion = conclusion_text(report.verdict, report.alpha);
    let styled = match report.verdict {
        Verdict::Reliable => OutputStyle::success(&conclusion),
        Verdict::Questionable => OutputStyle::warning(&conclusion),
    };
    let _ = writeln!(out, "{}", styled);

    out
}

pub fn render_json(report: &AnalysisReport) -> AppResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| AppError::Io(format!("Failed to serialize report to JSON: {}", e)))
}

pub fn render_summary_json(groups: &GroupTable) -> AppResult<String> {
    serde_json::to_string_pretty(groups)
        .map_err(|e| AppError::Io(format!("Failed to serialize groups to JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::{self, AnalysisSettings};
    use crate::core::data::{Dataset, Observation};

    fn plain() {
        colored::control::set_override(false);
    }

    fn report(groups: &[(&str, u64, u64)]) -> AnalysisReport {
        let mut data = Dataset::new("test group", "converted");
        for (label, conversions, total) in groups {
            for i in 0..*total {
                data.push(Observation::new(*label, i < *conversions));
            }
        }
        analysis::analyze(&data, &AnalysisSettings::default()).unwrap()
    }

    #[test]
    fn test_reliable_conclusion_printed() {
        plain();
        let text = render_text(&report(&[("ad", 30, 100), ("psa", 10, 100)]));
        assert!(text.contains("RELIABLE: The difference"));
        assert!(text.contains("is statistically significant (p < 0.05)."));
        assert!(!text.contains("QUESTIONABLE"));
    }

    #[test]
    fn test_questionable_conclusion_printed() {
        plain();
        let text = render_text(&report(&[("ad", 12, 100), ("psa", 10, 100)]));
        assert!(text.contains("QUESTIONABLE: The difference"));
        assert!(text.contains("is not statistically significant (p ≥ 0.05)."));
        assert!(!text.contains("RELIABLE:"));
    }

    #[test]
    fn test_statistics_precision() {
        plain();
        let text = render_text(&report(&[("ad", 100, 1000), ("psa", 120, 1000)]));
        assert!(text.contains("Z-statistic: -1.43\n"));
        assert!(text.contains("P-value: 0.1529\n"));
        assert!(text.contains("Treatment group (ad): 0.1\n"));
        assert!(text.contains("Control group (psa): 0.12\n"));
    }

    #[test]
    fn test_section_order() {
        plain();
        let text = render_text(&report(&[("ad", 30, 100), ("psa", 10, 100)]));
        let positions: Vec<usize> = [
            "Test groups statistics:",
            "Statistical strength indicators:",
            "Conversion Rates:",
            "Effect size:",
            "Conclusion:",
        ]
        .iter()
        .map(|s| text.find(s).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        plain();
        let first = render_text(&report(&[("psa", 7, 90), ("ad", 15, 110)]));
        let second = render_text(&report(&[("psa", 7, 90), ("ad", 15, 110)]));
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_table_layout() {
        plain();
        let r = report(&[("ad", 30, 100), ("psa", 0, 8)]);
        let table = render_group_table(&r.groups);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "group  conversions  total  conversion_rate");
        assert_eq!(lines[1], "ad              30    100         0.300000");
        assert_eq!(lines[2], "psa              0      8         0.000000");
    }

    #[test]
    fn test_zero_control_has_no_lift() {
        plain();
        let text = render_text(&report(&[("ad", 5, 50), ("psa", 0, 50)]));
        assert!(text.contains("Relative lift: n/a"));
        assert!(text.contains("95% confidence interval"));
    }

    #[test]
    fn test_json_report_fields() {
        let json = render_json(&report(&[("ad", 30, 100), ("psa", 10, 100)])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["verdict"], "RELIABLE");
        assert_eq!(value["treatment"]["label"], "ad");
        assert_eq!(value["groups"]["psa"]["conversions"], 10);
        assert_eq!(value["test"]["alternative"], "two-sided");
        assert!(value.get("ignored_groups").is_none());
    }

    #[test]
    fn test_summary_json() {
        let r = report(&[("ad", 1, 4), ("psa", 2, 4)]);
        let json = render_summary_json(&r.groups).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ad"]["conversion_rate"], 0.25);
        assert_eq!(value["psa"]["observations"], 4);
    }
}
