//! Two-proportion z-test
//!
//! Compares the success rates of two independent samples under a normal
//! approximation, using the pooled proportion for the standard error under
//! the null hypothesis of equal rates.

use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Successes out of trials for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Proportion {
    pub successes: u64,
    pub trials: u64,
}

impl Proportion {
    pub fn new(successes: u64, trials: u64) -> Self {
        Self { successes, trials }
    }

    /// Observed rate, `0.0` for an empty sample
    pub fn rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.successes as f64 / self.trials as f64
        }
    }

    fn check(&self, name: &str) -> AppResult<()> {
        if self.trials == 0 {
            return Err(AppError::Statistics(format!(
                "{} sample has no observations",
                name
            )));
        }
        if self.successes > self.trials {
            return Err(AppError::Statistics(format!(
                "{} sample has more successes ({}) than trials ({})",
                name, self.successes, self.trials
            )));
        }
        Ok(())
    }
}

/// Alternative hypothesis, stated for `first - second`
#[derive(
    clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    #[default]
    TwoSided,
    Larger,
    Smaller,
}

impl std::fmt::Display for Alternative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alternative::TwoSided => write!(f, "two-sided"),
            Alternative::Larger => write!(f, "larger"),
            Alternative::Smaller => write!(f, "smaller"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZTestResult {
    pub z_statistic: f64,
    pub p_value: f64,
    pub pooled_proportion: f64,
    pub standard_error: f64,
    pub alternative: Alternative,
}

fn standard_normal() -> AppResult<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| AppError::Statistics(e.to_string()))
}

/// Run the test for `first - second`.
///
/// When the pooled proportion is exactly 0 or 1 the standard error vanishes
/// and there is no evidence of a difference: `z = 0`, `p = 1`.
pub fn two_proportion_ztest(
    first: Proportion,
    second: Proportion,
    alternative: Alternative,
) -> AppResult<ZTestResult> {
    first.check("First")?;
    second.check("Second")?;

    let n1 = first.trials as f64;
    let n2 = second.trials as f64;
    let pooled = (first.successes + second.successes) as f64 / (n1 + n2);
    let standard_error = (pooled * (1.0 - pooled) * (1.0 / n1 + 1.0 / n2)).sqrt();

    if standard_error == 0.0 {
        log::debug!("pooled proportion is {}, standard error is zero", pooled);
        return Ok(ZTestResult {
            z_statistic: 0.0,
            p_value: 1.0,
            pooled_proportion: pooled,
            standard_error,
            alternative,
        });
    }

    let z = (first.rate() - second.rate()) / standard_error;
    let normal = standard_normal()?;
    let p_value = match alternative {
        Alternative::TwoSided => 2.0 * normal.sf(z.abs()),
        Alternative::Larger => normal.sf(z),
        Alternative::Smaller => normal.cdf(z),
    };

    log::debug!(
        "z-test ({}): pooled={:.6} se={:.6} z={:.4} p={:.6}",
        alternative,
        pooled,
        standard_error,
        z,
        p_value
    );

    Ok(ZTestResult {
        z_statistic: z,
        p_value: p_value.clamp(0.0, 1.0),
        pooled_proportion: pooled,
        standard_error,
        alternative,
    })
}

/// Unpooled Wald interval for `first.rate() - second.rate()` at level `1 - alpha`
pub fn difference_confidence_interval(
    first: Proportion,
    second: Proportion,
    alpha: f64,
) -> AppResult<(f64, f64)> {
    first.check("First")?;
    second.check("Second")?;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(AppError::Statistics(format!(
            "alpha must be in (0, 1), got {}",
            alpha
        )));
    }

    let p1 = first.rate();
    let p2 = second.rate();
    let se = (p1 * (1.0 - p1) / first.trials as f64 + p2 * (1.0 - p2) / second.trials as f64)
        .sqrt();
    let critical = standard_normal()?.inverse_cdf(1.0 - alpha / 2.0);
    let diff = p1 - p2;

    Ok((diff - critical * se, diff + critical * se))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    #[test]
    fn test_known_two_sided_value() {
        let result = two_proportion_ztest(
            Proportion::new(100, 1000),
            Proportion::new(120, 1000),
            Alternative::TwoSided,
        )
        .unwrap();

        assert!((result.pooled_proportion - 0.11).abs() < TOL);
        assert!((result.standard_error - 0.013992855).abs() < TOL);
        assert!((result.z_statistic - (-1.429300850)).abs() < TOL);
        assert!((result.p_value - 0.152917782).abs() < TOL);
    }

    #[test]
    fn test_sign_follows_argument_order() {
        let forward = two_proportion_ztest(
            Proportion::new(120, 1000),
            Proportion::new(100, 1000),
            Alternative::TwoSided,
        )
        .unwrap();
        let backward = two_proportion_ztest(
            Proportion::new(100, 1000),
            Proportion::new(120, 1000),
            Alternative::TwoSided,
        )
        .unwrap();

        assert!((forward.z_statistic + backward.z_statistic).abs() < TOL);
        assert!((forward.p_value - backward.p_value).abs() < TOL);
    }

    #[test]
    fn test_marketing_counts() {
        let result = two_proportion_ztest(
            Proportion::new(14423, 564577),
            Proportion::new(420, 23524),
            Alternative::TwoSided,
        )
        .unwrap();

        assert!((result.z_statistic - 7.370078127).abs() < 1e-6);
        assert!(result.p_value < 1e-12);
    }

    #[test]
    fn test_one_sided_halves_two_sided() {
        let first = Proportion::new(30, 100);
        let second = Proportion::new(10, 100);

        let two = two_proportion_ztest(first, second, Alternative::TwoSided).unwrap();
        let larger = two_proportion_ztest(first, second, Alternative::Larger).unwrap();
        let smaller = two_proportion_ztest(first, second, Alternative::Smaller).unwrap();

        assert!((two.z_statistic - 3.535533906).abs() < TOL);
        assert!((larger.p_value * 2.0 - two.p_value).abs() < 1e-9);
        assert!((larger.p_value + smaller.p_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_conversions_in_one_group() {
        let result = two_proportion_ztest(
            Proportion::new(0, 50),
            Proportion::new(5, 50),
            Alternative::TwoSided,
        )
        .unwrap();

        assert!(result.p_value.is_finite());
        assert!((result.z_statistic - (-2.294157339)).abs() < TOL);
        assert!((result.p_value - 0.021781463).abs() < TOL);
    }

    #[test]
    fn test_zero_conversions_everywhere() {
        let result = two_proportion_ztest(
            Proportion::new(0, 40),
            Proportion::new(0, 60),
            Alternative::TwoSided,
        )
        .unwrap();

        assert_eq!(result.z_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.standard_error, 0.0);
    }

    #[test]
    fn test_invalid_samples() {
        let empty = two_proportion_ztest(
            Proportion::new(0, 0),
            Proportion::new(1, 10),
            Alternative::TwoSided,
        );
        assert!(matches!(empty, Err(AppError::Statistics(_))));

        let overfull = two_proportion_ztest(
            Proportion::new(1, 10),
            Proportion::new(11, 10),
            Alternative::TwoSided,
        );
        assert!(matches!(overfull, Err(AppError::Statistics(_))));
    }

    #[test]
    fn test_confidence_interval_contains_difference() {
        let first = Proportion::new(120, 1000);
        let second = Proportion::new(100, 1000);
        let (low, high) = difference_confidence_interval(first, second, 0.05).unwrap();

        let diff = first.rate() - second.rate();
        assert!(low < diff && diff < high);
        // 1.959964 * sqrt(0.12*0.88/1000 + 0.1*0.9/1000)
        let half_width = 1.959963985 * (0.1056f64 / 1000.0 + 0.09 / 1000.0).sqrt();
        assert!(((high - low) / 2.0 - half_width).abs() < 1e-6);
    }

    #[test]
    fn test_rate_of_empty_proportion() {
        assert_eq!(Proportion::new(0, 0).rate(), 0.0);
        assert_eq!(Proportion::new(3, 4).rate(), 0.75);
    }
}
