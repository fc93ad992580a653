//! Pricing configuration
//!
//! Every formula constant is a parameter with the protocol's deployed value
//! as its default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shield_common::{ConfigError, Industry, JobType, LAMPORTS_PER_SOL, MAX_REPUTATION_DISCOUNT};
use std::collections::BTreeMap;

use crate::pricing::DiscountMapper;

/// Premium pricing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Premium at reference coverage, reference period and neutral risk (lamports)
    pub base_rate: Decimal,

    /// Coverage at which the coverage factor is 1.0 (lamports)
    pub reference_coverage: u64,
    /// Period at which the period factor is 1.0
    pub reference_period_days: u32,

    /// Exponent of the coverage curve
    pub coverage_curve_exponent: f64,
    /// Cap on the power term of the coverage curve
    pub max_coverage_ratio: f64,
    /// Exponent of the period curve (> 1 is super-linear)
    pub period_exponent: f64,

    /// Risk weight added per prior claim
    pub claims_weight: f64,
    /// Market adjustment added per volatility point
    pub volatility_weight: f64,

    /// Reputation score where discounts start
    pub discount_threshold: f64,
    /// Discount at a perfect score
    pub max_discount: f64,

    pub min_coverage: u64,
    pub max_coverage: u64,
    pub min_period_days: u32,
    pub max_period_days: u32,

    /// Coverage at which the risk score's coverage component saturates (lamports)
    pub coverage_impact_ceiling: u64,

    pub job_weights: BTreeMap<JobType, f64>,
    pub industry_weights: BTreeMap<Industry, f64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rate: Decimal::from(LAMPORTS_PER_SOL / 10),
            reference_coverage: LAMPORTS_PER_SOL,
            reference_period_days: 30,
            coverage_curve_exponent: 0.2,
            max_coverage_ratio: 5.0,
            period_exponent: 1.1,
            claims_weight: 0.15,
            volatility_weight: 0.05,
            discount_threshold: 50.0,
            max_discount: MAX_REPUTATION_DISCOUNT,
            min_coverage: LAMPORTS_PER_SOL / 10,
            max_coverage: 1_000_000 * LAMPORTS_PER_SOL,
            min_period_days: 7,
            max_period_days: 365,
            coverage_impact_ceiling: 10 * LAMPORTS_PER_SOL,
            job_weights: JobType::ALL
                .iter()
                .map(|j| (*j, j.default_risk_weight()))
                .collect(),
            industry_weights: Industry::ALL
                .iter()
                .map(|i| (*i, i.default_risk_weight()))
                .collect(),
        }
    }
}

impl PricingConfig {
    /// Set base rate
    pub fn with_base_rate(mut self, base_rate: Decimal) -> Self {
        self.base_rate = base_rate;
        self
    }

    /// Set the score where discounts begin
    pub fn with_discount_threshold(mut self, threshold: f64) -> Self {
        self.discount_threshold = threshold;
        self
    }

    /// Set the discount at a perfect score
    pub fn with_max_discount(mut self, max_discount: f64) -> Self {
        self.max_discount = max_discount;
        self
    }

    /// Override a job type risk weight
    pub fn with_job_weight(mut self, job_type: JobType, weight: f64) -> Self {
        self.job_weights.insert(job_type, weight);
        self
    }

    /// Override an industry risk weight
    pub fn with_industry_weight(mut self, industry: Industry, weight: f64) -> Self {
        self.industry_weights.insert(industry, weight);
        self
    }

    /// Set the coverage bounds (lamports)
    pub fn with_coverage_limits(mut self, min: u64, max: u64) -> Self {
        self.min_coverage = min;
        self.max_coverage = max;
        self
    }

    /// Set the period bounds (days)
    pub fn with_period_limits(mut self, min: u32, max: u32) -> Self {
        self.min_period_days = min;
        self.max_period_days = max;
        self
    }

    pub fn job_weight(&self, job_type: JobType) -> f64 {
        self.job_weights
            .get(&job_type)
            .copied()
            .unwrap_or_else(|| job_type.default_risk_weight())
    }

    pub fn industry_weight(&self, industry: Industry) -> f64 {
        self.industry_weights
            .get(&industry)
            .copied()
            .unwrap_or_else(|| industry.default_risk_weight())
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_rate <= Decimal::ZERO {
            return Err(ConfigError::invalid(
                "base_rate",
                format!("{} must be positive", self.base_rate),
            ));
        }
        if self.reference_coverage == 0 {
            return Err(ConfigError::invalid("reference_coverage", "must be positive"));
        }
        if self.reference_period_days == 0 {
            return Err(ConfigError::invalid("reference_period_days", "must be positive"));
        }

        ensure("coverage_curve_exponent", self.coverage_curve_exponent, |v| v > 0.0 && v < 1.0)?;
        ensure("max_coverage_ratio", self.max_coverage_ratio, |v| v >= 1.0)?;
        ensure("period_exponent", self.period_exponent, |v| v >= 1.0)?;
        ensure("claims_weight", self.claims_weight, |v| v >= 0.0)?;
        ensure("volatility_weight", self.volatility_weight, |v| v >= 0.0)?;
        DiscountMapper::new(self.discount_threshold, self.max_discount)?;

        if self.min_coverage == 0 || self.min_coverage > self.max_coverage {
            return Err(ConfigError::invalid(
                "coverage limits",
                format!("[{}, {}] is not a positive range", self.min_coverage, self.max_coverage),
            ));
        }
        if self.min_period_days == 0 || self.min_period_days > self.max_period_days {
            return Err(ConfigError::invalid(
                "period limits",
                format!("[{}, {}] is not a positive range", self.min_period_days, self.max_period_days),
            ));
        }
        if self.coverage_impact_ceiling == 0 {
            return Err(ConfigError::invalid("coverage_impact_ceiling", "must be positive"));
        }

        for job_type in JobType::ALL {
            let weight = *self.job_weights.get(&job_type).ok_or(ConfigError::MissingWeight {
                set: "job type",
                key: format!("{job_type:?}"),
            })?;
            check_positive_weight("job type weight", weight)?;
        }
        for industry in Industry::ALL {
            let weight = *self.industry_weights.get(&industry).ok_or(ConfigError::MissingWeight {
                set: "industry",
                key: format!("{industry:?}"),
            })?;
            check_positive_weight("industry weight", weight)?;
        }

        Ok(())
    }
}

/// Finite and accepted by `ok`
pub(crate) fn ensure(name: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{value} outside allowed range")))
    }
}

fn check_positive_weight(name: &'static str, weight: f64) -> Result<(), ConfigError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{weight} must be positive")))
    }
}
