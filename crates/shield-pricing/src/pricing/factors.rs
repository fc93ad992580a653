//! Premium factor functions
//!
//! Each factor is a pure function of one request field and the configuration.
//! All of them are exactly 1.0 at the reference point.

use shield_common::{Industry, JobType, RiskWeightBreakdown};

use crate::config::PricingConfig;

/// Coverage factor: `(1 + ln(max(1, r))) · min(r^k, cap)` with `r = coverage / reference`
///
/// Strictly increasing in coverage and concave enough that doubling the
/// coverage never doubles the factor.
pub fn coverage_factor(coverage: u64, config: &PricingConfig) -> f64 {
    let ratio = coverage as f64 / config.reference_coverage as f64;
    let log_term = 1.0 + ratio.max(1.0).ln();
    let power_term = ratio
        .powf(config.coverage_curve_exponent)
        .min(config.max_coverage_ratio);
    log_term * power_term
}

/// Period factor: `(days / reference_days)^k`
pub fn period_factor(period_days: u32, config: &PricingConfig) -> f64 {
    let ratio = period_days as f64 / config.reference_period_days as f64;
    ratio.powf(config.period_exponent)
}

/// Risk weight and its components
pub fn risk_weight(
    job_type: JobType,
    industry: Industry,
    claims: u32,
    config: &PricingConfig,
) -> RiskWeightBreakdown {
    RiskWeightBreakdown {
        job_weight: config.job_weight(job_type),
        industry_weight: config.industry_weight(industry),
        claims_adjustment: 1.0 + claims as f64 * config.claims_weight,
    }
}

/// Combined risk weight
#[inline]
pub fn combined_risk_weight(breakdown: &RiskWeightBreakdown) -> f64 {
    breakdown.job_weight * breakdown.industry_weight * breakdown.claims_adjustment
}

/// Market adjustment: `1 + volatility · weight`
#[inline]
pub fn market_adjustment(volatility: f64, config: &PricingConfig) -> f64 {
    1.0 + volatility * config.volatility_weight
}
