//! Advisory risk score (0-100)
//!
//! The score is reported alongside the premium but never feeds into it.

use shield_common::{RiskWeightBreakdown, MAX_REPUTATION_SCORE};

use crate::config::PricingConfig;

const OCCUPATION_POINTS: f64 = 20.0;
const CLAIMS_POINTS: f64 = 15.0;
const COVERAGE_POINTS: f64 = 30.0;
const REPUTATION_POINTS: f64 = 35.0;

/// Claims impact saturates at five claims
const CLAIMS_IMPACT_PER_CLAIM: f64 = 0.2;

/// Risk score for a validated request
///
/// Only the job and industry weights enter the occupation term, saturating at
/// 1.0; claims count once, through the claims impact. Fractional points are
/// truncated.
pub fn risk_score(
    weights: &RiskWeightBreakdown,
    claims: u32,
    coverage: u64,
    reputation_score: f64,
    config: &PricingConfig,
) -> u8 {
    let occupation_impact = (weights.job_weight * weights.industry_weight).clamp(0.0, 1.0);
    let claims_impact = (claims as f64 * CLAIMS_IMPACT_PER_CLAIM).min(1.0);
    let coverage_impact = (coverage as f64 / config.coverage_impact_ceiling as f64).min(1.0);
    let reputation_impact = 1.0 - reputation_score / MAX_REPUTATION_SCORE;

    let raw = occupation_impact * OCCUPATION_POINTS
        + claims_impact * CLAIMS_POINTS
        + coverage_impact * COVERAGE_POINTS
        + reputation_impact * REPUTATION_POINTS;

    raw.clamp(0.0, 100.0).floor() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::factors;
    use shield_common::{Industry, JobType, LAMPORTS_PER_SOL};

    fn weights(job: f64, industry: f64) -> RiskWeightBreakdown {
        RiskWeightBreakdown {
            job_weight: job,
            industry_weight: industry,
            claims_adjustment: 1.0,
        }
    }

    #[test]
    fn test_reference_request_score() {
        let config = PricingConfig::default();
        // 20 + 0 + 3 + 17.5, truncated
        assert_eq!(risk_score(&weights(1.0, 1.0), 0, LAMPORTS_PER_SOL, 50.0, &config), 40);
    }

    #[test]
    fn test_high_risk_occupation_keeps_component_shares() {
        let config = PricingConfig::default();
        let breakdown = factors::risk_weight(JobType::Consulting, Industry::Finance, 5, &config);

        // occupation saturates at 20, claims at 15: 20 + 15 + 3 + 17.5
        assert_eq!(risk_score(&breakdown, 5, LAMPORTS_PER_SOL, 50.0, &config), 55);
        // 20 + 0 + 3 + 0
        assert_eq!(risk_score(&breakdown, 0, LAMPORTS_PER_SOL, 100.0, &config), 23);
    }

    #[test]
    fn test_claims_adjustment_does_not_count_twice() {
        let config = PricingConfig::default();
        let clean = factors::risk_weight(JobType::Writing, Industry::Education, 0, &config);
        let claimed = factors::risk_weight(JobType::Writing, Industry::Education, 4, &config);

        assert_eq!(
            risk_score(&clean, 4, LAMPORTS_PER_SOL, 50.0, &config),
            risk_score(&claimed, 4, LAMPORTS_PER_SOL, 50.0, &config)
        );
    }

    #[test]
    fn test_score_saturates() {
        let config = PricingConfig::default();
        assert_eq!(risk_score(&weights(3.0, 2.0), 50, 100 * LAMPORTS_PER_SOL, 0.0, &config), 100);
    }

    #[test]
    fn test_better_reputation_lowers_score() {
        let config = PricingConfig::default();
        let poor = risk_score(&weights(1.0, 1.0), 1, LAMPORTS_PER_SOL, 10.0, &config);
        let good = risk_score(&weights(1.0, 1.0), 1, LAMPORTS_PER_SOL, 95.0, &config);
        assert!(good < poor);
    }
}
