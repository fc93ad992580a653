//! Deterministic premium pricing engine
//!
//! ```text
//! premium = max(base_rate · coverage · period · risk · reputation · market, minimum)
//! ```
//!
//! The engine is pure: no clock, no randomness, no shared mutable state.
//! Identical requests produce identical quotes.

use rust_decimal::Decimal;
use shield_common::{
    PolicyRequest, PremiumFactors, PremiumQuote, PricingError, RequestError, Result,
    MAX_MARKET_VOLATILITY, MAX_REPUTATION_SCORE, MIN_REPUTATION_SCORE,
};
use tracing::{debug, instrument};

use super::discount::DiscountMapper;
use super::{factors, risk};
use crate::config::PricingConfig;

/// Premium pricing engine
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
    discount: DiscountMapper,
    /// Cached `base_rate · cf(min_coverage) · pf(min_period)`
    minimum_premium: Decimal,
}

impl PricingEngine {
    /// Create an engine, rejecting an invalid configuration
    pub fn new(config: PricingConfig) -> Result<Self> {
        config.validate()?;

        let floor_multiplier = factors::coverage_factor(config.min_coverage, &config)
            * factors::period_factor(config.min_period_days, &config);
        let minimum_premium = scale(config.base_rate, floor_multiplier)?;

        debug!(
            base_rate = %config.base_rate,
            minimum_premium = %minimum_premium,
            "Pricing engine ready"
        );

        Ok(Self {
            discount: DiscountMapper::from_config(&config)?,
            config,
            minimum_premium,
        })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn discount_mapper(&self) -> &DiscountMapper {
        &self.discount
    }

    /// Protocol minimum premium (lamports)
    pub fn minimum_premium(&self) -> Decimal {
        self.minimum_premium
    }

    /// Price a coverage request
    #[instrument(skip(self), fields(coverage = request.coverage_amount, days = request.period_days))]
    pub fn quote(&self, request: &PolicyRequest) -> Result<PremiumQuote> {
        self.validate(request)?;

        let config = &self.config;
        let coverage_factor = factors::coverage_factor(request.coverage_amount, config);
        let period_factor = factors::period_factor(request.period_days, config);
        let risk_breakdown = factors::risk_weight(
            request.job_type,
            request.industry,
            request.claims_history_count,
            config,
        );
        let risk_weight = factors::combined_risk_weight(&risk_breakdown);
        let discount_percentage = self.discount.discount(request.reputation_score);
        let reputation_multiplier = 1.0 - discount_percentage;
        let market_adjustment = factors::market_adjustment(request.market_volatility, config);

        let risk_score = risk::risk_score(
            &risk_breakdown,
            request.claims_history_count,
            request.coverage_amount,
            request.reputation_score,
            config,
        );

        let factors = PremiumFactors {
            base_rate: config.base_rate,
            coverage_factor,
            period_factor,
            risk_weight,
            reputation_multiplier,
            market_adjustment,
            risk_score,
        };

        let computed = scale(config.base_rate, factors.multiplier())?;
        let floor_applied = computed < self.minimum_premium;
        let premium = computed.max(self.minimum_premium);

        debug!(
            multiplier = factors.multiplier(),
            %premium,
            floor_applied,
            risk_score,
            "Premium computed"
        );

        Ok(PremiumQuote {
            premium,
            minimum_premium: self.minimum_premium,
            floor_applied,
            factors,
            risk_breakdown,
            discount_percentage,
            request_fingerprint: request.fingerprint(),
        })
    }

    /// Reject a request before any factor is computed
    pub fn validate(&self, request: &PolicyRequest) -> std::result::Result<(), RequestError> {
        let config = &self.config;

        if request.coverage_amount == 0 {
            return Err(RequestError::NonPositiveCoverage);
        }
        if !(config.min_coverage..=config.max_coverage).contains(&request.coverage_amount) {
            return Err(RequestError::CoverageOutOfRange {
                amount: request.coverage_amount,
                min: config.min_coverage,
                max: config.max_coverage,
            });
        }

        if request.period_days == 0 {
            return Err(RequestError::NonPositivePeriod);
        }
        if !(config.min_period_days..=config.max_period_days).contains(&request.period_days) {
            return Err(RequestError::PeriodOutOfRange {
                days: request.period_days,
                min: config.min_period_days,
                max: config.max_period_days,
            });
        }

        let score = request.reputation_score;
        if !score.is_finite() || !(MIN_REPUTATION_SCORE..=MAX_REPUTATION_SCORE).contains(&score) {
            return Err(RequestError::ReputationOutOfRange(score));
        }

        let volatility = request.market_volatility;
        if !volatility.is_finite() || !(0.0..=MAX_MARKET_VOLATILITY).contains(&volatility) {
            return Err(RequestError::VolatilityOutOfRange(volatility));
        }

        Ok(())
    }
}

/// `amount · multiplier`, rounded up to a whole unit
fn scale(amount: Decimal, multiplier: f64) -> std::result::Result<Decimal, PricingError> {
    let factor = Decimal::try_from(multiplier).map_err(|_| PricingError::Overflow(multiplier))?;
    amount
        .checked_mul(factor)
        .map(|v| v.ceil())
        .ok_or(PricingError::Overflow(multiplier))
}
