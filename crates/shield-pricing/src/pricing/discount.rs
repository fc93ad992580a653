//! Reputation discount mapping
//!
//! ```text
//! score < threshold        → multiplier 1.0
//! threshold ≤ score ≤ 100  → multiplier 1 − max_discount · (score − threshold) / (100 − threshold)
//! ```

use shield_common::{
    ConfigError, MAX_REPUTATION_DISCOUNT, MAX_REPUTATION_SCORE, MIN_REPUTATION_SCORE,
};

use crate::config::{ensure, PricingConfig};

/// Maps a 0-100 reputation score to a premium multiplier in [0.70, 1.00]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountMapper {
    threshold: f64,
    max_discount: f64,
}

impl DiscountMapper {
    /// Create a mapper
    ///
    /// `threshold` must lie in [0, 100) and `max_discount` in [0, 0.30].
    pub fn new(threshold: f64, max_discount: f64) -> Result<Self, ConfigError> {
        ensure("discount_threshold", threshold, |v| {
            (MIN_REPUTATION_SCORE..MAX_REPUTATION_SCORE).contains(&v)
        })?;
        ensure("max_discount", max_discount, |v| {
            (0.0..=MAX_REPUTATION_DISCOUNT).contains(&v)
        })?;

        Ok(Self {
            threshold,
            max_discount,
        })
    }

    pub fn from_config(config: &PricingConfig) -> Result<Self, ConfigError> {
        Self::new(config.discount_threshold, config.max_discount)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn max_discount(&self) -> f64 {
        self.max_discount
    }

    /// Discount fraction granted at `score`
    pub fn discount(&self, score: f64) -> f64 {
        debug_assert!(
            (MIN_REPUTATION_SCORE..=MAX_REPUTATION_SCORE).contains(&score),
            "reputation score {score} outside [0, 100]"
        );

        if score < self.threshold {
            return 0.0;
        }

        let span = MAX_REPUTATION_SCORE - self.threshold;
        let progress = ((score - self.threshold) / span).clamp(0.0, 1.0);
        self.max_discount * progress
    }

    /// Premium multiplier at `score`
    #[inline]
    pub fn multiplier(&self, score: f64) -> f64 {
        1.0 - self.discount(score)
    }
}

impl Default for DiscountMapper {
    fn default() -> Self {
        let config = PricingConfig::default();
        Self {
            threshold: config.discount_threshold,
            max_discount: config.max_discount,
        }
    }
}
