//! Reputation aggregation configuration
//!
//! Weights and priors are protocol parameters. They are checked once when the
//! aggregator is built; a bad weight set never reaches a scoring call.

use serde::{Deserialize, Serialize};
use shield_common::{
    BayesianPrior, ConfigError, ReputationDimension, ReputationSource, DEFAULT_ADAPTER_TIMEOUT_MS,
    WEIGHT_SUM_TOLERANCE,
};
use std::collections::BTreeMap;
use std::time::Duration;

/// Reputation aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReputationConfig {
    /// Weight of each dimension in the overall score (must sum to 1.0)
    pub dimension_weights: BTreeMap<ReputationDimension, f64>,
    /// Weight of each source in the source composite (must sum to 1.0)
    pub source_weights: BTreeMap<ReputationSource, f64>,
    /// Prior used for every dimension without an override
    pub default_prior: BayesianPrior,
    /// Per-dimension prior overrides
    pub prior_overrides: BTreeMap<ReputationDimension, BayesianPrior>,
    /// Per-adapter call timeout in milliseconds
    pub adapter_timeout_ms: u64,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            dimension_weights: ReputationDimension::ALL
                .iter()
                .map(|d| (*d, d.default_weight()))
                .collect(),
            source_weights: ReputationSource::ALL
                .iter()
                .map(|s| (*s, s.default_weight()))
                .collect(),
            default_prior: BayesianPrior::default(),
            prior_overrides: BTreeMap::new(),
            adapter_timeout_ms: DEFAULT_ADAPTER_TIMEOUT_MS,
        }
    }
}

impl ReputationConfig {
    /// Override a dimension weight
    pub fn with_dimension_weight(mut self, dimension: ReputationDimension, weight: f64) -> Self {
        self.dimension_weights.insert(dimension, weight);
        self
    }

    /// Override a source weight
    pub fn with_source_weight(mut self, source: ReputationSource, weight: f64) -> Self {
        self.source_weights.insert(source, weight);
        self
    }

    /// Replace the default prior
    pub fn with_default_prior(mut self, prior: BayesianPrior) -> Self {
        self.default_prior = prior;
        self
    }

    /// Give one dimension its own prior
    pub fn with_prior_override(mut self, dimension: ReputationDimension, prior: BayesianPrior) -> Self {
        self.prior_overrides.insert(dimension, prior);
        self
    }

    /// Set the per-adapter timeout
    pub fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Prior for a dimension
    pub fn prior_for(&self, dimension: ReputationDimension) -> BayesianPrior {
        self.prior_overrides
            .get(&dimension)
            .copied()
            .unwrap_or(self.default_prior)
    }

    /// Weight of a dimension (0 when unset)
    pub fn dimension_weight(&self, dimension: ReputationDimension) -> f64 {
        self.dimension_weights.get(&dimension).copied().unwrap_or(0.0)
    }

    /// Weight of a source (0 when unset)
    pub fn source_weight(&self, source: ReputationSource) -> f64 {
        self.source_weights.get(&source).copied().unwrap_or(0.0)
    }

    pub fn adapter_timeout(&self) -> Duration {
        Duration::from_millis(self.adapter_timeout_ms)
    }

    /// Check every invariant the aggregator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_weight_set(
            "dimension",
            ReputationDimension::ALL.iter().map(|d| (d.to_string(), self.dimension_weights.get(d))),
        )?;
        validate_weight_set(
            "source",
            ReputationSource::ALL.iter().map(|s| (s.to_string(), self.source_weights.get(s))),
        )?;

        if !self.default_prior.is_valid() {
            return Err(ConfigError::InvalidPrior {
                scope: "default".to_string(),
                alpha: self.default_prior.alpha,
                beta: self.default_prior.beta,
            });
        }
        for (dimension, prior) in &self.prior_overrides {
            if !prior.is_valid() {
                return Err(ConfigError::InvalidPrior {
                    scope: dimension.to_string(),
                    alpha: prior.alpha,
                    beta: prior.beta,
                });
            }
        }

        if self.adapter_timeout_ms == 0 {
            return Err(ConfigError::invalid("adapter_timeout_ms", "must be positive"));
        }

        Ok(())
    }
}

fn validate_weight_set<'a>(
    set: &'static str,
    entries: impl Iterator<Item = (String, Option<&'a f64>)>,
) -> Result<(), ConfigError> {
    let mut sum = 0.0;
    for (key, weight) in entries {
        let weight = *weight.ok_or(ConfigError::MissingWeight { set, key: key.clone() })?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::invalid(
                "weight",
                format!("{set} weight for {key} is {weight}"),
            ));
        }
        sum += weight;
    }

    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::WeightSum { set, sum });
    }
    Ok(())
}
