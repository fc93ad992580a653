//! Bayesian reputation aggregator
//!
//! Coordinates a reputation lookup:
//! 1. Fans out to every registered adapter (each under its own timeout)
//! 2. Waits for all of them
//! 3. Applies a Beta posterior update per dimension
//! 4. Rolls dimensions and sources up into composite scores

pub mod scoring;

use shield_common::{ConfigError, ReputationProfile, ReputationRecord, SubjectKey};
use tracing::{debug, info, instrument};

use crate::adapters::AdapterRegistry;
use crate::config::ReputationConfig;

/// Reputation aggregator over a fixed adapter registry
///
/// Holds no mutable state; a single instance can score any number of
/// subjects concurrently.
#[derive(Debug, Clone)]
pub struct ReputationAggregator {
    config: ReputationConfig,
    registry: AdapterRegistry,
}

impl ReputationAggregator {
    /// Create an aggregator, rejecting an invalid configuration
    pub fn new(config: ReputationConfig, registry: AdapterRegistry) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            sources = ?registry.sources(),
            timeout_ms = registry.timeout().as_millis() as u64,
            "Reputation aggregator ready"
        );
        Ok(Self { config, registry })
    }

    pub fn config(&self) -> &ReputationConfig {
        &self.config
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    /// Fetch evidence from every provider and score the subject
    ///
    /// Never fails: unavailable providers simply contribute nothing.
    #[instrument(skip(self, subject), fields(subject = %subject))]
    pub async fn profile(&self, subject: &SubjectKey) -> ReputationProfile {
        let records = self.registry.fetch_all(subject).await;
        let profile = self.aggregate(subject.clone(), records, chrono::Utc::now().timestamp_millis());

        info!(
            overall = profile.overall_score,
            sources = profile.source_scores.len(),
            records = profile.records.len(),
            "Reputation profile computed"
        );
        profile
    }

    /// Score already-collected records
    ///
    /// Deterministic for a given `(records, now)`; zero records yield the
    /// prior-only profile.
    pub fn aggregate(
        &self,
        subject: SubjectKey,
        records: Vec<ReputationRecord>,
        now: i64,
    ) -> ReputationProfile {
        let dimension_scores = scoring::dimension_scores(&records, &self.config);
        let source_scores = scoring::source_scores(&records);

        let overall_score = scoring::weighted_mean(
            dimension_scores.iter().map(|(d, s)| (*d, *s)),
            |d| self.config.dimension_weight(d),
        )
        .unwrap_or(0.0);

        let source_composite = scoring::weighted_mean(
            source_scores.iter().map(|(s, v)| (*s, *v)),
            |s| self.config.source_weight(s),
        );

        debug!(
            ?dimension_scores,
            ?source_scores,
            ?source_composite,
            "Aggregated reputation evidence"
        );

        ReputationProfile {
            subject,
            overall_score,
            dimension_scores,
            source_scores,
            source_composite,
            records,
            last_updated: now,
        }
    }
}
