//! Reputation types - dimensions, sources, records, and profiles
//!
//! Reputation is scored along independent [`ReputationDimension`]s using
//! evidence from several [`ReputationSource`]s. Providers emit
//! [`ReputationRecord`]s; the aggregator folds them into a
//! [`ReputationProfile`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::RecordError;
use crate::MAX_RECORD_WEIGHT;
use crate::types::subject::SubjectKey;

/// Independent axes of trustworthiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationDimension {
    /// Share of accepted work that was delivered
    CompletedWork,
    /// Behaviour when disputes arise
    DisputeResolution,
    /// Paying and getting paid on time
    PaymentHistory,
    /// Cleanliness of past insurance claims
    ClaimHistory,
    /// Governance and community activity
    CommunityParticipation,
}

impl ReputationDimension {
    pub const ALL: [ReputationDimension; 5] = [
        ReputationDimension::CompletedWork,
        ReputationDimension::DisputeResolution,
        ReputationDimension::PaymentHistory,
        ReputationDimension::ClaimHistory,
        ReputationDimension::CommunityParticipation,
    ];

    /// Default configured weight (sums to 1.0 across all dimensions)
    pub fn default_weight(&self) -> f64 {
        match self {
            ReputationDimension::CompletedWork => 0.40,
            ReputationDimension::DisputeResolution => 0.20,
            ReputationDimension::PaymentHistory => 0.15,
            ReputationDimension::ClaimHistory => 0.15,
            ReputationDimension::CommunityParticipation => 0.10,
        }
    }
}

impl std::fmt::Display for ReputationDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReputationDimension::CompletedWork => write!(f, "completed_work"),
            ReputationDimension::DisputeResolution => write!(f, "dispute_resolution"),
            ReputationDimension::PaymentHistory => write!(f, "payment_history"),
            ReputationDimension::ClaimHistory => write!(f, "claim_history"),
            ReputationDimension::CommunityParticipation => write!(f, "community_participation"),
        }
    }
}

/// Attestation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationSource {
    /// The protocol's own on-chain reputation ledger
    FreelanceShield,
    /// Colony reputation (Ethereum)
    Colony,
    /// Braintrust talent network (Solana)
    Braintrust,
}

impl ReputationSource {
    pub const ALL: [ReputationSource; 3] = [
        ReputationSource::FreelanceShield,
        ReputationSource::Colony,
        ReputationSource::Braintrust,
    ];

    /// Default configured weight (sums to 1.0 across all sources)
    pub fn default_weight(&self) -> f64 {
        match self {
            ReputationSource::FreelanceShield => 0.65,
            ReputationSource::Colony => 0.20,
            ReputationSource::Braintrust => 0.15,
        }
    }
}

impl std::fmt::Display for ReputationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReputationSource::FreelanceShield => write!(f, "freelanceshield"),
            ReputationSource::Colony => write!(f, "colony"),
            ReputationSource::Braintrust => write!(f, "braintrust"),
        }
    }
}

/// Where an observation can be verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Provenance {
    /// On-chain transaction signature
    TransactionId(String),
    /// External attestation URI
    ExternalUri(String),
}

/// One normalized observation
///
/// Fields are private: a record can only be built through [`ReputationRecord::new`],
/// which rejects values outside [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationRecord {
    source: ReputationSource,
    dimension: ReputationDimension,
    value: f64,
    weight: f64,
    timestamp: i64,
    provenance: Option<Provenance>,
}

impl ReputationRecord {
    /// Create a validated record
    ///
    /// `value` is an observed success ratio in [0, 1]; `weight` is the
    /// observation's confidence (evidence mass), in [0, `MAX_RECORD_WEIGHT`].
    pub fn new(
        source: ReputationSource,
        dimension: ReputationDimension,
        value: f64,
        weight: f64,
        timestamp: i64,
    ) -> Result<Self, RecordError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(RecordError::InvalidValue {
                source_name: source.to_string(),
                dimension,
                value,
            });
        }
        if !weight.is_finite() || !(0.0..=MAX_RECORD_WEIGHT).contains(&weight) {
            return Err(RecordError::InvalidWeight {
                source_name: source.to_string(),
                dimension,
                weight,
            });
        }

        Ok(Self {
            source,
            dimension,
            value,
            weight,
            timestamp,
            provenance: None,
        })
    }

    /// Attach a provenance reference
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub fn source(&self) -> ReputationSource {
        self.source
    }

    pub fn dimension(&self) -> ReputationDimension {
        self.dimension
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    /// Weighted positive evidence contributed by this record
    #[inline]
    pub fn positive_mass(&self) -> f64 {
        self.value * self.weight
    }
}

/// Beta-distribution prior as pseudo-observations of success/failure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BayesianPrior {
    /// Pseudo-count of successes
    pub alpha: f64,
    /// Pseudo-count of failures
    pub beta: f64,
}

impl BayesianPrior {
    pub const fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Both parameters finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.alpha.is_finite() && self.beta.is_finite() && self.alpha > 0.0 && self.beta > 0.0
    }

    /// Expected value with no evidence
    #[inline]
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Posterior mean after `positive` weighted successes out of `total` weighted observations
    ///
    /// `score = (alpha + positive) / (alpha + beta + total)`
    #[inline]
    pub fn posterior_mean(&self, positive: f64, total: f64) -> f64 {
        (self.alpha + positive) / (self.alpha + self.beta + total)
    }
}

impl Default for BayesianPrior {
    /// Moderate trust with uncertainty: five good, two bad pseudo-observations
    fn default() -> Self {
        Self::new(5.0, 2.0)
    }
}

/// Aggregated reputation for one subject
#[derive(Debug, Clone, Serialize)]
pub struct ReputationProfile {
    /// Subject that was scored
    pub subject: SubjectKey,

    /// Weighted composite of all dimension scores (0.0 - 1.0)
    pub overall_score: f64,

    /// Posterior score for every dimension
    pub dimension_scores: BTreeMap<ReputationDimension, f64>,

    /// Weighted mean per source; sources without evidence are absent
    pub source_scores: BTreeMap<ReputationSource, f64>,

    /// Source scores combined with the configured source weights
    pub source_composite: Option<f64>,

    /// Every record that contributed
    pub records: Vec<ReputationRecord>,

    /// Computation timestamp (Unix milliseconds)
    pub last_updated: i64,
}

impl ReputationProfile {
    /// Overall score on the 0-100 scale used by the pricing API
    #[inline]
    pub fn pricing_score(&self) -> f64 {
        (self.overall_score * crate::MAX_REPUTATION_SCORE).clamp(0.0, crate::MAX_REPUTATION_SCORE)
    }

    /// Whether any provider contributed evidence
    pub fn has_evidence(&self) -> bool {
        !self.source_scores.is_empty()
    }

    /// Records contributed by one source
    pub fn records_from(&self, source: ReputationSource) -> impl Iterator<Item = &ReputationRecord> {
        self.records.iter().filter(move |r| r.source() == source)
    }
}

impl std::fmt::Display for ReputationProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ReputationProfile({}, overall={:.3}, sources={}, records={})",
            self.subject,
            self.overall_score,
            self.source_scores.len(),
            self.records.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let dims: f64 = ReputationDimension::ALL.iter().map(|d| d.default_weight()).sum();
        let srcs: f64 = ReputationSource::ALL.iter().map(|s| s.default_weight()).sum();
        assert!((dims - 1.0).abs() < crate::WEIGHT_SUM_TOLERANCE);
        assert!((srcs - 1.0).abs() < crate::WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn test_record_rejects_out_of_range_value() {
        let err = ReputationRecord::new(
            ReputationSource::Colony,
            ReputationDimension::CompletedWork,
            1.2,
            1.0,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::InvalidValue { .. }));

        assert!(ReputationRecord::new(
            ReputationSource::Colony,
            ReputationDimension::CompletedWork,
            -0.01,
            1.0,
            0,
        )
        .is_err());
        assert!(ReputationRecord::new(
            ReputationSource::Colony,
            ReputationDimension::CompletedWork,
            f64::NAN,
            1.0,
            0,
        )
        .is_err());
    }

    #[test]
    fn test_record_rejects_negative_weight() {
        let err = ReputationRecord::new(
            ReputationSource::Braintrust,
            ReputationDimension::PaymentHistory,
            0.5,
            -1.0,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, RecordError::InvalidWeight { .. }));
    }

    #[test]
    fn test_record_weight_is_bounded() {
        let at_cap = ReputationRecord::new(
            ReputationSource::FreelanceShield,
            ReputationDimension::CompletedWork,
            1.0,
            MAX_RECORD_WEIGHT,
            0,
        );
        assert!(at_cap.is_ok());

        for weight in [MAX_RECORD_WEIGHT * 2.0, 1e17, f64::INFINITY] {
            let err = ReputationRecord::new(
                ReputationSource::FreelanceShield,
                ReputationDimension::CompletedWork,
                1.0,
                weight,
                0,
            )
            .unwrap_err();
            assert!(matches!(err, RecordError::InvalidWeight { .. }));
        }
    }

    #[test]
    fn test_record_accessors() {
        let record = ReputationRecord::new(
            ReputationSource::FreelanceShield,
            ReputationDimension::ClaimHistory,
            0.75,
            4.0,
            1_700_000_000_000,
        )
        .unwrap()
        .with_provenance(Provenance::TransactionId("5xYz".to_string()));

        assert_eq!(record.source(), ReputationSource::FreelanceShield);
        assert_eq!(record.dimension(), ReputationDimension::ClaimHistory);
        assert_eq!(record.positive_mass(), 3.0);
        assert_eq!(record.timestamp(), 1_700_000_000_000);
        assert!(matches!(record.provenance(), Some(Provenance::TransactionId(_))));
    }

    #[test]
    fn test_prior_mean_and_posterior() {
        let prior = BayesianPrior::default();
        assert!((prior.mean() - 5.0 / 7.0).abs() < 1e-12);
        assert_eq!(prior.posterior_mean(0.0, 0.0), prior.mean());
        // 10 successes out of 10 observations
        assert!((prior.posterior_mean(10.0, 10.0) - 15.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_prior_validity() {
        assert!(BayesianPrior::new(1.0, 1.0).is_valid());
        assert!(!BayesianPrior::new(0.0, 1.0).is_valid());
        assert!(!BayesianPrior::new(1.0, -2.0).is_valid());
        assert!(!BayesianPrior::new(f64::INFINITY, 1.0).is_valid());
    }
}
