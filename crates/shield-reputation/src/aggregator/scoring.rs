//! Pure scoring functions used by the aggregator

use shield_common::{ReputationDimension, ReputationRecord, ReputationSource, MAX_EVIDENCE_MASS};
use std::collections::BTreeMap;

use crate::config::ReputationConfig;

/// Weighted evidence accumulated for one dimension or source
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evidence {
    /// Σ value · weight
    pub positive: f64,
    /// Σ weight
    pub total: f64,
}

impl Evidence {
    /// Accumulate a record, rescaling proportionally once the mass passes
    /// [`MAX_EVIDENCE_MASS`] so the ratio is kept
    fn add(&mut self, record: &ReputationRecord) {
        self.positive += record.positive_mass();
        self.total += record.weight();

        if self.total > MAX_EVIDENCE_MASS {
            let scale = MAX_EVIDENCE_MASS / self.total;
            self.positive = (self.positive * scale).min(MAX_EVIDENCE_MASS);
            self.total = MAX_EVIDENCE_MASS;
        }
    }

    /// Observed ratio without a prior; `None` when there is no evidence mass
    pub fn ratio(&self) -> Option<f64> {
        (self.total > 0.0).then(|| (self.positive / self.total).clamp(0.0, 1.0))
    }
}

/// Sum evidence per dimension
pub fn evidence_by_dimension(
    records: &[ReputationRecord],
) -> BTreeMap<ReputationDimension, Evidence> {
    let mut evidence: BTreeMap<ReputationDimension, Evidence> = BTreeMap::new();
    for record in records {
        evidence.entry(record.dimension()).or_default().add(record);
    }
    evidence
}

/// Sum evidence per source
pub fn evidence_by_source(records: &[ReputationRecord]) -> BTreeMap<ReputationSource, Evidence> {
    let mut evidence: BTreeMap<ReputationSource, Evidence> = BTreeMap::new();
    for record in records {
        evidence.entry(record.source()).or_default().add(record);
    }
    evidence
}

/// Posterior mean for every dimension
///
/// Dimensions without records fall back to their prior mean, so the map
/// always holds every dimension.
pub fn dimension_scores(
    records: &[ReputationRecord],
    config: &ReputationConfig,
) -> BTreeMap<ReputationDimension, f64> {
    let evidence = evidence_by_dimension(records);

    ReputationDimension::ALL
        .iter()
        .map(|dimension| {
            let e = evidence.get(dimension).copied().unwrap_or_default();
            let score = config
                .prior_for(*dimension)
                .posterior_mean(e.positive, e.total);
            (*dimension, score)
        })
        .collect()
}

/// Evidence ratio per source, omitting sources with zero mass
pub fn source_scores(records: &[ReputationRecord]) -> BTreeMap<ReputationSource, f64> {
    evidence_by_source(records)
        .into_iter()
        .filter_map(|(source, e)| e.ratio().map(|score| (source, score)))
        .collect()
}

/// Normalized weighted mean over `scores`
///
/// Entries with no weight are ignored. Returns `None` when the weight total is 0.
pub fn weighted_mean<K: Copy>(
    scores: impl IntoIterator<Item = (K, f64)>,
    weight_of: impl Fn(K) -> f64,
) -> Option<f64> {
    let (sum, weights) = scores
        .into_iter()
        .fold((0.0, 0.0), |(sum, weights), (key, score)| {
            let w = weight_of(key);
            (sum + w * score, weights + w)
        });

    (weights > 0.0).then(|| (sum / weights).clamp(0.0, 1.0))
}
