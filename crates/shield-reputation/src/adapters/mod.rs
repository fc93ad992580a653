//! Source adapters
//!
//! Each adapter turns one provider's raw attestation payload into
//! [`ReputationRecord`]s. Adapters never fail the aggregation: provider
//! outages, malformed payloads, and timeouts all degrade to an empty list.
//!
//! The network is reached through [`AttestationTransport`], so production code
//! plugs in a real client and tests plug in deterministic fakes.

pub mod braintrust;
pub mod colony;
pub mod ledger;

pub use braintrust::BraintrustAdapter;
pub use colony::ColonyAdapter;
pub use ledger::LedgerAdapter;

use async_trait::async_trait;
use futures::future::join_all;
use shield_common::{
    AdapterError, ConfigError, Provenance, ReputationDimension, ReputationRecord, ReputationSource,
    SubjectKey,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Read-only query capability for a provider's attestation interface
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttestationTransport: Send + Sync {
    /// Fetch the provider's raw payload for `key`
    ///
    /// `Ok(Value::Null)` means the provider has no data for the key.
    async fn query(
        &self,
        source: ReputationSource,
        key: &str,
    ) -> Result<serde_json::Value, AdapterError>;
}

/// One attestation provider
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Provider this adapter speaks for
    fn source(&self) -> ReputationSource;

    /// Fetch and normalize records, surfacing provider failures
    async fn try_fetch(&self, subject: &SubjectKey) -> Result<Vec<ReputationRecord>, AdapterError>;

    /// Fetch and normalize records; failures yield an empty list
    async fn fetch_records(&self, subject: &SubjectKey) -> Vec<ReputationRecord> {
        match self.try_fetch(subject).await {
            Ok(records) => {
                debug!(source = %self.source(), count = records.len(), "Adapter returned records");
                records
            }
            Err(e) => {
                warn!(source = %self.source(), error = %e, "Adapter failed, continuing without its records");
                Vec::new()
            }
        }
    }
}

/// Fixed set of registered adapters with a shared per-call timeout
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    timeout: Duration,
}

impl AdapterRegistry {
    /// Empty registry
    pub fn new(timeout: Duration) -> Self {
        Self {
            adapters: Vec::new(),
            timeout,
        }
    }

    /// The protocol's standard providers: on-chain ledger, Colony, Braintrust
    pub fn standard(transport: Arc<dyn AttestationTransport>, timeout: Duration) -> Self {
        Self {
            adapters: vec![
                Arc::new(LedgerAdapter::new(transport.clone())),
                Arc::new(ColonyAdapter::new(transport.clone())),
                Arc::new(BraintrustAdapter::new(transport)),
            ],
            timeout,
        }
    }

    /// Register an adapter; each source may only be registered once
    pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) -> Result<(), ConfigError> {
        let source = adapter.source();
        if self.adapters.iter().any(|a| a.source() == source) {
            return Err(ConfigError::DuplicateSource(source));
        }
        self.adapters.push(adapter);
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_adapter(mut self, adapter: Arc<dyn SourceAdapter>) -> Result<Self, ConfigError> {
        self.register(adapter)?;
        Ok(self)
    }

    /// Registered sources in registration order
    pub fn sources(&self) -> Vec<ReputationSource> {
        self.adapters.iter().map(|a| a.source()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Query every adapter concurrently and join
    ///
    /// Each call gets its own timeout; a late adapter contributes nothing.
    /// Records come back grouped in registration order.
    pub async fn fetch_all(&self, subject: &SubjectKey) -> Vec<ReputationRecord> {
        let calls = self.adapters.iter().map(|adapter| {
            let adapter = adapter.clone();
            async move {
                match tokio::time::timeout(self.timeout, adapter.fetch_records(subject)).await {
                    Ok(records) => records,
                    Err(_) => {
                        let err = AdapterError::Timeout {
                            source_name: adapter.source().to_string(),
                            timeout_ms: self.timeout.as_millis() as u64,
                        };
                        warn!(error = %err, "Adapter timed out, continuing without its records");
                        Vec::new()
                    }
                }
            }
        });

        join_all(calls).await.into_iter().flatten().collect()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("sources", &self.sources())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Build a record from a success ratio
///
/// Returns `None` when there is no evidence (`total <= 0`) or when the ratio
/// falls outside [0, 1], which means the provider sent inconsistent data.
pub(crate) fn ratio_record(
    source: ReputationSource,
    dimension: ReputationDimension,
    successes: f64,
    total: f64,
    timestamp: i64,
    provenance: Option<Provenance>,
) -> Option<ReputationRecord> {
    if total.is_nan() || total <= 0.0 {
        return None;
    }
    scaled_record(source, dimension, successes / total, total, timestamp, provenance)
}

/// Build a record from an already-normalized value, dropping invalid ones
pub(crate) fn scaled_record(
    source: ReputationSource,
    dimension: ReputationDimension,
    value: f64,
    weight: f64,
    timestamp: i64,
    provenance: Option<Provenance>,
) -> Option<ReputationRecord> {
    match ReputationRecord::new(source, dimension, value, weight, timestamp) {
        Ok(record) => Some(match provenance {
            Some(p) => record.with_provenance(p),
            None => record,
        }),
        Err(e) => {
            warn!(error = %e, "Dropping invalid record");
            None
        }
    }
}

/// Decode a provider payload, treating `null` as "no data"
pub(crate) fn decode_payload<T: serde::de::DeserializeOwned>(
    source: ReputationSource,
    payload: serde_json::Value,
) -> Result<Option<T>, AdapterError> {
    if payload.is_null() {
        return Ok(None);
    }
    serde_json::from_value(payload)
        .map(Some)
        .map_err(|e| AdapterError::malformed(source, e.to_string()))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    fn braintrust_payload() -> serde_json::Value {
        json!({
            "jobs_completed": 9,
            "jobs_started": 10,
            "invoices_paid_on_time": 4,
            "invoices_total": 5
        })
    }

    #[test]
    fn test_ratio_record_without_evidence() {
        assert!(ratio_record(
            ReputationSource::Colony,
            ReputationDimension::CompletedWork,
            0.0,
            0.0,
            0,
            None
        )
        .is_none());
    }

    #[test]
    fn test_ratio_record_rejects_inconsistent_ratio() {
        // more successes than attempts
        assert!(ratio_record(
            ReputationSource::Braintrust,
            ReputationDimension::CompletedWork,
            12.0,
            10.0,
            0,
            None
        )
        .is_none());
    }

    #[test]
    fn test_ratio_record_weight_is_total() {
        let record = ratio_record(
            ReputationSource::Braintrust,
            ReputationDimension::PaymentHistory,
            3.0,
            4.0,
            7,
            Some(Provenance::ExternalUri("https://example.com".to_string())),
        )
        .unwrap();
        assert_eq!(record.value(), 0.75);
        assert_eq!(record.weight(), 4.0);
        assert!(record.provenance().is_some());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let transport: Arc<dyn AttestationTransport> = Arc::new(StaticTransport::default());
        let mut registry = AdapterRegistry::standard(transport.clone(), Duration::from_secs(1));
        let err = registry
            .register(Arc::new(ColonyAdapter::new(transport)))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSource(ReputationSource::Colony)));
        assert_eq!(registry.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_all_collects_every_adapter() {
        let transport = StaticTransport::default()
            .with_payload(ReputationSource::Braintrust, SUBJECT, braintrust_payload());
        let registry = AdapterRegistry::standard(Arc::new(transport), Duration::from_secs(1));

        let records = registry.fetch_all(&subject()).await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.source() == ReputationSource::Braintrust));
    }

    #[tokio::test]
    async fn test_failing_provider_degrades_to_empty() {
        let transport = StaticTransport::default()
            .with_payload(ReputationSource::Braintrust, SUBJECT, braintrust_payload())
            .failing(ReputationSource::FreelanceShield);
        let registry = AdapterRegistry::standard(Arc::new(transport), Duration::from_secs(1));

        let records = registry.fetch_all(&subject()).await;
        assert_eq!(records.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_times_out() {
        let transport = StaticTransport::default()
            .with_payload(ReputationSource::Braintrust, SUBJECT, braintrust_payload())
            .delayed(ReputationSource::Braintrust, Duration::from_secs(30));
        let registry = AdapterRegistry::standard(Arc::new(transport), Duration::from_millis(200));

        let records = registry.fetch_all(&subject()).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_mocked_transport_is_queried_with_subject_key() {
        let mut transport = MockAttestationTransport::new();
        transport
            .expect_query()
            .withf(|source, key| *source == ReputationSource::Braintrust && key == SUBJECT)
            .times(1)
            .returning(|_, _| Ok(braintrust_payload()));

        let adapter = BraintrustAdapter::new(Arc::new(transport));
        let records = adapter.fetch_records(&subject()).await;
        assert_eq!(records.len(), 2);
    }
}
