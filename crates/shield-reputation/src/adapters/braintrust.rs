//! Braintrust talent network adapter (Solana)

use async_trait::async_trait;
use serde::Deserialize;
use shield_common::{
    AdapterError, Provenance, ReputationDimension, ReputationRecord, ReputationSource, SubjectKey,
};
use std::sync::Arc;
use tracing::instrument;

use super::{decode_payload, ratio_record, AttestationTransport, SourceAdapter};

/// Talent statistics published by Braintrust
#[derive(Debug, Clone, Deserialize)]
pub struct BraintrustTalent {
    pub jobs_completed: u32,
    pub jobs_started: u32,
    pub invoices_paid_on_time: u32,
    pub invoices_total: u32,
}

/// Adapter for Braintrust job and invoice history
pub struct BraintrustAdapter {
    transport: Arc<dyn AttestationTransport>,
}

impl BraintrustAdapter {
    pub fn new(transport: Arc<dyn AttestationTransport>) -> Self {
        Self { transport }
    }

    /// Normalize talent stats into completed-work and payment-history records
    pub fn normalize(talent: &BraintrustTalent, address: &str, now_ms: i64) -> Vec<ReputationRecord> {
        let provenance = Provenance::ExternalUri(format!("https://app.braintrust.io/talent/{address}"));

        [
            (
                ReputationDimension::CompletedWork,
                talent.jobs_completed,
                talent.jobs_started,
            ),
            (
                ReputationDimension::PaymentHistory,
                talent.invoices_paid_on_time,
                talent.invoices_total,
            ),
        ]
        .into_iter()
        .filter_map(|(dimension, successes, total)| {
            ratio_record(
                ReputationSource::Braintrust,
                dimension,
                successes as f64,
                total as f64,
                now_ms,
                Some(provenance.clone()),
            )
        })
        .collect()
    }
}

#[async_trait]
impl SourceAdapter for BraintrustAdapter {
    fn source(&self) -> ReputationSource {
        ReputationSource::Braintrust
    }

    #[instrument(skip(self, subject), fields(subject = %subject.address))]
    async fn try_fetch(&self, subject: &SubjectKey) -> Result<Vec<ReputationRecord>, AdapterError> {
        let address = subject.address.as_str();
        let payload = self.transport.query(self.source(), address).await?;

        let Some(talent) = decode_payload::<BraintrustTalent>(self.source(), payload)? else {
            return Ok(Vec::new());
        };

        Ok(Self::normalize(
            &talent,
            address,
            chrono::Utc::now().timestamp_millis(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_talent() {
        let talent = BraintrustTalent {
            jobs_completed: 18,
            jobs_started: 20,
            invoices_paid_on_time: 0,
            invoices_total: 0,
        };
        let records = BraintrustAdapter::normalize(&talent, "abc", 42);

        // No invoices means no payment evidence
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dimension(), ReputationDimension::CompletedWork);
        assert_eq!(records[0].value(), 0.9);
        assert_eq!(records[0].weight(), 20.0);
        assert_eq!(records[0].timestamp(), 42);
    }

    #[test]
    fn test_more_completed_than_started_is_rejected() {
        let talent = BraintrustTalent {
            jobs_completed: 25,
            jobs_started: 20,
            invoices_paid_on_time: 5,
            invoices_total: 5,
        };
        let records = BraintrustAdapter::normalize(&talent, "abc", 0);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dimension(), ReputationDimension::PaymentHistory);
        assert_eq!(records[0].value(), 1.0);
    }
}
