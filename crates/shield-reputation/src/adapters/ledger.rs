//! FreelanceShield on-chain reputation adapter
//!
//! Reads the subject's reputation profile account from the protocol ledger.
//! Dimension scores are stored on a 0-100 scale; the account's transaction
//! count is the evidence mass behind them.

use async_trait::async_trait;
use serde::Deserialize;
use shield_common::{
    AdapterError, Provenance, ReputationDimension, ReputationRecord, ReputationSource, SubjectKey,
    MAX_RECORD_WEIGHT,
};
use std::sync::Arc;
use tracing::instrument;

use super::{decode_payload, scaled_record, AttestationTransport, SourceAdapter};

/// On-chain reputation profile account as returned by the ledger query
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerReputationAccount {
    pub completed_work_score: u64,
    pub dispute_resolution_score: u64,
    pub payment_history_score: u64,
    pub claim_history_score: u64,
    pub community_participation_score: u64,
    /// Number of protocol transactions behind the scores
    pub transaction_count: u64,
    /// Unix seconds of the last on-chain update
    pub last_updated: i64,
    /// Signature of the last updating transaction
    #[serde(default)]
    pub last_signature: Option<String>,
}

impl LedgerReputationAccount {
    fn scores(&self) -> [(ReputationDimension, u64); 5] {
        [
            (ReputationDimension::CompletedWork, self.completed_work_score),
            (ReputationDimension::DisputeResolution, self.dispute_resolution_score),
            (ReputationDimension::PaymentHistory, self.payment_history_score),
            (ReputationDimension::ClaimHistory, self.claim_history_score),
            (
                ReputationDimension::CommunityParticipation,
                self.community_participation_score,
            ),
        ]
    }
}

/// Adapter for the protocol's own reputation ledger
pub struct LedgerAdapter {
    transport: Arc<dyn AttestationTransport>,
}

impl LedgerAdapter {
    pub fn new(transport: Arc<dyn AttestationTransport>) -> Self {
        Self { transport }
    }

    /// Normalize an account into one record per dimension
    pub fn normalize(account: &LedgerReputationAccount, now_ms: i64) -> Vec<ReputationRecord> {
        if account.transaction_count == 0 {
            return Vec::new();
        }

        let timestamp = if account.last_updated > 0 {
            account.last_updated.saturating_mul(1000)
        } else {
            now_ms
        };
        // Saturate rather than drop a very active account
        let weight = (account.transaction_count as f64).min(MAX_RECORD_WEIGHT);

        account
            .scores()
            .into_iter()
            .filter_map(|(dimension, score)| {
                scaled_record(
                    ReputationSource::FreelanceShield,
                    dimension,
                    score as f64 / 100.0,
                    weight,
                    timestamp,
                    account.last_signature.clone().map(Provenance::TransactionId),
                )
            })
            .collect()
    }
}

#[async_trait]
impl SourceAdapter for LedgerAdapter {
    fn source(&self) -> ReputationSource {
        ReputationSource::FreelanceShield
    }

    #[instrument(skip(self, subject), fields(subject = %subject.address))]
    async fn try_fetch(&self, subject: &SubjectKey) -> Result<Vec<ReputationRecord>, AdapterError> {
        let payload = self
            .transport
            .query(self.source(), subject.address.as_str())
            .await?;

        let Some(account) = decode_payload::<LedgerReputationAccount>(self.source(), payload)? else {
            return Ok(Vec::new());
        };

        Ok(Self::normalize(&account, chrono::Utc::now().timestamp_millis()))
    }
}
