//! Colony reputation adapter (Ethereum)
//!
//! Colony reputation is earned per skill. The adapter folds skill reputation
//! into completed-work evidence and governance votes into community
//! participation. Subjects without a linked Ethereum address are skipped.

use async_trait::async_trait;
use serde::Deserialize;
use shield_common::{
    AdapterError, EthereumAddress, Provenance, ReputationDimension, ReputationRecord,
    ReputationSource, SubjectKey,
};
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{decode_payload, ratio_record, AttestationTransport, SourceAdapter};

/// Reputation earned in one Colony skill
#[derive(Debug, Clone, Deserialize)]
pub struct ColonySkill {
    pub skill_id: u64,
    /// Reputation earned by the subject
    pub earned: f64,
    /// Reputation available in the tasks the subject took on
    pub total: f64,
    /// Number of tasks behind the figures
    pub evidence_count: u32,
}

/// Governance participation within the subject's colonies
#[derive(Debug, Clone, Deserialize)]
pub struct ColonyGovernance {
    pub votes_cast: u32,
    pub votes_eligible: u32,
}

/// Colony reputation oracle response
#[derive(Debug, Clone, Deserialize)]
pub struct ColonyReputation {
    #[serde(default)]
    pub skills: Vec<ColonySkill>,
    #[serde(default)]
    pub governance: Option<ColonyGovernance>,
}

/// Adapter for Colony skill reputation
pub struct ColonyAdapter {
    transport: Arc<dyn AttestationTransport>,
}

impl ColonyAdapter {
    pub fn new(transport: Arc<dyn AttestationTransport>) -> Self {
        Self { transport }
    }

    fn provenance(address: &EthereumAddress) -> Provenance {
        Provenance::ExternalUri(format!("https://colony.io/reputation/{address}"))
    }

    /// Normalize an oracle response
    pub fn normalize(
        reputation: &ColonyReputation,
        address: &EthereumAddress,
        now_ms: i64,
    ) -> Vec<ReputationRecord> {
        let mut records = Vec::with_capacity(2);

        let (earned, total, evidence) = reputation
            .skills
            .iter()
            .filter(|s| s.total > 0.0)
            .fold((0.0, 0.0, 0u32), |(e, t, n), s| {
                (e + s.earned, t + s.total, n.saturating_add(s.evidence_count))
            });

        if total > 0.0 && evidence > 0 {
            // Ratio comes from reputation amounts, evidence mass from task count
            records.extend(ratio_record(
                ReputationSource::Colony,
                ReputationDimension::CompletedWork,
                earned / total * evidence as f64,
                evidence as f64,
                now_ms,
                Some(Self::provenance(address)),
            ));
        }

        if let Some(gov) = &reputation.governance {
            records.extend(ratio_record(
                ReputationSource::Colony,
                ReputationDimension::CommunityParticipation,
                gov.votes_cast as f64,
                gov.votes_eligible as f64,
                now_ms,
                Some(Self::provenance(address)),
            ));
        }

        records
    }
}

#[async_trait]
impl SourceAdapter for ColonyAdapter {
    fn source(&self) -> ReputationSource {
        ReputationSource::Colony
    }

    #[instrument(skip(self, subject), fields(subject = %subject.address))]
    async fn try_fetch(&self, subject: &SubjectKey) -> Result<Vec<ReputationRecord>, AdapterError> {
        let Some(address) = &subject.ethereum else {
            debug!("No linked Ethereum address, skipping Colony");
            return Ok(Vec::new());
        };

        let payload = self
            .transport
            .query(self.source(), &address.to_string())
            .await?;

        let Some(reputation) = decode_payload::<ColonyReputation>(self.source(), payload)? else {
            return Ok(Vec::new());
        };

        Ok(Self::normalize(
            &reputation,
            address,
            chrono::Utc::now().timestamp_millis(),
        ))
    }
}
