//! End-to-end tests for the FreelanceShield core
//!
//! Drives subject → reputation profile → premium quote through the public
//! facade with an in-memory attestation transport.

use async_trait::async_trait;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use shield_common::{AdapterError, ReputationDimension, ReputationSource, LAMPORTS_PER_SOL};
use shield_core::{
    AdapterRegistry, AttestationTransport, Industry, JobType, PolicyRequest, ShieldConfig,
    ShieldCore, ShieldError, SubjectKey,
};
use shield_reputation::BraintrustAdapter;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const ADDRESS: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const ETH_ADDRESS: &str = "0x52908400098527886e0f7030069857d2e4169ee7";

/// In-memory provider network
#[derive(Default)]
struct FakeNetwork {
    payloads: HashMap<(ReputationSource, String), Value>,
    down: Vec<ReputationSource>,
    latency: Option<(ReputationSource, Duration)>,
}

impl FakeNetwork {
    fn serve(mut self, source: ReputationSource, key: &str, payload: Value) -> Self {
        self.payloads.insert((source, key.to_string()), payload);
        self
    }

    fn down(mut self, source: ReputationSource) -> Self {
        self.down.push(source);
        self
    }

    fn slow(mut self, source: ReputationSource, latency: Duration) -> Self {
        self.latency = Some((source, latency));
        self
    }
}

#[async_trait]
impl AttestationTransport for FakeNetwork {
    async fn query(&self, source: ReputationSource, key: &str) -> Result<Value, AdapterError> {
        if let Some((slow, latency)) = self.latency {
            if slow == source {
                tokio::time::sleep(latency).await;
            }
        }
        if self.down.contains(&source) {
            return Err(AdapterError::unavailable(source, "503 Service Unavailable"));
        }
        Ok(self
            .payloads
            .get(&(source, key.to_string()))
            .cloned()
            .unwrap_or(Value::Null))
    }
}

fn strong_network() -> FakeNetwork {
    FakeNetwork::default()
        .serve(
            ReputationSource::FreelanceShield,
            ADDRESS,
            json!({
                "completed_work_score": 98,
                "dispute_resolution_score": 95,
                "payment_history_score": 100,
                "claim_history_score": 100,
                "community_participation_score": 90,
                "transaction_count": 250,
                "last_updated": 1_700_000_000,
                "last_signature": "5h6xBEauJ3PK6SWCZ1PGjBvj8vDdWG3KpwATGy1ARAXFSDwt8GFXM7W5Ncn16wmqokgpiKRLuS83KUxyZyv2sUYv"
            }),
        )
        .serve(
            ReputationSource::Colony,
            ETH_ADDRESS,
            json!({
                "skills": [{"skill_id": 3, "earned": 950.0, "total": 1000.0, "evidence_count": 40}],
                "governance": {"votes_cast": 18, "votes_eligible": 20}
            }),
        )
        .serve(
            ReputationSource::Braintrust,
            ADDRESS,
            json!({
                "jobs_completed": 60,
                "jobs_started": 61,
                "invoices_paid_on_time": 58,
                "invoices_total": 60
            }),
        )
}

fn core(network: FakeNetwork) -> ShieldCore {
    shield_core::init_tracing();
    ShieldCore::new(ShieldConfig::default(), Arc::new(network)).unwrap()
}

fn request() -> PolicyRequest {
    PolicyRequest::new(5 * LAMPORTS_PER_SOL, 60)
        .with_job_type(JobType::Design)
        .with_industry(Industry::Retail)
}

#[tokio::test]
async fn test_unknown_subject_gets_prior_profile_and_no_discount() {
    let core = core(FakeNetwork::default());
    let subject = SubjectKey::parse(ADDRESS).unwrap();

    let result = core.quote_for_subject(&subject, request()).await.unwrap();

    let prior_mean = 5.0 / 7.0;
    assert!((result.profile.overall_score - prior_mean).abs() < 1e-12);
    assert!(result.profile.source_scores.is_empty());
    assert_eq!(result.quote.factors.reputation_multiplier, 1.0);
    assert_eq!(result.quote.discount_percentage, 0.0);
}

#[tokio::test]
async fn test_strong_reputation_lowers_premium() {
    let subject = SubjectKey::parse(ADDRESS)
        .unwrap()
        .with_ethereum(ETH_ADDRESS)
        .unwrap();

    let unknown = core(FakeNetwork::default())
        .quote_for_subject(&subject, request())
        .await
        .unwrap();
    let strong = core(strong_network())
        .quote_for_subject(&subject, request())
        .await
        .unwrap();

    assert_eq!(strong.profile.source_scores.len(), 3);
    assert!(strong.profile.overall_score > 0.9);
    assert!(strong.quote.discount_percentage > 0.2);
    assert!(strong.quote.premium < unknown.quote.premium);
    assert!(strong.quote.risk_score() < unknown.quote.risk_score());

    let completed = strong.profile.dimension_scores[&ReputationDimension::CompletedWork];
    assert!(completed > 0.9 && completed < 1.0);
}

#[tokio::test]
async fn test_unlinked_subject_skips_colony() {
    let subject = SubjectKey::parse(ADDRESS).unwrap();
    let result = core(strong_network())
        .quote_for_subject(&subject, request())
        .await
        .unwrap();

    assert!(!result.profile.source_scores.contains_key(&ReputationSource::Colony));
    assert_eq!(result.profile.records_from(ReputationSource::Colony).count(), 0);
}

#[tokio::test]
async fn test_provider_outage_still_quotes() {
    let network = strong_network().down(ReputationSource::FreelanceShield);
    let subject = SubjectKey::parse(ADDRESS).unwrap();

    let result = core(network).quote_for_subject(&subject, request()).await.unwrap();

    assert_eq!(
        result.profile.source_scores.keys().copied().collect::<Vec<_>>(),
        vec![ReputationSource::Braintrust]
    );
    assert!(result.quote.premium >= result.quote.minimum_premium);
}

#[tokio::test(start_paused = true)]
async fn test_slow_provider_is_cut_off() {
    let network = strong_network().slow(ReputationSource::Braintrust, Duration::from_secs(30));
    let subject = SubjectKey::parse(ADDRESS).unwrap();

    let result = core(network).quote_for_subject(&subject, request()).await.unwrap();

    assert!(result.profile.source_scores.contains_key(&ReputationSource::FreelanceShield));
    assert!(!result.profile.source_scores.contains_key(&ReputationSource::Braintrust));
}

#[tokio::test]
async fn test_custom_registry_limits_sources() {
    let network: Arc<dyn AttestationTransport> = Arc::new(strong_network());
    let registry = AdapterRegistry::new(Duration::from_secs(1))
        .with_adapter(Arc::new(BraintrustAdapter::new(network.clone())))
        .unwrap();
    let core = ShieldCore::with_registry(ShieldConfig::default(), registry).unwrap();
    let subject = SubjectKey::parse(ADDRESS).unwrap();

    let result = core.quote_for_subject(&subject, request()).await.unwrap();
    assert_eq!(
        result.profile.source_scores.keys().copied().collect::<Vec<_>>(),
        vec![ReputationSource::Braintrust]
    );

    let duplicate = AdapterRegistry::new(Duration::from_secs(1))
        .with_adapter(Arc::new(BraintrustAdapter::new(network.clone())))
        .and_then(|r| r.with_adapter(Arc::new(BraintrustAdapter::new(network))));
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_invalid_address_rejected() {
    let core = core(FakeNetwork::default());
    let err = core
        .quote_for_address("not-a-solana-address!", request())
        .await
        .unwrap_err();
    assert!(matches!(err, ShieldError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_invalid_request_rejected_after_scoring() {
    let core = core(strong_network());
    let err = core
        .quote_for_address(ADDRESS, PolicyRequest::new(LAMPORTS_PER_SOL, 500))
        .await
        .unwrap_err();
    assert!(matches!(err, ShieldError::InvalidRequest(_)));
}

#[test]
fn test_reference_quote_through_facade() {
    let core = core(FakeNetwork::default());
    let quote = core
        .quote(&PolicyRequest::new(LAMPORTS_PER_SOL, 30).with_reputation(50.0))
        .unwrap();
    assert_eq!(quote.premium, dec!(100000000));
}

#[test]
fn test_quote_serializes_for_callers() {
    let core = core(FakeNetwork::default());
    let quote = core
        .quote(&PolicyRequest::new(2 * LAMPORTS_PER_SOL, 45).with_reputation(80.0))
        .unwrap();

    let value = serde_json::to_value(&quote).unwrap();
    assert!(value.get("premium").is_some());
    assert!(value["factors"].get("reputation_multiplier").is_some());
    assert_eq!(value["request_fingerprint"].as_str().unwrap().len(), 64);
}

#[test]
fn test_misconfiguration_fails_at_startup() {
    let mut config = ShieldConfig::default();
    config.pricing.max_discount = 0.45;
    let result = ShieldCore::new(config, Arc::new(FakeNetwork::default()));
    assert!(matches!(result, Err(ShieldError::Config(_))));
}
