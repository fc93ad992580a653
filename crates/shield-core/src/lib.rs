//! # Shield Core
//!
//! Reputation-aware premium quoting for the FreelanceShield protocol.
//!
//! ```text
//! SubjectKey ─► ReputationAggregator ─► pricing score ─► PricingEngine ─► PremiumQuote
//! ```
//!
//! [`ShieldCore`] wires configuration, source adapters, the aggregator and the
//! pricing engine together so a caller can go from a subject address to a
//! fully justified premium in one call.

pub mod config;

pub use config::ShieldConfig;
pub use shield_common::{
    Industry, JobType, PolicyRequest, PremiumQuote, ReputationProfile, Result, ShieldError,
    SubjectKey,
};
pub use shield_pricing::{DiscountMapper, PricingConfig, PricingEngine};
pub use shield_reputation::{
    AdapterRegistry, AttestationTransport, ReputationAggregator, ReputationConfig, SourceAdapter,
};

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reputation profile together with the quote priced from it
#[derive(Debug, Clone, Serialize)]
pub struct SubjectQuote {
    pub profile: ReputationProfile,
    pub quote: PremiumQuote,
}

/// Reputation aggregator plus pricing engine
#[derive(Debug, Clone)]
pub struct ShieldCore {
    aggregator: ReputationAggregator,
    engine: PricingEngine,
}

impl ShieldCore {
    /// Build with the standard adapter set over `transport`
    pub fn new(config: ShieldConfig, transport: Arc<dyn AttestationTransport>) -> Result<Self> {
        let registry = AdapterRegistry::standard(transport, config.reputation.adapter_timeout());
        Self::with_registry(config, registry)
    }

    /// Build with a caller-assembled adapter registry
    pub fn with_registry(config: ShieldConfig, registry: AdapterRegistry) -> Result<Self> {
        let aggregator = ReputationAggregator::new(config.reputation, registry)?;
        let engine = PricingEngine::new(config.pricing)?;

        info!(version = shield_common::VERSION, "FreelanceShield core initialized");
        Ok(Self { aggregator, engine })
    }

    pub fn aggregator(&self) -> &ReputationAggregator {
        &self.aggregator
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Reputation profile for a subject
    pub async fn profile(&self, subject: &SubjectKey) -> ReputationProfile {
        self.aggregator.profile(subject).await
    }

    /// Price a request with an explicit reputation score
    pub fn quote(&self, request: &PolicyRequest) -> Result<PremiumQuote> {
        self.engine.quote(request)
    }

    /// Score the subject, then price `request` with the resulting reputation
    ///
    /// Any `reputation_score` already set on `request` is replaced with
    /// [`pricing_score`](Self::pricing_score).
    #[instrument(skip(self, subject, request), fields(subject = %subject))]
    pub async fn quote_for_subject(
        &self,
        subject: &SubjectKey,
        request: PolicyRequest,
    ) -> Result<SubjectQuote> {
        let profile = self.aggregator.profile(subject).await;
        let request = request.with_reputation(self.pricing_score(&profile));
        let quote = self.engine.quote(&request)?;

        info!(
            reputation = request.reputation_score,
            premium = %quote.premium,
            risk_score = quote.risk_score(),
            "Quoted subject"
        );
        Ok(SubjectQuote { profile, quote })
    }

    /// Score handed to the pricing engine for `profile`
    ///
    /// A profile without evidence is capped at the discount threshold so the
    /// prior alone never earns a discount.
    pub fn pricing_score(&self, profile: &ReputationProfile) -> f64 {
        let score = profile.pricing_score();
        if profile.has_evidence() {
            score
        } else {
            score.min(self.engine.discount_mapper().threshold())
        }
    }

    /// [`quote_for_subject`](Self::quote_for_subject) from a raw Solana address
    pub async fn quote_for_address(
        &self,
        address: &str,
        request: PolicyRequest,
    ) -> Result<SubjectQuote> {
        let subject = SubjectKey::parse(address)?;
        self.quote_for_subject(&subject, request).await
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
