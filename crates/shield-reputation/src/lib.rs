//! # Shield Reputation
//!
//! Multi-source reputation scoring for the FreelanceShield protocol.
//!
//! ## Scoring Formula
//!
//! ```text
//! score_d = (α + Σ value·weight) / (α + β + Σ weight)
//! overall = Σ w_d · score_d
//! ```
//!
//! Where:
//! - α, β: Beta prior pseudo-counts (default 5, 2)
//! - w_d: dimension weight (completed work 40%, disputes 20%, payments 15%,
//!   claims 15%, community 10%)
//!
//! Providers are reached through an [`AttestationTransport`]. Lookups never
//! fail: a provider that is down, slow, or returns garbage contributes no
//! evidence and the affected dimensions fall back to their priors.

pub mod adapters;
pub mod aggregator;
pub mod config;

pub use adapters::{
    AdapterRegistry, AttestationTransport, BraintrustAdapter, ColonyAdapter, LedgerAdapter,
    SourceAdapter,
};
pub use aggregator::ReputationAggregator;
pub use config::ReputationConfig;
