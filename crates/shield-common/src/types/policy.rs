//! Policy pricing types - Premium = BaseRate × Π factors
//!
//! The premium is the product of six independent multipliers:
//! - base rate (protocol constant)
//! - coverage factor (log-shaped in coverage amount)
//! - period factor (super-linear in duration)
//! - risk weight (job type × industry × claims history)
//! - reputation multiplier (0.70 - 1.00)
//! - market adjustment (volatility)
//!
//! Every factor is carried in [`PremiumFactors`] so a caller can render the
//! full cost explanation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RequestError;

/// Kind of freelance work being insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    SoftwareDevelopment,
    Design,
    Writing,
    Marketing,
    Consulting,
    Other,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::SoftwareDevelopment,
        JobType::Design,
        JobType::Writing,
        JobType::Marketing,
        JobType::Consulting,
        JobType::Other,
    ];

    /// Default base risk weight for this job type
    pub fn default_risk_weight(&self) -> f64 {
        match self {
            JobType::SoftwareDevelopment => 1.0,
            JobType::Design => 0.9,
            JobType::Writing => 0.9,
            JobType::Marketing => 1.1,
            JobType::Consulting => 1.2,
            JobType::Other => 1.2,
        }
    }

    /// Position in the on-chain risk weight table
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for JobType {
    type Error = RequestError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        JobType::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| RequestError::UnknownJobType(value.to_string()))
    }
}

impl FromStr for JobType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "software_development" | "development" => Ok(JobType::SoftwareDevelopment),
            "design" => Ok(JobType::Design),
            "writing" => Ok(JobType::Writing),
            "marketing" => Ok(JobType::Marketing),
            "consulting" => Ok(JobType::Consulting),
            "other" => Ok(JobType::Other),
            other => Err(RequestError::UnknownJobType(other.to_string())),
        }
    }
}

impl Default for JobType {
    fn default() -> Self {
        JobType::SoftwareDevelopment
    }
}

/// Client industry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Retail,
    Entertainment,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 7] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Retail,
        Industry::Entertainment,
        Industry::Other,
    ];

    /// Default base risk weight for this industry
    pub fn default_risk_weight(&self) -> f64 {
        match self {
            Industry::Technology => 1.0,
            Industry::Healthcare => 1.2,
            Industry::Finance => 1.3,
            Industry::Education => 0.9,
            Industry::Retail => 1.1,
            Industry::Entertainment => 1.1,
            Industry::Other => 1.2,
        }
    }

    /// Position in the on-chain risk weight table
    pub fn index(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Industry {
    type Error = RequestError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Industry::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| RequestError::UnknownIndustry(value.to_string()))
    }
}

impl FromStr for Industry {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technology" => Ok(Industry::Technology),
            "healthcare" => Ok(Industry::Healthcare),
            "finance" => Ok(Industry::Finance),
            "education" => Ok(Industry::Education),
            "retail" => Ok(Industry::Retail),
            "entertainment" => Ok(Industry::Entertainment),
            "other" => Ok(Industry::Other),
            other => Err(RequestError::UnknownIndustry(other.to_string())),
        }
    }
}

impl Default for Industry {
    fn default() -> Self {
        Industry::Technology
    }
}

/// Request for a coverage premium
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRequest {
    /// Coverage amount in the smallest currency unit (lamports)
    pub coverage_amount: u64,

    /// Coverage period in days
    pub period_days: u32,

    /// Kind of work covered
    pub job_type: JobType,

    /// Client industry
    pub industry: Industry,

    /// Reputation score on the 0-100 scale
    pub reputation_score: f64,

    /// Number of prior claims
    pub claims_history_count: u32,

    /// Market volatility indicator (0-20)
    pub market_volatility: f64,
}

impl PolicyRequest {
    /// Create a request with reference categories, no claims, no reputation, calm market
    pub fn new(coverage_amount: u64, period_days: u32) -> Self {
        Self {
            coverage_amount,
            period_days,
            job_type: JobType::default(),
            industry: Industry::default(),
            reputation_score: 0.0,
            claims_history_count: 0,
            market_volatility: 0.0,
        }
    }

    /// Set job type
    pub fn with_job_type(mut self, job_type: JobType) -> Self {
        self.job_type = job_type;
        self
    }

    /// Set industry
    pub fn with_industry(mut self, industry: Industry) -> Self {
        self.industry = industry;
        self
    }

    /// Set reputation score (0-100)
    pub fn with_reputation(mut self, score: f64) -> Self {
        self.reputation_score = score;
        self
    }

    /// Set claims history count
    pub fn with_claims(mut self, count: u32) -> Self {
        self.claims_history_count = count;
        self
    }

    /// Set market volatility (0-20)
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.market_volatility = volatility;
        self
    }

    /// BLAKE3 digest of the request fields, hex encoded
    ///
    /// Lets an auditor confirm that a stored quote was computed from a given request.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.coverage_amount.to_le_bytes());
        hasher.update(&self.period_days.to_le_bytes());
        hasher.update(&[self.job_type.index(), self.industry.index()]);
        hasher.update(&self.reputation_score.to_bits().to_le_bytes());
        hasher.update(&self.claims_history_count.to_le_bytes());
        hasher.update(&self.market_volatility.to_bits().to_le_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

/// The six premium multipliers plus the advisory risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumFactors {
    /// Protocol base rate (smallest currency unit)
    pub base_rate: Decimal,
    /// Coverage amount factor (1.0 at reference coverage)
    pub coverage_factor: f64,
    /// Coverage period factor (1.0 at reference period)
    pub period_factor: f64,
    /// Job × industry × claims risk weight
    pub risk_weight: f64,
    /// Reputation discount multiplier (0.70 - 1.00)
    pub reputation_multiplier: f64,
    /// Market volatility adjustment (1.0 at zero volatility)
    pub market_adjustment: f64,
    /// Advisory risk score (0-100)
    pub risk_score: u8,
}

impl PremiumFactors {
    /// Product of the five dimensionless multipliers
    pub fn multiplier(&self) -> f64 {
        self.coverage_factor
            * self.period_factor
            * self.risk_weight
            * self.reputation_multiplier
            * self.market_adjustment
    }
}

/// Components of the risk weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWeightBreakdown {
    /// Base job type weight
    pub job_weight: f64,
    /// Base industry weight
    pub industry_weight: f64,
    /// Claims history adjustment (1.0 at zero claims)
    pub claims_adjustment: f64,
}

/// Fully justified premium quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumQuote {
    /// Final premium (smallest currency unit)
    pub premium: Decimal,

    /// Protocol minimum premium
    pub minimum_premium: Decimal,

    /// Whether the minimum premium replaced the computed product
    pub floor_applied: bool,

    /// Every factor that went into the premium
    pub factors: PremiumFactors,

    /// How the risk weight was built
    pub risk_breakdown: RiskWeightBreakdown,

    /// Reputation discount (0.0 - 0.30)
    pub discount_percentage: f64,

    /// BLAKE3 fingerprint of the priced request
    pub request_fingerprint: String,
}

impl PremiumQuote {
    /// Advisory risk score (0-100)
    pub fn risk_score(&self) -> u8 {
        self.factors.risk_score
    }

    /// Premium as a whole number of lamports
    pub fn premium_lamports(&self) -> Option<u64> {
        self.premium.to_u64()
    }

    /// Premium in SOL
    pub fn premium_sol(&self) -> Decimal {
        self.premium / Decimal::from(crate::LAMPORTS_PER_SOL)
    }
}
