//! SubjectKey - validated identity of the party being scored
//!
//! The primary identity is a Solana address (the chain the protocol and the
//! Braintrust attestations live on). An Ethereum address may be linked for
//! providers that attest on Ethereum (Colony).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RequestError;

/// Solana account address (base58, 32 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SolanaAddress {
    encoded: String,
    bytes: [u8; 32],
}

impl SolanaAddress {
    /// Raw 32-byte public key
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl FromStr for SolanaAddress {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decoded = bs58::decode(trimmed)
            .into_vec()
            .map_err(|e| RequestError::InvalidSubject(format!("{trimmed}: {e}")))?;

        let bytes: [u8; 32] = decoded.try_into().map_err(|v: Vec<u8>| {
            RequestError::InvalidSubject(format!(
                "{trimmed}: expected 32 bytes, got {}",
                v.len()
            ))
        })?;

        Ok(Self {
            encoded: trimmed.to_string(),
            bytes,
        })
    }
}

impl TryFrom<String> for SolanaAddress {
    type Error = RequestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SolanaAddress> for String {
    fn from(addr: SolanaAddress) -> Self {
        addr.encoded
    }
}

impl std::fmt::Display for SolanaAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// Ethereum account address (0x + 20 bytes hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EthereumAddress {
    bytes: [u8; 20],
}

impl EthereumAddress {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }
}

impl FromStr for EthereumAddress {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| RequestError::InvalidSubject(format!("{trimmed}: missing 0x prefix")))?;

        if digits.len() != 40 {
            return Err(RequestError::InvalidSubject(format!(
                "{trimmed}: expected 40 hex digits, got {}",
                digits.len()
            )));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| RequestError::InvalidSubject(format!("{trimmed}: {e}")))?;

        Ok(Self { bytes })
    }
}

impl TryFrom<String> for EthereumAddress {
    type Error = RequestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EthereumAddress> for String {
    fn from(addr: EthereumAddress) -> Self {
        addr.to_string()
    }
}

impl std::fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.bytes))
    }
}

/// Subject whose reputation is being scored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
    /// Primary Solana address
    pub address: SolanaAddress,

    /// Linked Ethereum address, required for Ethereum-native providers
    pub ethereum: Option<EthereumAddress>,
}

impl SubjectKey {
    /// Parse and validate a subject from its Solana address
    ///
    /// # Example
    /// ```
    /// use shield_common::SubjectKey;
    ///
    /// let subject = SubjectKey::parse("11111111111111111111111111111111").unwrap();
    /// assert!(subject.ethereum.is_none());
    /// ```
    pub fn parse(address: &str) -> Result<Self, RequestError> {
        Ok(Self {
            address: address.parse()?,
            ethereum: None,
        })
    }

    /// Link an Ethereum address to this subject
    pub fn with_ethereum(mut self, address: &str) -> Result<Self, RequestError> {
        self.ethereum = Some(address.parse()?);
        Ok(self)
    }
}

impl std::fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.ethereum {
            Some(eth) => write!(f, "{} ({})", self.address, eth),
            None => write!(f, "{}", self.address),
        }
    }
}
