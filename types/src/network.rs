//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::VigilError;

/// Identifies which chain a transaction is signed for.
///
/// The id is part of the signed pre-image, so a transaction built for one
/// network is rejected by the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    /// The production network.
    #[default]
    Mainnet,
    /// The public test network.
    Testnet,
}

impl ChainId {
    /// Wire value of this chain id.
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Mainnet => 0x01,
            Self::Testnet => 0x02,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl FromStr for ChainId {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "1" => Ok(Self::Mainnet),
            "testnet" | "test" | "2" => Ok(Self::Testnet),
            other => Err(VigilError::UnknownChain(other.to_string())),
        }
    }
}
