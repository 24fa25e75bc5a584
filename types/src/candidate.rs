//! Candidates, their delegated stakes, and participation status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::amount::TokenAmount;
use crate::keys::PublicKey;
use crate::time::Timestamp;

/// Participation status reported by the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateStatus {
    /// Registered but not currently in the validator set (node code `1`).
    Candidate,
    /// Actively validating (node code `2`).
    Validator,
}

impl CandidateStatus {
    /// Map the node's numeric status. Only `2` means validator.
    pub fn from_code(code: i64) -> Self {
        if code == 2 {
            Self::Validator
        } else {
            Self::Candidate
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Candidate => 1,
            Self::Validator => 2,
        }
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Candidate => f.write_str("candidate"),
            Self::Validator => f.write_str("validator"),
        }
    }
}

/// Where a key stands relative to the live snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusOf {
    Validator,
    Candidate,
    /// Not present in the snapshot at all.
    Absent,
}

impl From<Option<CandidateStatus>> for StatusOf {
    fn from(status: Option<CandidateStatus>) -> Self {
        match status {
            Some(CandidateStatus::Validator) => Self::Validator,
            Some(CandidateStatus::Candidate) => Self::Candidate,
            None => Self::Absent,
        }
    }
}

/// One delegator's stake in a candidate.
///
/// Owner and coin are kept exactly as the node reports them; only the
/// amounts are interpreted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stake {
    pub owner: String,
    pub coin: String,
    /// Amount in the staked coin.
    pub value: TokenAmount,
    /// The same stake valued in the base coin.
    pub bip_value: TokenAmount,
    pub value_display: f64,
    pub bip_value_display: f64,
}

/// A registered network operator as of one poll.
///
/// Equality compares what the node reported and ignores `refreshed_at`, so
/// two polls of unchanged data yield equal candidates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub pub_key: PublicKey,
    pub candidate_address: Address,
    pub total_stake: TokenAmount,
    pub total_stake_display: f64,
    /// Commission in whole percent.
    pub commission: u32,
    pub created_at_block: u64,
    pub status: CandidateStatus,
    /// Delegator stakes in node order.
    pub stakes: Vec<Stake>,
    pub accumulated_reward: TokenAmount,
    pub accumulated_reward_display: f64,
    /// Missed blocks counted by the node.
    pub absent_times: u64,
    /// When the poll that produced this record completed.
    pub refreshed_at: Timestamp,
}

impl Candidate {
    pub fn is_validator(&self) -> bool {
        self.status == CandidateStatus::Validator
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.pub_key == other.pub_key
            && self.candidate_address == other.candidate_address
            && self.total_stake == other.total_stake
            && self.total_stake_display == other.total_stake_display
            && self.commission == other.commission
            && self.created_at_block == other.created_at_block
            && self.status == other.status
            && self.stakes == other.stakes
            && self.accumulated_reward == other.accumulated_reward
            && self.accumulated_reward_display == other.accumulated_reward_display
            && self.absent_times == other.absent_times
    }
}
