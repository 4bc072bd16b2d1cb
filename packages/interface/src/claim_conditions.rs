use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal, Timestamp, Uint128};

// Types in this module are shared by the claim conditions contract and the off-chain editor, so that
// the editor can build the exact batch the contract accepts and read back what the contract stores.

/// Form and display value that stands for "no limit".
pub const UNLIMITED: &str = "unlimited";

/// Prefix of every field path that addresses a value inside the phase list.
pub const PHASES_PATH_PREFIX: &str = "phases.";

#[cw_serde]
#[derive(Copy, Eq)]
pub enum ClaimLimit {
    Unlimited,
    Amount(Uint128),
}

impl ClaimLimit {
    pub fn is_unlimited(&self) -> bool {
        matches!(self, ClaimLimit::Unlimited)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, ClaimLimit::Amount(amount) if amount.is_zero())
    }

    /// Returns true if this limit never allows more than `other` does.
    pub fn fits_within(&self, other: &ClaimLimit) -> bool {
        match (self, other) {
            (_, ClaimLimit::Unlimited) => true,
            (ClaimLimit::Unlimited, ClaimLimit::Amount(_)) => false,
            (ClaimLimit::Amount(own), ClaimLimit::Amount(other)) => own <= other,
        }
    }
}

impl fmt::Display for ClaimLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimLimit::Unlimited => f.write_str(UNLIMITED),
            ClaimLimit::Amount(amount) => write!(f, "{}", amount),
        }
    }
}

#[cw_serde]
pub struct SnapshotEntry {
    pub address: String,
    pub max_claimable: ClaimLimit,
    // None means the phase price applies to this address.
    pub price: Option<Decimal>,
    // None means the phase currency applies to this address.
    pub currency: Option<String>,
}

#[cw_serde]
pub struct PhaseMetadata {
    pub name: String,
}

#[cw_serde]
pub struct ClaimPhase {
    pub start_time: Timestamp,
    pub max_claimable_supply: ClaimLimit,
    // Zero means only the snapshot limits apply.
    pub max_claimable_per_wallet: ClaimLimit,
    pub price: Decimal,
    pub currency: String,
    // None means the phase is open to any wallet. Some(vec![]) is an allowlist without entries.
    pub snapshot: Option<Vec<SnapshotEntry>>,
    pub metadata: PhaseMetadata,
    // Only used by legacy (V1) drop contracts.
    pub wait_in_seconds: Option<u64>,
}

#[cw_serde]
pub struct SetClaimConditionsMsg {
    // None addresses the contract-wide phase list, Some(id) the list of a single token.
    pub token_id: Option<u64>,
    pub phases: Vec<ClaimPhase>,
    // Whether claim eligibility should restart instead of carrying over from the current phases.
    pub reset: bool,
}

#[cw_serde]
pub struct CurrencyMetadata {
    pub denom: String,
    pub symbol: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct ClaimPhaseInfo {
    pub condition_id: u64,
    pub phase: ClaimPhase,
    // Set even when the snapshot itself was left out of the response.
    pub has_allowlist: bool,
    pub currency_metadata: Option<CurrencyMetadata>,
}

#[cw_serde]
pub struct ClaimPhasesResponse {
    pub epoch: u64,
    pub phases: Vec<ClaimPhaseInfo>,
}

pub fn field_path(phase_index: usize, field: &str) -> String {
    format!("{}{}.{}", PHASES_PATH_PREFIX, phase_index, field)
}

pub fn snapshot_field_path(phase_index: usize, entry_index: usize, field: &str) -> String {
    field_path(phase_index, &format!("snapshot.{}.{}", entry_index, field))
}

/// Validation failure that points at a single value inside the submitted phase list.
#[cw_serde]
pub struct PhaseFieldError {
    pub index: usize,
    // Path relative to the phase, e.g. "start_time" or "snapshot.2.address".
    pub field: String,
    pub reason: String,
}

impl PhaseFieldError {
    pub fn new(index: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> String {
        field_path(self.index, &self.field)
    }

    /// Looks for a rendered `phases.<index>.<field>: <reason>` error inside an arbitrary message,
    /// as returned by a node after the contract rejected a batch.
    pub fn find_in(message: &str) -> Option<Self> {
        message
            .match_indices(PHASES_PATH_PREFIX)
            .find_map(|(start, _)| Self::parse_at(&message[start + PHASES_PATH_PREFIX.len()..]))
    }

    fn parse_at(rest: &str) -> Option<Self> {
        let (index, rest) = rest.split_once('.')?;
        let index = index.parse().ok()?;

        let (field, reason) = rest.split_once(": ")?;
        if field.is_empty() || field.contains(char::is_whitespace) {
            return None;
        }

        Some(Self::new(index, field, reason.trim_end()))
    }
}

impl fmt::Display for PhaseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.reason)
    }
}
