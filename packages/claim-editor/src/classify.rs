use cosmwasm_schema::cw_serde;
use interface::claim_conditions::ClaimPhase;

use crate::phase::{is_zero_quantity, PhaseDraft};

/// What a phase means for claimers, derived from its allowlist and per-wallet cap.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ClaimConditionType {
    Public,
    Specific,
    Overrides,
    Creator,
    Custom,
}

/// Allowlist mode selected for a phase.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum DropType {
    Any,
    Specific,
    Overrides,
}

/// The two inputs classification depends on.
pub trait PhaseShape {
    /// None when the phase has no allowlist.
    fn snapshot_len(&self) -> Option<usize>;

    /// True when the allowlist holds exactly one entry and that entry has no limit.
    fn has_sole_unlimited_entry(&self) -> bool;

    fn per_wallet_is_zero(&self) -> bool;
}

impl ClaimConditionType {
    pub fn of<P: PhaseShape + ?Sized>(phase: &P) -> Self {
        let Some(snapshot_len) = phase.snapshot_len() else {
            return ClaimConditionType::Public;
        };

        // A single unlimited entry wins over whatever the cap says.
        if phase.has_sole_unlimited_entry() {
            return ClaimConditionType::Creator;
        }

        if phase.per_wallet_is_zero() {
            return ClaimConditionType::Specific;
        }

        if snapshot_len > 0 {
            return ClaimConditionType::Overrides;
        }

        ClaimConditionType::Custom
    }
}

impl DropType {
    pub fn of<P: PhaseShape + ?Sized>(phase: &P) -> Self {
        match phase.snapshot_len() {
            None => DropType::Any,
            Some(_) if phase.per_wallet_is_zero() => DropType::Specific,
            Some(_) => DropType::Overrides,
        }
    }
}

impl PhaseShape for PhaseDraft {
    fn snapshot_len(&self) -> Option<usize> {
        self.snapshot.as_ref().map(Vec::len)
    }

    fn has_sole_unlimited_entry(&self) -> bool {
        matches!(self.snapshot.as_deref(), Some([entry]) if entry.is_unlimited())
    }

    fn per_wallet_is_zero(&self) -> bool {
        is_zero_quantity(&self.max_claimable_per_wallet)
    }
}

impl PhaseShape for ClaimPhase {
    fn snapshot_len(&self) -> Option<usize> {
        self.snapshot.as_ref().map(Vec::len)
    }

    fn has_sole_unlimited_entry(&self) -> bool {
        matches!(self.snapshot.as_deref(), Some([entry]) if entry.max_claimable.is_unlimited())
    }

    fn per_wallet_is_zero(&self) -> bool {
        self.max_claimable_per_wallet.is_zero()
    }
}
