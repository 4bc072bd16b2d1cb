use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Timestamp};
use interface::claim_conditions::{
    ClaimPhase, ClaimPhaseInfo, CurrencyMetadata, SnapshotEntry, UNLIMITED,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Identifies a phase for as long as it stays in the list, independently of its position.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(transparent)]
pub struct PhaseId(u64);

impl PhaseId {
    pub(crate) fn new(id: u64) -> Self {
        PhaseId(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allowlist entry as entered by the user.
#[cw_serde]
pub struct SnapshotEntryDraft {
    pub address: String,
    pub max_claimable: String,
    // None or "unlimited" inherits the phase price.
    pub price: Option<String>,
    // None inherits the phase currency.
    pub currency: Option<String>,
}

impl SnapshotEntryDraft {
    /// Entry for a wallet that may claim without a limit, at the phase price and currency.
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            max_claimable: UNLIMITED.to_string(),
            price: None,
            currency: None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        is_unlimited(&self.max_claimable)
    }

    pub fn from_entry(entry: &SnapshotEntry) -> Self {
        Self {
            address: entry.address.clone(),
            max_claimable: entry.max_claimable.to_string(),
            price: entry.price.map(|price| price.to_string()),
            currency: entry.currency.clone(),
        }
    }
}

/// Allowlist input. Older allowlists are plain lists of addresses.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum SnapshotInput {
    Address(String),
    Entry(SnapshotEntryDraft),
}

impl From<SnapshotInput> for SnapshotEntryDraft {
    fn from(input: SnapshotInput) -> Self {
        match input {
            SnapshotInput::Address(address) => SnapshotEntryDraft::for_address(address),
            SnapshotInput::Entry(entry) => entry,
        }
    }
}

/// Parses an uploaded allowlist: a JSON array of addresses and/or full entries.
pub fn parse_snapshot_json(json: &str) -> StdResult<Vec<SnapshotEntryDraft>> {
    let inputs: Vec<SnapshotInput> = serde_json::from_str(json)
        .map_err(|err| StdError::parse_err("Vec<SnapshotInput>", err))?;

    Ok(inputs.into_iter().map(SnapshotEntryDraft::from).collect())
}

pub(crate) fn is_unlimited(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(UNLIMITED)
}

pub(crate) fn is_zero_quantity(value: &str) -> bool {
    value.trim().parse::<u128>().is_ok_and(|quantity| quantity == 0)
}

/// One row of the phase list, with every user-entered value kept as typed.
#[cw_serde]
pub struct PhaseDraft {
    pub id: PhaseId,
    // unix seconds
    pub start_time: String,
    pub max_claimable_supply: String,
    pub max_claimable_per_wallet: String,
    pub price: String,
    pub currency: String,
    pub snapshot: Option<Vec<SnapshotEntryDraft>>,
    pub name: String,
    pub wait_in_seconds: String,
    // Display only; never submitted.
    pub currency_metadata: Option<CurrencyMetadata>,
    // Whether the phase was loaded from the contract.
    pub from_sdk: bool,
    pub is_editing: bool,
}

impl PhaseDraft {
    /// Builds a locked row from a phase read back from the contract.
    pub fn from_phase(
        id: PhaseId,
        phase: &ClaimPhase,
        currency_metadata: Option<CurrencyMetadata>,
    ) -> Self {
        Self {
            id,
            start_time: phase.start_time.seconds().to_string(),
            max_claimable_supply: phase.max_claimable_supply.to_string(),
            max_claimable_per_wallet: phase.max_claimable_per_wallet.to_string(),
            price: phase.price.to_string(),
            currency: phase.currency.clone(),
            snapshot: phase
                .snapshot
                .as_ref()
                .map(|entries| entries.iter().map(SnapshotEntryDraft::from_entry).collect()),
            name: phase.metadata.name.clone(),
            wait_in_seconds: phase.wait_in_seconds.unwrap_or_default().to_string(),
            currency_metadata,
            from_sdk: true,
            is_editing: false,
        }
    }

    pub fn from_info(id: PhaseId, info: ClaimPhaseInfo) -> Self {
        Self::from_phase(id, &info.phase, info.currency_metadata)
    }

    pub fn field(&self, field: PhaseField) -> &str {
        match field {
            PhaseField::StartTime => &self.start_time,
            PhaseField::MaxClaimableSupply => &self.max_claimable_supply,
            PhaseField::MaxClaimablePerWallet => &self.max_claimable_per_wallet,
            PhaseField::Price => &self.price,
            PhaseField::Currency => &self.currency,
            PhaseField::Name => &self.name,
            PhaseField::WaitInSeconds => &self.wait_in_seconds,
        }
    }

    pub(crate) fn set_field(&mut self, field: PhaseField, value: String) {
        let slot = match field {
            PhaseField::StartTime => &mut self.start_time,
            PhaseField::MaxClaimableSupply => &mut self.max_claimable_supply,
            PhaseField::MaxClaimablePerWallet => &mut self.max_claimable_per_wallet,
            PhaseField::Price => &mut self.price,
            PhaseField::Currency => {
                // metadata of the previous currency no longer applies
                self.currency_metadata = None;
                &mut self.currency
            }
            PhaseField::Name => &mut self.name,
            PhaseField::WaitInSeconds => &mut self.wait_in_seconds,
        };
        *slot = value;
    }

    /// Price with the currency symbol when it is known, e.g. "1.5 NTRN".
    pub fn price_display(&self) -> String {
        let currency = self
            .currency_metadata
            .as_ref()
            .map_or(self.currency.as_str(), |metadata| metadata.symbol.as_str());

        format!("{} {}", self.price.trim(), currency)
    }
}

/// Scalar fields of a phase that can be edited one at a time.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum PhaseField {
    StartTime,
    MaxClaimableSupply,
    MaxClaimablePerWallet,
    Price,
    Currency,
    Name,
    WaitInSeconds,
}

impl PhaseField {
    /// Path of the field relative to its phase, matching the submitted phase layout.
    pub fn path_segment(&self) -> &'static str {
        match self {
            PhaseField::StartTime => "start_time",
            PhaseField::MaxClaimableSupply => "max_claimable_supply",
            PhaseField::MaxClaimablePerWallet => "max_claimable_per_wallet",
            PhaseField::Price => "price",
            PhaseField::Currency => "currency",
            PhaseField::Name => "metadata.name",
            PhaseField::WaitInSeconds => "wait_in_seconds",
        }
    }
}

/// Preset a new phase is created from.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum PhaseTemplate {
    // Any wallet can claim.
    Public,
    // Only allowlisted wallets can claim, up to their own limits.
    Specific,
    // Any wallet can claim; allowlisted wallets get their own limits and prices.
    Overrides,
    // Only the owner can claim, without limits.
    Creator,
    Custom,
}

impl PhaseTemplate {
    pub const ALL: [PhaseTemplate; 5] = [
        PhaseTemplate::Public,
        PhaseTemplate::Specific,
        PhaseTemplate::Overrides,
        PhaseTemplate::Creator,
        PhaseTemplate::Custom,
    ];

    pub(crate) fn build(
        self,
        id: PhaseId,
        defaults: &PhaseDefaults,
    ) -> Result<PhaseDraft, EditorError> {
        let mut phase = PhaseDraft {
            id,
            start_time: defaults.start_time.seconds().to_string(),
            max_claimable_supply: UNLIMITED.to_string(),
            max_claimable_per_wallet: UNLIMITED.to_string(),
            price: "0".to_string(),
            currency: defaults.currency.clone(),
            snapshot: None,
            name: defaults.name.clone(),
            wait_in_seconds: "0".to_string(),
            currency_metadata: None,
            from_sdk: false,
            is_editing: true,
        };

        match self {
            PhaseTemplate::Public => {}
            PhaseTemplate::Specific => {
                phase.max_claimable_per_wallet = "0".to_string();
                phase.snapshot = Some(vec![]);
            }
            PhaseTemplate::Overrides => {
                phase.max_claimable_per_wallet = "1".to_string();
                phase.snapshot = Some(vec![]);
            }
            PhaseTemplate::Creator => {
                let owner = defaults.owner.clone().ok_or(EditorError::MissingOwner)?;
                phase.max_claimable_per_wallet = "0".to_string();
                phase.snapshot = Some(vec![SnapshotEntryDraft {
                    price: Some("0".to_string()),
                    ..SnapshotEntryDraft::for_address(owner)
                }]);
            }
            PhaseTemplate::Custom => {
                phase.snapshot = Some(vec![]);
            }
        }

        Ok(phase)
    }
}

pub(crate) struct PhaseDefaults {
    pub start_time: Timestamp,
    pub currency: String,
    pub owner: Option<String>,
    pub name: String,
}
