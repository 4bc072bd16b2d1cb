use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::{Item, Map};
use interface::claim_conditions::{ClaimPhase, CurrencyMetadata};

pub const DEFAULT_MAX_PHASES: u32 = 20;
pub const DEFAULT_MAX_SNAPSHOT_ENTRIES: u32 = 5000;

pub const CONFIG: Item<Config> = Item::new("config");

// ADMINS: key(admin_address) -> ()
pub const ADMINS: Map<Addr, ()> = Map::new("admins");

// CURRENCIES: key(denom) -> CurrencyMetadata
pub const CURRENCIES: Map<&str, CurrencyMetadata> = Map::new("currencies");

/// Phase list that applies to the whole contract.
pub const CONTRACT_CONDITIONS: Item<ClaimConditionList> = Item::new("contract_conditions");

/// Phase lists of individual tokens.
///
/// TOKEN_CONDITIONS: key(token_id) -> ClaimConditionList
pub const TOKEN_CONDITIONS: Map<u64, ClaimConditionList> = Map::new("token_conditions");

#[cw_serde]
pub struct Config {
    pub max_phases: u32,
    pub max_snapshot_entries: u32,
}

#[cw_serde]
#[derive(Default)]
pub struct ClaimConditionList {
    // Condition ID of the first phase in the list. Claims are tracked per condition ID,
    // so moving this past the old phases makes every wallet eligible again.
    pub start_condition_id: u64,
    // First condition ID that no list has used yet. Never decreases.
    pub next_condition_id: u64,
    // Incremented each time claim eligibility is reset.
    pub epoch: u64,
    pub phases: Vec<ClaimPhase>,
}

impl ClaimConditionList {
    pub fn condition_id(&self, index: usize) -> u64 {
        self.start_condition_id + index as u64
    }

    /// Builds the list that replaces this one. With `reset`, the new phases get condition IDs
    /// that were never used before; otherwise they take over the IDs of the current phases.
    pub fn replace(&self, phases: Vec<ClaimPhase>, reset: bool) -> ClaimConditionList {
        let (start_condition_id, epoch) = if reset {
            (self.next_condition_id, self.epoch + 1)
        } else {
            (self.start_condition_id, self.epoch)
        };

        let end_condition_id = start_condition_id + phases.len() as u64;

        ClaimConditionList {
            start_condition_id,
            next_condition_id: self.next_condition_id.max(end_condition_id),
            epoch,
            phases,
        }
    }
}

pub fn load_conditions(
    storage: &dyn Storage,
    token_id: Option<u64>,
) -> StdResult<ClaimConditionList> {
    let conditions = match token_id {
        None => CONTRACT_CONDITIONS.may_load(storage)?,
        Some(token_id) => TOKEN_CONDITIONS.may_load(storage, token_id)?,
    };

    Ok(conditions.unwrap_or_default())
}

pub fn save_conditions(
    storage: &mut dyn Storage,
    token_id: Option<u64>,
    conditions: &ClaimConditionList,
) -> StdResult<()> {
    match token_id {
        None => CONTRACT_CONDITIONS.save(storage, conditions),
        Some(token_id) => TOKEN_CONDITIONS.save(storage, token_id, conditions),
    }
}
