use cosmwasm_schema::cw_serde;
use interface::claim_conditions::{CurrencyMetadata, SetClaimConditionsMsg};

#[cw_serde]
pub struct InstantiateMsg {
    pub admins: Vec<String>,
    // Upper bound on the number of phases in a single list. Defaults to DEFAULT_MAX_PHASES.
    pub max_phases: Option<u32>,
    // Upper bound on the number of allowlist entries in a single phase. Defaults to DEFAULT_MAX_SNAPSHOT_ENTRIES.
    pub max_snapshot_entries: Option<u32>,
    // Display metadata for the currencies that phases are expected to be priced in.
    pub currencies: Vec<CurrencyMetadata>,
}

#[cw_serde]
pub enum ExecuteMsg {
    SetClaimConditions(SetClaimConditionsMsg),
    RegisterCurrency { metadata: CurrencyMetadata },
    AddAdmin { admin: String },
    RemoveAdmin { admin: String },
}
