use cosmwasm_schema::cw_serde;

/// Generation of the drop contract the phases are written to.
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub enum ContractGeneration {
    // Legacy drops: every phase carries a wait time between claims.
    V1,
    #[default]
    Current,
}

#[cw_serde]
pub struct EditorConfig {
    // Address of the contract whose claim phases are edited.
    pub contract: String,
    // None edits the contract-wide phase list, Some(id) the list of a single token.
    pub token_id: Option<u64>,
    // Some drops only support one phase. Removing it has to wipe the phases on submission.
    pub single_phase: bool,
    pub generation: ContractGeneration,
    // Connected wallet. Required to build creator-only phases.
    pub owner: Option<String>,
    // Currency used by newly added phases.
    pub default_currency: String,
}

impl EditorConfig {
    pub fn new(contract: impl Into<String>, default_currency: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            token_id: None,
            single_phase: false,
            generation: ContractGeneration::default(),
            owner: None,
            default_currency: default_currency.into(),
        }
    }
}
