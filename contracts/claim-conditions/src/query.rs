use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;
use interface::claim_conditions::{ClaimPhaseInfo, ClaimPhasesResponse, CurrencyMetadata};

use crate::state::Config;

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(AdminsResponse)]
    Admins {},
    #[returns(CurrencyResponse)]
    Currency { denom: String },
    #[returns(ClaimPhasesResponse)]
    ClaimPhases {
        token_id: Option<u64>,
        include_allowlist: bool,
    },
    #[returns(ActivePhaseResponse)]
    ActivePhase { token_id: Option<u64> },
}

#[cw_serde]
pub struct ConfigResponse {
    pub config: Config,
}

#[cw_serde]
pub struct AdminsResponse {
    pub admins: Vec<Addr>,
}

#[cw_serde]
pub struct CurrencyResponse {
    pub currency: Option<CurrencyMetadata>,
}

#[cw_serde]
pub struct ActivePhaseResponse {
    pub phase: Option<ClaimPhaseInfo>,
}
