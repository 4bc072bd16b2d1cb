#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult, Storage,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;
use interface::claim_conditions::{
    ClaimPhaseInfo, ClaimPhasesResponse, CurrencyMetadata, SetClaimConditionsMsg,
};

use crate::error::{new_generic_error, ContractError};
use crate::msg::{ExecuteMsg, InstantiateMsg};
use crate::query::{
    ActivePhaseResponse, AdminsResponse, ConfigResponse, CurrencyResponse, QueryMsg,
};
use crate::state::{
    load_conditions, save_conditions, Config, ADMINS, CONFIG, CURRENCIES, DEFAULT_MAX_PHASES,
    DEFAULT_MAX_SNAPSHOT_ENTRIES,
};
use crate::validation::{validate_denom, validate_phases};

/// Contract name that is used for migration.
pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const MAX_CURRENCY_DECIMALS: u8 = 18;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        max_phases: msg.max_phases.unwrap_or(DEFAULT_MAX_PHASES),
        max_snapshot_entries: msg
            .max_snapshot_entries
            .unwrap_or(DEFAULT_MAX_SNAPSHOT_ENTRIES),
    };

    if config.max_phases == 0 {
        return Err(new_generic_error("max_phases must be greater than zero."));
    }

    CONFIG.save(deps.storage, &config)?;

    let mut admins = vec![];
    for admin in msg.admins {
        let admin_addr = deps.api.addr_validate(&admin)?;
        if !ADMINS.has(deps.storage, admin_addr.clone()) {
            ADMINS.save(deps.storage, admin_addr.clone(), &())?;
            admins.push(admin_addr.to_string());
        }
    }

    if admins.is_empty() {
        return Err(new_generic_error("At least one admin must be specified."));
    }

    let currencies_len = msg.currencies.len();
    for metadata in msg.currencies {
        save_currency(deps.storage, metadata)?;
    }

    Ok(Response::new()
        .add_attribute("action", "initialisation")
        .add_attribute("sender", info.sender)
        .add_attribute("admins", admins.join(","))
        .add_attribute("max_phases", config.max_phases.to_string())
        .add_attribute("currencies", currencies_len.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::SetClaimConditions(set_msg) => {
            execute_set_claim_conditions(deps, info, set_msg)
        }
        ExecuteMsg::RegisterCurrency { metadata } => {
            execute_register_currency(deps, info, metadata)
        }
        ExecuteMsg::AddAdmin { admin } => execute_add_admin(deps, info, admin),
        ExecuteMsg::RemoveAdmin { admin } => execute_remove_admin(deps, info, admin),
    }
}

/// Replaces the phase list of the contract (or of a single token) with the submitted one.
/// The whole list is written at once; there is no way to update a single phase.
///
/// # Errors
/// Returns `Unauthorized` if sender is not an admin.
/// Returns `PaymentError` if any funds were sent.
/// Returns `TooManyPhases` or `InvalidPhaseField` if the list doesn't pass validation.
fn execute_set_claim_conditions(
    deps: DepsMut,
    info: MessageInfo,
    msg: SetClaimConditionsMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    validate_sender_is_admin(&deps, &info)?;

    let config = CONFIG.load(deps.storage)?;
    validate_phases(deps.api, &config, &msg.phases)?;

    let phases_len = msg.phases.len();
    let current = load_conditions(deps.storage, msg.token_id)?;
    let updated = current.replace(msg.phases, msg.reset);

    save_conditions(deps.storage, msg.token_id, &updated)?;

    Ok(Response::new()
        .add_attribute("action", "set_claim_conditions")
        .add_attribute("sender", info.sender)
        .add_attribute("token_id", token_id_attribute(msg.token_id))
        .add_attribute("phases", phases_len.to_string())
        .add_attribute("reset", msg.reset.to_string())
        .add_attribute(
            "start_condition_id",
            updated.start_condition_id.to_string(),
        )
        .add_attribute("epoch", updated.epoch.to_string()))
}

fn execute_register_currency(
    deps: DepsMut,
    info: MessageInfo,
    metadata: CurrencyMetadata,
) -> Result<Response, ContractError> {
    validate_sender_is_admin(&deps, &info)?;

    let denom = metadata.denom.clone();
    let symbol = metadata.symbol.clone();
    save_currency(deps.storage, metadata)?;

    Ok(Response::new()
        .add_attribute("action", "register_currency")
        .add_attribute("sender", info.sender)
        .add_attribute("denom", denom)
        .add_attribute("symbol", symbol))
}

fn execute_add_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    validate_sender_is_admin(&deps, &info)?;
    let admin_address = deps.api.addr_validate(&admin)?;

    if ADMINS.has(deps.storage, admin_address.clone()) {
        return Err(new_generic_error("Address is already an admin"));
    }

    ADMINS.save(deps.storage, admin_address.clone(), &())?;

    Ok(Response::new()
        .add_attribute("action", "add_admin")
        .add_attribute("sender", info.sender)
        .add_attribute("added_admin", admin_address))
}

fn execute_remove_admin(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    validate_sender_is_admin(&deps, &info)?;
    let admin_address = deps.api.addr_validate(&admin)?;

    if !ADMINS.has(deps.storage, admin_address.clone()) {
        return Err(new_generic_error("Address is not an admin"));
    }

    // if there is only one admin left, we cannot remove it
    let admins_count = ADMINS
        .keys(deps.storage, None, None, Order::Ascending)
        .count();
    if admins_count == 1 {
        return Err(new_generic_error("Cannot remove the last admin"));
    }

    ADMINS.remove(deps.storage, admin_address.clone());

    Ok(Response::new()
        .add_attribute("action", "remove_admin")
        .add_attribute("sender", info.sender)
        .add_attribute("removed_admin", admin_address))
}

fn save_currency(
    storage: &mut dyn Storage,
    metadata: CurrencyMetadata,
) -> Result<(), ContractError> {
    validate_denom(&metadata.denom)?;

    if metadata.symbol.trim().is_empty() {
        return Err(new_generic_error("Currency symbol cannot be empty."));
    }

    if metadata.decimals > MAX_CURRENCY_DECIMALS {
        return Err(new_generic_error(format!(
            "Currency cannot have more than {} decimals.",
            MAX_CURRENCY_DECIMALS
        )));
    }

    CURRENCIES.save(storage, metadata.denom.as_str(), &metadata)?;

    Ok(())
}

fn validate_sender_is_admin(deps: &DepsMut, info: &MessageInfo) -> Result<(), ContractError> {
    let is_admin = ADMINS.may_load(deps.storage, info.sender.clone())?;
    if is_admin.is_none() {
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}

fn token_id_attribute(token_id: Option<u64>) -> String {
    token_id.map_or_else(|| "contract".to_string(), |id| id.to_string())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(&deps)?),
        QueryMsg::Admins {} => to_json_binary(&query_admins(&deps)?),
        QueryMsg::Currency { denom } => to_json_binary(&query_currency(&deps, denom)?),
        QueryMsg::ClaimPhases {
            token_id,
            include_allowlist,
        } => to_json_binary(&query_claim_phases(&deps, token_id, include_allowlist)?),
        QueryMsg::ActivePhase { token_id } => {
            to_json_binary(&query_active_phase(&deps, &env, token_id)?)
        }
    }
}

pub fn query_config(deps: &Deps) -> StdResult<ConfigResponse> {
    Ok(ConfigResponse {
        config: CONFIG.load(deps.storage)?,
    })
}

pub fn query_admins(deps: &Deps) -> StdResult<AdminsResponse> {
    Ok(AdminsResponse {
        admins: ADMINS
            .keys(deps.storage, None, None, Order::Ascending)
            .collect::<StdResult<_>>()?,
    })
}

pub fn query_currency(deps: &Deps, denom: String) -> StdResult<CurrencyResponse> {
    Ok(CurrencyResponse {
        currency: CURRENCIES.may_load(deps.storage, denom.as_str())?,
    })
}

/// Returns the stored phases in list order, each with its condition ID and the display metadata of its currency.
/// Allowlists can be large, so they are only returned when explicitly requested.
pub fn query_claim_phases(
    deps: &Deps,
    token_id: Option<u64>,
    include_allowlist: bool,
) -> StdResult<ClaimPhasesResponse> {
    let conditions = load_conditions(deps.storage, token_id)?;

    let phases = conditions
        .phases
        .iter()
        .enumerate()
        .map(|(index, phase)| {
            let mut phase = phase.clone();
            let has_allowlist = phase.snapshot.is_some();
            if !include_allowlist {
                phase.snapshot = None;
            }

            Ok(ClaimPhaseInfo {
                condition_id: conditions.condition_id(index),
                currency_metadata: CURRENCIES.may_load(deps.storage, phase.currency.as_str())?,
                has_allowlist,
                phase,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ClaimPhasesResponse {
        epoch: conditions.epoch,
        phases,
    })
}

/// Returns the phase that currently governs claims: the latest one whose start time has passed.
pub fn query_active_phase(
    deps: &Deps,
    env: &Env,
    token_id: Option<u64>,
) -> StdResult<ActivePhaseResponse> {
    let response = query_claim_phases(deps, token_id, true)?;

    Ok(ActivePhaseResponse {
        phase: response
            .phases
            .into_iter()
            .rev()
            .find(|info| info.phase.start_time <= env.block.time),
    })
}
