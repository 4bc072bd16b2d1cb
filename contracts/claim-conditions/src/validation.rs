use std::collections::HashSet;

use cosmwasm_std::Api;
use interface::claim_conditions::{ClaimPhase, SnapshotEntry};

use crate::error::{invalid_phase_field, ContractError};
use crate::state::Config;

pub const MAX_PHASE_NAME_LENGTH: usize = 128;

pub fn validate_denom(denom: &str) -> Result<(), ContractError> {
    if denom.is_empty() || denom.len() > 128 {
        return Err(ContractError::InvalidDenom {
            denom: denom.to_string(),
        });
    }

    // Should start with a letter and contain only alphanumerics, dashes, underscores and slashes
    if !denom
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        || !denom
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '/')
    {
        return Err(ContractError::InvalidDenom {
            denom: denom.to_string(),
        });
    }

    Ok(())
}

/// Validates a full phase list before it replaces the stored one.
///
/// # Errors
/// Returns `TooManyPhases` if the list is longer than the configured maximum.
/// Returns `InvalidPhaseField` for the first offending value, addressed by its field path.
pub fn validate_phases(
    api: &dyn Api,
    config: &Config,
    phases: &[ClaimPhase],
) -> Result<(), ContractError> {
    if phases.len() > config.max_phases as usize {
        return Err(ContractError::TooManyPhases {
            max: config.max_phases,
        });
    }

    for (index, phase) in phases.iter().enumerate() {
        // Phases are activated by start time, so the list must already be in activation order.
        if index > 0 && phase.start_time <= phases[index - 1].start_time {
            return Err(invalid_phase_field(
                index,
                "start_time",
                format!(
                    "must be later than the start time of phase {}",
                    index - 1
                ),
            ));
        }

        validate_denom(&phase.currency)
            .map_err(|err| invalid_phase_field(index, "currency", err.to_string()))?;

        if !phase
            .max_claimable_per_wallet
            .fits_within(&phase.max_claimable_supply)
        {
            return Err(invalid_phase_field(
                index,
                "max_claimable_per_wallet",
                "cannot exceed max_claimable_supply",
            ));
        }

        if phase.metadata.name.len() > MAX_PHASE_NAME_LENGTH {
            return Err(invalid_phase_field(
                index,
                "metadata.name",
                format!("cannot be longer than {} bytes", MAX_PHASE_NAME_LENGTH),
            ));
        }

        if let Some(snapshot) = &phase.snapshot {
            validate_snapshot(api, config, index, snapshot)?;
        }
    }

    Ok(())
}

fn validate_snapshot(
    api: &dyn Api,
    config: &Config,
    phase_index: usize,
    snapshot: &[SnapshotEntry],
) -> Result<(), ContractError> {
    if snapshot.len() > config.max_snapshot_entries as usize {
        return Err(invalid_phase_field(
            phase_index,
            "snapshot",
            format!(
                "cannot contain more than {} entries",
                config.max_snapshot_entries
            ),
        ));
    }

    let mut seen = HashSet::new();
    for (entry_index, entry) in snapshot.iter().enumerate() {
        let field = |name: &str| format!("snapshot.{}.{}", entry_index, name);

        let address = api
            .addr_validate(&entry.address)
            .map_err(|err| invalid_phase_field(phase_index, field("address"), err.to_string()))?;

        if !seen.insert(address.clone()) {
            return Err(invalid_phase_field(
                phase_index,
                field("address"),
                format!("duplicate address {}", address),
            ));
        }

        if let Some(currency) = &entry.currency {
            validate_denom(currency).map_err(|err| {
                invalid_phase_field(phase_index, field("currency"), err.to_string())
            })?;
        }
    }

    Ok(())
}
