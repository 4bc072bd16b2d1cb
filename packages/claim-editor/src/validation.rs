use std::str::FromStr;

use cosmwasm_std::{Api, Decimal, Timestamp, Uint128};
use interface::claim_conditions::{
    field_path, snapshot_field_path, ClaimLimit, ClaimPhase, PhaseMetadata, SnapshotEntry,
};

use crate::config::ContractGeneration;
use crate::error::FieldErrors;
use crate::phase::{is_unlimited, PhaseDraft, PhaseField, SnapshotEntryDraft};

/// Turns the drafts into the batch the contract accepts.
/// Every invalid value is reported, not only the first one.
pub(crate) fn validate_phases(
    api: &dyn Api,
    generation: ContractGeneration,
    phases: &[PhaseDraft],
) -> Result<Vec<ClaimPhase>, FieldErrors> {
    let mut errors = FieldErrors::default();

    let validated: Vec<ClaimPhase> = phases
        .iter()
        .enumerate()
        .filter_map(|(index, phase)| validate_phase(api, generation, index, phase, &mut errors))
        .collect();

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(errors)
    }
}

fn validate_phase(
    api: &dyn Api,
    generation: ContractGeneration,
    index: usize,
    phase: &PhaseDraft,
    errors: &mut FieldErrors,
) -> Option<ClaimPhase> {
    let path = |field: PhaseField| field_path(index, field.path_segment());

    let start_time = record(
        errors,
        path(PhaseField::StartTime),
        parse_start_time(&phase.start_time),
    );
    let max_claimable_supply = record(
        errors,
        path(PhaseField::MaxClaimableSupply),
        parse_limit(&phase.max_claimable_supply),
    );
    let max_claimable_per_wallet = record(
        errors,
        path(PhaseField::MaxClaimablePerWallet),
        parse_limit(&phase.max_claimable_per_wallet),
    );
    let price = record(errors, path(PhaseField::Price), parse_price(&phase.price));
    let currency = record(
        errors,
        path(PhaseField::Currency),
        parse_currency(&phase.currency),
    );

    let wait_in_seconds = match generation {
        ContractGeneration::V1 => record(
            errors,
            path(PhaseField::WaitInSeconds),
            parse_seconds(&phase.wait_in_seconds),
        )
        .map(Some),
        ContractGeneration::Current => Some(None),
    };

    let snapshot = match &phase.snapshot {
        None => Some(None),
        Some(entries) => {
            let validated: Vec<SnapshotEntry> = entries
                .iter()
                .enumerate()
                .filter_map(|(entry_index, entry)| {
                    validate_snapshot_entry(api, index, entry_index, entry, errors)
                })
                .collect();

            // entries that failed were already reported
            (validated.len() == entries.len()).then_some(Some(validated))
        }
    };

    let name = match phase.name.trim() {
        "" => format!("Phase {}", index + 1),
        name => name.to_string(),
    };

    Some(ClaimPhase {
        start_time: start_time?,
        max_claimable_supply: max_claimable_supply?,
        max_claimable_per_wallet: max_claimable_per_wallet?,
        price: price?,
        currency: currency?,
        snapshot: snapshot?,
        metadata: PhaseMetadata { name },
        wait_in_seconds: wait_in_seconds?,
    })
}

fn validate_snapshot_entry(
    api: &dyn Api,
    phase_index: usize,
    entry_index: usize,
    entry: &SnapshotEntryDraft,
    errors: &mut FieldErrors,
) -> Option<SnapshotEntry> {
    let path = |field: &str| snapshot_field_path(phase_index, entry_index, field);

    let address = record(
        errors,
        path("address"),
        api.addr_validate(entry.address.trim())
            .map_err(|err| err.to_string()),
    );
    let max_claimable = record(
        errors,
        path("max_claimable"),
        parse_limit(&entry.max_claimable),
    );
    let price = match entry.price.as_deref().map(str::trim) {
        None | Some("") => Some(None),
        Some(price) if is_unlimited(price) => Some(None),
        Some(price) => record(errors, path("price"), parse_price(price)).map(Some),
    };
    let currency = match entry.currency.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(currency) => Some(currency.to_string()),
    };

    Some(SnapshotEntry {
        address: address?.to_string(),
        max_claimable: max_claimable?,
        price: price?,
        currency,
    })
}

fn record<T>(errors: &mut FieldErrors, path: String, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(path, message);
            None
        }
    }
}

fn parse_limit(value: &str) -> Result<ClaimLimit, String> {
    if is_unlimited(value) {
        return Ok(ClaimLimit::Unlimited);
    }

    value
        .trim()
        .parse::<u128>()
        .map(|amount| ClaimLimit::Amount(Uint128::new(amount)))
        .map_err(|_| "must be a whole number or \"unlimited\"".to_string())
}

fn parse_start_time(value: &str) -> Result<Timestamp, String> {
    parse_seconds(value).map(Timestamp::from_seconds)
}

fn parse_seconds(value: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| "must be a number of seconds".to_string())
}

fn parse_price(value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|_| "must be a non-negative decimal number".to_string())
}

fn parse_currency(value: &str) -> Result<String, String> {
    match value.trim() {
        "" => Err("cannot be empty".to_string()),
        currency => Ok(currency.to_string()),
    }
}
