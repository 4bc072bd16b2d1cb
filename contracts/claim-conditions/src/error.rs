use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use interface::claim_conditions::PhaseFieldError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    PaymentError(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Cannot set more than {max} claim phases")]
    TooManyPhases { max: u32 },

    // Rendered as a field path so that clients can attach the error to the offending input.
    #[error("{0}")]
    InvalidPhaseField(PhaseFieldError),

    #[error("Invalid denomination: {denom}")]
    InvalidDenom { denom: String },
}

pub fn new_generic_error(msg: impl Into<String>) -> ContractError {
    ContractError::Std(StdError::generic_err(msg))
}

pub fn invalid_phase_field(
    index: usize,
    field: impl Into<String>,
    reason: impl Into<String>,
) -> ContractError {
    ContractError::InvalidPhaseField(PhaseFieldError::new(index, field, reason))
}
