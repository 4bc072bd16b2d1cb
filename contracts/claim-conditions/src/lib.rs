pub mod contract;
mod error;
pub mod msg;
pub mod query;
pub mod state;
mod validation;

pub use crate::error::ContractError;
