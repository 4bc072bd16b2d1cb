pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod phase;
pub mod submit;
mod validation;

pub use crate::classify::{ClaimConditionType, DropType};
pub use crate::config::{ContractGeneration, EditorConfig};
pub use crate::error::{EditorError, FieldErrors, SubmitError, WriteError};
pub use crate::form::ClaimConditionsForm;
pub use crate::phase::{
    PhaseDraft, PhaseField, PhaseId, PhaseTemplate, SnapshotEntryDraft, SnapshotInput,
};
pub use crate::submit::{SubmissionState, Submitter};


#[cfg(test)]
mod testing_contract;

#[cfg(test)]
mod testing_mocks;
