use std::collections::BTreeMap;

use cosmwasm_std::StdError;
use interface::claim_conditions::PhaseFieldError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("No claim phase at index {index}")]
    PhaseNotFound { index: usize },

    #[error("Claim phase {index} must be unlocked for editing first")]
    PhaseNotEditable { index: usize },

    #[error("This contract supports a single claim phase only")]
    SinglePhaseLimit,

    #[error("A connected wallet is required for a creator-only phase")]
    MissingOwner,

    #[error("Claim phases cannot be changed while a submission is in flight")]
    SubmissionInFlight,
}

/// Error returned by the write operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriteError {
    // The batch was rejected and the offending values can be addressed by their field paths.
    #[error("claim phases were rejected: {}", join_field_errors(.0))]
    Validation(Vec<PhaseFieldError>),

    #[error("{0}")]
    Other(String),
}

impl WriteError {
    /// Classifies an error message coming back from the node.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        match PhaseFieldError::find_in(&message) {
            Some(field_error) => WriteError::Validation(vec![field_error]),
            None => WriteError::Other(message),
        }
    }
}

fn join_field_errors(errors: &[PhaseFieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    InFlight,

    #[error("No submission is in flight")]
    NotInFlight,

    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Validation messages keyed by field path, e.g. `phases.0.price`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.insert(path.into(), message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn remove(&mut self, path: &str) {
        self.0.remove(path);
    }

    /// Removes every error whose path starts with `prefix`.
    pub fn remove_prefixed(&mut self, prefix: &str) {
        self.0.retain(|path, _| !path.starts_with(prefix));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(path, message)| (path.as_str(), message.as_str()))
    }
}
