use std::collections::HashMap;

use cosmwasm_std::{Api, Event};
use interface::claim_conditions::SetClaimConditionsMsg;
use serde::{Deserialize, Serialize};

use crate::client::{
    AnalyticsSink, ClaimConditionsWriter, Notification, NotificationSink, ANALYTICS_EVENT_TYPE,
};
use crate::error::{SubmitError, WriteError};
use crate::form::ClaimConditionsForm;
use crate::phase::PhaseDraft;
use crate::validation::validate_phases;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    // A batch was handed to the writer and its result hasn't come back yet.
    Submitting,
}

impl ClaimConditionsForm {
    /// Validates the phases and, if they are valid, enters `Submitting` and returns the batch to write.
    ///
    /// # Errors
    /// Returns `InFlight` while a previous batch hasn't completed.
    /// Returns `Invalid` with the per-field errors, which are also kept on the form.
    pub fn begin_submission(&mut self, api: &dyn Api) -> Result<SetClaimConditionsMsg, SubmitError> {
        if self.state == SubmissionState::Submitting {
            return Err(SubmitError::InFlight);
        }

        let phases = match validate_phases(api, self.config.generation, &self.phases) {
            Ok(phases) => phases,
            Err(errors) => {
                self.field_errors = errors.clone();
                return Err(SubmitError::Invalid(errors));
            }
        };

        self.field_errors.clear();
        self.state = SubmissionState::Submitting;

        Ok(SetClaimConditionsMsg {
            token_id: self.config.token_id,
            phases,
            reset: self.reset,
        })
    }

    /// Applies the outcome of writing `submitted` and returns to `Idle`.
    ///
    /// On success the submitted batch becomes the loaded list. On failure the local edits stay,
    /// and field errors reported by the contract are attached to their fields.
    ///
    /// # Errors
    /// Returns `NotInFlight`, leaving the form untouched, if no batch is awaiting its result.
    pub fn complete_submission(
        &mut self,
        submitted: SetClaimConditionsMsg,
        result: Result<(), WriteError>,
    ) -> Result<usize, SubmitError> {
        if self.state != SubmissionState::Submitting {
            return Err(SubmitError::NotInFlight);
        }

        self.state = SubmissionState::Idle;

        match result {
            Ok(()) => {
                let metadata: HashMap<String, _> = self
                    .phases
                    .iter()
                    .filter_map(|phase| {
                        phase
                            .currency_metadata
                            .clone()
                            .map(|metadata| (phase.currency.clone(), metadata))
                    })
                    .collect();

                let phases: Vec<PhaseDraft> = submitted
                    .phases
                    .iter()
                    .map(|phase| {
                        let id = self.allocate_id();
                        PhaseDraft::from_phase(id, phase, metadata.get(&phase.currency).cloned())
                    })
                    .collect();

                let submitted_len = phases.len();
                self.replace_loaded(phases);

                Ok(submitted_len)
            }
            Err(WriteError::Validation(errors)) => {
                for error in &errors {
                    self.field_errors.insert(error.path(), error.reason.clone());
                }

                Err(SubmitError::Write(WriteError::Validation(errors)))
            }
            Err(err) => Err(SubmitError::Write(err)),
        }
    }
}

/// Runs a whole submission against a writer, reporting the outcome to the user and to analytics.
pub struct Submitter<'a> {
    writer: &'a mut dyn ClaimConditionsWriter,
    notifications: &'a dyn NotificationSink,
    analytics: &'a dyn AnalyticsSink,
}

impl<'a> Submitter<'a> {
    pub fn new(
        writer: &'a mut dyn ClaimConditionsWriter,
        notifications: &'a dyn NotificationSink,
        analytics: &'a dyn AnalyticsSink,
    ) -> Self {
        Self {
            writer,
            notifications,
            analytics,
        }
    }

    /// Submits the form's phases as one batch and returns the number of phases written.
    /// Nothing is retried; after any error the form is back to `Idle` and can be submitted again.
    pub fn submit(
        &mut self,
        form: &mut ClaimConditionsForm,
        api: &dyn Api,
    ) -> Result<usize, SubmitError> {
        self.track(form, "submit_attempt", None);

        let msg = match form.begin_submission(api) {
            Ok(msg) => msg,
            Err(err) => {
                if let SubmitError::Invalid(_) = err {
                    self.track(form, "submit_error", Some(&err.to_string()));
                }
                return Err(err);
            }
        };

        let result = self.writer.set_claim_conditions(msg.clone());

        match form.complete_submission(msg, result) {
            Ok(written) => {
                self.notifications.notify(Notification::Success {
                    title: "Saved claim phases".to_string(),
                });
                self.track(form, "submit_success", None);

                Ok(written)
            }
            Err(err) => {
                // field errors are shown next to their inputs instead
                if let SubmitError::Write(WriteError::Other(description)) = &err {
                    self.notifications.notify(Notification::Error {
                        title: "Failed to save claim phases".to_string(),
                        description: description.clone(),
                    });
                }
                self.track(form, "submit_error", Some(&err.to_string()));

                Err(err)
            }
        }
    }

    fn track(&self, form: &ClaimConditionsForm, action: &str, error: Option<&str>) {
        let mut event = Event::new(ANALYTICS_EVENT_TYPE)
            .add_attribute("action", action)
            .add_attribute("contract", form.config().contract.clone())
            .add_attribute("phases", form.phases().len().to_string());

        if let Some(error) = error {
            event = event.add_attribute("error", error);
        }

        // analytics must never affect the form
        let _ = self.analytics.track(event);
    }
}
