use cosmwasm_std::{Event, StdResult};
use interface::claim_conditions::{ClaimPhasesResponse, SetClaimConditionsMsg};

use crate::error::WriteError;

/// Type of every analytics event emitted by the editor.
pub const ANALYTICS_EVENT_TYPE: &str = "claim_conditions";

/// Reads the phases currently stored for the edited contract.
pub trait ClaimConditionsReader {
    fn claim_phases(
        &self,
        token_id: Option<u64>,
        include_allowlist: bool,
    ) -> StdResult<ClaimPhasesResponse>;
}

/// Replaces the stored phases with a new batch.
pub trait ClaimConditionsWriter {
    fn set_claim_conditions(&mut self, msg: SetClaimConditionsMsg) -> Result<(), WriteError>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    Success {
        title: String,
    },
    Error {
        title: String,
        description: String,
    },
}

/// Shows notifications to the user. Fire and forget.
pub trait NotificationSink {
    fn notify(&self, notification: Notification);
}

/// Receives usage events. Its errors are ignored by the editor.
pub trait AnalyticsSink {
    fn track(&self, event: Event) -> StdResult<()>;
}

/// Sink for callers that don't collect analytics.
pub struct NoAnalytics;

impl AnalyticsSink for NoAnalytics {
    fn track(&self, _event: Event) -> StdResult<()> {
        Ok(())
    }
}
