use std::cell::RefCell;
use std::collections::VecDeque;

use cosmwasm_std::testing::MockApi;
use cosmwasm_std::{Event, StdError, StdResult, Timestamp};
use interface::claim_conditions::{ClaimPhasesResponse, SetClaimConditionsMsg};

use crate::client::{
    AnalyticsSink, ClaimConditionsReader, ClaimConditionsWriter, Notification, NotificationSink,
};
use crate::config::EditorConfig;
use crate::error::WriteError;

pub const CONTRACT: &str = "drop_contract";
pub const DENOM: &str = "untrn";
pub const NOW_SECONDS: u64 = 1_700_000_000;

pub fn now() -> Timestamp {
    Timestamp::from_seconds(NOW_SECONDS)
}

pub fn editor_config(api: &MockApi) -> EditorConfig {
    EditorConfig {
        owner: Some(api.addr_make("owner").to_string()),
        ..EditorConfig::new(CONTRACT, DENOM)
    }
}

/// Writer that records every batch and answers with queued results (Ok when the queue is empty).
#[derive(Default)]
pub struct MockWriter {
    pub calls: Vec<SetClaimConditionsMsg>,
    pub results: VecDeque<Result<(), WriteError>>,
}

impl MockWriter {
    pub fn failing_with(error: WriteError) -> Self {
        Self {
            calls: vec![],
            results: VecDeque::from([Err(error)]),
        }
    }
}

impl ClaimConditionsWriter for MockWriter {
    fn set_claim_conditions(&mut self, msg: SetClaimConditionsMsg) -> Result<(), WriteError> {
        self.calls.push(msg);
        self.results.pop_front().unwrap_or(Ok(()))
    }
}

pub struct MockReader {
    pub response: ClaimPhasesResponse,
    pub requests: RefCell<Vec<(Option<u64>, bool)>>,
}

impl MockReader {
    pub fn new(response: ClaimPhasesResponse) -> Self {
        Self {
            response,
            requests: RefCell::new(vec![]),
        }
    }
}

impl ClaimConditionsReader for MockReader {
    fn claim_phases(
        &self,
        token_id: Option<u64>,
        include_allowlist: bool,
    ) -> StdResult<ClaimPhasesResponse> {
        self.requests
            .borrow_mut()
            .push((token_id, include_allowlist));
        Ok(self.response.clone())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: RefCell<Vec<Notification>>,
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.borrow_mut().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingAnalytics {
    pub events: RefCell<Vec<Event>>,
    // Simulates an unreachable analytics backend.
    pub fail: bool,
}

impl RecordingAnalytics {
    pub fn actions(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| {
                event
                    .attributes
                    .iter()
                    .find(|attribute| attribute.key == "action")
                    .map(|attribute| attribute.value.clone())
            })
            .collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: Event) -> StdResult<()> {
        self.events.borrow_mut().push(event);
        if self.fail {
            return Err(StdError::generic_err("analytics backend unavailable"));
        }
        Ok(())
    }
}
