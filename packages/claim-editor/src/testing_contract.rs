use claim_conditions::contract::{execute, instantiate, query};
use claim_conditions::msg::{ExecuteMsg, InstantiateMsg};
use claim_conditions::query::QueryMsg;
use cosmwasm_std::testing::{mock_dependencies, mock_env, MockApi, MockQuerier, MockStorage};
use cosmwasm_std::{from_json, Addr, Env, MessageInfo, OwnedDeps, StdResult};
use interface::claim_conditions::{ClaimPhasesResponse, CurrencyMetadata, SetClaimConditionsMsg};

use crate::classify::ClaimConditionType;
use crate::client::{ClaimConditionsReader, ClaimConditionsWriter, NoAnalytics, Notification};
use crate::error::{SubmitError, WriteError};
use crate::form::ClaimConditionsForm;
use crate::phase::{PhaseField, PhaseTemplate, SnapshotEntryDraft, SnapshotInput};
use crate::submit::Submitter;
use crate::testing_mocks::{editor_config, now, RecordingNotifier, DENOM, NOW_SECONDS};

const ADMIN: &str = "admin";

/// Runs the claim conditions contract in mock storage and talks to it the way a node would.
struct ContractHarness {
    deps: OwnedDeps<MockStorage, MockApi, MockQuerier>,
    env: Env,
    sender: Addr,
}

impl ContractHarness {
    fn new() -> Self {
        let mut deps = mock_dependencies();
        let env = mock_env();
        let admin = deps.api.addr_make(ADMIN);

        let msg = InstantiateMsg {
            admins: vec![admin.to_string()],
            max_phases: Some(5),
            max_snapshot_entries: None,
            currencies: vec![CurrencyMetadata {
                denom: DENOM.to_string(),
                symbol: "NTRN".to_string(),
                decimals: 6,
            }],
        };
        let info = MessageInfo {
            sender: admin.clone(),
            funds: vec![],
        };
        instantiate(deps.as_mut(), env.clone(), info, msg).unwrap();

        Self {
            deps,
            env,
            sender: admin,
        }
    }

    fn acting_as(mut self, name: &str) -> Self {
        self.sender = self.deps.api.addr_make(name);
        self
    }

    fn api(&self) -> &MockApi {
        &self.deps.api
    }
}

impl ClaimConditionsReader for ContractHarness {
    fn claim_phases(
        &self,
        token_id: Option<u64>,
        include_allowlist: bool,
    ) -> StdResult<ClaimPhasesResponse> {
        let binary = query(
            self.deps.as_ref(),
            self.env.clone(),
            QueryMsg::ClaimPhases {
                token_id,
                include_allowlist,
            },
        )?;

        from_json(binary)
    }
}

impl ClaimConditionsWriter for ContractHarness {
    fn set_claim_conditions(&mut self, msg: SetClaimConditionsMsg) -> Result<(), WriteError> {
        let info = MessageInfo {
            sender: self.sender.clone(),
            funds: vec![],
        };

        execute(
            self.deps.as_mut(),
            self.env.clone(),
            info,
            ExecuteMsg::SetClaimConditions(msg),
        )
        .map(|_| ())
        .map_err(|err| {
            // the node wraps contract errors before handing them back
            WriteError::from_message(format!(
                "failed to execute message; message index: 0: {}: execute wasm contract failed",
                err
            ))
        })
    }
}

fn submit(
    harness: &mut ContractHarness,
    form: &mut ClaimConditionsForm,
    notifier: &RecordingNotifier,
) -> Result<usize, SubmitError> {
    let api = MockApi::default();

    Submitter::new(harness, notifier, &NoAnalytics).submit(form, &api)
}

#[test]
fn submitted_phases_read_back_from_contract() {
    let mut harness = ContractHarness::new();
    let alice = harness.api().addr_make("alice").to_string();

    let mut form = ClaimConditionsForm::new(editor_config(harness.api()));
    form.load_from(&harness).unwrap();
    assert!(form.phases().is_empty());

    form.append(PhaseTemplate::Public, now()).unwrap();
    form.set_field(0, PhaseField::Price, "2").unwrap();
    form.set_field(0, PhaseField::MaxClaimableSupply, "1000")
        .unwrap();
    form.set_field(0, PhaseField::MaxClaimablePerWallet, "10")
        .unwrap();
    form.append(PhaseTemplate::Specific, now()).unwrap();
    form.set_field(1, PhaseField::StartTime, (NOW_SECONDS + 3600).to_string())
        .unwrap();
    form.set_snapshot(
        1,
        vec![SnapshotInput::Entry(SnapshotEntryDraft {
            address: alice.clone(),
            max_claimable: "3".to_string(),
            price: Some("0.5".to_string()),
            currency: None,
        })],
    )
    .unwrap();

    let notifier = RecordingNotifier::default();
    assert_eq!(submit(&mut harness, &mut form, &notifier), Ok(2));

    let mut reloaded = ClaimConditionsForm::new(editor_config(harness.api()));
    reloaded.load_from(&harness).unwrap();

    assert_eq!(reloaded.phases().len(), 2);
    for (saved, read_back) in form.phases().iter().zip(reloaded.phases()) {
        assert_eq!(saved.start_time, read_back.start_time);
        assert_eq!(saved.max_claimable_supply, read_back.max_claimable_supply);
        assert_eq!(
            saved.max_claimable_per_wallet,
            read_back.max_claimable_per_wallet
        );
        assert_eq!(saved.price, read_back.price);
        assert_eq!(saved.snapshot, read_back.snapshot);
        assert_eq!(saved.name, read_back.name);
    }

    assert_eq!(reloaded.phase(0).unwrap().price_display(), "2 NTRN");
    assert_eq!(
        reloaded.claim_condition_type(1).unwrap(),
        ClaimConditionType::Specific
    );
    assert_eq!(
        reloaded.phase(1).unwrap().snapshot.as_ref().unwrap()[0],
        SnapshotEntryDraft {
            address: alice,
            max_claimable: "3".to_string(),
            price: Some("0.5".to_string()),
            currency: None,
        }
    );
}

#[test]
fn contract_rejections_point_at_fields() {
    let mut harness = ContractHarness::new();
    let mut form = ClaimConditionsForm::new(editor_config(harness.api()));

    form.append(PhaseTemplate::Public, now()).unwrap();
    form.append(PhaseTemplate::Public, now()).unwrap();

    let notifier = RecordingNotifier::default();
    let err = submit(&mut harness, &mut form, &notifier).unwrap_err();

    assert!(matches!(err, SubmitError::Write(WriteError::Validation(_))));
    assert!(form
        .field_errors()
        .get("phases.1.start_time")
        .unwrap()
        .starts_with("must be later than the start time of phase 0"));
    assert!(notifier.notifications.borrow().is_empty());

    form.set_field(1, PhaseField::StartTime, (NOW_SECONDS + 1).to_string())
        .unwrap();
    form.set_field(1, PhaseField::MaxClaimableSupply, "5").unwrap();
    form.set_field(1, PhaseField::MaxClaimablePerWallet, "6")
        .unwrap();
    submit(&mut harness, &mut form, &notifier).unwrap_err();

    assert!(!form.field_errors().contains("phases.1.start_time"));
    assert!(form
        .field_errors()
        .contains("phases.1.max_claimable_per_wallet"));
    assert!(harness.claim_phases(None, false).unwrap().phases.is_empty());
}

#[test]
fn unauthorized_write_is_notified() {
    let mut harness = ContractHarness::new().acting_as("stranger");
    let mut form = ClaimConditionsForm::new(editor_config(harness.api()));
    form.append(PhaseTemplate::Public, now()).unwrap();

    let notifier = RecordingNotifier::default();
    let err = submit(&mut harness, &mut form, &notifier).unwrap_err();

    assert!(
        matches!(err, SubmitError::Write(WriteError::Other(ref message)) if message.contains("Unauthorized"))
    );
    assert!(matches!(
        notifier.notifications.borrow()[0],
        Notification::Error { ref title, .. } if title == "Failed to save claim phases"
    ));
    assert!(form.has_unsaved_changes());
}

#[test]
fn removing_single_phase_resets_claims() {
    let mut harness = ContractHarness::new();
    let mut config = editor_config(harness.api());
    config.single_phase = true;

    let mut form = ClaimConditionsForm::new(config.clone());
    form.append(PhaseTemplate::Public, now()).unwrap();
    let notifier = RecordingNotifier::default();
    submit(&mut harness, &mut form, &notifier).unwrap();

    let mut form = ClaimConditionsForm::new(config);
    form.load_from(&harness).unwrap();
    assert_eq!(form.phases().len(), 1);

    form.remove(0).unwrap();
    assert!(form.reset_requested());
    assert_eq!(submit(&mut harness, &mut form, &notifier), Ok(0));

    let stored = harness.claim_phases(None, false).unwrap();
    assert_eq!(stored.epoch, 1);
    assert!(stored.phases.is_empty());

    // a phase added after the reset gets a condition id that was never used
    form.append(PhaseTemplate::Public, now()).unwrap();
    submit(&mut harness, &mut form, &notifier).unwrap();
    let stored = harness.claim_phases(None, false).unwrap();
    assert_eq!(stored.epoch, 1);
    assert_eq!(stored.phases[0].condition_id, 1);
}

#[test]
fn token_phases_are_kept_apart() {
    let mut harness = ContractHarness::new();
    let mut config = editor_config(harness.api());
    config.token_id = Some(7);

    let mut form = ClaimConditionsForm::new(config);
    form.append(PhaseTemplate::Public, now()).unwrap();
    let notifier = RecordingNotifier::default();
    submit(&mut harness, &mut form, &notifier).unwrap();

    assert_eq!(harness.claim_phases(Some(7), false).unwrap().phases.len(), 1);
    assert!(harness.claim_phases(None, false).unwrap().phases.is_empty());
}
