use cosmwasm_std::{StdResult, Timestamp};
use interface::claim_conditions::{field_path, ClaimPhasesResponse};
use serde::{Deserialize, Serialize};

use crate::classify::{ClaimConditionType, DropType};
use crate::client::ClaimConditionsReader;
use crate::config::EditorConfig;
use crate::error::{EditorError, FieldErrors};
use crate::phase::{
    PhaseDefaults, PhaseDraft, PhaseField, PhaseId, PhaseTemplate, SnapshotEntryDraft,
    SnapshotInput,
};
use crate::submit::SubmissionState;

/// Editing state of one contract's claim phases.
///
/// All mutations go through the methods below, so the whole state can be
/// serialized, restored and tested without any UI attached.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClaimConditionsForm {
    pub(crate) config: EditorConfig,
    pub(crate) phases: Vec<PhaseDraft>,
    pub(crate) next_phase_id: u64,
    // Phase whose allowlist panel is open. At most one at a time.
    pub(crate) open_snapshot: Option<PhaseId>,
    // Raised when the only phase of a single-phase drop was removed.
    pub(crate) reset: bool,
    pub(crate) dirty: bool,
    // Number of phases at the last load or successful submission.
    pub(crate) loaded_len: usize,
    pub(crate) field_errors: FieldErrors,
    pub(crate) state: SubmissionState,
}

impl ClaimConditionsForm {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            phases: vec![],
            next_phase_id: 0,
            open_snapshot: None,
            reset: false,
            dirty: false,
            loaded_len: 0,
            field_errors: FieldErrors::default(),
            state: SubmissionState::Idle,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn phases(&self) -> &[PhaseDraft] {
        &self.phases
    }

    pub fn phase(&self, index: usize) -> Result<&PhaseDraft, EditorError> {
        self.phases
            .get(index)
            .ok_or(EditorError::PhaseNotFound { index })
    }

    pub fn position(&self, id: PhaseId) -> Option<usize> {
        self.phases.iter().position(|phase| phase.id == id)
    }

    /// Replaces the list with the phases stored on chain. Local edits are dropped.
    pub fn load(&mut self, response: ClaimPhasesResponse) {
        let phases = response
            .phases
            .into_iter()
            .map(|info| {
                let id = self.allocate_id();
                PhaseDraft::from_info(id, info)
            })
            .collect();

        self.replace_loaded(phases);
    }

    pub fn load_from(&mut self, reader: &dyn ClaimConditionsReader) -> StdResult<()> {
        let response = reader.claim_phases(self.config.token_id, true)?;
        self.load(response);

        Ok(())
    }

    pub(crate) fn replace_loaded(&mut self, phases: Vec<PhaseDraft>) {
        self.loaded_len = phases.len();
        self.phases = phases;
        self.open_snapshot = None;
        self.reset = false;
        self.dirty = false;
        self.field_errors.clear();
    }

    /// Appends a new phase built from `template`, starting at `now`.
    ///
    /// # Errors
    /// Returns `SinglePhaseLimit` if the drop supports one phase and already has it.
    /// Returns `MissingOwner` for the creator template when no wallet is connected.
    /// Returns `SubmissionInFlight` while a batch is being written; this applies to every edit.
    pub fn append(
        &mut self,
        template: PhaseTemplate,
        now: Timestamp,
    ) -> Result<PhaseId, EditorError> {
        self.ensure_idle()?;

        if self.config.single_phase && !self.phases.is_empty() {
            return Err(EditorError::SinglePhaseLimit);
        }

        let defaults = PhaseDefaults {
            start_time: now,
            currency: self.config.default_currency.clone(),
            owner: self.config.owner.clone(),
            name: format!("Phase {}", self.phases.len() + 1),
        };

        let id = PhaseId::new(self.next_phase_id);
        let phase = template.build(id, &defaults)?;
        self.next_phase_id += 1;

        self.phases.push(phase);
        self.mark_dirty();

        Ok(id)
    }

    /// Removes the phase at `index` and returns it.
    pub fn remove(&mut self, index: usize) -> Result<PhaseDraft, EditorError> {
        self.ensure_idle()?;
        self.phase(index)?;

        let removed = self.phases.remove(index);
        if self.config.single_phase && self.phases.is_empty() {
            self.reset = true;
        }

        if self.open_snapshot == Some(removed.id) {
            self.open_snapshot = None;
        }

        // positions after the removed phase shifted
        self.field_errors.clear();
        self.mark_dirty();

        Ok(removed)
    }

    pub fn move_phase(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.phase(from)?;
        self.phase(to)?;

        let phase = self.phases.remove(from);
        self.phases.insert(to, phase);

        self.field_errors.clear();
        self.mark_dirty();

        Ok(())
    }

    /// Unlocks a phase that was loaded from the contract.
    pub fn start_editing(&mut self, index: usize) -> Result<(), EditorError> {
        self.phase_mut(index)?.is_editing = true;

        Ok(())
    }

    pub fn set_field(
        &mut self,
        index: usize,
        field: PhaseField,
        value: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.editable_phase_mut(index)?
            .set_field(field, value.into());

        self.field_errors
            .remove(&field_path(index, field.path_segment()));
        self.mark_dirty();

        Ok(())
    }

    /// Replaces the allowlist of a phase. Plain addresses become unlimited entries.
    pub fn set_snapshot(
        &mut self,
        index: usize,
        inputs: Vec<SnapshotInput>,
    ) -> Result<(), EditorError> {
        self.editable_phase_mut(index)?.snapshot = Some(
            inputs
                .into_iter()
                .map(SnapshotEntryDraft::from)
                .collect(),
        );

        self.field_errors
            .remove_prefixed(&field_path(index, "snapshot"));
        self.mark_dirty();

        Ok(())
    }

    /// Switches the allowlist mode of a phase, adjusting the fields it depends on:
    /// - `Any` removes the allowlist and closes its panel.
    /// - `Specific` sets the per-wallet cap to 0, so only allowlisted wallets can claim.
    /// - `Overrides` sets the per-wallet cap to 1 unless it already is 1.
    ///
    /// `Specific` and `Overrides` start from an empty allowlist if the phase had none.
    pub fn set_drop_type(&mut self, index: usize, drop_type: DropType) -> Result<(), EditorError> {
        let phase = self.editable_phase_mut(index)?;
        let id = phase.id;

        match drop_type {
            DropType::Any => {
                phase.snapshot = None;
            }
            DropType::Specific => {
                phase.max_claimable_per_wallet = "0".to_string();
                phase.snapshot.get_or_insert_with(Vec::new);
            }
            DropType::Overrides => {
                if phase.max_claimable_per_wallet.trim() != "1" {
                    phase.max_claimable_per_wallet = "1".to_string();
                }
                phase.snapshot.get_or_insert_with(Vec::new);
            }
        }

        if drop_type == DropType::Any && self.open_snapshot == Some(id) {
            self.open_snapshot = None;
        }

        self.field_errors
            .remove(&field_path(index, PhaseField::MaxClaimablePerWallet.path_segment()));
        self.field_errors
            .remove_prefixed(&field_path(index, "snapshot"));
        self.mark_dirty();

        Ok(())
    }

    /// Opens the allowlist panel of a phase, closing any other one.
    pub fn open_snapshot(&mut self, index: usize) -> Result<(), EditorError> {
        self.open_snapshot = Some(self.phase(index)?.id);

        Ok(())
    }

    pub fn close_snapshot(&mut self) {
        self.open_snapshot = None;
    }

    pub fn open_snapshot_index(&self) -> Option<usize> {
        self.open_snapshot.and_then(|id| self.position(id))
    }

    pub fn claim_condition_type(&self, index: usize) -> Result<ClaimConditionType, EditorError> {
        Ok(ClaimConditionType::of(self.phase(index)?))
    }

    pub fn drop_type(&self, index: usize) -> Result<DropType, EditorError> {
        Ok(DropType::of(self.phase(index)?))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the list differs from what was last loaded or submitted.
    /// Compares list lengths and provenance only; edits inside loaded phases are tracked by `is_dirty`.
    pub fn has_unsaved_changes(&self) -> bool {
        self.reset
            || self.phases.len() != self.loaded_len
            || self.phases.iter().any(|phase| !phase.from_sdk)
    }

    /// Whether the next submission replaces the stored phases with a fresh claim period.
    pub fn reset_requested(&self) -> bool {
        self.reset
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub(crate) fn allocate_id(&mut self) -> PhaseId {
        let id = PhaseId::new(self.next_phase_id);
        self.next_phase_id += 1;
        id
    }

    // Field paths of an in-flight batch must keep pointing at the same phases.
    fn ensure_idle(&self) -> Result<(), EditorError> {
        if self.state == SubmissionState::Submitting {
            return Err(EditorError::SubmissionInFlight);
        }

        Ok(())
    }

    fn phase_mut(&mut self, index: usize) -> Result<&mut PhaseDraft, EditorError> {
        self.ensure_idle()?;
        self.phases
            .get_mut(index)
            .ok_or(EditorError::PhaseNotFound { index })
    }

    fn editable_phase_mut(&mut self, index: usize) -> Result<&mut PhaseDraft, EditorError> {
        let phase = self.phase_mut(index)?;
        if !phase.is_editing {
            return Err(EditorError::PhaseNotEditable { index });
        }

        Ok(phase)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
