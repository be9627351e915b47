//! The single intake session and its per-action request tracking.
//!
//! Extraction, synthesis and export each run as their own asynchronous
//! action. Different actions may overlap; repeated triggers of the same action
//! are ordered by a generation counter so only the latest request's result is
//! applied. Resetting the session invalidates everything still in flight.

use serde::Serialize;

use psyreport_core::models::record::ReportRecord;
use psyreport_core::models::synthesis::SynthesisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Extract,
    Synthesize,
    Export,
}

/// Where an action is in its `idle → running → succeeded|failed` cycle.
///
/// `Succeeded` and `Failed` are resting states like `Idle`: the action can be
/// triggered again from any of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Proof of which request a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub action: Action,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct ActionSlot {
    phase: ActionPhase,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct ActivityTracker {
    extract: ActionSlot,
    synthesize: ActionSlot,
    export: ActionSlot,
}

impl ActivityTracker {
    /// Start a new request for `action`, superseding any request in flight.
    pub fn begin(&mut self, action: Action) -> RequestTicket {
        let slot = self.slot_mut(action);
        slot.generation += 1;
        slot.phase = ActionPhase::Running;
        RequestTicket {
            action,
            generation: slot.generation,
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.slot(ticket.action).generation == ticket.generation
    }

    /// Record the outcome of a request. Returns `false`, and changes nothing,
    /// when the ticket has been superseded.
    pub fn finish(&mut self, ticket: RequestTicket, succeeded: bool) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.slot_mut(ticket.action).phase = if succeeded {
            ActionPhase::Succeeded
        } else {
            ActionPhase::Failed
        };
        true
    }

    pub fn phase(&self, action: Action) -> ActionPhase {
        self.slot(action).phase
    }

    /// Return every action to idle and invalidate outstanding tickets.
    pub fn reset(&mut self) {
        for action in [Action::Extract, Action::Synthesize, Action::Export] {
            let slot = self.slot_mut(action);
            slot.generation += 1;
            slot.phase = ActionPhase::Idle;
        }
    }

    fn slot(&self, action: Action) -> &ActionSlot {
        match action {
            Action::Extract => &self.extract,
            Action::Synthesize => &self.synthesize,
            Action::Export => &self.export,
        }
    }

    fn slot_mut(&mut self, action: Action) -> &mut ActionSlot {
        match action {
            Action::Extract => &mut self.extract,
            Action::Synthesize => &mut self.synthesize,
            Action::Export => &mut self.export,
        }
    }
}

#[derive(Debug, Default)]
pub struct IntakeSession {
    pub record: ReportRecord,
    pub synthesis: Option<SynthesisResult>,
    pub activity: ActivityTracker,
}

impl IntakeSession {
    /// Back to a blank form: default record, no synthesis, nothing in flight.
    pub fn reset(&mut self) {
        self.record = ReportRecord::default();
        self.synthesis = None;
        self.activity.reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            record: self.record.clone(),
            synthesis: self.synthesis.clone(),
            extract: self.activity.phase(Action::Extract),
            synthesize: self.activity.phase(Action::Synthesize),
            export: self.activity.phase(Action::Export),
        }
    }
}

/// A read-only copy of the session for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub record: ReportRecord,
    pub synthesis: Option<SynthesisResult>,
    pub extract: ActionPhase,
    pub synthesize: ActionPhase,
    pub export: ActionPhase,
}
