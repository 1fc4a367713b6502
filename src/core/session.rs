use thiserror::Error;

use super::calculator::{self, PaycheckAmounts};
use super::impact::{CurrentImpact, IncrementalImpact, current_impact, incremental_impact};
use super::types::{Assumptions, ContributionSetting, ContributionType, YtdSnapshot, clamp_age};

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Projection was requested before any payroll snapshot was attached.
    #[error("no account snapshot available; load one before computing impacts")]
    MissingSnapshot,
}

/// Everything a recompute produces, tagged with the revision it was computed
/// at so a caller juggling rapid edits can discard superseded results
/// (last-write-wins per session).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RecomputeOutput {
    pub revision: u64,
    pub preview: PaycheckAmounts,
    pub current: CurrentImpact,
    pub incremental: IncrementalImpact,
}

/// Session-scoped planner state.
///
/// Holds the candidate election being edited alongside the saved one inside
/// the snapshot. The engine itself keeps no state between calls; all of it
/// lives here, owned by the caller, and every mutation requires an explicit
/// [`PlannerSession::recompute`] to observe its effect.
#[derive(Clone, Debug)]
pub struct PlannerSession {
    candidate: ContributionSetting,
    age: u32,
    snapshot: Option<YtdSnapshot>,
    assumptions: Assumptions,
    revision: u64,
}

impl PlannerSession {
    pub fn new(assumptions: Assumptions) -> Self {
        Self {
            candidate: ContributionSetting::default(),
            age: 30,
            snapshot: None,
            assumptions,
            revision: 0,
        }
    }

    pub fn candidate(&self) -> ContributionSetting {
        self.candidate
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> Option<&YtdSnapshot> {
        self.snapshot.as_ref()
    }

    /// Attach fresh payroll facts, adopting the saved election as the
    /// candidate and the account holder's age as the session age.
    pub fn attach_snapshot(&mut self, snapshot: YtdSnapshot) {
        self.candidate = snapshot.current_settings;
        self.age = clamp_age(snapshot.age);
        self.snapshot = Some(snapshot);
        self.revision += 1;
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.candidate.rate = calculator::clamp_rate(self.candidate.kind, rate, self.snapshot());
        self.revision += 1;
    }

    /// Switching type resets the rate to the type's default rather than
    /// carrying a percentage over as dollars or vice versa.
    pub fn set_kind(&mut self, kind: ContributionType) {
        if self.candidate.kind != kind {
            self.candidate = ContributionSetting::new(kind, kind.default_rate());
        }
        self.revision += 1;
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = clamp_age(age);
        self.revision += 1;
    }

    /// The explicit recompute entry point: run after any change to rate,
    /// kind, age or snapshot. Refuses to project until a snapshot exists.
    pub fn recompute(&self) -> Result<RecomputeOutput, EngineError> {
        let snapshot = self.snapshot.as_ref().ok_or(EngineError::MissingSnapshot)?;
        let saved = snapshot.current_settings;
        Ok(RecomputeOutput {
            revision: self.revision,
            preview: calculator::amounts(self.candidate, snapshot),
            current: current_impact(saved, snapshot, self.age, self.assumptions),
            incremental: incremental_impact(
                saved.rate,
                self.candidate.rate,
                self.candidate.kind,
                snapshot,
                self.age,
                self.assumptions,
            ),
        })
    }
}
