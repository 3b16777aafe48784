use std::collections::BTreeMap;
use std::time::Duration;

use equilibria_common::{DropTarget, ForceId};
use equilibria_physics::is_force_correctly_placed;

use crate::Deferred;

/// Transient per-target feedback after a drop.
///
/// `serial` increases with every drop so the presentation can tell a repeated
/// message from a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropFeedback {
    pub force: ForceId,
    pub target: DropTarget,
    pub correct: bool,
    pub serial: u64,
}

/// Result of `drop_force`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The force now sits on its target. `completes` is true on the drop that
    /// finishes the diagram.
    Committed { completes: bool },
    /// Wrong target; placements are unchanged.
    Rejected,
}

/// Phase 2: build the free-body diagram of the seesaw.
#[derive(Debug, Clone)]
pub struct FreeBodyModel {
    placements: BTreeMap<ForceId, DropTarget>,
    feedback: Option<DropFeedback>,
    serial: u64,
    clear: Deferred<u64>,
    feedback_for: Duration,
}

impl FreeBodyModel {
    /// `feedback_for` is how long drop feedback stays visible.
    pub fn new(feedback_for: Duration) -> Self {
        Self {
            placements: BTreeMap::new(),
            feedback: None,
            serial: 0,
            clear: Deferred::new(),
            feedback_for,
        }
    }

    pub fn reset(&mut self) {
        self.placements.clear();
        self.feedback = None;
        self.clear.cancel();
    }

    /// Drop `force` on `target` at mission time `now`.
    pub fn drop_force(&mut self, force: ForceId, target: DropTarget, now: Duration) -> DropOutcome {
        let correct = is_force_correctly_placed(force, Some(target));
        self.serial += 1;
        self.feedback = Some(DropFeedback {
            force,
            target,
            correct,
            serial: self.serial,
        });
        self.clear.schedule(now, self.feedback_for, self.serial);

        if !correct {
            tracing::debug!(%force, %target, "drop rejected");
            return DropOutcome::Rejected;
        }
        let was_complete = self.is_complete();
        self.placements.insert(force, target);
        tracing::debug!(%force, %target, "force committed");
        DropOutcome::Committed {
            completes: !was_complete && self.is_complete(),
        }
    }

    /// Clear feedback whose display time has run out. Returns true if it cleared.
    pub fn fire_due(&mut self, now: Duration) -> bool {
        match self.clear.fire(now) {
            Some(serial) if self.feedback.is_some_and(|f| f.serial == serial) => {
                self.feedback = None;
                true
            }
            _ => false,
        }
    }

    pub fn placement(&self, force: ForceId) -> Option<DropTarget> {
        self.placements.get(&force).copied()
    }

    /// Forces still waiting in the tray, in tray order.
    pub fn unplaced(&self) -> Vec<ForceId> {
        ForceId::ALL
            .into_iter()
            .filter(|f| !self.placements.contains_key(f))
            .collect()
    }

    pub fn feedback(&self) -> Option<DropFeedback> {
        self.feedback
    }

    pub fn feedback_pending(&self) -> bool {
        self.clear.is_pending()
    }

    /// Every force placed, each on its own target.
    pub fn is_complete(&self) -> bool {
        ForceId::ALL
            .iter()
            .all(|&f| is_force_correctly_placed(f, self.placement(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn model() -> FreeBodyModel {
        FreeBodyModel::new(ms(1500))
    }

    #[test]
    fn wrong_drop_is_rejected_without_mutation() {
        let mut m = model();
        assert_eq!(m.drop_force(ForceId::Weight1, DropTarget::Fulcrum, ms(0)), DropOutcome::Rejected);
        assert_eq!(m.placement(ForceId::Weight1), None);
        assert_eq!(m.unplaced().len(), 3);
        let fb = m.feedback().unwrap();
        assert!(!fb.correct);
        assert_eq!(fb.target, DropTarget::Fulcrum);
    }

    #[test]
    fn completes_only_when_all_three_placed() {
        let mut m = model();
        assert_eq!(
            m.drop_force(ForceId::Weight1, DropTarget::Pos1, ms(0)),
            DropOutcome::Committed { completes: false }
        );
        assert_eq!(
            m.drop_force(ForceId::Reaction, DropTarget::Fulcrum, ms(10)),
            DropOutcome::Committed { completes: false }
        );
        assert!(!m.is_complete());
        m.drop_force(ForceId::Weight2, DropTarget::Pos1, ms(20));
        assert!(!m.is_complete());
        assert_eq!(
            m.drop_force(ForceId::Weight2, DropTarget::Pos2, ms(30)),
            DropOutcome::Committed { completes: true }
        );
        assert!(m.is_complete());
        assert!(m.unplaced().is_empty());
    }

    #[test]
    fn repeated_correct_drop_is_idempotent() {
        let mut m = model();
        m.drop_force(ForceId::Reaction, DropTarget::Fulcrum, ms(0));
        m.drop_force(ForceId::Reaction, DropTarget::Fulcrum, ms(5));
        assert_eq!(m.placement(ForceId::Reaction), Some(DropTarget::Fulcrum));
        assert_eq!(m.unplaced(), vec![ForceId::Weight1, ForceId::Weight2]);
    }

    #[test]
    fn completion_reported_once() {
        let mut m = model();
        m.drop_force(ForceId::Weight1, DropTarget::Pos1, ms(0));
        m.drop_force(ForceId::Weight2, DropTarget::Pos2, ms(0));
        m.drop_force(ForceId::Reaction, DropTarget::Fulcrum, ms(0));
        assert_eq!(
            m.drop_force(ForceId::Reaction, DropTarget::Fulcrum, ms(0)),
            DropOutcome::Committed { completes: false }
        );
    }

    #[test]
    fn feedback_clears_after_delay() {
        let mut m = model();
        m.drop_force(ForceId::Weight1, DropTarget::Pos1, ms(100));
        assert!(!m.fire_due(ms(1599)));
        assert!(m.feedback().is_some());
        assert!(m.fire_due(ms(1600)));
        assert!(m.feedback().is_none());
    }

    #[test]
    fn newer_drop_supersedes_pending_clear() {
        let mut m = model();
        m.drop_force(ForceId::Weight1, DropTarget::Pos2, ms(0));
        m.drop_force(ForceId::Weight2, DropTarget::Pos2, ms(1000));
        // The first drop's clear would have fired at 1500.
        assert!(!m.fire_due(ms(1500)));
        let fb = m.feedback().unwrap();
        assert_eq!(fb.force, ForceId::Weight2);
        assert!(fb.correct);
        assert_eq!(fb.serial, 2);
        assert!(m.fire_due(ms(2500)));
    }

    #[test]
    fn reset_discards_placements_and_timer() {
        let mut m = model();
        m.drop_force(ForceId::Weight1, DropTarget::Pos1, ms(0));
        m.reset();
        assert_eq!(m.unplaced().len(), 3);
        assert!(m.feedback().is_none());
        assert!(!m.feedback_pending());
    }
}
