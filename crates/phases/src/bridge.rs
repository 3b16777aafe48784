use equilibria_physics::{BridgeScenario, Reactions};

/// Verdict on one pair of submitted reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeOutcome {
    pub fa_ok: bool,
    pub fb_ok: bool,
}

impl BridgeOutcome {
    pub fn success(&self) -> bool {
        self.fa_ok && self.fb_ok
    }
}

/// Phase 4: compute the support reactions of the bridge.
#[derive(Debug, Clone)]
pub struct BridgeModel {
    scenario: BridgeScenario,
    tolerance_n: f64,
    last: Option<(Reactions, BridgeOutcome)>,
}

impl BridgeModel {
    pub fn new(scenario: BridgeScenario, tolerance_n: f64) -> Self {
        Self {
            scenario,
            tolerance_n,
            last: None,
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Judge `submitted`; both pillars must be within tolerance.
    pub fn submit_reactions(&mut self, submitted: Reactions) -> BridgeOutcome {
        let (fa_ok, fb_ok) = self.scenario.check(submitted, self.tolerance_n);
        let outcome = BridgeOutcome { fa_ok, fb_ok };
        tracing::debug!(
            fa = submitted.fa,
            fb = submitted.fb,
            fa_ok,
            fb_ok,
            "reactions judged"
        );
        self.last = Some((submitted, outcome));
        outcome
    }

    pub fn scenario(&self) -> &BridgeScenario {
        &self.scenario
    }

    pub fn tolerance_n(&self) -> f64 {
        self.tolerance_n
    }

    pub fn last_submission(&self) -> Option<Reactions> {
        self.last.map(|(r, _)| r)
    }

    pub fn last_outcome(&self) -> Option<BridgeOutcome> {
        self.last.map(|(_, o)| o)
    }

    /// Any submission decides the phase; the outcome says which way.
    pub fn is_complete(&self) -> bool {
        self.last.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BridgeModel {
        BridgeModel::new(BridgeScenario::default(), 1.0)
    }

    #[test]
    fn exact_reactions_succeed() {
        let mut m = model();
        assert!(m.submit_reactions(Reactions { fa: 784.0, fb: 196.0 }).success());
        assert!(m.is_complete());
    }

    #[test]
    fn near_reactions_succeed() {
        let mut m = model();
        assert!(m.submit_reactions(Reactions { fa: 784.9, fb: 196.4 }).success());
    }

    #[test]
    fn off_by_two_fails_on_that_pillar() {
        let mut m = model();
        let outcome = m.submit_reactions(Reactions { fa: 784.0, fb: 198.0 });
        assert!(!outcome.success());
        assert!(outcome.fa_ok);
        assert!(!outcome.fb_ok);
    }

    #[test]
    fn swapped_pillars_fail() {
        let mut m = model();
        let outcome = m.submit_reactions(Reactions { fa: 196.0, fb: 784.0 });
        assert_eq!(
            outcome,
            BridgeOutcome {
                fa_ok: false,
                fb_ok: false
            }
        );
    }

    #[test]
    fn retry_overwrites_previous_submission() {
        let mut m = model();
        m.submit_reactions(Reactions { fa: 0.0, fb: 0.0 });
        m.submit_reactions(Reactions { fa: 784.0, fb: 196.0 });
        assert!(m.last_outcome().unwrap().success());
        assert_eq!(m.last_submission(), Some(Reactions { fa: 784.0, fb: 196.0 }));
        m.reset();
        assert!(!m.is_complete());
    }
}
