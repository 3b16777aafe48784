use serde::{Deserialize, Serialize};

use crate::within_tolerance;

/// A simply supported beam carrying one point load.
///
/// Pillar A sits at x = 0 and pillar B at x = `length_m`; the load rests at
/// `load_distance_m` from A.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeScenario {
    pub load_mass_kg: f64,
    pub gravity: f64,
    pub length_m: f64,
    pub load_distance_m: f64,
}

impl Default for BridgeScenario {
    fn default() -> Self {
        Self {
            load_mass_kg: 100.0,
            gravity: 9.8,
            length_m: 10.0,
            load_distance_m: 2.0,
        }
    }
}

/// Support forces at the two pillars, in newtons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    pub fa: f64,
    pub fb: f64,
}

impl BridgeScenario {
    /// Weight of the load in newtons.
    pub fn weight_n(&self) -> f64 {
        self.load_mass_kg * self.gravity
    }

    /// Στ_A = 0 gives `Fb = W·d / L`; ΣF = 0 gives `Fa = W − Fb`.
    pub fn reactions(&self) -> Reactions {
        let weight = self.weight_n();
        let fb = weight * self.load_distance_m / self.length_m;
        Reactions {
            fa: weight - fb,
            fb,
        }
    }

    /// Check a pair of submitted reactions, each independently within `tol`.
    pub fn check(&self, submitted: Reactions, tol: f64) -> (bool, bool) {
        let expected = self.reactions();
        (
            within_tolerance(submitted.fa, expected.fa, tol),
            within_tolerance(submitted.fb, expected.fb, tol),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scenario_reactions() {
        let scenario = BridgeScenario::default();
        let r = scenario.reactions();
        assert!((scenario.weight_n() - 980.0).abs() < 1e-9);
        assert!((r.fb - 196.0).abs() < 1e-9);
        assert!((r.fa - 784.0).abs() < 1e-9);
    }

    #[test]
    fn reactions_sum_to_weight() {
        let scenario = BridgeScenario {
            load_mass_kg: 75.0,
            gravity: 9.8,
            length_m: 12.0,
            load_distance_m: 9.0,
        };
        let r = scenario.reactions();
        assert!((r.fa + r.fb - scenario.weight_n()).abs() < 1e-9);
        // Load closer to B puts more on B.
        assert!(r.fb > r.fa);
    }

    #[test]
    fn check_reports_each_pillar() {
        let scenario = BridgeScenario::default();
        assert_eq!(scenario.check(Reactions { fa: 784.0, fb: 196.0 }, 1.0), (true, true));
        assert_eq!(scenario.check(Reactions { fa: 784.9, fb: 196.4 }, 1.0), (true, true));
        assert_eq!(scenario.check(Reactions { fa: 784.0, fb: 198.0 }, 1.0), (true, false));
        assert_eq!(scenario.check(Reactions { fa: 196.0, fb: 784.0 }, 1.0), (false, false));
    }
}
