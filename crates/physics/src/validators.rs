use equilibria_common::{Coin, DropTarget, ForceId};

/// Net torque about the fulcrum, each coin a unit force at its signed distance.
pub fn net_torque(coins: &[Coin]) -> f64 {
    coins.iter().map(|c| c.position).sum()
}

/// Zero net torque with at least two coins on the beam.
pub fn is_balanced(coins: &[Coin]) -> bool {
    coins.len() > 1 && net_torque(coins) == 0.0
}

/// Strict comparison: `|actual - expected| < tol`.
pub fn within_tolerance(actual: f64, expected: f64, tol: f64) -> bool {
    (actual - expected).abs() < tol
}

/// The single drop target each force belongs to.
pub fn correct_target(force: ForceId) -> DropTarget {
    match force {
        ForceId::Weight1 => DropTarget::Pos1,
        ForceId::Weight2 => DropTarget::Pos2,
        ForceId::Reaction => DropTarget::Fulcrum,
    }
}

/// Whether `target` is where `force` acts. `None` (unplaced) is never correct.
pub fn is_force_correctly_placed(force: ForceId, target: Option<DropTarget>) -> bool {
    target == Some(correct_target(force))
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilibria_common::CoinId;
    use proptest::prelude::*;

    fn coins(positions: &[f64]) -> Vec<Coin> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Coin {
                id: CoinId(i as u32 + 1),
                position,
            })
            .collect()
    }

    #[test]
    fn net_torque_is_sum_of_positions() {
        assert_eq!(net_torque(&[]), 0.0);
        assert_eq!(net_torque(&coins(&[-5.0, -5.0, -5.0, 15.0])), 0.0);
        assert_eq!(net_torque(&coins(&[8.0, -4.0])), 4.0);
    }

    #[test]
    fn empty_and_single_coin_are_not_balanced() {
        assert!(!is_balanced(&[]));
        assert!(!is_balanced(&coins(&[0.0])));
    }

    #[test]
    fn opposite_coins_balance() {
        assert!(is_balanced(&coins(&[5.0, -5.0])));
        assert!(is_balanced(&coins(&[0.0, 0.0])));
        assert!(!is_balanced(&coins(&[5.0, -4.0])));
    }

    #[test]
    fn tolerance_is_strict() {
        assert!(within_tolerance(784.9, 784.0, 1.0));
        assert!(within_tolerance(783.1, 784.0, 1.0));
        assert!(!within_tolerance(198.0, 196.0, 1.0));
        assert!(!within_tolerance(197.0, 196.0, 1.0));
    }

    #[test]
    fn each_force_has_one_correct_target() {
        for force in ForceId::ALL {
            let hits = DropTarget::ALL
                .iter()
                .filter(|&&t| is_force_correctly_placed(force, Some(t)))
                .count();
            assert_eq!(hits, 1, "{force}");
            assert!(!is_force_correctly_placed(force, None));
        }
        assert!(is_force_correctly_placed(ForceId::Reaction, Some(DropTarget::Fulcrum)));
        assert!(!is_force_correctly_placed(ForceId::Weight1, Some(DropTarget::Pos2)));
    }

    /// Ticks, the coins placed on them in order, and the same coins shuffled.
    fn placements() -> impl Strategy<Value = (Vec<u8>, Vec<Coin>, Vec<Coin>)> {
        prop::collection::vec(0u8..=30, 0..12).prop_flat_map(|ticks| {
            let placed: Vec<Coin> = ticks
                .iter()
                .enumerate()
                .map(|(i, &t)| Coin::at_tick(CoinId(i as u32), t))
                .collect();
            (Just(ticks), Just(placed.clone()), Just(placed).prop_shuffle())
        })
    }

    proptest! {
        #[test]
        fn net_torque_ignores_order((ticks, placed, shuffled) in placements()) {
            prop_assert_eq!(net_torque(&placed), net_torque(&shuffled));
            let expected: f64 = ticks.iter().map(|&t| f64::from(t) - 15.0).sum();
            prop_assert_eq!(net_torque(&placed), expected);
        }

        #[test]
        fn removing_a_coin_subtracts_its_position(ticks in prop::collection::vec(0u8..=30, 1..12), pick in any::<prop::sample::Index>()) {
            let all: Vec<Coin> = ticks
                .iter()
                .enumerate()
                .map(|(i, &t)| Coin::at_tick(CoinId(i as u32), t))
                .collect();
            let idx = pick.index(all.len());
            let removed = all[idx];
            let rest: Vec<Coin> = all.iter().copied().filter(|c| c.id != removed.id).collect();
            prop_assert_eq!(net_torque(&rest), net_torque(&all) - removed.position);
        }
    }
}
