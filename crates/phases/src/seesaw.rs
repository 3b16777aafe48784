use equilibria_common::{Coin, CoinId, RULER_LENGTH_CM};
use equilibria_physics::{is_balanced, net_torque};

/// Beam rotation is clamped to this many degrees either way.
pub const MAX_TILT_DEGREES: f64 = 20.0;

/// Errors from seesaw actions.
#[derive(Debug, thiserror::Error)]
pub enum SeesawError {
    #[error("tick {tick} is off the ruler (0..={max})", max = RULER_LENGTH_CM)]
    OffRuler { tick: u8 },
}

/// Why a balance check failed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceHint {
    /// Fewer than two coins: nothing to balance yet.
    NeedMoreCoins { coins: usize },
    /// Enough coins, but the torques do not cancel.
    Tilted { net_torque: f64 },
}

/// Result of `check_balance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceOutcome {
    /// The beam is balanced. `newly_completed` is true only the first time.
    Balanced { newly_completed: bool },
    Unbalanced(BalanceHint),
}

/// Phase 1: coins on a 30 cm ruler balanced over its midpoint.
#[derive(Debug, Clone)]
pub struct SeesawModel {
    coins: Vec<Coin>,
    next_id: u32,
    completed: bool,
}

impl Default for SeesawModel {
    fn default() -> Self {
        Self {
            coins: Vec::new(),
            next_id: 1,
            completed: false,
        }
    }
}

impl SeesawModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to an empty ruler with ids starting over.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drop a coin on ruler tick `tick` (0..=30). Returns the new coin's id.
    pub fn place_coin(&mut self, tick: u8) -> Result<CoinId, SeesawError> {
        if tick > RULER_LENGTH_CM {
            return Err(SeesawError::OffRuler { tick });
        }
        let id = CoinId(self.next_id);
        self.next_id += 1;
        let coin = Coin::at_tick(id, tick);
        tracing::debug!(%id, position = coin.position, "coin placed");
        self.coins.push(coin);
        Ok(id)
    }

    /// Remove a coin by id. Unknown ids are ignored; returns whether one was removed.
    pub fn remove_coin(&mut self, id: CoinId) -> bool {
        let before = self.coins.len();
        self.coins.retain(|c| c.id != id);
        let removed = self.coins.len() != before;
        if removed {
            tracing::debug!(%id, "coin removed");
        }
        removed
    }

    /// Take every coin off the ruler. Ids keep counting up.
    pub fn clear_coins(&mut self) {
        self.coins.clear();
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn net_torque(&self) -> f64 {
        net_torque(&self.coins)
    }

    /// Beam rotation shown while coins are placed: two degrees per unit torque.
    pub fn tilt_degrees(&self) -> f64 {
        (self.net_torque() * 2.0).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES)
    }

    /// Evaluate the beam. Failing checks leave the coins untouched.
    pub fn check_balance(&mut self) -> BalanceOutcome {
        if self.completed {
            return BalanceOutcome::Balanced {
                newly_completed: false,
            };
        }
        if is_balanced(&self.coins) {
            self.completed = true;
            tracing::debug!(coins = self.coins.len(), "seesaw balanced");
            return BalanceOutcome::Balanced {
                newly_completed: true,
            };
        }
        let hint = if self.coins.len() < 2 {
            BalanceHint::NeedMoreCoins {
                coins: self.coins.len(),
            }
        } else {
            BalanceHint::Tilted {
                net_torque: self.net_torque(),
            }
        };
        BalanceOutcome::Unbalanced(hint)
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_map_to_signed_positions() {
        let mut m = SeesawModel::new();
        m.place_coin(10).unwrap();
        m.place_coin(20).unwrap();
        let positions: Vec<f64> = m.coins().iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![-5.0, 5.0]);
    }

    #[test]
    fn ids_increase_monotonically() {
        let mut m = SeesawModel::new();
        let a = m.place_coin(0).unwrap();
        let b = m.place_coin(0).unwrap();
        m.remove_coin(b);
        m.clear_coins();
        let c = m.place_coin(0).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn off_ruler_tick_is_rejected() {
        let mut m = SeesawModel::new();
        assert!(matches!(m.place_coin(31), Err(SeesawError::OffRuler { tick: 31 })));
        assert!(m.coins().is_empty());
        assert!(m.place_coin(30).is_ok());
    }

    #[test]
    fn removing_unknown_id_is_noop() {
        let mut m = SeesawModel::new();
        m.place_coin(3).unwrap();
        let before = m.coins().to_vec();
        assert!(!m.remove_coin(CoinId(99)));
        assert_eq!(m.coins(), before.as_slice());
    }

    #[test]
    fn unbalanced_check_leaves_state_alone() {
        let mut m = SeesawModel::new();
        m.place_coin(20).unwrap();
        assert_eq!(
            m.check_balance(),
            BalanceOutcome::Unbalanced(BalanceHint::NeedMoreCoins { coins: 1 })
        );
        m.place_coin(18).unwrap();
        assert_eq!(
            m.check_balance(),
            BalanceOutcome::Unbalanced(BalanceHint::Tilted { net_torque: 8.0 })
        );
        assert_eq!(m.coins().len(), 2);
        assert!(!m.is_complete());
    }

    #[test]
    fn single_coin_on_fulcrum_is_not_balance() {
        let mut m = SeesawModel::new();
        m.place_coin(15).unwrap();
        assert!(matches!(m.check_balance(), BalanceOutcome::Unbalanced(_)));
    }

    #[test]
    fn completion_signalled_once() {
        let mut m = SeesawModel::new();
        // Three coins at -5 balanced by one at +15.
        for _ in 0..3 {
            m.place_coin(10).unwrap();
        }
        m.place_coin(30).unwrap();
        assert_eq!(
            m.check_balance(),
            BalanceOutcome::Balanced {
                newly_completed: true
            }
        );
        assert_eq!(
            m.check_balance(),
            BalanceOutcome::Balanced {
                newly_completed: false
            }
        );
        assert!(m.is_complete());
    }

    #[test]
    fn tilt_is_clamped() {
        let mut m = SeesawModel::new();
        m.place_coin(16).unwrap();
        assert_eq!(m.tilt_degrees(), 2.0);
        m.place_coin(30).unwrap();
        assert_eq!(m.tilt_degrees(), MAX_TILT_DEGREES);
        m.clear_coins();
        m.place_coin(0).unwrap();
        assert_eq!(m.tilt_degrees(), -MAX_TILT_DEGREES);
    }

    #[test]
    fn reset_clears_everything() {
        let mut m = SeesawModel::new();
        m.place_coin(5).unwrap();
        m.place_coin(25).unwrap();
        m.check_balance();
        m.reset();
        assert!(m.coins().is_empty());
        assert!(!m.is_complete());
        assert_eq!(m.place_coin(0).unwrap(), CoinId(1));
    }
}
