use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of the seesaw ruler in centimeters.
pub const RULER_LENGTH_CM: u8 = 30;
/// Ruler tick where the fulcrum sits (its midpoint).
pub const FULCRUM_TICK_CM: u8 = 15;

/// Unique identifier for a coin on the seesaw.
///
/// Allocated from a per-model counter, so ids are never reused within a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinId(pub u32);

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit weight resting on the ruler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    /// Signed distance from the fulcrum in centimeters, in [-15, 15].
    pub position: f64,
}

impl Coin {
    /// Build a coin from a ruler tick (0..=30). The caller checks the range.
    pub fn at_tick(id: CoinId, tick: u8) -> Self {
        Self {
            id,
            position: f64::from(tick) - f64::from(FULCRUM_TICK_CM),
        }
    }
}

/// The three force arrows of the free-body diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceId {
    Weight1,
    Weight2,
    Reaction,
}

impl ForceId {
    /// Tray order, as the arrows are offered to the player.
    pub const ALL: [ForceId; 3] = [ForceId::Weight1, ForceId::Reaction, ForceId::Weight2];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForceId::Weight1 => "weight1",
            ForceId::Weight2 => "weight2",
            ForceId::Reaction => "reaction",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weight1" | "w1" => Some(ForceId::Weight1),
            "weight2" | "w2" => Some(ForceId::Weight2),
            "reaction" | "r" => Some(ForceId::Reaction),
            _ => None,
        }
    }

    /// Whether the arrow points up (support) rather than down (load).
    pub fn points_up(&self) -> bool {
        matches!(self, ForceId::Reaction)
    }
}

impl fmt::Display for ForceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drop zones on the free-body diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    Pos1,
    Pos2,
    Fulcrum,
}

impl DropTarget {
    /// Left to right, as laid out on the diagram.
    pub const ALL: [DropTarget; 3] = [DropTarget::Pos1, DropTarget::Fulcrum, DropTarget::Pos2];

    pub fn as_str(&self) -> &'static str {
        match self {
            DropTarget::Pos1 => "pos1",
            DropTarget::Pos2 => "pos2",
            DropTarget::Fulcrum => "fulcrum",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pos1" | "p1" => Some(DropTarget::Pos1),
            "pos2" | "p2" => Some(DropTarget::Pos2),
            "fulcrum" | "f" => Some(DropTarget::Fulcrum),
            _ => None,
        }
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engineering team number shown in the narrative. Always in [100, 999].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct TeamNumber(u16);

impl TeamNumber {
    pub const MIN: u16 = 100;
    pub const MAX: u16 = 999;
    /// The lowest team number.
    pub const FIRST: TeamNumber = TeamNumber(Self::MIN);

    pub fn new(value: u16) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for TeamNumber {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("team number {value} outside 100..=999"))
    }
}

impl From<TeamNumber> for u16 {
    fn from(team: TeamNumber) -> Self {
        team.0
    }
}

impl fmt::Display for TeamNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_position_is_relative_to_fulcrum() {
        assert_eq!(Coin::at_tick(CoinId(1), 0).position, -15.0);
        assert_eq!(Coin::at_tick(CoinId(2), 15).position, 0.0);
        assert_eq!(Coin::at_tick(CoinId(3), 30).position, 15.0);
    }

    #[test]
    fn team_number_range() {
        assert!(TeamNumber::new(99).is_none());
        assert!(TeamNumber::new(1000).is_none());
        assert_eq!(TeamNumber::new(100).unwrap().get(), 100);
        assert_eq!(TeamNumber::new(999).unwrap().get(), 999);
        assert_eq!(TeamNumber::FIRST.get(), TeamNumber::MIN);
    }

    #[test]
    fn force_and_target_names_roundtrip() {
        for force in ForceId::ALL {
            assert_eq!(ForceId::from_name(force.as_str()), Some(force));
        }
        for target in DropTarget::ALL {
            assert_eq!(DropTarget::from_name(target.as_str()), Some(target));
        }
        assert_eq!(ForceId::from_name("WEIGHT1"), Some(ForceId::Weight1));
        assert!(DropTarget::from_name("pos3").is_none());
    }

    #[test]
    fn only_reaction_points_up() {
        assert!(ForceId::Reaction.points_up());
        assert!(!ForceId::Weight1.points_up());
        assert!(!ForceId::Weight2.points_up());
    }
}
