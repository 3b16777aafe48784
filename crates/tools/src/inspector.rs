use std::fmt;
use std::time::Duration;

use equilibria_common::{Coin, CoinId, ForceId, TeamNumber};
use equilibria_kernel::{Mission, Phase, Stage};

/// Mission inspector for developer tooling.
///
/// Read-only queries against mission state for debugging and the CLI
/// `status` command.
pub struct MissionInspector;

impl MissionInspector {
    pub fn summary(mission: &Mission) -> MissionSummary {
        MissionSummary {
            phase: mission.phase(),
            team: mission.team(),
            seed: mission.session().seed(),
            generation: mission.session().generation(),
            clock: mission.clock(),
            pending_events: mission.events().len(),
            progress: Self::progress(mission),
        }
    }

    pub fn progress(mission: &Mission) -> Progress {
        match mission.stage() {
            Stage::Intro | Stage::SeesawDebrief | Stage::FreeBodyDebrief | Stage::QuizDebrief => {
                Progress::Screen
            }
            Stage::Seesaw(m) => Progress::Seesaw {
                coins: m.coins().len(),
                net_torque: m.net_torque(),
            },
            Stage::FreeBody(m) => Progress::FreeBody {
                placed: ForceId::ALL.len() - m.unplaced().len(),
                total: ForceId::ALL.len(),
                feedback_pending: m.feedback_pending(),
            },
            Stage::Quiz(m) => {
                let (solved, total) = m.progress();
                Progress::Quiz {
                    solved,
                    total,
                    advancing: m.advance_pending(),
                }
            }
            Stage::Bridge(m) => Progress::Bridge {
                attempted: m.last_submission().is_some(),
            },
            Stage::Success(_) => Progress::Ended { success: true },
            Stage::Failure(_) => Progress::Ended { success: false },
        }
    }

    /// A coin on the seesaw, if Phase1 is active and the coin exists.
    pub fn inspect_coin(mission: &Mission, id: CoinId) -> Option<Coin> {
        mission
            .seesaw()
            .and_then(|m| m.coins().iter().find(|c| c.id == id).copied())
    }

    /// Ids of all coins on the seesaw, in placement order.
    pub fn list_coins(mission: &Mission) -> Vec<CoinId> {
        mission
            .seesaw()
            .map(|m| m.coins().iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }
}

/// Per-phase progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Screen,
    Seesaw { coins: usize, net_torque: f64 },
    /// `feedback_pending` while a drop message waits to clear.
    FreeBody {
        placed: usize,
        total: usize,
        feedback_pending: bool,
    },
    /// `advancing` while a solved puzzle waits for the next one.
    Quiz {
        solved: usize,
        total: usize,
        advancing: bool,
    },
    Bridge { attempted: bool },
    Ended { success: bool },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Screen => write!(f, "screen"),
            Progress::Seesaw { coins, net_torque } => {
                write!(f, "coins={coins} net_torque={net_torque}")
            }
            Progress::FreeBody {
                placed,
                total,
                feedback_pending,
            } => write!(f, "forces={placed}/{total} feedback_pending={feedback_pending}"),
            Progress::Quiz {
                solved,
                total,
                advancing,
            } => write!(f, "puzzles={solved}/{total} advancing={advancing}"),
            Progress::Bridge { attempted } => write!(f, "attempted={attempted}"),
            Progress::Ended { success } => write!(f, "success={success}"),
        }
    }
}

/// Summary of mission state for the inspector.
#[derive(Debug, Clone)]
pub struct MissionSummary {
    pub phase: Phase,
    pub team: TeamNumber,
    pub seed: u64,
    pub generation: u32,
    pub clock: Duration,
    pub pending_events: usize,
    pub progress: Progress,
}

impl fmt::Display for MissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mission: phase={} team={} seed={} generation={} clock={}ms pending_events={} {}",
            self.phase,
            self.team,
            self.seed,
            self.generation,
            self.clock.as_millis(),
            self.pending_events,
            self.progress
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equilibria_input::Action;
    use equilibria_kernel::MissionConfig;

    fn mission_after(lines: &[&str]) -> Mission {
        let mut m = Mission::with_seed(5, MissionConfig::default());
        for line in lines {
            m.apply(&Action::parse_command(line).unwrap()).unwrap();
        }
        m
    }

    #[test]
    fn summary_fresh_mission() {
        let m = mission_after(&[]);
        let summary = MissionInspector::summary(&m);
        assert_eq!(summary.phase, Phase::Intro);
        assert_eq!(summary.seed, 5);
        assert_eq!(summary.generation, 1);
        assert_eq!(summary.pending_events, 1);
        assert_eq!(summary.progress, Progress::Screen);
    }

    #[test]
    fn seesaw_progress() {
        let m = mission_after(&["next", "place 0", "place 27"]);
        assert_eq!(
            MissionInspector::progress(&m),
            Progress::Seesaw {
                coins: 2,
                net_torque: -3.0
            }
        );
    }

    #[test]
    fn free_body_progress_counts_committed_forces() {
        let m = mission_after(&[
            "next", "place 10", "place 20", "check", "next", "drop w1 pos1", "drop w2 pos1",
        ]);
        assert_eq!(
            MissionInspector::progress(&m),
            Progress::FreeBody {
                placed: 1,
                total: 3,
                feedback_pending: true,
            }
        );
    }

    #[test]
    fn quiz_progress_reports_pending_advance() {
        let mut m = mission_after(&[
            "next", "place 10", "place 20", "check", "next", "drop w1 pos1", "drop w2 pos2",
            "drop r fulcrum", "next", "answer 15",
        ]);
        assert_eq!(
            MissionInspector::progress(&m),
            Progress::Quiz {
                solved: 1,
                total: 3,
                advancing: true,
            }
        );
        m.update(Duration::from_secs(2));
        let s = MissionInspector::summary(&m).to_string();
        assert!(s.contains("puzzles=1/3 advancing=false"));
    }

    #[test]
    fn inspect_coin_found_and_missing() {
        let m = mission_after(&["next", "place 20"]);
        let coin = MissionInspector::inspect_coin(&m, CoinId(1)).unwrap();
        assert_eq!(coin.position, 5.0);
        assert!(MissionInspector::inspect_coin(&m, CoinId(9)).is_none());
    }

    #[test]
    fn list_coins_outside_phase1_is_empty() {
        assert!(MissionInspector::list_coins(&mission_after(&[])).is_empty());
        let m = mission_after(&["next", "place 1", "place 2"]);
        assert_eq!(MissionInspector::list_coins(&m), vec![CoinId(1), CoinId(2)]);
    }

    #[test]
    fn summary_display() {
        let m = mission_after(&["next"]);
        let s = MissionInspector::summary(&m).to_string();
        assert!(s.contains("phase=phase1"));
        assert!(s.contains("coins=0"));
        assert!(s.contains(&format!("team={}", m.team())));
    }
}
