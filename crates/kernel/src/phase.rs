use std::fmt;

use equilibria_phases::{BridgeModel, BridgeOutcome, FreeBodyModel, QuizModel, SeesawModel};
use equilibria_physics::Reactions;
use serde::{Deserialize, Serialize};

/// Which screen of the mission is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Intro,
    Phase1,
    Phase1End,
    Phase2,
    Phase2End,
    Phase3,
    Phase3End,
    Phase4,
    EndSuccess,
    EndFailure,
}

impl Phase {
    pub const ALL: [Phase; 10] = [
        Phase::Intro,
        Phase::Phase1,
        Phase::Phase1End,
        Phase::Phase2,
        Phase::Phase2End,
        Phase::Phase3,
        Phase::Phase3End,
        Phase::Phase4,
        Phase::EndSuccess,
        Phase::EndFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Phase1 => "phase1",
            Phase::Phase1End => "phase1_end",
            Phase::Phase2 => "phase2",
            Phase::Phase2End => "phase2_end",
            Phase::Phase3 => "phase3",
            Phase::Phase3End => "phase3_end",
            Phase::Phase4 => "phase4",
            Phase::EndSuccess => "end_success",
            Phase::EndFailure => "end_failure",
        }
    }

    /// Narrative screens left with `advance`.
    pub fn is_screen(&self) -> bool {
        matches!(
            self,
            Phase::Intro | Phase::Phase1End | Phase::Phase2End | Phase::Phase3End
        )
    }

    /// End states, left only with `restart`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::EndSuccess | Phase::EndFailure)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The final bridge submission, kept on the end screens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeReport {
    pub submitted: Reactions,
    pub outcome: BridgeOutcome,
}

/// The active phase together with the state it owns.
///
/// One payload per phase, so a stage can never hold the wrong model and no
/// phase value outside the mission exists.
#[derive(Debug, Clone)]
pub enum Stage {
    Intro,
    Seesaw(SeesawModel),
    SeesawDebrief,
    FreeBody(FreeBodyModel),
    FreeBodyDebrief,
    Quiz(QuizModel),
    QuizDebrief,
    Bridge(BridgeModel),
    Success(BridgeReport),
    Failure(BridgeReport),
}

impl Stage {
    pub fn phase(&self) -> Phase {
        match self {
            Stage::Intro => Phase::Intro,
            Stage::Seesaw(_) => Phase::Phase1,
            Stage::SeesawDebrief => Phase::Phase1End,
            Stage::FreeBody(_) => Phase::Phase2,
            Stage::FreeBodyDebrief => Phase::Phase2End,
            Stage::Quiz(_) => Phase::Phase3,
            Stage::QuizDebrief => Phase::Phase3End,
            Stage::Bridge(_) => Phase::Phase4,
            Stage::Success(_) => Phase::EndSuccess,
            Stage::Failure(_) => Phase::EndFailure,
        }
    }
}
