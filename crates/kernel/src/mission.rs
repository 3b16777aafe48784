use std::time::Duration;

use equilibria_common::{CoinId, DropTarget, ForceId, TeamNumber};
use equilibria_input::{Action, InputError, parse_quantity};
use equilibria_phases::{
    BalanceOutcome, BridgeModel, BridgeOutcome, DropOutcome, FreeBodyModel, QuizModel,
    QuizOutcome, SeesawError, SeesawModel,
};
use equilibria_physics::Reactions;
use serde::{Deserialize, Serialize};

use crate::config::MissionConfig;
use crate::phase::{BridgeReport, Phase, Stage};
use crate::session::SessionContext;

/// A record of one state change or rejected action.
///
/// The log is what a presentation layer animates from, and what the terminal
/// front-end prints as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MissionEvent {
    PhaseEntered { phase: Phase },
    CoinPlaced { id: CoinId, position: f64 },
    CoinRemoved { id: CoinId },
    CoinsCleared { count: usize },
    BalanceChecked { net_torque: f64, coins: usize, balanced: bool },
    ForceDropped { force: ForceId, target: DropTarget, accepted: bool },
    AnswerSubmitted { puzzle_id: u32, value: f64, correct: bool },
    PuzzleAdvanced { index: usize },
    FeedbackCleared { phase: Phase },
    ReactionsSubmitted { fa: f64, fb: f64, fa_ok: bool, fb_ok: bool },
    /// The bridge failed; presentations shake it for `pulse_ms`.
    StructuralFailure { pulse_ms: u64 },
    /// An action was refused before touching any phase state.
    ActionRejected { action: String, reason: String },
    Restarted { team: TeamNumber },
}

/// Errors from mission actions. None of them change mission state.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("{action} is not available during {phase}")]
    ActionNotAvailable { action: &'static str, phase: Phase },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Seesaw(#[from] SeesawError),
}

/// What an action did, for front-ends that go through [`Mission::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionOutcome {
    CoinPlaced(CoinId),
    CoinRemoved { removed: bool },
    CoinsCleared,
    Balance(BalanceOutcome),
    Drop(DropOutcome),
    Answer(QuizOutcome),
    Bridge(BridgeOutcome),
    Advanced { to: Phase },
    Restarted { team: TeamNumber },
}

/// The authoritative mission state and its phase sequencer.
///
/// `Intro → Phase1 → Phase1End → Phase2 → Phase2End → Phase3 → Phase3End →
/// Phase4 → EndSuccess | EndFailure`. Puzzle phases move on when their model
/// completes; narrative screens move on with `advance`; end states only
/// leave through `restart`.
///
/// Time is a logical clock advanced by [`Mission::update`]; the caller owns
/// wall time.
#[derive(Debug, Clone)]
pub struct Mission {
    config: MissionConfig,
    session: SessionContext,
    stage: Stage,
    clock: Duration,
    event_log: Vec<MissionEvent>,
}

impl Mission {
    /// A mission with a team number drawn from OS entropy.
    pub fn new(config: MissionConfig) -> Self {
        Self::from_session(config, SessionContext::from_entropy())
    }

    /// A mission whose team numbers are reproducible from `seed`.
    pub fn with_seed(seed: u64, config: MissionConfig) -> Self {
        Self::from_session(config, SessionContext::new(seed))
    }

    fn from_session(config: MissionConfig, session: SessionContext) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "mission built from a config that fails validation");
        }
        tracing::info!(team = %session.team(), "mission created");
        Self {
            config,
            session,
            stage: Stage::Intro,
            clock: Duration::ZERO,
            event_log: vec![MissionEvent::PhaseEntered {
                phase: Phase::Intro,
            }],
        }
    }

    /// Rebuild a mission by re-applying recorded actions to a fresh session.
    ///
    /// Rejected actions are rejected again and logged the same way.
    pub fn replay(seed: u64, config: MissionConfig, actions: &[Action]) -> Self {
        let mut mission = Self::with_seed(seed, config);
        for action in actions {
            if let Err(err) = mission.apply(action) {
                tracing::debug!(action = action.name(), %err, "replayed action rejected");
            }
        }
        mission
    }

    /// The active phase.
    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    /// The active phase together with the model it owns.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Session state that survives restarts.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Team number shown in the narrative.
    pub fn team(&self) -> TeamNumber {
        self.session.team()
    }

    /// Configuration the phase models are built from.
    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Current mission clock.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Events recorded since creation or the last drain.
    pub fn events(&self) -> &[MissionEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<MissionEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn seesaw(&self) -> Option<&SeesawModel> {
        match &self.stage {
            Stage::Seesaw(m) => Some(m),
            _ => None,
        }
    }

    pub fn free_body(&self) -> Option<&FreeBodyModel> {
        match &self.stage {
            Stage::FreeBody(m) => Some(m),
            _ => None,
        }
    }

    pub fn quiz(&self) -> Option<&QuizModel> {
        match &self.stage {
            Stage::Quiz(m) => Some(m),
            _ => None,
        }
    }

    pub fn bridge(&self) -> Option<&BridgeModel> {
        match &self.stage {
            Stage::Bridge(m) => Some(m),
            _ => None,
        }
    }

    /// Dispatch one front-end action.
    pub fn apply(&mut self, action: &Action) -> Result<ActionOutcome, MissionError> {
        match action {
            Action::PlaceCoin { tick } => self.place_coin(*tick).map(ActionOutcome::CoinPlaced),
            Action::RemoveCoin { id } => self
                .remove_coin(*id)
                .map(|removed| ActionOutcome::CoinRemoved { removed }),
            Action::ResetCoins => self.reset_coins().map(|()| ActionOutcome::CoinsCleared),
            Action::CheckBalance => self.check_balance().map(ActionOutcome::Balance),
            Action::DropForce { force, target } => {
                self.drop_force(*force, *target).map(ActionOutcome::Drop)
            }
            Action::SubmitAnswer { text } => self.submit_answer(text).map(ActionOutcome::Answer),
            Action::SubmitReactions { fa, fb } => {
                self.submit_reactions(fa, fb).map(ActionOutcome::Bridge)
            }
            Action::Advance => self.advance().map(|to| ActionOutcome::Advanced { to }),
            Action::Restart => self.restart().map(|team| ActionOutcome::Restarted { team }),
        }
    }

    pub fn place_coin(&mut self, tick: u8) -> Result<CoinId, MissionError> {
        let result = self.try_place_coin(tick);
        self.record("place_coin", result)
    }

    fn try_place_coin(&mut self, tick: u8) -> Result<CoinId, MissionError> {
        let model = self.seesaw_mut("place_coin")?;
        let id = model.place_coin(tick)?;
        let position = model
            .coins()
            .last()
            .map(|c| c.position)
            .unwrap_or_default();
        self.event_log
            .push(MissionEvent::CoinPlaced { id, position });
        Ok(id)
    }

    /// Remove a coin. Absent ids are not an error; the result says whether one went.
    pub fn remove_coin(&mut self, id: CoinId) -> Result<bool, MissionError> {
        let result = self
            .seesaw_mut("remove_coin")
            .map(|model| model.remove_coin(id));
        if let Ok(true) = result {
            self.event_log.push(MissionEvent::CoinRemoved { id });
        }
        self.record("remove_coin", result)
    }

    pub fn reset_coins(&mut self) -> Result<(), MissionError> {
        let result = self.seesaw_mut("reset_coins").map(|model| {
            let count = model.coins().len();
            model.clear_coins();
            count
        });
        if let Ok(count) = result {
            self.event_log.push(MissionEvent::CoinsCleared { count });
        }
        self.record("reset_coins", result.map(|_| ()))
    }

    pub fn check_balance(&mut self) -> Result<BalanceOutcome, MissionError> {
        let result = self.try_check_balance();
        self.record("check_balance", result)
    }

    fn try_check_balance(&mut self) -> Result<BalanceOutcome, MissionError> {
        let model = self.seesaw_mut("check_balance")?;
        let outcome = model.check_balance();
        let event = MissionEvent::BalanceChecked {
            net_torque: model.net_torque(),
            coins: model.coins().len(),
            balanced: matches!(outcome, BalanceOutcome::Balanced { .. }),
        };
        self.event_log.push(event);
        if let BalanceOutcome::Balanced {
            newly_completed: true,
        } = outcome
        {
            self.enter(Stage::SeesawDebrief);
        }
        Ok(outcome)
    }

    pub fn drop_force(
        &mut self,
        force: ForceId,
        target: DropTarget,
    ) -> Result<DropOutcome, MissionError> {
        let result = self.try_drop_force(force, target);
        self.record("drop_force", result)
    }

    fn try_drop_force(
        &mut self,
        force: ForceId,
        target: DropTarget,
    ) -> Result<DropOutcome, MissionError> {
        let phase = self.phase();
        let now = self.clock;
        let Stage::FreeBody(model) = &mut self.stage else {
            return Err(unavailable("drop_force", phase));
        };
        let outcome = model.drop_force(force, target, now);
        self.event_log.push(MissionEvent::ForceDropped {
            force,
            target,
            accepted: matches!(outcome, DropOutcome::Committed { .. }),
        });
        if let DropOutcome::Committed { completes: true } = outcome {
            self.enter(Stage::FreeBodyDebrief);
        }
        Ok(outcome)
    }

    /// Answer the current puzzle. `text` must parse as a number.
    pub fn submit_answer(&mut self, text: &str) -> Result<QuizOutcome, MissionError> {
        let result = self.try_submit_answer(text);
        self.record("submit_answer", result)
    }

    fn try_submit_answer(&mut self, text: &str) -> Result<QuizOutcome, MissionError> {
        let phase = self.phase();
        let now = self.clock;
        let Stage::Quiz(model) = &mut self.stage else {
            return Err(unavailable("submit_answer", phase));
        };
        let value = parse_quantity("answer", text)?;
        let index_before = model.index();
        let outcome = model.submit_answer(value, now);
        if model.index() != index_before {
            self.event_log.push(MissionEvent::PuzzleAdvanced {
                index: model.index(),
            });
        }
        match outcome {
            QuizOutcome::Correct {
                puzzle_id,
                completes,
            } => {
                self.event_log.push(MissionEvent::AnswerSubmitted {
                    puzzle_id,
                    value,
                    correct: true,
                });
                if completes {
                    self.enter(Stage::QuizDebrief);
                }
            }
            QuizOutcome::Incorrect { puzzle_id } => {
                self.event_log.push(MissionEvent::AnswerSubmitted {
                    puzzle_id,
                    value,
                    correct: false,
                });
            }
            QuizOutcome::AlreadyComplete => {}
        }
        Ok(outcome)
    }

    /// Submit both pillar reactions. Success ends the mission in
    /// `EndSuccess`; anything out of tolerance collapses it into `EndFailure`.
    pub fn submit_reactions(&mut self, fa: &str, fb: &str) -> Result<BridgeOutcome, MissionError> {
        let result = self.try_submit_reactions(fa, fb);
        self.record("submit_reactions", result)
    }

    fn try_submit_reactions(&mut self, fa: &str, fb: &str) -> Result<BridgeOutcome, MissionError> {
        let phase = self.phase();
        let Stage::Bridge(model) = &mut self.stage else {
            return Err(unavailable("submit_reactions", phase));
        };
        let submitted = Reactions {
            fa: parse_quantity("Fa", fa)?,
            fb: parse_quantity("Fb", fb)?,
        };
        let outcome = model.submit_reactions(submitted);
        self.event_log.push(MissionEvent::ReactionsSubmitted {
            fa: submitted.fa,
            fb: submitted.fb,
            fa_ok: outcome.fa_ok,
            fb_ok: outcome.fb_ok,
        });
        let report = BridgeReport { submitted, outcome };
        if outcome.success() {
            self.enter(Stage::Success(report));
        } else {
            self.event_log.push(MissionEvent::StructuralFailure {
                pulse_ms: self.config.timing.structural_pulse_ms,
            });
            self.enter(Stage::Failure(report));
        }
        Ok(outcome)
    }

    /// Leave an intro or debrief screen for the next puzzle phase.
    pub fn advance(&mut self) -> Result<Phase, MissionError> {
        let next = match self.stage {
            Stage::Intro => Ok(Stage::Seesaw(SeesawModel::new())),
            Stage::SeesawDebrief => Ok(Stage::FreeBody(self.config.free_body_model())),
            Stage::FreeBodyDebrief => Ok(Stage::Quiz(self.config.quiz_model())),
            Stage::QuizDebrief => Ok(Stage::Bridge(self.config.bridge_model())),
            Stage::Seesaw(_)
            | Stage::FreeBody(_)
            | Stage::Quiz(_)
            | Stage::Bridge(_)
            | Stage::Success(_)
            | Stage::Failure(_) => Err(unavailable("advance", self.phase())),
        };
        let result = next.map(|stage| {
            self.enter(stage);
            // A quiz with no puzzles has nothing to answer.
            if matches!(&self.stage, Stage::Quiz(quiz) if quiz.is_complete()) {
                self.enter(Stage::QuizDebrief);
            }
            self.phase()
        });
        self.record("advance", result)
    }

    /// From an end screen, start over at the intro with a new team number.
    pub fn restart(&mut self) -> Result<TeamNumber, MissionError> {
        let phase = self.phase();
        let result = if phase.is_terminal() {
            let team = self.session.regenerate();
            tracing::info!(%team, generation = self.session.generation(), "mission restarted");
            self.event_log.push(MissionEvent::Restarted { team });
            self.enter(Stage::Intro);
            Ok(team)
        } else {
            Err(unavailable("restart", phase))
        };
        self.record("restart", result)
    }

    /// Advance the mission clock by `elapsed` and apply any deferred effect
    /// that came due. Returns true if observable state changed.
    pub fn update(&mut self, elapsed: Duration) -> bool {
        self.clock += elapsed;
        let now = self.clock;
        let phase = self.phase();
        match &mut self.stage {
            Stage::FreeBody(model) => {
                let cleared = model.fire_due(now);
                if cleared {
                    self.event_log.push(MissionEvent::FeedbackCleared { phase });
                }
                cleared
            }
            Stage::Quiz(model) => {
                let index_before = model.index();
                if !model.fire_due(now) {
                    return false;
                }
                let event = if model.index() != index_before {
                    MissionEvent::PuzzleAdvanced {
                        index: model.index(),
                    }
                } else {
                    MissionEvent::FeedbackCleared { phase }
                };
                self.event_log.push(event);
                true
            }
            _ => false,
        }
    }

    fn seesaw_mut(&mut self, action: &'static str) -> Result<&mut SeesawModel, MissionError> {
        let phase = self.phase();
        match &mut self.stage {
            Stage::Seesaw(model) => Ok(model),
            _ => Err(unavailable(action, phase)),
        }
    }

    fn enter(&mut self, stage: Stage) {
        let _span = tracing::info_span!("transition").entered();
        let from = self.phase();
        self.stage = stage;
        let to = self.phase();
        tracing::info!(%from, %to, team = %self.session.team(), "phase entered");
        self.event_log.push(MissionEvent::PhaseEntered { phase: to });
    }

    fn record<T>(
        &mut self,
        action: &'static str,
        result: Result<T, MissionError>,
    ) -> Result<T, MissionError> {
        if let Err(err) = &result {
            tracing::warn!(action, phase = %self.phase(), %err, "action rejected");
            self.event_log.push(MissionEvent::ActionRejected {
                action: action.to_string(),
                reason: err.to_string(),
            });
        }
        result
    }
}

fn unavailable(action: &'static str, phase: Phase) -> MissionError {
    MissionError::ActionNotAvailable { action, phase }
}
