use equilibria_common::{CoinId, DropTarget, ForceId};
use serde::{Deserialize, Serialize};

use crate::InputError;

/// A discrete request from the presentation layer.
///
/// The kernel consumes actions, never raw UI events, so terminal play,
/// scripted replays and tests all drive the same state machine.
/// Numeric form fields stay as text; the kernel parses them at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Put a coin on ruler tick 0..=30.
    PlaceCoin { tick: u8 },
    /// Take a coin off the ruler.
    RemoveCoin { id: CoinId },
    /// Clear the ruler.
    ResetCoins,
    /// Ask whether the seesaw is balanced.
    CheckBalance,
    /// Drop a force arrow on a diagram target.
    DropForce { force: ForceId, target: DropTarget },
    /// Answer the current quiz puzzle.
    SubmitAnswer { text: String },
    /// Submit both pillar reactions.
    SubmitReactions { fa: String, fb: String },
    /// Continue from an intro or debrief screen.
    Advance,
    /// Start a new mission from an end screen.
    Restart,
}

impl Action {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Action::PlaceCoin { .. } => "place_coin",
            Action::RemoveCoin { .. } => "remove_coin",
            Action::ResetCoins => "reset_coins",
            Action::CheckBalance => "check_balance",
            Action::DropForce { .. } => "drop_force",
            Action::SubmitAnswer { .. } => "submit_answer",
            Action::SubmitReactions { .. } => "submit_reactions",
            Action::Advance => "advance",
            Action::Restart => "restart",
        }
    }

    /// Parse a terminal command such as `place 10`, `drop weight1 pos1`,
    /// `answer 15` or `react 784 196`.
    pub fn parse_command(line: &str) -> Result<Self, InputError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(InputError::UnknownCommand(String::new()));
        };
        let action = match command.to_lowercase().as_str() {
            "place" | "p" => {
                let tick = arg(&mut words, "place", "tick")?;
                let tick = tick
                    .parse()
                    .map_err(|_| InputError::InvalidTick(tick.to_string()))?;
                Action::PlaceCoin { tick }
            }
            "remove" | "rm" => {
                let id = arg(&mut words, "remove", "coin id")?;
                let raw = id.trim_start_matches('#');
                let id = raw
                    .parse()
                    .map_err(|_| InputError::InvalidCoinId(id.to_string()))?;
                Action::RemoveCoin { id: CoinId(id) }
            }
            "reset" => Action::ResetCoins,
            "check" => Action::CheckBalance,
            "drop" | "d" => {
                let force = arg(&mut words, "drop", "force")?;
                let target = arg(&mut words, "drop", "target")?;
                Action::DropForce {
                    force: ForceId::from_name(force)
                        .ok_or_else(|| InputError::UnknownForce(force.to_string()))?,
                    target: DropTarget::from_name(target)
                        .ok_or_else(|| InputError::UnknownTarget(target.to_string()))?,
                }
            }
            "answer" | "a" => Action::SubmitAnswer {
                text: arg(&mut words, "answer", "value")?.to_string(),
            },
            "react" | "r" => Action::SubmitReactions {
                fa: arg(&mut words, "react", "Fa")?.to_string(),
                fb: arg(&mut words, "react", "Fb")?.to_string(),
            },
            "next" | "advance" | "n" => Action::Advance,
            "restart" => Action::Restart,
            other => return Err(InputError::UnknownCommand(other.to_string())),
        };
        Ok(action)
    }
}

fn arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, InputError> {
    words
        .next()
        .ok_or(InputError::MissingArgument { command, argument })
}
