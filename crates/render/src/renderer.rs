use equilibria_common::{DropTarget, ForceId, FULCRUM_TICK_CM, RULER_LENGTH_CM};
use equilibria_kernel::{BridgeReport, Mission, MissionEvent, Stage};
use equilibria_phases::{BridgeModel, FreeBodyModel, QuizModel, SeesawModel};

use crate::Narrative;

/// What a frame includes beyond the active screen.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Show corrective hints after a failed check or submission.
    pub hints: bool,
    /// Number of trailing event records to list.
    pub recent_events: usize,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            hints: true,
            recent_events: 0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads mission state and produces output. It never mutates the
/// mission; actions go back through [`Mission::apply`].
pub trait Renderer {
    type Output;

    /// Render one frame from the given mission and view.
    fn render(&self, mission: &Mission, view: &RenderView) -> Self::Output;
}

/// Plain-text renderer for terminals, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    narrative: Narrative,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_narrative(narrative: Narrative) -> Self {
        Self { narrative }
    }

    pub fn narrative(&self) -> &Narrative {
        &self.narrative
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, mission: &Mission, view: &RenderView) -> String {
        let narrative = &self.narrative;
        let team = mission.team();
        let phase = mission.phase();
        let screen = narrative.screen(phase);
        let mut out = String::new();
        out.push_str(&format!("=== {} [{}] ===\n", screen.title, phase));
        out.push_str(&format!("{}\n", Narrative::fill(&narrative.team_label, team)));
        out.push_str(&format!("{}\n\n", Narrative::fill(&screen.text, team)));

        let last = mission.events().last();
        match mission.stage() {
            Stage::Seesaw(model) => {
                render_seesaw(&mut out, model);
                if view.hints
                    && matches!(last, Some(MissionEvent::BalanceChecked { balanced: false, .. }))
                {
                    out.push_str(&format!("! {}\n", narrative.balance_hint));
                }
            }
            Stage::FreeBody(model) => render_free_body(&mut out, model, narrative),
            Stage::Quiz(model) => render_quiz(&mut out, model, narrative),
            Stage::Bridge(model) => render_bridge(&mut out, model),
            Stage::Success(report) => render_report(&mut out, report),
            Stage::Failure(report) => {
                render_report(&mut out, report);
                if view.hints {
                    out.push_str(&format!("! {}\n", narrative.structural_alert));
                }
            }
            Stage::SeesawDebrief => out.push_str(&format!("* {}\n", narrative.seesaw_success)),
            Stage::FreeBodyDebrief => {
                out.push_str(&format!("* {}\n", narrative.free_body_success))
            }
            Stage::QuizDebrief => out.push_str(&format!("* {}\n", narrative.quiz_success)),
            Stage::Intro => {}
        }

        let command = if phase.is_screen() {
            "  (next)"
        } else if phase.is_terminal() {
            "  (restart)"
        } else {
            ""
        };
        out.push_str(&format!("[ {} ]{command}\n", screen.button));

        if view.recent_events > 0 {
            let events = mission.events();
            let start = events.len().saturating_sub(view.recent_events);
            out.push_str("Events:\n");
            for event in &events[start..] {
                out.push_str(&format!("  {event:?}\n"));
            }
        }
        out
    }
}

fn render_seesaw(out: &mut String, model: &SeesawModel) {
    // One cell per ruler tick; digits count stacked coins.
    let mut stacks = [0u32; RULER_LENGTH_CM as usize + 1];
    for coin in model.coins() {
        let tick = (coin.position + f64::from(FULCRUM_TICK_CM)).round() as usize;
        if let Some(cell) = stacks.get_mut(tick) {
            *cell += 1;
        }
    }
    let ruler: String = stacks
        .iter()
        .map(|&n| match n {
            0 => '-',
            1..=9 => char::from_digit(n, 10).unwrap_or('*'),
            _ => '*',
        })
        .collect();
    out.push_str(&format!("|{ruler}|\n"));
    out.push_str(&format!("{}^\n", " ".repeat(usize::from(FULCRUM_TICK_CM) + 1)));
    for coin in model.coins() {
        out.push_str(&format!("  coin {} at {:+} cm\n", coin.id, coin.position));
    }
    out.push_str(&format!(
        "net torque: {:+}  tilt: {:+.1}°\n",
        model.net_torque(),
        model.tilt_degrees()
    ));
}

fn arrow(force: ForceId) -> char {
    if force.points_up() { '↑' } else { '↓' }
}

fn render_free_body(out: &mut String, model: &FreeBodyModel, narrative: &Narrative) {
    for target in DropTarget::ALL {
        let placed: Vec<String> = ForceId::ALL
            .iter()
            .filter(|&&f| model.placement(f) == Some(target))
            .map(|&f| format!("{}{}", arrow(f), f.as_str()))
            .collect();
        let slot = if placed.is_empty() {
            "(empty)".to_string()
        } else {
            placed.join(", ")
        };
        out.push_str(&format!("  {:<8} {slot}\n", target.as_str()));
    }
    let tray: Vec<String> = model
        .unplaced()
        .iter()
        .map(|&f| format!("{}{}", arrow(f), f.as_str()))
        .collect();
    out.push_str(&format!("tray: {}\n", tray.join(" ")));
    if let Some(feedback) = model.feedback() {
        let mark = if feedback.correct {
            &narrative.drop_correct
        } else {
            &narrative.drop_incorrect
        };
        out.push_str(&format!("{} -> {}: {mark}\n", feedback.force, feedback.target));
    }
}

fn render_quiz(out: &mut String, model: &QuizModel, narrative: &Narrative) {
    let (solved, total) = model.progress();
    out.push_str(&format!("solved {solved} / {total}\n"));
    if let Some(puzzle) = model.current_puzzle() {
        out.push_str(&format!("Q{}: {}\n", puzzle.id, puzzle.question));
    }
    if let Some(feedback) = model.feedback() {
        let message = if feedback.correct {
            &narrative.answer_correct
        } else {
            &narrative.answer_incorrect
        };
        out.push_str(&format!("puzzle {}: {message}\n", feedback.puzzle_id));
    }
}

fn render_bridge(out: &mut String, model: &BridgeModel) {
    let s = model.scenario();
    out.push_str(&format!(
        "load {:.1} N at {:.1} m from pillar A on a {:.1} m span (tolerance {} N)\n",
        s.weight_n(),
        s.load_distance_m,
        s.length_m,
        model.tolerance_n()
    ));
    out.push_str(&format!("A{}B\n", "=".repeat(20)));
}

fn render_report(out: &mut String, report: &BridgeReport) {
    let verdict = |ok: bool| if ok { "ok" } else { "off" };
    out.push_str(&format!(
        "Fa = {} N ({})  Fb = {} N ({})\n",
        report.submitted.fa,
        verdict(report.outcome.fa_ok),
        report.submitted.fb,
        verdict(report.outcome.fb_ok)
    ));
}
