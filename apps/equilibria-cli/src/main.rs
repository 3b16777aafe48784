use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use equilibria_input::Action;
use equilibria_kernel::{Mission, MissionConfig, MissionEvent, Phase};
use equilibria_render::{DebugTextRenderer, Narrative, RenderView, Renderer};
use equilibria_tools::MissionInspector;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 42;

/// Scripted playthrough used by `demo`; the last entry is the bridge answer.
const DEMO_SCRIPT: &[&str] = &[
    "next",
    "place 10",
    "place 10",
    "place 10",
    "place 30",
    "check",
    "next",
    "drop weight1 pos2",
    "drop weight1 pos1",
    "drop reaction fulcrum",
    "drop weight2 pos2",
    "next",
    "answer 14",
    "answer 15",
    "answer -4",
    "answer 4",
    "next",
];

const HELP: &str = "\
commands:
  place <tick>          put a coin on ruler tick 0..30
  remove <id>           take coin <id> off the ruler
  reset                 clear the ruler
  check                 check the balance
  drop <force> <target> force: weight1|weight2|reaction, target: pos1|pos2|fulcrum
  answer <value>        answer the current puzzle
  react <fa> <fb>       submit pillar reactions in newtons
  next                  continue from a narrative screen
  restart               start over from an end screen
  status                mission summary
  look                  redraw the screen
  quit";

#[derive(Parser)]
#[command(name = "equilibria-cli", about = "Static-equilibrium training mission")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// RNG seed for reproducible team numbers
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Mission config (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Narrative text overrides (YAML)
    #[arg(short, long, global = true)]
    narrative: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and mission defaults
    Info,
    /// Play interactively, one command per line on stdin
    Play {
        /// Print drained mission events as JSON lines
        #[arg(long)]
        events: bool,
    },
    /// Run a scripted playthrough
    Demo {
        /// Submit out-of-tolerance reactions and end in failure
        #[arg(long)]
        fail: bool,
        /// Print mission events as JSON lines instead of screens
        #[arg(long)]
        json: bool,
        /// Mission clock advance after each step, in milliseconds
        #[arg(long, default_value = "2000")]
        step_ms: u64,
    },
    /// Rebuild a mission from a JSON array of recorded actions
    Replay {
        /// Path to the recorded actions
        actions: PathBuf,
    },
    /// Dump or check mission configuration
    Config {
        /// Print the effective config as YAML
        #[arg(long)]
        dump: bool,
        /// Validate a config file
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => MissionConfig::load(path)?,
        None => MissionConfig::default(),
    };
    let narrative = match &cli.narrative {
        Some(path) => Narrative::load(path)?,
        None => Narrative::default(),
    };
    let renderer = DebugTextRenderer::with_narrative(narrative);

    match cli.command {
        Commands::Info => {
            println!("equilibria-cli v{}", env!("CARGO_PKG_VERSION"));
            let phases: Vec<&str> = Phase::ALL.iter().map(|p| p.as_str()).collect();
            println!("phases: {}", phases.join(" -> "));
            println!("puzzles: {}", config.puzzles.len());
            let reactions = config.bridge.scenario.reactions();
            println!(
                "bridge: Fa={:.1} N Fb={:.1} N (tolerance {} N)",
                reactions.fa, reactions.fb, config.bridge.tolerance_n
            );
        }
        Commands::Play { events } => {
            let mission = match cli.seed {
                Some(seed) => Mission::with_seed(seed, config),
                None => Mission::new(config),
            };
            play(mission, &renderer, events)?;
        }
        Commands::Demo {
            fail,
            json,
            step_ms,
        } => {
            let seed = cli.seed.unwrap_or(DEFAULT_SEED);
            demo(Mission::with_seed(seed, config), &renderer, fail, json, step_ms)?;
        }
        Commands::Replay { actions } => {
            let actions = read_actions(&actions)?;
            let seed = cli.seed.unwrap_or(DEFAULT_SEED);
            let mission = Mission::replay(seed, config, &actions);
            println!("{}", renderer.render(&mission, &RenderView::default()));
            println!("{}", MissionInspector::summary(&mission));
        }
        Commands::Config { dump, check } => {
            if let Some(path) = check {
                let checked = MissionConfig::load(&path)?;
                println!(
                    "{}: ok ({} puzzles, tolerance {} N)",
                    path.display(),
                    checked.puzzles.len(),
                    checked.bridge.tolerance_n
                );
            } else if dump {
                print!("{}", config.to_yaml()?);
            } else {
                anyhow::bail!("nothing to do: pass --dump or --check <path>");
            }
        }
    }

    Ok(())
}

fn play(mut mission: Mission, renderer: &DebugTextRenderer, events: bool) -> anyhow::Result<()> {
    let view = RenderView::default();
    println!("{}", renderer.render(&mission, &view));
    println!("type `help` for commands");

    let stdin = io::stdin();
    let mut last = Instant::now();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let now = Instant::now();
        if mission.update(now - last) {
            tracing::debug!(clock_ms = mission.clock().as_millis() as u64, "timers fired");
        }
        last = now;

        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "status" => println!("{}", MissionInspector::summary(&mission)),
            "look" => println!("{}", renderer.render(&mission, &view)),
            command => match Action::parse_command(command) {
                Ok(action) => match mission.apply(&action) {
                    Ok(outcome) => {
                        tracing::debug!(?outcome, "action applied");
                        println!("{}", renderer.render(&mission, &view));
                    }
                    Err(err) => println!("error: {err}"),
                },
                Err(err) => println!("error: {err}"),
            },
        }

        let drained = mission.drain_events();
        if events {
            print_json_lines(&drained)?;
        }
        prompt()?;
    }
    Ok(())
}

fn demo(
    mut mission: Mission,
    renderer: &DebugTextRenderer,
    fail: bool,
    json: bool,
    step_ms: u64,
) -> anyhow::Result<()> {
    let bridge = if fail { "react 784 190" } else { "react 784 196" };
    let view = RenderView::default();
    if !json {
        println!("{}", renderer.render(&mission, &view));
    }

    for line in DEMO_SCRIPT.iter().copied().chain(std::iter::once(bridge)) {
        let action = Action::parse_command(line)?;
        mission.apply(&action)?;
        mission.update(Duration::from_millis(step_ms));
        if json {
            print_json_lines(&mission.drain_events())?;
        } else {
            println!("> {line}");
            println!("{}", renderer.render(&mission, &view));
        }
    }

    tracing::info!(phase = %mission.phase(), team = %mission.team(), "demo finished");
    if !json {
        println!("{}", MissionInspector::summary(&mission));
    }
    Ok(())
}

fn read_actions(path: &Path) -> anyhow::Result<Vec<Action>> {
    let text = std::fs::read_to_string(path)?;
    let actions: Vec<Action> = serde_json::from_str(&text)?;
    tracing::info!(path = %path.display(), count = actions.len(), "loaded actions");
    Ok(actions)
}

fn print_json_lines(events: &[MissionEvent]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    Ok(())
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
