use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for equilibria")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint, test, then play both demo endings
    Check,
    /// cargo fmt --check and clippy with warnings denied
    Lint,
    /// Run all tests
    Test,
    /// Run the scripted mission demo through the CLI
    Demo {
        /// End the demo in structural failure
        #[arg(long)]
        fail: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            lint()?;
            cargo("test", &["test", "--workspace"])?;
            demo(false)?;
            demo(true)?;
        }
        Commands::Lint => lint()?,
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Demo { fail } => demo(fail)?,
    }

    Ok(())
}

fn lint() -> Result<()> {
    cargo("fmt", &["fmt", "--all", "--", "--check"])?;
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn demo(fail: bool) -> Result<()> {
    cargo("demo", &demo_args(fail))
}

/// `--json` keeps the output to one event per line.
fn demo_args(fail: bool) -> Vec<&'static str> {
    let mut args = vec!["run", "-q", "-p", "equilibria-cli", "--", "demo", "--json"];
    if fail {
        args.push("--fail");
    }
    args
}

fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("{label} failed");
    }
    Ok(())
}
