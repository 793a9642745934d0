use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for the spaceship demo")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests, doc
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Time ground mesh generation
    Bench,
    /// Fly the headless demo for a few seconds
    Smoke,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            run_fmt()?;
            run_clippy()?;
            run_tests()?;
            run_doc()?;
        }
        Commands::Fmt => run_fmt()?,
        Commands::Clippy => run_clippy()?,
        Commands::Test => run_tests()?,
        Commands::Doc => run_doc()?,
        Commands::Build => cargo("build", &["build", "--workspace"])?,
        Commands::Bench => cargo(
            "bench",
            &["bench", "-p", "shipdemo-ground", "--bench", "bench_ground_mesh"],
        )?,
        Commands::Smoke => cargo(
            "smoke run",
            &[
                "run", "-p", "shipdemo-cli", "--", "simulate", "--frames", "300", "--stick-x",
                "16000", "--trigger-right", "32767",
            ],
        )?,
    }

    Ok(())
}

/// Run `cargo <args>` and fail with `step` in the message on a non-zero exit.
fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {step} failed");
    }
    Ok(())
}

fn run_fmt() -> Result<()> {
    cargo("fmt check", &["fmt", "--all", "--", "--check"])
}

fn run_clippy() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn run_tests() -> Result<()> {
    cargo("test", &["test", "--workspace"])
}

fn run_doc() -> Result<()> {
    cargo("doc", &["doc", "--workspace", "--no-deps"])
}
