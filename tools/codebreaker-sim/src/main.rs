//! CodeBreaker Simulator
//!
//! Runs the firmware game on the host: screens are drawn into the terminal
//! and touches come from a script, either polled like the XPT2046 driver or
//! pushed from a thread like the pen-down interrupt.
//!
//! # Usage
//!
//! ```bash
//! # Play one scripted game with the default answers
//! codebreaker-sim play
//!
//! # Custom answers, interrupt-style delivery, no screen dumps
//! codebreaker-sim play -a HELLO -a "" -a 101 -a "" -a "the secret is in the last level" \
//!     --delivery interrupt --no-render
//!
//! # Show the keyboard geometry and resolve a touch
//! codebreaker-sim layout
//! codebreaker-sim hit-test 150 215
//!
//! # Check an answer without playing
//! codebreaker-sim check 4 "dynamic programming"
//!
//! # Write a config file with every default
//! codebreaker-sim generate config -o codebreaker.toml
//! ```

mod config;
mod script;
mod terminal;

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use codebreaker_game::{
    CodeBreaker, GameConfig, InterruptDriven, KeyboardLayout, TouchInputChannel, LEVELS,
};

use config::{Delivery, SimConfig};
use script::{plan_round, spawn_feeder, ScriptedSource, ThreadDelay};
use terminal::TerminalDisplay;

/// CodeBreaker Simulator
///
/// Host runner for the CodeBreaker touchscreen puzzle
#[derive(Parser)]
#[command(name = "codebreaker-sim")]
#[command(author = "Prasanna Gautam")]
#[command(version = "0.1.0")]
#[command(about = "Play and inspect the CodeBreaker touchscreen puzzle on the host")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play scripted games
    Play {
        /// Config file (default: built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Answer for the next level (repeat once per level)
        #[arg(short, long = "answer")]
        answers: Vec<String>,

        /// Number of games to play
        #[arg(short, long)]
        rounds: Option<usize>,

        /// How touches reach the game
        #[arg(short, long, value_enum)]
        delivery: Option<Delivery>,

        /// Do not print the screens
        #[arg(long)]
        no_render: bool,
    },

    /// Print the on-screen keyboard geometry
    Layout,

    /// Resolve a display coordinate to a key
    HitTest {
        #[arg(allow_hyphen_values = true)]
        x: i32,
        #[arg(allow_hyphen_values = true)]
        y: i32,
    },

    /// List the levels
    Levels,

    /// Evaluate an answer against a level
    Check {
        /// Level number, starting at 1
        level: usize,

        /// Answer text
        answer: String,
    },

    /// Generate configuration files
    #[command(subcommand)]
    Generate(GenerateCommands),
}

#[derive(Subcommand)]
enum GenerateCommands {
    /// Generate codebreaker.toml with every default
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Play {
            config,
            answers,
            rounds,
            delivery,
            no_render,
        } => {
            let mut sim = match config {
                Some(path) => SimConfig::load(&path)
                    .with_context(|| format!("Loading {}", path.display()))?,
                None => SimConfig::default(),
            };
            if !answers.is_empty() {
                sim.script.answers = answers;
            }
            if let Some(rounds) = rounds {
                sim.script.rounds = rounds;
            }
            if let Some(delivery) = delivery {
                sim.script.delivery = delivery;
            }
            if no_render {
                sim.script.render = false;
            }
            sim.validate()?;
            handle_play(&sim)
        }
        Commands::Layout => {
            handle_layout();
            Ok(())
        }
        Commands::HitTest { x, y } => {
            handle_hit_test(x, y);
            Ok(())
        }
        Commands::Levels => {
            handle_levels();
            Ok(())
        }
        Commands::Check { level, answer } => handle_check(level, &answer),
        Commands::Generate(GenerateCommands::Config { output }) => handle_generate(output),
    }
}

fn handle_play(sim: &SimConfig) -> Result<()> {
    let layout = KeyboardLayout::standard();
    let height = sim.display.height;

    let mut taps = Vec::new();
    for _ in 0..sim.script.rounds {
        taps.extend(plan_round(&layout, &LEVELS, &sim.script.answers, height));
    }
    let planned = taps.len();

    println!(
        "{} Playing {} round(s), {} taps, {:?} delivery",
        "[*]".cyan().bold(),
        sim.script.rounds,
        planned,
        sim.script.delivery
    );

    let display = TerminalDisplay::new(sim.display.width, height as u32, sim.script.render);
    let game_config = GameConfig {
        poll_interval_ms: sim.timing.poll_interval_ms,
    };

    let (codes, frames) = match sim.script.delivery {
        Delivery::Poll => {
            let channel = TouchInputChannel::new(height);
            let idle_polls = sim.timing.tap_interval_ms / sim.timing.poll_interval_ms;
            let mut game = CodeBreaker::new(
                display,
                ScriptedSource::new(taps, idle_polls),
                ThreadDelay::new(),
                &channel,
                &LEVELS,
                game_config,
            );
            let codes = (0..sim.script.rounds).map(|_| game.play_round()).collect::<Vec<_>>();
            (codes, game.display().frames())
        }
        Delivery::Interrupt => {
            let channel = Arc::new(TouchInputChannel::new(height));
            let waiting = Arc::new(AtomicBool::new(false));
            let feeder = spawn_feeder(
                Arc::clone(&channel),
                Arc::clone(&waiting),
                taps,
                Duration::from_millis(sim.timing.tap_interval_ms as u64),
            );

            let mut game = CodeBreaker::new(
                display,
                InterruptDriven,
                ThreadDelay::signalling(waiting),
                &*channel,
                &LEVELS,
                game_config,
            );
            let codes = (0..sim.script.rounds).map(|_| game.play_round()).collect::<Vec<_>>();

            let delivered = feeder
                .join()
                .map_err(|_| anyhow::anyhow!("touch feeder thread panicked"))?;
            if delivered != planned {
                bail!("feeder delivered {} of {} taps", delivered, planned);
            }
            (codes, game.display().frames())
        }
    };

    println!("\n{}", "=".repeat(40));
    for (i, code) in codes.iter().enumerate() {
        let shown = if code.is_empty() {
            "(none)".red()
        } else {
            code.as_str().green().bold()
        };
        println!("  Round {}: secret code {}", i + 1, shown);
    }
    println!("  {} screens drawn", frames);
    println!("{}", "=".repeat(40));

    Ok(())
}

fn handle_layout() {
    let layout = KeyboardLayout::standard();
    let metrics = layout.metrics();

    println!("{}", "=".repeat(60));
    println!("{}", "On-screen Keyboard".cyan().bold());
    println!("{}", "=".repeat(60));
    println!(
        "  Key width: {} (special {}), row height: {}, margin: {}, top: {}",
        metrics.normal_width,
        metrics.special_width,
        metrics.row_height,
        metrics.margin,
        metrics.start_y
    );

    let positions = layout.render_positions();
    let mut row_y = None;
    for pos in &positions {
        if row_y != Some(pos.y) {
            row_y = Some(pos.y);
            println!("\n  {}", format!("Row at y={}", pos.y).white().bold());
        }
        println!(
            "    {:>6}  x={:<4} w={:<3} h={}",
            pos.key.label.yellow(),
            pos.x,
            pos.width,
            pos.height
        );
    }

    println!("\n{}", "=".repeat(60));
    println!("  {} keys", positions.len());
}

fn handle_hit_test(x: i32, y: i32) {
    let layout = KeyboardLayout::standard();
    match layout.hit_test(x, y) {
        Some(label) => println!("{} ({}, {}) -> {}", "[OK]".green().bold(), x, y, label.white().bold()),
        None => println!("{} ({}, {}) -> no key", "[--]".dimmed(), x, y),
    }
}

fn handle_levels() {
    println!("{}", "=".repeat(60));
    println!("{}", "Levels".cyan().bold());
    println!("{}", "=".repeat(60));

    for (i, level) in LEVELS.iter().enumerate() {
        println!("\n  {} {}", format!("[{}]", i + 1).white().bold(), level.title);
        for line in level.prompt {
            println!("      {}", line.dimmed());
        }
        println!("      Code character: {}", level.code_char.to_string().green());
    }

    println!("\n{}", "=".repeat(60));
}

fn handle_check(level: usize, answer: &str) -> Result<()> {
    let challenge = level
        .checked_sub(1)
        .and_then(|i| LEVELS.get(i))
        .with_context(|| format!("Unknown level {}, expected 1..={}", level, LEVELS.len()))?;

    if challenge.evaluate(answer) {
        println!(
            "{} {}: correct, code character {}",
            "[OK]".green().bold(),
            challenge.title,
            challenge.code_char.to_string().green().bold()
        );
    } else {
        println!("{} {}: wrong answer", "[FAIL]".red().bold(), challenge.title);
    }
    Ok(())
}

fn handle_generate(output: Option<PathBuf>) -> Result<()> {
    let content = SimConfig::default_toml();

    if let Some(path) = output {
        fs::write(&path, content).with_context(|| format!("Writing {}", path.display()))?;
        println!("{} Config written to {}", "[OK]".green().bold(), path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}
