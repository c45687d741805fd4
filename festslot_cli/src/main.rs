use std::{io::Write, sync::Arc};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use festslot_core::{
    AudioSink, Catalog, ChannelNotifier, EntropyRandom, MachineConfig, RandomSource,
    SeededRandom, SilentAudio, SlotMachine, TimingConfig, TimingProfile, Variant, CENTER_SLOT,
};
use festslot_core::reel::VISIBLE_SLOTS;
use festslot_shared::{AudioCue, AudioError, NotificationVariant, SessionView};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "festslot", about = "Festival slot machine in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Symbol set and top-up amount: festival or arcade
    #[arg(long, env = "FESTSLOT_VARIANT", default_value = "festival")]
    variant: String,
    /// Replay a session from a seed instead of OS randomness
    #[arg(long, env = "FESTSLOT_SEED")]
    seed: Option<String>,
    /// Reel pacing: normal, turbo or instant
    #[arg(long, env = "FESTSLOT_TIMING", default_value = "normal")]
    timing: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive play (default)
    Play {
        /// Ring the terminal bell on wins
        #[arg(long)]
        bell: bool,
    },
    /// Run N spins back to back and report the totals.
    ///
    /// Reels always stop instantly here; --timing only applies to play.
    Simulate {
        #[arg(long, default_value_t = 1000)]
        spins: u64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

struct TerminalBell;

impl AudioSink for TerminalBell {
    fn rewind(&self, _cue: AudioCue) {}

    fn play(&self, cue: AudioCue) -> Result<(), AudioError> {
        if cue == AudioCue::Win {
            let mut err = std::io::stderr();
            err.write_all(b"\x07")
                .and_then(|_| err.flush())
                .map_err(|e| AudioError::Unavailable(e.to_string()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
struct Report {
    variant: Variant,
    spins: u64,
    wagered: u64,
    paid: u64,
    hits: u64,
    top_ups: u64,
    return_ratio: f64,
    final_balance: u64,
}

fn config_from(cli: &Cli, timing_override: Option<TimingConfig>) -> anyhow::Result<MachineConfig> {
    let variant = Variant::from_name(&cli.variant)
        .ok_or_else(|| anyhow!("unknown variant {:?}", cli.variant))?;
    let timing = match timing_override {
        Some(t) => t,
        None => TimingProfile::from_name(&cli.timing)
            .map(TimingConfig::from_profile)
            .ok_or_else(|| anyhow!("unknown timing profile {:?}", cli.timing))?,
    };
    Ok(MachineConfig::for_variant(variant).with_timing(timing))
}

fn random_source(seed: Option<&str>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => {
            let rng = SeededRandom::new(seed);
            info!(seed = rng.seed(), "replayable session");
            Box::new(rng)
        }
        None => Box::new(EntropyRandom::new()),
    }
}

fn render(view: &SessionView, catalog: &Catalog, spin_cost: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} Credits\n", view.balance));
    for row in 0..VISIBLE_SLOTS {
        let marker = if row == CENTER_SLOT { ">" } else { " " };
        out.push_str(marker);
        for reel in &view.reels {
            let label = if reel.spinning {
                "~~~~~~".to_string()
            } else {
                reel.symbols
                    .get(row)
                    .and_then(|&i| catalog.get(i))
                    .map(|s| s.name.clone())
                    .unwrap_or_default()
            };
            out.push_str(&format!(" {label:^10}"));
        }
        out.push_str(&format!(" {marker}\n"));
    }
    if view.show_win {
        out.push_str(&format!("  +{}\n", view.win_amount));
    }
    if view.spinning {
        out.push_str("[Spinning...]");
    } else {
        out.push_str(&format!("[SPIN ({spin_cost} Credits)]  [c] Add Credits  [q] Quit"));
    }
    out
}

async fn play(cli: &Cli, bell: bool) -> anyhow::Result<()> {
    let config = config_from(cli, None)?;
    let catalog = config.catalog.clone();
    let spin_cost = config.spin_cost;
    let variant = config.variant;
    let top = catalog
        .get(catalog.top_symbol())
        .map(|s| s.name.clone())
        .unwrap_or_default();

    let (notifier, mut notes) = ChannelNotifier::channel();
    let audio: Arc<dyn AudioSink> = if bell {
        Arc::new(TerminalBell)
    } else {
        Arc::new(SilentAudio)
    };
    let machine = SlotMachine::new(
        config,
        random_source(cli.seed.as_deref()),
        Arc::new(notifier),
        audio,
    );

    println!("festslot ({variant:?} edition)");
    println!("Match 3 symbols on the center line to win!");
    println!("The {top} is the highest paying symbol!");

    let mut views = machine.subscribe();
    println!("{}", render(&views.borrow_and_update(), &catalog, spin_cost));
    let redraw = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            println!("\n{}", render(&view, &catalog, spin_cost));
        }
    });
    let toasts = tokio::spawn(async move {
        while let Some(n) = notes.recv().await {
            let tag = match n.variant {
                NotificationVariant::Default => "*",
                NotificationVariant::Destructive => "!",
            };
            println!("{tag} {}: {}", n.title, n.description);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        match line.trim() {
            "" | "s" | "spin" => {
                // rejections are already reported through notifications
                let _ = machine.spin();
            }
            "c" | "credits" => {
                machine.add_credits();
            }
            "q" | "quit" => break,
            other => println!("unknown command {other:?}; use s, c or q"),
        }
    }

    redraw.abort();
    toasts.abort();
    Ok(())
}

async fn simulate(cli: &Cli, spins: u64, json: bool) -> anyhow::Result<()> {
    let config = config_from(cli, Some(TimingConfig::instant()))?;
    let cost = config.spin_cost;
    let mut report = Report {
        variant: config.variant,
        ..Report::default()
    };
    let machine = SlotMachine::new(
        config,
        random_source(cli.seed.as_deref()),
        Arc::new(festslot_core::LogNotifier),
        Arc::new(SilentAudio),
    );

    for _ in 0..spins {
        if machine.balance() < cost {
            machine.add_credits();
            report.top_ups += 1;
        }
        let outcome = machine.spin()?.settled().await?;
        report.spins += 1;
        report.wagered += cost;
        report.paid += outcome.payout();
        if outcome.win.is_some() {
            report.hits += 1;
        }
    }
    report.final_balance = machine.balance();
    if report.wagered > 0 {
        report.return_ratio = report.paid as f64 / report.wagered as f64;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "variant={:?} spins={} wagered={} paid={} hits={} top_ups={} return={:.4} balance={}",
            report.variant,
            report.spins,
            report.wagered,
            report.paid,
            report.hits,
            report.top_ups,
            report.return_ratio,
            report.final_balance
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the board and reports only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Simulate { spins, json }) => simulate(&cli, *spins, *json).await?,
        Some(Commands::Play { bell }) => play(&cli, *bell).await?,
        None => play(&cli, false).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use festslot_shared::{Phase, ReelView};

    fn view(spinning: bool, show_win: bool) -> SessionView {
        SessionView {
            balance: 90,
            phase: if spinning { Phase::Spinning } else { Phase::Idle },
            spinning,
            reels: (0..3)
                .map(|_| ReelView {
                    spinning,
                    symbols: vec![0, 6, 2, 3, 4],
                })
                .collect(),
            show_win,
            win_amount: 100,
            spins: 1,
        }
    }

    #[test]
    fn render_marks_the_center_line() {
        let text = render(&view(false, true), &Catalog::festival(), 10);
        let center = text.lines().find(|l| l.starts_with('>')).unwrap();
        assert_eq!(center.matches("Triangle").count(), 3);
        assert!(text.contains("+100"));
        assert!(text.contains("SPIN (10 Credits)"));
    }

    #[test]
    fn render_while_spinning_hides_symbols() {
        let text = render(&view(true, false), &Catalog::festival(), 10);
        assert!(text.contains("Spinning..."));
        assert!(!text.contains("Triangle"));
        assert!(!text.contains('+'));
    }

    #[test]
    fn simulate_help_says_timing_is_ignored() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let sim = cmd
            .get_subcommands()
            .find(|c| c.get_name() == "simulate")
            .unwrap();
        let help = sim.get_long_about().unwrap().to_string();
        assert!(help.contains("--timing only applies to play"));
    }

    #[test]
    fn cli_rejects_unknown_variant() {
        let cli = Cli::parse_from(["festslot", "--variant", "vip"]);
        assert!(config_from(&cli, None).is_err());
        let cli = Cli::parse_from(["festslot", "--variant", "arcade", "--timing", "turbo"]);
        let config = config_from(&cli, None).unwrap();
        assert_eq!(config.top_up, 10);
        assert_eq!(config.timing, TimingConfig::turbo());
    }
}
