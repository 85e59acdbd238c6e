//! Main entry point for the holdem-table binary: a session of robot
//! players at one table, narrated on the console.

use holdem_table::bot::{
    AggressiveBot, ConservativeBot, DecisionSource, RandomBot, TightAggressiveBot,
};
use holdem_table::cli::Cli;
use holdem_table::config::Config;
use holdem_table::pretty::ConsoleObserver;
use holdem_table::table::{Stakes, Table};

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If debug is on: show everything at DEBUG level; otherwise keep
    // this crate at INFO and the rest quiet.
    let log_filter = if cli.debug {
        "debug".to_string()
    } else {
        "holdem_table=info,warn".to_string()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.debug)
        .with_file(cli.debug)
        .with_line_number(cli.debug)
        .init();

    let mut cfg = Config::load_or_create(&cli.config)
        .with_context(|| format!("loading or creating config '{}'", cli.config.display()))?;

    // Apply CLI overrides in-memory (persisted only with --persist).
    if let Some(h) = cli.hands {
        cfg.hands = h;
    }
    if let Some(b) = cli.bots {
        cfg.bots = b;
    }
    if let Some(s) = cli.seed {
        cfg.seed = Some(s);
    }
    if let Some(b) = cli.broadcast {
        cfg.broadcast = b;
    }
    if cli.persist {
        cfg.save(&cli.config)
            .with_context(|| format!("saving updated config '{}'", cli.config.display()))?;
    }

    if cfg.bots < 2 {
        anyhow::bail!("a table needs at least 2 robot seats (got {})", cfg.bots);
    }

    tracing::info!(
        config = %cli.config.display(),
        bots = cfg.bots,
        hands = cfg.hands,
        seed = ?cfg.seed,
        "starting session"
    );

    let mut table = Table::new(Stakes {
        starting_stack: cfg.starting_stack,
        small_blind: cfg.small_blind,
        big_blind: cfg.big_blind,
        seed: cfg.seed,
    });
    for (name, source) in lineup(cfg.bots) {
        table.add_seat(name, source);
    }
    table.add_observer(Box::new(ConsoleObserver::new(cfg.broadcast)));
    if let Some(path) = &cli.history {
        let logger = holdem_table::logger::HandHistoryLogger::create(path)
            .with_context(|| format!("opening hand history '{}'", path.display()))?;
        table.add_observer(Box::new(logger));
    }

    table.setup().context("setting up the table")?;
    table.play(cfg.hands).context("playing the session")?;

    Ok(())
}

/// The rotating cast of robot personalities seated at the table.
fn lineup(count: usize) -> Vec<(String, Box<dyn DecisionSource>)> {
    let builders: [(&str, fn() -> Box<dyn DecisionSource>); 4] = [
        ("Conservative Charlie", || Box::new(ConservativeBot)),
        ("Aggressive Andy", || Box::new(AggressiveBot)),
        ("Tight Tina", || Box::new(TightAggressiveBot)),
        ("Random Randy", || Box::new(RandomBot)),
    ];
    (0..count)
        .map(|i| {
            let (name, build) = builders[i % builders.len()];
            let name = if i < builders.len() {
                name.to_string()
            } else {
                format!("{} {}", name, i / builders.len() + 1)
            };
            (name, build())
        })
        .collect()
}
