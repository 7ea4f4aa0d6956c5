mod prompt;
mod render;

use std::{
    fs::{self, OpenOptions},
    io::{self, StdinLock, Stdout, Write},
};

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use war_core::{
    config::{self, AppConfig},
    models::{MAX_COLOR_LEN, MAX_NAME_LEN},
    GameSession, Player, Registry, RngDice, ScenarioLoader,
};

use crate::prompt::Prompter;

type Console = Prompter<StdinLock<'static>, Stdout>;

const MAX_TERRITORIES: u32 = 1_000;
const MAX_TROOPS: u32 = 100_000;

fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let mut console = Prompter::new(io::stdin().lock(), io::stdout());

    let registry = match &config.scenario {
        Some(path) => ScenarioLoader::new(path).load()?,
        None => setup_registry(&mut console)?,
    };
    let dice = match config.seed {
        Some(seed) => RngDice::seeded(seed),
        None => RngDice::from_time(),
    };
    let player = Player::new(&config.player_color)?;
    let mut game = GameSession::new(registry, player, dice);

    let mission = game.assign_mission()?;
    render::mission(console.output(), &config.player_color, mission)?;

    loop {
        render::map(console.output(), &game.status())?;
        writeln!(console.output(), "\n1. Attack\n2. Quit")?;
        match console.number("Option: ", 1..=2)? {
            1 => {
                if attack_round(&mut console, &mut game)? {
                    render::victory(console.output(), &config.player_color)?;
                    break;
                }
            }
            _ => break,
        }
    }

    let elapsed = Utc::now() - game.started_at();
    info!(
        elapsed_secs = elapsed.num_seconds(),
        complete = game.mission_complete(),
        "Game over"
    );
    Ok(())
}

fn setup_registry(console: &mut Console) -> Result<Registry> {
    let count = console.number("Number of territories: ", 1..=MAX_TERRITORIES)?;
    let mut registry = Registry::create(count as usize)?;
    for index in 0..registry.count() {
        writeln!(
            console.output(),
            "--- Territory {} of {} ---",
            index + 1,
            registry.count()
        )?;
        loop {
            let name = console.text(&format!("Name (max {MAX_NAME_LEN} characters): "))?;
            let owner = console.text(&format!("Army color (max {MAX_COLOR_LEN} characters): "))?;
            let troops = console.number("Troops (minimum 1): ", 1..=MAX_TROOPS)?;
            match registry.get(index)?.configure(&name, &owner, troops) {
                Ok(()) => break,
                Err(err) => writeln!(console.output(), "Error: {err}")?,
            }
        }
    }
    Ok(registry)
}

/// Run one attack action. Returns whether the mission is complete afterwards.
fn attack_round(console: &mut Console, game: &mut GameSession) -> Result<bool> {
    let count = game.registry().count() as u32;
    loop {
        let attacker = console.number(
            &format!("Attacking territory (1-{count}, 0 to cancel): "),
            0..=count,
        )?;
        if attacker == 0 {
            return Ok(game.mission_complete());
        }
        let defender = console.number(&format!("Defending territory (1-{count}): "), 1..=count)?;

        match game.attack(attacker as usize - 1, defender as usize - 1) {
            Ok(report) => {
                render::battle(console.output(), &report)?;
                return Ok(report.mission_complete);
            }
            Err(err) => render::rejection(console.output(), &err)?,
        }
    }
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("war.log");

    let env_filter = EnvFilter::from_default_env();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
