//! Headless Tomino runner (default binary).
//!
//! Plays one game with a seeded scripted player at a fixed 16 ms tick, printing
//! status lines and the final score. Set `TOMINO_EVENT_LOG` to a file path to
//! append every game event there as one JSON record per line.

use std::cell::{Cell, RefCell};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::rc::Rc;

use anyhow::{Context, Result};
use serde_json::json;

use tomino::config::GameConfig;
use tomino::core::{BagPieceProvider, EventKind, Game, GameEvent, QueuedInput, SimpleRng};
use tomino::types::PlayerAction;

const TICK_MS: u32 = 16;
const MAX_TICKS: u64 = 200_000;

type EventLog = Rc<RefCell<Option<BufWriter<File>>>>;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    config.validate().context("invalid TOMINO_* configuration")?;

    let log_path = std::env::var("TOMINO_EVENT_LOG")
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) });

    println!(
        "[Tomino] Board {}x{}, fall delay {} ms, seed {}",
        config.board_width, config.board_height, config.fall_delay_ms, config.seed
    );

    let mut game = Game::new(
        config.rules(),
        QueuedInput::new(),
        BagPieceProvider::new(config.seed),
    );

    let tick = Rc::new(Cell::new(0u64));
    let log: EventLog = match &log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open event log {path}"))?;
            println!("[Tomino] Logging events to {}", path);
            Rc::new(RefCell::new(Some(BufWriter::new(file))))
        }
        None => Rc::new(RefCell::new(None)),
    };

    if log.borrow().is_some() {
        for kind in EventKind::ALL {
            let log = Rc::clone(&log);
            let tick = Rc::clone(&tick);
            game.subscribe(kind, move |event| write_event(&log, tick.get(), event));
        }
    }

    let pieces = Rc::new(Cell::new(0u32));
    {
        let pieces = Rc::clone(&pieces);
        game.subscribe(EventKind::PieceLocked, move |_| pieces.set(pieces.get() + 1));
    }
    game.subscribe(EventKind::LevelUp, |event| {
        if let GameEvent::LevelUp(level) = event {
            println!("[Tomino] Level {}", level);
        }
    });

    let mut player = ScriptedPlayer::new(config.seed, config.board_width);
    game.start();

    while !game.is_finished() && tick.get() < MAX_TICKS {
        if game.input_mut().is_empty() {
            player.plan_next_piece(game.input_mut());
        }
        game.update(TICK_MS);
        tick.set(tick.get() + 1);
    }

    if let Some(writer) = log.borrow_mut().as_mut() {
        writer.flush().context("failed to flush event log")?;
    }

    if game.is_finished() {
        println!("[Tomino] Game over after {} ticks", tick.get());
    } else {
        println!("[Tomino] Stopped at tick cap ({} ticks)", MAX_TICKS);
    }
    println!(
        "[Tomino] Score {}, level {}, rows {}, pieces {}",
        game.score(),
        game.level(),
        game.rows_cleared(),
        pieces.get()
    );

    Ok(())
}

fn write_event(log: &EventLog, tick: u64, event: &GameEvent) {
    let mut slot = log.borrow_mut();
    let Some(writer) = slot.as_mut() else {
        return;
    };

    let record = match event {
        GameEvent::PieceLocked { rows_cleared } => {
            json!({ "tick": tick, "event": event.kind().as_str(), "rowsCleared": rows_cleared })
        }
        GameEvent::RowsCleared(rows) => {
            json!({ "tick": tick, "event": event.kind().as_str(), "rows": rows })
        }
        GameEvent::LevelUp(level) => {
            json!({ "tick": tick, "event": event.kind().as_str(), "level": level })
        }
        _ => json!({ "tick": tick, "event": event.kind().as_str() }),
    };

    let written = serde_json::to_writer(&mut *writer, &record)
        .map_err(std::io::Error::from)
        .and_then(|()| writer.write_all(b"\n"));
    if let Err(e) = written {
        eprintln!("[Tomino] Event log error: {}", e);
        *slot = None;
    }
}

/// Seeded stand-in for a player: a few rotations, a shift, then a drop
struct ScriptedPlayer {
    rng: SimpleRng,
    board_width: i32,
}

impl ScriptedPlayer {
    fn new(seed: u32, board_width: i32) -> Self {
        Self {
            rng: SimpleRng::new(seed ^ 0x9E37_79B9),
            board_width,
        }
    }

    fn plan_next_piece(&mut self, input: &mut QueuedInput) {
        for _ in 0..self.rng.next_range(4) {
            input.push(PlayerAction::Rotate);
        }

        let reach = (self.board_width / 2).max(1) as u32;
        let shift = self.rng.next_range(2 * reach + 1) as i32 - reach as i32;
        let step = if shift < 0 {
            PlayerAction::MoveLeft
        } else {
            PlayerAction::MoveRight
        };
        for _ in 0..shift.unsigned_abs() {
            input.push(step);
        }

        input.push(PlayerAction::Fall);
    }
}
