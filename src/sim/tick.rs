//! Per-frame simulation tick
//!
//! Core game loop: paddle, ball, paddle contact, then every shape in input
//! order, then the outcome.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::random::RandomSource;
use super::shape::label;
use super::state::{Game, GameEvent, Outcome};

/// Key state snapshot for a single tick
///
/// Built by whatever captures input; holds the keys currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    held: HashSet<u32>,
}

impl TickInput {
    /// Builder form of `press`
    pub fn with_key(mut self, code: u32) -> Self {
        self.press(code);
        self
    }

    pub fn press(&mut self, code: u32) {
        self.held.insert(code);
    }

    pub fn release(&mut self, code: u32) {
        self.held.remove(&code);
    }

    pub fn is_held(&self, code: u32) -> bool {
        self.held.contains(&code)
    }
}

/// Advance the game by one frame
pub fn tick<R: RandomSource>(game: &mut Game<R>, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let bounds = game.bounds();
    game.time_ticks += 1;

    game.player.advance(&bounds, input);

    if let Some(wall) = game.ball.advance(&bounds, &mut game.rng) {
        events.push(GameEvent::WallHit(wall));
    }

    if game.ball.collide_player(&mut game.player) {
        events.push(GameEvent::PaddleHit);
    }

    let total = game.shapes.len();
    for shape in &mut game.shapes {
        let Some(properties) = shape.collide(&mut game.ball) else {
            continue;
        };
        let text = label(properties, &game.settings.property_key);
        game.broken += 1;
        log::debug!(
            "Broke shape {} '{}' ({} of {})",
            shape.id(),
            text,
            game.broken,
            total
        );
        events.push(GameEvent::ShapeBroken {
            id: shape.id(),
            label: text.clone(),
        });
        game.last_label = text;
    }

    // Win is checked first; an empty wall can only be lost
    if game.outcome == Outcome::Running {
        let (broken, total) = game.score();
        let outcome = if total > 0 && broken == total {
            Outcome::Won
        } else if game.ball.is_stopped() {
            Outcome::Lost
        } else {
            Outcome::Running
        };
        if outcome.is_terminal() {
            log::info!("{:?} after {} ticks ({broken} of {total})", outcome, game.time_ticks);
            game.outcome = outcome;
            events.push(GameEvent::Finished(outcome));
        }
    }

    events
}

/// Cooperative stop flag checked once per tick by `run`
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drive `tick` until cancelled, finished, or `max_ticks` frames have run.
///
/// `input` is polled once per frame for the key snapshot. Returns the number
/// of ticks run.
pub fn run<R, F>(
    game: &mut Game<R>,
    token: &CancelToken,
    max_ticks: Option<u64>,
    mut input: F,
) -> u64
where
    R: RandomSource,
    F: FnMut(&Game<R>) -> TickInput,
{
    let mut ticks = 0;
    while !token.is_cancelled()
        && !game.outcome().is_terminal()
        && max_ticks.is_none_or(|max| ticks < max)
    {
        let snapshot = input(game);
        tick(game, &snapshot);
        ticks += 1;
    }
    ticks
}
