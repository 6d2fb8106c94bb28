//! Lives, battery indicator and the game-over sequence

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Battery indicator state, one per life count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryLevel {
    Empty,
    Low,
    Mid,
    Full,
}

impl BatteryLevel {
    pub fn from_lives(lives: u8) -> Self {
        match lives {
            0 => BatteryLevel::Empty,
            1 => BatteryLevel::Low,
            2 => BatteryLevel::Mid,
            _ => BatteryLevel::Full,
        }
    }

    /// Number of lit cells drawn in the indicator
    pub fn cells(self) -> u32 {
        match self {
            BatteryLevel::Empty => 0,
            BatteryLevel::Low => 1,
            BatteryLevel::Mid => 2,
            BatteryLevel::Full => 3,
        }
    }
}

/// Battery blink played after the last life is lost
///
/// Each blink hides the battery for `BLINK_INTERVAL`, then shows it for
/// `BLINK_INTERVAL`; `BLINK_COUNT` blinks in total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlinkSequence {
    pub started_at: f64,
}

impl BlinkSequence {
    pub fn duration() -> f64 {
        BLINK_COUNT as f64 * BLINK_INTERVAL * 2.0
    }

    pub fn battery_visible(&self, now: f64) -> bool {
        let elapsed = now - self.started_at;
        if elapsed >= Self::duration() || elapsed < 0.0 {
            return true;
        }
        elapsed % (BLINK_INTERVAL * 2.0) >= BLINK_INTERVAL
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= Self::duration()
    }
}

/// Remove one life; reaching zero ends the game
pub fn lose_life(state: &mut GameState) {
    if state.lives == 0 {
        return;
    }
    state.lives -= 1;
    log::info!("Life lost, {} left", state.lives);
    state.emit(GameEvent::LifeLost { lives: state.lives });
    update_lives_counter(state);
}

/// Add one life, up to `MAX_LIVES` (never after game over)
pub fn gain_life(state: &mut GameState) {
    if state.lives >= MAX_LIVES || state.phase == GamePhase::GameOver {
        return;
    }
    state.lives += 1;
    log::info!("Life gained, {} left", state.lives);
    state.emit(GameEvent::LifeGained { lives: state.lives });
    update_lives_counter(state);
}

fn update_lives_counter(state: &mut GameState) {
    state.battery = BatteryLevel::from_lives(state.lives);
    if state.lives == 0 {
        enter_game_over(state);
    }
}

/// Freeze the scene and start the blink sequence (once)
pub fn enter_game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let now = state.clock.current_time;
    state.phase = GamePhase::GameOver;
    state.player.dynamic = false;
    state.player.vel = Vec2::ZERO;
    state.player.jump.holding = false;
    state.blink = Some(BlinkSequence { started_at: now });
    log::info!("Game over at {:.2}s, score {}", now, state.score);
    state.emit(GameEvent::GameOver { score: state.score });
}

/// Advance the blink; emits `PresentGameOver` exactly once when it ends
pub fn advance_game_over(state: &mut GameState, now: f64) {
    let Some(blink) = state.blink else {
        return;
    };
    state.battery_visible = blink.battery_visible(now);
    if blink.is_finished(now) && !state.game_over_presented {
        state.game_over_presented = true;
        state.emit(GameEvent::PresentGameOver { score: state.score });
    }
}
