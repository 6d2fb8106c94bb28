//! Demo autopilot
//!
//! Presses and releases the pointer on the player's behalf: jumps over bad
//! items sliding toward the player and jumps up to collect good items and
//! power-ups resting on nearby windows. Used by the headless demo and the
//! attract toggle in the browser build.

use super::state::{GameState, ItemKind};

/// How far ahead (in units) the autopilot looks for approaching items
const LOOKAHEAD: f32 = 160.0;
/// Highest item bottom (above the player's feet) worth jumping for
const REACH: f32 = 190.0;
/// Seconds to hold the pointer for a short hop
const SHORT_HOLD: f64 = 0.1;
/// Seconds to hold the pointer for a full jump
const LONG_HOLD: f64 = 0.3;

/// Pointer actions chosen for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerAction {
    pub down: bool,
    pub up: bool,
}

/// Decide pointer presses from the current state
pub fn decide(state: &GameState) -> PointerAction {
    let player = &state.player;
    let now = state.clock.current_time;

    if player.jump.holding {
        let held = now - player.jump.pressed_at;
        let hold_for = if wants_height(state) { LONG_HOLD } else { SHORT_HOLD };
        return PointerAction {
            down: false,
            up: held >= hold_for,
        };
    }

    if !state.is_on_ground {
        return PointerAction::default();
    }

    let bounds = player.bounds();
    let threat = state.items.iter().any(|item| {
        let b = item.bounds();
        matches!(item.kind, ItemKind::Bad(_))
            && b.left() > bounds.left()
            && b.left() - bounds.right() < LOOKAHEAD
            && b.bottom() < bounds.top()
            && b.top() > bounds.bottom()
    });

    PointerAction {
        down: threat || wants_height(state),
        up: false,
    }
}

/// A collectible rests within reach just ahead of the player
fn wants_height(state: &GameState) -> bool {
    let bounds = state.player.bounds();
    state.items.iter().any(|item| {
        let b = item.bounds();
        !matches!(item.kind, ItemKind::Bad(_))
            && b.right() > bounds.left()
            && b.left() - bounds.right() < LOOKAHEAD / 2.0
            && b.bottom() >= bounds.top()
            && b.bottom() - bounds.bottom() < REACH
    })
}
