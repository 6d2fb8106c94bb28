//! Per-frame simulation tick
//!
//! Core game loop for the game scene: timers, spawning, power-up expiry, the
//! window collision mask, traversal paths, jumping and contact handling.

use rand::Rng;

use super::autopilot;
use super::contact::{begin_contact, end_contact};
use super::lives::advance_game_over;
use super::physics::{self, ContactPhase};
use super::spawner::spawn_window;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer pressed (mouse down, touch start, Space/Enter)
    pub pointer_down: bool,
    /// Pointer released
    pub pointer_up: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Advance the game to frame clock `current_time` (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, current_time: f64) {
    // Frozen scene: only the blink sequence runs
    if state.phase == GamePhase::GameOver {
        advance_game_over(state, current_time);
        return;
    }

    // Timers count from the first frame the scene sees
    if state.clock.last_time.is_none() {
        state.spawn.last_spawn = current_time;
        state.last_saying = current_time;
    }
    let elapsed = state.clock.advance(current_time);

    let mut input = input.clone();
    if input.autopilot {
        let action = autopilot::decide(state);
        input.pointer_down |= action.down;
        input.pointer_up |= action.up;
    }

    if input.pointer_down {
        begin_jump(state);
    }
    if input.pointer_up {
        end_jump(state);
    }

    update(state, current_time);
    run_actions(state, current_time);

    for contact in physics::step(state, elapsed as f32) {
        if state.is_game_over() {
            break;
        }
        match contact.phase {
            ContactPhase::Begin => begin_contact(state, contact.a, contact.b),
            ContactPhase::End => end_contact(state, contact.a, contact.b),
        }
    }

    state.normalize_order();
}

/// Timers, spawning, expiry and the window collision mask
fn update(state: &mut GameState, now: f64) {
    if now - state.last_saying >= TIME_BETWEEN_SAYINGS {
        let index = state.rng.random_range(0..SAYING_COUNT);
        state.emit(GameEvent::Saying { index });
        state.last_saying = now;
    }

    if now - state.spawn.last_spawn >= state.spawn.next_wait {
        spawn_window(state, now);
        state.spawn.last_spawn = now;
    }

    for kind in state.power_ups.expire(now, POWER_UP_DURATION) {
        log::info!("Power-up {:?} expired at {:.2}s", kind, now);
        state.emit(GameEvent::PowerUpExpired(kind));
    }

    update_window_mask(state);
}

/// Make windows solid only when the player can land on them
fn update_window_mask(state: &mut GameState) {
    if !state.is_colliding_with_window {
        // Rising passes through windows, falling lands on them
        state.player.collides_with_windows = state.player.vel.y <= 0.0;
    }

    let window = state
        .colliding_window
        .and_then(|id| state.window(id))
        .map(|w| w.bounds());

    match window {
        Some(window) if state.is_colliding_with_window => {
            if state.player.bottom() > window.top() {
                state.is_on_ground = true;
                state.player.collides_with_windows = true;
            } else if state.player.right() < window.left() {
                state.player.collides_with_windows = false;
            } else {
                state.is_on_ground = false;
            }
        }
        _ => state.is_colliding_with_window = false,
    }
}

/// Move windows and items along their paths and apply the jump hold boost
fn run_actions(state: &mut GameState, now: f64) {
    for window in &mut state.windows {
        window.pos = window.path.position_at(now);
    }
    state.windows.retain(|w| !w.path.is_finished(now));

    for item in &mut state.items {
        item.pos = item.path.position_at(now);
    }
    state.items.retain(|i| !i.path.is_finished(now));

    let jump = &mut state.player.jump;
    while jump.holding && now - jump.last_boost + 1e-9 >= JUMP_BOOST_INTERVAL {
        jump.last_boost += JUMP_BOOST_INTERVAL;
        if jump.force < MAX_JUMP_FORCE {
            jump.force += JUMP_BOOST;
            state.player.vel.y += JUMP_BOOST / PLAYER_MASS;
        } else {
            jump.force = MAX_JUMP_FORCE;
        }
    }
}

/// Pointer down: jump if standing and start boosting while held
fn begin_jump(state: &mut GameState) {
    if !state.is_on_ground || state.player.jump.holding {
        return;
    }
    let now = state.clock.current_time;
    state.player.apply_impulse(MIN_JUMP_FORCE);
    let jump = &mut state.player.jump;
    jump.force = MIN_JUMP_FORCE;
    jump.holding = true;
    jump.pressed_at = now;
    jump.last_boost = now;
    state.emit(GameEvent::Jumped);
}

/// Pointer up: stop boosting and cut the rise short
fn end_jump(state: &mut GameState) {
    let player = &mut state.player;
    player.jump.holding = false;
    if player.vel.y > 0.0 {
        player.vel.y *= JUMP_RELEASE_DAMPING;
    }
    player.jump.force = MIN_JUMP_FORCE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::TraversalPath;
    use crate::sim::state::{BadItemKind, GoodItemKind, ItemKind, PowerUpKind};
    use crate::sim::test_state;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Tick at the fixed rate from `from` (inclusive) for `steps` frames
    fn run(state: &mut GameState, input: &TickInput, from: usize, steps: usize) -> f64 {
        let mut t = 0.0;
        for i in from..from + steps {
            t = i as f64 * SIM_DT;
            tick(state, input, t);
        }
        t
    }

    fn press() -> TickInput {
        TickInput {
            pointer_down: true,
            ..Default::default()
        }
    }

    fn release() -> TickInput {
        TickInput {
            pointer_up: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_window_after_one_second() {
        let mut state = test_state(12345);
        let idle = TickInput::default();

        run(&mut state, &idle, 0, 119);
        assert!(state.windows.is_empty());

        run(&mut state, &idle, 119, 3);
        assert_eq!(state.windows.len(), 1);
        let spawned = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::WindowSpawned { .. }))
            .count();
        assert_eq!(spawned, 1);
    }

    #[test]
    fn test_timers_start_at_first_frame() {
        let mut state = test_state(12345);
        tick(&mut state, &TickInput::default(), 500.0);
        assert!(state.windows.is_empty());
        tick(&mut state, &TickInput::default(), 501.0);
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn test_windows_removed_after_traversal() {
        let mut state = test_state(7);
        let idle = TickInput::default();
        tick(&mut state, &idle, 0.0);
        tick(&mut state, &idle, 1.0);
        let id = state.windows[0].id;
        let duration = state.windows[0].path.duration;

        tick(&mut state, &idle, 1.0 + duration / 2.0);
        assert!(state.window(id).is_some());
        tick(&mut state, &idle, 1.0 + duration + 0.01);
        assert!(state.window(id).is_none());
    }

    #[test]
    fn test_sayings_every_ten_seconds() {
        let mut state = test_state(3);
        let idle = TickInput::default();
        tick(&mut state, &idle, 0.0);
        tick(&mut state, &idle, 9.99);
        let sayings = |events: Vec<GameEvent>| {
            events
                .into_iter()
                .filter(|e| matches!(e, GameEvent::Saying { .. }))
                .count()
        };
        assert_eq!(sayings(state.drain_events()), 0);
        tick(&mut state, &idle, 10.0);
        assert_eq!(sayings(state.drain_events()), 1);
        assert_eq!(state.last_saying, 10.0);
    }

    #[test]
    fn test_jump_applies_min_force_and_boosts() {
        let mut state = test_state(1);
        tick(&mut state, &TickInput::default(), 0.0);

        tick(&mut state, &press(), SIM_DT);
        assert!(state.player.vel.y > 0.0);
        assert!(state.player.jump.holding);
        assert!(state.drain_events().contains(&GameEvent::Jumped));
        assert!(!state.is_on_ground);

        // Holding for 0.4s saturates the accumulated force
        let t = run(&mut state, &TickInput::default(), 2, 48);
        assert_eq!(state.player.jump.force, MAX_JUMP_FORCE);

        let before = state.player.vel.y;
        assert!(before > 0.0);
        tick(&mut state, &release(), t + SIM_DT);
        let expected = before * JUMP_RELEASE_DAMPING - GRAVITY * SIM_DT as f32;
        assert!((state.player.vel.y - expected).abs() < 1e-2);
        assert!(!state.player.jump.holding);
        assert_eq!(state.player.jump.force, MIN_JUMP_FORCE);
    }

    #[test]
    fn test_jump_from_floor_under_passing_window() {
        let mut state = test_state(1);
        let size = crate::sim::WindowKind::Map.size();
        let top = state.player.bounds().top() + 100.0;
        let pos = Vec2::new(state.player.pos.x, top - size.y / 2.0);
        // Drifts one unit over ten seconds, so it stays overhead
        let id = state.add_window(
            crate::sim::WindowKind::Map,
            TraversalPath::new(pos, pos - Vec2::X, 0.0, 0.1),
        );
        tick(&mut state, &TickInput::default(), 0.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.window(id).is_some());
        assert!(state.is_on_ground);
        assert!(!state.is_colliding_with_window);

        tick(&mut state, &press(), 2.0 * SIM_DT);
        assert!(state.player.jump.holding);
        assert!(state.player.vel.y > 0.0);
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut state = test_state(1);
        tick(&mut state, &TickInput::default(), 0.0);
        state.is_on_ground = false;
        tick(&mut state, &press(), SIM_DT);
        assert!(!state.player.jump.holding);
        assert!(state.player.vel.y <= 0.0);
    }

    #[test]
    fn test_window_mask_follows_vertical_velocity() {
        let mut state = test_state(1);
        state.player.vel.y = 300.0;
        update_window_mask(&mut state);
        assert!(!state.player.collides_with_windows);
        state.player.vel.y = -10.0;
        update_window_mask(&mut state);
        assert!(state.player.collides_with_windows);
    }

    #[test]
    fn test_window_mask_left_of_colliding_window() {
        let mut state = test_state(1);
        let window_x = state.player.right() + 200.0;
        let pos = Vec2::new(window_x, state.player.pos.y);
        let id = state.add_window(
            crate::sim::WindowKind::Calculator,
            TraversalPath::new(pos, pos, 0.0, WINDOW_SPEED),
        );
        state.is_colliding_with_window = true;
        state.colliding_window = Some(id);
        state.player.vel.y = -1.0;

        update_window_mask(&mut state);
        assert!(!state.player.collides_with_windows);

        // Colliding window that vanished is no collision at all
        state.windows.clear();
        update_window_mask(&mut state);
        assert!(!state.is_colliding_with_window);
    }

    #[test]
    fn test_bad_item_contact_costs_a_life() {
        let mut state = test_state(1);
        tick(&mut state, &TickInput::default(), 0.0);
        let pos = state.player.pos;
        state.add_item(
            ItemKind::Bad(BadItemKind::Watch),
            TraversalPath::new(pos, pos - Vec2::X, SIM_DT, WINDOW_SPEED),
        );
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_game_over_freezes_and_presents_once() {
        let mut state = test_state(1);
        tick(&mut state, &TickInput::default(), 0.0);
        state.lives = 1;
        let pos = state.player.pos;
        state.add_item(
            ItemKind::Bad(BadItemKind::Bomb),
            TraversalPath::new(pos, pos - Vec2::X, SIM_DT, WINDOW_SPEED),
        );
        // A good item under the player must not score after the game ends
        state.add_item(
            ItemKind::Good(GoodItemKind::Save),
            TraversalPath::new(pos, pos - Vec2::X, SIM_DT, WINDOW_SPEED),
        );
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        let frozen = state.player.pos;

        tick(&mut state, &press(), 1.0);
        assert_eq!(state.player.pos, frozen);
        assert!(!state.player.jump.holding);

        let mut presented = 0;
        for i in 1..=5 {
            tick(&mut state, &TickInput::default(), SIM_DT + i as f64);
            presented += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PresentGameOver { .. }))
                .count();
        }
        assert_eq!(presented, 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = test_state(99999);
        let mut state2 = test_state(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        run(&mut state1, &input, 0, 1200);
        run(&mut state2, &input, 0, 1200);

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.windows.len(), state2.windows.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut state = test_state(2024);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        run(&mut state, &input, 0, 120 * 20);
        assert!(state.lives <= MAX_LIVES);
        assert!(state.clock.current_time > 19.0 || state.is_game_over());
    }

    proptest! {
        #[test]
        fn power_up_clears_exactly_after_duration(
            start in 1u32..400,
            kind_index in 0usize..3,
        ) {
            let kind = PowerUpKind::ALL[kind_index];
            let mut state = test_state(5);
            let activated = start as f64 * 0.25;
            tick(&mut state, &TickInput::default(), activated - 0.5);
            state.clock.current_time = activated;
            state.power_ups.activate(kind, activated);

            tick(&mut state, &TickInput::default(), activated + POWER_UP_DURATION - 0.01);
            prop_assert!(state.power_ups.is_active(kind));

            tick(&mut state, &TickInput::default(), activated + POWER_UP_DURATION);
            prop_assert!(!state.power_ups.is_active(kind));
            prop_assert!(state.drain_events().contains(&GameEvent::PowerUpExpired(kind)));
        }
    }
}
