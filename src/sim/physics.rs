//! Kinematic host world
//!
//! Stands in for a physics engine around the gameplay core:
//! - Gravity on the player while it is dynamic
//! - Floor, ceiling and side walls keep the player in the arena
//! - Window tops are one-way platforms, solid only while the player's window
//!   collision flag is set
//! - Contact begin/end events for everything the player touches
//!
//! A window's body is only its top edge. Contact detection ignores the
//! collision flag, so the player still reports contact with an edge it is
//! passing through.

use super::category::{Body, Category};
use super::geometry::Rect;
use super::state::GameState;
use crate::consts::*;

/// Whether a contact started or ended this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Begin,
    End,
}

/// A contact report; `a` is the other body, `b` the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub phase: ContactPhase,
    pub a: Body,
    pub b: Body,
}

impl ContactEvent {
    fn new(phase: ContactPhase, other: Body) -> Self {
        Self {
            phase,
            a: other,
            b: Body::player(),
        }
    }
}

/// Integrate the player over `dt` seconds and report contact changes
///
/// Ends are reported before begins. Resting support contacts (floor and
/// windows) are re-reported as begins whenever another contact ends in the
/// same step, the way an engine refreshes resting contacts.
pub fn step(state: &mut GameState, dt: f32) -> Vec<ContactEvent> {
    if state.player.dynamic && dt > 0.0 {
        integrate(state, dt);
    }

    let touching = touching_bodies(state);
    let mut events = Vec::new();

    for body in &state.touching {
        if !touching.contains(body) {
            events.push(ContactEvent::new(ContactPhase::End, *body));
        }
    }
    let any_ended = !events.is_empty();

    for body in &touching {
        let is_new = !state.touching.contains(body);
        let refresh = any_ended && is_support(body);
        if is_new || refresh {
            events.push(ContactEvent::new(ContactPhase::Begin, *body));
        }
    }

    state.touching = touching;
    events
}

fn is_support(body: &Body) -> bool {
    matches!(body.category, Category::BottomBorder | Category::Window)
}

fn integrate(state: &mut GameState, dt: f32) {
    let prev_bottom = state.player.bottom();
    let player = &mut state.player;

    player.vel.y -= GRAVITY * dt;
    player.pos += player.vel * dt;

    // One-way window tops, swept from the previous position
    if player.collides_with_windows && player.vel.y <= 0.0 {
        let bounds = player.bounds();
        let landing = state
            .windows
            .iter()
            .filter(|w| w.bounds().overlaps_x(&bounds))
            .map(|w| w.top())
            .filter(|&top| prev_bottom >= top - CONTACT_EPSILON && bounds.bottom() < top)
            .fold(None, |best: Option<f32>, top| {
                Some(best.map_or(top, |b| b.max(top)))
            });
        if let Some(top) = landing {
            player.pos.y = top + player.size.y / 2.0 + CONTACT_SKIN;
            player.vel.y = 0.0;
        }
    }

    let floor = state.arena.bottom();
    if player.bottom() < floor {
        player.pos.y = floor + player.size.y / 2.0;
        player.vel.y = 0.0;
    }

    let ceiling = state.arena.top();
    if player.pos.y + player.size.y / 2.0 > ceiling {
        player.pos.y = ceiling - player.size.y / 2.0;
        player.vel.y = player.vel.y.min(0.0);
    }

    let half_w = player.size.x / 2.0;
    let min_x = state.left_wall.right() + half_w;
    let max_x = state.right_wall.left() - half_w;
    if min_x <= max_x {
        player.pos.x = player.pos.x.clamp(min_x, max_x);
    }
}

/// Bodies in contact with the player right now, in a stable order
fn touching_bodies(state: &GameState) -> Vec<Body> {
    let player = state.player.bounds();
    let near = |other: &Rect| player.overlaps(&other.inset(-CONTACT_EPSILON));
    let mut bodies = Vec::new();

    if player.bottom() <= state.arena.bottom() + CONTACT_EPSILON {
        bodies.push(Body::bottom_border());
    }
    if near(&state.left_wall) || near(&state.right_wall) {
        bodies.push(Body::side_border());
    }
    for window in &state.windows {
        if crosses_top_edge(&player, &window.bounds()) {
            bodies.push(Body::window(window.id));
        }
    }
    for item in &state.items {
        if player.overlaps(&item.bounds()) {
            bodies.push(item.body());
        }
    }
    bodies
}

/// Player box touches or straddles the top edge of `window`
fn crosses_top_edge(player: &Rect, window: &Rect) -> bool {
    let top = window.top();
    player.overlaps_x(window)
        && player.bottom() <= top + CONTACT_EPSILON
        && player.top() >= top - CONTACT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::TraversalPath;
    use crate::sim::state::{GoodItemKind, ItemKind, WindowKind};
    use crate::sim::test_state;
    use glam::Vec2;

    fn still(pos: Vec2) -> TraversalPath {
        TraversalPath::new(pos, pos, 0.0, WINDOW_SPEED)
    }

    fn run(state: &mut GameState, steps: usize) -> Vec<ContactEvent> {
        let mut all = Vec::new();
        for _ in 0..steps {
            all.extend(step(state, SIM_DT as f32));
        }
        all
    }

    #[test]
    fn test_resting_player_reports_floor_once() {
        let mut state = test_state(1);
        let events = run(&mut state, 30);
        assert_eq!(
            events,
            vec![ContactEvent::new(ContactPhase::Begin, Body::bottom_border())]
        );
        assert!((state.player.bottom() - state.arena.bottom()).abs() < 1e-3);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_jump_leaves_and_returns_to_floor() {
        let mut state = test_state(1);
        run(&mut state, 1);
        state.player.apply_impulse(MIN_JUMP_FORCE);
        let events = run(&mut state, 240);
        assert_eq!(events[0], ContactEvent::new(ContactPhase::End, Body::bottom_border()));
        assert_eq!(
            *events.last().unwrap(),
            ContactEvent::new(ContactPhase::Begin, Body::bottom_border())
        );
    }

    #[test]
    fn test_falling_player_lands_on_window_top() {
        let mut state = test_state(1);
        let size = WindowKind::Finder.size();
        let top = -100.0;
        let id = state.add_window(
            WindowKind::Finder,
            still(Vec2::new(state.player.pos.x, top - size.y / 2.0)),
        );
        state.player.pos.y = 40.0;
        state.player.vel = Vec2::ZERO;

        let events = run(&mut state, 120);

        assert!(events.contains(&ContactEvent::new(ContactPhase::Begin, Body::window(id))));
        assert!(state.player.bottom() >= top);
        assert!(state.player.bottom() <= top + CONTACT_EPSILON);
    }

    #[test]
    fn test_window_not_solid_without_flag() {
        let mut state = test_state(1);
        let size = WindowKind::Finder.size();
        state.add_window(
            WindowKind::Finder,
            still(Vec2::new(state.player.pos.x, -100.0 - size.y / 2.0)),
        );
        state.player.pos.y = 40.0;
        state.player.collides_with_windows = false;

        run(&mut state, 240);

        assert!((state.player.bottom() - state.arena.bottom()).abs() < 1e-3);
    }

    #[test]
    fn test_window_above_head_is_no_contact() {
        let mut state = test_state(1);
        let size = WindowKind::Map.size();
        let top = state.player.bounds().top() + 100.0;
        state.add_window(
            WindowKind::Map,
            still(Vec2::new(state.player.pos.x, top - size.y / 2.0)),
        );

        let events = run(&mut state, 2);

        assert_eq!(
            events,
            vec![ContactEvent::new(ContactPhase::Begin, Body::bottom_border())]
        );
    }

    #[test]
    fn test_rising_through_window_top_reports_contact() {
        let mut state = test_state(1);
        let size = WindowKind::Sound.size();
        let top = state.player.pos.y;
        let id = state.add_window(
            WindowKind::Sound,
            still(Vec2::new(state.player.pos.x, top - size.y / 2.0)),
        );
        state.player.collides_with_windows = false;

        let events = run(&mut state, 1);

        assert!(events.contains(&ContactEvent::new(ContactPhase::Begin, Body::window(id))));
    }

    #[test]
    fn test_item_overlap_reported() {
        let mut state = test_state(1);
        let id = state.add_item(ItemKind::Good(GoodItemKind::Save), still(state.player.pos));
        let events = step(&mut state, SIM_DT as f32);
        let body = state.item(id).unwrap().body();
        assert!(events.contains(&ContactEvent::new(ContactPhase::Begin, body)));
    }

    #[test]
    fn test_frozen_player_does_not_move() {
        let mut state = test_state(1);
        state.player.pos.y = 100.0;
        state.player.dynamic = false;
        run(&mut state, 60);
        assert_eq!(state.player.pos.y, 100.0);
    }

    #[test]
    fn test_player_stays_below_ceiling() {
        let mut state = test_state(1);
        state.player.vel.y = 5000.0;
        run(&mut state, 30);
        assert!(state.player.pos.y + state.player.size.y / 2.0 <= state.arena.top() + 1e-3);
    }
}
