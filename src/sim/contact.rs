//! Contact classification
//!
//! The host world reports contact begin/end between two bodies. Both handlers
//! put the pair in canonical order first, then only act when the player is the
//! first participant. Contacts with entities that no longer exist are ignored.

use super::category::{Body, Category, ContactPair};
use super::lives::{gain_life, lose_life};
use super::state::{BadItemKind, EntityId, GameEvent, GameState, ItemKind, PowerUpKind};

/// Apply the gameplay effect of a new contact
pub fn begin_contact(state: &mut GameState, a: Body, b: Body) {
    let pair = ContactPair::ordered(a, b);
    log::trace!("Contact begin {:#05x}", pair.mask());
    let Some(other) = pair.player_other() else {
        return;
    };

    match other.category {
        Category::GoodItem | Category::BadItem | Category::PowerUp(_) => {
            if let Some(id) = other.entity {
                touch_item(state, id);
            }
        }
        Category::Window => {
            let Some(window) = other.entity.and_then(|id| state.window(id)) else {
                return;
            };
            let id = window.id;
            let above = state.player.bottom() > window.top();
            state.is_colliding_with_window = true;
            state.colliding_window = Some(id);
            if above {
                state.is_on_ground = true;
            }
        }
        Category::BottomBorder => state.is_on_ground = true,
        Category::Player | Category::SideBorder => {}
    }
}

/// Undo standing state when the player leaves a window or the floor
pub fn end_contact(state: &mut GameState, a: Body, b: Body) {
    let pair = ContactPair::ordered(a, b);
    log::trace!("Contact end {:#05x}", pair.mask());
    let Some(other) = pair.player_other() else {
        return;
    };

    match other.category {
        Category::Window => {
            state.is_colliding_with_window = false;
            state.colliding_window = None;
            state.is_on_ground = false;
        }
        Category::BottomBorder => state.is_on_ground = false,
        _ => {}
    }
}

fn touch_item(state: &mut GameState, id: EntityId) {
    let Some(kind) = state.item(id).map(|item| item.kind) else {
        return;
    };
    let now = state.clock.current_time;

    match kind {
        ItemKind::Good(good) => {
            state.remove_item(id);
            let points = if state.power_ups.is_active(PowerUpKind::DoubleScore) {
                2
            } else {
                1
            };
            state.score += points;
            state.emit(GameEvent::ItemCollected { kind: good, points });
        }
        ItemKind::Bad(bad) => {
            if state.power_ups.is_active(PowerUpKind::Invincibility) {
                state.emit(GameEvent::ItemShrugged { kind: bad });
            } else {
                state.remove_item(id);
                state.emit(GameEvent::ItemHit { kind: bad });
                lose_life(state);
            }
            if bad == BadItemKind::Trash {
                state.emit(GameEvent::TrashTouched);
                state.last_saying = now;
            }
        }
        ItemKind::PowerUp(power_up) => {
            state.remove_item(id);
            state.power_ups.activate(power_up, now);
            log::info!("Power-up {:?} active at {:.2}s", power_up, now);
            if power_up == PowerUpKind::ExtraLife {
                gain_life(state);
            }
            state.emit(GameEvent::PowerUpActivated(power_up));
            state.last_saying = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::geometry::TraversalPath;
    use crate::sim::state::{GamePhase, GoodItemKind, WindowKind};
    use crate::sim::test_state;
    use crate::sim::BatteryLevel;
    use glam::Vec2;
    use proptest::prelude::*;

    fn still_path(pos: Vec2) -> TraversalPath {
        TraversalPath::new(pos, pos, 0.0, WINDOW_SPEED)
    }

    fn add_item(state: &mut GameState, kind: ItemKind) -> Body {
        let id = state.add_item(kind, still_path(Vec2::new(0.0, 0.0)));
        state.item(id).unwrap().body()
    }

    #[test]
    fn test_good_item_scores_one() {
        let mut state = test_state(1);
        let item = add_item(&mut state, ItemKind::Good(GoodItemKind::Save));

        begin_contact(&mut state, item, Body::player());

        assert_eq!(state.score, 1);
        assert!(state.items.is_empty());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ItemCollected {
                kind: GoodItemKind::Save,
                points: 1
            }]
        );
    }

    #[test]
    fn test_double_score_doubles_points() {
        let mut state = test_state(1);
        state.power_ups.activate(PowerUpKind::DoubleScore, 0.0);
        let item = add_item(&mut state, ItemKind::Good(GoodItemKind::Pencil));

        begin_contact(&mut state, Body::player(), item);

        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_bad_item_on_last_life_ends_game() {
        let mut state = test_state(1);
        state.lives = 1;
        state.battery = BatteryLevel::Low;
        state.player.vel = Vec2::new(0.0, -200.0);
        let item = add_item(&mut state, ItemKind::Bad(BadItemKind::Bomb));

        begin_contact(&mut state, Body::player(), item);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.battery, BatteryLevel::Empty);
        assert!(!state.player.dynamic);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_invincible_player_passes_through_bad_item() {
        let mut state = test_state(1);
        state.power_ups.activate(PowerUpKind::Invincibility, 0.0);
        let item = add_item(&mut state, ItemKind::Bad(BadItemKind::Watch));

        begin_contact(&mut state, Body::player(), item);

        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.items.len(), 1);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ItemShrugged {
                kind: BadItemKind::Watch
            }]
        );
    }

    #[test]
    fn test_trash_resets_sayings_timer() {
        let mut state = test_state(1);
        state.clock.advance(4.5);
        let item = add_item(&mut state, ItemKind::Bad(BadItemKind::Trash));

        begin_contact(&mut state, Body::player(), item);

        assert_eq!(state.last_saying, 4.5);
        assert_eq!(state.lives, MAX_LIVES - 1);
        assert!(state.drain_events().contains(&GameEvent::TrashTouched));
    }

    #[test]
    fn test_extra_life_power_up() {
        let mut state = test_state(1);
        state.lives = 2;
        state.battery = BatteryLevel::Mid;
        state.clock.advance(3.0);
        let item = add_item(&mut state, ItemKind::PowerUp(PowerUpKind::ExtraLife));

        begin_contact(&mut state, Body::player(), item);

        assert_eq!(state.lives, 3);
        assert_eq!(state.battery, BatteryLevel::Full);
        assert_eq!(state.power_ups.activated_at(PowerUpKind::ExtraLife), Some(3.0));
        assert_eq!(state.last_saying, 3.0);
    }

    #[test]
    fn test_window_contact_from_above_grounds_player() {
        let mut state = test_state(1);
        let top = state.player.bottom() - 1.0;
        let size = WindowKind::Sound.size();
        let id = state.add_window(
            WindowKind::Sound,
            still_path(Vec2::new(state.player.pos.x, top - size.y / 2.0)),
        );
        state.is_on_ground = false;

        begin_contact(&mut state, Body::player(), Body::window(id));
        assert!(state.is_colliding_with_window);
        assert_eq!(state.colliding_window, Some(id));
        assert!(state.is_on_ground);

        end_contact(&mut state, Body::window(id), Body::player());
        assert!(!state.is_colliding_with_window);
        assert_eq!(state.colliding_window, None);
        assert!(!state.is_on_ground);
    }

    #[test]
    fn test_window_contact_from_side_does_not_ground() {
        let mut state = test_state(1);
        let id = state.add_window(WindowKind::Map, still_path(state.player.pos));
        state.is_on_ground = false;

        begin_contact(&mut state, Body::player(), Body::window(id));

        assert!(state.is_colliding_with_window);
        assert!(!state.is_on_ground);
    }

    #[test]
    fn test_bottom_border_toggles_ground() {
        let mut state = test_state(1);
        end_contact(&mut state, Body::player(), Body::bottom_border());
        assert!(!state.is_on_ground);
        begin_contact(&mut state, Body::bottom_border(), Body::player());
        assert!(state.is_on_ground);
    }

    #[test]
    fn test_vanished_entities_are_ignored() {
        let mut state = test_state(1);
        begin_contact(&mut state, Body::player(), Body::item(Category::GoodItem, 99));
        begin_contact(&mut state, Body::player(), Body::window(99));
        assert_eq!(state.score, 0);
        assert!(!state.is_colliding_with_window);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_non_player_pairs_have_no_effect() {
        let mut state = test_state(1);
        let item = add_item(&mut state, ItemKind::Good(GoodItemKind::Paint));
        begin_contact(&mut state, Body::window(5), item);
        begin_contact(&mut state, item, Body::bottom_border());
        assert_eq!(state.score, 0);
        assert_eq!(state.items.len(), 1);
    }

    proptest! {
        #[test]
        fn score_increments_by_one_or_two(double in any::<bool>(), count in 1usize..20) {
            let mut state = test_state(4);
            if double {
                state.power_ups.activate(PowerUpKind::DoubleScore, 0.0);
            }
            for _ in 0..count {
                let before = state.score;
                let item = add_item(&mut state, ItemKind::Good(GoodItemKind::HappyMac));
                begin_contact(&mut state, Body::player(), item);
                prop_assert_eq!(state.score - before, if double { 2 } else { 1 });
            }
        }
    }
}
