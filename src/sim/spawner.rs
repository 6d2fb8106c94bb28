//! Window and item spawning
//!
//! Windows enter just past the right edge at a random height and drift left
//! at `WINDOW_SPEED` until they are fully off the left edge. Each window may
//! carry one item resting on its top edge, moving at the same speed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::TraversalPath;
use super::state::{
    BadItemKind, EntityId, GameEvent, GameState, GoodItemKind, ItemKind, PowerUpKind, WindowKind,
};
use crate::consts::*;

/// Item families for the spawn roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemClass {
    Good,
    Bad,
    PowerUp,
}

/// Weighted spawn table; the trailing power-up entry is dropped while any
/// power-up is active
pub const ITEM_CHANCES: [Option<ItemClass>; 11] = [
    None,
    None,
    Some(ItemClass::Good),
    Some(ItemClass::Good),
    Some(ItemClass::Good),
    Some(ItemClass::Good),
    Some(ItemClass::Good),
    Some(ItemClass::Bad),
    Some(ItemClass::Bad),
    Some(ItemClass::Bad),
    Some(ItemClass::PowerUp),
];

/// Uniform float in [min, max)
fn random_between(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

fn pick<T: Copy>(rng: &mut Pcg32, options: &[T]) -> T {
    options[rng.random_range(0..options.len())]
}

/// Roll which item family (if any) rides on the next window
pub fn roll_item_class(rng: &mut Pcg32, power_up_active: bool) -> Option<ItemClass> {
    let chances = if power_up_active {
        &ITEM_CHANCES[..ITEM_CHANCES.len() - 1]
    } else {
        &ITEM_CHANCES[..]
    };
    pick(rng, chances)
}

/// Pick a concrete item of the given family
pub fn roll_item_kind(rng: &mut Pcg32, class: ItemClass) -> ItemKind {
    match class {
        ItemClass::Good => ItemKind::Good(pick(rng, &GoodItemKind::ALL)),
        ItemClass::Bad => ItemKind::Bad(pick(rng, &BadItemKind::ALL)),
        ItemClass::PowerUp => ItemKind::PowerUp(pick(rng, &PowerUpKind::ALL)),
    }
}

/// Spawn a random window (and maybe an item) at frame time `now`
///
/// Also schedules the next spawn so consecutive windows are separated by
/// `SPAWN_MARGIN`.
pub fn spawn_window(state: &mut GameState, now: f64) -> EntityId {
    let half_scene = state.scene_size * 0.5;
    let power_up_active = state.power_ups.any_active();

    let kind = pick(&mut state.rng, &WindowKind::ALL);
    let size = kind.size();

    // Keep the window's top edge inside the spawn band
    let top_y = half_scene.y - SPAWN_MARGIN;
    let bottom_y = -half_scene.y + SPAWN_MARGIN;
    let window_y = random_between(
        &mut state.rng,
        bottom_y - size.y / 2.0,
        top_y - size.y / 2.0,
    );

    let start_x = half_scene.x + size.x / 2.0;
    let end_x = -(size.x / 2.0) - half_scene.x;
    let path = TraversalPath::new(
        Vec2::new(start_x, window_y),
        Vec2::new(end_x, window_y),
        now,
        WINDOW_SPEED,
    );
    let window_id = state.add_window(kind, path);

    // Next window enters once this one has moved its width plus the margin
    let spawn_x = start_x - size.x - SPAWN_MARGIN;
    state.spawn.next_wait = ((start_x - spawn_x) / WINDOW_SPEED) as f64;

    let item = roll_item_class(&mut state.rng, power_up_active)
        .map(|class| roll_item_kind(&mut state.rng, class));

    if let Some(item_kind) = item {
        let item_x = random_between(
            &mut state.rng,
            start_x - size.x / 2.0,
            start_x + size.x / 2.0,
        );
        let item_y = window_y + size.y / 2.0 + ITEM_SIZE / 2.0 + ITEM_LIFT;
        let item_path = TraversalPath::new(
            Vec2::new(item_x, item_y),
            Vec2::new(-(ITEM_SIZE / 2.0) - half_scene.x, item_y),
            now,
            WINDOW_SPEED,
        );
        state.add_item(item_kind, item_path);
    }

    log::debug!(
        "Spawned {:?} window {} at y={:.0} with {:?}, next in {:.2}s",
        kind,
        window_id,
        window_y,
        item,
        state.spawn.next_wait
    );
    state.emit(GameEvent::WindowSpawned {
        id: window_id,
        kind,
        item,
    });

    window_id
}
