//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only comes from the frame clock passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod category;
pub mod contact;
pub mod geometry;
pub mod lives;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use category::{Body, Category, ContactPair};
pub use contact::{begin_contact, end_contact};
pub use geometry::{Rect, TraversalPath};
pub use lives::{BatteryLevel, BlinkSequence};
pub use physics::{ContactEvent, ContactPhase};
pub use state::{
    BadItemKind, EntityId, GameEvent, GamePhase, GameState, GoodItemKind, Item, ItemKind,
    Player, PowerUpKind, Window, WindowKind,
};
pub use tick::{TickInput, tick};

/// Game state built from the embedded scene layout
#[cfg(test)]
pub(crate) fn test_state(seed: u64) -> GameState {
    let layout = crate::layout::SceneLayout::builtin().unwrap();
    GameState::new(&layout, seed).unwrap()
}
