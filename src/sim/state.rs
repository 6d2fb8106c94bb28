//! Game state and core simulation types
//!
//! Everything the update loop mutates lives in [`GameState`]. The contact
//! classifier, spawner and lives handler borrow it mutably; nothing is shared
//! through globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::category::{Body, Category};
use super::geometry::{Rect, TraversalPath};
use super::lives::{BatteryLevel, BlinkSequence};
use crate::consts::*;
use crate::layout::{SceneError, SceneLayout, nodes};

/// Identifier for spawned windows and items
pub type EntityId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Lives ran out; terminal for this state
    GameOver,
}

/// Power-up types (declaration order matches their category order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Good items score double
    DoubleScore,
    /// Bad items do no harm
    Invincibility,
    /// Restores one life
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::DoubleScore,
        PowerUpKind::Invincibility,
        PowerUpKind::ExtraLife,
    ];

    pub fn index(self) -> usize {
        match self {
            PowerUpKind::DoubleScore => 0,
            PowerUpKind::Invincibility => 1,
            PowerUpKind::ExtraLife => 2,
        }
    }
}

/// Collectible icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoodItemKind {
    Save,
    Command,
    Paint,
    Pencil,
    HappyMac,
}

impl GoodItemKind {
    pub const ALL: [GoodItemKind; 5] = [
        GoodItemKind::Save,
        GoodItemKind::Command,
        GoodItemKind::Paint,
        GoodItemKind::Pencil,
        GoodItemKind::HappyMac,
    ];
}

/// Harmful icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadItemKind {
    Watch,
    Trash,
    Bomb,
    ErrorMac,
}

impl BadItemKind {
    pub const ALL: [BadItemKind; 4] = [
        BadItemKind::Watch,
        BadItemKind::Trash,
        BadItemKind::Bomb,
        BadItemKind::ErrorMac,
    ];
}

/// What an item does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Good(GoodItemKind),
    Bad(BadItemKind),
    PowerUp(PowerUpKind),
}

impl ItemKind {
    pub fn category(self) -> Category {
        match self {
            ItemKind::Good(_) => Category::GoodItem,
            ItemKind::Bad(_) => Category::BadItem,
            ItemKind::PowerUp(kind) => Category::PowerUp(kind),
        }
    }
}

/// Window archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    Calculator,
    Puzzle,
    Finder,
    Controls,
    Map,
    Memory,
    Sound,
    Views,
}

impl WindowKind {
    pub const ALL: [WindowKind; 8] = [
        WindowKind::Calculator,
        WindowKind::Puzzle,
        WindowKind::Finder,
        WindowKind::Controls,
        WindowKind::Map,
        WindowKind::Memory,
        WindowKind::Sound,
        WindowKind::Views,
    ];

    /// On-screen size of this window
    pub fn size(self) -> Vec2 {
        match self {
            WindowKind::Calculator => Vec2::new(180.0, 240.0),
            WindowKind::Puzzle => Vec2::new(260.0, 200.0),
            WindowKind::Finder => Vec2::new(340.0, 220.0),
            WindowKind::Controls => Vec2::new(300.0, 160.0),
            WindowKind::Map => Vec2::new(360.0, 260.0),
            WindowKind::Memory => Vec2::new(240.0, 180.0),
            WindowKind::Sound => Vec2::new(280.0, 140.0),
            WindowKind::Views => Vec2::new(320.0, 200.0),
        }
    }
}

/// A drifting window; only its top edge is solid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    pub id: EntityId,
    pub kind: WindowKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub path: TraversalPath,
}

impl Window {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

/// An item riding along with a window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: EntityId,
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub path: TraversalPath,
}

impl Item {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn body(&self) -> Body {
        Body::item(self.kind.category(), self.id)
    }
}

/// Press-and-hold jump bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpState {
    /// Accumulated impulse of the current jump, in [MIN_JUMP_FORCE, MAX_JUMP_FORCE]
    pub force: f32,
    /// Pointer is held and boosts are being applied
    pub holding: bool,
    /// Frame clock time of the press
    pub pressed_at: f64,
    /// Frame clock time of the last boost (or the press)
    pub last_boost: f64,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            force: MIN_JUMP_FORCE,
            holding: false,
            pressed_at: 0.0,
            last_boost: 0.0,
        }
    }
}

/// The player sprite and its physics body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Moved by gravity; cleared when the game freezes
    pub dynamic: bool,
    /// Window tops block the player (the window bit of the collision mask)
    pub collides_with_windows: bool,
    pub jump: JumpState,
}

impl Player {
    pub fn new(bounds: Rect) -> Self {
        Self {
            pos: bounds.center,
            size: bounds.size,
            vel: Vec2::ZERO,
            dynamic: true,
            collides_with_windows: true,
            jump: JumpState::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Apply an impulse along +y
    pub fn apply_impulse(&mut self, impulse: f32) {
        self.vel.y += impulse / PLAYER_MASS;
    }
}

/// Active power-ups, each with its own activation time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUps {
    activated_at: [Option<f64>; 3],
}

impl PowerUps {
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.activated_at[kind.index()].is_some()
    }

    pub fn any_active(&self) -> bool {
        self.activated_at.iter().any(Option::is_some)
    }

    pub fn activated_at(&self, kind: PowerUpKind) -> Option<f64> {
        self.activated_at[kind.index()]
    }

    /// Activate (or re-activate) a power-up, restarting its timer
    pub fn activate(&mut self, kind: PowerUpKind, now: f64) {
        self.activated_at[kind.index()] = Some(now);
    }

    /// Clear every power-up active for at least `duration`; returns the cleared kinds
    pub fn expire(&mut self, now: f64, duration: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = &mut self.activated_at[kind.index()];
            if slot.is_some_and(|at| now - at >= duration) {
                *slot = None;
                expired.push(kind);
            }
        }
        expired
    }
}

/// Frame timing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameClock {
    pub last_time: Option<f64>,
    pub current_time: f64,
}

impl FrameClock {
    /// Record a new frame time and return the elapsed seconds (0 on the first frame)
    pub fn advance(&mut self, current_time: f64) -> f64 {
        let elapsed = match self.last_time {
            Some(last) => (current_time - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(current_time);
        self.current_time = current_time;
        elapsed
    }
}

/// Window spawn timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub last_spawn: f64,
    /// Seconds until the next window, derived from the last window's width
    pub next_wait: f64,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            last_spawn: 0.0,
            next_wait: FIRST_SPAWN_DELAY,
        }
    }
}

/// Static HUD placement from the scene layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudLayout {
    pub score_label: Rect,
    pub battery: Rect,
    pub double_indicator: Rect,
}

/// Things that happened during a tick, drained by the host for audio/HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    WindowSpawned {
        id: EntityId,
        kind: WindowKind,
        item: Option<ItemKind>,
    },
    Jumped,
    ItemCollected {
        kind: GoodItemKind,
        points: u64,
    },
    ItemHit {
        kind: BadItemKind,
    },
    /// Bad item touched while invincible
    ItemShrugged {
        kind: BadItemKind,
    },
    TrashTouched,
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    LifeLost {
        lives: u8,
    },
    LifeGained {
        lives: u8,
    },
    Saying {
        index: usize,
    },
    /// Lives reached zero; the blink sequence starts
    GameOver {
        score: u64,
    },
    /// Blink sequence finished; the game-over scene should be shown
    PresentGameOver {
        score: u64,
    },
}

/// Complete game state for one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub scene_size: Vec2,
    /// Play area; its bottom edge is the floor
    pub arena: Rect,
    pub left_wall: Rect,
    pub right_wall: Rect,
    pub hud: HudLayout,
    pub player: Player,
    pub lives: u8,
    pub score: u64,
    pub battery: BatteryLevel,
    /// Battery node shown (false during the "off" half of a blink)
    pub battery_visible: bool,
    pub power_ups: PowerUps,
    pub is_on_ground: bool,
    pub is_colliding_with_window: bool,
    pub colliding_window: Option<EntityId>,
    /// Active windows (sorted by id)
    pub windows: Vec<Window>,
    /// Active items (sorted by id)
    pub items: Vec<Item>,
    pub clock: FrameClock,
    pub spawn: SpawnSchedule,
    pub last_saying: f64,
    pub blink: Option<BlinkSequence>,
    pub game_over_presented: bool,
    /// Bodies the player touched at the end of the last physics step
    pub touching: Vec<Body>,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameState {
    /// Build the game scene from its layout
    pub fn new(layout: &SceneLayout, seed: u64) -> Result<Self, SceneError> {
        let player = Player::new(layout.rect(nodes::PLAYER)?);
        let hud = HudLayout {
            score_label: layout.rect(nodes::SCORE_LABEL)?,
            battery: layout.rect(nodes::BATTERY)?,
            double_indicator: layout.rect(nodes::DOUBLE_INDICATOR)?,
        };

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            scene_size: layout.size(),
            arena: layout.rect(nodes::BOUNDS)?,
            left_wall: layout.rect(nodes::LEFT_WALL)?,
            right_wall: layout.rect(nodes::RIGHT_WALL)?,
            hud,
            player,
            lives: MAX_LIVES,
            score: 0,
            battery: BatteryLevel::Full,
            battery_visible: true,
            power_ups: PowerUps::default(),
            is_on_ground: true,
            is_colliding_with_window: false,
            colliding_window: None,
            windows: Vec::new(),
            items: Vec::new(),
            clock: FrameClock::default(),
            spawn: SpawnSchedule::default(),
            last_saying: 0.0,
            blink: None,
            game_over_presented: false,
            touching: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn add_window(&mut self, kind: WindowKind, path: TraversalPath) -> EntityId {
        let id = self.next_entity_id();
        self.windows.push(Window {
            id,
            kind,
            pos: path.start,
            size: kind.size(),
            path,
        });
        id
    }

    pub fn add_item(&mut self, kind: ItemKind, path: TraversalPath) -> EntityId {
        let id = self.next_entity_id();
        self.items.push(Item {
            id,
            kind,
            pos: path.start,
            size: Vec2::splat(ITEM_SIZE),
            path,
        });
        id
    }

    pub fn window(&self, id: EntityId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn item(&self, id: EntityId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Remove an item, returning it if it was still present
    pub fn remove_item(&mut self, id: EntityId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.windows.sort_by_key(|w| w.id);
        self.items.sort_by_key(|i| i.id);
    }
}
