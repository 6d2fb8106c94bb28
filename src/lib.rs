//! Window Jumper - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (spawning, contacts, power-ups, lives)
//! - `layout`: Authored scene description and construction errors
//! - `scene`: Start / game / game-over flow
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Event-driven sound cues
//! - `settings`: Player preferences

pub mod audio;
pub mod layout;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use layout::{SceneError, SceneLayout};
pub use scene::{GameOverScreen, Scene};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration on the player (units/s²)
    pub const GRAVITY: f32 = 1470.0;
    /// Player mass, converts jump impulses to velocity
    pub const PLAYER_MASS: f32 = 0.75;

    /// Jump impulse applied on press
    pub const MIN_JUMP_FORCE: f32 = 500.0;
    /// Cap on the accumulated jump impulse while held
    pub const MAX_JUMP_FORCE: f32 = 800.0;
    /// Extra impulse per hold interval
    pub const JUMP_BOOST: f32 = 50.0;
    /// Seconds between hold boosts
    pub const JUMP_BOOST_INTERVAL: f64 = 0.05;
    /// Upward velocity kept when the pointer is released mid-jump
    pub const JUMP_RELEASE_DAMPING: f32 = 0.5;

    /// Window and item traversal speed (units/s)
    pub const WINDOW_SPEED: f32 = 400.0;
    /// Inset of the spawn band from the top/bottom edges, also the gap between windows
    pub const SPAWN_MARGIN: f32 = 75.0;
    /// Wait before the first window
    pub const FIRST_SPAWN_DELAY: f64 = 1.0;

    /// Item sprite edge length
    pub const ITEM_SIZE: f32 = 50.0;
    /// Gap between a window's top and the item resting on it
    pub const ITEM_LIFT: f32 = 5.0;

    /// Seconds a power-up stays active
    pub const POWER_UP_DURATION: f64 = 7.0;
    /// Seconds between random sayings
    pub const TIME_BETWEEN_SAYINGS: f64 = 10.0;
    /// Number of distinct sayings
    pub const SAYING_COUNT: usize = 6;

    /// Lives at start and upper bound
    pub const MAX_LIVES: u8 = 3;
    /// Battery blinks before the game-over scene
    pub const BLINK_COUNT: u32 = 3;
    /// Seconds the battery stays hidden, then shown, per blink
    pub const BLINK_INTERVAL: f64 = 0.5;

    /// Distance within which bodies count as touching
    pub const CONTACT_EPSILON: f32 = 1.0;
    /// Gap left between a landed player and the surface below
    pub const CONTACT_SKIN: f32 = 0.5;
}
