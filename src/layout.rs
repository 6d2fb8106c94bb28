//! Authored scene layout
//!
//! The game scene is described as JSON (scene size plus named nodes with a
//! position and size). Nodes are looked up by name when a game is built; a
//! missing or degenerate node is a [`SceneError`] surfaced once at startup.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Rect;

/// Layout of the main game scene, embedded at compile time
pub const GAME_SCENE_JSON: &str = include_str!("../assets/game_scene.json");

/// Node names the game scene must provide
pub mod nodes {
    pub const PLAYER: &str = "player";
    pub const BOUNDS: &str = "bounds";
    pub const LEFT_WALL: &str = "left_wall";
    pub const RIGHT_WALL: &str = "right_wall";
    pub const SCORE_LABEL: &str = "score_label";
    pub const BATTERY: &str = "battery";
    pub const DOUBLE_INDICATOR: &str = "double_indicator";
}

/// Scene construction failures
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene node `{0}` not found")]
    MissingNode(String),
    #[error("scene node `{name}` has a degenerate size {width}x{height}")]
    DegenerateNode {
        name: String,
        width: f32,
        height: f32,
    },
    #[error("malformed scene layout: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A named, positioned node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    pub position: [f32; 2],
    pub size: [f32; 2],
}

impl NodeSpec {
    pub fn rect(&self) -> Rect {
        Rect::new(Vec2::from(self.position), Vec2::from(self.size))
    }
}

/// Scene size plus its nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLayout {
    pub size: [f32; 2],
    pub nodes: Vec<NodeSpec>,
}

impl SceneLayout {
    /// Parse and validate a layout
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let layout: SceneLayout = serde_json::from_str(json)?;
        if layout.size[0] <= 0.0 || layout.size[1] <= 0.0 {
            return Err(SceneError::DegenerateNode {
                name: "scene".to_string(),
                width: layout.size[0],
                height: layout.size[1],
            });
        }
        Ok(layout)
    }

    /// The embedded game scene
    pub fn builtin() -> Result<Self, SceneError> {
        Self::from_json(GAME_SCENE_JSON)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::from(self.size)
    }

    /// Look up a node by name
    pub fn node(&self, name: &str) -> Result<&NodeSpec, SceneError> {
        let node = self
            .nodes
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| SceneError::MissingNode(name.to_string()))?;
        if node.size[0] <= 0.0 || node.size[1] <= 0.0 {
            return Err(SceneError::DegenerateNode {
                name: name.to_string(),
                width: node.size[0],
                height: node.size[1],
            });
        }
        Ok(node)
    }

    /// Rectangle of a required node
    pub fn rect(&self, name: &str) -> Result<Rect, SceneError> {
        self.node(name).map(NodeSpec::rect)
    }
}
