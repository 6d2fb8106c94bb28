//! WebGPU rendering module
//!
//! The scene is drawn as flat-coloured triangles: `frame` builds the vertex
//! list from game state, `pipeline` uploads and draws it.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::scene_vertices;
pub use pipeline::RenderState;
pub use vertex::{Palette, Vertex};
