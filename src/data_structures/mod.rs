//! Engine data structures: transforms, scene graph, geometry, uniforms and textures.
//!
//! - `transform` holds per-node position/rotation/scale and its GPU layout
//! - `scene_graph` is the explicit tree of transform nodes
//! - `mesh` contains vertex layouts and primitive mesh generation
//! - `uniform` wraps per-material uniform structs with dirty tracking
//! - `texture` contains the GPU depth texture

pub mod mesh;
pub mod scene_graph;
pub mod texture;
pub mod transform;
pub mod uniform;
