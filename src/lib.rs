//! orbit-scene
//!
//! An animated space scene rendered with `wgpu`, running natively and on the web.
//! A planet wrapped in a scattering atmosphere, a moon and a translucent ship
//! orbit under one directional light, while a ring of procedurally sampled dust
//! counter-rotates next to the ship and the camera sways behind it.
//!
//! High-level modules
//! - `animation`: the per-frame tick with an injected clock, frame sink and stop signal
//! - `app`: window, event loop and frame submission
//! - `camera`: camera, projection and their uniform
//! - `clock`: system and manual wall-clock sources
//! - `config`: every tunable of the scene in one `SceneConfig`
//! - `context`: GPU and window context that owns device/queue/pipelines
//! - `data_structures`: transforms, scene graph, meshes, uniforms and textures
//! - `pipelines`: one render pipeline per material plus the shared light resources
//! - `point_cloud`: torus and sphere-shell point sampling
//! - `render`: per-object GPU resources and pipeline batching
//! - `scene`: the scene objects and the graph that holds them
//!

pub mod animation;
pub mod app;
pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod point_cloud;
pub mod render;
pub mod scene;

pub use app::{run, run_with};
pub use config::SceneConfig;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point of the web build.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    run().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
