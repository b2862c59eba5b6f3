//! The per-frame animation tick.
//!
//! [`AnimationLoop`] owns no window or GPU state. Each [`AnimationLoop::tick`] reads
//! the injected [`Clock`], moves the animated nodes, pushes per-object uniforms and
//! hands the scene to a [`FrameSink`]. The app calls `tick` from
//! `WindowEvent::RedrawRequested` and requests the next redraw while it reports
//! [`LoopState::Running`].

use std::{
    f64::consts::TAU,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use cgmath::{EuclideanSpace, Point3, Rad, Rotation3, Vector3};

use crate::{
    clock::Clock,
    config::AnimationConfig,
    scene::{Scene, SceneObject},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Cloneable handle that asks a running loop to stop after its current tick.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Whatever turns an updated scene into pixels.
pub trait FrameSink {
    fn submit(&mut self, scene: &mut Scene) -> Result<(), wgpu::SurfaceError>;
}

/// `t * scale` reduced into `[0, 2π)` before it is narrowed to `f32`.
///
/// Wall-clock milliseconds are far beyond what an `f32` resolves, so the product
/// is formed and wrapped in `f64` first.
pub fn phase(t_millis: f64, scale: f64) -> f32 {
    (t_millis * scale).rem_euclid(TAU) as f32
}

pub struct AnimationLoop<C: Clock> {
    clock: C,
    config: AnimationConfig,
    state: LoopState,
    stop: StopSignal,
    frames: u64,
}

impl<C: Clock> AnimationLoop<C> {
    pub fn new(clock: C, config: AnimationConfig) -> Self {
        Self {
            clock,
            config,
            state: LoopState::Stopped,
            stop: StopSignal::default(),
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        self.stop.reset();
        self.state = LoopState::Running;
        log::info!("Animation loop started");
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames handed to the sink so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Advances the scene to the clock's current time and submits it.
    ///
    /// Does nothing and reports `Stopped` before [`start`](Self::start) or once a
    /// stop was requested. A sink error is returned as is; the loop keeps running so
    /// the caller decides whether the error is recoverable.
    pub fn tick(
        &mut self,
        scene: &mut Scene,
        sink: &mut impl FrameSink,
    ) -> Result<LoopState, wgpu::SurfaceError> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }
        if self.stop.is_requested() {
            self.state = LoopState::Stopped;
            log::info!("Animation loop stopped after {} frames", self.frames);
            return Ok(LoopState::Stopped);
        }

        let t = self.clock.now_millis();
        self.advance(scene, t);
        sink.submit(scene)?;
        self.frames += 1;

        if self.stop.is_requested() {
            self.state = LoopState::Stopped;
            log::info!("Animation loop stopped after {} frames", self.frames);
        }
        Ok(self.state)
    }

    fn advance(&self, scene: &mut Scene, t: f64) {
        let orbit = phase(t, self.config.orbit);
        scene.graph.set_local_transform_with(scene.ship_container, |local| {
            local.rotation = cgmath::Quaternion::from_angle_y(Rad(orbit));
        });

        let spin = phase(-t, self.config.dust_spin);
        scene.graph.set_local_transform_with(scene.dust.node(), |local| {
            local.rotation = cgmath::Quaternion::from_angle_y(Rad(spin));
        });

        let sway = phase(t, self.config.camera_sway);
        let bob = phase(t, self.config.camera_bob);
        let ship_position = scene
            .graph
            .get_local_transform(scene.ship.node())
            .map(|local| local.position)
            .unwrap_or(Vector3::new(0.0, 0.0, 0.0));
        let offset = Vector3::new(sway.cos(), 2.0 + 0.5 * bob.cos(), 12.0 + 4.0 * bob.sin());
        scene
            .graph
            .set_local_transform_with(scene.camera.node, |local| local.position = ship_position + offset);

        scene.graph.update_world_transforms();

        let eye = Point3::from_vec(scene.world_transform(scene.camera.node).position);
        scene.camera.look_at(eye, Point3::origin());

        scene.update_objects(t);
    }
}
