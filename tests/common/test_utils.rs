use cgmath::{Point3, Vector3};
use orbit_scene::{
    animation::{AnimationLoop, FrameSink},
    clock::ManualClock,
    config::SceneConfig,
    scene::{Scene, SceneObject},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A scene driven by a manual clock, without window or GPU.
pub(crate) struct Fixture {
    pub clock: ManualClock,
    pub scene: Scene,
    pub animation: AnimationLoop<ManualClock>,
}

impl Fixture {
    pub fn new(start_millis: f64) -> Self {
        Self::with_config(SceneConfig::default(), start_millis)
    }

    pub fn with_config(config: SceneConfig, start_millis: f64) -> Self {
        let clock = ManualClock::new(start_millis);
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(42));
        let scene = Scene::new(&config, &mut rng, start_millis, 1280, 720);
        let animation = AnimationLoop::new(clock.clone(), config.animation);
        Self {
            clock,
            scene,
            animation,
        }
    }

    /// Starts the loop and ticks once at each of the given times.
    pub fn run_at(&mut self, sink: &mut RecordingSink, times: &[f64]) {
        self.animation.start();
        for &t in times {
            self.clock.set(t);
            self.animation
                .tick(&mut self.scene, sink)
                .expect("recording sink never fails");
        }
    }
}

/// What the sink saw of one submitted frame.
#[derive(Clone, Debug)]
pub(crate) struct FrameRecord {
    pub camera_eye: Point3<f32>,
    pub camera_target: Point3<f32>,
    pub ship_world: Vector3<f32>,
    pub dust_world: Vector3<f32>,
    pub ship_time: f32,
    pub sun_direction: [f32; 3],
    /// Whether the planet's atmosphere had changes waiting for upload.
    pub atmosphere_uploaded: bool,
}

/// Records every submitted frame and consumes dirty uniforms like a renderer would.
#[derive(Default)]
pub(crate) struct RecordingSink {
    frames: Vec<FrameRecord>,
}

impl RecordingSink {
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn last(&self) -> &FrameRecord {
        self.frames.last().expect("no frame was submitted")
    }
}

impl FrameSink for RecordingSink {
    fn submit(&mut self, scene: &mut Scene) -> Result<(), wgpu::SurfaceError> {
        let ship = *scene.ship.material.get();
        self.frames.push(FrameRecord {
            camera_eye: scene.camera.eye,
            camera_target: scene.camera.target,
            ship_world: scene.world_transform(scene.ship.node()).position,
            dust_world: scene.world_transform(scene.dust.node()).position,
            ship_time: ship.time,
            sun_direction: ship.sun_direction,
            atmosphere_uploaded: scene.planet.atmosphere.take_dirty().is_some(),
        });
        Ok(())
    }
}
