//! Scene composition: the objects of the scene and the transform tree that holds them.
//!
//! ```text
//! scene
//! ├── ship container          (spins about +Y)
//! │   ├── dust container      (tilted about +X)
//! │   │   └── dust            (counter-spins about +Y)
//! │   ├── ship
//! │   └── camera
//! ├── planet
//! ├── moon
//! └── sky                     (optional)
//! ```

pub mod dust;
pub mod light;
pub mod moon;
pub mod planet;
pub mod ship;
pub mod sky;

use cgmath::{Deg, EuclideanSpace, Point3, Rad, Rotation3, Vector3};
use rand::Rng;

use crate::{
    camera::{Camera, CameraUniform, Projection},
    config::SceneConfig,
    data_structures::{scene_graph::{NodeId, SceneGraph}, transform::Transform},
};

pub use dust::Dust;
pub use light::DirectionalLight;
pub use moon::Moon;
pub use planet::Planet;
pub use ship::Ship;
pub use sky::SkySphere;

/// A renderable member of the scene, attached to one node of the scene graph.
pub trait SceneObject {
    fn node(&self) -> NodeId;

    /// Per-frame hook. Writes time- and light-dependent uniforms; must not accumulate,
    /// so calling it twice with the same arguments leaves the same state.
    fn update(&mut self, _sun_direction: Vector3<f32>, _now_millis: f64) {}
}

pub struct Scene {
    pub graph: SceneGraph,
    pub camera: Camera,
    pub projection: Projection,
    pub light: DirectionalLight,
    pub clear_colour: wgpu::Color,
    pub ship_container: NodeId,
    pub dust_container: NodeId,
    pub planet: Planet,
    pub moon: Moon,
    pub ship: Ship,
    pub dust: Dust,
    pub sky: Option<SkySphere>,
}

impl Scene {
    /// Builds the full scene graph. `now_millis` is the clock reading the ship's
    /// time uniform counts from; `width`/`height` size the initial projection.
    pub fn new<R: Rng>(
        config: &SceneConfig,
        rng: &mut R,
        now_millis: f64,
        width: u32,
        height: u32,
    ) -> Self {
        let mut graph = SceneGraph::new();

        let ship_container = graph.add_root(
            "ship container",
            Transform::new().with_rotation(cgmath::Quaternion::from_angle_y(Rad(
                config.ship_container_yaw,
            ))),
        );

        let planet = Planet::new(graph.add_root("planet", Transform::new()), config.planet_radius);

        let moon = Moon::new(
            graph.add_root("moon", Vector3::from(config.moon_position).into()),
            config.moon_radius,
            config.moon_colour,
        );

        let dust_container = graph.add_child(
            ship_container,
            "dust container",
            Transform::new().with_rotation(cgmath::Quaternion::from_angle_x(Rad(config.dust_tilt))),
        );
        let dust = Dust::new(
            graph.add_child(dust_container, "dust", Vector3::from(config.dust_position).into()),
            config.dust_count,
            config.dust_scale,
            config.dust_colour,
            rng,
        );

        let sky = config.sky.map(|sky| {
            SkySphere::new(graph.add_root("sky", Transform::new()), sky.radius, sky.star_count, rng)
        });

        let [rx, ry, rz] = config.ship_rotation;
        let ship_position = Vector3::new(0.0, 0.0, planet.radius() + config.ship_altitude);
        let ship = Ship::new(
            graph.add_child(
                ship_container,
                "ship",
                Transform::new()
                    .with_position(ship_position)
                    .with_rotation(
                        cgmath::Quaternion::from_angle_x(Rad(rx))
                            * cgmath::Quaternion::from_angle_y(Rad(ry))
                            * cgmath::Quaternion::from_angle_z(Rad(rz)),
                    ),
            ),
            now_millis,
        );

        let camera_node = graph.add_child(
            ship_container,
            "camera",
            (ship_position + Vector3::from(config.camera.initial_offset)).into(),
        );
        graph.update_world_transforms();

        let world_position =
            |id: NodeId| Point3::from_vec(graph.get_world_transform(id).unwrap_or_default().position);
        let camera = Camera::new(camera_node, world_position(camera_node), world_position(ship.node()));
        let projection = Projection::new(
            width,
            height,
            Deg(config.camera.fovy_degrees),
            config.camera.znear,
            config.camera.zfar,
        );

        log::info!(
            "Scene built: {} nodes, {} dust points, {} stars",
            graph.len(),
            dust.cloud.len(),
            sky.as_ref().map_or(0, |sky| sky.cloud.len())
        );

        Self {
            graph,
            camera,
            projection,
            light: DirectionalLight::new(
                config.light_position.into(),
                config.light_colour,
                config.light_intensity,
            ),
            clear_colour: config.clear_colour(),
            ship_container,
            dust_container,
            planet,
            moon,
            ship,
            dust,
            sky,
        }
    }

    pub fn objects_mut(&mut self) -> Vec<&mut dyn SceneObject> {
        let mut objects: Vec<&mut dyn SceneObject> = vec![
            &mut self.planet,
            &mut self.moon,
            &mut self.ship,
            &mut self.dust,
        ];
        if let Some(sky) = self.sky.as_mut() {
            objects.push(sky);
        }
        objects
    }

    /// Runs every object's update hook with the current light direction.
    pub fn update_objects(&mut self, now_millis: f64) {
        let sun_direction = self.light.sun_direction();
        self.objects_mut()
            .into_iter()
            .for_each(|object| object.update(sun_direction, now_millis));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera, &self.projection);
        uniform
    }

    /// World transform of a node as of the last scene-graph update.
    pub fn world_transform(&self, id: NodeId) -> Transform {
        self.graph.get_world_transform(id).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::InnerSpace;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::config::SkyConfig;

    fn scene(config: &SceneConfig) -> Scene {
        Scene::new(config, &mut ChaCha8Rng::seed_from_u64(0), 0.0, 1280, 720)
    }

    #[test]
    fn ship_dust_and_camera_hang_below_the_ship_container() {
        let scene = scene(&SceneConfig::default());
        let container = scene.graph.get(scene.ship_container).unwrap();
        assert!(container.children().contains(&scene.ship.node()));
        assert!(container.children().contains(&scene.camera.node));
        assert!(container.children().contains(&scene.dust_container));
        assert_eq!(
            scene.graph.get(scene.dust.node()).unwrap().parent(),
            Some(scene.dust_container)
        );
        assert_eq!(scene.graph.get(scene.planet.node()).unwrap().parent(), None);
    }

    #[test]
    fn ship_sits_a_hundred_units_above_the_planet() {
        let scene = scene(&SceneConfig::default());
        let local = scene.graph.get_local_transform(scene.ship.node()).unwrap();
        assert_eq!(local.position, Vector3::new(0.0, 0.0, 120.0));
        let world = scene.world_transform(scene.ship.node());
        assert_abs_diff_eq!(world.position.magnitude(), 120.0, epsilon = 1e-3);
    }

    #[test]
    fn camera_starts_behind_the_ship_looking_at_it() {
        let scene = scene(&SceneConfig::default());
        let ship = scene.world_transform(scene.ship.node()).position;
        assert_eq!(scene.camera.target, Point3::from_vec(ship));
        assert_abs_diff_eq!((scene.camera.eye.to_vec() - ship).magnitude(), 6.5, epsilon = 1e-3);
    }

    #[test]
    fn sky_is_only_built_when_configured() {
        assert!(scene(&SceneConfig::default()).sky.is_none());
        let config = SceneConfig {
            sky: Some(SkyConfig { radius: 50.0, star_count: 300 }),
            ..Default::default()
        };
        let mut scene = scene(&config);
        assert_eq!(scene.sky.as_ref().map(|sky| sky.cloud.len()), Some(300));
        assert_eq!(scene.objects_mut().len(), 5);
    }

    #[test]
    fn update_objects_pushes_the_light_direction() {
        let mut scene = scene(&SceneConfig::default());
        scene.update_objects(500.0);
        assert_eq!(scene.planet.atmosphere.get().sun_direction, [1.0, 0.5, -1.0]);
        assert_eq!(scene.ship.material.get().sun_direction, [1.0, 0.5, -1.0]);
        assert_eq!(scene.ship.material.get().time, 500.0);
    }
}
