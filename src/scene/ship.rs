use cgmath::Vector3;

use crate::{
    data_structures::{mesh::MeshData, scene_graph::NodeId, uniform::UniformSet},
    scene::SceneObject,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShipUniform {
    pub sun_direction: [f32; 3],
    /// Milliseconds since the ship was built.
    pub time: f32,
}

pub struct Ship {
    node: NodeId,
    time_start: f64,
    pub mesh: MeshData,
    pub material: UniformSet<ShipUniform>,
}

impl Ship {
    /// `now_millis` is the clock reading the ship's time uniform counts from.
    pub fn new(node: NodeId, now_millis: f64) -> Self {
        Self {
            node,
            time_start: now_millis,
            mesh: MeshData::sphere(2.0, 16, 8),
            material: UniformSet::new(ShipUniform {
                sun_direction: [0.0; 3],
                time: 0.0,
            }),
        }
    }

    pub fn time_start(&self) -> f64 {
        self.time_start
    }
}

impl SceneObject for Ship {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, sun_direction: Vector3<f32>, now_millis: f64) {
        let elapsed = (now_millis - self.time_start) as f32;
        self.material.modify(|uniform| {
            uniform.sun_direction = sun_direction.into();
            uniform.time = elapsed;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::scene_graph::SceneGraph;

    fn ship(now: f64) -> Ship {
        let node = SceneGraph::new().add_root("ship", Default::default());
        Ship::new(node, now)
    }

    #[test]
    fn time_uniform_counts_milliseconds_since_construction() {
        let start = 1_700_000_000_000.0;
        let mut ship = ship(start);
        let sun = Vector3::new(1.0, 0.5, -1.0);

        ship.update(sun, start);
        let t0 = ship.material.get().time;
        ship.update(sun, start + 1000.0);
        let t1 = ship.material.get().time;

        assert_eq!(t0, 0.0);
        assert_eq!(t1 - t0, 1000.0);
    }

    #[test]
    fn repeated_update_in_one_tick_does_not_accumulate() {
        let mut ship = ship(0.0);
        let sun = Vector3::new(0.0, 1.0, 0.0);
        ship.update(sun, 250.0);
        let first = *ship.material.get();
        ship.update(sun, 250.0);
        assert_eq!(*ship.material.get(), first);
    }
}
