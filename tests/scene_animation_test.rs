use approx::assert_abs_diff_eq;
use cgmath::{EuclideanSpace, InnerSpace, Point3, Rad, Rotation, Rotation3, Vector3};
use orbit_scene::{animation::LoopState, config::SceneConfig};

use crate::common::test_utils::{Fixture, RecordingSink};

mod common;

const WALL_CLOCK: f64 = 1_700_000_000_000.0;

#[test]
fn submits_one_frame_per_tick() {
    let mut fixture = Fixture::new(0.0);
    let mut sink = RecordingSink::default();
    fixture.run_at(&mut sink, &[0.0, 16.0, 33.0, 50.0]);
    assert_eq!(sink.frames().len(), 4);
    assert_eq!(fixture.animation.frames(), 4);
    assert_eq!(fixture.animation.state(), LoopState::Running);
}

#[test]
fn ship_time_counts_from_construction_at_wall_clock_scale() {
    let mut fixture = Fixture::new(WALL_CLOCK);
    let mut sink = RecordingSink::default();
    fixture.run_at(&mut sink, &[WALL_CLOCK, WALL_CLOCK + 1000.0, WALL_CLOCK + 2500.0]);
    let times: Vec<f32> = sink.frames().iter().map(|f| f.ship_time).collect();
    assert_eq!(times, vec![0.0, 1000.0, 2500.0]);
}

#[test]
fn camera_always_aims_at_the_origin() {
    let mut fixture = Fixture::new(WALL_CLOCK);
    let mut sink = RecordingSink::default();
    let times: Vec<f64> = (0..20).map(|i| WALL_CLOCK + i as f64 * 777.0).collect();
    fixture.run_at(&mut sink, &times);
    for frame in sink.frames() {
        assert_eq!(frame.camera_target, Point3::origin());
        assert!(frame.camera_eye.x.is_finite());
        assert!(frame.camera_eye.to_vec().magnitude() > 120.0);
    }
}

#[test]
fn camera_and_ship_orbit_with_the_ship_container() {
    let mut fixture = Fixture::new(0.0);
    let mut sink = RecordingSink::default();
    let t = 5000.0;
    fixture.run_at(&mut sink, &[t]);
    let frame = sink.last();

    let orbit = cgmath::Quaternion::from_angle_y(Rad((t * 0.0001) as f32));
    let ship_local = Vector3::new(0.0, 0.0, 120.0);
    let camera_local = ship_local
        + Vector3::new(
            (t * 0.0002).cos() as f32,
            2.0 + 0.5 * (t * 0.0005).cos() as f32,
            12.0 + 4.0 * (t * 0.0005).sin() as f32,
        );

    let ship = orbit.rotate_vector(ship_local);
    let eye = orbit.rotate_vector(camera_local);
    assert_abs_diff_eq!(frame.ship_world.x, ship.x, epsilon = 1e-3);
    assert_abs_diff_eq!(frame.ship_world.z, ship.z, epsilon = 1e-3);
    assert_abs_diff_eq!(frame.camera_eye.x, eye.x, epsilon = 1e-3);
    assert_abs_diff_eq!(frame.camera_eye.y, eye.y, epsilon = 1e-3);
    assert_abs_diff_eq!(frame.camera_eye.z, eye.z, epsilon = 1e-3);
}

#[test]
fn dust_keeps_its_distance_from_the_container_origin() {
    let mut fixture = Fixture::new(0.0);
    let mut sink = RecordingSink::default();
    fixture.run_at(&mut sink, &[0.0, 10_000.0, 123_456.0]);
    for frame in sink.frames() {
        assert_abs_diff_eq!(frame.dust_world.magnitude(), 100.0, epsilon = 1e-3);
    }
    assert_ne!(sink.frames()[0].dust_world, sink.frames()[1].dust_world);
}

#[test]
fn every_frame_pushes_the_light_direction_and_re_dirties_uniforms() {
    let mut fixture = Fixture::new(0.0);
    let mut sink = RecordingSink::default();
    fixture.run_at(&mut sink, &[0.0, 16.0, 32.0]);
    for frame in sink.frames() {
        assert_eq!(frame.sun_direction, [1.0, 0.5, -1.0]);
        assert!(frame.atmosphere_uploaded);
    }
    assert!(!fixture.scene.planet.atmosphere.is_dirty());
}

#[test]
fn stop_signal_ends_the_loop_after_the_current_tick() {
    let mut fixture = Fixture::new(0.0);
    let mut sink = RecordingSink::default();
    let stop = fixture.animation.stop_signal();
    fixture.run_at(&mut sink, &[0.0, 16.0]);

    stop.request_stop();
    let state = fixture
        .animation
        .tick(&mut fixture.scene, &mut sink)
        .unwrap();
    assert_eq!(state, LoopState::Stopped);
    assert_eq!(sink.frames().len(), 2);

    fixture.clock.advance(1000.0);
    assert_eq!(
        fixture.animation.tick(&mut fixture.scene, &mut sink),
        Ok(LoopState::Stopped)
    );
    assert_eq!(sink.frames().len(), 2);
}

#[test]
fn seeded_scenes_are_reproducible() {
    let config = SceneConfig {
        seed: Some(7),
        ..Default::default()
    };
    let a = Fixture::with_config(config.clone(), 0.0);
    let b = Fixture::with_config(config, 0.0);
    assert_eq!(a.scene.dust.cloud, b.scene.dust.cloud);
    assert_eq!(a.scene.dust.cloud.len(), 1000);
}
