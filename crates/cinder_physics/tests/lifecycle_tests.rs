//! Lifecycle and unit-conversion tests for rigid body handles
//!
//! Every test runs against the recording backend so the exact calls that
//! reach the engine can be counted.

use approx::assert_relative_eq;
use cinder_physics::prelude::*;
use cinder_physics::testing::{BackendCall, CallLog, RecordingBackend};

fn recording_space(scale: f32) -> (PhysicsSpace, CallLog) {
    let backend = RecordingBackend::new();
    let log = backend.log();
    let config = PhysicsConfig::default().with_scale(scale);
    let space = PhysicsSpace::new(config, Box::new(backend)).expect("valid config");
    (space, log)
}

#[test]
fn vectors_round_trip_through_simulation_space() {
    for scale in [DEFAULT_SCALE, 0.01, 1.0, 7.5] {
        let units = UnitConverter::new(scale).unwrap();
        for v in [Vec2::new(0.0, 0.0), Vec2::new(123.5, -64.0), Vec2::new(-0.25, 1e4)] {
            let back = units.to_world(units.to_simulation(v));
            assert_relative_eq!(back.x, v.x, max_relative = 1e-5);
            assert_relative_eq!(back.y, v.y, max_relative = 1e-5);
        }
    }
}

#[test]
fn material_quantities_round_trip_in_inverse_sense() {
    let units = UnitConverter::new(0.25).unwrap();
    for d in [0.0, 0.3, 1.0, 42.0] {
        assert_relative_eq!(units.material_to_world(units.material_to_simulation(d)), d, max_relative = 1e-6);
    }
    // Entering simulation space divides for materials but multiplies for positions
    assert_relative_eq!(units.material_to_simulation(1.0), 4.0);
    assert_relative_eq!(units.length_to_simulation(1.0), 0.25);
}

#[test]
fn uninitialized_handle_rejects_everything_but_create() {
    let (mut space, log) = recording_space(DEFAULT_SCALE);
    let mut rb = RigidBody::new();
    let fixture = FixtureDef::new(space.shapes().make_box(1.0, 2.0));
    let v = Vec2::new(1.0, 1.0);

    let rejected = [
        rb.add_fixture(&mut space, &fixture).map(|_| ()),
        rb.apply_force(&mut space, v, v),
        rb.apply_force_rel(&mut space, v, v),
        rb.apply_force_to_centre(&mut space, v),
        rb.apply_impulse(&mut space, v, v),
        rb.apply_impulse_rel(&mut space, v, v),
        rb.apply_impulse_to_centre(&mut space, v),
        rb.warp_to(&mut space, v),
        rb.instantiate(&mut space, &BodyDef::dynamic()),
    ];
    for result in rejected {
        assert!(matches!(
            result,
            Err(PhysicsError::InvalidState { state: BodyState::Uninitialized, .. })
        ));
    }
    assert!(log.calls().is_empty());

    rb.create(&mut space, &BodyDef::dynamic()).unwrap();
    assert_eq!(rb.state(), BodyState::Active);
}

#[test]
fn reinstantiate_queues_previous_body_exactly_once() {
    let (mut space, log) = recording_space(DEFAULT_SCALE);
    let mut rb = RigidBody::new();
    rb.create(&mut space, &BodyDef::dynamic()).unwrap();
    let first = rb.body().unwrap();

    rb.reconcile(&space).unwrap();
    assert!(!rb.is_dirty());

    rb.instantiate(&mut space, &BodyDef::kinematic()).unwrap();
    let second = rb.body().unwrap();

    assert_ne!(first, second);
    assert_eq!(rb.state(), BodyState::Active);
    assert_eq!(space.disposals().iter().copied().collect::<Vec<_>>(), vec![first]);
    assert!(rb.is_dirty());

    // Nothing is destroyed until the owner drains
    assert_eq!(log.count(|c| matches!(c, BackendCall::DestroyBody(_))), 0);
    space.step(1.0 / 30.0);
    assert!(rb.is_dirty());

    rb.reconcile(&space).unwrap();
    assert!(!rb.is_dirty());

    assert_eq!(space.drain_disposals(), vec![first]);
    assert_eq!(log.calls().iter().filter(|c| **c == BackendCall::DestroyBody(first)).count(), 1);
}

#[test]
fn double_dispose_fails_and_destroys_once() {
    let (mut space, log) = recording_space(DEFAULT_SCALE);
    let mut rb = RigidBody::spawn(&mut space).unwrap();
    let body = rb.body().unwrap();

    rb.dispose(&mut space).unwrap();
    assert!(matches!(
        rb.dispose(&mut space),
        Err(PhysicsError::InvalidState { state: BodyState::Disposed, .. })
    ));
    assert!(rb.body().is_none());

    space.drain_disposals();
    space.drain_disposals();
    assert_eq!(log.count(|c| *c == BackendCall::DestroyBody(body)), 1);

    assert!(matches!(
        rb.apply_force_to_centre(&mut space, Vec2::X),
        Err(PhysicsError::InvalidState { state: BodyState::Disposed, .. })
    ));
}

#[test]
fn create_fixture_and_push_scenario() {
    let scale = DEFAULT_SCALE;
    let (mut space, log) = recording_space(scale);
    let mut rb = RigidBody::new();

    rb.create(&mut space, &BodyDef::default()).unwrap();
    let shape = space.shapes().make_box(1.0, 2.0);
    rb.add_fixture(&mut space, &FixtureDef::new(shape)).unwrap();
    rb.apply_force_to_centre(&mut space, Vec2::new(0.0, -10.0)).unwrap();

    assert!(rb.is_dirty());
    let body = rb.body().unwrap();
    let calls = log.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], BackendCall::CreateBody(body));
    assert!(matches!(
        &calls[1],
        BackendCall::CreateFixture { body: b, def } if *b == body && def.shape == Some(shape)
    ));
    assert_eq!(
        calls[2],
        BackendCall::ApplyForce {
            body,
            force: Vec2::new(0.0, -10.0 * scale),
            point: None,
        }
    );
}

#[test]
fn warp_sets_converted_position_and_stops() {
    let (mut space, log) = recording_space(0.5);
    let mut rb = RigidBody::spawn(&mut space).unwrap();
    let body = rb.body().unwrap();
    space.backend_mut().set_transform(body, Vec2::ZERO, 0.7).unwrap();

    rb.apply_impulse_to_centre(&mut space, Vec2::new(40.0, -8.0)).unwrap();
    assert_ne!(space.backend().linear_velocity(body).unwrap(), Vec2::ZERO);

    rb.warp_to(&mut space, Vec2::new(5.0, 5.0)).unwrap();

    let (position, angle) = space.backend().transform(body).unwrap();
    assert_eq!(position, space.units().to_simulation(Vec2::new(5.0, 5.0)));
    assert_relative_eq!(angle, 0.7);
    assert_eq!(space.backend().linear_velocity(body).unwrap(), Vec2::ZERO);
    assert!(log.calls().contains(&BackendCall::SetLinearVelocity { body, velocity: Vec2::ZERO }));
}

#[test]
fn reconcile_reports_world_units() {
    let (mut space, _) = recording_space(0.5);
    let mut rb = RigidBody::spawn(&mut space).unwrap();
    rb.warp_to(&mut space, Vec2::new(10.0, -4.0)).unwrap();

    let transform = rb.reconcile(&space).unwrap();
    assert_relative_eq!(transform.position.x, 10.0);
    assert_relative_eq!(transform.position.y, -4.0);
}

#[test]
fn every_force_variant_converts_on_an_active_body() {
    let (mut space, log) = recording_space(0.5);
    let def = BodyDef::dynamic()
        .with_position(Vec2::new(3.0, 0.0))
        .with_angle(std::f32::consts::FRAC_PI_2)
        .with_fixed_rotation(true);
    let mut rb = RigidBody::new();
    rb.create(&mut space, &def).unwrap();
    log.clear();

    let push = Vec2::new(2.0, 4.0);
    let location = Vec2::new(10.0, 20.0);
    let local = Vec2::new(2.0, 0.0);
    rb.apply_force(&mut space, push, location).unwrap();
    rb.apply_force_rel(&mut space, push, local).unwrap();
    rb.apply_force_to_centre(&mut space, push).unwrap();
    rb.apply_impulse(&mut space, push, location).unwrap();
    rb.apply_impulse_rel(&mut space, push, local).unwrap();
    rb.apply_impulse_to_centre(&mut space, push).unwrap();

    let applied: Vec<(Vec2, Option<Vec2>)> = log
        .calls()
        .into_iter()
        .map(|c| match c {
            BackendCall::ApplyForce { force, point, .. } => (force, point),
            BackendCall::ApplyImpulse { impulse, point, .. } => (impulse, point),
            other => panic!("unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(applied.len(), 6);

    // Absolute location (10, 20) scaled; body-local (2, 0) is (1, 0) in
    // simulation units, a quarter turn about (3, 0) puts it at (3, 1)
    let expected_points = [
        Some(Vec2::new(5.0, 10.0)),
        Some(Vec2::new(3.0, 1.0)),
        None,
        Some(Vec2::new(5.0, 10.0)),
        Some(Vec2::new(3.0, 1.0)),
        None,
    ];
    for ((vector, point), expected) in applied.into_iter().zip(expected_points) {
        assert_eq!(vector, Vec2::new(1.0, 2.0));
        match (point, expected) {
            (Some(p), Some(e)) => {
                assert_relative_eq!(p.x, e.x, epsilon = 1e-5);
                assert_relative_eq!(p.y, e.y, epsilon = 1e-5);
            }
            (None, None) => {}
            (p, e) => panic!("point {:?}, expected {:?}", p, e),
        }
    }
}

#[test]
fn fixture_material_reaches_the_backend_unconverted() {
    let (mut space, log) = recording_space(0.5);
    let mut rb = RigidBody::spawn(&mut space).unwrap();
    let fixture = FixtureDef::default()
        .with_shape(space.shapes().make_circle(0.0, 0.0, 4.0))
        .with_density(3.0)
        .with_friction(0.2)
        .with_restitution(0.6);

    rb.add_fixture(&mut space, &fixture).unwrap();

    assert!(log.calls().contains(&BackendCall::CreateFixture { body: rb.body().unwrap(), def: fixture }));
}
