//! End-to-end scenarios against the public API.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use dna_helix::animation::{FlightAnimator, FlightState};
use dna_helix::engine::{EngineCommand, HelixEngine, MarkerId};
use dna_helix::field::PointField;
use dna_helix::input::InputEvent;
use dna_helix::links::{LinkPolicy, LinkRegistry};
use dna_helix::options::{FieldOptions, Options};
use dna_helix::orbit::OrbitParams;
use dna_helix::rotation::{FrameClock, RotationController, RotationPhase};
use glam::Vec3;
use web_time::Instant;

fn shipped_field() -> PointField {
    PointField::from_options(&FieldOptions {
        seed: Some(2024),
        ..FieldOptions::default()
    })
    .unwrap()
}

#[test]
fn shipped_layout_with_stride_links() {
    let field = shipped_field();
    assert_eq!(field.len(), 11_000);
    assert_eq!(field.helix_range(), 0..6000);
    assert_eq!(field.band_range(), 6000..11_000);

    let registry = LinkRegistry::select(&field, 8, LinkPolicy::Stride).unwrap();
    let links = registry.links().as_slice();
    assert_eq!(links.len(), 8);
    assert!(links.iter().all(|&i| i % 750 == 0 && i < 6000));
}

#[test]
fn link_rest_positions_ignore_live_time() {
    let field = shipped_field();
    let registry = LinkRegistry::select(&field, 8, LinkPolicy::default()).unwrap();
    let slow = registry
        .sample_link_positions(&field, &OrbitParams::default())
        .unwrap();
    let fast = registry
        .sample_link_positions(
            &field,
            &OrbitParams {
                drift_speed: 5.0,
                pulse_speed: 5.0,
                spin_speed: 0.5,
            },
        )
        .unwrap();
    assert_eq!(slow, fast);

    let orbit = OrbitParams::default();
    for (link, &index) in registry.links().as_slice().iter().enumerate() {
        let rec = field.record(index).unwrap();
        assert_eq!(slow[link], orbit.evaluate(&rec, 0.0).unwrap());
    }
}

#[test]
fn staggered_flight_scenario() {
    let targets: Vec<Vec3> = (0..8).map(|i| Vec3::splat(i as f32)).collect();
    let timestamps: Vec<f32> = (0..8).map(|i| i as f32).collect();
    let fired = Rc::new(Cell::new(0));

    let mut flight = FlightAnimator::default();
    flight.start(targets.clone(), timestamps, 3.0).unwrap();
    let sink = Rc::clone(&fired);
    flight.on_finish(move || sink.set(sink.get() + 1));

    let _ = flight.advance(3.0);
    assert_eq!(flight.position(), Some(targets[3]));
    assert_eq!(flight.advance(10.0), FlightState::Finished);
    assert_eq!(flight.position(), Some(targets[7]));
    for _ in 0..1000 {
        let _ = flight.advance(1.0);
    }
    assert_eq!(fired.get(), 1);
}

#[test]
fn idle_rotation_survives_blur() {
    let t0 = Instant::now();
    let at = |ms: u64| t0 + Duration::from_millis(ms);

    // 2 s of active time in 16 ms frames.
    let mut controller = RotationController::new(Default::default());
    let mut focused = controller.initial_state();
    let mut clock = FrameClock::new();
    for frame in 0..=125 {
        let _ = controller.tick(&mut focused, clock.tick(at(frame * 16)));
    }

    // Same active time split around a 20 s blur.
    let mut controller = RotationController::new(Default::default());
    let mut blurred = controller.initial_state();
    let mut clock = FrameClock::new();
    for frame in 0..=50 {
        let _ = controller.tick(&mut blurred, clock.tick(at(frame * 16)));
    }
    clock.pause();
    for wall in [1_000, 5_000, 20_000] {
        assert_eq!(controller.tick(&mut blurred, clock.tick(at(wall))), 0.0);
    }
    clock.resume(at(20_800));
    for frame in 1..=75 {
        let _ = controller.tick(&mut blurred, clock.tick(at(20_800 + frame * 16)));
    }

    assert_eq!(focused.phase, RotationPhase::Settled);
    assert!((focused.angle + 0.8).abs() < 1e-4);
    assert!((focused.angle - blurred.angle).abs() < 1e-5);
}

#[test]
fn engine_session_from_toml_preset() {
    let options = Options::from_toml(
        r#"
[field]
num_helix = 600
num_bands = 6
num_per_band = 20
seed = 7

[links]
count = 3
policy = { kind = "stride" }

[flight]
hop_duration = 0.5
"#,
    )
    .unwrap();
    let mut engine = HelixEngine::new(options).unwrap();
    assert_eq!(engine.field().len(), 720);
    assert_eq!(engine.links().links().as_slice(), &[0, 200, 400]);

    let start = Instant::now();
    let frame = |n: u32| start + Duration::from_millis(u64::from(n) * 20);
    let mut finished = Vec::new();

    engine.handle_event(InputEvent::Wheel { delta_y: -2.0 }, frame(0));
    engine.execute(EngineCommand::FlyTo { link: 2 }).unwrap();
    for n in 0..50 {
        let output = engine.tick(frame(n));
        finished.extend(output.completed);
    }
    assert_eq!(finished, vec![MarkerId::Camera]);
    assert_eq!(engine.camera_position(), engine.link_positions()[2]);
    assert!(engine.rotation_state().angle < 0.0);
    assert_eq!(engine.rotation_state().phase, RotationPhase::Settled);

    engine.handle_event(
        InputEvent::LinkHover {
            link: 1,
            entered: true,
        },
        frame(50),
    );
    let held = engine.tick(frame(51));
    assert!(held.colors_dirty);
    assert_eq!(held.angle_delta, 0.0);
    engine.handle_event(
        InputEvent::LinkHover {
            link: 1,
            entered: false,
        },
        frame(52),
    );
    let released = engine.tick(frame(53));
    assert!(released.colors_dirty);
    assert!(released.angle_delta != 0.0);
}
