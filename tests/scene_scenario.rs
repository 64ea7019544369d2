use draw_sheep::samples::sample_drawings;
use draw_sheep::sim::{Viewport, planet_geometry, visible_arc_range, visual_center};
use draw_sheep::{ClickOutcome, Drawing, QualityPreset, Scene, Settings, Tuning};

const HD: Viewport = Viewport::new(1920.0, 1080.0);
const FRAME_MS: f64 = 1000.0 / 60.0;

fn hd_scene(seed: u64) -> Scene {
    let settings = Settings::from_preset(QualityPreset::Low);
    let mut scene = Scene::new(seed, Tuning::default(), settings);
    scene.resize(HD);
    scene
}

#[test]
fn host_roster_round_trip() {
    let json = r##"[
        {"id": "A",
         "body": [{"points": [{"x": 20, "y": 20}, {"x": 280, "y": 220}],
                   "color": "#333333", "size": 4}],
         "hindLegs": [], "frontLegs": [], "createdAt": 1700000000000, "removed": false},
        {"id": "gone", "body": [], "hindLegs": [], "frontLegs": [], "createdAt": 1, "removed": true}
    ]"##;
    let roster = Drawing::roster_from_json(json).unwrap();

    let mut scene = hd_scene(3);
    scene.sync_roster(&roster);
    assert_eq!(scene.creatures().len(), 1);

    let arc = visible_arc_range(&planet_geometry(HD), HD);
    let a = scene.creature("A").unwrap();
    assert!(arc.contains(a.angle));
    assert_eq!(a.jump_height, 0.0);

    scene.sync_roster(&[]);
    assert!(scene.creature("A").is_none());
}

#[test]
fn samples_walk_and_wrap_for_a_minute() {
    let mut scene = hd_scene(11);
    scene.sync_roster(&sample_drawings());
    let arc = visible_arc_range(&planet_geometry(HD), HD);
    let margin = scene.tuning.wrap_margin;

    for frame in 0..3600 {
        let batch = scene.frame(frame as f64 * FRAME_MS).unwrap();
        assert!(batch.triangle_count() > 0);
        for c in scene.creatures() {
            assert!(c.angle >= arc.end - margin - 1e-3);
            assert!(c.angle <= arc.start + margin + 1e-3);
            assert!((0.0..1.0).contains(&c.leg_phase));
            assert_eq!(c.jump_height, 0.0);
        }
    }
}

#[test]
fn jump_lands_and_removal_is_reported() {
    let mut scene = hd_scene(5);
    scene.sync_roster(&sample_drawings());
    scene.frame(0.0);

    let id = scene.creatures()[0].id().to_string();
    let geo = planet_geometry(HD);
    let point = visual_center(scene.creature(&id).unwrap(), &geo, &scene.tuning);

    // The front-most sheep under the point takes the click
    let hit = match scene.click(point, 10_000.0) {
        ClickOutcome::Jumped(id) => id,
        other => panic!("expected a jump, got {:?}", other),
    };
    assert!(scene.creature(&hit).unwrap().is_airborne());

    // Airborne for about 2 * v / g = 0.9 s
    let mut t = 0.0;
    for _ in 0..120 {
        t += FRAME_MS;
        scene.frame(t);
    }
    let landed = scene.creature(&hit).unwrap();
    assert_eq!(landed.jump_height, 0.0);
    assert_eq!(landed.jump_velocity, 0.0);

    let point = visual_center(landed, &geo, &scene.tuning);
    scene.click(point, 20_000.0);
    let second = scene.click(point, 20_100.0);
    assert!(matches!(second, ClickOutcome::RemoveRequested(_)));

    // The host persists the removal and sends the shorter roster back
    let ClickOutcome::RemoveRequested(removed) = second else {
        unreachable!()
    };
    let remaining: Vec<Drawing> = sample_drawings()
        .into_iter()
        .filter(|d| d.id != removed)
        .collect();
    scene.sync_roster(&remaining);
    assert_eq!(scene.creatures().len(), 2);
    assert!(scene.creature(&removed).is_none());
}

#[test]
fn resize_keeps_creatures_and_rebuilds_background() {
    let mut scene = hd_scene(9);
    scene.sync_roster(&sample_drawings());
    scene.frame(0.0);
    let ids: Vec<String> = scene.creatures().iter().map(|c| c.id().to_string()).collect();

    let small = Viewport::new(800.0, 600.0);
    scene.resize(small);
    let batch = scene.frame(FRAME_MS).unwrap();
    assert_eq!(batch.viewport, small);
    assert_eq!(batch.planet, planet_geometry(small));
    for id in ids {
        assert!(scene.creature(&id).is_some());
    }
}
