use std::f64::consts::PI;

use airbeat::beatmap::{Beatmap, HitObjectSpec};
use airbeat::config::Config;
use airbeat::hit_objects::{HitGrade, JudgementKind, SnapshotGeometry};
use airbeat::session::Session;
use cgmath::Vector2;

/// Session lifecycle and full play-throughs

#[test]
fn stop_releases_objects_and_freezes_the_score() {
    let mut session = Session::new(Config::default());
    session.load_beatmap(Beatmap::new(vec![
        HitObjectSpec::circle(1000.0, Vector2::new(200.0, 200.0)),
        HitObjectSpec::circle(1200.0, Vector2::new(500.0, 200.0)),
        HitObjectSpec::circle(1400.0, Vector2::new(800.0, 200.0)),
        HitObjectSpec::circle(1600.0, Vector2::new(1100.0, 200.0)),
    ]));
    session.start();

    session.tick(1000.0);
    assert_eq!(session.active_object_count(), 4);

    session.on_contact_batch(&[Vector2::new(200.0, 200.0)]);
    assert_eq!(session.score(), 300);
    assert_eq!(session.active_object_count(), 3);

    session.stop();
    assert!(!session.is_running());
    assert_eq!(session.active_object_count(), 0);
    assert_eq!(session.score(), 300, "stopping keeps the score");

    // stop is idempotent
    session.stop();
    assert_eq!(session.active_object_count(), 0);
    assert_eq!(session.score(), 300);

    // a stopped session ignores the clock and the tracker
    session.tick(1400.0);
    session.on_contact_batch(&[Vector2::new(500.0, 200.0)]);
    assert_eq!(session.score(), 300);
    assert_eq!(session.active_object_count(), 0);
}

#[test]
fn calls_without_a_map_or_before_start_are_no_ops() {
    let mut session = Session::default();

    session.tick(1000.0);
    session.on_contact_batch(&[Vector2::new(100.0, 100.0)]);
    assert_eq!(session.active_object_count(), 0);
    assert_eq!(session.score(), 0);

    // running with no beatmap is allowed and does nothing
    session.start();
    assert!(session.is_running());
    session.tick(1000.0);
    session.on_contact_batch(&[Vector2::new(100.0, 100.0)]);
    assert_eq!(session.score(), 0);

    session.stop();
    assert!(!session.is_running());
}

#[test]
fn restart_replays_the_map_from_scratch() {
    let pos = Vector2::new(400.0, 300.0);
    let mut session = Session::new(Config::default());
    session.load_beatmap(Beatmap::new(vec![HitObjectSpec::circle(1000.0, pos)]));
    session.start();

    session.tick(1000.0);
    session.on_contact_batch(&[pos]);
    assert_eq!(session.score(), 300);
    session.stop();

    session.start();
    assert_eq!(session.score(), 0);
    assert!(session.judgement_log().is_empty());
    assert_eq!(session.active_object_count(), 0);

    session.tick(1000.0);
    assert_eq!(session.active_object_count(), 1, "objects respawn after restart");
    session.on_contact_batch(&[pos]);
    assert_eq!(session.score(), 300);
}

#[test]
fn take_events_drains_pending_judgements() {
    let pos = Vector2::new(400.0, 300.0);
    let mut session = Session::new(Config::default());
    session.load_beatmap(Beatmap::new(vec![HitObjectSpec::circle(1000.0, pos)]));
    session.start();

    session.tick(1000.0);
    session.on_contact_batch(&[pos]);

    let events = session.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, JudgementKind::Hit(HitGrade::X300));

    assert!(session.take_events().is_empty(), "drained once, gone");

    // the log keeps the full history regardless
    assert_eq!(session.judgement_log().len(), 1);
}

#[test]
fn snapshots_come_back_in_spawn_order() {
    let mut session = Session::new(Config::default());
    session.load_beatmap(Beatmap::new(vec![
        HitObjectSpec::circle(1000.0, Vector2::new(200.0, 200.0)),
        HitObjectSpec::slider(
            1300.0,
            vec![Vector2::new(400.0, 400.0), Vector2::new(900.0, 400.0)],
            500.0,
            0,
        ),
        HitObjectSpec::spinner(1600.0, 1000.0),
    ]));
    session.start();

    session.tick(700.0);
    let snapshots = session.snapshots();
    assert_eq!(snapshots.len(), 3);
    assert!(matches!(snapshots[0].geometry, SnapshotGeometry::Circle { .. }));
    assert!(matches!(snapshots[1].geometry, SnapshotGeometry::Slider { .. }));
    assert!(matches!(snapshots[2].geometry, SnapshotGeometry::Spinner { .. }));
    assert_eq!(snapshots[0].object_id, 0);
    assert_eq!(snapshots[2].object_id, 2);
}

#[test]
fn full_run_over_a_json_map_scores_exactly() {
    let doc = r#"{
        "hit_objects": [
            { "time": 1000.0, "kind": "circle", "points": [{ "x": 300.0, "y": 300.0 }] },
            { "time": 2000.0, "kind": "slider",
              "points": [{ "x": 200.0, "y": 400.0 }, { "x": 600.0, "y": 400.0 }],
              "duration": 400.0, "repeats": 0 },
            { "time": 3000.0, "kind": "spinner", "duration": 1000.0 }
        ]
    }"#;
    let beatmap = Beatmap::from_json(doc).expect("map decodes");

    let mut session = Session::new(Config::default());
    let center = session.config().centroid();
    session.load_beatmap(beatmap);
    session.start();

    // circle, on the nose
    session.tick(1000.0);
    session.on_contact_batch(&[Vector2::new(300.0, 300.0)]);
    assert_eq!(session.score(), 300);

    // slider head, then ride the ball home
    session.tick(2000.0);
    session.on_contact_batch(&[Vector2::new(200.0, 400.0)]);
    let mut t = 2050.0;
    while t <= 2400.0 {
        session.tick(t);
        if let Some(SnapshotGeometry::Slider { ball: Some(ball), .. }) =
            session.snapshots().first().map(|s| s.geometry)
        {
            session.on_contact_batch(&[ball]);
        }
        t += 50.0;
    }
    assert_eq!(session.score(), 900);

    // park the contact away from the center before the spinner arms
    session.on_contact_batch(&[Vector2::new(0.0, 0.0)]);
    session.tick(3000.0);

    // one full turn in eighth-turn steps
    for i in 0..=8 {
        let angle = i as f64 * (PI / 4.0);
        session.on_contact_batch(&[Vector2::new(
            center.x + 100.0 * angle.cos(),
            center.y + 100.0 * angle.sin(),
        )]);
        session.tick(3050.0 + i as f64 * 50.0);
    }
    assert_eq!(session.score(), 964);

    session.tick(4000.0);
    assert_eq!(session.score(), 1964, "turn bonus lands at expiry");
    assert_eq!(session.active_object_count(), 0);

    session.stop();

    let results = session.results();
    assert_eq!(results.x300(), 2);
    assert_eq!(results.slider_bonuses(), 1);
    assert_eq!(results.spinner_turns(), 1);
    assert_eq!(results.misses(), 0);

    // 1 hit + 1 head + 1 completion + 8 spins + 1 bonus
    assert_eq!(session.judgement_log().len(), 12);
}
