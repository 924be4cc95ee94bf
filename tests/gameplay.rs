use airbeat::beatmap::{Beatmap, HitObjectSpec};
use airbeat::config::Config;
use airbeat::hit_objects::{HitGrade, JudgementKind, SnapshotGeometry};
use airbeat::session::Session;
use cgmath::Vector2;
use test_case::case;

/// Circle judging through the public session interface

fn single_circle_session(due: f64, pos: Vector2<f64>) -> Session {
    let mut session = Session::new(Config::default());
    session.load_beatmap(Beatmap::new(vec![HitObjectSpec::circle(due, pos)]));
    session.start();
    session
}

#[case(1950.0, 300 ; "contact near the due time grades 300")]
#[case(1850.0, 100 ; "earlier contact grades 100")]
#[case(1600.0, 50 ; "early contact grades 50")]
fn grades_track_the_approach_indicator(contact_at: f64, expected: u32) {
    let pos = Vector2::new(400.0, 300.0);
    let mut session = single_circle_session(2000.0, pos);

    session.tick(contact_at);
    session.on_contact_batch(&[pos]);

    assert_eq!(session.score(), expected);
    assert_eq!(session.active_object_count(), 0);
}

#[test]
fn single_circle_spawn_hit_flow() {
    let pos = Vector2::new(420.0, 380.0);
    let mut session = single_circle_session(2000.0, pos);

    session.tick(900.0);
    assert_eq!(session.active_object_count(), 0, "window not open yet");

    session.tick(1000.0);
    assert_eq!(session.active_object_count(), 1);
    match session.snapshots()[0].geometry {
        SnapshotGeometry::Circle { approach_scale, .. } => assert_eq!(approach_scale, 3.0),
        _ => panic!("expected a circle snapshot"),
    }

    session.tick(1950.0);
    session.on_contact_batch(&[pos]);

    assert_eq!(session.score(), 300);
    assert_eq!(session.results().x300(), 1);
    assert_eq!(session.active_object_count(), 0, "judged circle leaves the set");

    let events = session.take_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, JudgementKind::Hit(HitGrade::X300));
    assert_eq!(events[0].time, 1950.0);
}

#[test]
fn untouched_circle_misses_after_grace() {
    let mut session = single_circle_session(2000.0, Vector2::new(400.0, 300.0));

    session.tick(3100.0);
    assert_eq!(session.active_object_count(), 1, "grace still open");

    session.tick(3200.0);
    assert_eq!(session.active_object_count(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.results().misses(), 1);
    assert_eq!(session.judgement_log().count_misses(), 1);
}

#[test]
fn contact_must_land_within_the_hit_radius() {
    let pos = Vector2::new(400.0, 300.0);
    let mut session = single_circle_session(2000.0, pos);

    session.tick(1950.0);
    session.on_contact_batch(&[Vector2::new(451.0, 300.0)]);
    assert_eq!(session.score(), 0);
    assert_eq!(session.active_object_count(), 1);

    // exactly on the radius still counts
    session.on_contact_batch(&[Vector2::new(450.0, 300.0)]);
    assert_eq!(session.score(), 300);
}

#[test]
fn custom_config_tunes_window_and_radius() {
    let config = Config {
        approach_window_ms: 500.0,
        hit_radius: 10.0,
        ..Config::default()
    };
    let pos = Vector2::new(400.0, 300.0);
    let mut session = Session::new(config);
    session.load_beatmap(Beatmap::new(vec![HitObjectSpec::circle(1000.0, pos)]));
    session.start();

    // the shorter window delays the spawn
    session.tick(400.0);
    assert_eq!(session.active_object_count(), 0);
    session.tick(500.0);
    assert_eq!(session.active_object_count(), 1);

    // the tighter radius rejects a contact the default would take
    session.tick(990.0);
    session.on_contact_batch(&[Vector2::new(411.0, 300.0)]);
    assert_eq!(session.score(), 0);
    session.on_contact_batch(&[Vector2::new(410.0, 300.0)]);
    assert_eq!(session.score(), 300);
}

#[test]
fn one_batch_can_judge_several_objects() {
    let a = Vector2::new(200.0, 200.0);
    let b = Vector2::new(900.0, 500.0);
    let mut session = Session::new(Config::default());
    session.load_beatmap(Beatmap::new(vec![
        HitObjectSpec::circle(2000.0, a),
        HitObjectSpec::circle(2050.0, b),
    ]));
    session.start();

    session.tick(1950.0);
    session.on_contact_batch(&[a, b]);

    assert_eq!(session.results().x300(), 1);
    assert_eq!(session.results().x100(), 1);
    assert_eq!(session.score(), 400);
    assert_eq!(session.active_object_count(), 0);
}

#[test]
fn an_object_takes_at_most_one_contact_per_batch() {
    let pos = Vector2::new(400.0, 300.0);
    let mut session = single_circle_session(2000.0, pos);

    session.tick(1950.0);
    session.on_contact_batch(&[pos, Vector2::new(405.0, 300.0)]);

    assert_eq!(session.score(), 300);
    assert_eq!(session.judgement_log().len(), 1);
}

#[test]
fn judged_circle_ignores_further_contact() {
    let pos = Vector2::new(400.0, 300.0);
    let mut session = single_circle_session(2000.0, pos);

    session.tick(1950.0);
    session.on_contact_batch(&[pos]);
    assert_eq!(session.score(), 300);

    session.on_contact_batch(&[pos]);
    assert_eq!(session.score(), 300);
    assert_eq!(session.judgement_log().len(), 1);
}

#[test]
fn late_spawn_is_immediately_judgeable() {
    let pos = Vector2::new(400.0, 300.0);
    let mut session = single_circle_session(1000.0, pos);

    // first tick lands inside the grace, long after the window opened
    session.tick(2100.0);
    assert_eq!(session.active_object_count(), 1);
    match session.snapshots()[0].geometry {
        SnapshotGeometry::Circle { approach_scale, .. } => assert_eq!(approach_scale, 1.0),
        _ => panic!("expected a circle snapshot"),
    }

    session.on_contact_batch(&[pos]);
    assert_eq!(session.score(), 300);
}

#[test]
fn spawn_past_the_deadline_misses_on_the_same_tick() {
    let mut session = single_circle_session(1000.0, Vector2::new(400.0, 300.0));

    session.tick(5000.0);

    assert_eq!(session.active_object_count(), 0);
    assert_eq!(session.results().misses(), 1);
    assert_eq!(session.score(), 0);
}
