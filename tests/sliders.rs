use airbeat::beatmap::{Beatmap, HitObjectSpec};
use airbeat::config::Config;
use airbeat::hit_objects::SnapshotGeometry;
use airbeat::session::Session;
use approx::assert_relative_eq;
use cgmath::Vector2;

/// Slider follows through the public session interface

fn slider_session(points: Vec<Vector2<f64>>, due: f64, duration: f64, repeats: u32) -> Session {
    let mut session = Session::new(Config::default());
    session.load_beatmap(Beatmap::new(vec![HitObjectSpec::slider(
        due, points, duration, repeats,
    )]));
    session.start();
    session
}

fn ball_of(session: &Session) -> Option<Vector2<f64>> {
    match session.snapshots().first() {
        Some(snapshot) => match snapshot.geometry {
            SnapshotGeometry::Slider { ball, .. } => ball,
            _ => None,
        },
        None => None,
    }
}

/// Ticks through the follow, keeping one contact glued to the ball.
fn ride(session: &mut Session, from: f64, until: f64, step: f64) {
    let mut t = from;
    while t <= until {
        session.tick(t);
        if let Some(ball) = ball_of(session) {
            session.on_contact_batch(&[ball]);
        }
        t += step;
    }
}

#[test]
fn clean_follow_pays_head_and_completion() {
    let head = Vector2::new(300.0, 300.0);
    let mut session = slider_session(vec![head, Vector2::new(700.0, 300.0)], 1000.0, 400.0, 0);

    session.tick(1000.0);
    session.on_contact_batch(&[head]);
    assert_eq!(session.score(), 300, "head graded like a circle");

    ride(&mut session, 1050.0, 1400.0, 50.0);

    assert_eq!(session.score(), 600);
    assert_eq!(session.results().slider_bonuses(), 1);
    assert_eq!(session.active_object_count(), 0);
}

#[test]
fn ball_tracks_the_path() {
    let head = Vector2::new(300.0, 300.0);
    let mut session = slider_session(vec![head, Vector2::new(700.0, 300.0)], 1000.0, 400.0, 0);

    session.tick(1000.0);
    session.on_contact_batch(&[head]);

    session.tick(1200.0);
    let ball = ball_of(&session).expect("follow is underway");
    assert_relative_eq!(ball.x, 500.0);
    assert_relative_eq!(ball.y, 300.0);
}

#[test]
fn curved_sliders_follow_the_quadratic_path() {
    let points = vec![
        Vector2::new(200.0, 400.0),
        Vector2::new(500.0, 100.0),
        Vector2::new(800.0, 400.0),
    ];
    let mut session = slider_session(points, 1000.0, 400.0, 0);

    session.tick(1000.0);
    session.on_contact_batch(&[Vector2::new(200.0, 400.0)]);

    session.tick(1200.0);
    let ball = ball_of(&session).expect("follow is underway");
    assert_relative_eq!(ball.x, 500.0);
    assert_relative_eq!(ball.y, 250.0);
}

#[test]
fn repeats_ping_pong_the_ball() {
    let head = Vector2::new(300.0, 300.0);
    let mut session = slider_session(vec![head, Vector2::new(700.0, 300.0)], 1000.0, 400.0, 1);

    session.tick(1000.0);
    session.on_contact_batch(&[head]);

    session.tick(1400.0);
    let ball = ball_of(&session).expect("first traversal done");
    assert_relative_eq!(ball.x, 700.0);

    session.tick(1600.0);
    let ball = ball_of(&session).expect("second traversal underway");
    assert_relative_eq!(ball.x, 500.0);

    session.tick(1700.0);
    let ball = ball_of(&session).expect("second traversal underway");
    assert_relative_eq!(ball.x, 400.0);

    session.tick(1800.0);
    assert_eq!(session.active_object_count(), 0, "both traversals done");
}

#[test]
fn losing_the_ball_forfeits_the_completion_bonus() {
    let head = Vector2::new(300.0, 300.0);
    let mut session = slider_session(vec![head, Vector2::new(700.0, 300.0)], 1000.0, 400.0, 0);

    session.tick(1000.0);
    session.on_contact_batch(&[head]);

    // tracking drops for one tick
    session.on_contact_batch(&[]);
    session.tick(1100.0);

    match session.snapshots()[0].geometry {
        SnapshotGeometry::Slider { dimmed, .. } => assert!(dimmed, "broken follow dims"),
        _ => panic!("expected a slider snapshot"),
    }

    // riding the ball again does not undo the break
    ride(&mut session, 1150.0, 1400.0, 50.0);

    assert_eq!(session.score(), 300);
    assert_eq!(session.results().slider_bonuses(), 0);
    assert_eq!(session.active_object_count(), 0);
}

#[test]
fn untouched_slider_misses() {
    let mut session = slider_session(
        vec![Vector2::new(300.0, 300.0), Vector2::new(700.0, 300.0)],
        1000.0,
        400.0,
        0,
    );

    session.tick(2200.0);

    assert_eq!(session.results().misses(), 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.active_object_count(), 0);
}

#[test]
fn head_stays_hittable_through_the_grace() {
    let head = Vector2::new(300.0, 300.0);
    let mut session = slider_session(vec![head, Vector2::new(700.0, 300.0)], 1000.0, 400.0, 0);

    session.tick(2100.0);
    session.on_contact_batch(&[head]);
    assert_eq!(session.score(), 300);

    // the follow runs from the hit, not from the nominal due time
    ride(&mut session, 2150.0, 2500.0, 50.0);

    assert_eq!(session.score(), 600);
    assert_eq!(session.results().slider_bonuses(), 1);
    assert_eq!(session.active_object_count(), 0);
}
