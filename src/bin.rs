use airbeat::beatmap::Beatmap;
use airbeat::config::Config;
use airbeat::contact::ContactSample;
use airbeat::hit_objects::{JudgementKind, SnapshotGeometry};
use airbeat::session::Session;
use cgmath::Vector2;
use rand::Rng;
use tracing::{debug, info};

/// Indicator scale at which the scripted player decides to tap.
const ENGAGE_SCALE: f64 = 1.15;
/// Hand wobble applied to every aimed contact, in pixels.
const JITTER: f64 = 6.0;
/// Spin speed in radians per millisecond, about three turns a second.
const SPIN_RATE: f64 = 0.02;
/// Orbit radius the scripted player spins at.
const SPIN_ORBIT: f64 = 120.0;

const DEMO_MAP: &str = r#"{
    "hit_objects": [
        { "time": 1200.0, "kind": "circle", "points": [{ "x": 420.0, "y": 380.0 }] },
        { "time": 2100.0, "kind": "circle", "points": [{ "x": 840.0, "y": 300.0 }] },
        { "time": 3000.0, "kind": "slider",
          "points": [{ "x": 300.0, "y": 500.0 }, { "x": 640.0, "y": 200.0 }, { "x": 980.0, "y": 500.0 }],
          "duration": 900.0, "repeats": 1 },
        { "time": 5600.0, "kind": "circle", "points": [{ "x": 640.0, "y": 160.0 }] },
        { "time": 6400.0, "kind": "spinner", "duration": 2000.0 },
        { "time": 9200.0, "kind": "slider",
          "points": [{ "x": 200.0, "y": 260.0 }, { "x": 1080.0, "y": 260.0 }],
          "duration": 700.0, "repeats": 0 },
        { "time": 10600.0, "kind": "circle", "points": [{ "x": 640.0, "y": 560.0 }] }
    ]
}"#;

fn jittered(pos: Vector2<f64>, rng: &mut impl Rng) -> ContactSample {
    Vector2::new(
        pos.x + rng.gen_range(-JITTER..JITTER),
        pos.y + rng.gen_range(-JITTER..JITTER),
    )
}

/// Plays like a decent human: taps circles and slider heads once their
/// indicator is nearly closed, rides slider balls, and orbits spinners.
fn plan_contacts(session: &Session, now: f64, rng: &mut impl Rng) -> Vec<ContactSample> {
    let mut samples = Vec::new();

    for snapshot in session.snapshots() {
        match snapshot.geometry {
            SnapshotGeometry::Circle {
                pos,
                approach_scale,
            } => {
                if approach_scale <= ENGAGE_SCALE {
                    samples.push(jittered(pos, rng));
                }
            }
            SnapshotGeometry::Slider {
                head,
                ball,
                approach_scale,
                ..
            } => match ball {
                Some(ball) => samples.push(jittered(ball, rng)),
                None if approach_scale <= ENGAGE_SCALE => samples.push(jittered(head, rng)),
                None => {}
            },
            SnapshotGeometry::Spinner { center, .. } => {
                let angle = now * SPIN_RATE;
                samples.push(Vector2::new(
                    center.x + SPIN_ORBIT * angle.cos(),
                    center.y + SPIN_ORBIT * angle.sin(),
                ));
            }
        }
    }

    samples
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let beatmap = Beatmap::from_json(DEMO_MAP).expect("demo beatmap is valid");

    let mut session = Session::new(Config::default());
    let horizon = beatmap.end_time()
        + session.config().approach_window_ms
        + session.config().grace_ms;

    session.load_beatmap(beatmap);
    session.start();

    let mut rng = rand::thread_rng();
    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;

    while now <= horizon {
        session.tick(now);

        let samples = plan_contacts(&session, now, &mut rng);
        session.on_contact_batch(&samples);

        for event in session.take_events() {
            // per-tick spin credits are too chatty for the default filter
            match event.kind {
                JudgementKind::SpinnerSpin { .. } => {
                    debug!(t = event.time, kind = ?event.kind, "judgement")
                }
                _ => info!(t = event.time, kind = ?event.kind, "judgement"),
            }
        }

        now += frame_ms;
    }

    session.stop();

    let results = session.results();
    info!(
        score = results.total(),
        x300 = results.x300(),
        x100 = results.x100(),
        x50 = results.x50(),
        misses = results.misses(),
        slider_bonuses = results.slider_bonuses(),
        spinner_turns = results.spinner_turns(),
        "simulation finished"
    );
}
