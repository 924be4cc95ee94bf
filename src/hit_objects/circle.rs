use cgmath::Vector2;

use crate::config::Config;
use crate::math;

use super::{approach_scale, HitGrade, JudgementKind, ObjectState};

/// A single tap target, contact-testable from spawn until its window
/// closes.
pub struct Circle {
    pub start_time: f64,
    pub pos: Vector2<f64>,
    pub state: ObjectState,
    /// Indicator scale as of the last progression, used to grade contacts.
    pub approach_scale: f64,
}

impl Circle {
    pub fn new(start_time: f64, pos: Vector2<f64>, time: f64, config: &Config) -> Self {
        Self {
            start_time,
            pos,
            state: ObjectState::Approaching,
            approach_scale: approach_scale(time, start_time, config),
        }
    }

    fn deadline(&self, config: &Config) -> f64 {
        self.start_time + config.approach_window_ms + config.grace_ms
    }

    /// Distance-tests one sample against the circle. A qualifying contact
    /// judges the circle immediately; the grade comes from how far the
    /// indicator had shrunk.
    pub fn try_contact(&mut self, sample: Vector2<f64>, config: &Config) -> Option<JudgementKind> {
        if self.state.is_terminal() {
            return None;
        }

        if math::distance(sample, self.pos) > config.hit_radius {
            return None;
        }

        self.state = ObjectState::Judged;

        Some(JudgementKind::Hit(HitGrade::from_scale(self.approach_scale)))
    }

    pub fn progress(&mut self, time: f64, config: &Config, emit: &mut impl FnMut(JudgementKind)) {
        if self.state.is_terminal() {
            return;
        }

        self.approach_scale = approach_scale(time, self.start_time, config);

        if time >= self.deadline(config) {
            self.state = ObjectState::Missed;
            emit(JudgementKind::Miss);
        }
    }
}

#[test]
pub fn test_contact_inside_radius_judges() {
    let config = Config::default();
    let mut circle = Circle::new(2000.0, Vector2::new(600.0, 300.0), 1000.0, &config);

    assert_eq!(circle.try_contact(Vector2::new(900.0, 300.0), &config), None);
    assert!(!circle.state.is_terminal());

    let result = circle.try_contact(Vector2::new(640.0, 330.0), &config);
    assert_eq!(
        result,
        Some(JudgementKind::Hit(HitGrade::X50)),
        "contact at spawn scale grades as a 50"
    );
    assert_eq!(circle.state, ObjectState::Judged);

    // judged circles ignore further contact
    assert_eq!(circle.try_contact(Vector2::new(600.0, 300.0), &config), None);
}

#[test]
pub fn test_untouched_circle_misses_after_grace() {
    let config = Config::default();
    let mut circle = Circle::new(2000.0, Vector2::new(600.0, 300.0), 1000.0, &config);

    let mut emitted = Vec::new();
    circle.progress(3199.0, &config, &mut |kind| emitted.push(kind));
    assert!(emitted.is_empty());

    circle.progress(3200.0, &config, &mut |kind| emitted.push(kind));
    assert_eq!(emitted, vec![JudgementKind::Miss]);
    assert_eq!(circle.state, ObjectState::Missed);

    // no second miss once terminal
    circle.progress(4000.0, &config, &mut |kind| emitted.push(kind));
    assert_eq!(emitted.len(), 1);
}
