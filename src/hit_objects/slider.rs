use cgmath::Vector2;

use crate::config::Config;
use crate::contact::ContactBatch;
use crate::math;

use super::{approach_scale, HitGrade, JudgementKind, ObjectState};

/// A path target. The head is hit like a circle, then the follow ball
/// traverses the path back and forth while the player keeps a contact
/// within the follow radius.
pub struct Slider {
    pub start_time: f64,
    /// One traversal of the path, in milliseconds.
    pub duration: f64,
    /// Additional traversals after the first one.
    pub repeats: u32,
    /// 1 to 3 control points; the first one is the head.
    pub points: Vec<Vector2<f64>>,
    pub state: ObjectState,
    pub approach_scale: f64,
    /// Clock at the moment the head was hit.
    pub follow_started_at: Option<f64>,
    /// Latched false the first tick no contact stays near the ball.
    pub following_correctly: bool,
    /// Ball position while the follow is underway.
    pub ball: Option<Vector2<f64>>,
}

impl Slider {
    pub fn new(
        start_time: f64,
        points: Vec<Vector2<f64>>,
        duration: f64,
        repeats: u32,
        time: f64,
        config: &Config,
    ) -> Self {
        Self {
            start_time,
            duration,
            repeats,
            points,
            state: ObjectState::Approaching,
            approach_scale: approach_scale(time, start_time, config),
            follow_started_at: None,
            following_correctly: false,
            ball: None,
        }
    }

    pub fn head(&self) -> Vector2<f64> {
        self.points[0]
    }

    /// Follow time covering the first traversal plus every repeat.
    pub fn total_duration(&self) -> f64 {
        self.duration * (self.repeats as f64 + 1.0)
    }

    /// Ping-pong path parameter for a time into the follow: odd traversals
    /// run the path backwards.
    pub fn path_parameter(&self, elapsed: f64) -> f64 {
        let elapsed = elapsed.max(0.0);
        let span = (elapsed / self.duration).floor();
        let t = (elapsed - span * self.duration) / self.duration;

        if span as u64 % 2 == 1 {
            1.0 - t
        } else {
            t
        }
    }

    pub fn ball_at(&self, elapsed: f64) -> Vector2<f64> {
        math::point_at(&self.points, self.path_parameter(elapsed))
    }

    fn deadline(&self, config: &Config) -> f64 {
        self.start_time + config.approach_window_ms + config.grace_ms
    }

    /// Distance-tests one sample against the head. A qualifying contact
    /// grades the head and starts the follow from that instant.
    pub fn try_contact(
        &mut self,
        time: f64,
        sample: Vector2<f64>,
        config: &Config,
    ) -> Option<JudgementKind> {
        if self.state != ObjectState::Approaching {
            return None;
        }

        if math::distance(sample, self.head()) > config.hit_radius {
            return None;
        }

        self.state = ObjectState::Following;
        self.follow_started_at = Some(time);
        self.following_correctly = true;
        self.ball = Some(self.head());

        Some(JudgementKind::SliderHead(HitGrade::from_scale(
            self.approach_scale,
        )))
    }

    pub fn progress(
        &mut self,
        time: f64,
        latest: &ContactBatch,
        config: &Config,
        emit: &mut impl FnMut(JudgementKind),
    ) {
        match self.state {
            ObjectState::Approaching => {
                self.approach_scale = approach_scale(time, self.start_time, config);

                if time >= self.deadline(config) {
                    self.state = ObjectState::Missed;
                    emit(JudgementKind::Miss);
                }
            }
            ObjectState::Following => {
                let Some(started) = self.follow_started_at else {
                    return;
                };

                let elapsed = time - started;

                if elapsed >= self.total_duration() {
                    self.ball = Some(self.ball_at(self.total_duration()));
                    if self.following_correctly {
                        emit(JudgementKind::SliderComplete);
                    }
                    self.state = ObjectState::Judged;
                    return;
                }

                let ball = self.ball_at(elapsed);
                self.ball = Some(ball);

                let in_range = latest
                    .samples()
                    .iter()
                    .any(|sample| math::distance(*sample, ball) <= config.follow_radius);

                if !in_range {
                    self.following_correctly = false;
                }
            }
            _ => {}
        }
    }
}

#[test]
pub fn test_ping_pong_parameter() {
    let config = Config::default();
    let points = vec![Vector2::new(0.0, 0.0), Vector2::new(100.0, 0.0)];
    let slider = Slider::new(0.0, points, 1000.0, 1, 0.0, &config);

    assert_eq!(slider.path_parameter(0.0), 0.0);
    assert_eq!(slider.path_parameter(500.0), 0.5);
    assert_eq!(slider.path_parameter(1000.0), 1.0);

    // second traversal runs backwards
    assert_eq!(slider.path_parameter(1250.0), 1.0 - slider.path_parameter(250.0));
    assert_eq!(slider.path_parameter(1500.0), 1.0 - slider.path_parameter(500.0));
    assert_eq!(slider.path_parameter(2000.0), 0.0);
}

#[test]
pub fn test_ball_reflects_on_repeat() {
    let config = Config::default();
    let points = vec![Vector2::new(0.0, 0.0), Vector2::new(100.0, 0.0)];
    let slider = Slider::new(0.0, points, 1000.0, 1, 0.0, &config);

    assert_eq!(slider.ball_at(250.0), slider.ball_at(1750.0));
    assert_eq!(slider.ball_at(1000.0), Vector2::new(100.0, 0.0));
    assert_eq!(slider.ball_at(2000.0), Vector2::new(0.0, 0.0));
}

#[test]
pub fn test_head_contact_starts_follow() {
    let config = Config::default();
    let points = vec![Vector2::new(200.0, 200.0), Vector2::new(500.0, 200.0)];
    let mut slider = Slider::new(2000.0, points, 400.0, 0, 2000.0, &config);

    let result = slider.try_contact(2000.0, Vector2::new(210.0, 205.0), &config);
    assert_eq!(result, Some(JudgementKind::SliderHead(HitGrade::X300)));
    assert_eq!(slider.state, ObjectState::Following);
    assert_eq!(slider.ball, Some(Vector2::new(200.0, 200.0)));

    // following sliders take no further head contact
    assert_eq!(slider.try_contact(2050.0, Vector2::new(200.0, 200.0), &config), None);
}

#[test]
pub fn test_follow_breaks_without_nearby_contact() {
    let config = Config::default();
    let points = vec![Vector2::new(200.0, 200.0), Vector2::new(500.0, 200.0)];
    let mut slider = Slider::new(2000.0, points, 400.0, 0, 2000.0, &config);

    slider.try_contact(2000.0, Vector2::new(200.0, 200.0), &config);

    let mut emitted = Vec::new();
    let near = ContactBatch::from_pixels(&[Vector2::new(280.0, 200.0)]);
    slider.progress(2200.0, &near, &config, &mut |kind| emitted.push(kind));
    assert!(slider.following_correctly);

    let empty = ContactBatch::new();
    slider.progress(2300.0, &empty, &config, &mut |kind| emitted.push(kind));
    assert!(!slider.following_correctly);

    // the break is latched and the bonus never fires
    slider.progress(2400.0, &near, &config, &mut |kind| emitted.push(kind));
    assert!(!slider.following_correctly);
    slider.progress(2500.0, &near, &config, &mut |kind| emitted.push(kind));
    assert_eq!(slider.state, ObjectState::Judged);
    assert!(emitted.is_empty());
}
