use std::f64::consts::TAU;

use cgmath::Vector2;

use crate::config::Config;
use crate::contact::ContactBatch;
use crate::math;

use super::{JudgementKind, ObjectState};

/// A rotation target centered on the play-field. Arms at its due time,
/// accumulates signed rotation while a contact circles the center, and
/// pays a bonus per whole turn when its duration runs out.
pub struct Spinner {
    pub start_time: f64,
    pub duration: f64,
    pub center: Vector2<f64>,
    pub state: ObjectState,
    /// Signed radians accumulated over the whole spin.
    pub total_rotation: f64,
    /// Angle of the tracked contact on the previous tick. Reset whenever
    /// tracking drops so re-entry never credits the gap.
    pub last_angle: Option<f64>,
    pub progress_frac: f64,
}

impl Spinner {
    pub fn new(start_time: f64, duration: f64, center: Vector2<f64>) -> Self {
        Self {
            start_time,
            duration,
            center,
            state: ObjectState::Approaching,
            total_rotation: 0.0,
            last_angle: None,
            progress_frac: 0.0,
        }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Whole turns spun so far, ignoring direction.
    pub fn full_turns(&self) -> u32 {
        (self.total_rotation.abs() / TAU).floor() as u32
    }

    pub fn progress(
        &mut self,
        time: f64,
        latest: &ContactBatch,
        config: &Config,
        emit: &mut impl FnMut(JudgementKind),
    ) {
        if self.state.is_terminal() {
            return;
        }

        if self.state == ObjectState::Approaching {
            if time < self.start_time {
                return;
            }
            self.state = ObjectState::Armed;
        }

        if time >= self.end_time() {
            let turns = self.full_turns();
            if turns > 0 {
                emit(JudgementKind::SpinnerBonus { turns });
            }
            self.progress_frac = 1.0;
            self.state = ObjectState::Judged;
            return;
        }

        self.progress_frac =
            math::calc_progress(time, self.start_time, self.end_time()).clamp(0.0, 1.0);

        let tracked = latest
            .samples()
            .iter()
            .copied()
            .find(|sample| math::distance(*sample, self.center) <= config.spinner_radius);

        match tracked {
            Some(sample) => {
                let angle = math::angle_about(self.center, sample);

                if let Some(last) = self.last_angle {
                    let delta = math::wrap_angle_delta(last, angle);
                    self.total_rotation += delta;

                    let points = (delta.abs() * config.spin_points_per_radian).round() as u32;
                    if points > 0 {
                        emit(JudgementKind::SpinnerSpin { points });
                    }
                }

                self.last_angle = Some(angle);
            }
            None => self.last_angle = None,
        }
    }
}

#[cfg(test)]
fn batch_at_angle(center: Vector2<f64>, radius: f64, angle: f64) -> ContactBatch {
    ContactBatch::from_pixels(&[Vector2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )])
}

#[test]
pub fn test_spin_credits_angle_deltas() {
    let config = Config::default();
    let center = config.centroid();
    let mut spinner = Spinner::new(0.0, 5000.0, center);
    let mut emitted = Vec::new();

    // first in-range sample only establishes the reference angle
    spinner.progress(0.0, &batch_at_angle(center, 100.0, 0.0), &config, &mut |k| {
        emitted.push(k)
    });
    assert_eq!(spinner.state, ObjectState::Armed);
    assert!(emitted.is_empty());

    spinner.progress(100.0, &batch_at_angle(center, 100.0, 0.5), &config, &mut |k| {
        emitted.push(k)
    });
    assert_eq!(emitted, vec![JudgementKind::SpinnerSpin { points: 5 }]);
    assert!((spinner.total_rotation - 0.5).abs() < 1e-9);
}

#[test]
pub fn test_tracking_gap_resets_reference() {
    let config = Config::default();
    let center = config.centroid();
    let mut spinner = Spinner::new(0.0, 5000.0, center);
    let mut emitted = Vec::new();

    spinner.progress(0.0, &batch_at_angle(center, 100.0, 0.0), &config, &mut |k| {
        emitted.push(k)
    });

    // contact leaves the spin radius for one tick
    let far = ContactBatch::from_pixels(&[Vector2::new(0.0, 0.0)]);
    spinner.progress(100.0, &far, &config, &mut |k| emitted.push(k));
    assert_eq!(spinner.last_angle, None);

    // re-entry must not credit the angle covered while away
    spinner.progress(200.0, &batch_at_angle(center, 100.0, 2.0), &config, &mut |k| {
        emitted.push(k)
    });
    assert!(emitted.is_empty());
    assert_eq!(spinner.total_rotation, 0.0);
}

#[test]
pub fn test_turn_bonus_on_expiry() {
    let config = Config::default();
    let center = config.centroid();
    let mut spinner = Spinner::new(0.0, 3000.0, center);
    let mut emitted = Vec::new();

    // 2.25 turns in quarter-turn steps
    let steps = 9;
    for i in 0..=steps {
        let angle = i as f64 * (TAU / 4.0);
        let time = i as f64 * 100.0;
        spinner.progress(time, &batch_at_angle(center, 120.0, angle), &config, &mut |k| {
            emitted.push(k)
        });
    }

    assert_eq!(spinner.full_turns(), 2);

    spinner.progress(3000.0, &ContactBatch::new(), &config, &mut |k| emitted.push(k));
    assert_eq!(spinner.state, ObjectState::Judged);
    assert_eq!(emitted.last(), Some(&JudgementKind::SpinnerBonus { turns: 2 }));

    // terminal spinners stay quiet
    let before = emitted.len();
    spinner.progress(3100.0, &ContactBatch::new(), &config, &mut |k| emitted.push(k));
    assert_eq!(emitted.len(), before);
}
