pub mod circle;
pub mod slider;
pub mod spinner;

use cgmath::Vector2;
use circle::Circle;
use slider::Slider;
use spinner::Spinner;

use crate::beatmap::{HitObjectSpec, SpecKind};
use crate::config::Config;
use crate::contact::ContactBatch;
use crate::math;

/// Indicator scale below which a contact grades as a 300.
pub const SCALE_X300: f64 = 1.2;
/// Indicator scale below which a contact grades as a 100.
pub const SCALE_X100: f64 = 1.5;

/// Lifecycle of a live object.
///
/// `Judged`, `Missed` and `Retired` are all terminal; the scheduler sweeps
/// terminal objects out of the active set at the end of every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
    Approaching,
    Armed,
    Following,
    Judged,
    Missed,
    Retired,
}

impl ObjectState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Judged | Self::Missed | Self::Retired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitGrade {
    X300,
    X100,
    X50,
}

impl HitGrade {
    /// Grades a contact by the approach indicator's scale at that moment.
    /// The tighter the timing, the smaller the indicator.
    pub fn from_scale(scale: f64) -> Self {
        if scale < SCALE_X300 {
            Self::X300
        } else if scale < SCALE_X100 {
            Self::X100
        } else {
            Self::X50
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Self::X300 => 300,
            Self::X100 => 100,
            Self::X50 => 50,
        }
    }
}

/// One scoring outcome produced by a live object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgementEvent {
    pub object_id: u32,
    pub spec_index: usize,
    pub time: f64,
    pub kind: JudgementKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JudgementKind {
    /// Circle contact, graded by timing.
    Hit(HitGrade),
    /// Slider head contact, graded like a circle.
    SliderHead(HitGrade),
    /// Slider followed to the end without breaking.
    SliderComplete,
    /// Incremental spinner rotation credit for one tick.
    SpinnerSpin { points: u32 },
    /// Whole turns accumulated by the time a spinner ended.
    SpinnerBonus { turns: u32 },
    /// The object's window closed without a qualifying contact.
    Miss,
}

/// Approach indicator scale for an object due at `due_time`, shrinking
/// linearly from `start_scale` down to 1.0 over the approach window and
/// clamped on both ends.
pub fn approach_scale(time: f64, due_time: f64, config: &Config) -> f64 {
    let progress = math::calc_progress(time, due_time - config.approach_window_ms, due_time);

    math::lerp(config.start_scale, 1.0, progress).clamp(1.0, config.start_scale)
}

/// Render-facing view of one live object, taken after a pass completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectSnapshot {
    pub object_id: u32,
    pub spec_index: usize,
    pub state: ObjectState,
    pub geometry: SnapshotGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapshotGeometry {
    Circle {
        pos: Vector2<f64>,
        approach_scale: f64,
    },
    Slider {
        head: Vector2<f64>,
        /// Present once the head was hit and the follow is underway.
        ball: Option<Vector2<f64>>,
        approach_scale: f64,
        /// The follow broke; hosts draw the body dimmed.
        dimmed: bool,
    },
    Spinner {
        center: Vector2<f64>,
        rotation_rad: f64,
        progress: f64,
    },
}

/// A spawned hit object being played right now.
pub struct LiveObject {
    pub id: u32,
    /// Index of the spec this object was spawned from.
    pub spec_index: usize,
    pub kind: ObjectKind,
}

pub enum ObjectKind {
    Circle(Circle),
    Slider(Slider),
    Spinner(Spinner),
}

impl LiveObject {
    /// Builds the live counterpart of a validated spec. `time` is the
    /// clock at spawn, so late spawns start with their indicator already
    /// partially or fully shrunk.
    pub fn from_spec(
        id: u32,
        spec_index: usize,
        spec: &HitObjectSpec,
        time: f64,
        config: &Config,
    ) -> Self {
        let kind = match &spec.kind {
            SpecKind::Circle { points } => ObjectKind::Circle(Circle::new(
                spec.time,
                points[0],
                time,
                config,
            )),
            SpecKind::Slider {
                points,
                duration,
                repeats,
            } => ObjectKind::Slider(Slider::new(
                spec.time,
                points.clone(),
                *duration,
                *repeats,
                time,
                config,
            )),
            SpecKind::Spinner { duration } => {
                ObjectKind::Spinner(Spinner::new(spec.time, *duration, config.centroid()))
            }
        };

        Self {
            id,
            spec_index,
            kind,
        }
    }

    pub fn state(&self) -> ObjectState {
        match &self.kind {
            ObjectKind::Circle(circle) => circle.state,
            ObjectKind::Slider(slider) => slider.state,
            ObjectKind::Spinner(spinner) => spinner.state,
        }
    }

    pub fn start_time(&self) -> f64 {
        match &self.kind {
            ObjectKind::Circle(circle) => circle.start_time,
            ObjectKind::Slider(slider) => slider.start_time,
            ObjectKind::Spinner(spinner) => spinner.start_time,
        }
    }

    /// Whether contact resolution should distance-test this object.
    /// Spinners never take direct contact; sliders only until the head
    /// is hit.
    pub fn is_contact_testable(&self) -> bool {
        match &self.kind {
            ObjectKind::Circle(circle) => !circle.state.is_terminal(),
            ObjectKind::Slider(slider) => slider.state == ObjectState::Approaching,
            ObjectKind::Spinner(_) => false,
        }
    }

    pub fn try_contact(
        &mut self,
        time: f64,
        sample: Vector2<f64>,
        config: &Config,
    ) -> Option<JudgementKind> {
        match &mut self.kind {
            ObjectKind::Circle(circle) => circle.try_contact(sample, config),
            ObjectKind::Slider(slider) => slider.try_contact(time, sample, config),
            ObjectKind::Spinner(_) => None,
        }
    }

    /// Advances the object to `time`, pushing any judgements that fall out
    /// of the transition into `out`.
    pub fn progress(
        &mut self,
        time: f64,
        latest: &ContactBatch,
        config: &Config,
        out: &mut Vec<JudgementEvent>,
    ) {
        let object_id = self.id;
        let spec_index = self.spec_index;
        let mut emit = |kind: JudgementKind| {
            out.push(JudgementEvent {
                object_id,
                spec_index,
                time,
                kind,
            });
        };

        match &mut self.kind {
            ObjectKind::Circle(circle) => circle.progress(time, config, &mut emit),
            ObjectKind::Slider(slider) => slider.progress(time, latest, config, &mut emit),
            ObjectKind::Spinner(spinner) => spinner.progress(time, latest, config, &mut emit),
        }
    }

    /// Forced teardown for session stop. No judgement is emitted.
    pub fn retire(&mut self) {
        match &mut self.kind {
            ObjectKind::Circle(circle) => circle.state = ObjectState::Retired,
            ObjectKind::Slider(slider) => slider.state = ObjectState::Retired,
            ObjectKind::Spinner(spinner) => spinner.state = ObjectState::Retired,
        }
    }

    pub fn snapshot(&self) -> ObjectSnapshot {
        let geometry = match &self.kind {
            ObjectKind::Circle(circle) => SnapshotGeometry::Circle {
                pos: circle.pos,
                approach_scale: circle.approach_scale,
            },
            ObjectKind::Slider(slider) => SnapshotGeometry::Slider {
                head: slider.head(),
                ball: slider.ball,
                approach_scale: slider.approach_scale,
                dimmed: slider.state == ObjectState::Following && !slider.following_correctly,
            },
            ObjectKind::Spinner(spinner) => SnapshotGeometry::Spinner {
                center: spinner.center,
                rotation_rad: spinner.total_rotation,
                progress: spinner.progress_frac,
            },
        };

        ObjectSnapshot {
            object_id: self.id,
            spec_index: self.spec_index,
            state: self.state(),
            geometry,
        }
    }
}

#[test]
pub fn test_grade_tiers() {
    assert_eq!(HitGrade::from_scale(1.0), HitGrade::X300);
    assert_eq!(HitGrade::from_scale(1.1), HitGrade::X300);
    assert_eq!(HitGrade::from_scale(1.2), HitGrade::X100);
    assert_eq!(HitGrade::from_scale(1.3), HitGrade::X100);
    assert_eq!(HitGrade::from_scale(1.5), HitGrade::X50);
    assert_eq!(HitGrade::from_scale(1.8), HitGrade::X50);
    assert_eq!(HitGrade::from_scale(3.0), HitGrade::X50);
}

#[test]
pub fn test_approach_scale_window() {
    let config = Config::default();

    // due at 2000ms, window opens at 1000ms
    assert_eq!(approach_scale(1000.0, 2000.0, &config), 3.0);
    assert_eq!(approach_scale(1500.0, 2000.0, &config), 2.0);
    assert_eq!(approach_scale(2000.0, 2000.0, &config), 1.0);

    // clamped on both ends
    assert_eq!(approach_scale(500.0, 2000.0, &config), 3.0);
    assert_eq!(approach_scale(2100.0, 2000.0, &config), 1.0);
}
