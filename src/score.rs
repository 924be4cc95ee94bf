use crate::config::Config;
use crate::hit_objects::{HitGrade, JudgementEvent, JudgementKind};

/// Running score and per-grade tallies for one session. The total only
/// ever grows; misses tally without deducting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Score {
    total: u32,
    x300: u32,
    x100: u32,
    x50: u32,
    misses: u32,
    slider_bonuses: u32,
    spinner_turns: u32,
}

impl Score {
    /// Applies one judgement and returns the points it was worth.
    pub fn apply(&mut self, event: &JudgementEvent, config: &Config) -> u32 {
        let points = match event.kind {
            JudgementKind::Hit(grade) | JudgementKind::SliderHead(grade) => {
                match grade {
                    HitGrade::X300 => self.x300 += 1,
                    HitGrade::X100 => self.x100 += 1,
                    HitGrade::X50 => self.x50 += 1,
                }
                grade.points()
            }
            JudgementKind::SliderComplete => {
                self.slider_bonuses += 1;
                config.slider_completion_bonus
            }
            JudgementKind::SpinnerSpin { points } => points,
            JudgementKind::SpinnerBonus { turns } => {
                self.spinner_turns += turns;
                config.spinner_bonus_per_turn.saturating_mul(turns)
            }
            JudgementKind::Miss => {
                self.misses += 1;
                0
            }
        };

        self.total = self.total.saturating_add(points);

        points
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn x300(&self) -> u32 {
        self.x300
    }

    pub fn x100(&self) -> u32 {
        self.x100
    }

    pub fn x50(&self) -> u32 {
        self.x50
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn slider_bonuses(&self) -> u32 {
        self.slider_bonuses
    }

    pub fn spinner_turns(&self) -> u32 {
        self.spinner_turns
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
fn event(kind: JudgementKind) -> JudgementEvent {
    JudgementEvent {
        object_id: 0,
        spec_index: 0,
        time: 0.0,
        kind,
    }
}

#[test]
pub fn test_points_per_judgement() {
    let config = Config::default();
    let mut score = Score::default();

    assert_eq!(score.apply(&event(JudgementKind::Hit(HitGrade::X300)), &config), 300);
    assert_eq!(score.apply(&event(JudgementKind::SliderHead(HitGrade::X100)), &config), 100);
    assert_eq!(score.apply(&event(JudgementKind::Hit(HitGrade::X50)), &config), 50);
    assert_eq!(score.apply(&event(JudgementKind::SliderComplete), &config), 300);
    assert_eq!(score.apply(&event(JudgementKind::SpinnerSpin { points: 13 }), &config), 13);
    assert_eq!(score.apply(&event(JudgementKind::SpinnerBonus { turns: 2 }), &config), 2000);
    assert_eq!(score.apply(&event(JudgementKind::Miss), &config), 0);

    assert_eq!(score.total(), 2763);
    assert_eq!(score.x300(), 1);
    assert_eq!(score.x100(), 1);
    assert_eq!(score.x50(), 1);
    assert_eq!(score.misses(), 1);
    assert_eq!(score.slider_bonuses(), 1);
    assert_eq!(score.spinner_turns(), 2);
}

#[test]
pub fn test_total_never_decreases() {
    let config = Config::default();
    let mut score = Score::default();

    score.apply(&event(JudgementKind::Hit(HitGrade::X300)), &config);
    let after_hit = score.total();

    score.apply(&event(JudgementKind::Miss), &config);
    score.apply(&event(JudgementKind::Miss), &config);

    assert_eq!(score.total(), after_hit);
}
