use crate::hit_objects::{HitGrade, JudgementEvent, JudgementKind};

/// Append-only history of every judgement in a session, in the order the
/// engine produced them. Hosts read it for results screens and replays.
#[derive(Default)]
pub struct JudgementLog {
    events: Vec<JudgementEvent>,
}

impl JudgementLog {
    pub fn record(&mut self, event: JudgementEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[JudgementEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&JudgementEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Contacts graded at `grade`, counting circle hits and slider heads.
    pub fn count_grade(&self, grade: HitGrade) -> usize {
        self.events
            .iter()
            .filter(|event| {
                matches!(
                    event.kind,
                    JudgementKind::Hit(g) | JudgementKind::SliderHead(g) if g == grade
                )
            })
            .count()
    }

    pub fn count_misses(&self) -> usize {
        self.events
            .iter()
            .filter(|event| event.kind == JudgementKind::Miss)
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[test]
pub fn test_grade_counts() {
    let mut log = JudgementLog::default();

    for (i, kind) in [
        JudgementKind::Hit(HitGrade::X300),
        JudgementKind::SliderHead(HitGrade::X300),
        JudgementKind::Hit(HitGrade::X100),
        JudgementKind::Miss,
        JudgementKind::SliderComplete,
    ]
    .into_iter()
    .enumerate()
    {
        log.record(JudgementEvent {
            object_id: i as u32,
            spec_index: i,
            time: i as f64 * 100.0,
            kind,
        });
    }

    assert_eq!(log.len(), 5);
    assert_eq!(log.count_grade(HitGrade::X300), 2);
    assert_eq!(log.count_grade(HitGrade::X100), 1);
    assert_eq!(log.count_grade(HitGrade::X50), 0);
    assert_eq!(log.count_misses(), 1);
}
