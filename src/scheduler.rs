use tracing::{debug, warn};

use crate::beatmap::Beatmap;
use crate::config::Config;
use crate::contact::ContactBatch;
use crate::hit_objects::{JudgementEvent, LiveObject};

/// Walks the beatmap against the play clock and owns the live object set.
///
/// Every spec spawns exactly once; the spawn table survives until the next
/// `reset`, so a judged object never reappears.
#[derive(Default)]
pub struct Scheduler {
    active: Vec<LiveObject>,
    spawned: Vec<bool>,
    next_object_id: u32,
}

impl Scheduler {
    pub fn reset(&mut self, spec_count: usize) {
        self.active.clear();
        self.spawned.clear();
        self.spawned.resize(spec_count, false);
        self.next_object_id = 0;
    }

    /// Spawns every not-yet-spawned spec whose approach window contains
    /// `time`. The beatmap is sorted, so the walk stops at the first spec
    /// still out of range. A spec that fails validation is marked spawned
    /// and skipped, never fatal.
    pub fn spawn_due(&mut self, beatmap: &Beatmap, time: f64, config: &Config) {
        for (index, spec) in beatmap.hit_objects().iter().enumerate() {
            if time < spec.time - config.approach_window_ms {
                break;
            }
            if self.spawned[index] {
                continue;
            }
            self.spawned[index] = true;

            if let Err(err) = spec.validate() {
                warn!(index, due = spec.time, "skipping hit object: {err}");
                continue;
            }

            let object = LiveObject::from_spec(self.next_object_id, index, spec, time, config);
            self.next_object_id += 1;

            debug!(
                id = object.id,
                index,
                due = spec.time,
                at = time,
                "spawned hit object"
            );

            self.active.push(object);
        }
    }

    pub fn progress_active(
        &mut self,
        time: f64,
        latest: &ContactBatch,
        config: &Config,
        out: &mut Vec<JudgementEvent>,
    ) {
        for object in &mut self.active {
            object.progress(time, latest, config, out);
        }
    }

    /// Drops every object that reached a terminal state this pass.
    pub fn sweep_terminal(&mut self) {
        self.active.retain(|object| {
            let done = object.state().is_terminal();
            if done {
                debug!(id = object.id, state = ?object.state(), "cleared hit object");
            }
            !done
        });
    }

    /// Force-retires and drops the whole active set, in spawn order.
    pub fn retire_all(&mut self) {
        for object in &mut self.active {
            object.retire();
            debug!(id = object.id, "retired hit object");
        }
        self.active.clear();
    }

    pub fn active(&self) -> &[LiveObject] {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut [LiveObject] {
        &mut self.active
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
fn three_circle_map() -> Beatmap {
    use cgmath::Vector2;

    use crate::beatmap::HitObjectSpec;

    Beatmap::new(vec![
        HitObjectSpec::circle(1000.0, Vector2::new(100.0, 100.0)),
        HitObjectSpec::circle(1400.0, Vector2::new(300.0, 300.0)),
        HitObjectSpec::circle(5000.0, Vector2::new(500.0, 500.0)),
    ])
}

#[test]
pub fn test_spawns_only_inside_approach_window() {
    let config = Config::default();
    let beatmap = three_circle_map();
    let mut scheduler = Scheduler::default();
    scheduler.reset(beatmap.len());

    scheduler.spawn_due(&beatmap, -100.0, &config);
    assert!(scheduler.is_idle());

    scheduler.spawn_due(&beatmap, 0.0, &config);
    assert_eq!(scheduler.active().len(), 1);

    scheduler.spawn_due(&beatmap, 450.0, &config);
    assert_eq!(scheduler.active().len(), 2);

    // same clock again spawns nothing new
    scheduler.spawn_due(&beatmap, 450.0, &config);
    assert_eq!(scheduler.active().len(), 2);
}

#[test]
pub fn test_ids_follow_spawn_order() {
    let config = Config::default();
    let beatmap = three_circle_map();
    let mut scheduler = Scheduler::default();
    scheduler.reset(beatmap.len());

    scheduler.spawn_due(&beatmap, 4200.0, &config);

    let ids: Vec<u32> = scheduler.active().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    let indices: Vec<usize> = scheduler.active().iter().map(|o| o.spec_index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
pub fn test_retire_all_empties_the_set() {
    let config = Config::default();
    let beatmap = three_circle_map();
    let mut scheduler = Scheduler::default();
    scheduler.reset(beatmap.len());

    scheduler.spawn_due(&beatmap, 500.0, &config);
    assert_eq!(scheduler.active().len(), 2);

    scheduler.retire_all();
    assert!(scheduler.is_idle());

    // spawn table is untouched, nothing respawns
    scheduler.spawn_due(&beatmap, 500.0, &config);
    assert!(scheduler.is_idle());
}
