use tracing::{debug, info};

use crate::beatmap::Beatmap;
use crate::config::Config;
use crate::contact::ContactSample;
use crate::hit_objects::{JudgementEvent, ObjectSnapshot};
use crate::processor::{ContactProcessor, JudgementLog};
use crate::scheduler::Scheduler;
use crate::score::Score;

/// One interactive play-through.
///
/// The host drives it with two calls per frame: `tick` with the playback
/// clock, then `on_contact_batch` with whatever the tracker saw. Both are
/// no-ops unless a beatmap is loaded and the session is running, so hosts
/// can keep their loops dumb.
pub struct Session {
    config: Config,
    beatmap: Option<Beatmap>,
    scheduler: Scheduler,
    processor: ContactProcessor,
    score: Score,
    log: JudgementLog,
    pending_events: Vec<JudgementEvent>,
    last_tick_ms: f64,
    running: bool,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            beatmap: None,
            scheduler: Scheduler::default(),
            processor: ContactProcessor::default(),
            score: Score::default(),
            log: JudgementLog::default(),
            pending_events: Vec::new(),
            last_tick_ms: 0.0,
            running: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn beatmap(&self) -> Option<&Beatmap> {
        self.beatmap.as_ref()
    }

    /// Loads the map this session will play. Replacing the map resets the
    /// spawn table, so a following `start` plays it from the top.
    pub fn load_beatmap(&mut self, beatmap: Beatmap) {
        info!(
            objects = beatmap.len(),
            end_ms = beatmap.end_time(),
            "beatmap loaded"
        );

        self.scheduler.reset(beatmap.len());
        self.beatmap = Some(beatmap);
    }

    /// Starts (or restarts) the play-through with a clean score, log and
    /// spawn table.
    pub fn start(&mut self) {
        let spec_count = self.beatmap.as_ref().map_or(0, Beatmap::len);

        self.scheduler.reset(spec_count);
        self.processor.clear();
        self.score.reset();
        self.log.clear();
        self.pending_events.clear();
        self.last_tick_ms = 0.0;
        self.running = true;

        info!(objects = spec_count, "session started");
    }

    /// Ends the play-through, force-retiring whatever is still live. The
    /// score and log keep their final values. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        self.running = false;
        let released = self.scheduler.active().len();
        self.scheduler.retire_all();
        self.processor.clear();

        info!(released, score = self.score.total(), "session stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the engine to `now_ms`: spawns due objects, progresses the
    /// active set against the latest contact batch, then sweeps out
    /// everything that finished.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.running {
            return;
        }
        let Some(beatmap) = &self.beatmap else {
            return;
        };

        self.last_tick_ms = now_ms;
        self.scheduler.spawn_due(beatmap, now_ms, &self.config);

        let mut events = Vec::new();
        self.scheduler
            .progress_active(now_ms, self.processor.latest(), &self.config, &mut events);

        self.apply_events(events);
        self.scheduler.sweep_terminal();
    }

    /// Feeds one tracker frame. Samples are play-field pixels; an empty
    /// slice is a valid frame meaning nothing is tracked right now.
    pub fn on_contact_batch(&mut self, samples: &[ContactSample]) {
        if !self.running || self.beatmap.is_none() {
            return;
        }

        let mut events = Vec::new();
        self.processor.resolve_batch(
            samples,
            self.scheduler.active_mut(),
            self.last_tick_ms,
            &self.config,
            &mut events,
        );

        self.apply_events(events);
        self.scheduler.sweep_terminal();
    }

    fn apply_events(&mut self, events: Vec<JudgementEvent>) {
        for event in events {
            let points = self.score.apply(&event, &self.config);
            debug!(
                kind = ?event.kind,
                points,
                total = self.score.total(),
                "judgement"
            );
            self.log.record(event);
            self.pending_events.push(event);
        }
    }

    /// Judgements produced since the last call, oldest first. Hosts drain
    /// this once per frame for hit feedback.
    pub fn take_events(&mut self) -> Vec<JudgementEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn results(&self) -> &Score {
        &self.score
    }

    pub fn judgement_log(&self) -> &JudgementLog {
        &self.log
    }

    /// Render-facing view of every live object, in spawn order.
    pub fn snapshots(&self) -> Vec<ObjectSnapshot> {
        self.scheduler
            .active()
            .iter()
            .map(|object| object.snapshot())
            .collect()
    }

    pub fn active_object_count(&self) -> usize {
        self.scheduler.active().len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
