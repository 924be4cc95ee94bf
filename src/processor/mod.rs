use tracing::debug;

use crate::config::Config;
use crate::contact::{ContactBatch, ContactSample};
use crate::hit_objects::{JudgementEvent, LiveObject};

mod judgement_log;

pub use judgement_log::JudgementLog;

/// Responsible for
/// 1. Holding the latest contact batch for tick-time checks
/// 2. Resolving fresh batches against the contact-testable objects
#[derive(Default)]
pub struct ContactProcessor {
    latest: ContactBatch,
}

impl ContactProcessor {
    /// Replaces the latest batch and distance-tests it against the active
    /// set. Objects are visited in spawn order and each takes at most one
    /// contact, so one batch can judge several objects but never the same
    /// object twice.
    pub fn resolve_batch(
        &mut self,
        samples: &[ContactSample],
        objects: &mut [LiveObject],
        time: f64,
        config: &Config,
        out: &mut Vec<JudgementEvent>,
    ) {
        self.latest = ContactBatch::from_pixels(samples);

        if self.latest.is_empty() {
            return;
        }

        for object in objects.iter_mut() {
            if !object.is_contact_testable() {
                continue;
            }

            for sample in self.latest.samples() {
                if let Some(kind) = object.try_contact(time, *sample, config) {
                    debug!(id = object.id, ?kind, "contact judged object");
                    out.push(JudgementEvent {
                        object_id: object.id,
                        spec_index: object.spec_index,
                        time,
                        kind,
                    });
                    break;
                }
            }
        }
    }

    /// Batch seen by per-tick progression (slider follows, spinner spins).
    pub fn latest(&self) -> &ContactBatch {
        &self.latest
    }

    pub fn clear(&mut self) {
        self.latest.clear();
    }
}
