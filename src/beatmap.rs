use cgmath::Vector2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum BeatmapError {
    #[error("failed to decode beatmap document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("beatmap document has no hit_objects array")]
    MissingHitObjects,
    #[error("time is not a finite number")]
    BadTime,
    #[error("path needs 1 to 3 points, got {0}")]
    BadPathLength(usize),
    #[error("duration must be positive and finite, got {0}")]
    BadDuration(f64),
}

/// Authoring-time description of one hit object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitObjectSpec {
    /// Moment the object is due, in milliseconds.
    pub time: f64,
    #[serde(flatten)]
    pub kind: SpecKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SpecKind {
    Circle {
        points: Vec<Vector2<f64>>,
    },
    Slider {
        points: Vec<Vector2<f64>>,
        /// One traversal of the path, in milliseconds.
        duration: f64,
        /// Additional traversals after the first one.
        repeats: u32,
    },
    Spinner {
        duration: f64,
    },
}

impl HitObjectSpec {
    pub fn circle(time: f64, pos: Vector2<f64>) -> Self {
        Self {
            time,
            kind: SpecKind::Circle { points: vec![pos] },
        }
    }

    pub fn slider(time: f64, points: Vec<Vector2<f64>>, duration: f64, repeats: u32) -> Self {
        Self {
            time,
            kind: SpecKind::Slider {
                points,
                duration,
                repeats,
            },
        }
    }

    pub fn spinner(time: f64, duration: f64) -> Self {
        Self {
            time,
            kind: SpecKind::Spinner { duration },
        }
    }

    pub fn validate(&self) -> Result<(), BeatmapError> {
        if !self.time.is_finite() {
            return Err(BeatmapError::BadTime);
        }

        match &self.kind {
            SpecKind::Circle { points } => {
                if points.is_empty() {
                    return Err(BeatmapError::BadPathLength(0));
                }
            }
            SpecKind::Slider {
                points, duration, ..
            } => {
                if points.is_empty() || points.len() > 3 {
                    return Err(BeatmapError::BadPathLength(points.len()));
                }
                if !duration.is_finite() || *duration <= 0.0 {
                    return Err(BeatmapError::BadDuration(*duration));
                }
            }
            SpecKind::Spinner { duration } => {
                if !duration.is_finite() || *duration <= 0.0 {
                    return Err(BeatmapError::BadDuration(*duration));
                }
            }
        }

        Ok(())
    }

    /// When the object stops being interactive, ignoring the miss grace.
    pub fn end_time(&self) -> f64 {
        match &self.kind {
            SpecKind::Circle { .. } => self.time,
            SpecKind::Slider {
                duration, repeats, ..
            } => self.time + duration * (*repeats as f64 + 1.0),
            SpecKind::Spinner { duration } => self.time + duration,
        }
    }
}

/// An ordered set of hit objects ready to be scheduled.
///
/// Construction drops malformed entries and sorts the survivors by time,
/// so downstream code can rely on a clean non-decreasing sequence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Beatmap {
    hit_objects: Vec<HitObjectSpec>,
}

impl Beatmap {
    pub fn new(specs: Vec<HitObjectSpec>) -> Self {
        let mut hit_objects: Vec<HitObjectSpec> = specs
            .into_iter()
            .filter(|spec| match spec.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!("dropping hit object at {}ms: {err}", spec.time);
                    false
                }
            })
            .collect();

        hit_objects.sort_by(|a, b| a.time.total_cmp(&b.time));

        Self { hit_objects }
    }

    /// Decodes a beatmap document, skipping entries that do not decode or
    /// do not validate rather than rejecting the whole document.
    pub fn from_json(doc: &str) -> Result<Self, BeatmapError> {
        let doc: serde_json::Value = serde_json::from_str(doc)?;

        let entries = doc
            .get("hit_objects")
            .and_then(serde_json::Value::as_array)
            .ok_or(BeatmapError::MissingHitObjects)?;

        let mut specs = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<HitObjectSpec>(entry.clone()) {
                Ok(spec) => specs.push(spec),
                Err(err) => warn!("skipping undecodable hit object: {err}"),
            }
        }

        Ok(Self::new(specs))
    }

    pub fn to_json(&self) -> Result<String, BeatmapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn hit_objects(&self) -> &[HitObjectSpec] {
        &self.hit_objects
    }

    pub fn len(&self) -> usize {
        self.hit_objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hit_objects.is_empty()
    }

    /// End of the last object, or zero for an empty map.
    pub fn end_time(&self) -> f64 {
        self.hit_objects
            .iter()
            .map(HitObjectSpec::end_time)
            .fold(0.0, f64::max)
    }
}

#[test]
pub fn test_new_sorts_and_drops_invalid() {
    let specs = vec![
        HitObjectSpec::circle(2000.0, Vector2::new(100.0, 100.0)),
        HitObjectSpec::slider(500.0, vec![], 400.0, 0),
        HitObjectSpec::spinner(1000.0, -5.0),
        HitObjectSpec::circle(1000.0, Vector2::new(50.0, 50.0)),
    ];

    let beatmap = Beatmap::new(specs);

    assert_eq!(beatmap.len(), 2);
    assert_eq!(beatmap.hit_objects()[0].time, 1000.0);
    assert_eq!(beatmap.hit_objects()[1].time, 2000.0);
}

#[test]
pub fn test_from_json_skips_bad_entries() {
    let doc = r#"{
        "hit_objects": [
            { "time": 1000.0, "kind": "circle", "points": [{ "x": 320.0, "y": 240.0 }] },
            { "time": 1500.0, "kind": "laser", "points": [{ "x": 0.0, "y": 0.0 }] },
            { "time": 2000.0, "kind": "slider",
              "points": [{ "x": 0.0, "y": 0.0 }, { "x": 200.0, "y": 0.0 }],
              "duration": 400.0, "repeats": 1 },
            { "time": 2500.0, "kind": "spinner" },
            { "time": 3000.0, "kind": "spinner", "duration": 1200.0 }
        ]
    }"#;

    let beatmap = Beatmap::from_json(doc).unwrap();

    assert_eq!(beatmap.len(), 3);
    assert_eq!(beatmap.end_time(), 4200.0);
}

#[test]
pub fn test_from_json_rejects_documents_without_objects() {
    assert!(Beatmap::from_json("[1, 2, 3]").is_err());
    assert!(Beatmap::from_json("{ \"name\": \"empty\" }").is_err());
    assert!(Beatmap::from_json("not json at all").is_err());
}

#[test]
pub fn test_json_round_trip() {
    let beatmap = Beatmap::new(vec![
        HitObjectSpec::circle(1000.0, Vector2::new(320.0, 240.0)),
        HitObjectSpec::slider(
            2000.0,
            vec![Vector2::new(0.0, 0.0), Vector2::new(200.0, 100.0)],
            400.0,
            2,
        ),
        HitObjectSpec::spinner(4000.0, 1500.0),
    ]);

    let encoded = beatmap.to_json().unwrap();
    let decoded = Beatmap::from_json(&encoded).unwrap();

    assert_eq!(decoded.len(), beatmap.len());
    assert_eq!(decoded.end_time(), beatmap.end_time());
}

#[test]
pub fn test_slider_end_time_counts_repeats() {
    let slider = HitObjectSpec::slider(
        1000.0,
        vec![Vector2::new(0.0, 0.0), Vector2::new(100.0, 0.0)],
        1000.0,
        1,
    );

    assert_eq!(slider.end_time(), 3000.0);
}
