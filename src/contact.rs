use cgmath::Vector2;
use smallvec::SmallVec;

/// One tracked contact point, in play-field pixels.
pub type ContactSample = Vector2<f64>;

/// All contact points reported by the tracker for one capture frame.
///
/// The engine keeps only the most recent batch; an empty batch is a valid
/// frame meaning no contact is currently tracked.
#[derive(Debug, Clone, Default)]
pub struct ContactBatch {
    samples: SmallVec<[ContactSample; 8]>,
}

impl ContactBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pixels(points: &[ContactSample]) -> Self {
        Self {
            samples: SmallVec::from_slice(points),
        }
    }

    /// Maps normalized `[0, 1]` tracker coordinates onto the play-field.
    ///
    /// `mirror_x` flips the horizontal axis for camera-facing trackers so
    /// the player's motion and the on-screen motion line up.
    pub fn from_normalized(
        points: &[Vector2<f64>],
        playfield: Vector2<f64>,
        mirror_x: bool,
    ) -> Self {
        let samples = points
            .iter()
            .map(|p| {
                let x = if mirror_x { 1.0 - p.x } else { p.x };
                Vector2::new(x * playfield.x, p.y * playfield.y)
            })
            .collect();

        Self { samples }
    }

    pub fn samples(&self) -> &[ContactSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[test]
pub fn test_from_normalized_mirrors_x() {
    let playfield = Vector2::new(1280.0, 720.0);
    let points = [Vector2::new(0.25, 0.5)];

    let plain = ContactBatch::from_normalized(&points, playfield, false);
    assert_eq!(plain.samples()[0], Vector2::new(320.0, 360.0));

    let mirrored = ContactBatch::from_normalized(&points, playfield, true);
    assert_eq!(mirrored.samples()[0], Vector2::new(960.0, 360.0));
}

#[test]
pub fn test_empty_batch_is_a_valid_frame() {
    let batch = ContactBatch::from_pixels(&[]);
    assert!(batch.is_empty());
    assert_eq!(batch.len(), 0);
}
