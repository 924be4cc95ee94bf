use cgmath::Vector2;

/// Tuning knobs for a play session. All distances are play-field pixels,
/// all times are milliseconds.
#[derive(Debug, Clone)]
pub struct Config {
    /// Play-field size contact samples are mapped onto.
    pub playfield: Vector2<f64>,
    /// How long before its due time an object becomes visible.
    pub approach_window_ms: f64,
    /// Approach indicator scale at the moment an object spawns.
    pub start_scale: f64,
    /// Contact-to-anchor distance that counts as a hit.
    pub hit_radius: f64,
    /// Contact-to-ball distance that keeps a slider follow alive.
    pub follow_radius: f64,
    /// Contact-to-center distance that counts as spinning.
    pub spinner_radius: f64,
    /// Extra time past the due time before an untouched object misses.
    pub grace_ms: f64,
    pub spin_points_per_radian: f64,
    pub spinner_bonus_per_turn: u32,
    pub slider_completion_bonus: u32,
}

impl Config {
    pub fn centroid(&self) -> Vector2<f64> {
        self.playfield / 2.0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playfield: Vector2::new(1280.0, 720.0),
            approach_window_ms: 1000.0,
            start_scale: 3.0,
            hit_radius: 50.0,
            follow_radius: 150.0,
            spinner_radius: 250.0,
            grace_ms: 200.0,
            spin_points_per_radian: 10.0,
            spinner_bonus_per_turn: 1000,
            slider_completion_bonus: 300,
        }
    }
}
