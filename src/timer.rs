use std::time::Instant;

/// Pausable wall-clock playback timer, in milliseconds.
///
/// Hosts without an audio clock can drive `Session::tick` from this: call
/// `update` once per frame and hand the returned time to the session.
/// Starts paused at zero.
pub struct Timer {
    now: Instant,
    last_time: f64,
    paused: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
            last_time: 0.0,
            paused: true,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        self.paused = false;

        self.now = Instant::now();
    }

    /// Rewinds to zero without changing the pause state, for restarts.
    pub fn reset(&mut self) {
        self.last_time = 0.0;
        self.now = Instant::now();
    }

    pub fn get_time(&self) -> f64 {
        self.last_time
    }

    /// Updates and returns current time
    pub fn update(&mut self) -> f64 {
        if self.paused {
            return self.last_time;
        };

        let now = Instant::now();

        let diff = now.duration_since(self.now);

        self.last_time += diff.as_secs_f64() * 1000.0;

        self.now = now;

        self.last_time
    }
}

#[test]
fn test_timer_logic() {
    use std::time::Duration;

    let mut clock = Timer::new();

    std::thread::sleep(Duration::from_millis(15));

    assert!(clock.update() == 0.0);

    clock.unpause();

    std::thread::sleep(Duration::from_millis(15));

    let expected = clock.update();

    assert!(expected >= 14.0 && expected < 500.0);

    clock.pause();

    assert!(clock.update() == expected);

    clock.reset();
    assert!(clock.get_time() == 0.0);
}
