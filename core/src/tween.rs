use std::f64::consts::PI;

/// Sinusoidal ease-in-out.
pub fn swing(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    0.5 - (p * PI).cos() / 2.0
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn sample(&self, elapsed_ms: f64) -> f64 {
        let eased = swing(self.progress(elapsed_ms));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}
