//! Frame timing

/// Frames counted over a rolling one-second window
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<f64>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    const WINDOW_MS: f64 = 1000.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms`; returns the latest FPS reading
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let Some(start) = self.window_start else {
            self.window_start = Some(now_ms);
            return self.fps;
        };
        self.frames += 1;

        let elapsed = now_ms - start;
        if elapsed >= Self::WINDOW_MS {
            self.fps = (self.frames as f64 * 1000.0 / elapsed).round() as u32;
            self.frames = 0;
            self.window_start = Some(now_ms);
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_hz() {
        let mut counter = FpsCounter::new();
        for i in 0..=60 {
            counter.frame(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(counter.fps(), 60);
    }

    #[test]
    fn test_zero_before_first_window() {
        let mut counter = FpsCounter::new();
        assert_eq!(counter.frame(0.0), 0);
        assert_eq!(counter.frame(500.0), 0);
        assert_eq!(counter.frame(1000.0), 2);
    }
}
