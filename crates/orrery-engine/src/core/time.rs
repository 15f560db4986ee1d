/// Frame-rate throttle for constrained (narrow) viewports.
///
/// On phones the browser schedules frames as fast as it can; skipping any
/// frame that arrives sooner than `min_frame_interval_ms` after the last
/// processed one caps the simulation/render rate and saves battery.
/// Wide viewports are never throttled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrottleConfig {
    /// Viewports at or below this width (CSS px) are throttled.
    pub narrow_viewport_px: f32,
    /// Minimum spacing between processed frames on narrow viewports.
    pub min_frame_interval_ms: f64,
    pub enabled: bool,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            narrow_viewport_px: 768.0,
            min_frame_interval_ms: 16.0,
            enabled: true,
        }
    }
}

pub struct FrameThrottle {
    config: ThrottleConfig,
    /// Timestamp of the last admitted frame (ms, host clock).
    /// `None` until the first frame, which is always admitted.
    last_ms: Option<f64>,
}

impl FrameThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            last_ms: None,
        }
    }

    /// Decide whether the frame stamped `now_ms` should be processed.
    /// Admitted frames become the new reference point.
    pub fn admit(&mut self, now_ms: f64, viewport_width: f32) -> bool {
        let narrow = viewport_width <= self.config.narrow_viewport_px;
        if let Some(last) = self.last_ms {
            if self.config.enabled && narrow && now_ms - last < self.config.min_frame_interval_ms {
                return false;
            }
        }
        self.last_ms = Some(now_ms);
        true
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    pub fn last_ms(&self) -> Option<f64> {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_viewport_never_skips() {
        let mut t = FrameThrottle::new(ThrottleConfig::default());
        assert!(t.admit(100.0, 1920.0));
        assert!(t.admit(101.0, 1920.0));
        assert!(t.admit(101.5, 1920.0));
    }

    #[test]
    fn narrow_viewport_skips_close_frames() {
        let mut t = FrameThrottle::new(ThrottleConfig::default());
        assert!(t.admit(100.0, 400.0));
        assert!(!t.admit(108.0, 400.0));
        assert!(!t.admit(115.9, 400.0));
        // Skipped frames do not move the reference point
        assert_eq!(t.last_ms(), Some(100.0));
        assert!(t.admit(116.0, 400.0));
        assert_eq!(t.last_ms(), Some(116.0));
    }

    #[test]
    fn first_frame_is_always_admitted() {
        let mut t = FrameThrottle::new(ThrottleConfig::default());
        assert_eq!(t.last_ms(), None);
        assert!(t.admit(4.0, 400.0));
        assert_eq!(t.last_ms(), Some(4.0));
        assert!(!t.admit(12.0, 400.0));
        assert!(t.admit(20.0, 400.0));
    }

    #[test]
    fn boundary_width_is_narrow() {
        let mut t = FrameThrottle::new(ThrottleConfig::default());
        assert!(t.admit(50.0, 768.0));
        assert!(!t.admit(60.0, 768.0));
        assert!(t.admit(60.0, 769.0));
    }

    #[test]
    fn disabled_throttle_admits_everything() {
        let mut t = FrameThrottle::new(ThrottleConfig {
            enabled: false,
            ..ThrottleConfig::default()
        });
        assert!(t.admit(100.0, 320.0));
        assert!(t.admit(100.5, 320.0));
    }

    #[test]
    fn custom_interval() {
        let mut t = FrameThrottle::new(ThrottleConfig {
            min_frame_interval_ms: 33.0,
            ..ThrottleConfig::default()
        });
        assert!(t.admit(100.0, 320.0));
        assert!(!t.admit(120.0, 320.0));
        assert!(t.admit(133.0, 320.0));
    }
}
