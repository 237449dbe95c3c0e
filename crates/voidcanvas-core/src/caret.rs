//! Caret blink timing.

use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Blink phase of the text caret.
///
/// The caret is visible for the first half-period after a restart, then
/// toggles every `period`. A cancelled blink keeps the caret hidden.
#[derive(Debug, Clone)]
pub struct CaretBlink {
    start_time: Option<Instant>,
    period: Duration,
    visible: bool,
}

impl CaretBlink {
    pub fn new(period: Duration) -> Self {
        Self {
            start_time: None,
            period: period.max(Duration::from_millis(1)),
            visible: false,
        }
    }

    /// Make the caret visible and restart blinking from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.visible = true;
    }

    /// Stop blinking and hide the caret.
    pub fn cancel(&mut self) {
        self.start_time = None;
        self.visible = false;
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Last visibility reported by [`update`](Self::update) or a restart.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.start_time.is_some_and(|start_time| {
            let elapsed = now.saturating_duration_since(start_time);
            (elapsed.as_millis() / self.period.as_millis()) % 2 == 0
        })
    }

    /// Advance to `now`; returns the new visibility if it changed.
    pub fn update(&mut self, now: Instant) -> Option<bool> {
        let visible = self.is_visible_at(now);
        (visible != self.visible).then(|| {
            self.visible = visible;
            visible
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(500);

    #[test]
    fn test_idle_blink_is_hidden() {
        let blink = CaretBlink::new(PERIOD);
        let now = Instant::now();
        assert!(!blink.is_running());
        assert!(!blink.is_visible_at(now));
    }

    #[test]
    fn test_blink_toggles_each_period() {
        let start = Instant::now();
        let mut blink = CaretBlink::new(PERIOD);
        blink.restart(start);
        assert!(blink.is_visible());
        assert_eq!(blink.update(start + Duration::from_millis(499)), None);
        assert_eq!(blink.update(start + Duration::from_millis(500)), Some(false));
        assert_eq!(blink.update(start + Duration::from_millis(900)), None);
        assert_eq!(blink.update(start + Duration::from_millis(1000)), Some(true));
    }

    #[test]
    fn test_restart_and_cancel() {
        let start = Instant::now();
        let mut blink = CaretBlink::new(PERIOD);
        blink.restart(start);
        blink.update(start + Duration::from_millis(600));
        assert!(!blink.is_visible());

        let later = start + Duration::from_millis(700);
        blink.restart(later);
        assert!(blink.is_visible_at(later + Duration::from_millis(100)));

        blink.cancel();
        assert!(!blink.is_running());
        assert!(!blink.is_visible());
        assert_eq!(blink.update(later + Duration::from_millis(1000)), None);
    }
}
