use serde::{Deserialize, Serialize};

const B1: f32 = 4.0 / 11.0;
const B2: f32 = 6.0 / 11.0;
const B3: f32 = 8.0 / 11.0;
const B4: f32 = 3.0 / 4.0;
const B5: f32 = 9.0 / 11.0;
const B6: f32 = 10.0 / 11.0;
const B7: f32 = 15.0 / 16.0;
const B8: f32 = 21.0 / 22.0;
const B9: f32 = 63.0 / 64.0;
const B0: f32 = 1.0 / B1 / B1;

/// Bounce-out easing: overshoots back from 1.0 three times before settling
pub fn ease_bounce(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < B1 {
        B0 * t * t
    } else if t < B3 {
        let t = t - B2;
        B0 * t * t + B4
    } else if t < B6 {
        let t = t - B5;
        B0 * t * t + B7
    } else {
        let t = t - B8;
        B0 * t * t + B9
    }
}

/// Delay and duration of the outline reveal, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    pub delay_secs: f64,
    pub duration_secs: f64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            delay_secs: 0.1,
            duration_secs: 0.5,
        }
    }
}

/// Time-driven dash-offset animation of a stroke outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeReveal {
    started_at: f64,
    timing: RevealTiming,
}

impl StrokeReveal {
    pub fn new(started_at: f64, timing: RevealTiming) -> Self {
        Self { started_at, timing }
    }

    /// Eased progress in `[0, 1]`, 0 while the delay is still running
    pub fn progress(&self, now: f64) -> f32 {
        let elapsed = now - self.started_at - self.timing.delay_secs;
        if elapsed <= 0.0 {
            return 0.0;
        }
        if self.timing.duration_secs <= 0.0 {
            return 1.0;
        }
        ease_bounce((elapsed / self.timing.duration_secs) as f32)
    }

    /// Dash offset for an outline of `total_length`: the full length when
    /// hidden, zero when fully shown.
    pub fn dash_offset(&self, total_length: f32, now: f64) -> f32 {
        total_length * (1.0 - self.progress(now))
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.started_at + self.timing.delay_secs + self.timing.duration_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounce_endpoints() {
        assert_eq!(ease_bounce(0.0), 0.0);
        assert!((ease_bounce(1.0) - 1.0).abs() < 1e-6);
        // Out-of-range inputs clamp
        assert_eq!(ease_bounce(-1.0), 0.0);
        assert!((ease_bounce(2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_first_landing() {
        // The first arc lands exactly at 1.0 on its boundary
        assert!((ease_bounce(B1) - 1.0).abs() < 1e-5);
        assert!((ease_bounce(B2) - B4).abs() < 1e-5);
    }

    #[test]
    fn test_reveal_waits_for_delay() {
        let reveal = StrokeReveal::new(10.0, RevealTiming::default());
        assert_eq!(reveal.progress(10.0), 0.0);
        assert_eq!(reveal.progress(10.05), 0.0);
        assert_eq!(reveal.dash_offset(40.0, 10.05), 40.0);
        assert!(!reveal.is_finished(10.3));
    }

    #[test]
    fn test_reveal_completes() {
        let reveal = StrokeReveal::new(1.0, RevealTiming::default());
        assert!(reveal.is_finished(1.7));
        assert!(reveal.dash_offset(40.0, 1.7).abs() < 1e-3);
    }
}
