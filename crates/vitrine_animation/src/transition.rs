//! Eased style transitions
//!
//! Mirrors a CSS `transition` on a single numeric property: once a new value
//! is written at `start_ms`, the rendered value moves from `from` to `to` over
//! `duration_ms`.

use crate::easing::Easing;

#[derive(Clone, Debug, PartialEq)]
pub struct StyleTransition {
    pub property: &'static str,
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl StyleTransition {
    pub fn new(property: &'static str, from: f32, to: f32) -> Self {
        Self {
            property,
            from,
            to,
            start_ms: 0,
            duration_ms: 300,
            easing: Easing::Ease,
        }
    }

    pub fn starting_at(mut self, start_ms: u64) -> Self {
        self.start_ms = start_ms;
        self
    }

    pub fn duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Progress in [0, 1] at virtual time `now_ms`
    pub fn progress(&self, now_ms: u64) -> f32 {
        if now_ms <= self.start_ms {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) as f32 / self.duration_ms as f32).min(1.0)
    }

    /// Rendered value at virtual time `now_ms`
    pub fn value_at(&self, now_ms: u64) -> f32 {
        let eased = self.easing.apply(self.progress(now_ms));
        self.from + (self.to - self.from) * eased
    }

    pub fn end_ms(&self) -> u64 {
        self.start_ms + self.duration_ms
    }

    pub fn is_complete(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms()
    }

    /// Retarget from the current rendered value, starting at `now_ms`
    pub fn retarget(&self, to: f32, now_ms: u64) -> Self {
        Self {
            from: self.value_at(now_ms),
            to,
            start_ms: now_ms,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_over_time() {
        let fade = StyleTransition::new("opacity", 0.0, 1.0)
            .starting_at(100)
            .duration(300)
            .easing(Easing::Linear);

        assert_eq!(fade.value_at(0), 0.0);
        assert_eq!(fade.value_at(100), 0.0);
        assert!((fade.value_at(250) - 0.5).abs() < 1e-6);
        assert_eq!(fade.value_at(400), 1.0);
        assert!(fade.is_complete(400));
        assert!(!fade.is_complete(399));
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let slide = StyleTransition::new("translateX", 400.0, 0.0)
            .duration(300)
            .easing(Easing::Linear);

        let back = slide.retarget(400.0, 150);
        assert!((back.from - 200.0).abs() < 1e-3);
        assert_eq!(back.start_ms, 150);
        assert_eq!(back.value_at(450), 400.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let t = StyleTransition::new("opacity", 0.0, 1.0).duration(0).starting_at(10);
        assert_eq!(t.value_at(10), 0.0);
        assert_eq!(t.value_at(11), 1.0);
    }
}
