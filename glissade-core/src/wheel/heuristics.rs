//! Touchpad versus mouse-wheel discrimination.
//!
//! Mouse wheels emit runs of identical deltas; touchpads emit smoothly
//! varying, mostly small ones and accelerate when a new swipe begins inside
//! the same momentum stream.

use std::collections::VecDeque;

use glissade_config::WheelHeuristics;

/// Recent signed deltas, newest last.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelHistory {
    deltas: VecDeque<f64>,
    capacity: usize,
}

impl WheelHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            deltas: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, delta: f64) {
        self.deltas.push_back(delta);
        while self.deltas.len() > self.capacity {
            self.deltas.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.deltas.clear();
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.deltas.back().copied()
    }

    /// Signed sum of the newest `n` deltas.
    pub fn recent_sum(&self, n: usize) -> f64 {
        self.deltas.iter().rev().take(n).sum()
    }

    fn magnitudes(&self) -> Vec<f64> {
        self.deltas.iter().map(|d| d.abs()).collect()
    }

    /// At least `stable_ratio` of consecutive magnitude changes are exactly
    /// zero. Needs two samples.
    pub fn is_stable(&self, stable_ratio: f64) -> bool {
        let abs = self.magnitudes();
        if abs.len() < 2 {
            return false;
        }
        let pairs = abs.len() - 1;
        let unchanged = abs.windows(2).filter(|w| w[0] == w[1]).count();
        unchanged as f64 / pairs as f64 >= stable_ratio
    }

    pub fn is_touchpad(&self, heuristics: &WheelHeuristics) -> bool {
        let small = self
            .latest()
            .is_some_and(|d| d.abs() < heuristics.touchpad_delta);
        !self.is_stable(heuristics.stable_ratio) || small
    }

    /// The newer half of the window is larger on average than the older half
    /// by more than `multiplier`.
    pub fn is_gaining(&self, multiplier: f64) -> bool {
        let abs = self.magnitudes();
        if abs.len() < 2 {
            return false;
        }
        let (older, newer) = abs.split_at(abs.len() / 2);
        let mean = |s: &[f64]| s.iter().sum::<f64>() / s.len() as f64;
        mean(newer) > mean(older) * multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(deltas: &[f64]) -> WheelHistory {
        let mut h = WheelHistory::new(6);
        for &d in deltas {
            h.push(d);
        }
        h
    }

    #[test]
    fn identical_notches_are_stable() {
        let h = history(&[100.0, 100.0, 100.0, 100.0, 100.0, 100.0]);
        assert!(h.is_stable(0.8));
        assert!(!h.is_touchpad(&WheelHeuristics::default()));
    }

    #[test]
    fn varying_deltas_read_as_touchpad() {
        let h = history(&[3.0, 8.0, 14.0, 22.0, 18.0, 9.0]);
        assert!(!h.is_stable(0.8));
        assert!(h.is_touchpad(&WheelHeuristics::default()));
    }

    #[test]
    fn small_stable_deltas_still_read_as_touchpad() {
        let h = history(&[4.0; 6]);
        assert!(h.is_stable(0.8));
        assert!(h.is_touchpad(&WheelHeuristics::default()));
    }

    #[test]
    fn gaining_compares_window_halves() {
        let h = history(&[2.0, 2.0, 2.0, 3.0, 5.0, 8.0]);
        assert!(h.is_gaining(1.5));
        let h = history(&[8.0, 5.0, 3.0, 2.0, 2.0, 2.0]);
        assert!(!h.is_gaining(1.2));
    }

    #[test]
    fn window_is_bounded() {
        let h = history(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(h.len(), 6);
        assert_eq!(h.recent_sum(3), 21.0);
    }
}
