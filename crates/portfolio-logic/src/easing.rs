//! Easing curves for camera transitions.
//!
//! Quadratic ("power2") curves. Input and output are normalized to `0.0..=1.0`;
//! out-of-range input is clamped first.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for e in ALL {
            assert_eq!(e.apply(-3.0), 0.0);
            assert!((e.apply(7.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_about_midpoint() {
        let e = Easing::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        for i in 1..10 {
            let t = i as f32 / 20.0;
            let lo = e.apply(t);
            let hi = e.apply(1.0 - t);
            assert!((lo + hi - 1.0).abs() < 1e-5, "t={t}");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for e in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{e:?} dipped at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn ease_in_out_starts_slow() {
        let e = Easing::EaseInOut;
        assert!(e.apply(0.1) < Easing::Linear.apply(0.1));
        assert!(e.apply(0.9) > Easing::Linear.apply(0.9));
    }
}
