//=========================================================================
// Easing
//=========================================================================
//
// Normalised interpolation curves after Robert Penner's equations.
//
// Every curve maps t ∈ [0, 1] to progress (usually in [0, 1], although
// elastic and back overshoot on purpose). Callers are not required to
// clamp t. `to()` denormalises progress onto an arbitrary range.
//
// Submodules:
// - `tween`: time-driven interpolation built on these curves
//
//=========================================================================

//=== Module Declarations =================================================

pub mod tween;

pub use tween::{Direction, Tween, TweenHook};

//=== External Dependencies ===============================================

use std::f64::consts::{FRAC_PI_2, PI};

//=== Easing ==============================================================

/// An easing curve: normalised time in, normalised progress out.
pub type Easing = fn(f64) -> f64;

/// Maps normalised time `t` onto the range `src..dst` through `easing`.
pub fn to(t: f64, src: f64, dst: f64, easing: Easing) -> f64 {
    (dst - src) * easing(t) + src
}

//--- Constants -----------------------------------------------------------

const ELASTIC_PERIOD: f64 = 0.3;
const ELASTIC_IN_OUT_PERIOD: f64 = ELASTIC_PERIOD * 1.5;
const BACK_OVERSHOOT: f64 = 1.70158;
const BACK_IN_OUT_OVERSHOOT: f64 = BACK_OVERSHOOT * 1.525;
const BOUNCE_RESTITUTION: f64 = 7.5625;
const BOUNCE_SPAN: f64 = 2.75;

//=== Linear ==============================================================

pub fn linear(t: f64) -> f64 {
    t
}

//=== Polynomial ==========================================================

pub fn quad_in(t: f64) -> f64 {
    t * t
}

pub fn quad_out(t: f64) -> f64 {
    -t * (t - 2.0)
}

pub fn quad_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t;
    }

    let t = t - 1.0;
    -0.5 * (t * (t - 2.0) - 1.0)
}

pub fn cubic_in(t: f64) -> f64 {
    t * t * t
}

pub fn cubic_out(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t + 1.0
}

pub fn cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t * t;
    }

    let t = t - 2.0;
    0.5 * (t * t * t + 2.0)
}

pub fn quart_in(t: f64) -> f64 {
    t * t * t * t
}

pub fn quart_out(t: f64) -> f64 {
    let t = t - 1.0;
    -(t * t * t * t - 1.0)
}

pub fn quart_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t * t * t;
    }

    let t = t - 2.0;
    -0.5 * (t * t * t * t - 2.0)
}

pub fn quint_in(t: f64) -> f64 {
    t * t * t * t * t
}

pub fn quint_out(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t * t * t + 1.0
}

pub fn quint_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * t * t * t * t * t;
    }

    let t = t - 2.0;
    0.5 * (t * t * t * t * t + 2.0)
}

//=== Trigonometric & Exponential =========================================

pub fn sine_in(t: f64) -> f64 {
    1.0 - (t * FRAC_PI_2).cos()
}

pub fn sine_out(t: f64) -> f64 {
    (t * FRAC_PI_2).sin()
}

pub fn sine_in_out(t: f64) -> f64 {
    -0.5 * ((PI * t).cos() - 1.0)
}

pub fn expo_in(t: f64) -> f64 {
    if t == 0.0 {
        return 0.0;
    }

    2f64.powf(10.0 * (t - 1.0))
}

pub fn expo_out(t: f64) -> f64 {
    if t == 1.0 {
        return 1.0;
    }

    1.0 - 2f64.powf(-10.0 * t)
}

pub fn expo_in_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }

    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * 2f64.powf(10.0 * (t - 1.0));
    }

    0.5 * (2.0 - 2f64.powf(-10.0 * (t - 1.0)))
}

pub fn circ_in(t: f64) -> f64 {
    -((1.0 - t * t).sqrt() - 1.0)
}

pub fn circ_out(t: f64) -> f64 {
    let t = t - 1.0;
    (1.0 - t * t).sqrt()
}

pub fn circ_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        return -0.5 * ((1.0 - t * t).sqrt() - 1.0);
    }

    let t = t - 2.0;
    0.5 * ((1.0 - t * t).sqrt() + 1.0)
}

//=== Elastic =============================================================
//
// Amplitude is fixed at 1, which puts the phase shift at period / 4.
//

fn elastic_wave(t: f64, period: f64) -> f64 {
    let shift = period / 4.0;
    2f64.powf(10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin()
}

pub fn elastic_in(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }

    -elastic_wave(t - 1.0, ELASTIC_PERIOD)
}

pub fn elastic_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }

    let shift = ELASTIC_PERIOD / 4.0;
    2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
}

pub fn elastic_in_out(t: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }

    let t = t * 2.0 - 1.0;
    if t < 0.0 {
        return -0.5 * elastic_wave(t, ELASTIC_IN_OUT_PERIOD);
    }

    let shift = ELASTIC_IN_OUT_PERIOD / 4.0;
    2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / ELASTIC_IN_OUT_PERIOD).sin() * 0.5 + 1.0
}

//=== Back ================================================================

pub fn back_in(t: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    t * t * ((s + 1.0) * t - s)
}

pub fn back_out(t: f64) -> f64 {
    let s = BACK_OVERSHOOT;
    let t = t - 1.0;
    t * t * ((s + 1.0) * t + s) + 1.0
}

pub fn back_in_out(t: f64) -> f64 {
    let s = BACK_IN_OUT_OVERSHOOT;
    let t = t * 2.0;
    if t < 1.0 {
        return 0.5 * (t * t * ((s + 1.0) * t - s));
    }

    let t = t - 2.0;
    0.5 * (t * t * ((s + 1.0) * t + s) + 2.0)
}

//=== Bounce ==============================================================

pub fn bounce_in(t: f64) -> f64 {
    1.0 - bounce_out(1.0 - t)
}

pub fn bounce_out(t: f64) -> f64 {
    let n = BOUNCE_RESTITUTION;
    let d = BOUNCE_SPAN;

    if t < 1.0 / d {
        n * t * t
    } else if t < 2.0 / d {
        let t = t - 1.5 / d;
        n * t * t + 0.75
    } else if t < 2.5 / d {
        let t = t - 2.25 / d;
        n * t * t + 0.9375
    } else {
        let t = t - 2.625 / d;
        n * t * t + 0.984375
    }
}

pub fn bounce_in_out(t: f64) -> f64 {
    if t < 0.5 {
        return bounce_in(t * 2.0) * 0.5;
    }

    bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    const CURVES: &[(&str, Easing)] = &[
        ("linear", linear),
        ("quad_in", quad_in),
        ("quad_out", quad_out),
        ("quad_in_out", quad_in_out),
        ("cubic_in", cubic_in),
        ("cubic_out", cubic_out),
        ("cubic_in_out", cubic_in_out),
        ("quart_in", quart_in),
        ("quart_out", quart_out),
        ("quart_in_out", quart_in_out),
        ("quint_in", quint_in),
        ("quint_out", quint_out),
        ("quint_in_out", quint_in_out),
        ("sine_in", sine_in),
        ("sine_out", sine_out),
        ("sine_in_out", sine_in_out),
        ("expo_in", expo_in),
        ("expo_out", expo_out),
        ("expo_in_out", expo_in_out),
        ("circ_in", circ_in),
        ("circ_out", circ_out),
        ("circ_in_out", circ_in_out),
        ("elastic_in", elastic_in),
        ("elastic_out", elastic_out),
        ("elastic_in_out", elastic_in_out),
        ("back_in", back_in),
        ("back_out", back_out),
        ("back_in_out", back_in_out),
        ("bounce_in", bounce_in),
        ("bounce_out", bounce_out),
        ("bounce_in_out", bounce_in_out),
    ];

    //=====================================================================
    // Curve Tests
    //=====================================================================

    #[test]
    fn every_curve_starts_at_zero_and_ends_at_one() {
        for (name, curve) in CURVES {
            assert!(approx(curve(0.0), 0.0), "{} should start at 0, got {}", name, curve(0.0));
            assert!(approx(curve(1.0), 1.0), "{} should end at 1, got {}", name, curve(1.0));
        }
    }

    #[test]
    fn in_out_curves_pass_through_midpoint() {
        for curve in [quad_in_out, cubic_in_out, quart_in_out, quint_in_out, sine_in_out, circ_in_out] {
            assert!(approx(curve(0.5), 0.5), "got {}", curve(0.5));
        }
    }

    #[test]
    fn back_in_dips_below_zero() {
        assert!(back_in(0.2) < 0.0, "back_in should overshoot backwards early on");
        assert!(back_out(0.8) > 1.0, "back_out should overshoot past the target");
    }

    #[test]
    fn bounce_out_segments_meet_their_floors() {
        let d = BOUNCE_SPAN;
        assert!(approx(bounce_out(1.5 / d), 0.75));
        assert!(approx(bounce_out(2.25 / d), 0.9375));
        assert!(approx(bounce_out(2.625 / d), 0.984375));
    }

    #[test]
    fn bounce_in_mirrors_bounce_out() {
        for t in [0.1, 0.3, 0.6, 0.9] {
            assert!(approx(bounce_in(t), 1.0 - bounce_out(1.0 - t)));
        }
    }

    //=====================================================================
    // to() Tests
    //=====================================================================

    #[test]
    fn to_denormalises_onto_range() {
        assert!(approx(to(0.0, 10.0, 20.0, linear), 10.0));
        assert!(approx(to(0.5, 10.0, 20.0, linear), 15.0));
        assert!(approx(to(1.0, 10.0, 20.0, linear), 20.0));
    }

    #[test]
    fn to_handles_descending_range() {
        assert!(approx(to(0.25, 1.0, 0.0, linear), 0.75));
        assert!(approx(to(0.5, -100.0, 0.0, quad_in), -75.0));
    }
}
