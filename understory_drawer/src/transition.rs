// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven transitions: the damped spring used for position changes and the linear
//! cross-fade used for content swaps.
//!
//! Nothing here owns a clock. The host advances transitions with the frame delta, which
//! keeps the drawer deterministic under test.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Residual amplitude at which a spring counts as settled.
const SETTLE_AMPLITUDE: f64 = 1e-3;

/// Parameters of a damped spring transition.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpringParams {
    /// Duration in seconds after which the spring is snapped onto its target.
    pub duration: f64,
    /// Damping ratio in `(0, 1]`; lower values overshoot more.
    pub damping: f64,
    /// Initial velocity, in units of the total distance per second.
    pub initial_velocity: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            duration: 0.3,
            damping: 0.75,
            initial_velocity: 0.0,
        }
    }
}

impl SpringParams {
    /// Normalized progress (`0` at start, `1` at rest) after `t` seconds.
    ///
    /// Underdamped springs overshoot, so values above `1` occur mid-flight. From
    /// `duration` on the result is exactly `1`.
    #[must_use]
    pub fn progress(&self, t: f64) -> f64 {
        if self.duration <= 0.0 || t >= self.duration {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }
        let zeta = self.damping.clamp(f64::EPSILON, 1.0);
        // Natural frequency chosen so the envelope has decayed to `SETTLE_AMPLITUDE`
        // by `duration`.
        let omega = -SETTLE_AMPLITUDE.ln() / (zeta * self.duration);
        let v0 = self.initial_velocity;
        // `exp(-zeta * omega * t)`, which reaches `SETTLE_AMPLITUDE` at `duration`.
        let decay = SETTLE_AMPLITUDE.powf(t / self.duration);
        if zeta >= 1.0 {
            return 1.0 - decay * (1.0 + (omega - v0) * t);
        }
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let b = (zeta * omega - v0) / omega_d;
        1.0 - decay * ((omega_d * t).cos() + b * (omega_d * t).sin())
    }
}

/// Handle identifying one started transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionHandle(pub(crate) u64);

/// Sample produced by advancing a transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionStep {
    /// Interpolated value.
    pub value: f64,
    /// `true` once the transition has reached its target.
    pub finished: bool,
}

/// A spring interpolation between two scalar values.
#[derive(Clone, Debug)]
pub struct SpringTransition {
    handle: TransitionHandle,
    from: f64,
    to: f64,
    elapsed: f64,
    params: SpringParams,
}

impl SpringTransition {
    /// Creates a transition from `from` to `to`.
    #[must_use]
    pub fn new(handle: TransitionHandle, from: f64, to: f64, params: SpringParams) -> Self {
        Self {
            handle,
            from,
            to,
            elapsed: 0.0,
            params,
        }
    }

    /// The handle this transition was started with.
    #[must_use]
    pub const fn handle(&self) -> TransitionHandle {
        self.handle
    }

    /// Target value.
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.to
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.params.progress(self.elapsed)
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.params.duration
    }

    /// Advances by `dt` seconds. Negative deltas are treated as zero.
    pub fn advance(&mut self, dt: f64) -> TransitionStep {
        self.elapsed += dt.max(0.0);
        TransitionStep {
            value: self.value(),
            finished: self.is_finished(),
        }
    }
}

/// A linear fade-in from `0` to `1`, used when content is swapped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fade {
    elapsed: f64,
    duration: f64,
}

impl Fade {
    /// Creates a fade lasting `duration` seconds.
    #[must_use]
    pub const fn new(duration: f64) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    /// Current alpha in `[0, 1]`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Returns `true` once fully faded in.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.alpha() >= 1.0
    }

    /// Advances by `dt` seconds and returns the new alpha.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt.max(0.0);
        self.alpha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_starts_at_zero_and_rests_at_one() {
        let spring = SpringParams::default();
        assert_eq!(spring.progress(0.0), 0.0);
        assert_eq!(spring.progress(0.3), 1.0);
        assert_eq!(spring.progress(1.0), 1.0);
        let mid = spring.progress(0.05);
        assert!(mid > 0.0 && mid < 1.2, "unexpected mid-flight value {mid}");
    }

    #[test]
    fn underdamped_spring_overshoots() {
        let spring = SpringParams {
            damping: 0.3,
            ..SpringParams::default()
        };
        let peak = (1..300)
            .map(|i| spring.progress(f64::from(i) * 0.001))
            .fold(0.0, f64::max);
        assert!(peak > 1.0, "peak {peak} should overshoot");
    }

    #[test]
    fn critically_damped_spring_does_not_overshoot() {
        let spring = SpringParams {
            damping: 1.0,
            ..SpringParams::default()
        };
        for i in 0..300 {
            assert!(spring.progress(f64::from(i) * 0.001) <= 1.0);
        }
    }

    #[test]
    fn transition_interpolates_and_finishes() {
        let mut t =
            SpringTransition::new(TransitionHandle(1), 100.0, 300.0, SpringParams::default());
        assert_eq!(t.value(), 100.0);
        let step = t.advance(0.1);
        assert!(!step.finished);
        assert!(step.value > 100.0);
        let step = t.advance(-5.0);
        assert!(!step.finished);
        let step = t.advance(0.25);
        assert!(step.finished);
        assert_eq!(step.value, 300.0);
        assert_eq!(t.target(), 300.0);
    }

    #[test]
    fn fade_is_linear_and_clamped() {
        let mut fade = Fade::new(0.5);
        assert_eq!(fade.alpha(), 0.0);
        assert_eq!(fade.advance(0.25), 0.5);
        assert!(!fade.is_finished());
        assert_eq!(fade.advance(1.0), 1.0);
        assert!(fade.is_finished());
        assert!(Fade::new(0.0).is_finished());
    }
}
