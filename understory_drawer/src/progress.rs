// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous progress values derived from the scroll offset.

use crate::Position;
use crate::stops::Stops;

/// Dimming alpha below which the dimming surface counts as cleared.
pub const DIMMING_EPSILON: f64 = 0.001;

/// Fullscreen transition progress at `offset`.
///
/// `0` at the partial-reveal stop and `1` at the open stop. The value is not clamped,
/// so overshoot during a bounce shows up as values above `1`. When the open and
/// partial-reveal stops coincide, anything above them reports `1`.
#[must_use]
pub fn fullscreen_progress(stops: &Stops, offset: f64) -> f64 {
    let inputs = stops.inputs();
    let partial = inputs.height_of(Position::PartiallyRevealed);
    let open = inputs.height_of(Position::Open);
    let start = partial - stops.lowest_stop();
    let span = open - partial;
    if span.abs() <= f64::EPSILON {
        return if offset > start { 1.0 } else { 0.0 };
    }
    (offset - start) / span
}

/// State of the dimming surface drawn over the primary content.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Dimming {
    /// Current alpha.
    pub alpha: f64,
    /// Whether the dimming surface takes touches.
    pub interactive: bool,
}

/// Everything one offset change publishes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProgressFrame {
    /// Fullscreen progress to publish, if any is due this frame.
    pub fullscreen_progress: Option<f64>,
    /// Distance from the container bottom, published every frame.
    pub distance_from_bottom: f64,
    /// Dimming state after this frame.
    pub dimming: Dimming,
    /// `true` if elastic overscroll should be turned back on.
    pub reenable_bounce: bool,
}

/// Turns offsets into [`ProgressFrame`]s, tracking dimming across frames.
#[derive(Clone, Debug)]
pub struct ProgressPublisher {
    dimming_opacity_max: f64,
    dimming: Dimming,
}

impl ProgressPublisher {
    /// Creates a publisher that dims up to `dimming_opacity_max` when fully open.
    #[must_use]
    pub fn new(dimming_opacity_max: f64) -> Self {
        Self {
            dimming_opacity_max,
            dimming: Dimming::default(),
        }
    }

    /// Current dimming state.
    #[must_use]
    pub const fn dimming(&self) -> Dimming {
        self.dimming
    }

    /// Maximum dimming alpha.
    #[must_use]
    pub const fn dimming_opacity_max(&self) -> f64 {
        self.dimming_opacity_max
    }

    /// Sets the maximum dimming alpha used from the next update on.
    pub fn set_dimming_opacity_max(&mut self, max: f64) {
        self.dimming_opacity_max = max;
    }

    /// Processes an offset change.
    ///
    /// Above the partial-reveal stop the frame carries the fullscreen progress and the
    /// dimming follows it. At or below it, a single zero progress is published when the
    /// dimming was still visible; further frames at rest publish nothing. The distance
    /// from the bottom is always published.
    pub fn update(&mut self, stops: &Stops, offset: f64) -> ProgressFrame {
        let lowest = stops.lowest_stop();
        let partial_start = stops.inputs().height_of(Position::PartiallyRevealed) - lowest;

        let fullscreen_progress = if offset > partial_start {
            let progress = fullscreen_progress(stops, offset);
            self.dimming = Dimming {
                alpha: progress * self.dimming_opacity_max,
                interactive: true,
            };
            Some(progress)
        } else if self.dimming.alpha > DIMMING_EPSILON {
            self.dimming = Dimming::default();
            Some(0.0)
        } else {
            None
        };

        ProgressFrame {
            fullscreen_progress,
            distance_from_bottom: offset + lowest,
            dimming: self.dimming,
            reenable_bounce: offset > 0.0 && offset < stops.range(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PositionSet, StopInputs};

    fn stops() -> Stops {
        Stops::compute(
            StopInputs {
                container_height: 800.0,
                top_inset: 50.0,
                collapsed_height: 68.0,
                partial_reveal_height: 264.0,
            },
            PositionSet::all(),
        )
    }

    #[test]
    fn progress_is_zero_at_partial_and_one_at_open() {
        let stops = stops();
        let lower = 264.0 - 68.0;
        let upper = 750.0 - 68.0;
        assert_eq!(fullscreen_progress(&stops, lower), 0.0);
        assert_eq!(fullscreen_progress(&stops, upper), 1.0);

        let mut previous = f64::NEG_INFINITY;
        let mut offset = lower;
        while offset <= upper {
            let p = fullscreen_progress(&stops, offset);
            assert!(p >= previous, "progress decreased at {offset}");
            previous = p;
            offset += 3.1;
        }
    }

    #[test]
    fn overshoot_is_not_clamped() {
        let stops = stops();
        assert!(fullscreen_progress(&stops, 750.0) > 1.0);
    }

    #[test]
    fn dimming_follows_progress_and_resets_once() {
        let stops = stops();
        let mut publisher = ProgressPublisher::new(0.5);

        let frame = publisher.update(&stops, 682.0);
        assert_eq!(frame.fullscreen_progress, Some(1.0));
        assert_eq!(frame.dimming.alpha, 0.5);
        assert!(frame.dimming.interactive);
        assert_eq!(frame.distance_from_bottom, 750.0);

        // Dropping to rest publishes zero once.
        let frame = publisher.update(&stops, 100.0);
        assert_eq!(frame.fullscreen_progress, Some(0.0));
        assert_eq!(frame.dimming, Dimming::default());

        // And nothing after that.
        let frame = publisher.update(&stops, 90.0);
        assert_eq!(frame.fullscreen_progress, None);
        assert_eq!(frame.distance_from_bottom, 158.0);
    }

    #[test]
    fn bounce_reenabled_only_inside_range() {
        let stops = stops();
        let mut publisher = ProgressPublisher::new(0.5);
        assert!(!publisher.update(&stops, 0.0).reenable_bounce);
        assert!(publisher.update(&stops, 10.0).reenable_bounce);
        assert!(!publisher.update(&stops, 682.0).reenable_bounce);
    }

    #[test]
    fn degenerate_span_reports_full_progress() {
        let stops = Stops::compute(
            StopInputs {
                container_height: 314.0,
                top_inset: 50.0,
                collapsed_height: 68.0,
                partial_reveal_height: 264.0,
            },
            PositionSet::all(),
        );
        assert_eq!(fullscreen_progress(&stops, 300.0), 1.0);
        assert_eq!(fullscreen_progress(&stops, 100.0), 0.0);
    }
}
