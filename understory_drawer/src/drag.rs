// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag velocity tracking for hosts without native scroll deceleration.
//!
//! Toolkits with a native scroll surface hand the controller a release velocity and a
//! projected rest offset directly. Hosts that only see raw pointer motion can feed it
//! through a [`DragTracker`] to obtain the same [`DragRelease`].
//!
//! ```
//! use understory_drawer::drag::DragTracker;
//!
//! let mut tracker = DragTracker::new();
//! tracker.on_down(0.0, 1_000);
//! tracker.on_move(40.0, 1_020);
//! tracker.on_move(80.0, 1_040);
//! let release = tracker.on_up(120.0, 1_060).unwrap();
//!
//! // 40 units every 20ms.
//! assert!((release.velocity - 2_000.0).abs() < 1e-9);
//! assert!(release.projected_offset > release.offset);
//! ```

use smallvec::SmallVec;

/// Deceleration rate per millisecond of a typical scroll surface.
pub const NORMAL_DECELERATION_RATE: f64 = 0.998;

/// Samples older than this, relative to the newest one, are ignored for velocity.
const VELOCITY_WINDOW_MS: u64 = 100;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Sample {
    offset: f64,
    timestamp: u64,
}

/// Result of a finished drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragRelease {
    /// Offset at release.
    pub offset: f64,
    /// Release velocity in offset units per second; positive moves the drawer up.
    pub velocity: f64,
    /// Offset the surface would coast to under normal deceleration.
    pub projected_offset: f64,
}

/// Tracks a single drag gesture.
#[derive(Clone, Debug)]
pub struct DragTracker {
    samples: SmallVec<[Sample; 8]>,
    active: bool,
    /// Deceleration rate used to project the rest offset.
    pub deceleration_rate: f64,
}

impl DragTracker {
    /// Creates an idle tracker using [`NORMAL_DECELERATION_RATE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: SmallVec::new(),
            active: false,
            deceleration_rate: NORMAL_DECELERATION_RATE,
        }
    }

    /// Returns `true` between [`on_down`](Self::on_down) and [`on_up`](Self::on_up).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Starts a drag at `offset`. Any previous drag is discarded.
    ///
    /// Timestamps are in milliseconds.
    pub fn on_down(&mut self, offset: f64, timestamp: u64) {
        self.samples.clear();
        self.samples.push(Sample { offset, timestamp });
        self.active = true;
    }

    /// Records motion during the drag. Ignored when no drag is active.
    pub fn on_move(&mut self, offset: f64, timestamp: u64) {
        if !self.active {
            return;
        }
        self.samples.push(Sample { offset, timestamp });
        let newest = timestamp;
        // Keep at least two samples so a velocity can always be derived.
        while self.samples.len() > 2
            && newest.saturating_sub(self.samples[0].timestamp) > VELOCITY_WINDOW_MS
        {
            self.samples.remove(0);
        }
    }

    /// Ends the drag and returns the release, or `None` if no drag was active.
    pub fn on_up(&mut self, offset: f64, timestamp: u64) -> Option<DragRelease> {
        if !self.active {
            return None;
        }
        self.on_move(offset, timestamp);
        self.active = false;
        let velocity = self.velocity();
        Some(DragRelease {
            offset,
            velocity,
            projected_offset: project(offset, velocity, self.deceleration_rate),
        })
    }

    /// Abandons the drag without producing a release.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.samples.clear();
        was_active
    }

    /// Velocity over the retained window, in units per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return 0.0;
        };
        let dt = last.timestamp.saturating_sub(first.timestamp);
        if dt == 0 {
            return 0.0;
        }
        let dt_seconds = dt as f64 / 1000.0;
        (last.offset - first.offset) / dt_seconds
    }
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Projects the rest offset of a surface released at `offset` with `velocity`
/// (units per second) under a per-millisecond `deceleration_rate`.
#[must_use]
pub fn project(offset: f64, velocity: f64, deceleration_rate: f64) -> f64 {
    if !(0.0..1.0).contains(&deceleration_rate) {
        return offset;
    }
    let per_ms = velocity / 1000.0;
    offset + per_ms * deceleration_rate / (1.0 - deceleration_rate)
}
