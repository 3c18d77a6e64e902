// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap resolution on drag release.
//!
//! Given the current [`Stops`] and the offset at which the scroll surface would come to
//! rest by itself, [`resolve`] picks the stop to settle on and says whether the host
//! should let its own deceleration finish or freeze the surface and animate instead.
//!
//! ## Rules
//!
//! 1. Only drawer stops take part (`Closed` is reachable programmatically only).
//! 2. The closest stop to the projected distance from the bottom wins; equal distances
//!    prefer `Open`, then `PartiallyRevealed`, then `Collapsed`.
//! 3. At the extremes, an overscroll past the stop settles through the surface's own
//!    bounce ([`SnapAction::Settle`]); anything short of it is animated
//!    ([`SnapAction::Animate`]).
//! 4. Any other closest stop animates to `PartiallyRevealed` when supported.
//!
//! ```
//! use understory_drawer::{PositionSet, StopInputs, Stops};
//! use understory_drawer::snap::{SnapAction, resolve};
//! use understory_drawer::Position;
//!
//! let stops = Stops::compute(
//!     StopInputs {
//!         container_height: 800.0,
//!         top_inset: 50.0,
//!         collapsed_height: 68.0,
//!         partial_reveal_height: 264.0,
//!     },
//!     PositionSet::all(),
//! );
//! // Released so the drawer would rest 700 units above the bottom.
//! let decision = resolve(&stops, stops.offset_at_distance(700.0));
//! assert_eq!(decision.action, SnapAction::Animate(Position::Open));
//! ```

use crate::Position;
use crate::stops::{STOP_EPSILON, Stops};

/// What the controller should do after a drag is released.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnapAction {
    /// Freeze the surface's native deceleration and animate to the position once the
    /// drag's interactive phase ends.
    Animate(Position),
    /// Let the surface's own deceleration and bounce come to rest at the position and
    /// assign it directly, without a separate animation.
    Settle(Position),
    /// Leave the surface alone.
    None,
}

impl SnapAction {
    /// The position this action leads to, if any.
    #[must_use]
    pub const fn position(self) -> Option<Position> {
        match self {
            Self::Animate(p) | Self::Settle(p) => Some(p),
            Self::None => None,
        }
    }

    /// Returns `true` if the native deceleration should be cancelled.
    #[must_use]
    pub const fn freezes(self) -> bool {
        matches!(self, Self::Animate(_))
    }
}

/// Outcome of [`resolve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapDecision {
    /// Projected rest distance from the container bottom.
    pub distance_from_bottom: f64,
    /// Closest drawer stop, if any drawer stop exists.
    pub closest: Option<(Position, f64)>,
    /// Resulting action.
    pub action: SnapAction,
}

/// Resolves the snap target for a drag released with the given projected rest offset.
#[must_use]
pub fn resolve(stops: &Stops, proposed_target_offset: f64) -> SnapDecision {
    let drawer_stops = stops.drawer_stops();
    let distance = stops.lowest_stop() + proposed_target_offset;

    let gap = |stop: f64| (stop - distance).abs();
    let mut closest: Option<(Position, f64)> = None;
    for &(position, stop) in &drawer_stops {
        let better = closest.is_none_or(|(_, best)| gap(stop) < gap(best));
        if better {
            closest = Some((position, stop));
        }
    }

    let action = match closest {
        Some((_, stop)) => action_for(stops, stop, distance),
        None => SnapAction::None,
    };

    SnapDecision {
        distance_from_bottom: distance,
        closest,
        action,
    }
}

fn action_for(stops: &Stops, closest: f64, distance: f64) -> SnapAction {
    let near = |other: Option<f64>| other.is_some_and(|v| (v - closest).abs() < STOP_EPSILON);

    let open = stops.get(Position::Open);
    if near(open) {
        let open = open.unwrap_or(closest);
        return if distance < open {
            SnapAction::Animate(Position::Open)
        } else {
            SnapAction::Settle(Position::Open)
        };
    }

    let collapsed = stops.get(Position::Collapsed);
    if near(collapsed) {
        let collapsed = collapsed.unwrap_or(closest);
        return if distance > collapsed {
            SnapAction::Animate(Position::Collapsed)
        } else {
            SnapAction::Settle(Position::Collapsed)
        };
    }

    if stops.supported().contains_position(Position::PartiallyRevealed) {
        SnapAction::Animate(Position::PartiallyRevealed)
    } else {
        SnapAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PositionSet, StopInputs};

    fn stops(supported: PositionSet) -> Stops {
        Stops::compute(
            StopInputs {
                container_height: 800.0,
                top_inset: 50.0,
                collapsed_height: 68.0,
                partial_reveal_height: 264.0,
            },
            supported,
        )
    }

    fn at_distance(stops: &Stops, distance: f64) -> SnapDecision {
        resolve(stops, stops.offset_at_distance(distance))
    }

    #[test]
    fn below_open_animates_to_open() {
        let stops = stops(PositionSet::all());
        let d = at_distance(&stops, 700.0);
        assert_eq!(d.closest, Some((Position::Open, 750.0)));
        assert_eq!(d.action, SnapAction::Animate(Position::Open));
        assert!(d.action.freezes());
    }

    #[test]
    fn above_collapsed_animates_to_collapsed() {
        let stops = stops(PositionSet::all());
        let d = at_distance(&stops, 100.0);
        assert_eq!(d.closest, Some((Position::Collapsed, 68.0)));
        assert_eq!(d.action, SnapAction::Animate(Position::Collapsed));
    }

    #[test]
    fn overscroll_settles_through_bounce() {
        let stops = stops(PositionSet::all());
        assert_eq!(
            at_distance(&stops, 780.0).action,
            SnapAction::Settle(Position::Open)
        );
        assert_eq!(
            at_distance(&stops, 40.0).action,
            SnapAction::Settle(Position::Collapsed)
        );
        assert!(!SnapAction::Settle(Position::Open).freezes());
    }

    #[test]
    fn middle_goes_to_partial_reveal() {
        let stops = stops(PositionSet::all());
        let d = at_distance(&stops, 300.0);
        assert_eq!(d.closest, Some((Position::PartiallyRevealed, 264.0)));
        assert_eq!(d.action, SnapAction::Animate(Position::PartiallyRevealed));
    }

    #[test]
    fn equidistant_prefers_open_then_partial() {
        // 507 is exactly halfway between 264 and 750.
        let stops = stops(PositionSet::all());
        assert_eq!(
            at_distance(&stops, 507.0).closest.map(|(p, _)| p),
            Some(Position::Open)
        );
        // 166 is halfway between 68 and 264.
        assert_eq!(
            at_distance(&stops, 166.0).closest.map(|(p, _)| p),
            Some(Position::PartiallyRevealed)
        );
    }

    #[test]
    fn never_resolves_to_closed_or_unsupported() {
        let sets = (1_u8..16).filter_map(PositionSet::from_bits);
        for set in sets {
            let stops = stops(set);
            let mut distance = -200.0;
            while distance < 1000.0 {
                let d = at_distance(&stops, distance);
                if let Some(p) = d.action.position() {
                    assert_ne!(p, Position::Closed, "resolved to closed for {set:?}");
                    assert!(set.contains_position(p), "unsupported {p} for {set:?}");
                }
                distance += 7.5;
            }
        }
    }

    #[test]
    fn only_closed_supported_yields_nothing() {
        let stops = stops(PositionSet::CLOSED);
        let d = resolve(&stops, 120.0);
        assert_eq!(d.closest, None);
        assert_eq!(d.action, SnapAction::None);
    }
}
