// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stop calculation: distances from the container bottom for each supported position.

use smallvec::SmallVec;

use crate::{Position, PositionSet};

/// Tolerance used when comparing stop values.
pub const STOP_EPSILON: f64 = 0.01;

/// Raw inputs for a stop computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StopInputs {
    /// Height of the container the drawer lives in.
    pub container_height: f64,
    /// Space kept free above the drawer when it is open.
    pub top_inset: f64,
    /// Visible height of the drawer when collapsed.
    pub collapsed_height: f64,
    /// Visible height of the drawer when partially revealed.
    pub partial_reveal_height: f64,
}

impl StopInputs {
    /// The open stop, `container_height - top_inset`, independent of support.
    #[must_use]
    pub fn open_height(&self) -> f64 {
        self.container_height - self.top_inset
    }

    /// Stop of `position`, independent of support.
    #[must_use]
    pub fn height_of(&self, position: Position) -> f64 {
        match position {
            Position::Open => self.open_height(),
            Position::PartiallyRevealed => self.partial_reveal_height,
            Position::Collapsed => self.collapsed_height,
            Position::Closed => 0.0,
        }
    }
}

/// Stops for the supported positions of one layout configuration.
///
/// Values are not clamped or reordered: a collapsed height above the partial-reveal
/// height simply produces stops in that order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stops {
    inputs: StopInputs,
    supported: PositionSet,
    values: [Option<f64>; 4],
}

impl Stops {
    /// Computes the stops for `supported` from `inputs`.
    #[must_use]
    pub fn compute(inputs: StopInputs, supported: PositionSet) -> Self {
        let mut values = [None; 4];
        for position in supported.positions() {
            values[usize::from(position.raw())] = Some(inputs.height_of(position));
        }
        Self {
            inputs,
            supported,
            values,
        }
    }

    /// The inputs these stops were computed from.
    #[must_use]
    pub const fn inputs(&self) -> &StopInputs {
        &self.inputs
    }

    /// The positions these stops were computed for.
    #[must_use]
    pub const fn supported(&self) -> PositionSet {
        self.supported
    }

    /// Stop of `position`, or `None` if it is not supported.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<f64> {
        self.values[usize::from(position.raw())]
    }

    /// All supported stops in raw position order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        Position::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    /// Stops reachable by dragging: every supported stop except `Closed`.
    ///
    /// Ordered `Open`, `PartiallyRevealed`, `Collapsed`; this order decides ties when
    /// snapping.
    #[must_use]
    pub fn drawer_stops(&self) -> SmallVec<[(Position, f64); 3]> {
        [
            Position::Open,
            Position::PartiallyRevealed,
            Position::Collapsed,
        ]
        .into_iter()
        .filter_map(|p| self.get(p).map(|v| (p, v)))
        .collect()
    }

    /// Baseline stop corresponding to scroll offset `0`.
    ///
    /// This is the minimum of the drawer stops. `Closed` never acts as the baseline, so
    /// a closed drawer sits at a negative offset. Returns `0` when no drawer stop exists.
    #[must_use]
    pub fn lowest_stop(&self) -> f64 {
        self.drawer_stops()
            .iter()
            .map(|&(_, v)| v)
            .reduce(f64::min)
            .unwrap_or(0.0)
    }

    /// Highest drawer stop, or `0` when no drawer stop exists.
    #[must_use]
    pub fn highest_stop(&self) -> f64 {
        self.drawer_stops()
            .iter()
            .map(|&(_, v)| v)
            .reduce(f64::max)
            .unwrap_or(0.0)
    }

    /// Scroll range covered by the drawer stops.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.highest_stop() - self.lowest_stop()
    }

    /// Scroll offset at which the drawer rests in `position`.
    ///
    /// Works for unsupported positions too, since assignment validates support first.
    #[must_use]
    pub fn offset_for(&self, position: Position) -> f64 {
        self.inputs.height_of(position) - self.lowest_stop()
    }

    /// Converts a scroll offset to a distance from the container bottom.
    #[must_use]
    pub fn distance_from_bottom(&self, offset: f64) -> f64 {
        offset + self.lowest_stop()
    }

    /// Converts a distance from the container bottom to a scroll offset.
    #[must_use]
    pub fn offset_at_distance(&self, distance: f64) -> f64 {
        distance - self.lowest_stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn inputs() -> StopInputs {
        StopInputs {
            container_height: 800.0,
            top_inset: 50.0,
            collapsed_height: 68.0,
            partial_reveal_height: 264.0,
        }
    }

    #[test]
    fn stops_follow_inputs() {
        let stops = Stops::compute(inputs(), PositionSet::all());
        assert_eq!(stops.get(Position::Open), Some(750.0));
        assert_eq!(stops.get(Position::PartiallyRevealed), Some(264.0));
        assert_eq!(stops.get(Position::Collapsed), Some(68.0));
        assert_eq!(stops.get(Position::Closed), Some(0.0));
        assert_eq!(stops.lowest_stop(), 68.0);
        assert_eq!(stops.highest_stop(), 750.0);
        assert_eq!(stops.range(), 682.0);
        assert_eq!(stops.iter().count(), 4);
    }

    #[test]
    fn stops_are_restricted_to_supported() {
        let stops = Stops::compute(
            inputs(),
            PositionSet::OPEN | PositionSet::PARTIALLY_REVEALED,
        );
        assert_eq!(stops.get(Position::Collapsed), None);
        assert_eq!(stops.lowest_stop(), 264.0);
        assert_eq!(stops.offset_for(Position::Open), 486.0);
        assert_eq!(stops.distance_from_bottom(0.0), 264.0);
        assert_eq!(stops.offset_at_distance(264.0), 0.0);
    }

    #[test]
    fn closed_is_never_the_baseline() {
        let stops = Stops::compute(inputs(), PositionSet::all());
        let drawer: Vec<_> = stops.drawer_stops().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            drawer,
            vec![
                Position::Open,
                Position::PartiallyRevealed,
                Position::Collapsed
            ]
        );
        assert_eq!(stops.offset_for(Position::Closed), -68.0);

        let only_closed = Stops::compute(inputs(), PositionSet::CLOSED);
        assert_eq!(only_closed.lowest_stop(), 0.0);
        assert_eq!(only_closed.range(), 0.0);
    }

    #[test]
    fn inverted_heights_are_not_reordered() {
        let stops = Stops::compute(
            StopInputs {
                collapsed_height: 300.0,
                partial_reveal_height: 100.0,
                ..inputs()
            },
            PositionSet::all(),
        );
        assert_eq!(stops.get(Position::Collapsed), Some(300.0));
        assert_eq!(stops.lowest_stop(), 100.0);
    }
}
