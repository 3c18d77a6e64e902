// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named drawer positions and the supported-position set.

use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// A named resting position of the drawer.
///
/// The discriminants are stable raw values. Ordering follows the raw value and is used
/// to pick a deterministic "lowest" member of a [`PositionSet`]; it is not an ordering
/// by height (`Closed` shows nothing, yet sorts last).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Position {
    /// Only the collapsed strip of the drawer is visible.
    #[default]
    Collapsed = 0,
    /// The drawer shows its partial-reveal height.
    PartiallyRevealed = 1,
    /// The drawer fills the container below the top inset.
    Open = 2,
    /// The drawer is entirely below the container edge. Only reachable programmatically.
    Closed = 3,
}

impl Position {
    /// All positions in raw order.
    pub const ALL: [Self; 4] = [
        Self::Collapsed,
        Self::PartiallyRevealed,
        Self::Open,
        Self::Closed,
    ];

    /// Returns the raw value of this position.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Converts a raw value back into a position.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Collapsed),
            1 => Some(Self::PartiallyRevealed),
            2 => Some(Self::Open),
            3 => Some(Self::Closed),
            _ => None,
        }
    }

    /// Canonical name, as accepted by [`Position::parse`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::PartiallyRevealed => "partiallyRevealed",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Strict, case-insensitive lookup by name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Lenient lookup used by declarative configuration.
    ///
    /// Matches case-insensitively like [`Position::parse`], but any unrecognized or
    /// missing name yields [`Position::Collapsed`] and logs a warning instead of failing.
    ///
    /// ```
    /// use understory_drawer::Position;
    ///
    /// assert_eq!(Position::from_name(Some("PartiallyRevealed")), Position::PartiallyRevealed);
    /// assert_eq!(Position::from_name(None), Position::Collapsed);
    /// assert_eq!(Position::from_name(Some("bogus")), Position::Collapsed);
    /// ```
    #[must_use]
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::parse(name).unwrap_or_else(|| {
                tracing::warn!(name, "unrecognized drawer position name, using collapsed");
                Self::Collapsed
            }),
            None => {
                tracing::warn!("missing drawer position name, using collapsed");
                Self::Collapsed
            }
        }
    }

    /// The single-member set for this position.
    #[must_use]
    pub const fn flag(self) -> PositionSet {
        match self {
            Self::Collapsed => PositionSet::COLLAPSED,
            Self::PartiallyRevealed => PositionSet::PARTIALLY_REVEALED,
            Self::Open => PositionSet::OPEN,
            Self::Closed => PositionSet::CLOSED,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned by [`Position::from_str`] for unknown names.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown drawer position `{0}`")]
pub struct UnknownPosition(pub String);

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownPosition(s.to_owned()))
    }
}

bitflags::bitflags! {
    /// A set of drawer positions, typically the positions the drawer content supports.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PositionSet: u8 {
        /// [`Position::Collapsed`].
        const COLLAPSED          = 0b0000_0001;
        /// [`Position::PartiallyRevealed`].
        const PARTIALLY_REVEALED = 0b0000_0010;
        /// [`Position::Open`].
        const OPEN               = 0b0000_0100;
        /// [`Position::Closed`].
        const CLOSED             = 0b0000_1000;
    }
}

impl Default for PositionSet {
    fn default() -> Self {
        Self::all()
    }
}

impl PositionSet {
    /// Returns `true` if `position` is a member.
    #[must_use]
    pub const fn contains_position(self, position: Position) -> bool {
        self.contains(position.flag())
    }

    /// Number of members.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }

    /// Members in raw order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        Position::ALL
            .into_iter()
            .filter(move |p| self.contains_position(*p))
    }

    /// The member with the smallest raw value, or [`Position::Collapsed`] when empty.
    ///
    /// This is a raw-order pick, so `{Closed, Open}` yields `Open`.
    #[must_use]
    pub fn lowest(self) -> Position {
        self.positions().next().unwrap_or(Position::Collapsed)
    }
}

impl From<Position> for PositionSet {
    fn from(position: Position) -> Self {
        position.flag()
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, p| set | p.flag())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::from_name(name.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn raw_values_round_trip() {
        for p in Position::ALL {
            assert_eq!(Position::from_raw(p.raw()), Some(p));
        }
        assert_eq!(Position::Closed.raw(), 3);
        assert_eq!(Position::from_raw(4), None);
    }

    #[test]
    fn name_lookup_is_case_insensitive_with_fallback() {
        assert_eq!(
            Position::from_name(Some("PartiallyRevealed")),
            Position::PartiallyRevealed
        );
        assert_eq!(Position::from_name(Some("OPEN")), Position::Open);
        assert_eq!(Position::from_name(Some("closed")), Position::Closed);
        assert_eq!(Position::from_name(None), Position::Collapsed);
        assert_eq!(Position::from_name(Some("bogus")), Position::Collapsed);
        // Names must match exactly apart from case.
        assert_eq!(Position::parse("partially revealed"), None);
        assert!("bogus".parse::<Position>().is_err());
        assert_eq!("Open".parse::<Position>(), Ok(Position::Open));
    }

    #[test]
    fn lowest_uses_raw_order() {
        assert_eq!(PositionSet::all().lowest(), Position::Collapsed);
        assert_eq!(
            (PositionSet::OPEN | PositionSet::PARTIALLY_REVEALED).lowest(),
            Position::PartiallyRevealed
        );
        // `Closed` sorts last even though it has no height.
        assert_eq!(
            (PositionSet::CLOSED | PositionSet::OPEN).lowest(),
            Position::Open
        );
        assert_eq!(PositionSet::empty().lowest(), Position::Collapsed);
    }

    #[test]
    fn set_membership_and_iteration() {
        let set: PositionSet = [Position::Open, Position::Collapsed].into_iter().collect();
        assert_eq!(set.count(), 2);
        assert!(set.contains_position(Position::Open));
        assert!(!set.contains_position(Position::Closed));
        let members: Vec<_> = set.positions().collect();
        assert_eq!(members, vec![Position::Collapsed, Position::Open]);
        assert_eq!(PositionSet::default(), PositionSet::all());
    }
}
