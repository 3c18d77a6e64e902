// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Values derived purely from the current position: touch routing and chrome ownership.

use kurbo::Point;

use crate::{Position, PositionSet};

/// Where a touch in the container should go.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchTarget {
    /// The drawer's drag surface.
    DragSurface,
    /// The dimming surface over the primary content.
    Dimming,
    /// The primary content, passed through the transparent part of the drag surface.
    PrimaryContent,
}

/// Which content decides position-dependent chrome such as the status bar style.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContentSlot {
    /// The content behind the drawer.
    Primary,
    /// The content inside the drawer.
    Drawer,
}

/// Returns `true` when the drawer acts as fully open: it is open, or it is partially
/// revealed and `Open` is not supported.
#[must_use]
pub fn acts_as_open(position: Position, supported: PositionSet) -> bool {
    match position {
        Position::Open => true,
        Position::PartiallyRevealed => !supported.contains_position(Position::Open),
        Position::Collapsed | Position::Closed => false,
    }
}

/// Routes a touch at `point` given the drawer content's top edge.
///
/// Points at or below the drawer's top hit the drag surface. Points above it go to the
/// dimming surface while the drawer acts as open, and to the primary content otherwise.
#[must_use]
pub fn route_touch(
    point: Point,
    drawer_top: f64,
    position: Position,
    supported: PositionSet,
) -> TouchTarget {
    if point.y >= drawer_top {
        TouchTarget::DragSurface
    } else if acts_as_open(position, supported) {
        TouchTarget::Dimming
    } else {
        TouchTarget::PrimaryContent
    }
}

/// The content that owns position-dependent chrome.
#[must_use]
pub fn chrome_owner(position: Position) -> ContentSlot {
    match position {
        Position::Open => ContentSlot::Drawer,
        Position::Collapsed | Position::PartiallyRevealed | Position::Closed => {
            ContentSlot::Primary
        }
    }
}
