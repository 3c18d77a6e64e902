// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability interfaces implemented by the two content objects a drawer hosts.
//!
//! Every capability is a trait method with a default body, so content only implements
//! what it has an opinion on. A missing capability falls back to the controller's
//! configuration ([`DrawerConfig`](crate::DrawerConfig)) or is a no-op.
//!
//! When the values are read:
//! - [`DrawerContent::supported_positions`] when the content is attached and on
//!   [`DrawerController::refresh_supported_positions`](crate::DrawerController::refresh_supported_positions).
//! - [`DrawerContent::collapsed_height`] and [`DrawerContent::partial_reveal_height`] on
//!   every layout pass, snap decision, and offset change, since content may change them.

use crate::PositionSet;
use crate::events::DrawerObserver;

/// Content shown inside the drawer.
pub trait DrawerContent: DrawerObserver {
    /// Visible height when collapsed. `None` uses the configured default.
    fn collapsed_height(&self) -> Option<f64> {
        None
    }

    /// Visible height when partially revealed. `None` uses the configured default.
    fn partial_reveal_height(&self) -> Option<f64> {
        None
    }

    /// Positions this content supports. `None` means all of them.
    fn supported_positions(&self) -> Option<PositionSet> {
        None
    }

    /// Height of the drawer content currently below the container's bottom edge.
    ///
    /// Scrollable content can use this as a bottom inset so its last rows stay reachable.
    fn set_scroll_bottom_inset(&mut self, _inset: f64) {}
}

/// Content shown behind the drawer.
pub trait PrimaryContent: DrawerObserver {}

/// Content with no capabilities, usable for either slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EmptyContent;

impl DrawerObserver for EmptyContent {}
impl DrawerContent for EmptyContent {}
impl PrimaryContent for EmptyContent {}
