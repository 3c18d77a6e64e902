// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drawer --heading-base-level=0

//! Understory Drawer: a headless, snap-positioned drawer (bottom sheet).
//!
//! A drawer is a sheet of content sliding up over some primary content. It rests at one
//! of a few named positions and snaps to the nearest one when the user lets go. This
//! crate owns the state machine and the arithmetic; it draws nothing and owns no views.
//!
//! The core concepts are:
//!
//! - [`Position`] and [`PositionSet`]: the named rest positions and the subset the drawer
//!   content supports.
//! - [`Stops`]: the visible height of the drawer at each position, computed from a
//!   [`StopInputs`] snapshot of container size and content heights.
//! - [`snap::resolve`]: picks the stop to settle on when a drag is released.
//! - [`progress::ProgressPublisher`]: turns scroll offsets into fullscreen progress,
//!   distance from the bottom, and dimming.
//! - [`DrawerController`]: owns the current position and composes the above in response
//!   to host events, notifying observers through [`events`].
//!
//! Host frameworks are responsible for:
//!
//! - Owning a vertically scrolling surface and reporting its offset and drag lifecycle
//!   ([`DrawerController::begin_dragging`], [`DrawerController::scroll_did_change`],
//!   [`DrawerController::will_end_dragging`], [`DrawerController::did_end_dragging`]).
//!   Hosts without one can feed pointer samples to a [`drag::DragTracker`] and call
//!   [`DrawerController::release_drag`].
//! - Calling [`DrawerController::layout`] when the container changes size.
//! - Driving time with [`DrawerController::tick`] and applying
//!   [`DrawerController::offset`] and [`DrawerController::dimming`] to their views.
//!
//! Offset `0` on the scroll surface shows the drawer at its lowest supported stop;
//! offsets grow as the drawer moves up.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_drawer::content::EmptyContent;
//! use understory_drawer::events::{DrawerEvent, EventKind};
//! use understory_drawer::{DrawerConfig, DrawerController, Position};
//!
//! let mut drawer = DrawerController::new(
//!     Box::new(EmptyContent),
//!     Box::new(EmptyContent),
//!     DrawerConfig::default(),
//! );
//! drawer.subscribe(EventKind::PositionChanged, |event| {
//!     if let DrawerEvent::PositionChanged(position) = event {
//!         println!("drawer is now {position}");
//!     }
//! });
//! drawer.layout(Size::new(390.0, 844.0));
//!
//! // The user drags the sheet up and lets go two thirds of the way.
//! assert!(drawer.begin_dragging());
//! drawer.scroll_did_change(500.0);
//! let outcome = drawer.will_end_dragging(0.8, 560.0);
//! // The native deceleration is frozen; the controller animates instead.
//! assert_eq!(outcome.target_offset, 500.0);
//! assert_eq!(drawer.did_end_dragging(), Some(Position::Open));
//!
//! while drawer.tick(1.0 / 60.0) {}
//! assert_eq!(drawer.distance_from_bottom(), 844.0 - 50.0);
//! ```
//!
//! With the `serde` feature, [`DrawerConfig`] and [`Position`] can be loaded from
//! configuration files. Positions are written by name (`"partiallyRevealed"`), and an
//! unknown or missing name falls back to [`Position::Collapsed`].
//!
//! Diagnostics go through [`tracing`]: refused requests and invalid configuration are
//! reported at `warn`, snap decisions and transitions at `debug`, offsets at `trace`.
//!
//! ## Features
//!
//! - `std` (enabled by default): use the standard library for floating-point math.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: (de)serialization of [`DrawerConfig`] and [`Position`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
mod error;
mod position;
mod stops;

pub mod content;
pub mod drag;
pub mod events;
pub mod layout;
pub mod progress;
pub mod routing;
pub mod snap;
pub mod template;
pub mod transition;

pub use config::{DrawerConfig, Rgba};
pub use controller::{DrawerController, REST_THRESHOLD, SnapOutcome};
pub use error::{DrawerError, TemplateError};
pub use position::{Position, PositionSet, UnknownPosition};
pub use stops::{STOP_EPSILON, StopInputs, Stops};
