// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer registry for drawer notifications.
//!
//! Three event kinds exist ([`EventKind`]). Each kind has zero or more handlers; emitting
//! an event calls that kind's handlers synchronously in registration order. A kind with
//! no handlers is simply skipped.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_drawer::events::{DrawerEvent, EventBus, EventKind};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut bus = EventBus::new();
//! let sink = seen.clone();
//! bus.subscribe(EventKind::DistanceFromBottom, move |event| {
//!     sink.borrow_mut().push(*event);
//! });
//!
//! bus.emit(&DrawerEvent::DistanceFromBottom(120.0));
//! bus.emit(&DrawerEvent::FullscreenProgress(0.5)); // no handler, skipped
//! assert_eq!(&*seen.borrow(), &[DrawerEvent::DistanceFromBottom(120.0)]);
//! ```

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::Position;

/// A notification published by the drawer controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawerEvent {
    /// The current position was assigned.
    PositionChanged(Position),
    /// Progress of the transition from partially revealed (`0`) to open (`1`).
    FullscreenProgress(f64),
    /// Visible drawer height above the container bottom.
    DistanceFromBottom(f64),
}

impl DrawerEvent {
    /// The kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PositionChanged(_) => EventKind::PositionChanged,
            Self::FullscreenProgress(_) => EventKind::FullscreenProgress,
            Self::DistanceFromBottom(_) => EventKind::DistanceFromBottom,
        }
    }
}

/// Event kinds handlers subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`DrawerEvent::PositionChanged`].
    PositionChanged,
    /// [`DrawerEvent::FullscreenProgress`].
    FullscreenProgress,
    /// [`DrawerEvent::DistanceFromBottom`].
    DistanceFromBottom,
}

impl EventKind {
    const fn slot(self) -> usize {
        match self {
            Self::PositionChanged => 0,
            Self::FullscreenProgress => 1,
            Self::DistanceFromBottom => 2,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Handler = Box<dyn FnMut(&DrawerEvent)>;

/// Per-kind handler lists.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    handlers: [SmallVec<[(ObserverId, Handler); 2]>; 3],
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("position_changed", &self.handlers[0].len())
            .field("fullscreen_progress", &self.handlers[1].len())
            .field("distance_from_bottom", &self.handlers[2].len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for events of `kind`.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&DrawerEvent) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.handlers[kind.slot()].push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        for list in &mut self.handlers {
            if let Some(index) = list.iter().position(|(h, _)| *h == id) {
                list.remove(index);
                return true;
            }
        }
        false
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers[kind.slot()].len()
    }

    /// Calls every handler registered for the event's kind, in registration order.
    pub fn emit(&mut self, event: &DrawerEvent) {
        for (_, handler) in &mut self.handlers[event.kind().slot()] {
            handler(event);
        }
    }
}

/// Observer interface for content objects attached to a drawer.
///
/// Every method defaults to a no-op, so content implements only what it cares about.
pub trait DrawerObserver {
    /// The drawer's position was assigned.
    fn position_did_change(&mut self, _position: Position) {}

    /// Fullscreen progress changed (see [`DrawerEvent::FullscreenProgress`]).
    fn fullscreen_progress(&mut self, _progress: f64) {}

    /// Distance from the container bottom changed.
    fn distance_from_bottom(&mut self, _distance: f64) {}
}

impl<T: DrawerObserver + ?Sized> DrawerObserver for Box<T> {
    fn position_did_change(&mut self, position: Position) {
        (**self).position_did_change(position);
    }

    fn fullscreen_progress(&mut self, progress: f64) {
        (**self).fullscreen_progress(progress);
    }

    fn distance_from_bottom(&mut self, distance: f64) {
        (**self).distance_from_bottom(distance);
    }
}

/// Delivers `event` to an observer through the matching trait method.
pub fn deliver(observer: &mut (impl DrawerObserver + ?Sized), event: &DrawerEvent) {
    match *event {
        DrawerEvent::PositionChanged(p) => observer.position_did_change(p),
        DrawerEvent::FullscreenProgress(p) => observer.fullscreen_progress(p),
        DrawerEvent::DistanceFromBottom(d) => observer.distance_from_bottom(d),
    }
}
