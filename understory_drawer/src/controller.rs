// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawer controller: owns the position state and composes stops, snapping,
//! progress and transitions in response to host events.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::content::{DrawerContent, PrimaryContent};
use crate::drag::DragRelease;
use crate::error::{DrawerError, TemplateError};
use crate::events::{DrawerEvent, EventBus, EventKind, ObserverId, deliver};
use crate::layout::DrawerLayout;
use crate::progress::{Dimming, ProgressPublisher};
use crate::routing::{self, ContentSlot, TouchTarget};
use crate::snap::{self, SnapAction, SnapDecision};
use crate::stops::{StopInputs, Stops};
use crate::template::DrawerTemplate;
use crate::transition::{Fade, SpringTransition, TransitionHandle};
use crate::{DrawerConfig, Position, PositionSet};

/// Offset at or below which a decelerated drawer counts as resting on its lowest stop.
pub const REST_THRESHOLD: f64 = 5.0;

type Completion = Box<dyn FnOnce(bool)>;

struct ActiveTransition {
    spring: SpringTransition,
    completion: Option<Completion>,
}

/// Result of [`DrawerController::will_end_dragging`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapOutcome {
    /// Offset the host's scroll surface should come to rest at. Equals the current
    /// offset when the native deceleration is frozen.
    pub target_offset: f64,
    /// The underlying snap decision.
    pub decision: SnapDecision,
}

/// Headless drawer controller.
///
/// The host reports layout, scroll and time events; the controller keeps the current
/// [`Position`], the scroll offset, and the dimming state, and notifies observers.
///
/// Observers are notified in a fixed order: handlers registered with
/// [`subscribe`](Self::subscribe) in registration order, then the drawer content, then
/// the primary content.
///
/// ```
/// use kurbo::Size;
/// use understory_drawer::content::EmptyContent;
/// use understory_drawer::{DrawerConfig, DrawerController, Position};
///
/// let mut drawer = DrawerController::new(
///     Box::new(EmptyContent),
///     Box::new(EmptyContent),
///     DrawerConfig::default(),
/// );
/// drawer.layout(Size::new(400.0, 800.0));
/// assert_eq!(drawer.distance_from_bottom(), 68.0);
///
/// drawer.set_position(Position::Open, true).unwrap();
/// while drawer.tick(1.0 / 60.0) {}
/// assert_eq!(drawer.distance_from_bottom(), 750.0);
/// ```
pub struct DrawerController {
    config: DrawerConfig,
    primary: Box<dyn PrimaryContent>,
    drawer: Box<dyn DrawerContent>,
    events: EventBus,

    position: Position,
    supported: PositionSet,
    container: Option<Size>,
    layout: Option<DrawerLayout>,
    offset: f64,
    progress: ProgressPublisher,

    bounces: bool,
    drag_enabled: bool,
    dragging: bool,
    pending_snap: Option<Position>,

    transition: Option<ActiveTransition>,
    next_transition: u64,
    primary_fade: Option<Fade>,
    drawer_fade: Option<Fade>,
}

impl fmt::Debug for DrawerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerController")
            .field("position", &self.position)
            .field("supported", &self.supported)
            .field("offset", &self.offset)
            .field("container", &self.container)
            .field("dragging", &self.dragging)
            .field("pending_snap", &self.pending_snap)
            .field("animating", &self.transition.is_some())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl DrawerController {
    /// Creates a controller over the given contents.
    ///
    /// The drawer content's supported positions are read here. The initial position is
    /// taken from the configuration when supported, otherwise the lowest supported one.
    #[must_use]
    pub fn new(
        primary: Box<dyn PrimaryContent>,
        drawer: Box<dyn DrawerContent>,
        config: DrawerConfig,
    ) -> Self {
        let supported = normalize(
            drawer
                .supported_positions()
                .unwrap_or_else(PositionSet::all),
        );
        let position = if supported.contains_position(config.initial_position) {
            config.initial_position
        } else {
            supported.lowest()
        };
        let progress = ProgressPublisher::new(config.dimming_opacity_max);
        Self {
            config,
            primary,
            drawer,
            events: EventBus::new(),
            position,
            supported,
            container: None,
            layout: None,
            offset: 0.0,
            progress,
            bounces: true,
            drag_enabled: supported.count() > 1,
            dragging: false,
            pending_snap: None,
            transition: None,
            next_transition: 0,
            primary_fade: None,
            drawer_fade: None,
        }
    }

    /// Creates a controller from content embedded in a template.
    ///
    /// Each slot must hold exactly one content object; otherwise no controller is built.
    pub fn from_template(
        template: DrawerTemplate,
        config: DrawerConfig,
    ) -> Result<Self, TemplateError> {
        let (primary, drawer) = template.into_contents()?;
        Ok(Self::new(primary, drawer, config))
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &DrawerConfig {
        &self.config
    }

    /// The current position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The supported positions.
    #[must_use]
    pub const fn supported_positions(&self) -> PositionSet {
        self.supported
    }

    /// Current scroll offset of the drag surface.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Visible drawer height above the container bottom.
    #[must_use]
    pub fn distance_from_bottom(&self) -> f64 {
        self.stops().distance_from_bottom(self.offset)
    }

    /// Geometry of the last layout pass, if any.
    #[must_use]
    pub const fn layout_geometry(&self) -> Option<&DrawerLayout> {
        self.layout.as_ref()
    }

    /// Drawer content frame in container coordinates, once laid out.
    #[must_use]
    pub fn drawer_frame(&self) -> Option<Rect> {
        self.layout.as_ref().map(|l| l.drawer_frame(self.offset))
    }

    /// Current dimming state.
    #[must_use]
    pub const fn dimming(&self) -> Dimming {
        self.progress.dimming()
    }

    /// Whether elastic overscroll is enabled on the drag surface.
    #[must_use]
    pub const fn bounces(&self) -> bool {
        self.bounces
    }

    /// Whether the user can drag the drawer.
    #[must_use]
    pub const fn is_drag_enabled(&self) -> bool {
        self.drag_enabled && self.config.allows_user_position_change
    }

    /// Returns `true` while a position transition is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Position that will be animated to when the current drag ends, if any.
    #[must_use]
    pub const fn pending_snap(&self) -> Option<Position> {
        self.pending_snap
    }

    /// The content that owns position-dependent chrome such as the status bar style.
    #[must_use]
    pub fn chrome_owner(&self) -> ContentSlot {
        routing::chrome_owner(self.position)
    }

    /// Opacity of the content in `slot`; below `1` while a swap cross-fades it in.
    #[must_use]
    pub fn content_alpha(&self, slot: ContentSlot) -> f64 {
        let fade = match slot {
            ContentSlot::Primary => self.primary_fade,
            ContentSlot::Drawer => self.drawer_fade,
        };
        fade.map_or(1.0, |f| f.alpha())
    }

    /// The primary content.
    #[must_use]
    pub fn primary_content(&self) -> &dyn PrimaryContent {
        &*self.primary
    }

    /// The drawer content.
    #[must_use]
    pub fn drawer_content(&self) -> &dyn DrawerContent {
        &*self.drawer
    }

    /// Registers an event handler.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&DrawerEvent) + 'static,
    ) -> ObserverId {
        self.events.subscribe(kind, handler)
    }

    /// Removes an event handler.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Inputs for the stop calculation, with content heights polled now.
    #[must_use]
    pub fn stop_inputs(&self) -> StopInputs {
        StopInputs {
            container_height: self.container.map_or(0.0, |c| c.height),
            top_inset: self.config.top_inset,
            collapsed_height: self
                .drawer
                .collapsed_height()
                .unwrap_or(self.config.default_collapsed_height),
            partial_reveal_height: self
                .drawer
                .partial_reveal_height()
                .unwrap_or(self.config.default_partial_reveal_height),
        }
    }

    /// Current stops.
    #[must_use]
    pub fn stops(&self) -> Stops {
        Stops::compute(self.stop_inputs(), self.supported)
    }

    // --- Position assignment -------------------------------------------------------

    /// Moves the drawer to `target`.
    ///
    /// Unsupported targets are refused with a warning and leave all state untouched.
    /// Observers see the new position immediately, also when animating. An animated
    /// change returns the handle of its transition; any transition still running is
    /// cancelled first.
    pub fn set_position(
        &mut self,
        target: Position,
        animated: bool,
    ) -> Result<Option<TransitionHandle>, DrawerError> {
        self.assign_position(target, animated, None)
    }

    /// Like [`set_position`](Self::set_position), calling `completion` once the move
    /// ends: with `true` when it reached its target, `false` when it was cancelled or
    /// superseded. Not called when the request is refused.
    pub fn set_position_with_completion(
        &mut self,
        target: Position,
        animated: bool,
        completion: impl FnOnce(bool) + 'static,
    ) -> Result<Option<TransitionHandle>, DrawerError> {
        self.assign_position(target, animated, Some(Box::new(completion)))
    }

    fn assign_position(
        &mut self,
        target: Position,
        animated: bool,
        completion: Option<Completion>,
    ) -> Result<Option<TransitionHandle>, DrawerError> {
        if !self.supported.contains_position(target) {
            tracing::warn!(
                requested = %target,
                supported = ?self.supported,
                "ignoring request for unsupported drawer position"
            );
            return Err(DrawerError::UnsupportedPosition {
                requested: target,
                supported: self.supported,
            });
        }

        self.end_transition(false);
        self.position = target;

        if self.layout.is_none() {
            self.notify(DrawerEvent::PositionChanged(target));
            if let Some(completion) = completion {
                completion(true);
            }
            return Ok(None);
        }

        let to = self.stops().offset_for(target);
        self.update_bottom_inset(target);

        if animated {
            tracing::debug!(%target, from = self.offset, to, "starting drawer transition");
            self.notify(DrawerEvent::PositionChanged(target));
            Ok(Some(self.start_spring(to, completion)))
        } else {
            self.apply_offset(to);
            self.notify(DrawerEvent::PositionChanged(target));
            if let Some(completion) = completion {
                completion(true);
            }
            Ok(None)
        }
    }

    /// Cancels the transition identified by `handle`, leaving the drawer where it is.
    ///
    /// Returns `false` if that transition already ended.
    pub fn cancel_transition(&mut self, handle: TransitionHandle) -> bool {
        if self
            .transition
            .as_ref()
            .is_some_and(|t| t.spring.handle() == handle)
        {
            self.end_transition(false);
            true
        } else {
            false
        }
    }

    /// Starts a spring from the current offset to `to`, replacing any running one.
    fn start_spring(&mut self, to: f64, completion: Option<Completion>) -> TransitionHandle {
        self.end_transition(false);
        let handle = TransitionHandle(self.next_transition);
        self.next_transition += 1;
        self.transition = Some(ActiveTransition {
            spring: SpringTransition::new(handle, self.offset, to, self.config.spring),
            completion,
        });
        handle
    }

    fn end_transition(&mut self, finished: bool) {
        if let Some(mut transition) = self.transition.take() {
            if !finished {
                let handle = transition.spring.handle();
                tracing::debug!(?handle, "drawer transition cancelled");
            }
            if let Some(completion) = transition.completion.take() {
                completion(finished);
            }
        }
    }

    /// Advances running transitions and cross-fades by `dt` seconds.
    ///
    /// Returns `true` while anything is still animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        if let Some(transition) = self.transition.as_mut() {
            let step = transition.spring.advance(dt);
            self.apply_offset(step.value);
            if step.finished {
                self.end_transition(true);
            }
        }
        for fade in [&mut self.primary_fade, &mut self.drawer_fade] {
            if let Some(f) = fade {
                f.advance(dt);
                if f.is_finished() {
                    *fade = None;
                }
            }
        }
        self.transition.is_some() || self.primary_fade.is_some() || self.drawer_fade.is_some()
    }

    // --- Supported positions ------------------------------------------------------

    /// Replaces the supported positions.
    ///
    /// An empty set is replaced by all positions. If the current position is no longer
    /// supported the drawer moves, without animation, to the lowest supported position.
    /// Dragging is disabled when only one position remains.
    pub fn set_supported_positions(&mut self, positions: PositionSet) {
        let positions = normalize(positions);
        tracing::debug!(supported = ?positions, "drawer supported positions changed");
        self.supported = positions;
        self.drag_enabled = positions.count() > 1;
        self.update_geometry();

        let target = if positions.contains_position(self.position) {
            self.position
        } else {
            positions.lowest()
        };
        self.reapply_position(target);
    }

    /// Re-reads the supported positions declared by the drawer content.
    pub fn refresh_supported_positions(&mut self) {
        let declared = self
            .drawer
            .supported_positions()
            .unwrap_or_else(PositionSet::all);
        self.set_supported_positions(declared);
    }

    // --- Content ------------------------------------------------------------------

    /// Swaps the primary content, returning the previous one.
    pub fn set_primary_content(
        &mut self,
        content: Box<dyn PrimaryContent>,
        animated: bool,
    ) -> Box<dyn PrimaryContent> {
        self.primary_fade = animated.then(|| Fade::new(self.config.content_fade_duration));
        core::mem::replace(&mut self.primary, content)
    }

    /// Swaps the drawer content, returning the previous one.
    ///
    /// The new content's supported positions and heights take effect immediately and the
    /// current position is re-applied.
    pub fn set_drawer_content(
        &mut self,
        content: Box<dyn DrawerContent>,
        animated: bool,
    ) -> Box<dyn DrawerContent> {
        self.drawer_fade = animated.then(|| Fade::new(self.config.content_fade_duration));
        let previous = core::mem::replace(&mut self.drawer, content);
        self.refresh_supported_positions();
        previous
    }

    // --- Layout -------------------------------------------------------------------

    /// Runs a layout pass for a container of the given size.
    ///
    /// Stops are recomputed from the current content heights and the drawer is put back
    /// on the stop of its current position. A running transition is retargeted instead,
    /// and an active drag is left alone.
    pub fn layout(&mut self, container: Size) {
        self.container = Some(container);
        self.update_geometry();
        self.reapply_position(self.position);
    }

    fn update_geometry(&mut self) {
        if let Some(container) = self.container {
            let layout = DrawerLayout::compute(container, &self.stops(), &self.config);
            self.layout = Some(layout);
        }
    }

    fn reapply_position(&mut self, target: Position) {
        if self.dragging && target == self.position {
            return;
        }
        if target == self.position && self.layout.is_some() {
            let to = self.stops().offset_for(target);
            if let Some(transition) = self.transition.as_mut() {
                let spring = &mut transition.spring;
                *spring =
                    SpringTransition::new(spring.handle(), self.offset, to, self.config.spring);
                self.update_bottom_inset(target);
                return;
            }
        }
        // The target is supported here, so the assignment cannot be refused.
        let _ = self.assign_position(target, false, None);
    }

    // --- Scroll surface hooks -------------------------------------------------------

    /// The user started dragging the drawer.
    ///
    /// Refused (returning `false`) when dragging is disabled or a snap from the previous
    /// drag is still pending. A running transition is cancelled.
    pub fn begin_dragging(&mut self) -> bool {
        if !self.is_drag_enabled() || self.pending_snap.is_some() {
            return false;
        }
        self.end_transition(false);
        self.dragging = true;
        true
    }

    /// The drag surface's offset changed.
    pub fn scroll_did_change(&mut self, offset: f64) {
        self.apply_offset(offset);
    }

    /// The user lifted the finger with `velocity`; without intervention the surface
    /// would come to rest at `proposed_target_offset`.
    ///
    /// Decides the snap target. When the decision freezes native deceleration, the
    /// returned target offset is the current offset and the animated snap runs from
    /// [`did_end_dragging`](Self::did_end_dragging). When the surface is left to settle
    /// by itself on an extreme stop, the position is assigned right away.
    pub fn will_end_dragging(
        &mut self,
        velocity: f64,
        proposed_target_offset: f64,
    ) -> SnapOutcome {
        let decision = snap::resolve(&self.stops(), proposed_target_offset);
        tracing::debug!(
            velocity,
            proposed_target_offset,
            action = ?decision.action,
            "drawer drag released"
        );
        let target_offset = match decision.action {
            SnapAction::Animate(position) => {
                self.pending_snap = Some(position);
                self.offset
            }
            SnapAction::Settle(position) => {
                self.pending_snap = None;
                self.position = position;
                self.update_bottom_inset(position);
                self.notify(DrawerEvent::PositionChanged(position));
                proposed_target_offset
            }
            SnapAction::None => {
                self.pending_snap = None;
                proposed_target_offset
            }
        };
        SnapOutcome {
            target_offset,
            decision,
        }
    }

    /// The drag's interactive phase ended. Runs the pending snap, if any, exactly once.
    ///
    /// Returns the position snapped to.
    pub fn did_end_dragging(&mut self) -> Option<Position> {
        self.dragging = false;
        let target = self.pending_snap.take()?;
        self.assign_position(target, true, None).ok()?;
        Some(target)
    }

    /// The drag surface finished decelerating.
    ///
    /// Resting on the lowest stop turns elastic overscroll off until the drawer is moved
    /// away from it again.
    pub fn did_end_decelerating(&mut self) {
        if self.offset <= REST_THRESHOLD {
            self.bounces = false;
        }
    }

    /// Completes a drag for hosts without a native scroll surface.
    ///
    /// Runs [`will_end_dragging`](Self::will_end_dragging) and
    /// [`did_end_dragging`](Self::did_end_dragging), then, unless a snap animation was
    /// started, springs the drawer to where the surface would have settled: the settled
    /// stop, or the projected offset clamped to the stop range.
    pub fn release_drag(&mut self, release: DragRelease) -> SnapOutcome {
        let outcome = self.will_end_dragging(release.velocity, release.projected_offset);
        self.did_end_dragging();
        if !outcome.decision.action.freezes() {
            let stops = self.stops();
            let to = match outcome.decision.action {
                SnapAction::Settle(position) => stops.offset_for(position),
                _ => outcome.target_offset.clamp(0.0, stops.range()),
            };
            self.start_spring(to, None);
        }
        outcome
    }

    // --- Touches ------------------------------------------------------------------

    /// Routes a touch at `point` (container coordinates).
    ///
    /// Before the first layout pass every touch goes to the primary content.
    #[must_use]
    pub fn route_touch(&self, point: Point) -> TouchTarget {
        match &self.layout {
            Some(layout) => routing::route_touch(
                point,
                layout.drawer_top(self.offset),
                self.position,
                self.supported,
            ),
            None => TouchTarget::PrimaryContent,
        }
    }

    /// The dimming surface was tapped.
    ///
    /// When the drawer acts as open it animates down: to `PartiallyRevealed` from
    /// `Open` if supported, otherwise to `Collapsed`. Returns the new position.
    pub fn dimming_tapped(&mut self) -> Option<Position> {
        if !routing::acts_as_open(self.position, self.supported) {
            return None;
        }
        let target = if self.position == Position::Open
            && self.supported.contains_position(Position::PartiallyRevealed)
        {
            Position::PartiallyRevealed
        } else {
            Position::Collapsed
        };
        self.assign_position(target, true, None).ok()?;
        Some(target)
    }

    // --- Internals ----------------------------------------------------------------

    /// Tells the drawer content how much of it hides below the container edge when
    /// resting in `position`.
    fn update_bottom_inset(&mut self, position: Position) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let inset = layout.bottom_inset(self.stops().inputs().height_of(position));
        self.drawer.set_scroll_bottom_inset(inset);
    }

    fn apply_offset(&mut self, offset: f64) {
        self.offset = offset;
        let frame = self.progress.update(&self.stops(), offset);
        tracing::trace!(
            offset,
            distance = frame.distance_from_bottom,
            "drawer offset"
        );
        if frame.reenable_bounce {
            self.bounces = true;
        }
        if let Some(progress) = frame.fullscreen_progress {
            self.notify(DrawerEvent::FullscreenProgress(progress));
        }
        self.notify(DrawerEvent::DistanceFromBottom(frame.distance_from_bottom));
    }

    fn notify(&mut self, event: DrawerEvent) {
        self.events.emit(&event);
        deliver(&mut *self.drawer, &event);
        deliver(&mut *self.primary, &event);
    }
}

fn normalize(positions: PositionSet) -> PositionSet {
    if positions.is_empty() {
        tracing::warn!("empty supported drawer positions, allowing all");
        PositionSet::all()
    } else {
        positions
    }
}
