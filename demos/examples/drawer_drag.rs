// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven drawer: a drag gesture without a native scroll surface.
//!
//! This example shows how to:
//! - feed pointer samples to a `DragTracker` and move the drawer while dragging,
//! - hand the release to the controller, which snaps to a stop,
//! - drive transitions with `tick` and route touches against the drawer edge.
//!
//! Run:
//! - `RUST_LOG=understory_drawer=debug cargo run -p understory_demos --example drawer_drag`

use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;
use understory_drawer::content::DrawerContent;
use understory_drawer::drag::DragTracker;
use understory_drawer::events::{DrawerEvent, DrawerObserver, EventKind};
use understory_drawer::{DrawerConfig, DrawerController, Position, PositionSet};

/// A list of search results that prefers a taller partial reveal.
#[derive(Debug, Default)]
struct Results {
    bottom_inset: f64,
}

impl DrawerObserver for Results {
    fn position_did_change(&mut self, position: Position) {
        println!("  results: now {position}");
    }
}

impl DrawerContent for Results {
    fn partial_reveal_height(&self) -> Option<f64> {
        Some(320.0)
    }

    fn supported_positions(&self) -> Option<PositionSet> {
        Some(PositionSet::all() - PositionSet::CLOSED)
    }

    fn set_scroll_bottom_inset(&mut self, inset: f64) {
        self.bottom_inset = inset;
    }
}

/// The map behind the drawer.
#[derive(Debug)]
struct Map;

impl DrawerObserver for Map {}
impl understory_drawer::content::PrimaryContent for Map {}

const FRAME: f64 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut drawer = DrawerController::new(
        Box::new(Map),
        Box::new(Results::default()),
        DrawerConfig::default(),
    );
    drawer.subscribe(EventKind::FullscreenProgress, |event| {
        if let DrawerEvent::FullscreenProgress(p) = event {
            tracing::trace!(progress = p, "fullscreen progress");
        }
    });
    drawer.layout(Size::new(390.0, 844.0));
    println!(
        "laid out: {} at {:.0} from the bottom",
        drawer.position(),
        drawer.distance_from_bottom()
    );

    // A finger drags the drawer up 420 units over 140ms, then lifts.
    let mut tracker = DragTracker::new();
    assert!(drawer.begin_dragging());
    tracker.on_down(drawer.offset(), 0);
    for step in 1..=7_u32 {
        let offset = f64::from(step) * 60.0;
        tracker.on_move(offset, u64::from(step) * 20);
        drawer.scroll_did_change(offset);
    }
    let Some(release) = tracker.on_up(420.0, 150) else {
        return;
    };
    println!(
        "released at {:.0} with velocity {:.0}, projected rest {:.0}",
        release.offset, release.velocity, release.projected_offset
    );

    let outcome = drawer.release_drag(release);
    println!("snap decision: {:?}", outcome.decision.action);

    let mut frames = 0;
    while drawer.tick(FRAME) {
        frames += 1;
    }
    println!(
        "settled after {frames} frames: {} at {:.0} from the bottom, dimming {:.2}",
        drawer.position(),
        drawer.distance_from_bottom(),
        drawer.dimming().alpha
    );

    for point in [Point::new(100.0, 20.0), Point::new(100.0, 400.0)] {
        println!("touch at {point:?} goes to {:?}", drawer.route_touch(point));
    }

    if let Some(position) = drawer.dimming_tapped() {
        while drawer.tick(FRAME) {}
        println!("dimming tapped: drawer moved to {position}");
    }

    if drawer.set_position(Position::Closed, true).is_err() {
        println!("closing is not supported by this content");
    }
}
