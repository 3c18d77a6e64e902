// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of one layout pass.
//!
//! Coordinates follow the usual UI convention: origin at the container's top-left,
//! `y` growing downwards. The drag surface spans from the top inset to the container
//! bottom; its scrollable content holds the drawer content so that scroll offset `0`
//! shows exactly the lowest stop.

use kurbo::{Rect, RoundedRect, RoundedRectRadii, Size};

use crate::DrawerConfig;
use crate::stops::Stops;

/// Frames and sizes computed by a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawerLayout {
    /// Size of the container.
    pub container: Size,
    /// Drag surface frame, in container coordinates.
    pub surface_frame: Rect,
    /// Scrollable content size of the drag surface.
    pub content_size: Size,
    /// Drawer content frame, in the drag surface's content coordinates.
    pub content_frame: Rect,
    /// Rounded-corner mask for the drawer content, in its local coordinates.
    pub corner_mask: RoundedRect,
    /// Largest offset that still lands on a stop.
    pub max_stop_offset: f64,
}

impl DrawerLayout {
    /// Computes the layout for `container` given the current stops.
    #[must_use]
    pub fn compute(container: Size, stops: &Stops, config: &DrawerConfig) -> Self {
        let width = match config.max_drawer_width {
            Some(max) if container.width > max => max,
            _ => container.width,
        };
        let x0 = (container.width - width) / 2.0;
        let top = config.top_inset;
        let surface_frame = Rect::new(x0, top, x0 + width, container.height);
        let surface_height = surface_frame.height();

        let range = stops.range();
        let content_size = Size::new(width, range + surface_height);
        let content_frame = Rect::new(
            0.0,
            surface_height - stops.lowest_stop(),
            width,
            2.0 * surface_height - stops.lowest_stop(),
        );

        let r = config.corner_radius;
        let corner_mask = RoundedRect::from_rect(
            Rect::new(0.0, 0.0, width, surface_height),
            RoundedRectRadii::new(r, r, 0.0, 0.0),
        );

        Self {
            container,
            surface_frame,
            content_size,
            content_frame,
            corner_mask,
            max_stop_offset: range,
        }
    }

    /// Top edge of the drawer content in container coordinates at `offset`.
    #[must_use]
    pub fn drawer_top(&self, offset: f64) -> f64 {
        self.surface_frame.y0 + self.content_frame.y0 - offset
    }

    /// Drawer content frame in container coordinates at `offset`.
    #[must_use]
    pub fn drawer_frame(&self, offset: f64) -> Rect {
        let top = self.drawer_top(offset);
        Rect::new(
            self.surface_frame.x0,
            top,
            self.surface_frame.x1,
            top + self.content_frame.height(),
        )
    }

    /// Height of the drawer content hidden below the container bottom when the drawer
    /// is `distance_from_bottom` tall.
    #[must_use]
    pub fn bottom_inset(&self, distance_from_bottom: f64) -> f64 {
        (self.content_frame.height() - distance_from_bottom).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PositionSet, StopInputs};

    fn stops(height: f64) -> Stops {
        Stops::compute(
            StopInputs {
                container_height: height,
                top_inset: 50.0,
                collapsed_height: 68.0,
                partial_reveal_height: 264.0,
            },
            PositionSet::all(),
        )
    }

    #[test]
    fn offset_zero_shows_lowest_stop() {
        let layout = DrawerLayout::compute(
            Size::new(400.0, 800.0),
            &stops(800.0),
            &DrawerConfig::default(),
        );
        assert_eq!(layout.surface_frame, Rect::new(0.0, 50.0, 400.0, 800.0));
        // Collapsed: 68 visible above the bottom.
        assert_eq!(layout.drawer_top(0.0), 800.0 - 68.0);
        // Open: top sits at the top inset.
        assert_eq!(layout.drawer_top(682.0), 50.0);
        assert_eq!(layout.max_stop_offset, 682.0);
        // Headroom above the open stop equals the surface height.
        assert_eq!(layout.content_size.height, 682.0 + 750.0);
        assert_eq!(layout.drawer_frame(0.0).height(), 750.0);
    }

    #[test]
    fn wide_containers_center_the_drawer() {
        let config = DrawerConfig {
            max_drawer_width: Some(500.0),
            ..DrawerConfig::default()
        };
        let layout = DrawerLayout::compute(Size::new(1000.0, 800.0), &stops(800.0), &config);
        assert_eq!(layout.surface_frame.x0, 250.0);
        assert_eq!(layout.surface_frame.width(), 500.0);

        let narrow = DrawerLayout::compute(Size::new(300.0, 800.0), &stops(800.0), &config);
        assert_eq!(narrow.surface_frame.width(), 300.0);
    }

    #[test]
    fn corner_mask_rounds_top_corners_only() {
        let layout = DrawerLayout::compute(
            Size::new(400.0, 800.0),
            &stops(800.0),
            &DrawerConfig::default(),
        );
        let radii = layout.corner_mask.radii();
        assert_eq!(radii.top_left, 13.0);
        assert_eq!(radii.top_right, 13.0);
        assert_eq!(radii.bottom_left, 0.0);
        assert_eq!(layout.corner_mask.rect().height(), 750.0);
    }

    #[test]
    fn bottom_inset_is_hidden_height() {
        let layout = DrawerLayout::compute(
            Size::new(400.0, 800.0),
            &stops(800.0),
            &DrawerConfig::default(),
        );
        assert_eq!(layout.bottom_inset(68.0), 682.0);
        assert_eq!(layout.bottom_inset(750.0), 0.0);
        assert_eq!(layout.bottom_inset(900.0), 0.0);
    }
}
