// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawer configuration knobs.

use crate::Position;
use crate::transition::SpringParams;

/// Straight RGBA color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
}

/// Configuration of a [`DrawerController`](crate::DrawerController).
///
/// Use struct update syntax to override individual values:
///
/// ```
/// use understory_drawer::{DrawerConfig, Position};
///
/// let config = DrawerConfig {
///     top_inset: 20.0,
///     initial_position: Position::PartiallyRevealed,
///     ..DrawerConfig::default()
/// };
/// assert_eq!(config.dimming_opacity_max, 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawerConfig {
    /// Space kept free above the drawer when it is open.
    pub top_inset: f64,
    /// Radius of the drawer's top corners.
    pub corner_radius: f64,
    /// Opacity of the drawer shadow. Styling only; carried for the host renderer.
    pub shadow_opacity: f64,
    /// Blur radius of the drawer shadow. Styling only; carried for the host renderer.
    pub shadow_radius: f64,
    /// Color of the dimming surface over the primary content.
    pub dimming_color: Rgba,
    /// Dimming alpha reached when the drawer is fully open.
    pub dimming_opacity_max: f64,
    /// Position assumed before the first layout pass.
    pub initial_position: Position,
    /// Collapsed height used when the drawer content does not provide one.
    pub default_collapsed_height: f64,
    /// Partial-reveal height used when the drawer content does not provide one.
    pub default_partial_reveal_height: f64,
    /// Maximum drawer width; wider containers center the drawer.
    pub max_drawer_width: Option<f64>,
    /// Spring used for animated position changes.
    pub spring: SpringParams,
    /// Duration of the cross-fade when content is swapped with animation.
    pub content_fade_duration: f64,
    /// Whether the user may drag the drawer at all.
    pub allows_user_position_change: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            top_inset: 50.0,
            corner_radius: 13.0,
            shadow_opacity: 0.1,
            shadow_radius: 3.0,
            dimming_color: Rgba::BLACK,
            dimming_opacity_max: 0.5,
            initial_position: Position::Collapsed,
            default_collapsed_height: 68.0,
            default_partial_reveal_height: 264.0,
            max_drawer_width: None,
            spring: SpringParams::default(),
            content_fade_duration: 0.3,
            allows_user_position_change: true,
        }
    }
}

impl DrawerConfig {
    /// Sets the initial position by name, falling back to `Collapsed` for unknown or
    /// missing names (see [`Position::from_name`]).
    #[must_use]
    pub fn with_initial_position_name(mut self, name: Option<&str>) -> Self {
        self.initial_position = Position::from_name(name);
        self
    }
}
