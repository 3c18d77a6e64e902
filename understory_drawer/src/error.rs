// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use alloc::string::String;

use crate::{Position, PositionSet};

/// A request the controller refused. State is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawerError {
    /// The requested position is not in the supported set.
    #[error("drawer position {requested} is not supported (supported: {supported:?})")]
    UnsupportedPosition {
        /// Position that was requested.
        requested: Position,
        /// Supported set at the time of the request.
        supported: PositionSet,
    },
}

/// Failure to build a controller from a [`DrawerTemplate`](crate::template::DrawerTemplate).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// A named slot holds no content.
    #[error("template slot `{slot}` has no embedded content")]
    MissingContent {
        /// Name of the slot.
        slot: String,
    },
    /// A named slot holds more than one content object.
    #[error("template slot `{slot}` has {count} embedded contents, expected exactly one")]
    AmbiguousContent {
        /// Name of the slot.
        slot: String,
        /// Number of content objects found.
        count: usize,
    },
}
