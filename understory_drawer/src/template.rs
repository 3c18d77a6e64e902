// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative construction from named content slots.
//!
//! A [`DrawerTemplate`] mirrors a design-time description of the drawer: two named
//! container slots into which content has been embedded. Building a controller from it
//! requires exactly one content object per slot.
//!
//! ```
//! use understory_drawer::content::EmptyContent;
//! use understory_drawer::template::DrawerTemplate;
//! use understory_drawer::{DrawerConfig, DrawerController, TemplateError};
//!
//! let mut template = DrawerTemplate::new();
//! template.embed_primary(Box::new(EmptyContent));
//! let err = DrawerController::from_template(template, DrawerConfig::default()).unwrap_err();
//! assert_eq!(err, TemplateError::MissingContent { slot: "drawer".into() });
//! ```

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::content::{DrawerContent, PrimaryContent};
use crate::error::TemplateError;

/// Default name of the slot holding the primary content.
pub const PRIMARY_SLOT: &str = "primary";
/// Default name of the slot holding the drawer content.
pub const DRAWER_SLOT: &str = "drawer";

/// Content embedded in named slots, awaiting controller construction.
pub struct DrawerTemplate {
    primary_slot: String,
    drawer_slot: String,
    primary: Vec<Box<dyn PrimaryContent>>,
    drawer: Vec<Box<dyn DrawerContent>>,
}

impl fmt::Debug for DrawerTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerTemplate")
            .field("primary_slot", &self.primary_slot)
            .field("drawer_slot", &self.drawer_slot)
            .field("primary", &self.primary.len())
            .field("drawer", &self.drawer.len())
            .finish()
    }
}

impl Default for DrawerTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawerTemplate {
    /// Creates an empty template with the default slot names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_slot_names(PRIMARY_SLOT, DRAWER_SLOT)
    }

    /// Creates an empty template with custom slot names, used in error reports.
    #[must_use]
    pub fn with_slot_names(primary: impl Into<String>, drawer: impl Into<String>) -> Self {
        Self {
            primary_slot: primary.into(),
            drawer_slot: drawer.into(),
            primary: Vec::new(),
            drawer: Vec::new(),
        }
    }

    /// Embeds content into the primary slot.
    pub fn embed_primary(&mut self, content: Box<dyn PrimaryContent>) -> &mut Self {
        self.primary.push(content);
        self
    }

    /// Embeds content into the drawer slot.
    pub fn embed_drawer(&mut self, content: Box<dyn DrawerContent>) -> &mut Self {
        self.drawer.push(content);
        self
    }

    /// Takes the single content of each slot.
    pub(crate) fn into_contents(
        self,
    ) -> Result<(Box<dyn PrimaryContent>, Box<dyn DrawerContent>), TemplateError> {
        let primary = single(self.primary, &self.primary_slot)?;
        let drawer = single(self.drawer, &self.drawer_slot)?;
        Ok((primary, drawer))
    }
}

fn single<T>(mut items: Vec<T>, slot: &str) -> Result<T, TemplateError> {
    match items.len() {
        1 => Ok(items.remove(0)),
        0 => Err(TemplateError::MissingContent { slot: slot.into() }),
        count => Err(TemplateError::AmbiguousContent {
            slot: slot.into(),
            count,
        }),
    }
}
