//! Timeline widget events.

use crate::entities::MemoryId;

/// Card header clicked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleMemoryEvent(pub MemoryId);

/// "Edit Memory" pressed. No editor exists; the app reports it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditMemoryEvent(pub MemoryId);

/// "Enhance with AI" pressed. Routed to the `MemoryEnhancer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnhanceMemoryEvent(pub MemoryId);

/// Collapse whatever is expanded (Escape)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollapseAllEvent;
