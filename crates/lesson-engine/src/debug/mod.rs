//! Debug panel: named tweakable values a lesson exposes to the user.
//!
//! A panel only holds state. Keys bound to boolean controls flip them, and
//! lessons read the values back each frame.

mod panel;
mod slot;

pub use panel::{Control, ControlValue, DebugPanel};
pub use slot::PanelSlot;
