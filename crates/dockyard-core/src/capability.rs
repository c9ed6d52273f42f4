#![forbid(unsafe_code)]

//! User-facing capabilities of a dockable.

use bitflags::bitflags;

bitflags! {
    /// What the user is allowed to do with a dockable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DockCapabilities: u8 {
        /// No capabilities.
        const NONE  = 0b000;
        /// Can be closed.
        const CLOSE = 0b001;
        /// Can be pinned to a side bar.
        const PIN   = 0b010;
        /// Can be torn off into a floating window.
        const FLOAT = 0b100;
    }
}

impl Default for DockCapabilities {
    /// Everything is allowed until a caller opts out.
    fn default() -> Self {
        Self::all()
    }
}
