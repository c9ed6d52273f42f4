#![forbid(unsafe_code)]

//! Core value types for dockyard.
//!
//! # Role in dockyard
//! `dockyard-core` holds the small, dependency-light types every layer
//! shares: f64 geometry for bounds tracking and the capability flags a
//! dockable advertises. The tree model and mutation engine live in the
//! `dockyard` crate, which re-exports everything here.

pub mod capability;
pub mod geometry;

pub use capability::DockCapabilities;
pub use geometry::{Point, Rect, Size};
