#![forbid(unsafe_code)]

//! Dock tree model and mutation engine.
//!
//! A docking layout is a tree of [`DockNode`]s stored in a [`DockTree`]
//! arena. Containers (layouts, roots, strips) hold ordered `views`, track a
//! current and default selection, and may anchor floating [`DockWindow`]s
//! that each own a separate root layout.
//!
//! All structural changes go through a [`DockFactory`]:
//!
//! ```
//! use dockyard::{DockFactory, DockKind, DockNode, DockTree};
//!
//! let factory = DockFactory::default();
//! let mut tree = DockTree::new();
//! let root = tree.insert(DockNode::named(DockKind::Root));
//! let strip = factory.add_strip(&mut tree, root).unwrap();
//! let view = factory.add_view(&mut tree, strip).unwrap();
//!
//! let layout = factory.convert_to_layout(&mut tree, strip).unwrap().unwrap();
//! assert_eq!(tree.children(root), &[layout]);
//! assert_eq!(tree.node(view).unwrap().parent(), Some(layout));
//! ```

pub mod config;
pub mod dockable;
pub mod error;
pub mod factory;
pub mod kind;
pub mod node;
pub mod split;
pub mod tracking;
pub mod tree;
pub mod window;

pub use config::{ContextLocator, FactoryConfig, HostLocator, SplitDispatch};
pub use dockable::{Context, Dockable, DockableObserver};
pub use dockyard_core::{DockCapabilities, Point, Rect, Size};
pub use error::DockError;
pub use factory::{DockFactory, FactoryId, LayoutBuilder};
pub use kind::{
    ConversionFields, DockKind, DockOperation, DockSide, NodeId, Orientation, WINDOW_NAME,
    WindowId,
};
pub use node::DockNode;
pub use split::{SplitLayout, WrapSplitLayout};
pub use tracking::BoundsTracker;
pub use tree::DockTree;
pub use window::{DockHost, DockWindow, Host};
