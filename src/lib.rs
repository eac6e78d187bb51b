//! # Macro Graph Editor
//!
//! Headless core of a visual node-graph editor for macro and hotkey
//! automation. Users drop trigger, logic, action and device nodes onto a
//! pannable, zoomable canvas and wire typed output pins to input pins.
//!
//! ## Features
//!
//! - **Template catalog** - 29 stock node templates in five categories,
//!   or your own catalog loaded from JSON
//! - **Typed connections** - Output-to-input only, no self loops, no
//!   duplicates, matching data types; extensible via [`LinkValidator`]
//! - **Pan & zoom** - Cursor-anchored wheel zoom with clamped scale
//! - **Batched rendering** - Connection paths recompute at most once per
//!   animation frame and sync straight into a Slint `VecModel`
//! - **Pointer gestures** - Drag or click-click between pins to connect
//!
//! ## Quick Start
//!
//! ```ignore
//! use macro_graph_editor::{EditorConfig, NodeEditorController, TemplateCatalog};
//!
//! let ctrl = NodeEditorController::new(EditorConfig::default(), TemplateCatalog::builtin())?;
//! let timer = ctrl.add_node("input", "Time Trigger", None)?;
//! let block = ctrl.add_node("output", "Block Input", None)?;
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Data types, node templates and categories
//! - [`graph`] - Node instances, connections and validation
//! - [`geometry`] - Node card and pin anchor layout
//! - [`viewport`] - Screen/canvas transform
//! - [`path`] - Connection bezier curves
//! - [`links`] - Frame-batched connection rendering
//! - [`nodes`] - Node card rows for the UI model
//! - [`gesture`] - Pin connection state machine
//! - [`controller`] - Editor context wiring it all to pointer input

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod graph;
pub mod links;
mod model_sync;
pub mod nodes;
pub mod path;
pub mod viewport;

pub use catalog::{DataType, NodeCategory, NodeTemplate, PinSpec, TemplateCatalog};
pub use config::{ConnectionConfig, EditorConfig, PlacementConfig, ViewportConfig};
pub use controller::{NodeEditorController, PointerButton};
pub use error::{CatalogError, ConfigError, GraphResult, Rejection};
pub use geometry::NodeLayout;
pub use gesture::{GestureOutcome, PinGesture};
pub use graph::{
    Connection, ConnectionId, GraphStore, NodeId, NodeInstance, Pin, PinDirection, PinId, PinRef,
    // Link validation framework
    BasicLinkValidator, CompositeValidator, LinkValidator, NoDuplicatesValidator,
    SingleInputValidator, TypeMatchValidator, ValidationResult,
};
pub use hit_test::{
    find_node_at, find_pin_at, NodeGeometry, PinGeometry, SimpleNodeGeometry, SimplePinGeometry,
};
pub use links::{ConnectionPath, ConnectionRenderer};
pub use nodes::{NodeRows, NodeView};
pub use path::{generate_connection_path, generate_stub_path, CubicBezier, MIN_CONTROL_OFFSET};
pub use viewport::Viewport;
