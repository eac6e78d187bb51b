//! Error and outcome types.
//!
//! Graph operations never panic and never abort event handling. An operation
//! the graph refuses comes back as a [`Rejection`] so callers and tests can
//! assert on the reason instead of inspecting side effects.

use crate::catalog::DataType;
use crate::graph::{ConnectionId, NodeId, PinRef};
use thiserror::Error;

/// Reasons a graph operation was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No template with this name exists in the catalog
    #[error("Unknown node template '{0}'")]
    UnknownTemplate(String),
    /// Node does not exist in the graph
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),
    /// Pin does not exist on its node
    #[error("Pin {0} not found")]
    PinNotFound(PinRef),
    /// Both pins live on the same node
    #[error("Cannot connect pins on the same node")]
    SameNode,
    /// Both pins are inputs or both are outputs
    #[error("Must connect an output to an input")]
    IncompatibleDirection,
    /// The canonical connection already exists
    #[error("Connection {0} already exists")]
    DuplicateConnection(ConnectionId),
    /// Output and input carry different data types
    #[error("Type mismatch: output is {output}, input is {input}")]
    TypeMismatch { output: DataType, input: DataType },
    /// Input pin already has its incoming connection
    #[error("Input {0} already has an incoming connection")]
    InputOccupied(PinRef),
    /// Custom validation failure
    #[error("{0}")]
    Custom(String),
}

/// Outcome of a graph operation.
pub type GraphResult<T> = Result<T, Rejection>;

/// Errors raised while loading a template catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Template '{0}' is defined more than once")]
    DuplicateTemplate(String),

    #[error("Template '{template}' references unknown category '{category}'")]
    UnknownCategory { template: String, category: String },
}

/// Errors raised while loading editor configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
