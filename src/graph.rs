//! Node graph store: node instances, typed pins and connections.
//!
//! [`GraphStore`] exclusively owns every [`NodeInstance`] and [`Connection`].
//! Operations return a [`GraphResult`]; a refused operation leaves the store
//! untouched and reports a [`Rejection`].
//!
//! ```ignore
//! let mut graph = GraphStore::new(TemplateCatalog::builtin(), PlacementConfig::default());
//! let timer = graph.add_node("input", "Time Trigger", Some((100.0, 150.0)))?;
//! let branch = graph.add_node("logic", "Condition", Some((350.0, 150.0)))?;
//!
//! // Time Trigger `tick` (flow) -> Condition `input` (flow)
//! graph.create_connection(&PinRef::output(timer, 0), &PinRef::input(branch, 1))?;
//! ```

use crate::catalog::{DataType, NodeTemplate, PinSpec, TemplateCatalog};
use crate::config::PlacementConfig;
use crate::error::{GraphResult, Rejection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::fmt;

/// Node identity, displayed as `node-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PinDirection {
    Input,
    Output,
}

impl PinDirection {
    fn prefix(&self) -> &'static str {
        match self {
            PinDirection::Input => "in",
            PinDirection::Output => "out",
        }
    }
}

/// Pin identity local to its node, displayed as `in-<i>` / `out-<i>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId {
    pub direction: PinDirection,
    pub index: usize,
}

impl PinId {
    pub fn input(index: usize) -> Self {
        Self {
            direction: PinDirection::Input,
            index,
        }
    }

    pub fn output(index: usize) -> Self {
        Self {
            direction: PinDirection::Output,
            index,
        }
    }

    pub fn is_output(&self) -> bool {
        self.direction == PinDirection::Output
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.direction.prefix(), self.index)
    }
}

/// Graph-wide pin reference, displayed as `node-<n>-in-<i>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinRef {
    pub node: NodeId,
    pub pin: PinId,
}

impl PinRef {
    pub fn new(node: NodeId, pin: PinId) -> Self {
        Self { node, pin }
    }

    pub fn input(node: NodeId, index: usize) -> Self {
        Self::new(node, PinId::input(index))
    }

    pub fn output(node: NodeId, index: usize) -> Self {
        Self::new(node, PinId::output(index))
    }

    pub fn direction(&self) -> PinDirection {
        self.pin.direction
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.node, self.pin)
    }
}

/// A concrete pin on a node instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    pub local_id: PinId,
    /// `<node>-<local>`, unique across the graph
    pub global_id: String,
    pub name: String,
    pub data_type: DataType,
}

impl Pin {
    pub fn direction(&self) -> PinDirection {
        self.local_id.direction
    }
}

/// A node placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInstance {
    pub id: NodeId,
    pub template: String,
    pub category: String,
    pub icon: String,
    /// Top-left corner in canvas space
    pub x: f32,
    pub y: f32,
    pub inputs: Vec<Pin>,
    pub outputs: Vec<Pin>,
}

impl NodeInstance {
    fn from_template(id: NodeId, category: &str, template: &NodeTemplate, x: f32, y: f32) -> Self {
        let pins = |specs: &[PinSpec], make: fn(usize) -> PinId| -> Vec<Pin> {
            specs
                .iter()
                .enumerate()
                .map(|(i, spec)| {
                    let local_id = make(i);
                    Pin {
                        local_id,
                        global_id: PinRef::new(id, local_id).to_string(),
                        name: spec.name.clone(),
                        data_type: spec.data_type,
                    }
                })
                .collect()
        };

        Self {
            id,
            template: template.name.clone(),
            category: category.to_string(),
            icon: template.icon.clone(),
            x,
            y,
            inputs: pins(&template.inputs, PinId::input),
            outputs: pins(&template.outputs, PinId::output),
        }
    }

    /// Look up a pin by its local id.
    pub fn pin(&self, id: &PinId) -> Option<&Pin> {
        match id.direction {
            PinDirection::Input => self.inputs.get(id.index),
            PinDirection::Output => self.outputs.get(id.index),
        }
    }

    /// Look up a pin by name within one direction.
    pub fn pin_named(&self, direction: PinDirection, name: &str) -> Option<PinRef> {
        let pins = match direction {
            PinDirection::Input => &self.inputs,
            PinDirection::Output => &self.outputs,
        };
        pins.iter()
            .find(|p| p.name == name)
            .map(|p| PinRef::new(self.id, p.local_id))
    }

    /// Number of pin rows the node card needs.
    pub fn pin_rows(&self) -> usize {
        self.inputs.len().max(self.outputs.len())
    }
}

/// Canonical connection identity: `<outNode>-<outPin>-<inNode>-<inPin>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn between(output: &PinRef, input: &PinRef) -> Self {
        Self(format!("{}-{}", output, input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Directed edge from an output pin to an input pin on another node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: PinRef,
    pub to: PinRef,
    pub data_type: DataType,
}

/// Order two pin refs as (output, input).
///
/// Returns `None` when both pins have the same direction.
pub fn normalize_direction(a: &PinRef, b: &PinRef) -> Option<(PinRef, PinRef)> {
    match (a.direction(), b.direction()) {
        (PinDirection::Output, PinDirection::Input) => Some((*a, *b)),
        (PinDirection::Input, PinDirection::Output) => Some((*b, *a)),
        _ => None,
    }
}

/// Owner of all nodes and connections of one editor.
pub struct GraphStore {
    catalog: TemplateCatalog,
    nodes: BTreeMap<NodeId, NodeInstance>,
    connections: Vec<Connection>,
    next_id: u32,
    placement: PlacementConfig,
    rng: StdRng,
    validator: CompositeValidator,
}

impl GraphStore {
    pub fn new(catalog: TemplateCatalog, placement: PlacementConfig) -> Self {
        let rng = match placement.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            catalog,
            nodes: BTreeMap::new(),
            connections: Vec::new(),
            next_id: 0,
            placement,
            rng,
            validator: CompositeValidator::standard(),
        }
    }

    /// Builtin catalog, default placement.
    pub fn with_builtin_catalog() -> Self {
        Self::new(TemplateCatalog::builtin(), PlacementConfig::default())
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Append a validator that runs after the standard checks.
    pub fn add_validator<V: LinkValidator + 'static>(&mut self, validator: V) {
        self.validator = std::mem::take(&mut self.validator).add(validator);
    }

    /// Instantiate a template.
    ///
    /// The node lands at `at` (or the configured default position) plus a
    /// random offset in `[0, jitter)` on each axis so repeated adds don't
    /// stack exactly on top of each other.
    pub fn add_node(
        &mut self,
        category: &str,
        template_name: &str,
        at: Option<(f32, f32)>,
    ) -> GraphResult<NodeId> {
        let Some(template) = self.catalog.get(template_name) else {
            log::warn!("add_node: unknown template '{}'", template_name);
            return Err(Rejection::UnknownTemplate(template_name.to_string()));
        };
        let template = template.clone();

        self.next_id += 1;
        let id = NodeId::new(self.next_id);

        let (x, y) = at.unwrap_or((self.placement.default_x, self.placement.default_y));
        let x = x + self.jitter();
        let y = y + self.jitter();

        let node = NodeInstance::from_template(id, category, &template, x, y);
        log::debug!(
            "added {} '{}' at ({:.1}, {:.1}) with {} inputs / {} outputs",
            id,
            template.name,
            x,
            y,
            node.inputs.len(),
            node.outputs.len()
        );
        self.nodes.insert(id, node);
        Ok(id)
    }

    fn jitter(&mut self) -> f32 {
        if self.placement.jitter > 0.0 && self.placement.jitter.is_finite() {
            self.rng.random_range(0.0..self.placement.jitter)
        } else {
            0.0
        }
    }

    /// Run the validator chain without changing anything.
    pub fn check_connection(&self, a: &PinRef, b: &PinRef) -> ValidationResult {
        self.validator.validate(a, b, self)
    }

    /// Connect two pins. Argument order does not matter; the output side is
    /// detected from the pin directions.
    pub fn create_connection(&mut self, a: &PinRef, b: &PinRef) -> GraphResult<ConnectionId> {
        if let ValidationResult::Invalid(reason) = self.check_connection(a, b) {
            log::warn!("connection {} <-> {} rejected: {}", a, b, reason);
            return Err(reason);
        }

        let (output, input) = normalize_direction(a, b).ok_or(Rejection::IncompatibleDirection)?;
        let data_type = self
            .pin(&output)
            .map(|p| p.data_type)
            .ok_or(Rejection::PinNotFound(output))?;

        let id = ConnectionId::between(&output, &input);
        log::debug!("connected {} ({})", id, data_type);
        self.connections.push(Connection {
            id: id.clone(),
            from: output,
            to: input,
            data_type,
        });
        Ok(id)
    }

    /// Translate a node by a canvas-space delta.
    pub fn move_node(&mut self, id: NodeId, dx: f32, dy: f32) -> GraphResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(Rejection::NodeNotFound(id))?;
        node.x += dx;
        node.y += dy;
        Ok(())
    }

    /// Drop every node and connection and restart numbering at `node-1`.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing graph ({} nodes, {} connections)",
            self.nodes.len(),
            self.connections.len()
        );
        self.nodes.clear();
        self.connections.clear();
        self.next_id = 0;
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeInstance> {
        self.nodes.get(&id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeInstance> + '_ {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pin(&self, pin: &PinRef) -> Option<&Pin> {
        self.nodes.get(&pin.node)?.pin(&pin.pin)
    }

    /// Connections in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections touching a node on either end.
    pub fn connections_of(&self, node: NodeId) -> impl Iterator<Item = &Connection> + '_ {
        self.connections
            .iter()
            .filter(move |c| c.from.node == node || c.to.node == node)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }
}

// ============================================================================
// Link Validation Framework
// ============================================================================

/// Result of link validation with optional rejection reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Link is valid
    Valid,
    /// Link is invalid with a reason
    Invalid(Rejection),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Combine two results (AND logic): returns first error if any
    pub fn and(self, other: ValidationResult) -> ValidationResult {
        match self {
            ValidationResult::Valid => other,
            invalid => invalid,
        }
    }

    pub fn into_result(self) -> GraphResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(reason) => Err(reason),
        }
    }
}

/// A rule deciding whether two pins may be connected.
///
/// Pins arrive in the order the user picked them; use
/// [`normalize_direction`] to get the (output, input) pair.
///
/// # Example
///
/// ```ignore
/// struct NoFlowIntoOutputs;
///
/// impl LinkValidator for NoFlowIntoOutputs {
///     fn validate(&self, a: &PinRef, b: &PinRef, graph: &GraphStore) -> ValidationResult {
///         // Custom validation logic
///         ValidationResult::Valid
///     }
/// }
/// ```
pub trait LinkValidator {
    fn validate(&self, a: &PinRef, b: &PinRef, graph: &GraphStore) -> ValidationResult;
}

/// Structural checks: opposite directions, different nodes, both pins exist.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicLinkValidator;

impl LinkValidator for BasicLinkValidator {
    fn validate(&self, a: &PinRef, b: &PinRef, graph: &GraphStore) -> ValidationResult {
        if a.direction() == b.direction() {
            return ValidationResult::Invalid(Rejection::IncompatibleDirection);
        }
        if a.node == b.node {
            return ValidationResult::Invalid(Rejection::SameNode);
        }
        for pin in [a, b] {
            let Some(node) = graph.node(pin.node) else {
                return ValidationResult::Invalid(Rejection::NodeNotFound(pin.node));
            };
            if node.pin(&pin.pin).is_none() {
                return ValidationResult::Invalid(Rejection::PinNotFound(*pin));
            }
        }
        ValidationResult::Valid
    }
}

/// Rejects a connection whose canonical id is already stored.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDuplicatesValidator;

impl LinkValidator for NoDuplicatesValidator {
    fn validate(&self, a: &PinRef, b: &PinRef, graph: &GraphStore) -> ValidationResult {
        let Some((output, input)) = normalize_direction(a, b) else {
            return ValidationResult::Invalid(Rejection::IncompatibleDirection);
        };
        let id = ConnectionId::between(&output, &input);
        if graph.connection(&id).is_some() {
            ValidationResult::Invalid(Rejection::DuplicateConnection(id))
        } else {
            ValidationResult::Valid
        }
    }
}

/// Requires identical data types on both ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeMatchValidator;

impl LinkValidator for TypeMatchValidator {
    fn validate(&self, a: &PinRef, b: &PinRef, graph: &GraphStore) -> ValidationResult {
        let Some((output, input)) = normalize_direction(a, b) else {
            return ValidationResult::Invalid(Rejection::IncompatibleDirection);
        };
        let (Some(out_pin), Some(in_pin)) = (graph.pin(&output), graph.pin(&input)) else {
            let missing = if graph.pin(&output).is_none() { output } else { input };
            return ValidationResult::Invalid(Rejection::PinNotFound(missing));
        };
        if out_pin.data_type != in_pin.data_type {
            return ValidationResult::Invalid(Rejection::TypeMismatch {
                output: out_pin.data_type,
                input: in_pin.data_type,
            });
        }
        ValidationResult::Valid
    }
}

/// Allows at most one incoming connection per input pin.
///
/// Not part of the standard chain; install with [`GraphStore::add_validator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleInputValidator;

impl LinkValidator for SingleInputValidator {
    fn validate(&self, a: &PinRef, b: &PinRef, graph: &GraphStore) -> ValidationResult {
        let Some((_, input)) = normalize_direction(a, b) else {
            return ValidationResult::Invalid(Rejection::IncompatibleDirection);
        };
        if graph.connections().iter().any(|c| c.to == input) {
            ValidationResult::Invalid(Rejection::InputOccupied(input))
        } else {
            ValidationResult::Valid
        }
    }
}

/// Composite validator that combines multiple validators
///
/// All validators must return Valid for the link to be valid (AND logic).
/// Returns the first error encountered (short-circuits on failure).
#[derive(Default)]
pub struct CompositeValidator {
    validators: Vec<Box<dyn LinkValidator>>,
}

impl CompositeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Basic structure, duplicates, then data types.
    pub fn standard() -> Self {
        Self::new()
            .add(BasicLinkValidator)
            .add(NoDuplicatesValidator)
            .add(TypeMatchValidator)
    }

    /// Add a validator to the composite
    ///
    /// Validators are checked in the order they were added.
    pub fn add<V: LinkValidator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl LinkValidator for CompositeValidator {
    fn validate(&self, a: &PinRef, b: &PinRef, graph: &GraphStore) -> ValidationResult {
        for v in &self.validators {
            let result = v.validate(a, b, graph);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

// ============================================================================
// Tests
// ============================================================================
