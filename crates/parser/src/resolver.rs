//! Schema reference resolution
//!
//! Follows `$ref`s through the component table and unwraps array items.
//! Resolution never fails: a reference that cannot be followed (missing
//! segment, external document, cycle) is recorded as a diagnostic and replaced
//! by an empty object schema, so one bad reference does not block the rest of
//! the run.

use swagger_actions_common::{
    ComponentTable, DiagnosticKind, Diagnostics, ResolveError, SchemaKind, SchemaNode,
};

/// A resolved schema plus the references followed to reach it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub node: SchemaNode,
    via: Vec<String>,
}

impl Resolved {
    /// References followed, outermost first
    pub fn via(&self) -> &[String] {
        &self.via
    }
}

/// Marker returned by [`Resolver::enter`], consumed by [`Resolver::leave`]
#[derive(Debug)]
#[must_use = "a scope must be passed back to Resolver::leave"]
pub struct Scope(usize);

/// Resolves schema nodes against a component table
///
/// The resolver tracks the references currently being expanded. A reference
/// that is already on that stack is a cycle and degrades to an empty object.
pub struct Resolver<'a> {
    components: &'a ComponentTable,
    expanding: Vec<String>,
    diagnostics: Diagnostics,
}

impl<'a> Resolver<'a> {
    pub fn new(components: &'a ComponentTable) -> Self {
        Self {
            components,
            expanding: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Resolve `node` to a non-reference schema
    ///
    /// - absent: empty object
    /// - reference: the target, resolved in turn
    /// - array: a copy whose items are resolved
    /// - anything else: unchanged
    pub fn resolve(&mut self, node: Option<&SchemaNode>) -> Resolved {
        let depth = self.expanding.len();
        let node = match node {
            Some(node) => self.resolve_node(node),
            None => SchemaNode::empty_object(),
        };
        let via = self.expanding.split_off(depth);

        Resolved { node, via }
    }

    /// Keep the references behind `resolved` on the expansion stack
    ///
    /// Used while descending into the properties of a referenced object so
    /// that a property pointing back at an enclosing schema is seen as a cycle.
    pub fn enter(&mut self, resolved: &Resolved) -> Scope {
        let scope = Scope(self.expanding.len());
        self.expanding.extend(resolved.via.iter().cloned());
        scope
    }

    pub fn leave(&mut self, scope: Scope) {
        self.expanding.truncate(scope.0);
    }

    /// Record a warning found while walking resolved schemas
    pub fn report(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(kind);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    fn resolve_node(&mut self, node: &SchemaNode) -> SchemaNode {
        match &node.kind {
            SchemaKind::Reference { target } => self.follow(node, target),
            SchemaKind::Array { items } => {
                // Item references stay on the stack and end up in `via`
                let items = self.resolve_node(items);
                SchemaNode {
                    kind: SchemaKind::Array {
                        items: Box::new(items),
                    },
                    description: node.description.clone(),
                    enum_values: node.enum_values.clone(),
                }
            }
            _ => node.clone(),
        }
    }

    /// Follow a reference, leaving its target on the expansion stack
    fn follow(&mut self, node: &SchemaNode, target: &str) -> SchemaNode {
        if self.expanding.iter().any(|expanding| expanding == target) {
            return self.degrade(ResolveError::Cycle {
                reference: target.to_string(),
            });
        }

        let components = self.components;
        let found = match components.lookup(target) {
            Ok(found) => found,
            Err(err) => return self.degrade(err),
        };

        self.expanding.push(target.to_string());
        let mut resolved = self.resolve_node(found);

        // A description next to the `$ref` wins over the target's own
        if let Some(description) = node.description() {
            resolved.description = Some(description.to_string());
        }

        resolved
    }

    fn degrade(&mut self, err: ResolveError) -> SchemaNode {
        self.diagnostics.push(DiagnosticKind::Reference(err));
        SchemaNode::empty_object()
    }
}
