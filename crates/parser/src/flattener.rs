//! Flattening of request-body schemas into workflow inputs
//!
//! workflow_dispatch inputs are a flat key/value form, so nested objects are
//! flattened into dotted names (`address.street`) and union alternatives are
//! merged into a single property set.

use crate::resolver::{Resolved, Resolver};
use crate::type_mapper::TypeMapper;
use indexmap::{IndexMap, IndexSet};
use swagger_actions_common::{DiagnosticKind, InputDescriptor, SchemaKind, SchemaNode};

/// Flattened properties and the names among them that are required
///
/// Property schemas are stored resolved. Sets are combined with
/// [`PropertySet::merged`], which returns a new set instead of mutating a
/// shared accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    properties: IndexMap<String, SchemaNode>,
    required: IndexSet<String>,
}

impl PropertySet {
    /// A set holding one property
    pub fn single(name: String, schema: SchemaNode, required: bool) -> Self {
        let mut set = Self::default();
        if required {
            set.required.insert(name.clone());
        }
        set.properties.insert(name, schema);
        set
    }

    /// Combine with `other`
    ///
    /// Properties of `other` replace same-named ones but keep their first-seen
    /// position; required names are unioned.
    pub fn merged(mut self, other: PropertySet) -> PropertySet {
        for (name, schema) in other.properties {
            self.properties.insert(name, schema);
        }
        self.required.extend(other.required);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Turn every property into an input, in order
    pub fn into_inputs(self) -> Vec<InputDescriptor> {
        let PropertySet {
            properties,
            required,
        } = self;

        properties
            .into_iter()
            .map(|(name, schema)| InputDescriptor {
                description: TypeMapper::describe(&name, schema.description(), &schema),
                required: required.contains(&name),
                primitive_type: TypeMapper::narrow(&schema.kind),
                name,
            })
            .collect()
    }
}

/// Derives workflow inputs from a schema
pub struct InputDeriver<'r, 'a> {
    resolver: &'r mut Resolver<'a>,
}

impl<'r, 'a> InputDeriver<'r, 'a> {
    pub fn new(resolver: &'r mut Resolver<'a>) -> Self {
        Self { resolver }
    }

    /// Derive inputs from a (possibly absent or referenced) schema
    pub fn derive(&mut self, schema: Option<&SchemaNode>) -> Vec<InputDescriptor> {
        let resolved = self.resolver.resolve(schema);
        self.derive_resolved(&resolved)
    }

    /// Derive inputs from an already resolved schema
    pub fn derive_resolved(&mut self, resolved: &Resolved) -> Vec<InputDescriptor> {
        self.flatten(resolved).into_inputs()
    }

    /// Flatten a resolved schema into a property set
    ///
    /// - array of union / union: variants merged
    /// - array of object / object: properties flattened
    /// - anything else: empty
    pub fn flatten(&mut self, resolved: &Resolved) -> PropertySet {
        let scope = self.resolver.enter(resolved);

        let set = match &resolved.node.kind {
            SchemaKind::Array { items } => match &items.kind {
                SchemaKind::Union { variants } => self.merge_variants(variants),
                SchemaKind::Object {
                    properties,
                    required,
                } => self.flatten_object(properties, required, None),
                _ => PropertySet::default(),
            },
            SchemaKind::Union { variants } => self.merge_variants(variants),
            SchemaKind::Object {
                properties,
                required,
            } => self.flatten_object(properties, required, None),
            _ => PropertySet::default(),
        };

        self.resolver.leave(scope);
        set
    }

    /// Fold object variants into one property set; other variants are skipped
    fn merge_variants(&mut self, variants: &[SchemaNode]) -> PropertySet {
        variants
            .iter()
            .fold(PropertySet::default(), |set, variant| {
                let resolved = self.resolver.resolve(Some(variant));
                match &resolved.node.kind {
                    SchemaKind::Object { .. } | SchemaKind::Union { .. } => {
                        set.merged(self.flatten(&resolved))
                    }
                    _ => set,
                }
            })
    }

    /// Flatten object properties, recursing into nested objects under `prefix.`
    fn flatten_object(
        &mut self,
        properties: &IndexMap<String, SchemaNode>,
        required: &IndexSet<String>,
        prefix: Option<&str>,
    ) -> PropertySet {
        properties
            .iter()
            .fold(PropertySet::default(), |set, (name, property)| {
                if name.is_empty() {
                    self.resolver.report(DiagnosticKind::EmptyPropertyName {
                        parent: prefix.map(str::to_string),
                    });
                    return set;
                }

                let full_name = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, name),
                    None => name.clone(),
                };

                let resolved = self.resolver.resolve(Some(property));
                let part = match &resolved.node.kind {
                    SchemaKind::Object {
                        properties: nested,
                        required: nested_required,
                    } if !nested.is_empty() => {
                        let scope = self.resolver.enter(&resolved);
                        let nested_set =
                            self.flatten_object(nested, nested_required, Some(&full_name));
                        self.resolver.leave(scope);
                        nested_set
                    }
                    _ => PropertySet::single(
                        full_name,
                        resolved.node.clone(),
                        required.contains(name),
                    ),
                };

                set.merged(part)
            })
    }
}
