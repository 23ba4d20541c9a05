//! Container children
//!
//! Diagrams, packages and namespaces hold an ordered list of [`UmlNode`]s.
//! Insertion order is rendering order; a node equal to one already present is
//! merged into it instead of being added twice.

use tracing::debug;

use super::{Namespace, Package, ParentRef, Type, UmlPart};
use crate::core::UmlWriter;

/// A child of a diagram, package or namespace
#[derive(Debug)]
pub enum UmlNode {
    Package(Package),
    Namespace(Namespace),
    Type(Type),
}

impl UmlNode {
    /// Whether both nodes describe the same declaration
    pub fn same_node(&self, other: &UmlNode) -> bool {
        match (self, other) {
            (UmlNode::Package(a), UmlNode::Package(b)) => a == b,
            (UmlNode::Namespace(a), UmlNode::Namespace(b)) => a == b,
            (UmlNode::Type(a), UmlNode::Type(b)) => a == b,
            _ => false,
        }
    }

    /// Fold `other` into this node; only meaningful when [`same_node`](Self::same_node) holds
    pub fn merge(self, other: UmlNode) -> UmlNode {
        match (self, other) {
            (UmlNode::Package(a), UmlNode::Package(b)) => UmlNode::Package(a.merge(b)),
            (UmlNode::Namespace(a), UmlNode::Namespace(b)) => UmlNode::Namespace(a.merge(b)),
            (UmlNode::Type(a), UmlNode::Type(b)) => UmlNode::Type(a.merge(b)),
            (kept, _) => kept,
        }
    }

    /// Every type in this subtree, depth first
    pub fn types(&self) -> Vec<&Type> {
        match self {
            UmlNode::Type(uml_type) => vec![uml_type],
            UmlNode::Package(package) => package.children().iter().flat_map(UmlNode::types).collect(),
            UmlNode::Namespace(namespace) => namespace
                .children()
                .iter()
                .flat_map(UmlNode::types)
                .collect(),
        }
    }
}

impl From<Package> for UmlNode {
    fn from(package: Package) -> Self {
        UmlNode::Package(package)
    }
}

impl From<Namespace> for UmlNode {
    fn from(namespace: Namespace) -> Self {
        UmlNode::Namespace(namespace)
    }
}

impl From<Type> for UmlNode {
    fn from(uml_type: Type) -> Self {
        UmlNode::Type(uml_type)
    }
}

impl UmlPart for UmlNode {
    fn parent(&self) -> Option<&ParentRef> {
        match self {
            UmlNode::Package(package) => package.parent(),
            UmlNode::Namespace(namespace) => namespace.parent(),
            UmlNode::Type(uml_type) => uml_type.parent(),
        }
    }

    fn set_parent(&mut self, parent: ParentRef) {
        match self {
            UmlNode::Package(package) => package.set_parent(parent),
            UmlNode::Namespace(namespace) => namespace.set_parent(parent),
            UmlNode::Type(uml_type) => uml_type.set_parent(parent),
        }
    }

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        match self {
            UmlNode::Package(package) => package.write_to(output),
            UmlNode::Namespace(namespace) => namespace.write_to(output),
            UmlNode::Type(uml_type) => uml_type.write_to(output),
        }
    }
}

/// Place `child` under a container, merging it into an equal existing child
pub(crate) fn adopt_child(children: &mut Vec<UmlNode>, mut child: UmlNode, parent: ParentRef) {
    match children.iter().position(|existing| existing.same_node(&child)) {
        Some(index) => {
            debug!(?parent, index, "Merging repeated declaration");
            let existing = children.remove(index);
            children.insert(index, existing.merge(child));
        }
        None => {
            child.set_parent(parent);
            children.push(child);
        }
    }
}
