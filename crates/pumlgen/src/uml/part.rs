//! Node contract shared by every element of the UML model
//!
//! Ownership always runs container → child. Upward navigation goes through a
//! [`ParentRef`], a plain descriptor of the container a node was placed in, so no
//! node ever holds a pointer back into the tree.

use crate::core::UmlWriter;

/// Non-owning reference from a node to the container it was placed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    /// Directly under the diagram root
    Diagram,
    /// Inside a `package` block of the given name
    Package(String),
    /// Inside a `namespace` block of the given name
    Namespace(String),
    /// Member of the type with the given qualified name
    Type(String),
}

impl ParentRef {
    /// Package name when the parent is a package node
    pub fn package_name(&self) -> Option<&str> {
        match self {
            ParentRef::Package(name) => Some(name),
            _ => None,
        }
    }
}

/// A node of the UML model that knows how to write itself
///
/// `write_to` writes the node including its children; `write_children_to` writes
/// only the children. Both return the writer they were given for chaining.
pub trait UmlPart {
    /// Container this node was placed in, if any
    fn parent(&self) -> Option<&ParentRef>;

    /// Record the container this node was placed in
    fn set_parent(&mut self, parent: ParentRef);

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c>;

    fn write_children_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output
    }
}
