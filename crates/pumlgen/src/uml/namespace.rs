//! Namespace and package containers
//!
//! Both group types and nested containers. A [`Namespace`] also serves as the
//! naming context a type is declared in; a [`Package`] is the grouping a diagram
//! draws, and types directly inside one are written relative to its name.

use super::{adopt_child, ParentRef, Type, UmlNode, UmlPart};
use crate::core::UmlWriter;

/// A dotted naming scope such as `com.example`
#[derive(Debug)]
pub struct Namespace {
    name: String,
    parent: Option<ParentRef>,
    children: Vec<UmlNode>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[UmlNode] {
        &self.children
    }

    /// Add a type or nested namespace; a repeated declaration is merged
    pub fn add_child(&mut self, child: impl Into<UmlNode>) {
        adopt_child(
            &mut self.children,
            child.into(),
            ParentRef::Namespace(self.name.clone()),
        );
    }

    pub fn add_type(&mut self, uml_type: Type) {
        self.add_child(uml_type);
    }

    /// Fold the children of another namespace with the same name into this one
    pub fn merge(mut self, other: Namespace) -> Namespace {
        for child in other.children {
            self.add_child(child);
        }
        self
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Namespace {}

impl UmlPart for Namespace {
    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn set_parent(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output.append("namespace").whitespace().append(&self.name).whitespace();
        self.write_children_to(output).newline()
    }

    fn write_children_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output.append('{').newline();
        output.indented(|output| {
            for child in &self.children {
                child.write_to(output);
            }
        });
        output.append('}')
    }
}

/// A package block in a diagram
#[derive(Debug)]
pub struct Package {
    name: String,
    parent: Option<ParentRef>,
    children: Vec<UmlNode>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[UmlNode] {
        &self.children
    }

    pub fn into_children(self) -> Vec<UmlNode> {
        self.children
    }

    /// The namespace types of this package are declared in
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.name.clone())
    }

    /// Add a type or nested container; a repeated declaration is merged
    pub fn add_child(&mut self, child: impl Into<UmlNode>) {
        adopt_child(
            &mut self.children,
            child.into(),
            ParentRef::Package(self.name.clone()),
        );
    }

    pub fn add_type(&mut self, uml_type: Type) {
        self.add_child(uml_type);
    }

    pub fn merge(mut self, other: Package) -> Package {
        for child in other.children {
            self.add_child(child);
        }
        self
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Package {}

impl UmlPart for Package {
    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn set_parent(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output.append("package").whitespace().append(&self.name).whitespace();
        self.write_children_to(output).newline()
    }

    fn write_children_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output.append('{').newline();
        output.indented(|output| {
            for child in &self.children {
                child.write_to(output);
            }
        });
        output.append('}')
    }
}
