//! Diagram root
//!
//! A [`Diagram`] owns the containers and the relationships of one PlantUML class
//! diagram. Containers are written first in insertion order, relationships after
//! all of them, since PlantUML needs a type declared before an edge references it.

use tracing::{debug, info, span, trace, Level};

use super::{adopt_child, Package, ParentRef, Relationship, Type, UmlNode, UmlPart};
use crate::core::{RenderConfig, UmlWriter};

/// Root of a UML model
#[derive(Debug)]
pub struct Diagram {
    config: RenderConfig,
    children: Vec<UmlNode>,
    relationships: Vec<Relationship>,
}

impl Diagram {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            children: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn children(&self) -> &[UmlNode] {
        &self.children
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Add a package, namespace or type; a repeated declaration is merged
    pub fn add_child(&mut self, child: impl Into<UmlNode>) {
        adopt_child(&mut self.children, child.into(), ParentRef::Diagram);
    }

    /// Add a package; types of the unnamed package go directly under the diagram
    pub fn add_package(&mut self, package: Package) {
        if package.name().is_empty() {
            for child in package.into_children() {
                self.add_child(child);
            }
        } else {
            self.add_child(package);
        }
    }

    /// Add a relationship unless an equal one is already present
    ///
    /// Returns whether the relationship was added.
    pub fn add_relationship(&mut self, relationship: Relationship) -> bool {
        if self.relationships.contains(&relationship) {
            debug!(
                from = relationship.from.qualified(),
                to = relationship.to.qualified(),
                arrow = relationship.kind.arrow(),
                "Skipping duplicate relationship"
            );
            return false;
        }
        self.relationships.push(relationship);
        true
    }

    /// Every type in the diagram, in rendering order
    pub fn types(&self) -> Vec<&Type> {
        self.children.iter().flat_map(UmlNode::types).collect()
    }

    pub fn type_count(&self) -> usize {
        self.types().len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Write the complete `@startuml` … `@enduml` document
    pub fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output.append("@startuml").newline();

        let config = output.config();
        let mut header_lines = config.custom_directives.clone();
        if config.hide_empty_members {
            header_lines.push("hide empty fields".to_string());
            header_lines.push("hide empty methods".to_string());
        }
        for line in &header_lines {
            output.append(line).newline();
        }
        if !header_lines.is_empty() && !(self.children.is_empty() && self.relationships.is_empty())
        {
            output.newline();
        }

        for child in &self.children {
            trace!(parent = ?child.parent(), "Writing container child");
            child.write_to(output);
        }

        if !self.relationships.is_empty() {
            if !self.children.is_empty() {
                output.newline();
            }
            for relationship in &self.relationships {
                trace!(
                    from = relationship.from.qualified(),
                    to = relationship.to.qualified(),
                    "Writing relationship"
                );
                relationship.write_to(output);
            }
        }

        output.append("@enduml").newline()
    }

    /// Render the diagram to PlantUML text
    pub fn render(&self) -> String {
        let render_span = span!(
            Level::INFO,
            "render_diagram",
            children = self.children.len(),
            relationships = self.relationships.len()
        );
        let _enter = render_span.enter();

        let mut output = UmlWriter::new(&self.config);
        self.write_to(&mut output);
        let text = output.into_string();

        info!(bytes = text.len(), "Rendered diagram");
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uml::{Classification, Namespace, Package, RelationshipKind, TypeName};

    fn class(name: &str) -> Type {
        Type::new(
            Namespace::new("com.example"),
            Classification::Class,
            TypeName::new(name),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_diagram() {
        let diagram = Diagram::new(RenderConfig::default().with_hide_empty_members(false));
        assert_eq!(diagram.render(), "@startuml\n@enduml\n");
    }

    #[test]
    fn test_header_directives_precede_body() {
        let config = RenderConfig::default().with_directive("skinparam monochrome true");
        let mut diagram = Diagram::new(config);
        diagram.add_child(class("com.example.Foo"));

        assert_eq!(
            diagram.render(),
            "@startuml\n\
             skinparam monochrome true\n\
             hide empty fields\n\
             hide empty methods\n\
             \n\
             class com.example.Foo\n\
             @enduml\n"
        );
    }

    #[test]
    fn test_relationships_follow_containers_and_are_deduplicated() {
        let mut diagram = Diagram::new(RenderConfig::default().with_hide_empty_members(false));
        let a = TypeName::new("com.example.A");
        let b = TypeName::new("com.example.B");

        assert!(diagram.add_relationship(Relationship::new(
            a.clone(),
            RelationshipKind::Extends,
            b.clone()
        )));
        let mut package = Package::new("com.example");
        package.add_type(class("com.example.A"));
        package.add_type(class("com.example.B"));
        diagram.add_child(package);
        assert!(!diagram.add_relationship(
            Relationship::with_arrow(b.clone(), "<|--", a.clone()).unwrap()
        ));

        assert_eq!(diagram.relationship_count(), 1);
        assert_eq!(diagram.type_count(), 2);
        assert_eq!(
            diagram.render(),
            "@startuml\n\
             package com.example {\n  class A\n  class B\n}\n\
             \n\
             com.example.A --|> com.example.B\n\
             @enduml\n"
        );
    }

    #[test]
    fn test_unnamed_package_is_flattened() {
        let mut diagram = Diagram::new(RenderConfig::default().with_hide_empty_members(false));
        let mut unnamed = Package::new("");
        unnamed.add_type(
            Type::new(Namespace::new(""), Classification::Class, TypeName::new("Main")).unwrap(),
        );
        diagram.add_package(unnamed);

        assert_eq!(diagram.children().len(), 1);
        assert_eq!(diagram.children()[0].parent(), Some(&ParentRef::Diagram));
        assert_eq!(diagram.render(), "@startuml\nclass Main\n@enduml\n");
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let mut diagram = Diagram::new(RenderConfig::default());
        diagram.add_child(class("com.example.Foo"));
        assert_eq!(diagram.render(), diagram.render());
    }
}
