//! Integration tests for the public API

use pumlgen::prelude::*;
use pumlgen::{package_diagram_path, render_feed, render_package_diagrams};

#[test]
fn test_render_feed_envelope() {
    let puml = render_feed(r#"{"packages": []}"#, &RenderConfig::default()).unwrap();
    assert_eq!(puml, "@startuml\nhide empty fields\nhide empty methods\n@enduml\n");
}

#[test]
fn test_render_feed_with_directives_and_indent() {
    let feed = r#"{"packages": [{"name": "p", "types": [
        {"name": "p.A", "fields": [{"name": "x", "type": "int"}]}]}]}"#;
    let config = RenderConfig::default()
        .with_directive("skinparam classAttributeIconSize 0")
        .with_indentation(4)
        .with_hide_empty_members(false);

    let puml = render_feed(feed, &config).unwrap();
    assert_eq!(
        puml,
        "@startuml\n\
         skinparam classAttributeIconSize 0\n\
         \n\
         package p {\n\
         \x20   class A {\n\
         \x20       +x: int\n\
         \x20   }\n\
         }\n\
         @enduml\n"
    );
}

#[test]
fn test_render_package_diagrams_in_feed_order() {
    let feed = r#"{"packages": [
        {"name": "b", "types": [{"name": "b.B"}]},
        {"name": "a", "types": [{"name": "a.A"}]}]}"#;
    let diagrams = render_package_diagrams(feed, &RenderConfig::default()).unwrap();
    let names: Vec<&str> = diagrams.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_package_diagram_paths() {
    let path = package_diagram_path("com.example.zoo").unwrap();
    let parts: Vec<String> = path
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();
    assert_eq!(parts, vec!["com", "example", "zoo", "package.puml"]);
}

#[test]
fn test_build_model_by_hand() {
    let mut shape = Type::new(
        Namespace::new("geo"),
        Classification::Interface,
        TypeName::new("geo.Shape"),
    )
    .unwrap();
    shape.add_member(
        Method::new("area")
            .with_abstract(true)
            .with_return_type(TypeName::new("double")),
    );

    let circle = Type::new(
        Namespace::new("geo"),
        Classification::Class,
        TypeName::new("geo.Circle"),
    )
    .unwrap();

    let mut namespace = Namespace::new("geo");
    namespace.add_type(shape);
    namespace.add_type(circle);

    let mut diagram = Diagram::new(RenderConfig::default().with_hide_empty_members(false));
    diagram.add_child(namespace);
    diagram.add_relationship(
        Relationship::with_arrow(TypeName::new("geo.Shape"), "<|..", TypeName::new("geo.Circle"))
            .unwrap(),
    );

    assert_eq!(
        diagram.render(),
        "@startuml\n\
         namespace geo {\n\
         \x20 interface geo.Shape {\n\
         \x20   +{abstract} area(): double\n\
         \x20 }\n\
         \x20 class geo.Circle\n\
         }\n\
         \n\
         geo.Circle ..|> geo.Shape\n\
         @enduml\n"
    );
}

#[test]
fn test_parent_references() {
    let mut package = Package::new("geo");
    package.add_type(
        Type::new(
            Namespace::new("geo"),
            Classification::Class,
            TypeName::new("geo.Point"),
        )
        .unwrap(),
    );

    let mut diagram = Diagram::new(RenderConfig::default());
    diagram.add_child(package);

    let UmlNode::Package(package) = &diagram.children()[0] else {
        panic!("Expected Package node");
    };
    assert_eq!(package.parent(), Some(&ParentRef::Diagram));
    let point = diagram.types()[0];
    assert_eq!(point.parent(), Some(&ParentRef::Package("geo".to_string())));
    assert_eq!(
        point.namespace().parent(),
        Some(&ParentRef::Package("geo".to_string()))
    );
}
