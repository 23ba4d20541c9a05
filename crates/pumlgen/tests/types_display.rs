//! Tests for Display and FromStr implementations of the model enums

use pumlgen::core::TypeDisplay;
use pumlgen::uml::{Classification, RelationshipKind, Visibility};
use std::str::FromStr;

#[test]
fn test_classification_display() {
    assert_eq!(Classification::Enum.to_string(), "enum");
    assert_eq!(Classification::Interface.to_string(), "interface");
    assert_eq!(Classification::Annotation.to_string(), "annotation");
    assert_eq!(Classification::AbstractClass.to_string(), "abstract class");
    assert_eq!(Classification::Class.to_string(), "class");
}

#[test]
fn test_classification_from_str() {
    assert_eq!(
        Classification::from_str("ABSTRACT_CLASS").unwrap(),
        Classification::AbstractClass
    );
    assert_eq!(
        Classification::from_str("abstract-class").unwrap(),
        Classification::AbstractClass
    );
    assert_eq!(
        Classification::from_str("Interface").unwrap(),
        Classification::Interface
    );
}

#[test]
fn test_relationship_kind_display() {
    assert_eq!(RelationshipKind::Extends.to_string(), "--|>");
    assert_eq!(RelationshipKind::Implements.to_string(), "..|>");
    assert_eq!(RelationshipKind::Association.to_string(), "-->");
    assert_eq!(RelationshipKind::Dependency.to_string(), "..>");
    assert_eq!(RelationshipKind::Composition.to_string(), "--*");
    assert_eq!(RelationshipKind::Aggregation.to_string(), "--o");
}

#[test]
fn test_left_arrows_parse_as_reversed() {
    for (arrow, kind) in [
        ("<|--", RelationshipKind::Extends),
        ("<|..", RelationshipKind::Implements),
        ("<--", RelationshipKind::Association),
        ("<..", RelationshipKind::Dependency),
        ("*--", RelationshipKind::Composition),
        ("o--", RelationshipKind::Aggregation),
    ] {
        assert_eq!(RelationshipKind::parse_arrow(arrow).unwrap(), (kind, true));
        assert_eq!(
            RelationshipKind::parse_arrow(kind.arrow()).unwrap(),
            (kind, false)
        );
    }
}

#[test]
fn test_visibility_symbols() {
    for visibility in Visibility::all() {
        assert_eq!(Visibility::from_char(visibility.to_char()), Some(visibility));
        assert_eq!(
            Visibility::from_str(&visibility.to_string()).unwrap(),
            visibility
        );
    }
    assert_eq!(Visibility::Package.to_char(), '~');
    assert_eq!(Visibility::from_char('?'), None);
}

#[test]
fn test_type_display_names() {
    assert_eq!(TypeDisplay::default(), TypeDisplay::Simple);
    assert_eq!(TypeDisplay::QualifiedGenerics.to_string(), "qualified-generics");
    assert_eq!(
        TypeDisplay::from_str("QUALIFIED_GENERICS").unwrap(),
        TypeDisplay::QualifiedGenerics
    );
    assert_eq!(TypeDisplay::from_str("none").unwrap(), TypeDisplay::None);
}
