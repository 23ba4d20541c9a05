//! Tests for core error types

use pumlgen::core::UmlError;
use pumlgen::prelude::*;
use std::str::FromStr;

#[test]
fn test_invalid_argument() {
    let error = UmlError::invalid_argument("Type name is <empty>.");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid argument"));
    assert!(error_msg.contains("Type name is <empty>."));
}

#[test]
fn test_type_name_parse_error() {
    let error = TypeName::parse("java.util.Map<K,").unwrap_err();
    match &error {
        UmlError::TypeNameParse { input, .. } => assert_eq!(input, "java.util.Map<K,"),
        other => panic!("Expected TypeNameParse, got {:?}", other),
    }
    assert!(error.to_string().contains("Type name error"));
}

#[test]
fn test_unknown_relationship() {
    let error = RelationshipKind::from_str("<->").unwrap_err();
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Unknown relationship arrow"));
    assert!(error_msg.contains("<->"));
}

#[test]
fn test_unknown_enum_values() {
    assert!(matches!(
        Classification::from_str("record"),
        Err(UmlError::UnknownClassification { .. })
    ));
    assert!(matches!(
        TypeDisplay::from_str("fancy"),
        Err(UmlError::UnknownTypeDisplay { .. })
    ));
    assert!(matches!(
        Visibility::from_str("friend"),
        Err(UmlError::UnknownVisibility { .. })
    ));
}

#[test]
fn test_feed_error() {
    let error = UmlError::feed("Relationship endpoint is empty");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Feed error"));
    assert!(error_msg.contains("Relationship endpoint is empty"));
}

#[test]
fn test_io_error() {
    use std::io;
    let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let error: UmlError = io_err.into();
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("IO error"));
    assert!(error_msg.contains("File not found"));
}

#[test]
fn test_json_error() {
    let error = Feed::from_json("{").unwrap_err();
    assert!(matches!(error, UmlError::Json { .. }));
    assert!(error.to_string().contains("JSON error"));
}
