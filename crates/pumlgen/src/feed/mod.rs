//! Declaration feed
//!
//! The feed is the JSON document an introspection front-end writes: packages,
//! the types it found in them and the relationships between those types. Type
//! references stay plain strings here and are parsed into
//! [`TypeName`](crate::uml::TypeName)s when a [`DiagramBuilder`] builds the model.
//!
//! ```rust
//! use pumlgen::feed::Feed;
//!
//! let feed = Feed::from_json(r#"{
//!     "packages": [{
//!         "name": "com.example",
//!         "types": [{ "name": "com.example.Foo" }]
//!     }]
//! }"#).unwrap();
//! assert_eq!(feed.type_count(), 1);
//! ```

mod builder;

pub use builder::*;

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::core::UmlError;
use crate::uml::{Classification, RelationshipKind, Visibility};

/// Everything the front-end saw
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default)]
    pub packages: Vec<PackageDecl>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDecl>,
}

impl Feed {
    pub fn from_json(input: &str) -> Result<Self, UmlError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, UmlError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_json(&input)
    }

    pub fn to_json(&self) -> Result<String, UmlError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of type declarations, including repeated and excluded ones
    pub fn type_count(&self) -> usize {
        self.packages.iter().map(|package| package.types.len()).sum()
    }
}

/// A package and the types declared in it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDecl {
    /// Dotted package name; empty for the unnamed package
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub excluded: bool,
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Qualified name, possibly with generic variables: `com.example.Box<T>`
    pub name: String,
    #[serde(default = "default_classification")]
    pub classification: Classification,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub excluded: bool,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub supertypes: Vec<SupertypeDecl>,
}

fn default_classification() -> Classification {
    Classification::Class
}

fn default_visibility() -> Visibility {
    Visibility::Public
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    /// Absent for constructors
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default = "default_visibility")]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A direct supertype; `kind` is `extends` or `implements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupertypeDecl {
    pub name: String,
    #[serde(default = "default_supertype_kind")]
    pub kind: RelationshipKind,
}

fn default_supertype_kind() -> RelationshipKind {
    RelationshipKind::Extends
}

/// An explicit relationship; `arrow` is a PlantUML arrow or a kind name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDecl {
    pub from: String,
    pub arrow: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let feed = Feed::from_json(
            r#"{"packages": [{"name": "p", "types": [{"name": "p.A",
                "fields": [{"name": "x", "type": "int"}],
                "methods": [{"name": "A"}],
                "supertypes": [{"name": "p.Base"}]}]}]}"#,
        )
        .unwrap();

        let decl = &feed.packages[0].types[0];
        assert_eq!(decl.classification, Classification::Class);
        assert!(!decl.deprecated);
        assert_eq!(decl.fields[0].visibility, Visibility::Public);
        assert_eq!(decl.methods[0].returns, None);
        assert_eq!(decl.supertypes[0].kind, RelationshipKind::Extends);
        assert!(feed.relationships.is_empty());
    }

    #[test]
    fn test_wire_names() {
        let feed = Feed::from_json(
            r#"{"packages": [{"name": "p", "types": [{"name": "p.A",
                "classification": "abstract_class",
                "fields": [{"name": "x", "type": "int", "visibility": "package_private", "static": true}],
                "methods": [{"name": "run", "returns": "void", "abstract": true}],
                "supertypes": [{"name": "p.I", "kind": "implements"}]}]}],
                "relationships": [{"from": "p.A", "arrow": "-->", "to": "p.B", "label": "uses"}]}"#,
        )
        .unwrap();

        let decl = &feed.packages[0].types[0];
        assert_eq!(decl.classification, Classification::AbstractClass);
        assert_eq!(decl.fields[0].visibility, Visibility::Package);
        assert!(decl.fields[0].is_static);
        assert!(decl.methods[0].is_abstract);
        assert_eq!(decl.supertypes[0].kind, RelationshipKind::Implements);
        assert_eq!(feed.relationships[0].label.as_deref(), Some("uses"));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let result = Feed::from_json("{\"packages\": [");
        assert!(matches!(result, Err(UmlError::Json { .. })));
    }

    #[test]
    fn test_reader_and_json_agree() {
        let json = r#"{"packages": [{"name": "p", "types": [{"name": "p.A"}, {"name": "p.B"}]}]}"#;
        let from_reader = Feed::from_reader(json.as_bytes()).unwrap();
        assert_eq!(from_reader, Feed::from_json(json).unwrap());
        assert_eq!(from_reader.type_count(), 2);

        let reparsed = Feed::from_json(&from_reader.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, from_reader);
    }
}
