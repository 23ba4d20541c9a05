//! pumlgen - Model a program's type structure as UML and render PlantUML
//!
//! A library for building an ownership tree of packages, types and members and
//! writing it out as PlantUML class diagram text.
//!
//! # Quick Start
//!
//! ```rust
//! use pumlgen::{render_feed, RenderConfig};
//!
//! let feed = r#"{"packages": [{"name": "com.example", "types": [
//!     {"name": "com.example.Foo", "fields": [{"name": "id", "type": "long"}]}
//! ]}]}"#;
//! let puml = render_feed(feed, &RenderConfig::default()).unwrap();
//! assert!(puml.contains("class Foo {"));
//! assert!(puml.contains("+id: long"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, build the model directly:
//!
//! ```rust
//! use pumlgen::prelude::*;
//!
//! let mut foo = Type::new(
//!     Namespace::new("com.example"),
//!     Classification::Interface,
//!     TypeName::parse("com.example.Foo<T>").unwrap(),
//! )
//! .unwrap();
//! foo.add_member(Method::new("get").with_return_type(TypeName::new("T")));
//!
//! let mut package = Package::new("com.example");
//! package.add_type(foo.deprecated());
//!
//! let mut diagram = Diagram::new(RenderConfig::default().with_hide_empty_members(false));
//! diagram.add_child(package);
//! assert_eq!(
//!     diagram.render(),
//!     "@startuml\npackage com.example {\n  interface Foo<T> <<deprecated>> {\n    +get(): T\n  }\n}\n@enduml\n"
//! );
//! ```

pub mod core;
pub mod feed;
pub mod uml;

use std::path::{Component, Path, PathBuf};

use anyhow::Context;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{RenderConfig, TypeDisplay, UmlError, UmlWriter};
    pub use crate::feed::{DiagramBuilder, Feed};
    pub use crate::uml::{
        Classification, Diagram, Field, Link, Method, Namespace, Package, Parameter, ParentRef,
        Relationship, RelationshipKind, Type, TypeMember, TypeName, UmlNode, UmlPart, Visibility,
        WildcardBound,
    };
}

/// Render a JSON declaration feed as one class diagram
///
/// # Example
/// ```rust
/// use pumlgen::{render_feed, RenderConfig};
///
/// let puml = render_feed(r#"{"packages": []}"#, &RenderConfig::default()).unwrap();
/// assert!(puml.starts_with("@startuml\n"));
/// assert!(puml.ends_with("@enduml\n"));
/// ```
pub fn render_feed(json: &str, config: &RenderConfig) -> anyhow::Result<String> {
    let feed = feed::Feed::from_json(json).context("Failed to parse declaration feed")?;
    let diagram = feed::DiagramBuilder::new(&feed, config.clone())
        .class_diagram()
        .context("Failed to build class diagram")?;
    Ok(diagram.render())
}

/// Render a JSON declaration feed as one diagram per package
///
/// Returns `(package name, PlantUML text)` pairs in feed order.
pub fn render_package_diagrams(
    json: &str,
    config: &RenderConfig,
) -> anyhow::Result<Vec<(String, String)>> {
    let feed = feed::Feed::from_json(json).context("Failed to parse declaration feed")?;
    let diagrams = feed::DiagramBuilder::new(&feed, config.clone())
        .package_diagrams()
        .context("Failed to build package diagrams")?;
    Ok(diagrams
        .into_iter()
        .map(|(name, diagram)| (name, diagram.render()))
        .collect())
}

/// Relative output path of a package diagram: `com/example/package.puml`
///
/// The unnamed package maps to `package.puml`. Every dotted segment must be a
/// plain path component, so the result always stays below the directory it is
/// joined onto.
pub fn package_diagram_path(package: &str) -> Result<PathBuf, UmlError> {
    let mut path = PathBuf::new();
    for segment in package.split('.').filter(|segment| !segment.is_empty()) {
        let mut components = Path::new(segment).components();
        let plain = matches!(components.next(), Some(Component::Normal(_)))
            && components.next().is_none()
            && !segment.contains(['/', '\\', ':']);
        if !plain {
            return Err(UmlError::invalid_argument(format!(
                "Package name '{}' cannot be used as an output path",
                package
            )));
        }
        path.push(segment);
    }
    path.push("package.puml");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{"packages": [
        {"name": "com.example", "types": [{"name": "com.example.Foo"}]},
        {"name": "org.other", "types": [{"name": "org.other.Bar", "classification": "enum"}]}
    ]}"#;

    #[test]
    fn test_render_feed() {
        let result = render_feed(FEED, &RenderConfig::default());
        assert!(result.is_ok());
        let output = result.unwrap();
        assert!(output.contains("package com.example {"));
        assert!(output.contains("enum Bar"));
    }

    #[test]
    fn test_render_feed_reports_bad_json() {
        let error = render_feed("not json", &RenderConfig::default()).unwrap_err();
        assert_eq!(error.to_string(), "Failed to parse declaration feed");
        assert!(error.downcast_ref::<UmlError>().is_some());
    }

    #[test]
    fn test_render_package_diagrams() {
        let diagrams = render_package_diagrams(FEED, &RenderConfig::default()).unwrap();
        assert_eq!(diagrams.len(), 2);
        assert_eq!(diagrams[0].0, "com.example");
        assert!(diagrams[0].1.contains("class Foo"));
        assert!(!diagrams[0].1.contains("Bar"));
    }

    #[test]
    fn test_package_diagram_path() {
        assert_eq!(
            package_diagram_path("com.example").unwrap(),
            PathBuf::from("com").join("example").join("package.puml")
        );
        assert_eq!(package_diagram_path("").unwrap(), PathBuf::from("package.puml"));
    }

    #[test]
    fn test_package_diagram_path_rejects_path_syntax() {
        for name in ["/tmp/x", "com/example", "a\\b", "c:.windows", "x./etc"] {
            assert!(
                matches!(package_diagram_path(name), Err(UmlError::InvalidArgument { .. })),
                "{} should be rejected",
                name
            );
        }

        // `..` only yields empty segments
        assert_eq!(
            package_diagram_path("a..b").unwrap(),
            PathBuf::from("a").join("b").join("package.puml")
        );
    }
}
