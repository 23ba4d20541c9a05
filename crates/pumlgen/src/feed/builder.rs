//! Model assembly from a feed
//!
//! [`DiagramBuilder`] turns a [`Feed`] into [`Diagram`]s: either one class diagram
//! over every package, or one diagram per package. Visibility filters and the
//! package-label flag come from the [`RenderConfig`] the builder was given.

use std::collections::HashSet;

use tracing::{debug, info, span, trace, Level};

use super::{Feed, MethodDecl, PackageDecl, TypeDecl};
use crate::core::{RenderConfig, UmlError};
use crate::uml::{
    Diagram, Field, Method, Namespace, Package, Parameter, Relationship, RelationshipKind, Type,
    TypeName,
};

/// Builds diagrams from a parsed feed
pub struct DiagramBuilder<'f> {
    feed: &'f Feed,
    config: RenderConfig,
}

impl<'f> DiagramBuilder<'f> {
    pub fn new(feed: &'f Feed, config: RenderConfig) -> Self {
        Self { feed, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// One diagram containing every package and relationship
    pub fn class_diagram(&self) -> Result<Diagram, UmlError> {
        let build_span = span!(
            Level::INFO,
            "build_class_diagram",
            packages = self.feed.packages.len()
        );
        let _enter = build_span.enter();

        let excluded = self.excluded_types()?;
        let mut diagram = Diagram::new(self.config.clone());
        for package in self.included_packages() {
            let (node, relationships) = self.build_package(package, &excluded)?;
            diagram.add_package(node);
            for relationship in relationships {
                diagram.add_relationship(relationship);
            }
        }
        for relationship in self.explicit_relationships(&excluded)? {
            diagram.add_relationship(relationship);
        }

        info!(
            types = diagram.type_count(),
            relationships = diagram.relationship_count(),
            "Built class diagram"
        );
        Ok(diagram)
    }

    /// One diagram per package, in feed order
    ///
    /// Each diagram holds the package's own types and the relationships that
    /// start at one of them.
    pub fn package_diagrams(&self) -> Result<Vec<(String, Diagram)>, UmlError> {
        let build_span = span!(
            Level::INFO,
            "build_package_diagrams",
            packages = self.feed.packages.len()
        );
        let _enter = build_span.enter();

        let excluded = self.excluded_types()?;
        let mut diagrams: Vec<(String, Diagram)> = Vec::new();
        for package in self.included_packages() {
            let (node, relationships) = self.build_package(package, &excluded)?;
            let index = match diagrams.iter().position(|(name, _)| name == &package.name) {
                Some(index) => index,
                None => {
                    diagrams.push((package.name.clone(), Diagram::new(self.config.clone())));
                    diagrams.len() - 1
                }
            };
            let diagram = &mut diagrams[index].1;
            diagram.add_package(node);
            for relationship in relationships {
                diagram.add_relationship(relationship);
            }
        }

        let explicit = self.explicit_relationships(&excluded)?;
        for (name, diagram) in &mut diagrams {
            let owned: Vec<TypeName> = diagram
                .types()
                .into_iter()
                .map(|uml_type| uml_type.name().clone())
                .collect();
            for relationship in explicit.iter().filter(|r| owned.contains(&r.from)) {
                diagram.add_relationship(relationship.clone());
            }
            debug!(
                package = name.as_str(),
                types = diagram.type_count(),
                "Built package diagram"
            );
        }

        info!(diagrams = diagrams.len(), "Built package diagrams");
        Ok(diagrams)
    }

    fn included_packages(&self) -> impl Iterator<Item = &'f PackageDecl> {
        self.feed.packages.iter().filter(|package| {
            if package.excluded {
                debug!(package = package.name.as_str(), "Skipping excluded package");
            }
            !package.excluded
        })
    }

    /// Qualified names of every type that must not show up in any diagram,
    /// including the types of excluded packages
    fn excluded_types(&self) -> Result<HashSet<String>, UmlError> {
        let mut excluded = HashSet::new();
        for package in &self.feed.packages {
            for type_decl in &package.types {
                if package.excluded || type_decl.excluded {
                    excluded.insert(parse_name(&type_decl.name)?.qualified().to_string());
                }
            }
        }
        Ok(excluded)
    }

    fn build_package(
        &self,
        decl: &PackageDecl,
        excluded: &HashSet<String>,
    ) -> Result<(Package, Vec<Relationship>), UmlError> {
        let mut package = Package::new(decl.name.as_str());
        let mut relationships = Vec::new();

        for type_decl in &decl.types {
            if excluded.contains(parse_name(&type_decl.name)?.qualified()) {
                debug!(type_name = type_decl.name.as_str(), "Skipping excluded type");
                continue;
            }
            let uml_type = self.build_type(package.namespace(), type_decl)?;
            for supertype in &type_decl.supertypes {
                let relationship =
                    supertype_relationship(uml_type.name(), &supertype.name, supertype.kind)?;
                if excluded.contains(relationship.to.qualified()) {
                    debug!(supertype = supertype.name.as_str(), "Skipping excluded supertype");
                    continue;
                }
                relationships.push(relationship);
            }
            package.add_type(uml_type);
        }

        Ok((package, relationships))
    }

    fn build_type(&self, namespace: Namespace, decl: &TypeDecl) -> Result<Type, UmlError> {
        let mut uml_type = Type::new(namespace, decl.classification, parse_name(&decl.name)?)?;

        for field in &decl.fields {
            if field.excluded || !self.config.shows_field(field.visibility) {
                trace!(field = field.name.as_str(), "Field filtered out");
                continue;
            }
            uml_type.add_member(
                Field::new(field.name.as_str(), TypeName::parse(&field.type_name)?)
                    .with_visibility(field.visibility)
                    .with_static(field.is_static)
                    .with_deprecated(field.deprecated),
            );
        }

        for method in &decl.methods {
            if method.excluded || !self.config.shows_method(method.visibility) {
                trace!(method = method.name.as_str(), "Method filtered out");
                continue;
            }
            uml_type.add_member(build_method(method)?);
        }

        if decl.deprecated {
            uml_type = uml_type.deprecated();
        }
        if self.config.add_package_to_name {
            uml_type = uml_type.add_package_to_name();
        }
        Ok(uml_type)
    }

    fn explicit_relationships(
        &self,
        excluded: &HashSet<String>,
    ) -> Result<Vec<Relationship>, UmlError> {
        let mut relationships = Vec::new();
        for decl in &self.feed.relationships {
            let relationship = Relationship::with_arrow(
                parse_endpoint(&decl.from)?,
                &decl.arrow,
                parse_endpoint(&decl.to)?,
            )?;
            if excluded.contains(relationship.from.qualified())
                || excluded.contains(relationship.to.qualified())
            {
                debug!(
                    from = decl.from.as_str(),
                    to = decl.to.as_str(),
                    "Skipping relationship to excluded type"
                );
                continue;
            }
            relationships.push(match &decl.label {
                Some(label) => relationship.with_label(label.as_str()),
                None => relationship,
            });
        }
        Ok(relationships)
    }
}

fn build_method(decl: &MethodDecl) -> Result<Method, UmlError> {
    let mut method = Method::new(decl.name.as_str())
        .with_visibility(decl.visibility)
        .with_static(decl.is_static)
        .with_abstract(decl.is_abstract)
        .with_deprecated(decl.deprecated);
    for parameter in &decl.parameters {
        method = method.with_parameter(Parameter::new(
            parameter.name.as_str(),
            TypeName::parse(&parameter.type_name)?,
        ));
    }
    if let Some(returns) = &decl.returns {
        method = method.with_return_type(TypeName::parse(returns)?);
    }
    Ok(method)
}

fn supertype_relationship(
    from: &TypeName,
    supertype: &str,
    kind: RelationshipKind,
) -> Result<Relationship, UmlError> {
    match kind {
        RelationshipKind::Extends | RelationshipKind::Implements => {
            Ok(Relationship::new(from.clone(), kind, parse_endpoint(supertype)?))
        }
        other => Err(UmlError::feed(format!(
            "Supertype '{}' of '{}' must be 'extends' or 'implements', not '{}'",
            supertype,
            from.qualified(),
            other
        ))),
    }
}

fn parse_endpoint(input: &str) -> Result<TypeName, UmlError> {
    if input.trim().is_empty() {
        return Err(UmlError::feed("Relationship endpoint is empty"));
    }
    TypeName::parse(input)
}

/// Parse a declared name; a blank name becomes an empty name so that
/// [`Type::new`] reports it as an invalid argument
fn parse_name(input: &str) -> Result<TypeName, UmlError> {
    if input.trim().is_empty() {
        return Ok(TypeName::new(""));
    }
    TypeName::parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uml::{Classification, UmlNode, Visibility};

    fn feed(json: &str) -> Feed {
        Feed::from_json(json).unwrap()
    }

    #[test]
    fn test_visibility_filters_apply() {
        let feed = feed(
            r#"{"packages": [{"name": "p", "types": [{"name": "p.A",
                "fields": [{"name": "open", "type": "int"},
                           {"name": "hidden", "type": "int", "visibility": "private"}],
                "methods": [{"name": "run", "visibility": "protected"},
                            {"name": "helper", "visibility": "package"}]}]}]}"#,
        );
        let diagram = DiagramBuilder::new(&feed, RenderConfig::default())
            .class_diagram()
            .unwrap();
        let names: Vec<&str> = diagram.types()[0]
            .members()
            .iter()
            .map(|member| member.name())
            .collect();
        assert_eq!(names, vec!["open", "run"]);

        let everything = RenderConfig::default()
            .with_field_visibilities(Visibility::all())
            .with_method_visibilities(Visibility::all());
        let diagram = DiagramBuilder::new(&feed, everything).class_diagram().unwrap();
        assert_eq!(diagram.types()[0].members().len(), 4);
    }

    #[test]
    fn test_excluded_declarations_are_dropped() {
        let feed = feed(
            r#"{"packages": [
                {"name": "p", "types": [
                    {"name": "p.A", "fields": [{"name": "x", "type": "int", "excluded": true}]},
                    {"name": "p.B", "excluded": true}]},
                {"name": "q", "excluded": true, "types": [{"name": "q.C"}]}]}"#,
        );
        let diagram = DiagramBuilder::new(&feed, RenderConfig::default())
            .class_diagram()
            .unwrap();
        assert_eq!(diagram.type_count(), 1);
        assert!(diagram.types()[0].members().is_empty());
        assert_eq!(diagram.children().len(), 1);
    }

    #[test]
    fn test_excluded_types_leave_no_edges_behind() {
        let feed = feed(
            r#"{"packages": [
                {"name": "p", "types": [
                    {"name": "p.A", "supertypes": [{"name": "p.Hidden"}, {"name": "q.Gone", "kind": "implements"}, {"name": "p.Base"}]},
                    {"name": "p.Hidden", "excluded": true}]},
                {"name": "q", "excluded": true, "types": [{"name": "q.Gone"}]}],
              "relationships": [
                {"from": "p.A", "arrow": "-->", "to": "p.Hidden"},
                {"from": "p.Hidden<T>", "arrow": "..>", "to": "p.A"},
                {"from": "p.A", "arrow": "..>", "to": "p.Base"}]}"#,
        );
        let builder = DiagramBuilder::new(&feed, RenderConfig::default());

        let output = builder.class_diagram().unwrap().render();
        assert!(!output.contains("Hidden"));
        assert!(!output.contains("Gone"));
        assert!(output.contains("p.A --|> p.Base"));
        assert!(output.contains("p.A ..> p.Base"));

        let diagrams = builder.package_diagrams().unwrap();
        assert_eq!(diagrams.len(), 1);
        assert_eq!(diagrams[0].1.relationship_count(), 2);
        assert!(!diagrams[0].1.render().contains("Hidden"));
    }

    #[test]
    fn test_repeated_types_collapse_and_reconcile_generics() {
        let feed = feed(
            r#"{"packages": [{"name": "p", "types": [
                {"name": "p.Box<T>", "fields": [{"name": "value", "type": "T"}]},
                {"name": "p.Box<E>", "deprecated": true,
                 "methods": [{"name": "get", "returns": "E"}]}]}]}"#,
        );
        let diagram = DiagramBuilder::new(&feed, RenderConfig::default())
            .class_diagram()
            .unwrap();

        let types = diagram.types();
        assert_eq!(types.len(), 1);
        let merged = types[0];
        assert!(merged.is_deprecated());
        assert_eq!(merged.name().to_string(), "p.Box<E>");
        assert_eq!(
            merged.members()[0].referenced_types()[0].to_string(),
            "E"
        );
    }

    #[test]
    fn test_supertypes_become_relationships() {
        let feed = feed(
            r#"{"packages": [{"name": "p", "types": [{"name": "p.A",
                "supertypes": [{"name": "p.Base"}, {"name": "p.Api", "kind": "implements"}]}]}]}"#,
        );
        let diagram = DiagramBuilder::new(&feed, RenderConfig::default())
            .class_diagram()
            .unwrap();
        let arrows: Vec<&str> = diagram
            .relationships()
            .iter()
            .map(|relationship| relationship.kind.arrow())
            .collect();
        assert_eq!(arrows, vec!["--|>", "..|>"]);
    }

    #[test]
    fn test_supertype_kind_must_be_inheritance() {
        let feed = feed(
            r#"{"packages": [{"name": "p", "types": [{"name": "p.A",
                "supertypes": [{"name": "p.B", "kind": "composition"}]}]}]}"#,
        );
        let result = DiagramBuilder::new(&feed, RenderConfig::default()).class_diagram();
        assert!(matches!(result, Err(UmlError::Feed { .. })));
    }

    #[test]
    fn test_blank_type_name_is_invalid_argument() {
        let feed = feed(r#"{"packages": [{"name": "p", "types": [{"name": "  "}]}]}"#);
        let result = DiagramBuilder::new(&feed, RenderConfig::default()).class_diagram();
        assert!(matches!(result, Err(UmlError::InvalidArgument { .. })));
    }

    #[test]
    fn test_empty_relationship_endpoint_is_feed_error() {
        let feed = feed(r#"{"relationships": [{"from": "p.A", "arrow": "-->", "to": ""}]}"#);
        let result = DiagramBuilder::new(&feed, RenderConfig::default()).class_diagram();
        assert!(matches!(result, Err(UmlError::Feed { .. })));
    }

    #[test]
    fn test_bad_type_reference_is_reported() {
        let feed = feed(
            r#"{"packages": [{"name": "p", "types": [{"name": "p.A",
                "fields": [{"name": "x", "type": "List<"}]}]}]}"#,
        );
        let result = DiagramBuilder::new(&feed, RenderConfig::default()).class_diagram();
        assert!(matches!(result, Err(UmlError::TypeNameParse { .. })));
    }

    #[test]
    fn test_package_diagrams_split_by_package() {
        let feed = feed(
            r#"{"packages": [
                {"name": "p", "types": [{"name": "p.A"}]},
                {"name": "q", "types": [{"name": "q.B", "classification": "interface"}]},
                {"name": "p", "types": [{"name": "p.C"}]}],
              "relationships": [{"from": "q.B", "arrow": "<..", "to": "p.A"}]}"#,
        );
        let diagrams = DiagramBuilder::new(&feed, RenderConfig::default())
            .package_diagrams()
            .unwrap();

        let names: Vec<&str> = diagrams.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["p", "q"]);
        assert_eq!(diagrams[0].1.type_count(), 2);
        assert_eq!(diagrams[0].1.children().len(), 1);
        assert!(matches!(diagrams[0].1.children()[0], UmlNode::Package(_)));
        // `q.B <.. p.A` starts at p.A once normalized
        assert_eq!(diagrams[0].1.relationship_count(), 1);
        assert_eq!(diagrams[1].1.relationship_count(), 0);
        assert_eq!(
            diagrams[1].1.types()[0].classification(),
            Classification::Interface
        );
    }
}
