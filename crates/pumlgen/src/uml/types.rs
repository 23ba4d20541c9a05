//! Types: classes, interfaces, enums and annotations
//!
//! A [`Type`] is identified by its [`TypeName`] alone. The deprecation and
//! package-label flags are set copy-on-write: [`Type::deprecated`] and
//! [`Type::add_package_to_name`] consume the type and hand its members to the
//! returned instance, so callers store the returned value.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Namespace, ParentRef, TypeMember, TypeName, UmlPart};
use crate::core::{TypeDisplay, UmlError, UmlWriter};

/// Classification of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Enum,
    Interface,
    Annotation,
    #[serde(alias = "abstract", alias = "abstract class")]
    AbstractClass,
    Class,
}

impl Classification {
    /// PlantUML keyword for this classification
    pub fn to_uml(self) -> &'static str {
        match self {
            Classification::Enum => "enum",
            Classification::Interface => "interface",
            Classification::Annotation => "annotation",
            Classification::AbstractClass => "abstract class",
            Classification::Class => "class",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_uml())
    }
}

impl FromStr for Classification {
    type Err = UmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], " ").as_str() {
            "enum" => Ok(Classification::Enum),
            "interface" => Ok(Classification::Interface),
            "annotation" => Ok(Classification::Annotation),
            "abstract class" | "abstract" => Ok(Classification::AbstractClass),
            "class" => Ok(Classification::Class),
            _ => Err(UmlError::UnknownClassification {
                value: s.to_string(),
            }),
        }
    }
}

/// Cross-reference from a rendered type to its documentation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    target: String,
}

impl Link {
    /// Documentation path of a type: `com/example/Outer.Inner.html`
    pub fn for_type(uml_type: &Type) -> Self {
        let package = uml_type.namespace().name();
        let qualified = uml_type.name().qualified();
        let in_package = if package.is_empty() {
            qualified
        } else {
            qualified
                .strip_prefix(package)
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(qualified)
        };

        let mut target = package.replace('.', "/");
        if !target.is_empty() {
            target.push('/');
        }
        target.push_str(in_package);
        target.push_str(".html");
        Self { target }
    }

    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Writes `[[base + target]]`, or nothing when links are not configured
    pub fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        if let Some(base) = &output.config().link_base {
            let url = format!("[[{}{}]]", base, self.target);
            output.append(url);
        }
        output
    }
}

/// A class, interface, enum or annotation with its members
#[derive(Debug)]
pub struct Type {
    parent: Option<ParentRef>,
    namespace: Namespace,
    classification: Classification,
    name: TypeName,
    is_deprecated: bool,
    add_package_to_name: bool,
    members: Vec<TypeMember>,
    link: OnceCell<Link>,
}

impl Type {
    /// Create a type in `namespace`
    ///
    /// # Errors
    ///
    /// Returns [`UmlError::InvalidArgument`] when the qualified name is empty.
    pub fn new(
        namespace: Namespace,
        classification: Classification,
        name: TypeName,
    ) -> Result<Self, UmlError> {
        if name.qualified().trim().is_empty() {
            return Err(UmlError::invalid_argument("Type name is <empty>."));
        }
        Ok(Self {
            parent: None,
            namespace,
            classification,
            name,
            is_deprecated: false,
            add_package_to_name: false,
            members: Vec::new(),
            link: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_deprecated(&self) -> bool {
        self.is_deprecated
    }

    pub fn adds_package_to_name(&self) -> bool {
        self.add_package_to_name
    }

    pub fn members(&self) -> &[TypeMember] {
        &self.members
    }

    /// Attach a member unless an identical declaration is already present
    ///
    /// Returns whether the member was added.
    pub fn add_member(&mut self, member: impl Into<TypeMember>) -> bool {
        let mut member = member.into();
        if self.members.contains(&member) {
            debug!(
                type_name = self.name.qualified(),
                member = member.name(),
                "Skipping duplicate member"
            );
            return false;
        }
        member.set_parent(ParentRef::Type(self.name.qualified().to_string()));
        self.members.push(member);
        true
    }

    /// Same type, flagged deprecated, owning the same members
    pub fn deprecated(self) -> Type {
        Type {
            is_deprecated: true,
            ..self
        }
    }

    /// Same type, rendered with a two-line label carrying its package
    pub fn add_package_to_name(self) -> Type {
        Type {
            add_package_to_name: true,
            ..self
        }
    }

    /// Adopt a more complete generic signature for this type
    ///
    /// Applies only when `name` has the same qualified name and the same number of
    /// generic arguments; otherwise nothing changes. Member references to the old
    /// argument at each position are rewritten to the new argument.
    pub fn update_generic_type_variables(&mut self, name: TypeName) {
        if name != self.name || name.generics().len() != self.name.generics().len() {
            return;
        }
        let previous = std::mem::replace(&mut self.name, name);
        let substitutions: Vec<(&TypeName, &TypeName)> = previous
            .generics()
            .iter()
            .zip(self.name.generics())
            .collect();
        for member in &mut self.members {
            member.replace_parameterized_types(&substitutions);
        }
        debug!(from = %previous, to = %self.name, "Updated generic type variables");
    }

    /// Fold another declaration of the same type into this one
    ///
    /// Generic variables are reconciled with the other name, missing members are
    /// appended and set flags carry over through the copy-on-write operations.
    pub fn merge(mut self, other: Type) -> Type {
        self.update_generic_type_variables(other.name.clone());
        for member in other.members {
            self.add_member(member);
        }
        let mut merged = self;
        if other.is_deprecated && !merged.is_deprecated {
            merged = merged.deprecated();
        }
        if other.add_package_to_name && !merged.add_package_to_name {
            merged = merged.add_package_to_name();
        }
        merged
    }

    /// The memoized documentation link
    pub fn link(&self) -> &Link {
        self.link_with(Link::for_type)
    }

    /// The memoized link, computed by `factory` on first access only
    pub fn link_with(&self, factory: impl FnOnce(&Type) -> Link) -> &Link {
        self.link.get_or_init(|| factory(self))
    }

    fn write_name_to<'w, 'c>(
        &self,
        output: &'w mut UmlWriter<'c>,
        namespace: Option<&Namespace>,
    ) -> &'w mut UmlWriter<'c> {
        // Textual prefix check: a name that merely starts with the package name
        // also gets the two-line label.
        let package = self.namespace.name();
        let prefix = format!("{}.", package);
        if self.add_package_to_name && self.name.qualified().starts_with(&prefix) {
            let name_in_package = &self.name.qualified()[prefix.len()..];
            output
                .append("\"<size:14>")
                .append(name_in_package)
                .append("\\n<size:10>")
                .append(package)
                .append("\" as ");
        }
        output.append(self.name.to_uml(TypeDisplay::Qualified, namespace))
    }

    fn write_header_to<'w, 'c>(
        &self,
        output: &'w mut UmlWriter<'c>,
        keyword: &str,
        namespace: Option<&Namespace>,
    ) -> &'w mut UmlWriter<'c> {
        output.append(keyword).whitespace();
        self.write_name_to(output, namespace).whitespace();
        if self.is_deprecated {
            output.append("<<deprecated>>").whitespace();
        }
        self.link().write_to(output).whitespace()
    }
}

impl UmlPart for Type {
    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn set_parent(&mut self, parent: ParentRef) {
        if self.namespace.parent().is_none() {
            self.namespace.set_parent(parent.clone());
        }
        self.parent = Some(parent);
    }

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        // Inside a package block names are written relative to that package
        let compensation = self
            .parent
            .as_ref()
            .and_then(ParentRef::package_name)
            .map(|package| Namespace::new(package).with_parent(ParentRef::Diagram));
        let namespace = compensation.as_ref();

        match self.classification {
            Classification::Annotation => {
                // Members are shown on an interface body; the separate annotation
                // declaration gives the node its annotation shape.
                self.write_header_to(output, Classification::Interface.to_uml(), namespace);
                self.write_children_to(output).newline();
                output
                    .append(Classification::Annotation.to_uml())
                    .whitespace()
                    .append(self.name.to_uml(TypeDisplay::Qualified, namespace))
                    .newline()
            }
            Classification::Enum
            | Classification::Interface
            | Classification::AbstractClass
            | Classification::Class => {
                self.write_header_to(output, self.classification.to_uml(), namespace);
                self.write_children_to(output).newline()
            }
        }
    }

    fn write_children_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        if !self.members.is_empty() {
            output.append('{').newline();
            output.indented(|output| {
                for member in &self.members {
                    member.write_to(output);
                }
            });
            output.append('}');
        }
        output
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Type {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Type {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}
