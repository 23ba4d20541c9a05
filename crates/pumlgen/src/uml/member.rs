//! Type members: fields and methods
//!
//! Members render as a single line inside their type's body. Two members are the
//! same declaration when their identity matches: the name for fields, the name and
//! erased parameter types for methods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ParentRef, TypeName, UmlPart};
use crate::core::{UmlError, UmlWriter};

/// Visibility modifier for members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,    // +
    Protected, // #
    #[serde(alias = "package_private", alias = "package-private")]
    Package, // ~
    Private,   // -
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            '-' => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Protected => '#',
            Visibility::Package => '~',
            Visibility::Private => '-',
        }
    }

    pub fn all() -> Vec<Visibility> {
        vec![
            Visibility::Public,
            Visibility::Protected,
            Visibility::Package,
            Visibility::Private,
        ]
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl FromStr for Visibility {
    type Err = UmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" | "+" => Ok(Visibility::Public),
            "protected" | "#" => Ok(Visibility::Protected),
            "package" | "package-private" | "package_private" | "~" => Ok(Visibility::Package),
            "private" | "-" => Ok(Visibility::Private),
            _ => Err(UmlError::UnknownVisibility {
                value: s.to_string(),
            }),
        }
    }
}

fn write_typed_name(output: &mut UmlWriter<'_>, name: &str, type_name: &TypeName) {
    output.append(name);
    let rendered = type_name.to_uml(output.config().type_display, None);
    if !rendered.is_empty() {
        output.append(": ").append(rendered);
    }
}

/// A single method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_name: TypeName,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            type_name,
        }
    }
}

/// A field of a type
#[derive(Debug, Clone)]
pub struct Field {
    parent: Option<ParentRef>,
    pub visibility: Visibility,
    pub name: String,
    pub type_name: TypeName,
    pub is_static: bool,
    pub is_deprecated: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            parent: None,
            visibility: Visibility::Public,
            name: name.into(),
            type_name,
            is_static: false,
            is_deprecated: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_deprecated(mut self, is_deprecated: bool) -> Self {
        self.is_deprecated = is_deprecated;
        self
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl UmlPart for Field {
    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn set_parent(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output.append(self.visibility.to_char());
        if self.is_static {
            output.append("{static} ");
        }
        let name = if self.is_deprecated {
            format!("--{}--", self.name)
        } else {
            self.name.clone()
        };
        write_typed_name(output, &name, &self.type_name);
        output.newline()
    }
}

/// A method or constructor of a type
///
/// Constructors have no return type.
#[derive(Debug, Clone)]
pub struct Method {
    parent: Option<ParentRef>,
    pub visibility: Visibility,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeName>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_deprecated: bool,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parent: None,
            visibility: Visibility::Public,
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            is_static: false,
            is_abstract: false,
            is_deprecated: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: TypeName) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_deprecated(mut self, is_deprecated: bool) -> Self {
        self.is_deprecated = is_deprecated;
        self
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.type_name.same_erasure(&b.type_name))
    }
}

impl UmlPart for Method {
    fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    fn set_parent(&mut self, parent: ParentRef) {
        self.parent = Some(parent);
    }

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output.append(self.visibility.to_char());
        if self.is_abstract {
            output.append("{abstract} ");
        } else if self.is_static {
            output.append("{static} ");
        }
        if self.is_deprecated {
            output.append("--").append(&self.name).append("--");
        } else {
            output.append(&self.name);
        }

        output.append('(');
        for (index, parameter) in self.parameters.iter().enumerate() {
            if index > 0 {
                output.append(", ");
            }
            write_typed_name(output, &parameter.name, &parameter.type_name);
        }
        output.append(')');

        if let Some(return_type) = &self.return_type {
            let rendered = return_type.to_uml(output.config().type_display, None);
            if !rendered.is_empty() {
                output.append(": ").append(rendered);
            }
        }
        output.newline()
    }
}

/// A member attached to a type
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMember {
    Field(Field),
    Method(Method),
}

impl TypeMember {
    pub fn name(&self) -> &str {
        match self {
            TypeMember::Field(field) => &field.name,
            TypeMember::Method(method) => &method.name,
        }
    }

    /// Rewrite every reference to `from` into `to`
    pub fn replace_parameterized_type(&mut self, from: &TypeName, to: &TypeName) {
        self.replace_parameterized_types(&[(from, to)]);
    }

    /// Rewrite references for several type variables at once
    ///
    /// See [`TypeName::substitute_all`]: a rewritten reference is not matched
    /// again by a later pair.
    pub fn replace_parameterized_types(&mut self, substitutions: &[(&TypeName, &TypeName)]) {
        match self {
            TypeMember::Field(field) => {
                field.type_name = field.type_name.substitute_all(substitutions);
            }
            TypeMember::Method(method) => {
                for parameter in &mut method.parameters {
                    parameter.type_name = parameter.type_name.substitute_all(substitutions);
                }
                if let Some(return_type) = &method.return_type {
                    method.return_type = Some(return_type.substitute_all(substitutions));
                }
            }
        }
    }

    /// Every type reference this member mentions, in declaration order
    pub fn referenced_types(&self) -> Vec<&TypeName> {
        match self {
            TypeMember::Field(field) => vec![&field.type_name],
            TypeMember::Method(method) => method
                .parameters
                .iter()
                .map(|parameter| &parameter.type_name)
                .chain(method.return_type.as_ref())
                .collect(),
        }
    }
}

impl From<Field> for TypeMember {
    fn from(field: Field) -> Self {
        TypeMember::Field(field)
    }
}

impl From<Method> for TypeMember {
    fn from(method: Method) -> Self {
        TypeMember::Method(method)
    }
}

impl UmlPart for TypeMember {
    fn parent(&self) -> Option<&ParentRef> {
        match self {
            TypeMember::Field(field) => field.parent(),
            TypeMember::Method(method) => method.parent(),
        }
    }

    fn set_parent(&mut self, parent: ParentRef) {
        match self {
            TypeMember::Field(field) => field.set_parent(parent),
            TypeMember::Method(method) => method.set_parent(parent),
        }
    }

    fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        match self {
            TypeMember::Field(field) => field.write_to(output),
            TypeMember::Method(method) => method.write_to(output),
        }
    }
}
