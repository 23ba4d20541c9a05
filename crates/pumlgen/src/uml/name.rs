//! Type references
//!
//! A [`TypeName`] names a possibly generic, possibly array type. Identity is the
//! qualified name alone: `List<String>` and `List<T>[]` compare equal. Generic
//! arguments may be wildcards (`?`, `? extends Number`, `? super T`).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chumsky::prelude::*;

use super::Namespace;
use crate::core::{TypeDisplay, UmlError};

/// Direction of a wildcard bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardBound {
    Extends,
    Super,
}

impl WildcardBound {
    pub fn keyword(self) -> &'static str {
        match self {
            WildcardBound::Extends => "extends",
            WildcardBound::Super => "super",
        }
    }
}

/// Reference to a type, with generic arguments and array dimensions
#[derive(Debug, Clone)]
pub struct TypeName {
    simple: String,
    qualified: String,
    generics: Vec<TypeName>,
    array_dimensions: usize,
    bound: Option<(WildcardBound, Box<TypeName>)>,
}

impl TypeName {
    /// Create a type name; the simple name is the last dotted segment
    pub fn new(qualified: impl Into<String>) -> Self {
        let qualified = qualified.into();
        let simple = qualified
            .rsplit('.')
            .next()
            .unwrap_or(qualified.as_str())
            .to_string();
        Self {
            simple,
            qualified,
            generics: Vec::new(),
            array_dimensions: 0,
            bound: None,
        }
    }

    /// The wildcard `?`, optionally bounded: `? extends Number`
    pub fn wildcard(bound: Option<(WildcardBound, TypeName)>) -> Self {
        Self {
            bound: bound.map(|(kind, name)| (kind, Box::new(name))),
            ..Self::new("?")
        }
    }

    pub fn with_generics(mut self, generics: Vec<TypeName>) -> Self {
        self.generics = generics;
        self
    }

    pub fn with_array_dimensions(mut self, dimensions: usize) -> Self {
        self.array_dimensions = dimensions;
        self
    }

    /// Parse a reference such as `java.util.Map<K, java.util.List<V>>[]`
    pub fn parse(input: &str) -> Result<Self, UmlError> {
        type_name_parser()
            .then_ignore(end())
            .parse(input)
            .into_result()
            .map_err(|errors| {
                let message = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                UmlError::type_name_parse(input, message)
            })
    }

    pub fn simple(&self) -> &str {
        &self.simple
    }

    pub fn qualified(&self) -> &str {
        &self.qualified
    }

    pub fn generics(&self) -> &[TypeName] {
        &self.generics
    }

    pub fn array_dimensions(&self) -> usize {
        self.array_dimensions
    }

    pub fn bound(&self) -> Option<(WildcardBound, &TypeName)> {
        self.bound.as_ref().map(|(kind, name)| (*kind, name.as_ref()))
    }

    pub fn is_wildcard(&self) -> bool {
        self.qualified == "?"
    }

    /// Same erased type: qualified name and array dimensions match
    ///
    /// This is what tells overloads apart; generic arguments do not.
    pub fn same_erasure(&self, other: &TypeName) -> bool {
        self.qualified == other.qualified && self.array_dimensions == other.array_dimensions
    }

    /// Replace every occurrence of `from` (by qualified name) with `to`
    ///
    /// Array dimensions of the replaced occurrence are kept, so substituting
    /// `T` with `String` turns `T[]` into `String[]`.
    pub fn substitute(&self, from: &TypeName, to: &TypeName) -> TypeName {
        self.substitute_all(&[(from, to)])
    }

    /// Apply several substitutions in one pass
    ///
    /// Each occurrence is matched against the original name only, so a
    /// replacement is never rewritten again by a later pair. Swapping `K` and `V`
    /// turns `Map<K, V>` into `Map<V, K>`.
    pub fn substitute_all(&self, substitutions: &[(&TypeName, &TypeName)]) -> TypeName {
        if let Some((_, to)) = substitutions.iter().find(|(from, _)| *from == self) {
            let dimensions = to.array_dimensions + self.array_dimensions;
            return (*to).clone().with_array_dimensions(dimensions);
        }
        TypeName {
            simple: self.simple.clone(),
            qualified: self.qualified.clone(),
            generics: self
                .generics
                .iter()
                .map(|generic| generic.substitute_all(substitutions))
                .collect(),
            array_dimensions: self.array_dimensions,
            bound: self
                .bound
                .as_ref()
                .map(|(kind, name)| (*kind, Box::new(name.substitute_all(substitutions)))),
        }
    }

    /// Render for a diagram
    ///
    /// With a namespace, a qualified name inside that namespace loses the
    /// namespace prefix. `TypeDisplay::None` renders nothing.
    pub fn to_uml(&self, display: TypeDisplay, namespace: Option<&Namespace>) -> String {
        let mut output = match display {
            TypeDisplay::None => return String::new(),
            TypeDisplay::Simple | TypeDisplay::QualifiedGenerics => self.simple.clone(),
            TypeDisplay::Qualified => self.qualified.clone(),
        };

        if let Some((kind, bound)) = &self.bound {
            let bound_display = match display {
                TypeDisplay::QualifiedGenerics => TypeDisplay::Qualified,
                other => other,
            };
            output.push(' ');
            output.push_str(kind.keyword());
            output.push(' ');
            output.push_str(&bound.to_uml(bound_display, namespace));
            return output;
        }

        if let Some(namespace) = namespace {
            let prefix = format!("{}.", namespace.name());
            if !namespace.name().is_empty() && output.starts_with(&prefix) {
                output.replace_range(..prefix.len(), "");
            }
        }

        if !self.generics.is_empty() {
            let generic_display = match display {
                TypeDisplay::QualifiedGenerics => TypeDisplay::Qualified,
                other => other,
            };
            let generics = self
                .generics
                .iter()
                .map(|generic| generic.to_uml(generic_display, namespace))
                .collect::<Vec<_>>()
                .join(", ");
            output.push('<');
            output.push_str(&generics);
            output.push('>');
        }

        for _ in 0..self.array_dimensions {
            output.push_str("[]");
        }
        output
    }
}

fn type_name_parser<'src>(
) -> impl Parser<'src, &'src str, TypeName, extra::Err<Rich<'src, char>>> + Clone {
    recursive(|type_name| {
        let qualified = any()
            .filter(|c: &char| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))
            .repeated()
            .at_least(1)
            .to_slice();

        let bound_kind = choice((
            just("extends").to(WildcardBound::Extends),
            just("super").to(WildcardBound::Super),
        ))
        .padded();

        let wildcard = just('?')
            .padded()
            .ignore_then(bound_kind.then(type_name.clone()).or_not())
            .map(TypeName::wildcard);

        let generics = type_name
            .separated_by(just(',').padded())
            .at_least(1)
            .collect::<Vec<TypeName>>()
            .delimited_by(just('<').padded(), just('>').padded());

        let dimensions = just('[')
            .padded()
            .then(just(']').padded())
            .repeated()
            .count();

        let named = qualified.padded().then(generics.or_not()).then(dimensions).map(
            |((qualified, generics), dimensions): ((&str, Option<Vec<TypeName>>), usize)| {
                TypeName::new(qualified)
                    .with_generics(generics.unwrap_or_default())
                    .with_array_dimensions(dimensions)
            },
        );

        wildcard.or(named)
    })
}

impl FromStr for TypeName {
    type Err = UmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uml(TypeDisplay::Qualified, None))
    }
}

impl PartialEq for TypeName {
    fn eq(&self, other: &Self) -> bool {
        self.qualified == other.qualified
    }
}

impl Eq for TypeName {}

impl Hash for TypeName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified.hash(state);
    }
}

impl PartialOrd for TypeName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified.cmp(&other.qualified)
    }
}
