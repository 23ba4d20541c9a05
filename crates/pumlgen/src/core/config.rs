//! Rendering configuration
//!
//! [`RenderConfig`] is owned by whoever parses flags or settings; the model only
//! reads it.

use std::fmt;
use std::str::FromStr;

use super::UmlError;
use crate::uml::Visibility;

/// How type references are displayed in member lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum TypeDisplay {
    /// Types are omitted entirely
    None,
    /// Simple names: `List<String>`
    #[default]
    Simple,
    /// Fully qualified names: `java.util.List<java.lang.String>`
    Qualified,
    /// Simple outer name with qualified generic arguments: `List<java.lang.String>`
    QualifiedGenerics,
}

impl fmt::Display for TypeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDisplay::None => write!(f, "none"),
            TypeDisplay::Simple => write!(f, "simple"),
            TypeDisplay::Qualified => write!(f, "qualified"),
            TypeDisplay::QualifiedGenerics => write!(f, "qualified-generics"),
        }
    }
}

impl FromStr for TypeDisplay {
    type Err = UmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "none" => Ok(TypeDisplay::None),
            "simple" => Ok(TypeDisplay::Simple),
            "qualified" => Ok(TypeDisplay::Qualified),
            "qualified-generics" => Ok(TypeDisplay::QualifiedGenerics),
            _ => Err(UmlError::UnknownTypeDisplay {
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for rendering a UML model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Display mode for field, parameter and return types
    pub type_display: TypeDisplay,
    /// Render types with a two-line label carrying their package
    pub add_package_to_name: bool,
    /// Field visibilities that are kept when building from a feed
    pub field_visibilities: Vec<Visibility>,
    /// Method visibilities that are kept when building from a feed
    pub method_visibilities: Vec<Visibility>,
    /// Base URL for type links; no links are rendered when absent
    pub link_base: Option<String>,
    /// Spaces per indentation level
    pub indentation: usize,
    /// Extra lines emitted right after `@startuml`
    pub custom_directives: Vec<String>,
    /// Emit `hide empty fields` and `hide empty methods`
    pub hide_empty_members: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            type_display: TypeDisplay::default(),
            add_package_to_name: false,
            field_visibilities: vec![Visibility::Public, Visibility::Protected],
            method_visibilities: vec![Visibility::Public, Visibility::Protected],
            link_base: None,
            indentation: 2,
            custom_directives: Vec::new(),
            hide_empty_members: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_display(mut self, display: TypeDisplay) -> Self {
        self.type_display = display;
        self
    }

    pub fn with_add_package_to_name(mut self, enabled: bool) -> Self {
        self.add_package_to_name = enabled;
        self
    }

    pub fn with_field_visibilities(mut self, visibilities: Vec<Visibility>) -> Self {
        self.field_visibilities = visibilities;
        self
    }

    pub fn with_method_visibilities(mut self, visibilities: Vec<Visibility>) -> Self {
        self.method_visibilities = visibilities;
        self
    }

    pub fn with_link_base(mut self, base: impl Into<String>) -> Self {
        self.link_base = Some(base.into());
        self
    }

    pub fn with_indentation(mut self, width: usize) -> Self {
        self.indentation = width;
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.custom_directives.push(directive.into());
        self
    }

    pub fn with_hide_empty_members(mut self, hide: bool) -> Self {
        self.hide_empty_members = hide;
        self
    }

    /// Whether a field with this visibility survives filtering
    pub fn shows_field(&self, visibility: Visibility) -> bool {
        self.field_visibilities.contains(&visibility)
    }

    /// Whether a method with this visibility survives filtering
    pub fn shows_method(&self, visibility: Visibility) -> bool {
        self.method_visibilities.contains(&visibility)
    }
}
