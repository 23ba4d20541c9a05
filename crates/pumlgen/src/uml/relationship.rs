//! Relationships between types
//!
//! Every relationship is stored pointing left to right: a left-pointing arrow
//! such as `<|--` is turned around by swapping its endpoints, so `B <|-- A` and
//! `A --|> B` are the same edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TypeName;
use crate::core::{UmlError, UmlWriter};

/// Relationship kind with its right-pointing PlantUML arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Extends,     // --|>
    Implements,  // ..|>
    Association, // -->
    Dependency,  // ..>
    Composition, // --*
    Aggregation, // --o
}

impl RelationshipKind {
    pub fn arrow(self) -> &'static str {
        match self {
            RelationshipKind::Extends => "--|>",
            RelationshipKind::Implements => "..|>",
            RelationshipKind::Association => "-->",
            RelationshipKind::Dependency => "..>",
            RelationshipKind::Composition => "--*",
            RelationshipKind::Aggregation => "--o",
        }
    }

    /// Parse an arrow or kind name; the flag is true for left-pointing arrows
    pub fn parse_arrow(arrow: &str) -> Result<(Self, bool), UmlError> {
        let parsed = match arrow.trim() {
            "--|>" | "extends" => (RelationshipKind::Extends, false),
            "<|--" => (RelationshipKind::Extends, true),
            "..|>" | "implements" => (RelationshipKind::Implements, false),
            "<|.." => (RelationshipKind::Implements, true),
            "-->" | "association" | "uses" => (RelationshipKind::Association, false),
            "<--" => (RelationshipKind::Association, true),
            "..>" | "dependency" => (RelationshipKind::Dependency, false),
            "<.." => (RelationshipKind::Dependency, true),
            "--*" | "composition" => (RelationshipKind::Composition, false),
            "*--" => (RelationshipKind::Composition, true),
            "--o" | "aggregation" => (RelationshipKind::Aggregation, false),
            "o--" => (RelationshipKind::Aggregation, true),
            other => {
                return Err(UmlError::UnknownRelationship {
                    arrow: other.to_string(),
                })
            }
        };
        Ok(parsed)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.arrow())
    }
}

impl FromStr for RelationshipKind {
    type Err = UmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_arrow(s)? {
            (kind, false) => Ok(kind),
            (_, true) => Err(UmlError::UnknownRelationship {
                arrow: s.to_string(),
            }),
        }
    }
}

/// Directed edge between two types
#[derive(Debug, Clone)]
pub struct Relationship {
    pub from: TypeName,
    pub to: TypeName,
    pub kind: RelationshipKind,
    pub label: Option<String>,
}

impl Relationship {
    pub fn new(from: TypeName, kind: RelationshipKind, to: TypeName) -> Self {
        Self {
            from,
            to,
            kind,
            label: None,
        }
    }

    /// Build from a PlantUML arrow, normalizing left-pointing arrows
    pub fn with_arrow(from: TypeName, arrow: &str, to: TypeName) -> Result<Self, UmlError> {
        let (kind, reversed) = RelationshipKind::parse_arrow(arrow)?;
        Ok(if reversed {
            Self::new(to, kind, from)
        } else {
            Self::new(from, kind, to)
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn write_to<'w, 'c>(&self, output: &'w mut UmlWriter<'c>) -> &'w mut UmlWriter<'c> {
        output
            .append(self.from.qualified())
            .whitespace()
            .append(self.kind.arrow())
            .whitespace()
            .append(self.to.qualified());
        if let Some(label) = &self.label {
            output.append(" : ").append(label);
        }
        output.newline()
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.kind == other.kind
    }
}

impl Eq for Relationship {}
