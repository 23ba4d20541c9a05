//! UML model of a program's type structure
//!
//! A [`Diagram`] owns packages, namespaces and types; types own their members.
//! Every node writes itself through a [`UmlWriter`](crate::core::UmlWriter) via
//! the [`UmlPart`] trait.

mod diagram;
mod member;
mod name;
mod namespace;
mod node;
mod part;
mod relationship;
mod types;

pub use diagram::*;
pub use member::*;
pub use name::*;
pub use namespace::*;
pub use node::UmlNode;
pub use part::*;
pub use relationship::*;
pub use types::*;

pub(crate) use node::adopt_child;
