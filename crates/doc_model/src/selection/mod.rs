//! Selection model - cursors, spans and the algebra relating them
//!
//! A [`Selection`] is either nothing ([`Selection::Null`]), a span inside a
//! single property ([`PropertySelection`]) or a span across the nodes of a
//! container ([`ContainerSelection`]). Every relational query and transform
//! is answered by matching on both sides, so a new kind of selection only
//! needs a new arm in each operation.

mod adapter;
mod container;
mod fragment;
mod json;
mod property;

pub use adapter::*;
pub use container::*;
pub use fragment::*;
pub use json::*;
pub use property::*;

use crate::{DocModelError, Range, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which boundary a selection collapses to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    #[default]
    Right,
}

/// A selection in the document
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// No selection. Never inside, containing or overlapping anything.
    #[default]
    Null,
    Property(PropertySelection),
    Container(ContainerSelection),
}

impl Selection {
    pub fn is_null(&self) -> bool {
        matches!(self, Selection::Null)
    }

    pub fn is_property_selection(&self) -> bool {
        matches!(self, Selection::Property(_))
    }

    pub fn is_container_selection(&self) -> bool {
        matches!(self, Selection::Container(_))
    }

    pub fn as_property(&self) -> Option<&PropertySelection> {
        match self {
            Selection::Property(sel) => Some(sel),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerSelection> {
        match self {
            Selection::Container(sel) => Some(sel),
            _ => None,
        }
    }

    /// The null selection is not a caret, so it is never collapsed
    pub fn is_collapsed(&self) -> bool {
        match self {
            Selection::Null => false,
            Selection::Property(sel) => sel.is_collapsed(),
            Selection::Container(sel) => sel.is_collapsed(),
        }
    }

    pub fn is_reverse(&self) -> bool {
        match self {
            Selection::Null => false,
            Selection::Property(sel) => sel.is_reverse(),
            Selection::Container(sel) => sel.is_reverse(),
        }
    }

    pub fn container_id(&self) -> Option<&str> {
        match self {
            Selection::Null => None,
            Selection::Property(sel) => sel.container_id(),
            Selection::Container(sel) => Some(sel.container_id()),
        }
    }

    pub fn surface_id(&self) -> Option<&str> {
        match self {
            Selection::Null => None,
            Selection::Property(sel) => sel.surface_id(),
            Selection::Container(sel) => sel.surface_id(),
        }
    }

    pub fn range(&self) -> Option<Range> {
        match self {
            Selection::Null => None,
            Selection::Property(sel) => Some(sel.range()),
            Selection::Container(sel) => Some(sel.range()),
        }
    }

    pub fn is_inside_of(&self, other: &Selection, strict: bool) -> bool {
        match self {
            Selection::Null => false,
            Selection::Property(sel) => sel.is_inside_of(other, strict),
            Selection::Container(sel) => sel.is_inside_of(other, strict),
        }
    }

    /// Defined as `other.is_inside_of(self, strict)`
    pub fn contains(&self, other: &Selection, strict: bool) -> bool {
        other.is_inside_of(self, strict)
    }

    pub fn overlaps(&self, other: &Selection, strict: bool) -> bool {
        match self {
            Selection::Null => false,
            Selection::Property(sel) => sel.overlaps(other, strict),
            Selection::Container(sel) => sel.overlaps(other, strict),
        }
    }

    pub fn is_left_aligned_with(&self, other: &Selection) -> bool {
        match self {
            Selection::Null => false,
            Selection::Property(sel) => sel.is_left_aligned_with(other),
            Selection::Container(sel) => sel.is_left_aligned_with(other),
        }
    }

    pub fn is_right_aligned_with(&self, other: &Selection) -> bool {
        match self {
            Selection::Null => false,
            Selection::Property(sel) => sel.is_right_aligned_with(other),
            Selection::Container(sel) => sel.is_right_aligned_with(other),
        }
    }

    pub fn collapse(&self, direction: Direction) -> Selection {
        match self {
            Selection::Null => Selection::Null,
            Selection::Property(sel) => Selection::Property(sel.collapse(direction)),
            Selection::Container(sel) => Selection::Container(sel.collapse(direction)),
        }
    }

    pub fn expand(&self, other: &Selection) -> Result<Selection> {
        match self {
            Selection::Null => Ok(other.clone()),
            Selection::Property(sel) => sel.expand(other),
            Selection::Container(sel) => sel.expand(other),
        }
    }

    /// Only property selections can be truncated
    pub fn truncate_with(&self, other: &Selection) -> Result<Selection> {
        match self {
            Selection::Null => Ok(Selection::Null),
            Selection::Property(sel) => sel.truncate_with(other),
            Selection::Container(sel) => Err(DocModelError::UnsupportedTruncation {
                selection: sel.to_string(),
                other: other.to_string(),
            }),
        }
    }

    /// Renderable pieces of the selection; empty for the null selection
    pub fn fragments(&self) -> Result<Vec<SelectionFragment>> {
        match self {
            Selection::Null => Ok(Vec::new()),
            Selection::Property(sel) => Ok(sel.get_fragments().to_vec()),
            Selection::Container(sel) => sel.fragments(),
        }
    }
}

impl From<PropertySelection> for Selection {
    fn from(sel: PropertySelection) -> Self {
        Selection::Property(sel)
    }
}

impl From<ContainerSelection> for Selection {
    fn from(sel: ContainerSelection) -> Self {
        Selection::Container(sel)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Null => write!(f, "NullSelection"),
            Selection::Property(sel) => fmt::Display::fmt(sel, f),
            Selection::Container(sel) => fmt::Display::fmt(sel, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, Coordinate, Path};

    fn prop(start: usize, end: usize) -> Selection {
        PropertySelection::new(Path::property("p1", "content"), start, end)
            .unwrap()
            .into()
    }

    fn container() -> Selection {
        let body = Container::with_nodes("body", ["p1", "p2"]);
        ContainerSelection::new(
            &body,
            Coordinate::new(Path::property("p1", "content"), 2),
            Coordinate::new(Path::property("p2", "content"), 1),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_null_selection_is_absorbing() {
        let null = Selection::Null;
        for other in [prop(0, 3), container(), Selection::Null] {
            assert!(!null.is_inside_of(&other, false));
            assert!(!null.contains(&other, false));
            assert!(!null.overlaps(&other, false));
            assert!(!other.is_inside_of(&null, false));
            assert!(!other.contains(&null, false));
            assert!(!other.overlaps(&null, false));
            assert!(!null.is_left_aligned_with(&other));
            assert!(!null.is_right_aligned_with(&other));
        }
        assert!(null.fragments().unwrap().is_empty());
        assert_eq!(null.collapse(Direction::Left), Selection::Null);
    }

    #[test]
    fn test_mixed_dispatch() {
        let property = prop(4, 8);
        let container = container();

        assert!(property.is_inside_of(&container, true));
        assert!(container.contains(&property, true));
        assert!(property.overlaps(&container, false));
        assert!(container.overlaps(&property, false));

        let expanded = property.expand(&container).unwrap();
        assert!(expanded.is_container_selection());
        assert_eq!(expanded, container);
    }

    #[test]
    fn test_expand_from_null() {
        assert_eq!(Selection::Null.expand(&prop(1, 2)).unwrap(), prop(1, 2));
    }

    #[test]
    fn test_container_truncation_is_unsupported() {
        assert!(matches!(
            container().truncate_with(&prop(0, 1)),
            Err(DocModelError::UnsupportedTruncation { .. })
        ));
        assert_eq!(Selection::Null.truncate_with(&prop(0, 1)).unwrap(), Selection::Null);
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), r#""left""#);
        assert_eq!(Direction::default(), Direction::Right);
    }
}
