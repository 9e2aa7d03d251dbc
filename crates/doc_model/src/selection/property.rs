//! Selections confined to a single property

use super::{ContainerSelection, Direction, Selection, SelectionFragment};
use crate::{slice_graphemes, Coordinate, DocModelError, Document, DocumentHandle, Path, Range, Result};
use std::fmt;
use std::sync::{OnceLock, RwLock, Weak};

/// A span (or caret) inside one text property.
///
/// Instances are values: every transform returns a new selection. The only
/// way to change a selection's fields in place is through the adapters in
/// [`super::adapter`], which need exclusive (`&mut`) access.
#[derive(Clone)]
pub struct PropertySelection {
    pub(crate) path: Path,
    pub(crate) start_offset: usize,
    pub(crate) end_offset: usize,
    pub(crate) reverse: bool,
    pub(crate) container_id: Option<String>,
    pub(crate) surface_id: Option<String>,
    document: Option<Weak<RwLock<Document>>>,
    pub(crate) fragments: OnceLock<Vec<SelectionFragment>>,
}

impl PropertySelection {
    /// Create a forward selection. Fails if `start_offset > end_offset`.
    pub fn new(path: Path, start_offset: usize, end_offset: usize) -> Result<Self> {
        if start_offset > end_offset {
            return Err(DocModelError::InvalidSelection(format!(
                "start offset {} is after end offset {} in {}",
                start_offset, end_offset, path
            )));
        }
        Ok(Self {
            path,
            start_offset,
            end_offset,
            reverse: false,
            container_id: None,
            surface_id: None,
            document: None,
            fragments: OnceLock::new(),
        })
    }

    /// Create a caret at `offset`
    pub fn collapsed(path: Path, offset: usize) -> Self {
        Self {
            path,
            start_offset: offset,
            end_offset: offset,
            reverse: false,
            container_id: None,
            surface_id: None,
            document: None,
            fragments: OnceLock::new(),
        }
    }

    /// Create a selection from where the user started to where the caret is
    pub fn from_anchor_focus(path: Path, anchor: usize, focus: usize) -> Self {
        let mut sel = Self::collapsed(path, anchor.min(focus));
        sel.end_offset = anchor.max(focus);
        sel.reverse = focus < anchor;
        sel
    }

    /// Set whether the focus is at the start
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Record the container the property lives in
    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    /// Record the editing surface the selection belongs to
    pub fn with_surface_id(mut self, surface_id: impl Into<String>) -> Self {
        self.surface_id = Some(surface_id.into());
        self
    }

    /// Associate the selection with a live document without owning it
    pub fn attach(mut self, document: &DocumentHandle) -> Self {
        self.document = Some(std::sync::Arc::downgrade(document));
        self
    }

    /// Drop the document attachment
    pub fn detach(mut self) -> Self {
        self.document = None;
        self
    }

    /// The attached document, if it is still alive
    pub fn document(&self) -> Option<DocumentHandle> {
        self.document.as_ref().and_then(Weak::upgrade)
    }

    /// True while the attached document is alive
    pub fn is_attached(&self) -> bool {
        self.document().is_some()
    }

    /// Path of the selected property
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Offset of the start boundary
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Offset of the end boundary
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// True if the focus is at the start boundary
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Id of the enclosing container, if known
    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    /// Id of the editing surface, if known
    pub fn surface_id(&self) -> Option<&str> {
        self.surface_id.as_deref()
    }

    /// Start boundary as a coordinate
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.path.clone(), self.start_offset)
    }

    /// End boundary as a coordinate
    pub fn end(&self) -> Coordinate {
        Coordinate::new(self.path.clone(), self.end_offset)
    }

    /// The selection as a range value
    pub fn range(&self) -> Range {
        Range {
            start: self.start(),
            end: self.end(),
            reverse: self.reverse,
            container_id: self.container_id.clone(),
            surface_id: self.surface_id.clone(),
        }
    }

    /// True if the selection is a caret
    pub fn is_collapsed(&self) -> bool {
        self.start_offset == self.end_offset
    }

    /// Check whether this selection lies within `other`
    pub fn is_inside_of(&self, other: &Selection, strict: bool) -> bool {
        match other {
            Selection::Null => false,
            Selection::Property(other) => self.is_inside_of_property(other, strict),
            Selection::Container(other) => other.contains_property(self, strict),
        }
    }

    /// Mirror of [`is_inside_of`](Self::is_inside_of): the comparison is
    /// always evaluated from the contained side.
    pub fn contains(&self, other: &Selection, strict: bool) -> bool {
        match other {
            Selection::Null => false,
            Selection::Property(other) => other.is_inside_of_property(self, strict),
            Selection::Container(other) => other.is_inside_of_property(self, strict),
        }
    }

    pub(crate) fn is_inside_of_property(&self, other: &PropertySelection, strict: bool) -> bool {
        if self.path != other.path {
            return false;
        }
        if strict {
            self.start_offset > other.start_offset && self.end_offset < other.end_offset
        } else {
            self.start_offset >= other.start_offset && self.end_offset <= other.end_offset
        }
    }

    /// Non-strict overlap counts touching boundaries, strict overlap does not
    pub fn overlaps(&self, other: &Selection, strict: bool) -> bool {
        match other {
            Selection::Null => false,
            Selection::Container(other) => other.overlaps_property(self, strict),
            Selection::Property(other) => {
                if self.path != other.path {
                    return false;
                }
                if strict {
                    !(self.start_offset >= other.end_offset || self.end_offset <= other.start_offset)
                } else {
                    !(self.start_offset > other.end_offset || self.end_offset < other.start_offset)
                }
            }
        }
    }

    /// True if both selections start at the same coordinate
    pub fn is_left_aligned_with(&self, other: &Selection) -> bool {
        match other {
            Selection::Null => false,
            Selection::Container(other) => other.is_left_aligned_with_property(self),
            Selection::Property(other) => {
                self.path == other.path && self.start_offset == other.start_offset
            }
        }
    }

    /// True if both selections end at the same coordinate
    pub fn is_right_aligned_with(&self, other: &Selection) -> bool {
        match other {
            Selection::Null => false,
            Selection::Container(other) => other.is_right_aligned_with_property(self),
            Selection::Property(other) => {
                self.path == other.path && self.end_offset == other.end_offset
            }
        }
    }

    /// Collapse to the start (`Left`) or end (`Right`) boundary
    pub fn collapse(&self, direction: Direction) -> Self {
        let offset = match direction {
            Direction::Left => self.start_offset,
            Direction::Right => self.end_offset,
        };
        self.derive(offset, offset)
    }

    /// Union of both selections.
    ///
    /// Two property selections must share a path; a container selection on
    /// the other side produces a container selection.
    pub fn expand(&self, other: &Selection) -> Result<Selection> {
        match other {
            Selection::Null => Ok(Selection::Property(self.clone())),
            Selection::Container(other) => other.expand_with_property(self),
            Selection::Property(other) => {
                if self.path != other.path {
                    return Err(DocModelError::IncompatiblePath {
                        left: self.path.clone(),
                        right: other.path.clone(),
                    });
                }
                let start = self.start_offset.min(other.start_offset);
                let end = self.end_offset.max(other.end_offset);
                tracing::trace!("expand {} with {} -> [{}, {}]", self, other, start, end);
                self.create_with_new_range(start, end).map(Selection::Property)
            }
        }
    }

    /// Remove the part of this selection covered by `other`.
    ///
    /// Only one-sided overlaps are supported; the result is always a single
    /// contiguous selection or the null selection.
    pub fn truncate_with(&self, other: &Selection) -> Result<Selection> {
        if self.contains(other, true) {
            return Err(DocModelError::UnsupportedTruncation {
                selection: self.to_string(),
                other: other.to_string(),
            });
        }
        if !self.overlaps(other, false) {
            return Ok(Selection::Property(self.clone()));
        }

        let (other_start, other_end) = match other {
            Selection::Null => return Ok(Selection::Property(self.clone())),
            Selection::Property(other) => (other.start_offset, other.end_offset),
            Selection::Container(other) => self.resolve_container_boundaries(other),
        };

        let (start, end) = (self.start_offset, self.end_offset);
        let (new_start, new_end) = if other_start > start && other_end > end {
            (start, other_start)
        } else if other_start < start && other_end < end {
            (other_end, end)
        } else if other_start == start {
            if other_end >= end {
                return Ok(Selection::Null);
            }
            (other_end, end)
        } else if other_end == end {
            if other_start <= start {
                return Ok(Selection::Null);
            }
            (start, other_start)
        } else if other_start <= start && other_end >= end {
            return Ok(Selection::Null);
        } else {
            tracing::error!(
                "truncation of {} with {} fell through all cases ({}..{})",
                self,
                other,
                other_start,
                other_end
            );
            return Err(DocModelError::InvariantViolation(format!(
                "can not truncate {} with {}",
                self, other
            )));
        };

        tracing::trace!("truncate {} with {} -> [{}, {}]", self, other, new_start, new_end);
        self.create_with_new_range(new_start, new_end)
            .map(Selection::Property)
    }

    /// A container boundary constrains this selection only where its path
    /// matches ours; otherwise our own boundary is used.
    fn resolve_container_boundaries(&self, other: &ContainerSelection) -> (usize, usize) {
        let start = if other.start_path() == &self.path {
            other.start_offset()
        } else {
            self.start_offset
        };
        let end = if other.end_path() == &self.path {
            other.end_offset()
        } else {
            self.end_offset
        };
        (start, end)
    }

    /// Derive a new, non-reversed selection on the same property.
    ///
    /// Keeps the container, surface and document attachment.
    pub fn create_with_new_range(&self, start_offset: usize, end_offset: usize) -> Result<Self> {
        if start_offset > end_offset {
            return Err(DocModelError::InvalidSelection(format!(
                "start offset {} is after end offset {} in {}",
                start_offset, end_offset, self.path
            )));
        }
        Ok(self.derive(start_offset, end_offset))
    }

    fn derive(&self, start_offset: usize, end_offset: usize) -> Self {
        Self {
            path: self.path.clone(),
            start_offset,
            end_offset,
            reverse: false,
            container_id: self.container_id.clone(),
            surface_id: self.surface_id.clone(),
            document: self.document.clone(),
            fragments: OnceLock::new(),
        }
    }

    /// `[Cursor]` when collapsed, `[Fragment]` otherwise. Computed once.
    pub fn get_fragments(&self) -> &[SelectionFragment] {
        self.fragments.get_or_init(|| {
            if self.is_collapsed() {
                vec![SelectionFragment::cursor(self.path.clone(), self.start_offset)]
            } else {
                vec![SelectionFragment::fragment(
                    self.path.clone(),
                    self.start_offset,
                    self.end_offset,
                )]
            }
        })
    }

    /// The selected text, read through the attached document
    pub fn text(&self) -> Result<String> {
        let document = self.document().ok_or(DocModelError::Detached)?;
        let doc = document.read().map_err(|_| {
            DocModelError::InvalidOperation("document lock is poisoned".to_string())
        })?;
        let content = doc.get_text(&self.path)?;
        slice_graphemes(content, self.start_offset, self.end_offset)
            .map(str::to_string)
            .ok_or_else(|| DocModelError::InvalidPosition {
                path: self.path.clone(),
                offset: self.end_offset,
            })
    }

    /// Drop memoized fragments after an in-place field write
    pub(crate) fn invalidate(&mut self) {
        self.fragments = OnceLock::new();
    }
}

impl PartialEq for PropertySelection {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.start_offset == other.start_offset
            && self.end_offset == other.end_offset
            && self.reverse == other.reverse
            && self.container_id == other.container_id
            && self.surface_id == other.surface_id
    }
}

impl fmt::Debug for PropertySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySelection")
            .field("path", &self.path)
            .field("start_offset", &self.start_offset)
            .field("end_offset", &self.end_offset)
            .field("reverse", &self.reverse)
            .field("container_id", &self.container_id)
            .field("surface_id", &self.surface_id)
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl fmt::Display for PropertySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertySelection({}, [{}, {}]", self.path, self.start_offset, self.end_offset)?;
        if self.reverse {
            write!(f, ", reverse")?;
        }
        if let Some(container_id) = &self.container_id {
            write!(f, ", container={}", container_id)?;
        }
        if let Some(surface_id) = &self.surface_id {
            write!(f, ", surface={}", surface_id)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, Node};

    fn path() -> Path {
        Path::property("p1", "content")
    }

    fn sel(start: usize, end: usize) -> PropertySelection {
        PropertySelection::new(path(), start, end).unwrap()
    }

    fn wrap(start: usize, end: usize) -> Selection {
        Selection::Property(sel(start, end))
    }

    #[test]
    fn test_construction_rejects_inverted_offsets() {
        assert!(matches!(
            PropertySelection::new(path(), 6, 3),
            Err(DocModelError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_from_anchor_focus() {
        let backwards = PropertySelection::from_anchor_focus(path(), 8, 2);
        assert_eq!((backwards.start_offset(), backwards.end_offset()), (2, 8));
        assert!(backwards.is_reverse());
        assert_eq!(backwards.range().anchor().offset, 8);

        let forwards = PropertySelection::from_anchor_focus(path(), 2, 8);
        assert!(!forwards.is_reverse());
    }

    #[test]
    fn test_inside_of() {
        let outer = wrap(0, 10);
        assert!(sel(2, 5).is_inside_of(&outer, false));
        assert!(sel(2, 5).is_inside_of(&outer, true));
        assert!(sel(0, 5).is_inside_of(&outer, false));
        assert!(!sel(0, 5).is_inside_of(&outer, true));
        assert!(!sel(5, 11).is_inside_of(&outer, false));
        assert!(!sel(2, 5).is_inside_of(&Selection::Null, false));

        let elsewhere = PropertySelection::new(Path::property("p2", "content"), 0, 10).unwrap();
        assert!(!sel(2, 5).is_inside_of(&Selection::Property(elsewhere), false));
    }

    #[test]
    fn test_contains_mirrors_inside_of() {
        let outer = sel(0, 10);
        assert!(outer.contains(&wrap(3, 6), true));
        assert!(outer.contains(&wrap(0, 10), false));
        assert!(!outer.contains(&wrap(0, 10), true));
        assert!(!outer.contains(&Selection::Null, false));
    }

    #[test]
    fn test_overlaps() {
        let s = sel(0, 5);
        assert!(s.overlaps(&wrap(3, 8), true));
        assert!(s.overlaps(&wrap(5, 8), false));
        assert!(!s.overlaps(&wrap(5, 8), true));
        assert!(!s.overlaps(&wrap(6, 8), false));
        assert!(!s.overlaps(&Selection::Null, false));
    }

    #[test]
    fn test_alignment() {
        let s = sel(2, 6);
        assert!(s.is_left_aligned_with(&wrap(2, 9)));
        assert!(!s.is_left_aligned_with(&wrap(3, 6)));
        assert!(s.is_right_aligned_with(&wrap(3, 6)));
        assert!(!s.is_right_aligned_with(&Selection::Null));
    }

    #[test]
    fn test_alignment_with_container_selection() {
        let body = Container::with_nodes("body", ["p1", "p2"]);
        let across: Selection = ContainerSelection::new(
            &body,
            Coordinate::new(path(), 2),
            Coordinate::new(Path::property("p2", "content"), 4),
        )
        .unwrap()
        .into();

        assert!(sel(2, 9).is_left_aligned_with(&across));
        assert!(!sel(2, 9).is_right_aligned_with(&across));
        assert!(!sel(3, 9).is_left_aligned_with(&across));

        let tail = PropertySelection::new(Path::property("p2", "content"), 0, 4).unwrap();
        assert!(tail.is_right_aligned_with(&across));
        assert!(!tail.is_left_aligned_with(&across));

        // Same answer from either side
        assert!(across.is_left_aligned_with(&wrap(2, 9)));
        assert!(across.is_right_aligned_with(&tail.into()));
    }

    #[test]
    fn test_collapse() {
        let s = sel(3, 6).with_reverse(true);
        let left = s.collapse(Direction::Left);
        assert_eq!((left.start_offset(), left.end_offset()), (3, 3));
        assert!(!left.is_reverse());

        let right = s.collapse(Direction::Right);
        assert_eq!((right.start_offset(), right.end_offset()), (6, 6));
    }

    #[test]
    fn test_expand() {
        let expanded = sel(2, 4).expand(&wrap(3, 9)).unwrap();
        let expanded = expanded.as_property().unwrap();
        assert_eq!((expanded.start_offset(), expanded.end_offset()), (2, 9));

        let other = PropertySelection::new(Path::property("p2", "content"), 0, 1).unwrap();
        assert!(matches!(
            sel(2, 4).expand(&Selection::Property(other)),
            Err(DocModelError::IncompatiblePath { .. })
        ));
        assert_eq!(sel(2, 4).expand(&Selection::Null).unwrap(), wrap(2, 4));
    }

    #[test]
    fn test_truncate_cases() {
        let s = sel(0, 10);
        assert_eq!(s.truncate_with(&wrap(5, 15)).unwrap(), wrap(0, 5));

        let s = sel(5, 10);
        assert_eq!(s.truncate_with(&wrap(0, 7)).unwrap(), wrap(7, 10));
        assert_eq!(s.truncate_with(&wrap(5, 7)).unwrap(), wrap(7, 10));
        assert_eq!(s.truncate_with(&wrap(8, 10)).unwrap(), wrap(5, 8));
        assert_eq!(s.truncate_with(&wrap(5, 12)).unwrap(), Selection::Null);
        assert_eq!(s.truncate_with(&wrap(2, 10)).unwrap(), Selection::Null);
        assert_eq!(s.truncate_with(&wrap(0, 20)).unwrap(), Selection::Null);
        assert_eq!(s.truncate_with(&wrap(12, 20)).unwrap(), wrap(5, 10));
        assert_eq!(s.truncate_with(&Selection::Null).unwrap(), wrap(5, 10));
    }

    #[test]
    fn test_truncate_with_contained_selection_fails() {
        assert!(matches!(
            sel(0, 10).truncate_with(&wrap(3, 6)),
            Err(DocModelError::UnsupportedTruncation { .. })
        ));
    }

    #[test]
    fn test_truncate_with_container_selection() {
        let body = Container::with_nodes("body", ["p1", "p2"]);
        let other = ContainerSelection::new(
            &body,
            Coordinate::new(path(), 6),
            Coordinate::new(Path::property("p2", "content"), 3),
        )
        .unwrap();

        let truncated = sel(2, 10)
            .truncate_with(&Selection::Container(other))
            .unwrap();
        assert_eq!(truncated, wrap(2, 6));
    }

    #[test]
    fn test_create_with_new_range_keeps_context() {
        let doc = Document::new().into_handle();
        let s = sel(1, 2)
            .with_reverse(true)
            .with_container_id("body")
            .with_surface_id("main")
            .attach(&doc);

        let derived = s.create_with_new_range(4, 7).unwrap();
        assert!(!derived.is_reverse());
        assert_eq!(derived.container_id(), Some("body"));
        assert_eq!(derived.surface_id(), Some("main"));
        assert!(derived.is_attached());
        assert!(s.create_with_new_range(7, 4).is_err());
    }

    #[test]
    fn test_fragments() {
        let s = sel(3, 6);
        let fragments = s.get_fragments();
        assert_eq!(fragments.len(), 1);
        let fragment = fragments[0].as_fragment().unwrap();
        assert_eq!((fragment.start_offset, fragment.end_offset), (3, 6));

        let caret = PropertySelection::collapsed(path(), 4);
        assert_eq!(caret.get_fragments()[0].as_cursor().unwrap().offset, 4);
    }

    #[test]
    fn test_text_through_attached_document() {
        let mut doc = Document::new();
        doc.insert_node(Node::new("p1", "paragraph").with_property("content", "Hello world"));
        let doc = doc.into_handle();

        let s = sel(6, 11).attach(&doc);
        assert_eq!(s.text().unwrap(), "world");

        let past_end = sel(6, 20).attach(&doc);
        assert!(matches!(
            past_end.text(),
            Err(DocModelError::InvalidPosition { offset: 20, .. })
        ));

        drop(doc);
        assert!(!s.is_attached());
        assert_eq!(s.text(), Err(DocModelError::Detached));
    }
}
