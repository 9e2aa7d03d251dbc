//! Selections spanning several properties of an ordered container

use super::{Direction, PropertySelection, Selection, SelectionFragment};
use crate::{Container, Coordinate, DocModelError, Document, DocumentHandle, Path, Range, Result};
use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

/// A selection from one coordinate to another inside a container.
///
/// The container's node order is captured when the selection is created, so
/// coordinates can be compared without a document. Coordinates are ordered
/// by node position first, then by path, then by offset.
#[derive(Clone)]
pub struct ContainerSelection {
    container_id: String,
    start: Coordinate,
    end: Coordinate,
    reverse: bool,
    surface_id: Option<String>,
    nodes: Arc<[String]>,
    document: Option<Weak<RwLock<Document>>>,
}

impl ContainerSelection {
    /// Create a forward selection. Both boundaries must lie in `container`
    /// and `start` must not come after `end`.
    pub fn new(container: &Container, start: Coordinate, end: Coordinate) -> Result<Self> {
        Self::from_parts(container.id(), container.nodes().into(), start, end)
    }

    pub(crate) fn from_parts(
        container_id: impl Into<String>,
        nodes: Arc<[String]>,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Self> {
        let sel = Self {
            container_id: container_id.into(),
            start,
            end,
            reverse: false,
            surface_id: None,
            nodes,
            document: None,
        };
        match sel.compare(&sel.start, &sel.end) {
            Some(Ordering::Greater) => Err(DocModelError::InvalidSelection(format!(
                "container selection start {} is after end {}",
                sel.start, sel.end
            ))),
            Some(_) => Ok(sel),
            None => Err(DocModelError::InvalidSelection(format!(
                "{} or {} is not part of container {}",
                sel.start, sel.end, sel.container_id
            ))),
        }
    }

    /// Create a selection from where the user started to where the caret is
    pub fn from_anchor_focus(container: &Container, anchor: Coordinate, focus: Coordinate) -> Result<Self> {
        let nodes: Arc<[String]> = container.nodes().into();
        match Self::from_parts(container.id(), nodes.clone(), anchor.clone(), focus.clone()) {
            Ok(sel) => Ok(sel),
            Err(_) => Ok(Self::from_parts(container.id(), nodes, focus, anchor)?.with_reverse(true)),
        }
    }

    /// Set whether the focus is at the start
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Record the editing surface the selection belongs to
    pub fn with_surface_id(mut self, surface_id: impl Into<String>) -> Self {
        self.surface_id = Some(surface_id.into());
        self
    }

    /// Associate the selection with a live document without owning it
    pub fn attach(mut self, document: &DocumentHandle) -> Self {
        self.document = Some(Arc::downgrade(document));
        self
    }

    /// The attached document, if it is still alive
    pub fn document(&self) -> Option<DocumentHandle> {
        self.document.as_ref().and_then(Weak::upgrade)
    }

    /// Id of the container the selection spans
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Start boundary
    pub fn start(&self) -> &Coordinate {
        &self.start
    }

    /// End boundary
    pub fn end(&self) -> &Coordinate {
        &self.end
    }

    /// Path of the start boundary
    pub fn start_path(&self) -> &Path {
        &self.start.path
    }

    /// Path of the end boundary
    pub fn end_path(&self) -> &Path {
        &self.end.path
    }

    /// Offset of the start boundary
    pub fn start_offset(&self) -> usize {
        self.start.offset
    }

    /// Offset of the end boundary
    pub fn end_offset(&self) -> usize {
        self.end.offset
    }

    /// True if the focus is at the start boundary
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Id of the editing surface, if known
    pub fn surface_id(&self) -> Option<&str> {
        self.surface_id.as_deref()
    }

    /// Node order of the container when the selection was made
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// The selection as a range value
    pub fn range(&self) -> Range {
        Range {
            start: self.start.clone(),
            end: self.end.clone(),
            reverse: self.reverse,
            container_id: Some(self.container_id.clone()),
            surface_id: self.surface_id.clone(),
        }
    }

    /// True if both boundaries are the same coordinate
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Position of a node inside the captured container order
    pub fn position_of(&self, node_id: &str) -> Option<usize> {
        self.nodes.iter().position(|id| id == node_id)
    }

    /// Order two coordinates; `None` if either lies outside the container
    pub fn compare(&self, a: &Coordinate, b: &Coordinate) -> Option<Ordering> {
        let pos_a = self.position_of(a.path.node_id())?;
        let pos_b = self.position_of(b.path.node_id())?;
        Some(
            pos_a
                .cmp(&pos_b)
                .then_with(|| a.path.cmp(&b.path))
                .then_with(|| a.offset.cmp(&b.offset)),
        )
    }

    /// True if `[start, end]` lies within this selection
    fn spans(&self, start: &Coordinate, end: &Coordinate, strict: bool) -> bool {
        let (Some(lower), Some(upper)) = (self.compare(&self.start, start), self.compare(end, &self.end))
        else {
            return false;
        };
        if strict {
            lower == Ordering::Less && upper == Ordering::Less
        } else {
            lower != Ordering::Greater && upper != Ordering::Greater
        }
    }

    fn overlaps_span(&self, start: &Coordinate, end: &Coordinate, strict: bool) -> bool {
        let (Some(start_vs_end), Some(end_vs_start)) =
            (self.compare(&self.start, end), self.compare(&self.end, start))
        else {
            return false;
        };
        if strict {
            !(start_vs_end != Ordering::Less || end_vs_start != Ordering::Greater)
        } else {
            !(start_vs_end == Ordering::Greater || end_vs_start == Ordering::Less)
        }
    }

    fn same_container(&self, other: &ContainerSelection) -> bool {
        self.container_id == other.container_id
    }

    /// Check whether this selection lies within `other`
    pub fn is_inside_of(&self, other: &Selection, strict: bool) -> bool {
        match other {
            Selection::Null => false,
            Selection::Property(other) => self.is_inside_of_property(other, strict),
            Selection::Container(other) => {
                self.same_container(other) && other.spans(&self.start, &self.end, strict)
            }
        }
    }

    /// Check whether `other` lies within this selection
    pub fn contains(&self, other: &Selection, strict: bool) -> bool {
        match other {
            Selection::Null => false,
            Selection::Property(other) => self.contains_property(other, strict),
            Selection::Container(other) => {
                other.same_container(self) && self.spans(&other.start, &other.end, strict)
            }
        }
    }

    /// A container selection lies inside a property selection only when both
    /// of its boundaries are in that property.
    pub(crate) fn is_inside_of_property(&self, other: &PropertySelection, strict: bool) -> bool {
        if self.start.path != other.path || self.end.path != other.path {
            return false;
        }
        if strict {
            self.start.offset > other.start_offset && self.end.offset < other.end_offset
        } else {
            self.start.offset >= other.start_offset && self.end.offset <= other.end_offset
        }
    }

    pub(crate) fn contains_property(&self, other: &PropertySelection, strict: bool) -> bool {
        self.spans(&other.start(), &other.end(), strict)
    }

    /// Check whether the two selections share any position
    pub fn overlaps(&self, other: &Selection, strict: bool) -> bool {
        match other {
            Selection::Null => false,
            Selection::Property(other) => self.overlaps_property(other, strict),
            Selection::Container(other) => {
                self.same_container(other) && self.overlaps_span(&other.start, &other.end, strict)
            }
        }
    }

    pub(crate) fn overlaps_property(&self, other: &PropertySelection, strict: bool) -> bool {
        self.overlaps_span(&other.start(), &other.end(), strict)
    }

    /// True if both selections start at the same coordinate
    pub fn is_left_aligned_with(&self, other: &Selection) -> bool {
        match other {
            Selection::Null => false,
            Selection::Property(other) => self.is_left_aligned_with_property(other),
            Selection::Container(other) => self.same_container(other) && self.start == other.start,
        }
    }

    /// True if both selections end at the same coordinate
    pub fn is_right_aligned_with(&self, other: &Selection) -> bool {
        match other {
            Selection::Null => false,
            Selection::Property(other) => self.is_right_aligned_with_property(other),
            Selection::Container(other) => self.same_container(other) && self.end == other.end,
        }
    }

    pub(crate) fn is_left_aligned_with_property(&self, other: &PropertySelection) -> bool {
        self.start.path == other.path && self.start.offset == other.start_offset
    }

    pub(crate) fn is_right_aligned_with_property(&self, other: &PropertySelection) -> bool {
        self.end.path == other.path && self.end.offset == other.end_offset
    }

    /// Collapse to the start (`Left`) or end (`Right`) boundary
    pub fn collapse(&self, direction: Direction) -> Self {
        let coor = match direction {
            Direction::Left => self.start.clone(),
            Direction::Right => self.end.clone(),
        };
        self.derive(coor.clone(), coor)
    }

    /// Smallest container selection covering both selections
    pub fn expand(&self, other: &Selection) -> Result<Selection> {
        match other {
            Selection::Null => Ok(Selection::Container(self.clone())),
            Selection::Property(other) => self.expand_with_property(other),
            Selection::Container(other) => {
                if !self.same_container(other) {
                    return Err(DocModelError::IncompatibleContainer {
                        left: self.container_id.clone(),
                        right: other.container_id.clone(),
                    });
                }
                self.expand_to(&other.start, &other.end)
            }
        }
    }

    pub(crate) fn expand_with_property(&self, other: &PropertySelection) -> Result<Selection> {
        self.expand_to(&other.start(), &other.end())
    }

    fn expand_to(&self, start: &Coordinate, end: &Coordinate) -> Result<Selection> {
        let incompatible = || DocModelError::IncompatiblePath {
            left: self.start.path.clone(),
            right: start.path.clone(),
        };
        let new_start = match self.compare(start, &self.start).ok_or_else(incompatible)? {
            Ordering::Less => start.clone(),
            _ => self.start.clone(),
        };
        let new_end = match self.compare(end, &self.end).ok_or_else(incompatible)? {
            Ordering::Greater => end.clone(),
            _ => self.end.clone(),
        };
        tracing::trace!("expand {} to [{} -> {}]", self, new_start, new_end);
        Ok(Selection::Container(self.derive(new_start, new_end)))
    }

    fn derive(&self, start: Coordinate, end: Coordinate) -> Self {
        Self {
            container_id: self.container_id.clone(),
            start,
            end,
            reverse: false,
            surface_id: self.surface_id.clone(),
            nodes: self.nodes.clone(),
            document: self.document.clone(),
        }
    }

    /// Split the selection into per-property fragments and whole nodes.
    ///
    /// Needs the attached document to know where the first property ends.
    pub fn fragments(&self) -> Result<Vec<SelectionFragment>> {
        if self.is_collapsed() {
            return Ok(vec![SelectionFragment::cursor(
                self.start.path.clone(),
                self.start.offset,
            )]);
        }
        if self.start.path == self.end.path {
            // A node path has no text to slice, so the whole node is selected
            if self.start.is_node_coordinate() {
                return Ok(vec![SelectionFragment::node(self.start.path.node_id())]);
            }
            return Ok(vec![SelectionFragment::fragment(
                self.start.path.clone(),
                self.start.offset,
                self.end.offset,
            )]);
        }

        let document = self.document().ok_or(DocModelError::Detached)?;
        let doc = document.read().map_err(|_| {
            DocModelError::InvalidOperation("document lock is poisoned".to_string())
        })?;

        let mut fragments = Vec::new();
        if self.start.is_node_coordinate() {
            fragments.push(SelectionFragment::node(self.start.path.node_id()));
        } else {
            let length = doc.text_length(&self.start.path)?;
            fragments.push(SelectionFragment::fragment(
                self.start.path.clone(),
                self.start.offset,
                length,
            ));
        }

        // compare() succeeded at construction, so both positions exist
        let first = self.position_of(self.start.path.node_id()).unwrap_or(0);
        let last = self.position_of(self.end.path.node_id()).unwrap_or(first);
        for node_id in self.nodes.iter().take(last).skip(first + 1) {
            fragments.push(SelectionFragment::node(node_id.clone()));
        }

        if self.end.is_node_coordinate() {
            fragments.push(SelectionFragment::node(self.end.path.node_id()));
        } else {
            fragments.push(SelectionFragment::fragment(
                self.end.path.clone(),
                0,
                self.end.offset,
            ));
        }
        Ok(fragments)
    }

    /// Same selection with `node_id` removed from the captured node order
    pub fn without_node(&self, node_id: &str) -> Self {
        let nodes: Arc<[String]> = self
            .nodes
            .iter()
            .filter(|id| id.as_str() != node_id)
            .cloned()
            .collect();
        Self {
            nodes,
            ..self.clone()
        }
    }

    /// Same selection with new boundaries; used when rebasing
    pub fn with_boundaries(&self, start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

impl PartialEq for ContainerSelection {
    fn eq(&self, other: &Self) -> bool {
        self.container_id == other.container_id
            && self.start == other.start
            && self.end == other.end
            && self.reverse == other.reverse
            && self.surface_id == other.surface_id
    }
}

impl fmt::Debug for ContainerSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSelection")
            .field("container_id", &self.container_id)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("reverse", &self.reverse)
            .field("surface_id", &self.surface_id)
            .finish()
    }
}

impl fmt::Display for ContainerSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ContainerSelection({}, {} -> {}",
            self.container_id, self.start, self.end
        )?;
        if self.reverse {
            write!(f, ", reverse")?;
        }
        write!(f, ")")
    }
}
