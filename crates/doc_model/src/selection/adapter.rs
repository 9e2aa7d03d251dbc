//! Coordinate and range views over a property selection
//!
//! Transform code that rebases positions across edits is written against
//! [`CoordinateAccess`] and [`RangeAccess`]. Plain [`Coordinate`] and
//! [`Range`] values implement them, and so do the adapters below, which
//! borrow a [`PropertySelection`] mutably and write straight into its fields.
//! The `&mut` borrow means only the exclusive owner of a selection can
//! rewrite it.

use super::PropertySelection;
use crate::{Coordinate, Path, Range};

/// Read/write access to a path and an offset
pub trait CoordinateAccess {
    fn path(&self) -> &Path;
    fn offset(&self) -> usize;
    fn set_path(&mut self, path: Path);
    fn set_offset(&mut self, offset: usize);

    fn to_coordinate(&self) -> Coordinate {
        Coordinate::new(self.path().clone(), self.offset())
    }
}

/// Read/write access to both boundaries of a range and its metadata
pub trait RangeAccess {
    type Boundary<'b>: CoordinateAccess
    where
        Self: 'b;

    fn start(&self) -> Coordinate;
    fn end(&self) -> Coordinate;
    fn start_mut(&mut self) -> Self::Boundary<'_>;
    fn end_mut(&mut self) -> Self::Boundary<'_>;

    fn is_reverse(&self) -> bool;
    fn set_reverse(&mut self, reverse: bool);
    fn container_id(&self) -> Option<&str>;
    fn set_container_id(&mut self, container_id: Option<String>);
    fn surface_id(&self) -> Option<&str>;
    fn set_surface_id(&mut self, surface_id: Option<String>);

    fn is_collapsed(&self) -> bool {
        self.start() == self.end()
    }
}

impl CoordinateAccess for Coordinate {
    fn path(&self) -> &Path {
        &self.path
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn set_path(&mut self, path: Path) {
        self.path = path;
    }

    fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }
}

impl<T: CoordinateAccess + ?Sized> CoordinateAccess for &mut T {
    fn path(&self) -> &Path {
        (**self).path()
    }

    fn offset(&self) -> usize {
        (**self).offset()
    }

    fn set_path(&mut self, path: Path) {
        (**self).set_path(path);
    }

    fn set_offset(&mut self, offset: usize) {
        (**self).set_offset(offset);
    }
}

impl RangeAccess for Range {
    type Boundary<'b> = &'b mut Coordinate
    where
        Self: 'b;

    fn start(&self) -> Coordinate {
        self.start.clone()
    }

    fn end(&self) -> Coordinate {
        self.end.clone()
    }

    fn start_mut(&mut self) -> Self::Boundary<'_> {
        &mut self.start
    }

    fn end_mut(&mut self) -> Self::Boundary<'_> {
        &mut self.end
    }

    fn is_reverse(&self) -> bool {
        self.reverse
    }

    fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    fn set_container_id(&mut self, container_id: Option<String>) {
        self.container_id = container_id;
    }

    fn surface_id(&self) -> Option<&str> {
        self.surface_id.as_deref()
    }

    fn set_surface_id(&mut self, surface_id: Option<String>) {
        self.surface_id = surface_id;
    }
}

/// Which boundary of a selection an adapter addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// Live view of one boundary of a property selection.
///
/// Both boundaries share the selection's path, so `set_path` moves the whole
/// selection to the new property.
#[derive(Debug)]
pub struct CoordinateAdapter<'a> {
    selection: &'a mut PropertySelection,
    boundary: Boundary,
}

impl<'a> CoordinateAdapter<'a> {
    pub fn new(selection: &'a mut PropertySelection, boundary: Boundary) -> Self {
        Self { selection, boundary }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}

impl CoordinateAccess for CoordinateAdapter<'_> {
    fn path(&self) -> &Path {
        &self.selection.path
    }

    fn offset(&self) -> usize {
        match self.boundary {
            Boundary::Start => self.selection.start_offset,
            Boundary::End => self.selection.end_offset,
        }
    }

    fn set_path(&mut self, path: Path) {
        self.selection.path = path;
        self.selection.invalidate();
    }

    fn set_offset(&mut self, offset: usize) {
        match self.boundary {
            Boundary::Start => self.selection.start_offset = offset,
            Boundary::End => self.selection.end_offset = offset,
        }
        self.selection.invalidate();
    }
}

/// Live view of a property selection as a range
#[derive(Debug)]
pub struct RangeAdapter<'a> {
    selection: &'a mut PropertySelection,
}

impl<'a> RangeAdapter<'a> {
    pub fn new(selection: &'a mut PropertySelection) -> Self {
        Self { selection }
    }
}

impl RangeAccess for RangeAdapter<'_> {
    type Boundary<'b> = CoordinateAdapter<'b>
    where
        Self: 'b;

    fn start(&self) -> Coordinate {
        self.selection.start()
    }

    fn end(&self) -> Coordinate {
        self.selection.end()
    }

    fn start_mut(&mut self) -> Self::Boundary<'_> {
        CoordinateAdapter::new(self.selection, Boundary::Start)
    }

    fn end_mut(&mut self) -> Self::Boundary<'_> {
        CoordinateAdapter::new(self.selection, Boundary::End)
    }

    fn is_reverse(&self) -> bool {
        self.selection.reverse
    }

    fn set_reverse(&mut self, reverse: bool) {
        self.selection.reverse = reverse;
    }

    fn container_id(&self) -> Option<&str> {
        self.selection.container_id.as_deref()
    }

    fn set_container_id(&mut self, container_id: Option<String>) {
        self.selection.container_id = container_id;
    }

    fn surface_id(&self) -> Option<&str> {
        self.selection.surface_id.as_deref()
    }

    fn set_surface_id(&mut self, surface_id: Option<String>) {
        self.selection.surface_id = surface_id;
    }
}

impl PropertySelection {
    /// Mutable view of the start boundary.
    ///
    /// Writes are not checked against the other boundary. A caller moving
    /// both boundaries may pass through `start_offset > end_offset`, and must
    /// restore the order before using any predicate or transform.
    pub fn start_mut(&mut self) -> CoordinateAdapter<'_> {
        CoordinateAdapter::new(self, Boundary::Start)
    }

    /// Mutable view of the end boundary. Same ordering contract as
    /// [`start_mut`](Self::start_mut).
    pub fn end_mut(&mut self) -> CoordinateAdapter<'_> {
        CoordinateAdapter::new(self, Boundary::End)
    }

    /// Mutable view of the whole selection as a range
    pub fn range_mut(&mut self) -> RangeAdapter<'_> {
        RangeAdapter::new(self)
    }
}
