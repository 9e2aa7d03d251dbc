//! Rebasing selections across document operations
//!
//! When a remote operation is applied, every local selection has to move so
//! it still addresses the same content. [`rebase`] is a pure function: it
//! never touches the selection it is given and returns a new one. The
//! coordinate arithmetic is written once against [`CoordinateAccess`] and
//! [`RangeAccess`], so it runs on plain ranges and, through the adapters, on
//! an owned copy of a property selection.

use doc_model::{grapheme_len, CoordinateAccess, RangeAccess, Selection};

use crate::operation::DocOperation;
use crate::settings::{InsertBias, RebaseSettings};

/// Move a single coordinate across `op`.
///
/// `shift_on_tie` decides whether a coordinate sitting exactly at an
/// insertion point moves behind the inserted text.
pub fn transform_coordinate<C: CoordinateAccess>(mut coor: C, op: &DocOperation, shift_on_tie: bool) {
    if op.path() != Some(coor.path()) {
        return;
    }
    let offset = coor.offset();
    match op {
        DocOperation::InsertText { offset: at, .. } => {
            if offset > *at || (offset == *at && shift_on_tie) {
                coor.set_offset(offset + op.inserted_len());
            }
        }
        DocOperation::DeleteText {
            start_offset,
            end_offset,
            ..
        } => {
            let start = (*start_offset).min(*end_offset);
            let end = (*start_offset).max(*end_offset);
            if offset > end {
                coor.set_offset(offset - (end - start));
            } else if offset > start {
                coor.set_offset(start);
            }
        }
        DocOperation::SetText { text, .. } => {
            let len = grapheme_len(text);
            if offset > len {
                coor.set_offset(len);
            }
        }
        DocOperation::DeleteNode { .. } => {}
    }
}

/// Move both boundaries of a range across a text operation
pub fn transform_range<R: RangeAccess>(range: &mut R, op: &DocOperation, settings: &RebaseSettings) {
    let (start_shifts, end_shifts) = if range.is_collapsed() {
        let shift = settings.insert_bias == InsertBias::After;
        (shift, shift)
    } else {
        (!settings.expand_at_boundaries, settings.expand_at_boundaries)
    };
    transform_coordinate(range.start_mut(), op, start_shifts);
    transform_coordinate(range.end_mut(), op, end_shifts);
}

/// Rebase a selection across one operation.
///
/// A selection with a boundary inside a deleted node becomes the null
/// selection.
pub fn rebase(selection: &Selection, op: &DocOperation, settings: &RebaseSettings) -> Selection {
    match selection {
        Selection::Null => Selection::Null,
        Selection::Property(sel) => {
            if let DocOperation::DeleteNode { node_id } = op {
                if sel.path().node_id() == node_id {
                    tracing::debug!("dropping {} after deletion of node {}", sel, node_id);
                    return Selection::Null;
                }
                return selection.clone();
            }
            let mut rebased = sel.clone();
            transform_range(&mut rebased.range_mut(), op, settings);
            tracing::trace!("rebased {} to {}", sel, rebased);
            Selection::Property(rebased)
        }
        Selection::Container(sel) => {
            if let DocOperation::DeleteNode { node_id } = op {
                if sel.start_path().node_id() == node_id || sel.end_path().node_id() == node_id {
                    tracing::debug!("dropping {} after deletion of node {}", sel, node_id);
                    return Selection::Null;
                }
                return Selection::Container(sel.without_node(node_id));
            }
            let mut range = sel.range();
            transform_range(&mut range, op, settings);
            let rebased = sel.with_boundaries(range.start, range.end);
            tracing::trace!("rebased {} to {}", sel, rebased);
            Selection::Container(rebased)
        }
    }
}

/// Rebase a selection across a sequence of operations, in order
pub fn rebase_all<'a, I>(selection: &Selection, ops: I, settings: &RebaseSettings) -> Selection
where
    I: IntoIterator<Item = &'a DocOperation>,
{
    ops.into_iter()
        .fold(selection.clone(), |sel, op| rebase(&sel, op, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::{Container, ContainerSelection, Coordinate, Path, PropertySelection, Range};

    fn path() -> Path {
        Path::property("p1", "content")
    }

    fn sel(start: usize, end: usize) -> Selection {
        PropertySelection::new(path(), start, end).unwrap().into()
    }

    fn offsets(sel: &Selection) -> (usize, usize) {
        let sel = sel.as_property().unwrap();
        (sel.start_offset(), sel.end_offset())
    }

    #[test]
    fn test_insert_before_shifts() {
        let op = DocOperation::insert_text(path(), 1, "abc");
        let rebased = rebase(&sel(4, 6), &op, &RebaseSettings::default());
        assert_eq!(offsets(&rebased), (7, 9));
    }

    #[test]
    fn test_insert_inside_grows() {
        let op = DocOperation::insert_text(path(), 5, "ab");
        let rebased = rebase(&sel(4, 6), &op, &RebaseSettings::default());
        assert_eq!(offsets(&rebased), (4, 8));
    }

    #[test]
    fn test_insert_at_boundaries() {
        let defaults = RebaseSettings::default();
        let at_start = DocOperation::insert_text(path(), 4, "ab");
        let at_end = DocOperation::insert_text(path(), 6, "ab");

        assert_eq!(offsets(&rebase(&sel(4, 6), &at_start, &defaults)), (6, 8));
        assert_eq!(offsets(&rebase(&sel(4, 6), &at_end, &defaults)), (4, 6));

        let expanding = RebaseSettings {
            expand_at_boundaries: true,
            ..RebaseSettings::default()
        };
        assert_eq!(offsets(&rebase(&sel(4, 6), &at_start, &expanding)), (4, 8));
        assert_eq!(offsets(&rebase(&sel(4, 6), &at_end, &expanding)), (4, 8));
    }

    #[test]
    fn test_insert_at_caret_follows_bias() {
        let op = DocOperation::insert_text(path(), 3, "xy");
        let after = rebase(&sel(3, 3), &op, &RebaseSettings::default());
        assert_eq!(offsets(&after), (5, 5));

        let before = RebaseSettings {
            insert_bias: InsertBias::Before,
            ..RebaseSettings::default()
        };
        assert_eq!(offsets(&rebase(&sel(3, 3), &op, &before)), (3, 3));
    }

    #[test]
    fn test_delete_text() {
        let defaults = RebaseSettings::default();
        let op = DocOperation::delete_text(path(), 2, 5);

        assert_eq!(offsets(&rebase(&sel(6, 8), &op, &defaults)), (3, 5));
        assert_eq!(offsets(&rebase(&sel(3, 8), &op, &defaults)), (2, 5));
        assert_eq!(offsets(&rebase(&sel(3, 4), &op, &defaults)), (2, 2));
        assert_eq!(offsets(&rebase(&sel(0, 2), &op, &defaults)), (0, 2));
    }

    #[test]
    fn test_set_text_clamps() {
        let op = DocOperation::set_text(path(), "abc");
        assert_eq!(
            offsets(&rebase(&sel(2, 9), &op, &RebaseSettings::default())),
            (2, 3)
        );
    }

    #[test]
    fn test_other_paths_are_untouched() {
        let op = DocOperation::insert_text(Path::property("p2", "content"), 0, "abc");
        assert_eq!(rebase(&sel(1, 2), &op, &RebaseSettings::default()), sel(1, 2));
    }

    #[test]
    fn test_rebase_keeps_direction() {
        let reversed: Selection = PropertySelection::from_anchor_focus(path(), 6, 2).into();
        let op = DocOperation::insert_text(path(), 0, "a");
        let rebased = rebase(&reversed, &op, &RebaseSettings::default());
        assert!(rebased.is_reverse());
        assert_eq!(offsets(&rebased), (3, 7));
    }

    #[test]
    fn test_delete_node() {
        let defaults = RebaseSettings::default();
        assert_eq!(
            rebase(&sel(1, 2), &DocOperation::delete_node("p1"), &defaults),
            Selection::Null
        );
        assert_eq!(
            rebase(&sel(1, 2), &DocOperation::delete_node("p9"), &defaults),
            sel(1, 2)
        );
    }

    #[test]
    fn test_container_selection() {
        let body = Container::with_nodes("body", ["p1", "p2", "p3"]);
        let container: Selection = ContainerSelection::new(
            &body,
            Coordinate::new(path(), 2),
            Coordinate::new(Path::property("p3", "content"), 4),
        )
        .unwrap()
        .into();
        let defaults = RebaseSettings::default();

        let shifted = rebase(&container, &DocOperation::insert_text(path(), 0, "ab"), &defaults);
        assert_eq!(shifted.as_container().unwrap().start_offset(), 4);
        assert_eq!(shifted.as_container().unwrap().end_offset(), 4);

        let without_middle = rebase(&container, &DocOperation::delete_node("p2"), &defaults);
        assert_eq!(without_middle.as_container().unwrap().nodes(), &["p1", "p3"]);

        assert_eq!(
            rebase(&container, &DocOperation::delete_node("p3"), &defaults),
            Selection::Null
        );
    }

    #[test]
    fn test_transform_range_on_values() {
        let mut range = Range::new(Coordinate::new(path(), 1), Coordinate::new(path(), 3)).unwrap();
        transform_range(
            &mut range,
            &DocOperation::insert_text(path(), 0, "xyz"),
            &RebaseSettings::default(),
        );
        assert_eq!((range.start.offset, range.end.offset), (4, 6));
    }

    #[test]
    fn test_rebase_all() {
        let ops = vec![
            DocOperation::insert_text(path(), 0, "ab"),
            DocOperation::delete_text(path(), 0, 1),
        ];
        let rebased = rebase_all(&sel(3, 5), &ops, &RebaseSettings::default());
        assert_eq!(offsets(&rebased), (4, 6));
    }
}
