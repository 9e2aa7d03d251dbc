//! Integration tests for rebasing selections across remote edits
//!
//! A local selection is attached to a replica; remote operations are applied
//! to the replica and the selection is rebased across them. The rebased
//! selection must still read the same text wherever the edit did not touch it.

use collab::{rebase, rebase_all, DocOperation, RebaseSettings};
use doc_model::{
    Container, ContainerSelection, Coordinate, Document, DocumentHandle, Node, Path,
    PropertySelection, Selection, SelectionFragment,
};
use proptest::prelude::*;

/// A replica of the shared document with one local selection
struct Replica {
    document: DocumentHandle,
    selection: Selection,
    settings: RebaseSettings,
}

impl Replica {
    fn new(paragraphs: &[(&str, &str)]) -> Self {
        let mut doc = Document::new();
        let mut body = Container::new("body");
        for (id, text) in paragraphs {
            doc.insert_node(Node::new(*id, "paragraph").with_property("content", *text));
            body.push(*id);
        }
        doc.add_container(body);
        Self {
            document: doc.into_handle(),
            selection: Selection::Null,
            settings: RebaseSettings::default(),
        }
    }

    fn select(&mut self, node: &str, start: usize, end: usize) {
        let sel = PropertySelection::new(content(node), start, end)
            .unwrap()
            .attach(&self.document);
        self.selection = sel.into();
    }

    /// Apply a remote operation and move the local selection along
    fn receive(&mut self, op: &DocOperation) {
        {
            let mut doc = self.document.write().unwrap();
            op.apply(&mut doc).unwrap();
        }
        self.selection = rebase(&self.selection, op, &self.settings);
    }

    fn selected_text(&self) -> String {
        self.selection.as_property().unwrap().text().unwrap()
    }
}

fn content(node: &str) -> Path {
    Path::property(node, "content")
}

#[test]
fn test_selection_follows_concurrent_typing() {
    let mut replica = Replica::new(&[("p1", "The quick brown fox")]);
    replica.select("p1", 10, 15);
    assert_eq!(replica.selected_text(), "brown");

    replica.receive(&DocOperation::insert_text(content("p1"), 4, "very "));
    assert_eq!(replica.selected_text(), "brown");

    replica.receive(&DocOperation::insert_text(content("p1"), 24, "!"));
    assert_eq!(replica.selected_text(), "brown");

    replica.receive(&DocOperation::delete_text(content("p1"), 0, 4));
    assert_eq!(replica.selected_text(), "brown");
}

#[test]
fn test_selection_shrinks_when_content_is_deleted() {
    let mut replica = Replica::new(&[("p1", "Hello wonderful world")]);
    replica.select("p1", 6, 21);

    replica.receive(&DocOperation::delete_text(content("p1"), 5, 16));
    assert_eq!(replica.selected_text(), "world");
}

#[test]
fn test_selection_dropped_with_its_node() {
    let mut replica = Replica::new(&[("p1", "First"), ("p2", "Second")]);
    replica.select("p2", 0, 3);

    replica.receive(&DocOperation::delete_node("p2"));
    assert!(replica.selection.is_null());
}

#[test]
fn test_rebased_selection_survives_serialization() {
    let mut replica = Replica::new(&[("p1", "abcdef")]);
    replica.select("p1", 2, 4);
    replica.receive(&DocOperation::insert_text(content("p1"), 0, "xy"));

    let json = replica.selection.to_json().unwrap();
    let restored = Selection::from_json(&json).unwrap();
    assert_eq!(restored, replica.selection);
}

#[test]
fn test_container_selection_fragments_after_rebase() {
    let replica = Replica::new(&[("p1", "alpha"), ("p2", "beta"), ("p3", "gamma")]);
    let body = replica.document.read().unwrap().container("body").unwrap().clone();
    let selection: Selection = ContainerSelection::new(
        &body,
        Coordinate::new(content("p1"), 2),
        Coordinate::new(content("p3"), 3),
    )
    .unwrap()
    .attach(&replica.document)
    .into();

    let op = DocOperation::insert_text(content("p1"), 0, ">> ");
    op.apply(&mut replica.document.write().unwrap()).unwrap();
    let rebased = rebase(&selection, &op, &RebaseSettings::default());

    assert_eq!(
        rebased.fragments().unwrap(),
        vec![
            SelectionFragment::fragment(content("p1"), 5, 8),
            SelectionFragment::node("p2"),
            SelectionFragment::fragment(content("p3"), 0, 3),
        ]
    );
}

fn edit_strategy(len: usize) -> impl Strategy<Value = DocOperation> {
    prop_oneof![
        (0..=len, "[a-z]{1,5}").prop_map(|(at, text)| DocOperation::insert_text(content("p1"), at, text)),
        (0..=len, 0..=len).prop_map(|(a, b)| DocOperation::delete_text(content("p1"), a.min(b), a.max(b))),
    ]
}

proptest! {
    #[test]
    fn rebase_keeps_boundaries_ordered(
        a in 0usize..30,
        b in 0usize..30,
        ops in proptest::collection::vec(edit_strategy(30), 1..8),
    ) {
        let sel: Selection = PropertySelection::new(content("p1"), a.min(b), a.max(b)).unwrap().into();
        let rebased = rebase_all(&sel, &ops, &RebaseSettings::default());
        let rebased = rebased.as_property().unwrap();
        prop_assert!(rebased.start_offset() <= rebased.end_offset());
    }

    #[test]
    fn edits_outside_the_selection_preserve_its_text(
        start in 0usize..10,
        len in 1usize..10,
        op in edit_strategy(30),
    ) {
        let text = "abcdefghijklmnopqrstuvwxyz0123";
        let mut replica = Replica::new(&[("p1", text)]);
        let end = start + len;
        replica.select("p1", start, end);
        let before = replica.selected_text();

        let outside = match &op {
            DocOperation::InsertText { offset, .. } => *offset <= start || *offset >= end,
            DocOperation::DeleteText { start_offset, end_offset, .. } => {
                *end_offset <= start || *start_offset >= end
            }
            _ => false,
        };
        prop_assume!(outside);

        replica.receive(&op);
        prop_assert_eq!(replica.selected_text(), before);
    }
}
