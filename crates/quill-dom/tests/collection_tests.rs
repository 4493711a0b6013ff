//! Tests for live `HtmlCollection`s staying correct across mutations.

use quill_dom::{DomTree, NodeId};

fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(NodeId::ROOT, tag)
}

fn append(tree: &mut DomTree, parent: NodeId, child: NodeId) {
    let _ = tree
        .append_child(parent, child)
        .expect("append_child should succeed");
}

/// `#document > html > body` with `count` `p` children.
fn body_with_paragraphs(count: usize) -> (DomTree, NodeId, Vec<NodeId>) {
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html");
    let body = element(&mut tree, "body");
    append(&mut tree, NodeId::ROOT, html);
    append(&mut tree, html, body);
    let paragraphs = (0..count)
        .map(|_| {
            let p = element(&mut tree, "p");
            append(&mut tree, body, p);
            p
        })
        .collect();
    (tree, body, paragraphs)
}

// ========== children scope ==========

#[test]
fn test_children_skips_non_elements() {
    let (mut tree, body, ps) = body_with_paragraphs(2);
    let text = tree.create_text_node(NodeId::ROOT, "x");
    let _ = tree.insert_before(body, text, Some(ps[1]));

    let mut children = tree.children_collection(body);

    assert_eq!(children.len(&tree), 2);
    assert_eq!(children.item(&tree, 0), Some(ps[0]));
    assert_eq!(children.item(&tree, 1), Some(ps[1]));
    assert_eq!(children.item(&tree, 2), None);
}

#[test]
fn test_children_insert_before_cursor_splices_cache() {
    let (mut tree, body, ps) = body_with_paragraphs(3);
    let mut children = tree.children_collection(body);

    // Scan only the first two children.
    assert_eq!(children.item(&tree, 1), Some(ps[1]));

    let early = element(&mut tree, "h1");
    let _ = tree.insert_before(body, early, Some(ps[0]));

    assert_eq!(children.item(&tree, 0), Some(early));
    assert_eq!(children.item(&tree, 1), Some(ps[0]));
    assert_eq!(children.to_vec(&tree), vec![early, ps[0], ps[1], ps[2]]);
}

#[test]
fn test_children_remove_before_and_after_cursor() {
    let (mut tree, body, ps) = body_with_paragraphs(4);
    let mut children = tree.children_collection(body);
    assert_eq!(children.item(&tree, 1), Some(ps[1]));

    let _ = tree.remove_child(body, ps[0]);
    let _ = tree.remove_child(body, ps[3]);

    assert_eq!(children.len(&tree), 2);
    assert_eq!(children.to_vec(&tree), vec![ps[1], ps[2]]);
}

#[test]
fn test_children_sees_appends_after_full_scan() {
    let (mut tree, body, ps) = body_with_paragraphs(1);
    let mut children = tree.children_collection(body);
    assert_eq!(children.len(&tree), 1);

    let late = element(&mut tree, "footer");
    append(&mut tree, body, late);

    assert_eq!(children.to_vec(&tree), vec![ps[0], late]);
}

#[test]
fn test_children_moving_a_child_keeps_order() {
    let (mut tree, body, ps) = body_with_paragraphs(3);
    let mut children = tree.children_collection(body);
    assert_eq!(children.len(&tree), 3);

    // Move the last paragraph to the front.
    let _ = tree.insert_before(body, ps[2], Some(ps[0]));

    assert_eq!(children.to_vec(&tree), vec![ps[2], ps[0], ps[1]]);
}

// ========== descendants scope ==========

#[test]
fn test_by_tag_name_finds_nested_elements() {
    let (mut tree, body, ps) = body_with_paragraphs(2);
    let span = element(&mut tree, "span");
    let inner = element(&mut tree, "p");
    append(&mut tree, ps[0], span);
    append(&mut tree, span, inner);

    let mut paragraphs = tree.get_elements_by_tag_name(NodeId::ROOT, "P");

    assert_eq!(paragraphs.to_vec(&tree), vec![ps[0], inner, ps[1]]);
    let mut everything = tree.get_elements_by_tag_name(body, "*");
    assert_eq!(everything.len(&tree), 4);
}

#[test]
fn test_by_tag_name_after_insertions_and_removals() {
    let (mut tree, body, ps) = body_with_paragraphs(3);
    let mut paragraphs = tree.get_elements_by_tag_name(body, "p");
    assert_eq!(paragraphs.item(&tree, 1), Some(ps[1]));

    // Insert inside an already-scanned element and remove a later one.
    let nested = element(&mut tree, "p");
    append(&mut tree, ps[0], nested);
    let _ = tree.remove_child(body, ps[2]);

    assert_eq!(paragraphs.to_vec(&tree), vec![ps[0], nested, ps[1]]);
}

#[test]
fn test_by_tag_name_mutation_past_scanned_prefix() {
    let (mut tree, body, ps) = body_with_paragraphs(2);
    let mut paragraphs = tree.get_elements_by_tag_name(body, "p");
    assert_eq!(paragraphs.item(&tree, 0), Some(ps[0]));

    let tail = element(&mut tree, "p");
    append(&mut tree, body, tail);

    assert_eq!(paragraphs.item(&tree, 0), Some(ps[0]));
    assert_eq!(paragraphs.to_vec(&tree), vec![ps[0], ps[1], tail]);
}

#[test]
fn test_by_class_name_tracks_attribute_changes() {
    let (mut tree, body, ps) = body_with_paragraphs(3);
    let _ = tree.set_attribute(ps[0], "class", "a b");
    let _ = tree.set_attribute(ps[2], "class", "b a c");

    let mut both = tree.get_elements_by_class_name(body, "b a");
    assert_eq!(both.to_vec(&tree), vec![ps[0], ps[2]]);

    let _ = tree.set_attribute(ps[1], "class", "a b");
    let _ = tree.remove_attribute(ps[0], "class");

    assert_eq!(both.to_vec(&tree), vec![ps[1], ps[2]]);
}

#[test]
fn test_by_class_name_empty_matches_nothing() {
    let (mut tree, body, ps) = body_with_paragraphs(1);
    let _ = tree.set_attribute(ps[0], "class", "a");

    let mut none = tree.get_elements_by_class_name(body, "   ");

    assert!(none.is_empty(&tree));
}

#[test]
fn test_named_item_matches_id_or_name() {
    let (mut tree, body, ps) = body_with_paragraphs(2);
    let _ = tree.set_attribute(ps[0], "name", "first");
    let _ = tree.set_attribute(ps[1], "id", "second");

    let mut children = tree.children_collection(body);

    assert_eq!(children.named_item(&tree, "first"), Some(ps[0]));
    assert_eq!(children.named_item(&tree, "second"), Some(ps[1]));
    assert_eq!(children.named_item(&tree, ""), None);
}

#[test]
fn test_collection_survives_log_overflow() {
    let (mut tree, body, ps) = body_with_paragraphs(1);
    let mut children = tree.children_collection(body);
    assert_eq!(children.len(&tree), 1);

    // Far more mutations than the log retains.
    for _ in 0..5000 {
        let _ = tree.set_attribute(ps[0], "data-n", "x");
    }
    let extra = element(&mut tree, "p");
    append(&mut tree, body, extra);

    assert_eq!(children.to_vec(&tree), vec![ps[0], extra]);
}
