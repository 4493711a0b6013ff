//! Tests for DOM tree mutation methods: `remove_child`, `insert_before`,
//! `move_children`, `adopt_node` and the pre-insertion validity checks.

use quill_dom::{DomError, DomTree, HierarchyError, NodeId};

/// Helper to create an element in the root document.
fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(NodeId::ROOT, tag)
}

/// Helper to append, panicking on a hierarchy error.
fn append(tree: &mut DomTree, parent: NodeId, child: NodeId) {
    let _ = tree
        .append_child(parent, child)
        .expect("append_child should succeed");
}

/// Build `#document > html > div` and return the div.
fn tree_with_container() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html");
    append(&mut tree, NodeId::ROOT, html);
    let div = element(&mut tree, "div");
    append(&mut tree, html, div);
    (tree, div)
}

/// Append three children named a, b, c to `parent`.
fn abc(tree: &mut DomTree, parent: NodeId) -> (NodeId, NodeId, NodeId) {
    let a = element(tree, "a");
    let b = element(tree, "b");
    let c = element(tree, "c");
    append(tree, parent, a);
    append(tree, parent, b);
    append(tree, parent, c);
    (a, b, c)
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let (mut tree, parent) = tree_with_container();
    let child = element(&mut tree, "p");
    append(&mut tree, parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    let removed = tree.remove_child(parent, child);

    assert_eq!(removed, Ok(child));
    assert!(tree.children(parent).is_empty());
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);
}

#[test]
fn test_remove_child_first_of_three() {
    let (mut tree, parent) = tree_with_container();
    let (a, b, c) = abc(&mut tree, parent);

    let _ = tree.remove_child(parent, a);

    // b is now first child, c is second
    assert_eq!(tree.children(parent), &[b, c]);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_remove_child_middle_of_three() {
    let (mut tree, parent) = tree_with_container();
    let (a, b, c) = abc(&mut tree, parent);

    let _ = tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_last_of_three() {
    let (mut tree, parent) = tree_with_container();
    let (a, b, c) = abc(&mut tree, parent);

    let _ = tree.remove_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b]);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_child_of_other_parent_fails() {
    let (mut tree, parent) = tree_with_container();
    let (a, _, _) = abc(&mut tree, parent);
    let stranger = element(&mut tree, "section");

    let result = tree.remove_child(stranger, a);

    assert_eq!(result, Err(DomError::Hierarchy(HierarchyError::NotAChild)));
    assert_eq!(tree.parent(a), Some(parent));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let (mut tree, parent) = tree_with_container();
    let existing = element(&mut tree, "b");
    append(&mut tree, parent, existing);

    let new_child = element(&mut tree, "a");
    let _ = tree.insert_before(parent, new_child, Some(existing));

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let (mut tree, parent) = tree_with_container();
    let a = element(&mut tree, "a");
    let c = element(&mut tree, "c");
    append(&mut tree, parent, a);
    append(&mut tree, parent, c);

    let b = element(&mut tree, "b");
    let _ = tree.insert_before(parent, b, Some(c));

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_itself_is_a_no_op_move() {
    let (mut tree, parent) = tree_with_container();
    let (a, b, c) = abc(&mut tree, parent);

    let _ = tree.insert_before(parent, b, Some(b));

    assert_eq!(tree.children(parent), &[a, b, c]);
}

#[test]
fn test_insert_moves_node_from_old_parent() {
    let (mut tree, parent) = tree_with_container();
    let (a, b, c) = abc(&mut tree, parent);
    let other = element(&mut tree, "section");
    append(&mut tree, parent, other);

    append(&mut tree, other, b);

    assert_eq!(tree.children(parent), &[a, c, other]);
    assert_eq!(tree.children(other), &[b]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(b), None);
}

#[test]
fn test_insert_fragment_inserts_its_children() {
    let (mut tree, parent) = tree_with_container();
    let end = element(&mut tree, "end");
    append(&mut tree, parent, end);

    let fragment = tree.create_document_fragment(NodeId::ROOT);
    let x = element(&mut tree, "x");
    let y = tree.create_text_node(NodeId::ROOT, "y");
    append(&mut tree, fragment, x);
    append(&mut tree, fragment, y);

    let _ = tree.insert_before(parent, fragment, Some(end));

    assert_eq!(tree.children(parent), &[x, y, end]);
    assert!(tree.children(fragment).is_empty());
    assert_eq!(tree.parent(fragment), None);
}

// ========== pre-insertion validity ==========

#[test]
fn test_document_rejects_second_element() {
    let mut tree = DomTree::new();
    let first = element(&mut tree, "html");
    append(&mut tree, NodeId::ROOT, first);
    let second = element(&mut tree, "html");

    let result = tree.insert_before(NodeId::ROOT, second, None);

    assert_eq!(
        result,
        Err(DomError::Hierarchy(HierarchyError::MultipleDocumentElements))
    );
    assert_eq!(tree.children(NodeId::ROOT), &[first]);
    assert_eq!(tree.parent(second), None);
}

#[test]
fn test_node_cannot_become_its_own_ancestor() {
    let (mut tree, parent) = tree_with_container();
    let child = element(&mut tree, "span");
    append(&mut tree, parent, child);

    let into_self = tree.append_child(parent, parent);
    let into_child = tree.append_child(child, parent);

    assert!(matches!(
        into_self,
        Err(DomError::Hierarchy(HierarchyError::InclusiveAncestor))
    ));
    assert!(matches!(
        into_child,
        Err(DomError::Hierarchy(HierarchyError::InclusiveAncestor))
    ));
    assert_eq!(tree.parent(child), Some(parent));
}

#[test]
fn test_deep_chain_appends_and_still_rejects_cycles() {
    const DEPTH: usize = 50_000;
    let mut tree = DomTree::new();
    let top = element(&mut tree, "div");
    append(&mut tree, NodeId::ROOT, top);
    let mut leaf = top;
    for _ in 1..DEPTH {
        let div = element(&mut tree, "div");
        append(&mut tree, leaf, div);
        leaf = div;
    }
    assert_eq!(tree.ancestors(leaf).count(), DEPTH);

    // A childless node is still its own inclusive ancestor.
    assert!(matches!(
        tree.append_child(leaf, leaf),
        Err(DomError::Hierarchy(HierarchyError::InclusiveAncestor))
    ));
    // The top of the chain cannot move under its deepest descendant.
    assert!(matches!(
        tree.append_child(leaf, top),
        Err(DomError::Hierarchy(HierarchyError::InclusiveAncestor))
    ));
    assert!(tree.is_inclusive_ancestor_of(top, leaf));
    assert!(!tree.is_inclusive_ancestor_of(leaf, top));
    assert_eq!(tree.parent(top), Some(NodeId::ROOT));
}

#[test]
fn test_reference_child_must_belong_to_parent() {
    let (mut tree, parent) = tree_with_container();
    let node = element(&mut tree, "a");
    let stranger = element(&mut tree, "b");

    let result = tree.insert_before(parent, node, Some(stranger));

    assert_eq!(result, Err(DomError::Hierarchy(HierarchyError::NotAChild)));
}

#[test]
fn test_text_cannot_be_document_child() {
    let mut tree = DomTree::new();
    let text = tree.create_text_node(NodeId::ROOT, "hello");

    let result = tree.append_child(NodeId::ROOT, text);

    assert_eq!(
        result,
        Err(DomError::Hierarchy(HierarchyError::TextUnderDocument))
    );
}

#[test]
fn test_text_cannot_have_children() {
    let (mut tree, parent) = tree_with_container();
    let text = tree.create_text_node(NodeId::ROOT, "hello");
    append(&mut tree, parent, text);
    let span = element(&mut tree, "span");

    let result = tree.append_child(text, span);

    assert_eq!(result, Err(DomError::Hierarchy(HierarchyError::InvalidParent)));
}

#[test]
fn test_doctype_rules() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html");
    append(&mut tree, NodeId::ROOT, html);

    // A doctype may not follow the document element.
    let doctype = tree.create_document_type(NodeId::ROOT, "html", "", "");
    assert_eq!(
        tree.append_child(NodeId::ROOT, doctype),
        Err(DomError::Hierarchy(HierarchyError::DoctypeAfterElement))
    );

    // But it may precede it.
    let _ = tree.insert_before(NodeId::ROOT, doctype, Some(html));
    assert_eq!(tree.children(NodeId::ROOT), &[doctype, html]);
    assert_eq!(tree.doctype_of(NodeId::ROOT), Some(doctype));

    // Only one doctype per document.
    let second = tree.create_document_type(NodeId::ROOT, "html", "", "");
    assert_eq!(
        tree.insert_before(NodeId::ROOT, second, Some(doctype)),
        Err(DomError::Hierarchy(HierarchyError::MultipleDoctypes))
    );

    // And never outside a document.
    assert_eq!(
        tree.append_child(html, second),
        Err(DomError::Hierarchy(HierarchyError::DoctypeOutsideDocument))
    );
}

#[test]
fn test_element_cannot_precede_doctype() {
    let mut tree = DomTree::new();
    let doctype = tree.create_document_type(NodeId::ROOT, "html", "", "");
    append(&mut tree, NodeId::ROOT, doctype);
    let html = element(&mut tree, "html");

    let result = tree.insert_before(NodeId::ROOT, html, Some(doctype));

    assert_eq!(
        result,
        Err(DomError::Hierarchy(HierarchyError::ElementBeforeDoctype))
    );
}

#[test]
fn test_fragment_with_two_elements_rejected_by_document() {
    let mut tree = DomTree::new();
    let fragment = tree.create_document_fragment(NodeId::ROOT);
    let a = element(&mut tree, "a");
    let b = element(&mut tree, "b");
    append(&mut tree, fragment, a);
    append(&mut tree, fragment, b);

    let result = tree.append_child(NodeId::ROOT, fragment);

    assert_eq!(
        result,
        Err(DomError::Hierarchy(HierarchyError::InvalidFragment))
    );
    assert_eq!(tree.children(fragment), &[a, b]);
}

// ========== move_children ==========

#[test]
fn test_move_children_basic() {
    let (mut tree, from) = tree_with_container();
    let to = element(&mut tree, "span");
    append(&mut tree, from, to);

    let a = element(&mut tree, "a");
    let b = element(&mut tree, "b");
    let holder = element(&mut tree, "holder");
    append(&mut tree, holder, a);
    append(&mut tree, holder, b);

    let _ = tree.move_children(holder, to);

    assert!(tree.children(holder).is_empty());
    assert_eq!(tree.children(to), &[a, b]);
    assert_eq!(tree.parent(a), Some(to));
    assert_eq!(tree.parent(b), Some(to));
}

#[test]
fn test_move_children_appends_to_existing() {
    let (mut tree, to) = tree_with_container();
    let from = element(&mut tree, "section");

    let existing = element(&mut tree, "x");
    append(&mut tree, to, existing);
    let moved = element(&mut tree, "y");
    append(&mut tree, from, moved);

    let _ = tree.move_children(from, to);

    assert_eq!(tree.children(to), &[existing, moved]);
    assert_eq!(tree.next_sibling(existing), Some(moved));
    assert_eq!(tree.prev_sibling(moved), Some(existing));
}

#[test]
fn test_move_children_empty_source() {
    let (mut tree, to) = tree_with_container();
    let from = element(&mut tree, "section");

    // Moving no children is a no-op
    assert_eq!(tree.move_children(from, to), Ok(()));

    assert!(tree.children(from).is_empty());
    assert!(tree.children(to).is_empty());
}

// ========== documents and adoption ==========

#[test]
fn test_head_and_body_pointers_follow_the_tree() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html");
    let head = element(&mut tree, "head");
    let body = element(&mut tree, "body");
    append(&mut tree, NodeId::ROOT, html);
    append(&mut tree, html, head);

    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), None);

    append(&mut tree, html, body);
    assert_eq!(tree.body(), Some(body));

    let _ = tree.remove_child(html, body);
    assert_eq!(tree.body(), None);
    assert_eq!(tree.document_element(), Some(html));
}

#[test]
fn test_adopt_node_updates_whole_subtree() {
    let (mut tree, parent) = tree_with_container();
    let child = element(&mut tree, "span");
    let text = tree.create_text_node(NodeId::ROOT, "x");
    append(&mut tree, parent, child);
    append(&mut tree, child, text);
    let _ = tree.set_attribute(child, "class", "note");

    let other = tree.create_document();
    assert_eq!(tree.adopt_node(other, child), Ok(()));

    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.owner_document(child), other);
    assert_eq!(tree.owner_document(text), other);
    for &attr in tree.attributes(child) {
        assert_eq!(tree.owner_document(attr), other);
    }
}

#[test]
fn test_inserting_into_another_document_adopts() {
    let mut tree = DomTree::new();
    let other = tree.create_document();
    let html = tree.create_element(other, "html");
    append(&mut tree, other, html);

    let stray = element(&mut tree, "p");
    append(&mut tree, html, stray);

    assert_eq!(tree.owner_document(stray), other);
}

#[test]
fn test_adopting_a_document_fails() {
    let mut tree = DomTree::new();
    let other = tree.create_document();

    assert!(matches!(
        tree.adopt_node(NodeId::ROOT, other),
        Err(DomError::NotSupported(_))
    ));
}

// ========== tree order ==========

#[test]
fn test_descendants_in_tree_order() {
    let (mut tree, parent) = tree_with_container();
    let (a, b, c) = abc(&mut tree, parent);
    let inner = element(&mut tree, "i");
    append(&mut tree, a, inner);

    let order: Vec<NodeId> = tree.descendants(parent).collect();

    assert_eq!(order, vec![a, inner, b, c]);
    assert_eq!(
        tree.compare_tree_order(inner, b),
        Some(core::cmp::Ordering::Less)
    );
    assert_eq!(
        tree.compare_tree_order(parent, inner),
        Some(core::cmp::Ordering::Less)
    );

    let detached = element(&mut tree, "z");
    assert_eq!(tree.compare_tree_order(a, detached), None);
}

#[test]
fn test_create_element_lowercases_in_html_document() {
    let mut tree = DomTree::new();
    let div = tree.create_element(NodeId::ROOT, "DIV");

    assert_eq!(tree.tag_name(div), Some("div"));
}
