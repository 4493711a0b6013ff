//! Tests for character data and attribute methods.

use quill_dom::{DomError, DomTree, Namespace, NodeId};

fn text(data: &str) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let node = tree.create_text_node(NodeId::ROOT, data);
    (tree, node)
}

// ========== character data ==========

#[test]
fn test_data_and_length_count_scalar_values() {
    let (tree, node) = text("héllo");

    assert_eq!(tree.data(node), Ok("héllo"));
    assert_eq!(tree.length(node), Ok(5));
}

#[test]
fn test_substring_clamps_count() {
    let (tree, node) = text("hello world");

    assert_eq!(tree.substring_data(node, 6, 100).as_deref(), Ok("world"));
    assert_eq!(tree.substring_data(node, 11, 3).as_deref(), Ok(""));
}

#[test]
fn test_offset_past_end_is_index_size_error() {
    let (mut tree, node) = text("abc");

    assert_eq!(
        tree.substring_data(node, 4, 1),
        Err(DomError::IndexSize {
            offset: 4,
            length: 3
        })
    );
    assert!(matches!(
        tree.replace_data(node, 9, 0, "x"),
        Err(DomError::IndexSize { .. })
    ));
    assert_eq!(tree.data(node), Ok("abc"));
}

#[test]
fn test_append_insert_delete_replace() {
    let (mut tree, node) = text("ab");

    assert_eq!(tree.append_data(node, "c"), Ok(()));
    assert_eq!(tree.data(node), Ok("abc"));

    assert_eq!(tree.insert_data(node, 1, "XY"), Ok(()));
    assert_eq!(tree.data(node), Ok("aXYbc"));

    assert_eq!(tree.delete_data(node, 1, 2), Ok(()));
    assert_eq!(tree.data(node), Ok("abc"));

    assert_eq!(tree.replace_data(node, 1, 50, "-"), Ok(()));
    assert_eq!(tree.data(node), Ok("a-"));
}

#[test]
fn test_multibyte_offsets() {
    let (mut tree, node) = text("日本語");

    assert_eq!(tree.replace_data(node, 1, 1, "x"), Ok(()));

    assert_eq!(tree.data(node), Ok("日x語"));
}

#[test]
fn test_comment_and_processing_instruction_hold_data() {
    let mut tree = DomTree::new();
    let comment = tree.create_comment(NodeId::ROOT, " note ");
    let pi = tree.create_processing_instruction(NodeId::ROOT, "xml", "version");

    assert_eq!(tree.set_data(comment, "changed"), Ok(()));
    assert_eq!(tree.append_data(pi, "=1"), Ok(()));

    assert_eq!(tree.data(comment), Ok("changed"));
    assert_eq!(tree.data(pi), Ok("version=1"));
}

#[test]
fn test_element_is_not_character_data() {
    let mut tree = DomTree::new();
    let div = tree.create_element(NodeId::ROOT, "div");

    assert_eq!(tree.data(div), Err(DomError::NotCharacterData(div)));
    assert_eq!(
        tree.set_data(div, "x"),
        Err(DomError::NotCharacterData(div))
    );
}

// ========== attributes ==========

#[test]
fn test_set_and_get_attribute_lowercases_name() {
    let mut tree = DomTree::new();
    let div = tree.create_element(NodeId::ROOT, "div");

    assert_eq!(tree.set_attribute(div, "ID", "main"), Ok(()));

    assert_eq!(tree.get_attribute(div, "id"), Some("main"));
    assert_eq!(tree.get_attribute(div, "Id"), Some("main"));
    assert!(tree.has_attribute(div, "id"));
    assert_eq!(tree.element_id(div), Some("main"));
}

#[test]
fn test_set_existing_attribute_replaces_in_place() {
    let mut tree = DomTree::new();
    let div = tree.create_element(NodeId::ROOT, "div");
    let _ = tree.set_attribute(div, "a", "1");
    let _ = tree.set_attribute(div, "b", "2");
    let first = tree.attributes(div)[0];

    let _ = tree.set_attribute(div, "a", "3");

    assert_eq!(tree.attributes(div).len(), 2);
    assert_eq!(tree.attributes(div)[0], first);
    let pairs: Vec<(String, &str)> = tree.attribute_pairs(div).collect();
    assert_eq!(
        pairs,
        vec![("a".to_string(), "3"), ("b".to_string(), "2")]
    );
}

#[test]
fn test_remove_attribute_detaches_attr_node() {
    let mut tree = DomTree::new();
    let div = tree.create_element(NodeId::ROOT, "div");
    let _ = tree.set_attribute(div, "title", "x");

    let removed = tree.remove_attribute(div, "title");

    let Some(attr) = removed else {
        panic!("Expected the title attribute to be removed");
    };
    assert!(!tree.has_attribute(div, "title"));
    assert_eq!(tree.as_attr(attr).and_then(|a| a.owner_element), None);
    assert_eq!(tree.remove_attribute(div, "title"), None);
}

#[test]
fn test_attr_nodes_are_owned_by_one_element() {
    let mut tree = DomTree::new();
    let a = tree.create_element(NodeId::ROOT, "a");
    let b = tree.create_element(NodeId::ROOT, "b");
    let _ = tree.set_attribute(a, "href", "#");
    let _ = tree.set_attribute(b, "href", "#");

    let attr_a = tree.attribute_node(a, "href");
    let attr_b = tree.attribute_node(b, "href");

    assert_ne!(attr_a, attr_b);
    assert_eq!(attr_a.and_then(|id| tree.as_attr(id)?.owner_element), Some(a));
    assert_eq!(attr_b.and_then(|id| tree.as_attr(id)?.owner_element), Some(b));
}

#[test]
fn test_namespaced_attributes_are_unique_by_namespace_and_local_name() {
    let mut tree = DomTree::new();
    let svg = tree.create_element_ns(NodeId::ROOT, Some(Namespace::Svg), None, "svg");

    let _ = tree.set_attribute_ns(svg, Some(Namespace::XLink), Some("xlink"), "href", "#a");
    let _ = tree.set_attribute_ns(svg, None, None, "href", "#b");
    let _ = tree.set_attribute_ns(svg, Some(Namespace::XLink), Some("xlink"), "href", "#c");

    assert_eq!(tree.attributes(svg).len(), 2);
    assert_eq!(
        tree.get_attribute_ns(svg, Some(Namespace::XLink), "href"),
        Some("#c")
    );
    assert_eq!(tree.get_attribute(svg, "xlink:href"), Some("#c"));
    assert_eq!(tree.get_attribute(svg, "href"), Some("#b"));
}

#[test]
fn test_set_attribute_on_text_fails() {
    let (mut tree, node) = text("x");

    assert_eq!(
        tree.set_attribute(node, "id", "a"),
        Err(DomError::NotAnElement(node))
    );
}

#[test]
fn test_class_list_splits_on_whitespace() {
    let mut tree = DomTree::new();
    let div = tree.create_element(NodeId::ROOT, "div");
    let _ = tree.set_attribute(div, "class", "  one\ttwo\nthree ");

    assert_eq!(tree.class_list(div), vec!["one", "two", "three"]);
}
