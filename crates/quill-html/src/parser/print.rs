//! Indented text dump of a parsed tree, for debugging and tests.

use std::fmt::Write as _;

use quill_dom::{DomTree, Namespace, NodeId, NodeType};

/// Print a DOM tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    print!("{}", format_tree(tree, id, indent));
}

/// Render the subtree at `id`, two spaces per level (lines deeper than 64
/// levels are marked with their depth instead). Elements outside the
/// HTML namespace are prefixed with `svg` or `math`, and a template's
/// contents appear under a `content` line.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId, indent: usize) -> String {
    let mut out = String::new();
    write_node(tree, id, indent, &mut out);
    out
}

/// Indentation stops growing past this depth; deeper lines are prefixed with
/// their depth instead, which keeps the output linear in the size of the tree.
const MAX_INDENT_DEPTH: usize = 64;

fn indent_prefix(depth: usize) -> String {
    if depth <= MAX_INDENT_DEPTH {
        "  ".repeat(depth)
    } else {
        format!("{}[{depth}] ", "  ".repeat(MAX_INDENT_DEPTH))
    }
}

/// Preorder walk with an explicit stack, so the depth of the tree is bounded
/// only by memory.
fn write_node(tree: &DomTree, root: NodeId, indent: usize, out: &mut String) {
    let mut stack = vec![(root, indent)];
    while let Some((id, indent)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let prefix = indent_prefix(indent);
        match &node.node_type {
            NodeType::Document(_) => {
                let _ = writeln!(out, "{prefix}Document");
            }
            NodeType::DocumentType(doctype) => {
                let _ = writeln!(out, "{prefix}<!DOCTYPE {}>", doctype.name);
            }
            NodeType::DocumentFragment => {
                let _ = writeln!(out, "{prefix}#document-fragment");
            }
            NodeType::Element(data) => {
                let name = match data.namespace {
                    Some(Namespace::Svg) => format!("svg {}", data.local_name),
                    Some(Namespace::MathMl) => format!("math {}", data.local_name),
                    _ => data.local_name.clone(),
                };
                let attrs: Vec<String> = tree
                    .attribute_pairs(id)
                    .map(|(k, v)| {
                        if v.is_empty() {
                            k
                        } else {
                            format!("{k}=\"{v}\"")
                        }
                    })
                    .collect();
                if attrs.is_empty() {
                    let _ = writeln!(out, "{prefix}<{name}>");
                } else {
                    let _ = writeln!(out, "{prefix}<{name} {}>", attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                let _ = writeln!(out, "{prefix}\"{display}\"");
            }
            NodeType::Comment(data) => {
                let _ = writeln!(out, "{prefix}<!-- {data} -->");
            }
            NodeType::ProcessingInstruction(pi) => {
                let _ = writeln!(out, "{prefix}<?{} {}>", pi.target, pi.data);
            }
            NodeType::Attr(_) => {}
        }

        // Children go on the stack first so the template contents, pushed
        // last, come out right after the element's own line.
        stack.extend(
            tree.children(id)
                .iter()
                .rev()
                .map(|&child| (child, indent + 1)),
        );
        if let Some(contents) = tree.template_contents(id) {
            let _ = writeln!(out, "{}content", indent_prefix(indent + 1));
            stack.extend(
                tree.children(contents)
                    .iter()
                    .rev()
                    .map(|&child| (child, indent + 2)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use quill_dom::{DomTree, NodeId};

    use super::format_tree;

    #[test]
    fn test_template_contents_precede_children() {
        let mut tree = DomTree::new();
        let template = tree.create_element(NodeId::ROOT, "template");
        let _ = tree.append_child(NodeId::ROOT, template).unwrap();
        let contents = tree.template_contents(template).unwrap();
        let inner = tree.create_element(NodeId::ROOT, "b");
        let _ = tree.append_child(contents, inner).unwrap();

        assert_eq!(
            format_tree(&tree, NodeId::ROOT, 0),
            "Document\n  <template>\n    content\n      <b>\n"
        );
    }

    #[test]
    fn test_very_deep_tree_formats_without_recursion() {
        const DEPTH: usize = 50_000;
        let mut tree = DomTree::new();
        let mut parent = NodeId::ROOT;
        for _ in 0..DEPTH {
            let div = tree.create_element(NodeId::ROOT, "div");
            let _ = tree.append_child(parent, div).unwrap();
            parent = div;
        }

        let out = format_tree(&tree, NodeId::ROOT, 0);
        assert_eq!(out.lines().count(), DEPTH + 1);
        assert_eq!(
            out.lines().nth(64),
            Some(format!("{}<div>", "  ".repeat(64)).as_str())
        );
        assert_eq!(
            out.lines().last(),
            Some(format!("{}[{DEPTH}] <div>", "  ".repeat(64)).as_str())
        );
    }
}
