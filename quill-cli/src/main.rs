//! Quill CLI
//!
//! Parse an HTML file or string and dump the token stream, the document tree,
//! or either of them as JSON, for testing and debugging the parser.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use quill_dom::{DomTree, NodeId, NodeType};
use quill_html::{HTMLTokenizer, ParseError, Token, format_tree, parse_with_errors};
use serde_json::{Value, json};

/// Quill: HTML5 tokenizer and tree constructor
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the document tree of a file
    quill ./index.html

    # Parse inline HTML and list parse errors
    quill --html '<p><b>1<p>2' --errors

    # Dump the token stream as JSON
    quill --html '<a href=x>' --tokens --json
"#)]
struct Cli {
    /// Path to the HTML file to parse
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Print parse errors after the output
    #[arg(short = 'e', long)]
    errors: bool,

    /// Emit JSON instead of the indented text format
    #[arg(long)]
    json: bool,

    /// Parse the input as a fragment (reserved; parsed as a document)
    #[arg(long)]
    fragment: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let input = load_input(&cli)?;

    if cli.tokens {
        let mut tokenizer = HTMLTokenizer::new(&input);
        let tokens: Vec<Token> = tokenizer.by_ref().collect();
        let errors = tokenizer.take_errors();
        if cli.json {
            let value = json!({ "tokens": tokens, "errors": errors });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            for token in &tokens {
                println!("{token:?}");
            }
            if cli.errors {
                print_errors(&errors);
            }
        }
        return Ok(());
    }

    let (tree, errors) = parse_with_errors(&input, cli.fragment);
    if cli.json {
        let value = json!({
            "document": node_to_json(&tree, NodeId::ROOT, 0),
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", format_tree(&tree, NodeId::ROOT, 0));
        if cli.errors {
            print_errors(&errors);
        }
    }

    Ok(())
}

/// Read the input named on the command line.
fn load_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("nothing to parse: pass a FILE or --html")
    }
}

fn print_errors(errors: &[ParseError]) {
    println!();
    if errors.is_empty() {
        println!("{}", "no parse errors".green());
        return;
    }
    println!("{}", format!("{} parse error(s)", errors.len()).red());
    for error in errors {
        println!("  {}", error.yellow());
    }
}

/// Subtrees nested deeper than this are summarized rather than serialized.
const MAX_JSON_DEPTH: usize = 256;

/// Serialize the subtree at `id`, which sits `depth` levels below the dump's
/// root. Template contents are emitted under `"content"`, matching the text
/// dump. A node at [`MAX_JSON_DEPTH`] becomes an `"elided"` entry carrying
/// the size of its subtree, which bounds the recursion here and in
/// `serde_json`.
fn node_to_json(tree: &DomTree, id: NodeId, depth: usize) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };
    if depth >= MAX_JSON_DEPTH {
        return json!({
            "type": "elided",
            "nodes": 1 + tree.descendants(id).count(),
        });
    }
    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| node_to_json(tree, child, depth + 1))
        .collect();

    match &node.node_type {
        NodeType::Document(data) => json!({
            "type": "document",
            "quirksMode": format!("{:?}", data.quirks_mode),
            "children": children,
        }),
        NodeType::DocumentType(doctype) => json!({
            "type": "doctype",
            "name": doctype.name,
            "publicId": doctype.public_id,
            "systemId": doctype.system_id,
        }),
        NodeType::DocumentFragment => json!({
            "type": "fragment",
            "children": children,
        }),
        NodeType::Element(element) => {
            let attributes: serde_json::Map<String, Value> = tree
                .attribute_pairs(id)
                .map(|(name, value)| (name, Value::from(value)))
                .collect();
            let mut value = json!({
                "type": "element",
                "name": element.qualified_name(),
                "namespace": element.namespace.map(|ns| ns.url()),
                "attributes": attributes,
                "children": children,
            });
            if let Some(contents) = element.template_contents {
                value["content"] = node_to_json(tree, contents, depth + 1);
            }
            value
        }
        NodeType::Text(data) => json!({ "type": "text", "data": data }),
        NodeType::Comment(data) => json!({ "type": "comment", "data": data }),
        NodeType::ProcessingInstruction(pi) => json!({
            "type": "processing-instruction",
            "target": pi.target,
            "data": pi.data,
        }),
        NodeType::Attr(attr) => json!({
            "type": "attr",
            "name": attr.qualified_name(),
            "value": attr.value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use quill_dom::{DomTree, NodeId};

    use super::{MAX_JSON_DEPTH, node_to_json};

    #[test]
    fn test_deep_tree_json_is_elided_past_limit() {
        const DEPTH: usize = 50_000;
        let mut tree = DomTree::new();
        let mut parent = NodeId::ROOT;
        for _ in 0..DEPTH {
            let div = tree.create_element(NodeId::ROOT, "div");
            let _ = tree.append_child(parent, div).unwrap();
            parent = div;
        }

        let value = node_to_json(&tree, NodeId::ROOT, 0);
        let mut current = &value;
        for _ in 0..MAX_JSON_DEPTH {
            assert_ne!(current["type"], "elided");
            current = &current["children"][0];
        }
        assert_eq!(current["type"], "elided");
        assert_eq!(current["nodes"], DEPTH - MAX_JSON_DEPTH + 1);
        assert!(serde_json::to_string(&value).is_ok());
    }

    #[test]
    fn test_shallow_tree_json_is_complete() {
        let mut tree = DomTree::new();
        let html = tree.create_element(NodeId::ROOT, "html");
        let _ = tree.append_child(NodeId::ROOT, html).unwrap();

        let value = node_to_json(&tree, NodeId::ROOT, 0);
        assert_eq!(value["type"], "document");
        assert_eq!(value["children"][0]["type"], "element");
        assert_eq!(value["children"][0]["name"], "html");
        assert_eq!(value["children"][0]["children"].as_array().map(Vec::len), Some(0));
    }
}
