//! Integration tests for the HTML parser.

use quill_dom::{DomTree, Namespace, NodeId, NodeType, QuirksMode};
use quill_html::{
    DiscardParseErrors, HTMLParser, InsertionMode, ParseErrorKind, format_tree, parse,
    parse_with_errors,
};

/// Helper to serialize a subtree as compact markup. Every element gets an end
/// tag, foreign elements are written `svg:name` / `math:name`, and a
/// template's contents are written as its children.
fn serialize(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let node = tree.get(id).expect("node exists");
    match &node.node_type {
        NodeType::Document(_) | NodeType::DocumentFragment => write_children(tree, id, out),
        NodeType::DocumentType(doctype) => {
            out.push_str(&format!("<!DOCTYPE {}>", doctype.name));
        }
        NodeType::Element(data) => {
            let name = match data.namespace {
                Some(Namespace::Svg) => format!("svg:{}", data.local_name),
                Some(Namespace::MathMl) => format!("math:{}", data.local_name),
                _ => data.local_name.clone(),
            };
            out.push('<');
            out.push_str(&name);
            for (key, value) in tree.attribute_pairs(id) {
                out.push_str(&format!(" {key}=\"{value}\""));
            }
            out.push('>');
            match data.template_contents {
                Some(contents) => write_children(tree, contents, out),
                None => write_children(tree, id, out),
            }
            out.push_str(&format!("</{name}>"));
        }
        NodeType::Text(data) => out.push_str(data),
        NodeType::Comment(data) => out.push_str(&format!("<!--{data}-->")),
        NodeType::ProcessingInstruction(_) | NodeType::Attr(_) => {}
    }
}

fn write_children(tree: &DomTree, id: NodeId, out: &mut String) {
    for &child in tree.children(id) {
        write_node(tree, child, out);
    }
}

/// Parse and serialize the whole document.
fn parse_to_string(html: &str) -> String {
    let tree = parse(html, false);
    serialize(&tree, NodeId::ROOT)
}

/// Parse and serialize only the children of `<body>`.
fn body_of(html: &str) -> String {
    let tree = parse(html, false);
    let body = tree.body().expect("document has a body");
    let mut out = String::new();
    write_children(&tree, body, &mut out);
    out
}

fn error_kinds(html: &str) -> Vec<ParseErrorKind> {
    parse_with_errors(html, false)
        .1
        .into_iter()
        .map(|e| e.kind)
        .collect()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    tree.descendants(from)
        .find(|&id| tree.tag_name(id) == Some(tag))
}

// ========== Document structure ==========

#[test]
fn test_document_structure() {
    assert_eq!(
        parse_to_string("<!DOCTYPE html><html><head></head><body></body></html>"),
        "<!DOCTYPE html><html><head></head><body></body></html>"
    );
}

#[test]
fn test_empty_input_builds_skeleton() {
    let (tree, errors) = parse_with_errors("", false);
    assert_eq!(
        serialize(&tree, NodeId::ROOT),
        "<html><head></head><body></body></html>"
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::MissingDoctype);
    assert_eq!(tree.quirks_mode(NodeId::ROOT), QuirksMode::Quirks);
}

#[test]
fn test_implied_head_and_body() {
    assert_eq!(
        parse_to_string("<!DOCTYPE html><title>x</title><p>y"),
        "<!DOCTYPE html><html><head><title>x</title></head><body><p>y</p></body></html>"
    );
    assert!(error_kinds("<!DOCTYPE html><title>x</title><p>y").is_empty());
}

#[test]
fn test_document_pointers() {
    let tree = parse("<!DOCTYPE html><p>x", false);
    let head = tree.head().expect("head");
    let body = tree.body().expect("body");
    assert_eq!(tree.tag_name(head), Some("head"));
    assert_eq!(tree.tag_name(body), Some("body"));
    assert_eq!(tree.document_element(), tree.parent(body));
}

#[test]
fn test_comments_around_document_element() {
    assert_eq!(
        parse_to_string("<!--a--><!DOCTYPE html><html></html><!--b-->"),
        "<!--a--><!DOCTYPE html><html><head></head><body></body></html><!--b-->"
    );
}

#[test]
fn test_stray_end_tag_before_html_is_ignored() {
    assert_eq!(
        parse_to_string("<!DOCTYPE html></div>x"),
        "<!DOCTYPE html><html><head></head><body>x</body></html>"
    );
    assert_eq!(
        error_kinds("<!DOCTYPE html></div>x"),
        vec![ParseErrorKind::UnexpectedEndTag]
    );
}

#[test]
fn test_end_br_becomes_start_br() {
    assert_eq!(body_of("<!DOCTYPE html></br>"), "<br></br>");
}

#[test]
fn test_html_attributes_are_merged() {
    let tree = parse("<html lang=en><body><html lang=fr dir=rtl>", false);
    let html = tree.document_element().expect("html");
    assert_eq!(tree.get_attribute(html, "lang"), Some("en"));
    assert_eq!(tree.get_attribute(html, "dir"), Some("rtl"));
}

#[test]
fn test_text_after_body_goes_into_body() {
    assert_eq!(body_of("<!DOCTYPE html><body></body> x"), " x");
}

// ========== Text handling ==========

#[test]
fn test_adjacent_text_is_merged() {
    let tree = parse("<!DOCTYPE html><p>a&amp;b</p>", false);
    let p = find_element(&tree, NodeId::ROOT, "p").expect("p");
    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.as_text(tree.children(p)[0]), Some("a&b"));
}

#[test]
fn test_whitespace_before_html_is_dropped() {
    assert_eq!(
        parse_to_string("<!DOCTYPE html>  \n<html>"),
        "<!DOCTYPE html><html><head></head><body></body></html>"
    );
}

#[test]
fn test_leading_newline_in_pre_and_textarea() {
    assert_eq!(body_of("<!DOCTYPE html><pre>\n\nx</pre>"), "<pre>\nx</pre>");
    assert_eq!(
        body_of("<!DOCTYPE html><textarea>\nabc</textarea>"),
        "<textarea>abc</textarea>"
    );
}

#[test]
fn test_raw_text_elements() {
    assert_eq!(
        parse_to_string("<!DOCTYPE html><style>p > a { }</style><script>a<b</script>"),
        "<!DOCTYPE html><html><head><style>p > a { }</style><script>a<b</script></head><body></body></html>"
    );
    assert_eq!(
        parse_to_string("<!DOCTYPE html><title>a<b>c</b></title>"),
        "<!DOCTYPE html><html><head><title>a<b>c</b></title></head><body></body></html>"
    );
}

#[test]
fn test_plaintext_consumes_rest_of_input() {
    assert_eq!(
        body_of("<!DOCTYPE html><plaintext></plaintext><p>"),
        "<plaintext></plaintext><p></plaintext>"
    );
}

// ========== Implied end tags and scope ==========

#[test]
fn test_paragraph_closed_by_paragraph() {
    assert_eq!(body_of("<!DOCTYPE html><p>One<p>Two"), "<p>One</p><p>Two</p>");
}

#[test]
fn test_paragraph_closed_by_block() {
    assert_eq!(
        body_of("<!DOCTYPE html><p>a<div>b</div>"),
        "<p>a</p><div>b</div>"
    );
}

#[test]
fn test_end_p_without_open_p_inserts_empty_p() {
    assert_eq!(body_of("<!DOCTYPE html></p>"), "<p></p>");
}

#[test]
fn test_headings_do_not_nest() {
    assert_eq!(
        body_of("<!DOCTYPE html><h1><h2>x"),
        "<h1></h1><h2>x</h2>"
    );
}

#[test]
fn test_list_items_close_each_other() {
    assert_eq!(
        body_of("<!DOCTYPE html><ul><li>a<li>b</ul>"),
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        body_of("<!DOCTYPE html><dl><dt>a<dd>b<dt>c</dl>"),
        "<dl><dt>a</dt><dd>b</dd><dt>c</dt></dl>"
    );
}

#[test]
fn test_nested_list_item_stays_nested() {
    assert_eq!(
        body_of("<!DOCTYPE html><ul><li>a<ul><li>b</ul></ul>"),
        "<ul><li>a<ul><li>b</li></ul></li></ul>"
    );
}

#[test]
fn test_nested_form_is_ignored() {
    assert_eq!(
        body_of("<!DOCTYPE html><form><form></form>"),
        "<form></form>"
    );
}

#[test]
fn test_image_is_renamed_img() {
    assert_eq!(body_of("<!DOCTYPE html><image src=a>"), "<img src=\"a\"></img>");
}

#[test]
fn test_void_elements_have_no_children() {
    assert_eq!(
        body_of("<!DOCTYPE html><br>a<hr>b<input>c"),
        "<br></br>a<hr></hr>b<input></input>c"
    );
}

#[test]
fn test_self_closing_non_void_is_ignored() {
    assert_eq!(body_of("<!DOCTYPE html><div/>x"), "<div>x</div>");
    assert_eq!(
        error_kinds("<!DOCTYPE html><div/>x"),
        vec![
            ParseErrorKind::NonVoidHtmlElementStartTagWithTrailingSolidus,
            ParseErrorKind::UnclosedElement,
        ]
    );
}

#[test]
fn test_self_closing_void_is_acknowledged() {
    assert!(error_kinds("<!DOCTYPE html><br/><img/>").is_empty());
}

#[test]
fn test_unclosed_element_at_eof() {
    let (_, errors) = parse_with_errors("<!DOCTYPE html><div>", false);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::UnclosedElement);
    assert_eq!(errors[0].detail.as_deref(), Some("div"));
}

#[test]
fn test_end_tag_blocked_by_special_element() {
    let (_, errors) = parse_with_errors("<!DOCTYPE html><p></b>", false);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::UnexpectedEndTag);
    assert_eq!(errors[0].detail.as_deref(), Some("b"));
}

// ========== Active formatting elements ==========

#[test]
fn test_adoption_agency_simple_misnesting() {
    assert_eq!(
        body_of("<!DOCTYPE html><b>1<p>2</b>3</p>"),
        "<b>1</b><p><b>2</b>3</p>"
    );
}

#[test]
fn test_adoption_agency_no_furthest_block() {
    assert_eq!(
        body_of("<!DOCTYPE html><b><i>x</b>y</i>"),
        "<b><i>x</i></b><i>y</i>"
    );
}

#[test]
fn test_adoption_agency_with_nested_blocks() {
    assert_eq!(
        body_of("<!DOCTYPE html><a><div><div>x</a>y"),
        "<a></a><div><a></a><div><a>x</a>y</div></div>"
    );
}

#[test]
fn test_nested_anchor_closes_previous() {
    assert_eq!(
        body_of("<!DOCTYPE html><a href=x>1<a href=y>2</a>"),
        "<a href=\"x\">1</a><a href=\"y\">2</a>"
    );
}

#[test]
fn test_formatting_reconstructed_after_block_close() {
    assert_eq!(
        body_of("<!DOCTYPE html><p><b><i>x</p>y"),
        "<p><b><i>x</i></b></p><b><i>y</i></b>"
    );
}

#[test]
fn test_noahs_ark_keeps_three_copies() {
    assert_eq!(
        body_of("<!DOCTYPE html><p><b><b><b><b>x</p>y"),
        "<p><b><b><b><b>x</b></b></b></b></p><b><b><b>y</b></b></b>"
    );
}

#[test]
fn test_reconstructed_formatting_keeps_attributes() {
    assert_eq!(
        body_of("<!DOCTYPE html><p><font color=red>a</p>b"),
        "<p><font color=\"red\">a</font></p><font color=\"red\">b</font>"
    );
}

#[test]
fn test_properly_nested_formatting() {
    assert_eq!(
        body_of("<!DOCTYPE html><b><i>x</i></b>"),
        "<b><i>x</i></b>"
    );
    assert!(error_kinds("<!DOCTYPE html><b><i>x</i></b>").is_empty());
}

// ========== Tables ==========

#[test]
fn test_implied_table_body_and_row() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><td>a</table>"),
        "<table><tbody><tr><td>a</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_closes_paragraph_in_no_quirks() {
    assert_eq!(
        body_of("<!DOCTYPE html><p><table></table>"),
        "<p></p><table></table>"
    );
}

#[test]
fn test_table_stays_in_paragraph_in_quirks() {
    assert_eq!(body_of("<p><table></table>"), "<p><table></table></p>");
}

#[test]
fn test_foster_parented_text() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><tr><td>1</td></tr>x</table>"),
        "x<table><tbody><tr><td>1</td></tr></tbody></table>"
    );
}

#[test]
fn test_foster_parented_element() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><b>x</b></table>"),
        "<b>x</b><table></table>"
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    assert_eq!(
        body_of("<!DOCTYPE html><table> <tr> </tr> </table>"),
        "<table> <tbody><tr> </tr> </tbody></table>"
    );
}

#[test]
fn test_hidden_input_in_table_is_not_fostered() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><input type=hidden></table>"),
        "<table><input type=\"hidden\"></input></table>"
    );
    assert_eq!(
        body_of("<!DOCTYPE html><table><input type=text></table>"),
        "<input type=\"text\"></input><table></table>"
    );
}

#[test]
fn test_caption_closed_by_cell() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><caption>c<td>x</table>"),
        "<table><caption>c</caption><tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_implied_column_group() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><col><tr></table>"),
        "<table><colgroup><col></col></colgroup><tbody><tr></tr></tbody></table>"
    );
}

#[test]
fn test_cell_closed_by_next_cell() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><tr><td>a<td>b<th>c</table>"),
        "<table><tbody><tr><td>a</td><td>b</td><th>c</th></tr></tbody></table>"
    );
}

#[test]
fn test_nested_table_closes_outer_table() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><table>"),
        "<table></table><table></table>"
    );
}

// ========== Select ==========

#[test]
fn test_options_close_each_other() {
    assert_eq!(
        body_of("<!DOCTYPE html><select><option>a<option>b</select>"),
        "<select><option>a</option><option>b</option></select>"
    );
}

#[test]
fn test_optgroup_closes_option() {
    assert_eq!(
        body_of("<!DOCTYPE html><select><option>a<optgroup><option>b</select>"),
        "<select><option>a</option><optgroup><option>b</option></optgroup></select>"
    );
}

#[test]
fn test_select_ignores_other_tags() {
    assert_eq!(
        body_of("<!DOCTYPE html><select><div>x</div></select>"),
        "<select>x</select>"
    );
}

#[test]
fn test_cell_end_closes_select_in_table() {
    assert_eq!(
        body_of("<!DOCTYPE html><table><tr><td><select><option>a</td>x"),
        "x<table><tbody><tr><td><select><option>a</option></select></td></tr></tbody></table>"
    );
}

// ========== Templates ==========

#[test]
fn test_template_contents_live_in_fragment() {
    let tree = parse("<!DOCTYPE html><template><p>x</p></template>", false);
    let template = find_element(&tree, NodeId::ROOT, "template").expect("template");
    assert!(tree.children(template).is_empty());
    let contents = tree.template_contents(template).expect("template contents");
    assert!(matches!(
        tree.get(contents).map(|n| &n.node_type),
        Some(NodeType::DocumentFragment)
    ));
    assert_eq!(serialize(&tree, contents), "<p>x</p>");
    assert_eq!(tree.tag_name(tree.parent(template).expect("parent")), Some("head"));
}

#[test]
fn test_table_parts_in_template() {
    assert_eq!(
        parse_to_string("<!DOCTYPE html><template><td>x</td></template>"),
        "<!DOCTYPE html><html><head><template><td>x</td></template></head><body></body></html>"
    );
}

#[test]
fn test_template_in_body() {
    assert_eq!(
        body_of("<!DOCTYPE html><body><template><tr><td>a</template>b"),
        "<template><tr><td>a</td></tr></template>b"
    );
}

#[test]
fn test_stray_template_end_tag() {
    assert_eq!(
        error_kinds("<!DOCTYPE html></template>"),
        vec![ParseErrorKind::UnexpectedEndTag]
    );
}

// ========== Frameset ==========

#[test]
fn test_frameset_replaces_body() {
    let tree = parse("<!DOCTYPE html><frameset><frame></frameset>", false);
    assert_eq!(
        serialize(&tree, NodeId::ROOT),
        "<!DOCTYPE html><html><head></head><frameset><frame></frame></frameset></html>"
    );
    let body = tree.body().expect("frameset is the body element");
    assert_eq!(tree.tag_name(body), Some("frameset"));
}

#[test]
fn test_frameset_after_text_is_ignored() {
    assert_eq!(
        body_of("<!DOCTYPE html><body>x<frameset>"),
        "x"
    );
}

// ========== Foreign elements ==========

#[test]
fn test_svg_attributes_are_adjusted() {
    let tree = parse(
        "<!DOCTYPE html><svg viewbox='0 0 1 1' xlink:href='#a'></svg>",
        false,
    );
    let svg = find_element(&tree, NodeId::ROOT, "svg").expect("svg");
    let data = tree.as_element(svg).expect("element");
    assert_eq!(data.namespace, Some(Namespace::Svg));
    assert_eq!(tree.get_attribute(svg, "viewBox"), Some("0 0 1 1"));
    assert_eq!(
        tree.get_attribute_ns(svg, Some(Namespace::XLink), "href"),
        Some("#a")
    );
}

#[test]
fn test_math_is_in_mathml_namespace() {
    assert_eq!(
        body_of("<!DOCTYPE html><math definitionurl=\"x\"/>y"),
        "<math:math definitionURL=\"x\"></math:math>y"
    );
    assert!(error_kinds("<!DOCTYPE html><math/>").is_empty());
}

// ========== Quirks mode ==========

#[test]
fn test_doctype_sets_quirks_mode() {
    let cases = [
        ("<!DOCTYPE html>", QuirksMode::NoQuirks),
        (
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#,
            QuirksMode::Quirks,
        ),
        (
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#,
            QuirksMode::LimitedQuirks,
        ),
        (
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN">"#,
            QuirksMode::LimitedQuirks,
        ),
        ("<!DOCTYPE svg>", QuirksMode::Quirks),
    ];
    for (input, expected) in cases {
        let tree = parse(input, false);
        assert_eq!(tree.quirks_mode(NodeId::ROOT), expected, "{input}");
    }
}

#[test]
fn test_non_conforming_doctype_is_reported() {
    assert_eq!(
        error_kinds("<!DOCTYPE html SYSTEM \"x\">"),
        vec![ParseErrorKind::NonConformingDoctype]
    );
    assert!(error_kinds("<!DOCTYPE html SYSTEM \"about:legacy-compat\">").is_empty());
}

#[test]
fn test_late_doctype_is_ignored() {
    let (tree, errors) = parse_with_errors("<!DOCTYPE html><p><!DOCTYPE html>", false);
    assert_eq!(tree.children(NodeId::ROOT).len(), 2);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ParseErrorKind::UnexpectedDoctype);
}

// ========== Parser API ==========

#[test]
fn test_parser_starts_in_initial_mode() {
    let mut sink = DiscardParseErrors;
    let parser = HTMLParser::new("", &mut sink);
    assert_eq!(parser.insertion_mode(), InsertionMode::Initial);
}

#[test]
fn test_scripting_flag_makes_noscript_raw() {
    let mut sink = DiscardParseErrors;
    let tree = HTMLParser::new("<!DOCTYPE html><body><noscript><p>x</p></noscript>", &mut sink)
        .with_scripting(true)
        .run();
    let body = tree.body().expect("body");
    let mut out = String::new();
    write_children(&tree, body, &mut out);
    assert_eq!(out, "<noscript><p>x</p></noscript>");
    let noscript = tree.children(body)[0];
    assert_eq!(tree.children(noscript).len(), 1);
    assert!(tree.as_text(tree.children(noscript)[0]).is_some());
}

#[test]
fn test_fragment_flag_parses_as_document() {
    assert_eq!(
        serialize(&parse("<p>x", true), NodeId::ROOT),
        serialize(&parse("<p>x", false), NodeId::ROOT)
    );
}

#[test]
fn test_errors_are_in_input_order() {
    let (_, errors) = parse_with_errors("<p>\n</b>\n&#0;", false);
    let lines: Vec<usize> = errors.iter().map(|e| e.position.line).collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    assert_eq!(lines, sorted);
    assert_eq!(errors[0].kind, ParseErrorKind::MissingDoctype);
}

#[test]
fn test_format_tree_output() {
    let tree = parse("<!DOCTYPE html><p class=a>hi there<!--c-->", false);
    let expected = "\
Document
  <!DOCTYPE html>
  <html>
    <head>
    <body>
      <p class=\"a\">
        \"hi\u{00B7}there\"
        <!-- c -->
";
    assert_eq!(format_tree(&tree, NodeId::ROOT, 0), expected);
}

#[test]
fn test_collections_over_parsed_tree_stay_live() {
    let mut tree = parse("<!DOCTYPE html><p>a<p>b<div><p>c</div>", false);
    let mut paragraphs = tree.get_elements_by_tag_name(NodeId::ROOT, "p");
    assert_eq!(paragraphs.len(&tree), 3);

    let body = tree.body().expect("body");
    let p = tree.create_element(NodeId::ROOT, "p");
    let _ = tree.append_child(body, p).expect("append");
    assert_eq!(paragraphs.len(&tree), 4);
    assert_eq!(paragraphs.item(&tree, 3), Some(p));
}

// ========== Properties ==========

fn has_adjacent_text(tree: &DomTree, id: NodeId) -> bool {
    let children = tree.children(id);
    let adjacent = children
        .windows(2)
        .any(|pair| tree.as_text(pair[0]).is_some() && tree.as_text(pair[1]).is_some());
    adjacent
        || children.iter().any(|&child| has_adjacent_text(tree, child))
        || tree
            .template_contents(id)
            .is_some_and(|contents| has_adjacent_text(tree, contents))
}

#[quickcheck_macros::quickcheck]
fn prop_parse_yields_one_document_element(input: String) -> bool {
    let tree = parse(&input, false);
    let elements = tree
        .children(NodeId::ROOT)
        .iter()
        .filter(|&&id| tree.as_element(id).is_some())
        .count();
    elements == 1
        && tree
            .document_element()
            .is_some_and(|html| tree.tag_name(html) == Some("html"))
}

#[quickcheck_macros::quickcheck]
fn prop_no_adjacent_text_nodes(input: String) -> bool {
    let tree = parse(&input, false);
    !has_adjacent_text(&tree, NodeId::ROOT)
}

#[quickcheck_macros::quickcheck]
fn prop_markup_like_input_never_panics(parts: Vec<u8>) -> bool {
    const PIECES: &[&str] = &[
        "<p>", "</p>", "<b>", "</b>", "<i>", "</i>", "<a>", "</a>", "<table>", "</table>",
        "<tr>", "<td>", "</td>", "<template>", "</template>", "<select>", "<option>", "x",
        " ", "<div>", "</div>", "<svg>", "</svg>", "<frameset>", "<li>", "<h1>", "<!--c-->",
        "<caption>", "<col>", "<textarea>", "<form>", "</form>", "</body>", "</html>",
    ];
    let input: String = parts
        .iter()
        .map(|&i| PIECES[usize::from(i) % PIECES.len()])
        .collect();
    let tree = parse(&input, false);
    tree.document_element().is_some() && !has_adjacent_text(&tree, NodeId::ROOT)
}
