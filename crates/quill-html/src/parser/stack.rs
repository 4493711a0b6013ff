//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
//!
//! Scope checks, popping helpers, implied end tags and resetting the
//! insertion mode.

use quill_dom::{Namespace, NodeId};

use super::core::{HTMLParser, InsertionMode};
use crate::error::ParseErrorKind;

/// The element types that bound a "has an element in ... scope" search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ScopeKind {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope": default plus `ol`, `ul`.
    ListItem,
    /// "has an element in button scope": default plus `button`.
    Button,
    /// "has an element in table scope": `html`, `table`, `template`.
    Table,
    /// "has an element in select scope": everything except `optgroup` and
    /// `option`.
    Select,
}

/// [§ 13.2.6.2 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAG_ELEMENTS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly)
const THOROUGH_IMPLIED_END_TAG_ELEMENTS: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
    "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// [§ 13.1.1 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules:
/// HTML's address, applet, area, article, aside, base, basefont, bgsound,
/// blockquote, body, br, button, caption, center, col, colgroup, dd, details,
/// dir, div, dl, dt, embed, fieldset, figcaption, figure, footer, form, frame,
/// frameset, h1, h2, h3, h4, h5, h6, head, header, hgroup, hr, html, iframe,
/// img, input, keygen, li, link, listing, main, marquee, menu, meta, nav,
/// noembed, noframes, noscript, object, ol, p, param, plaintext, pre, script,
/// search, section, select, source, style, summary, table, tbody, td,
/// template, textarea, tfoot, th, thead, title, tr, track, ul, wbr, xmp;
/// MathML mi, mo, mn, ms, mtext, and annotation-xml; and SVG foreignObject,
/// desc, and title."
const SPECIAL_HTML_ELEMENTS: &[&str] = &[
    "address", "applet", "area", "article", "aside", "base", "basefont", "bgsound",
    "blockquote", "body", "br", "button", "caption", "center", "col", "colgroup", "dd",
    "details", "dir", "div", "dl", "dt", "embed", "fieldset", "figcaption", "figure", "footer",
    "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup",
    "hr", "html", "iframe", "img", "input", "keygen", "li", "link", "listing", "main", "marquee",
    "menu", "meta", "nav", "noembed", "noframes", "noscript", "object", "ol", "p", "param",
    "plaintext", "pre", "script", "search", "section", "select", "source", "style", "summary",
    "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "title", "tr",
    "track", "ul", "wbr", "xmp",
];

/// MathML and SVG elements that are scope boundaries (and special).
const MATHML_SCOPE_ELEMENTS: &[&str] = &["mi", "mo", "mn", "ms", "mtext", "annotation-xml"];
const SVG_SCOPE_ELEMENTS: &[&str] = &["foreignObject", "desc", "title"];

impl HTMLParser<'_> {
    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node." There is no fragment
    /// case here.
    pub(super) fn adjusted_current_node(&self) -> Option<NodeId> {
        self.current_node()
    }

    /// Local name of an element, whatever its namespace.
    pub(super) fn get_tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.tag_name(id)
    }

    /// True if `id` is an HTML element named `name`.
    pub(super) fn is_html(&self, id: NodeId, name: &str) -> bool {
        self.tree.is_html_element(id, name)
    }

    /// True if `id` is an HTML element whose name is in `names`.
    pub(super) fn is_html_one_of(&self, id: NodeId, names: &[&str]) -> bool {
        self.tree
            .as_element(id)
            .is_some_and(|data| data.is_html_one_of(names))
    }

    /// True if the current node is an HTML element named `name`.
    pub(super) fn current_node_is(&self, name: &str) -> bool {
        self.current_node().is_some_and(|id| self.is_html(id, name))
    }

    /// True if the current node is an HTML element whose name is in `names`.
    pub(super) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node()
            .is_some_and(|id| self.is_html_one_of(id, names))
    }

    /// True if some HTML element named `name` is on the stack.
    pub(super) fn stack_contains(&self, name: &str) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| self.is_html(id, name))
    }

    /// [§ 13.1.1 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
    pub(super) fn is_special_element(&self, id: NodeId) -> bool {
        self.tree.as_element(id).is_some_and(|data| match data.namespace {
            Some(Namespace::Html) => SPECIAL_HTML_ELEMENTS.contains(&data.local_name.as_str()),
            Some(Namespace::MathMl) => MATHML_SCOPE_ELEMENTS.contains(&data.local_name.as_str()),
            Some(Namespace::Svg) => SVG_SCOPE_ELEMENTS.contains(&data.local_name.as_str()),
            _ => false,
        })
    }

    /// Whether `id` ends a search of the given scope kind.
    fn is_scope_boundary(&self, id: NodeId, kind: ScopeKind) -> bool {
        let Some(data) = self.tree.as_element(id) else {
            return false;
        };
        let name = data.local_name.as_str();
        let html = data.namespace == Some(Namespace::Html);
        let default_scope = || match data.namespace {
            Some(Namespace::Html) => matches!(
                name,
                "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object"
                    | "template"
            ),
            Some(Namespace::MathMl) => MATHML_SCOPE_ELEMENTS.contains(&name),
            Some(Namespace::Svg) => SVG_SCOPE_ELEMENTS.contains(&name),
            _ => false,
        };
        match kind {
            ScopeKind::Default => default_scope(),
            ScopeKind::ListItem => default_scope() || (html && matches!(name, "ol" | "ul")),
            ScopeKind::Button => default_scope() || (html && name == "button"),
            ScopeKind::Table => html && matches!(name, "html" | "table" | "template"),
            ScopeKind::Select => !(html && matches!(name, "optgroup" | "option")),
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "The stack of open elements is said to have an element target node in a
    /// specific scope consisting of a list of element types list when the
    /// following algorithm terminates in a match state:"
    ///
    /// STEP 1: "Initialize node to be the current node (the bottommost node
    ///          of the stack)."
    ///
    /// STEP 2: "If node is the target node, terminate in a match state."
    ///
    /// STEP 3: "Otherwise, if node is one of the element types in list,
    ///          terminate in a failure state."
    ///
    /// STEP 4: "Otherwise, set node to the previous entry in the stack of
    ///          open elements and return to step 2."
    pub(super) fn has_element_in_specific_scope(&self, tag_name: &str, kind: ScopeKind) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if self.is_html(node_id, tag_name) {
                return true;
            }
            if self.is_scope_boundary(node_id, kind) {
                return false;
            }
        }
        false
    }

    /// Like [`has_element_in_specific_scope`](Self::has_element_in_specific_scope)
    /// for a particular node rather than a tag name.
    pub(super) fn has_node_in_scope(&self, target: NodeId, kind: ScopeKind) -> bool {
        for &node_id in self.stack_of_open_elements.iter().rev() {
            if node_id == target {
                return true;
            }
            if self.is_scope_boundary(node_id, kind) {
                return false;
            }
        }
        false
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
    pub(super) fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, ScopeKind::Default)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-button-scope)
    pub(super) fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, ScopeKind::Button)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-list-item-scope)
    pub(super) fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, ScopeKind::ListItem)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-table-scope)
    pub(super) fn has_element_in_table_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, ScopeKind::Table)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-select-scope)
    pub(super) fn has_element_in_select_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(tag_name, ScopeKind::Select)
    }

    /// True if any of `names` is in scope.
    pub(super) fn has_any_in_scope(&self, names: &[&str], kind: ScopeKind) -> bool {
        names
            .iter()
            .any(|name| self.has_element_in_specific_scope(name, kind))
    }

    /// Pop elements from the stack of open elements until an HTML element
    /// named `tag_name` has been popped.
    ///
    /// STEP 1: Pop the current node from the stack.
    /// STEP 2: If popped node matches target tag name, stop.
    /// STEP 3: Otherwise, repeat from STEP 1.
    pub(super) fn pop_until_tag(&mut self, tag_name: &str) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self.is_html(id, tag_name) {
                break;
            }
        }
    }

    /// Pop elements until one of `tag_names` has been popped.
    ///
    /// Used for headings: "pop elements from the stack of open elements until
    /// an h1, h2, h3, h4, h5, or h6 element has been popped from the stack."
    pub(super) fn pop_until_one_of(&mut self, tag_names: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self.is_html_one_of(id, tag_names) {
                break;
            }
        }
    }

    /// Pop elements until `target` has been popped.
    pub(super) fn pop_until_node(&mut self, target: NodeId) {
        if let Some(index) = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| id == target)
        {
            self.stack_of_open_elements.truncate(index);
        }
    }

    /// Remove `target` from wherever it is in the stack.
    pub(super) fn remove_from_stack(&mut self, target: NodeId) {
        self.stack_of_open_elements.retain(|&id| id != target);
    }

    /// [§ 13.2.6.2 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "When the steps below require the user agent to generate implied end tags,
    /// then, while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an rp
    /// element, an rt element, or an rtc element, the user agent must pop the
    /// current node off the stack of open elements."
    pub(super) fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_excluding(None);
    }

    /// "If a step requires the user agent to generate implied end tags but lists
    /// an element to exclude from the process, then the user agent must perform
    /// the above steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        while let Some(current) = self.current_node() {
            let Some(tag) = self.get_tag_name(current) else {
                break;
            };
            if self.is_html_one_of(current, IMPLIED_END_TAG_ELEMENTS) && exclude != Some(tag) {
                let _ = self.stack_of_open_elements.pop();
            } else {
                break;
            }
        }
    }

    /// [§ 13.2.6.2](https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly)
    ///
    /// "When the steps below require the UA to generate all implied end tags
    /// thoroughly, then, while the current node is a caption element, a
    /// colgroup element, a dd element, a dt element, an li element, an
    /// optgroup element, an option element, a p element, an rb element, an rp
    /// element, an rt element, an rtc element, a tbody element, a td element, a
    /// tfoot element, a th element, a thead element, or a tr element, the UA
    /// must pop the current node off the stack of open elements."
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while self.current_node_is_one_of(THOROUGH_IMPLIED_END_TAG_ELEMENTS) {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "When the steps above say the user agent is to close a p element, it
    /// means that the user agent must run the following steps:
    /// 1. Generate implied end tags, except for p elements.
    /// 2. If the current node is not a p element, then this is a parse error.
    /// 3. Pop elements from the stack of open elements until a p element has
    ///    been popped from the stack."
    pub(super) fn close_a_p_element(&mut self) {
        self.generate_implied_end_tags_excluding(Some("p"));
        if !self.current_node_is("p") {
            self.tag_error(ParseErrorKind::UnclosedElement, "p");
        }
        self.pop_until_tag("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    pub(super) fn close_p_if_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            self.close_a_p_element();
        }
    }

    /// [§ 13.2.6.4.9 Clear the stack back to a table context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "When the steps above require the UA to clear the stack back to a table
    /// context, it means that the UA must, while the current node is not a
    /// table, template, or html element, pop elements from the stack of open
    /// elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13 Clear the stack back to a table body context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    ///
    /// "...while the current node is not a tbody, tfoot, thead, template, or
    /// html element, pop elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14 Clear the stack back to a table row context](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    ///
    /// "...while the current node is not a tr, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    fn clear_stack_back_to(&mut self, stop_at: &[&str]) {
        while let Some(current) = self.current_node() {
            if self.is_html_one_of(current, stop_at) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    ///
    /// "When the steps below require the UA to reset the insertion mode
    /// appropriately, it means the UA must follow these steps:"
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node_id = self.stack_of_open_elements[index];

            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true"
            let last = index == 0;

            let Some(data) = self.tree.as_element(node_id) else {
                continue;
            };
            if data.namespace != Some(Namespace::Html) {
                if last {
                    self.insertion_mode = InsertionMode::InBody;
                    return;
                }
                continue;
            }

            let mode = match data.local_name.as_str() {
                // STEP 4: "If node is a select element, run these substeps:"
                "select" => Some(self.select_insertion_mode(index, last)),
                // STEP 5: "If node is a td or th element and last is false, then
                //          switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => Some(InsertionMode::InCell),
                // STEP 6: "If node is a tr element, then switch the insertion
                //          mode to "in row" and return."
                "tr" => Some(InsertionMode::InRow),
                // STEP 7: "If node is a tbody, thead, or tfoot element, then
                //          switch the insertion mode to "in table body" and return."
                "tbody" | "thead" | "tfoot" => Some(InsertionMode::InTableBody),
                // STEP 8: "If node is a caption element, then switch the
                //          insertion mode to "in caption" and return."
                "caption" => Some(InsertionMode::InCaption),
                // STEP 9: "If node is a colgroup element, then switch the
                //          insertion mode to "in column group" and return."
                "colgroup" => Some(InsertionMode::InColumnGroup),
                // STEP 10: "If node is a table element, then switch the
                //           insertion mode to "in table" and return."
                "table" => Some(InsertionMode::InTable),
                // STEP 11: "If node is a template element, then switch the
                //           insertion mode to the current template insertion
                //           mode and return."
                "template" => self.template_insertion_modes.last().copied(),
                // STEP 12: "If node is a head element and last is false, then
                //           switch the insertion mode to "in head" and return."
                "head" if !last => Some(InsertionMode::InHead),
                // STEP 13: "If node is a body element, then switch the
                //           insertion mode to "in body" and return."
                "body" => Some(InsertionMode::InBody),
                // STEP 14: "If node is a frameset element, then switch the
                //           insertion mode to "in frameset" and return."
                "frameset" => Some(InsertionMode::InFrameset),
                // STEP 15: "If node is an html element, run these substeps:"
                //   "If the head element pointer is null, switch the insertion
                //    mode to "before head" and return."
                //   "Otherwise, the head element pointer is not null, switch the
                //    insertion mode to "after head" and return."
                "html" => Some(if self.head_element_pointer.is_none() {
                    InsertionMode::BeforeHead
                } else {
                    InsertionMode::AfterHead
                }),
                _ => None,
            };

            if let Some(mode) = mode {
                self.insertion_mode = mode;
                return;
            }

            // STEP 16: "If last is true, then switch the insertion mode to "in
            //           body" and return."
            if last {
                self.insertion_mode = InsertionMode::InBody;
                return;
            }
            // STEP 17: "Let node now be the node before node in the stack of
            //           open elements."
        }
        self.insertion_mode = InsertionMode::InBody;
    }

    /// STEP 4 of resetting the insertion mode, for a `select` at `index`.
    fn select_insertion_mode(&self, index: usize, last: bool) -> InsertionMode {
        // "If last is true, jump to the step below labeled done."
        if !last {
            // "Let ancestor be node."
            // "Loop: If ancestor is the first node in the stack of open
            //  elements, jump to the step below labeled done."
            for &ancestor in self.stack_of_open_elements[..index].iter().rev() {
                // "If ancestor is a template node, jump to the step below
                //  labeled done."
                if self.is_html(ancestor, "template") {
                    break;
                }
                // "If ancestor is a table node, switch the insertion mode to
                //  "in select in table" and return."
                if self.is_html(ancestor, "table") {
                    return InsertionMode::InSelectInTable;
                }
            }
        }
        // "Done: Switch the insertion mode to "in select" and return."
        InsertionMode::InSelect
    }
}
