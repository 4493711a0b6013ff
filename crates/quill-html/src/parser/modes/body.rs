//! [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
//! and [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata).

use quill_dom::{Namespace, NodeId, QuirksMode};

use crate::error::ParseErrorKind;
use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::formatting::FORMATTING_ELEMENTS;
use crate::parser::stack::ScopeKind;
use crate::tokenizer::{Token, TokenizerState};

use super::initial::synthetic_start_tag;

/// Start tags that close a `p` in button scope and open a plain block.
const BLOCK_START_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "details", "dialog", "dir", "div", "dl",
    "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "main", "menu", "nav", "ol",
    "p", "search", "section", "summary", "ul",
];

/// End tags closed by "generate implied end tags, then pop until the same
/// tag" when the element is in scope.
const BLOCK_END_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "button", "center", "details", "dialog", "dir",
    "div", "dl", "fieldset", "figcaption", "figure", "footer", "header", "hgroup", "listing",
    "main", "menu", "nav", "ol", "pre", "search", "section", "summary", "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements that may still be open at the end of the body without a parse
/// error.
const CLOSABLE_AT_END_OF_BODY: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td", "tfoot",
    "th", "thead", "tr", "body", "html",
];

/// Tokens "in body" hands to the "in head" rules.
const HEAD_START_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "link", "meta", "noframes", "script", "style", "template",
    "title",
];

/// Start tags that are ignored with a parse error in body.
const IGNORED_START_TAGS: &[&str] = &[
    "caption", "col", "colgroup", "frame", "head", "tbody", "td", "tfoot", "th", "thead", "tr",
];

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(in crate::parser) fn handle_in_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => {
                self.unexpected(token);
                Step::Done
            }

            // Whitespace: "Reconstruct the active formatting elements, if
            // any." "Insert the token's character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
                Step::Done
            }

            // "Any other character token"
            // "Reconstruct the active formatting elements, if any."
            // "Insert the token's character."
            // "Set the frameset-ok flag to "not ok"."
            Token::Character { data } => {
                self.reconstruct_active_formatting_elements();
                self.insert_character(*data);
                self.frameset_ok = false;
                Step::Done
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data } => {
                self.insert_comment(data, None);
                Step::Done
            }

            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.unexpected(token);
                Step::Done
            }

            Token::StartTag { name, .. } => self.in_body_start_tag(token, name),
            Token::EndTag { name, .. } => self.in_body_end_tag(token, name),

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                //  process the token using the rules for the "in template"
                //  insertion mode."
                if !self.template_insertion_modes.is_empty() {
                    return self.process_using_rules_for(InsertionMode::InTemplate, token);
                }
                // "Otherwise, follow these steps:"
                // STEP 1: "If there is a node in the stack of open elements
                //          that is not either a dd element, a dt element, ...
                //          the body element, or the html element, then this is
                //          a parse error."
                self.report_unclosed_elements();
                // STEP 2: "Stop parsing."
                self.stopped = true;
                Step::Done
            }
        }
    }

    /// Report the first open element that is not allowed to stay open at the
    /// end of the body.
    pub(in crate::parser) fn report_unclosed_elements(&mut self) {
        let unclosed = self
            .stack_of_open_elements
            .iter()
            .find(|&&id| !self.is_html_one_of(id, CLOSABLE_AT_END_OF_BODY))
            .and_then(|&id| self.get_tag_name(id))
            .map(str::to_string);
        if let Some(name) = unclosed {
            self.tag_error(ParseErrorKind::UnclosedElement, &name);
        }
    }

    #[allow(clippy::too_many_lines)]
    fn in_body_start_tag(&mut self, token: &Token, name: &str) -> Step {
        match name {
            // "A start tag whose tag name is "html""
            "html" => {
                // "Parse error."
                self.unexpected(token);
                // "If there is a template element on the stack of open
                //  elements, then ignore the token."
                // "Otherwise, for each attribute on the token, check to see if
                //  the attribute is already present on the top element of the
                //  stack of open elements. If it is not, add the attribute and
                //  its corresponding value to that element."
                if !self.stack_contains("template")
                    && let Some(&html) = self.stack_of_open_elements.first()
                {
                    self.merge_attributes_into(html, token);
                }
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            _ if HEAD_START_TAGS.contains(&name) => {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "A start tag whose tag name is "body""
            "body" => {
                // "Parse error."
                self.unexpected(token);
                // "If the stack of open elements has only one node on it, if
                //  the second element on the stack of open elements is not a
                //  body element, or if there is a template element on the
                //  stack of open elements, then ignore the token. (fragment
                //  case or there is a template element on the stack)"
                // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                //  each attribute on the token, check to see if the attribute
                //  is already present on the body element (the second element)
                //  on the stack of open elements, and if it is not, add the
                //  attribute and its corresponding value to that element."
                if let Some(body) = self.second_element_if_body()
                    && !self.stack_contains("template")
                {
                    self.frameset_ok = false;
                    self.merge_attributes_into(body, token);
                }
            }

            // "A start tag whose tag name is "frameset""
            "frameset" => {
                // "Parse error."
                self.unexpected(token);
                // "If the stack of open elements has only one node on it, or
                //  if the second element on the stack of open elements is not
                //  a body element, then ignore the token. (fragment case or
                //  there is a template element on the stack)"
                // "If the frameset-ok flag is set to "not ok", ignore the
                //  token."
                let Some(body) = self.second_element_if_body() else {
                    return Step::Done;
                };
                if !self.frameset_ok {
                    return Step::Done;
                }
                // STEP 1: "Remove the second element on the stack of open
                //          elements from its parent node, if it has one."
                if let Some(parent) = self.tree.parent(body) {
                    let _ = Self::dom_result(self.tree.remove_child(parent, body));
                }
                // STEP 2: "Pop all the nodes from the bottom of the stack of
                //          open elements, from the current node up to, but not
                //          including, the root html element."
                self.stack_of_open_elements.truncate(1);
                // STEP 3: "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // STEP 4: "Switch the insertion mode to "in frameset"."
                self.insertion_mode = InsertionMode::InFrameset;
            }

            // "A start tag whose tag name is one of: "address", "article",
            //  "aside", "blockquote", "center", "details", "dialog", "dir",
            //  "div", "dl", "fieldset", "figcaption", "figure", "footer",
            //  "header", "hgroup", "main", "menu", "nav", "ol", "p", "search",
            //  "section", "summary", "ul""
            // "If the stack of open elements has a p element in button scope,
            //  then close a p element."
            // "Insert an HTML element for the token."
            _ if BLOCK_START_TAGS.contains(&name) => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "h1", "h2", "h3", "h4",
            //  "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                self.close_p_if_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                //  of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a
                //  parse error; pop the current node off the stack of open
                //  elements."
                if self.current_node_is_one_of(HEADINGS) {
                    self.tag_error(ParseErrorKind::MisnestedTag, name);
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "pre", "listing""
            // "If the stack of open elements has a p element in button scope,
            //  then close a p element."
            // "Insert an HTML element for the token."
            // "If the next token is a U+000A LINE FEED (LF) character token,
            //  then ignore that token and move on to the next one. (Newlines
            //  at the start of pre blocks are ignored as an authoring
            //  convenience.)"
            // "Set the frameset-ok flag to "not ok"."
            "pre" | "listing" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                self.skip_next_newline = true;
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "form""
            "form" => {
                // "If the form element pointer is not null, and there is no
                //  template element on the stack of open elements, then this
                //  is a parse error; ignore the token."
                let in_template = self.stack_contains("template");
                if self.form_element_pointer.is_some() && !in_template {
                    self.unexpected(token);
                    return Step::Done;
                }
                // "Otherwise: If the stack of open elements has a p element in
                //  button scope, then close a p element. Insert an HTML element
                //  for the token, and, if there is no template element on the
                //  stack of open elements, set the form element pointer to
                //  point to the element created."
                self.close_p_if_in_button_scope();
                let form = self.insert_html_element(token);
                if !in_template {
                    self.form_element_pointer = Some(form);
                }
            }

            // "A start tag whose tag name is "li""
            "li" => self.start_list_item(token, &["li"]),

            // "A start tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => self.start_list_item(token, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext""
            // "If the stack of open elements has a p element in button scope,
            //  then close a p element."
            // "Insert an HTML element for the token."
            // "Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                self.switch_tokenizer_for(token, TokenizerState::PLAINTEXT);
            }

            // "A start tag whose tag name is "button""
            "button" => {
                // STEP 1: "If the stack of open elements has a button element
                //          in scope, then run these substeps:"
                if self.has_element_in_scope("button") {
                    // "Parse error."
                    self.tag_error(ParseErrorKind::MisnestedTag, name);
                    // "Generate implied end tags."
                    self.generate_implied_end_tags();
                    // "Pop elements from the stack of open elements until a
                    //  button element has been popped from the stack."
                    self.pop_until_tag("button");
                }
                // STEP 2: "Reconstruct the active formatting elements, if any."
                self.reconstruct_active_formatting_elements();
                // STEP 3: "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // STEP 4: "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "a""
            "a" => {
                // "If the list of active formatting elements contains an a
                //  element between the end of the list and the last marker on
                //  the list (or the start of the list if there is no marker on
                //  the list), then this is a parse error; run the adoption
                //  agency algorithm for the token, then remove that element
                //  from the list of active formatting elements and the stack
                //  of open elements if the adoption agency algorithm didn't
                //  already remove it (it might not have if the element is not
                //  in table scope)."
                if let Some(existing) = self.formatting_element_after_last_marker("a") {
                    self.tag_error(ParseErrorKind::MisnestedTag, name);
                    self.run_adoption_agency("a");
                    if let Some(index) = self.formatting_index_of(existing) {
                        let _ = self.active_formatting_elements.remove(index);
                    }
                    self.remove_from_stack(existing);
                }
                // "Reconstruct the active formatting elements, if any."
                // "Insert an HTML element for the token. Push onto the list of
                //  active formatting elements that element."
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is "nobr""
            "nobr" => {
                // "Reconstruct the active formatting elements, if any."
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                //  then this is a parse error; run the adoption agency
                //  algorithm for the token, then once again reconstruct the
                //  active formatting elements, if any."
                if self.has_element_in_scope("nobr") {
                    self.tag_error(ParseErrorKind::MisnestedTag, name);
                    self.run_adoption_agency("nobr");
                }
                self.insert_formatting_element(token);
            }

            // "A start tag whose tag name is one of: "b", "big", "code", "em",
            //  "font", "i", "s", "small", "strike", "strong", "tt", "u""
            _ if FORMATTING_ELEMENTS.contains(&name) => self.insert_formatting_element(token),

            // "A start tag whose tag name is one of: "applet", "marquee",
            //  "object""
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            // "Insert a marker at the end of the list of active formatting
            //  elements."
            // "Set the frameset-ok flag to "not ok"."
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.insert_marker();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "table""
            // "If the Document is not set to quirks mode, and the stack of
            //  open elements has a p element in button scope, then close a p
            //  element."
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            // "Switch the insertion mode to "in table"."
            "table" => {
                if self.tree.quirks_mode(NodeId::ROOT) != QuirksMode::Quirks {
                    self.close_p_if_in_button_scope();
                }
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InTable;
            }

            // "A start tag whose tag name is one of: "area", "br", "embed",
            //  "img", "keygen", "wbr""
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.insert_void_element(token);
            }

            // "A start tag whose tag name is "input""
            "input" => {
                // "Reconstruct the active formatting elements, if any."
                // "Insert an HTML element for the token. Immediately pop the
                //  current node off the stack of open elements."
                // "Acknowledge the token's self-closing flag, if it is set."
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
                // "If the token does not have an attribute with the name
                //  "type", or if it does, but that attribute's value is not an
                //  ASCII case-insensitive match for the string "hidden", then:
                //  set the frameset-ok flag to "not ok"."
                if !token
                    .attribute("type")
                    .is_some_and(|value| value.eq_ignore_ascii_case("hidden"))
                {
                    self.frameset_ok = false;
                }
            }

            // "A start tag whose tag name is one of: "param", "source",
            //  "track""
            // "Insert an HTML element for the token. Immediately pop the
            //  current node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            "param" | "source" | "track" => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "hr""
            "hr" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
                self.frameset_ok = false;
            }

            // "A start tag whose tag name is "image""
            // "Parse error. Change the token's tag name to "img" and reprocess
            //  it. (Don't ask.)"
            "image" => {
                self.unexpected(token);
                let mut img = token.clone();
                if let Token::StartTag { name, .. } = &mut img {
                    "img".clone_into(name);
                }
                return self.handle_in_body_mode(&img);
            }

            // "A start tag whose tag name is "textarea""
            "textarea" => {
                // STEP 1: "Insert an HTML element for the token."
                let _ = self.insert_html_element(token);
                // STEP 2: "If the next token is a U+000A LINE FEED (LF)
                //          character token, then ignore that token and move on
                //          to the next one."
                self.skip_next_newline = true;
                // STEP 3: "Switch the tokenizer to the RCDATA state."
                self.switch_tokenizer_for(token, TokenizerState::RCDATA);
                // STEP 4: "Let the original insertion mode be the current
                //          insertion mode."
                self.original_insertion_mode = Some(self.insertion_mode);
                // STEP 5: "Set the frameset-ok flag to "not ok"."
                self.frameset_ok = false;
                // STEP 6: "Switch the insertion mode to "text"."
                self.insertion_mode = InsertionMode::Text;
            }

            // "A start tag whose tag name is "xmp""
            "xmp" => {
                self.close_p_if_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe""
            // "Set the frameset-ok flag to "not ok"."
            // "Follow the generic raw text element parsing algorithm."
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "noembed""
            // "A start tag whose tag name is "noscript", if the scripting flag
            //  is enabled"
            // "Follow the generic raw text element parsing algorithm."
            "noembed" => self.parse_text_element(token, TokenizerState::RAWTEXT),
            "noscript" if self.scripting => {
                self.parse_text_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "select""
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption",
                //  "in table body", "in row", or "in cell", then switch the
                //  insertion mode to "in select in table". Otherwise, switch
                //  the insertion mode to "in select"."
                self.insertion_mode = match self.insertion_mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
            }

            // "A start tag whose tag name is one of: "optgroup", "option""
            // "If the current node is an option element, then pop the current
            //  node off the stack of open elements."
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.stack_of_open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rb", "rtc""
            // "If the stack of open elements has a ruby element in scope, then
            //  generate implied end tags. If the current node is not now a
            //  ruby element, this is a parse error."
            "rb" | "rtc" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags();
                    if !self.current_node_is("ruby") {
                        self.tag_error(ParseErrorKind::MisnestedTag, name);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is one of: "rp", "rt""
            // "If the stack of open elements has a ruby element in scope, then
            //  generate implied end tags, except for rtc elements. If the
            //  current node is not now a rtc element or a ruby element, this
            //  is a parse error."
            "rp" | "rt" => {
                if self.has_element_in_scope("ruby") {
                    self.generate_implied_end_tags_excluding(Some("rtc"));
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.tag_error(ParseErrorKind::MisnestedTag, name);
                    }
                }
                let _ = self.insert_html_element(token);
            }

            // "A start tag whose tag name is "math""
            // "A start tag whose tag name is "svg""
            // "Reconstruct the active formatting elements, if any."
            // "Adjust MathML attributes for the token." / "Adjust SVG
            //  attributes for the token."
            // "Adjust foreign attributes for the token."
            // "Insert a foreign element for the token, with the MathML
            //  namespace (or SVG namespace) and false."
            // "If the token has its self-closing flag set, pop the current
            //  node off the stack of open elements and acknowledge the token's
            //  self-closing flag."
            "math" | "svg" => {
                let namespace = if name == "math" {
                    Namespace::MathMl
                } else {
                    Namespace::Svg
                };
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_foreign_element(token, namespace);
                if matches!(token, Token::StartTag { self_closing: true, .. }) {
                    let _ = self.stack_of_open_elements.pop();
                    self.acknowledge_self_closing_flag();
                }
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "frame", "head", "tbody", "td", "tfoot", "th",
            //  "thead", "tr""
            // "Parse error. Ignore the token."
            _ if IGNORED_START_TAGS.contains(&name) => self.unexpected(token),

            // "Any other start tag"
            // "Reconstruct the active formatting elements, if any."
            // "Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(token);
            }
        }
        Step::Done
    }

    #[allow(clippy::too_many_lines)]
    fn in_body_end_tag(&mut self, token: &Token, name: &str) -> Step {
        match name {
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            "template" => return self.process_using_rules_for(InsertionMode::InHead, token),

            // "An end tag whose tag name is "body""
            // "An end tag whose tag name is "html""
            "body" | "html" => {
                // "If the stack of open elements does not have a body element
                //  in scope, this is a parse error; ignore the token."
                if !self.has_element_in_scope("body") {
                    self.unexpected(token);
                    return Step::Done;
                }
                // "Otherwise, if there is a node in the stack of open elements
                //  that is not either a dd element, ... or the html element,
                //  then this is a parse error."
                self.report_unclosed_elements();
                // "Switch the insertion mode to "after body"."
                // For </html>: "Reprocess the token."
                if name == "html" {
                    return self.reprocess_in(InsertionMode::AfterBody);
                }
                self.insertion_mode = InsertionMode::AfterBody;
            }

            // "An end tag whose tag name is one of: "address", "article",
            //  "aside", "blockquote", "button", "center", ... "ul""
            _ if BLOCK_END_TAGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                //  scope that is an HTML element with the same tag name as
                //  that of the token, then this is a parse error; ignore the
                //  token."
                if !self.has_element_in_scope(name) {
                    self.unexpected(token);
                    return Step::Done;
                }
                self.close_element_in_scope(name, None);
            }

            // "An end tag whose tag name is "form""
            "form" => self.end_form(token),

            // "An end tag whose tag name is "p""
            "p" => {
                // "If the stack of open elements does not have a p element in
                //  button scope, then this is a parse error; insert an HTML
                //  element for a "p" start tag token with no attributes."
                if !self.has_element_in_button_scope("p") {
                    self.unexpected(token);
                    let _ = self.insert_html_element(&synthetic_start_tag("p"));
                }
                // "Close a p element."
                self.close_a_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => {
                // "If the stack of open elements does not have an li element
                //  in list item scope, then this is a parse error; ignore the
                //  token."
                if !self.has_element_in_list_item_scope("li") {
                    self.unexpected(token);
                    return Step::Done;
                }
                self.close_element_in_scope("li", Some("li"));
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if !self.has_element_in_scope(name) {
                    self.unexpected(token);
                    return Step::Done;
                }
                self.close_element_in_scope(name, Some(name));
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4",
            //  "h5", "h6""
            _ if HEADINGS.contains(&name) => {
                // "If the stack of open elements does not have an element in
                //  scope that is an HTML element and whose tag name is one of
                //  "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                //  error; ignore the token."
                if !self.has_any_in_scope(HEADINGS, ScopeKind::Default) {
                    self.unexpected(token);
                    return Step::Done;
                }
                // STEP 1: "Generate implied end tags."
                self.generate_implied_end_tags();
                // STEP 2: "If the current node is not an HTML element with the
                //          same tag name as that of the token, then this is a
                //          parse error."
                if !self.current_node_is(name) {
                    self.tag_error(ParseErrorKind::MisnestedTag, name);
                }
                // STEP 3: "Pop elements from the stack of open elements until
                //          an HTML element whose tag name is one of "h1", "h2",
                //          "h3", "h4", "h5", or "h6" has been popped from the
                //          stack."
                self.pop_until_one_of(HEADINGS);
            }

            // "An end tag whose tag name is one of: "a", "b", "big", "code",
            //  "em", "font", "i", "nobr", "s", "small", "strike", "strong",
            //  "tt", "u""
            // "Run the adoption agency algorithm for the token."
            _ if FORMATTING_ELEMENTS.contains(&name) => self.run_adoption_agency(name),

            // "An end tag token whose tag name is one of: "applet", "marquee",
            //  "object""
            "applet" | "marquee" | "object" => {
                // "If the stack of open elements does not have an element in
                //  scope that is an HTML element with the same tag name as
                //  that of the token, then this is a parse error; ignore the
                //  token."
                if !self.has_element_in_scope(name) {
                    self.unexpected(token);
                    return Step::Done;
                }
                self.close_element_in_scope(name, None);
                // STEP 4: "Clear the list of active formatting elements up to
                //          the last marker."
                self.clear_active_formatting_elements_to_last_marker();
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as
            //  described in the next entry; i.e. act as if this was a "br"
            //  start tag token with no attributes, rather than the end tag
            //  token that it actually is."
            "br" => {
                self.unexpected(token);
                self.insert_void_element(&synthetic_start_tag("br"));
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name),
        }
        Step::Done
    }

    /// The second element on the stack, if it is a `body` element.
    fn second_element_if_body(&self) -> Option<NodeId> {
        self.stack_of_open_elements
            .get(1)
            .copied()
            .filter(|&id| self.is_html(id, "body"))
    }

    /// The shared tail of the block, `li`, `dd`/`dt` and `applet` end tags:
    /// 1. "Generate implied end tags" (except for `except`, if given).
    /// 2. "If the current node is not an HTML element with the same tag name
    ///    as that of the token, then this is a parse error."
    /// 3. "Pop elements from the stack of open elements until an HTML element
    ///    with the same tag name as the token has been popped from the stack."
    fn close_element_in_scope(&mut self, name: &str, except: Option<&str>) {
        self.generate_implied_end_tags_excluding(except);
        if !self.current_node_is(name) {
            self.tag_error(ParseErrorKind::MisnestedTag, name);
        }
        self.pop_until_tag(name);
    }

    /// "A start tag whose tag name is "li"" and "A start tag whose tag name is
    /// one of: "dd", "dt"". `closes` is the set of item elements this start
    /// tag implicitly closes.
    fn start_list_item(&mut self, token: &Token, closes: &[&str]) {
        // STEP 1: "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;

        // STEP 2-5: "Initialize node to be the current node (the bottommost
        //            node of the stack)." "Loop: If node is an li element,
        //            then run these substeps: Generate implied end tags,
        //            except for li elements. If the current node is not an li
        //            element, then this is a parse error. Pop elements from
        //            the stack of open elements until an li element has been
        //            popped from the stack. Jump to the step labeled done
        //            below." "If node is in the special category, but is not
        //            an address, div, or p element, then jump to the step
        //            labeled done below." "Otherwise, set node to the previous
        //            entry in the stack of open elements and return to the
        //            step labeled loop."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node = self.stack_of_open_elements[index];
            if let Some(item) = closes
                .iter()
                .copied()
                .find(|&item| self.is_html(node, item))
            {
                self.generate_implied_end_tags_excluding(Some(item));
                if !self.current_node_is(item) {
                    self.tag_error(ParseErrorKind::UnclosedElement, item);
                }
                self.pop_until_tag(item);
                break;
            }
            if self.is_special_element(node) && !self.is_html_one_of(node, &["address", "div", "p"])
            {
                break;
            }
        }

        // STEP 6: "Done: If the stack of open elements has a p element in
        //          button scope, then close a p element."
        self.close_p_if_in_button_scope();

        // STEP 7: "Finally, insert an HTML element for the token."
        let _ = self.insert_html_element(token);
    }

    /// "An end tag whose tag name is "form""
    fn end_form(&mut self, token: &Token) {
        // "If there is no template element on the stack of open elements, then
        //  run these substeps:"
        if !self.stack_contains("template") {
            // STEP 1: "Let node be the element that the form element pointer
            //          is set to, or null if it is not set to an element."
            // STEP 2: "Set the form element pointer to null."
            let node = self.form_element_pointer.take();
            // STEP 3: "If node is null or if the stack of open elements does
            //          not have node in scope, then this is a parse error;
            //          return and ignore the token."
            let Some(node) = node.filter(|&node| self.has_node_in_scope(node, ScopeKind::Default))
            else {
                self.unexpected(token);
                return;
            };
            // STEP 4: "Generate implied end tags."
            self.generate_implied_end_tags();
            // STEP 5: "If the current node is not node, then this is a parse
            //          error."
            if self.current_node() != Some(node) {
                self.tag_error(ParseErrorKind::MisnestedTag, "form");
            }
            // STEP 6: "Remove node from the stack of open elements."
            self.remove_from_stack(node);
            return;
        }

        // "If there is a template element on the stack of open elements, then
        //  run these substeps instead:"
        // STEP 1: "If the stack of open elements does not have a form element
        //          in scope, then this is a parse error; return and ignore the
        //          token."
        if !self.has_element_in_scope("form") {
            self.unexpected(token);
            return;
        }
        // STEP 2-4: Generate implied end tags, check the current node, pop
        //           until a form element has been popped.
        self.close_element_in_scope("form", None);
    }

    /// "Reconstruct the active formatting elements, if any." "Insert an HTML
    /// element for the token. Push onto the list of active formatting elements
    /// that element."
    fn insert_formatting_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let element = self.insert_html_element(token);
        self.push_active_formatting_element(element, token);
    }

    /// "A start tag whose tag name is one of: "area", "br", "embed", "img",
    /// "keygen", "wbr""
    /// "Reconstruct the active formatting elements, if any."
    /// "Insert an HTML element for the token. Immediately pop the current node
    /// off the stack of open elements."
    /// "Acknowledge the token's self-closing flag, if it is set."
    /// "Set the frameset-ok flag to "not ok"."
    fn insert_void_element(&mut self, token: &Token) {
        self.reconstruct_active_formatting_elements();
        let _ = self.insert_html_element(token);
        let _ = self.stack_of_open_elements.pop();
        self.acknowledge_self_closing_flag();
        self.frameset_ok = false;
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(in crate::parser) fn handle_text_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token"
            // "Insert the token's character."
            Token::Character { data } => {
                self.insert_character(*data);
                Step::Done
            }

            // "An end-of-file token"
            // "Parse error."
            // "If the current node is a script element, then set its already
            //  started to true."
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode and
            //  reprocess the token."
            Token::EndOfFile => {
                self.unexpected(token);
                let _ = self.stack_of_open_elements.pop();
                let original = self.leave_text_mode();
                self.reprocess_in(original)
            }

            // "An end tag whose tag name is "script"" and "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            // Scripts are not run, so both entries reduce to the same steps.
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self.leave_text_mode();
                Step::Done
            }

            // The tokenizer emits nothing else while in the RCDATA, RAWTEXT,
            // script data or PLAINTEXT states.
            Token::StartTag { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.unexpected(token);
                Step::Done
            }
        }
    }

    /// Take the original insertion mode saved when "text" was entered.
    const fn leave_text_mode(&mut self) -> InsertionMode {
        match self.original_insertion_mode.take() {
            Some(mode) => mode,
            None => InsertionMode::InBody,
        }
    }
}
