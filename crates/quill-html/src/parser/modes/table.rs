//! Table insertion modes: "in table", "in table text", "in caption", "in
//! column group", "in table body", "in row" and "in cell".

use crate::error::ParseErrorKind;
use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::stack::ScopeKind;
use crate::tokenizer::Token;

use super::initial::synthetic_start_tag;

const TABLE_SECTIONS: &[&str] = &["tbody", "tfoot", "thead"];

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(in crate::parser) fn handle_in_table_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token, if the current node is table, tbody,
            //  template, tfoot, thead, or tr element"
            // "Let the pending table character tokens be an empty list of
            //  tokens."
            // "Let the original insertion mode be the current insertion mode."
            // "Switch the insertion mode to "in table text" and reprocess the
            //  token."
            Token::Character { .. }
                if self.current_node_is_one_of(&[
                    "table", "tbody", "template", "tfoot", "thead", "tr",
                ]) =>
            {
                self.pending_table_character_tokens.clear();
                self.original_insertion_mode = Some(self.insertion_mode);
                self.reprocess_in(InsertionMode::InTableText)
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

            Token::StartTag { name, .. } => self.in_table_start_tag(token, name),
            Token::EndTag { name, .. } => self.in_table_end_tag(token, name),

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),

            // "Anything else"
            Token::Character { .. } => self.in_table_anything_else(token),
        }
    }

    fn in_table_start_tag(&mut self, token: &Token, name: &str) -> Step {
        match name {
            // "A start tag whose tag name is "caption""
            // "Clear the stack back to a table context."
            // "Insert a marker at the end of the list of active formatting
            //  elements."
            // "Insert an HTML element for the token, then switch the insertion
            //  mode to "in caption"."
            "caption" => {
                self.clear_stack_back_to_table_context();
                self.insert_marker();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InCaption;
                Step::Done
            }

            // "A start tag whose tag name is "colgroup""
            // "Clear the stack back to a table context."
            // "Insert an HTML element for the token, then switch the insertion
            //  mode to "in column group"."
            "colgroup" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InColumnGroup;
                Step::Done
            }

            // "A start tag whose tag name is "col""
            // "Clear the stack back to a table context."
            // "Insert an HTML element for a "colgroup" start tag token with no
            //  attributes, then switch the insertion mode to "in column
            //  group"."
            // "Reprocess the current token."
            "col" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(&synthetic_start_tag("colgroup"));
                self.reprocess_in(InsertionMode::InColumnGroup)
            }

            // "A start tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "Clear the stack back to a table context."
            // "Insert an HTML element for the token, then switch the insertion
            //  mode to "in table body"."
            "tbody" | "tfoot" | "thead" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InTableBody;
                Step::Done
            }

            // "A start tag whose tag name is one of: "td", "th", "tr""
            // "Clear the stack back to a table context."
            // "Insert an HTML element for a "tbody" start tag token with no
            //  attributes, then switch the insertion mode to "in table body"."
            // "Reprocess the current token."
            "td" | "th" | "tr" => {
                self.clear_stack_back_to_table_context();
                let _ = self.insert_html_element(&synthetic_start_tag("tbody"));
                self.reprocess_in(InsertionMode::InTableBody)
            }

            // "A start tag whose tag name is "table""
            // "Parse error."
            // "If the stack of open elements does not have a table element in
            //  table scope, ignore the token."
            // "Otherwise: Pop elements from this stack until a table element
            //  has been popped from the stack. Reset the insertion mode
            //  appropriately. Reprocess the token."
            "table" => {
                self.unexpected(token);
                if !self.has_element_in_table_scope("table") {
                    return Step::Done;
                }
                self.pop_until_tag("table");
                self.reset_insertion_mode_appropriately();
                Step::Reprocess
            }

            // "A start tag whose tag name is one of: "style", "script",
            //  "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            "style" | "script" | "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }

            // "A start tag whose tag name is "input""
            // "If the token does not have an attribute with the name "type",
            //  or if it does, but that attribute's value is not an ASCII
            //  case-insensitive match for the string "hidden", then: act as
            //  described in the "anything else" entry below."
            // "Otherwise: Parse error. Insert an HTML element for the token.
            //  Pop that input element off the stack of open elements.
            //  Acknowledge the token's self-closing flag, if it is set."
            "input"
                if token
                    .attribute("type")
                    .is_some_and(|value| value.eq_ignore_ascii_case("hidden")) =>
            {
                self.unexpected(token);
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
                Step::Done
            }

            // "A start tag whose tag name is "form""
            // "Parse error."
            // "If there is a template element on the stack of open elements,
            //  or if the form element pointer is not null, ignore the token."
            // "Otherwise: Insert an HTML element for the token, and set the
            //  form element pointer to point to the element created. Pop that
            //  form element off the stack of open elements."
            "form" => {
                self.unexpected(token);
                if self.stack_contains("template") || self.form_element_pointer.is_some() {
                    return Step::Done;
                }
                let form = self.insert_html_element(token);
                self.form_element_pointer = Some(form);
                let _ = self.stack_of_open_elements.pop();
                Step::Done
            }

            // "Anything else"
            _ => self.in_table_anything_else(token),
        }
    }

    fn in_table_end_tag(&mut self, token: &Token, name: &str) -> Step {
        match name {
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a table element in
            //  table scope, this is a parse error; ignore the token."
            // "Otherwise: Pop elements from this stack until a table element
            //  has been popped from the stack. Reset the insertion mode
            //  appropriately."
            "table" => {
                if self.has_element_in_table_scope("table") {
                    self.pop_until_tag("table");
                    self.reset_insertion_mode_appropriately();
                } else {
                    self.unexpected(token);
                }
                Step::Done
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th"
            | "thead" | "tr" => {
                self.unexpected(token);
                Step::Done
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            "template" => self.process_using_rules_for(InsertionMode::InHead, token),

            // "Anything else"
            _ => self.in_table_anything_else(token),
        }
    }

    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn in_table_anything_else(&mut self, token: &Token) -> Step {
        self.unexpected(token);
        self.foster_parenting = true;
        let step = self.process_using_rules_for(InsertionMode::InBody, token);
        self.foster_parenting = false;
        step
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(in crate::parser) fn handle_in_table_text_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => {
                self.unexpected(token);
                Step::Done
            }

            // "Any other character token"
            // "Append the character token to the pending table character
            //  tokens list."
            Token::Character { data } => {
                self.pending_table_character_tokens.push(*data);
                Step::Done
            }

            // "Anything else"
            _ => {
                let pending = std::mem::take(&mut self.pending_table_character_tokens);

                // "If any of the tokens in the pending table character tokens
                //  list are character tokens that are not ASCII whitespace,
                //  then this is a parse error: reprocess the character tokens
                //  in the pending table character tokens list using the rules
                //  given in the "anything else" entry in the "in table"
                //  insertion mode."
                if pending.chars().any(|c| !Self::is_whitespace(c)) {
                    self.parse_error(ParseErrorKind::UnexpectedCharacter);
                    self.foster_parenting = true;
                    for data in pending.chars() {
                        let _ = self
                            .process_using_rules_for(InsertionMode::InBody, &Token::Character { data });
                    }
                    self.foster_parenting = false;
                } else {
                    // "Otherwise, insert the characters given by the pending
                    //  table character tokens list."
                    self.insert_text(&pending);
                }

                // "Switch the insertion mode to the original insertion mode
                //  and reprocess the token."
                let original = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InTable);
                self.reprocess_in(original)
            }
        }
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(in crate::parser) fn handle_in_caption_mode(&mut self, token: &Token) -> Step {
        match token {
            // "An end tag whose tag name is "caption""
            Token::EndTag { name, .. } if name == "caption" => {
                let _ = self.close_caption(token);
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a caption element
            //  in table scope, this is a parse error; ignore the token.
            //  (fragment case)"
            // "Otherwise: Generate implied end tags. ... Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if self.close_caption(token) {
                    Step::Reprocess
                } else {
                    Step::Done
                }
            }
            Token::EndTag { name, .. } if name == "table" => {
                if self.close_caption(token) {
                    Step::Reprocess
                } else {
                    Step::Done
                }
            }

            // "An end tag whose tag name is one of: "body", "col", "colgroup",
            //  "html", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            _ => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    /// The `</caption>` steps. Returns false when the token was ignored.
    fn close_caption(&mut self, token: &Token) -> bool {
        // "If the stack of open elements does not have a caption element in
        //  table scope, this is a parse error; ignore the token. (fragment
        //  case)"
        if !self.has_element_in_table_scope("caption") {
            self.unexpected(token);
            return false;
        }
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags();
        // STEP 2: "Now, if the current node is not a caption element, then
        //          this is a parse error."
        if !self.current_node_is("caption") {
            self.tag_error(ParseErrorKind::UnclosedElement, "caption");
        }
        // STEP 3: "Pop elements from this stack until a caption element has
        //          been popped from the stack."
        self.pop_until_tag("caption");
        // STEP 4: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in table"."
        self.insertion_mode = InsertionMode::InTable;
        true
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    pub(in crate::parser) fn handle_in_column_group_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
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

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }

            // "A start tag whose tag name is "col""
            // "Insert an HTML element for the token. Immediately pop the
            //  current node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            Token::StartTag { name, .. } if name == "col" => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
                Step::Done
            }

            // "An end tag whose tag name is "colgroup""
            // "If the current node is not a colgroup element, then this is a
            //  parse error; ignore the token."
            // "Otherwise, pop the current node from the stack of open
            //  elements. Switch the insertion mode to "in table"."
            Token::EndTag { name, .. } if name == "colgroup" => {
                if self.current_node_is("colgroup") {
                    let _ = self.stack_of_open_elements.pop();
                    self.insertion_mode = InsertionMode::InTable;
                } else {
                    self.unexpected(token);
                }
                Step::Done
            }

            // "An end tag whose tag name is "col""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. } if name == "col" => {
                self.unexpected(token);
                Step::Done
            }

            // "A start tag whose tag name is "template""
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            Token::StartTag { name, .. } | Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),

            // "Anything else"
            // "If the current node is not a colgroup element, then this is a
            //  parse error; ignore the token."
            // "Otherwise, pop the current node from the stack of open
            //  elements."
            // "Switch the insertion mode to "in table"."
            // "Reprocess the token."
            _ => {
                if !self.current_node_is("colgroup") {
                    self.unexpected(token);
                    return Step::Done;
                }
                let _ = self.stack_of_open_elements.pop();
                self.reprocess_in(InsertionMode::InTable)
            }
        }
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    pub(in crate::parser) fn handle_in_table_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A start tag whose tag name is "tr""
            // "Clear the stack back to a table body context."
            // "Insert an HTML element for the token, then switch the insertion
            //  mode to "in row"."
            Token::StartTag { name, .. } if name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InRow;
                Step::Done
            }

            // "A start tag whose tag name is one of: "th", "td""
            // "Parse error."
            // "Clear the stack back to a table body context."
            // "Insert an HTML element for a "tr" start tag token with no
            //  attributes, then switch the insertion mode to "in row"."
            // "Reprocess the current token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "th" | "td") => {
                self.unexpected(token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(&synthetic_start_tag("tr"));
                self.reprocess_in(InsertionMode::InRow)
            }

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as the
            //  token, this is a parse error; ignore the token."
            // "Otherwise: Clear the stack back to a table body context. Pop
            //  the current node from the stack of open elements. Switch the
            //  insertion mode to "in table"."
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return Step::Done;
                }
                self.clear_stack_back_to_table_body_context();
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::InTable;
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead""
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a tbody, thead, or
            //  tfoot element in table scope, this is a parse error; ignore the
            //  token."
            // "Otherwise: Clear the stack back to a table body context. Pop
            //  the current node from the stack of open elements. Switch the
            //  insertion mode to "in table". Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.leave_table_body(token)
            }
            Token::EndTag { name, .. } if name == "table" => self.leave_table_body(token),

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th", "tr""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion
            //  mode."
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    fn leave_table_body(&mut self, token: &Token) -> Step {
        if !self.has_any_in_scope(TABLE_SECTIONS, ScopeKind::Table) {
            self.unexpected(token);
            return Step::Done;
        }
        self.clear_stack_back_to_table_body_context();
        let _ = self.stack_of_open_elements.pop();
        self.reprocess_in(InsertionMode::InTable)
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    pub(in crate::parser) fn handle_in_row_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A start tag whose tag name is one of: "th", "td""
            // "Clear the stack back to a table row context."
            // "Insert an HTML element for the token, then switch the insertion
            //  mode to "in cell"."
            // "Insert a marker at the end of the list of active formatting
            //  elements."
            Token::StartTag { name, .. } if matches!(name.as_str(), "th" | "td") => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InCell;
                self.insert_marker();
                Step::Done
            }

            // "An end tag whose tag name is "tr""
            // "If the stack of open elements does not have a tr element in
            //  table scope, this is a parse error; ignore the token."
            // "Otherwise: Clear the stack back to a table row context. Pop the
            //  current node (which will be a tr element) from the stack of
            //  open elements. Switch the insertion mode to "in table body"."
            Token::EndTag { name, .. } if name == "tr" => {
                let _ = self.close_row(token);
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "tfoot", "thead", "tr""
            // "An end tag whose tag name is "table""
            // "If the stack of open elements does not have a tr element in
            //  table scope, this is a parse error; ignore the token."
            // "Otherwise: ... Reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                self.close_row_and_reprocess(token)
            }
            Token::EndTag { name, .. } if name == "table" => self.close_row_and_reprocess(token),

            // "An end tag whose tag name is one of: "tbody", "tfoot", "thead""
            // "If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as the
            //  token, this is a parse error; ignore the token."
            // "If the stack of open elements does not have a tr element in
            //  table scope, ignore the token."
            // "Otherwise: ... Reprocess the token."
            Token::EndTag { name, .. } if TABLE_SECTIONS.contains(&name.as_str()) => {
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return Step::Done;
                }
                if !self.has_element_in_table_scope("tr") {
                    return Step::Done;
                }
                self.close_row_and_reprocess(token)
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html", "td", "th""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            // "Process the token using the rules for the "in table" insertion
            //  mode."
            _ => self.process_using_rules_for(InsertionMode::InTable, token),
        }
    }

    /// The `</tr>` steps. Returns false when the token was ignored.
    fn close_row(&mut self, token: &Token) -> bool {
        if !self.has_element_in_table_scope("tr") {
            self.unexpected(token);
            return false;
        }
        self.clear_stack_back_to_table_row_context();
        let _ = self.stack_of_open_elements.pop();
        self.insertion_mode = InsertionMode::InTableBody;
        true
    }

    fn close_row_and_reprocess(&mut self, token: &Token) -> Step {
        if self.close_row(token) {
            Step::Reprocess
        } else {
            Step::Done
        }
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    pub(in crate::parser) fn handle_in_cell_mode(&mut self, token: &Token) -> Step {
        match token {
            // "An end tag whose tag name is one of: "td", "th""
            Token::EndTag { name, .. } if matches!(name.as_str(), "td" | "th") => {
                // "If the stack of open elements does not have an element in
                //  table scope that is an HTML element with the same tag name
                //  as that of the token, then this is a parse error; ignore
                //  the token."
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return Step::Done;
                }
                // STEP 1: "Generate implied end tags."
                self.generate_implied_end_tags();
                // STEP 2: "Now, if the current node is not an HTML element with
                //          the same tag name as the token, then this is a parse
                //          error."
                if !self.current_node_is(name) {
                    self.tag_error(ParseErrorKind::UnclosedElement, name);
                }
                // STEP 3: "Pop elements from the stack of open elements until
                //          an HTML element with the same tag name as the token
                //          has been popped from the stack."
                self.pop_until_tag(name);
                // STEP 4: "Clear the list of active formatting elements up to
                //          the last marker."
                self.clear_active_formatting_elements_to_last_marker();
                // STEP 5: "Switch the insertion mode to "in row"."
                self.insertion_mode = InsertionMode::InRow;
                Step::Done
            }

            // "A start tag whose tag name is one of: "caption", "col",
            //  "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr""
            // "Assert: The stack of open elements has a td or th element in
            //  table scope."
            // "Close the cell (see below) and reprocess the token."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                if !self.has_any_in_scope(&["td", "th"], ScopeKind::Table) {
                    self.unexpected(token);
                    return Step::Done;
                }
                self.close_the_cell();
                Step::Reprocess
            }

            // "An end tag whose tag name is one of: "body", "caption", "col",
            //  "colgroup", "html""
            // "Parse error. Ignore the token."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") =>
            {
                self.unexpected(token);
                Step::Done
            }

            // "An end tag whose tag name is one of: "table", "tbody", "tfoot",
            //  "thead", "tr""
            // "If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as that of
            //  the token, then this is a parse error; ignore the token."
            // "Otherwise, close the cell (see below) and reprocess the token."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") =>
            {
                if !self.has_element_in_table_scope(name) {
                    self.unexpected(token);
                    return Step::Done;
                }
                self.close_the_cell();
                Step::Reprocess
            }

            // "Anything else"
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            _ => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "Where the steps above say to close the cell, they mean to run the
    /// following algorithm:"
    pub(in crate::parser) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags();
        // STEP 2: "If the current node is not now a td element or a th
        //          element, then this is a parse error."
        if !self.current_node_is_one_of(&["td", "th"]) {
            self.parse_error(ParseErrorKind::UnclosedElement);
        }
        // STEP 3: "Pop elements from the stack of open elements until a td
        //          element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // STEP 4: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.insertion_mode = InsertionMode::InRow;
    }
}
