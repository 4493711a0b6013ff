//! `select` insertion modes.

use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::tokenizer::Token;

const TABLE_TAGS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(in crate::parser) fn handle_in_select_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => {
                self.unexpected(token);
                Step::Done
            }

            // "Any other character token"
            // "Insert the token's character."
            Token::Character { data } => {
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

            Token::StartTag { name, .. } => self.in_select_start_tag(token, name),
            Token::EndTag { name, .. } => self.in_select_end_tag(token, name),

            // "An end-of-file token"
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::EndOfFile => self.process_using_rules_for(InsertionMode::InBody, token),
        }
    }

    fn in_select_start_tag(&mut self, token: &Token, name: &str) -> Step {
        match name {
            // "A start tag whose tag name is "html""
            "html" => self.process_using_rules_for(InsertionMode::InBody, token),

            // "A start tag whose tag name is "option""
            // "If the current node is an option element, pop that node from
            //  the stack of open elements."
            // "Insert an HTML element for the token."
            "option" => {
                self.pop_if_current_is("option");
                let _ = self.insert_html_element(token);
                Step::Done
            }

            // "A start tag whose tag name is "optgroup""
            // "If the current node is an option element, pop that node from
            //  the stack of open elements."
            // "If the current node is an optgroup element, pop that node from
            //  the stack of open elements."
            // "Insert an HTML element for the token."
            "optgroup" => {
                self.pop_if_current_is("option");
                self.pop_if_current_is("optgroup");
                let _ = self.insert_html_element(token);
                Step::Done
            }

            // "A start tag whose tag name is "hr""
            // Same as "optgroup", then "Immediately pop the current node off
            // the stack of open elements." "Acknowledge the token's
            // self-closing flag, if it is set."
            "hr" => {
                self.pop_if_current_is("option");
                self.pop_if_current_is("optgroup");
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
                Step::Done
            }

            // "A start tag whose tag name is "select""
            // "Parse error."
            // "If the stack of open elements does not have a select element in
            //  select scope, ignore the token. (fragment case)"
            // "Otherwise: Pop elements from the stack of open elements until a
            //  select element has been popped from the stack. Reset the
            //  insertion mode appropriately."
            "select" => {
                self.unexpected(token);
                if self.has_element_in_select_scope("select") {
                    self.close_select();
                }
                Step::Done
            }

            // "A start tag whose tag name is one of: "input", "keygen",
            //  "textarea""
            // "Parse error."
            // "If the stack of open elements does not have a select element in
            //  select scope, ignore the token. (fragment case)"
            // "Otherwise: ... Reprocess the token."
            "input" | "keygen" | "textarea" => {
                self.unexpected(token);
                if !self.has_element_in_select_scope("select") {
                    return Step::Done;
                }
                self.close_select();
                Step::Reprocess
            }

            // "A start tag whose tag name is one of: "script", "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            "script" | "template" => self.process_using_rules_for(InsertionMode::InHead, token),

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => {
                self.unexpected(token);
                Step::Done
            }
        }
    }

    fn in_select_end_tag(&mut self, token: &Token, name: &str) -> Step {
        match name {
            // "An end tag whose tag name is "optgroup""
            "optgroup" => {
                // STEP 1: "If the current node is an option element, and the
                //          node immediately before it in the stack of open
                //          elements is an optgroup element, then pop the
                //          current node from the stack of open elements."
                let len = self.stack_of_open_elements.len();
                if self.current_node_is("option")
                    && len >= 2
                    && self.is_html(self.stack_of_open_elements[len - 2], "optgroup")
                {
                    let _ = self.stack_of_open_elements.pop();
                }
                // STEP 2: "If the current node is an optgroup element, then
                //          pop that node from the stack of open elements.
                //          Otherwise, this is a parse error; ignore the token."
                if self.current_node_is("optgroup") {
                    let _ = self.stack_of_open_elements.pop();
                } else {
                    self.unexpected(token);
                }
            }

            // "An end tag whose tag name is "option""
            // "If the current node is an option element, then pop that node
            //  from the stack of open elements. Otherwise, this is a parse
            //  error; ignore the token."
            "option" => {
                if self.current_node_is("option") {
                    let _ = self.stack_of_open_elements.pop();
                } else {
                    self.unexpected(token);
                }
            }

            // "An end tag whose tag name is "select""
            // "If the stack of open elements does not have a select element in
            //  select scope, this is a parse error; ignore the token.
            //  (fragment case)"
            // "Otherwise: Pop elements from the stack of open elements until a
            //  select element has been popped from the stack. Reset the
            //  insertion mode appropriately."
            "select" => {
                if self.has_element_in_select_scope("select") {
                    self.close_select();
                } else {
                    self.unexpected(token);
                }
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            "template" => return self.process_using_rules_for(InsertionMode::InHead, token),

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => self.unexpected(token),
        }
        Step::Done
    }

    fn pop_if_current_is(&mut self, name: &str) {
        if self.current_node_is(name) {
            let _ = self.stack_of_open_elements.pop();
        }
    }

    fn close_select(&mut self) {
        self.pop_until_tag("select");
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(in crate::parser) fn handle_in_select_in_table_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A start tag whose tag name is one of: "caption", "table",
            //  "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error."
            // "Pop elements from the stack of open elements until a select
            //  element has been popped from the stack."
            // "Reset the insertion mode appropriately."
            // "Reprocess the token."
            Token::StartTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
                self.close_select();
                Step::Reprocess
            }

            // "An end tag whose tag name is one of: "caption", "table",
            //  "tbody", "tfoot", "thead", "tr", "td", "th""
            // "Parse error."
            // "If the stack of open elements does not have an element in table
            //  scope that is an HTML element with the same tag name as that of
            //  the token, then ignore the token."
            // "Otherwise: ... Reprocess the token."
            Token::EndTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(token);
                if !self.has_element_in_table_scope(name) {
                    return Step::Done;
                }
                self.close_select();
                Step::Reprocess
            }

            // "Anything else"
            // "Process the token using the rules for the "in select" insertion
            //  mode."
            _ => self.process_using_rules_for(InsertionMode::InSelect, token),
        }
    }
}
