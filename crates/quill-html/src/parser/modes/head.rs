//! The `head` section: "in head", "in head noscript" and "after head".

use crate::error::ParseErrorKind;
use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::tokenizer::{Token, TokenizerState};

use super::initial::synthetic_start_tag;

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(in crate::parser) fn handle_in_head_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            //  U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            //  RETURN (CR), or U+0020 SPACE"
            // "Insert the character."
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

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link""
            // "A start tag whose tag name is "meta""
            // "Insert an HTML element for the token. Immediately pop the
            //  current node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base" | "basefont" | "bgsound" | "link" | "meta"
                ) =>
            {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
                Step::Done
            }

            // "A start tag whose tag name is "title""
            // "Follow the generic RCDATA element parsing algorithm."
            Token::StartTag { name, .. } if name == "title" => {
                self.parse_text_element(token, TokenizerState::RCDATA);
                Step::Done
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            //  is enabled"
            // "A start tag whose tag name is one of: "noframes", "style""
            // "Follow the generic raw text element parsing algorithm."
            Token::StartTag { name, .. }
                if (name == "noscript" && self.scripting)
                    || matches!(name.as_str(), "noframes" | "style") =>
            {
                self.parse_text_element(token, TokenizerState::RAWTEXT);
                Step::Done
            }

            // "A start tag whose tag name is "noscript", if the scripting flag
            //  is disabled"
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in head noscript"."
            Token::StartTag { name, .. } if name == "noscript" => {
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InHeadNoscript;
                Step::Done
            }

            // "A start tag whose tag name is "script""
            Token::StartTag { name, .. } if name == "script" => {
                self.insert_script_element(token);
                Step::Done
            }

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the
            //  stack of open elements."
            // "Switch the insertion mode to "after head"."
            Token::EndTag { name, .. } if name == "head" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
                Step::Done
            }

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if matches!(name.as_str(), "body" | "html" | "br") => {
                self.in_head_anything_else()
            }

            // "A start tag whose tag name is "template""
            Token::StartTag { name, .. } if name == "template" => {
                self.open_template(token);
                Step::Done
            }

            // "An end tag whose tag name is "template""
            Token::EndTag { name, .. } if name == "template" => {
                self.close_template();
                Step::Done
            }

            // "A start tag whose tag name is "head""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" => {
                self.unexpected(token);
                Step::Done
            }
            Token::EndTag { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            _ => self.in_head_anything_else(),
        }
    }

    /// "Pop the current node (which will be the head element) off the stack
    /// of open elements."
    /// "Switch the insertion mode to "after head"."
    /// "Reprocess the token."
    fn in_head_anything_else(&mut self) -> Step {
        let _ = self.stack_of_open_elements.pop();
        self.reprocess_in(InsertionMode::AfterHead)
    }

    /// "A start tag whose tag name is "script"" in the "in head" insertion
    /// mode. Scripts are never executed, so the parser-document and
    /// already-started flags have no counterpart.
    fn insert_script_element(&mut self, token: &Token) {
        // STEP 1: "Let the adjusted insertion location be the appropriate
        //          place for inserting a node."
        // STEP 2-6: "Let the element be the result of creating an element for
        //            the token in the given namespace, with the intended
        //            parent being the element in which the adjusted insertion
        //            location finds itself."
        // STEP 7-8: "Insert the newly created element at the adjusted
        //            insertion location." "Push the element onto the stack of
        //            open elements so that it is the new current node."
        let _ = self.insert_html_element(token);

        // STEP 9: "Switch the tokenizer to the script data state."
        self.switch_tokenizer_for(token, TokenizerState::ScriptData);

        // STEP 10: "Set the original insertion mode to the current insertion
        //           mode."
        self.original_insertion_mode = Some(self.insertion_mode);

        // STEP 11: "Switch the insertion mode to "text"."
        self.insertion_mode = InsertionMode::Text;
    }

    /// "A start tag whose tag name is "template"" in the "in head" insertion
    /// mode.
    pub(in crate::parser) fn open_template(&mut self, token: &Token) {
        // "Insert an HTML element for the token."
        let _ = self.insert_html_element(token);
        // "Insert a marker at the end of the list of active formatting
        //  elements."
        self.insert_marker();
        // "Set the frameset-ok flag to "not ok"."
        self.frameset_ok = false;
        // "Switch the insertion mode to "in template"."
        self.insertion_mode = InsertionMode::InTemplate;
        // "Push "in template" onto the stack of template insertion modes so
        //  that it is the new current template insertion mode."
        self.template_insertion_modes.push(InsertionMode::InTemplate);
    }

    /// "An end tag whose tag name is "template"" in the "in head" insertion
    /// mode.
    fn close_template(&mut self) {
        // "If there is no template element on the stack of open elements, then
        //  this is a parse error; ignore the token."
        if !self.stack_contains("template") {
            self.tag_error(ParseErrorKind::UnexpectedEndTag, "template");
            return;
        }

        // STEP 1: "Generate all implied end tags thoroughly."
        self.generate_all_implied_end_tags_thoroughly();

        // STEP 2: "If the current node is not a template element, then this is
        //          a parse error."
        if !self.current_node_is("template") {
            self.tag_error(ParseErrorKind::UnclosedElement, "template");
        }

        // STEP 3: "Pop elements from the stack of open elements until a
        //          template element has been popped from the stack."
        self.pop_until_tag("template");

        // STEP 4: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();

        // STEP 5: "Pop the current template insertion mode off the stack of
        //          template insertion modes."
        let _ = self.template_insertion_modes.pop();

        // STEP 6: "Reset the insertion mode appropriately."
        self.reset_insertion_mode_appropriately();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(in crate::parser) fn handle_in_head_noscript_mode(&mut self, token: &Token) -> Step {
        match token {
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

            // "An end tag whose tag name is "noscript""
            // "Pop the current node (which will be a noscript element) from
            //  the stack of open elements; the new current node will be a head
            //  element."
            // "Switch the insertion mode to "in head"."
            Token::EndTag { name, .. } if name == "noscript" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::InHead;
                Step::Done
            }

            // Whitespace, comments, and "A start tag whose tag name is one of:
            // "basefont", "bgsound", "link", "meta", "noframes", "style""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }
            Token::Comment { .. } => self.process_using_rules_for(InsertionMode::InHead, token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }

            // "An end tag whose tag name is "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if name == "br" => self.in_head_noscript_anything_else(token),

            // "A start tag whose tag name is one of: "head", "noscript""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if matches!(name.as_str(), "head" | "noscript") => {
                self.unexpected(token);
                Step::Done
            }
            Token::EndTag { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            _ => self.in_head_noscript_anything_else(token),
        }
    }

    /// "Parse error."
    /// "Pop the current node (which will be a noscript element) from the stack
    /// of open elements; the new current node will be a head element."
    /// "Switch the insertion mode to "in head"."
    /// "Reprocess the token."
    fn in_head_noscript_anything_else(&mut self, token: &Token) -> Step {
        self.unexpected(token);
        let _ = self.stack_of_open_elements.pop();
        self.reprocess_in(InsertionMode::InHead)
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(in crate::parser) fn handle_after_head_mode(&mut self, token: &Token) -> Step {
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

            // "A start tag whose tag name is "body""
            // "Insert an HTML element for the token."
            // "Set the frameset-ok flag to "not ok"."
            // "Switch the insertion mode to "in body"."
            Token::StartTag { name, .. } if name == "body" => {
                let _ = self.insert_html_element(token);
                self.frameset_ok = false;
                self.insertion_mode = InsertionMode::InBody;
                Step::Done
            }

            // "A start tag whose tag name is "frameset""
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in frameset"."
            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
                self.insertion_mode = InsertionMode::InFrameset;
                Step::Done
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title""
            // "Parse error."
            // "Push the node pointed to by the head element pointer onto the
            //  stack of open elements."
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            // "Remove the node pointed to by the head element pointer from the
            //  stack of open elements. (It might not be the current node at
            //  this point.)"
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base"
                        | "basefont"
                        | "bgsound"
                        | "link"
                        | "meta"
                        | "noframes"
                        | "script"
                        | "style"
                        | "template"
                        | "title"
                ) =>
            {
                self.unexpected(token);
                let Some(head) = self.head_element_pointer else {
                    return self.process_using_rules_for(InsertionMode::InHead, token);
                };
                self.stack_of_open_elements.push(head);
                let step = self.process_using_rules_for(InsertionMode::InHead, token);
                self.remove_from_stack(head);
                step
            }

            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }

            // "An end tag whose tag name is one of: "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. } if matches!(name.as_str(), "body" | "html" | "br") => {
                self.after_head_anything_else()
            }

            // "A start tag whose tag name is "head""
            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" => {
                self.unexpected(token);
                Step::Done
            }
            Token::EndTag { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            _ => self.after_head_anything_else(),
        }
    }

    /// "Insert an HTML element for a "body" start tag token with no
    /// attributes."
    /// "Switch the insertion mode to "in body"."
    /// "Reprocess the current token."
    fn after_head_anything_else(&mut self) -> Step {
        let _ = self.insert_html_element(&synthetic_start_tag("body"));
        self.reprocess_in(InsertionMode::InBody)
    }
}
