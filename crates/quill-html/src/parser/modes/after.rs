//! Modes after the body: "after body", "in frameset", "after frameset",
//! "after after body" and "after after frameset".

use quill_dom::NodeId;

use crate::error::ParseErrorKind;
use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::tokenizer::Token;

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(in crate::parser) fn handle_after_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Process the token using the rules for the "in body"
            // insertion mode."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }

            // "A comment token"
            // "Insert a comment as the last child of the first element in the
            //  stack of open elements (the html element)."
            Token::Comment { data } => {
                let html = self
                    .stack_of_open_elements
                    .first()
                    .copied()
                    .unwrap_or(NodeId::ROOT);
                self.insert_comment(data, Some(html));
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

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after body"."
            Token::EndTag { name, .. } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
                Step::Done
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => {
                self.stopped = true;
                Step::Done
            }

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            //  reprocess the token."
            _ => {
                self.unexpected(token);
                self.reprocess_in(InsertionMode::InBody)
            }
        }
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(in crate::parser) fn handle_in_frameset_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::StartTag { name, .. } if name == "html" => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "A start tag whose tag name is "frameset""
            // "Insert an HTML element for the token."
            Token::StartTag { name, .. } if name == "frameset" => {
                let _ = self.insert_html_element(token);
            }

            // "An end tag whose tag name is "frameset""
            Token::EndTag { name, .. } if name == "frameset" => {
                // "If the current node is the root html element, then this is
                //  a parse error; ignore the token. (fragment case)"
                if self.current_node_is_root() {
                    self.unexpected(token);
                    return Step::Done;
                }
                // "Otherwise, pop the current node from the stack of open
                //  elements."
                let _ = self.stack_of_open_elements.pop();
                // "If the parser was not created as part of the HTML fragment
                //  parsing algorithm (fragment case), and the current node is
                //  no longer a frameset element, then switch the insertion mode
                //  to "after frameset"."
                if !self.current_node_is("frameset") {
                    self.insertion_mode = InsertionMode::AfterFrameset;
                }
            }

            // "A start tag whose tag name is "frame""
            // "Insert an HTML element for the token. Immediately pop the
            //  current node off the stack of open elements."
            // "Acknowledge the token's self-closing flag, if it is set."
            Token::StartTag { name, .. } if name == "frame" => {
                let _ = self.insert_html_element(token);
                let _ = self.stack_of_open_elements.pop();
                self.acknowledge_self_closing_flag();
            }

            // "A start tag whose tag name is "noframes""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            Token::StartTag { name, .. } if name == "noframes" => {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "An end-of-file token"
            // "If the current node is not the root html element, then this is
            //  a parse error."
            // "Stop parsing."
            Token::EndOfFile => {
                if !self.current_node_is_root() {
                    self.tag_error(ParseErrorKind::UnclosedElement, "frameset");
                }
                self.stopped = true;
            }

            // "A DOCTYPE token" and "Anything else"
            // "Parse error. Ignore the token."
            _ => self.unexpected(token),
        }
        Step::Done
    }

    fn current_node_is_root(&self) -> bool {
        self.stack_of_open_elements.len() <= 1
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(in crate::parser) fn handle_after_frameset_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Insert the character."
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.insert_character(*data);
            }

            // "A comment token"
            // "Insert a comment."
            Token::Comment { data } => self.insert_comment(data, None),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::StartTag { name, .. } if name == "html" => {
                return self.process_using_rules_for(InsertionMode::InBody, token);
            }

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after frameset"."
            Token::EndTag { name, .. } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterFrameset;
            }

            // "A start tag whose tag name is "noframes""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            Token::StartTag { name, .. } if name == "noframes" => {
                return self.process_using_rules_for(InsertionMode::InHead, token);
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => self.stopped = true,

            // "A DOCTYPE token" and "Anything else"
            // "Parse error. Ignore the token."
            _ => self.unexpected(token),
        }
        Step::Done
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(in crate::parser) fn handle_after_after_body_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                self.insert_comment_to_document(data);
                Step::Done
            }

            // "A DOCTYPE token"
            // Whitespace
            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::Doctype { .. } => self.process_using_rules_for(InsertionMode::InBody, token),
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => {
                self.stopped = true;
                Step::Done
            }

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and
            //  reprocess the token."
            _ => {
                self.unexpected(token);
                self.reprocess_in(InsertionMode::InBody)
            }
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(in crate::parser) fn handle_after_after_frameset_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                self.insert_comment_to_document(data);
                Step::Done
            }

            // "A DOCTYPE token", whitespace, "A start tag whose tag name is
            // "html""
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::Doctype { .. } => self.process_using_rules_for(InsertionMode::InBody, token),
            Token::Character { data } if Self::is_whitespace(*data) => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }
            Token::StartTag { name, .. } if name == "html" => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => {
                self.stopped = true;
                Step::Done
            }

            // "A start tag whose tag name is "noframes""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
            Token::StartTag { name, .. } if name == "noframes" => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }

            // "Anything else"
            // "Parse error. Ignore the token."
            _ => {
                self.unexpected(token);
                Step::Done
            }
        }
    }
}
