//! The document prologue: "initial", "before html" and "before head".

use quill_dom::{Namespace, NodeId, QuirksMode};

use crate::error::ParseErrorKind;
use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::parser::quirks::{is_conforming_doctype, quirks_mode_for_doctype};
use crate::tokenizer::Token;

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(in crate::parser) fn handle_initial_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            //  U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            //  RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => Step::Done,

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                self.insert_comment_to_document(data);
                Step::Done
            }

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                let name = name.as_deref();
                let public = public_identifier.as_deref();
                let system = system_identifier.as_deref();

                // "If the DOCTYPE token's name is not "html", or the token's
                //  public identifier is not missing, or the token's system
                //  identifier is neither missing nor "about:legacy-compat",
                //  then there is a parse error."
                if !is_conforming_doctype(name, public, system) {
                    self.parse_error(ParseErrorKind::NonConformingDoctype);
                }

                // "Append a DocumentType node to the Document node, with its
                //  name set to the name given in the DOCTYPE token, or the
                //  empty string if the name was missing; its public ID set to
                //  the public identifier given in the DOCTYPE token, or the
                //  empty string if the public identifier was missing; and its
                //  system ID set to the system identifier given in the DOCTYPE
                //  token, or the empty string if the system identifier was
                //  missing."
                let doctype = self.tree.create_document_type(
                    NodeId::ROOT,
                    name.unwrap_or_default(),
                    public.unwrap_or_default(),
                    system.unwrap_or_default(),
                );
                self.append_to(NodeId::ROOT, doctype);

                let mode = quirks_mode_for_doctype(name, public, system, *force_quirks);
                self.tree.set_quirks_mode(NodeId::ROOT, mode);

                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
                Step::Done
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is
            //  a parse error; if the parser cannot change the mode flag is
            //  false, set the Document to quirks mode."
            // "In any case, switch the insertion mode to "before html", then
            //  reprocess the token."
            _ => {
                self.parse_error(ParseErrorKind::MissingDoctype);
                self.tree.set_quirks_mode(NodeId::ROOT, QuirksMode::Quirks);
                self.reprocess_in(InsertionMode::BeforeHtml)
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(in crate::parser) fn handle_before_html_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A DOCTYPE token"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => {
                self.insert_comment_to_document(data);
                Step::Done
            }

            // "A character token that is one of U+0009 CHARACTER TABULATION,
            //  U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            //  RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => Step::Done,

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the
            //  Document as the intended parent. Append it to the Document
            //  object. Put this element in the stack of open elements."
            // "Switch the insertion mode to "before head"."
            Token::StartTag { name, .. } if name == "html" => {
                let html = self.create_element_for_token(token, Namespace::Html);
                self.append_to(NodeId::ROOT, html);
                self.stack_of_open_elements.push(html);
                self.insertion_mode = InsertionMode::BeforeHead;
                Step::Done
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.before_html_anything_else()
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            _ => self.before_html_anything_else(),
        }
    }

    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of open
    /// elements."
    /// "Switch the insertion mode to "before head", then reprocess the token."
    fn before_html_anything_else(&mut self) -> Step {
        let html = self.tree.create_element(NodeId::ROOT, "html");
        self.append_to(NodeId::ROOT, html);
        self.stack_of_open_elements.push(html);
        self.reprocess_in(InsertionMode::BeforeHead)
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(in crate::parser) fn handle_before_head_mode(&mut self, token: &Token) -> Step {
        match token {
            // Whitespace: "Ignore the token."
            Token::Character { data } if Self::is_whitespace(*data) => Step::Done,

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

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                let head = self.insert_html_element(token);
                self.head_element_pointer = Some(head);
                self.insertion_mode = InsertionMode::InHead;
                Step::Done
            }

            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.before_head_anything_else()
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "Anything else"
            _ => self.before_head_anything_else(),
        }
    }

    /// "Insert an HTML element for a "head" start tag token with no
    /// attributes."
    /// "Set the head element pointer to the newly created head element."
    /// "Switch the insertion mode to "in head"."
    /// "Reprocess the current token."
    fn before_head_anything_else(&mut self) -> Step {
        let head = self.insert_html_element(&synthetic_start_tag("head"));
        self.head_element_pointer = Some(head);
        self.reprocess_in(InsertionMode::InHead)
    }
}

/// A start tag token with no attributes, for the elements the parser opens on
/// its own.
pub(super) fn synthetic_start_tag(name: &str) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing: false,
        attributes: Vec::new(),
    }
}
