//! [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)

use crate::error::ParseErrorKind;
use crate::parser::core::{HTMLParser, InsertionMode, Step};
use crate::tokenizer::Token;

impl HTMLParser<'_> {
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    pub(in crate::parser) fn handle_in_template_mode(&mut self, token: &Token) -> Step {
        match token {
            // "A character token"
            // "A comment token"
            // "A DOCTYPE token"
            // "Process the token using the rules for the "in body" insertion
            //  mode."
            Token::Character { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.process_using_rules_for(InsertionMode::InBody, token)
            }

            // "A start tag whose tag name is one of: "base", "basefont",
            //  "bgsound", "link", "meta", "noframes", "script", "style",
            //  "template", "title""
            // "An end tag whose tag name is "template""
            // "Process the token using the rules for the "in head" insertion
            //  mode."
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
                self.process_using_rules_for(InsertionMode::InHead, token)
            }
            Token::EndTag { name, .. } if name == "template" => {
                self.process_using_rules_for(InsertionMode::InHead, token)
            }

            // "A start tag whose tag name is one of: "caption", "colgroup",
            //  "tbody", "tfoot", "thead""
            // "Pop the current template insertion mode off the stack of
            //  template insertion modes."
            // "Push "in table" onto the stack of template insertion modes so
            //  that it is the new current template insertion mode."
            // "Switch the insertion mode to "in table", and reprocess the
            //  token."
            //
            // "col" goes to "in column group", "tr" to "in table body", "td"
            // and "th" to "in row", and any other start tag to "in body", the
            // same way.
            Token::StartTag { name, .. } => {
                let mode = match name.as_str() {
                    "caption" | "colgroup" | "tbody" | "tfoot" | "thead" => InsertionMode::InTable,
                    "col" => InsertionMode::InColumnGroup,
                    "tr" => InsertionMode::InTableBody,
                    "td" | "th" => InsertionMode::InRow,
                    _ => InsertionMode::InBody,
                };
                let _ = self.template_insertion_modes.pop();
                self.template_insertion_modes.push(mode);
                self.reprocess_in(mode)
            }

            // "Any other end tag"
            // "Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected(token);
                Step::Done
            }

            // "An end-of-file token"
            Token::EndOfFile => {
                // "If there is no template element on the stack of open
                //  elements, then stop parsing. (fragment case)"
                if !self.stack_contains("template") {
                    self.stopped = true;
                    return Step::Done;
                }
                // "Otherwise, this is a parse error."
                self.tag_error(ParseErrorKind::UnclosedElement, "template");
                // "Pop elements from the stack of open elements until a
                //  template element has been popped from the stack."
                self.pop_until_tag("template");
                // "Clear the list of active formatting elements up to the last
                //  marker."
                self.clear_active_formatting_elements_to_last_marker();
                // "Pop the current template insertion mode off the stack of
                //  template insertion modes."
                let _ = self.template_insertion_modes.pop();
                // "Reset the insertion mode appropriately."
                self.reset_insertion_mode_appropriately();
                // "Reprocess the token."
                Step::Reprocess
            }
        }
    }
}
